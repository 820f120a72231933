use crate::text::TextSource;

/// Renderable snapshot of a host value.
///
/// Every supported value category maps to exactly one variant, so the
/// renderer can dispatch with a single `match` instead of per-type overloads.
/// Type names are the raw `std::any::type_name` strings; shortening is a
/// rendering concern.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Char(char),
    Int { kind: IntKind, value: Integer },
    Float(FloatValue),

    /// Text of any width. `source: None` is a null text pointer.
    Text {
        annotation: &'static str,
        source: Option<TextSource>,
    },

    /// Key/value pair (tuples and map entries)
    Pair(Box<Value>, Box<Value>),

    Container {
        type_name: &'static str,
        elements: Vec<Value>,
    },

    /// Nullable reference to another value (`Option<T>`).
    Pointer {
        type_name: &'static str,
        target: Option<Box<Value>>,
    },

    /// Raw pointer: only the address is captured, the pointee is never read.
    Address {
        type_name: &'static str,
        address: Option<usize>,
    },

    /// Generic fallback: annotated default textual conversion.
    Other { type_name: &'static str, text: String },
}

impl Value {
    pub fn pair(key: Value, value: Value) -> Self {
        Value::Pair(Box::new(key), Box::new(value))
    }

    pub fn text(annotation: &'static str, source: TextSource) -> Self {
        Value::Text {
            annotation,
            source: Some(source),
        }
    }

    pub fn null_text(annotation: &'static str) -> Self {
        Value::Text {
            annotation,
            source: None,
        }
    }
}

/// Integer width and signedness; selects the literal suffix or annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    I128,
    U128,
    Isize,
    Usize,
}

impl IntKind {
    /// Prefix annotation for the narrow kinds, e.g. `(i8)`.
    pub fn annotation(self) -> Option<&'static str> {
        match self {
            IntKind::I8 => Some("i8"),
            IntKind::U8 => Some("u8"),
            IntKind::I16 => Some("i16"),
            IntKind::U16 => Some("u16"),
            _ => None,
        }
    }

    /// Literal suffix: `u` marks unsigned, `l`/`ll`/`z` mark the width.
    pub fn suffix(self) -> &'static str {
        match self {
            IntKind::I8 | IntKind::U8 | IntKind::I16 | IntKind::U16 | IntKind::I32 => "",
            IntKind::U32 => "u",
            IntKind::I64 => "l",
            IntKind::U64 => "ul",
            IntKind::I128 => "ll",
            IntKind::U128 => "ull",
            IntKind::Isize => "z",
            IntKind::Usize => "uz",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    Signed(i128),
    Unsigned(u128),
}

impl std::fmt::Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Signed(value) => write!(f, "{}", value),
            Integer::Unsigned(value) => write!(f, "{}", value),
        }
    }
}

/// Floats keep their native precision so `1.1f32` is not widened to `1.100000023841858`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatValue {
    Single(f32),
    Double(f64),
}
