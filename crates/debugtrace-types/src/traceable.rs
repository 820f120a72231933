use crate::text::{TextSource, U32Str, WideStr, WideString};
use crate::value::{FloatValue, IntKind, Integer, Value};
use std::any::type_name;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::ffi::{CStr, CString, OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

/// Conversion of a host value into the renderable [`Value`] model.
///
/// Implemented for the primitive types, text types, tuples, std
/// collections and the usual smart pointers. For other types, implement it
/// directly or wrap the value with [`display`] / [`debug`].
pub trait Traceable {
    fn to_value(&self) -> Value;

    /// Annotation used for text types, so that `None::<&str>` renders as a
    /// null text pointer rather than a generic `Option`.
    fn text_annotation() -> Option<&'static str> {
        None
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

impl Traceable for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Traceable for char {
    fn to_value(&self) -> Value {
        Value::Char(*self)
    }
}

macro_rules! impl_traceable_int {
    ($($ty:ty => $kind:ident, $repr:ident, $wide:ty;)*) => {
        $(
            impl Traceable for $ty {
                fn to_value(&self) -> Value {
                    Value::Int {
                        kind: IntKind::$kind,
                        value: Integer::$repr(*self as $wide),
                    }
                }
            }
        )*
    };
}

impl_traceable_int! {
    i8 => I8, Signed, i128;
    u8 => U8, Unsigned, u128;
    i16 => I16, Signed, i128;
    u16 => U16, Unsigned, u128;
    i32 => I32, Signed, i128;
    u32 => U32, Unsigned, u128;
    i64 => I64, Signed, i128;
    u64 => U64, Unsigned, u128;
    i128 => I128, Signed, i128;
    u128 => U128, Unsigned, u128;
    isize => Isize, Signed, i128;
    usize => Usize, Unsigned, u128;
}

impl Traceable for f32 {
    fn to_value(&self) -> Value {
        Value::Float(FloatValue::Single(*self))
    }
}

impl Traceable for f64 {
    fn to_value(&self) -> Value {
        Value::Float(FloatValue::Double(*self))
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

macro_rules! impl_traceable_text {
    ($($ty:ty => $annotation:literal, |$s:ident| $source:expr;)*) => {
        $(
            impl Traceable for $ty {
                fn to_value(&self) -> Value {
                    let $s = self;
                    Value::text($annotation, $source)
                }

                fn text_annotation() -> Option<&'static str> {
                    Some($annotation)
                }
            }
        )*
    };
}

impl_traceable_text! {
    str => "&str", |s| TextSource::Utf8(s.to_string());
    String => "String", |s| TextSource::Utf8(s.clone());
    Cow<'_, str> => "Cow<str>", |s| TextSource::Utf8(s.to_string());
    CStr => "&CStr", |s| TextSource::Bytes(s.to_bytes().to_vec());
    CString => "CString", |s| TextSource::Bytes(s.as_bytes().to_vec());
    OsStr => "&OsStr", |s| TextSource::Os(s.to_os_string());
    OsString => "OsString", |s| TextSource::Os(s.clone());
    Path => "&Path", |s| TextSource::Os(s.as_os_str().to_os_string());
    PathBuf => "PathBuf", |s| TextSource::Os(s.as_os_str().to_os_string());
    WideStr<'_> => "WideStr", |s| TextSource::Utf16(s.units().to_vec());
    WideString => "WideString", |s| TextSource::Utf16(s.units().to_vec());
    U32Str<'_> => "U32Str", |s| TextSource::Utf32(s.units().to_vec());
}

// ---------------------------------------------------------------------------
// References and pointers
// ---------------------------------------------------------------------------

macro_rules! impl_traceable_transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Traceable + ?Sized> Traceable for $wrapper<T> {
                fn to_value(&self) -> Value {
                    (**self).to_value()
                }

                fn text_annotation() -> Option<&'static str> {
                    T::text_annotation()
                }
            }
        )*
    };
}

impl_traceable_transparent!(Box, Rc, Arc);

impl<T: Traceable + ?Sized> Traceable for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn text_annotation() -> Option<&'static str> {
        T::text_annotation()
    }
}

impl<T: Traceable + ?Sized> Traceable for &mut T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn text_annotation() -> Option<&'static str> {
        T::text_annotation()
    }
}

/// `Option` plays the role of a nullable pointer.
impl<T: Traceable> Traceable for Option<T> {
    fn to_value(&self) -> Value {
        match (self, T::text_annotation()) {
            (None, Some(annotation)) => Value::null_text(annotation),
            (Some(text), Some(_)) => text.to_value(),
            (None, None) => Value::Pointer {
                type_name: type_name::<Self>(),
                target: None,
            },
            (Some(value), None) => Value::Pointer {
                type_name: type_name::<Self>(),
                target: Some(Box::new(value.to_value())),
            },
        }
    }
}

impl<T: ?Sized> Traceable for *const T {
    fn to_value(&self) -> Value {
        Value::Address {
            type_name: type_name::<Self>(),
            address: (!self.is_null()).then(|| (*self).cast::<()>() as usize),
        }
    }
}

impl<T: ?Sized> Traceable for *mut T {
    fn to_value(&self) -> Value {
        Value::Address {
            type_name: type_name::<Self>(),
            address: (!self.is_null()).then(|| (*self).cast::<()>() as usize),
        }
    }
}

// ---------------------------------------------------------------------------
// Pairs and containers
// ---------------------------------------------------------------------------

impl<A: Traceable, B: Traceable> Traceable for (A, B) {
    fn to_value(&self) -> Value {
        Value::pair(self.0.to_value(), self.1.to_value())
    }
}

fn container<'a, T, I>(type_name: &'static str, elements: I) -> Value
where
    T: Traceable + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    Value::Container {
        type_name,
        elements: elements.into_iter().map(Traceable::to_value).collect(),
    }
}

macro_rules! impl_traceable_sequence {
    ($($ty:ident),*) => {
        $(
            impl<T: Traceable> Traceable for $ty<T> {
                fn to_value(&self) -> Value {
                    container(type_name::<Self>(), self.iter())
                }
            }
        )*
    };
}

impl_traceable_sequence!(Vec, VecDeque, LinkedList, BinaryHeap, BTreeSet);

impl<T: Traceable, S> Traceable for HashSet<T, S> {
    fn to_value(&self) -> Value {
        container(type_name::<Self>(), self.iter())
    }
}

impl<T: Traceable, const N: usize> Traceable for [T; N] {
    fn to_value(&self) -> Value {
        container(type_name::<Self>(), self.iter())
    }
}

impl<T: Traceable> Traceable for [T] {
    fn to_value(&self) -> Value {
        container(type_name::<Self>(), self.iter())
    }
}

fn map<'a, K, V, I>(type_name: &'static str, entries: I) -> Value
where
    K: Traceable + 'a,
    V: Traceable + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    Value::Container {
        type_name,
        elements: entries
            .into_iter()
            .map(|(key, value)| Value::pair(key.to_value(), value.to_value()))
            .collect(),
    }
}

impl<K: Traceable, V: Traceable> Traceable for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        map(type_name::<Self>(), self.iter())
    }
}

impl<K: Traceable, V: Traceable, S> Traceable for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        map(type_name::<Self>(), self.iter())
    }
}

// ---------------------------------------------------------------------------
// Fallbacks
// ---------------------------------------------------------------------------

/// Renders the wrapped value through its `Display` impl.
pub struct Displayed<'a, T: ?Sized>(&'a T);

/// Renders the wrapped value through its `Debug` impl.
pub struct Debugged<'a, T: ?Sized>(&'a T);

pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Displayed<'_, T> {
    Displayed(value)
}

pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Debugged<'_, T> {
    Debugged(value)
}

impl<T: fmt::Display + ?Sized> Traceable for Displayed<'_, T> {
    fn to_value(&self) -> Value {
        Value::Other {
            type_name: type_name::<T>(),
            text: self.0.to_string(),
        }
    }
}

impl<T: fmt::Debug + ?Sized> Traceable for Debugged<'_, T> {
    fn to_value(&self) -> Value {
        Value::Other {
            type_name: type_name::<T>(),
            text: format!("{:?}", self.0),
        }
    }
}

macro_rules! impl_traceable_display {
    ($($ty:ty),*) => {
        $(
            impl Traceable for $ty {
                fn to_value(&self) -> Value {
                    display(self).to_value()
                }
            }
        )*
    };
}

impl_traceable_display!(
    std::net::IpAddr,
    std::net::Ipv4Addr,
    std::net::Ipv6Addr,
    std::net::SocketAddr
);

impl Traceable for std::time::Duration {
    fn to_value(&self) -> Value {
        debug(self).to_value()
    }
}
