use serde::{Deserialize, Serialize};

/// How `std::any::type_name` output is shown in type annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeNameStyle {
    /// Module paths stripped: `Vec<String>`
    #[default]
    Short,
    /// As reported by the compiler: `alloc::vec::Vec<alloc::string::String>`
    Full,
    /// Fixed `?` placeholder
    Hidden,
}

impl TypeNameStyle {
    pub fn apply(self, type_name: &str) -> String {
        match self {
            TypeNameStyle::Short => short_type_name(type_name),
            TypeNameStyle::Full => type_name.to_string(),
            TypeNameStyle::Hidden => "?".to_string(),
        }
    }
}

/// Strip module paths from every path segment of a type name.
pub fn short_type_name(type_name: &str) -> String {
    let mut short = String::with_capacity(type_name.len());
    let mut segment_start = 0;
    let mut chars = type_name.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ':' && chars.peek() == Some(&':') {
            chars.next();
            if short.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
                short.truncate(segment_start);
            } else {
                short.push_str("::");
                segment_start = short.len();
            }
            continue;
        }
        short.push(ch);
        if !(ch.is_alphanumeric() || ch == '_') {
            segment_start = short.len();
        }
    }
    short
}
