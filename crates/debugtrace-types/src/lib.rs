pub mod location;
pub mod text;
pub mod traceable;
pub mod value;

pub use location::SourceLocation;
pub use text::{TextSource, U32Str, WideStr, WideString};
pub use traceable::{Debugged, Displayed, Traceable, debug, display};
pub use value::{FloatValue, IntKind, Integer, Value};
