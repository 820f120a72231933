pub mod clock;
pub mod encoding;
pub mod indent;
pub mod path;
pub mod type_name;

pub use clock::{Clock, DEFAULT_DATETIME_FORMAT, FixedClock, SystemClock, format_timestamp};
pub use encoding::{CP_US_ASCII, CP_UTF8, CodePageEncoder, EncodingError, TextEncoder, to_narrow_or_placeholder};
pub use indent::indent_string;
pub use path::short_file_name;
pub use type_name::{TypeNameStyle, short_type_name};
