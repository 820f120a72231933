pub mod config;
pub mod error;
pub mod global;
pub mod scope;
pub mod sink;
pub mod state;
pub mod tracer;

pub use config::{CONFIG_PATH_ENV, ColorMode, Config, SinkTarget};
pub use error::{Error, Result};
pub use global::{global, with_global};
pub use scope::{Scope, lock};
pub use sink::{FileSink, MemorySink, Sink, StderrSink, StdoutSink, open_sink};
pub use state::NestingState;
pub use tracer::{START_MESSAGE, Tracer};
