//! # streamfilter-core
//!
//! Turns a stream-json session transcript into readable console lines and
//! error-log entries.
//!
//! - [`Event`] - Lenient decoding of one input line
//! - [`Formatter`] - Event to console lines and error reports
//! - [`ToolCallTable`] - Remembers tool calls so failures can be attributed
//! - [`Transducer`] - Drives the formatter over an input stream

mod calls;
mod error;
mod event;
mod formatter;
mod text;
mod tools;
mod transducer;

pub use calls::{ToolCall, ToolCallTable};
pub use error::TransducerError;
pub use event::{ContentBlock, Denial, Event, SessionResult};
pub use formatter::{Formatter, Output, DENIAL_MESSAGE};
pub use text::{stringify, truncate};
pub use tools::{describe, Tool};
pub use transducer::{Transducer, TransducerStats};
