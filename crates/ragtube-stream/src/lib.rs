//! ragtube-stream: incremental NDJSON answer decoding.
//!
//! Three synchronous stages, no I/O:
//! - [`framer::LineFramer`]: raw byte chunks to complete text lines
//! - [`record::decode`]: one line to an optional [`record::StreamRecord`]
//! - [`dispatch::apply`]: one record applied to a [`dispatch::SessionState`]
//!
//! ```
//! use ragtube_stream::{apply, decode, Flow, LineFramer, SessionState};
//!
//! let mut framer = LineFramer::new();
//! let mut state = SessionState::begin();
//! let mut flow = Flow::Continue;
//! for chunk in ["{\"text\":\"Hel", "lo\"}\n{\"done\":tr", "ue}\n"] {
//!     for line in framer.feed(chunk.as_bytes()) {
//!         if let Some(record) = decode(&line) {
//!             flow = apply(&record, &mut state);
//!         }
//!     }
//! }
//! assert_eq!(state.answer, "Hello");
//! assert_eq!(flow, Flow::Stop);
//! ```

pub mod dispatch;
pub mod framer;
pub mod record;

pub use dispatch::{apply, Flow, SessionState};
pub use framer::{LineFramer, Lines};
pub use record::{decode, StreamRecord};
