// prelude.rs - Convenient re-exports.
//
//! # Prelude
//!
//! ```
//! use resplice::prelude::*;
//!
//! let mut session = Session::with_pattern(Pattern::new(r"\d+").unwrap());
//! session.attach("answer: 42");
//! assert!(session.advance().unwrap());
//! assert_eq!(session.capture(0), b"42");
//! ```

pub use crate::captures::{CaptureTable, Span};
pub use crate::error::Error;
pub use crate::matcher::{Matcher, MatcherError, PatternInfo};
pub use crate::options::MatchOptions;
pub use crate::pattern::{Pattern, PatternBuilder};
pub use crate::session::{Group, Session, SessionConfig};
pub use crate::subject::Subject;
