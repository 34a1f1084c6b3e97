//! # resplice
//!
//! Match iteration, named captures and in-place capture replacement on top
//! of a compiled regular expression.
//!
//! A regex engine answers one question: "is there a match starting at or
//! after this offset?". `resplice` turns that into a full scan of a subject:
//!
//! - every non-overlapping match, with empty matches handled so the scan
//!   always moves forward and never resumes inside a UTF-8 code point or a
//!   `\r\n` pair;
//! - capture access by index and by group name;
//! - replacement of captured text in the subject itself, with every other
//!   capture offset corrected so later replacements and later matches stay
//!   consistent.
//!
//! ## Quick Start
//!
//! ```rust
//! use resplice::prelude::*;
//!
//! let mut session = Session::new();
//! session.compile(r"(?<user>\w+)@(?<host>\w+)\.com").unwrap();
//! session.attach("mail bob@example.com or amy@test.com");
//!
//! let mut users = Vec::new();
//! while session.advance().unwrap() {
//!     users.push(session.capture_str("user").into_owned());
//!     session.replace("host", "example").unwrap();
//! }
//! assert_eq!(users, ["bob", "amy"]);
//! assert_eq!(session.subject_str(), "mail bob@example.com or amy@example.com");
//! ```
//!
//! One compiled [`Pattern`](pattern::Pattern) can serve many sessions:
//!
//! ```rust
//! use resplice::prelude::*;
//!
//! let digits = Pattern::new(r"\d+").unwrap();
//! for line in ["a1b22", "333"] {
//!     let mut session = Session::with_pattern(&digits);
//!     session.attach(line);
//!     let mut n = 0;
//!     while session.advance().unwrap() {
//!         n += 1;
//!     }
//!     assert!(n > 0);
//! }
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | Match iteration and capture access |
//! | [`replace`] | In-place capture replacement |
//! | [`captures`] | Capture table and offset correction |
//! | [`matcher`] | Contract with the regex engine |
//! | [`pattern`] | `regex-automata` backed matcher |
//! | [`boundary`] | Text-unit stepping after empty matches |
//! | [`subject`] | Owned or borrowed subject buffer |
//! | [`options`] | Per-attempt match options |
//! | [`error`] | Error type |

pub mod boundary;
pub mod captures;
pub mod error;
pub mod matcher;
pub mod options;
pub mod pattern;
pub mod prelude;
pub mod replace;
pub mod session;
pub mod subject;
