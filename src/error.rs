// error.rs - Error type for compiling, scanning and replacing.

use std::fmt;

use crate::matcher::MatcherError;

/// Error type for session operations.
///
/// "No match" is never an error; [`Session::advance`](crate::session::Session::advance)
/// reports it as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern failed to compile.
    Compile {
        message: String,
        /// Approximate byte offset of the problem in the pattern.
        offset: usize,
    },
    /// The session has no compiled pattern.
    NotCompiled,
    /// The matcher failed while searching. Ends the scan.
    Matcher(MatcherError),
    /// A capture index or name that does not refer to a participating group.
    InvalidCaptureReference(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Compile { message, offset } => {
                write!(f, "compile error at offset {}: {}", offset, message)
            }
            Error::NotCompiled => write!(f, "pattern not compiled"),
            Error::Matcher(err) => write!(f, "{}", err),
            Error::InvalidCaptureReference(group) => {
                write!(f, "invalid capture reference: {}", group)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Matcher(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MatcherError> for Error {
    fn from(err: MatcherError) -> Self {
        Error::Matcher(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_impl() {
        let err = Error::Compile {
            message: "unclosed group".into(),
            offset: 0,
        };
        assert_eq!(err.to_string(), "compile error at offset 0: unclosed group");
        assert_eq!(Error::NotCompiled.to_string(), "pattern not compiled");
        assert_eq!(
            Error::InvalidCaptureReference("\"TLD\"".into()).to_string(),
            "invalid capture reference: \"TLD\""
        );
    }

    #[test]
    fn from_matcher_error() {
        let err = Error::from(MatcherError::Engine("out of memory".into()));
        assert!(matches!(err, Error::Matcher(MatcherError::Engine(_))));
        assert_eq!(err.to_string(), "matcher failure: out of memory");
    }

    #[test]
    fn error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(Error::from(MatcherError::MissingWholeMatch));
        assert!(err.source().is_some());
        let err: Box<dyn std::error::Error> = Box::new(Error::NotCompiled);
        assert!(err.source().is_none());
    }
}
