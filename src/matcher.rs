// matcher.rs - Contract between a session and the underlying regex engine.
//
// A session only needs one operation from the engine (a single match
// attempt at an offset) plus a little static metadata about the compiled
// pattern. Everything else is the engine's business.

use std::fmt;

use crate::captures::CaptureTable;
use crate::options::MatchOptions;

/// A named capture group and its group index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGroup {
    pub name: String,
    pub index: usize,
}

/// Static metadata about a compiled pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternInfo {
    utf8: bool,
    crlf: bool,
    names: Vec<NamedGroup>,
    /// Parent group of every group, group 0 being the root. Empty when
    /// the nesting is not known.
    parents: Vec<usize>,
}

impl PatternInfo {
    /// `names` must be in declaration order.
    pub fn new(utf8: bool, crlf: bool, names: Vec<NamedGroup>) -> PatternInfo {
        PatternInfo {
            utf8,
            crlf,
            names,
            parents: Vec::new(),
        }
    }

    /// Attach group nesting: `parents[i]` is the innermost group around
    /// group `i`, `0` for top-level groups. Every parent index must be
    /// lower than its child's.
    pub fn with_parents(mut self, parents: Vec<usize>) -> PatternInfo {
        self.parents = parents;
        self
    }

    /// The pattern only matches at UTF-8 code point boundaries.
    pub fn is_utf8(&self) -> bool {
        self.utf8
    }

    /// The pattern treats `\r\n` as a single line terminator.
    pub fn treats_crlf_as_newline(&self) -> bool {
        self.crlf
    }

    /// Named groups in declaration order.
    pub fn named_groups(&self) -> &[NamedGroup] {
        &self.names
    }

    /// Group index for `name`. Linear scan; group counts are small.
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.names.iter().find(|g| g.name == name).map(|g| g.index)
    }

    /// Name of the `i`-th named group in declaration order.
    pub fn group_name(&self, i: usize) -> Option<&str> {
        self.names.get(i).map(|g| g.name.as_str())
    }

    /// Whether group `outer` contains group `inner` in the pattern source.
    ///
    /// Group 0 contains every other group. `None` when the nesting is not
    /// known or an index is out of range.
    pub fn contains_group(&self, outer: usize, inner: usize) -> Option<bool> {
        if outer == 0 {
            return Some(inner != 0);
        }
        self.parents.get(outer)?;
        let mut group = inner;
        loop {
            let parent = *self.parents.get(group)?;
            if parent >= group {
                return Some(false);
            }
            if parent == outer {
                return Some(true);
            }
            group = parent;
        }
    }
}

/// Hard failure reported by a matcher, distinct from "no match".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    /// The start offset lies beyond the end of the subject.
    OffsetOutOfBounds { offset: usize, len: usize },
    /// A successful attempt did not report the whole-match group.
    MissingWholeMatch,
    /// Engine-specific failure (resource exhaustion and the like).
    Engine(String),
}

impl fmt::Display for MatcherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherError::OffsetOutOfBounds { offset, len } => {
                write!(f, "start offset {} is beyond subject length {}", offset, len)
            }
            MatcherError::MissingWholeMatch => write!(f, "match reported without group 0"),
            MatcherError::Engine(message) => write!(f, "matcher failure: {}", message),
        }
    }
}

impl std::error::Error for MatcherError {}

/// A compiled pattern that can be asked for one match at a time.
pub trait Matcher {
    /// Static metadata about the pattern.
    fn info(&self) -> &PatternInfo;

    /// Try to match `subject` starting at byte offset `start`.
    ///
    /// On a match, `table` is refilled with every capture group (group 0
    /// first) and `Ok(true)` is returned. `Ok(false)` means no match and
    /// leaves `table` unspecified. Must not mutate anything but `table`.
    fn attempt(
        &self,
        subject: &[u8],
        start: usize,
        options: MatchOptions,
        table: &mut CaptureTable,
    ) -> Result<bool, MatcherError>;
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn info(&self) -> &PatternInfo {
        (**self).info()
    }

    fn attempt(
        &self,
        subject: &[u8],
        start: usize,
        options: MatchOptions,
        table: &mut CaptureTable,
    ) -> Result<bool, MatcherError> {
        (**self).attempt(subject, start, options, table)
    }
}
