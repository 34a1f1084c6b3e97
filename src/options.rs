// options.rs - Per-attempt match options.

use bitflags::bitflags;

bitflags! {
    /// Options for a single [`Matcher::attempt`](crate::matcher::Matcher::attempt).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MatchOptions: u32 {
        /// Reject an empty match that begins exactly at the start offset.
        ///
        /// [`Pattern`](crate::pattern::Pattern) only approximates this: it
        /// drops the engine's preferred match when that is empty at the start
        /// offset, so a lower-ranked non-empty alternative there (the `\w+`
        /// in `\b|\w+`) is not found.
        const NOT_EMPTY_AT_START = 1;
        /// Only accept a match that begins exactly at the start offset.
        const ANCHORED = 1 << 1;
    }
}

impl MatchOptions {
    /// Options for retrying at the position of a previous empty match.
    pub const RETRY_AFTER_EMPTY: MatchOptions =
        MatchOptions::NOT_EMPTY_AT_START.union(MatchOptions::ANCHORED);
}
