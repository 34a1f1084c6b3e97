// captures.rs - Fixed-capacity capture table.
//
// One `Option<Span>` per capture group, group 0 being the whole match.
// Replacement offset correction lives here so the session only has to
// edit the subject bytes.

use std::ops::Range;

use smallvec::SmallVec;

/// Default number of groups (including group 0) a table keeps per match.
pub const DEFAULT_CAPTURE_LIMIT: usize = 16;

/// Byte range `[start, end)` of a participating capture group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the start of the group.
    pub start: usize,
    /// Byte offset of the end of the group (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a span; `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> Span {
        debug_assert!(start <= end, "invalid span {}..{}", start, end);
        Span { start, end }
    }

    /// Length of the group in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-width group.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a `Range`, for slicing the subject.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Span {
        Span::new(range.start, range.end)
    }
}

/// Capture groups of the current match.
///
/// The table never holds more than [`limit`](CaptureTable::limit) groups.
/// Groups beyond that are counted in [`dropped`](CaptureTable::dropped)
/// and otherwise discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTable {
    groups: SmallVec<[Option<Span>; DEFAULT_CAPTURE_LIMIT]>,
    limit: usize,
    dropped: usize,
}

impl CaptureTable {
    /// Create an empty table holding at most `limit` groups.
    ///
    /// A limit of zero is raised to one so group 0 always fits.
    pub fn new(limit: usize) -> CaptureTable {
        let limit = limit.max(1);
        CaptureTable {
            groups: SmallVec::with_capacity(limit.min(DEFAULT_CAPTURE_LIMIT)),
            limit,
            dropped: 0,
        }
    }

    /// Forget the current match.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.dropped = 0;
    }

    /// Replace the contents with `groups`, keeping at most `limit` of them.
    pub fn fill<I>(&mut self, groups: I)
    where
        I: IntoIterator<Item = Option<Span>>,
    {
        self.clear();
        for group in groups {
            if self.groups.len() < self.limit {
                self.groups.push(group);
            } else {
                self.dropped += 1;
            }
        }
    }

    /// Maximum number of groups kept per match.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of groups the last fill had to discard.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of groups in the table (including group 0).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` when there is no current match.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Span of group `index`, or `None` if out of range or not participating.
    pub fn get(&self, index: usize) -> Option<Span> {
        self.groups.get(index).copied().flatten()
    }

    /// Span of the whole match.
    pub fn whole(&self) -> Option<Span> {
        self.get(0)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<Span>> + '_ {
        self.groups.iter().copied()
    }

    /// Re-derive every span after group `index` was overwritten by
    /// `new_len` bytes.
    ///
    /// The replaced group becomes `[start, start + new_len)`. Groups that
    /// enclose it keep their start and move their end. Groups at or after
    /// its end move by the length delta. Groups before it stay put, and
    /// offsets that fell strictly inside it are clamped into the new text.
    ///
    /// `contains(outer, inner)` reports whether group `outer` holds group
    /// `inner` in the pattern, or `None` when that is not known. It settles
    /// groups that only touch an empty replaced range: a group that
    /// contains the replaced one takes the inserted text, an earlier
    /// group ending there stays in front of it and a later group starting
    /// there moves behind it. Without nesting information only group 0 and
    /// groups reaching past the insertion point count as containing it.
    ///
    /// Returns the span that was replaced.
    pub fn splice<F>(&mut self, index: usize, new_len: usize, contains: F) -> Option<Span>
    where
        F: Fn(usize, usize) -> Option<bool>,
    {
        let old = self.get(index)?;
        let (a, b) = (old.start, old.end);
        let new_end = a + new_len;
        // `late` puts an offset sitting on an empty replaced range behind
        // the inserted text.
        let remap = |p: usize, late: bool| {
            if p < a || (p == a && !late) {
                p
            } else if p >= b {
                p - b + new_end
            } else {
                a + (p - a).min(new_len)
            }
        };

        for (i, slot) in self.groups.iter_mut().enumerate() {
            let Some(span) = slot else { continue };
            *span = if i == index {
                Span::new(a, new_end)
            } else if span.start <= a
                && span.end >= b
                && contains(i, index).unwrap_or(i == 0 || (i < index && span.end > a))
            {
                Span::new(span.start, span.end - b + new_end)
            } else {
                let late = i > index && !contains(index, i).unwrap_or(false);
                Span::new(remap(span.start, late), remap(span.end, late))
            };
        }
        Some(old)
    }
}

impl Default for CaptureTable {
    fn default() -> Self {
        CaptureTable::new(DEFAULT_CAPTURE_LIMIT)
    }
}
