// pattern.rs - Compiled pattern backed by regex-automata's meta engine.
//
// Implements the `Matcher` contract: one match attempt at an offset,
// with the NOT_EMPTY_AT_START and ANCHORED options.

use regex_automata::meta::{self, Regex};
use regex_automata::util::primitives::NonMaxUsize;
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input, PatternID};
use regex_syntax::hir::{Hir, HirKind};
use smallvec::{smallvec, SmallVec};

use crate::boundary;
use crate::captures::{CaptureTable, Span, DEFAULT_CAPTURE_LIMIT};
use crate::error::Error;
use crate::matcher::{Matcher, MatcherError, NamedGroup, PatternInfo};
use crate::options::MatchOptions;

/// A compiled regular expression.
///
/// # Examples
///
/// ```
/// use resplice::matcher::Matcher;
/// use resplice::pattern::Pattern;
///
/// let pat = Pattern::new(r"(?<key>\w+)=(?<value>\w+)").unwrap();
/// assert_eq!(pat.captures_len(), 3);
/// assert_eq!(pat.info().find_index("value"), Some(2));
/// ```
pub struct Pattern {
    regex: Regex,
    info: PatternInfo,
    source: String,
}

impl Pattern {
    /// Compile a pattern with default options (Unicode, UTF-8, LF newlines).
    pub fn new(pattern: &str) -> Result<Pattern, Error> {
        PatternBuilder::new(pattern).build()
    }

    /// Create a [`PatternBuilder`] for fine-grained control over compilation.
    pub fn builder(pattern: &str) -> PatternBuilder {
        PatternBuilder::new(pattern)
    }

    /// The pattern source this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of capture groups, including group 0.
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len()
    }

    fn search(
        &self,
        subject: &[u8],
        start: usize,
        anchored: Anchored,
        slots: &mut [Option<NonMaxUsize>],
    ) -> Option<Span> {
        let input = Input::new(subject).range(start..).anchored(anchored);
        self.regex.search_slots(&input, slots)?;
        slot_span(slots, 0)
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

fn slot_span(slots: &[Option<NonMaxUsize>], group: usize) -> Option<Span> {
    let start = slots.get(group * 2).copied().flatten()?;
    let end = slots.get(group * 2 + 1).copied().flatten()?;
    Some(Span::new(start.get(), end.get()))
}

impl Matcher for Pattern {
    fn info(&self) -> &PatternInfo {
        &self.info
    }

    fn attempt(
        &self,
        subject: &[u8],
        start: usize,
        options: MatchOptions,
        table: &mut CaptureTable,
    ) -> Result<bool, MatcherError> {
        if start > subject.len() {
            return Err(MatcherError::OffsetOutOfBounds {
                offset: start,
                len: subject.len(),
            });
        }

        let anchored = if options.contains(MatchOptions::ANCHORED) {
            Anchored::Yes
        } else {
            Anchored::No
        };
        let mut slots: SmallVec<[Option<NonMaxUsize>; 2 * DEFAULT_CAPTURE_LIMIT]> =
            smallvec![None; 2 * self.captures_len()];

        let whole = match self.search(subject, start, anchored, &mut slots) {
            Some(whole) => whole,
            None => return Ok(false),
        };

        if options.contains(MatchOptions::NOT_EMPTY_AT_START)
            && whole.is_empty()
            && whole.start == start
        {
            // The engine has no "not empty" mode. An empty preferred match
            // at `start` is dropped and the search moves one unit on; a
            // lower-ranked non-empty alternative at `start` is never tried.
            if anchored == Anchored::Yes || start >= subject.len() {
                return Ok(false);
            }
            let next = boundary::next_unit_for(&self.info, subject, start);
            if self.search(subject, next, anchored, &mut slots).is_none() {
                return Ok(false);
            }
        }

        let groups = self.captures_len();
        table.fill((0..groups).map(|i| slot_span(&slots, i)));
        Ok(true)
    }
}

// === PatternBuilder ===

/// Builder for compiling a [`Pattern`] with custom options.
///
/// # Examples
///
/// ```
/// use resplice::pattern::Pattern;
/// use resplice::matcher::Matcher;
///
/// let pat = Pattern::builder(r"^end$")
///     .multi_line(true)
///     .crlf(true)
///     .build()
///     .unwrap();
/// assert!(pat.info().treats_crlf_as_newline());
/// ```
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    pattern: String,
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
    ignore_whitespace: bool,
    unicode: bool,
    utf8: bool,
    crlf: bool,
}

impl PatternBuilder {
    /// Create a new builder for the given pattern.
    pub fn new(pattern: &str) -> Self {
        PatternBuilder {
            pattern: pattern.to_string(),
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
            unicode: true,
            utf8: true,
            crlf: false,
        }
    }

    /// Enable or disable case-insensitive matching.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Enable or disable `^`/`$` matching at every line boundary.
    pub fn multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    /// Enable or disable `.` matching line terminators.
    pub fn dot_matches_new_line(mut self, yes: bool) -> Self {
        self.dot_matches_new_line = yes;
        self
    }

    /// Enable or disable extended mode (whitespace and `#` comments ignored).
    pub fn ignore_whitespace(mut self, yes: bool) -> Self {
        self.ignore_whitespace = yes;
        self
    }

    /// Enable or disable Unicode-aware classes and case folding.
    pub fn unicode(mut self, yes: bool) -> Self {
        self.unicode = yes;
        self
    }

    /// Restrict matches (including empty ones) to UTF-8 code point boundaries.
    ///
    /// Also makes the session skip whole code points after an empty match.
    pub fn utf8(mut self, yes: bool) -> Self {
        self.utf8 = yes;
        self
    }

    /// Treat `\r\n` as one line terminator.
    ///
    /// Also makes the session step over `\r\n` as a unit after an empty match.
    pub fn crlf(mut self, yes: bool) -> Self {
        self.crlf = yes;
        self
    }

    /// Compile the pattern into a [`Pattern`].
    pub fn build(self) -> Result<Pattern, Error> {
        let syntax = syntax::Config::new()
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .unicode(self.unicode)
            .utf8(self.utf8)
            .crlf(self.crlf);
        let hir = syntax::parse_with(&self.pattern, &syntax).map_err(|e| syntax_error(&e))?;
        let regex = Regex::builder()
            .configure(Regex::config().utf8_empty(self.utf8))
            .build_from_hir(&hir)
            .map_err(compile_error)?;

        let names = regex
            .group_info()
            .pattern_names(PatternID::ZERO)
            .enumerate()
            .filter_map(|(index, name)| {
                name.map(|name| NamedGroup {
                    name: name.to_string(),
                    index,
                })
            })
            .collect();
        log::debug!(
            "compiled {:?}: {} groups, utf8={}, crlf={}",
            self.pattern,
            regex.captures_len(),
            self.utf8,
            self.crlf
        );

        let parents = group_parents(&hir, regex.captures_len());
        Ok(Pattern {
            regex,
            info: PatternInfo::new(self.utf8, self.crlf, names).with_parents(parents),
            source: self.pattern,
        })
    }
}

/// Innermost enclosing group of every capture group, `0` at top level.
fn group_parents(hir: &Hir, groups: usize) -> Vec<usize> {
    let mut parents = vec![0; groups];
    let mut stack = vec![(hir, 0)];
    while let Some((hir, parent)) = stack.pop() {
        match hir.kind() {
            HirKind::Capture(cap) => {
                let index = cap.index as usize;
                if let Some(slot) = parents.get_mut(index) {
                    *slot = parent;
                }
                stack.push((&*cap.sub, index));
            }
            HirKind::Repetition(rep) => stack.push((&*rep.sub, parent)),
            HirKind::Concat(subs) | HirKind::Alternation(subs) => {
                stack.extend(subs.iter().map(|sub| (sub, parent)));
            }
            _ => {}
        }
    }
    parents
}

fn syntax_error(err: &regex_syntax::Error) -> Error {
    match err {
        regex_syntax::Error::Parse(e) => Error::Compile {
            message: e.kind().to_string(),
            offset: e.span().start.offset,
        },
        regex_syntax::Error::Translate(e) => Error::Compile {
            message: e.kind().to_string(),
            offset: e.span().start.offset,
        },
        _ => Error::Compile {
            message: err.to_string(),
            offset: 0,
        },
    }
}

fn compile_error(err: meta::BuildError) -> Error {
    match err.syntax_error() {
        Some(e) => syntax_error(e),
        None => Error::Compile {
            message: err.to_string(),
            offset: 0,
        },
    }
}
