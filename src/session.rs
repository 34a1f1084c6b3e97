// session.rs - Match iteration over one subject.
//
// A session binds a compiled pattern to a subject and walks every
// non-overlapping match with `advance`. After an empty match the next
// attempt is retried at the same position for a non-empty match, and
// failing that the scan steps one text unit (code point or CRLF pair)
// forward, so the cursor always makes progress.

use std::borrow::Cow;
use std::fmt;

use crate::boundary;
use crate::captures::{CaptureTable, Span, DEFAULT_CAPTURE_LIMIT};
use crate::error::Error;
use crate::matcher::{Matcher, MatcherError};
use crate::options::MatchOptions;
use crate::pattern::Pattern;
use crate::subject::Subject;

/// A capture group referenced by index or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for Group<'_> {
    fn from(index: usize) -> Self {
        Group::Index(index)
    }
}

impl<'a> From<&'a str> for Group<'a> {
    fn from(name: &'a str) -> Self {
        Group::Name(name)
    }
}

impl<'a> From<&'a String> for Group<'a> {
    fn from(name: &'a String) -> Self {
        Group::Name(name)
    }
}

impl fmt::Display for Group<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Index(i) => write!(f, "#{}", i),
            Group::Name(name) => write!(f, "{:?}", name),
        }
    }
}

/// Per-session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum capture groups (including group 0) kept per match.
    pub capture_limit: usize,
    /// Report an empty match that starts right where the previous,
    /// non-empty match ended (Perl `//g` behaviour). Off by default.
    pub empty_after_match: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            capture_limit: DEFAULT_CAPTURE_LIMIT,
            empty_after_match: false,
        }
    }
}

/// Iterates the matches of one pattern over one subject, with capture
/// access and in-place capture replacement.
///
/// Not thread-safe: `advance` and `replace` mutate the session. Separate
/// sessions over separate subjects can share a `&Pattern`.
///
/// No limit is placed on the work a single match attempt may do; callers
/// scanning untrusted patterns must bound it themselves.
///
/// # Examples
///
/// ```
/// use resplice::session::Session;
///
/// let mut session = Session::new();
/// session.compile(r"a*").unwrap();
/// session.attach("baaab");
///
/// let mut spans = Vec::new();
/// while session.advance().unwrap() {
///     let m = session.captures().whole().unwrap();
///     spans.push(m.range());
/// }
/// assert_eq!(spans, vec![0..0, 1..4, 5..5]);
/// ```
#[derive(Debug)]
pub struct Session<'s, M = Pattern> {
    pub(crate) matcher: Option<M>,
    pub(crate) subject: Subject<'s>,
    pub(crate) table: CaptureTable,
    /// Span of the last match; `None` before the first one.
    pub(crate) cursor: Option<Span>,
    exhausted: bool,
    config: SessionConfig,
}

impl<'s> Session<'s, Pattern> {
    /// Create a session with no pattern and an empty subject.
    pub fn new() -> Self {
        Session::unbound(SessionConfig::default())
    }

    /// Compile `pattern` and use it for this session.
    ///
    /// The previous pattern is dropped first, so on error the session is
    /// left without one. The subject is kept and the scan restarts.
    pub fn compile(&mut self, pattern: &str) -> Result<(), Error> {
        self.matcher = None;
        self.reset();
        match Pattern::new(pattern) {
            Ok(pat) => {
                self.matcher = Some(pat);
                Ok(())
            }
            Err(err) => {
                log::debug!("failed to compile {:?}: {}", pattern, err);
                Err(err)
            }
        }
    }
}

impl<'s, M> Session<'s, M> {
    fn unbound(config: SessionConfig) -> Self {
        Session {
            matcher: None,
            subject: Subject::default(),
            table: CaptureTable::new(config.capture_limit),
            cursor: None,
            exhausted: false,
            config,
        }
    }

    /// Create a session over an already compiled pattern.
    pub fn with_pattern(matcher: M) -> Self {
        Self::with_config(matcher, SessionConfig::default())
    }

    /// Create a session with custom settings.
    pub fn with_config(matcher: M, config: SessionConfig) -> Self {
        let mut session = Self::unbound(config);
        session.matcher = Some(matcher);
        session
    }

    /// Swap in another pattern. The subject is kept and the scan restarts.
    pub fn set_matcher(&mut self, matcher: M) {
        self.matcher = Some(matcher);
        self.reset();
    }

    /// Drop the pattern and the subject.
    pub fn clear(&mut self) {
        self.matcher = None;
        self.subject = Subject::default();
        self.reset();
    }

    pub fn matcher(&self) -> Option<&M> {
        self.matcher.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Bind a subject, by copy or by reference, and restart the scan.
    ///
    /// ```
    /// use resplice::session::Session;
    ///
    /// let mut buf = b"id=7".to_vec();
    /// let mut session = Session::new();
    /// session.compile(r"\d").unwrap();
    /// session.attach(&mut buf);
    /// assert!(session.advance().unwrap());
    /// session.replace(0, "42").unwrap();
    /// drop(session);
    /// assert_eq!(buf, b"id=42");
    /// ```
    pub fn attach(&mut self, subject: impl Into<Subject<'s>>) {
        self.subject = subject.into();
        self.reset();
        log::debug!(
            "attached {} subject of {} bytes",
            if self.subject.is_borrowed() { "borrowed" } else { "owned" },
            self.subject.len()
        );
    }

    fn reset(&mut self) {
        self.table.clear();
        self.cursor = None;
        self.exhausted = false;
    }

    /// Current, possibly edited, subject bytes.
    pub fn subject(&self) -> &[u8] {
        self.subject.as_bytes()
    }

    pub fn subject_str(&self) -> Cow<'_, str> {
        self.subject.to_str_lossy()
    }

    /// Capture table of the current match; empty when there is none.
    pub fn captures(&self) -> &CaptureTable {
        &self.table
    }

    /// Whether the scan has finished. Further `advance` calls return `Ok(false)`.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Byte offset where the current match starts.
    pub fn match_start(&self) -> Option<usize> {
        self.table.whole().map(|m| m.start)
    }

    /// Number of capture groups in the current match, including group 0.
    pub fn capture_count(&self) -> usize {
        self.table.len()
    }
}

impl<'s, M: Matcher> Session<'s, M> {
    /// Move to the next match.
    ///
    /// Returns `Ok(true)` with a new current match, `Ok(false)` once the
    /// subject is exhausted (and on every call after that), or an error if
    /// the matcher failed, which also ends the scan.
    pub fn advance(&mut self) -> Result<bool, Error> {
        let matcher = self.matcher.as_ref().ok_or(Error::NotCompiled)?;
        if self.exhausted {
            return Ok(false);
        }

        let subject = self.subject.as_bytes();
        let table = &mut self.table;
        let result = match self.cursor {
            None => attempt(matcher, subject, 0, MatchOptions::empty(), table),
            Some(last) if last.is_empty() => {
                if last.end >= subject.len() {
                    Ok(false)
                } else {
                    // Look for a non-empty match at the same spot first;
                    // otherwise resume one text unit further on.
                    match attempt(matcher, subject, last.end, MatchOptions::RETRY_AFTER_EMPTY, table)
                    {
                        Ok(false) => {
                            let next = boundary::next_unit_for(matcher.info(), subject, last.end);
                            attempt(matcher, subject, next, MatchOptions::empty(), table)
                        }
                        other => other,
                    }
                }
            }
            Some(last) => {
                let options = if self.config.empty_after_match {
                    MatchOptions::empty()
                } else {
                    MatchOptions::NOT_EMPTY_AT_START
                };
                attempt(matcher, subject, last.end, options, table)
            }
        };

        match result {
            Ok(true) => match self.table.whole() {
                Some(whole) => {
                    self.cursor = Some(whole);
                    Ok(true)
                }
                None => self.fail(MatcherError::MissingWholeMatch),
            },
            Ok(false) => {
                self.table.clear();
                self.exhausted = true;
                Ok(false)
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: MatcherError) -> Result<bool, Error> {
        log::error!("matcher error: {}", err);
        self.table.clear();
        self.exhausted = true;
        Err(err.into())
    }

    pub(crate) fn resolve(&self, group: Group<'_>) -> Option<usize> {
        match group {
            Group::Index(i) => Some(i),
            Group::Name(name) => self.find_index(name),
        }
    }

    /// Bytes of a capture group in the current match.
    ///
    /// Empty when the index is out of range, the name is unknown or the
    /// group did not take part in the match.
    pub fn capture<'a>(&self, group: impl Into<Group<'a>>) -> &[u8] {
        self.resolve(group.into())
            .and_then(|i| self.table.get(i))
            .and_then(|span| self.subject.as_bytes().get(span.range()))
            .unwrap_or_default()
    }

    /// Lossy UTF-8 view of [`capture`](Session::capture).
    pub fn capture_str<'a>(&self, group: impl Into<Group<'a>>) -> Cow<'_, str> {
        String::from_utf8_lossy(self.capture(group))
    }

    /// Group index of a named group.
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.matcher.as_ref()?.info().find_index(name)
    }

    /// Name of the `i`-th named group in declaration order, or `""`.
    pub fn group_name(&self, i: usize) -> &str {
        self.matcher
            .as_ref()
            .and_then(|m| m.info().group_name(i))
            .unwrap_or("")
    }

    /// Number of named groups in the pattern.
    pub fn group_count(&self) -> usize {
        self.matcher
            .as_ref()
            .map_or(0, |m| m.info().named_groups().len())
    }
}

impl<M> Default for Session<'_, M> {
    fn default() -> Self {
        Session::unbound(SessionConfig::default())
    }
}

/// One matcher call, with the table sanity checks a session relies on.
fn attempt<M: Matcher>(
    matcher: &M,
    subject: &[u8],
    start: usize,
    options: MatchOptions,
    table: &mut CaptureTable,
) -> Result<bool, MatcherError> {
    log::trace!("attempt at {} with {:?}", start, options);
    if !matcher.attempt(subject, start, options, table)? {
        return Ok(false);
    }

    let len = subject.len();
    if let Some(bad) = table.iter().flatten().find(|s| s.start > s.end || s.end > len) {
        return Err(MatcherError::Engine(format!(
            "capture {}..{} outside subject of {} bytes",
            bad.start, bad.end, len
        )));
    }
    if table.dropped() > 0 {
        log::warn!(
            "too many captured groups, reporting only {} of {}",
            table.len(),
            table.len() + table.dropped()
        );
    }
    Ok(true)
}
