// replace.rs - In-place capture replacement.
//
// Editing the subject shifts every byte after the edited range, so the
// capture table is re-derived right away. Later captures of the same
// match and the next `advance` then see the edited text.

use crate::error::Error;
use crate::matcher::Matcher;
use crate::session::{Group, Session};

impl<'s, M: Matcher> Session<'s, M> {
    /// Replace the text of a capture group of the current match.
    ///
    /// All other capture offsets are corrected for the length change, so
    /// several groups of one match can be replaced one after the other,
    /// in any order. Fails without touching anything when the group is
    /// out of range, unknown, or did not take part in the match.
    ///
    /// # Examples
    ///
    /// ```
    /// use resplice::session::Session;
    ///
    /// let mut session = Session::new();
    /// session.compile(r"(?<user>\w+)@(?<host>\w+)").unwrap();
    /// session.attach("to: ann@home");
    /// assert!(session.advance().unwrap());
    ///
    /// session.replace("user", "anneliese").unwrap();
    /// assert_eq!(session.capture("host"), b"home");
    /// session.replace("host", "work").unwrap();
    /// assert_eq!(session.subject(), b"to: anneliese@work");
    /// ```
    pub fn replace<'a>(
        &mut self,
        group: impl Into<Group<'a>>,
        with: impl AsRef<[u8]>,
    ) -> Result<(), Error> {
        let group = group.into();
        let with = with.as_ref();
        let index = self.resolve(group);
        let info = self.matcher.as_ref().map(|m| m.info());
        let old = index
            .and_then(|i| {
                self.table
                    .splice(i, with.len(), |outer, inner| info?.contains_group(outer, inner))
            })
            .ok_or_else(|| Error::InvalidCaptureReference(group.to_string()))?;

        self.subject.splice(old.range(), with);
        if let Some(whole) = self.table.whole() {
            self.cursor = Some(whole);
        }
        log::trace!(
            "replaced {} at {}..{} with {} bytes",
            group,
            old.start,
            old.end,
            with.len()
        );
        Ok(())
    }
}
