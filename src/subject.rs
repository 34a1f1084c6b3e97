// subject.rs - The text a session scans and edits.

use std::borrow::Cow;
use std::ops::Range;

/// Subject buffer of a session: a private copy or a caller's buffer.
///
/// Both variants scan and edit the same way. With [`Subject::Borrowed`]
/// every replacement lands directly in the caller's `Vec`.
#[derive(Debug)]
pub enum Subject<'s> {
    Owned(Vec<u8>),
    Borrowed(&'s mut Vec<u8>),
}

impl<'s> Subject<'s> {
    /// Copy `text` into a session-owned buffer.
    pub fn copy(text: impl AsRef<[u8]>) -> Subject<'s> {
        Subject::Owned(text.as_ref().to_vec())
    }

    /// Reference the caller's buffer for the lifetime of the session.
    pub fn reference(buf: &'s mut Vec<u8>) -> Subject<'s> {
        Subject::Borrowed(buf)
    }

    /// Current contents, including any replacements made so far.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Subject::Owned(buf) => buf.as_slice(),
            Subject::Borrowed(buf) => buf.as_slice(),
        }
    }

    /// Lossy UTF-8 view of the current contents.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Returns `true` when edits go to a caller's buffer.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Subject::Borrowed(_))
    }

    /// Overwrite `range` with `with`.
    pub(crate) fn splice(&mut self, range: Range<usize>, with: &[u8]) {
        let buf = match self {
            Subject::Owned(buf) => buf,
            Subject::Borrowed(buf) => &mut **buf,
        };
        buf.splice(range, with.iter().copied());
    }
}

impl Default for Subject<'_> {
    fn default() -> Self {
        Subject::Owned(Vec::new())
    }
}

impl From<Vec<u8>> for Subject<'_> {
    fn from(buf: Vec<u8>) -> Self {
        Subject::Owned(buf)
    }
}

impl From<String> for Subject<'_> {
    fn from(text: String) -> Self {
        Subject::Owned(text.into_bytes())
    }
}

impl From<&str> for Subject<'_> {
    fn from(text: &str) -> Self {
        Subject::copy(text)
    }
}

impl From<&[u8]> for Subject<'_> {
    fn from(text: &[u8]) -> Self {
        Subject::copy(text)
    }
}

impl<'s> From<&'s mut Vec<u8>> for Subject<'s> {
    fn from(buf: &'s mut Vec<u8>) -> Self {
        Subject::Borrowed(buf)
    }
}
