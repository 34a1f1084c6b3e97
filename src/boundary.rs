// boundary.rs - Advancing a scan position by one text unit.
//
// After an empty match the scan has to move forward without landing
// inside a multi-byte code point or between the halves of a CRLF pair.

use crate::matcher::PatternInfo;

#[inline]
fn utf8_istail(c: u8) -> bool {
    (c & 0xc0) == 0x80
}

/// Offset of the next text unit after `pos`.
///
/// A `\r\n` pair counts as one unit when `crlf` is set; otherwise, with
/// `utf8` set, a whole code point is skipped; otherwise a single byte.
/// Never returns more than `subject.len()`.
pub fn next_unit(subject: &[u8], pos: usize, utf8: bool, crlf: bool) -> usize {
    let end = subject.len();
    if pos >= end {
        return end;
    }

    if crlf && subject[pos] == b'\r' && subject.get(pos + 1) == Some(&b'\n') {
        return pos + 2;
    }

    let mut next = pos + 1;
    if utf8 {
        while next < end && utf8_istail(subject[next]) {
            next += 1;
        }
    }
    next
}

/// [`next_unit`] using the stepping rules of a compiled pattern.
pub fn next_unit_for(info: &PatternInfo, subject: &[u8], pos: usize) -> usize {
    next_unit(subject, pos, info.is_utf8(), info.treats_crlf_as_newline())
}
