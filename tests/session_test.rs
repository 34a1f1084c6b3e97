// session_test.rs - Integration tests for match iteration and capture access.

use resplice::prelude::*;

const EMAIL: &str = r"(?<Username>[-\w\d\.]+?)(?:\s+at\s+|\s*@\s*|\s*(?:[\[\]@]){3}\s*)(?<Domain>[-\w\d\.]*?)\s*(?:dot|\.|(?:[\[\]dot\.]){3,5})\s*(?<TLD>\w+)";

fn spans<M: Matcher>(session: &mut Session<'_, M>) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    while session.advance().unwrap() {
        let m = session.captures().whole().unwrap();
        out.push((m.start, m.end));
    }
    out
}

fn scan(pattern: Pattern, subject: &str) -> Vec<(usize, usize)> {
    let mut session = Session::with_pattern(pattern);
    session.attach(subject);
    spans(&mut session)
}

// === Named captures ===

#[test]
fn email_named_groups() {
    let mut session = Session::new();
    session.compile(EMAIL).unwrap();
    session.attach("contact a@b.com now");

    assert!(session.advance().unwrap());
    assert_eq!(session.match_start(), Some(8));
    assert_eq!(session.capture("Username"), b"a");
    assert_eq!(session.capture("Domain"), b"b");
    assert_eq!(session.capture("TLD"), b"com");
    assert_eq!(session.capture_str(0), "a@b.com");
    assert_eq!(session.capture_count(), 4);

    assert!(!session.advance().unwrap());
}

#[test]
fn named_group_table() {
    let mut session = Session::new();
    session.compile(EMAIL).unwrap();

    assert_eq!(session.group_count(), 3);
    assert_eq!(session.group_name(0), "Username");
    assert_eq!(session.group_name(1), "Domain");
    assert_eq!(session.group_name(2), "TLD");
    assert_eq!(session.group_name(3), "");
    assert_eq!(session.find_index("TLD"), Some(3));
    assert_eq!(session.find_index("tld"), None);
}

#[test]
fn invalid_references_read_as_empty() {
    let mut session = Session::new();
    session.compile(r"(a)(z)?").unwrap();
    session.attach("xa");
    assert!(session.advance().unwrap());

    assert_eq!(session.capture(1), b"a");
    assert_eq!(session.capture(2), b"");
    assert_eq!(session.capture(9), b"");
    assert_eq!(session.capture("missing"), b"");
    assert_eq!(session.captures().get(2), None);
}

#[test]
fn every_email_in_order() {
    let text = "Email 1: yasserasmi@live.com;   email 2: yasserasmi@domain2.com  and more email,  email 3: yasmi@domain3.com ...";
    let mut session = Session::new();
    session.compile(EMAIL).unwrap();
    session.attach(text);

    let mut found = Vec::new();
    while session.advance().unwrap() {
        found.push((
            session.capture_str("Username").into_owned(),
            session.capture_str("Domain").into_owned(),
            session.capture_str("TLD").into_owned(),
        ));
    }
    assert_eq!(
        found,
        vec![
            ("yasserasmi".to_string(), "live".to_string(), "com".to_string()),
            ("yasserasmi".to_string(), "domain2".to_string(), "com".to_string()),
            ("yasmi".to_string(), "domain3".to_string(), "com".to_string()),
        ]
    );
}

#[test]
fn pattern_reused_across_subjects() {
    let pattern = Pattern::new(EMAIL).unwrap();
    for _ in 0..3 {
        let mut session = Session::with_pattern(&pattern);
        session.attach("x@y.org, p@q.net");
        assert_eq!(spans(&mut session).len(), 2);
    }

    let mut session = Session::with_pattern(&pattern);
    for subject in ["a@b.com", "none here", "c@d.io e@f.io"] {
        session.attach(subject);
        let n = spans(&mut session).len();
        assert_eq!(n, subject.matches('@').count());
    }
}

// === Empty matches ===

#[test]
fn star_skips_adjacent_empty_match() {
    let pat = Pattern::new(r"a*").unwrap();
    assert_eq!(scan(pat, "baaab"), vec![(0, 0), (1, 4), (5, 5)]);
}

#[test]
fn star_with_empty_after_match() {
    let config = SessionConfig {
        empty_after_match: true,
        ..SessionConfig::default()
    };
    let mut session = Session::with_config(Pattern::new(r"a*").unwrap(), config);
    session.attach("baaab");
    assert_eq!(spans(&mut session), vec![(0, 0), (1, 4), (4, 4), (5, 5)]);
}

#[test]
fn empty_pattern_matches_every_position() {
    let pat = Pattern::new(r"").unwrap();
    assert_eq!(scan(pat, "ab"), vec![(0, 0), (1, 1), (2, 2)]);

    let pat = Pattern::new(r"").unwrap();
    assert_eq!(scan(pat, ""), vec![(0, 0)]);
}

#[test]
fn empty_branch_shadows_non_empty_branch() {
    // `\b` wins over `\w+` wherever both match, and an empty `\b` right
    // after a match is skipped, so only word tails are reported.
    let pat = Pattern::new(r"\b|\w+").unwrap();
    assert_eq!(scan(pat, "ab cd"), vec![(0, 0), (1, 2), (3, 3), (4, 5)]);
}

#[test]
fn matches_are_ordered_and_disjoint() {
    for (pattern, subject) in [
        (r"x*", "axxbxcxx"),
        (r"\d*", "12a3bb45"),
        (r"(?m)^", "one\ntwo\n\nthree"),
        (r"\w+|", "héllo wörld"),
    ] {
        let got = scan(Pattern::new(pattern).unwrap(), subject);
        assert!(!got.is_empty(), "{}", pattern);
        for pair in got.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(a.0 <= a.1 && a.1 <= b.0, "{} over {:?}: {:?}", pattern, subject, got);
            assert!(a.0 < b.0 || !(a.0 == a.1 && b.0 == b.1), "repeated empty match");
        }
    }
}

// === Boundaries ===

#[test]
fn utf8_empty_matches_land_on_char_boundaries() {
    let subject = "aé€😀";
    let got = scan(Pattern::new(r"").unwrap(), subject);
    assert_eq!(got, vec![(0, 0), (1, 1), (3, 3), (6, 6), (10, 10)]);
    for (start, _) in got {
        assert!(subject.is_char_boundary(start));
    }
}

#[test]
fn byte_mode_steps_single_bytes() {
    let pat = Pattern::builder(r"").utf8(false).build().unwrap();
    assert_eq!(scan(pat, "é"), vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn crlf_pair_is_never_split() {
    let pat = Pattern::builder(r"").crlf(true).build().unwrap();
    assert_eq!(scan(pat, "a\r\nb"), vec![(0, 0), (1, 1), (3, 3), (4, 4)]);

    let pat = Pattern::new(r"").unwrap();
    assert_eq!(scan(pat, "a\r\nb"), vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
}

#[test]
fn crlf_line_starts() {
    let pat = Pattern::builder(r"^")
        .multi_line(true)
        .crlf(true)
        .build()
        .unwrap();
    assert_eq!(scan(pat, "ab\r\ncd\r\n"), vec![(0, 0), (4, 4), (8, 8)]);
}

// === Exhaustion and errors ===

#[test]
fn exhaustion_is_idempotent() {
    let mut session = Session::new();
    session.compile(r"\d").unwrap();
    session.attach("1");
    assert!(session.advance().unwrap());
    assert!(!session.advance().unwrap());
    let subject = session.subject().to_vec();
    for _ in 0..3 {
        assert!(!session.advance().unwrap());
        assert!(session.is_exhausted());
        assert_eq!(session.match_start(), None);
        assert_eq!(session.subject(), subject.as_slice());
    }

    // attaching again restarts the scan
    session.attach("22");
    assert!(!session.is_exhausted());
    assert_eq!(spans(&mut session), vec![(0, 1), (1, 2)]);
}

#[test]
fn advance_without_pattern() {
    let mut session = Session::new();
    session.attach("abc");
    assert_eq!(session.advance(), Err(Error::NotCompiled));
}

#[test]
fn compile_error_reports_offset() {
    let mut session = Session::new();
    let err = session.compile(r"ab[c").unwrap_err();
    match err {
        Error::Compile { message, offset } => {
            assert!(!message.is_empty());
            assert!(offset <= 4);
        }
        other => panic!("expected Compile error, got {:?}", other),
    }
    assert_eq!(session.advance(), Err(Error::NotCompiled));
}

#[test]
fn capture_overflow_truncates() {
    let pattern = "(a)".repeat(20);
    let subject = "a".repeat(20);
    let mut session = Session::with_pattern(Pattern::new(&pattern).unwrap());
    session.attach(subject.as_str());

    assert!(session.advance().unwrap());
    assert_eq!(session.capture_count(), 16);
    assert_eq!(session.captures().dropped(), 5);
    assert_eq!(session.capture(15), b"a");
    assert_eq!(session.capture(16), b"");
}

#[test]
fn capture_limit_is_configurable() {
    let config = SessionConfig {
        capture_limit: 2,
        ..SessionConfig::default()
    };
    let mut session = Session::with_config(Pattern::new(r"(\w)(\w)(\w)").unwrap(), config);
    session.attach("abc");
    assert!(session.advance().unwrap());
    assert_eq!(session.capture_count(), 2);
    assert_eq!(session.capture(1), b"a");
    assert_eq!(session.captures().dropped(), 2);
}
