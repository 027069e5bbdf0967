//! Recognisers for the individual term forms, plus escaping.
//!
//! Grammar (first match wins):
//!
//! ```text
//! subject   := iri | blank
//! predicate := iri
//! object    := literal | iri | blank
//! iri       := '<' IRICHAR* '>'
//! blank     := '_:' [A-Za-z0-9]*
//! literal   := '"' VALUE '"' ( '^^' iri | '@' langtag )?
//! ```
//!
//! `VALUE` ends at the first unescaped `"` whose remainder is a valid
//! suffix, so a raw `"` inside a value is only kept when no shorter split
//! parses.

use std::str::Chars;

use crate::error::{Result, TermError};
use crate::term::{Literal, LiteralKind, Term};
use crate::uri::is_valid_uri;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Escapes {
    /// `\u` and `\U` only
    Iri,
    /// ECHAR and UCHAR
    String,
}

pub(crate) fn subject(input: &str) -> Result<Term> {
    let input = input.trim();
    if input.starts_with('<') {
        iri(input)
    } else if let Some(label) = input.strip_prefix("_:") {
        blank_node(label, input)
    } else {
        Err(TermError::parse(format!("failed to parse subject: {input}")))
    }
}

pub(crate) fn predicate(input: &str) -> Result<Term> {
    let input = input.trim();
    if input.starts_with('<') {
        iri(input)
    } else {
        Err(TermError::parse(format!("failed to parse predicate: {input}")))
    }
}

pub(crate) fn object(input: &str) -> Result<Term> {
    let input = input.trim();
    if let Some(body) = input.strip_prefix('"') {
        literal(body, input)
    } else if input.starts_with('<') {
        iri(input)
    } else if let Some(label) = input.strip_prefix("_:") {
        blank_node(label, input)
    } else {
        Err(TermError::parse(format!("failed to parse object: {input}")))
    }
}

fn iri(input: &str) -> Result<Term> {
    let inner = input
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .filter(|inner| !inner.contains(['<', '>']))
        .ok_or_else(|| TermError::parse(format!("malformed IRI: {input}")))?;
    let uri = unescape(inner, Escapes::Iri)?;
    if !is_valid_uri(&uri) {
        return Err(TermError::parse(format!("not an absolute IRI: {input}")));
    }
    Ok(Term::Uri(uri))
}

fn blank_node(label: &str, input: &str) -> Result<Term> {
    if label.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(Term::BlankNode(label.to_owned()))
    } else {
        Err(TermError::parse(format!("malformed blank node: {input}")))
    }
}

fn literal(body: &str, input: &str) -> Result<Term> {
    let mut chars = body.char_indices();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => {
                if let Some(kind) = literal_suffix(&body[index + 1..]) {
                    let value = unescape(&body[..index], Escapes::String)?;
                    return Ok(Term::Literal(Literal::new(value, kind)));
                }
            }
            _ => {}
        }
    }
    Err(TermError::parse(format!("failed to parse literal: {input}")))
}

fn literal_suffix(rest: &str) -> Option<LiteralKind> {
    if rest.is_empty() {
        return Some(LiteralKind::Plain);
    }
    if let Some(tag) = rest.strip_prefix('@') {
        return is_language_tag(tag).then(|| LiteralKind::Language(tag.to_owned()));
    }
    match iri(rest.strip_prefix("^^")?) {
        Ok(Term::Uri(datatype)) => Some(LiteralKind::Typed(datatype)),
        _ => None,
    }
}

pub(crate) fn is_language_tag(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let primary = subtags
        .next()
        .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()));
    primary && subtags.all(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn unescape(raw: &str, escapes: Escapes) -> Result<String> {
    if !raw.contains('\\') {
        return Ok(raw.to_owned());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape = chars
            .next()
            .ok_or_else(|| TermError::parse(format!("dangling backslash in {raw}")))?;
        let decoded = match escape {
            'u' => hex_char(&mut chars, 4)?,
            'U' => hex_char(&mut chars, 8)?,
            _ if escapes == Escapes::Iri => {
                return Err(TermError::parse(format!(
                    "invalid escape sequence \\{escape} in IRI"
                )));
            }
            't' => '\t',
            'b' => '\x08',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0C',
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            _ => {
                return Err(TermError::parse(format!(
                    "invalid escape sequence \\{escape}"
                )));
            }
        };
        out.push(decoded);
    }
    Ok(out)
}

fn hex_char(chars: &mut Chars<'_>, len: usize) -> Result<char> {
    let hex: String = chars.by_ref().take(len).collect();
    if hex.len() != len || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TermError::parse(format!("invalid unicode escape {hex}")));
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| TermError::parse(format!("invalid code point {hex}")))
}

pub(crate) fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => push_uchar(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

pub(crate) fn escape_iri(uri: &str) -> String {
    let mut out = String::with_capacity(uri.len());
    for c in uri.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => push_uchar(&mut out, c),
            c if c <= ' ' || c.is_control() => push_uchar(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

fn push_uchar(out: &mut String, c: char) {
    let code = c as u32;
    if code <= 0xFFFF {
        out.push_str(&format!("\\u{code:04X}"));
    } else {
        out.push_str(&format!("\\U{code:08X}"));
    }
}

#[cfg(test)]
mod tests {
    use super::{object, subject};
    use crate::error::{Result, TermError};
    use crate::term::Term;

    #[test]
    fn unescapes_string_escapes() -> Result<()> {
        let term = object(r#""tab\tnew\nret\rquote\"slash\\""#)?;
        assert_eq!(term, Term::literal("tab\tnew\nret\rquote\"slash\\"));
        Ok(())
    }

    #[test]
    fn unescapes_unicode_escapes() -> Result<()> {
        assert_eq!(object(r#""caf\u00E9""#)?, Term::literal("café"));
        assert_eq!(object(r#""crab \U0001F980""#)?, Term::literal("crab 🦀"));
        assert_eq!(
            subject(r"<http://example.org/caf\u00e9>")?,
            Term::uri("http://example.org/café")
        );
        Ok(())
    }

    #[test]
    fn rejects_bad_escapes() {
        for input in [r#""\q""#, r#""\u00G1""#, r#""\u12""#, r#""\UFFFFFFFF""#] {
            assert!(
                matches!(object(input), Err(TermError::Parse { .. })),
                "{input} should not parse"
            );
        }
        assert!(matches!(
            subject(r"<http://example.org/\n>"),
            Err(TermError::Parse { .. })
        ));
    }

    #[test]
    fn escaped_quote_is_never_a_terminator() -> Result<()> {
        let term = object(r#""a\"@en"@fr"#)?;
        assert_eq!(term, Term::lang_literal("a\"@en", "fr"));
        Ok(())
    }

    // An unescaped quote inside a value is ambiguous. The shortest split with
    // a valid suffix wins, which can differ from what the writer intended.
    #[test]
    fn ambiguous_unescaped_quote_takes_shortest_valid_split() -> Result<()> {
        assert_eq!(object(r#""say "hi"""#)?, Term::literal("say \"hi\""));
        assert_eq!(object(r#""a"@en"@fr"#)?, Term::lang_literal("a\"@en", "fr"));
        assert_eq!(
            object(r#""x"^^<http://example.org/t>"^^<http://example.org/u>"#)?,
            Term::typed_literal("x\"^^<http://example.org/t>", "http://example.org/u")
        );
        assert_eq!(object(r#""x"@en"#)?, Term::lang_literal("x", "en"));
        Ok(())
    }

    #[test]
    fn rejects_unterminated_or_trailing_garbage() {
        for input in [r#""open"#, r#""value" extra"#, r#""v"@"#, r#""v"@-en"#, r#""v"^^<rel>"#] {
            assert!(
                matches!(object(input), Err(TermError::Parse { .. })),
                "{input} should not parse"
            );
        }
    }
}
