/// Check that `uri` is an absolute URI.
///
/// Requires an RFC 3986 scheme (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`)
/// followed by `:` and a non-empty remainder, with no whitespace or control
/// characters anywhere.
pub fn is_valid_uri(uri: &str) -> bool {
    let Some((scheme, rest)) = uri.split_once(':') else {
        return false;
    };
    let mut scheme_chars = scheme.chars();
    let scheme_ok = scheme_chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme_chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    scheme_ok
        && !rest.is_empty()
        && !uri.chars().any(|c| c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::is_valid_uri;

    #[test]
    fn accepts_absolute_uris() {
        assert!(is_valid_uri("https://example.org/graph"));
        assert!(is_valid_uri("urn:uuid:0b0e7c4e-4d49-4f57-9c3a-1f2b3c4d5e6f"));
        assert!(is_valid_uri("mailto:someone@example.org"));
        assert!(is_valid_uri("git+ssh://host/repo"));
        assert!(is_valid_uri("http://www.w3.org/2001/XMLSchema#integer"));
    }

    #[test]
    fn rejects_relative_and_malformed() {
        assert!(!is_valid_uri(""));
        assert!(!is_valid_uri("graph.nt"));
        assert!(!is_valid_uri("/absolute/path"));
        assert!(!is_valid_uri("http:"));
        assert!(!is_valid_uri(":no-scheme"));
        assert!(!is_valid_uri("1http://example.org"));
        assert!(!is_valid_uri("ht_tp://example.org"));
    }

    #[test]
    fn rejects_whitespace_and_control_chars() {
        assert!(!is_valid_uri("http://example.org/a b"));
        assert!(!is_valid_uri("http://example.org/a\tb"));
        assert!(!is_valid_uri("http://example.org/\n"));
        assert!(!is_valid_uri("http://example.org/\u{7f}"));
    }
}
