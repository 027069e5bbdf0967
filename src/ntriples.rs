//! Line-based triple files

use term::{Term, TermError};

use crate::error::{Result, StoreError};
use crate::graph::{Graph, Triple};

/// Turns graph file contents into a [`Graph`] and back.
pub trait TripleCodec {
    /// Parse a whole file, returning the graph and the number of triple
    /// lines read (duplicates included).
    fn parse(&self, text: &str) -> Result<(Graph, usize)>;

    fn serialize(&self, graph: &Graph) -> String;
}

/// N-Triples: one `subject predicate object .` per line. Blank lines and
/// `#` comment lines are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NTriples;

impl TripleCodec for NTriples {
    fn parse(&self, text: &str) -> Result<(Graph, usize)> {
        let mut graph = Graph::new();
        let mut count = 0;
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let triple = parse_line(line).map_err(|error| StoreError::at_line(index + 1, error))?;
            graph.insert(triple);
            count += 1;
        }
        Ok((graph, count))
    }

    fn serialize(&self, graph: &Graph) -> String {
        let mut text = String::new();
        for triple in graph.iter() {
            text.push_str(&triple.to_string());
            text.push('\n');
        }
        text
    }
}

fn parse_line(line: &str) -> term::Result<Triple> {
    let body = line
        .strip_suffix('.')
        .ok_or_else(|| TermError::parse(format!("missing terminating '.': {line}")))?;
    // IRIs never hold raw whitespace, so the first two terms end at the
    // first blank; the object is whatever is left.
    let (subject, rest) = split_term(body)?;
    let (predicate, object) = split_term(rest)?;
    Ok(Triple::new(
        Term::parse_subject(subject)?,
        Term::parse_predicate(predicate)?,
        Term::parse_object(object)?,
    ))
}

fn split_term(input: &str) -> term::Result<(&str, &str)> {
    input
        .trim_start()
        .split_once(|c: char| c.is_ascii_whitespace())
        .ok_or_else(|| TermError::parse(format!("expected three terms: {input}")))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use term::Term;

    use super::{NTriples, TripleCodec};
    use crate::error::StoreError;

    const DOC: &str = r#"# people
<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> "Alice" .
<http://example.org/alice> <http://xmlns.com/foaf/0.1/age> "42"^^<http://www.w3.org/2001/XMLSchema#integer> .

<http://example.org/alice> <http://xmlns.com/foaf/0.1/knows> <http://example.org/bob>.
<http://example.org/bob> <http://xmlns.com/foaf/0.1/name> "Bob \"the builder\" ."@en .
<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> "Alice" .
"#;

    #[test]
    fn parse_counts_lines_and_collapses_duplicates() -> Result<()> {
        let (graph, count) = NTriples.parse(DOC)?;
        assert_eq!(count, 5);
        assert_eq!(graph.len(), 4);
        let bob_name = graph
            .iter()
            .find(|t| t.subject == Term::uri("http://example.org/bob"))
            .map(|t| t.object.clone());
        assert_eq!(
            bob_name,
            Some(Term::lang_literal("Bob \"the builder\" .", "en"))
        );
        Ok(())
    }

    #[test]
    fn serialize_then_parse_gives_same_graph() -> Result<()> {
        let (graph, _) = NTriples.parse(DOC)?;
        let text = NTriples.serialize(&graph);
        assert_eq!(text.lines().count(), 4);
        let (reparsed, count) = NTriples.parse(&text)?;
        assert_eq!(count, 4);
        assert_eq!(reparsed, graph);
        Ok(())
    }

    #[test]
    fn errors_carry_line_numbers() {
        let text = "<http://example.org/s> <http://example.org/p> \"o\" .\n<http://example.org/s> <http://example.org/p> \"o\"\n";
        match NTriples.parse(text) {
            Err(StoreError::Parse(message)) => assert!(message.starts_with("line 2:"), "{message}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn blank_nodes_in_files_are_unsupported() {
        let text = "_:b0 <http://example.org/p> \"o\" .\n";
        assert!(matches!(
            NTriples.parse(text),
            Err(StoreError::UnsupportedFeature(_))
        ));
        let text = "<http://example.org/s> <http://example.org/p> _:b1 .\n";
        assert!(matches!(
            NTriples.parse(text),
            Err(StoreError::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn too_few_terms() {
        assert!(matches!(
            NTriples.parse("<http://example.org/s> <http://example.org/p> .\n"),
            Err(StoreError::Parse(_))
        ));
    }
}
