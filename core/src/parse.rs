use crate::graph::EdgePair;

/// What a single line of an edge list turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Record {
    Edge(EdgePair),
    /// Empty, whitespace-only, or `#` comment.
    Blank,
    Malformed,
}

pub(crate) fn classify_line(line: &str) -> Record {
    if line.starts_with('#') || line.trim().is_empty() {
        return Record::Blank;
    }

    let mut tokens = line.split_whitespace();
    let source = tokens.next().and_then(|t| t.parse().ok());
    let target = tokens.next().and_then(|t| t.parse().ok());
    match (source, target) {
        (Some(s), Some(t)) => Record::Edge((s, t)),
        _ => Record::Malformed,
    }
}

/// Byte-level variant used by the loader: invalid UTF-8 is malformed.
pub(crate) fn classify_bytes(line: &[u8]) -> Record {
    match std::str::from_utf8(line) {
        Ok(s) => classify_line(s.trim_end_matches(['\n', '\r'])),
        Err(_) => Record::Malformed,
    }
}

/// Parse one edge-list record into a `(source, destination)` pair.
///
/// Returns `None` for blank lines, `#` comments, and anything whose first two
/// whitespace-separated tokens are not both non-negative `u32` values.
/// Tokens past the second are ignored, so `src dst weight` rows load with the
/// weight dropped.
pub fn parse_edge_line(line: &str) -> Option<EdgePair> {
    match classify_line(line) {
        Record::Edge(edge) => Some(edge),
        Record::Blank | Record::Malformed => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_pair() {
        assert_eq!(parse_edge_line("3 7"), Some((3, 7)));
        assert_eq!(parse_edge_line("0\t0"), Some((0, 0)));
        assert_eq!(parse_edge_line("  12   5  "), Some((12, 5)));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        assert_eq!(classify_line(""), Record::Blank);
        assert_eq!(classify_line("   "), Record::Blank);
        assert_eq!(classify_line("# FromNodeId ToNodeId"), Record::Blank);
        assert_eq!(classify_line("#1 2"), Record::Blank);
        assert_eq!(parse_edge_line("# comment"), None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for line in ["abc def", "1", "1 x", "-1 2", "1 -2", "4294967296 1", "1.5 2"] {
            assert_eq!(classify_line(line), Record::Malformed, "line {:?}", line);
            assert_eq!(parse_edge_line(line), None);
        }
    }

    #[test]
    fn test_parse_ignores_trailing_columns() {
        assert_eq!(parse_edge_line("1 2 0.75"), Some((1, 2)));
        assert_eq!(parse_edge_line("1 2 # note"), Some((1, 2)));
    }

    #[test]
    fn test_classify_bytes_line_endings() {
        assert_eq!(classify_bytes(b"4 5\n"), Record::Edge((4, 5)));
        assert_eq!(classify_bytes(b"4 5\r\n"), Record::Edge((4, 5)));
        assert_eq!(classify_bytes(b"\n"), Record::Blank);
        assert_eq!(classify_bytes(b"\r\n"), Record::Blank);
        assert_eq!(classify_bytes(b"# c\r\n"), Record::Blank);
    }

    #[test]
    fn test_classify_bytes_invalid_utf8() {
        assert_eq!(classify_bytes(b"\xff\xfe 1\n"), Record::Malformed);
    }
}
