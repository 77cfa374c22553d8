//! Left-to-right pattern scanner

use super::registry::ConverterRegistry;
use super::{FormatNode, FormatSpec};
use crate::core::PipelineError;

/// Scan a pattern into format nodes
///
/// Pure function of (pattern, registry). Compile errors are collected and
/// returned alongside the nodes; the offending token contributes no node
/// and scanning resumes after it.
pub(super) fn parse(
    pattern: &str,
    registry: &ConverterRegistry,
) -> (Vec<FormatNode>, Vec<PipelineError>) {
    let mut nodes = Vec::new();
    let mut errors = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;

    while let Some(i) = rest.find('%') {
        literal.push_str(&rest[..i]);
        rest = &rest[i..];
        let position = pattern.len() - rest.len();

        // "%%" emits a single literal '%'
        if rest[1..].starts_with('%') {
            literal.push('%');
            rest = &rest[2..];
            continue;
        }

        let mut cursor = &rest[1..];
        let mut spec = FormatSpec::default();

        if let Some(stripped) = cursor.strip_prefix('-') {
            spec.left_align = true;
            cursor = stripped;
        }
        if let Some((digits, after)) = take_digits(cursor) {
            spec.min = Some(digits);
            cursor = after;
        }
        if let Some(stripped) = cursor.strip_prefix('.') {
            match take_digits(stripped) {
                Some((digits, after)) => {
                    spec.max = Some(digits);
                    cursor = after;
                }
                None => {
                    errors.push(PipelineError::pattern(
                        position,
                        "expected digits after '.' in width specifier",
                    ));
                    flush_literal(&mut literal, &mut nodes);
                    rest = stripped;
                    continue;
                }
            }
        }

        let Some((keyword, factory)) = registry.longest_match(cursor) else {
            errors.push(PipelineError::pattern(
                position,
                match cursor.chars().next() {
                    Some(c) => format!("unknown conversion keyword starting at '{}'", c),
                    None => "pattern ends with a dangling '%'".to_string(),
                },
            ));
            flush_literal(&mut literal, &mut nodes);
            // Resume after the unrecognized character, if any
            let skip = cursor.chars().next().map_or(0, |c| c.len_utf8());
            rest = &cursor[skip..];
            continue;
        };
        cursor = &cursor[keyword.len()..];

        let mut option: Option<String> = None;
        if let Some(block) = cursor.strip_prefix('{') {
            match block.find('}') {
                Some(end) => {
                    option = Some(block[..end].to_string());
                    cursor = &block[end + 1..];
                }
                None => {
                    // Unterminated option block swallows the rest of the
                    // pattern; the converter contributes no node.
                    errors.push(PipelineError::pattern(
                        position,
                        format!("unterminated option block after '{}'", keyword),
                    ));
                    flush_literal(&mut literal, &mut nodes);
                    rest = "";
                    break;
                }
            }
        }

        flush_literal(&mut literal, &mut nodes);
        let converter = factory(option.as_deref());
        nodes.push(FormatNode::Converter {
            keyword,
            spec,
            converter,
        });
        rest = cursor;
    }

    literal.push_str(rest);
    flush_literal(&mut literal, &mut nodes);

    (nodes, errors)
}

/// Consume a leading run of ASCII digits
fn take_digits(input: &str) -> Option<(usize, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    // A run of ASCII digits this long would overflow any sane width; cap
    // rather than panic.
    let value = input[..end].parse().unwrap_or(usize::MAX);
    Some((value, &input[end..]))
}

fn flush_literal(literal: &mut String, nodes: &mut Vec<FormatNode>) {
    if !literal.is_empty() {
        nodes.push(FormatNode::Literal(std::mem::take(literal)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(pattern: &str) -> (Vec<FormatNode>, Vec<PipelineError>) {
        parse(pattern, &ConverterRegistry::new())
    }

    fn keywords(nodes: &[FormatNode]) -> Vec<&str> {
        nodes
            .iter()
            .filter_map(|n| match n {
                FormatNode::Converter { keyword, .. } => Some(keyword.as_str()),
                FormatNode::Literal(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_literal_only() {
        let (nodes, errors) = parse_default("no conversions here");
        assert!(errors.is_empty());
        assert_eq!(nodes.len(), 1);
        assert!(matches!(&nodes[0], FormatNode::Literal(t) if t == "no conversions here"));
    }

    #[test]
    fn test_escape_merges_into_literal() {
        let (nodes, errors) = parse_default("100%% done");
        assert!(errors.is_empty());
        assert_eq!(nodes.len(), 1);
        assert!(matches!(&nodes[0], FormatNode::Literal(t) if t == "100% done"));
    }

    #[test]
    fn test_longest_match_wins() {
        // "d" and "date" are both registered; "%date" must resolve to the
        // long form, not "d" followed by a literal "ate"
        let (nodes, errors) = parse_default("%date");
        assert!(errors.is_empty());
        assert_eq!(keywords(&nodes), vec!["date"]);
    }

    #[test]
    fn test_width_flags() {
        let (nodes, errors) = parse_default("%-5.10level");
        assert!(errors.is_empty());
        match &nodes[0] {
            FormatNode::Converter { keyword, spec, .. } => {
                assert_eq!(keyword, "level");
                assert_eq!(spec.min, Some(5));
                assert_eq!(spec.max, Some(10));
                assert!(spec.left_align);
            }
            other => panic!("expected converter, got {:?}", other),
        }
    }

    #[test]
    fn test_option_block() {
        let (nodes, errors) = parse_default("%X{request_id}");
        assert!(errors.is_empty());
        assert_eq!(keywords(&nodes), vec!["X"]);
    }

    #[test]
    fn test_unknown_keyword_reported_and_skipped() {
        let (nodes, errors) = parse_default("a %q b");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("unknown conversion keyword"));
        // The bad token contributes no node; surrounding literals survive
        let rendered: Vec<&str> = nodes
            .iter()
            .map(|n| match n {
                FormatNode::Literal(t) => t.as_str(),
                FormatNode::Converter { keyword, .. } => keyword.as_str(),
            })
            .collect();
        assert_eq!(rendered, vec!["a ", " b"]);
    }

    #[test]
    fn test_dangling_percent_reported() {
        let (nodes, errors) = parse_default("tail%");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("dangling"));
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_unterminated_option_block_reported() {
        let (nodes, errors) = parse_default("%d{ISO8601 and the rest");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("unterminated option block"));
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_missing_digits_after_dot() {
        let (nodes, errors) = parse_default("%.level");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("expected digits"));
        // Scanning resumed: "level" became a literal run
        assert!(matches!(&nodes[0], FormatNode::Literal(t) if t == "level"));
    }

    #[test]
    fn test_error_position_is_reported() {
        let (_, errors) = parse_default("abc %q");
        match &errors[0] {
            PipelineError::Pattern { position, .. } => assert_eq!(*position, 4),
            other => panic!("expected pattern error, got {:?}", other),
        }
    }

    #[test]
    fn test_determinism() {
        let registry = ConverterRegistry::new();
        let (first, _) = parse("[%-5level] %message%n", &registry);
        let (second, _) = parse("[%-5level] %message%n", &registry);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(format!("{:?}", a), format!("{:?}", b));
        }
    }
}
