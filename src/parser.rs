use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{BlockKind, HiddenRules, TokenList};

/// A rule declaration such as `inline_text: ($) => seq(...)`.
pub static TOKEN_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_]+: \(.\) =>").unwrap());

const LINE_COMMENT: &str = "//";

/// Cuts out the text after the block's start marker up to and including the
/// first character of the next end marker.
pub fn extract_block(document: &str, kind: BlockKind) -> Result<&str> {
    let (start, end) = (kind.start_marker(), kind.end_marker());
    let missing = |marker| Error::MissingMarker { kind, marker };

    let from = document
        .find(start)
        .map(|idx| idx + start.len())
        .ok_or_else(|| missing(start))?;
    let rest = &document[from..];
    let to = rest.find(end).ok_or_else(|| missing(end))?;
    let keep = end.chars().next().map_or(0, char::len_utf8);
    Ok(&rest[..to + keep])
}

/// Collects the names of every line in `block` matching `pattern`, skipping
/// line comments.
pub fn extract_tokens(block: &str, pattern: &Regex) -> TokenList {
    block
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.starts_with(LINE_COMMENT))
        .filter(|line| pattern.is_match(line))
        .filter_map(|line| line.split_once(':').map(|(name, _)| name.trim()))
        .collect()
}

/// [`extract_tokens`] with [`TOKEN_RULE`], honouring the hidden rule policy.
pub fn extract_rule_tokens(block: &str, hidden: HiddenRules) -> TokenList {
    let tokens = extract_tokens(block, &TOKEN_RULE);
    match hidden {
        HiddenRules::Keep => tokens,
        HiddenRules::Skip => tokens.iter().filter(|name| !name.starts_with('_')).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_between_markers() {
        let doc = "const x = 1;\nmodule.exports = grammar({\n  a: ($) => 1,\n});\ntrailing";
        let block = extract_block(doc, BlockKind::Grammar).unwrap();
        assert_eq!(block, "\n  a: ($) => 1,\n}");
    }

    #[test]
    fn test_block_ignores_outside_content() {
        let inner = "module.exports = grammar({\n  a: ($) => 1,\n});";
        let with_header = format!("// header\n{inner}\nfoo");
        let with_trailer = format!("{inner}\n}});");
        let a = extract_block(&with_header, BlockKind::Grammar).unwrap();
        let b = extract_block(&with_trailer, BlockKind::Grammar).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_end_marker_searched_after_start() {
        let doc = "});\nmodule.exports = grammar({\n  a: ($) => 1,\n";
        let err = extract_block(doc, BlockKind::Grammar).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingMarker { kind: BlockKind::Grammar, marker: "});" }
        ));
    }

    #[test]
    fn test_missing_start_marker() {
        let err = extract_block("a: ($) => 1", BlockKind::Tokens).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingMarker { kind: BlockKind::Tokens, marker: "function tokens() {" }
        ));
        assert_eq!(
            err.to_string(),
            "unsupported grammar format: tokens block: could not find `function tokens() {`"
        );
    }

    #[test]
    fn test_tokens_skip_comments() {
        let block = "foo: (x) => seq(...)\n// bar: (x) => seq(...)\nbaz: (x) => token(...)";
        let tokens = extract_tokens(block, &TOKEN_RULE);
        assert_eq!(tokens.as_slice(), ["foo", "baz"]);
    }

    #[test]
    fn test_tokens_trim_indentation() {
        let block = "    source_file: ($) => choice(),\n\t\tprogram_saty: ($) => seq(),";
        let tokens = extract_tokens(block, &TOKEN_RULE);
        assert_eq!(tokens.as_slice(), ["source_file", "program_saty"]);
    }

    #[test]
    fn test_tokens_keep_duplicates() {
        let block = "a: ($) => 1\nb: ($) => 2\na: ($) => 3";
        let tokens = extract_tokens(block, &TOKEN_RULE);
        assert_eq!(tokens.as_slice(), ["a", "b", "a"]);
    }

    #[test]
    fn test_non_rule_lines() {
        let block = "extras: $ => [],\nword: $ => $.identifier,\nseq(a, b: ($) => c)\nconflicts: ($) => [],";
        let tokens = extract_tokens(block, &TOKEN_RULE);
        // only the last line has the `(x) =>` shape at line start
        assert_eq!(tokens.as_slice(), ["conflicts"]);
    }

    #[test]
    fn test_empty_block() {
        assert!(extract_tokens("", &TOKEN_RULE).is_empty());
        assert!(extract_tokens("\n\n// a: ($) => 1\n", &TOKEN_RULE).is_empty());
    }

    #[test]
    fn test_hidden_rules() {
        let block = "_literal: ($) => 1\nliteral_int: ($) => 2";
        assert_eq!(extract_rule_tokens(block, HiddenRules::Keep).len(), 2);
        assert_eq!(
            extract_rule_tokens(block, HiddenRules::Skip).as_slice(),
            ["literal_int"]
        );
    }
}
