//! Placeholder scanning: finds `{name}` and `{name:spec}` tokens for one attribute.

use regex::Regex;
use tracing::warn;

use crate::config::NameMatching;
use crate::error::{TemplateError, TemplateResult};

/// One matched placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    /// The exact matched text, braces included.
    pub literal: String,
    /// The format specifier after `:`, or empty.
    pub spec: String,
}

/// Build the pattern matching `{name}` or `{name:<spec>}` for an attribute.
///
/// The format specifier is captured non-greedily, so it ends at the first `}`.
pub fn build_pattern(name: &str, matching: NameMatching) -> TemplateResult<Regex> {
    let embedded = match matching {
        NameMatching::Escaped => regex::escape(name),
        NameMatching::Legacy => name.to_string(),
    };
    let pattern = format!(r"\{{{embedded}(:.*?)?\}}");

    Regex::new(&pattern).map_err(|source| {
        warn!(attribute = name, %pattern, "placeholder pattern failed to compile");
        TemplateError::InvalidPattern {
            name: name.to_string(),
            source,
        }
    })
}

/// Enumerate every token for `name` in `template`, in order of appearance.
pub fn find_tokens(
    template: &str,
    name: &str,
    matching: NameMatching,
) -> TemplateResult<Vec<TokenMatch>> {
    let pattern = build_pattern(name, matching)?;
    Ok(pattern
        .captures_iter(template)
        .filter_map(|caps| {
            let literal = caps.get(0)?.as_str().to_string();
            let spec = caps
                .get(1)
                .map(|m| {
                    let group = m.as_str();
                    group.strip_prefix(':').unwrap_or(group).to_string()
                })
                .unwrap_or_default();
            Some(TokenMatch { literal, spec })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(template: &str, name: &str) -> Vec<(String, String)> {
        find_tokens(template, name, NameMatching::Escaped)
            .unwrap()
            .into_iter()
            .map(|t| (t.literal, t.spec))
            .collect()
    }

    #[test]
    fn test_plain_and_formatted_tokens() {
        assert_eq!(
            tokens("{a}, {a:000}, {b}", "a"),
            vec![
                ("{a}".to_string(), String::new()),
                ("{a:000}".to_string(), "000".to_string()),
            ]
        );
    }

    #[test]
    fn test_names_match_exactly() {
        assert!(tokens("{ab} {A}", "a").is_empty());
        assert_eq!(tokens("{a}{a}", "a").len(), 2);
    }

    #[test]
    fn test_spec_ends_at_first_brace() {
        assert_eq!(
            tokens("{a:0}0}", "a"),
            vec![("{a:0}".to_string(), "0".to_string())]
        );
    }

    #[test]
    fn test_only_separator_colon_is_stripped() {
        assert_eq!(
            tokens("{a::0}", "a"),
            vec![("{a::0}".to_string(), ":0".to_string())]
        );
    }

    #[test]
    fn test_empty_spec() {
        assert_eq!(tokens("{a:}", "a"), vec![("{a:}".to_string(), String::new())]);
    }

    #[test]
    fn test_escaped_names_are_literal() {
        assert!(tokens("{abc}", "a.c").is_empty());
        assert_eq!(tokens("{a.c}", "a.c").len(), 1);
        assert_eq!(tokens("{a(}", "a(").len(), 1);
    }

    #[test]
    fn test_legacy_names_are_patterns() {
        let found = find_tokens("{abc} {a.c}", "a.c", NameMatching::Legacy).unwrap();
        assert_eq!(found.len(), 2);
        assert!(matches!(
            find_tokens("{a(}", "a(", NameMatching::Legacy),
            Err(TemplateError::InvalidPattern { .. })
        ));
    }
}
