//! Substitution engine: resolves every placeholder of a template against a record.

use std::collections::HashSet;

use jfl_format::apply_format;
use tracing::{debug, trace};

use crate::attributes::{Attribute, AttributeProvider};
use crate::config::{EngineConfig, NullPolicy};
use crate::error::TemplateResult;
use crate::scanner::find_tokens;

/// Interpolates `{name}` / `{name:spec}` placeholders from a record's attributes.
///
/// Holds only configuration; every call owns its working text, so a single
/// interpolator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    config: EngineConfig,
}

impl Interpolator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one substitution pass per attribute, in provider order.
    ///
    /// Each pass scans the text produced by the previous passes. Identical
    /// token texts are formatted once and replaced everywhere at once.
    /// Tokens naming no attribute are left as they are.
    pub fn interpolate<R>(&self, template: &str, record: &R) -> TemplateResult<String>
    where
        R: AttributeProvider + ?Sized,
    {
        let mut working = template.to_string();

        for Attribute { name, value } in record.attributes() {
            let tokens = find_tokens(&working, &name, self.config.name_matching)?;
            if tokens.is_empty() {
                continue;
            }
            debug!(attribute = %name, matches = tokens.len(), "substitution pass");

            let mut seen = HashSet::new();
            for token in tokens {
                if !seen.insert(token.literal.clone()) {
                    continue;
                }

                let replacement = match apply_format(&value, &token.spec)? {
                    Some(text) => text,
                    None => match self.config.null_policy {
                        NullPolicy::KeepToken => continue,
                        NullPolicy::Empty => String::new(),
                    },
                };

                trace!(token = %token.literal, %replacement, "replacing token");
                working = working.replace(&token.literal, &replacement);
            }
        }

        Ok(working)
    }
}

/// Interpolate with the default configuration.
pub fn interpolate<R>(template: &str, record: &R) -> TemplateResult<String>
where
    R: AttributeProvider + ?Sized,
{
    Interpolator::default().interpolate(template, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Record;
    use crate::config::NameMatching;
    use crate::error::TemplateError;
    use crate::record;
    use jfl_format::{FormatError, Value};

    #[test]
    fn test_duplicate_tokens_formatted_once() {
        let rec = record! { a: 10, b: "x" };
        assert_eq!(interpolate("{a}, {a:000}, {b}", &rec).unwrap(), "10, 010, x");
        assert_eq!(interpolate("{a}-{a}-{a:000}-{a:000}", &rec).unwrap(), "10-10-010-010");
    }

    #[test]
    fn test_sql_template() {
        let rec = record! { TableName: "Foo", Id: 10 };
        assert_eq!(
            interpolate("select * from {TableName} where id >= {Id};", &rec).unwrap(),
            "select * from Foo where id >= 10;"
        );
    }

    #[test]
    fn test_unmatched_names_pass_through() {
        let rec = record! { a: 1 };
        assert_eq!(interpolate("{missing}", &rec).unwrap(), "{missing}");
    }

    #[test]
    fn test_absent_value_keeps_token() {
        let rec = record! { a: None::<i32> };
        assert_eq!(interpolate("{a} and {a:000}", &rec).unwrap(), "{a} and {a:000}");
    }

    #[test]
    fn test_absent_value_empty_policy() {
        let rec = record! { a: Value::Null, b: 2 };
        let engine = Interpolator::new(EngineConfig::new().with_null_policy(NullPolicy::Empty));
        assert_eq!(engine.interpolate("[{a}]{b}", &rec).unwrap(), "[]2");
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let rec = record! { a: 1, b: "x" };
        let text = "plain {{text}} with a, b and {} braces";
        assert_eq!(interpolate(text, &rec).unwrap(), text);
        assert_eq!(interpolate("", &rec).unwrap(), "");
    }

    #[test]
    fn test_deterministic() {
        let rec = record! { n: 7.12345, s: "v" };
        let first = interpolate("{n:F2}/{s}", &rec).unwrap();
        let second = interpolate("{n:F2}/{s}", &rec).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "7.12/v");
    }

    #[test]
    fn test_invalid_specifier_fails() {
        let rec = record! { a: 10 };
        let err = interpolate("{a:qqq}", &rec).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::Format(FormatError::InvalidSpecifier { ref spec, kind: "int" }) if spec == "qqq"
        ));
    }

    #[test]
    fn test_later_passes_see_earlier_output() {
        let rec = record! { a: "{b}", b: 2 };
        assert_eq!(interpolate("{a}", &rec).unwrap(), "2");

        let reversed = record! { b: 2, a: "{b}" };
        assert_eq!(interpolate("{a}", &reversed).unwrap(), "{b}");
    }

    #[test]
    fn test_spec_with_brace_terminates_early() {
        let rec = record! { a: 5 };
        assert_eq!(interpolate("{a:0}0}", &rec).unwrap(), "50}");
    }

    #[test]
    fn test_spec_keeps_extra_colons() {
        let rec = record! { a: 10 };
        assert_eq!(interpolate("{a::0}", &rec).unwrap(), ":10");
    }

    #[test]
    fn test_legacy_name_matching() {
        let rec = Record::new().with("a.c", 1);
        assert_eq!(interpolate("{abc} {a.c}", &rec).unwrap(), "{abc} 1");

        let legacy =
            Interpolator::new(EngineConfig::new().with_name_matching(NameMatching::Legacy));
        assert_eq!(legacy.interpolate("{abc} {a.c}", &rec).unwrap(), "1 1");
    }

    #[test]
    fn test_shared_across_threads() {
        let engine = Interpolator::default();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let engine = &engine;
                    scope.spawn(move || engine.interpolate("#{i:00}", &record! { i }).unwrap())
                })
                .collect();
            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(results, vec!["#00", "#01", "#02", "#03"]);
        });
    }
}
