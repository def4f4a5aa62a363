//! Token grammar and occurrence scanning
//!
//! A token is `OPEN KEY [SEP FILTERS] CLOSE`:
//!
//! - `OPEN`, `CLOSE` and `SEP` are literal text from [`ParserConfig`]
//! - `KEY` is one or more of `[A-Za-z0-9_]`
//! - `FILTERS` is one or more filter letters: any ASCII letter plus every
//!   letter bound in the active [`FilterSet`](crate::FilterSet)
//!
//! A bare separator with no letters never matches, so an occurrence either
//! carries a non-empty filter sequence or none at all.

use std::{collections::BTreeSet, ops::Range};

use regex::{CaptureMatches, Regex};

use crate::{config::ParserConfig, error::Result};

const KEY_CLASS: &str = "[A-Za-z0-9_]+";

/// A single token found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'t> {
    /// The literal token text, brackets included
    pub full_match: &'t str,
    /// Key looked up in the parts
    pub key: &'t str,
    /// Filter letters, `None` when the separator group is absent
    pub filters: Option<&'t str>,
    /// Byte offset of the token start
    pub start: usize,
    /// Byte offset just past the token end
    pub end: usize,
}

impl<'t> Occurrence<'t> {
    /// Byte range of the token in its template
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the token carries a filter group
    pub fn has_filters(&self) -> bool {
        self.filters.is_some()
    }
}

/// Compiled token matcher for one configuration and filter letter snapshot
#[derive(Debug, Clone)]
pub struct TokenPattern {
    regex: Regex,
}

impl TokenPattern {
    /// Compile the matcher
    ///
    /// Brackets, separator and letters are escaped, so any text may be used
    /// as a delimiter.
    ///
    /// Every ASCII letter is accepted in the filter group whether or not it
    /// is bound, so `{x-Q}` is a token even without a `Q` filter (the letter
    /// is skipped when applied). Only non-ASCII-letter bindings such as `!`
    /// widen what matches.
    pub fn new(config: &ParserConfig, letters: impl IntoIterator<Item = char>) -> Result<Self> {
        config.validate()?;

        let letters: BTreeSet<char> = letters
            .into_iter()
            .chain('A'..='Z')
            .chain('a'..='z')
            .collect();
        let class: String = letters
            .iter()
            .map(|letter| regex::escape(letter.encode_utf8(&mut [0; 4])))
            .collect();

        let pattern = format!(
            "{open}(?P<key>{KEY_CLASS})(?:{sep}(?P<filters>[{class}]+))?{close}",
            open = regex::escape(&config.open_bracket),
            sep = regex::escape(&config.separator),
            close = regex::escape(&config.close_bracket),
        );

        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// The compiled pattern source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the template contains at least one token
    pub fn is_match(&self, template: &str) -> bool {
        self.regex.is_match(template)
    }

    /// Scan `template` for tokens, leftmost first and non-overlapping
    pub fn occurrences<'p, 't>(&'p self, template: &'t str) -> Occurrences<'p, 't> {
        Occurrences {
            captures: self.regex.captures_iter(template),
        }
    }
}

/// Iterator over the tokens of one template
#[derive(Debug)]
pub struct Occurrences<'p, 't> {
    captures: CaptureMatches<'p, 't>,
}

impl<'p, 't> Iterator for Occurrences<'p, 't> {
    type Item = Occurrence<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let captures = self.captures.next()?;
        let whole = captures.get(0)?;
        let key = captures.name("key")?;

        Some(Occurrence {
            full_match: whole.as_str(),
            key: key.as_str(),
            filters: captures.name("filters").map(|m| m.as_str()),
            start: whole.start(),
            end: whole.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_pattern() -> TokenPattern {
        TokenPattern::new(&ParserConfig::default(), "cuvpstlUwfF".chars()).unwrap()
    }

    #[test]
    fn test_scan_plain_token() {
        let pattern = default_pattern();
        let found: Vec<_> = pattern.occurrences("Hello {name}!").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full_match, "{name}");
        assert_eq!(found[0].key, "name");
        assert_eq!(found[0].filters, None);
        assert_eq!(found[0].span(), 6..12);
    }

    #[test]
    fn test_scan_token_with_filters() {
        let pattern = default_pattern();
        let found: Vec<_> = pattern.occurrences("{key-su}").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "key");
        assert_eq!(found[0].filters, Some("su"));
        assert!(found[0].has_filters());
    }

    #[test]
    fn test_scan_is_non_overlapping_and_ordered() {
        let pattern = default_pattern();
        let found: Vec<_> = pattern
            .occurrences("{one}-{two}{three-U}")
            .map(|o| o.key)
            .collect();
        assert_eq!(found, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_malformed_tokens_do_not_match() {
        let pattern = default_pattern();
        for template in ["{}", "{name", "name}", "{na me}", "{name-}", "{-l}", "{name-l-u}"] {
            assert!(
                !pattern.is_match(template),
                "{template} should not contain a token"
            );
        }
    }

    #[test]
    fn test_nested_brackets_match_innermost() {
        let pattern = default_pattern();
        let found: Vec<_> = pattern.occurrences("{{name}}").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full_match, "{name}");
        assert_eq!(found[0].start, 1);
    }

    #[test]
    fn test_unbound_ascii_letters_are_accepted() {
        let pattern = TokenPattern::new(&ParserConfig::default(), std::iter::empty()).unwrap();
        let found: Vec<_> = pattern.occurrences("{x-Z}").collect();
        assert_eq!(found[0].filters, Some("Z"));
    }

    #[test]
    fn test_registered_symbol_letters_extend_the_class() {
        let config = ParserConfig::default();
        let without = TokenPattern::new(&config, std::iter::empty()).unwrap();
        assert!(!without.is_match("{x-^]}"));

        let with = TokenPattern::new(&config, ['^', ']']).unwrap();
        let found: Vec<_> = with.occurrences("{x-^]}").collect();
        assert_eq!(found[0].filters, Some("^]"));
    }

    #[test]
    fn test_regex_metacharacters_in_delimiters_are_literal() {
        let config = ParserConfig::new().with_brackets("$(", ")*").with_separator(".");
        let pattern = TokenPattern::new(&config, ['l']).unwrap();

        let found: Vec<_> = pattern.occurrences("a $(name.l)* b $(other)*").collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].key, "name");
        assert_eq!(found[0].filters, Some("l"));
        assert_eq!(found[1].full_match, "$(other)*");

        assert!(!pattern.is_match("$(name-l)*"));
    }

    #[test]
    fn test_multi_character_delimiters() {
        let config = ParserConfig::new().with_brackets("{{", "}}").with_separator("|");
        let pattern = TokenPattern::new(&config, ['U']).unwrap();
        let found: Vec<_> = pattern.occurrences("{{ a }} {{b|U}}").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "b");
    }

    #[test]
    fn test_empty_delimiter_is_rejected() {
        let config = ParserConfig::new().with_brackets("", "}");
        assert!(TokenPattern::new(&config, ['l']).is_err());
    }
}
