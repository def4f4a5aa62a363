//! The substitution engine
//!
//! [`Parser`] owns the parts, the filter bindings and two memo tables: one
//! keyed by whole template, one keyed by the literal text of a single token.
//! The token table is shared by every template the parser runs, so a token
//! such as `{name-uF}` is resolved once no matter how many templates use it.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    cache::{CacheStats, MemoCache},
    config::ParserConfig,
    error::Result,
    filters::{Filter, FilterSet},
    grammar::{Occurrence, TokenPattern},
    value::{render, Parts, Value},
};

/// Counters describing how much work a parser has done
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserStats {
    /// Number of template scans performed
    pub scans: u64,
    /// Whole-template memo table
    pub templates: CacheStats,
    /// Per-token memo table
    pub tokens: CacheStats,
}

/// Placeholder substitution engine with filter chains and memoization
///
/// ```
/// use bparser::Parser;
///
/// let mut parser = Parser::builder()
///     .part("one", "First element")
///     .part("many", "Few elements")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     parser.run("{one-u}_{many-vs} and {one}").unwrap(),
///     "first_element_fewElement and First element"
/// );
/// ```
///
/// Mutating parts or filters between runs affects later runs only; entries
/// already memoized are not invalidated.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
    filters: FilterSet,
    parts: Parts,
    template_cache: MemoCache,
    token_cache: MemoCache,
    scans: u64,
}

impl Parser {
    /// Create a parser with the default filters and no parts
    pub fn new(config: ParserConfig) -> Result<Self> {
        Self::with_parts(config, Parts::new())
    }

    /// Create a parser with the default filters and the given parts
    pub fn with_parts(config: ParserConfig, parts: Parts) -> Result<Self> {
        Self::from_parts(config, FilterSet::defaults(), parts)
    }

    /// Create a parser from all of its pieces
    pub fn from_parts(config: ParserConfig, filters: FilterSet, parts: Parts) -> Result<Self> {
        config.validate()?;
        let enable_cache = config.enable_cache;

        Ok(Self {
            config,
            filters,
            parts,
            template_cache: MemoCache::new(enable_cache),
            token_cache: MemoCache::new(enable_cache),
            scans: 0,
        })
    }

    /// Start a fluent builder
    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    /// Substitute `template` once with a throwaway parser
    ///
    /// `extra` is either a [`ParserConfig`] or a full [`ParserBuilder`], so
    /// one-shot calls can bind their own filter letters. Parts set on the
    /// builder override entries of `parts` with the same key.
    ///
    /// ```
    /// use bparser::{value::parts_from, FilterError, Parser, ParserConfig, Value};
    ///
    /// let out = Parser::process("{key-su}", parts_from([("key", "userItems")]), ParserConfig::default());
    /// assert_eq!(out.unwrap(), "user_item");
    ///
    /// let shout = Parser::builder().filter('!', |value: Value| -> Result<Value, FilterError> {
    ///     Ok(Value::String(format!("{}!", value.as_str().unwrap_or_default())))
    /// });
    /// let out = Parser::process("{key-U!}", parts_from([("key", "hi")]), shout);
    /// assert_eq!(out.unwrap(), "HI!");
    /// ```
    pub fn process(
        template: &str,
        parts: Parts,
        extra: impl Into<ParserBuilder>,
    ) -> Result<String> {
        let mut builder = extra.into();
        let mut merged = parts;
        merged.extend(std::mem::take(&mut builder.parts));
        builder.parts = merged;
        builder.build()?.run(template)
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Replacement values by key
    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    /// Mutable access to the replacement values
    pub fn parts_mut(&mut self) -> &mut Parts {
        &mut self.parts
    }

    /// Set a single replacement value, returning the previous one
    pub fn insert_part(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.parts.insert(key.into(), value.into())
    }

    /// Active filter bindings
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Mutable access to the filter bindings
    pub fn filters_mut(&mut self) -> &mut FilterSet {
        &mut self.filters
    }

    /// Turn memoization on or off; stored entries are kept either way
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.config.enable_cache = enabled;
        self.template_cache.set_enabled(enabled);
        self.token_cache.set_enabled(enabled);
    }

    /// Compile the token matcher for the current configuration and filters
    pub fn pattern(&self) -> Result<TokenPattern> {
        TokenPattern::new(&self.config, self.filters.letters())
    }

    /// List the tokens the current configuration recognizes, without resolving them
    pub fn tokens<'t>(&self, template: &'t str) -> Result<Vec<Occurrence<'t>>> {
        Ok(self.pattern()?.occurrences(template).collect())
    }

    /// Substitute every token in `template`
    ///
    /// Text outside tokens is copied verbatim. Tokens whose key is missing
    /// stay as they are.
    pub fn run(&mut self, template: &str) -> Result<String> {
        if let Some(cached) = self.template_cache.get(template) {
            trace!(template_len = template.len(), "Template served from cache");
            return Ok(cached);
        }

        let pattern = self.pattern()?;
        self.scans += 1;

        let mut output = String::with_capacity(template.len());
        let mut last = 0;
        let mut resolved = 0usize;

        for occurrence in pattern.occurrences(template) {
            output.push_str(&template[last..occurrence.start]);
            output.push_str(&self.resolve(&occurrence)?);
            last = occurrence.end;
            resolved += 1;
        }
        output.push_str(&template[last..]);

        debug!(
            template_len = template.len(),
            tokens = resolved,
            "Substituted template"
        );

        self.template_cache.insert(template, output.clone());
        Ok(output)
    }

    /// Produce the replacement text for one token
    pub fn resolve(&mut self, occurrence: &Occurrence<'_>) -> Result<String> {
        if let Some(cached) = self.token_cache.get(occurrence.full_match) {
            trace!(token = occurrence.full_match, "Token served from cache");
            return Ok(cached);
        }

        let Some(value) = self.parts.get(occurrence.key) else {
            debug!(
                token = occurrence.full_match,
                "No part for key, leaving token unresolved"
            );
            self.token_cache
                .insert(occurrence.full_match, occurrence.full_match);
            return Ok(occurrence.full_match.to_string());
        };

        let value = match occurrence.filters {
            Some(letters) => self
                .filters
                .apply(value.clone(), letters)
                .map_err(|err| {
                    warn!(token = occurrence.full_match, error = %err, "Filter chain failed");
                    err
                })?,
            None => value.clone(),
        };

        let replacement = render(&value);
        self.token_cache
            .insert(occurrence.full_match, replacement.clone());
        Ok(replacement)
    }

    /// Work counters for both memo tables
    pub fn stats(&self) -> ParserStats {
        ParserStats {
            scans: self.scans,
            templates: self.template_cache.stats(),
            tokens: self.token_cache.stats(),
        }
    }
}

/// Fluent construction of a [`Parser`]
///
/// Filters start from [`FilterSet::defaults`] unless replaced with
/// [`ParserBuilder::filters`].
#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    config: ParserConfig,
    filters: Option<FilterSet>,
    parts: Parts,
}

impl From<ParserConfig> for ParserBuilder {
    fn from(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl ParserBuilder {
    /// Replace the whole configuration
    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the opening and closing brackets
    pub fn brackets(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.config = self.config.with_brackets(open, close);
        self
    }

    /// Set the key/filter separator
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config = self.config.with_separator(separator);
        self
    }

    /// Enable or disable memoization
    pub fn enable_cache(mut self, enable_cache: bool) -> Self {
        self.config = self.config.with_cache(enable_cache);
        self
    }

    /// Add one replacement value
    pub fn part(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parts.insert(key.into(), value.into());
        self
    }

    /// Add many replacement values
    pub fn parts<I, K, V>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.parts
            .extend(parts.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replace the filter bindings entirely
    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Bind (or rebind) one filter letter
    pub fn filter(mut self, letter: char, filter: impl Filter + 'static) -> Self {
        self.filters
            .get_or_insert_with(FilterSet::defaults)
            .insert(letter, filter);
        self
    }

    /// Drop a filter letter
    pub fn without_filter(mut self, letter: char) -> Self {
        self.filters
            .get_or_insert_with(FilterSet::defaults)
            .remove(letter);
        self
    }

    /// Validate the configuration and build the parser
    pub fn build(self) -> Result<Parser> {
        Parser::from_parts(
            self.config,
            self.filters.unwrap_or_else(FilterSet::defaults),
            self.parts,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{FilterError, ParserError},
        filters::BuiltinFilter,
        value::parts_from,
    };
    use serde_json::json;

    fn parser_with(parts: &[(&str, &str)]) -> Parser {
        Parser::with_parts(ParserConfig::default(), parts_from(parts.iter().copied())).unwrap()
    }

    #[test]
    fn test_plain_substitution() {
        let mut parser = parser_with(&[("one", "A"), ("two", "B")]);
        assert_eq!(parser.run("{one}-{two}").unwrap(), "A-B");
    }

    #[test]
    fn test_missing_key_is_left_unchanged() {
        let mut parser = parser_with(&[]);
        assert_eq!(parser.run("{missing}").unwrap(), "{missing}");
        assert_eq!(parser.run("x {missing-U} y").unwrap(), "x {missing-U} y");
    }

    #[test]
    fn test_missing_key_identity_is_memoized() {
        let mut parser = parser_with(&[]);
        parser.run("{missing}").unwrap();
        assert_eq!(parser.stats().tokens.entries, 1);

        parser.insert_part("missing", "late");
        assert_eq!(parser.run("again {missing}").unwrap(), "again {missing}");
    }

    #[test]
    fn test_template_without_tokens_round_trips() {
        let mut parser = parser_with(&[("a", "x")]);
        for template in ["", "plain text", "{", "}{", "{ a }", "{a-}", "ünïcödé {}"] {
            assert_eq!(parser.run(template).unwrap(), template);
        }
    }

    #[test]
    fn test_filters_apply_left_to_right() {
        let mut parser = parser_with(&[("x", "Hello World")]);
        assert_eq!(parser.run("{x-lw}").unwrap(), "Hello World");
        assert_eq!(parser.run("{x-wl}").unwrap(), "hello world");
    }

    #[test]
    fn test_unknown_filter_letter_is_noop() {
        let mut parser = parser_with(&[("x", "abc")]);
        assert_eq!(parser.run("{x-Z}").unwrap(), "abc");
        assert_eq!(parser.run("{x-ZU}").unwrap(), "ABC");
    }

    #[test]
    fn test_docs_example() {
        let mut parser = parser_with(&[("key", "userItems")]);
        assert_eq!(parser.run("{key-su}").unwrap(), "user_item");
    }

    #[test]
    fn test_second_run_skips_scan() {
        let mut parser = parser_with(&[("name", "value")]);
        let first = parser.run("a {name} b").unwrap();
        let second = parser.run("a {name} b").unwrap();

        assert_eq!(first, second);
        let stats = parser.stats();
        assert_eq!(stats.scans, 1);
        assert_eq!(stats.templates.hits, 1);
        assert_eq!(stats.templates.misses, 1);
    }

    #[test]
    fn test_token_cache_shared_across_templates() {
        let mut parser = parser_with(&[("name", "value")]);
        parser.run("first {name-U}").unwrap();
        parser.run("second {name-U} and {name-U}").unwrap();

        let stats = parser.stats();
        assert_eq!(stats.scans, 2);
        assert_eq!(stats.tokens.misses, 1);
        assert_eq!(stats.tokens.hits, 2);
        assert_eq!(stats.tokens.entries, 1);
    }

    #[test]
    fn test_cache_disabled_rescans() {
        let mut parser = Parser::with_parts(
            ParserConfig::default().with_cache(false),
            parts_from([("name", "value")]),
        )
        .unwrap();

        assert_eq!(parser.run("{name}").unwrap(), "value");
        assert_eq!(parser.run("{name}").unwrap(), "value");

        let stats = parser.stats();
        assert_eq!(stats.scans, 2);
        assert_eq!(stats.templates.entries, 0);
        assert_eq!(stats.tokens.entries, 0);
    }

    #[test]
    fn test_stale_entries_survive_mutation() {
        let mut parser = parser_with(&[("name", "old")]);
        assert_eq!(parser.run("{name}").unwrap(), "old");

        parser.insert_part("name", "new");
        assert_eq!(parser.run("{name}").unwrap(), "old");

        parser.set_cache_enabled(false);
        assert_eq!(parser.run("{name}").unwrap(), "new");

        parser.set_cache_enabled(true);
        assert_eq!(parser.run("{name}").unwrap(), "old");
    }

    #[test]
    fn test_filter_mutation_changes_later_runs() {
        let mut parser = Parser::builder()
            .part("word", "item")
            .enable_cache(false)
            .build()
            .unwrap();

        assert_eq!(parser.run("{word-!}").unwrap(), "{word-!}");

        parser
            .filters_mut()
            .insert('!', BuiltinFilter::Pluralize);
        assert_eq!(parser.run("{word-!}").unwrap(), "items");
    }

    #[test]
    fn test_non_string_values() {
        let mut parser = Parser::builder()
            .part("count", 3)
            .part("flag", false)
            .part("none", Value::Null)
            .part("list", json!(["a", "b"]))
            .build()
            .unwrap();

        assert_eq!(
            parser.run("{count}|{flag-U}|{none}|{list}").unwrap(),
            r#"3|FALSE||["a","b"]"#
        );
    }

    #[test]
    fn test_transform_failure_propagates() {
        let mut parser = Parser::builder()
            .part("list", json!(["a"]))
            .build()
            .unwrap();

        let err = parser.run("value: {list-U}").unwrap_err();
        assert!(matches!(
            err,
            ParserError::Filter {
                letter: 'U',
                source: FilterError::UnsupportedValue(_)
            }
        ));
        assert_eq!(parser.stats().templates.entries, 0);
    }

    #[test]
    fn test_custom_filter_through_builder() {
        let mut parser = Parser::builder()
            .part("name", "abc")
            .filter('r', |value: Value| -> std::result::Result<Value, FilterError> {
                let text = crate::value::as_text(&value)?;
                Ok(Value::String(text.chars().rev().collect()))
            })
            .without_filter('l')
            .build()
            .unwrap();

        assert_eq!(parser.run("{name-rU}").unwrap(), "CBA");
        assert!(!parser.filters().contains('l'));
        assert_eq!(parser.run("{name-l}").unwrap(), "abc");
    }

    #[test]
    fn test_custom_brackets_and_separator() {
        let mut parser = Parser::builder()
            .brackets("<%", "%>")
            .separator("|")
            .part("name", "john smith")
            .build()
            .unwrap();

        assert_eq!(
            parser.run("Hi <%name|w%>, not {name}").unwrap(),
            "Hi John Smith, not {name}"
        );
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let result = Parser::builder().brackets("", "}").build();
        assert!(matches!(result, Err(ParserError::InvalidConfig(_))));
    }

    #[test]
    fn test_process_uses_fresh_parser() {
        let parts = parts_from([("key", "userItems")]);
        let out = Parser::process("{key-su}", parts, ParserConfig::default()).unwrap();
        assert_eq!(out, "user_item");
    }

    #[test]
    fn test_process_with_builder_filters_and_parts() {
        let extra = Parser::builder()
            .brackets("<", ">")
            .filter('r', |value: Value| -> std::result::Result<Value, FilterError> {
                let text = crate::value::as_text(&value)?;
                Ok(Value::String(text.chars().rev().collect()))
            })
            .part("b", "override");

        let parts = parts_from([("a", "abc"), ("b", "base")]);
        let out = Parser::process("<a-rU> <b> {a}", parts, extra).unwrap();
        assert_eq!(out, "CBA override {a}");
    }

    #[test]
    fn test_tokens_lists_occurrences() {
        let parser = parser_with(&[]);
        let tokens = parser.tokens("{a} text {b-lU}").unwrap();
        let keys: Vec<_> = tokens.iter().map(|t| (t.key, t.filters)).collect();
        assert_eq!(keys, vec![("a", None), ("b", Some("lU"))]);
    }
}
