//! Filter letters and the transforms they dispatch to
//!
//! A filter is anything implementing [`Filter`]: the built-in transforms in
//! [`BuiltinFilter`], or any closure `Fn(Value) -> Result<Value, FilterError>`.
//! [`FilterSet`] maps single letters to filters and folds a letter sequence
//! over a value.

use std::{collections::BTreeMap, fmt, sync::Arc};

use tracing::trace;

use crate::{
    error::{FilterError, ParserError, Result},
    inflector,
    value::{as_text, Value},
};

/// A transform applied to a resolved part value
pub trait Filter: Send + Sync {
    /// Transform the value
    fn apply(&self, value: Value) -> std::result::Result<Value, FilterError>;

    /// Human readable name, used when listing bindings
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Filter for F
where
    F: Fn(Value) -> std::result::Result<Value, FilterError> + Send + Sync,
{
    fn apply(&self, value: Value) -> std::result::Result<Value, FilterError> {
        self(value)
    }
}

/// Transforms shipped with the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFilter {
    /// `send_email` -> `SendEmail`
    Camelize,
    /// `userItems` -> `user_items`
    Underscore,
    /// `send_email` -> `sendEmail`
    Variablize,
    /// English plural of the last word
    Pluralize,
    /// English singular of the last word
    Singularize,
    /// Strip surrounding whitespace
    Trim,
    /// Lowercase everything
    Lowercase,
    /// Uppercase everything
    Uppercase,
    /// Uppercase the first letter of each word
    Ucwords,
    /// Lowercase the first character
    Lcfirst,
    /// Uppercase the first character
    Ucfirst,
}

impl BuiltinFilter {
    /// Every built-in, in default letter order
    pub const ALL: [BuiltinFilter; 11] = [
        BuiltinFilter::Camelize,
        BuiltinFilter::Underscore,
        BuiltinFilter::Variablize,
        BuiltinFilter::Pluralize,
        BuiltinFilter::Singularize,
        BuiltinFilter::Trim,
        BuiltinFilter::Lowercase,
        BuiltinFilter::Uppercase,
        BuiltinFilter::Ucwords,
        BuiltinFilter::Lcfirst,
        BuiltinFilter::Ucfirst,
    ];

    /// Letter this transform is bound to by default
    pub fn default_letter(self) -> char {
        match self {
            BuiltinFilter::Camelize => 'c',
            BuiltinFilter::Underscore => 'u',
            BuiltinFilter::Variablize => 'v',
            BuiltinFilter::Pluralize => 'p',
            BuiltinFilter::Singularize => 's',
            BuiltinFilter::Trim => 't',
            BuiltinFilter::Lowercase => 'l',
            BuiltinFilter::Uppercase => 'U',
            BuiltinFilter::Ucwords => 'w',
            BuiltinFilter::Lcfirst => 'f',
            BuiltinFilter::Ucfirst => 'F',
        }
    }

    /// Canonical name, as used in settings files
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinFilter::Camelize => "camelize",
            BuiltinFilter::Underscore => "underscore",
            BuiltinFilter::Variablize => "variablize",
            BuiltinFilter::Pluralize => "pluralize",
            BuiltinFilter::Singularize => "singularize",
            BuiltinFilter::Trim => "trim",
            BuiltinFilter::Lowercase => "lowercase",
            BuiltinFilter::Uppercase => "uppercase",
            BuiltinFilter::Ucwords => "ucwords",
            BuiltinFilter::Lcfirst => "lcfirst",
            BuiltinFilter::Ucfirst => "ucfirst",
        }
    }

    /// Look up a built-in by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(name))
    }

    fn transform(self, input: &str) -> String {
        match self {
            BuiltinFilter::Camelize => inflector::camelize(input),
            BuiltinFilter::Underscore => inflector::underscore(input),
            BuiltinFilter::Variablize => inflector::variablize(input),
            BuiltinFilter::Pluralize => inflector::pluralize(input),
            BuiltinFilter::Singularize => inflector::singularize(input),
            BuiltinFilter::Trim => inflector::trim(input),
            BuiltinFilter::Lowercase => inflector::lowercase(input),
            BuiltinFilter::Uppercase => inflector::uppercase(input),
            BuiltinFilter::Ucwords => inflector::ucwords(input),
            BuiltinFilter::Lcfirst => inflector::lcfirst(input),
            BuiltinFilter::Ucfirst => inflector::ucfirst(input),
        }
    }
}

impl fmt::Display for BuiltinFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Filter for BuiltinFilter {
    fn apply(&self, value: Value) -> std::result::Result<Value, FilterError> {
        let text = as_text(&value)?;
        Ok(Value::String(self.transform(&text)))
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Mapping of filter letters to transforms
///
/// Iteration order is the letters' code point order, which keeps the
/// generated character class stable.
#[derive(Clone, Default)]
pub struct FilterSet {
    filters: BTreeMap<char, Arc<dyn Filter>>,
}

impl FilterSet {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// The eleven default letter bindings
    pub fn defaults() -> Self {
        let mut set = Self::new();
        for builtin in BuiltinFilter::ALL {
            set.insert(builtin.default_letter(), builtin);
        }
        set
    }

    /// Bind a filter to a letter, returning the previous binding
    pub fn insert(
        &mut self,
        letter: char,
        filter: impl Filter + 'static,
    ) -> Option<Arc<dyn Filter>> {
        self.filters.insert(letter, Arc::new(filter))
    }

    /// Bind an already shared filter to a letter
    pub fn insert_shared(
        &mut self,
        letter: char,
        filter: Arc<dyn Filter>,
    ) -> Option<Arc<dyn Filter>> {
        self.filters.insert(letter, filter)
    }

    /// Remove a letter binding
    pub fn remove(&mut self, letter: char) -> Option<Arc<dyn Filter>> {
        self.filters.remove(&letter)
    }

    /// Get the filter bound to a letter
    pub fn get(&self, letter: char) -> Option<&Arc<dyn Filter>> {
        self.filters.get(&letter)
    }

    /// Check whether a letter is bound
    pub fn contains(&self, letter: char) -> bool {
        self.filters.contains_key(&letter)
    }

    /// Bound letters in order
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.filters.keys().copied()
    }

    /// Letter and filter name pairs in order
    pub fn bindings(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.filters
            .iter()
            .map(|(letter, filter)| (*letter, filter.name()))
    }

    /// Number of bound letters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no letters are bound
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Fold `letters` left to right over `value`
    ///
    /// Unbound letters are skipped. The first failing transform aborts the
    /// chain with [`ParserError::Filter`].
    pub fn apply(&self, value: Value, letters: &str) -> Result<Value> {
        letters.chars().try_fold(value, |value, letter| match self.get(letter) {
            Some(filter) => filter.apply(value).map_err(|source| ParserError::Filter {
                letter,
                source,
            }),
            None => {
                trace!(letter = %letter, "Skipping unbound filter letter");
                Ok(value)
            }
        })
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.bindings()).finish()
    }
}
