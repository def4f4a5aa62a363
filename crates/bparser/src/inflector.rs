//! Built-in text transforms used by the default filter letters
//!
//! Case conversion goes through `heck`; English pluralization is a compact
//! suffix rule table in the style of the classic Rails/Yii inflectors. The
//! rule tables cover common nouns and are not meant to be exhaustive.

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use once_cell::sync::Lazy;
use regex::Regex;

/// Convert a word to `UpperCamelCase` (`send_email` -> `SendEmail`)
pub fn camelize(input: &str) -> String {
    input.to_upper_camel_case()
}

/// Convert a word to `snake_case` (`userItems` -> `user_items`)
pub fn underscore(input: &str) -> String {
    input.to_snake_case()
}

/// Convert a word to `lowerCamelCase` (`send_email` -> `sendEmail`)
pub fn variablize(input: &str) -> String {
    input.to_lower_camel_case()
}

/// Strip leading and trailing whitespace, including NUL and vertical tab
pub fn trim(input: &str) -> String {
    input
        .trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
        .to_string()
}

/// Unicode-aware lowercase
pub fn lowercase(input: &str) -> String {
    input.to_lowercase()
}

/// Unicode-aware uppercase
pub fn uppercase(input: &str) -> String {
    input.to_uppercase()
}

/// Uppercase the first character of every whitespace separated word
///
/// Unlike a split/join, the original whitespace is preserved.
pub fn ucwords(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.chars() {
        if is_word_delimiter(ch) {
            at_word_start = true;
            result.push(ch);
        } else if at_word_start {
            at_word_start = false;
            result.extend(ch.to_uppercase());
        } else {
            result.push(ch);
        }
    }

    result
}

/// Lowercase the first character only
pub fn lcfirst(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Uppercase the first character only
pub fn ucfirst(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert the last word of `input` to its plural form
pub fn pluralize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    if find_suffix(input, UNCOUNTABLE.iter().copied()).is_some()
        || find_suffix(input, IRREGULAR.iter().map(|(_, plural)| *plural)).is_some()
    {
        return input.to_string();
    }
    if let Some(replaced) = replace_irregular(input, IRREGULAR.iter().copied()) {
        return replaced;
    }
    apply_rules(input, &PLURAL_RULES)
}

/// Convert the last word of `input` to its singular form
pub fn singularize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    if find_suffix(input, UNCOUNTABLE.iter().copied()).is_some()
        || find_suffix(input, IRREGULAR.iter().map(|(singular, _)| *singular)).is_some()
    {
        return input.to_string();
    }
    let reversed = IRREGULAR.iter().map(|(singular, plural)| (*plural, *singular));
    if let Some(replaced) = replace_irregular(input, reversed) {
        return replaced;
    }
    apply_rules(input, &SINGULAR_RULES)
}

fn is_word_delimiter(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\x0C' | '\x0B')
}

/// Irregular (singular, plural) pairs; longer words first so `woman` wins over `man`
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("foot", "feet"),
    ("man", "men"),
    ("ox", "oxen"),
];

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "species",
    "series",
    "money",
    "sheep",
    "moose",
    "rice",
    "fish",
    "deer",
    "news",
];

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn compile_rules(table: &[(&str, &'static str)]) -> Vec<Rule> {
    table
        .iter()
        .filter_map(|&(pattern, replacement)| {
            Regex::new(pattern).ok().map(|pattern| Rule {
                pattern,
                replacement,
            })
        })
        .collect()
}

const PLURAL_TABLE: &[(&str, &str)] = &[
    (r"(?i)(quiz)$", "${1}zes"),
    (r"(?i)(matr|vert|ind)(ix|ex)$", "${1}ices"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)([^f])fe$", "${1}ves"),
    (r"(?i)([lr])f$", "${1}ves"),
    (r"(?i)sis$", "ses"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)(buffal|tomat|potat|her)o$", "${1}oes"),
    (r"(?i)(bu|campu)s$", "${1}ses"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(octop|vir)us$", "${1}i"),
    (r"(?i)(ax|test)is$", "${1}es"),
    (r"(?i)s$", "s"),
    (r"$", "s"),
];

const SINGULAR_TABLE: &[(&str, &str)] = &[
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)(alias|status)(es)?$", "${1}"),
    (r"(?i)(octop|vir)(i|uses)$", "${1}us"),
    (r"(?i)(cris|ax|test)es$", "${1}is"),
    (r"(?i)(shoe)s$", "${1}"),
    (r"(?i)(o)es$", "${1}"),
    (r"(?i)(bus|campus)(es)?$", "${1}"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)(tive)s$", "${1}"),
    (r"(?i)(hive)s$", "${1}"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (r"(?i)(analy|ba|diagno|parenthe|progno|synop|the)ses$", "${1}sis"),
    (r"(?i)([ti])a$", "${1}um"),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)s$", ""),
];

static PLURAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| compile_rules(PLURAL_TABLE));

static SINGULAR_RULES: Lazy<Vec<Rule>> = Lazy::new(|| compile_rules(SINGULAR_TABLE));

fn apply_rules(input: &str, rules: &[Rule]) -> String {
    rules
        .iter()
        .find(|rule| rule.pattern.is_match(input))
        .map(|rule| rule.pattern.replace(input, rule.replacement).into_owned())
        .unwrap_or_else(|| input.to_string())
}

/// Byte offset where one of `words` ends `input` on a word boundary
///
/// A boundary is the start of the string, a non-alphanumeric character before
/// the suffix, or an uppercase first letter (a camelCase hump).
fn find_suffix<'w>(
    input: &str,
    words: impl IntoIterator<Item = &'w str>,
) -> Option<(usize, &'w str)> {
    let lowered = input.to_ascii_lowercase();

    words.into_iter().find_map(|word| {
        if !lowered.ends_with(word) {
            return None;
        }
        let start = lowered.len() - word.len();
        let suffix = &input[start..];
        let boundary = start == 0
            || input[..start]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric())
            || suffix.chars().next().is_some_and(|c| c.is_uppercase());
        boundary.then_some((start, word))
    })
}

fn replace_irregular<'w>(
    input: &str,
    pairs: impl Iterator<Item = (&'w str, &'w str)> + Clone,
) -> Option<String> {
    let (start, word) = find_suffix(input, pairs.clone().map(|(from, _)| from))?;
    let (_, to) = pairs.into_iter().find(|(from, _)| *from == word)?;
    let suffix = &input[start..];

    let replacement = if suffix.len() > 1 && suffix.chars().all(|c| !c.is_lowercase()) {
        to.to_uppercase()
    } else if suffix.chars().next().is_some_and(|c| c.is_uppercase()) {
        ucfirst(to)
    } else {
        to.to_string()
    };

    Some(format!("{}{}", &input[..start], replacement))
}
