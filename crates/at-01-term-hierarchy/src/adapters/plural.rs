//! Rule-table English pluralizer.
//!
//! Checked in order: uncountable words, irregular suffixes, then the
//! ordered suffix rules. The last rule always matches.

use crate::ports::Pluralizer;
use regex::Regex;
use std::sync::LazyLock;

static UNCOUNTABLE: &[&str] = &[
    "sheep",
    "fish",
    "deer",
    "series",
    "species",
    "money",
    "rice",
    "information",
    "equipment",
];

static IRREGULAR: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        ("move", "moves"),
        ("foot", "feet"),
        ("goose", "geese"),
        ("sex", "sexes"),
        ("child", "children"),
        ("man", "men"),
        ("woman", "women"),
        ("tooth", "teeth"),
        ("person", "people"),
        ("valve", "valves"),
    ]
    .into_iter()
    .map(|(singular, plural)| {
        let rule = Regex::new(&format!("(?i){singular}$")).expect("valid irregular rule");
        (rule, plural)
    })
    .collect()
});

static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)(quiz)$", "${1}zes"),
        (r"(?i)^(ox)$", "${1}en"),
        (r"(?i)([m|l])ouse$", "${1}ice"),
        (r"(?i)(matr|vert|ind)ix|ex$", "${1}ices"),
        (r"(?i)(x|ch|ss|sh)$", "${1}es"),
        (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
        (r"(?i)(hive)$", "${1}s"),
        (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(?i)(shea|lea|loa|thie)f$", "${1}ves"),
        (r"(?i)sis$", "ses"),
        (r"(?i)([ti])um$", "${1}a"),
        (r"(?i)(tomat|potat|ech|her|vet)o$", "${1}oes"),
        (r"(?i)(bu)s$", "${1}ses"),
        (r"(?i)(alias)$", "${1}es"),
        (r"(?i)(octop)us$", "${1}i"),
        (r"(?i)(ax|test)is$", "${1}es"),
        (r"(?i)(us)$", "${1}es"),
        (r"(?i)s$", "s"),
        (r"$", "s"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid plural rule"), replacement))
    .collect()
});

/// Pluralizer driven by the built-in English rule tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulePluralizer;

impl Pluralizer for RulePluralizer {
    fn pluralize(&self, singular: &str) -> String {
        if UNCOUNTABLE.contains(&singular.to_lowercase().as_str()) {
            return singular.to_string();
        }

        IRREGULAR
            .iter()
            .chain(RULES.iter())
            .find(|(rule, _)| rule.is_match(singular))
            .map(|(rule, replacement)| rule.replace_all(singular, *replacement).into_owned())
            .unwrap_or_else(|| singular.to_string())
    }
}
