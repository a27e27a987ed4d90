//! URL segment generation.
//!
//! Names are transliterated to ASCII where a decomposition exists ("Café"
//! becomes "cafe"), lowercased and run through an ordered filter table. An empty or
//! degenerate result falls back to `"{scope}-{id}"`. Collisions replace any
//! trailing `-<digits>` with `-2`, `-3`, ... until the slug is free.

use crate::domain::SlugConfig;
use crate::ports::{SlugExists, SlugGenerator};
use regex::Regex;
use shared_types::{StoreError, TermId};
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static FILTERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"&amp;", "-and-"),
        (r"&", "-and-"),
        (r"\s|\+", "-"),
        (r"[_.]+", "-"),
        (r"[^A-Za-z0-9\-]+", ""),
        (r"[/?=#:]+", "-"),
        (r"-{2,}", "-"),
        (r"^-+", ""),
        (r"-+$", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid slug filter"), replacement))
    .collect()
});

static NUMERIC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-[0-9]+$").expect("valid suffix pattern"));

/// Compatibility-decompose and drop the combining marks, leaving base letters.
fn transliterate(raw: &str) -> String {
    raw.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Apply the slug filter table to a raw name.
pub fn sanitize(raw: &str) -> String {
    FILTERS
        .iter()
        .fold(transliterate(raw.trim()).to_lowercase(), |slug, (rule, replacement)| {
            rule.replace_all(&slug, *replacement).into_owned()
        })
}

/// Default `SlugGenerator`.
#[derive(Debug, Clone, Default)]
pub struct UrlSegmentGenerator {
    config: SlugConfig,
}

impl UrlSegmentGenerator {
    pub fn new(config: SlugConfig) -> Self {
        Self { config }
    }

    /// Scope label used for fallback slugs.
    pub fn scope(&self) -> &str {
        &self.config.scope_label
    }
}

impl SlugGenerator for UrlSegmentGenerator {
    fn generate(
        &self,
        raw: &str,
        scope: &str,
        scope_id: TermId,
        exists: &SlugExists<'_>,
    ) -> Result<String, StoreError> {
        let mut candidate = sanitize(raw);
        if candidate.is_empty() || candidate == "-" || candidate == "-1" {
            candidate = sanitize(&format!("{scope}-{}", scope_id.0));
        }

        let mut count = 2u64;
        while exists(&candidate)? {
            candidate = format!("{}-{count}", NUMERIC_SUFFIX.replace(&candidate, ""));
            count += 1;
        }

        Ok(candidate)
    }
}
