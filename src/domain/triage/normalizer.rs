//! Lexical normalizer.
//!
//! Rewrites colloquial symptom phrasings ("болит живот") into the canonical
//! phrases the symptom index knows ("боль в животе"). Rules are applied in
//! table order and each rule replaces at most one occurrence per pass.
//!
//! The shipped table is not idempotent: `температура` is part of its own
//! canonical phrase, so normalizing already-normalized text repeats
//! "высокая". The matcher only looks for substrings, so the extra word
//! does not change which symptoms are found.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::domain::foundation::ValidationError;

/// Rule table shipped with the bot, in application order.
static SHIPPED_RULES: Lazy<NormalizationRules> = Lazy::new(|| NormalizationRules {
    rules: [
        ("болит живот", "боль в животе"),
        ("живот болит", "боль в животе"),
        ("температура", "высокая температура"),
        ("кашляет", "кашель"),
        ("кашляю", "кашель"),
        ("болит голова", "головная боль"),
        ("голова болит", "головная боль"),
        ("грудь болит", "боль в груди"),
        ("боль в области груди", "боль в груди"),
    ]
    .into_iter()
    .map(|(colloquial, canonical)| NormalizationRule {
        colloquial: colloquial.to_string(),
        canonical: canonical.to_string(),
    })
    .collect(),
});

/// A single colloquial -> canonical rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationRule {
    pub colloquial: String,
    pub canonical: String,
}

/// Ordered normalization rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationRules {
    rules: Vec<NormalizationRule>,
}

impl NormalizationRules {
    /// The rule table the bot ships with.
    pub fn shipped() -> Self {
        SHIPPED_RULES.clone()
    }

    /// Builds a rule table from an ordered phrase map.
    ///
    /// Phrases are case-folded because input is lower-cased before the rules
    /// run; a rule with an empty colloquial phrase would match everywhere and
    /// is rejected.
    pub fn from_map(map: IndexMap<String, String>) -> Result<Self, ValidationError> {
        let mut rules = Vec::with_capacity(map.len());
        for (colloquial, canonical) in map {
            let colloquial = colloquial.trim().to_lowercase();
            if colloquial.is_empty() {
                return Err(ValidationError::empty_field("normalization.colloquial"));
            }
            rules.push(NormalizationRule {
                colloquial,
                canonical: canonical.trim().to_lowercase(),
            });
        }
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizationRule> {
        self.rules.iter()
    }

    /// Lower-cases the input and applies every rule once, in table order.
    pub fn normalize(&self, input: &str) -> String {
        let mut text = input.to_lowercase();
        for rule in &self.rules {
            if text.contains(rule.colloquial.as_str()) {
                text = text.replacen(rule.colloquial.as_str(), &rule.canonical, 1);
            }
        }
        text
    }
}

impl Default for NormalizationRules {
    fn default() -> Self {
        Self::shipped()
    }
}
