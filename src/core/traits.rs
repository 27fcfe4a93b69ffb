use crate::models::Temperament;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Attributes inferred from a shelter listing's free-text description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAttributes {
    pub energy_level: u8,
    pub independence: u8,
    pub personality_traits: BTreeSet<String>,
    pub temperament: Temperament,
}

/// Energy assumed when the description says nothing about it
pub const DEFAULT_ENERGY_LEVEL: u8 = 5;
/// Independence assumed when the description says nothing about it
pub const DEFAULT_INDEPENDENCE: u8 = 5;

impl Default for DerivedAttributes {
    fn default() -> Self {
        Self {
            energy_level: DEFAULT_ENERGY_LEVEL,
            independence: DEFAULT_INDEPENDENCE,
            personality_traits: BTreeSet::new(),
            temperament: Temperament::Moderate,
        }
    }
}

fn word_pattern(alternatives: &str) -> Regex {
    Regex::new(&format!(r"\b(?:{})\b", alternatives)).expect("valid keyword pattern")
}

static TRAIT_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("calm", word_pattern("calm|quiet|gentle|peaceful")),
        ("playful", word_pattern("playful|active|energetic|loves to play")),
        ("independent", word_pattern("independent|self-sufficient")),
        ("affectionate", word_pattern("affectionate|loving|cuddly|lap cat")),
        ("social", word_pattern("social|friendly|outgoing")),
        ("shy", word_pattern("shy|timid|reserved")),
    ]
});

static HIGH_ENERGY: LazyLock<Regex> = LazyLock::new(|| word_pattern("high energy|very active|energetic"));
static MEDIUM_ENERGY: LazyLock<Regex> = LazyLock::new(|| word_pattern("playful|active"));
static LOW_ENERGY: LazyLock<Regex> = LazyLock::new(|| word_pattern("calm|quiet|low energy"));

static INDEPENDENT: LazyLock<Regex> = LazyLock::new(|| word_pattern("independent|self-sufficient"));
static NEEDY: LazyLock<Regex> = LazyLock::new(|| word_pattern("needs attention|very social"));

static EASY_GOING: LazyLock<Regex> = LazyLock::new(|| word_pattern("easy going|gentle|calm"));
static DEMANDING: LazyLock<Regex> = LazyLock::new(|| word_pattern("special needs|requires|challenging"));

static NOT_A_CAT: LazyLock<Regex> = LazyLock::new(|| Regex::new("rabbit|bunny|hop").expect("valid keyword pattern"));

/// Derive compatibility attributes from a listing description
///
/// Matching is case-insensitive and on whole words. Each rule picks the
/// first tier that matches, falling back to the defaults.
pub fn derive_attributes(description: &str) -> DerivedAttributes {
    let text = description.to_lowercase();

    let personality_traits = TRAIT_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&text))
        .map(|(name, _)| name.to_string())
        .collect();

    let energy_level = if HIGH_ENERGY.is_match(&text) {
        8
    } else if MEDIUM_ENERGY.is_match(&text) {
        6
    } else if LOW_ENERGY.is_match(&text) {
        3
    } else {
        DEFAULT_ENERGY_LEVEL
    };

    let independence = if INDEPENDENT.is_match(&text) {
        8
    } else if NEEDY.is_match(&text) {
        3
    } else {
        DEFAULT_INDEPENDENCE
    };

    let temperament = if EASY_GOING.is_match(&text) {
        Temperament::Easy
    } else if DEMANDING.is_match(&text) {
        Temperament::Challenging
    } else {
        Temperament::Moderate
    };

    DerivedAttributes {
        energy_level,
        independence,
        personality_traits,
        temperament,
    }
}

/// Check whether a shelter listing is plausibly a cat
///
/// The directory occasionally returns mislabeled animals: anything with an
/// explicit non-cat type, or a description mentioning rabbits, is rejected.
pub fn is_probably_cat(animal_type: Option<&str>, description: &str) -> bool {
    if let Some(kind) = animal_type {
        if !kind.eq_ignore_ascii_case("cat") {
            return false;
        }
    }

    !NOT_A_CAT.is_match(&description.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(attrs: &DerivedAttributes) -> Vec<&str> {
        attrs.personality_traits.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_description_uses_defaults() {
        assert_eq!(derive_attributes(""), DerivedAttributes::default());
    }

    #[test]
    fn test_calm_lap_cat() {
        let attrs = derive_attributes("Luna is a calm, gentle lap cat who loves quiet evenings.");

        assert_eq!(names(&attrs), vec!["affectionate", "calm"]);
        assert_eq!(attrs.energy_level, 3);
        assert_eq!(attrs.independence, DEFAULT_INDEPENDENCE);
        assert_eq!(attrs.temperament, Temperament::Easy);
    }

    #[test]
    fn test_energetic_independent_cat() {
        let attrs = derive_attributes("Very Active and ENERGETIC. Independent hunter, friendly with kids.");

        assert_eq!(names(&attrs), vec!["independent", "playful", "social"]);
        assert_eq!(attrs.energy_level, 8);
        assert_eq!(attrs.independence, 8);
        assert_eq!(attrs.temperament, Temperament::Moderate);
    }

    #[test]
    fn test_special_needs_cat() {
        let attrs = derive_attributes("Oliver has special needs and needs attention every day. A bit shy.");

        assert_eq!(names(&attrs), vec!["shy"]);
        assert_eq!(attrs.independence, 3);
        assert_eq!(attrs.temperament, Temperament::Challenging);
    }

    #[test]
    fn test_whole_word_matching() {
        // "inactive" must not count as "active", "calmly" must not count as "calm"
        let attrs = derive_attributes("Mostly inactive, purrs calmly.");

        assert!(attrs.personality_traits.is_empty());
        assert_eq!(attrs.energy_level, DEFAULT_ENERGY_LEVEL);
    }

    #[test]
    fn test_traits_serialize_in_sorted_order() {
        let attrs = derive_attributes("Shy at first but friendly, calm and playful once settled.");

        assert_eq!(
            serde_json::to_value(&attrs.personality_traits).unwrap(),
            serde_json::json!(["calm", "playful", "shy", "social"])
        );
    }

    #[test]
    fn test_is_probably_cat() {
        assert!(is_probably_cat(Some("Cat"), "A sweet tabby"));
        assert!(is_probably_cat(None, "A sweet tabby"));
        assert!(!is_probably_cat(Some("Rabbit"), "A sweet lop"));
        assert!(!is_probably_cat(Some("cat"), "Loves to hop around like a Bunny"));
    }
}
