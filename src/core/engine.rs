use crate::models::{BreedInfo, CatProfile, CompatibilityScore, Match, UserProfile};
use crate::core::{
    reasons::generate_reasons,
    scoring::{
        experience_score, lifestyle_score, personality_score, EXPERIENCE_MAX, LIFESTYLE_MAX,
        PERSONALITY_MAX,
    },
};

/// Result of ranking a batch of candidates
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<Match>,
    pub total_candidates: usize,
}

/// Compatibility scoring engine
///
/// Stateless: every call to [`CompatibilityEngine::score`] depends only on its
/// arguments, so one engine can be shared freely across workers.
///
/// # Score composition
/// 1. Lifestyle (0-40): schedule, space, activity alignment
/// 2. Experience (0-30): adopter experience x cat temperament table
/// 3. Personality (0-30): shared traits and allergy adjustment
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityEngine;

impl CompatibilityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score a single cat for an adopter
    ///
    /// Total over well-formed inputs: a poor match yields a low score, never
    /// an error. `breed_info` of `None` means the breed is unknown.
    pub fn score(
        &self,
        user: &UserProfile,
        cat: &CatProfile,
        breed_info: Option<&BreedInfo>,
    ) -> CompatibilityScore {
        let lifestyle = lifestyle_score(user, cat).min(LIFESTYLE_MAX);
        let experience = experience_score(user.experience, cat.temperament).min(EXPERIENCE_MAX);
        let personality = personality_score(user, cat, breed_info).min(PERSONALITY_MAX);

        CompatibilityScore {
            subject_id: cat.id.clone(),
            lifestyle_score: lifestyle,
            experience_score: experience,
            personality_score: personality,
            total_score: lifestyle + experience + personality,
            reasons: generate_reasons(lifestyle, experience, personality),
        }
    }

    /// Score every candidate, then order by total score and keep the best `limit`
    ///
    /// # Arguments
    /// * `user` - The adopter's quiz answers
    /// * `candidates` - Cats paired with their breed metadata, if known
    /// * `limit` - Maximum number of matches to return
    pub fn rank(
        &self,
        user: &UserProfile,
        candidates: Vec<(CatProfile, Option<BreedInfo>)>,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let mut matches: Vec<Match> = candidates
            .into_iter()
            .map(|(cat, breed_info)| {
                let score = self.score(user, &cat, breed_info.as_ref());
                let rating = score.rating();
                Match {
                    cat,
                    score,
                    breed_info,
                    rating,
                }
            })
            .collect();

        sort_by_compatibility(&mut matches);
        matches.truncate(limit);

        MatchResult {
            matches,
            total_candidates,
        }
    }
}

/// Sort matches by total score, highest first
///
/// The sort is stable, so equal totals keep their input order.
pub fn sort_by_compatibility(matches: &mut [Match]) {
    matches.sort_by(|a, b| b.score.total_score.cmp(&a.score.total_score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLevel, HomeType, Temperament};
    use std::collections::BTreeSet;

    fn create_user() -> UserProfile {
        UserProfile {
            id: None,
            home_type: HomeType::Apartment,
            hours_away_per_day: 9.0,
            activity_level: 4,
            experience: ExperienceLevel::FirstTime,
            has_allergies: false,
            desired_traits: ["calm", "affectionate"].iter().map(|t| t.to_string()).collect(),
            zip_code: "10001".to_string(),
        }
    }

    fn create_cat(id: &str, energy_level: u8, independence: u8, temperament: Temperament) -> CatProfile {
        CatProfile {
            id: id.to_string(),
            name: format!("Cat {}", id),
            age: "Adult".to_string(),
            breeds: vec![],
            size: "Medium".to_string(),
            gender: "Male".to_string(),
            description: String::new(),
            photos: vec![],
            contact_email: String::new(),
            contact_phone: String::new(),
            shelter_name: "Shelter".to_string(),
            distance: None,
            energy_level,
            independence,
            personality_traits: ["calm", "playful"].iter().map(|t| t.to_string()).collect(),
            temperament,
        }
    }

    #[test]
    fn test_score_worked_example() {
        let engine = CompatibilityEngine::new();
        let user = create_user();
        let cat = create_cat("42", 8, 8, Temperament::Moderate);

        let score = engine.score(&user, &cat, None);

        assert_eq!(score.subject_id, "42");
        assert_eq!(score.lifestyle_score, 23);
        assert_eq!(score.experience_score, 20);
        assert_eq!(score.personality_score, 20);
        assert_eq!(score.total_score, 63);
        assert_eq!(
            score.reasons,
            vec![
                "Some lifestyle adjustments may be needed",
                "Suitable for your cat experience",
                "Good personality match",
            ]
        );
    }

    #[test]
    fn test_score_is_deterministic() {
        let engine = CompatibilityEngine::new();
        let user = create_user();
        let cat = create_cat("1", 3, 5, Temperament::Easy);

        assert_eq!(engine.score(&user, &cat, None), engine.score(&user, &cat, None));
    }

    #[test]
    fn test_rank_sorts_and_limits() {
        let engine = CompatibilityEngine::new();
        let mut user = create_user();
        user.desired_traits = BTreeSet::new();

        let candidates = vec![
            (create_cat("low", 10, 1, Temperament::Challenging), None),
            (create_cat("high", 4, 9, Temperament::Easy), None),
            (create_cat("mid", 6, 9, Temperament::Moderate), None),
        ];

        let result = engine.rank(&user, candidates, 2);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].cat.id, "high");
        assert_eq!(result.matches[1].cat.id, "mid");
    }

    #[test]
    fn test_rank_keeps_input_order_on_ties() {
        let engine = CompatibilityEngine::new();
        let user = create_user();

        let candidates = vec![
            (create_cat("first", 5, 5, Temperament::Easy), None),
            (create_cat("second", 5, 5, Temperament::Easy), None),
        ];

        let result = engine.rank(&user, candidates, 10);

        assert_eq!(result.matches[0].cat.id, "first");
        assert_eq!(result.matches[1].cat.id, "second");
    }
}
