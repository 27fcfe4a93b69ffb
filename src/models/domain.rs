use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Adopter's living situation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeType {
    Apartment,
    HouseWithYard,
    FarmRural,
}

/// Adopter's prior experience with cats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    FirstTime,
    SomeExperience,
    VeryExperienced,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::FirstTime,
        ExperienceLevel::SomeExperience,
        ExperienceLevel::VeryExperienced,
    ];

    /// Row index into the experience lookup table
    pub(crate) fn index(self) -> usize {
        match self {
            ExperienceLevel::FirstTime => 0,
            ExperienceLevel::SomeExperience => 1,
            ExperienceLevel::VeryExperienced => 2,
        }
    }
}

/// Coarse classification of how demanding a cat is to care for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperament {
    Easy,
    #[default]
    Moderate,
    Challenging,
}

impl Temperament {
    pub const ALL: [Temperament; 3] = [
        Temperament::Easy,
        Temperament::Moderate,
        Temperament::Challenging,
    ];

    /// Column index into the experience lookup table
    pub(crate) fn index(self) -> usize {
        match self {
            Temperament::Easy => 0,
            Temperament::Moderate => 1,
            Temperament::Challenging => 2,
        }
    }
}

/// Adopter profile collected by the compatibility quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "homeType")]
    pub home_type: HomeType,
    #[validate(range(min = 0.0))]
    #[serde(rename = "hoursAwayPerDay", alias = "hoursAway")]
    pub hours_away_per_day: f64,
    #[validate(range(min = 1, max = 10))]
    #[serde(rename = "activityLevel")]
    pub activity_level: u8,
    pub experience: ExperienceLevel,
    #[serde(rename = "hasAllergies", alias = "allergies", default)]
    pub has_allergies: bool,
    #[serde(rename = "desiredTraits", default)]
    pub desired_traits: BTreeSet<String>,
    #[validate(length(min = 1, message = "ZIP code is required"))]
    #[serde(rename = "zipCode", default)]
    pub zip_code: String,
}

/// Adoptable cat as listed by the shelter directory, with derived attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatProfile {
    #[serde(rename = "id", alias = "petfinderId")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub breeds: Vec<String>,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(rename = "contactEmail", default)]
    pub contact_email: String,
    #[serde(rename = "contactPhone", default)]
    pub contact_phone: String,
    #[serde(rename = "shelterName", default)]
    pub shelter_name: String,
    #[serde(default)]
    pub distance: Option<f64>,

    // Derived compatibility attributes
    #[serde(rename = "energyLevel")]
    pub energy_level: u8,
    pub independence: u8,
    #[serde(rename = "personalityTraits", default)]
    pub personality_traits: BTreeSet<String>,
    #[serde(default)]
    pub temperament: Temperament,
}

/// Breed metadata from the breed catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedInfo {
    pub name: String,
    #[serde(default)]
    pub temperament: Vec<String>,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "lifeSpan", default)]
    pub life_span: String,
    #[serde(default)]
    pub hypoallergenic: bool,
    #[serde(rename = "energyLevel", default = "default_breed_level")]
    pub energy_level: u8,
    #[serde(rename = "affectionLevel", default = "default_breed_level")]
    pub affection_level: u8,
}

pub(crate) fn default_breed_level() -> u8 { 3 }

/// Compatibility result for a single adopter/cat pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    #[serde(rename = "subjectId", alias = "catId")]
    pub subject_id: String,
    #[serde(rename = "lifestyleScore")]
    pub lifestyle_score: u8,
    #[serde(rename = "experienceScore")]
    pub experience_score: u8,
    #[serde(rename = "personalityScore")]
    pub personality_score: u8,
    #[serde(rename = "totalScore")]
    pub total_score: u8,
    pub reasons: Vec<String>,
}

impl CompatibilityScore {
    pub fn rating(&self) -> MatchRating {
        MatchRating::from_total(self.total_score)
    }
}

/// Coarse label shown next to a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchRating {
    Excellent,
    Good,
    Fair,
}

impl MatchRating {
    pub fn from_total(total: u8) -> Self {
        if total >= 80 {
            MatchRating::Excellent
        } else if total >= 60 {
            MatchRating::Good
        } else {
            MatchRating::Fair
        }
    }
}

/// A scored candidate as returned to the quiz UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub cat: CatProfile,
    pub score: CompatibilityScore,
    #[serde(rename = "breedInfo")]
    pub breed_info: Option<BreedInfo>,
    pub rating: MatchRating,
}
