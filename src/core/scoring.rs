use crate::models::{BreedInfo, CatProfile, ExperienceLevel, HomeType, Temperament, UserProfile};

/// Upper bound of the lifestyle sub-score
pub const LIFESTYLE_MAX: u8 = 40;
/// Upper bound of the experience sub-score
pub const EXPERIENCE_MAX: u8 = 30;
/// Upper bound of the personality sub-score
pub const PERSONALITY_MAX: u8 = 30;

const SCHEDULE_SHORT_ABSENCE_HOURS: f64 = 4.0;
const SCHEDULE_WORKDAY_HOURS: f64 = 8.0;

const PERSONALITY_BASE: i32 = 15;
const TRAIT_MATCH_POINTS: i32 = 5;
const TRAIT_BONUS_CAP: i32 = 15;
const ALLERGY_PENALTY: i32 = 10;

/// Experience points by adopter experience (rows) and cat temperament (columns)
///
/// | experience \ temperament | easy | moderate | challenging |
/// |---|---|---|---|
/// | first time | 30 | 20 | 10 |
/// | some experience | 30 | 30 | 25 |
/// | very experienced | 30 | 30 | 30 |
pub const EXPERIENCE_TABLE: [[u8; 3]; 3] = [
    [30, 20, 10],
    [30, 30, 25],
    [30, 30, 30],
];

/// Calculate lifestyle compatibility (0-40)
///
/// Sum of three independent contributions:
/// schedule fit (max 20) + space fit (max 10) + activity alignment (max 10)
pub fn lifestyle_score(user: &UserProfile, cat: &CatProfile) -> u8 {
    let score = schedule_points(user.hours_away_per_day, cat.independence)
        + space_points(user.home_type, cat.energy_level)
        + activity_points(user.activity_level, cat.energy_level);

    score.min(LIFESTYLE_MAX)
}

/// Long absences strain cats that do not tolerate being alone
#[inline]
fn schedule_points(hours_away: f64, independence: u8) -> u8 {
    if hours_away <= SCHEDULE_SHORT_ABSENCE_HOURS {
        20
    } else if hours_away <= SCHEDULE_WORKDAY_HOURS {
        if independence >= 7 { 20 } else { 12 }
    } else if independence >= 8 {
        15
    } else {
        5
    }
}

/// High energy cats are penalized in apartments only
#[inline]
fn space_points(home_type: HomeType, energy_level: u8) -> u8 {
    match home_type {
        HomeType::Apartment => match energy_level {
            0..=5 => 10,
            6..=7 => 6,
            _ => 2,
        },
        HomeType::HouseWithYard | HomeType::FarmRural => 10,
    }
}

/// Linear decay: 10 points for an exact match, nothing once the gap reaches 10
#[inline]
fn activity_points(activity_level: u8, energy_level: u8) -> u8 {
    10u8.saturating_sub(activity_level.abs_diff(energy_level))
}

/// Calculate experience compatibility (0-30) as a direct table lookup
#[inline]
pub fn experience_score(experience: ExperienceLevel, temperament: Temperament) -> u8 {
    EXPERIENCE_TABLE[experience.index()][temperament.index()]
}

/// Calculate personality compatibility (0-30)
///
/// Base 15, plus 5 per shared trait (capped at 15), minus 10 when an
/// allergic adopter is paired with a known non-hypoallergenic breed.
/// Unknown breed carries no penalty.
pub fn personality_score(
    user: &UserProfile,
    cat: &CatProfile,
    breed_info: Option<&BreedInfo>,
) -> u8 {
    let mut score = PERSONALITY_BASE + trait_bonus(user, cat) as i32;

    if user.has_allergies {
        if let Some(breed) = breed_info {
            if !breed.hypoallergenic {
                score -= ALLERGY_PENALTY;
            }
        }
    }

    score.clamp(0, PERSONALITY_MAX as i32) as u8
}

/// Points awarded for overlap between desired and observed traits (0-15)
pub fn trait_bonus(user: &UserProfile, cat: &CatProfile) -> u8 {
    if user.desired_traits.is_empty() || cat.personality_traits.is_empty() {
        return 0;
    }

    let shared = user
        .desired_traits
        .intersection(&cat.personality_traits)
        .count();

    let bonus = (shared as i32).saturating_mul(TRAIT_MATCH_POINTS);
    bonus.min(TRAIT_BONUS_CAP) as u8
}
