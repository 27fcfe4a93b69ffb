/// Build the three human-readable reasons for a score, in the fixed order
/// lifestyle, experience, personality
pub fn generate_reasons(lifestyle: u8, experience: u8, personality: u8) -> Vec<String> {
    vec![
        lifestyle_reason(lifestyle).to_string(),
        experience_reason(experience).to_string(),
        personality_reason(personality).to_string(),
    ]
}

pub fn lifestyle_reason(score: u8) -> &'static str {
    if score >= 35 {
        "Excellent lifestyle match for your schedule and home"
    } else if score >= 25 {
        "Good lifestyle compatibility"
    } else {
        "Some lifestyle adjustments may be needed"
    }
}

pub fn experience_reason(score: u8) -> &'static str {
    if score >= 25 {
        "Perfect match for your experience level"
    } else if score >= 20 {
        "Suitable for your cat experience"
    } else {
        "May be challenging for your current experience"
    }
}

pub fn personality_reason(score: u8) -> &'static str {
    if score >= 25 {
        "Strong personality and trait compatibility"
    } else if score >= 15 {
        "Good personality match"
    } else {
        "Some personality differences to consider"
    }
}
