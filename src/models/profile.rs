//! Biometric profile model
//!
//! The closed set of inputs the nutrition calculator works from.

use serde::{Deserialize, Serialize};

/// Biological sex, as used by the Mifflin-St Jeor equation and intake tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Habitual activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise or a physical job
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "lightly_active" => Some(ActivityLevel::LightlyActive),
            "moderately_active" => Some(ActivityLevel::ModeratelyActive),
            "very_active" => Some(ActivityLevel::VeryActive),
            "extremely_active" => Some(ActivityLevel::ExtremelyActive),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little/no exercise)",
            ActivityLevel::LightlyActive => "Lightly Active (light exercise 1-3 days/week)",
            ActivityLevel::ModeratelyActive => "Moderately Active (moderate exercise 3-5 days/week)",
            ActivityLevel::VeryActive => "Very Active (hard exercise 6-7 days/week)",
            ActivityLevel::ExtremelyActive => "Extremely Active (very hard exercise, physical job)",
        }
    }
}

/// Fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    #[default]
    MaintainWeight,
    GainWeight,
    BuildMuscle,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::LoseWeight,
        Goal::MaintainWeight,
        Goal::GainWeight,
        Goal::BuildMuscle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::MaintainWeight => "maintain_weight",
            Goal::GainWeight => "gain_weight",
            Goal::BuildMuscle => "build_muscle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "lose_weight" | "lose" => Some(Goal::LoseWeight),
            "maintain_weight" | "maintain" => Some(Goal::MaintainWeight),
            "gain_weight" | "gain" => Some(Goal::GainWeight),
            "build_muscle" => Some(Goal::BuildMuscle),
            _ => None,
        }
    }
}

/// A user's biometric profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_string_round_trip() {
        for sex in Sex::ALL {
            assert_eq!(Sex::from_str(sex.as_str()), Some(sex));
        }
        for level in ActivityLevel::ALL {
            assert_eq!(ActivityLevel::from_str(level.as_str()), Some(level));
        }
        for goal in Goal::ALL {
            assert_eq!(Goal::from_str(goal.as_str()), Some(goal));
        }
    }

    #[test]
    fn test_enum_parsing_is_lenient_on_case_and_dashes() {
        assert_eq!(Sex::from_str(" Female "), Some(Sex::Female));
        assert_eq!(ActivityLevel::from_str("Very-Active"), Some(ActivityLevel::VeryActive));
        assert_eq!(Goal::from_str("BUILD_MUSCLE"), Some(Goal::BuildMuscle));
        assert_eq!(Goal::from_str("bulk"), None);
        assert_eq!(ActivityLevel::from_str("couch"), None);
    }

    #[test]
    fn test_defaults_match_registration_defaults() {
        assert_eq!(ActivityLevel::default(), ActivityLevel::ModeratelyActive);
        assert_eq!(Goal::default(), Goal::MaintainWeight);
    }

    #[test]
    fn test_profile_serializes_with_wire_names() {
        let profile = BiometricProfile {
            weight_kg: 70.0,
            height_cm: 175.0,
            age_years: 30,
            sex: Sex::Male,
            activity_level: ActivityLevel::LightlyActive,
            goal: Goal::BuildMuscle,
        };
        let json = serde_json::to_value(profile).unwrap();
        assert_eq!(json["weightKg"], 70.0);
        assert_eq!(json["heightCm"], 175.0);
        assert_eq!(json["ageYears"], 30);
        assert_eq!(json["sex"], "male");
        assert_eq!(json["activityLevel"], "lightly_active");
        assert_eq!(json["goal"], "build_muscle");
    }
}
