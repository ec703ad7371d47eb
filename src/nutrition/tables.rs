//! Reference tables for nutrition targets
//!
//! Activity multipliers, protein-per-kg rules and daily micronutrient intakes.
//! Kept as data so the calculator stays a straight pipeline.

use serde::Serialize;

use crate::models::{ActivityLevel, Goal, Sex};

/// Mifflin-St Jeor coefficients
pub const BMR_WEIGHT_COEF: f64 = 10.0;
pub const BMR_HEIGHT_COEF: f64 = 6.25;
pub const BMR_AGE_COEF: f64 = 5.0;
pub const BMR_MALE_OFFSET: f64 = 5.0;
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

/// Healthy BMI band used for the ideal weight range
pub const BMI_HEALTHY_MIN: f64 = 18.5;
pub const BMI_HEALTHY_MAX: f64 = 24.9;

/// Daily surplus or deficit applied to TDEE (kcal)
pub const CALORIE_ADJUSTMENT_KCAL: f64 = 500.0;

/// Energy density (kcal per gram)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Share of target calories allotted to fat
pub const FAT_CALORIE_SHARE: f64 = 0.25;

/// Upper age (inclusive) of the younger intake bracket
pub const YOUNGER_BRACKET_MAX_AGE: u32 = 50;

/// TDEE multipliers, indexed by `ActivityLevel as usize`
pub const ACTIVITY_MULTIPLIERS: [(ActivityLevel, f64); 5] = [
    (ActivityLevel::Sedentary, 1.2),
    (ActivityLevel::LightlyActive, 1.375),
    (ActivityLevel::ModeratelyActive, 1.55),
    (ActivityLevel::VeryActive, 1.725),
    (ActivityLevel::ExtremelyActive, 1.9),
];

pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    ACTIVITY_MULTIPLIERS[level as usize].1
}

/// A protein-per-kg rule; the first rule that applies wins
#[derive(Debug, Clone, Copy)]
pub struct ProteinRule {
    pub grams_per_kg: f64,
    pub applies: fn(Goal, ActivityLevel) -> bool,
}

fn muscle_or_high_activity(goal: Goal, level: ActivityLevel) -> bool {
    goal == Goal::BuildMuscle
        || matches!(level, ActivityLevel::VeryActive | ActivityLevel::ExtremelyActive)
}

fn weight_loss(goal: Goal, _level: ActivityLevel) -> bool {
    goal == Goal::LoseWeight
}

pub const PROTEIN_RULES: [ProteinRule; 2] = [
    ProteinRule {
        grams_per_kg: 2.2,
        applies: muscle_or_high_activity,
    },
    ProteinRule {
        grams_per_kg: 2.0,
        applies: weight_loss,
    },
];

/// Protein per kg when no rule applies
pub const DEFAULT_PROTEIN_PER_KG: f64 = 1.6;

/// Micronutrients with a recommended daily intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Micronutrient {
    VitaminC,
    VitaminD,
    Calcium,
    Iron,
    Magnesium,
    Zinc,
    VitaminB12,
    Folate,
    Potassium,
    Fiber,
}

impl Micronutrient {
    /// Wire key
    pub fn key(&self) -> &'static str {
        match self {
            Micronutrient::VitaminC => "vitaminC",
            Micronutrient::VitaminD => "vitaminD",
            Micronutrient::Calcium => "calcium",
            Micronutrient::Iron => "iron",
            Micronutrient::Magnesium => "magnesium",
            Micronutrient::Zinc => "zinc",
            Micronutrient::VitaminB12 => "vitaminB12",
            Micronutrient::Folate => "folate",
            Micronutrient::Potassium => "potassium",
            Micronutrient::Fiber => "fiber",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Micronutrient::VitaminD | Micronutrient::VitaminB12 | Micronutrient::Folate => "mcg",
            Micronutrient::Fiber => "g",
            _ => "mg",
        }
    }
}

/// How a daily intake depends on sex and age
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntakeRule {
    Fixed(f64),
    BySex { male: f64, female: f64 },
    ByAge { through_50: f64, over_50: f64 },
    FemaleByAge { male: f64, female_through_50: f64, female_over_50: f64 },
}

impl IntakeRule {
    pub fn amount(&self, sex: Sex, age_years: u32) -> f64 {
        let younger = age_years <= YOUNGER_BRACKET_MAX_AGE;
        match (*self, sex) {
            (IntakeRule::Fixed(v), _) => v,
            (IntakeRule::BySex { male, .. }, Sex::Male) => male,
            (IntakeRule::BySex { female, .. }, Sex::Female) => female,
            (IntakeRule::ByAge { through_50, over_50 }, _) => {
                if younger { through_50 } else { over_50 }
            }
            (IntakeRule::FemaleByAge { male, .. }, Sex::Male) => male,
            (IntakeRule::FemaleByAge { female_through_50, female_over_50, .. }, Sex::Female) => {
                if younger { female_through_50 } else { female_over_50 }
            }
        }
    }
}

pub const MICRONUTRIENT_TABLE: [(Micronutrient, IntakeRule); 10] = [
    (Micronutrient::VitaminC, IntakeRule::BySex { male: 90.0, female: 75.0 }),
    (Micronutrient::VitaminD, IntakeRule::Fixed(15.0)),
    (Micronutrient::Calcium, IntakeRule::ByAge { through_50: 1000.0, over_50: 1200.0 }),
    (
        Micronutrient::Iron,
        IntakeRule::FemaleByAge { male: 8.0, female_through_50: 18.0, female_over_50: 8.0 },
    ),
    (Micronutrient::Magnesium, IntakeRule::BySex { male: 400.0, female: 310.0 }),
    (Micronutrient::Zinc, IntakeRule::BySex { male: 11.0, female: 8.0 }),
    (Micronutrient::VitaminB12, IntakeRule::Fixed(2.4)),
    (Micronutrient::Folate, IntakeRule::Fixed(400.0)),
    (Micronutrient::Potassium, IntakeRule::Fixed(3500.0)),
    (Micronutrient::Fiber, IntakeRule::BySex { male: 38.0, female: 25.0 }),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_table_is_indexed_by_level() {
        for (i, level) in ActivityLevel::ALL.iter().enumerate() {
            assert_eq!(ACTIVITY_MULTIPLIERS[i].0, *level);
            assert_eq!(*level as usize, i);
        }
    }

    #[test]
    fn test_activity_multipliers() {
        assert_eq!(activity_multiplier(ActivityLevel::Sedentary), 1.2);
        assert_eq!(activity_multiplier(ActivityLevel::LightlyActive), 1.375);
        assert_eq!(activity_multiplier(ActivityLevel::ModeratelyActive), 1.55);
        assert_eq!(activity_multiplier(ActivityLevel::VeryActive), 1.725);
        assert_eq!(activity_multiplier(ActivityLevel::ExtremelyActive), 1.9);
    }

    #[test]
    fn test_micronutrient_table_covers_each_nutrient_once() {
        let mut keys: Vec<&str> = MICRONUTRIENT_TABLE.iter().map(|(n, _)| n.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn test_intake_rule_age_boundary() {
        let calcium = IntakeRule::ByAge { through_50: 1000.0, over_50: 1200.0 };
        assert_eq!(calcium.amount(Sex::Male, 50), 1000.0);
        assert_eq!(calcium.amount(Sex::Male, 51), 1200.0);
    }

    #[test]
    fn test_units() {
        assert_eq!(Micronutrient::VitaminC.unit(), "mg");
        assert_eq!(Micronutrient::VitaminB12.unit(), "mcg");
        assert_eq!(Micronutrient::Fiber.unit(), "g");
    }
}
