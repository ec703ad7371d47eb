//! Nutrition report types
//!
//! Output of the calculator. Field names are the wire names the client reads.

use serde::{Deserialize, Serialize};

use super::tables::{Micronutrient, MICRONUTRIENT_TABLE};
use crate::models::Sex;

/// Healthy weight band in kg, rounded to whole kilograms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealWeightRange {
    pub min: i64,
    pub max: i64,
}

/// Where the current weight sits relative to the ideal range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightStatus {
    BelowRange,
    WithinRange,
    AboveRange,
}

/// Weight assessment, carrying the whole kilograms to gain or lose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightRecommendation {
    Gain { kg: i64 },
    Within,
    Lose { kg: i64 },
}

impl WeightRecommendation {
    pub fn status(&self) -> WeightStatus {
        match self {
            WeightRecommendation::Gain { .. } => WeightStatus::BelowRange,
            WeightRecommendation::Within => WeightStatus::WithinRange,
            WeightRecommendation::Lose { .. } => WeightStatus::AboveRange,
        }
    }

    pub fn message(&self) -> String {
        match self {
            WeightRecommendation::Gain { kg } => {
                format!("You should gain {} kg to reach a healthy weight range.", kg)
            }
            WeightRecommendation::Within => "You are within a healthy weight range!".to_string(),
            WeightRecommendation::Lose { kg } => {
                format!("You should lose {} kg to reach a healthy weight range.", kg)
            }
        }
    }
}

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macros {
    pub protein_g: i64,
    /// Not clamped: negative when protein and fat exceed the calorie target
    pub carbs_g: i64,
    pub fat_g: i64,
}

/// Recommended daily micronutrient intakes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Micronutrients {
    pub vitamin_c: f64,   // mg
    pub vitamin_d: f64,   // mcg
    pub calcium: f64,     // mg
    pub iron: f64,        // mg
    pub magnesium: f64,   // mg
    pub zinc: f64,        // mg
    pub vitamin_b12: f64, // mcg
    pub folate: f64,      // mcg
    pub potassium: f64,   // mg
    pub fiber: f64,       // g
}

impl Micronutrients {
    /// Evaluate the intake table for a sex and age
    pub fn for_person(sex: Sex, age_years: u32) -> Self {
        let lookup = |nutrient: Micronutrient| -> f64 {
            MICRONUTRIENT_TABLE
                .iter()
                .find(|(n, _)| *n == nutrient)
                .map(|(_, rule)| rule.amount(sex, age_years))
                .unwrap_or(0.0)
        };

        Self {
            vitamin_c: lookup(Micronutrient::VitaminC),
            vitamin_d: lookup(Micronutrient::VitaminD),
            calcium: lookup(Micronutrient::Calcium),
            iron: lookup(Micronutrient::Iron),
            magnesium: lookup(Micronutrient::Magnesium),
            zinc: lookup(Micronutrient::Zinc),
            vitamin_b12: lookup(Micronutrient::VitaminB12),
            folate: lookup(Micronutrient::Folate),
            potassium: lookup(Micronutrient::Potassium),
            fiber: lookup(Micronutrient::Fiber),
        }
    }

    pub fn get(&self, nutrient: Micronutrient) -> f64 {
        match nutrient {
            Micronutrient::VitaminC => self.vitamin_c,
            Micronutrient::VitaminD => self.vitamin_d,
            Micronutrient::Calcium => self.calcium,
            Micronutrient::Iron => self.iron,
            Micronutrient::Magnesium => self.magnesium,
            Micronutrient::Zinc => self.zinc,
            Micronutrient::VitaminB12 => self.vitamin_b12,
            Micronutrient::Folate => self.folate,
            Micronutrient::Potassium => self.potassium,
            Micronutrient::Fiber => self.fiber,
        }
    }
}

/// Computed nutrition targets for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionReport {
    /// One decimal place
    pub bmi: f64,
    pub bmr: i64,
    pub tdee: i64,
    pub ideal_weight_range: IdealWeightRange,
    pub weight_status: WeightStatus,
    pub weight_recommendation: String,
    pub target_calories: i64,
    pub protein_requirement_g: i64,
    pub macros: Macros,
    pub micronutrients: Micronutrients,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_messages() {
        assert_eq!(
            WeightRecommendation::Gain { kg: 4 }.message(),
            "You should gain 4 kg to reach a healthy weight range."
        );
        assert_eq!(
            WeightRecommendation::Lose { kg: 12 }.message(),
            "You should lose 12 kg to reach a healthy weight range."
        );
        assert_eq!(
            WeightRecommendation::Within.message(),
            "You are within a healthy weight range!"
        );
    }

    #[test]
    fn test_micronutrients_wire_keys() {
        let json = serde_json::to_value(Micronutrients::for_person(Sex::Male, 30)).unwrap();
        let obj = json.as_object().unwrap();
        for (nutrient, _) in MICRONUTRIENT_TABLE.iter() {
            assert!(obj.contains_key(nutrient.key()), "missing {}", nutrient.key());
        }
        assert_eq!(obj.len(), 10);
    }

    #[test]
    fn test_get_matches_fields() {
        let m = Micronutrients::for_person(Sex::Female, 60);
        assert_eq!(m.get(Micronutrient::Calcium), m.calcium);
        assert_eq!(m.get(Micronutrient::Iron), m.iron);
        assert_eq!(m.get(Micronutrient::VitaminB12), m.vitamin_b12);
    }
}
