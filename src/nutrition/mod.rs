//! Nutrition calculation module
//!
//! Energy expenditure, weight assessment and nutrient targets for a biometric profile.

pub mod calculator;
pub mod error;
pub mod report;
pub mod tables;

pub use calculator::{
    assess_weight, bmi, bmi_category, bmr, compute_report, ideal_weight_range, macro_split,
    micronutrients, protein_per_kg, protein_requirement, round_half_up, round_to_tenth,
    target_calories, tdee, validate_profile, MacroSplit,
};
pub use error::{NutritionError, NutritionResult};
pub use report::{
    IdealWeightRange, Macros, Micronutrients, NutritionReport, WeightRecommendation, WeightStatus,
};
pub use tables::{activity_multiplier, IntakeRule, Micronutrient};
