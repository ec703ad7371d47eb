//! Nutrition target calculator
//!
//! Turns a biometric profile into energy and nutrient targets:
//!
//! 1. BMR via Mifflin-St Jeor
//! 2. TDEE = BMR x activity multiplier
//! 3. BMI and the ideal weight range for BMI 18.5-24.9
//! 4. Weight recommendation relative to that range
//! 5. Target calories (range pass, then goal pass)
//! 6. Protein requirement and macro split
//! 7. Micronutrient intakes
//!
//! All steps use full precision; rounding happens once, when the report is built.

use tracing::debug;

use super::error::{NutritionError, NutritionResult};
use super::report::{
    IdealWeightRange, Macros, Micronutrients, NutritionReport, WeightRecommendation,
};
use super::tables::{
    activity_multiplier, BMI_HEALTHY_MAX, BMI_HEALTHY_MIN, BMR_AGE_COEF, BMR_FEMALE_OFFSET,
    BMR_HEIGHT_COEF, BMR_MALE_OFFSET, BMR_WEIGHT_COEF, CALORIE_ADJUSTMENT_KCAL,
    DEFAULT_PROTEIN_PER_KG, FAT_CALORIE_SHARE, KCAL_PER_G_CARBS, KCAL_PER_G_FAT,
    KCAL_PER_G_PROTEIN, PROTEIN_RULES,
};
use crate::models::{ActivityLevel, BiometricProfile, Goal, Sex};

/// Unrounded macro split in grams
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Round to the nearest integer, halves toward positive infinity (-2.5 -> -2)
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round to one decimal place, halves toward positive infinity
pub fn round_to_tenth(x: f64) -> f64 {
    round_half_up(x * 10.0) / 10.0
}

fn to_whole(x: f64) -> i64 {
    round_half_up(x) as i64
}

/// Check the profile before any arithmetic touches it
pub fn validate_profile(profile: &BiometricProfile) -> NutritionResult<()> {
    if !profile.weight_kg.is_finite() || profile.weight_kg <= 0.0 {
        return Err(NutritionError::invalid(
            "weightKg",
            format!("must be a positive number, got {}", profile.weight_kg),
        ));
    }
    if !profile.height_cm.is_finite() || profile.height_cm <= 0.0 {
        return Err(NutritionError::invalid(
            "heightCm",
            format!("must be a positive number, got {}", profile.height_cm),
        ));
    }
    if profile.age_years == 0 {
        return Err(NutritionError::invalid("ageYears", "must be a positive integer"));
    }
    Ok(())
}

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
pub fn bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> f64 {
    let offset = match sex {
        Sex::Male => BMR_MALE_OFFSET,
        Sex::Female => BMR_FEMALE_OFFSET,
    };
    BMR_WEIGHT_COEF * weight_kg + BMR_HEIGHT_COEF * height_cm - BMR_AGE_COEF * f64::from(age_years)
        + offset
}

/// Total daily energy expenditure in kcal/day
pub fn tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_multiplier(activity_level)
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// BMI category shown alongside the BMI value
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

pub fn ideal_weight_range(height_cm: f64) -> IdealWeightRange {
    let height_m = height_cm / 100.0;
    let height_sq = height_m * height_m;
    IdealWeightRange {
        min: to_whole(BMI_HEALTHY_MIN * height_sq),
        max: to_whole(BMI_HEALTHY_MAX * height_sq),
    }
}

/// Compare against the rounded range; both bounds count as within
pub fn assess_weight(weight_kg: f64, range: &IdealWeightRange) -> WeightRecommendation {
    let min = range.min as f64;
    let max = range.max as f64;
    if weight_kg < min {
        WeightRecommendation::Gain {
            kg: to_whole(min - weight_kg),
        }
    } else if weight_kg > max {
        WeightRecommendation::Lose {
            kg: to_whole(weight_kg - max),
        }
    } else {
        WeightRecommendation::Within
    }
}

/// Goal-adjusted calorie target.
///
/// The weight-range pass runs first and the goal pass overwrites it, so the
/// range adjustment only survives for `MaintainWeight`. A lose-weight goal
/// below the ideal range therefore gets a deficit, not a surplus. Existing
/// clients depend on these numbers; changing the order changes targets.
pub fn target_calories(tdee: f64, assessment: &WeightRecommendation, goal: Goal) -> f64 {
    let range_adjusted = match assessment {
        WeightRecommendation::Gain { .. } => tdee + CALORIE_ADJUSTMENT_KCAL,
        WeightRecommendation::Lose { .. } => tdee - CALORIE_ADJUSTMENT_KCAL,
        WeightRecommendation::Within => tdee,
    };

    match goal {
        Goal::LoseWeight => tdee - CALORIE_ADJUSTMENT_KCAL,
        Goal::GainWeight | Goal::BuildMuscle => tdee + CALORIE_ADJUSTMENT_KCAL,
        Goal::MaintainWeight => range_adjusted,
    }
}

/// Grams of protein per kg of body weight; first matching rule wins
pub fn protein_per_kg(goal: Goal, activity_level: ActivityLevel) -> f64 {
    PROTEIN_RULES
        .iter()
        .find(|rule| (rule.applies)(goal, activity_level))
        .map(|rule| rule.grams_per_kg)
        .unwrap_or(DEFAULT_PROTEIN_PER_KG)
}

pub fn protein_requirement(weight_kg: f64, goal: Goal, activity_level: ActivityLevel) -> f64 {
    weight_kg * protein_per_kg(goal, activity_level)
}

/// Fat takes a fixed share of calories, carbs take what protein and fat leave
pub fn macro_split(protein_g: f64, target_calories: f64) -> MacroSplit {
    let protein_calories = protein_g * KCAL_PER_G_PROTEIN;
    let fat_calories = target_calories * FAT_CALORIE_SHARE;
    let carb_calories = target_calories - protein_calories - fat_calories;

    MacroSplit {
        protein_g,
        carbs_g: carb_calories / KCAL_PER_G_CARBS,
        fat_g: fat_calories / KCAL_PER_G_FAT,
    }
}

pub fn micronutrients(sex: Sex, age_years: u32) -> Micronutrients {
    Micronutrients::for_person(sex, age_years)
}

/// Compute the full nutrition report for a profile
pub fn compute_report(profile: &BiometricProfile) -> NutritionResult<NutritionReport> {
    validate_profile(profile)?;

    let bmr = bmr(profile.weight_kg, profile.height_cm, profile.age_years, profile.sex);
    let tdee = tdee(bmr, profile.activity_level);
    let bmi = bmi(profile.weight_kg, profile.height_cm);
    let range = ideal_weight_range(profile.height_cm);
    let assessment = assess_weight(profile.weight_kg, &range);
    let target = target_calories(tdee, &assessment, profile.goal);
    let protein = protein_requirement(profile.weight_kg, profile.goal, profile.activity_level);
    let split = macro_split(protein, target);

    debug!(
        bmr,
        tdee,
        target,
        status = ?assessment.status(),
        "Computed nutrition targets"
    );

    Ok(NutritionReport {
        bmi: round_to_tenth(bmi),
        bmr: to_whole(bmr),
        tdee: to_whole(tdee),
        ideal_weight_range: range,
        weight_status: assessment.status(),
        weight_recommendation: assessment.message(),
        target_calories: to_whole(target),
        protein_requirement_g: to_whole(protein),
        macros: Macros {
            protein_g: to_whole(split.protein_g),
            carbs_g: to_whole(split.carbs_g),
            fat_g: to_whole(split.fat_g),
        },
        micronutrients: micronutrients(profile.sex, profile.age_years),
    })
}
