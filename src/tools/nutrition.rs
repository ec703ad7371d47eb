//! Nutrition MCP Tools
//!
//! Dashboard calculations for the signed-in user, and a stateless calculator.

use serde::Serialize;

use super::ProfileInput;
use crate::auth;
use crate::db::Database;
use crate::models::ProfileError;
use crate::nutrition::{
    bmi_category, compute_report, IdealWeightRange, Micronutrients, NutritionError,
    NutritionReport,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub bmi: f64,
    pub bmi_category: &'static str,
    pub bmr: i64,
    pub tdee: i64,
    pub ideal_weight_range: IdealWeightRange,
    pub current_weight: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub weight_recommendation: String,
    pub target_calories: i64,
    pub protein_requirement: i64,
}

/// Macro targets in grams
#[derive(Debug, Serialize)]
pub struct MacroSummary {
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// Response for get_nutrition_calculations
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionCalculationsResponse {
    pub user_stats: UserStats,
    pub recommendations: Recommendations,
    pub macros: MacroSummary,
    pub micronutrients: Micronutrients,
    pub report: NutritionReport,
}

impl NutritionCalculationsResponse {
    fn new(current_weight: f64, report: NutritionReport) -> Self {
        Self {
            user_stats: UserStats {
                bmi: report.bmi,
                bmi_category: bmi_category(report.bmi),
                bmr: report.bmr,
                tdee: report.tdee,
                ideal_weight_range: report.ideal_weight_range,
                current_weight,
            },
            recommendations: Recommendations {
                weight_recommendation: report.weight_recommendation.clone(),
                target_calories: report.target_calories,
                protein_requirement: report.protein_requirement_g,
            },
            macros: MacroSummary {
                protein: report.macros.protein_g,
                carbs: report.macros.carbs_g,
                fat: report.macros.fat_g,
            },
            micronutrients: report.micronutrients,
            report,
        }
    }
}

/// Nutrition targets for the user behind a session token
pub fn get_nutrition_calculations(
    db: &Database,
    token: &str,
) -> Result<NutritionCalculationsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = auth::authenticate(&conn, token).map_err(|e| e.to_string())?;

    let report = compute_report(&user.profile()).map_err(|e| e.to_string())?;

    Ok(NutritionCalculationsResponse::new(user.weight_kg, report))
}

/// Compute a report for an ad-hoc profile, no account involved
pub fn calculate_nutrition(input: &ProfileInput) -> Result<NutritionReport, String> {
    let profile = input.parse().map_err(|e| match e {
        ProfileError::UnknownValue { field, value } => {
            NutritionError::invalid(field, format!("has unknown value '{}'", value))
        }
        other => NutritionError::invalid("profile", other.to_string()),
    });
    let profile = profile.map_err(|e| e.to_string())?;

    compute_report(&profile).map_err(|e| e.to_string())
}
