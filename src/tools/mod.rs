//! FitNutrition tools module
//!
//! Tool implementations behind the MCP server. Each tool takes the database
//! handle plus plain inputs and returns a serializable response or an error
//! message.

pub mod accounts;
pub mod nutrition;
pub mod profile;
pub mod status;

use crate::models::{ActivityLevel, BiometricProfile, Goal, ProfileError, Sex};

/// Biometric fields as they arrive from a client, enums still as strings
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub sex: String,
    /// Defaults to `moderately_active`
    pub activity_level: Option<String>,
    /// Defaults to `maintain_weight`
    pub goal: Option<String>,
}

impl ProfileInput {
    /// Resolve the enum fields. Numeric ranges are not checked here.
    pub fn parse(&self) -> Result<BiometricProfile, ProfileError> {
        Ok(BiometricProfile {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age_years: self.age_years,
            sex: parse_enum("sex", &self.sex, Sex::from_str)?,
            activity_level: parse_optional("activityLevel", self.activity_level.as_deref(), ActivityLevel::from_str)?
                .unwrap_or_default(),
            goal: parse_optional("goal", self.goal.as_deref(), Goal::from_str)?.unwrap_or_default(),
        })
    }
}

/// Parse a closed-set value, naming the field on failure
pub fn parse_enum<T>(
    field: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, ProfileError> {
    parse(value).ok_or_else(|| ProfileError::UnknownValue {
        field,
        value: value.to_string(),
    })
}

pub fn parse_optional<T>(
    field: &'static str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, ProfileError> {
    value.map(|v| parse_enum(field, v, parse)).transpose()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::migrations::run_migrations;
    use crate::db::Database;

    use super::ProfileInput;

    pub fn test_db() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        db
    }

    pub fn male_profile() -> ProfileInput {
        ProfileInput {
            weight_kg: 70.0,
            height_cm: 175.0,
            age_years: 30,
            sex: "male".to_string(),
            activity_level: None,
            goal: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::male_profile;
    use super::*;

    #[test]
    fn test_profile_input_defaults() {
        let profile = male_profile().parse().unwrap();
        assert_eq!(profile.sex, Sex::Male);
        assert_eq!(profile.activity_level, ActivityLevel::ModeratelyActive);
        assert_eq!(profile.goal, Goal::MaintainWeight);
    }

    #[test]
    fn test_profile_input_unknown_values() {
        let mut input = male_profile();
        input.goal = Some("bulk".to_string());
        assert_eq!(
            input.parse(),
            Err(ProfileError::UnknownValue {
                field: "goal",
                value: "bulk".to_string()
            })
        );

        let mut input = male_profile();
        input.sex = "other".to_string();
        assert!(matches!(
            input.parse(),
            Err(ProfileError::UnknownValue { field: "sex", .. })
        ));
    }
}
