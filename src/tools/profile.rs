//! Profile MCP Tools

use tracing::info;

use super::accounts::UserResponse;
use super::parse_optional;
use crate::auth;
use crate::db::Database;
use crate::models::{ActivityLevel, Goal, Sex, User, UserUpdate};

/// Requested profile changes; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub age_years: Option<u32>,
    pub sex: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
}

impl ProfileChanges {
    fn into_update(self) -> Result<UserUpdate, String> {
        let update = UserUpdate {
            name: self.name,
            age_years: self.age_years,
            sex: parse_optional("sex", self.sex.as_deref(), Sex::from_str)
                .map_err(|e| e.to_string())?,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            activity_level: parse_optional(
                "activityLevel",
                self.activity_level.as_deref(),
                ActivityLevel::from_str,
            )
            .map_err(|e| e.to_string())?,
            goal: parse_optional("goal", self.goal.as_deref(), Goal::from_str)
                .map_err(|e| e.to_string())?,
        };
        update.validate().map_err(|e| e.to_string())?;
        Ok(update)
    }
}

/// Apply a partial profile update for the session's user
pub fn update_profile(
    db: &Database,
    token: &str,
    changes: ProfileChanges,
) -> Result<UserResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = auth::authenticate(&conn, token).map_err(|e| e.to_string())?;

    let update = changes.into_update()?;
    if update.is_empty() {
        return Ok(UserResponse { user });
    }

    let updated = User::update(&conn, user.id, &update)
        .map_err(|e| format!("Failed to update profile: {}", e))?
        .ok_or_else(|| format!("User {} no longer exists", user.id))?;

    info!(user_id = updated.id, "Updated profile");
    Ok(UserResponse { user: updated })
}
