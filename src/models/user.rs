//! User model
//!
//! Account record plus the biometric profile it owns.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::profile::{ActivityLevel, BiometricProfile, Goal, Sex};
use crate::db::DbResult;

pub const MIN_AGE_YEARS: u32 = 1;
pub const MAX_AGE_YEARS: u32 = 120;
pub const MIN_WEIGHT_KG: f64 = 1.0;
pub const MIN_HEIGHT_CM: f64 = 1.0;

/// Field validation failures for registration and profile updates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("Name is required")]
    EmptyName,

    #[error("Please add a valid email: {0}")]
    InvalidEmail(String),

    #[error("Age must be between 1 and 120, got {0}")]
    AgeOutOfRange(u32),

    #[error("Weight must be a positive number of at least 1 kg, got {0}")]
    WeightOutOfRange(f64),

    #[error("Height must be a positive number of at least 1 cm, got {0}")]
    HeightOutOfRange(f64),

    #[error("Unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub age_years: u32,
    pub sex: Sex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a user
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile: BiometricProfile,
}

/// Partial profile update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub age_years: Option<u32>,
    pub sex: Option<Sex>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age_years.is_none()
            && self.sex.is_none()
            && self.weight_kg.is_none()
            && self.height_cm.is_none()
            && self.activity_level.is_none()
            && self.goal.is_none()
    }

    /// Validate only the fields being changed
    pub fn validate(&self) -> Result<(), ProfileError> {
        if let Some(ref name) = self.name {
            validate_name(name)?;
        }
        if let Some(age) = self.age_years {
            validate_age(age)?;
        }
        if let Some(weight) = self.weight_kg {
            validate_weight(weight)?;
        }
        if let Some(height) = self.height_cm {
            validate_height(height)?;
        }
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<(), ProfileError> {
    if name.trim().is_empty() {
        return Err(ProfileError::EmptyName);
    }
    Ok(())
}

pub fn validate_age(age: u32) -> Result<(), ProfileError> {
    if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age) {
        return Err(ProfileError::AgeOutOfRange(age));
    }
    Ok(())
}

pub fn validate_weight(weight_kg: f64) -> Result<(), ProfileError> {
    if !weight_kg.is_finite() || weight_kg < MIN_WEIGHT_KG {
        return Err(ProfileError::WeightOutOfRange(weight_kg));
    }
    Ok(())
}

pub fn validate_height(height_cm: f64) -> Result<(), ProfileError> {
    if !height_cm.is_finite() || height_cm < MIN_HEIGHT_CM {
        return Err(ProfileError::HeightOutOfRange(height_cm));
    }
    Ok(())
}

/// Validate every numeric field of a full profile
pub fn validate_profile_fields(profile: &BiometricProfile) -> Result<(), ProfileError> {
    validate_age(profile.age_years)?;
    validate_weight(profile.weight_kg)?;
    validate_height(profile.height_cm)?;
    Ok(())
}

/// Lower-case and trim an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Address shape check: `local@domain.tld` where each part is runs of word
/// characters joined by single `.` or `-`, and the TLD has 2-3 characters
pub fn validate_email(email: &str) -> Result<(), ProfileError> {
    let invalid = || ProfileError::InvalidEmail(email.to_string());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if !is_dotted_words(local) || !is_dotted_words(domain) {
        return Err(invalid());
    }
    let (_, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if !(2..=3).contains(&tld.len()) {
        return Err(invalid());
    }
    Ok(())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Non-empty word runs separated by single `.` or `-`
fn is_dotted_words(s: &str) -> bool {
    s.split(['.', '-'])
        .all(|part| !part.is_empty() && part.chars().all(is_word_char))
}

fn parse_column<T>(
    row: &Row,
    column: &str,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(column)?;
    parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            format!("invalid {} value: {}", column, raw).into(),
        )
    })
}

impl User {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            age_years: row.get("age_years")?,
            sex: parse_column(row, "sex", Sex::from_str)?,
            weight_kg: row.get("weight_kg")?,
            height_cm: row.get("height_cm")?,
            activity_level: parse_column(row, "activity_level", ActivityLevel::from_str)?,
            goal: parse_column(row, "goal", Goal::from_str)?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// The biometric profile the calculator consumes
    pub fn profile(&self) -> BiometricProfile {
        BiometricProfile {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age_years: self.age_years,
            sex: self.sex,
            activity_level: self.activity_level,
            goal: self.goal,
        }
    }

    /// Create a new user
    pub fn create(conn: &Connection, data: &UserCreate) -> DbResult<Self> {
        let p = &data.profile;
        conn.execute(
            r#"
            INSERT INTO users (name, email, password_hash, age_years, sex, weight_kg, height_cm, activity_level, goal)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                data.name.trim(),
                normalize_email(&data.email),
                data.password_hash,
                p.age_years,
                p.sex.as_str(),
                p.weight_kg,
                p.height_cm,
                p.activity_level.as_str(),
                p.goal.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a user by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by email (case-insensitive)
    pub fn get_by_email(conn: &Connection, email: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE email = ?1")?;

        let result = stmt.query_row([normalize_email(email)], Self::from_row);
        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a partial update
    pub fn update(conn: &Connection, id: i64, data: &UserUpdate) -> DbResult<Option<Self>> {
        let mut updates = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        macro_rules! add_update {
            ($col:expr, $val:expr) => {
                if let Some(val) = $val {
                    updates.push(format!("{} = ?{}", $col, params_vec.len() + 1));
                    params_vec.push(Box::new(val));
                }
            };
        }

        add_update!("name", data.name.as_deref().map(|n| n.trim().to_string()));
        add_update!("age_years", data.age_years);
        add_update!("sex", data.sex.map(|s| s.as_str()));
        add_update!("weight_kg", data.weight_kg);
        add_update!("height_cm", data.height_cm);
        add_update!("activity_level", data.activity_level.map(|a| a.as_str()));
        add_update!("goal", data.goal.map(|g| g.as_str()));

        if updates.is_empty() {
            return Self::get_by_id(conn, id);
        }

        updates.push("updated_at = datetime('now')".to_string());

        let sql = format!(
            "UPDATE users SET {} WHERE id = ?{}",
            updates.join(", "),
            params_vec.len() + 1
        );

        params_vec.push(Box::new(id));

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_refs.as_slice())?;

        Self::get_by_id(conn, id)
    }
}
