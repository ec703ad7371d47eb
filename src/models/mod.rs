//! Data models
//!
//! Biometric profile types and the database entities that carry them.

mod profile;
mod session;
mod user;

pub use profile::{ActivityLevel, BiometricProfile, Goal, Sex};
pub use session::{format_timestamp, Session};
pub use user::{
    normalize_email, validate_age, validate_email, validate_height, validate_name,
    validate_profile_fields, validate_weight, ProfileError, User, UserCreate, UserUpdate,
};
