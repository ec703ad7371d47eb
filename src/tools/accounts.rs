//! Account MCP Tools
//!
//! Registration, login, logout and the current-user lookup.

use serde::Serialize;

use super::ProfileInput;
use crate::auth::{self, AuthenticatedUser, Registration};
use crate::config::Config;
use crate::db::Database;
use crate::models::User;

/// Response for register_user and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl From<AuthenticatedUser> for AuthResponse {
    fn from(auth: AuthenticatedUser) -> Self {
        Self {
            token: auth.token,
            user: auth.user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Response for get_current_user and update_profile
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Fields accepted by register_user
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile: ProfileInput,
}

pub fn register_user(
    db: &Database,
    config: &Config,
    input: RegisterInput,
) -> Result<AuthResponse, String> {
    let profile = input.profile.parse().map_err(|e| e.to_string())?;
    let registration = Registration {
        name: input.name,
        email: input.email,
        password: input.password,
        profile,
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let auth = auth::register(&conn, &registration, config).map_err(|e| e.to_string())?;

    Ok(auth.into())
}

pub fn login(
    db: &Database,
    config: &Config,
    email: &str,
    password: &str,
) -> Result<AuthResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let auth = auth::login(&conn, email, password, config).map_err(|e| e.to_string())?;

    Ok(auth.into())
}

pub fn logout(db: &Database, token: &str) -> Result<LogoutResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let success = auth::logout(&conn, token).map_err(|e| e.to_string())?;

    Ok(LogoutResponse { success })
}

pub fn get_current_user(db: &Database, token: &str) -> Result<UserResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = auth::authenticate(&conn, token).map_err(|e| e.to_string())?;

    Ok(UserResponse { user })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{male_profile, test_db};

    fn config() -> Config {
        Config {
            password_cost: 4,
            ..Config::default()
        }
    }

    fn input(email: &str) -> RegisterInput {
        RegisterInput {
            name: "Alan".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            profile: male_profile(),
        }
    }

    #[test]
    fn test_register_login_logout_flow() {
        let db = test_db();
        let registered = register_user(&db, &config(), input("alan@example.com")).unwrap();
        assert_eq!(registered.user.name, "Alan");

        let me = get_current_user(&db, &registered.token).unwrap();
        assert_eq!(me.user.id, registered.user.id);

        let logged_in = login(&db, &config(), "alan@example.com", "hunter22").unwrap();
        assert_ne!(logged_in.token, registered.token);

        assert!(logout(&db, &logged_in.token).unwrap().success);
        assert!(get_current_user(&db, &logged_in.token).is_err());
        // The registration session is still open
        assert!(get_current_user(&db, &registered.token).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let db = test_db();
        register_user(&db, &config(), input("alan@example.com")).unwrap();

        let err = register_user(&db, &config(), input("alan@example.com")).unwrap_err();
        assert_eq!(err, "User already exists: alan@example.com");

        let wrong_password = login(&db, &config(), "alan@example.com", "nope-nope").unwrap_err();
        let unknown_email = login(&db, &config(), "ghost@example.com", "hunter22").unwrap_err();
        assert_eq!(wrong_password, unknown_email);

        let mut bad_sex = input("other@example.com");
        bad_sex.profile.sex = "robot".to_string();
        assert_eq!(
            register_user(&db, &config(), bad_sex).unwrap_err(),
            "Unknown sex: robot"
        );
    }

    #[test]
    fn test_auth_response_hides_password_hash() {
        let db = test_db();
        let registered = register_user(&db, &config(), input("alan@example.com")).unwrap();
        let json = serde_json::to_value(&registered).unwrap();
        assert!(json["token"].is_string());
        assert!(json["user"].get("passwordHash").is_none());
        assert_eq!(json["user"]["activityLevel"], "moderately_active");
        assert_eq!(json["user"]["goal"], "maintain_weight");
    }
}
