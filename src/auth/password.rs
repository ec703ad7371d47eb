//! Password hashing
//!
//! bcrypt in modular crypt format (`$2b$<cost>$<salt+digest>`). Hashes written
//! by other bcrypt implementations (`$2a$`, `$2y$`) verify as well.

use super::AuthError;

const MIN_PASSWORD_LEN: usize = 6;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Hash a password with a fresh random salt. `cost` is clamped to bcrypt's range.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost.clamp(MIN_COST, MAX_COST))?)
}

/// Check a password against a stored hash
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, stored).map_err(|_| AuthError::MalformedHash)
}

pub fn check_password_strength(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword {
            min_len: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("hunter22", 4).unwrap();
        assert!(verify_password("hunter22", &stored).unwrap());
        assert!(!verify_password("hunter23", &stored).unwrap());
        assert!(!verify_password("", &stored).unwrap());
    }

    #[test]
    fn test_hashes_are_salted_and_carry_cost() {
        let a = hash_password("samepass", 5).unwrap();
        let b = hash_password("samepass", 5).unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$2b$05$"), "{}", a);
    }

    #[test]
    fn test_cost_is_clamped() {
        let stored = hash_password("samepass", 1).unwrap();
        assert!(stored.starts_with("$2b$04$"), "{}", stored);
        assert!(verify_password("samepass", &stored).unwrap());
    }

    #[test]
    fn test_other_bcrypt_prefixes_verify() {
        let stored = hash_password("hunter22", 4).unwrap();
        let legacy = stored.replacen("$2b$", "$2a$", 1);
        assert!(verify_password("hunter22", &legacy).unwrap());
    }

    #[test]
    fn test_malformed_hash() {
        assert!(matches!(verify_password("x", "nope"), Err(AuthError::MalformedHash)));
        assert!(matches!(verify_password("x", "10$abcd$00"), Err(AuthError::MalformedHash)));
        assert!(matches!(verify_password("x", "$2b$xx$short"), Err(AuthError::MalformedHash)));
    }

    #[test]
    fn test_password_strength() {
        assert!(check_password_strength("123456").is_ok());
        assert!(matches!(
            check_password_strength("12345"),
            Err(AuthError::WeakPassword { min_len: 6 })
        ));
    }
}
