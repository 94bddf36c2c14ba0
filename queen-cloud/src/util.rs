//! Password hashing helpers

use argon2::{Algorithm, Argon2, Params, Version};

/// Argon2id hasher with the configured time cost and default memory/lanes
fn hasher(time_cost: u32) -> Result<Argon2<'static>, argon2::Error> {
    let params = Params::new(
        Params::DEFAULT_M_COST,
        time_cost,
        Params::DEFAULT_P_COST,
        None,
    )?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password into a PHC string with a fresh random salt
pub fn hash_password(password: &str, time_cost: u32) -> Result<String, argon2::password_hash::Error> {
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher(time_cost)?.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string.
///
/// Parameters are read from the hash itself, so hashes made under an older
/// cost still verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("royal-jelly", 1).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("royal-jelly"));
        assert!(verify_password("royal-jelly", &hash));
        assert!(!verify_password("royal-jelly!", &hash));
    }

    #[test]
    fn salts_differ() {
        let a = hash_password("same", 1).unwrap();
        let b = hash_password("same", 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("x", "not-a-phc-string"));
    }

    #[test]
    fn zero_cost_is_rejected() {
        assert!(hash_password("x", 0).is_err());
    }
}
