use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a password with Argon2id and a fresh salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash. Verification parameters come
/// from the hash itself; unparsable hashes simply fail verification.
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_the_original_password_only() {
        let hash = hash_password("correct horse").unwrap();

        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let first = hash_password("password1").unwrap();
        let second = hash_password("password1").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("password1", &first));
        assert!(verify_password("password1", &second));
    }

    #[test]
    fn malformed_hash_fails_verification() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
