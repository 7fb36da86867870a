//! Salted password hashing with Argon2
//!
//! The async entry points run Argon2 on tokio's blocking pool so request
//! workers stay free while a hash is computed.

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use std::sync::OnceLock;
use tokio::task::spawn_blocking;

/// Hash a password with a fresh random salt, returning the PHC string
pub async fn hash_password(password: String) -> Result<String> {
    spawn_blocking(move || hash(&password)).await?
}

/// Check a password against a stored PHC string
pub async fn verify_password(password: String, password_hash: String) -> Result<bool> {
    spawn_blocking(move || verify(&password, &password_hash)).await?
}

/// Burn the same verification work as a real login when the user is unknown.
///
/// Keeps "no such user" and "wrong password" indistinguishable by timing as
/// well as by payload.
pub async fn verify_against_dummy(password: String) -> Result<()> {
    spawn_blocking(move || verify_dummy(&password)).await?
}

fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(hash)
}

fn verify(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn verify_dummy(password: &str) -> Result<()> {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();

    let dummy = match DUMMY_HASH.get() {
        Some(hash) => hash,
        None => {
            let dummy = hash("dummy-password-never-matches")?;
            DUMMY_HASH.get_or_init(|| dummy)
        }
    };
    verify(password, dummy)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_is_not_the_password_and_verifies() {
        let hash = hash_password("Abcdef1!".to_string()).await.unwrap();
        assert_ne!(hash, "Abcdef1!");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Abcdef1!".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_gets_a_different_salt() {
        let first = hash_password("Abcdef1!".to_string()).await.unwrap();
        let second = hash_password("Abcdef1!".to_string()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let result = verify_password("Abcdef1!".to_string(), "not-a-phc-string".to_string()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn dummy_verification_succeeds_quietly() {
        verify_against_dummy("anything".to_string()).await.unwrap();
        verify_against_dummy("anything else".to_string()).await.unwrap();
    }

    #[tokio::test(flavor = "current_thread")]
    async fn other_tasks_run_while_hashing() {
        let other = tokio::spawn(async {});

        hash_password("Abcdef1!".to_string()).await.unwrap();
        assert!(other.is_finished());
    }
}
