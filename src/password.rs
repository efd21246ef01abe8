use anyhow::Context;
use argon2::{password_hash::{rand_core::OsRng, SaltString}, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use secrecy::{ExposeSecret, SecretString};

use crate::telemetry::spawn_blocking_with_tracing;

pub fn compute_password_hash(password: SecretString) -> Result<SecretString, anyhow::Error>{
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
                            .hash_password(password.expose_secret().as_bytes(), &salt)
                            .map_err(|_| anyhow::anyhow!("Failed to compute password hash"))?
                            .to_string();

    Ok(SecretString::from(password_hash))
}

// Argon2 verification is CPU-bound; keep it off the async workers
pub async fn verify_password(password: SecretString, stored_hash: String) -> Result<bool, anyhow::Error>{
    let verified = spawn_blocking_with_tracing(move ||{
        let parsed_hash = PasswordHash::try_from(stored_hash.as_str())
            .map_err(|_| anyhow::anyhow!("Failed to parse stored password hash"))?;

        Ok(Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
            .is_ok())
    })
    .await
    .context("Failed due to threadpool error")?;

    verified
}
