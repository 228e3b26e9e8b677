// Credential schemes. The auth service never compares secrets itself; it
// asks a `CredentialVerifier` to seal a new secret for storage and to check
// a provided secret against the stored value.

use crate::error::{AuthError, Result};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use clap::ValueEnum;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Length of passwords handed out by an admin reset.
pub const GENERATED_PASSWORD_LEN: usize = 10;

/// Turns a secret into its stored form and checks secrets against it.
pub trait CredentialVerifier: Send + Sync {
    /// Produce the value persisted in the record's `password` field.
    fn seal(&self, secret: &str) -> Result<String>;

    /// Whether `provided` matches the `stored` value.
    fn verify(&self, stored: &str, provided: &str) -> bool;
}

/// Stores secrets as given and compares with exact string equality. This is
/// the store layout the account records are defined with, and the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextCredentials;

impl CredentialVerifier for PlaintextCredentials {
    fn seal(&self, secret: &str) -> Result<String> {
        Ok(secret.to_string())
    }

    fn verify(&self, stored: &str, provided: &str) -> bool {
        stored == provided
    }
}

/// Salted Argon2id hashes in PHC string format. Records written in plaintext
/// before switching schemes still verify by exact equality.
#[derive(Default)]
pub struct Argon2Credentials {
    argon2: Argon2<'static>,
}

impl CredentialVerifier for Argon2Credentials {
    fn seal(&self, secret: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Credential(format!("password hashing failed: {e}")))
    }

    fn verify(&self, stored: &str, provided: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .argon2
                .verify_password(provided.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => stored == provided,
        }
    }
}

/// Which verifier the service runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CredentialScheme {
    #[default]
    Plaintext,
    Argon2,
}

impl CredentialScheme {
    pub fn into_verifier(self) -> Box<dyn CredentialVerifier> {
        match self {
            CredentialScheme::Argon2 => Box::new(Argon2Credentials::default()),
            CredentialScheme::Plaintext => Box::new(PlaintextCredentials),
        }
    }
}

/// Random alphanumeric password of `length` characters.
pub fn generate_password(length: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
