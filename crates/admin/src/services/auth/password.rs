//! Password verification with legacy-plaintext support.
//!
//! The original Sakila dump shipped staff passwords in plaintext. Rows are
//! upgraded to Argon2id opportunistically on successful login, so until the
//! last legacy row is touched the stored field can be either encoding. The
//! encoding is resolved once, at read time, into a [`StoredPassword`]
//! variant rather than re-inspected at each call site.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::error::AuthError;

/// Versioned prefix that marks a stored field as an Argon2 hash
/// (e.g. `$argon2id$v=19$...`). Anything else is legacy plaintext.
const ARGON2_PREFIX: &str = "$argon2";

/// Result of comparing a supplied password against a stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Whether the supplied password matches the stored field.
    pub matched: bool,
    /// Whether the stored field should be replaced with a fresh hash.
    /// Only ever `true` for a legacy-plaintext match.
    pub needs_upgrade: bool,
}

/// A stored password field, resolved to its encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredPassword<'a> {
    /// A salted Argon2 hash.
    Hashed(&'a str),
    /// Legacy plaintext from the original dump.
    Legacy(&'a str),
}

impl<'a> StoredPassword<'a> {
    /// Resolve the encoding of a stored password field.
    #[must_use]
    pub fn parse(field: &'a str) -> Self {
        if field.starts_with(ARGON2_PREFIX) {
            Self::Hashed(field)
        } else {
            Self::Legacy(field)
        }
    }

    /// Compare a supplied password against this stored field.
    ///
    /// Pure decision plus an upgrade signal; persisting the upgrade is the
    /// caller's concern.
    #[must_use]
    pub fn verify(&self, supplied: &str) -> VerifyOutcome {
        match self {
            Self::Hashed(hash) => {
                // Argon2's verify is constant-time; an unparsable hash
                // counts as a mismatch.
                let matched = PasswordHash::new(hash)
                    .map(|parsed| {
                        Argon2::default()
                            .verify_password(supplied.as_bytes(), &parsed)
                            .is_ok()
                    })
                    .unwrap_or(false);

                VerifyOutcome {
                    matched,
                    needs_upgrade: false,
                }
            }
            Self::Legacy(stored) => {
                let matched = *stored == supplied;

                VerifyOutcome {
                    matched,
                    needs_upgrade: matched,
                }
            }
        }
    }
}

/// Hash a password using Argon2id with a fresh salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detects_argon2_hash() {
        let hash = hash_password("letmein").unwrap();
        assert!(matches!(StoredPassword::parse(&hash), StoredPassword::Hashed(_)));
    }

    #[test]
    fn test_parse_treats_everything_else_as_legacy() {
        assert!(matches!(
            StoredPassword::parse("letmein"),
            StoredPassword::Legacy(_)
        ));
        // bcrypt-style fields predate the migration to Argon2 and were never
        // written here; they fall through to the legacy (mismatch) path.
        assert!(matches!(
            StoredPassword::parse("$2b$12$abcdefghijklmnopqrstuv"),
            StoredPassword::Legacy(_)
        ));
        assert!(matches!(StoredPassword::parse(""), StoredPassword::Legacy(_)));
    }

    #[test]
    fn test_legacy_match_signals_upgrade() {
        let outcome = StoredPassword::parse("letmein").verify("letmein");
        assert!(outcome.matched);
        assert!(outcome.needs_upgrade);
    }

    #[test]
    fn test_legacy_mismatch_signals_nothing() {
        let outcome = StoredPassword::parse("letmein").verify("wrong");
        assert!(!outcome.matched);
        assert!(!outcome.needs_upgrade);
    }

    #[test]
    fn test_hashed_match_never_signals_upgrade() {
        let hash = hash_password("letmein").unwrap();
        let outcome = StoredPassword::parse(&hash).verify("letmein");
        assert!(outcome.matched);
        assert!(!outcome.needs_upgrade);
    }

    #[test]
    fn test_hashed_mismatch() {
        let hash = hash_password("letmein").unwrap();
        let outcome = StoredPassword::parse(&hash).verify("wrong");
        assert!(!outcome.matched);
        assert!(!outcome.needs_upgrade);
    }

    #[test]
    fn test_hashed_field_is_not_compared_as_plaintext() {
        // Supplying the stored hash itself must not match: the hashed path
        // never falls back to string equality.
        let hash = hash_password("letmein").unwrap();
        let outcome = StoredPassword::parse(&hash).verify(&hash);
        assert!(!outcome.matched);
    }

    #[test]
    fn test_hash_password_produces_versioned_prefix() {
        let hash = hash_password("letmein").unwrap();
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_password_salts_differ() {
        let a = hash_password("letmein").unwrap();
        let b = hash_password("letmein").unwrap();
        assert_ne!(a, b);
    }
}
