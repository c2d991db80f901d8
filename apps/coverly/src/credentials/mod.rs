//! Encrypted on-device storage for the Gemini API key.
//!
//! The key is sealed with AES-256-GCM under a key derived by
//! PBKDF2-HMAC-SHA256 from a fixed passphrase and salt, then written as two
//! base64 entries in `<data_dir>/credentials.json`. This keeps the secret out
//! of plain sight on disk; it is not protection against a local attacker who
//! can read this source.
//!
//! Anything unreadable (missing file, bad base64, wrong nonce length, failed
//! authentication) loads as `None` rather than an error.
//!
//! Key derivation runs once per store; clones share the derived key.

pub mod handlers;

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::Sha256;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const KEY_ENTRY: &str = "coverly.gemini.key";
pub const IV_ENTRY: &str = "coverly.gemini.iv";
pub const DEFAULT_ROUNDS: u32 = 100_000;

const FILE_NAME: &str = "credentials.json";
const PASSPHRASE: &[u8] = b"coverly-key-derivation";
const SALT: &[u8] = b"coverly-salt";
const NONCE_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not encrypt the API key")]
    Encrypt,
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    rounds: u32,
    derived: Arc<OnceLock<[u8; 32]>>,
}

impl CredentialStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(FILE_NAME),
            rounds: DEFAULT_ROUNDS,
            derived: Arc::new(OnceLock::new()),
        }
    }

    /// Overrides the PBKDF2 round count. Files written with one count cannot
    /// be read with another.
    #[cfg(test)]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self.derived = Arc::new(OnceLock::new());
        self
    }

    /// Derives the cipher key now instead of on first use.
    pub fn warm(&self) {
        self.derived_key();
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn derived_key(&self) -> &[u8; 32] {
        self.derived.get_or_init(|| {
            let mut key = [0u8; 32];
            pbkdf2::pbkdf2_hmac::<Sha256>(PASSPHRASE, SALT, self.rounds, &mut key);
            debug!(rounds = self.rounds, "Derived credential key");
            key
        })
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.derived_key()))
    }

    /// Returns the stored secret, or `None` when nothing usable is stored.
    pub fn load(&self) -> Option<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), "Could not read credential file: {e}");
                return None;
            }
        };
        let entries: BTreeMap<String, String> = serde_json::from_str(&raw).ok()?;
        let ciphertext = STANDARD.decode(entries.get(KEY_ENTRY)?).ok()?;
        let iv = STANDARD.decode(entries.get(IV_ENTRY)?).ok()?;
        if iv.len() != NONCE_LEN {
            debug!(len = iv.len(), "Stored nonce has the wrong length");
            return None;
        }

        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(&iv), ciphertext.as_ref())
            .ok()?;
        String::from_utf8(plaintext).ok()
    }

    /// Encrypts and stores `secret` under a fresh nonce. A blank secret
    /// clears the store instead.
    pub fn save(&self, secret: &str) -> Result<(), CredentialError> {
        let secret = secret.trim();
        if secret.is_empty() {
            return self.clear();
        }

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher()
            .encrypt(&nonce, secret.as_bytes())
            .map_err(|_| CredentialError::Encrypt)?;

        let entries = BTreeMap::from([
            (KEY_ENTRY.to_string(), STANDARD.encode(ciphertext)),
            (IV_ENTRY.to_string(), STANDARD.encode(nonce)),
        ]);
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;
        info!(path = %self.path.display(), "Stored encrypted API key");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CredentialError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Cleared stored API key");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
