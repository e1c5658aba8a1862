//! Filesystem key and the unlock operation.
//!
//! Each kernel owns one AES-256-GCM key, generated when the world is built and
//! never exported. Sealed contents are stored as hex of `nonce || ciphertext`.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use thiserror::Error;

use crate::vfs::{Contents, Filesystem, NodeId, NodeKind, SEALED_PREFIX, TextFile};

const NONCE_LEN: usize = 12;

/// Errors from sealing or unsealing contents.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VaultError {
    #[error("invalid key length")]
    KeyLength,
    #[error("encryption failed")]
    Seal,
    #[error("sealed contents are not valid hex: {0}")]
    Encoding(String),
    #[error("sealed contents too short ({0} bytes)")]
    Truncated(usize),
    #[error("sealed contents failed authentication")]
    Unseal,
    #[error("decrypted contents are not valid UTF-8")]
    Utf8,
}

/// The single symmetric key of a filesystem instance.
pub struct Vault {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault").finish_non_exhaustive()
    }
}

impl Vault {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let key = Aes256Gcm::generate_key(OsRng);
        Self {
            cipher: Aes256Gcm::new(&key),
        }
    }

    /// Use caller-supplied key material (32 bytes).
    pub fn with_key(key: &[u8]) -> Result<Self, VaultError> {
        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| VaultError::KeyLength)?;
        Ok(Self { cipher })
    }

    /// Encrypt `plaintext` under a fresh nonce.
    pub fn seal(&self, plaintext: &str) -> Result<String, VaultError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| VaultError::Seal)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(hex::encode(sealed))
    }

    /// Decrypt contents produced by [`Vault::seal`].
    pub fn unseal(&self, sealed: &str) -> Result<String, VaultError> {
        let data = hex::decode(sealed).map_err(|e| VaultError::Encoding(e.to_string()))?;
        if data.len() < NONCE_LEN {
            return Err(VaultError::Truncated(data.len()));
        }
        let (nonce, ciphertext) = data.split_at(NONCE_LEN);
        let plain = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| VaultError::Unseal)?;
        String::from_utf8(plain).map_err(|_| VaultError::Utf8)
    }
}

/// What one [`decrypt_subtree`] pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unsealed {
    /// Files unsealed and renamed.
    pub count: usize,
    /// Entries that already held an unsealed name. They are unlinked but still
    /// allocated; the caller discards them once the session is clear of them.
    pub displaced: Vec<NodeId>,
}

/// Unseal every `enc_` text file below `dir`, renaming each without the prefix.
///
/// The replacement keeps the permission level and takes the place of the
/// sealed node in the same parent. Running it again on the same subtree
/// unlocks nothing.
pub fn decrypt_subtree(
    fs: &mut Filesystem,
    dir: NodeId,
    vault: &Vault,
) -> Result<Unsealed, VaultError> {
    let mut unsealed = Unsealed::default();
    unseal_into(fs, dir, vault, &mut unsealed)?;
    Ok(unsealed)
}

fn unseal_into(
    fs: &mut Filesystem,
    dir: NodeId,
    vault: &Vault,
    unsealed: &mut Unsealed,
) -> Result<(), VaultError> {
    let Some(children) = fs.children(dir) else {
        return Ok(());
    };

    for child in children {
        let Some(node) = fs.get(child) else {
            continue;
        };
        // Skip entries displaced earlier in this pass
        if fs.lookup(dir, node.name()) != Some(child) {
            continue;
        }
        if node.is_dir() {
            unseal_into(fs, child, vault, unsealed)?;
            continue;
        }
        let Some(text) = node.as_text() else {
            continue;
        };
        let Some(plain_name) = node.name().strip_prefix(SEALED_PREFIX) else {
            continue;
        };
        let Contents::Sealed(sealed) = text.contents() else {
            continue;
        };

        let replacement = TextFile::plain(vault.unseal(sealed)?, text.permission());
        let plain_name = plain_name.to_string();
        tracing::debug!(from = %node.name(), to = %plain_name, "unsealed");

        let kind = NodeKind::TextFile(replacement);
        if let Some((_, displaced)) = fs.replace(child, &plain_name, kind) {
            unsealed.displaced.extend(displaced);
        }
        unsealed.count += 1;
    }
    Ok(())
}
