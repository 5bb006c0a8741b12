use std::fmt;

use sha2::{Digest, Sha256};

/// Content hash of a raw document, used to detect re-uploads of the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentFingerprint(String);

impl DocumentFingerprint {
    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
