// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Content hashing for the package manifest.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `bytes` as lowercase hex.
///
/// # Examples
///
/// ```rust,ignore
/// let digest = iconpack::utils::hash_bytes(b"<svg/>");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::hash_bytes;

    #[test]
    fn hash_bytes_matches_known_digest() {
        assert_eq!(
            hash_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
