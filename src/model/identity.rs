//! Content identity for novels
//!
//! A novel is keyed by a SHA-256 fingerprint of its title. The same key names
//! the sidecar directory and is stored alongside the store row, so two novels
//! sharing a title share an id.

use sha2::{Digest, Sha256};

/// Computes the fingerprint of a novel title
///
/// The digest covers the UTF-8 bytes of `title` and is rendered as 64
/// lowercase hex characters.
///
/// # Example
///
/// ```
/// use novel_harvest::fingerprint;
///
/// assert_eq!(fingerprint("Example"), fingerprint("Example"));
/// assert_eq!(fingerprint("Example").len(), 64);
/// ```
pub fn fingerprint(title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hex::encode(hasher.finalize())
}
