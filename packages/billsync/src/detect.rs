//! Change detection over a bill's action history.
//!
//! The raw text of the actions table is fingerprinted on every visit and
//! compared against the fingerprint stored with the bill. A match means the
//! expensive work (action parsing, classification, vote and full-text
//! fetches) can be skipped for that bill.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the raw actions table text.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_matches() {
        let a = fingerprint("1/14/2021 Senate First Reading");
        let b = fingerprint("1/14/2021 Senate First Reading");
        assert_eq!(a, b);
    }

    #[test]
    fn any_change_alters_the_fingerprint() {
        let a = fingerprint("1/14/2021 Senate First Reading");
        let b = fingerprint("1/15/2021 Senate First Reading");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
