//! Stateless confirmation codes bound to a user-state fingerprint.
//!
//! A code is `<base36 issue time>-<hex digest>` where the digest is
//! HMAC-SHA256 over the fingerprint and the issue time. Nothing is stored:
//! changing any field that feeds the fingerprint invalidates every
//! outstanding code for that user.

use std::sync::Arc;

use hmac::digest::{Key, KeyInit};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::clock::Clock;

type HmacSha256 = Hmac<Sha256>;

/// Digest bytes kept in the code (hex-encoded, so twice as many characters).
const DIGEST_BYTES: usize = 16;

#[derive(Clone)]
pub struct ConfirmationCodes {
    keyed: HmacSha256,
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ConfirmationCodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationCodes")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl ConfirmationCodes {
    pub fn new(secret: impl AsRef<[u8]>, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            keyed: keyed_mac(secret.as_ref()),
            ttl_secs,
            clock,
        }
    }

    pub fn make(&self, fingerprint: &str) -> String {
        let ts = to_base36(self.clock.now_secs());
        let tag = self.mac(fingerprint, &ts).finalize().into_bytes();
        format!("{ts}-{}", hex::encode(&tag[..DIGEST_BYTES]))
    }

    pub fn check(&self, fingerprint: &str, code: &str) -> bool {
        let Some((ts, digest)) = code.split_once('-') else {
            tracing::debug!("confirmation code rejected: malformed");
            return false;
        };
        let Some(issued_at) = from_base36(ts) else {
            tracing::debug!("confirmation code rejected: bad timestamp");
            return false;
        };
        let tag = match hex::decode(digest) {
            Ok(tag) if tag.len() == DIGEST_BYTES => tag,
            _ => {
                tracing::debug!("confirmation code rejected: bad digest encoding");
                return false;
            }
        };
        if self.mac(fingerprint, ts).verify_truncated_left(&tag).is_err() {
            tracing::debug!("confirmation code rejected: digest mismatch");
            return false;
        }
        let now = self.clock.now_secs();
        let fresh = issued_at <= now && now - issued_at <= self.ttl_secs;
        if !fresh {
            tracing::debug!(issued_at, now, "confirmation code rejected: expired");
        }
        fresh
    }

    fn mac(&self, fingerprint: &str, ts: &str) -> HmacSha256 {
        let mut mac = self.keyed.clone();
        mac.update(fingerprint.as_bytes());
        mac.update(b"|");
        mac.update(ts.as_bytes());
        mac
    }
}

/// HMAC key block from an arbitrary secret: zero-padded, or hashed first when
/// longer than the block. Matches `new_from_slice` without its error path.
fn keyed_mac(secret: &[u8]) -> HmacSha256 {
    let mut key = Key::<HmacSha256>::default();
    if secret.len() <= key.len() {
        key[..secret.len()].copy_from_slice(secret);
    } else {
        let hashed = Sha256::digest(secret);
        key[..hashed.len()].copy_from_slice(&hashed);
    }
    <HmacSha256 as KeyInit>::new(&key)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn from_base36(s: &str) -> Option<u64> {
    if s.is_empty() || s.len() > 13 {
        return None;
    }
    u64::from_str_radix(s, 36).ok()
}
