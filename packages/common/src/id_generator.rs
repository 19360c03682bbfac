use chrono::Utc;
use crc32fast::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Process-wide sequence shared by every generator, so two generators created
/// in the same millisecond still never hand out the same id.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Node id generator: millisecond timestamp plus a random suffix.
///
/// Ids look like `node-m1a2b3c4-9f3e01aa`. The suffix is a CRC32 of the
/// generator's random v4 UUID salt and the global sequence number.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    prefix: String,
    salt: Uuid,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_prefix("node")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            salt: Uuid::new_v4(),
        }
    }

    /// Generate the next id
    pub fn new_id(&mut self) -> String {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let millis = Utc::now().timestamp_millis().max(0) as u64;

        let mut hasher = Hasher::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(&seq.to_le_bytes());
        let suffix = hasher.finalize();

        format!("{}-{}-{:08x}{:x}", self.prefix, to_base36(millis), suffix, seq)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
