//! Unique shard names for concurrently running servers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

const DEFAULT_BASE: &str = "shard";
const MAX_BASE_LEN: usize = 48;

/// Process-wide sequence, never reset while the test binary runs.
static NEXT_SHARD: AtomicU64 = AtomicU64::new(0);

/// Identity of one logical server instance.
///
/// Formatted as `<base>-<pid>-<seq>`. The pid keeps identities apart across
/// test binaries running side by side, the sequence within one binary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShardId {
    base: String,
    value: String,
}

impl ShardId {
    /// Generate a fresh identity from a human-chosen base name.
    ///
    /// Characters outside `[A-Za-z0-9_-]` are replaced with `-` so the
    /// identity is safe to use as a directory name.
    pub fn generate(base: &str) -> Self {
        let base = sanitize(base);
        let seq = NEXT_SHARD.fetch_add(1, Ordering::Relaxed);
        let value = format!("{base}-{}-{seq}", std::process::id());

        Self { base, value }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for ShardId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

fn sanitize(base: &str) -> String {
    let cleaned: String = base
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .take(MAX_BASE_LEN)
        .collect();

    if cleaned.is_empty() {
        DEFAULT_BASE.to_string()
    } else {
        cleaned
    }
}
