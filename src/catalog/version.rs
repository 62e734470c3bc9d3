//! Numeric-aware version keys.
//!
//! A version string like `2.7.4`, `cu124` or `v2.8.3.post1` is reduced to the
//! tuple of integers found in its digit runs. Everything else is ignored for
//! ordering purposes.

use std::cmp::Ordering;
use std::fmt;

/// Ordered tuple of the integers in every maximal digit run of a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VersionKey(Vec<u64>);

impl VersionKey {
    /// Extract the key from a version-like string.
    ///
    /// Runs that do not fit in a `u64` saturate at `u64::MAX`.
    pub fn parse(text: &str) -> Self {
        let mut parts = Vec::new();
        let mut current: Option<u64> = None;

        for c in text.chars() {
            match c.to_digit(10) {
                Some(d) => {
                    let value = current.unwrap_or(0);
                    current = Some(value.saturating_mul(10).saturating_add(u64::from(d)));
                }
                None => {
                    if let Some(value) = current.take() {
                        parts.push(value);
                    }
                }
            }
        }
        if let Some(value) = current {
            parts.push(value);
        }

        Self(parts)
    }

    /// True when the source string had no digit run at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn parts(&self) -> &[u64] {
        &self.0
    }

    /// Newest-first comparison.
    ///
    /// Keys without any digit run sort after every key that has one, and
    /// compare equal to each other.
    pub fn cmp_desc(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => other.cmp(self),
        }
    }

    /// Oldest-first comparison, digitless keys still last.
    pub fn cmp_asc(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.cmp(other),
        }
    }
}

impl From<&str> for VersionKey {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Compare two version strings newest-first.
pub fn compare_desc(a: &str, b: &str) -> Ordering {
    VersionKey::parse(a).cmp_desc(&VersionKey::parse(b))
}

/// Compare two version strings oldest-first.
pub fn compare_asc(a: &str, b: &str) -> Ordering {
    VersionKey::parse(a).cmp_asc(&VersionKey::parse(b))
}
