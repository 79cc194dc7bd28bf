//! Registry of bucket names produced during a pass.

use rustc_hash::FxHashSet;

/// Insertion-ordered set of bucket names.
#[derive(Debug, Clone, Default)]
pub struct BucketRegistry {
    names: Vec<String>,
    seen: FxHashSet<String>,
}

impl BucketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }

    /// Set union with `other`. Names new to `self` are appended in `other`'s order.
    pub fn merge(&mut self, other: &BucketRegistry) {
        for name in other.iter() {
            self.insert(name);
        }
    }
}

impl PartialEq for BucketRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for BucketRegistry {}

impl<S: AsRef<str>> FromIterator<S> for BucketRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl<S: AsRef<str>> Extend<S> for BucketRegistry {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

impl IntoIterator for BucketRegistry {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_suppresses_duplicates() {
        let mut registry = BucketRegistry::new();
        assert!(registry.insert("3"));
        assert!(registry.insert("01"));
        assert!(!registry.insert("3"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["3", "01"]);
    }

    #[test]
    fn test_merge_is_set_union() {
        let a: BucketRegistry = ["0", "1"].into_iter().collect();
        let b: BucketRegistry = ["1", "2"].into_iter().collect();

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);

        let mut left = ab.into_vec();
        let mut right = ba.into_vec();
        assert_eq!(left, vec!["0", "1", "2"]);
        left.sort();
        right.sort();
        assert_eq!(left, right);
    }

    #[test]
    fn test_empty_registry() {
        let registry = BucketRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains(""));
    }
}
