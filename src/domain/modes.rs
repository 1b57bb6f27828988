use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// The payment channels a bank accepts.
///
/// Backed by a `BTreeSet` so iteration is always in ascending lexicographic
/// order, independent of how the modes were entered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeSet(BTreeSet<String>);

impl ModeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma separated list such as `"PayTM, Wire,,Cash"`.
    ///
    /// Items are trimmed and empty items are dropped.
    pub fn parse(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|mode| !mode.is_empty())
            .collect()
    }

    pub fn insert(&mut self, mode: impl Into<String>) -> bool {
        self.0.insert(mode.into())
    }

    pub fn contains(&self, mode: &str) -> bool {
        self.0.contains(mode)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The lexicographically smallest mode.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ModeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mode) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(mode)?;
        }
        Ok(())
    }
}

/// Returns the smallest mode accepted by both sets, if any.
///
/// Walks both ascending sequences in lock-step, so the first common element
/// found is the canonical one.
pub fn common_mode<'a>(a: &'a ModeSet, b: &'a ModeSet) -> Option<&'a str> {
    let mut left = a.iter();
    let mut right = b.iter();
    let (mut l, mut r) = (left.next(), right.next());

    while let (Some(x), Some(y)) = (l, r) {
        match x.cmp(y) {
            Ordering::Less => l = left.next(),
            Ordering::Greater => r = right.next(),
            Ordering::Equal => return Some(x),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_sorts() {
        let modes = ModeSet::parse(" Wire, Cash ,, PayTM ");
        let collected: Vec<&str> = modes.iter().collect();
        assert_eq!(collected, vec!["Cash", "PayTM", "Wire"]);
        assert_eq!(modes.first(), Some("Cash"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(ModeSet::parse("").is_empty());
        assert!(ModeSet::parse(" , ,").is_empty());
    }

    #[test]
    fn test_common_mode_picks_smallest_shared() {
        let a = ModeSet::parse("Wire,PayTM,GooglePay");
        let b = ModeSet::parse("Wire,PayTM");
        assert_eq!(common_mode(&a, &b), Some("PayTM"));
    }

    #[test]
    fn test_common_mode_disjoint() {
        let a = ModeSet::parse("Cash");
        let b = ModeSet::parse("Wire");
        assert_eq!(common_mode(&a, &b), None);
        assert_eq!(common_mode(&a, &ModeSet::new()), None);
    }

    #[test]
    fn test_common_mode_is_symmetric() {
        let a = ModeSet::parse("B,D,F,H");
        let b = ModeSet::parse("A,C,F,H,Z");
        assert_eq!(common_mode(&a, &b), common_mode(&b, &a));
        assert_eq!(common_mode(&a, &b), Some("F"));
    }

    #[test]
    fn test_common_mode_ignores_insertion_order() {
        let a: ModeSet = ["Wire", "Cash", "UPI"].into_iter().collect();
        let b: ModeSet = ["UPI", "Wire"].into_iter().collect();
        for _ in 0..3 {
            assert_eq!(common_mode(&a, &b), Some("UPI"));
        }
    }

    #[test]
    fn test_display_is_comma_joined() {
        let modes = ModeSet::parse("Wire,Cash");
        assert_eq!(modes.to_string(), "Cash,Wire");
    }
}
