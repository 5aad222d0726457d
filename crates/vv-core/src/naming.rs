//! Parsing of the `"<N>_<rest>"` folder and file naming convention.
//!
//! Franchise members, seasons, and episode files carry their ordering
//! in a numeric name prefix separated from the label by the first
//! underscore. That prefix is the sole source of ordering truth; the
//! filesystem enumeration order and sidecar contents never affect it.

use std::cmp::Ordering;

/// A name split into its ordering prefix and label.
///
/// Malformed names (no underscore, or a non-numeric prefix) parse with
/// `number: None` and the whole name as the label; they sort after all
/// numbered siblings, with ties broken by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedName {
    /// Numeric prefix, when present and parseable.
    pub number: Option<u32>,
    /// Everything after the first underscore (or the whole name).
    pub label: String,
}

impl NumberedName {
    /// Split a name on its first underscore and parse the prefix.
    pub fn parse(name: &str) -> Self {
        if let Some((prefix, rest)) = name.split_once('_') {
            if let Ok(number) = prefix.trim().parse::<u32>() {
                return Self {
                    number: Some(number),
                    label: rest.to_string(),
                };
            }
        }
        Self {
            number: None,
            label: name.to_string(),
        }
    }
}

impl PartialOrd for NumberedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumberedName {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.cmp(&b),
            // Unparseable prefixes sort last, deterministically by label.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.to_lowercase().cmp(&other.label.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_prefix() {
        let n = NumberedName::parse("2_Beta");
        assert_eq!(n.number, Some(2));
        assert_eq!(n.label, "Beta");
    }

    #[test]
    fn test_parse_splits_on_first_underscore_only() {
        let n = NumberedName::parse("1_Season_One");
        assert_eq!(n.number, Some(1));
        assert_eq!(n.label, "Season_One");
    }

    #[test]
    fn test_parse_no_underscore() {
        let n = NumberedName::parse("Alpha");
        assert_eq!(n.number, None);
        assert_eq!(n.label, "Alpha");
    }

    #[test]
    fn test_parse_non_numeric_prefix() {
        let n = NumberedName::parse("extras_Bonus");
        assert_eq!(n.number, None);
        assert_eq!(n.label, "extras_Bonus");
    }

    #[test]
    fn test_numbered_sort_before_unparseable() {
        let mut names: Vec<NumberedName> = ["Specials", "2_Beta", "1_Alpha", "10_Kappa"]
            .iter()
            .map(|s| NumberedName::parse(s))
            .collect();
        names.sort();
        let labels: Vec<&str> = names.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Alpha", "Beta", "Kappa", "Specials"]);
    }

    #[test]
    fn test_unparseable_ties_break_by_label() {
        let mut names: Vec<NumberedName> = ["zeta", "Alpha"]
            .iter()
            .map(|s| NumberedName::parse(s))
            .collect();
        names.sort();
        assert_eq!(names[0].label, "Alpha");
        assert_eq!(names[1].label, "zeta");
    }
}
