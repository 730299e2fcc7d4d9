//! Candidate records offered to the matcher.

use super::distance::damerau_levenshtein;

/// A record from some data source that might describe the target place.
///
/// The matcher only reads `names`, `locator` and `distance_km`; the payload
/// rides along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    /// Every name the record is known by.
    pub names: Vec<String>,
    /// Canonical locator of the record, e.g. an entity URL.
    pub locator: String,
    /// Physical distance from the target, in kilometers.
    pub distance_km: f64,
    pub payload: T,
}

impl<T> Candidate<T> {
    pub fn new(names: Vec<String>, locator: impl Into<String>, distance_km: f64, payload: T) -> Self {
        Self {
            names,
            locator: locator.into(),
            distance_km,
            payload,
        }
    }

    /// Specificity proxy: shorter locators are the more canonical records.
    pub fn specificity(&self) -> usize {
        self.locator.chars().count()
    }

    /// Last path segment of the locator, if non-empty.
    ///
    /// ```
    /// use place_core::matching::Candidate;
    ///
    /// let c = Candidate::new(vec![], "http://www.wikidata.org/entity/Q2090", 0.0, ());
    /// assert_eq!(c.identifier(), Some("Q2090"));
    /// ```
    pub fn identifier(&self) -> Option<&str> {
        self.locator
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }

    /// Smallest edit distance between any name and an already lower-cased
    /// target, passing `cap` through to the distance function.
    ///
    /// Returns `None` when the candidate has no names.
    pub fn name_distance(&self, target_lower: &str, cap: Option<usize>) -> Option<usize> {
        self.names
            .iter()
            .map(|name| damerau_levenshtein(&name.to_lowercase(), target_lower, cap))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(names: &[&str], locator: &str) -> Candidate<()> {
        Candidate::new(
            names.iter().map(|n| n.to_string()).collect(),
            locator,
            1.0,
            (),
        )
    }

    #[test]
    fn specificity_counts_characters() {
        assert_eq!(candidate(&[], "Q42").specificity(), 3);
        assert_eq!(candidate(&[], "ü/Q1").specificity(), 4);
    }

    #[test]
    fn identifier_is_last_segment() {
        assert_eq!(candidate(&[], "http://www.wikidata.org/entity/Q64").identifier(), Some("Q64"));
        assert_eq!(candidate(&[], "Q64").identifier(), Some("Q64"));
        assert_eq!(candidate(&[], "http://example.org/").identifier(), None);
        assert_eq!(candidate(&[], "").identifier(), None);
    }

    #[test]
    fn best_alias_wins() {
        let c = candidate(&["Nuremberg", "Nürnberg", "Norimberga"], "Q2090");
        assert_eq!(c.name_distance("nürnberg", None), Some(0));
        assert_eq!(c.name_distance("nuremburg", None), Some(1));
    }

    #[test]
    fn no_names_no_distance() {
        assert_eq!(candidate(&[], "Q1").name_distance("berlin", None), None);
    }
}
