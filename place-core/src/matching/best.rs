//! Best-match selection over candidate records.
//!
//! Candidates are ranked by:
//! 1. Edit distance of their closest name to the target (lower is better,
//!    and at most [`MatchConfig::max_distance`])
//! 2. Specificity proxy (shorter locator is better)
//! 3. Physical distance (nearer is better)
//!
//! Anything still tied after step 3 keeps its input order.

use tracing::debug;

use super::candidate::Candidate;
use crate::config::MatchConfig;

/// A candidate that survived ranking, with its name distance.
#[derive(Debug)]
pub struct Match<'a, T> {
    pub candidate: &'a Candidate<T>,
    pub distance: usize,
}

// Manual impls: the derives would require `T: Clone`.
impl<T> Clone for Match<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Match<'_, T> {}

/// A winning candidate whose identifier passed validation.
#[derive(Debug)]
pub struct Winner<'a, T, I> {
    pub candidate: &'a Candidate<T>,
    pub distance: usize,
    pub identifier: I,
}

/// Candidates tied at the lowest name distance, in input order.
///
/// The running lowest distance starts at `config.max_distance`, so
/// candidates further than that never qualify. Each candidate's names are
/// compared with a cap one above the current lowest distance.
pub fn closest_by_name<'a, T>(
    target: &str,
    candidates: &'a [Candidate<T>],
    config: &MatchConfig,
) -> Vec<Match<'a, T>> {
    if target.is_empty() {
        return Vec::new();
    }

    let target = target.to_lowercase();
    let mut lowest = config.max_distance;
    let mut tied: Vec<&Candidate<T>> = Vec::new();

    for candidate in candidates {
        let Some(distance) = candidate.name_distance(&target, Some(lowest + 1)) else {
            continue;
        };

        if distance == lowest {
            tied.push(candidate);
        } else if distance < lowest {
            lowest = distance;
            tied.clear();
            tied.push(candidate);
        }
    }

    tied.into_iter()
        .map(|candidate| Match {
            candidate,
            distance: lowest,
        })
        .collect()
}

/// Candidates that are best after the full tie-break chain.
///
/// Usually one; several only when name distance, specificity and physical
/// distance are all equal. Empty when the target is empty or nothing is
/// close enough.
pub fn best_matches<'a, T>(
    target: &str,
    candidates: &'a [Candidate<T>],
    config: &MatchConfig,
) -> Vec<Match<'a, T>> {
    let tied = closest_by_name(target, candidates, config);

    let Some(specificity) = tied.iter().map(|m| m.candidate.specificity()).min() else {
        return Vec::new();
    };
    let mut most_specific: Vec<Match<'a, T>> = tied
        .into_iter()
        .filter(|m| m.candidate.specificity() == specificity)
        .collect();

    most_specific.sort_by(|a, b| a.candidate.distance_km.total_cmp(&b.candidate.distance_km));

    let Some(nearest) = most_specific.first().map(|m| m.candidate.distance_km) else {
        return Vec::new();
    };
    most_specific.retain(|m| m.candidate.distance_km.total_cmp(&nearest).is_eq());
    most_specific
}

/// The single best candidate, if any.
pub fn best_match<'a, T>(
    target: &str,
    candidates: &'a [Candidate<T>],
    config: &MatchConfig,
) -> Option<Match<'a, T>> {
    best_matches(target, candidates, config).into_iter().next()
}

/// The best candidate, kept only if `identify` accepts it.
///
/// A winner with a malformed identifier means no match; the runner-up is
/// not consulted, since it already lost on the ranking.
///
/// # Examples
///
/// ```
/// use place_core::config::MatchConfig;
/// use place_core::matching::{Candidate, select_winner};
///
/// let candidates = vec![
///     Candidate::new(vec!["Berlin".into()], "http://www.wikidata.org/entity/Q64", 2.0, ()),
///     Candidate::new(vec!["Bern".into()], "http://www.wikidata.org/entity/Q70", 1.0, ()),
/// ];
///
/// let winner = select_winner("berlin", &candidates, &MatchConfig::default(), |c| {
///     c.identifier().filter(|id| id.starts_with('Q')).map(str::to_string)
/// })
/// .unwrap();
/// assert_eq!(winner.identifier, "Q64");
/// ```
pub fn select_winner<'a, T, I, F>(
    target: &str,
    candidates: &'a [Candidate<T>],
    config: &MatchConfig,
    identify: F,
) -> Option<Winner<'a, T, I>>
where
    F: FnOnce(&Candidate<T>) -> Option<I>,
{
    let best = best_match(target, candidates, config)?;

    let Some(identifier) = identify(best.candidate) else {
        debug!(
            locator = %best.candidate.locator,
            "discarding best match with malformed identifier"
        );
        return None;
    };

    Some(Winner {
        candidate: best.candidate,
        distance: best.distance,
        identifier,
    })
}
