//! Candidate enumeration: which distributions a request will try.

use crate::catalog::{self, COMMON};
use crate::domain::CandidateMode;
use crate::error::FitError;

/// Ordered, duplicate-free, non-empty list of catalog identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    ids: Vec<&'static str>,
}

impl CandidateSet {
    pub fn ids(&self) -> &[&'static str] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ids.iter().copied()
    }
}

/// Resolve the candidate set for a request.
///
/// - `Common`: the ten common distributions; `selection` is ignored.
/// - `Custom`: `selection` in order, first occurrence wins.
///
/// Fails with `EmptySelection` for an empty custom selection and with
/// `UnknownDistribution` for the first identifier not in the catalog.
pub fn candidates<S: AsRef<str>>(
    mode: CandidateMode,
    selection: &[S],
) -> Result<CandidateSet, FitError> {
    match mode {
        CandidateMode::Common => Ok(CandidateSet {
            ids: COMMON.to_vec(),
        }),
        CandidateMode::Custom => {
            if selection.is_empty() {
                return Err(FitError::EmptySelection);
            }
            let mut ids: Vec<&'static str> = Vec::with_capacity(selection.len());
            for name in selection {
                let entry = catalog::lookup(name.as_ref().trim())?;
                if !ids.contains(&entry.id) {
                    ids.push(entry.id);
                }
            }
            Ok(CandidateSet { ids })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_mode_ignores_selection() {
        let set = candidates(CandidateMode::Common, &["beta"]).unwrap();
        assert_eq!(set.ids(), &COMMON);
    }

    #[test]
    fn custom_mode_keeps_order_and_drops_duplicates() {
        let set = candidates(CandidateMode::Custom, &["gamma", "norm", "gamma", "beta"]).unwrap();
        assert_eq!(set.ids(), &["gamma", "norm", "beta"]);
    }

    #[test]
    fn empty_custom_selection_is_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(
            candidates(CandidateMode::Custom, &empty),
            Err(FitError::EmptySelection)
        );
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        assert_eq!(
            candidates(CandidateMode::Custom, &["norm", "normal"]),
            Err(FitError::UnknownDistribution("normal".to_string()))
        );
    }
}
