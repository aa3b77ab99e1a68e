//! Filter to remove restaurants the diner has already reviewed.
//!
//! This is typically the first filter in the pipeline, as there's no
//! point in recommending restaurants the diner has already been to.

use crate::traits::Filter;
use anyhow::Result;
use recs::{Candidate, DinerProfile};

/// Removes candidates that the diner has already reviewed.
///
/// ## Algorithm
/// Uses the HashSet in DinerProfile.reviewed for O(1) lookups.
pub struct AlreadyReviewedFilter;

impl Filter for AlreadyReviewedFilter {
    fn name(&self) -> &str {
        "AlreadyReviewedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &DinerProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !profile.reviewed.contains(&candidate.restaurant_id))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recs::{Candidate, CandidateSource};

    #[test]
    fn test_already_reviewed_filter() {
        let mut profile = DinerProfile::new("u1".to_string());
        profile.reviewed.insert("r100".to_string());
        profile.reviewed.insert("r200".to_string());

        let candidates = vec![
            Candidate::new("r100".to_string(), CandidateSource::SimilarDiners, 0.9),
            Candidate::new("r101".to_string(), CandidateSource::SimilarDiners, 0.8),
            Candidate::new("r200".to_string(), CandidateSource::Discovery, 0.7),
            Candidate::new("r300".to_string(), CandidateSource::Discovery, 0.6),
        ];

        let filter = AlreadyReviewedFilter;
        let filtered = filter.apply(candidates, &profile).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].restaurant_id, "r101");
        assert_eq!(filtered[1].restaurant_id, "r300");
    }
}
