//! Random design selection
//!
//! Draws uniformly from a (optionally predicate-filtered) candidate pool.
//! Repeat avoidance compares the last drawn design by id - a handle, not an
//! owning reference, so a deleted design is never kept alive by the
//! selector.

use std::sync::{Arc, Mutex, PoisonError};

use rand::Rng;
use vestiary_domain::{
    matches_any, parse_restrictions, Design, DesignFacts, DesignId, DesignPredicate,
};

use crate::ports::DesignRepository;

/// Filter the repository pool down to predicate matches.
///
/// An empty predicate sequence matches everything. The lowercase fact views
/// are computed once per candidate, not once per predicate.
pub fn filter_pool(
    repo: &dyn DesignRepository,
    predicates: &[DesignPredicate],
) -> Vec<Arc<Design>> {
    let designs = repo.designs();
    if predicates.is_empty() {
        return designs;
    }
    designs
        .into_iter()
        .filter(|design| {
            let path = repo.path_label(design.id).unwrap_or_default();
            let facts = DesignFacts::new(
                &design.name,
                &design.identifier(),
                &path,
                &design.tags,
                &design.color,
            );
            matches_any(predicates, &facts)
        })
        .collect()
}

/// Pseudo-random design selector with optional immediate-repeat avoidance.
///
/// One instance is expected to be shared; the last-selected handle is
/// updated atomically with the draw.
#[derive(Debug)]
pub struct RandomSelector {
    avoid_repeat: bool,
    last: Mutex<Option<DesignId>>,
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RandomSelector {
    pub fn new(avoid_repeat: bool) -> Self {
        Self {
            avoid_repeat,
            last: Mutex::new(None),
        }
    }

    /// Id of the most recently returned design, if any
    pub fn last_selected(&self) -> Option<DesignId> {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Draw from an explicit pool.
    ///
    /// Empty pool -> `None`. A single candidate is always returned, even
    /// under repeat avoidance. With two or more candidates the draw rejects
    /// and redraws while it equals the last returned design; the redraw
    /// loop only runs when a different candidate exists in the pool, so it
    /// terminates even if the pool shrank since the last call.
    pub fn select_from(&self, pool: &[Arc<Design>]) -> Option<Arc<Design>> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let chosen = match pool {
            [] => return None,
            [only] => Arc::clone(only),
            _ => {
                let mut rng = rand::thread_rng();
                let mut index = rng.gen_range(0..pool.len());
                if self.avoid_repeat {
                    if let Some(last_id) = *last {
                        if pool.iter().any(|d| d.id != last_id) {
                            while pool[index].id == last_id {
                                index = rng.gen_range(0..pool.len());
                            }
                        }
                    }
                }
                Arc::clone(&pool[index])
            }
        };
        *last = Some(chosen.id);
        tracing::debug!(design = %chosen.id, name = %chosen.name, "Random selection drew design");
        Some(chosen)
    }

    /// Draw from the whole repository
    pub fn select_all(&self, repo: &dyn DesignRepository) -> Option<Arc<Design>> {
        self.select_from(&repo.designs())
    }

    /// Draw from the designs matching a single predicate
    pub fn select_single(
        &self,
        repo: &dyn DesignRepository,
        predicate: &DesignPredicate,
    ) -> Option<Arc<Design>> {
        self.select_matching(repo, std::slice::from_ref(predicate))
    }

    /// Draw from the designs matching any of the predicates
    pub fn select_matching(
        &self,
        repo: &dyn DesignRepository,
        predicates: &[DesignPredicate],
    ) -> Option<Arc<Design>> {
        self.select_from(&filter_pool(repo, predicates))
    }

    /// Parse a restriction string, then draw from its matches
    pub fn select_restricted(
        &self,
        repo: &dyn DesignRepository,
        restriction: &str,
    ) -> Option<Arc<Design>> {
        self.select_matching(repo, &parse_restrictions(restriction))
    }
}
