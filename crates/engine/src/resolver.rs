//! Design resolution façade
//!
//! Orchestrates: source resolution, stand-in construction, and flag-gated
//! application against a live actor. Collaborators are the design
//! repository (read-only), a shared random selector, and the quick bar.

use std::sync::Arc;

use vestiary_domain::{ApplyFlags, DesignId, DomainError, LockKey};

use crate::apply::{apply_design, ApplyReport};
use crate::ports::{snapshot, ActorState, DesignRepository};
use crate::quick::QuickBar;
use crate::random::RandomSelector;
use crate::stand_in::{DesignStandIn, RandomSelection};

/// A caller's request for a design source
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolveRequest {
    /// A stored design by id
    Design(DesignId),
    /// A quick-bar slot
    Quick(usize),
    /// A random selection restricted by a predicate string
    Random(String),
    /// Revert to the game's own state
    Revert,
}

/// Resolves requests into stand-ins and applies them.
pub struct DesignResolver {
    repo: Arc<dyn DesignRepository>,
    selector: RandomSelector,
    quick_bar: QuickBar,
}

impl DesignResolver {
    pub fn new(repo: Arc<dyn DesignRepository>) -> Self {
        Self {
            repo,
            selector: RandomSelector::default(),
            quick_bar: QuickBar::default(),
        }
    }

    pub fn with_selector(mut self, selector: RandomSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_quick_bar(mut self, quick_bar: QuickBar) -> Self {
        self.quick_bar = quick_bar;
        self
    }

    pub fn selector(&self) -> &RandomSelector {
        &self.selector
    }

    pub fn quick_bar(&self) -> &QuickBar {
        &self.quick_bar
    }

    pub fn quick_bar_mut(&mut self) -> &mut QuickBar {
        &mut self.quick_bar
    }

    /// Resolve a request into a stand-in.
    ///
    /// A random request draws (and caches) its concrete design here; an
    /// unrestricted match miss still yields a valid stand-in that passes
    /// the baseline through. Missing design ids and out-of-range quick
    /// slots are `NotFound`.
    pub fn resolve(&self, request: ResolveRequest) -> Result<DesignStandIn, DomainError> {
        match request {
            ResolveRequest::Design(id) => {
                let design = self
                    .repo
                    .get(id)
                    .ok_or_else(|| DomainError::not_found("Design", id.to_string()))?;
                tracing::debug!(design = %id, name = %design.name, "Resolved stored design");
                Ok(DesignStandIn::Design(design))
            }
            ResolveRequest::Quick(slot) => {
                let selection = self
                    .quick_bar
                    .resolve(slot)
                    .ok_or_else(|| DomainError::not_found("QuickSlot", slot.to_string()))?;
                tracing::debug!(slot, pinned = selection.pinned.is_some(), "Resolved quick slot");
                Ok(DesignStandIn::Quick(selection))
            }
            ResolveRequest::Random(restriction) => {
                let selection = RandomSelection::new(&restriction);
                let drawn = selection.resolve(&self.selector, self.repo.as_ref());
                tracing::debug!(
                    restriction = %selection.restriction(),
                    resolved = drawn.is_some(),
                    "Resolved random selection"
                );
                Ok(DesignStandIn::Random(selection))
            }
            ResolveRequest::Revert => Ok(DesignStandIn::Revert),
        }
    }

    /// Resolve and apply in one pass.
    ///
    /// The actor's current state is the baseline a data-less stand-in
    /// passes through, which makes a revert under `REVERT_DEFAULT` flags
    /// apply cleanly as "no change relative to game state".
    pub fn apply(
        &self,
        request: ResolveRequest,
        actor: &mut dyn ActorState,
        flags: ApplyFlags,
        key: LockKey,
    ) -> Result<ApplyReport, DomainError> {
        let stand_in = self.resolve(request)?;
        Ok(self.apply_stand_in(&stand_in, actor, flags, key))
    }

    /// Apply an already resolved stand-in.
    pub fn apply_stand_in(
        &self,
        stand_in: &DesignStandIn,
        actor: &mut dyn ActorState,
        flags: ApplyFlags,
        key: LockKey,
    ) -> ApplyReport {
        let baseline = snapshot(actor);
        let data = stand_in.get_design_data(&baseline);
        let selection = stand_in.selection();
        let materials = stand_in.material_overrides();
        apply_design(&data, &selection, &materials, actor, flags, key)
    }

    /// Apply a stand-in and every design it links to, filtered by job.
    ///
    /// Each link's application-type mask narrows the caller's flags; links
    /// whose job mask excludes `job_id` are skipped. A random stand-in
    /// re-resolves here, so one automation pass operates on one snapshot
    /// of its links.
    pub fn apply_links(
        &self,
        stand_in: &DesignStandIn,
        actor: &mut dyn ActorState,
        flags: ApplyFlags,
        key: LockKey,
        job_id: u8,
    ) -> Vec<ApplyReport> {
        let links = stand_in.enumerate_links(self.repo.as_ref(), &self.selector);
        links
            .iter()
            .filter(|(_, _, jobs)| jobs.matches(job_id))
            .map(|(linked, application, _)| {
                self.apply_stand_in(linked, actor, application.restrict(flags), key)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::ApplyOutcome;
    use crate::ports::{BufferedActor, MockDesignRepository};
    use std::sync::Arc;
    use vestiary_domain::{CustomizeIndex, CustomizeValue, Design, EquipSlot};

    fn repo_with(designs: Vec<Arc<Design>>) -> Arc<MockDesignRepository> {
        let mut repo = MockDesignRepository::new();
        let for_list = designs.clone();
        repo.expect_designs().returning(move || for_list.clone());
        repo.expect_get()
            .returning(move |id| designs.iter().find(|d| d.id == id).cloned());
        repo.expect_path_label().returning(|_| None);
        Arc::new(repo)
    }

    fn design_with_body(name: &str, item_id: u32) -> Design {
        let mut design = Design::new(name);
        design.data.set_piece(
            EquipSlot::Body,
            vestiary_domain::EquipmentPiece::new(item_id, 1, vestiary_domain::StainId::NONE),
        );
        design
    }

    #[test]
    fn resolving_a_missing_design_is_not_found() {
        let resolver = DesignResolver::new(repo_with(vec![]));
        let result = resolver.resolve(ResolveRequest::Design(DesignId::new()));
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn resolving_an_out_of_range_quick_slot_is_not_found() {
        let resolver = DesignResolver::new(repo_with(vec![]));
        let result = resolver.resolve(ResolveRequest::Quick(99));
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn an_empty_in_range_quick_slot_resolves_to_a_passthrough() {
        let resolver = DesignResolver::new(repo_with(vec![]));
        let stand_in = resolver
            .resolve(ResolveRequest::Quick(0))
            .expect("in range");

        let mut actor = BufferedActor::new();
        let report = resolver.apply_stand_in(
            &stand_in,
            &mut actor,
            ApplyFlags::DESIGN_DEFAULT,
            LockKey::NONE,
        );
        assert_eq!(report.outcome, ApplyOutcome::NothingDone);
    }

    #[test]
    fn random_on_an_empty_repository_resolves_but_applies_nothing() {
        let resolver = DesignResolver::new(repo_with(vec![]));
        let stand_in = resolver
            .resolve(ResolveRequest::Random("anything".to_string()))
            .expect("random always resolves");

        let mut actor = BufferedActor::new();
        let report = resolver.apply_stand_in(
            &stand_in,
            &mut actor,
            ApplyFlags::DESIGN_DEFAULT,
            LockKey::NONE,
        );
        assert_eq!(report.outcome, ApplyOutcome::NothingDone);
    }

    #[test]
    fn apply_resolves_and_merges_a_stored_design() {
        let design = Arc::new(design_with_body("Work", 700));
        let resolver = DesignResolver::new(repo_with(vec![Arc::clone(&design)]));

        let mut actor = BufferedActor::new();
        let report = resolver
            .apply(
                ResolveRequest::Design(design.id),
                &mut actor,
                ApplyFlags::DESIGN_DEFAULT,
                LockKey::NONE,
            )
            .expect("design exists");

        assert_eq!(report.outcome, ApplyOutcome::Applied);
        assert_eq!(actor.piece(EquipSlot::Body).item_id, 700);
    }

    #[test]
    fn revert_applies_as_no_change_relative_to_game_state() {
        let resolver = DesignResolver::new(repo_with(vec![]));
        let mut actor = BufferedActor::new();
        actor.set_customize(CustomizeIndex::Face, CustomizeValue(3));

        let report = resolver
            .apply(
                ResolveRequest::Revert,
                &mut actor,
                ApplyFlags::REVERT_DEFAULT,
                LockKey::NONE,
            )
            .expect("revert always resolves");

        assert_eq!(report.outcome, ApplyOutcome::NothingDone);
        assert_eq!(actor.customize(CustomizeIndex::Face), CustomizeValue(3));
    }

    #[test]
    fn apply_links_filters_by_job_and_narrows_categories() {
        use vestiary_domain::{ApplicationTypeMask, DesignLink, JobMask};

        let mut linked = design_with_body("Linked", 900);
        linked
            .data
            .set_customize(CustomizeIndex::Hairstyle, CustomizeValue(8));
        let linked = Arc::new(linked);

        let main = Arc::new(
            design_with_body("Main", 700).with_link(
                DesignLink::new(linked.id)
                    .with_application(ApplicationTypeMask::CUSTOMIZATION)
                    .with_jobs(JobMask::single(3)),
            ),
        );
        let resolver =
            DesignResolver::new(repo_with(vec![Arc::clone(&main), Arc::clone(&linked)]));
        let stand_in = resolver
            .resolve(ResolveRequest::Design(main.id))
            .expect("design exists");

        // Wrong job: only the design itself applies.
        let mut actor = BufferedActor::new();
        let reports = resolver.apply_links(
            &stand_in,
            &mut actor,
            ApplyFlags::DESIGN_DEFAULT,
            LockKey::NONE,
            5,
        );
        assert_eq!(reports.len(), 1);
        assert_eq!(actor.piece(EquipSlot::Body).item_id, 700);
        assert_eq!(
            actor.customize(CustomizeIndex::Hairstyle),
            CustomizeValue(0)
        );

        // Matching job: the link applies, but only its customization.
        let mut actor = BufferedActor::new();
        let reports = resolver.apply_links(
            &stand_in,
            &mut actor,
            ApplyFlags::DESIGN_DEFAULT,
            LockKey::NONE,
            3,
        );
        assert_eq!(reports.len(), 2);
        assert_eq!(actor.piece(EquipSlot::Body).item_id, 700);
        assert_eq!(
            actor.customize(CustomizeIndex::Hairstyle),
            CustomizeValue(8)
        );
    }
}
