//! Design stand-ins - the polymorphic design source contract
//!
//! A stand-in resolves to design data without necessarily being a stored
//! design: a concrete design, a quick-bar pick, a random selection, or a
//! revert-to-game request all expose the same read contract, so the apply
//! path never needs to know which one it holds. The set is closed by
//! design; there is no open extension point.

use std::borrow::Cow;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map, Value};
use vestiary_domain::{
    format_restrictions, parse_restrictions, ApplicationTypeMask, ApplySelection, Design,
    DesignData, DesignId, DesignPredicate, JobMask, MaterialOverrides,
};

use crate::ports::DesignRepository;
use crate::random::RandomSelector;

/// Serialization sentinel for a quick-bar selection
pub const QUICK_TAG: &str = "@quick";
/// Serialization sentinel for a random selection
pub const RANDOM_TAG: &str = "@random";
/// Serialization sentinel for revert-to-game
pub const REVERT_TAG: &str = "@revert";

/// Extra-data key under which a random selection persists its restriction
pub const RESTRICTIONS_KEY: &str = "Restrictions";

/// Where an applied state counts as coming from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSource {
    Manual,
    Game,
}

/// A quick-bar pick, snapshotted at resolution time.
///
/// `pinned` is whatever the bar slot held when the stand-in was resolved;
/// an empty slot yields a stand-in that passes the baseline through.
#[derive(Debug, Clone)]
pub struct QuickSelection {
    pub slot: usize,
    pub pinned: Option<Arc<Design>>,
}

impl QuickSelection {
    fn pinned_id(&self) -> Option<DesignId> {
        self.pinned.as_ref().map(|d| d.id)
    }
}

/// A predicate-restricted random pick.
///
/// Caches its resolved concrete design for the duration of one resolution
/// pass; equality is by normalized predicate sequence, never by the
/// currently resolved design.
#[derive(Debug)]
pub struct RandomSelection {
    predicates: Vec<DesignPredicate>,
    resolved: Mutex<Option<Arc<Design>>>,
}

impl Clone for RandomSelection {
    fn clone(&self) -> Self {
        Self {
            predicates: self.predicates.clone(),
            resolved: Mutex::new(
                self.resolved
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone(),
            ),
        }
    }
}

impl RandomSelection {
    pub fn new(restriction: &str) -> Self {
        Self::from_predicates(parse_restrictions(restriction))
    }

    pub fn from_predicates(predicates: Vec<DesignPredicate>) -> Self {
        Self {
            predicates,
            resolved: Mutex::new(None),
        }
    }

    pub fn predicates(&self) -> &[DesignPredicate] {
        &self.predicates
    }

    /// Normalized restriction string for this selection
    pub fn restriction(&self) -> String {
        format_restrictions(&self.predicates)
    }

    /// Draw a fresh concrete design and cache it for this pass
    pub fn resolve(
        &self,
        selector: &RandomSelector,
        repo: &dyn DesignRepository,
    ) -> Option<Arc<Design>> {
        let drawn = selector.select_matching(repo, &self.predicates);
        *self.resolved.lock().unwrap_or_else(PoisonError::into_inner) = drawn.clone();
        drawn
    }

    /// Currently cached concrete design, if a pass resolved one
    pub fn resolved(&self) -> Option<Arc<Design>> {
        self.resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop the cached design at the end of a resolution pass
    pub fn clear_resolution(&self) {
        *self.resolved.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn replace_restriction(&mut self, restriction: &str) {
        self.predicates = parse_restrictions(restriction);
        self.clear_resolution();
    }
}

/// Closed variant set of design sources
#[derive(Debug, Clone)]
pub enum DesignStandIn {
    /// A long-lived stored design owned by the repository
    Design(Arc<Design>),
    /// A quick-bar pick
    Quick(QuickSelection),
    /// A predicate-restricted random pick
    Random(RandomSelection),
    /// Revert to the game's own state
    Revert,
}

impl DesignStandIn {
    /// Display-only name; never used for equality
    pub fn resolve_display_name(&self, incognito: bool) -> String {
        let design_label = |design: &Design| {
            if incognito {
                design.incognito_label()
            } else {
                design.name.clone()
            }
        };
        match self {
            Self::Design(design) => design_label(design),
            Self::Quick(quick) => match &quick.pinned {
                Some(design) => format!("Quick {}: {}", quick.slot + 1, design_label(design)),
                None => format!("Quick {}", quick.slot + 1),
            },
            Self::Random(random) => match random.resolved() {
                Some(design) => format!("Random ({})", design_label(&design)),
                None => "Random".to_string(),
            },
            Self::Revert => "Revert".to_string(),
        }
    }

    /// Resolved design data, or the baseline unchanged when this variant
    /// has no data of its own. Never mutates the baseline.
    pub fn get_design_data<'a>(&'a self, baseline: &'a DesignData) -> Cow<'a, DesignData> {
        match self {
            Self::Design(design) => Cow::Borrowed(&design.data),
            Self::Quick(quick) => match &quick.pinned {
                Some(design) => Cow::Borrowed(&design.data),
                None => Cow::Borrowed(baseline),
            },
            Self::Random(random) => match random.resolved() {
                Some(design) => Cow::Owned(design.data.clone()),
                None => Cow::Borrowed(baseline),
            },
            Self::Revert => Cow::Borrowed(baseline),
        }
    }

    /// Fine-grained enable bits of the underlying concrete design;
    /// everything enabled when there is none
    pub fn selection(&self) -> ApplySelection {
        match self.concrete() {
            Some(design) => design.selection.clone(),
            None => ApplySelection::all(),
        }
    }

    /// Material overrides; empty when none apply
    pub fn material_overrides(&self) -> MaterialOverrides {
        match self.concrete() {
            Some(design) => design.materials.clone(),
            None => MaterialOverrides::new(),
        }
    }

    /// Stable sentinel distinguishing variant identity in persisted
    /// automation links; concrete designs serialize their identifier
    pub fn serialization_tag(&self) -> String {
        match self {
            Self::Design(design) => design.identifier(),
            Self::Quick(_) => QUICK_TAG.to_string(),
            Self::Random(_) => RANDOM_TAG.to_string(),
            Self::Revert => REVERT_TAG.to_string(),
        }
    }

    pub fn source(&self) -> StateSource {
        match self {
            Self::Revert => StateSource::Game,
            _ => StateSource::Manual,
        }
    }

    pub fn forces_redraw(&self) -> bool {
        self.concrete().map(|d| d.forced_redraw).unwrap_or(false)
    }

    pub fn resets_advanced_dyes(&self) -> bool {
        self.concrete()
            .map(|d| d.reset_advanced_dyes)
            .unwrap_or(false)
    }

    /// Chained designs for automation, each with its category and job mask.
    ///
    /// Revert yields itself once with an apply-everything mask; applying
    /// its links is idempotent. A random selection re-resolves its concrete
    /// design on every enumeration - callers needing a stable view within
    /// one operation must hold the returned sequence.
    pub fn enumerate_links(
        &self,
        repo: &dyn DesignRepository,
        selector: &RandomSelector,
    ) -> Vec<(DesignStandIn, ApplicationTypeMask, JobMask)> {
        match self {
            Self::Revert => vec![(Self::Revert, ApplicationTypeMask::ALL, JobMask::ANY)],
            Self::Design(design) => design_links(design, repo),
            Self::Quick(quick) => quick
                .pinned
                .as_ref()
                .map(|design| design_links(design, repo))
                .unwrap_or_default(),
            Self::Random(random) => match random.resolve(selector, repo) {
                Some(design) => design_links(&design, repo),
                None => Vec::new(),
            },
        }
    }

    /// Write variant-specific configuration into a persisted sink.
    /// Variants without extra data leave the sink untouched.
    pub fn attach_extra_data(&self, sink: &mut Map<String, Value>) {
        if let Self::Random(random) = self {
            sink.insert(
                RESTRICTIONS_KEY.to_string(),
                Value::String(random.restriction()),
            );
        }
    }

    /// Read variant-specific configuration back; absent keys are ignored
    pub fn read_extra_data(&mut self, source: &Map<String, Value>) {
        if let Self::Random(random) = self {
            if let Some(Value::String(restriction)) = source.get(RESTRICTIONS_KEY) {
                random.replace_restriction(restriction);
            }
        }
    }

    /// Type-checked in-place replacement of variant configuration.
    ///
    /// A random selection accepts only a restriction-string payload (the
    /// serialized predicate sequence); everything else returns false and
    /// leaves state untouched.
    pub fn try_replace_extra_data(&mut self, payload: &Value) -> bool {
        match (self, payload) {
            (Self::Random(random), Value::String(restriction)) => {
                random.replace_restriction(restriction);
                true
            }
            _ => false,
        }
    }

    /// The concrete design currently behind this stand-in, if any
    pub fn concrete(&self) -> Option<Arc<Design>> {
        match self {
            Self::Design(design) => Some(Arc::clone(design)),
            Self::Quick(quick) => quick.pinned.clone(),
            Self::Random(random) => random.resolved(),
            Self::Revert => None,
        }
    }
}

fn design_links(
    design: &Arc<Design>,
    repo: &dyn DesignRepository,
) -> Vec<(DesignStandIn, ApplicationTypeMask, JobMask)> {
    let mut out = vec![(
        DesignStandIn::Design(Arc::clone(design)),
        ApplicationTypeMask::ALL,
        JobMask::ANY,
    )];
    for link in &design.links {
        match repo.get(link.target) {
            Some(target) => {
                out.push((DesignStandIn::Design(target), link.application, link.jobs));
            }
            None => tracing::warn!(
                design = %design.id,
                target = %link.target,
                "Design link target missing; link skipped"
            ),
        }
    }
    out
}

/// Variants of different kinds are never equal. Concrete, quick, and
/// revert stand-ins compare by wrapped identity; random selections compare
/// by normalized predicate sequence, independent of current resolution.
impl PartialEq for DesignStandIn {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Design(a), Self::Design(b)) => a.id == b.id,
            (Self::Quick(a), Self::Quick(b)) => {
                a.slot == b.slot && a.pinned_id() == b.pinned_id()
            }
            (Self::Random(a), Self::Random(b)) => a.predicates == b.predicates,
            (Self::Revert, Self::Revert) => true,
            _ => false,
        }
    }
}

impl Eq for DesignStandIn {}
