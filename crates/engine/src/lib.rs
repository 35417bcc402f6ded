//! Vestiary engine
//!
//! Resolves design sources (stored designs, quick-bar picks, random
//! selections, revert requests) behind one stand-in contract and applies
//! the resolved data to a live actor state under flag and lock gating.
//!
//! Everything runs synchronously on the caller's thread; the only shared
//! mutable state is the random selector's last-selected handle.

pub mod apply;
pub mod ports;
pub mod quick;
pub mod random;
pub mod resolver;
pub mod stand_in;

pub use apply::{apply_design, unlock, ApplyOutcome, ApplyReport, ChangedField, RejectReason};
pub use ports::{snapshot, ActorState, BufferedActor, DesignRepository};
pub use quick::QuickBar;
pub use random::{filter_pool, RandomSelector};
pub use resolver::{DesignResolver, ResolveRequest};
pub use stand_in::{
    DesignStandIn, QuickSelection, RandomSelection, StateSource, QUICK_TAG, RANDOM_TAG,
    RESTRICTIONS_KEY, REVERT_TAG,
};
