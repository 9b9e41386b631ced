//! Behavior resolution - decide which behavior a building prefab receives
//!
//! The resolver only decides. Attaching the chosen behavior to a prefab is
//! left to whoever consumes [`ResolvedBehavior`].

pub mod behavior;
pub mod prefab;
pub mod resolve;

pub use behavior::{BehaviorParameters, BehaviorVariant, ResolvedBehavior, ResourceImport};
pub use prefab::{PrefabCatalog, PrefabFacts};
pub use resolve::{Resolution, Resolver, BEAUTIFICATION_CLASS, LOW_COMMERCIAL_FALLBACK};
