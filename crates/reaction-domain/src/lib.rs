//! Dominio de reacciones orgánicas: reacciones, compuestos y la tabla de
//! enlaces reactivo/producto que los relaciona.
//!
//! Los compuestos y enlaces se derivan una sola vez al construir el store, a
//! partir de la fórmula textual de cada reacción (`"A + B -> C"`).
//!
//! ```rust
//! use reaction_domain::{InMemoryReactionStore, ReactionRepository};
//! let store = InMemoryReactionStore::with_seed().unwrap();
//! let alkenes = store.get_reactions_by_functional_group("alkene").unwrap();
//! assert!(!alkenes.is_empty());
//! ```
mod compound;
mod errors;
pub mod formula;
mod reaction;
mod reaction_repository;
pub mod seed;

pub use compound::{Compound, CompoundRole, ReactionCompound, DEFAULT_STOICHIOMETRY, MOLECULAR_WEIGHT_PLACEHOLDER};
pub use errors::DomainError;
pub use reaction::{Reaction, ReactionDefinition, CATEGORIES, FUNCTIONAL_GROUPS};
pub use reaction_repository::{CompoundsByReaction, InMemoryReactionStore, ReactionRepository, ReactionsByCompound, StoreSnapshot};
