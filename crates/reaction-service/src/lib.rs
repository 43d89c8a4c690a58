//! reaction-service: frontera de peticiones y tutor de química
//!
//! `ReactionService` expone las operaciones del store tal como las consume
//! una capa HTTP (parámetros de ruta en texto, `NotFound` distinguible) y
//! `ChemTutor` construye los prompts del tutor sobre un `TextGenerator`.

pub mod errors;
pub mod service;
pub mod tutor;

pub use errors::ServiceError;
pub use service::{ReactionDetail, ReactionService};
pub use tutor::ChemTutor;
