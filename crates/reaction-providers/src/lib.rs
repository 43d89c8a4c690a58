//! Crate `reaction-providers` — colaborador externo del tutor de química.
//!
//! Define el contrato `TextGenerator` (`prompt -> texto`), un cliente REST de
//! Gemini, el saneado de texto libre y una utilidad de reintentos acotados
//! (`retry_with_backoff`) independiente de la construcción de prompts.
pub mod config;
pub mod errors;
pub mod gemini;
pub mod generator;
pub mod retry;
pub mod sanitize;

pub use config::ProviderConfig;
pub use errors::ProviderError;
pub use gemini::GeminiGenerator;
pub use generator::{RetryingGenerator, TextGenerator};
pub use retry::{retry_if, retry_with_backoff, Backoff, RetryPolicy};
pub use sanitize::sanitize_text;
