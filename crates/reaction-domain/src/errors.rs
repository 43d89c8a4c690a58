// errors.rs
use thiserror::Error;

/// Errores del dominio de reacciones.
///
/// `NotFound` distingue las búsquedas por id que fallan del resto de fallos;
/// `ValidationError` cubre datos semilla mal formados (por ejemplo una
/// fórmula sin separador `->`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
  #[error("No encontrado: {0}")]
  NotFound(String),
  #[error("Error de validación: {0}")]
  ValidationError(String),
  #[error("Error externo: {0}")]
  ExternalError(String),
  #[error("Error de serialización: {0}")]
  SerializationError(String),
}

impl DomainError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound(_))
  }
}

impl From<serde_json::Error> for DomainError {
  fn from(e: serde_json::Error) -> Self {
    Self::SerializationError(e.to_string())
  }
}

impl From<std::io::Error> for DomainError {
  fn from(e: std::io::Error) -> Self {
    Self::ExternalError(e.to_string())
  }
}
