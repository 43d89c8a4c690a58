use reaction_domain::DomainError;
use reaction_providers::ProviderError;
use thiserror::Error;

// Errores de la capa de servicio.
//
// Agrupa los errores del dominio (incluido `NotFound`), las validaciones de
// parámetros de entrada y los fallos del tutor una vez agotados los
// reintentos.
#[derive(Error, Debug)]
pub enum ServiceError {
  /// Errores originados en el store de reacciones.
  #[error("Error de dominio: {0}")]
  Domain(#[from] DomainError),

  /// Parámetros rechazados antes de llegar al store (ids no numéricos,
  /// preguntas vacías).
  #[error("Error de validacion: {0}")]
  Validation(String),

  /// Fallo del tutor; `context` describe la operación y `source` conserva
  /// la causa original.
  #[error("{context}: {source}")]
  Tutor { context: String, source: ProviderError },
}

impl ServiceError {
  /// `true` si el error corresponde a una entidad inexistente (404 en una
  /// capa HTTP).
  pub fn is_not_found(&self) -> bool {
    matches!(self, ServiceError::Domain(e) if e.is_not_found())
  }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
