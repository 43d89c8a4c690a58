// Archivo: errors.rs
// Propósito: errores del proveedor de generación de texto.
use thiserror::Error;

/// Errores del proveedor de texto.
///
/// - `Config`: falta configuración (clave API, valores inválidos).
/// - `Request`: la petición no llegó a completarse (red, timeout).
/// - `Http`: el servicio respondió con un estado de error.
/// - `Response`: el cuerpo de la respuesta no se pudo interpretar.
/// - `EmptyResponse`: la respuesta no contenía texto.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Configuración inválida: {0}")]
    Config(String),
    #[error("Fallo en la petición: {0}")]
    Request(String),
    #[error("Error HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Respuesta inválida: {0}")]
    Response(String),
    #[error("La respuesta no contiene texto")]
    EmptyResponse,
}

impl ProviderError {
    /// Indica si vale la pena reintentar. Los errores de configuración y los
    /// 4xx (salvo 429) no cambian entre intentos.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Config(_) => false,
            ProviderError::Http { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Request(_) | ProviderError::Response(_) | ProviderError::EmptyResponse => true,
        }
    }
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, ProviderError>;
