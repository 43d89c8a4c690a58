// Archivo: retry.rs
// Propósito: reintentos acotados con espera creciente, independientes de la
// operación que envuelven.
use std::future::Future;
use std::time::Duration;

/// Función de espera entre intentos. `attempt` empieza en 1 para la espera
/// que sigue al primer fallo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Siempre la misma espera.
    Fixed(Duration),
    /// `base * attempt`.
    Linear(Duration),
    /// `base * 2^(attempt - 1)`.
    Exponential(Duration),
}

impl Backoff {
    pub fn delay(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        match *self {
            Backoff::Fixed(d) => d,
            Backoff::Linear(base) => base.saturating_mul(attempt),
            Backoff::Exponential(base) => base.saturating_mul(2u32.saturating_pow(attempt - 1)),
        }
    }
}

/// Política de reintento: `max_retries` intentos extra tras el primero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Backoff,
}

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Backoff) -> Self {
        Self { max_retries, backoff }
    }

    /// Sin esperas; útil en pruebas.
    pub fn immediate(max_retries: u32) -> Self {
        Self::new(max_retries, Backoff::Fixed(Duration::ZERO))
    }

    /// Número máximo de llamadas a la operación.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, Backoff::Linear(DEFAULT_RETRY_DELAY))
    }
}

/// Ejecuta `op` hasta que tenga éxito o se agoten los reintentos. Devuelve el
/// último error.
pub async fn retry_with_backoff<T, E, F, Fut>(policy: &RetryPolicy, op: F) -> Result<T, E>
    where F: FnMut() -> Fut,
          Fut: Future<Output = Result<T, E>>,
          E: std::fmt::Display
{
    retry_if(policy, |_| true, op).await
}

/// Igual que `retry_with_backoff`, pero sólo reintenta los errores para los
/// que `should_retry` devuelve `true`.
pub async fn retry_if<T, E, F, Fut, P>(policy: &RetryPolicy, should_retry: P, mut op: F) -> Result<T, E>
    where F: FnMut() -> Fut,
          Fut: Future<Output = Result<T, E>>,
          P: Fn(&E) -> bool,
          E: std::fmt::Display
{
    let mut retries = 0u32;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) => {
                if retries >= policy.max_retries || !should_retry(&e) {
                    return Err(e);
                }
                retries += 1;
                let delay = policy.backoff.delay(retries);
                log::warn!("Intento fallido ({}); reintento {}/{} en {}ms",
                           e,
                           retries,
                           policy.max_retries,
                           delay.as_millis());
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
