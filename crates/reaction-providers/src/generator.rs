// Archivo: generator.rs
// Propósito: contrato del colaborador que genera texto y un decorador que le
// añade reintentos.
use crate::errors::{ProviderError, Result};
use crate::retry::{retry_if, RetryPolicy};
use async_trait::async_trait;
use std::sync::Arc;

/// Capacidad mínima que se le exige al modelo de texto: `prompt -> texto`.
/// Puede fallar de forma transitoria.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<G> TextGenerator for Arc<G> where G: TextGenerator + ?Sized
{
    async fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt).await
    }
}

/// Envuelve cualquier `TextGenerator` con una `RetryPolicy`. Sólo se
/// reintentan los errores marcados como transitorios.
pub struct RetryingGenerator<G> {
    inner: G,
    policy: RetryPolicy,
}

impl<G> RetryingGenerator<G> where G: TextGenerator
{
    pub fn new(inner: G, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<G> TextGenerator for RetryingGenerator<G> where G: TextGenerator
{
    async fn generate(&self, prompt: &str) -> Result<String> {
        retry_if(&self.policy, ProviderError::is_retryable, || self.inner.generate(prompt)).await
    }
}
