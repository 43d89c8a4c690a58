// Archivo: tutor.rs
// Propósito: construir los prompts del tutor y delegar la generación en un
// `TextGenerator` con reintentos.
use crate::errors::{Result, ServiceError};
use reaction_domain::Reaction;
use reaction_providers::{sanitize_text, GeminiGenerator, ProviderConfig, RetryPolicy, RetryingGenerator, TextGenerator};
use std::sync::Arc;

const TUTOR_CONTEXT: &str = "Failed to get AI tutor response";
const EXPLANATION_CONTEXT: &str = "Failed to get reaction explanation";

/// Prompt del tutor conversacional, ya saneado.
pub fn tutor_prompt(question: &str) -> String {
  sanitize_text(&format!(
    "You are ChemAI, a friendly and knowledgeable chemistry tutor. Whether the student asks about specific reactions or just wants to chat about chemistry, engage them appropriately.

    If the question is chemistry-related, provide:
    1. Clear explanation
    2. Relevant examples
    3. Related concepts
    4. Practice tips

    If it's a casual greeting or conversation:
    1. Respond warmly
    2. Share an interesting chemistry fact
    3. Encourage learning about chemistry

    Student's message: {}

    Format the response in markdown for better readability.",
    question
  ))
}

/// Prompt de explicación de una reacción o concepto, ya saneado.
pub fn explanation_prompt(query: &str) -> String {
  sanitize_text(&format!(
    "As an organic chemistry expert, explain the following reaction or concept:
    {}

    Please provide:
    1. Step-by-step mechanism
    2. Required conditions
    3. Key considerations
    4. Common mistakes to avoid
    5. Real-world applications

    Format the response in markdown for better readability.",
    query
  ))
}

/// Tutor de química sobre un generador de texto externo.
pub struct ChemTutor {
  generator: RetryingGenerator<Arc<dyn TextGenerator>>,
}

impl ChemTutor {
  pub fn new(generator: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
    Self { generator: RetryingGenerator::new(generator, policy) }
  }

  /// Tutor respaldado por Gemini con la política de reintentos configurada.
  pub fn from_config(config: &ProviderConfig) -> Self {
    Self::new(Arc::new(GeminiGenerator::new(config)), config.retry)
  }

  pub fn retry_policy(&self) -> &RetryPolicy {
    self.generator.policy()
  }

  /// Responde un mensaje libre del estudiante.
  pub async fn ask(&self, question: &str) -> Result<String> {
    require_text(question, "la pregunta")?;
    self.run(tutor_prompt(question), TUTOR_CONTEXT).await
  }

  /// Explica una reacción o concepto descrito en texto.
  pub async fn explain_reaction(&self, query: &str) -> Result<String> {
    require_text(query, "la consulta")?;
    self.run(explanation_prompt(query), EXPLANATION_CONTEXT).await
  }

  /// Explicación de una reacción del catálogo, identificada por nombre y
  /// fórmula.
  pub async fn explain(&self, reaction: &Reaction) -> Result<String> {
    self.explain_reaction(&format!("{} ({})", reaction.name, reaction.molecular_formula)).await
  }

  async fn run(&self, prompt: String, context: &str) -> Result<String> {
    self.generator.generate(&prompt).await.map_err(|source| {
                                             log::error!("{}: {}", context, source);
                                             ServiceError::Tutor { context: context.to_string(), source }
                                           })
  }
}

fn require_text(text: &str, what: &str) -> Result<()> {
  if text.trim().is_empty() {
    return Err(ServiceError::Validation(format!("{} no puede estar vacía", what)));
  }
  // el prompt sólo admite ASCII
  if sanitize_text(text).is_empty() {
    return Err(ServiceError::Validation(format!("{} no contiene caracteres utilizables tras el saneado", what)));
  }
  Ok(())
}
