// Archivo: service.rs
// Propósito: `ReactionService`, la frontera de peticiones sobre el store.
// Recibe los parámetros tal como llegan de la ruta (texto), los valida y
// delega en `ReactionRepository`.
use crate::errors::{Result, ServiceError};
use reaction_domain::{Compound, CompoundsByReaction, Reaction, ReactionRepository, ReactionsByCompound};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reacción junto con sus reactivos y productos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionDetail {
  pub reaction: Reaction,
  pub compounds: CompoundsByReaction,
}

/// Servicio de alto nivel sobre el repositorio de reacciones.
///
/// El repositorio se inyecta al construir el servicio; no existe estado
/// global.
#[derive(Clone)]
pub struct ReactionService {
  repo: Arc<dyn ReactionRepository>,
}

impl ReactionService {
  pub fn new(repo: Arc<dyn ReactionRepository>) -> Self {
    Self { repo }
  }

  pub fn repository(&self) -> &Arc<dyn ReactionRepository> {
    &self.repo
  }

  /// Listado de reacciones: filtra por grupo funcional si se indica; si no,
  /// por búsqueda libre; si no hay ninguno, devuelve todas.
  pub fn list_reactions(&self, group: Option<&str>, search: Option<&str>) -> Result<Vec<Reaction>> {
    let group = group.map(str::trim).filter(|g| !g.is_empty());
    let reactions = match (group, search) {
      (Some(g), _) => self.repo.get_reactions_by_functional_group(g)?,
      (None, Some(q)) => self.repo.search_reactions(q)?,
      (None, None) => self.repo.get_all_reactions()?,
    };
    Ok(reactions)
  }

  pub fn get_reaction(&self, id: &str) -> Result<Reaction> {
    let id = parse_int(id, "id")?;
    Ok(self.repo.get_reaction(id)?)
  }

  pub fn reaction_detail(&self, id: &str) -> Result<ReactionDetail> {
    let id = parse_int(id, "id")?;
    let reaction = self.repo.get_reaction(id)?;
    let compounds = self.repo.get_compounds_by_reaction(id)?;
    Ok(ReactionDetail { reaction, compounds })
  }

  pub fn reactions_by_chapter(&self, chapter: &str) -> Result<Vec<Reaction>> {
    let chapter = parse_int(chapter, "capítulo")?;
    Ok(self.repo.get_reactions_by_chapter(chapter)?)
  }

  /// Invierte el marcador. Un id inexistente se devuelve como `NotFound`,
  /// nunca como no-op.
  pub fn toggle_bookmark(&self, id: &str) -> Result<Reaction> {
    let id = parse_int(id, "id")?;
    let updated = self.repo.toggle_bookmark(id)?;
    log::info!("Reacción {} {}", updated.id, if updated.is_bookmarked { "marcada" } else { "desmarcada" });
    Ok(updated)
  }

  pub fn bookmarked_reactions(&self) -> Result<Vec<Reaction>> {
    Ok(self.repo.get_bookmarked_reactions()?)
  }

  pub fn compounds_for_reaction(&self, id: &str) -> Result<CompoundsByReaction> {
    let id = parse_int(id, "id")?;
    Ok(self.repo.get_compounds_by_reaction(id)?)
  }

  pub fn get_compound(&self, id: &str) -> Result<Compound> {
    let id = parse_int(id, "id")?;
    Ok(self.repo.get_compound(id)?)
  }

  pub fn reactions_for_compound(&self, id: &str) -> Result<ReactionsByCompound> {
    let id = parse_int(id, "id")?;
    Ok(self.repo.get_reactions_by_compound(id)?)
  }

  pub fn search_compounds(&self, query: &str) -> Result<Vec<Compound>> {
    Ok(self.repo.search_compounds(query)?)
  }
}

/// Parámetro numérico de ruta. El texto no numérico se rechaza aquí.
pub fn parse_int(raw: &str, field: &str) -> Result<i32> {
  raw.trim()
     .parse::<i32>()
     .map_err(|_| ServiceError::Validation(format!("{} debe ser un entero, se recibió '{}'", field, raw)))
}
