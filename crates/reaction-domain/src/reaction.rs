// reaction.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grupos funcionales que ofrece el catálogo para filtrar reacciones.
pub const FUNCTIONAL_GROUPS: [&str; 7] = ["Alkene", "Alkyne", "Benzene", "Alkyl Halide", "Grignard", "Reduction", "Phenol"];

/// Categorías de reacción conocidas por el catálogo.
pub const CATEGORIES: [&str; 12] = ["Hydrogenation",
                                    "Halogenation",
                                    "Hydrohalogenation",
                                    "Hydration",
                                    "Ozonolysis",
                                    "Polymerization",
                                    "Friedel-Crafts",
                                    "Grignard Reactions",
                                    "Reduction",
                                    "Oxidation",
                                    "Nitration",
                                    "Sulphonation"];

/// Definición de una reacción tal como llega en los datos semilla: todos los
/// campos salvo `id` e `is_bookmarked`, que asigna el store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionDefinition {
  pub name: String,
  pub category: String,
  pub functional_group: String,
  pub chapter: i32,
  pub reaction_number: i32,
  pub reagents: String,
  pub conditions: String,
  pub mechanism: String,
  pub products: String,
  pub real_world_applications: String,
  /// `"<reactivo> [+ <reactivo> ...] -> <producto> [+ <producto> ...]"`
  pub molecular_formula: String,
}

/// Reacción registrada en el store. El `id` lo asigna el store en orden de
/// semilla y no cambia; `is_bookmarked` es el único campo mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
  pub id: i32,
  pub name: String,
  pub category: String,
  pub functional_group: String,
  pub chapter: i32,
  pub reaction_number: i32,
  pub reagents: String,
  pub conditions: String,
  pub mechanism: String,
  pub products: String,
  pub real_world_applications: String,
  pub molecular_formula: String,
  pub is_bookmarked: bool,
}

impl Reaction {
  pub(crate) fn from_definition(id: i32, def: ReactionDefinition) -> Self {
    Self { id,
           name: def.name,
           category: def.category,
           functional_group: def.functional_group,
           chapter: def.chapter,
           reaction_number: def.reaction_number,
           reagents: def.reagents,
           conditions: def.conditions,
           mechanism: def.mechanism,
           products: def.products,
           real_world_applications: def.real_world_applications,
           molecular_formula: def.molecular_formula,
           is_bookmarked: false }
  }

  /// Coincidencia de búsqueda libre: subcadena sin distinguir mayúsculas en
  /// nombre, categoría, grupo funcional o mecanismo. `needle` ya debe venir
  /// en minúsculas.
  pub(crate) fn matches_query(&self, needle: &str) -> bool {
    [&self.name, &self.category, &self.functional_group, &self.mechanism].iter()
                                                                          .any(|f| f.to_lowercase().contains(needle))
  }

  /// Copia con el marcador invertido; el registro anterior queda reemplazado
  /// en el store.
  pub(crate) fn with_bookmark_toggled(&self) -> Self {
    let mut updated = self.clone();
    updated.is_bookmarked = !self.is_bookmarked;
    updated
  }
}

impl fmt::Display for Reaction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "#{} {} [{} / {}] cap. {}.{}: {}",
           self.id, self.name, self.category, self.functional_group, self.chapter, self.reaction_number, self.molecular_formula)
  }
}
