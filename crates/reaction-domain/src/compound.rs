// compound.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Texto provisional del peso molecular: no se calcula a partir de la fórmula.
pub const MOLECULAR_WEIGHT_PLACEHOLDER: &str = "Calculate based on formula";

/// Estequiometría asignada a todos los enlaces reacción-compuesto.
pub const DEFAULT_STOICHIOMETRY: &str = "1";

/// Especie química derivada de un token de la fórmula de una reacción.
///
/// No se deduplican: el mismo token en dos reacciones produce dos compuestos
/// con ids distintos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compound {
  pub id: i32,
  pub name: String,
  pub formula: String,
  pub description: String,
  pub molecular_weight: String,
  pub is_bookmarked: bool,
}

impl Compound {
  pub(crate) fn from_token(id: i32, token: &str, role: CompoundRole, reaction_name: &str) -> Self {
    let description = match role {
      CompoundRole::Reactant => format!("Compound involved in {}", reaction_name),
      CompoundRole::Product => format!("Product of {}", reaction_name),
    };
    Self { id,
           name: token.to_string(),
           formula: token.to_string(),
           description,
           molecular_weight: MOLECULAR_WEIGHT_PLACEHOLDER.to_string(),
           is_bookmarked: false }
  }

  pub(crate) fn matches_query(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle) || self.formula.to_lowercase().contains(needle)
  }
}

impl fmt::Display for Compound {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Compound(#{}, {}) - {}", self.id, self.formula, self.description)
  }
}

/// Papel de un compuesto dentro de una reacción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundRole {
  Reactant,
  Product,
}

impl fmt::Display for CompoundRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      CompoundRole::Reactant => "reactant",
      CompoundRole::Product => "product",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for CompoundRole {
  type Err = crate::DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "reactant" => Ok(CompoundRole::Reactant),
      "product" => Ok(CompoundRole::Product),
      other => Err(crate::DomainError::ValidationError(format!("Rol de compuesto desconocido: {}", other))),
    }
  }
}

/// Enlace muchos-a-muchos entre una reacción y un compuesto, etiquetado con
/// su papel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCompound {
  pub id: i32,
  pub reaction_id: i32,
  pub compound_id: i32,
  pub role: CompoundRole,
  pub stoichiometry: String,
}

impl ReactionCompound {
  pub fn new(id: i32, reaction_id: i32, compound_id: i32, role: CompoundRole) -> Self {
    Self { id, reaction_id, compound_id, role, stoichiometry: DEFAULT_STOICHIOMETRY.to_string() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_parses_case_insensitive() {
    assert_eq!("Reactant".parse::<CompoundRole>().unwrap(), CompoundRole::Reactant);
    assert_eq!(" product ".parse::<CompoundRole>().unwrap(), CompoundRole::Product);
    assert!("catalyst".parse::<CompoundRole>().is_err());
  }

  #[test]
  fn role_serializes_lowercase() {
    let v = serde_json::to_value(CompoundRole::Product).unwrap();
    assert_eq!(v, serde_json::json!("product"));
    assert_eq!(CompoundRole::Reactant.to_string(), "reactant");
  }

  #[test]
  fn compound_description_depends_on_role() {
    let r = Compound::from_token(1, "C2H4", CompoundRole::Reactant, "Hydrogenation of Alkene");
    let p = Compound::from_token(2, "C2H6", CompoundRole::Product, "Hydrogenation of Alkene");
    assert_eq!(r.description, "Compound involved in Hydrogenation of Alkene");
    assert_eq!(p.description, "Product of Hydrogenation of Alkene");
    assert_eq!(p.molecular_weight, MOLECULAR_WEIGHT_PLACEHOLDER);
    assert!(!p.is_bookmarked);
  }

  #[test]
  fn link_serializes_camel_case() {
    let link = ReactionCompound::new(3, 1, 2, CompoundRole::Reactant);
    let v = serde_json::to_value(&link).unwrap();
    assert_eq!(v["reactionId"], 1);
    assert_eq!(v["compoundId"], 2);
    assert_eq!(v["role"], "reactant");
    assert_eq!(v["stoichiometry"], "1");
  }
}
