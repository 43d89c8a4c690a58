// formula.rs
use crate::DomainError;

pub const SIDE_SEPARATOR: &str = "->";
pub const SPECIES_SEPARATOR: char = '+';

/// Tokens de una fórmula de reacción ya separados y recortados, en el orden
/// en que aparecen. Las fórmulas son cadenas opacas: no se interpreta la
/// estructura de cada especie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaSides {
  pub reactants: Vec<String>,
  pub products: Vec<String>,
}

/// Separa `"A + B -> C"` en reactivos y productos.
///
/// La fórmula debe contener exactamente un `->`; en otro caso devuelve
/// `ValidationError`.
pub fn split_formula(formula: &str) -> Result<FormulaSides, DomainError> {
  let sides: Vec<&str> = formula.split(SIDE_SEPARATOR).collect();
  if sides.len() != 2 {
    return Err(DomainError::ValidationError(format!("La fórmula debe contener exactamente un '{}' ({} encontrados): {}",
                                                    SIDE_SEPARATOR,
                                                    sides.len() - 1,
                                                    formula)));
  }
  Ok(FormulaSides { reactants: split_side(sides[0]), products: split_side(sides[1]) })
}

fn split_side(side: &str) -> Vec<String> {
  side.trim().split(SPECIES_SEPARATOR).map(|t| t.trim().to_string()).collect()
}
