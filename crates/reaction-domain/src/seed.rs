use crate::{DomainError, ReactionDefinition};
use std::path::Path;

struct SeedRow {
    name: &'static str,
    category: &'static str,
    functional_group: &'static str,
    chapter: i32,
    reaction_number: i32,
    reagents: &'static str,
    conditions: &'static str,
    mechanism: &'static str,
    products: &'static str,
    real_world_applications: &'static str,
    molecular_formula: &'static str,
}

const SEED: &[SeedRow] = &[
    SeedRow { name: "Hydrogenation of Alkene",
              category: "Hydrogenation",
              functional_group: "Alkene",
              chapter: 1,
              reaction_number: 1,
              reagents: "H2, Pd/C or Pt or Ni catalyst",
              conditions: "Room temperature, 1-5 atm H2",
              mechanism: "Syn addition of hydrogen across the double bond on the metal surface",
              products: "Alkane",
              real_world_applications: "Hardening of vegetable oils into margarine",
              molecular_formula: "C2H4 + H2 -> C2H6" },
    SeedRow { name: "Halogenation of Alkene",
              category: "Halogenation",
              functional_group: "Alkene",
              chapter: 1,
              reaction_number: 2,
              reagents: "Br2 in CCl4",
              conditions: "Room temperature, dark",
              mechanism: "Electrophilic addition through a cyclic bromonium ion, anti addition",
              products: "Vicinal dihalide",
              real_world_applications: "Bromine water test for unsaturation",
              molecular_formula: "C2H4 + Br2 -> C2H4Br2" },
    SeedRow { name: "Hydrohalogenation of Alkene",
              category: "Hydrohalogenation",
              functional_group: "Alkene",
              chapter: 1,
              reaction_number: 3,
              reagents: "HBr",
              conditions: "Room temperature, no peroxides",
              mechanism: "Electrophilic addition via the more stable carbocation (Markovnikov)",
              products: "Alkyl halide",
              real_world_applications: "Synthesis of alkyl halide intermediates",
              molecular_formula: "C3H6 + HBr -> C3H7Br" },
    SeedRow { name: "Acid-Catalysed Hydration of Alkene",
              category: "Hydration",
              functional_group: "Alkene",
              chapter: 1,
              reaction_number: 4,
              reagents: "H2O, H3PO4 or H2SO4",
              conditions: "300 C, 60-70 atm (industrial)",
              mechanism: "Protonation to a carbocation followed by nucleophilic attack of water",
              products: "Alcohol",
              real_world_applications: "Industrial production of ethanol",
              molecular_formula: "C2H4 + H2O -> C2H5OH" },
    SeedRow { name: "Ozonolysis of Alkene",
              category: "Ozonolysis",
              functional_group: "Alkene",
              chapter: 1,
              reaction_number: 5,
              reagents: "O3, then Zn/H2O",
              conditions: "-78 C in CH2Cl2, reductive workup",
              mechanism: "1,3-dipolar cycloaddition to a molozonide that rearranges to an ozonide",
              products: "Aldehydes or ketones",
              real_world_applications: "Locating double bonds in structure determination",
              molecular_formula: "C4H8 + O3 -> 2CH3CHO" },
    SeedRow { name: "Polymerization of Ethene",
              category: "Polymerization",
              functional_group: "Alkene",
              chapter: 1,
              reaction_number: 6,
              reagents: "Ziegler-Natta catalyst or radical initiator",
              conditions: "High pressure or TiCl4/Al(C2H5)3",
              mechanism: "Chain-growth addition through radical or coordination intermediates",
              products: "Polyethylene",
              real_world_applications: "Plastic bags, bottles and films",
              molecular_formula: "nC2H4 -> (C2H4)n" },
    SeedRow { name: "Hydrogenation of Alkyne",
              category: "Hydrogenation",
              functional_group: "Alkyne",
              chapter: 2,
              reaction_number: 1,
              reagents: "H2, Lindlar catalyst",
              conditions: "Pd/CaCO3 poisoned with quinoline",
              mechanism: "Syn addition stopping at the cis-alkene",
              products: "cis-Alkene",
              real_world_applications: "Stereoselective synthesis of cis-alkenes",
              molecular_formula: "C2H2 + H2 -> C2H4" },
    SeedRow { name: "Hydration of Alkyne",
              category: "Hydration",
              functional_group: "Alkyne",
              chapter: 2,
              reaction_number: 2,
              reagents: "H2O, HgSO4, H2SO4",
              conditions: "333 K",
              mechanism: "Markovnikov addition to an enol that tautomerises to a carbonyl",
              products: "Aldehyde or ketone",
              real_world_applications: "Historical industrial route to acetaldehyde",
              molecular_formula: "C2H2 + H2O -> CH3CHO" },
    SeedRow { name: "Friedel-Crafts Alkylation",
              category: "Friedel-Crafts",
              functional_group: "Benzene",
              chapter: 3,
              reaction_number: 1,
              reagents: "CH3Cl, anhydrous AlCl3",
              conditions: "Dry conditions, room temperature",
              mechanism: "Electrophilic aromatic substitution by a carbocation-like electrophile",
              products: "Alkylbenzene",
              real_world_applications: "Production of ethylbenzene for styrene",
              molecular_formula: "C6H6 + CH3Cl -> C6H5CH3 + HCl" },
    SeedRow { name: "Friedel-Crafts Acylation",
              category: "Friedel-Crafts",
              functional_group: "Benzene",
              chapter: 3,
              reaction_number: 2,
              reagents: "CH3COCl, anhydrous AlCl3",
              conditions: "Dry conditions, gentle heating",
              mechanism: "Electrophilic aromatic substitution by an acylium ion",
              products: "Aryl ketone",
              real_world_applications: "Synthesis of acetophenone and ibuprofen precursors",
              molecular_formula: "C6H6 + CH3COCl -> C6H5COCH3 + HCl" },
    SeedRow { name: "Nitration of Benzene",
              category: "Nitration",
              functional_group: "Benzene",
              chapter: 3,
              reaction_number: 3,
              reagents: "Conc. HNO3 + conc. H2SO4",
              conditions: "Below 330 K",
              mechanism: "Electrophilic aromatic substitution by the nitronium ion",
              products: "Nitrobenzene",
              real_world_applications: "First step in aniline and dye manufacture",
              molecular_formula: "C6H6 + HNO3 -> C6H5NO2 + H2O" },
    SeedRow { name: "Sulphonation of Benzene",
              category: "Sulphonation",
              functional_group: "Benzene",
              chapter: 3,
              reaction_number: 4,
              reagents: "Fuming H2SO4 (oleum)",
              conditions: "Warm",
              mechanism: "Reversible electrophilic aromatic substitution by SO3",
              products: "Benzenesulphonic acid",
              real_world_applications: "Detergent manufacture",
              molecular_formula: "C6H6 + H2SO4 -> C6H5SO3H + H2O" },
    SeedRow { name: "Wurtz Reaction",
              category: "Halogenation",
              functional_group: "Alkyl Halide",
              chapter: 4,
              reaction_number: 1,
              reagents: "Na metal in dry ether",
              conditions: "Dry ether, reflux",
              mechanism: "Radical/organosodium coupling of two alkyl groups",
              products: "Symmetrical alkane",
              real_world_applications: "Laboratory preparation of higher alkanes",
              molecular_formula: "2CH3Cl + 2Na -> C2H6 + 2NaCl" },
    SeedRow { name: "Grignard Reagent Formation",
              category: "Grignard Reactions",
              functional_group: "Grignard",
              chapter: 5,
              reaction_number: 1,
              reagents: "Mg turnings in dry ether",
              conditions: "Anhydrous ether, iodine crystal to initiate",
              mechanism: "Oxidative insertion of magnesium into the carbon-halogen bond",
              products: "Alkylmagnesium halide",
              real_world_applications: "Carbon-carbon bond formation in pharmaceutical synthesis",
              molecular_formula: "CH3Br + Mg -> CH3MgBr" },
    SeedRow { name: "Grignard Addition to Carbonyl",
              category: "Grignard Reactions",
              functional_group: "Grignard",
              chapter: 5,
              reaction_number: 2,
              reagents: "RMgX, then H3O+ workup",
              conditions: "Dry ether, then aqueous acid",
              mechanism: "Nucleophilic addition of the carbanion equivalent to the carbonyl carbon",
              products: "Alcohol",
              real_world_applications: "Synthesis of secondary and tertiary alcohols",
              molecular_formula: "CH3MgBr + HCHO -> CH3CH2OH" },
    SeedRow { name: "Reduction of Aldehyde",
              category: "Reduction",
              functional_group: "Reduction",
              chapter: 6,
              reaction_number: 1,
              reagents: "NaBH4 or LiAlH4",
              conditions: "Methanol (NaBH4) or dry ether (LiAlH4)",
              mechanism: "Hydride transfer to the carbonyl carbon followed by protonation",
              products: "Primary alcohol",
              real_world_applications: "Fine chemical and fragrance synthesis",
              molecular_formula: "CH3CHO + H2 -> CH3CH2OH" },
    SeedRow { name: "Oxidation of Phenol",
              category: "Oxidation",
              functional_group: "Phenol",
              chapter: 7,
              reaction_number: 1,
              reagents: "Na2Cr2O7, H2SO4",
              conditions: "Aqueous acid",
              mechanism: "Oxidation through a phenoxy radical to the conjugated dione",
              products: "Benzoquinone",
              real_world_applications: "Quinones in photography developers and dyes",
              molecular_formula: "C6H5OH + O2 -> C6H4O2 + H2O" },
    SeedRow { name: "Nitration of Phenol",
              category: "Nitration",
              functional_group: "Phenol",
              chapter: 7,
              reaction_number: 2,
              reagents: "Dilute HNO3",
              conditions: "298 K",
              mechanism: "Electrophilic aromatic substitution activated by the hydroxyl group (ortho/para)",
              products: "o- and p-Nitrophenol",
              real_world_applications: "Intermediates for paracetamol",
              molecular_formula: "C6H5OH + HNO3 -> C6H4(OH)NO2 + H2O" },
];

/// Catálogo de reacciones incluido en el crate, en el orden de carga.
pub fn initial_reactions() -> Vec<ReactionDefinition> {
    SEED.iter()
        .map(|row| ReactionDefinition { name: row.name.to_string(),
                                        category: row.category.to_string(),
                                        functional_group: row.functional_group.to_string(),
                                        chapter: row.chapter,
                                        reaction_number: row.reaction_number,
                                        reagents: row.reagents.to_string(),
                                        conditions: row.conditions.to_string(),
                                        mechanism: row.mechanism.to_string(),
                                        products: row.products.to_string(),
                                        real_world_applications: row.real_world_applications.to_string(),
                                        molecular_formula: row.molecular_formula.to_string() })
        .collect()
}

/// Parsea un arreglo JSON de `ReactionDefinition` (claves en camelCase).
pub fn definitions_from_json(json: &str) -> Result<Vec<ReactionDefinition>, DomainError> {
    Ok(serde_json::from_str(json)?)
}

/// Lee definiciones desde un archivo JSON.
pub fn load_definitions(path: impl AsRef<Path>) -> Result<Vec<ReactionDefinition>, DomainError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DomainError::ExternalError(format!("No se pudo leer {}: {}", path.display(), e)))?;
    let defs = definitions_from_json(&raw)?;
    log::info!("{} definiciones de reacción cargadas desde {}", defs.len(), path.display());
    Ok(defs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::split_formula;
    use crate::{CATEGORIES, FUNCTIONAL_GROUPS};
    use std::io::Write;

    #[test]
    fn seed_formulas_are_well_formed() {
        for def in initial_reactions() {
            assert!(split_formula(&def.molecular_formula).is_ok(), "{}", def.name);
        }
    }

    #[test]
    fn seed_uses_known_groups_and_categories() {
        for def in initial_reactions() {
            assert!(FUNCTIONAL_GROUPS.contains(&def.functional_group.as_str()), "{}", def.functional_group);
            assert!(CATEGORIES.contains(&def.category.as_str()), "{}", def.category);
        }
    }

    #[test]
    fn loads_definitions_from_file() -> Result<(), DomainError> {
        let mut file = tempfile::NamedTempFile::new()?;
        let json = serde_json::to_string(&initial_reactions()[..2])?;
        file.write_all(json.as_bytes())?;
        let defs = load_definitions(file.path())?;
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "Hydrogenation of Alkene");
        Ok(())
    }

    #[test]
    fn invalid_json_is_serialization_error() {
        let err = definitions_from_json("[{\"name\": 3}]").unwrap_err();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }

    #[test]
    fn missing_file_is_external_error() {
        let err = load_definitions("/nonexistent/reactions.json").unwrap_err();
        assert!(matches!(err, DomainError::ExternalError(_)));
    }
}
