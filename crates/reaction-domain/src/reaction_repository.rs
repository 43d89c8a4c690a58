use crate::formula::split_formula;
use crate::DomainError;
use crate::{Compound, CompoundRole, Reaction, ReactionCompound, ReactionDefinition};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Compuestos de una reacción separados por papel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundsByReaction {
    pub reactants: Vec<Compound>,
    pub products: Vec<Compound>,
}

/// Reacciones en las que participa un compuesto, separadas por papel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionsByCompound {
    pub as_reactant: Vec<Reaction>,
    pub as_product: Vec<Reaction>,
}

/// Volcado serializable de las tres colecciones del store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub reactions: Vec<Reaction>,
    pub compounds: Vec<Compound>,
    pub reaction_compounds: Vec<ReactionCompound>,
}

/// Trait que define las consultas sobre reacciones y compuestos.
///
/// Todas las lecturas son puras. La única mutación es `toggle_bookmark`.
pub trait ReactionRepository: Send + Sync {
    /// Todas las reacciones en orden de inserción.
    fn get_all_reactions(&self) -> Result<Vec<Reaction>, DomainError>;

    /// Reacción por id; `NotFound` si no existe.
    fn get_reaction(&self, id: i32) -> Result<Reaction, DomainError>;

    /// Filtro exacto por grupo funcional sin distinguir mayúsculas.
    fn get_reactions_by_functional_group(&self, group: &str) -> Result<Vec<Reaction>, DomainError>;

    fn get_reactions_by_chapter(&self, chapter: i32) -> Result<Vec<Reaction>, DomainError>;

    /// Búsqueda por subcadena (sin distinguir mayúsculas) en nombre,
    /// categoría, grupo funcional y mecanismo. Una consulta vacía devuelve
    /// todo.
    fn search_reactions(&self, query: &str) -> Result<Vec<Reaction>, DomainError>;

    /// Invierte `is_bookmarked` y devuelve la reacción actualizada.
    fn toggle_bookmark(&self, id: i32) -> Result<Reaction, DomainError>;

    fn get_bookmarked_reactions(&self) -> Result<Vec<Reaction>, DomainError>;

    /// Compuesto por id; `NotFound` si no existe.
    fn get_compound(&self, id: i32) -> Result<Compound, DomainError>;

    /// Reactivos y productos de una reacción. Los enlaces que apuntan a un
    /// compuesto inexistente se omiten del resultado.
    fn get_compounds_by_reaction(&self, reaction_id: i32) -> Result<CompoundsByReaction, DomainError>;

    /// Reacciones donde aparece el compuesto. Los enlaces que apuntan a una
    /// reacción inexistente se omiten del resultado.
    fn get_reactions_by_compound(&self, compound_id: i32) -> Result<ReactionsByCompound, DomainError>;

    /// Búsqueda por subcadena en nombre o fórmula del compuesto.
    fn search_compounds(&self, query: &str) -> Result<Vec<Compound>, DomainError>;
}

/// Implementación en memoria. Se construye una sola vez a partir de las
/// definiciones semilla; no hay forma de reinicializarla.
pub struct InMemoryReactionStore {
    reactions: Arc<Mutex<IndexMap<i32, Reaction>>>,
    compounds: IndexMap<i32, Compound>,
    reaction_compounds: Vec<ReactionCompound>,
    // posiciones en `reaction_compounds`
    links_by_reaction: HashMap<i32, Vec<usize>>,
    links_by_compound: HashMap<i32, Vec<usize>>,
}

impl InMemoryReactionStore {
    /// Deriva reacciones, compuestos y enlaces de las definiciones, en orden.
    ///
    /// Los ids de reacción, compuesto y enlace empiezan en 1 y se asignan de
    /// forma secuencial. Si alguna fórmula no tiene exactamente un `->` no se
    /// construye el store.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, DomainError>
        where I: IntoIterator<Item = ReactionDefinition>
    {
        let mut reactions = IndexMap::new();
        let mut compounds = IndexMap::new();
        let mut links: Vec<ReactionCompound> = Vec::new();
        let mut next_reaction_id: i32 = 1;
        let mut next_compound_id: i32 = 1;

        for def in definitions {
            let sides = split_formula(&def.molecular_formula).map_err(|e| match e {
                                                                 DomainError::ValidationError(msg) => {
                                                                     DomainError::ValidationError(format!("reacción '{}': {}", def.name, msg))
                                                                 }
                                                                 other => other,
                                                             })?;
            let reaction = Reaction::from_definition(next_reaction_id, def);
            next_reaction_id += 1;

            let roles = [(CompoundRole::Reactant, &sides.reactants), (CompoundRole::Product, &sides.products)];
            for (role, tokens) in roles {
                for token in tokens {
                    let compound = Compound::from_token(next_compound_id, token, role, &reaction.name);
                    next_compound_id += 1;
                    let link_id = links.len() as i32 + 1;
                    links.push(ReactionCompound::new(link_id, reaction.id, compound.id, role));
                    compounds.insert(compound.id, compound);
                }
            }
            reactions.insert(reaction.id, reaction);
        }

        log::info!("Store de reacciones inicializado: {} reacciones, {} compuestos, {} enlaces",
                   reactions.len(),
                   compounds.len(),
                   links.len());
        Ok(Self::assemble(reactions, compounds, links))
    }

    /// Store con el catálogo incluido en el crate.
    pub fn with_seed() -> Result<Self, DomainError> {
        Self::from_definitions(crate::seed::initial_reactions())
    }

    /// Reconstruye un store a partir de registros ya derivados (por ejemplo
    /// un `StoreSnapshot`). Los ids repetidos se rechazan; los enlaces
    /// colgantes se aceptan y se omiten al consultar.
    pub fn from_parts(reactions: Vec<Reaction>,
                      compounds: Vec<Compound>,
                      reaction_compounds: Vec<ReactionCompound>)
                      -> Result<Self, DomainError> {
        let mut reaction_map = IndexMap::with_capacity(reactions.len());
        for r in reactions {
            let id = r.id;
            if reaction_map.insert(id, r).is_some() {
                return Err(DomainError::ValidationError(format!("id de reacción duplicado: {}", id)));
            }
        }
        let mut compound_map = IndexMap::with_capacity(compounds.len());
        for c in compounds {
            let id = c.id;
            if compound_map.insert(id, c).is_some() {
                return Err(DomainError::ValidationError(format!("id de compuesto duplicado: {}", id)));
            }
        }
        Ok(Self::assemble(reaction_map, compound_map, reaction_compounds))
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, DomainError> {
        Self::from_parts(snapshot.reactions, snapshot.compounds, snapshot.reaction_compounds)
    }

    pub fn snapshot(&self) -> Result<StoreSnapshot, DomainError> {
        let reactions = self.lock_reactions()?;
        Ok(StoreSnapshot { reactions: reactions.values().cloned().collect(),
                           compounds: self.compounds.values().cloned().collect(),
                           reaction_compounds: self.reaction_compounds.clone() })
    }

    /// Tabla de enlaces completa, en orden de creación.
    pub fn reaction_compounds(&self) -> &[ReactionCompound] {
        &self.reaction_compounds
    }

    fn assemble(reactions: IndexMap<i32, Reaction>,
                compounds: IndexMap<i32, Compound>,
                reaction_compounds: Vec<ReactionCompound>)
                -> Self {
        let mut links_by_reaction: HashMap<i32, Vec<usize>> = HashMap::new();
        let mut links_by_compound: HashMap<i32, Vec<usize>> = HashMap::new();
        for (pos, link) in reaction_compounds.iter().enumerate() {
            links_by_reaction.entry(link.reaction_id).or_default().push(pos);
            links_by_compound.entry(link.compound_id).or_default().push(pos);
        }
        Self { reactions: Arc::new(Mutex::new(reactions)),
               compounds,
               reaction_compounds,
               links_by_reaction,
               links_by_compound }
    }

    // Helper to map poisoned mutex errors into DomainError
    fn lock_reactions(&self) -> Result<MutexGuard<'_, IndexMap<i32, Reaction>>, DomainError> {
        self.reactions
            .lock()
            .map_err(|e| DomainError::ExternalError(format!("Mutex 'reactions' poisoned: {}", e)))
    }

    fn links_at<'a>(&'a self, positions: Option<&'a Vec<usize>>) -> impl Iterator<Item = &'a ReactionCompound> + 'a {
        positions.into_iter()
                 .flatten()
                 .filter_map(move |pos| self.reaction_compounds.get(*pos))
    }

    fn filter_reactions<F>(&self, pred: F) -> Result<Vec<Reaction>, DomainError>
        where F: Fn(&Reaction) -> bool
    {
        let reactions = self.lock_reactions()?;
        Ok(reactions.values().filter(|r| pred(r)).cloned().collect())
    }
}

impl ReactionRepository for InMemoryReactionStore {
    fn get_all_reactions(&self) -> Result<Vec<Reaction>, DomainError> {
        self.filter_reactions(|_| true)
    }

    fn get_reaction(&self, id: i32) -> Result<Reaction, DomainError> {
        let reactions = self.lock_reactions()?;
        reactions.get(&id)
                 .cloned()
                 .ok_or_else(|| DomainError::NotFound(format!("reacción {}", id)))
    }

    fn get_reactions_by_functional_group(&self, group: &str) -> Result<Vec<Reaction>, DomainError> {
        let group = group.to_lowercase();
        self.filter_reactions(|r| r.functional_group.to_lowercase() == group)
    }

    fn get_reactions_by_chapter(&self, chapter: i32) -> Result<Vec<Reaction>, DomainError> {
        self.filter_reactions(|r| r.chapter == chapter)
    }

    fn search_reactions(&self, query: &str) -> Result<Vec<Reaction>, DomainError> {
        let needle = query.to_lowercase();
        self.filter_reactions(|r| r.matches_query(&needle))
    }

    fn toggle_bookmark(&self, id: i32) -> Result<Reaction, DomainError> {
        // El lock se mantiene durante lectura y escritura: dos toggles sobre
        // el mismo id nunca se pisan.
        let mut reactions = self.lock_reactions()?;
        let current = reactions.get(&id)
                               .ok_or_else(|| DomainError::NotFound(format!("reacción {}", id)))?;
        let updated = current.with_bookmark_toggled();
        reactions.insert(id, updated.clone());
        log::debug!("Reacción {} marcada={}", id, updated.is_bookmarked);
        Ok(updated)
    }

    fn get_bookmarked_reactions(&self) -> Result<Vec<Reaction>, DomainError> {
        self.filter_reactions(|r| r.is_bookmarked)
    }

    fn get_compound(&self, id: i32) -> Result<Compound, DomainError> {
        self.compounds
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("compuesto {}", id)))
    }

    fn get_compounds_by_reaction(&self, reaction_id: i32) -> Result<CompoundsByReaction, DomainError> {
        let mut out = CompoundsByReaction::default();
        for link in self.links_at(self.links_by_reaction.get(&reaction_id)) {
            let Some(compound) = self.compounds.get(&link.compound_id) else {
                log::debug!("Enlace {} apunta al compuesto inexistente {}; se omite", link.id, link.compound_id);
                continue;
            };
            match link.role {
                CompoundRole::Reactant => out.reactants.push(compound.clone()),
                CompoundRole::Product => out.products.push(compound.clone()),
            }
        }
        Ok(out)
    }

    fn get_reactions_by_compound(&self, compound_id: i32) -> Result<ReactionsByCompound, DomainError> {
        let reactions = self.lock_reactions()?;
        let mut out = ReactionsByCompound::default();
        for link in self.links_at(self.links_by_compound.get(&compound_id)) {
            let Some(reaction) = reactions.get(&link.reaction_id) else {
                log::debug!("Enlace {} apunta a la reacción inexistente {}; se omite", link.id, link.reaction_id);
                continue;
            };
            match link.role {
                CompoundRole::Reactant => out.as_reactant.push(reaction.clone()),
                CompoundRole::Product => out.as_product.push(reaction.clone()),
            }
        }
        Ok(out)
    }

    fn search_compounds(&self, query: &str) -> Result<Vec<Compound>, DomainError> {
        let needle = query.to_lowercase();
        Ok(self.compounds
               .values()
               .filter(|c| c.matches_query(&needle))
               .cloned()
               .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, group: &str, chapter: i32, formula: &str) -> ReactionDefinition {
        ReactionDefinition { name: name.into(),
                             category: "Hydrogenation".into(),
                             functional_group: group.into(),
                             chapter,
                             reaction_number: 1,
                             reagents: "H2, Pd/C".into(),
                             conditions: "room temperature".into(),
                             mechanism: "Syn addition on the catalyst surface".into(),
                             products: "Alkane".into(),
                             real_world_applications: "Margarine".into(),
                             molecular_formula: formula.into() }
    }

    fn sample_store() -> Result<InMemoryReactionStore, DomainError> {
        InMemoryReactionStore::from_definitions(vec![def("Hydrogenation of Alkene", "Alkene", 1, "C2H4 + H2 -> C2H6"),
                                                     def("Hydrogenation of Alkyne", "Alkyne", 2, "C2H2 + 2H2 -> C2H6")])
    }

    #[test]
    fn hydrogenation_derives_compounds_and_links() -> Result<(), DomainError> {
        let store = sample_store()?;
        let res = store.get_compounds_by_reaction(1)?;
        let reactants: Vec<&str> = res.reactants.iter().map(|c| c.formula.as_str()).collect();
        let products: Vec<&str> = res.products.iter().map(|c| c.formula.as_str()).collect();
        assert_eq!(reactants, vec!["C2H4", "H2"]);
        assert_eq!(products, vec!["C2H6"]);

        let links: Vec<&ReactionCompound> = store.reaction_compounds().iter().filter(|l| l.reaction_id == 1).collect();
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| l.stoichiometry == "1"));
        Ok(())
    }

    #[test]
    fn ids_are_sequential_across_reactions() -> Result<(), DomainError> {
        let store = sample_store()?;
        let ids: Vec<i32> = store.get_all_reactions()?.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        // 3 compuestos en la primera reacción, 3 en la segunda
        assert_eq!(store.get_compound(4)?.formula, "C2H2");
        let link_ids: Vec<i32> = store.reaction_compounds().iter().map(|l| l.id).collect();
        assert_eq!(link_ids, (1..=6).collect::<Vec<i32>>());
        Ok(())
    }

    #[test]
    fn compounds_are_not_deduplicated() -> Result<(), DomainError> {
        let store = sample_store()?;
        let ethane = store.search_compounds("c2h6")?;
        assert_eq!(ethane.len(), 2);
        assert_ne!(ethane[0].id, ethane[1].id);
        Ok(())
    }

    #[test]
    fn malformed_formula_aborts_construction() {
        let res = InMemoryReactionStore::from_definitions(vec![def("ok", "Alkene", 1, "A -> B"),
                                                               def("broken", "Alkene", 1, "A + B")]);
        match res {
            Err(DomainError::ValidationError(msg)) => {
                assert!(msg.starts_with("reacción 'broken': "), "{}", msg);
                assert!(!msg.contains("Error de validación"), "{}", msg);
            }
            Err(other) => panic!("expected ValidationError, got {:?}", other),
            Ok(_) => panic!("expected construction to fail"),
        }
    }

    #[test]
    fn toggle_missing_reaction_is_not_found() -> Result<(), DomainError> {
        let store = sample_store()?;
        let err = store.toggle_bookmark(42).unwrap_err();
        assert!(err.is_not_found());
        Ok(())
    }

    #[test]
    fn dangling_links_are_dropped() -> Result<(), DomainError> {
        let store = sample_store()?;
        let mut snap = store.snapshot()?;
        // enlace a un compuesto y a una reacción que no existen
        snap.reaction_compounds.push(ReactionCompound::new(100, 1, 999, CompoundRole::Product));
        snap.reaction_compounds.push(ReactionCompound::new(101, 77, 1, CompoundRole::Product));
        let rebuilt = InMemoryReactionStore::from_snapshot(snap)?;

        let res = rebuilt.get_compounds_by_reaction(1)?;
        assert_eq!(res.reactants.len(), 2);
        assert_eq!(res.products.len(), 1);

        let by_compound = rebuilt.get_reactions_by_compound(1)?;
        assert_eq!(by_compound.as_reactant.len(), 1);
        assert!(by_compound.as_product.is_empty());
        Ok(())
    }

    #[test]
    fn duplicate_ids_in_parts_are_rejected() -> Result<(), DomainError> {
        let store = sample_store()?;
        let snap = store.snapshot()?;
        let mut reactions = snap.reactions.clone();
        reactions.push(snap.reactions[0].clone());
        let res = InMemoryReactionStore::from_parts(reactions, snap.compounds, snap.reaction_compounds);
        assert!(matches!(res, Err(DomainError::ValidationError(_))));
        Ok(())
    }

    #[test]
    fn concurrent_toggles_are_serialized() -> Result<(), DomainError> {
        use std::thread;

        let store = Arc::new(sample_store()?);
        let handles: Vec<_> = (0..8).map(|_| {
                                        let s = store.clone();
                                        thread::spawn(move || {
                                            for _ in 0..25 {
                                                s.toggle_bookmark(1).unwrap();
                                            }
                                        })
                                    })
                                    .collect();
        for h in handles {
            h.join().unwrap();
        }
        // 200 toggles: vuelve al estado inicial
        assert!(!store.get_reaction(1)?.is_bookmarked);
        Ok(())
    }

    #[test]
    fn mutex_poisoning_returns_error() {
        use std::thread;

        let store = sample_store().unwrap();
        let arc = store.reactions.clone();
        let handle = thread::spawn(move || {
            let _g = arc.lock().unwrap();
            panic!("force poison");
        });
        let _ = handle.join();

        match store.get_all_reactions() {
            Err(DomainError::ExternalError(_)) => (),
            other => panic!("expected ExternalError, got {:?}", other),
        }
        // compuestos no dependen del mutex
        assert!(store.get_compound(1).is_ok());
    }
}
