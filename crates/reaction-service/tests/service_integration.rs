use reaction_domain::{InMemoryReactionStore, ReactionRepository};
use reaction_service::{ReactionService, ServiceError};
use std::sync::Arc;

fn service() -> Result<ReactionService, ServiceError> {
  let store: Arc<dyn ReactionRepository> = Arc::new(InMemoryReactionStore::with_seed()?);
  Ok(ReactionService::new(store))
}

#[test]
fn list_without_filters_returns_everything() -> Result<(), ServiceError> {
  let svc = service()?;
  let all = svc.list_reactions(None, None)?;
  assert_eq!(all, svc.repository().get_all_reactions()?);
  // búsqueda vacía equivale a no filtrar
  assert_eq!(svc.list_reactions(None, Some(""))?, all);
  assert_eq!(svc.list_reactions(Some("  "), None)?, all);
  Ok(())
}

#[test]
fn group_filter_takes_precedence_over_search() -> Result<(), ServiceError> {
  let svc = service()?;
  let res = svc.list_reactions(Some("benzene"), Some("alkene"))?;
  assert!(!res.is_empty());
  assert!(res.iter().all(|r| r.functional_group == "Benzene"));
  Ok(())
}

#[test]
fn non_numeric_ids_are_rejected_before_store() -> Result<(), ServiceError> {
  let svc = service()?;
  assert!(matches!(svc.get_reaction("uno"), Err(ServiceError::Validation(_))));
  assert!(matches!(svc.toggle_bookmark("1x"), Err(ServiceError::Validation(_))));
  assert!(matches!(svc.reactions_by_chapter("tres"), Err(ServiceError::Validation(_))));
  assert!(matches!(svc.get_compound(""), Err(ServiceError::Validation(_))));
  // ningún marcador cambió
  assert!(svc.bookmarked_reactions()?.is_empty());
  Ok(())
}

#[test]
fn missing_ids_surface_as_not_found() -> Result<(), ServiceError> {
  let svc = service()?;
  let err = svc.toggle_bookmark("99999").unwrap_err();
  assert!(err.is_not_found());
  assert!(svc.get_reaction("99999").unwrap_err().is_not_found());
  assert!(svc.reaction_detail("99999").unwrap_err().is_not_found());
  assert!(!ServiceError::Validation("x".into()).is_not_found());
  Ok(())
}

#[test]
fn bookmark_roundtrip_through_service() -> Result<(), ServiceError> {
  let svc = service()?;
  let r = svc.toggle_bookmark("2")?;
  assert!(r.is_bookmarked);
  assert_eq!(svc.bookmarked_reactions()?.len(), 1);
  assert!(svc.get_reaction(" 2 ")?.is_bookmarked);
  let r = svc.toggle_bookmark("2")?;
  assert!(!r.is_bookmarked);
  assert!(svc.bookmarked_reactions()?.is_empty());
  Ok(())
}

#[test]
fn detail_and_compound_navigation() -> Result<(), ServiceError> {
  let svc = service()?;
  let detail = svc.reaction_detail("1")?;
  assert_eq!(detail.reaction.id, 1);
  assert_eq!(detail.compounds.reactants.len(), 2);
  assert_eq!(detail.compounds.products.len(), 1);

  let product = &detail.compounds.products[0];
  let back = svc.reactions_for_compound(&product.id.to_string())?;
  assert_eq!(back.as_product.len(), 1);
  assert_eq!(back.as_product[0].id, 1);
  assert_eq!(svc.get_compound(&product.id.to_string())?, *product);

  // una reacción sin enlaces devuelve listas vacías, no un error
  let empty = svc.compounds_for_reaction("99999")?;
  assert!(empty.reactants.is_empty() && empty.products.is_empty());
  Ok(())
}

#[test]
fn compound_search_and_serialization() -> Result<(), ServiceError> {
  let svc = service()?;
  let found = svc.search_compounds("mgbr")?;
  assert!(!found.is_empty());
  let v = serde_json::to_value(&found[0]).map_err(reaction_domain::DomainError::from)?;
  assert_eq!(v["molecularWeight"], "Calculate based on formula");
  assert_eq!(v["isBookmarked"], false);
  Ok(())
}
