use log::LevelFilter;
use reaction_domain::{seed, InMemoryReactionStore, Reaction, ReactionRepository};
use reaction_providers::ProviderConfig;
use reaction_service::{ChemTutor, ReactionService};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

/// Menú interactivo sobre el catálogo de reacciones.
///
/// El store se construye una sola vez al arrancar y se inyecta en el
/// servicio; el tutor sólo se habilita si hay `GEMINI_API_KEY`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let store = Arc::new(build_store()?);
    let service = ReactionService::new(store.clone() as Arc<dyn ReactionRepository>);
    let tutor = match ProviderConfig::from_env() {
        Ok(cfg) => Some(ChemTutor::from_config(&cfg)),
        Err(e) => {
            log::warn!("Tutor deshabilitado: {}", e);
            None
        }
    };

    loop {
        println!("\n== Reacciones orgánicas ==");
        println!("1) Listar reacciones");
        println!("2) Buscar reacciones");
        println!("3) Filtrar por grupo funcional");
        println!("4) Filtrar por capítulo");
        println!("5) Ver detalle de una reacción");
        println!("6) Marcar / desmarcar reacción");
        println!("7) Ver reacciones marcadas");
        println!("8) Buscar compuestos");
        println!("9) Reacciones de un compuesto");
        println!("10) Preguntar al tutor");
        println!("11) Explicar una reacción con el tutor");
        println!("12) Exportar instantánea JSON");
        println!("0) Salir");
        let choice = prompt("Elige una opción: ")?;
        match choice.trim() {
            "1" => match service.list_reactions(None, None) {
                Ok(list) => print_reactions(&list),
                Err(e) => eprintln!("Error listando reacciones: {}", e),
            },
            "2" => {
                let q = prompt("Texto a buscar: ")?;
                match service.list_reactions(None, Some(q.trim())) {
                    Ok(list) => print_reactions(&list),
                    Err(e) => eprintln!("Error buscando: {}", e),
                }
            }
            "3" => {
                println!("Grupos: {}", reaction_domain::FUNCTIONAL_GROUPS.join(", "));
                let g = prompt("Grupo funcional: ")?;
                match service.list_reactions(Some(g.trim()), None) {
                    Ok(list) => print_reactions(&list),
                    Err(e) => eprintln!("Error filtrando: {}", e),
                }
            }
            "4" => {
                let c = prompt("Capítulo (número entero): ")?;
                match service.reactions_by_chapter(&c) {
                    Ok(list) => print_reactions(&list),
                    Err(e) => eprintln!("Error filtrando: {}", e),
                }
            }
            "5" => {
                let id = prompt("Id de la reacción: ")?;
                match service.reaction_detail(&id) {
                    Ok(d) => {
                        let r = &d.reaction;
                        println!("\n{}", r);
                        println!("  Reactivos:     {}", r.reagents);
                        println!("  Condiciones:   {}", r.conditions);
                        println!("  Mecanismo:     {}", r.mechanism);
                        println!("  Productos:     {}", r.products);
                        println!("  Aplicaciones:  {}", r.real_world_applications);
                        println!("  Marcada:       {}", if r.is_bookmarked { "sí" } else { "no" });
                        for c in &d.compounds.reactants {
                            println!("  [reactivo] #{} {}", c.id, c.formula);
                        }
                        for c in &d.compounds.products {
                            println!("  [producto] #{} {}", c.id, c.formula);
                        }
                    }
                    Err(e) if e.is_not_found() => eprintln!("No existe la reacción {}", id.trim()),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            "6" => {
                let id = prompt("Id de la reacción: ")?;
                match service.toggle_bookmark(&id) {
                    Ok(r) => println!("{} -> {}", r.name, if r.is_bookmarked { "marcada" } else { "desmarcada" }),
                    Err(e) => eprintln!("Error actualizando marcador: {}", e),
                }
            }
            "7" => match service.bookmarked_reactions() {
                Ok(list) => print_reactions(&list),
                Err(e) => eprintln!("Error: {}", e),
            },
            "8" => {
                let q = prompt("Nombre o fórmula: ")?;
                match service.search_compounds(q.trim()) {
                    Ok(list) => {
                        for c in list {
                            println!("{}", c);
                        }
                    }
                    Err(e) => eprintln!("Error buscando compuestos: {}", e),
                }
            }
            "9" => {
                let id = prompt("Id del compuesto: ")?;
                match service.reactions_for_compound(&id) {
                    Ok(res) => {
                        println!("Como reactivo:");
                        print_reactions(&res.as_reactant);
                        println!("Como producto:");
                        print_reactions(&res.as_product);
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            "10" => {
                let Some(t) = tutor.as_ref() else {
                    eprintln!("El tutor no está configurado (GEMINI_API_KEY)");
                    continue;
                };
                let q = prompt("Tu pregunta: ")?;
                match t.ask(&q).await {
                    Ok(answer) => println!("\n{}", answer),
                    Err(e) => eprintln!("{}", e),
                }
            }
            "11" => {
                let Some(t) = tutor.as_ref() else {
                    eprintln!("El tutor no está configurado (GEMINI_API_KEY)");
                    continue;
                };
                let id = prompt("Id de la reacción: ")?;
                let reaction = match service.get_reaction(&id) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        continue;
                    }
                };
                match t.explain(&reaction).await {
                    Ok(answer) => println!("\n{}", answer),
                    Err(e) => eprintln!("{}", e),
                }
            }
            "12" => {
                let path = prompt("Ruta del archivo: ")?;
                let res = store.snapshot()
                               .map_err(|e| e.to_string())
                               .and_then(|s| serde_json::to_string_pretty(&s).map_err(|e| e.to_string()))
                               .and_then(|json| std::fs::write(path.trim(), json).map_err(|e| e.to_string()));
                match res {
                    Ok(()) => println!("Instantánea escrita en {}", path.trim()),
                    Err(e) => eprintln!("Error exportando: {}", e),
                }
            }
            "0" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    Ok(())
}

/// Catálogo desde `REACTIONS_SEED_FILE` si está definida; si no, el
/// catálogo incluido.
fn build_store() -> Result<InMemoryReactionStore, Box<dyn Error>> {
    let defs = match std::env::var("REACTIONS_SEED_FILE") {
        Ok(path) => seed::load_definitions(path)?,
        Err(_) => seed::initial_reactions(),
    };
    Ok(InMemoryReactionStore::from_definitions(defs)?)
}

fn init_logging() {
    let level = std::env::var("REACTIONS_LOG").ok()
                                             .and_then(|l| l.parse::<LevelFilter>().ok())
                                             .unwrap_or(LevelFilter::Info);
    let config = ConfigBuilder::new().set_target_level(LevelFilter::Off).build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn print_reactions(list: &[Reaction]) {
    if list.is_empty() {
        println!("(sin resultados)");
        return;
    }
    for r in list {
        let mark = if r.is_bookmarked { "*" } else { " " };
        println!("{} {}", mark, r);
    }
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}
