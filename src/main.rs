use baggage_check::{cli, config, error, interactive, logging, photo, render, storage};
use baggage_check::classifier::{cancel_pair, classify_session, CliClassifier};
use baggage_check_common::{
    load_language, save_language, AiOutcome, CategoryId, HistoryStore, Language,
    Localized, PersistOutcome, ScanSession, VerdictSource,
};
use clap::Parser;
use cli::{Cli, Commands, HistoryAction};
use config::Config;
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use photo::ClassificationRequest;
use std::sync::Arc;
use std::time::Duration;
use storage::FileStore;
use tracing::warn;

const ABORTED: Localized = Localized::new("Abgebrochen.", "Aborted.");
const ANALYZING: Localized = Localized::new("Gegenstand wird analysiert...", "Analyzing item...");
const SELECT_MANUALLY: Localized =
    Localized::new("Gegenstand manuell auswählen?", "Select the item manually?");
const FALLBACK_NOTE: Localized = Localized::new(
    "Kategorie von der KI erkannt, Regeln ohne Antworten angewendet.",
    "Category recognised by the AI, rules applied without answers.",
);
const SAVED: Localized = Localized::new("Im Verlauf gespeichert", "Saved to history");
const NOT_SAVED: Localized = Localized::new("Nicht gespeichert", "Not saved");
const RECORD_NOT_FOUND: Localized = Localized::new("Eintrag nicht gefunden", "Record not found");
const DELETED: Localized = Localized::new("Gelöscht", "Deleted");
const CLEARED: Localized = Localized::new("Verlauf gelöscht", "History cleared");

type History = HistoryStore<Arc<FileStore>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut config = Config::load()?;
    let store = Arc::new(FileStore::open(&config.resolve_data_dir()?));
    let history = HistoryStore::new(Arc::clone(&store));
    let lang = cli.lang.unwrap_or_else(|| load_language(&store));

    match cli.command {
        Commands::Categories => {
            println!("{}", render::render_categories(lang));
        }

        Commands::Check { category, answers, photo, no_save } => {
            let id: CategoryId = category.parse()?;

            let mut session = ScanSession::new();
            session.attach_photo(photo.map(|p| p.display().to_string()))?;
            session.select_category(id)?;
            for (key, value) in &answers {
                session.set_answer(key, value)?;
            }

            finish_manual(&mut session, &history, lang, no_save)?;
        }

        Commands::Scan { photo, no_fallback, ai_provider, no_save } => {
            let request =
                ClassificationRequest::from_photo(&photo, config.max_image_size, config.jpeg_quality)?;
            if let Some(provider) = ai_provider {
                config.ai_provider = provider;
            }
            let classifier = CliClassifier::from_config(&config, lang);

            let mut session = ScanSession::new();
            session.attach_photo(Some(photo.display().to_string()))?;

            // Ctrl-C cancels the running classification
            let (cancel, token) = cancel_pair();
            let ctrl_c = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });

            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message(ANALYZING.get(lang));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome =
                classify_session(&mut session, &classifier, &request, config.timeout(), &token, lang)
                    .await;
            spinner.finish_and_clear();
            ctrl_c.abort();

            match outcome {
                Ok(AiOutcome::Resolved(source)) => {
                    if let Some(details) = session
                        .ai_analysis()
                        .and_then(|a| render::render_analysis_details(a, lang))
                    {
                        println!("{}\n", details);
                    }
                    if source == VerdictSource::AiCategoryFallback {
                        println!("ℹ {}\n", FALLBACK_NOTE.get(lang));
                    }
                    print_resolution(&session, lang);
                    if !no_save {
                        save(&mut session, &history, lang);
                    }
                }
                Ok(AiOutcome::NeedsManualSelection { summary }) => {
                    println!("ℹ {}", summary);
                    manual_fallback(&mut session, &history, lang, no_fallback, no_save)?;
                }
                Err(e) => {
                    eprintln!("⚠ {}", e);
                    manual_fallback(&mut session, &history, lang, no_fallback, no_save)?;
                }
            }
        }

        Commands::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::List => {
                println!("{}", render::render_history_list(&history.list(), lang));
            }
            HistoryAction::Show { id } => match history.find(&id) {
                Ok(Some(record)) => println!("{}", render::render_record(&record, lang)),
                Ok(None) => eprintln!("{}: {}", RECORD_NOT_FOUND.get(lang), id),
                Err(e) => history_unavailable(&e),
            },
            HistoryAction::Delete { id } => match history.find(&id) {
                Ok(Some(_)) => {
                    history.remove(&id)?;
                    println!("✔ {}: {}", DELETED.get(lang), id);
                }
                Ok(None) => eprintln!("{}: {}", RECORD_NOT_FOUND.get(lang), id),
                Err(e) => history_unavailable(&e),
            },
            HistoryAction::Clear => {
                history.clear()?;
                println!("✔ {}", CLEARED.get(lang));
            }
        },

        Commands::Lang { language } => match language {
            Some(language) => {
                save_language(&store, language)?;
                println!("✔ {}", language.code());
            }
            None => println!("{}", load_language(&store).code()),
        },

        Commands::Config { show, set_provider, set_model, set_timeout } => {
            let changed = set_provider.is_some() || set_model.is_some() || set_timeout.is_some();

            if let Some(provider) = set_provider {
                config.ai_provider = provider;
            }
            if let Some(model) = set_model {
                config.model = Some(model).filter(|m| !m.trim().is_empty());
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
            }
            if changed {
                config.save()?;
                println!("✔ {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Config:");
                println!("  ai_provider: {}", config.ai_provider);
                println!("  model: {}", config.model.as_deref().unwrap_or("(provider default)"));
                println!("  max_image_size: {}px", config.max_image_size);
                println!("  jpeg_quality: {}", config.jpeg_quality);
                println!("  timeout_seconds: {}", config.timeout_seconds);
                println!("  data_dir: {}", config.resolve_data_dir()?.display());
            }
        }
    }

    Ok(())
}

/// Ask what is still open, then resolve, print and save
fn finish_manual(
    session: &mut ScanSession,
    history: &History,
    lang: Language,
    no_save: bool,
) -> Result<()> {
    if !session.is_ready_to_resolve() && !interactive::answer_pending(session, lang)? {
        println!("{}", ABORTED.get(lang));
        return Ok(());
    }

    session.resolve_manual(lang)?;
    print_resolution(session, lang);
    if !no_save {
        save(session, history, lang);
    }
    Ok(())
}

fn manual_fallback(
    session: &mut ScanSession,
    history: &History,
    lang: Language,
    no_fallback: bool,
    no_save: bool,
) -> Result<()> {
    if no_fallback || !interactive::confirm(SELECT_MANUALLY.get(lang), true)? {
        return Ok(());
    }
    let Some(id) = interactive::select_category(lang)? else {
        println!("{}", ABORTED.get(lang));
        return Ok(());
    };
    session.select_category(id)?;
    finish_manual(session, history, lang, no_save)
}

fn print_resolution(session: &ScanSession, lang: Language) {
    if let Some(resolution) = session.resolution() {
        println!(
            "{}",
            render::render_verdict(&resolution.category_name, &resolution.verdict, lang)
        );
    }
}

fn history_unavailable(e: &baggage_check_common::Error) {
    warn!(error = %e, "history read failed");
    eprintln!("⚠ {}", e);
}

/// Storage problems never hide the verdict; they are reported and skipped
fn save(session: &mut ScanSession, history: &History, lang: Language) {
    match session.persist(history) {
        Ok(PersistOutcome::Saved(record)) => println!("\n✔ {} ({})", SAVED.get(lang), record.id),
        Ok(PersistOutcome::AlreadyPersisted(_)) => {}
        Err(e) => {
            warn!(error = %e, "history write failed");
            eprintln!("\n⚠ {}: {}", NOT_SAVED.get(lang), e);
        }
    }
}
