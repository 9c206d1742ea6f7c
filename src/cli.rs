use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use baggage_check_common::Language;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "baggage-check")]
#[command(about = "Check whether an item may travel in hand or checked baggage", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output language for this run (de/en); defaults to the saved preference
    #[arg(long, global = true, value_parser = parse_language)]
    pub lang: Option<Language>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List item categories by group
    Categories,

    /// Check an item by category with guided questions
    Check {
        /// Category id (see `categories`)
        #[arg(required = true)]
        category: String,

        /// Pre-answer a question, e.g. --answer blade_size=long
        #[arg(short, long = "answer", value_parser = parse_answer)]
        answers: Vec<(String, String)>,

        /// Attach a photo to the saved record
        #[arg(short, long)]
        photo: Option<PathBuf>,

        /// Do not save the result to history
        #[arg(long)]
        no_save: bool,
    },

    /// Classify an item from a photo with the AI provider
    Scan {
        /// Photo of the item
        #[arg(required = true)]
        photo: PathBuf,

        /// Do not offer manual selection when the AI cannot decide
        #[arg(long)]
        no_fallback: bool,

        /// Override the configured AI provider
        #[arg(long)]
        ai_provider: Option<AiProvider>,

        /// Do not save the result to history
        #[arg(long)]
        no_save: bool,
    },

    /// Show or manage scan history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show or set the saved language (de/en)
    Lang {
        #[arg(value_parser = parse_language)]
        language: Option<Language>,
    },

    /// Show or edit configuration
    Config {
        /// Show configuration
        #[arg(long)]
        show: bool,

        /// Set the AI provider
        #[arg(long)]
        set_provider: Option<AiProvider>,

        /// Set the model passed to the AI provider ("" clears it)
        #[arg(long)]
        set_model: Option<String>,

        /// Set the classification timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,
    },
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    /// List saved scans, newest first
    List,
    /// Show one saved scan
    Show { id: String },
    /// Delete one saved scan
    Delete { id: String },
    /// Delete all saved scans
    Clear,
}

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse()
}

/// `key=value`
fn parse_answer(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() && !v.trim().is_empty() => {
            Ok((k.trim().to_string(), v.trim().to_string()))
        }
        _ => Err(format!("Expected key=value, got: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_answer("blade_size=long").unwrap(),
            ("blade_size".to_string(), "long".to_string())
        );
        assert!(parse_answer("blade_size").is_err());
        assert!(parse_answer("=long").is_err());
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::try_parse_from([
            "baggage-check", "--lang", "en", "check", "knife", "--answer", "blade_size=short",
        ])
        .unwrap();
        assert_eq!(cli.lang, Some(Language::En));
        match cli.command {
            Commands::Check { category, answers, no_save, .. } => {
                assert_eq!(category, "knife");
                assert_eq!(answers, vec![("blade_size".to_string(), "short".to_string())]);
                assert!(!no_save);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_history_default_action() {
        let cli = Cli::try_parse_from(["baggage-check", "history"]).unwrap();
        assert!(matches!(cli.command, Commands::History { action: None }));
        let cli = Cli::try_parse_from(["baggage-check", "history", "show", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::History { action: Some(HistoryAction::Show { .. }) }
        ));
    }

    #[test]
    fn test_invalid_language_rejected() {
        assert!(Cli::try_parse_from(["baggage-check", "lang", "fr"]).is_err());
    }
}
