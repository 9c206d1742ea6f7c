//! Interactive prompts
//!
//! Guided questions and category selection on the terminal.

use crate::error::{AppError, Result};
use baggage_check_common::{catalog, CategoryId, ItemCategory, Language, Localized, Question, ScanSession};
use dialoguer::{Confirm, Select};

const CHOOSE_GROUP: Localized = Localized::new("Kategorie-Gruppe wählen", "Choose a category group");
const CHOOSE_ITEM: Localized = Localized::new("Gegenstand wählen", "Choose the item");

/// Option labels of a question, in catalog order
pub fn option_labels(question: &Question, lang: Language) -> Vec<&'static str> {
    question.options.iter().map(|o| o.label.get(lang)).collect()
}

/// Groups with their categories, in catalog order
pub fn category_menu(lang: Language) -> Vec<(&'static str, Vec<&'static ItemCategory>)> {
    catalog::groups(lang)
        .into_iter()
        .map(|g| (g, catalog::in_group(g, lang)))
        .collect()
}

fn prompt_error(e: dialoguer::Error) -> AppError {
    AppError::Prompt(e.to_string())
}

/// Ask every unanswered question
///
/// Returns false when the user aborts (Esc/q); answers given so far stay.
pub fn answer_pending(session: &mut ScanSession, lang: Language) -> Result<bool> {
    while let Some(question) = session.pending_questions().first().copied() {
        let labels = option_labels(question, lang);
        let choice = Select::new()
            .with_prompt(question.text.get(lang))
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?;

        match choice {
            Some(idx) => session.set_answer(question.id, question.options[idx].value)?,
            None => return Ok(false),
        }
    }
    Ok(true)
}

/// Pick a category, group first
pub fn select_category(lang: Language) -> Result<Option<CategoryId>> {
    let menu = category_menu(lang);
    let groups: Vec<&str> = menu.iter().map(|(g, _)| *g).collect();

    let group = Select::new()
        .with_prompt(CHOOSE_GROUP.get(lang))
        .items(&groups)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?;
    let Some(group) = group else {
        return Ok(None);
    };

    let categories = &menu[group].1;
    let names: Vec<&str> = categories.iter().map(|c| c.name.get(lang)).collect();
    let item = Select::new()
        .with_prompt(CHOOSE_ITEM.get(lang))
        .items(&names)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?;

    Ok(item.map(|idx| categories[idx].id))
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(prompt_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_labels() {
        let q = catalog::category(CategoryId::BatterySpare).question("size").unwrap();
        let labels = option_labels(q, Language::En);
        assert_eq!(labels.len(), 3);
        assert!(labels[0].starts_with("Standard"));
    }

    #[test]
    fn test_category_menu_covers_catalog() {
        let menu = category_menu(Language::De);
        let total: usize = menu.iter().map(|(_, cs)| cs.len()).sum();
        assert_eq!(total, catalog::categories().len());
        assert_eq!(menu[0].0, "Batterien & Powerbanks");
    }
}
