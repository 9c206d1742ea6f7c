//! Persisted language preference

use crate::error::Result;
use crate::store::KeyValueStore;
use crate::types::Language;
use tracing::warn;

pub const LANGUAGE_KEY: &str = "zrh_language";

/// Stored language, `de` when absent, unreadable or unknown
pub fn load_language<S: KeyValueStore + ?Sized>(store: &S) -> Language {
    match store.get(LANGUAGE_KEY) {
        Ok(Some(code)) => code.parse().unwrap_or_default(),
        Ok(None) => Language::default(),
        Err(e) => {
            warn!(error = %e, "language preference unavailable");
            Language::default()
        }
    }
}

pub fn save_language<S: KeyValueStore + ?Sized>(store: &S, lang: Language) -> Result<()> {
    store.set(LANGUAGE_KEY, lang.code())
}
