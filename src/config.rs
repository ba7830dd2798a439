use std::env;

use crate::domain::Language;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// The fixed set of languages offered to the form layer. Immutable for
    /// the lifetime of the process.
    pub languages: Vec<Language>,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://libris.db?mode=rwc".to_string());

        let languages = env::var("LANGUAGES")
            .ok()
            .map(|s| parse_languages(&s))
            .filter(|langs| !langs.is_empty())
            .unwrap_or_else(|| vec![Language::German, Language::English]);

        Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            languages,
        }
    }

    /// True if the given language may be used for new or updated books.
    pub fn is_language_allowed(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }
}

fn parse_languages(raw: &str) -> Vec<Language> {
    let mut languages = Vec::new();
    for code in raw.split(',') {
        match Language::parse(code) {
            Ok(language) => languages.push(language),
            Err(e) => tracing::warn!("Skipping LANGUAGES entry '{}': {}", code.trim(), e),
        }
    }
    languages
}
