//! Status text localization
//!
//! Fluent (FTL) bundles; Spanish and English ship embedded.

use super::StatusMessage;
use crate::config::PickupConfig;
use crate::error::LocalizationError;
use fluent::{FluentArgs, FluentBundle, FluentMessage, FluentResource, FluentValue};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

const DEFAULT_LOCALE: &str = "es-ES";

const BUILTIN_FTL: &[(&str, &str)] = &[
    ("es-ES", include_str!("../../locales/es-ES.ftl")),
    ("en-US", include_str!("../../locales/en-US.ftl")),
];

pub struct StatusLocalizer {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    current_locale: String,
    fallback_locale: String,
}

impl Default for StatusLocalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLocalizer {
    /// Empty localizer; `format` falls back to "[key]" until bundles load.
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
            current_locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Localizer with the embedded Spanish and English bundles.
    pub fn with_builtin() -> Result<Self, LocalizationError> {
        let mut localizer = Self::new();
        for (locale, content) in BUILTIN_FTL {
            localizer.load_locale(locale, content)?;
        }
        Ok(localizer)
    }

    /// Built-in bundles, overrides from `config.locales_dir`, then the best
    /// match for `config.locale` selected.
    pub fn for_config(config: &PickupConfig) -> Result<Self, LocalizationError> {
        let mut localizer = Self::with_builtin()?;
        if let Some(dir) = &config.locales_dir {
            localizer.load_from_dir(dir)?;
        }
        let locale = localizer.negotiate_locale(&[config.locale.as_str()]);
        localizer.set_locale(&locale)?;
        Ok(localizer)
    }

    /// Load every `<locale>.ftl` in `dir`, replacing a bundle of the same
    /// locale. Returns the locales loaded.
    pub fn load_from_dir(&mut self, dir: &Path) -> Result<Vec<String>, LocalizationError> {
        let mut loaded = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("ftl") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(&path)?;
            self.load_locale(locale, &content)?;
            log::debug!("Loaded status messages for {} from {}", locale, path.display());
            loaded.push(locale.to_string());
        }
        loaded.sort();
        Ok(loaded)
    }

    pub fn load_locale(&mut self, locale: &str, ftl_content: &str) -> Result<(), LocalizationError> {
        let resource = FluentResource::try_new(ftl_content.to_string())
            .map_err(|(_, errors)| LocalizationError::Parse(format!("{:?}", errors)))?;

        let lang_id: LanguageIdentifier = locale
            .parse()
            .map_err(|_| LocalizationError::InvalidLocale(locale.to_string()))?;

        let mut bundle = FluentBundle::new(vec![lang_id]);
        // Plain-text output: no bidi isolation marks around arguments
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| LocalizationError::Parse(format!("{:?}", errors)))?;

        self.bundles.insert(locale.to_string(), bundle);
        Ok(())
    }

    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    pub fn set_locale(&mut self, locale: &str) -> Result<(), LocalizationError> {
        if !self.bundles.contains_key(locale) {
            return Err(LocalizationError::NotLoaded(locale.to_string()));
        }
        self.current_locale = locale.to_string();
        Ok(())
    }

    /// Pick the best loaded locale for the requested ones.
    pub fn negotiate_locale(&self, requested: &[&str]) -> String {
        let available: Vec<LanguageIdentifier> =
            self.bundles.keys().filter_map(|k| k.parse().ok()).collect();
        let requested: Vec<LanguageIdentifier> =
            requested.iter().filter_map(|l| l.parse().ok()).collect();
        let default: Option<LanguageIdentifier> = self.fallback_locale.parse().ok();

        let negotiated = negotiate_languages(
            &requested,
            &available,
            default.as_ref(),
            NegotiationStrategy::Filtering,
        );

        negotiated.first().map(|l| l.to_string()).unwrap_or_else(|| self.fallback_locale.clone())
    }

    pub fn format(&self, key: &str, args: Option<HashMap<String, FluentValue>>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(message) = bundle.get_message(key) {
                return Self::format_pattern(bundle, message, args);
            }
        }

        if self.current_locale != self.fallback_locale {
            if let Some(bundle) = self.bundles.get(&self.fallback_locale) {
                if let Some(message) = bundle.get_message(key) {
                    return Self::format_pattern(bundle, message, args);
                }
            }
        }

        format!("[{}]", key)
    }

    fn format_pattern(
        bundle: &FluentBundle<FluentResource>,
        message: FluentMessage,
        args: Option<HashMap<String, FluentValue>>,
    ) -> String {
        let Some(pattern) = message.value() else {
            return String::new();
        };
        let mut errors = vec![];

        let fluent_args = args.map(|hash_args| {
            let mut fluent_args = FluentArgs::new();
            for (key, value) in hash_args {
                fluent_args.set(key, value);
            }
            fluent_args
        });

        let formatted = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            log::debug!("Fluent formatting errors: {:?}", errors);
        }
        formatted.to_string()
    }

    pub fn render(&self, message: &StatusMessage) -> String {
        self.format(message.key(), message.args())
    }
}
