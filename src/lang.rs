//! Locale selection.
//!
//! The page ships in three languages. The active locale persists across
//! visits under the `"locale"` storage key; switching notifies the rest of
//! the page over the event bus. The translation tables themselves are
//! loaded elsewhere (CSV files in the shell) and reached through the
//! [`Translations`] interface.

use std::fmt;

use strum_macros::EnumIter;

use crate::context::{EventBus, PageEvent};
use crate::storage::Storage;

/// Storage key for the persisted locale.
pub const LOCALE_KEY: &str = "locale";

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum Locale {
    /// 简体中文
    #[default]
    ZhCn,
    /// 繁體中文
    ZhMo,
    /// English
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-cn",
            Locale::ZhMo => "zh-mo",
            Locale::En => "en",
        }
    }

    /// The name shown in the language selector.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::ZhCn => "简体中文",
            Locale::ZhMo => "繁體中文",
            Locale::En => "English",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "zh-cn" => Some(Locale::ZhCn),
            "zh-mo" => Some(Locale::ZhMo),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Lookup into the translation tables the shell loads from CSV.
pub trait Translations {
    /// A value from the named table, e.g. `("languages", "web.title")`.
    fn lookup(&self, table: &str, key: &str, locale: Locale) -> Option<String>;
}

/// App-scoped language state.
pub struct LanguageContext {
    locale: Locale,
    bus: EventBus,
}

impl LanguageContext {
    /// Restores the persisted locale, defaulting to Simplified Chinese.
    pub fn load(storage: &dyn Storage, bus: EventBus) -> Self {
        let locale = storage
            .get(LOCALE_KEY)
            .and_then(|code| Locale::from_code(&code))
            .unwrap_or_default();
        Self { locale, bus }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switches the active locale by code. Unsupported codes are a warn and
    /// a no-op. A successful switch persists the locale and notifies
    /// subscribers.
    pub fn switch(&mut self, code: &str, storage: &mut dyn Storage) -> bool {
        let Some(locale) = Locale::from_code(code) else {
            log::warn!("unsupported locale: {code}");
            return false;
        };

        self.locale = locale;
        storage.set(LOCALE_KEY, locale.code());
        self.bus.emit(PageEvent::LocaleChanged { locale });
        true
    }

    /// The localized document title, when the translation table has one.
    pub fn page_title(&self, translations: &dyn Translations) -> Option<String> {
        translations.lookup("languages", "web.title", self.locale)
    }
}
