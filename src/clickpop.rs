//! The click-to-reveal text feature.
//!
//! Clicking the page reveals one short localized text at a time. The texts
//! come from the shell's translation tables (keys `pop.1`, `pop.2`, ...);
//! the reveal order starts at a random index fixed when the page loads and
//! then cycles strictly sequentially with wraparound. Switching locale
//! re-resolves the list but keeps the position in the cycle fresh.

use rand::Rng;

use crate::lang::{Locale, Translations};

/// Translation table the pop texts live in.
pub const POP_TABLE: &str = "ClickPopText";

const PROMPT_INITIAL: &str = "点击开始";
const PROMPT_READY: &str = "点击开始探索";
const NO_CONTENT: &str = "暂无内容";

/// App-scoped click-text state.
pub struct ClickPopContext {
    texts: Vec<String>,
    /// Index of the text currently shown; `None` before the first click.
    current: Option<usize>,
    /// Fixed for the lifetime of the page once chosen.
    start_index: Option<usize>,
    initialized: bool,
    text: String,
}

impl Default for ClickPopContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickPopContext {
    /// Idle until the first click; the start index is drawn at random once
    /// the texts are loaded.
    pub fn new() -> Self {
        Self {
            texts: Vec::new(),
            current: None,
            start_index: None,
            initialized: false,
            text: PROMPT_INITIAL.to_string(),
        }
    }

    /// Like [`ClickPopContext::new`], but with a fixed start index instead
    /// of a random one.
    pub fn with_start_index(start_index: usize) -> Self {
        Self {
            start_index: Some(start_index),
            ..Self::new()
        }
    }

    /// The text the page should currently show.
    pub fn current_text(&self) -> &str {
        &self.text
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Loads the texts for the given locale. Idempotent.
    pub fn init(&mut self, translations: &dyn Translations, locale: Locale) {
        if self.initialized {
            return;
        }
        self.reload(translations, locale);
        self.initialized = true;
    }

    /// Re-resolves the text list, typically from a `LocaleChanged`
    /// notification. Before initialization there is nothing to re-resolve.
    pub fn on_locale_changed(&mut self, translations: &dyn Translations, locale: Locale) {
        if !self.initialized {
            log::warn!("pop texts not loaded yet, locale switch ignored");
            return;
        }
        self.reload(translations, locale);
    }

    /// Advances the cycle. The first effective click shows the start-index
    /// text; every later click shows the next one, wrapping around.
    pub fn handle_click(&mut self, translations: &dyn Translations, locale: Locale) {
        if !self.initialized {
            self.init(translations, locale);
            return;
        }
        if self.texts.is_empty() {
            self.text = NO_CONTENT.to_string();
            return;
        }

        let index = match self.current {
            None => self.start_index.unwrap_or(0),
            Some(current) => (current + 1) % self.texts.len(),
        };
        self.current = Some(index);
        self.text = self.texts[index].clone();
    }

    fn reload(&mut self, translations: &dyn Translations, locale: Locale) {
        self.texts = load_texts(translations, locale);

        // The start index survives reloads unless the new list is too short.
        let stale = self
            .start_index
            .is_none_or(|start| start >= self.texts.len());
        if stale {
            self.start_index = Some(if self.texts.is_empty() {
                0
            } else {
                rand::rng().random_range(0..self.texts.len())
            });
        }

        self.current = None;
        self.text = if self.texts.is_empty() {
            NO_CONTENT.to_string()
        } else {
            PROMPT_READY.to_string()
        };
    }
}

/// Collects `pop.1`, `pop.2`, ... from the table until a key is missing,
/// dropping blank entries.
fn load_texts(translations: &dyn Translations, locale: Locale) -> Vec<String> {
    let mut texts = Vec::new();
    for n in 1.. {
        let Some(text) = translations.lookup(POP_TABLE, &format!("pop.{n}"), locale) else {
            break;
        };
        if !text.trim().is_empty() {
            texts.push(text);
        }
    }
    texts
}
