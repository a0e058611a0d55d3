//! Light/dark theme preference.
//!
//! At startup the theme is the explicit stored choice if there is one, else
//! the system color scheme, else light. Any stored value other than
//! `"dark"` is a choice of light. Toggling always records an explicit
//! choice, which then wins over the system preference on later runs.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use bazaar_core::Theme;

use crate::storage::{KeyValueStore, keys};

/// Class set on the document root while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

/// Toggle label while dark is active (offers switching to light).
pub const LABEL_WHEN_DARK: &str = "\u{2600}\u{fe0f}";

/// Toggle label while light is active (offers switching to dark).
pub const LABEL_WHEN_LIGHT: &str = "\u{1f319}";

/// Presentation state of the page root: its class list and the theme
/// toggle's label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRoot {
    classes: BTreeSet<String>,
    toggle_label: &'static str,
}

impl DocumentRoot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Space-separated class list, for a `class` attribute.
    #[must_use]
    pub fn class_list(&self) -> String {
        self.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        self.toggle_label
    }

    fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_owned());
        } else {
            self.classes.remove(class);
        }
    }
}

/// The active theme and whether the user chose it explicitly.
pub struct ThemePreference {
    theme: Theme,
    explicit: bool,
    storage: Rc<dyn KeyValueStore>,
}

impl fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreference")
            .field("theme", &self.theme)
            .field("explicit", &self.explicit)
            .finish_non_exhaustive()
    }
}

impl ThemePreference {
    /// Resolve the startup theme.
    ///
    /// A stored `"dark"` means dark and any other non-empty value means
    /// light. A missing, empty or unreadable value counts as no choice.
    #[must_use]
    pub fn resolve(storage: Rc<dyn KeyValueStore>, system: Option<Theme>) -> Self {
        let stored = match storage.get(keys::THEME) {
            Ok(raw) => raw.filter(|raw| !raw.is_empty()).map(|raw| {
                if raw == Theme::Dark.as_str() {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored theme");
                None
            }
        };

        let theme = stored.or(system).unwrap_or_default();
        tracing::debug!(%theme, explicit = stored.is_some(), ?system, "Theme resolved");

        Self {
            theme,
            explicit: stored.is_some(),
            storage,
        }
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the current theme came from a user choice.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Label for the toggle control.
    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        if self.theme.is_dark() {
            LABEL_WHEN_DARK
        } else {
            LABEL_WHEN_LIGHT
        }
    }

    /// Reflect the theme on `root`.
    pub fn apply(&self, root: &mut DocumentRoot) {
        root.set_class(DARK_CLASS, self.theme.is_dark());
        root.toggle_label = self.toggle_label();
    }

    /// Flip the theme and persist the new explicit choice.
    ///
    /// A failed write is logged; the in-memory theme still flips.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.flipped();
        self.explicit = true;

        if let Err(e) = self.storage.set(keys::THEME, self.theme.as_str()) {
            tracing::warn!(error = %e, "Failed to persist theme");
        }

        tracing::info!(theme = %self.theme, "Theme toggled");
        self.theme
    }
}
