use std::sync::Arc;

use exam_core::model::{THEME_PREFERENCE_KEY, Theme};
use storage::repository::PreferencesRepository;
use tracing::warn;

use crate::error::PreferencesError;

/// Persists the light/dark theme choice.
#[derive(Clone)]
pub struct ThemeService {
    repo: Arc<dyn PreferencesRepository>,
}

impl ThemeService {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferencesRepository>) -> Self {
        Self { repo }
    }

    /// Stored theme, or dark when nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn load(&self) -> Result<Theme, PreferencesError> {
        let stored = self.repo.get_preference(THEME_PREFERENCE_KEY).await?;
        let theme = match stored {
            None => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(error = %err, "ignoring stored theme");
                Theme::default()
            }),
        };
        Ok(theme)
    }

    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn save(&self, theme: Theme) -> Result<(), PreferencesError> {
        self.repo
            .set_preference(THEME_PREFERENCE_KEY, theme.as_str())
            .await?;
        Ok(())
    }

    /// Persist and return the opposite of `current`.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` on storage failures.
    pub async fn toggle(&self, current: Theme) -> Result<Theme, PreferencesError> {
        let next = current.toggled();
        self.save(next).await?;
        Ok(next)
    }
}
