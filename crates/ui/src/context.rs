use std::sync::Arc;

use dioxus::prelude::*;
use exam_core::Clock;
use exam_core::model::{ExamCatalog, Theme};
use services::{ExamService, PracticeService, ThemeService, TutorService};

pub trait UiApp: Send + Sync {
    fn initial_theme(&self) -> Theme;
    fn clock(&self) -> Clock;
    fn catalog(&self) -> ExamCatalog;

    fn exam_service(&self) -> Arc<ExamService>;
    fn practice_service(&self) -> Arc<PracticeService>;
    fn tutor_service(&self) -> Arc<TutorService>;
    fn theme_service(&self) -> Arc<ThemeService>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_theme: Theme,
    clock: Clock,
    catalog: ExamCatalog,

    exam_service: Arc<ExamService>,
    practice_service: Arc<PracticeService>,
    tutor_service: Arc<TutorService>,
    theme_service: Arc<ThemeService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_theme: app.initial_theme(),
            clock: app.clock(),
            catalog: app.catalog(),
            exam_service: app.exam_service(),
            practice_service: app.practice_service(),
            tutor_service: app.tutor_service(),
            theme_service: app.theme_service(),
        }
    }

    /// Theme loaded at launch. The live value is the `ThemeSignal` context.
    #[must_use]
    pub fn initial_theme(&self) -> Theme {
        self.initial_theme
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn catalog(&self) -> &ExamCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn exam_service(&self) -> Arc<ExamService> {
        Arc::clone(&self.exam_service)
    }

    #[must_use]
    pub fn practice_service(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice_service)
    }

    #[must_use]
    pub fn tutor_service(&self) -> Arc<TutorService> {
        Arc::clone(&self.tutor_service)
    }

    #[must_use]
    pub fn theme_service(&self) -> Arc<ThemeService> {
        Arc::clone(&self.theme_service)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Current theme, shared by the root element and every toggle button.
#[derive(Clone, Copy, PartialEq)]
pub struct ThemeSignal(pub Signal<Theme>);

/// Provide the theme signal seeded from the launch value.
pub fn use_theme_provider() -> ThemeSignal {
    let ctx = use_context::<AppContext>();
    use_context_provider(|| ThemeSignal(Signal::new(ctx.initial_theme())))
}
