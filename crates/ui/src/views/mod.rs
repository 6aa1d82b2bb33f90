mod community;
mod dashboard;
mod exam;
mod results;
mod state;
mod theme;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use community::CommunityView;
pub use dashboard::DashboardView;
pub use exam::ExamView;
pub use results::ResultsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use theme::ThemeToggle;
