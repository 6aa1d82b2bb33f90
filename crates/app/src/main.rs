use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::model::{ExamCatalog, Theme};
use services::{
    AppServices, Clock, DashboardConfig, ExamService, PracticeService, ThemeService, TutorService,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTimeBudget { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTimeBudget { raw } => {
                write!(f, "invalid --time-budget value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    theme: Theme,
}

impl UiApp for DesktopApp {
    fn initial_theme(&self) -> Theme {
        self.theme
    }

    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn catalog(&self) -> ExamCatalog {
        self.services.catalog().clone()
    }

    fn exam_service(&self) -> Arc<ExamService> {
        self.services.exam()
    }

    fn practice_service(&self) -> Arc<PracticeService> {
        self.services.practice()
    }

    fn tutor_service(&self) -> Arc<TutorService> {
        self.services.tutor()
    }

    fn theme_service(&self) -> Arc<ThemeService> {
        self.services.theme()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  exam-dashboard [--db <sqlite_url>] [--question-api <url>] [--chat-api <url>] \
         [--time-budget <secs>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://exam-dashboard.sqlite3");
    eprintln!("  --question-api http://127.0.0.1:3000/questions");
    eprintln!("  --chat-api http://127.0.0.1:3000/chat");
    eprintln!("  --time-budget 5400");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_DB_URL, EXAM_QUESTION_API_URL, EXAM_CHAT_API_URL, EXAM_TIME_BUDGET_SECS,");
    eprintln!("  EXAM_FETCH_STRATEGY (joined|per-domain), EXAM_FLAGGING, EXAM_DOMAIN_PROGRESS,");
    eprintln!("  RUST_LOG (default: info)");
}

enum Parsed {
    Run(DashboardConfig),
    Help,
}

/// Flags override whatever `DashboardConfig::from_env` produced.
fn parse_args(
    args: &mut impl Iterator<Item = String>,
    mut config: DashboardConfig,
) -> Result<Parsed, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                config.db_url = value;
            }
            "--question-api" => config.question_api_url = require_value(args, "--question-api")?,
            "--chat-api" => config.chat_api_url = require_value(args, "--chat-api")?,
            "--time-budget" => {
                let value = require_value(args, "--time-budget")?;
                config.time_budget_secs = value
                    .trim()
                    .parse()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ArgsError::InvalidTimeBudget { raw: value })?;
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    config.db_url = normalize_sqlite_url(config.db_url);
    Ok(Parsed::Run(config))
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match parse_args(&mut args, DashboardConfig::from_env()) {
        Ok(Parsed::Run(config)) => config,
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    // Open + migrate SQLite at startup so the UI only ever sees ready services.
    prepare_sqlite_file(&config.db_url)?;
    let services = AppServices::new_sqlite(&config, Clock::default_clock()).await?;
    let theme = services.theme().load().await.unwrap_or_else(|err| {
        warn!(error = %err, "falling back to default theme");
        Theme::default()
    });
    info!(
        db = %config.db_url,
        question_api = %config.question_api_url,
        chat_api = %config.chat_api_url,
        time_budget_secs = config.time_budget_secs,
        "starting exam dashboard"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services, theme });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Exam Prep Dashboard")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
