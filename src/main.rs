use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use clap::ValueEnum;
use simplelog::{ConfigBuilder, WriteLogger};

use folio::LogLevel;
use folio::core::config::{self, CliOverrides, FolioConfig};
use folio::core::content::Document;
use folio::core::prefs::{JsonFileStore, MemoryStore, PreferenceStore};
use folio::core::state::Portfolio;
use folio::core::theme::Theme;
use folio::handoff::SystemOpener;
use folio::tui;

#[derive(Parser)]
#[command(name = "folio", about = "Terminal portfolio page")]
struct Args {
    /// Markdown file with the page content
    #[arg(short, long)]
    content: Option<std::path::PathBuf>,

    /// Theme used when no preference is stored (light or dark)
    #[arg(short, long)]
    theme: Option<Theme>,

    /// Log verbosity written to folio.log
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("folio: {e}; using defaults");
        FolioConfig::default()
    });
    let cli = CliOverrides {
        content_file: args.content,
        theme: args.theme,
        log_level: args
            .log_level
            .and_then(|l| l.to_possible_value())
            .map(|v| v.get_name().to_string()),
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - writes to folio.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = LogLevel::from_name(&resolved.log_level).unwrap_or_default();
    if let Ok(log_file) = File::create("folio.log") {
        let _ = WriteLogger::init(level.filter(), log_config, log_file);
    }

    // Restore the terminal before the default hook prints
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log::error!("Panic: {}", info);
        ratatui::restore();
        default_hook(info);
    }));

    log::info!("Folio starting up (theme default: {})", resolved.default_theme);

    let document = match &resolved.content_file {
        Some(path) => Document::load(path).unwrap_or_else(|e| {
            log::warn!("Could not load {}: {}; showing the sample page", path.display(), e);
            Document::sample()
        }),
        None => Document::sample(),
    };

    let prefs: Box<dyn PreferenceStore> = match JsonFileStore::default_path() {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => {
            log::warn!("No home directory; preferences will not persist");
            Box::new(MemoryStore::new())
        }
    };

    let app = Portfolio::from_config(document, prefs, &resolved);
    tui::run(app, Arc::new(SystemOpener))
}
