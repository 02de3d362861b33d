//! `visitcard` — terminal client for the visiting-card backend.
//!
//! # Usage
//!
//! ```text
//! visitcard --backend-url http://localhost:5000/api/ admin
//! visitcard card 684aefe36a00cc30f3dc019e
//! visitcard vcard 684aefe36a00cc30f3dc019e --out ~/Downloads
//! ```

mod app;
mod download;
mod editor;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use app::App;
use clap::{Parser, Subcommand};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use visitcard_client::{ApiConfig, BASE_URL_ENV, HttpBackend};
use visitcard_core::record::RecordId;
use visitcard_views::{ListFallback, ProfileState, ProfileView};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "visitcard", version, about = "Digital visiting cards from the terminal")]
struct Args {
  /// Base URL of the backend API, e.g. http://localhost:5000/api/.
  #[arg(long, env = BASE_URL_ENV, global = true)]
  backend_url: Option<String>,

  /// Show an error instead of the built-in sample cards when listing fails.
  #[arg(long, global = true)]
  no_demo_fallback: bool,

  /// Where the TUI modes write their logs.
  #[arg(long, value_name = "FILE", default_value = "visitcard.log", global = true)]
  log_file: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Manage cards: list, create, edit, delete, preview QR codes.
  Admin,
  /// Show one card, as a visitor would see it.
  Card {
    /// Record identifier.
    id: String,
  },
  /// Download one card's contact file without opening the TUI.
  Vcard {
    /// Record identifier.
    id: String,
    /// Directory to write the `.vcf` into.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out: PathBuf,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let Some(base_url) = args.backend_url.clone() else {
    bail!("no backend URL: pass --backend-url or set {BASE_URL_ENV}");
  };
  let backend = Arc::new(
    HttpBackend::new(ApiConfig { base_url }).context("configuring backend client")?,
  );
  let fallback = if args.no_demo_fallback {
    ListFallback::ShowError
  } else {
    ListFallback::SampleData
  };

  match args.command {
    Command::Vcard { id, out } => {
      init_tracing(None)?;
      download_vcard(backend, RecordId::new(id), &out).await
    }
    Command::Admin => {
      init_tracing(Some(&args.log_file))?;
      let mut app = App::new(backend, fallback);
      app.start_admin();
      run_tui(&mut app).await
    }
    Command::Card { id } => {
      init_tracing(Some(&args.log_file))?;
      let mut app = App::new(backend, fallback);
      app.start_profile(RecordId::new(id));
      run_tui(&mut app).await
    }
  }
}

/// Logs go to stderr, or to `log_file` when the terminal belongs to the TUI.
fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();

  match log_file {
    Some(path) => {
      let file = File::create(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    }
    None => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    }
  }
  Ok(())
}

// ─── Non-interactive download ─────────────────────────────────────────────────

async fn download_vcard(
  backend: Arc<HttpBackend>,
  id: RecordId,
  out: &std::path::Path,
) -> Result<()> {
  let mut view = ProfileView::new();
  let visit = view.open(&backend, id.clone()).await;

  let result = match view.state() {
    ProfileState::Populated(_) => match view.contact_file() {
      Some(file) => {
        let file = file.context("generating contact file")?;
        let path = download::save(file, out)?;
        println!("{}", path.display());
        Ok(())
      }
      None => Err(anyhow::anyhow!("no card loaded")),
    },
    ProfileState::NotFound => Err(anyhow::anyhow!("card {id} not found")),
    ProfileState::Error(msg) => Err(anyhow::anyhow!("{msg}")),
    ProfileState::Idle | ProfileState::Loading => {
      Err(anyhow::anyhow!("no card identifier given"))
    }
  };

  // Give the visit a moment to land before the process exits; its outcome is
  // already logged by the task itself.
  if let Some(visit) = visit {
    let _ = tokio::time::timeout(Duration::from_secs(2), visit).await;
  }
  result
}

// ─── TUI ──────────────────────────────────────────────────────────────────────

async fn run_tui(app: &mut App<HttpBackend>) -> Result<()> {
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<HttpBackend>,
) -> Result<()> {
  loop {
    app.drain_events();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for a key, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}
