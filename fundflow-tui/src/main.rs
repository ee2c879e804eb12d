use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fundflow_core::analysis::FundAnalyst;
use fundflow_core::catalog::FundRepository;
use fundflow_core::config::DashboardConfig;

use fundflow_tui::app::{AppState, ViewSettings};
use fundflow_tui::worker::{self, WorkerCommand};
use fundflow_tui::{input, ui};

#[derive(Parser)]
#[command(name = "fundflow-tui", version, about = "FundFlow terminal dashboard")]
struct Args {
    /// Path to a TOML config file. Defaults to the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let args = Args::parse();
    init_logging();

    let config = DashboardConfig::load(args.config.as_deref()).context("loading configuration")?;
    let catalog = config.open_catalog().context("opening fund catalog")?;
    let analyst =
        FundAnalyst::from_config(&config.analysis).context("building analysis client")?;

    let rng = config.rng.hierarchy();
    tracing::info!(
        master_seed = rng.master_seed(),
        funds = catalog.funds().len(),
        "starting dashboard"
    );

    let settings = ViewSettings {
        rng,
        history_length: config.history.length,
        trigger_time: config.intraday.trigger()?,
        end_date: chrono::Local::now().date_naive(),
        model: analyst.model().to_string(),
    };

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));

    let worker_handle = worker::spawn_worker(analyst, cmd_rx, resp_tx, cancel.clone())
        .context("spawning analysis worker")?;

    let mut app = AppState::new(catalog, settings, cmd_tx.clone(), resp_rx, cancel);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// The terminal belongs to the UI, so logs go to a file under the cache dir.
fn init_logging() {
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fundflow");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("fundflow-tui.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init();
}
