use crate::app::{Action, App};
use crate::catalog::Catalog;
use crate::cli::CliAction;
use crate::clipboard::SystemClipboard;
use crate::config::Settings;
use crate::executor::{ExecEvent, SimulatedBackend, handle_executions};
use crate::runtime::Runtime;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

mod app;
mod catalog;
mod cli;
mod clipboard;
mod config;
mod console;
mod execution;
mod executor;
mod handler;
mod logging;
mod runtime;
mod tracking;
mod ui;

#[cfg(test)]
mod tests;

const POLL_INTERVAL: Duration = Duration::from_millis(16);
const TICK_RATE: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\nRun 'coreapi --help' for usage.", e);
            std::process::exit(2);
        }
    };

    match args.action {
        CliAction::Help => {
            cli::print_help();
            return Ok(());
        }
        CliAction::Version => {
            cli::print_version();
            return Ok(());
        }
        _ => {}
    }

    let mut settings = Settings::load(args.config.as_deref())?;
    if args.catalog.is_some() {
        settings.catalog = args.catalog.clone();
    }
    if args.no_track {
        settings.auto_track = false;
    }

    logging::init(&settings)?;
    log::info!("coreapi {} starting", env!("CARGO_PKG_VERSION"));

    let catalog = match &settings.catalog {
        Some(path) => Catalog::load_from_file(path)?,
        None => Catalog::bundled()?,
    };
    log::info!("loaded {} endpoints", catalog.len());

    match args.action {
        CliAction::List => {
            cli::print_catalog(&catalog);
            Ok(())
        }
        CliAction::Call(key) => {
            let code = cli::call(&catalog, &settings, &key).await;
            std::process::exit(code);
        }
        _ => run_tui(catalog, settings).await,
    }
}

async fn run_tui(catalog: Catalog, settings: Settings) -> color_eyre::Result<()> {
    let (exec_tx, exec_rx) = mpsc::channel(32);
    let (event_tx, mut event_rx) = mpsc::channel::<ExecEvent>(32);

    let backend = Arc::new(SimulatedBackend::new(
        settings.execute_delay(),
        settings.latency_range(),
    ));
    let limit = settings.request_timeout();
    tokio::spawn(async move {
        handle_executions(exec_rx, event_tx, backend, limit).await;
    });

    ui::syntax::init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let cells = console::CellMetrics::new(settings.cell_width, settings.cell_height);
    let mut app = App::new(
        catalog,
        &settings,
        ui::main_viewport(&cells, size.width, size.height),
    );
    let mut runtime = Runtime::new(exec_tx, SystemClipboard::default());

    let result = event_loop(&mut terminal, &mut app, &mut runtime, &mut event_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("terminal loop failed: {}", e);
    }
    log::info!("shutting down");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &mut Runtime<SystemClipboard>,
    event_rx: &mut mpsc::Receiver<ExecEvent>,
) -> color_eyre::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if last_tick.elapsed() >= TICK_RATE {
            runtime.dispatch(app, Action::Tick(Instant::now()));
            last_tick = Instant::now();
        }

        while let Ok(ExecEvent::Completed { id, outcome }) = event_rx.try_recv() {
            runtime.dispatch(app, Action::Settle { id, outcome });
        }

        if event::poll(POLL_INTERVAL)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handler::key_action(key, app)
                }
                Event::Mouse(mouse) => handler::mouse_action(mouse, app),
                Event::Resize(cols, rows) => {
                    Some(Action::ViewportResized(ui::main_viewport(&app.cells, cols, rows)))
                }
                _ => None,
            };
            if let Some(action) = action {
                runtime.dispatch(app, action);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
