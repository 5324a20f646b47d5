use std::io;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use typeahead_lab::app::{BackendFactory, LatencyLab};
use typeahead_lab::kernel::services::adapters::{load_settings, AsyncRuntime, SimulatedBackend};
use typeahead_lab::kernel::services::backend_bus;
use typeahead_lab::kernel::services::ports::SharedSearchHandler;
use typeahead_lab::tui::crossterm::into_input_event;
use typeahead_lab::tui::terminal_guard::{TerminalGuard, TerminalRestorer, TerminationSignal};

mod logging;

const MAX_POLL_TIMEOUT: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let mut logging = logging::init();
    let log_rx = logging.as_mut().and_then(|guard| guard.take_log_rx());

    let settings = load_settings();
    let runtime = AsyncRuntime::new()?;
    let (bus, backend_rx) = backend_bus();
    let executor = runtime.executor();
    let factory: BackendFactory = Box::new(move |profile| {
        let backend: SharedSearchHandler =
            Arc::new(SimulatedBackend::new(profile, executor.clone(), bus.clone()));
        backend
    });
    let mut lab = LatencyLab::new(&settings, factory, backend_rx, log_rx);

    let guard = TerminalGuard::new()?;
    install_panic_restore(guard.restorer());

    let (signal_tx, signal_rx) = mpsc::channel::<TerminationSignal>();
    #[cfg(unix)]
    let _signals =
        typeahead_lab::tui::terminal_guard::install_termination_signals(guard.restorer(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let result = run(&mut terminal, &mut lab, &signal_rx);

    lab.teardown();
    drop(terminal);
    drop(guard);
    if let Err(err) = &result {
        tracing::error!(error = %err, "lab exited with error");
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    lab: &mut LatencyLab,
    signal_rx: &Receiver<TerminationSignal>,
) -> io::Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                lab.render(frame, area);
            })?;
            dirty = false;
        }

        if let Ok(signal) = signal_rx.try_recv() {
            tracing::info!(target: "typeahead.lab", ?signal, "shutting down on signal");
            return Ok(());
        }

        let now = Instant::now();
        let timeout = lab
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(MAX_POLL_TIMEOUT)
            .min(MAX_POLL_TIMEOUT);

        if crossterm::event::poll(timeout)? {
            if let Some(event) = into_input_event(crossterm::event::read()?) {
                dirty |= lab.handle_input(event, Instant::now());
            }
        }
        dirty |= lab.tick(Instant::now());

        if lab.should_quit() {
            return Ok(());
        }
    }
}

fn install_panic_restore(restorer: TerminalRestorer) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restorer.restore();
        previous(info);
    }));
}
