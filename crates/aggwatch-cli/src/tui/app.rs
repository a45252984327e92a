//! Chart application state and event loop.
//!
//! One `App` owns one chart for its whole lifetime — title, axes, and legend
//! never change after startup; only the series data does. In live mode the
//! app runs the monitor cycle in place: refresh the summary, re-parse it,
//! swap in the new deviation series wholesale, redraw. Everything inside a
//! cycle is strictly sequential; the dump command blocks the loop until it
//! exits.

use std::io;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use aggwatch_core::{DeviationSet, MetricSet, RefreshTrigger, SummaryTable};

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Static: chart once, wait for dismissal. Live: refresh/parse/redraw forever.
enum Mode {
    Static,
    Live {
        trigger: RefreshTrigger,
        folder: String,
        refresh_rate: Duration,
    },
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    title: String,
    metrics: MetricSet,
    mode: Mode,
    deviations: DeviationSet,
    cycle_count: u64,
    last_cycle_ms: u64,
    /// Last failed cycle's error, shown in the title bar until a cycle
    /// succeeds again.
    last_error: Option<String>,
    paused: bool,
    running: bool,
    stop: Arc<AtomicBool>,
}

impl App {
    /// One-shot chart over already-extracted series. Blocks until dismissed.
    pub fn static_chart(title: &str, metrics: MetricSet, deviations: DeviationSet) -> Self {
        Self {
            title: title.to_string(),
            metrics,
            mode: Mode::Static,
            deviations,
            cycle_count: 0,
            last_cycle_ms: 0,
            last_error: None,
            paused: false,
            running: true,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Live monitor for a dataset folder, regenerating the summary each cycle.
    pub fn live(folder: &str, metrics: MetricSet, trigger: RefreshTrigger, refresh_secs: f64) -> Self {
        Self {
            title: folder.to_string(),
            metrics,
            mode: Mode::Live {
                trigger,
                folder: folder.to_string(),
                refresh_rate: Duration::from_secs_f64(refresh_secs),
            },
            deviations: DeviationSet::default(),
            cycle_count: 0,
            last_cycle_ms: 0,
            last_error: None,
            paused: false,
            running: true,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// External cancellation hook; setting it ends the loop at the next tick.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn deviations(&self) -> &DeviationSet {
        &self.deviations
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn last_cycle_ms(&self) -> u64 {
        self.last_cycle_ms
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_live(&self) -> bool {
        matches!(self.mode, Mode::Live { .. })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Run one monitor cycle: refresh → parse → replace series.
    ///
    /// A failed refresh or parse skips the cycle — the previous series stay
    /// on screen and the error is surfaced until a later cycle succeeds.
    /// No-op in static mode.
    pub fn cycle(&mut self) {
        let Mode::Live { trigger, folder, .. } = &self.mode else {
            return;
        };
        let started = Instant::now();
        self.cycle_count += 1;

        let result = trigger
            .run(folder)
            .map_err(|e| format!("refresh failed: {e}"))
            .and_then(|path| {
                SummaryTable::load(&path, &self.metrics)
                    .map_err(|e| format!("{}: {e}", path.display()))
            });

        match result {
            Ok(table) => {
                // Wholesale replacement — the chart never sees an append.
                self.deviations = table.deviations();
                self.last_error = None;
            }
            Err(msg) => {
                log::warn!("cycle {} skipped: {msg}", self.cycle_count);
                self.last_error = Some(msg);
            }
        }
        self.last_cycle_ms = started.elapsed().as_millis() as u64;
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook(); // remove our hook
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        // First cycle immediately on loop entry; later ones wait out the pause.
        self.cycle();
        let mut last_tick = Instant::now();

        while self.running && !self.stop.load(Ordering::Relaxed) {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }

            let refresh_rate = match &self.mode {
                Mode::Live { refresh_rate, .. } => Some(*refresh_rate),
                Mode::Static => None,
            };
            if let Some(rate) = refresh_rate
                && last_tick.elapsed() >= rate
            {
                if !self.paused {
                    self.cycle();
                }
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('p') if self.is_live() => self.paused = !self.paused,
            KeyCode::Char('r') if self.is_live() => self.cycle(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const FULL_HEADER: &str = "Avegare (Estimated),Avegare (Actual),\
Stand. Deviation (Estimated),Stand. Deviation (Actual),\
Count (Estimated),Count (Actual),Sum (Estimated),Sum (Actual),\
Min (Estimated),Min (Actual),Max (Estimated),Max (Actual)";

    /// Write the file a scripted `cat`-based dump command will emit next
    /// cycle: banner, header, `rows` data rows.
    fn stage_dump(dir: &Path, rows: &[&str]) {
        let mut content = format!("banner1\nbanner2\nbanner3\n{FULL_HEADER}\n");
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(dir.join("staged.txt"), content).unwrap();
    }

    fn staged_app(dir: &Path) -> App {
        // `cat <staged> #` — the trailing comment absorbs the dump/<id>
        // argument the trigger appends.
        let cmd = format!("cat {} #", dir.join("staged.txt").display());
        let trigger = RefreshTrigger::new(cmd, dir.join("summaries"));
        App::live("exp", MetricSet::full(), trigger, 10.0)
    }

    // -----------------------------------------------------------------------
    // cycle tests
    // -----------------------------------------------------------------------

    #[test]
    fn cycle_replaces_series_wholesale_as_rows_grow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = staged_app(dir.path());

        stage_dump(dir.path(), &["10,20,1,1,1,1,1,1,1,1,1,1"]);
        app.cycle();
        assert_eq!(app.deviations().epochs(), 1);

        stage_dump(
            dir.path(),
            &[
                "10,20,1,1,1,1,1,1,1,1,1,1",
                "15,20,1,1,1,1,1,1,1,1,1,1",
                "20,20,1,1,1,1,1,1,1,1,1,1",
            ],
        );
        app.cycle();

        // Every series is the full current length — never an increment.
        assert_eq!(app.deviations().len(), 6);
        assert_eq!(app.deviations().epochs(), 3);
        for (_, series) in app.deviations().iter() {
            assert_eq!(series.len(), 3);
        }
        assert_eq!(app.cycle_count(), 2);
        assert!(app.last_error().is_none());
    }

    #[test]
    fn failed_parse_skips_cycle_and_keeps_previous_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = staged_app(dir.path());

        stage_dump(dir.path(), &["10,20,1,1,1,1,1,1,1,1,1,1"]);
        app.cycle();
        let before = app.deviations().clone();

        // Next dump is garbage: non-numeric field
        stage_dump(dir.path(), &["10,garbage,1,1,1,1,1,1,1,1,1,1"]);
        app.cycle();

        assert_eq!(app.deviations(), &before);
        assert!(app.last_error().is_some());

        // A good dump clears the error again
        stage_dump(dir.path(), &["10,20,1,1,1,1,1,1,1,1,1,1"]);
        app.cycle();
        assert!(app.last_error().is_none());
    }

    #[test]
    fn failed_refresh_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let trigger = RefreshTrigger::new("false", dir.path());
        let mut app = App::live("exp", MetricSet::full(), trigger, 10.0);

        app.cycle();
        assert!(app.last_error().unwrap().contains("refresh failed"));
        assert_eq!(app.deviations().epochs(), 0);
    }

    #[test]
    fn static_app_never_cycles() {
        let mut app = App::static_chart("file.dat", MetricSet::full(), DeviationSet::default());
        app.cycle();
        assert_eq!(app.cycle_count(), 0);
        assert!(!app.is_live());
    }

    #[test]
    fn stop_flag_is_shared() {
        let app = App::live(
            "exp",
            MetricSet::full(),
            RefreshTrigger::default(),
            10.0,
        );
        let flag = app.stop_flag();
        flag.store(true, Ordering::Relaxed);
        assert!(app.stop.load(Ordering::Relaxed));
    }
}
