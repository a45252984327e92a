use std::sync::atomic::Ordering;

use aggwatch_core::RefreshTrigger;

pub fn run(folder: &str, refresh: f64, dump_cmd: &str, summaries_dir: &str, metrics: &str) {
    let metrics = super::parse_metrics(metrics);
    let trigger = RefreshTrigger::new(dump_cmd, summaries_dir);
    let mut app = crate::tui::app::App::live(folder, metrics, trigger, refresh);

    // Ctrl-C flips the stop flag instead of killing the process mid-draw,
    // so the terminal is restored on the way out.
    let stop = app.stop_flag();
    if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed)) {
        log::warn!("could not install Ctrl-C handler: {e}");
    }

    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
