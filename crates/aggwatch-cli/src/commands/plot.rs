use aggwatch_core::SummaryTable;

pub fn run(summary: &str, metrics: &str) {
    let metrics = super::parse_metrics(metrics);

    // Static mode fails hard: a summary handed over explicitly is expected
    // to parse.
    let table = match SummaryTable::load(summary, &metrics) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Cannot plot {summary}: {e}");
            std::process::exit(1);
        }
    };

    let mut app = crate::tui::app::App::static_chart(summary, metrics, table.deviations());
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
