//! Chart rendering — one persistent deviation chart.
//!
//! ┌──────────────────────────────────────────────┐
//! │  aggwatch   exp7   cycle #42   118ms         │
//! ├──────────────────────────────────────────────┤
//! │ %│        ⢀⡠⠤⠒ average  stddev  count  ...   │
//! │ D│  ⡠⠔⠊⠉⠁⠁       sum  min  max               │
//! │ e│⠊⠁   ⣀⣀⠤⠤⠒⠒⠉⠉⠉                             │
//! │ v│⣀⠤⠒⠉⠁                                      │
//! │  └───────────────── Epoch ────────────────── │
//! ├──────────────────────────────────────────────┤
//! │  q: quit   p: pause   r: refresh now         │
//! └──────────────────────────────────────────────┘

use super::app::App;
use ratatui::{prelude::*, widgets::*};

/// One distinct color per tracked metric, in metric-set order.
const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

/// Fixed display range for both axes in live mode.
const LIVE_AXIS_MAX: f64 = 200.0;

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(10),   // chart
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_chart(f, rows[1], app);
    draw_keys(f, rows[2], app);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(" aggwatch ", Style::default().bold().fg(Color::Cyan)),
        Span::raw("  watching: "),
        Span::styled(app.title(), Style::default().bold().fg(Color::Yellow)),
    ];

    if app.is_live() {
        let cycle = app.cycle_count();
        let ms = app.last_cycle_ms();
        let paused = if app.is_paused() { "  ⏸ paused" } else { "" };
        spans.push(Span::styled(
            format!("  #{cycle}  {ms}ms{paused} "),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(err) = app.last_error() {
        spans.push(Span::styled(
            format!("  {err} "),
            Style::default().fg(Color::Red),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(spans));

    f.render_widget(block, area);
}

fn draw_chart(f: &mut Frame, area: Rect, app: &App) {
    let deviations = app.deviations();

    if deviations.epochs() == 0 {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", app.title()));
        let msg = if app.is_live() {
            "Waiting for the first parseable summary..."
        } else {
            "Summary file has no epochs"
        };
        let p = Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    // Chart data must outlive the datasets borrowing it.
    let points: Vec<(&'static str, Vec<(f64, f64)>)> = deviations
        .iter()
        .map(|(metric, series)| {
            let data = series
                .iter()
                .enumerate()
                .map(|(epoch, &dev)| (epoch as f64, dev))
                .collect();
            (metric.series_name(), data)
        })
        .collect();

    let datasets: Vec<Dataset> = points
        .iter()
        .zip(SERIES_COLORS)
        .map(|((name, data), color)| {
            Dataset::default()
                .name(*name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(data)
        })
        .collect();

    // Live mode keeps the display window fixed so the chart identity is
    // stable across refreshes; static mode scales to the data.
    let (x_max, y_max) = if app.is_live() {
        (LIVE_AXIS_MAX, LIVE_AXIS_MAX)
    } else {
        let max_dev = points
            .iter()
            .flat_map(|(_, data)| data.iter().map(|&(_, y)| y))
            .fold(0.0_f64, f64::max);
        let epochs = deviations.epochs() as f64;
        (epochs.max(10.0), (max_dev * 1.1).max(1.0))
    };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {}  {} epochs ", app.title(), deviations.epochs())),
        )
        .x_axis(
            Axis::default()
                .title("Epoch")
                .bounds([0.0, x_max])
                .labels(vec![Line::from("0"), Line::from(format!("{x_max:.0}"))]),
        )
        .y_axis(
            Axis::default()
                .title("% Deviation of Estimate vs Actual")
                .bounds([0.0, y_max])
                .labels(vec![Line::from("0"), Line::from(format!("{y_max:.0}"))]),
        );

    f.render_widget(chart, area);
}

fn draw_keys(f: &mut Frame, area: Rect, app: &App) {
    let text = if app.is_live() {
        " q: quit   p: pause   r: refresh now"
    } else {
        " q: quit"
    };
    let bar = Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
