use std::f64::consts::PI;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Bar, BarChart, BarGroup, Block, Borders, Paragraph,
    },
    Frame,
};

use super::App;
use crate::calc::{self, Summary};

/// Deterministic bar palette, cycled when subjects outnumber it.
const PALETTE: [Color; 5] = [
    Color::Rgb(255, 153, 153),
    Color::Rgb(102, 179, 255),
    Color::Rgb(153, 255, 153),
    Color::Rgb(255, 204, 153),
    Color::Rgb(194, 194, 240),
];

const PASS_COLOR: Color = Color::Rgb(102, 179, 255);
const FAIL_COLOR: Color = Color::Rgb(255, 153, 153);

pub(super) fn render(f: &mut Frame, area: Rect, app: &App) {
    // Aggregations assume a non-empty snapshot; guard it here.
    let Some(summary) = calc::summarize(&app.students) else {
        let empty = Paragraph::new("No data available. Go to the 'Add Student' tab to insert data.")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Performance Dashboard"),
            );
        f.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    draw_metrics(f, chunks[0], &summary);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_subject_bars(f, charts[0], &summary);
    draw_pass_fail_pie(f, charts[1], &summary);
}

fn draw_metrics(f: &mut Frame, area: Rect, summary: &Summary) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    metric(f, cells[0], "Total Students", summary.total_students.to_string());
    metric(f, cells[1], "Average Marks", format!("{:.2}", summary.average_marks));
    metric(f, cells[2], "Top Scorer", summary.top_scorer.clone());
    metric(f, cells[3], "Pass Percentage", format!("{:.2}%", summary.pass_percentage));
}

fn metric(f: &mut Frame, area: Rect, title: &str, value: String) {
    let widget = Paragraph::new(Line::from(value))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

fn draw_subject_bars(f: &mut Frame, area: Rect, summary: &Summary) {
    let bars: Vec<Bar> = summary
        .subject_averages
        .iter()
        .enumerate()
        .map(|(i, (subject, avg))| {
            Bar::default()
                .label(Line::from(subject.clone()))
                .value(avg.round() as u64)
                .text_value(format!("{avg:.1}"))
                .style(Style::default().fg(PALETTE[i % PALETTE.len()]))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Average Marks per Subject"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1)
        .max(100);
    f.render_widget(chart, area);
}

fn draw_pass_fail_pie(f: &mut Frame, area: Rect, summary: &Summary) {
    let total = (summary.pass_count + summary.fail_count) as f64;
    let pass_fraction = summary.pass_count as f64 / total;
    let pass_pct = 100.0 * pass_fraction;
    let fail_pct = 100.0 - pass_pct;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Pass vs Fail Ratio"),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([-1.8, 1.8])
        .y_bounds([-1.2, 1.2])
        .paint(move |ctx| {
            // Filled disc sampled on a polar grid, split at the pass angle.
            // Starts at 12 o'clock and sweeps counter-clockwise.
            let mut pass_points = Vec::new();
            let mut fail_points = Vec::new();
            for step in 0..720 {
                let fraction = step as f64 / 720.0;
                let theta = PI / 2.0 + fraction * 2.0 * PI;
                for r_step in 1..=40 {
                    let r = r_step as f64 / 40.0;
                    let point = (r * theta.cos(), r * theta.sin());
                    if fraction < pass_fraction {
                        pass_points.push(point);
                    } else {
                        fail_points.push(point);
                    }
                }
            }
            ctx.draw(&Points {
                coords: &pass_points,
                color: PASS_COLOR,
            });
            ctx.draw(&Points {
                coords: &fail_points,
                color: FAIL_COLOR,
            });
            ctx.print(
                1.1,
                0.5,
                Line::styled(
                    format!("Pass {pass_pct:.1}%"),
                    Style::default().fg(PASS_COLOR),
                ),
            );
            ctx.print(
                1.1,
                -0.5,
                Line::styled(
                    format!("Fail {fail_pct:.1}%"),
                    Style::default().fg(FAIL_COLOR),
                ),
            );
        });
    f.render_widget(canvas, area);
}
