//! Chart data and rendering through ratatui widgets
//!
//! Both charts are drawn into an off-screen [`Buffer`] of `width` x `height`
//! character cells and returned as text, so the binary decides where and how
//! to print them.

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        Axis, Bar, BarChart as BarWidget, BarGroup, Block, Chart, Dataset as ChartDataset,
        GraphType, Paragraph, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

/// Markers cycled through line chart series, with the glyph the legend shows
const SERIES_MARKERS: &[(Marker, char)] = &[
    (Marker::Dot, '•'),
    (Marker::Braille, '⣿'),
    (Marker::Block, '█'),
    (Marker::Bar, '▄'),
];

const SERIES_COLORS: &[Color] = &[
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

const NO_DATA: &str = "(no data)";

/// Categorical bar chart, each bar annotated with its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

impl BarChart {
    /// Text shown next to each bar
    pub fn annotations(&self) -> Vec<String> {
        self.values.iter().map(|v| v.to_string()).collect()
    }

    /// Render horizontal bars scaled to fit `width`
    ///
    /// Every bar gets its own row; the canvas grows past `height` when there
    /// are more bars than rows.
    pub fn render(&self, width: u16, height: u16) -> String {
        let block = Block::default().title(self.title.as_str());

        if self.values.is_empty() {
            return render_to_text(Paragraph::new(NO_DATA).block(block), width, height);
        }

        let bars: Vec<Bar> = self
            .labels
            .iter()
            .zip(&self.values)
            .zip(self.annotations())
            .map(|((label, value), text)| {
                Bar::default()
                    .label(Line::from(label.as_str()))
                    .value(*value as u64)
                    .text_value(text)
            })
            .collect();

        // title row plus one row per bar
        let rows = u16::try_from(bars.len())
            .unwrap_or(u16::MAX)
            .saturating_add(1)
            .max(height);

        let widget = BarWidget::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars));

        render_to_text(widget, width, rows)
    }
}

/// One line of a [`LineChart`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub label: String,
    pub values: Vec<usize>,
}

/// Daily multi-series line chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChart {
    pub title: String,
    pub x: Vec<NaiveDate>,
    pub series: Vec<Series>,
}

impl LineChart {
    /// Render the series as lines over a day axis with a legend
    pub fn render(&self, width: u16, height: u16) -> String {
        let block = Block::default().title(self.title.as_str());

        let (Some(first), Some(last)) = (self.x.first(), self.x.last()) else {
            return render_to_text(Paragraph::new(NO_DATA).block(block), width, height);
        };
        if self.series.is_empty() {
            return render_to_text(Paragraph::new(NO_DATA).block(block), width, height);
        }

        let points: Vec<Vec<(f64, f64)>> = self
            .series
            .iter()
            .map(|s| {
                s.values
                    .iter()
                    .enumerate()
                    .map(|(day, value)| (day as f64, *value as f64))
                    .collect()
            })
            .collect();

        let datasets: Vec<ChartDataset> = self
            .series
            .iter()
            .zip(&points)
            .enumerate()
            .map(|(n, (series, data))| {
                let (marker, glyph) = SERIES_MARKERS[n % SERIES_MARKERS.len()];
                ChartDataset::default()
                    .name(format!("{glyph} {}", series.label))
                    .marker(marker)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(SERIES_COLORS[n % SERIES_COLORS.len()]))
                    .data(data)
            })
            .collect();

        let max = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0)
            .max(1);

        // a single day still needs a non-empty x range
        let (x_end, x_labels) = if self.x.len() == 1 {
            (1.0, vec![first.to_string(), String::new()])
        } else {
            ((self.x.len() - 1) as f64, vec![first.to_string(), last.to_string()])
        };

        let widget = Chart::new(datasets)
            .block(block)
            .x_axis(Axis::default().bounds([0.0, x_end]).labels(x_labels))
            .y_axis(
                Axis::default()
                    .bounds([0.0, max as f64])
                    .labels(["0".to_string(), max.to_string()]),
            )
            .hidden_legend_constraints((Constraint::Percentage(100), Constraint::Percentage(100)));

        render_to_text(widget, width, height)
    }
}

fn render_to_text(widget: impl Widget, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_text(&buf)
}

/// Buffer rows as lines, with trailing blanks and empty bottom rows trimmed
fn buffer_text(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width).max(1);

    let mut lines: Vec<String> = buf
        .content
        .chunks(width)
        .map(|row| {
            let mut line = String::new();
            // cells covered by the previous wide symbol
            let mut covered = 0;
            for cell in row {
                if covered > 0 {
                    covered -= 1;
                    continue;
                }
                let symbol = cell.symbol();
                covered = symbol.width().saturating_sub(1);
                line.push_str(symbol);
            }
            line.trim_end().to_string()
        })
        .collect();

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.into_iter().map(|l| l + "\n").collect()
}
