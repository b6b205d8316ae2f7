//! ratatui widget that draws a [`PieChart`] on a braille canvas with a legend.

use super::{polar, PieChart};
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph, Widget,
    },
};

/// Legend column width in cells
const LEGEND_WIDTH: u16 = 40;

/// Braille dots per terminal cell
const DOTS_X: u16 = 2;
const DOTS_Y: u16 = 4;

/// Chart y-range is `[-Y_EXTENT, Y_EXTENT]`; the pie has radius 1.
const Y_EXTENT: f64 = 1.35;

pub struct PieChartWidget<'a> {
    chart: &'a PieChart,
    theme: &'a Theme,
}

impl<'a> PieChartWidget<'a> {
    pub fn new(chart: &'a PieChart, theme: &'a Theme) -> Self {
        Self { chart, theme }
    }
}

impl Widget for PieChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(Line::styled(format!(" {} ", self.chart.title), self.theme.title_style()).centered())
            .title_bottom(Line::styled(" q / Esc / Enter to close ", self.theme.muted_style()).centered());
        let inner = block.inner(area);
        block.render(area, buf);

        let legend_width = LEGEND_WIDTH.min(inner.width / 2);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(legend_width)])
            .split(inner);

        render_pie(self.chart, self.theme, chunks[0], buf);
        render_legend(self.chart, self.theme, chunks[1], buf);
    }
}

/// X bounds that keep the pie circular, given that a terminal cell is about
/// twice as tall as it is wide.
pub fn aspect_x_extent(area: Rect) -> f64 {
    if area.height == 0 {
        return Y_EXTENT;
    }
    Y_EXTENT * f64::from(area.width) / (2.0 * f64::from(area.height))
}

/// Sample the canvas at braille resolution and bucket every dot inside the
/// unit circle into the slice that covers it.
fn slice_dots(chart: &PieChart, area: Rect, x_extent: f64) -> Vec<Vec<(f64, f64)>> {
    let mut dots = vec![Vec::new(); chart.slices.len()];
    let cols = area.width * DOTS_X;
    let rows = area.height * DOTS_Y;
    if cols == 0 || rows == 0 {
        return dots;
    }

    for row in 0..rows {
        let y = Y_EXTENT - (f64::from(row) + 0.5) / f64::from(rows) * 2.0 * Y_EXTENT;
        for col in 0..cols {
            let x = -x_extent + (f64::from(col) + 0.5) / f64::from(cols) * 2.0 * x_extent;
            if x * x + y * y > 1.0 {
                continue;
            }
            let angle = y.atan2(x).to_degrees();
            if let Some(i) = chart.slice_at(angle) {
                dots[i].push((x, y));
            }
        }
    }
    dots
}

fn render_pie(chart: &PieChart, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let x_extent = aspect_x_extent(area);
    let dots = slice_dots(chart, area, x_extent);

    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-Y_EXTENT, Y_EXTENT])
        .paint(|ctx| {
            for (i, coords) in dots.iter().enumerate() {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: theme.slice_color(i),
                });
            }
            ctx.layer();
            for slice in chart.slices.iter().filter(|s| s.sweep > 0.0) {
                let (px, py) = polar(0.6, slice.mid_angle());
                let text = slice.percentage_label();
                let offset = text.len() as f64 / 2.0 * (2.0 * x_extent / f64::from(area.width.max(1)));
                ctx.print(px - offset, py, Span::styled(text, theme.annotation_style()));

                let (lx, ly) = polar(1.15, slice.mid_angle());
                let label = slice.label();
                let shift = if lx < 0.0 {
                    label.len() as f64 * (2.0 * x_extent / f64::from(area.width.max(1)))
                } else {
                    0.0
                };
                ctx.print(lx - shift, ly, Span::styled(label, theme.label_style()));
            }
        })
        .render(area, buf);
}

fn render_legend(chart: &PieChart, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![Line::from("")];

    for (i, slice) in chart.slices.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(theme.slice_color(i))),
            Span::styled(format!("{:<15}", slice.label()), theme.label_style()),
            Span::styled(format!("{:>6}", slice.percentage_label()), theme.annotation_style()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", slice.value),
            theme.muted_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<17}", "Total"), theme.label_style()),
        Span::styled(chart.total.to_string(), theme.annotation_style()),
    ]));

    Paragraph::new(lines).render(area, buf);
}
