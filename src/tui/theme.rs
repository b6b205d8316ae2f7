//! Color theme for the interactive chart view.

use crate::chart::SLICE_COLORS;
use ratatui::style::{Color, Modifier, Style};

/// Zen minimalist color scheme for the chart view
pub struct Theme {
    /// Accent color for the title and border
    pub primary: Color,
    /// Muted color for hints and raw values
    pub muted: Color,
    /// Text color for labels
    pub text: Color,
    /// Slice fills, one per module in report order
    pub slices: [Color; 4],
}

impl Theme {
    /// Create the default theme, sharing slice colors with the SVG export
    pub fn default_theme() -> Self {
        Self {
            primary: Color::Cyan,
            muted: Color::DarkGray,
            text: Color::White,
            slices: SLICE_COLORS.map(|(r, g, b)| Color::Rgb(r, g, b)),
        }
    }

    /// Fill color for the slice at `index`, cycling if there are more slices
    /// than colors
    pub fn slice_color(&self, index: usize) -> Color {
        self.slices[index % self.slices.len()]
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Style for module names
    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for percentage annotations
    pub fn annotation_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
