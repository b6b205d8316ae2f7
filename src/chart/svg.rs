//! Standalone SVG export of a [`PieChart`].
//!
//! The image uses a square viewBox so the pie is drawn as a circle at any
//! display size.

use super::{polar, PieChart, PieSlice};
use crate::errors::{FlopmapError, Result};
use html_escape::encode_text;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct SvgConfig {
    /// Width and height of the viewBox
    pub size: f64,
    pub radius: f64,
    pub font_size: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            size: 600.0,
            radius: 180.0,
            font_size: 14.0,
        }
    }
}

pub struct SvgWriter {
    config: SvgConfig,
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self::new(SvgConfig::default())
    }
}

impl SvgWriter {
    pub fn new(config: SvgConfig) -> Self {
        Self { config }
    }

    fn center(&self) -> (f64, f64) {
        // leave room for the title above the pie
        let half = self.config.size / 2.0;
        (half, half + self.config.font_size)
    }

    /// Map chart coordinates (y up) to SVG coordinates (y down).
    fn to_screen(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let (cx, cy) = self.center();
        (cx + x, cy - y)
    }

    pub fn write<W: Write>(&self, chart: &PieChart, out: &mut W) -> std::io::Result<()> {
        let size = self.config.size;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        )?;
        writeln!(out, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            out,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="{:.0}" font-weight="bold">{}</text>"#,
            size / 2.0,
            self.config.font_size * 2.5,
            self.config.font_size * 1.3,
            encode_text(&chart.title)
        )?;

        for slice in &chart.slices {
            self.write_wedge(slice, out)?;
        }
        for slice in &chart.slices {
            self.write_labels(slice, out)?;
        }

        writeln!(out, "</svg>")
    }

    fn write_wedge<W: Write>(&self, slice: &PieSlice, out: &mut W) -> std::io::Result<()> {
        if slice.sweep <= 0.0 {
            return Ok(());
        }

        let fill = hex(slice.color);
        let r = self.config.radius;

        if slice.sweep >= 360.0 - 1e-9 {
            let (cx, cy) = self.center();
            return writeln!(
                out,
                r#"  <circle class="slice" cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{fill}" stroke="white"/>"#
            );
        }

        let (cx, cy) = self.center();
        let (x0, y0) = self.to_screen(polar(r, slice.start_angle));
        let (x1, y1) = self.to_screen(polar(r, slice.end_angle()));
        let large_arc = u8::from(slice.sweep > 180.0);

        // sweep-flag 0: counter-clockwise on screen
        writeln!(
            out,
            r#"  <path class="slice" d="M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 0 {x1:.2} {y1:.2} Z" fill="{fill}" stroke="white"/>"#
        )
    }

    fn write_labels<W: Write>(&self, slice: &PieSlice, out: &mut W) -> std::io::Result<()> {
        let r = self.config.radius;
        let mid = slice.mid_angle();
        let font = self.config.font_size;

        let (lx, ly) = polar(r * 1.1, mid);
        let anchor = if lx.abs() < 1e-6 {
            "middle"
        } else if lx > 0.0 {
            "start"
        } else {
            "end"
        };
        let (lx, ly) = self.to_screen((lx, ly));
        writeln!(
            out,
            r#"  <text class="label" x="{lx:.2}" y="{ly:.2}" text-anchor="{anchor}" dominant-baseline="middle" font-family="sans-serif" font-size="{font:.0}">{}</text>"#,
            encode_text(slice.label())
        )?;

        let (px, py) = self.to_screen(polar(r * 0.6, mid));
        writeln!(
            out,
            r#"  <text class="pct" x="{px:.2}" y="{py:.2}" text-anchor="middle" dominant-baseline="middle" font-family="sans-serif" font-size="{font:.0}">{}</text>"#,
            slice.percentage_label()
        )
    }

    pub fn render_to_string(&self, chart: &PieChart) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write(chart, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Write `chart` as an SVG file at `path`.
pub fn export_svg(chart: &PieChart, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| FlopmapError::io("Failed to create chart file", Some(path.to_path_buf()), e))?;
    let mut writer = BufWriter::new(file);
    SvgWriter::default()
        .write(chart, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| FlopmapError::io("Failed to write chart file", Some(path.to_path_buf()), e))?;
    tracing::info!(path = %path.display(), "Exported pie chart");
    Ok(())
}

fn hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}
