//! Pie chart model for a complexity breakdown.
//!
//! [`PieChart`] holds everything a backend needs to draw the chart: one
//! [`PieSlice`] per module in report order, each with its share of the total
//! and its angular extent. Backends live in [`svg`] (image export) and
//! [`widget`] (ratatui rendering used by the interactive viewer).
//!
//! Slices start at the top of the circle (90°) and proceed counter-clockwise.
//! A breakdown whose total is zero has no defined proportions and is rejected
//! with [`FlopmapError::EmptyChart`].

pub mod svg;
pub mod widget;

use crate::core::{BlockModule, ComplexityBreakdown};
use crate::errors::{FlopmapError, Result};

/// Title drawn above every chart
pub const CHART_TITLE: &str = "Model Complexity Breakdown";

/// Angle of the first slice's leading edge, in degrees
pub const START_ANGLE: f64 = 90.0;

/// Slice fill colors as RGB, one per module in report order
pub const SLICE_COLORS: [(u8, u8, u8); 4] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub module: BlockModule,
    pub value: u64,
    /// Share of the total in `[0, 1]`
    pub fraction: f64,
    /// Leading edge in degrees, counter-clockwise from the positive x axis
    pub start_angle: f64,
    /// Angular extent in degrees
    pub sweep: f64,
    pub color: (u8, u8, u8),
}

impl PieSlice {
    pub fn label(&self) -> &'static str {
        self.module.name()
    }

    /// Share of the total as a percentage
    pub fn percentage(&self) -> f64 {
        self.fraction * 100.0
    }

    /// Percentage rounded to one decimal place
    pub fn rounded_percentage(&self) -> f64 {
        (self.percentage() * 10.0).round() / 10.0
    }

    /// Annotation drawn on the slice, e.g. `74.8%`
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.rounded_percentage())
    }

    /// Angle through the middle of the slice
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
    pub total: u64,
}

impl PieChart {
    /// Build a chart with one slice per module.
    pub fn from_breakdown(breakdown: &ComplexityBreakdown) -> Result<Self> {
        if breakdown.is_empty() {
            return Err(FlopmapError::EmptyChart);
        }

        let total = breakdown.total() as f64;
        let mut cursor = START_ANGLE;
        let slices = breakdown
            .iter()
            .zip(SLICE_COLORS)
            .map(|(entry, color)| {
                let fraction = entry.cost as f64 / total;
                let sweep = fraction * 360.0;
                let slice = PieSlice {
                    module: entry.module,
                    value: entry.cost,
                    fraction,
                    start_angle: cursor,
                    sweep,
                    color,
                };
                cursor += sweep;
                slice
            })
            .collect();

        Ok(Self {
            title: CHART_TITLE.to_string(),
            slices,
            total: breakdown.total(),
        })
    }

    /// Index of the slice covering `angle` (degrees, counter-clockwise from
    /// the positive x axis).
    pub fn slice_at(&self, angle: f64) -> Option<usize> {
        let offset = (angle - START_ANGLE).rem_euclid(360.0);
        let mut covered = 0.0;
        for (i, slice) in self.slices.iter().enumerate() {
            covered += slice.sweep;
            if slice.sweep > 0.0 && offset < covered {
                return Some(i);
            }
        }
        // Rounding can leave a sliver just under 360°; give it to the last
        // non-empty slice.
        self.slices.iter().rposition(|s| s.sweep > 0.0)
    }
}

/// Point on a circle of `radius` around the origin at `angle` degrees.
pub(crate) fn polar(radius: f64, angle: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (radius * rad.cos(), radius * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::compute_breakdown;
    use crate::core::{ComplexityBreakdown, Hyperparameters};

    fn reference_chart() -> PieChart {
        let b = compute_breakdown(&Hyperparameters::default()).unwrap();
        PieChart::from_breakdown(&b).unwrap()
    }

    #[test]
    fn test_slices_follow_module_order() {
        let chart = reference_chart();
        let labels: Vec<_> = chart.slices.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["Self Attention", "Add & Norm 1", "FFN", "Add & Norm 2"]);
        assert_eq!(chart.title, "Model Complexity Breakdown");
    }

    #[test]
    fn test_reference_percentage_labels() {
        let chart = reference_chart();
        let labels: Vec<_> = chart.slices.iter().map(|s| s.percentage_label()).collect();
        assert_eq!(labels, ["25.1%", "0.0%", "74.8%", "0.0%"]);
    }

    #[test]
    fn test_labels_agree_with_rounded_percentages_on_halves() {
        // a / 400 lands on an exact .x5 percentage for every a = 1 mod 4
        for a in 1..400u64 {
            let b = ComplexityBreakdown::from_costs(Hyperparameters::default(), [a, 0, 400 - a, 0])
                .unwrap();
            let chart = PieChart::from_breakdown(&b).unwrap();
            for slice in &chart.slices {
                assert_eq!(
                    slice.percentage_label(),
                    format!("{:.1}%", slice.rounded_percentage()),
                    "a={a}"
                );
            }
        }
    }

    #[test]
    fn test_sweeps_cover_full_circle() {
        let chart = reference_chart();
        let sweep: f64 = chart.slices.iter().map(|s| s.sweep).sum();
        assert!((sweep - 360.0).abs() < 1e-9);
        assert_eq!(chart.slices[0].start_angle, START_ANGLE);
        assert!((chart.slices[3].end_angle() - (START_ANGLE + 360.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_breakdown_is_rejected() {
        let b = ComplexityBreakdown::from_costs(Hyperparameters::new(0, 0, 0, 0), [0; 4]).unwrap();
        assert!(matches!(
            PieChart::from_breakdown(&b),
            Err(FlopmapError::EmptyChart)
        ));
    }

    #[test]
    fn test_slice_at_walks_counter_clockwise_from_top() {
        let b = ComplexityBreakdown::from_costs(Hyperparameters::default(), [1, 1, 1, 1]).unwrap();
        let chart = PieChart::from_breakdown(&b).unwrap();
        assert_eq!(chart.slice_at(91.0), Some(0));
        assert_eq!(chart.slice_at(181.0), Some(1));
        assert_eq!(chart.slice_at(271.0), Some(2));
        assert_eq!(chart.slice_at(1.0), Some(3));
        assert_eq!(chart.slice_at(89.0), Some(3));
    }

    #[test]
    fn test_slice_at_skips_empty_slices() {
        let b = ComplexityBreakdown::from_costs(Hyperparameters::default(), [0, 0, 5, 0]).unwrap();
        let chart = PieChart::from_breakdown(&b).unwrap();
        assert_eq!(chart.slice_at(90.0), Some(2));
        assert_eq!(chart.slice_at(45.0), Some(2));
    }

    #[test]
    fn test_polar_quadrants() {
        let (x, y) = polar(1.0, 90.0);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }
}
