//! Declarative figure description.
//!
//! A [`Figure`] is a grid of [`Panel`]s. Each panel is plain data (series,
//! guide lines, markers or text lines); the renderer walks the list once and
//! never special-cases a particular panel.

use plotters::style::RGBColor;

use crate::error::{RenderError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub scale: AxisScale,
}

impl Axis {
    pub fn linear(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            scale: AxisScale::Linear,
        }
    }

    pub fn log(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            scale: AxisScale::Log,
        }
    }

    /// Whether `v` can be placed on this axis.
    pub fn contains(&self, v: f64) -> bool {
        v.is_finite()
            && v >= self.min
            && v <= self.max
            && (self.scale == AxisScale::Linear || v > 0.0)
    }

    fn check(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(RenderError::InvalidLayout(format!(
                "axis '{}' has empty range {}..{}",
                self.label, self.min, self.max
            )));
        }
        if self.scale == AxisScale::Log && self.min <= 0.0 {
            return Err(RenderError::InvalidLayout(format!(
                "log axis '{}' must start above zero, got {}",
                self.label, self.min
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    /// Stroke width in points.
    pub width: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A full-width or full-height reference line at a fixed value.
#[derive(Clone, Debug)]
pub struct Guide {
    pub orientation: Orientation,
    pub value: f64,
    pub label: Option<String>,
    pub color: RGBColor,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Triangle,
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub point: (f64, f64),
    pub label: Option<String>,
    pub color: RGBColor,
    pub shape: MarkerShape,
    /// Radius in points.
    pub size: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendCorner {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

#[derive(Clone, Debug)]
pub struct PlotPanel {
    pub title: String,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
    pub guides: Vec<Guide>,
    pub markers: Vec<Marker>,
    pub legend: LegendCorner,
}

impl PlotPanel {
    /// Points of `series` that fall inside both axis ranges.
    pub fn visible_points(&self, series: &Series) -> Vec<(f64, f64)> {
        series
            .points
            .iter()
            .copied()
            .filter(|&(x, y)| self.x.contains(x) && self.y.contains(y))
            .collect()
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers
            .iter()
            .filter(|m| self.x.contains(m.point.0) && self.y.contains(m.point.1))
    }

    pub fn visible_guides(&self) -> impl Iterator<Item = &Guide> {
        self.guides.iter().filter(|g| match g.orientation {
            Orientation::Horizontal => self.y.contains(g.value),
            Orientation::Vertical => self.x.contains(g.value),
        })
    }

    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.label.is_some())
            || self.visible_guides().any(|g| g.label.is_some())
            || self.visible_markers().any(|m| m.label.is_some())
    }
}

/// Monospace text block on a tinted background.
#[derive(Clone, Debug)]
pub struct TextPanel {
    pub lines: Vec<String>,
    pub background: RGBColor,
}

#[derive(Clone, Debug)]
pub enum PanelBody {
    Plot(PlotPanel),
    Text(TextPanel),
}

/// Grid position. A panel spans `col_span` columns of a single row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub col_span: u32,
}

impl Cell {
    pub fn at(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            col_span: 1,
        }
    }

    pub fn spanning(row: u32, col: u32, col_span: u32) -> Self {
        Self { row, col, col_span }
    }
}

#[derive(Clone, Debug)]
pub struct Panel {
    pub cell: Cell,
    pub body: PanelBody,
}

#[derive(Clone, Debug)]
pub struct Figure {
    /// Title lines drawn centred above the grid.
    pub title: Vec<String>,
    pub rows: u32,
    pub cols: u32,
    pub panels: Vec<Panel>,
}

impl Figure {
    /// Reject panels outside the grid, overlapping panels and unusable axes.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(RenderError::InvalidLayout(format!(
                "grid must be non-empty, got {}x{}",
                self.rows, self.cols
            )));
        }

        let mut occupied = vec![false; (self.rows * self.cols) as usize];
        for (i, panel) in self.panels.iter().enumerate() {
            let Cell { row, col, col_span } = panel.cell;
            if col_span == 0 || row >= self.rows || col + col_span > self.cols {
                return Err(RenderError::InvalidLayout(format!(
                    "panel {i} at row {row}, cols {col}..{} lies outside the {}x{} grid",
                    col + col_span,
                    self.rows,
                    self.cols
                )));
            }
            for c in col..col + col_span {
                let slot = &mut occupied[(row * self.cols + c) as usize];
                if *slot {
                    return Err(RenderError::InvalidLayout(format!(
                        "panel {i} overlaps another panel at row {row}, col {c}"
                    )));
                }
                *slot = true;
            }
            if let PanelBody::Plot(plot) = &panel.body {
                plot.x.check()?;
                plot.y.check()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::BLUE;

    fn plot(x: Axis, y: Axis) -> PlotPanel {
        PlotPanel {
            title: "t".into(),
            x,
            y,
            series: Vec::new(),
            guides: Vec::new(),
            markers: Vec::new(),
            legend: LegendCorner::UpperRight,
        }
    }

    fn text_panel(cell: Cell) -> Panel {
        Panel {
            cell,
            body: PanelBody::Text(TextPanel {
                lines: vec!["x".into()],
                background: BLUE,
            }),
        }
    }

    fn figure(panels: Vec<Panel>) -> Figure {
        Figure {
            title: vec!["title".into()],
            rows: 2,
            cols: 3,
            panels,
        }
    }

    #[test]
    fn test_valid_grid() {
        let f = figure(vec![
            text_panel(Cell::spanning(0, 0, 2)),
            text_panel(Cell::at(0, 2)),
            text_panel(Cell::spanning(1, 0, 3)),
        ]);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_overlap_rejected() {
        let f = figure(vec![
            text_panel(Cell::spanning(0, 0, 2)),
            text_panel(Cell::at(0, 1)),
        ]);
        let err = f.validate().unwrap_err();
        assert!(matches!(err, RenderError::InvalidLayout(ref m) if m.contains("overlaps")));
    }

    #[test]
    fn test_out_of_grid_rejected() {
        assert!(figure(vec![text_panel(Cell::spanning(0, 2, 2))]).validate().is_err());
        assert!(figure(vec![text_panel(Cell::at(2, 0))]).validate().is_err());
        assert!(figure(vec![text_panel(Cell::spanning(0, 0, 0))]).validate().is_err());
    }

    #[test]
    fn test_bad_axes_rejected() {
        let bad_log = Panel {
            cell: Cell::at(0, 0),
            body: PanelBody::Plot(plot(
                Axis::linear("x", 0.0, 1.0),
                Axis::log("y", 0.0, 1.0),
            )),
        };
        assert!(figure(vec![bad_log]).validate().is_err());

        let empty = Panel {
            cell: Cell::at(0, 0),
            body: PanelBody::Plot(plot(
                Axis::linear("x", 1.0, 1.0),
                Axis::linear("y", 0.0, 1.0),
            )),
        };
        assert!(figure(vec![empty]).validate().is_err());
    }

    #[test]
    fn test_visible_points_drop_non_positive_on_log_axis() {
        let p = plot(Axis::linear("x", 0.0, 10.0), Axis::log("y", 1e-3, 1e3));
        let s = Series {
            label: None,
            points: vec![(1.0, 1.0), (2.0, 0.0), (3.0, -1.0), (11.0, 1.0), (4.0, 1e-5)],
            color: BLUE,
            width: 1.0,
        };
        assert_eq!(p.visible_points(&s), vec![(1.0, 1.0)]);
    }

    #[test]
    fn test_legend_only_when_labelled() {
        let mut p = plot(Axis::linear("x", 0.0, 1.0), Axis::linear("y", 0.0, 1.0));
        assert!(!p.has_legend());
        p.guides.push(Guide {
            orientation: Orientation::Vertical,
            value: 5.0,
            label: Some("off-axis".into()),
            color: BLUE,
            opacity: 1.0,
        });
        assert!(!p.has_legend(), "guide outside range is not drawn");
        p.guides[0].value = 0.5;
        assert!(p.has_legend());
    }
}
