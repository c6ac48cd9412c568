//! Single rendering loop over a [`Figure`]'s panel list.

use std::io;
use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::{ChartConfig, check_output_path};
use crate::error::Result;
use crate::figure::{
    AxisScale, Figure, LegendCorner, MarkerShape, Orientation, PanelBody, PlotPanel, TextPanel,
};

const TITLE_PT: f64 = 16.0;
const PANEL_TITLE_PT: f64 = 14.0;
const AXIS_LABEL_PT: f64 = 12.0;
const TICK_PT: f64 = 10.0;
const LEGEND_PT: f64 = 9.0;
const TEXT_PT: f64 = 9.5;

/// Pixel sizes derived from the configured resolution.
#[derive(Clone, Copy, Debug)]
pub struct FigureStyle {
    config: ChartConfig,
}

impl FigureStyle {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    fn px(&self, points: f64) -> u32 {
        self.config.points_to_px(points).round().max(1.0) as u32
    }

    fn font(&self, family: &'static str, points: f64) -> FontDesc<'static> {
        (family, self.config.points_to_px(points)).into_font()
    }
}

/// Render `figure` to a PNG file at `path`, overwriting it.
pub fn render_png(figure: &Figure, config: &ChartConfig, path: &Path) -> Result<()> {
    config.validate()?;
    check_output_path(path)?;
    figure.validate()?;
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.is_dir()
    {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("output directory {} does not exist", dir.display()),
        )
        .into());
    }

    let (width, height) = config.pixel_size();
    tracing::debug!(width, height, dpi = config.dpi, "rendering figure");

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    draw_figure(&root, figure, &FigureStyle::new(*config))?;
    root.present()?;

    tracing::info!("chart written to {}", path.display());
    Ok(())
}

/// Draw every panel of `figure` onto `root`. Backend-agnostic.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    style: &FigureStyle,
) -> Result<()> {
    figure.validate()?;
    root.fill(&WHITE)?;

    let line_height = style.px(TITLE_PT * 1.4);
    let title_height = line_height * figure.title.len() as u32 + style.px(TITLE_PT);
    let (title_area, grid_area) = root.split_vertically(title_height);

    let (title_w, _) = title_area.dim_in_pixel();
    let title_font = style
        .font("sans-serif", TITLE_PT)
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in figure.title.iter().enumerate() {
        let y = style.px(TITLE_PT / 2.0) + line_height * i as u32;
        title_area.draw(&Text::new(
            line.as_str(),
            ((title_w / 2) as i32, y as i32),
            title_font.clone(),
        ))?;
    }

    let (grid_w, grid_h) = grid_area.dim_in_pixel();
    let cell_w = grid_w / figure.cols;
    let cell_h = grid_h / figure.rows;

    for panel in &figure.panels {
        let area = grid_area.clone().shrink(
            (panel.cell.col * cell_w, panel.cell.row * cell_h),
            (panel.cell.col_span * cell_w, cell_h),
        );
        match &panel.body {
            PanelBody::Plot(plot) => draw_plot(&area, plot, style)?,
            PanelBody::Text(text) => draw_text(&area, text, style)?,
        }
    }
    Ok(())
}

fn draw_plot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &PlotPanel,
    style: &FigureStyle,
) -> Result<()> {
    let (x, y) = (&panel.x, &panel.y);
    match (x.scale, y.scale) {
        (AxisScale::Linear, AxisScale::Linear) => {
            draw_cartesian(area, panel, style, x.min..x.max, y.min..y.max)
        }
        (AxisScale::Log, AxisScale::Linear) => {
            draw_cartesian(area, panel, style, (x.min..x.max).log_scale(), y.min..y.max)
        }
        (AxisScale::Linear, AxisScale::Log) => {
            draw_cartesian(area, panel, style, x.min..x.max, (y.min..y.max).log_scale())
        }
        (AxisScale::Log, AxisScale::Log) => draw_cartesian(
            area,
            panel,
            style,
            (x.min..x.max).log_scale(),
            (y.min..y.max).log_scale(),
        ),
    }
}

fn draw_cartesian<DB, X, Y>(
    area: &DrawingArea<DB, Shift>,
    panel: &PlotPanel,
    style: &FigureStyle,
    x_spec: X,
    y_spec: Y,
) -> Result<()>
where
    DB: DrawingBackend,
    X: AsRangedCoord<Value = f64>,
    Y: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let mut chart = ChartBuilder::on(area)
        .caption(
            panel.title.as_str(),
            style.font("sans-serif", PANEL_TITLE_PT).style(FontStyle::Bold),
        )
        .margin(style.px(8.0))
        .x_label_area_size(style.px(AXIS_LABEL_PT * 3.0))
        .y_label_area_size(style.px(AXIS_LABEL_PT * 5.0))
        .build_cartesian_2d(x_spec, y_spec)?;

    let x_log = panel.x.scale == AxisScale::Log;
    let y_log = panel.y.scale == AxisScale::Log;
    let x_fmt = move |v: &f64| tick_label(*v, x_log);
    let y_fmt = move |v: &f64| tick_label(*v, y_log);

    chart
        .configure_mesh()
        .x_desc(panel.x.label.as_str())
        .y_desc(panel.y.label.as_str())
        .axis_desc_style(style.font("sans-serif", AXIS_LABEL_PT))
        .label_style(style.font("sans-serif", TICK_PT))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.04))
        .draw()?;

    let legend_len = style.px(20.0) as i32;

    for series in &panel.series {
        let points = panel.visible_points(series);
        if points.len() < 2 {
            continue;
        }
        let color = series.color;
        let stroke = style.px(series.width);
        let anno = chart.draw_series(LineSeries::new(points, color.stroke_width(stroke)))?;
        if let Some(label) = &series.label {
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend_len, y)], color.stroke_width(stroke))
            });
        }
    }

    for guide in panel.visible_guides() {
        let line = match guide.orientation {
            Orientation::Horizontal => vec![(panel.x.min, guide.value), (panel.x.max, guide.value)],
            Orientation::Vertical => vec![(guide.value, panel.y.min), (guide.value, panel.y.max)],
        };
        let color = guide.color.mix(guide.opacity);
        let stroke = style.px(1.5);
        let anno = chart.draw_series(LineSeries::new(line, color.stroke_width(stroke)))?;
        if let Some(label) = &guide.label {
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend_len, y)], color.stroke_width(stroke))
            });
        }
    }

    for marker in panel.visible_markers() {
        let color = marker.color;
        let size = style.px(marker.size) as i32;
        let legend_size = style.px(4.0) as i32;
        let anno = match marker.shape {
            MarkerShape::Circle => chart.draw_series(std::iter::once(Circle::new(
                marker.point,
                size,
                color.filled(),
            )))?,
            MarkerShape::Triangle => chart.draw_series(std::iter::once(TriangleMarker::new(
                marker.point,
                size,
                color.filled(),
            )))?,
        };
        if let Some(label) = &marker.label {
            let anno = anno.label(label.as_str());
            match marker.shape {
                MarkerShape::Circle => anno.legend(move |(x, y)| {
                    EmptyElement::at((x + legend_len / 2, y))
                        + Circle::new((0, 0), legend_size, color.filled())
                }),
                MarkerShape::Triangle => anno.legend(move |(x, y)| {
                    EmptyElement::at((x + legend_len / 2, y))
                        + TriangleMarker::new((0, 0), legend_size, color.filled())
                }),
            };
        }
    }

    if panel.has_legend() {
        chart
            .configure_series_labels()
            .label_font(style.font("sans-serif", LEGEND_PT))
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.3))
            .position(legend_position(panel.legend))
            .draw()?;
    }
    Ok(())
}

fn draw_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &TextPanel,
    style: &FigureStyle,
) -> Result<()> {
    let pad = style.px(10.0);
    let inner = area.margin(pad, pad, pad, pad);
    inner.fill(&panel.background.mix(0.3))?;

    let font = style.font("monospace", TEXT_PT).color(&BLACK);
    let line_height = style.px(TEXT_PT * 1.35) as i32;
    let inset = pad as i32;
    for (i, line) in panel.lines.iter().enumerate() {
        inner.draw(&Text::new(
            line.as_str(),
            (inset, inset + line_height * i as i32),
            font.clone(),
        ))?;
    }
    Ok(())
}

fn legend_position(corner: LegendCorner) -> SeriesLabelPosition {
    match corner {
        LegendCorner::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
        LegendCorner::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendCorner::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

/// Axis tick text: powers of ten on log axes, short decimals otherwise.
pub fn tick_label(v: f64, log: bool) -> String {
    if log || (v != 0.0 && (v.abs() >= 1e5 || v.abs() < 1e-3)) {
        format!("{v:.0e}")
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn test_tick_labels() {
        assert_eq!(tick_label(1e-10, true), "1e-10");
        assert_eq!(tick_label(100.0, true), "1e2");
        assert_eq!(tick_label(42.0, false), "42");
        assert_eq!(tick_label(3.14159, false), "3.14");
        assert_eq!(tick_label(0.0, false), "0");
        assert_eq!(tick_label(2.0e-7, false), "2e-7");
    }

    #[test]
    fn test_draw_figure_rejects_empty_grid() {
        let mut buf = vec![0u8; 40 * 30 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (40, 30)).into_drawing_area();
        let figure = Figure {
            title: Vec::new(),
            rows: 0,
            cols: 0,
            panels: Vec::new(),
        };
        let style = FigureStyle::new(ChartConfig::default());
        let err = draw_figure(&root, &figure, &style).unwrap_err();
        assert!(matches!(err, RenderError::InvalidLayout(_)), "got {err}");
    }

    #[test]
    fn test_font_sizes_follow_dpi() {
        let low = FigureStyle::new(ChartConfig {
            dpi: 72,
            ..ChartConfig::default()
        });
        let high = FigureStyle::new(ChartConfig {
            dpi: 144,
            ..ChartConfig::default()
        });
        assert_eq!(low.px(10.0), 10);
        assert_eq!(high.px(10.0), 20);
        assert_eq!(low.px(0.1), 1, "never collapses to zero");
    }
}
