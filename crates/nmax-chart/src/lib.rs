//! Proof chart for an [`nmax_core::Analysis`].
//!
//! [`proof_figure`] turns a finished run into a declarative [`Figure`];
//! [`render_png`] draws any figure through `plotters` at the resolution
//! given by [`ChartConfig`].

pub mod config;
pub mod error;
pub mod figure;
pub mod proof;
pub mod render;

pub use config::{ChartConfig, check_output_path};
pub use error::{RenderError, Result};
pub use figure::{
    Axis, AxisScale, Cell, Figure, Guide, LegendCorner, Marker, MarkerShape, Orientation, Panel,
    PanelBody, PlotPanel, Series, TextPanel,
};
pub use proof::proof_figure;
pub use render::{FigureStyle, draw_figure, render_png, tick_label};
