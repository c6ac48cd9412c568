//! The N_max proof figure: four plots and three text columns on a 3×3 grid.

use nmax_core::{Analysis, Convergence, ScaleKind};
use plotters::prelude::{BLUE, CYAN, MAGENTA, RED};
use plotters::style::RGBColor;

use crate::figure::{
    Axis, Cell, Figure, Guide, LegendCorner, Marker, MarkerShape, Orientation, Panel, PanelBody,
    PlotPanel, Series, TextPanel,
};

const ORANGE: RGBColor = RGBColor(255, 165, 0);
const GRAY: RGBColor = RGBColor(128, 128, 128);
const GREEN: RGBColor = RGBColor(0, 128, 0);
const WHEAT: RGBColor = RGBColor(245, 222, 179);
const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);
const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);

/// Upper bound of the N axis on the convergence panels.
const N_WINDOW: f64 = 60.0;

const SEGMENTS_LABEL: &str = "Number of Segments N";

pub fn proof_figure(analysis: &Analysis) -> Figure {
    let panels = vec![
        Panel {
            cell: Cell::at(0, 0),
            body: PanelBody::Plot(limit_vs_scale(analysis)),
        },
        Panel {
            cell: Cell::spanning(0, 1, 2),
            body: PanelBody::Plot(pi_convergence(analysis)),
        },
        Panel {
            cell: Cell::spanning(1, 0, 2),
            body: PanelBody::Plot(pi_error(analysis)),
        },
        Panel {
            cell: Cell::at(1, 2),
            body: PanelBody::Plot(convergence_rate(analysis)),
        },
        Panel {
            cell: Cell::at(2, 0),
            body: PanelBody::Text(TextPanel {
                lines: limit_text(analysis),
                background: WHEAT,
            }),
        },
        Panel {
            cell: Cell::at(2, 1),
            body: PanelBody::Text(TextPanel {
                lines: convergence_text(analysis),
                background: LIGHT_BLUE,
            }),
        },
        Panel {
            cell: Cell::at(2, 2),
            body: PanelBody::Text(TextPanel {
                lines: parameter_text(analysis),
                background: LIGHT_GREEN,
            }),
        },
    ];

    Figure {
        title: vec![
            format!(
                "Segmented Spacetime: Proof for N_max ≈ {}",
                analysis.params.target_segments
            ),
            "The Physical Precision Limit of π".to_string(),
        ],
        rows: 3,
        cols: 3,
        panels,
    }
}

fn limit_vs_scale(a: &Analysis) -> PlotPanel {
    let target_n = a.params.target_segments;
    let ys = a
        .scale_sweep
        .iter()
        .map(|&(_, n)| n)
        .chain(a.reference_scales.iter().map(|s| s.n_max))
        .chain([target_n, 0.0]);
    let (y_min, y_max) = padded(ys, 0.05);

    let mut markers: Vec<Marker> = a
        .reference_scales
        .iter()
        .filter_map(|s| {
            let (color, label) = match s.kind {
                ScaleKind::Schwarzschild => (GREEN, format!("Schwarzschild: N={:.1}", s.n_max)),
                ScaleKind::Compton => (MAGENTA, format!("Compton: N={:.1}", s.n_max)),
                ScaleKind::Typical => (CYAN, format!("Typical: N≈{:.0}", s.n_max)),
                ScaleKind::Classical | ScaleKind::Target => return None,
            };
            Some(Marker {
                point: (s.s0, s.n_max),
                label: Some(label),
                color,
                shape: MarkerShape::Circle,
                size: 5.0,
            })
        })
        .collect();
    markers.push(Marker {
        point: (a.target.s0, a.target.n_max),
        label: Some(format!(
            "Target: N={:.0} at s₀={:.2e} m",
            a.target.n_max, a.target.s0
        )),
        color: RED,
        shape: MarkerShape::Triangle,
        size: 9.0,
    });

    PlotPanel {
        title: "Segmentation Limit vs. Initial Scale".into(),
        x: Axis::log(
            "Initial Segment Scale s₀ [m]",
            10f64.powf(a.params.sweep.start_exp),
            10f64.powf(a.params.sweep.end_exp),
        ),
        y: Axis::linear("N_max (Maximum Segmentation)", y_min, y_max),
        series: vec![Series {
            label: Some("N_max(s₀)".into()),
            points: a.scale_sweep.clone(),
            color: BLUE,
            width: 2.0,
        }],
        guides: vec![
            Guide {
                orientation: Orientation::Horizontal,
                value: target_n,
                label: Some(format!("N_max ≈ {target_n}")),
                color: RED,
                opacity: 1.0,
            },
            Guide {
                orientation: Orientation::Vertical,
                value: a.constants.planck_length,
                label: Some("Planck Length".into()),
                color: GRAY,
                opacity: 0.5,
            },
        ],
        markers,
        legend: LegendCorner::UpperLeft,
    }
}

fn pi_convergence(a: &Analysis) -> PlotPanel {
    let points: Vec<(f64, f64)> = a
        .samples
        .iter()
        .map(|s| (f64::from(s.n), s.value))
        .collect();
    let (y_min, y_max) = padded(points.iter().map(|p| p.1).chain([a.constants.pi, 0.0]), 0.05);

    let markers = a
        .convergence
        .point()
        .map(|p| Marker {
            point: (f64::from(p.n), p.value),
            label: Some(format!("Convergence at N={}", p.n)),
            color: RED,
            shape: MarkerShape::Circle,
            size: 5.0,
        })
        .into_iter()
        .collect();

    PlotPanel {
        title: "Convergence of π_eff towards classical π".into(),
        x: Axis::linear(SEGMENTS_LABEL, 0.0, N_WINDOW),
        y: Axis::linear("π_eff", y_min, y_max),
        series: vec![Series {
            label: Some("π_eff(N)".into()),
            points,
            color: BLUE,
            width: 2.0,
        }],
        guides: vec![
            Guide {
                orientation: Orientation::Horizontal,
                value: a.constants.pi,
                label: Some("π_classical".into()),
                color: RED,
                opacity: 1.0,
            },
            target_guide(a),
        ],
        markers,
        legend: LegendCorner::UpperRight,
    }
}

fn pi_error(a: &Analysis) -> PlotPanel {
    let points: Vec<(f64, f64)> = a
        .error_to_classical()
        .into_iter()
        .map(|(n, e)| (f64::from(n), e))
        .collect();
    let (y_min, y_max) = decades(points.iter().map(|p| p.1).chain([a.params.epsilon]));

    PlotPanel {
        title: "Error in π_eff (logarithmic scale)".into(),
        x: Axis::linear(SEGMENTS_LABEL, 0.0, N_WINDOW),
        y: Axis::log("|π_eff(N) - π_classical|", y_min, y_max),
        series: vec![Series {
            label: None,
            points,
            color: BLUE,
            width: 2.0,
        }],
        guides: vec![
            target_guide(a),
            Guide {
                orientation: Orientation::Horizontal,
                value: a.params.epsilon,
                label: Some(format!("ε = {:.0e} (resolution limit)", a.params.epsilon)),
                color: RED,
                opacity: 0.5,
            },
        ],
        markers: Vec::new(),
        legend: LegendCorner::LowerRight,
    }
}

fn convergence_rate(a: &Analysis) -> PlotPanel {
    let points: Vec<(f64, f64)> = a
        .samples
        .iter()
        .zip(&a.derivative)
        .map(|(s, d)| (f64::from(s.n), d.abs()))
        .collect();
    let (y_min, y_max) = decades(
        points
            .iter()
            .filter(|p| p.0 <= N_WINDOW)
            .map(|p| p.1),
    );

    let markers = a
        .flattest
        .map(|f| Marker {
            point: (f64::from(f.n), f.abs_derivative),
            label: Some(format!("Min at N≈{}", f.n)),
            color: RED,
            shape: MarkerShape::Circle,
            size: 5.0,
        })
        .into_iter()
        .collect();

    PlotPanel {
        title: "Convergence Rate of π_eff".into(),
        x: Axis::linear(SEGMENTS_LABEL, 0.0, N_WINDOW),
        y: Axis::log("|dπ_eff/dN|", y_min, y_max),
        series: vec![Series {
            label: Some("|dπ_eff/dN|".into()),
            points,
            color: BLUE,
            width: 2.0,
        }],
        guides: vec![target_guide(a)],
        markers,
        legend: LegendCorner::UpperRight,
    }
}

fn target_guide(a: &Analysis) -> Guide {
    let n = a.params.target_segments;
    Guide {
        orientation: Orientation::Vertical,
        value: n,
        label: Some(format!("N = {n}")),
        color: ORANGE,
        opacity: 0.7,
    }
}

fn limit_text(a: &Analysis) -> Vec<String> {
    let mut lines = vec![
        "SEGMENTATION LIMIT".to_string(),
        String::new(),
        format!("N_max = {}", a.params.target_segments),
        String::new(),
        "REVERSE CALCULATION:".to_string(),
        format!("  Given:   N_max = {}", a.params.target_segments),
        format!("  Formula: s₀ = l_p × φ^{}", a.params.target_segments),
        format!("  Result:  s₀ = {:.6e} m", a.target.s0),
        "  Check:".to_string(),
        format!("    N_max = {:.10}", a.target.n_max),
        String::new(),
        "REFERENCE SCALES:".to_string(),
    ];
    lines.extend(
        a.reference_scales
            .iter()
            .map(|s| format!("  {:<13} N = {:>7.2}", s.kind.short_label(), s.n_max)),
    );
    lines
}

fn convergence_text(a: &Analysis) -> Vec<String> {
    let mut lines = vec![
        "EFFECTIVE π".to_string(),
        String::new(),
        "Criterion:".to_string(),
        format!("  |π_eff(N+1) - π_eff(N)| < {:.0e}", a.params.epsilon),
        String::new(),
    ];
    match a.convergence {
        Convergence::Converged(p) => {
            lines.push(format!("Reached at N = {}", p.n));
            lines.push(format!("  π_eff({}) = {:.6e}", p.n, p.value));
            lines.push(format!("  step      = {:.2e}", p.difference));
            lines.push(format!(
                "  |π_eff - π| = {:.2e}",
                (p.value - a.constants.pi).abs()
            ));
        }
        Convergence::NotConverged { samples } => {
            lines.push("Not reached".to_string());
            lines.push(format!("  within {samples} samples"));
        }
    }
    lines.push(String::new());
    match a.flattest {
        Some(f) => {
            lines.push(format!(
                "Flattest slope (N > {}):",
                a.params.derivative_skip
            ));
            lines.push(format!("  N = {}, |dπ/dN| = {:.2e}", f.n, f.abs_derivative));
        }
        None => lines.push("Flattest slope: n/a".to_string()),
    }
    lines
}

fn parameter_text(a: &Analysis) -> Vec<String> {
    let range = match a.params.scan.last() {
        Some(last) => format!("[{}, {last}]", a.params.scan.start),
        None => "empty".to_string(),
    };
    vec![
        "PARAMETERS".to_string(),
        String::new(),
        format!("  φ    = {:.10}", a.constants.phi),
        format!("  π    = {:.10}", a.constants.pi),
        format!("  l_p  = {:.6e} m", a.constants.planck_length),
        String::new(),
        format!("  R0   = {}", a.params.spiral.r0),
        format!("  λ    = {}", a.params.spiral.lambda),
        format!("  N    ∈ {range}"),
        format!("  ε    = {:.0e}", a.params.epsilon),
        String::new(),
        "π_eff(N) = N·R0·φ^(-N) / (2·R0·e^(λN))".to_string(),
        "N_max(s₀) = ln(s₀/l_p) / ln(φ)".to_string(),
    ]
}

/// (min, max) of finite values, widened by `frac` of the span on each side.
fn padded(values: impl Iterator<Item = f64>, frac: f64) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = (hi - lo).max(1e-12);
    (lo - span * frac, hi + span * frac)
}

/// Whole-decade bounds around the positive finite values.
fn decades(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (1e-1, 1e1);
    }
    let lo_exp = lo.log10().floor();
    let mut hi_exp = hi.log10().ceil();
    if hi_exp <= lo_exp {
        hi_exp = lo_exp + 1.0;
    }
    (10f64.powf(lo_exp), 10f64.powf(hi_exp))
}
