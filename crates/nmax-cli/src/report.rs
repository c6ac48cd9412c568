//! Plain-text report on stdout.

use std::io::{self, Write};
use std::path::Path;

use nmax_core::{Analysis, Convergence};

const WIDTH: usize = 80;

fn rule<W: Write>(w: &mut W, ch: char) -> io::Result<()> {
    writeln!(w, "{}", ch.to_string().repeat(WIDTH))
}

/// Header, constants, reference scales, target scale and convergence block.
pub fn write_report<W: Write>(w: &mut W, a: &Analysis) -> io::Result<()> {
    let target_n = a.params.target_segments;

    rule(w, '=')?;
    writeln!(w, "SEGMENTED SPACETIME: Proof for N_max ≈ {target_n}")?;
    writeln!(w, "The Physical Precision Limit of π")?;
    rule(w, '=')?;
    writeln!(w)?;

    writeln!(w, "Physical Constants:")?;
    writeln!(w, "  φ (Golden Ratio)      : {:.10}", a.constants.phi)?;
    writeln!(w, "  π (classical)         : {:.10}", a.constants.pi)?;
    writeln!(w, "  Planck Length l_p     : {:.6e} m", a.constants.planck_length)?;
    writeln!(w)?;

    writeln!(w, "Calculation of N_max for various initial scales:")?;
    rule(w, '-')?;
    for scale in &a.reference_scales {
        writeln!(w, "  s_0 = {}", scale.kind.label())?;
        writeln!(w, "       s_0 = {:.6e} m", scale.s0)?;
        writeln!(w, "       N_max = {:.2}", scale.n_max)?;
        writeln!(w)?;
    }
    writeln!(w, "  s_0 = Target Scale (l_p × φ^{target_n})")?;
    writeln!(w, "       s_0 = {:.6e} m", a.target.s0)?;
    writeln!(w, "       N_max = {:.10}", a.target.n_max)?;
    writeln!(w)?;

    rule(w, '=')?;
    writeln!(w, "PHYSICAL LIMIT: N_max = {target_n}")?;
    writeln!(w, "AT SCALE: s_0 = {:.6e} m = l_p × φ^{target_n}", a.target.s0)?;
    rule(w, '=')?;
    writeln!(w)?;

    write_convergence(w, a)
}

fn write_convergence<W: Write>(w: &mut W, a: &Analysis) -> io::Result<()> {
    let pi = a.constants.pi;
    writeln!(w, "Convergence Analysis:")?;
    writeln!(w, "  Criterion: |π_eff(N+1) - π_eff(N)| < {:.0e}", a.params.epsilon)?;
    match &a.convergence {
        Convergence::Converged(p) => {
            writeln!(w, "  Convergence reached at: N = {}", p.n)?;
            writeln!(w, "  π_eff({}) = {:.15}", p.n, p.value)?;
            writeln!(w, "  π_classical        = {pi:.15}")?;
            writeln!(w, "  Difference          = {:.2e}", (p.value - pi).abs())?;
        }
        Convergence::NotConverged { .. } => {
            let range = match a.params.scan.last() {
                Some(last) => format!("[{}, {last}]", a.params.scan.start),
                None => "[]".to_string(),
            };
            writeln!(w, "  Warning: Convergence not reached in range N ∈ {range}")?;
        }
    }
    if let Some(f) = a.flattest {
        writeln!(
            w,
            "  Flattest slope (N > {}): N = {}, |dπ_eff/dN| = {:.2e}",
            a.params.derivative_skip, f.n, f.abs_derivative
        )?;
    }
    writeln!(w)
}

/// Closing summary. `chart` names the written PNG, if any.
pub fn write_summary<W: Write>(w: &mut W, a: &Analysis, chart: Option<&Path>) -> io::Result<()> {
    let target_n = a.params.target_segments;

    if let Some(path) = chart {
        writeln!(w, "Plot saved: {}", path.display())?;
        writeln!(w)?;
    }

    rule(w, '=')?;
    writeln!(w, "SUMMARY: N_max = {target_n}")?;
    rule(w, '=')?;
    writeln!(w)?;
    writeln!(w, "Mathematical Results:")?;
    for scale in &a.reference_scales {
        let name = format!("N_max ({})", scale.kind.short_label());
        writeln!(w, "  • {name:<24}: {:.2}", scale.n_max)?;
    }
    let name = format!("N_max (l_p × φ^{target_n})");
    writeln!(w, "  • {name:<24}: {:.10}", a.target.n_max)?;
    writeln!(w)?;
    writeln!(w, "Target scale:")?;
    writeln!(w, "  • s_0 = l_p × φ^{target_n} = {:.6e} m", a.target.s0)?;
    writeln!(w, "  • N_max = ln(s_0/l_p) / ln(φ) = {:.10}", a.target.n_max)?;
    writeln!(w)?;
    match a.convergence.point() {
        Some(p) => writeln!(
            w,
            "Effective π: steps fall below ε = {:.0e} at N = {}",
            a.params.epsilon, p.n
        )?,
        None => writeln!(
            w,
            "Effective π: steps stay above ε = {:.0e} over the scanned range",
            a.params.epsilon
        )?,
    }
    rule(w, '=')?;
    if let Some(path) = chart {
        writeln!(w, "Visualization: {}", path.display())?;
    }
    Ok(())
}
