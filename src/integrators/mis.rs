// Copyright @yucwang 2026

use crate::math::constants::Float;

/// Power heuristic with exponent two. Returns the share of the estimate that
/// belongs to the strategy with density `f_pdf` when `g_pdf` competes for the
/// same sample. Both densities must be in the same measure.
pub fn power_heuristic(f_pdf: Float, g_pdf: Float) -> Float {
    if f_pdf.is_infinite() {
        return 1.0;
    }
    let f2 = f_pdf * f_pdf;
    let g2 = g_pdf * g_pdf;
    if !(f2 + g2 > 0.0) {
        return 0.0;
    }
    f2 / (f2 + g2)
}

pub fn balance_heuristic(f_pdf: Float, g_pdf: Float) -> Float {
    if f_pdf.is_infinite() {
        return 1.0;
    }
    let sum = f_pdf + g_pdf;
    if !(sum > 0.0) {
        return 0.0;
    }
    f_pdf / sum
}

/// Weight used by the path integrator when combining strategies.
#[inline]
pub fn mis_weight(f_pdf: Float, g_pdf: Float) -> Float {
    power_heuristic(f_pdf, g_pdf)
}
