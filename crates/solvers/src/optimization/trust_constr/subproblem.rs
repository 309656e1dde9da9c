use crate::linalg;

/// Fraction of each slack `−c_i` that a step is allowed to consume.
const FRACTION_TO_BOUNDARY: f64 = 0.995;

/// A truncated trial step and its length in the trust-region norm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TrialStep<const N: usize> {
    pub(super) p: [f64; N],

    /// `‖p‖_B = √(pᵀBp)` when `B` is positive definite, `‖p‖₂` otherwise.
    pub(super) length: f64,
}

/// Computes the trial step for the model `gᵀp + ½pᵀBp` within `radius`.
///
/// When `B` is positive definite the trust region is measured in the
/// `B`-norm, which keeps it aligned with the barrier's curvature near a
/// constraint. Otherwise the region is Euclidean and the step follows the
/// dogleg path. Either way the step is then truncated so every linearized
/// slack keeps a fraction of its value.
pub(super) fn trial_step<const N: usize>(
    g: &[f64; N],
    b: &[[f64; N]; N],
    values: &[f64],
    jacobian: &[[f64; N]],
    radius: f64,
) -> TrialStep<N> {
    let scaled = scaled_newton(g, b, radius);
    let raw = scaled.unwrap_or_else(|| dogleg(g, b, radius));
    let alpha = fraction_to_boundary(values, jacobian, &raw);
    let p = linalg::scale(alpha, &raw);

    let length = if scaled.is_some() {
        linalg::quad_form(b, &p).max(0.0).sqrt()
    } else {
        linalg::norm(&p)
    };

    TrialStep { p, length }
}

/// Returns the Newton step `−B⁻¹g` cut back to `√(pᵀBp) ≤ radius`.
///
/// In the `B`-norm the model is isotropic, so the dogleg path collapses onto
/// the Newton direction. Returns `None` if `B` is not positive definite.
fn scaled_newton<const N: usize>(
    g: &[f64; N],
    b: &[[f64; N]; N],
    radius: f64,
) -> Option<[f64; N]> {
    let newton = linalg::solve_spd(b, &linalg::scale(-1.0, g))?;
    let length = linalg::quad_form(b, &newton).max(0.0).sqrt();
    if length <= radius {
        Some(newton)
    } else {
        Some(linalg::scale(radius / length, &newton))
    }
}

/// Approximately minimizes `m(p) = gᵀp + ½pᵀBp` subject to `‖p‖ ≤ radius`.
///
/// Uses the dogleg path from the Cauchy point to the Newton point. When `B`
/// is not positive definite the path ends at the Cauchy point, and when the
/// model has non-positive curvature along `−g` the step runs to the boundary
/// along `−g`.
fn dogleg<const N: usize>(g: &[f64; N], b: &[[f64; N]; N], radius: f64) -> [f64; N] {
    let g_norm = linalg::norm(g);
    if g_norm == 0.0 {
        return [0.0; N];
    }

    let newton = linalg::solve_spd(b, &linalg::scale(-1.0, g));
    if let Some(p) = newton {
        if linalg::norm(&p) <= radius {
            return p;
        }
    }

    let to_boundary = linalg::scale(-radius / g_norm, g);
    let curvature = linalg::quad_form(b, g);
    if curvature <= 0.0 {
        return to_boundary;
    }

    let cauchy = linalg::scale(-(g_norm * g_norm) / curvature, g);
    if linalg::norm(&cauchy) >= radius {
        return to_boundary;
    }

    let Some(newton) = newton else {
        return cauchy;
    };

    // Solve ‖cauchy + τ·d‖ = radius for τ ∈ [0, 1].
    let d = linalg::axpy(-1.0, &cauchy, &newton);
    let a = linalg::dot(&d, &d);
    if a <= 0.0 {
        return cauchy;
    }
    let half_b = linalg::dot(&cauchy, &d);
    let c = linalg::dot(&cauchy, &cauchy) - radius * radius;
    let tau = (-half_b + (half_b * half_b - a * c).max(0.0).sqrt()) / a;

    linalg::axpy(tau.clamp(0.0, 1.0), &d, &cauchy)
}

/// Returns the largest `α ∈ (0, 1]` such that the linearized constraints keep
/// a fraction of their slack: `c_i + α ∇c_iᵀp ≤ (1 − τ) c_i` for all `i`.
fn fraction_to_boundary<const N: usize>(
    values: &[f64],
    jacobian: &[[f64; N]],
    p: &[f64; N],
) -> f64 {
    values
        .iter()
        .zip(jacobian)
        .fold(1.0, |alpha: f64, (c, row)| {
            let slope = linalg::dot(row, p);
            if slope > 0.0 {
                alpha.min(FRACTION_TO_BOUNDARY * -c / slope)
            } else {
                alpha
            }
        })
}

/// Returns `true` if every constraint at the trial point keeps a fraction of
/// its current slack: `c_i(x + p) ≤ (1 − τ) c_i(x)`.
///
/// Curved constraints can lose more slack than their linearization predicts,
/// so the rule is enforced again on the actual values.
pub(super) fn keeps_slack(current: &[f64], trial: &[f64]) -> bool {
    current
        .iter()
        .zip(trial)
        .all(|(c, t)| *t <= (1.0 - FRACTION_TO_BOUNDARY) * c)
}

/// Decrease in the quadratic model `m(0) − m(p) = −(gᵀp + ½pᵀBp)`.
pub(super) fn predicted_decrease<const N: usize>(
    g: &[f64; N],
    b: &[[f64; N]; N],
    p: &[f64; N],
) -> f64 {
    -(linalg::dot(g, p) + 0.5 * linalg::quad_form(b, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const B: [[f64; 2]; 2] = [[2.0, 0.0], [0.0, 8.0]];

    #[test]
    fn takes_newton_step_when_inside_region() {
        let g = [2.0, 8.0];
        let p = dogleg(&g, &B, 10.0);

        assert_relative_eq!(p[0], -1.0);
        assert_relative_eq!(p[1], -1.0);
    }

    #[test]
    fn stays_within_radius() {
        let g = [2.0, 8.0];
        for radius in [0.01, 0.1, 0.5, 1.0] {
            let p = dogleg(&g, &B, radius);
            assert!(linalg::norm(&p) <= radius * (1.0 + 1e-12));
            assert!(predicted_decrease(&g, &B, &p) > 0.0);
        }
    }

    #[test]
    fn dogleg_segment_lands_on_boundary() {
        // Newton step has length √2; the Cauchy point is shorter than 1.2.
        let g = [2.0, 8.0];
        let p = dogleg(&g, &B, 1.2);

        assert_relative_eq!(linalg::norm(&p), 1.2, epsilon = 1e-12);
    }

    #[test]
    fn zero_gradient_gives_zero_step() {
        assert_eq!(dogleg(&[0.0, 0.0], &B, 1.0), [0.0, 0.0]);
    }

    #[test]
    fn indefinite_model_steps_along_negative_gradient() {
        let b = [[-1.0, 0.0], [0.0, -1.0]];
        let p = dogleg(&[3.0, 4.0], &b, 2.0);

        assert_relative_eq!(p[0], -1.2);
        assert_relative_eq!(p[1], -1.6);
    }

    #[test]
    fn scaled_newton_is_cut_back_in_the_model_norm() {
        let g = [2.0, 8.0];

        // Newton step (−1, −1) has B-norm √10.
        let full = scaled_newton(&g, &B, 10.0).expect("positive definite");
        assert_relative_eq!(full[0], -1.0);
        assert_relative_eq!(full[1], -1.0);

        let p = scaled_newton(&g, &B, 1.0).expect("positive definite");
        assert_relative_eq!(linalg::quad_form(&B, &p).sqrt(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[0], p[1]);

        let indefinite = [[-1.0, 0.0], [0.0, -1.0]];
        assert!(scaled_newton(&g, &indefinite, 1.0).is_none());
    }

    #[test]
    fn trial_step_falls_back_to_euclidean_dogleg() {
        let b = [[-1.0, 0.0], [0.0, -1.0]];
        let step = trial_step(&[3.0, 4.0], &b, &[], &[], 2.0);

        assert_relative_eq!(step.p[0], -1.2);
        assert_relative_eq!(step.p[1], -1.6);
        assert_relative_eq!(step.length, 2.0);
    }

    #[test]
    fn trial_step_reports_truncated_model_length() {
        // Slack 0.5 with ∇c = (−1, 0) cuts the Newton step (−1, −1) to α = 0.995·0.5.
        let step = trial_step(&[2.0, 8.0], &B, &[-0.5], &[[-1.0, 0.0]], 10.0);
        let alpha = FRACTION_TO_BOUNDARY * 0.5;

        assert_relative_eq!(step.p[0], -alpha);
        assert_relative_eq!(step.p[1], -alpha);
        assert_relative_eq!(step.length, alpha * 10.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn slack_rule_uses_actual_values() {
        assert!(keeps_slack(&[-1.0, -2.0], &[-0.5, -0.011]));
        assert!(!keeps_slack(&[-1.0, -2.0], &[-0.5, -0.009]));
        assert!(!keeps_slack(&[-1.0], &[-1e-16]));
    }

    #[test]
    fn fraction_to_boundary_truncates_long_steps() {
        // x ≤ 1 at x = 0.5: slack 0.5, step of 1.0 toward the boundary.
        let alpha = fraction_to_boundary(&[-0.5], &[[1.0]], &[1.0]);
        assert_relative_eq!(alpha, FRACTION_TO_BOUNDARY * 0.5);

        // Steps away from the boundary are not truncated.
        let alpha = fraction_to_boundary(&[-0.5], &[[1.0]], &[-3.0]);
        assert_relative_eq!(alpha, 1.0);
    }
}
