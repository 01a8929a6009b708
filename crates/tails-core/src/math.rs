//! Special functions needed by the likelihood normalizations
//!
//! The error function and the positive-shape incomplete gamma come from
//! `statrs`. The Hurwitz zeta function and the upper incomplete gamma for
//! non-positive shapes are not available there and are evaluated here.

pub use statrs::function::erf::erfc;
use statrs::function::gamma::{gamma_ui, ln_gamma};

/// Relative precision targeted by the series below
const MACHEP: f64 = 1.110_223_024_625_156_5e-16;

/// Guards Lentz's method against division by zero
const FPMIN: f64 = 1e-300;

const MAX_ITER: usize = 500;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// (2k)! / B_2k, the Euler-Maclaurin tail coefficients
const EULER_MACLAURIN: [f64; 12] = [
    12.0,
    -720.0,
    30240.0,
    -1209600.0,
    47900160.0,
    -1.892_437_580_318_379_2e9,
    7.472_424_96e10,
    -2.950_130_727_918_164_3e12,
    1.164_678_281_435_006_7e14,
    -4.597_978_722_407_472_6e15,
    1.815_210_540_194_354_7e17,
    -7.166_165_256_175_667e18,
];

/// Hurwitz zeta function ζ(s, q) = Σ_{k≥0} (q + k)^(-s)
///
/// Defined here for s > 1 and q > 0. Returns +∞ at s = 1 and NaN outside
/// the domain.
///
/// # Examples
///
/// ```rust
/// use tails_core::math::hurwitz_zeta;
///
/// let basel = std::f64::consts::PI.powi(2) / 6.0;
/// assert!((hurwitz_zeta(2.0, 1.0) - basel).abs() < 1e-12);
/// ```
pub fn hurwitz_zeta(s: f64, q: f64) -> f64 {
    if s.is_nan() || q.is_nan() {
        return f64::NAN;
    }
    if s == 1.0 {
        return f64::INFINITY;
    }
    if s < 1.0 || q <= 0.0 {
        return f64::NAN;
    }

    // Direct summation until the remaining tail is smooth enough
    let mut sum = q.powf(-s);
    let mut a = q;
    let mut b = 0.0;
    let mut i = 0;
    while i < 9 || a <= 9.0 {
        i += 1;
        a += 1.0;
        b = a.powf(-s);
        sum += b;
        if (b / sum).abs() < MACHEP {
            return sum;
        }
    }

    // Euler-Maclaurin correction for the tail starting at `w`
    let w = a;
    sum += b * w / (s - 1.0);
    sum -= 0.5 * b;
    let mut factor = 1.0;
    let mut k = 0.0;
    for coefficient in EULER_MACLAURIN {
        factor *= s + k;
        b /= w;
        let term = factor * b / coefficient;
        sum += term;
        if (term / sum).abs() < MACHEP {
            return sum;
        }
        k += 1.0;
        factor *= s + k;
        b /= w;
        k += 1.0;
    }
    sum
}

/// Natural log of the upper incomplete gamma function Γ(s, x)
///
/// Accepts any real shape `s`, including zero and negative values, and
/// x ≥ 0. Working in log space keeps Γ(s, x) usable when it underflows.
pub fn ln_upper_incomplete_gamma(s: f64, x: f64) -> f64 {
    if s.is_nan() || x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return if s > 0.0 { ln_gamma(s) } else { f64::INFINITY };
    }
    if x > 1.0 && x > s + 1.0 {
        return continued_fraction_ln(s, x);
    }
    if s > 0.0 {
        return gamma_ui(s, x).ln();
    }
    downward_recurrence(s, x).ln()
}

/// Upper incomplete gamma function Γ(s, x) for any real shape
///
/// # Examples
///
/// ```rust
/// use tails_core::math::upper_incomplete_gamma;
///
/// // Γ(1, x) = e^{-x}
/// assert!((upper_incomplete_gamma(1.0, 3.0) - (-3.0_f64).exp()).abs() < 1e-14);
/// ```
pub fn upper_incomplete_gamma(s: f64, x: f64) -> f64 {
    ln_upper_incomplete_gamma(s, x).exp()
}

/// Lentz evaluation of the continued fraction for Γ(s, x), valid for x > s + 1
fn continued_fraction_ln(s: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - s;
    let mut c = 1.0 / FPMIN;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=MAX_ITER {
        let i = i as f64;
        let an = -i * (i - s);
        b += 2.0;
        d = an * d + b;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = b + an / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < MACHEP {
            break;
        }
    }
    -x + s * x.ln() + h.ln()
}

/// Γ(s, x) for s ≤ 0 and 0 < x ≤ 1 by stepping down from a positive shape
///
/// Uses Γ(a, x) = (Γ(a + 1, x) - x^a e^{-x}) / a.
fn downward_recurrence(s: f64, x: f64) -> f64 {
    let (mut a, mut value, steps) = if s.fract() == 0.0 {
        (0.0, exponential_integral_e1(x), (-s) as usize)
    } else {
        let steps = (-s).ceil();
        let base = s + steps;
        (base, gamma_ui(base, x), steps as usize)
    };
    let decay = (-x).exp();
    for _ in 0..steps {
        a -= 1.0;
        value = (value - x.powf(a) * decay) / a;
    }
    value
}

/// Exponential integral E₁(x) = Γ(0, x) by its power series, for 0 < x ≤ 1
fn exponential_integral_e1(x: f64) -> f64 {
    let mut sum = 0.0;
    let mut term = 1.0;
    for k in 1..=MAX_ITER {
        let k = k as f64;
        term *= -x / k;
        let addend = term / k;
        sum += addend;
        if addend.abs() < MACHEP * sum.abs() {
            break;
        }
    }
    -EULER_GAMMA - x.ln() - sum
}
