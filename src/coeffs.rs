/// Coefficients of a 3rd-order recursive Gaussian approximation
/// (van Vliet / Deriche family).
///
/// `b0` weighs the current input sample; `b1..b3` weigh the previous three
/// already-filtered outputs in the scan direction. The four weights sum to 1,
/// so a flat region passes through the filter unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub b3: f64,
}

impl Coefficients {
    /// Derives filter coefficients from a blur amount.
    ///
    /// Negative (and NaN) amounts are treated as 0, which yields the
    /// identity filter: `b0 = 1`, `b1 = b2 = b3 = 0`.
    pub fn solve(amount: f64) -> Self {
        let amount = amount.max(0.0);

        // Empirical curve fit; three regimes keep the polynomial ratios
        // below well-conditioned. The lowest branch evaluates the middle
        // formula at the fixed point 0.5 and scales linearly toward zero,
        // so amount = 0 needs no square root near the domain edge.
        let q = if amount >= 2.5 {
            0.98711 * amount - 0.96330
        } else if amount >= 0.5 {
            3.97156 - 4.14554 * (1.0 - 0.26891 * amount).sqrt()
        } else {
            2.0 * amount * (3.97156 - 4.14554 * (1.0_f64 - 0.26891 * 0.5).sqrt())
        };

        let q2 = q * q;
        let q3 = q2 * q;
        let denom = 1.57825 + 2.44413 * q + 1.4281 * q2 + 0.422205 * q3;
        let b1 = (2.44413 * q + 2.85619 * q2 + 1.26661 * q3) / denom;
        let b2 = -(1.4281 * q2 + 1.26661 * q3) / denom;
        let b3 = 0.422205 * q3 / denom;
        let b0 = 1.0 - (b1 + b2 + b3);

        Self { b0, b1, b2, b3 }
    }
}
