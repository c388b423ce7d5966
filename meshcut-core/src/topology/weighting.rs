//! Mapping from link quality to edge weight.

/// Policy turning a reported SNR into a link weight.
///
/// Stronger links must weigh more, so the minimum cut favours the links the
/// mesh is least able to lose.
///
/// # Examples
/// ```
/// use meshcut_core::LinkWeighting;
///
/// let weighting = LinkWeighting::default();
/// assert!(weighting.weight(10.0) > weighting.weight(-5.0));
/// assert!(weighting.weight(-20.0) > 0.0);
/// assert_eq!(LinkWeighting::Uniform.weight(-20.0), 1.0);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkWeighting {
    /// Every link weighs `1.0`; the cut counts links.
    Uniform,
    /// Shannon capacity per hertz, `log2(1 + 10^(snr_db / 10))`.
    #[default]
    ShannonCapacity,
}

impl LinkWeighting {
    /// Returns the weight for a link reported at `snr_db`.
    ///
    /// Non-finite SNR readings weigh zero, which drops the link. Every finite
    /// reading yields a finite weight.
    #[must_use]
    pub fn weight(self, snr_db: f64) -> f64 {
        if !snr_db.is_finite() {
            return 0.0;
        }
        match self {
            Self::Uniform => 1.0,
            Self::ShannonCapacity => shannon_capacity(snr_db / 10.0),
        }
    }
}

/// `log2(1 + 10^exponent)`. Positive exponents are split as
/// `exponent·log2(10) + log2(1 + 10^-exponent)` so `10^exponent` never
/// overflows.
fn shannon_capacity(exponent: f64) -> f64 {
    use std::f64::consts::{LN_2, LOG2_10};

    if exponent > 0.0 {
        exponent.mul_add(LOG2_10, 10f64.powf(-exponent).ln_1p() / LN_2)
    } else {
        10f64.powf(exponent).ln_1p() / LN_2
    }
}
