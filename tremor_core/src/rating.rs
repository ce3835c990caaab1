//! Three-tier ratings shown next to test results.
//!
//! Thresholds are fixed policy, not configuration.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Good,
    Moderate,
    NeedsAttention,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rating::Good => "Good",
            Rating::Moderate => "Moderate",
            Rating::NeedsAttention => "Needs Attention",
        })
    }
}

/// Line-trace deviation in pixels: lower is better.
pub const DEVIATION_GOOD_BELOW_PX: u32 = 8;
pub const DEVIATION_MODERATE_BELOW_PX: u32 = 18;

/// Stability score out of 100: higher is better.
pub const STABILITY_GOOD_FROM: u32 = 75;
pub const STABILITY_MODERATE_FROM: u32 = 55;

pub fn rate_deviation(px: u32) -> Rating {
    if px < DEVIATION_GOOD_BELOW_PX {
        Rating::Good
    } else if px < DEVIATION_MODERATE_BELOW_PX {
        Rating::Moderate
    } else {
        Rating::NeedsAttention
    }
}

pub fn rate_stability(score: u32) -> Rating {
    if score >= STABILITY_GOOD_FROM {
        Rating::Good
    } else if score >= STABILITY_MODERATE_FROM {
        Rating::Moderate
    } else {
        Rating::NeedsAttention
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deviation_tier_edges() {
        assert_eq!(rate_deviation(0), Rating::Good);
        assert_eq!(rate_deviation(7), Rating::Good);
        assert_eq!(rate_deviation(8), Rating::Moderate);
        assert_eq!(rate_deviation(17), Rating::Moderate);
        assert_eq!(rate_deviation(18), Rating::NeedsAttention);
    }

    #[test]
    fn stability_tier_edges() {
        assert_eq!(rate_stability(100), Rating::Good);
        assert_eq!(rate_stability(75), Rating::Good);
        assert_eq!(rate_stability(74), Rating::Moderate);
        assert_eq!(rate_stability(55), Rating::Moderate);
        assert_eq!(rate_stability(54), Rating::NeedsAttention);
    }

    #[test]
    fn display_text() {
        assert_eq!(Rating::NeedsAttention.to_string(), "Needs Attention");
    }
}
