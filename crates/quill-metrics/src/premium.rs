//! Subject-versus-benchmark premiums.

use serde::{Deserialize, Serialize};

/// Whether the subject's position against its benchmark is good news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Favorable,
    Unfavorable,
    Neutral,
}

impl Standing {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorable => "favorable",
            Self::Unfavorable => "unfavorable",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremiumOutcome {
    /// Relative premium, `None` when the pair crosses zero or the benchmark
    /// is zero.
    pub premium: Option<f64>,
    pub standing: Standing,
    /// Subject and benchmark sit on opposite sides of zero.
    pub crossed_zero: bool,
}

/// Premium of `subject` over `benchmark`.
///
/// Same-sign pairs use `subject / benchmark - 1`. For two negative values the
/// sign of that ratio no longer says which side is better, so read `standing`
/// for that. Pairs on opposite sides of zero, and a zero benchmark, are not
/// run through the ratio: the standing follows which side is higher.
pub fn benchmark_premium(subject: f64, benchmark: f64, higher_is_better: bool) -> PremiumOutcome {
    if !subject.is_finite() || !benchmark.is_finite() {
        return PremiumOutcome {
            premium: None,
            standing: Standing::Neutral,
            crossed_zero: false,
        };
    }

    let crossed_zero = (subject < 0.0) != (benchmark < 0.0) && subject != 0.0 && benchmark != 0.0;
    let premium = if crossed_zero || benchmark == 0.0 {
        None
    } else {
        Some(subject / benchmark - 1.0)
    };

    let standing = if subject == benchmark {
        Standing::Neutral
    } else if (subject > benchmark) == higher_is_better {
        Standing::Favorable
    } else {
        Standing::Unfavorable
    };

    PremiumOutcome {
        premium,
        standing,
        crossed_zero,
    }
}
