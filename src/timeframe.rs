use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ParseLabelError;

/// Reporting period for the calculator output.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Daily,
    Weekly,
    #[default]
    Annual,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 3] = [TimeFrame::Annual, TimeFrame::Weekly, TimeFrame::Daily];

    /// Label as shown in the form's time frame select.
    pub fn label(self) -> &'static str {
        match self {
            TimeFrame::Daily => "daily",
            TimeFrame::Weekly => "weekly",
            TimeFrame::Annual => "annual",
        }
    }

    /// Annual figures are divided by this to get the period figure.
    pub fn divisor(self) -> f64 {
        match self {
            TimeFrame::Daily => 365.0,
            TimeFrame::Weekly => 52.0,
            TimeFrame::Annual => 1.0,
        }
    }

    /// Lenient lookup used by the form. Only the exact select values match
    /// (`"weekly"`, not `"Weekly"`); anything else is annual.
    pub fn from_label(label: &str) -> Self {
        match TimeFrame::ALL.into_iter().find(|frame| frame.label() == label) {
            Some(frame) => frame,
            None => {
                warn!(label, "unrecognized time frame, falling back to annual");
                TimeFrame::Annual
            }
        }
    }
}

/// Strict parse: trims and ignores ASCII case, but errors on unknown labels.
impl FromStr for TimeFrame {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TimeFrame::ALL
            .into_iter()
            .find(|frame| frame.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError {
                kind: "time frame",
                label: s.to_string(),
            })
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
