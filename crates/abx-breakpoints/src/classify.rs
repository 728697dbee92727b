use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use abx_core::CoreError;
use abx_core::Choices;
use abx_core::keywords::vocabulary;
use abx_core::models::breakpoint::{Breakpoint, MicResistantBound, threshold};

/// The measurement a value was obtained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Method {
    /// Disk diffusion, zone of inhibition in mm. Larger is more susceptible.
    ZoneDiameter,
    /// Minimum inhibitory concentration in mg/L. Lower is more potent.
    Mic,
}

/// Susceptibility testing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SensitivityCategory {
    #[serde(rename = "S")]
    Susceptible,
    #[serde(rename = "I")]
    Intermediate,
    #[serde(rename = "R")]
    Resistant,
}

impl SensitivityCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SensitivityCategory::Susceptible => "S",
            SensitivityCategory::Intermediate => "I",
            SensitivityCategory::Resistant => "R",
        }
    }
}

impl fmt::Display for SensitivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a raw interim value as a measurement. Only finite, non-negative
/// numbers qualify; anything else means "not determined yet".
pub fn parse_measurement(value: &str) -> Option<f64> {
    let number: f64 = value.trim().parse().ok()?;
    (number.is_finite() && number >= 0.0).then_some(number)
}

/// Classify a measured value against a breakpoint.
///
/// Returns `None` when the value is not a measurement, when there is no
/// breakpoint, or when the breakpoint configures no threshold for `method`.
pub fn classify(
    value: &str,
    breakpoint: Option<&Breakpoint>,
    method: Method,
) -> Option<SensitivityCategory> {
    let value = parse_measurement(value)?;
    let breakpoint = breakpoint?;

    match method {
        Method::ZoneDiameter => {
            let s = threshold(breakpoint.diameter_s);
            let r = threshold(breakpoint.diameter_r);
            categorize(
                r.is_some_and(|r| value < r),
                s.is_some_and(|s| value >= s),
                s.is_some() && r.is_some(),
            )
        }
        Method::Mic => {
            let s = threshold(breakpoint.mic_s);
            let r = threshold(breakpoint.mic_r);
            let resistant = r.is_some_and(|r| match breakpoint.mic_r_bound {
                MicResistantBound::AtOrAbove => value >= r,
                MicResistantBound::Above => value > r,
            });
            categorize(
                resistant,
                s.is_some_and(|s| value <= s),
                s.is_some() && r.is_some(),
            )
        }
    }
}

fn categorize(
    resistant: bool,
    susceptible: bool,
    fully_configured: bool,
) -> Option<SensitivityCategory> {
    if resistant {
        Some(SensitivityCategory::Resistant)
    } else if susceptible {
        Some(SensitivityCategory::Susceptible)
    } else if fully_configured {
        Some(SensitivityCategory::Intermediate)
    } else {
        None
    }
}

/// Map a category label (`S`, `I`, `R`) to its code in the sensitivity
/// vocabulary. An unknown label means the vocabulary is corrupted.
pub fn classify_to_code(label: &str) -> Result<String, CoreError> {
    let choices: Choices = vocabulary::SENSITIVITY.parse()?;
    if label.is_empty() {
        return Err(CoreError::UnknownCategory(label.to_string()));
    }
    choices
        .code_for(label)
        .map(str::to_string)
        .ok_or_else(|| CoreError::UnknownCategory(label.to_string()))
}
