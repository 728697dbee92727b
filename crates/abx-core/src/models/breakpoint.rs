use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A named clinical guideline (EUCAST, CLSI...) holding breakpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BreakpointsTable {
    pub uid: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub breakpoints: Vec<Breakpoint>,
}

/// How the MIC resistant threshold compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MicResistantBound {
    /// Resistant when `value >= mic_r`.
    #[default]
    AtOrAbove,
    /// Resistant when `value > mic_r`.
    Above,
}

/// Thresholds for one antibiotic against one microorganism or category.
///
/// A threshold of `0` means "not set".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Breakpoint {
    pub antibiotic: Uuid,
    /// Microorganism or microorganism category.
    pub microorganism: Uuid,
    /// Reference dose of the diffusion disk (μg).
    #[serde(default)]
    pub disk_content: f64,
    /// Susceptible at or above (mm).
    #[serde(default)]
    pub diameter_s: f64,
    /// Resistant below (mm).
    #[serde(default)]
    pub diameter_r: f64,
    /// Susceptible at or below (mg/L).
    #[serde(default)]
    pub mic_s: f64,
    /// Resistant threshold (mg/L), see [`MicResistantBound`].
    #[serde(default)]
    pub mic_r: f64,
    #[serde(default)]
    pub mic_r_bound: MicResistantBound,
}

impl Breakpoint {
    pub fn new(antibiotic: Uuid, microorganism: Uuid) -> Self {
        Self {
            antibiotic,
            microorganism,
            disk_content: 0.0,
            diameter_s: 0.0,
            diameter_r: 0.0,
            mic_s: 0.0,
            mic_r: 0.0,
            mic_r_bound: MicResistantBound::default(),
        }
    }

    pub fn with_diameters(mut self, s: f64, r: f64) -> Self {
        self.diameter_s = s;
        self.diameter_r = r;
        self
    }

    pub fn with_mics(mut self, s: f64, r: f64) -> Self {
        self.mic_s = s;
        self.mic_r = r;
        self
    }

    pub fn with_disk_content(mut self, dose: f64) -> Self {
        self.disk_content = dose;
        self
    }

    /// The disk dose, if configured.
    pub fn dose(&self) -> Option<f64> {
        threshold(self.disk_content)
    }
}

/// A configured threshold is a finite, strictly positive number.
pub fn threshold(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}
