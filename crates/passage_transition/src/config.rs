//! Orchestrator configuration

use passage_core::AnimationCurve;
use serde::Deserialize;

use crate::error::Result;

/// Duration of the `default` kind's fade
pub const DEFAULT_KIND_DURATION_MS: u32 = 150;

/// Duration of presets and custom transitions that carry none
pub const PRESET_DURATION_MS: u32 = 300;

/// Configuration for a [`TransitionOrchestrator`](crate::TransitionOrchestrator)
///
/// Every field is optional in TOML:
///
/// ```toml
/// default_kind_duration_ms = 150
/// preset_duration_ms = 250
/// default_curve = "linear"
/// trace_events = false
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Duration of the fallback fade used by the `default` kind
    pub default_kind_duration_ms: u32,
    /// Duration applied when a descriptor does not carry one
    pub preset_duration_ms: u32,
    /// Curve applied when a descriptor does not carry one
    pub default_curve: AnimationCurve,
    /// Log every listener event at trace level
    pub trace_events: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_kind_duration_ms: DEFAULT_KIND_DURATION_MS,
            preset_duration_ms: PRESET_DURATION_MS,
            default_curve: AnimationCurve::EaseInOut,
            trace_events: true,
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn default_kind_duration(mut self, duration_ms: u32) -> Self {
        self.default_kind_duration_ms = duration_ms;
        self
    }

    pub fn preset_duration(mut self, duration_ms: u32) -> Self {
        self.preset_duration_ms = duration_ms;
        self
    }

    pub fn default_curve(mut self, curve: AnimationCurve) -> Self {
        self.default_curve = curve;
        self
    }

    pub fn trace_events(mut self, enabled: bool) -> Self {
        self.trace_events = enabled;
        self
    }
}
