use serde::{Deserialize, Serialize};
use shared_types::{CriticalAlert, Severity};

pub const MAX_SCORE: i64 = 100;
pub const CRITICAL_PENALTY: i64 = 30;
pub const WARNING_PENALTY: i64 = 10;

/// Linear penalty score: 100 minus 30 per critical and 10 per warning, floored at 0
pub fn health_score(alerts: &[CriticalAlert]) -> u8 {
    let count = |severity: Severity| alerts.iter().filter(|a| a.severity == severity).count() as i64;

    let penalty = count(Severity::Critical) * CRITICAL_PENALTY
        + count(Severity::Warning) * WARNING_PENALTY;

    (MAX_SCORE - penalty).clamp(0, MAX_SCORE) as u8
}

/// Coarse reading of a health score for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Critical,
    NeedsAttention,
    AllGood,
}

impl HealthBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=40 => HealthBand::Critical,
            41..=70 => HealthBand::NeedsAttention,
            _ => HealthBand::AllGood,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::Critical => "Critical",
            HealthBand::NeedsAttention => "Needs Attention",
            HealthBand::AllGood => "All Good",
        }
    }
}
