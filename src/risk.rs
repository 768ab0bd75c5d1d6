// ⚠️ Risk Scoring - five dimensions, one total
//
// Dimensions: legal, market, fiscal, physical, operational (each 1-5).
// The VvE reserve fund moves the physical score by one step:
//   reserve >= 80%  → physical - 1
//   reserve <  50%  → physical + 1
// The modifier is added first, then the result is clamped to [1,5].
//
// Total (5-25):  < 10 low | 10-15 medium | > 15 high

use crate::config::EngineConfig;
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

// ============================================================================
// INPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScores {
    pub legal: i32,
    pub market: i32,
    pub fiscal: i32,
    pub physical: i32,
    pub operational: i32,
}

impl RiskScores {
    pub fn new(legal: i32, market: i32, fiscal: i32, physical: i32, operational: i32) -> Self {
        RiskScores {
            legal,
            market,
            fiscal,
            physical,
            operational,
        }
    }

    pub fn uniform(score: i32) -> Self {
        Self::new(score, score, score, score, score)
    }

    pub fn total(&self) -> i32 {
        self.legal + self.market + self.fiscal + self.physical + self.operational
    }
}

// ============================================================================
// RISK LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_total(total: i32) -> Self {
        if total < 10 {
            RiskLevel::Low
        } else if total <= 15 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low risk",
            RiskLevel::Medium => "medium risk",
            RiskLevel::High => "high risk",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "orange",
            RiskLevel::High => "red",
        }
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Scores after clamping and the reserve modifier
    pub scores: RiskScores,

    /// -1, 0 or +1 applied to the physical dimension
    pub reserve_modifier: i32,

    pub total: i32,
    pub level: RiskLevel,
    pub label: String,
}

fn clamp_score(score: i32) -> i32 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Physical-score modifier for a reserve fund fill percentage
pub fn reserve_fund_modifier(reserve_pct: Option<f64>, config: &EngineConfig) -> i32 {
    match reserve_pct {
        Some(pct) if pct >= config.reserve_healthy_pct => -1,
        Some(pct) if pct < config.reserve_weak_pct => 1,
        _ => 0,
    }
}

pub fn assess_risk(scores: RiskScores, reserve_pct: Option<f64>) -> RiskAssessment {
    assess_risk_with(scores, reserve_pct, &EngineConfig::default())
}

pub fn assess_risk_with(scores: RiskScores, reserve_pct: Option<f64>, config: &EngineConfig) -> RiskAssessment {
    let modifier = reserve_fund_modifier(reserve_pct, config);

    let adjusted = RiskScores {
        legal: clamp_score(scores.legal),
        market: clamp_score(scores.market),
        fiscal: clamp_score(scores.fiscal),
        physical: clamp_score(scores.physical + modifier),
        operational: clamp_score(scores.operational),
    };

    let total = adjusted.total();
    let level = RiskLevel::from_total(total);

    RiskAssessment {
        scores: adjusted,
        reserve_modifier: modifier,
        total,
        level,
        label: level.label().to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
