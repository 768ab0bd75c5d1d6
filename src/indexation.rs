// 📈 Rent Indexation - new rent + validation of date, percentage, contract type
//
// Indexation is the yearly, regulation-driven rent increase.
// Validators never fail hard through errors: they return a ValidationOutcome
// (failure / warning / pass) so the caller can branch on it.

use crate::config::EngineConfig;
use crate::entities::{Contract, ContractType};
use crate::validation::ValidationOutcome;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Round to cents, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// CALCULATOR
// ============================================================================

/// New rent after applying an indexation percentage.
///
/// Zero (or non-finite) rent or percentage returns the rent unchanged.
pub fn calculate_new_rent(current_rent: f64, percentage: f64) -> f64 {
    if current_rent == 0.0 || percentage == 0.0 || !current_rent.is_finite() || !percentage.is_finite() {
        return current_rent;
    }

    round2(current_rent * (1.0 + percentage / 100.0))
}

// ============================================================================
// VALIDATORS
// ============================================================================

/// Change date must not lie in the past; less than the notice period is a warning.
pub fn validate_indexation_date(change_date: NaiveDate, today: NaiveDate) -> ValidationOutcome {
    validate_indexation_date_with(change_date, today, &EngineConfig::default())
}

pub fn validate_indexation_date_with(
    change_date: NaiveDate,
    today: NaiveDate,
    config: &EngineConfig,
) -> ValidationOutcome {
    if change_date < today {
        return ValidationOutcome::fail("The change date lies in the past");
    }

    let days_left = (change_date - today).num_days();
    if days_left < config.notice_days {
        return ValidationOutcome::warn(format!(
            "Only {} days until the change date. Tenants must be notified at least {} days in advance.",
            days_left, config.notice_days
        ));
    }

    ValidationOutcome::pass()
}

/// Negative percentages are rejected; above the high threshold is a warning.
pub fn validate_indexation_percentage(percentage: f64) -> ValidationOutcome {
    validate_indexation_percentage_with(percentage, &EngineConfig::default())
}

pub fn validate_indexation_percentage_with(percentage: f64, config: &EngineConfig) -> ValidationOutcome {
    if percentage.is_nan() {
        return ValidationOutcome::fail("Indexation percentage is not a number");
    }

    if percentage < 0.0 {
        return ValidationOutcome::fail("Indexation percentage cannot be negative");
    }

    if percentage > config.high_indexation_pct {
        return ValidationOutcome::warn(format!(
            "An indexation of {}% is higher than usual (above {}%). Check the legal maximum.",
            percentage, config.high_indexation_pct
        ));
    }

    ValidationOutcome::pass()
}

/// Airbnb and koop contracts are never indexed.
pub fn validate_contract_type_for_indexation(contract_type: &str) -> ValidationOutcome {
    match ContractType::parse(contract_type) {
        ContractType::Airbnb => ValidationOutcome::fail(
            "Airbnb contracts are short-stay rentals and are not subject to rent indexation",
        ),
        ContractType::Koop => ValidationOutcome::fail(
            "Koop (purchase) contracts have no rent and cannot be indexed",
        ),
        _ => ValidationOutcome::pass(),
    }
}

// ============================================================================
// INDEXATION PLAN
// ============================================================================

/// All checks plus the computed rent for one contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexationPlan {
    pub contract_id: String,
    pub current_rent: f64,
    pub percentage: f64,
    pub new_rent: f64,
    pub increase: f64,
    pub change_date: Option<NaiveDate>,
    pub contract_type_check: ValidationOutcome,
    pub percentage_check: ValidationOutcome,
    pub date_check: ValidationOutcome,
}

impl IndexationPlan {
    pub fn is_allowed(&self) -> bool {
        self.checks().iter().all(|c| c.valid)
    }

    /// First hard failure, checked in contract type, percentage, date order
    pub fn blocking_reason(&self) -> Option<&str> {
        self.checks()
            .into_iter()
            .find(|c| c.is_blocking())
            .and_then(|c| c.message())
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.checks()
            .into_iter()
            .filter(|c| c.valid)
            .filter_map(|c| c.message())
            .collect()
    }

    fn checks(&self) -> [&ValidationOutcome; 3] {
        [&self.contract_type_check, &self.percentage_check, &self.date_check]
    }
}

/// Run every indexation rule against a contract
pub fn plan_indexation(
    contract: &Contract,
    percentage: f64,
    today: NaiveDate,
    config: &EngineConfig,
) -> IndexationPlan {
    let contract_type_check = validate_contract_type_for_indexation(contract.contract_type.as_str());
    let percentage_check = validate_indexation_percentage_with(percentage, config);
    let date_check = match contract.next_change_date {
        Some(date) => validate_indexation_date_with(date, today, config),
        None => ValidationOutcome::fail("No change date set for this contract"),
    };

    let new_rent = calculate_new_rent(contract.monthly_rent, percentage);

    let plan = IndexationPlan {
        contract_id: contract.id.clone(),
        current_rent: contract.monthly_rent,
        percentage,
        new_rent,
        increase: round2(new_rent - contract.monthly_rent),
        change_date: contract.next_change_date,
        contract_type_check,
        percentage_check,
        date_check,
    };

    if let Some(reason) = plan.blocking_reason() {
        tracing::info!(contract = %contract.id, reason, "indexation blocked");
    }

    plan
}

// ============================================================================
// TESTS
// ============================================================================
