// 🧾 Recibo Reminder Engine - who still owes us a recibo de renda
//
// Per tenant, three states:
//   never-received → no recibo on file
//   current        → last recibo at most 35 days ago
//   overdue        → more than 35 days ago, or never received
//
// The 35-day threshold is a buffer over the monthly cycle for processing delay.
// "today" is always passed in; nothing here reads the clock.

use crate::config::{EngineConfig, DEFAULT_REMINDER_DAY};
use crate::entities::Tenant;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// OVERDUE CHECKS
// ============================================================================

/// Whole days elapsed since the last recibo (None = never received)
pub fn days_since_last_recibo(last_date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    last_date.map(|last| (today - last).num_days())
}

pub fn is_recibo_overdue(last_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    is_recibo_overdue_with(last_date, today, &EngineConfig::default())
}

pub fn is_recibo_overdue_with(
    last_date: Option<NaiveDate>,
    today: NaiveDate,
    config: &EngineConfig,
) -> bool {
    match days_since_last_recibo(last_date, today) {
        None => true,
        Some(days) => days > config.overdue_days,
    }
}

/// Inactive tenants never need a reminder
pub fn needs_recibo_reminder(tenant: &Tenant, today: NaiveDate) -> bool {
    needs_recibo_reminder_with(tenant, today, &EngineConfig::default())
}

pub fn needs_recibo_reminder_with(tenant: &Tenant, today: NaiveDate, config: &EngineConfig) -> bool {
    if !tenant.active {
        return false;
    }

    is_recibo_overdue_with(tenant.last_recibo_date, today, config)
}

/// Tenants needing a reminder, in input order
pub fn get_openstaande_recibos<'a>(tenants: &'a [Tenant], today: NaiveDate) -> Vec<&'a Tenant> {
    get_openstaande_recibos_with(tenants, today, &EngineConfig::default())
}

pub fn get_openstaande_recibos_with<'a>(
    tenants: &'a [Tenant],
    today: NaiveDate,
    config: &EngineConfig,
) -> Vec<&'a Tenant> {
    let open: Vec<&Tenant> = tenants
        .iter()
        .filter(|t| needs_recibo_reminder_with(t, today, config))
        .collect();

    tracing::debug!(total = tenants.len(), open = open.len(), "open recibos computed");
    open
}

// ============================================================================
// STATE & STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReciboState {
    NeverReceived,
    Current,
    Overdue,
}

pub fn recibo_state(last_date: Option<NaiveDate>, today: NaiveDate, config: &EngineConfig) -> ReciboState {
    match days_since_last_recibo(last_date, today) {
        None => ReciboState::NeverReceived,
        Some(days) if days > config.overdue_days => ReciboState::Overdue,
        Some(_) => ReciboState::Current,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReciboStatusLevel {
    /// ≤ 35 days
    UpToDate,
    /// 36–60 days
    ActionRequired,
    /// > 60 days or never received
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReciboStatus {
    pub level: ReciboStatusLevel,
    pub label: String,

    /// Severity colour tag for the UI
    pub color: String,

    pub description: String,
    pub days_since: Option<i64>,
}

pub fn get_recibo_status(last_date: Option<NaiveDate>, today: NaiveDate) -> ReciboStatus {
    get_recibo_status_with(last_date, today, &EngineConfig::default())
}

pub fn get_recibo_status_with(
    last_date: Option<NaiveDate>,
    today: NaiveDate,
    config: &EngineConfig,
) -> ReciboStatus {
    let days = match days_since_last_recibo(last_date, today) {
        Some(days) => days.max(0),
        None => {
            return ReciboStatus {
                level: ReciboStatusLevel::Overdue,
                label: "Overdue".to_string(),
                color: "red".to_string(),
                description: "No recibo received yet".to_string(),
                days_since: None,
            };
        }
    };

    let (level, label, color, description) = if days <= config.overdue_days {
        (
            ReciboStatusLevel::UpToDate,
            "Up to date",
            "green",
            format!("Last recibo received {} days ago", days),
        )
    } else if days <= config.critical_days {
        (
            ReciboStatusLevel::ActionRequired,
            "Action required",
            "orange",
            format!("Last recibo received {} days ago, request a new one", days),
        )
    } else {
        (
            ReciboStatusLevel::Overdue,
            "Overdue",
            "red",
            format!("No recibo for {} days", days),
        )
    };

    ReciboStatus {
        level,
        label: label.to_string(),
        color: color.to_string(),
        description,
        days_since: Some(days),
    }
}

// ============================================================================
// NEXT REMINDER DATE
// ============================================================================

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// `day` in the given month, clamped to the month's length
fn occurrence(year: i32, month: u32, day: u32) -> NaiveDate {
    let clamped = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, clamped)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN))
}

/// Next occurrence of the day-of-month strictly after `today`.
///
/// Takes this month's occurrence; if that is not after `today`, rolls to the
/// next month. Day 0 or above 31 falls back to the 5th.
pub fn get_next_reminder_date(day: u32, today: NaiveDate) -> NaiveDate {
    let day = if (1..=31).contains(&day) { day } else { DEFAULT_REMINDER_DAY };

    let candidate = occurrence(today.year(), today.month(), day);
    if candidate > today {
        return candidate;
    }

    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    occurrence(year, month, day)
}

// ============================================================================
// REMINDER ROWS
// ============================================================================

/// One row of the "openstaande recibos" dashboard widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReciboReminder {
    pub tenant_id: String,
    pub tenant_name: String,
    pub property_id: String,
    pub status: ReciboStatus,
    pub next_reminder: NaiveDate,
}

pub fn build_recibo_reminders(tenants: &[Tenant], today: NaiveDate, config: &EngineConfig) -> Vec<ReciboReminder> {
    get_openstaande_recibos_with(tenants, today, config)
        .into_iter()
        .map(|tenant| ReciboReminder {
            tenant_id: tenant.id.clone(),
            tenant_name: tenant.name.clone(),
            property_id: tenant.property_id.clone(),
            status: get_recibo_status_with(tenant.last_recibo_date, today, config),
            next_reminder: get_next_reminder_date(tenant.reminder_day_or(config.reminder_day), today),
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
