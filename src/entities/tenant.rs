// 👤 Tenant Entity - who pays rent and needs a recibo
//
// The engine only reads tenants. Creation and persistence belong to the
// data layer; `Tenant::new` exists for loaders and tests.

use crate::config::DEFAULT_REMINDER_DAY;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// TENANT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    /// Stable identity (UUID)
    pub id: String,

    pub name: String,

    /// Property this tenant rents
    pub property_id: String,

    /// Inactive tenants never get reminders
    pub active: bool,

    /// Date of the last recibo de renda received (None = never)
    #[serde(default)]
    pub last_recibo_date: Option<NaiveDate>,

    /// Herinnering dag (day of month), None = default
    #[serde(default)]
    pub reminder_day: Option<u32>,
}

impl Tenant {
    /// Create new active tenant with UUID
    pub fn new(name: String, property_id: String) -> Self {
        Tenant {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            property_id,
            active: true,
            last_recibo_date: None,
            reminder_day: None,
        }
    }

    pub fn with_last_recibo(mut self, date: NaiveDate) -> Self {
        self.last_recibo_date = Some(date);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Configured reminder day, falling back to the 5th
    pub fn reminder_day(&self) -> u32 {
        self.reminder_day_or(DEFAULT_REMINDER_DAY)
    }

    /// Configured reminder day, falling back to `default`
    pub fn reminder_day_or(&self, default: u32) -> u32 {
        match self.reminder_day {
            Some(day) if (1..=31).contains(&day) => day,
            _ => default,
        }
    }

    pub fn has_received_recibo(&self) -> bool {
        self.last_recibo_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_creation() {
        let tenant = Tenant::new("Ana Silva".to_string(), "prop-1".to_string());

        assert!(!tenant.id.is_empty());
        assert!(tenant.active);
        assert!(!tenant.has_received_recibo());
        assert_eq!(tenant.reminder_day(), 5);
    }

    #[test]
    fn test_reminder_day_out_of_range_falls_back() {
        let mut tenant = Tenant::new("Ana".to_string(), "p".to_string());
        tenant.reminder_day = Some(12);
        assert_eq!(tenant.reminder_day(), 12);

        tenant.reminder_day = Some(0);
        assert_eq!(tenant.reminder_day(), 5);

        tenant.reminder_day = Some(40);
        assert_eq!(tenant.reminder_day(), 5);
    }

    #[test]
    fn test_reminder_day_or_uses_given_default() {
        let mut tenant = Tenant::new("Ana".to_string(), "p".to_string());
        assert_eq!(tenant.reminder_day_or(12), 12);

        tenant.reminder_day = Some(20);
        assert_eq!(tenant.reminder_day_or(12), 20);
    }
}
