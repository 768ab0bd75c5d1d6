// 📊 Portfolio Overview - dashboard numbers from the current records
//
// Counts and totals only; rendering is the caller's job.

use crate::config::EngineConfig;
use crate::entities::{property_name, Contract, Property, Tenant};
use crate::recibo::get_openstaande_recibos_with;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingIndexation {
    pub contract_id: String,
    pub property_id: String,
    pub property_name: Option<String>,
    pub change_date: NaiveDate,
    pub days_until: i64,
    pub monthly_rent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioOverview {
    pub property_count: usize,
    pub active_tenant_count: usize,
    pub open_recibo_count: usize,
    pub total_monthly_rent: f64,

    /// Indexable contracts changing within the horizon, soonest first
    pub upcoming_indexations: Vec<UpcomingIndexation>,
}

impl PortfolioOverview {
    pub fn build(
        properties: &[Property],
        tenants: &[Tenant],
        contracts: &[Contract],
        today: NaiveDate,
        config: &EngineConfig,
    ) -> Self {
        let active_tenant_count = tenants.iter().filter(|t| t.active).count();
        let open_recibo_count = get_openstaande_recibos_with(tenants, today, config).len();
        let total_monthly_rent: f64 = contracts.iter().map(|c| c.monthly_rent).sum();

        let mut upcoming_indexations: Vec<UpcomingIndexation> = contracts
            .iter()
            .filter(|c| c.is_indexable())
            .filter_map(|c| {
                let change_date = c.next_change_date?;
                let days_until = (change_date - today).num_days();
                if days_until < 0 || days_until > config.indexation_horizon_days {
                    return None;
                }
                Some(UpcomingIndexation {
                    contract_id: c.id.clone(),
                    property_id: c.property_id.clone(),
                    property_name: property_name(properties, &c.property_id).map(str::to_string),
                    change_date,
                    days_until,
                    monthly_rent: c.monthly_rent,
                })
            })
            .collect();

        upcoming_indexations.sort_by_key(|u| u.change_date);

        PortfolioOverview {
            property_count: properties.len(),
            active_tenant_count,
            open_recibo_count,
            total_monthly_rent,
            upcoming_indexations,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} properties, {} active tenants, {} open recibos, €{:.2}/month, {} indexations due",
            self.property_count,
            self.active_tenant_count,
            self.open_recibo_count,
            self.total_monthly_rent,
            self.upcoming_indexations.len()
        )
    }
}
