// 📄 Contract Entity - rent amount, type and next change date
//
// Only standard rental contracts are subject to indexation.
// Airbnb (short stay) and koop (purchase) contracts never are.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// CONTRACT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    /// Standard long-term rental
    Standaard,

    /// Short-stay rental
    Airbnb,

    /// Purchase
    Koop,

    /// Anything else the data layer knows about
    Other,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Standaard => "standaard",
            ContractType::Airbnb => "airbnb",
            ContractType::Koop => "koop",
            ContractType::Other => "other",
        }
    }

    /// Parse free text as stored by the data layer (case-insensitive)
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "airbnb" => ContractType::Airbnb,
            "koop" => ContractType::Koop,
            "standaard" | "" => ContractType::Standaard,
            _ => ContractType::Other,
        }
    }

    pub fn allows_indexation(&self) -> bool {
        !matches!(self, ContractType::Airbnb | ContractType::Koop)
    }
}

impl Default for ContractType {
    fn default() -> Self {
        ContractType::Standaard
    }
}

// Same rules as parse(), so CSV and JSON agree on blank and unknown values
impl<'de> Deserialize<'de> for ContractType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ContractType::parse(&raw))
    }
}

// ============================================================================
// CONTRACT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub property_id: String,

    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Monthly rent in EUR
    pub monthly_rent: f64,

    #[serde(default)]
    pub contract_type: ContractType,

    /// Date the next indexation takes effect
    #[serde(default)]
    pub next_change_date: Option<NaiveDate>,
}

impl Contract {
    pub fn new(property_id: String, monthly_rent: f64, contract_type: ContractType) -> Self {
        Contract {
            id: uuid::Uuid::new_v4().to_string(),
            property_id,
            tenant_id: None,
            monthly_rent,
            contract_type,
            next_change_date: None,
        }
    }

    pub fn with_next_change(mut self, date: NaiveDate) -> Self {
        self.next_change_date = Some(date);
        self
    }

    pub fn is_indexable(&self) -> bool {
        self.contract_type.allows_indexation()
    }
}
