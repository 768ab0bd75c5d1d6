// 📂 CSV Loader - read records exported by the data layer
//
// Rows without an id get a fresh UUID so every record has a stable identity.

use crate::entities::{Contract, Favorite, Property, Tenant};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

fn load_rows<T: DeserializeOwned>(csv_path: &Path, kind: &str) -> Result<Vec<T>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open {} CSV file: {:?}", kind, csv_path))?;

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let row: T = result.with_context(|| format!("Failed to deserialize {} on row {}", kind, line + 1))?;
        rows.push(row);
    }

    tracing::info!(kind, count = rows.len(), path = ?csv_path, "loaded records");
    Ok(rows)
}

fn ensure_id(id: &mut String) {
    if id.trim().is_empty() {
        *id = uuid::Uuid::new_v4().to_string();
    }
}

/// Columns: id,name,property_id,active,last_recibo_date,reminder_day
pub fn load_tenants(csv_path: &Path) -> Result<Vec<Tenant>> {
    let mut tenants: Vec<Tenant> = load_rows(csv_path, "tenant")?;
    tenants.iter_mut().for_each(|t| ensure_id(&mut t.id));
    Ok(tenants)
}

/// Columns: id,name,location
pub fn load_properties(csv_path: &Path) -> Result<Vec<Property>> {
    let mut properties: Vec<Property> = load_rows(csv_path, "property")?;
    properties.iter_mut().for_each(|p| ensure_id(&mut p.id));
    Ok(properties)
}

/// Columns: id,property_id,tenant_id,monthly_rent,contract_type,next_change_date
pub fn load_contracts(csv_path: &Path) -> Result<Vec<Contract>> {
    let mut contracts: Vec<Contract> = load_rows(csv_path, "contract")?;
    contracts.iter_mut().for_each(|c| ensure_id(&mut c.id));
    Ok(contracts)
}

/// Columns: id,link,location,price,area_m2,status,archived,created_at
pub fn load_favorites(csv_path: &Path) -> Result<Vec<Favorite>> {
    let mut favorites: Vec<Favorite> = load_rows(csv_path, "favorite")?;
    favorites.iter_mut().for_each(|f| ensure_id(&mut f.id));
    Ok(favorites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ContractType, FavoriteStatus};
    use chrono::NaiveDate;
    use std::io::Write;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_tenants() {
        let file = csv_file(
            "id,name,property_id,active,last_recibo_date,reminder_day\n\
             t1,Ana Silva,p1,true,2024-01-05,\n\
             ,Bruno Costa,p2,false,,10\n",
        );

        let tenants = load_tenants(file.path()).unwrap();

        assert_eq!(tenants.len(), 2);
        assert_eq!(tenants[0].id, "t1");
        assert_eq!(tenants[0].last_recibo_date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(tenants[0].reminder_day(), 5);
        assert!(!tenants[1].id.is_empty());
        assert!(!tenants[1].active);
        assert_eq!(tenants[1].last_recibo_date, None);
        assert_eq!(tenants[1].reminder_day(), 10);
    }

    #[test]
    fn test_load_contracts() {
        let file = csv_file(
            "id,property_id,tenant_id,monthly_rent,contract_type,next_change_date\n\
             c1,p1,t1,950.5,standaard,2024-03-01\n\
             c2,p2,,1200,airbnb,\n",
        );

        let contracts = load_contracts(file.path()).unwrap();

        assert_eq!(contracts.len(), 2);
        assert_eq!(contracts[0].monthly_rent, 950.5);
        assert_eq!(contracts[1].contract_type, ContractType::Airbnb);
        assert_eq!(contracts[1].tenant_id, None);
        assert_eq!(contracts[1].next_change_date, None);
    }

    #[test]
    fn test_blank_contract_type_is_standaard() {
        let file = csv_file(
            "id,property_id,tenant_id,monthly_rent,contract_type,next_change_date\n\
             c1,p1,t1,800,,2024-03-01\n",
        );

        let contracts = load_contracts(file.path()).unwrap();

        assert_eq!(contracts[0].contract_type, ContractType::Standaard);
        assert!(contracts[0].is_indexable());
    }

    #[test]
    fn test_load_favorites() {
        let file = csv_file(
            "id,link,location,price,area_m2,status,archived,created_at\n\
             f1,https://listing/1,Coimbra,250000,100,in_overweging,false,2024-03-01T10:00:00Z\n",
        );

        let favorites = load_favorites(file.path()).unwrap();

        assert_eq!(favorites[0].status, FavoriteStatus::InOverweging);
        assert_eq!(favorites[0].price, Some(250000.0));
    }

    #[test]
    fn test_blank_favorite_status_is_nieuw() {
        let file = csv_file(
            "id,link,location,price,area_m2,status,archived,created_at\n\
             f1,https://listing/1,Porto,300000,90,,false,2024-03-01T10:00:00Z\n",
        );

        let favorites = load_favorites(file.path()).unwrap();

        assert_eq!(favorites[0].status, FavoriteStatus::Nieuw);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_tenants(Path::new("/nonexistent/tenants.csv"));
        assert!(result.is_err());
    }
}
