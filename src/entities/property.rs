// 🏠 Property Entity - referenced by tenants and contracts for display

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub location: Option<String>,
}

impl Property {
    pub fn new(name: String) -> Self {
        Property {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            location: None,
        }
    }

    /// Display name, with location when known
    pub fn display_name(&self) -> String {
        match &self.location {
            Some(location) if !location.is_empty() => format!("{} ({})", self.name, location),
            _ => self.name.clone(),
        }
    }
}

/// Look up a property name by id, for display next to tenants/contracts
pub fn property_name<'a>(properties: &'a [Property], id: &str) -> Option<&'a str> {
    properties
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut property = Property::new("Rua Direita 12".to_string());
        assert_eq!(property.display_name(), "Rua Direita 12");

        property.location = Some("Coimbra".to_string());
        assert_eq!(property.display_name(), "Rua Direita 12 (Coimbra)");
    }

    #[test]
    fn test_property_name_lookup() {
        let property = Property::new("Casa Azul".to_string());
        let id = property.id.clone();
        let properties = vec![property];

        assert_eq!(property_name(&properties, &id), Some("Casa Azul"));
        assert_eq!(property_name(&properties, "missing"), None);
    }
}
