// 🏘️ Market Comparison - price per m² against the regional average
//
// The regional table is data, not code: RegionTable can be built from any
// ordered list (or a JSON file) and is injected into every comparison.
//
// Location matching, first match wins in table order:
//   1. case-insensitive exact match
//   2. substring containment in either direction
// Overlapping names ("porto" inside "porto santo") resolve to whichever
// entry comes first.

use crate::entities::Favorite;
use crate::indexation::round2;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// PRICE PER M²
// ============================================================================

/// Price per m², rounded to cents. Missing input or zero area gives 0.
pub fn calculate_prijs_per_m2(price: Option<f64>, area: Option<f64>) -> f64 {
    match (price, area) {
        (Some(price), Some(area)) if area != 0.0 && price.is_finite() && area.is_finite() => {
            round2(price / area)
        }
        _ => 0.0,
    }
}

// ============================================================================
// REGION TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAverage {
    /// Normalized (lowercase, trimmed) location name
    pub name: String,

    /// Average asking price in EUR per m²
    pub average_per_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionTable {
    regions: Vec<RegionAverage>,
}

fn normalize(location: &str) -> String {
    location.trim().to_lowercase()
}

impl RegionTable {
    pub fn new() -> Self {
        RegionTable { regions: Vec::new() }
    }

    /// Build from (name, average) pairs; order is kept for matching
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let regions = entries
            .into_iter()
            .map(|(name, average_per_m2)| RegionAverage {
                name: normalize(name.as_ref()),
                average_per_m2,
            })
            .collect();
        RegionTable { regions }
    }

    /// Load from a JSON array of {name, average_per_m2}
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read region table: {:?}", path.as_ref()))?;

        let regions: Vec<RegionAverage> =
            serde_json::from_str(&content).context("Failed to parse region table JSON")?;

        Ok(Self::from_entries(
            regions.into_iter().map(|r| (r.name, r.average_per_m2)),
        ))
    }

    /// Average asking prices (EUR/m²) for the Portuguese markets we follow
    pub fn portugal() -> Self {
        Self::from_entries([
            ("lisboa", 5500.0),
            ("cascais", 5200.0),
            ("oeiras", 4300.0),
            ("sintra", 2900.0),
            ("porto", 3800.0),
            ("matosinhos", 3100.0),
            ("vila nova de gaia", 2700.0),
            ("braga", 2100.0),
            ("coimbra", 2500.0),
            ("aveiro", 2400.0),
            ("leiria", 1700.0),
            ("viseu", 1400.0),
            ("setúbal", 2600.0),
            ("évora", 1900.0),
            ("faro", 3400.0),
            ("lagos", 3900.0),
            ("albufeira", 3300.0),
            ("funchal", 3100.0),
        ])
    }

    pub fn insert(&mut self, name: &str, average_per_m2: f64) {
        self.regions.push(RegionAverage {
            name: normalize(name),
            average_per_m2,
        });
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Exact match first, then containment either way
    pub fn lookup(&self, location: &str) -> Option<&RegionAverage> {
        let needle = normalize(location);
        if needle.is_empty() {
            return None;
        }

        if let Some(exact) = self.regions.iter().find(|r| r.name == needle) {
            return Some(exact);
        }

        self.regions
            .iter()
            .find(|r| r.name.contains(&needle) || needle.contains(&r.name))
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::portugal()
    }
}

// ============================================================================
// PRICE BAND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBand {
    SignificantlyMoreExpensive,
    MoreExpensive,
    SlightlyMoreExpensive,
    AtAverage,
    SlightlyCheaper,
    Cheaper,
    SignificantlyCheaper,
}

impl PriceBand {
    /// Classify a percentage difference from the average
    pub fn from_percentage(pct: f64) -> Self {
        if pct > 20.0 {
            PriceBand::SignificantlyMoreExpensive
        } else if pct > 10.0 {
            PriceBand::MoreExpensive
        } else if pct > 0.0 {
            PriceBand::SlightlyMoreExpensive
        } else if pct == 0.0 {
            PriceBand::AtAverage
        } else if pct >= -10.0 {
            PriceBand::SlightlyCheaper
        } else if pct >= -20.0 {
            PriceBand::Cheaper
        } else {
            PriceBand::SignificantlyCheaper
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBand::SignificantlyMoreExpensive => "significantly more expensive",
            PriceBand::MoreExpensive => "more expensive",
            PriceBand::SlightlyMoreExpensive => "slightly more expensive",
            PriceBand::AtAverage => "precisely at average",
            PriceBand::SlightlyCheaper => "slightly cheaper",
            PriceBand::Cheaper => "cheaper",
            PriceBand::SignificantlyCheaper => "significantly cheaper",
        }
    }
}

// ============================================================================
// COMPARISON
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketComparison {
    pub price_per_m2: f64,

    /// Matched table entry
    pub region: Option<String>,

    /// None when no location was given or nothing matched
    pub average: Option<f64>,

    /// EUR per m² above (+) or below (-) the average
    pub difference: Option<f64>,

    /// Percentage difference, one decimal
    pub percentage: Option<f64>,

    pub band: Option<PriceBand>,
    pub label: Option<String>,
    pub message: Option<String>,
}

impl MarketComparison {
    fn unmatched(price_per_m2: f64) -> Self {
        MarketComparison {
            price_per_m2,
            region: None,
            average: None,
            difference: None,
            percentage: None,
            band: None,
            label: None,
            message: None,
        }
    }

    pub fn has_average(&self) -> bool {
        self.average.is_some()
    }
}

/// "+12%", "-7.5%", "0%". Takes the one-decimal percentage so the sign
/// always agrees with the band.
fn signed_percentage(pct: f64) -> String {
    if pct == 0.0 {
        "0%".to_string()
    } else {
        format!("{:+}%", pct)
    }
}

pub fn compare_with_regio_gemiddelde(
    price_per_m2: f64,
    location: Option<&str>,
    table: &RegionTable,
) -> MarketComparison {
    let region = match location.and_then(|loc| table.lookup(loc)) {
        Some(region) => region,
        None => {
            tracing::debug!(?location, "no regional average for location");
            return MarketComparison::unmatched(price_per_m2);
        }
    };

    let average = region.average_per_m2;
    let difference = round2(price_per_m2 - average);
    let percentage = if average == 0.0 {
        0.0
    } else {
        (difference / average * 1000.0).round() / 10.0
    };

    let band = PriceBand::from_percentage(percentage);
    let message = format!(
        "{} vs regional average of €{:.0}/m² ({})",
        signed_percentage(percentage),
        average,
        band.label()
    );

    MarketComparison {
        price_per_m2,
        region: Some(region.name.clone()),
        average: Some(average),
        difference: Some(difference),
        percentage: Some(percentage),
        band: Some(band),
        label: Some(band.label().to_string()),
        message: Some(message),
    }
}

// ============================================================================
// FAVORITE ANALYSIS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteAnalysis {
    pub favorite_id: String,
    pub link: String,
    pub price_per_m2: f64,

    /// None when price or area is missing
    pub comparison: Option<MarketComparison>,
}

pub fn analyze_favorite(favorite: &Favorite, table: &RegionTable) -> FavoriteAnalysis {
    let price_per_m2 = calculate_prijs_per_m2(favorite.price, favorite.area_m2);

    let comparison = if price_per_m2 > 0.0 {
        Some(compare_with_regio_gemiddelde(
            price_per_m2,
            favorite.location.as_deref(),
            table,
        ))
    } else {
        None
    };

    FavoriteAnalysis {
        favorite_id: favorite.id.clone(),
        link: favorite.link.clone(),
        price_per_m2,
        comparison,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Write;

    #[test]
    fn test_prijs_per_m2() {
        assert_eq!(calculate_prijs_per_m2(Some(250_000.0), Some(100.0)), 2500.0);
        assert_eq!(calculate_prijs_per_m2(Some(200_000.0), Some(3.0)), 66_666.67);
        assert_eq!(calculate_prijs_per_m2(None, Some(100.0)), 0.0);
        assert_eq!(calculate_prijs_per_m2(Some(250_000.0), None), 0.0);
        assert_eq!(calculate_prijs_per_m2(Some(250_000.0), Some(0.0)), 0.0);
    }

    #[test]
    fn test_coimbra_at_average() {
        let table = RegionTable::default();
        let result = compare_with_regio_gemiddelde(2500.0, Some("Coimbra"), &table);

        assert_eq!(result.average, Some(2500.0));
        assert_eq!(result.percentage, Some(0.0));
        assert_eq!(result.difference, Some(0.0));
        assert_eq!(result.label.as_deref(), Some("precisely at average"));
        assert!(result.message.unwrap().starts_with("0%"));
    }

    #[test]
    fn test_no_location_or_no_match() {
        let table = RegionTable::default();

        let result = compare_with_regio_gemiddelde(2500.0, None, &table);
        assert_eq!(result.average, None);

        let result = compare_with_regio_gemiddelde(2500.0, Some("Atlantis"), &table);
        assert_eq!(result.average, None);
        assert_eq!(result.band, None);

        let result = compare_with_regio_gemiddelde(2500.0, Some("   "), &table);
        assert_eq!(result.average, None);
    }

    #[test]
    fn test_lookup_exact_then_substring() {
        let table = RegionTable::default();

        assert_eq!(table.lookup("LISBOA").unwrap().name, "lisboa");
        assert_eq!(table.lookup("Centro de Coimbra").unwrap().name, "coimbra");
        assert_eq!(table.lookup("gaia").unwrap().name, "vila nova de gaia");
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let table = RegionTable::from_entries([("porto", 3800.0), ("porto santo", 2200.0)]);
        // Containment hits "porto" first even though "porto santo" is closer
        assert_eq!(table.lookup("Porto Santo island").unwrap().name, "porto");
        // Exact match still beats containment order
        assert_eq!(table.lookup("porto santo").unwrap().name, "porto santo");
    }

    #[test]
    fn test_seven_bands() {
        let table = RegionTable::from_entries([("testville", 1000.0)]);
        let cases = [
            (1250.0, PriceBand::SignificantlyMoreExpensive, "+25%"),
            (1150.0, PriceBand::MoreExpensive, "+15%"),
            (1050.0, PriceBand::SlightlyMoreExpensive, "+5%"),
            (1000.0, PriceBand::AtAverage, "0%"),
            (950.0, PriceBand::SlightlyCheaper, "-5%"),
            (850.0, PriceBand::Cheaper, "-15%"),
            (700.0, PriceBand::SignificantlyCheaper, "-30%"),
        ];

        for (ppm2, band, prefix) in cases {
            let result = compare_with_regio_gemiddelde(ppm2, Some("Testville"), &table);
            assert_eq!(result.band, Some(band), "{}", ppm2);
            assert!(result.message.unwrap().starts_with(prefix), "{}", ppm2);
        }
    }

    #[test]
    fn test_small_differences_keep_their_sign() {
        let table = RegionTable::from_entries([("testville", 1000.0)]);

        let above = compare_with_regio_gemiddelde(1004.0, Some("Testville"), &table);
        assert_eq!(above.band, Some(PriceBand::SlightlyMoreExpensive));
        assert!(above.message.unwrap().starts_with("+0.4%"));

        let below = compare_with_regio_gemiddelde(996.0, Some("Testville"), &table);
        assert_eq!(below.band, Some(PriceBand::SlightlyCheaper));
        assert!(below.message.unwrap().starts_with("-0.4%"));

        let tiny = compare_with_regio_gemiddelde(1000.4, Some("Testville"), &table);
        assert_eq!(tiny.band, Some(PriceBand::AtAverage));
        assert!(tiny.message.unwrap().starts_with("0%"));
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(PriceBand::from_percentage(20.0), PriceBand::MoreExpensive);
        assert_eq!(PriceBand::from_percentage(20.1), PriceBand::SignificantlyMoreExpensive);
        assert_eq!(PriceBand::from_percentage(-20.0), PriceBand::Cheaper);
        assert_eq!(PriceBand::from_percentage(-20.1), PriceBand::SignificantlyCheaper);
        assert_eq!(PriceBand::from_percentage(-10.0), PriceBand::SlightlyCheaper);
    }

    #[test]
    fn test_price_per_m2_at_average_round_trip() {
        let table = RegionTable::default();
        for (price, area) in [(250_000.0, 100.0), (187_500.0, 75.0), (300_000.0, 120.0)] {
            let ppm2 = calculate_prijs_per_m2(Some(price), Some(area));
            let result = compare_with_regio_gemiddelde(ppm2, Some("coimbra"), &table);
            assert_eq!(result.band, Some(PriceBand::AtAverage));
            assert!(result.message.unwrap().starts_with("0%"));
        }
    }

    #[test]
    fn test_analyze_favorite() {
        let mut favorite = Favorite::new("https://listing/1".to_string(), Utc::now());
        favorite.location = Some("Braga".to_string());
        favorite.price = Some(180_000.0);
        favorite.area_m2 = Some(60.0);

        let analysis = analyze_favorite(&favorite, &RegionTable::default());
        assert_eq!(analysis.price_per_m2, 3000.0);
        let comparison = analysis.comparison.unwrap();
        assert_eq!(comparison.band, Some(PriceBand::SignificantlyMoreExpensive));

        favorite.area_m2 = None;
        let analysis = analyze_favorite(&favorite, &RegionTable::default());
        assert!(analysis.comparison.is_none());
    }

    #[test]
    fn test_region_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Tomar", "average_per_m2": 1200}}, {{"name": "Nazaré", "average_per_m2": 2300}}]"#
        )
        .unwrap();

        let table = RegionTable::from_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("tomar").unwrap().average_per_m2, 1200.0);
    }
}
