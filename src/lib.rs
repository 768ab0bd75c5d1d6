// Rental Engine - Core Library
// Reminder & indexation calculation engine for a rental portfolio.
// Exposes all modules for use in the CLI, the API server, and tests.

pub mod config;
pub mod validation;
pub mod entities;
pub mod indexation;     // Rent indexation calculator + validators
pub mod recibo;         // Recibo de renda reminders
pub mod risk;           // Risk scoring aggregator
pub mod market;         // Price per m² vs regional average
pub mod notifications;  // Calendar links + tenant texts
pub mod portfolio;      // Dashboard overview
pub mod scrape;         // Scrape proxy contract
pub mod loader;         // CSV record loading

// Re-export commonly used types
pub use config::EngineConfig;
pub use validation::{Severity, ValidationOutcome};
pub use entities::{
    Tenant, Property, Contract, ContractType, Favorite, FavoriteStatus,
};
pub use indexation::{
    calculate_new_rent, validate_indexation_date, validate_indexation_percentage,
    validate_contract_type_for_indexation, plan_indexation, IndexationPlan,
};
pub use recibo::{
    is_recibo_overdue, needs_recibo_reminder, get_openstaande_recibos,
    get_recibo_status, get_next_reminder_date, build_recibo_reminders,
    ReciboStatus, ReciboStatusLevel, ReciboState, ReciboReminder,
};
pub use risk::{assess_risk, RiskScores, RiskAssessment, RiskLevel};
pub use market::{
    calculate_prijs_per_m2, compare_with_regio_gemiddelde, analyze_favorite,
    RegionTable, MarketComparison, PriceBand,
};
pub use portfolio::PortfolioOverview;
pub use scrape::{ScrapeRequest, ScrapeResponse, ProxyError, classify_upstream};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set up tracing output; RUST_LOG overrides the default `info` level
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
