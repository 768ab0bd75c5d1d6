use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::env;
use std::path::Path;

use rental_engine::indexation::{calculate_new_rent, round2};
use rental_engine::loader::{load_contracts, load_favorites, load_properties, load_tenants};
use rental_engine::market::analyze_favorite;
use rental_engine::notifications::{recibo_calendar_link_with, recibo_reminder_text, tenant_indexation_notice};
use rental_engine::recibo::build_recibo_reminders;
use rental_engine::{
    assess_risk, init_tracing, validate_contract_type_for_indexation, validate_indexation_date,
    validate_indexation_percentage, EngineConfig, PortfolioOverview, RegionTable, RiskScores,
    ValidationOutcome,
};

const USAGE: &str = "\
Usage:
  rental-engine recibos <tenants.csv> [--today YYYY-MM-DD] [--config engine.json]
  rental-engine indexation <rent> <percentage> <change-date> <contract-type> [--today YYYY-MM-DD]
  rental-engine market <favorites.csv> [--regions regions.json]
  rental-engine risk <legal> <market> <fiscal> <physical> <operational> [reserve%]
  rental-engine overview <properties.csv> <tenants.csv> <contracts.csv> [--today YYYY-MM-DD] [--config engine.json]";

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };

    let cli = CliArgs::parse(&args[1..]);

    match command.as_str() {
        "recibos" => run_recibos(&cli),
        "indexation" => run_indexation(&cli),
        "market" => run_market(&cli),
        "risk" => run_risk(&cli),
        "overview" => run_overview(&cli),
        other => {
            eprintln!("❌ Unknown command: {}\n\n{}", other, USAGE);
            std::process::exit(1);
        }
    }
}

// ============================================================================
// ARGUMENTS
// ============================================================================

struct CliArgs {
    positional: Vec<String>,
    today: Option<String>,
    config: Option<String>,
    regions: Option<String>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Self {
        let mut cli = CliArgs {
            positional: Vec::new(),
            today: None,
            config: None,
            regions: None,
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--today" => cli.today = iter.next().cloned(),
                "--config" => cli.config = iter.next().cloned(),
                "--regions" => cli.regions = iter.next().cloned(),
                _ => cli.positional.push(arg.clone()),
            }
        }

        cli
    }

    fn arg(&self, index: usize, name: &str) -> Result<&str> {
        match self.positional.get(index) {
            Some(value) => Ok(value.as_str()),
            None => bail!("Missing argument <{}>\n\n{}", name, USAGE),
        }
    }

    fn number(&self, index: usize, name: &str) -> Result<f64> {
        let raw = self.arg(index, name)?;
        raw.parse::<f64>()
            .with_context(|| format!("<{}> is not a number: {}", name, raw))
    }

    /// The only place the clock is read
    fn today(&self) -> Result<NaiveDate> {
        match &self.today {
            Some(raw) => parse_date(raw),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }

    fn config(&self) -> Result<EngineConfig> {
        EngineConfig::load_or_default(self.config.as_deref().map(Path::new))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("Invalid date (expected YYYY-MM-DD): {}", raw))
}

fn print_outcome(name: &str, outcome: &ValidationOutcome) {
    match (outcome.valid, outcome.message()) {
        (false, Some(msg)) => println!("  ❌ {}: {}", name, msg),
        (false, None) => println!("  ❌ {}", name),
        (true, Some(msg)) => println!("  ⚠️  {}: {}", name, msg),
        (true, None) => println!("  ✓ {}", name),
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

fn run_recibos(cli: &CliArgs) -> Result<()> {
    let tenants = load_tenants(Path::new(cli.arg(0, "tenants.csv")?))?;
    let today = cli.today()?;
    let config = cli.config()?;

    println!("🧾 Openstaande recibos per {}", today);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let reminders = build_recibo_reminders(&tenants, today, &config);
    if reminders.is_empty() {
        println!("✅ All active tenants are up to date");
        return Ok(());
    }

    for reminder in &reminders {
        println!(
            "\n• {} [{}] {}",
            reminder.tenant_name, reminder.status.color, reminder.status.label
        );
        println!("  {}", reminder.status.description);
        println!("  Next reminder: {}", reminder.next_reminder);

        if let Some(tenant) = tenants.iter().find(|t| t.id == reminder.tenant_id) {
            println!("  {}", recibo_reminder_text(tenant, &reminder.status));
            println!("  📅 {}", recibo_calendar_link_with(tenant, today, &config));
        }
    }

    println!("\n{} of {} tenants need a reminder", reminders.len(), tenants.len());
    Ok(())
}

fn run_indexation(cli: &CliArgs) -> Result<()> {
    let rent = cli.number(0, "rent")?;
    let percentage = cli.number(1, "percentage")?;
    let change_date = parse_date(cli.arg(2, "change-date")?)?;
    let contract_type = cli.arg(3, "contract-type")?;
    let today = cli.today()?;

    println!("📈 Rent indexation check");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let type_check = validate_contract_type_for_indexation(contract_type);
    let pct_check = validate_indexation_percentage(percentage);
    let date_check = validate_indexation_date(change_date, today);

    print_outcome("Contract type", &type_check);
    print_outcome("Percentage", &pct_check);
    print_outcome("Change date", &date_check);

    if !(type_check.valid && pct_check.valid && date_check.valid) {
        println!("\n❌ Indexation not allowed");
        std::process::exit(2);
    }

    let new_rent = calculate_new_rent(rent, percentage);
    println!("\n✓ Current rent: €{:.2}", rent);
    println!("✓ New rent:     €{:.2} (+€{:.2})", new_rent, round2(new_rent - rent));
    println!("\n{}", tenant_indexation_notice("tenant", rent, percentage, new_rent, change_date));

    Ok(())
}

fn run_market(cli: &CliArgs) -> Result<()> {
    let favorites = load_favorites(Path::new(cli.arg(0, "favorites.csv")?))?;
    let table = match &cli.regions {
        Some(path) => RegionTable::from_file(path)?,
        None => RegionTable::default(),
    };

    println!("🏘️  Market comparison ({} regions)", table.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for favorite in rental_engine::entities::active_favorites(&favorites) {
        let analysis = analyze_favorite(favorite, &table);
        println!("\n• {} [{}]", analysis.link, favorite.status.label());

        match analysis.comparison {
            Some(comparison) => {
                println!("  €{:.2}/m²", analysis.price_per_m2);
                match comparison.message {
                    Some(message) => println!("  {}", message),
                    None => println!("  No regional average for this location"),
                }
            }
            None => println!("  Price or area missing"),
        }
    }

    Ok(())
}

fn run_risk(cli: &CliArgs) -> Result<()> {
    let mut dims = [0i32; 5];
    let names = ["legal", "market", "fiscal", "physical", "operational"];
    for (i, name) in names.iter().enumerate() {
        let raw = cli.arg(i, name)?;
        dims[i] = raw
            .parse::<i32>()
            .with_context(|| format!("<{}> is not an integer: {}", name, raw))?;
    }
    let reserve = match cli.positional.get(5) {
        Some(raw) => Some(raw.parse::<f64>().with_context(|| format!("<reserve%> is not a number: {}", raw))?),
        None => None,
    };

    let result = assess_risk(RiskScores::new(dims[0], dims[1], dims[2], dims[3], dims[4]), reserve);

    println!("⚠️  Risk assessment");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Legal:       {}", result.scores.legal);
    println!("  Market:      {}", result.scores.market);
    println!("  Fiscal:      {}", result.scores.fiscal);
    println!("  Physical:    {} (reserve modifier {:+})", result.scores.physical, result.reserve_modifier);
    println!("  Operational: {}", result.scores.operational);
    println!("\n  Total {} / 25 → {}", result.total, result.label);

    Ok(())
}

fn run_overview(cli: &CliArgs) -> Result<()> {
    let properties = load_properties(Path::new(cli.arg(0, "properties.csv")?))?;
    let tenants = load_tenants(Path::new(cli.arg(1, "tenants.csv")?))?;
    let contracts = load_contracts(Path::new(cli.arg(2, "contracts.csv")?))?;
    let today = cli.today()?;
    let config = cli.config()?;

    let overview = PortfolioOverview::build(&properties, &tenants, &contracts, today, &config);

    println!("📊 Portfolio overview per {}", today);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", overview.summary());

    for upcoming in &overview.upcoming_indexations {
        println!(
            "  • {} on {} ({} days), rent €{:.2}",
            upcoming.property_name.as_deref().unwrap_or(&upcoming.property_id),
            upcoming.change_date,
            upcoming.days_until,
            upcoming.monthly_rent
        );
    }

    Ok(())
}
