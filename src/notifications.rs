// 📅 Notifications - calendar links and tenant-facing texts
// Pure string templates; nothing is sent from here.

use crate::config::EngineConfig;
use crate::entities::Tenant;
use crate::recibo::{get_next_reminder_date, ReciboStatus};
use chrono::{Duration, NaiveDate};

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";

fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

fn format_eur(amount: f64) -> String {
    format!("€{:.2}", amount)
}

/// All-day Google Calendar event link. Title and description are percent-encoded.
pub fn google_calendar_link(title: &str, date: NaiveDate, description: &str) -> String {
    let end = date + Duration::days(1);
    format!(
        "{}?action=TEMPLATE&text={}&dates={}/{}&details={}",
        GOOGLE_CALENDAR_URL,
        urlencoding::encode(title),
        date.format("%Y%m%d"),
        end.format("%Y%m%d"),
        urlencoding::encode(description),
    )
}

/// Calendar reminder placed `notice_days` before the indexation takes effect
pub fn indexation_calendar_reminder(
    property_name: &str,
    change_date: NaiveDate,
    current_rent: f64,
    new_rent: f64,
    percentage: f64,
    notice_days: i64,
) -> String {
    let reminder_date = change_date - Duration::days(notice_days);
    let title = format!("Notify tenant of rent indexation: {}", property_name);
    let description = format!(
        "Rent for {} changes on {} from {} to {} ({}%). Send the indexation letter today.",
        property_name,
        format_date(change_date),
        format_eur(current_rent),
        format_eur(new_rent),
        percentage
    );

    google_calendar_link(&title, reminder_date, &description)
}

/// Letter text informing a tenant of the upcoming rent change
pub fn tenant_indexation_notice(
    tenant_name: &str,
    current_rent: f64,
    percentage: f64,
    new_rent: f64,
    change_date: NaiveDate,
) -> String {
    format!(
        "Dear {},\n\n\
         In accordance with your rental agreement, your monthly rent will be indexed by {}%.\n\
         Current rent: {}\n\
         New rent: {}\n\
         Effective date: {}\n\n\
         Kind regards",
        tenant_name,
        percentage,
        format_eur(current_rent),
        format_eur(new_rent),
        format_date(change_date),
    )
}

/// Short reminder asking a tenant for their recibo de renda
pub fn recibo_reminder_text(tenant: &Tenant, status: &ReciboStatus) -> String {
    format!(
        "Recibo de renda reminder for {}: {} ({})",
        tenant.name, status.label, status.description
    )
}

/// Calendar link for the tenant's next reminder day
pub fn recibo_calendar_link(tenant: &Tenant, today: NaiveDate) -> String {
    recibo_calendar_link_with(tenant, today, &EngineConfig::default())
}

/// Same, with the configured reminder day for tenants that have none
pub fn recibo_calendar_link_with(tenant: &Tenant, today: NaiveDate, config: &EngineConfig) -> String {
    let date = get_next_reminder_date(tenant.reminder_day_or(config.reminder_day), today);
    let title = format!("Request recibo de renda: {}", tenant.name);
    let description = format!(
        "Ask {} for the recibo de renda of this month and record it.",
        tenant.name
    );

    google_calendar_link(&title, date, &description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recibo::get_recibo_status;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_link_format_and_encoding() {
        let link = google_calendar_link("Rent & index", date(2024, 3, 1), "a b/c");

        assert!(link.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
        assert!(link.contains("text=Rent%20%26%20index"));
        assert!(link.contains("dates=20240301/20240302"));
        assert!(link.contains("details=a%20b%2Fc"));
    }

    #[test]
    fn test_indexation_reminder_placed_before_change() {
        let link = indexation_calendar_reminder("Casa Azul", date(2024, 3, 1), 1000.0, 1050.0, 5.0, 30);
        assert!(link.contains("dates=20240131/20240201"));
        assert!(link.contains("Casa%20Azul"));
    }

    #[test]
    fn test_tenant_notice_contents() {
        let text = tenant_indexation_notice("Ana Silva", 1000.0, 5.0, 1050.0, date(2024, 3, 1));

        assert!(text.contains("Dear Ana Silva"));
        assert!(text.contains("5%"));
        assert!(text.contains("€1000.00"));
        assert!(text.contains("€1050.00"));
        assert!(text.contains("01-03-2024"));
    }

    #[test]
    fn test_recibo_texts() {
        let today = date(2024, 2, 5);
        let tenant = Tenant::new("Bruno".to_string(), "p".to_string());
        let status = get_recibo_status(None, today);

        let text = recibo_reminder_text(&tenant, &status);
        assert!(text.contains("Bruno"));
        assert!(text.contains("Overdue"));

        let link = recibo_calendar_link(&tenant, today);
        assert!(link.contains("dates=20240305/20240306"));
    }

    #[test]
    fn test_recibo_calendar_link_configured_day() {
        let today = date(2024, 5, 20);
        let tenant = Tenant::new("Carla".to_string(), "p".to_string());
        let cfg = EngineConfig {
            reminder_day: 12,
            ..EngineConfig::default()
        };

        let link = recibo_calendar_link_with(&tenant, today, &cfg);
        assert!(link.contains("dates=20240612/20240613"));
    }
}
