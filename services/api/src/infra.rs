use docgen::documents::{
    BillingType, Contact, DepositType, DocumentContext, EntityType, Invoice, LeaseInformation,
    LedgerLine, Office, Organization, Property, Reservation, ReservationNotice, TemplateError,
    TemplateStore,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) const INVOICE_TEMPLATE: &str = include_str!("../assets/invoice.html");
pub(crate) const WELCOME_TEMPLATE: &str = include_str!("../assets/welcome.html");

/// Template store backing the `Asset` template source: the templates that
/// ship with the binary, plus anything registered at runtime.
#[derive(Clone)]
pub(crate) struct AssetTemplateStore {
    templates: Arc<Mutex<HashMap<String, String>>>,
}

impl Default for AssetTemplateStore {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert("invoice".to_string(), INVOICE_TEMPLATE.to_string());
        templates.insert("welcome".to_string(), WELCOME_TEMPLATE.to_string());
        Self {
            templates: Arc::new(Mutex::new(templates)),
        }
    }
}

impl AssetTemplateStore {
    pub(crate) fn insert(&self, key: &str, body: &str) {
        let mut guard = self.templates.lock().expect("template mutex poisoned");
        guard.insert(key.to_string(), body.to_string());
    }
}

impl TemplateStore for AssetTemplateStore {
    fn fetch(&self, key: &str) -> Result<String, TemplateError> {
        let guard = self.templates.lock().expect("template mutex poisoned");
        match guard.get(key) {
            Some(body) if body.trim().is_empty() => Err(TemplateError::Empty),
            Some(body) => Ok(body.clone()),
            None => Err(TemplateError::NotFound(key.to_string())),
        }
    }
}

/// Synthetic entity bag used by the demo command and handler tests.
pub(crate) fn sample_context() -> DocumentContext {
    DocumentContext {
        invoice: Some(Invoice {
            invoice_id: "INV-1009".to_string(),
            invoice_name: "October Rent".to_string(),
            invoice_date: chrono_date(2025, 10, 1),
            due_date: chrono_date(2025, 10, 5),
            start_date: chrono_date(2025, 10, 1),
            end_date: chrono_date(2025, 10, 31),
            total_amount: 1600.0,
            paid_amount: 400.0,
            ledger_lines: vec![
                LedgerLine {
                    line_number: 1,
                    description: "Rent".to_string(),
                    amount: 1500.0,
                },
                LedgerLine {
                    line_number: 2,
                    description: "Utilities".to_string(),
                    amount: 100.0,
                },
            ],
        }),
        reservation: Some(Reservation {
            reservation_code: "R-2041".to_string(),
            tenant_name: "Jordan Reyes".to_string(),
            arrival_date: chrono_date(2025, 10, 1),
            departure_date: chrono_date(2026, 3, 31),
            billing_type: Some(BillingType::Monthly),
            billing_rate: 1500.0,
            deposit: 200.0,
            deposit_type: Some(DepositType::SpreadWithRent),
            notice: Some(ReservationNotice::ThirtyDays),
            has_pets: false,
            allow_extensions: true,
            ..Reservation::default()
        }),
        contact: Some(Contact {
            first_name: "Jordan".to_string(),
            last_name: "Reyes".to_string(),
            phone: "5155551234".to_string(),
            email: "jordan@example.com".to_string(),
            entity_type: Some(EntityType::Person),
            address1: "42 Elm St".to_string(),
            city: "Ames".to_string(),
            state: "IA".to_string(),
            zip: "50010".to_string(),
            ..Contact::default()
        }),
        property: Some(Property {
            property_code: "P-311".to_string(),
            address1: "100 Grand Ave".to_string(),
            suite: "12".to_string(),
            city: "Des Moines".to_string(),
            state: "IA".to_string(),
            zip: "50309".to_string(),
            bedrooms: 2,
            parking_notes: "One covered stall included.".to_string(),
        }),
        office: Some(Office {
            name: "Downtown Office".to_string(),
            phone: "5155550100".to_string(),
            fax: "5155550101".to_string(),
            default_key_fee: 25.0,
            utility_one_bed: 40.0,
            utility_two_bed: 55.0,
            utility_three_bed: 70.0,
            utility_four_bed: 85.0,
            utility_house: 85.0,
            maid_one_bed: 60.0,
            maid_two_bed: 80.0,
            maid_three_bed: 100.0,
            maid_four_bed: 120.0,
            undisclosed_pet_fee: 500.0,
            minimum_smoking_fee: 250.0,
            parking_low_end: 50.0,
            parking_high_end: 125.0,
            file_details: None,
        }),
        organization: Some(Organization {
            name: "Hawkeye Property Group".to_string(),
            address: "500 Locust St, Des Moines, IA 50309".to_string(),
            website: "https://hawkeyepg.example.com".to_string(),
            file_details: None,
        }),
        lease_information: Some(LeaseInformation {
            rental_payment: "Rent is due on the 1st of each month.".to_string(),
            cancellation_policy: "60 days written notice required to cancel.".to_string(),
            ..LeaseInformation::default()
        }),
        ..DocumentContext::default()
    }
}

fn chrono_date(year: i32, month: u32, day: u32) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_serves_builtin_and_registered_templates() {
        let store = AssetTemplateStore::default();
        assert!(store.fetch("invoice").expect("builtin invoice").contains("{{invoiceId}}"));
        assert!(store.fetch("welcome").expect("builtin welcome").contains("{{tenantName}}"));

        store.insert("lease", "<body>{{rentalPayment}}</body>");
        assert!(store.fetch("lease").expect("registered template").contains("rentalPayment"));

        assert!(matches!(
            store.fetch("missing"),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn store_rejects_empty_bodies() {
        let store = AssetTemplateStore::default();
        store.insert("blank", "   ");
        assert!(matches!(store.fetch("blank"), Err(TemplateError::Empty)));
    }
}
