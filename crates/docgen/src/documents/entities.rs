use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How rent is accrued on a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    Monthly,
    Daily,
    Nightly,
}

impl BillingType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Daily => "Daily",
            Self::Nightly => "Nightly",
        }
    }

    /// The noun used for one billing period.
    pub const fn day_unit(self) -> &'static str {
        match self {
            Self::Monthly => "month",
            Self::Daily => "day",
            Self::Nightly => "night",
        }
    }

    pub const fn adverb(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Daily => "daily",
            Self::Nightly => "nightly",
        }
    }
}

/// How the security deposit is collected. Wire codes follow the upstream
/// API: CLR collects at reservation, SDW spreads the deposit across rent;
/// any other code falls back to the standard deposit terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DepositType {
    CollectedAtReservation,
    SpreadWithRent,
    Standard,
}

impl DepositType {
    pub const fn code(self) -> &'static str {
        match self {
            Self::CollectedAtReservation => "CLR",
            Self::SpreadWithRent => "SDW",
            Self::Standard => "STD",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "CLR" => Self::CollectedAtReservation,
            "SDW" => Self::SpreadWithRent,
            _ => Self::Standard,
        }
    }
}

impl From<String> for DepositType {
    fn from(value: String) -> Self {
        Self::from_code(&value)
    }
}

impl From<DepositType> for String {
    fn from(value: DepositType) -> Self {
        value.code().to_string()
    }
}

/// Written-notice requirement attached to a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationNotice {
    ThirtyDays,
    FifteenDays,
    FourteenDays,
}

impl ReservationNotice {
    pub const fn days(self) -> u32 {
        match self {
            Self::ThirtyDays => 30,
            Self::FifteenDays => 15,
            Self::FourteenDays => 14,
        }
    }
}

/// Whether a contact represents a person or a company account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Person,
    Company,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    pub invoice_id: String,
    pub invoice_name: String,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub ledger_lines: Vec<LedgerLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerLine {
    pub line_number: u32,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reservation {
    pub reservation_code: String,
    pub tenant_name: String,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub billing_type: Option<BillingType>,
    pub billing_rate: f64,
    pub deposit: f64,
    pub deposit_type: Option<DepositType>,
    pub notice: Option<ReservationNotice>,
    pub has_pets: bool,
    pub pet_fee: f64,
    pub number_of_pets: u32,
    pub pet_description: String,
    pub allow_extensions: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub entity_type: Option<EntityType>,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    pub property_code: String,
    pub address1: String,
    pub suite: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub bedrooms: u32,
    pub parking_notes: String,
}

/// Office record; the same shape backs the accounting office. The per-tier
/// fee fields feed the bedroom-indexed lookups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Office {
    pub name: String,
    pub phone: String,
    pub fax: String,
    pub default_key_fee: f64,
    pub utility_one_bed: f64,
    pub utility_two_bed: f64,
    pub utility_three_bed: f64,
    pub utility_four_bed: f64,
    pub utility_house: f64,
    pub maid_one_bed: f64,
    pub maid_two_bed: f64,
    pub maid_three_bed: f64,
    pub maid_four_bed: f64,
    pub undisclosed_pet_fee: f64,
    pub minimum_smoking_fee: f64,
    pub parking_low_end: f64,
    pub parking_high_end: f64,
    pub file_details: Option<FileDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    pub name: String,
    pub address: String,
    pub website: String,
    pub file_details: Option<FileDetails>,
}

/// Free-text lease clauses, resolved verbatim before every other category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaseInformation {
    pub rental_payment: String,
    pub security_deposit: String,
    pub cancellation_policy: String,
    pub utilities: String,
    pub furnishings: String,
    pub housekeeping: String,
    pub parking: String,
    pub pets: String,
    pub smoking: String,
    pub maintenance: String,
    pub keys: String,
    pub check_in: String,
    pub check_out: String,
    pub extensions: String,
    pub insurance: String,
    pub occupancy: String,
    pub quiet_hours: String,
    pub damages: String,
    pub mail: String,
    pub internet: String,
    pub trash: String,
    pub laundry: String,
    pub subletting: String,
    pub termination: String,
}

/// Stored file payload used for letterhead logos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileDetails {
    pub content_type: String,
    pub file: String,
    pub data_url: String,
}

impl FileDetails {
    /// Resolve to an `<img src>`-ready data URL. The stored `dataUrl` wins
    /// when present; otherwise one is assembled from the base64 payload.
    pub fn to_data_url(&self) -> Option<String> {
        if !self.data_url.is_empty() {
            return Some(self.data_url.clone());
        }
        if self.file.is_empty() {
            return None;
        }
        Some(format!("data:{};base64,{}", self.content_type, self.file))
    }
}

/// The optional entity bag available to a single document-generation call.
/// Every category may be absent; absent categories leave their tokens for
/// the final blanking pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentContext {
    pub invoice: Option<Invoice>,
    pub reservation: Option<Reservation>,
    pub contact: Option<Contact>,
    pub company: Option<Company>,
    pub property: Option<Property>,
    pub office: Option<Office>,
    pub accounting_office: Option<Office>,
    pub organization: Option<Organization>,
    pub lease_information: Option<LeaseInformation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_type_parses_wire_codes() {
        let clr: DepositType = serde_json::from_str("\"CLR\"").expect("CLR parses");
        assert_eq!(clr, DepositType::CollectedAtReservation);
        let sdw: DepositType = serde_json::from_str("\"SDW\"").expect("SDW parses");
        assert_eq!(sdw, DepositType::SpreadWithRent);
        let other: DepositType = serde_json::from_str("\"STD\"").expect("unknown code parses");
        assert_eq!(other, DepositType::Standard);
    }

    #[test]
    fn partial_payload_deserializes_with_defaults() {
        let json = r#"{
            "reservation": { "reservationCode": "R-100", "billingType": "monthly" },
            "property": { "bedrooms": 2 }
        }"#;
        let context: DocumentContext = serde_json::from_str(json).expect("partial bag parses");

        let reservation = context.reservation.expect("reservation present");
        assert_eq!(reservation.reservation_code, "R-100");
        assert_eq!(reservation.billing_type, Some(BillingType::Monthly));
        assert_eq!(reservation.deposit, 0.0);
        assert!(reservation.notice.is_none());

        assert_eq!(context.property.expect("property present").bedrooms, 2);
        assert!(context.invoice.is_none());
    }

    #[test]
    fn file_details_prefers_stored_data_url() {
        let details = FileDetails {
            content_type: "image/png".to_string(),
            file: "aGVsbG8=".to_string(),
            data_url: "data:image/png;base64,cached".to_string(),
        };
        assert_eq!(
            details.to_data_url().as_deref(),
            Some("data:image/png;base64,cached")
        );

        let assembled = FileDetails {
            content_type: "image/jpeg".to_string(),
            file: "aGVsbG8=".to_string(),
            data_url: String::new(),
        };
        assert_eq!(
            assembled.to_data_url().as_deref(),
            Some("data:image/jpeg;base64,aGVsbG8=")
        );

        assert!(FileDetails::default().to_data_url().is_none());
    }
}
