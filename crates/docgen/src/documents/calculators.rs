//! Derived-value rules invoked while the resolver builds its substitution
//! tables. Each function is pure and takes only the entities it needs.

use super::entities::{
    BillingType, Company, Contact, DepositType, EntityType, Invoice, Office, Organization,
    Property, Reservation,
};
use super::format;

/// Company name when the contact is a company account with a company record
/// present; otherwise the contact's own name.
pub fn responsible_party(contact: &Contact, company: Option<&Company>) -> String {
    if contact.entity_type == Some(EntityType::Company) {
        if let Some(company) = company {
            return company.name.clone();
        }
    }
    format!("{} {}", contact.first_name, contact.last_name)
        .trim()
        .to_string()
}

pub fn security_deposit_text(reservation: &Reservation) -> String {
    match reservation.deposit_type {
        Some(DepositType::CollectedAtReservation) => "$0.00".to_string(),
        Some(DepositType::SpreadWithRent) => {
            format!("{} per month", format::usd(reservation.deposit))
        }
        // Trailing space matches the historical lease layout.
        _ => format!("{} ", format::usd(reservation.deposit)),
    }
}

pub fn deposit_requirement_text(reservation: &Reservation) -> String {
    match reservation.deposit_type {
        Some(DepositType::CollectedAtReservation) => {
            format!(
                "{} (Required to reserve unit)",
                format::usd(reservation.deposit)
            )
        }
        Some(DepositType::SpreadWithRent) => {
            format!(
                "{} per month (To be included with monthly rent)",
                format::usd(reservation.deposit)
            )
        }
        _ => format!("{} (See below)", format::usd(reservation.deposit)),
    }
}

/// Variant used on reservation paperwork: nothing further is collected for a
/// deposit taken at reservation time, so the amount column shows zero.
pub fn deposit_requirement_reserve_text(reservation: &Reservation) -> String {
    match reservation.deposit_type {
        Some(DepositType::CollectedAtReservation) => {
            "$0.00 (Required to reserve unit)".to_string()
        }
        Some(DepositType::SpreadWithRent) => {
            format!(
                "{} per month (To be included with monthly rent)",
                format::usd(reservation.deposit)
            )
        }
        _ => format!("{} (See below)", format::usd(reservation.deposit)),
    }
}

pub fn partial_month_text(reservation: &Reservation) -> String {
    match reservation.billing_type {
        Some(BillingType::Daily) => format!("{} per day.", format::usd(reservation.billing_rate)),
        Some(BillingType::Nightly) => {
            format!("{} per night.", format::usd(reservation.billing_rate))
        }
        Some(BillingType::Monthly) => "Monthly Rate divided by 30 days.".to_string(),
        None => String::new(),
    }
}

pub fn notice_text(reservation: &Reservation) -> String {
    match reservation.notice {
        Some(notice) => format!("({} day written notice is required)", notice.days()),
        None => String::new(),
    }
}

pub fn notice_days(reservation: &Reservation) -> String {
    match reservation.notice {
        Some(notice) => notice.days().to_string(),
        None => String::new(),
    }
}

pub fn pet_text(reservation: &Reservation) -> String {
    if !reservation.has_pets {
        return "None".to_string();
    }
    format!(
        "{}.     {} pet(s).    Type(s):{}",
        format::usd(reservation.pet_fee),
        reservation.number_of_pets,
        reservation.pet_description
    )
}

pub fn extensions_text(reservation: &Reservation) -> String {
    if reservation.allow_extensions {
        "Extensions available upon written request.".to_string()
    } else {
        "No extensions permitted.".to_string()
    }
}

/// Utility charge indexed by bedroom count; anything outside the 1-4 tiers
/// clamps to the house tier.
pub fn utility_fee(office: Option<&Office>, property: Option<&Property>) -> String {
    let (office, property) = match (office, property) {
        (Some(office), Some(property)) => (office, property),
        _ => return String::new(),
    };
    let fee = match property.bedrooms {
        1 => office.utility_one_bed,
        2 => office.utility_two_bed,
        3 => office.utility_three_bed,
        4 => office.utility_four_bed,
        _ => office.utility_house,
    };
    format::usd(fee)
}

/// Maid-service charge; the office carries no dedicated house tier, so out
/// of range bedroom counts clamp to the four-bed tier.
pub fn maid_fee(office: Option<&Office>, property: Option<&Property>) -> String {
    let (office, property) = match (office, property) {
        (Some(office), Some(property)) => (office, property),
        _ => return String::new(),
    };
    let fee = match property.bedrooms {
        1 => office.maid_one_bed,
        2 => office.maid_two_bed,
        3 => office.maid_three_bed,
        _ => office.maid_four_bed,
    };
    format::usd(fee)
}

pub fn parking_range(office: &Office) -> String {
    format!(
        "{} - {}",
        format::usd(office.parking_low_end),
        format::usd(office.parking_high_end)
    )
}

fn join_address(segments: &[&str]) -> String {
    segments
        .iter()
        .filter(|segment| !segment.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn property_address(property: &Property) -> String {
    let suite = if property.suite.trim().is_empty() {
        String::new()
    } else {
        format!("#{}", property.suite)
    };
    join_address(&[
        &property.address1,
        &suite,
        &property.city,
        &property.state,
        &property.zip,
    ])
}

pub fn contact_address(contact: &Contact) -> String {
    join_address(&[
        &contact.address1,
        &contact.address2,
        &contact.city,
        &contact.state,
        &contact.zip,
    ])
}

pub fn company_address(company: &Company) -> String {
    join_address(&[
        &company.address1,
        &company.address2,
        &company.city,
        &company.state,
        &company.zip,
    ])
}

/// Conditional address: company accounts use the company's address when a
/// company record is present, everyone else uses the contact's own.
pub fn mailing_address(contact: &Contact, company: Option<&Company>) -> String {
    if contact.entity_type == Some(EntityType::Company) {
        if let Some(company) = company {
            return company_address(company);
        }
    }
    contact_address(contact)
}

/// Letterhead fallback chain: accounting office, then office, then
/// organization. First populated logo wins.
pub fn logo_data_url(
    accounting_office: Option<&Office>,
    office: Option<&Office>,
    organization: Option<&Organization>,
) -> Option<String> {
    accounting_office
        .and_then(|office| office.file_details.as_ref())
        .and_then(|details| details.to_data_url())
        .or_else(|| {
            office
                .and_then(|office| office.file_details.as_ref())
                .and_then(|details| details.to_data_url())
        })
        .or_else(|| {
            organization
                .and_then(|organization| organization.file_details.as_ref())
                .and_then(|details| details.to_data_url())
        })
}

/// One `<tr>` per ledger line, ready to drop into the invoice table body.
pub fn ledger_rows(invoice: &Invoice) -> String {
    invoice
        .ledger_lines
        .iter()
        .map(|line| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                line.line_number,
                line.description,
                format::usd(line.amount)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn balance_due(invoice: &Invoice) -> String {
    format::usd(invoice.total_amount - invoice.paid_amount)
}
