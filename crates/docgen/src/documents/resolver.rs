//! Placeholder substitution. Each entity category contributes an ordered
//! `(token, value)` table; token names are unique across categories, so one
//! lookup pass replaces everything the context can answer for. Lease
//! clauses run in an isolated first pass because their stored text is
//! substituted verbatim.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::calculators;
use super::entities::{
    Company, Contact, DocumentContext, Invoice, LeaseInformation, Office, Organization, Property,
    Reservation,
};
use super::format;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z][A-Za-z0-9]*)\}\}").expect("token pattern compiles"));

static LOGO_IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<img[^>]*\{\{logoUrl\}\}[^>]*>").expect("logo img pattern compiles")
});

/// Substitute every token the context can resolve. Unrecognized tokens are
/// left untouched for the final blanking pass; absent categories never
/// raise.
pub fn resolve(template: &str, context: &DocumentContext) -> String {
    let mut html = template.to_string();

    // Lease clauses first, in their own pass.
    if let Some(lease) = &context.lease_information {
        html = apply(&html, &lease_table(lease));
    }

    // A logo token with an empty fallback chain takes its enclosing <img>
    // tag with it.
    let logo = calculators::logo_data_url(
        context.accounting_office.as_ref(),
        context.office.as_ref(),
        context.organization.as_ref(),
    );
    if logo.is_none() {
        html = LOGO_IMG_RE.replace_all(&html, "").into_owned();
    }

    apply(&html, &general_table(context, logo))
}

fn apply(template: &str, table: &[(&'static str, String)]) -> String {
    let lookup: HashMap<&str, &String> = table.iter().map(|(name, value)| (*name, value)).collect();
    TOKEN_RE
        .replace_all(template, |caps: &Captures<'_>| match lookup.get(&caps[1]) {
            Some(value) => (*value).clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn general_table(context: &DocumentContext, logo: Option<String>) -> Vec<(&'static str, String)> {
    let mut table = Vec::new();
    if let Some(invoice) = &context.invoice {
        table.extend(invoice_table(invoice));
    }
    if let Some(reservation) = &context.reservation {
        table.extend(reservation_table(reservation));
    }
    if let Some(contact) = &context.contact {
        table.extend(contact_table(contact, context.company.as_ref()));
    }
    if let Some(company) = &context.company {
        table.extend(company_table(company));
    }
    if let Some(property) = &context.property {
        table.extend(property_table(property));
    }
    if let Some(office) = &context.office {
        table.extend(office_table(office, context.property.as_ref()));
    }
    if let Some(accounting) = &context.accounting_office {
        table.extend(accounting_office_table(accounting));
    }
    if let Some(organization) = &context.organization {
        table.extend(organization_table(organization));
    }
    if let Some(url) = logo {
        table.push(("logoUrl", url));
    }
    table
}

fn lease_table(lease: &LeaseInformation) -> Vec<(&'static str, String)> {
    vec![
        ("rentalPayment", lease.rental_payment.clone()),
        ("securityDeposit", lease.security_deposit.clone()),
        ("cancellationPolicy", lease.cancellation_policy.clone()),
        ("utilities", lease.utilities.clone()),
        ("furnishings", lease.furnishings.clone()),
        ("housekeeping", lease.housekeeping.clone()),
        ("parking", lease.parking.clone()),
        ("pets", lease.pets.clone()),
        ("smoking", lease.smoking.clone()),
        ("maintenance", lease.maintenance.clone()),
        ("keys", lease.keys.clone()),
        ("checkIn", lease.check_in.clone()),
        ("checkOut", lease.check_out.clone()),
        ("extensions", lease.extensions.clone()),
        ("insurance", lease.insurance.clone()),
        ("occupancy", lease.occupancy.clone()),
        ("quietHours", lease.quiet_hours.clone()),
        ("damages", lease.damages.clone()),
        ("mail", lease.mail.clone()),
        ("internet", lease.internet.clone()),
        ("trash", lease.trash.clone()),
        ("laundry", lease.laundry.clone()),
        ("subletting", lease.subletting.clone()),
        ("termination", lease.termination.clone()),
    ]
}

fn invoice_table(invoice: &Invoice) -> Vec<(&'static str, String)> {
    vec![
        ("invoiceId", invoice.invoice_id.clone()),
        ("invoiceName", invoice.invoice_name.clone()),
        ("invoiceDate", format::date(invoice.invoice_date)),
        ("invoiceDueDate", format::date(invoice.due_date)),
        ("invoiceStartDate", format::date(invoice.start_date)),
        ("invoiceEndDate", format::date(invoice.end_date)),
        ("invoiceTotal", format::usd(invoice.total_amount)),
        ("invoicePaid", format::usd(invoice.paid_amount)),
        ("invoiceBalance", calculators::balance_due(invoice)),
        ("ledgerLinesRows", calculators::ledger_rows(invoice)),
    ]
}

fn reservation_table(reservation: &Reservation) -> Vec<(&'static str, String)> {
    let billing = reservation.billing_type;
    vec![
        ("reservationCode", reservation.reservation_code.clone()),
        ("tenantName", reservation.tenant_name.clone()),
        ("arrivalDate", format::date(reservation.arrival_date)),
        ("departureDate", format::date(reservation.departure_date)),
        (
            "billingType",
            billing.map(|b| b.label().to_string()).unwrap_or_default(),
        ),
        (
            "billingTypeDay",
            billing.map(|b| b.day_unit().to_string()).unwrap_or_default(),
        ),
        (
            "billingTypeLower",
            billing.map(|b| b.adverb().to_string()).unwrap_or_default(),
        ),
        ("billingRate", format::currency(reservation.billing_rate)),
        ("securityText", calculators::security_deposit_text(reservation)),
        (
            "depositRequirement",
            calculators::deposit_requirement_text(reservation),
        ),
        (
            "depositRequirementReserve",
            calculators::deposit_requirement_reserve_text(reservation),
        ),
        ("partialMonthText", calculators::partial_month_text(reservation)),
        ("noticeText", calculators::notice_text(reservation)),
        ("noticeDays", calculators::notice_days(reservation)),
        ("petText", calculators::pet_text(reservation)),
        ("extensionsText", calculators::extensions_text(reservation)),
    ]
}

fn contact_table(contact: &Contact, company: Option<&Company>) -> Vec<(&'static str, String)> {
    vec![
        (
            "contactName",
            format!("{} {}", contact.first_name, contact.last_name)
                .trim()
                .to_string(),
        ),
        ("contactFirstName", contact.first_name.clone()),
        ("contactLastName", contact.last_name.clone()),
        ("contactPhone", format::phone(&contact.phone)),
        ("contactEmail", contact.email.clone()),
        ("contactAddress", calculators::mailing_address(contact, company)),
        (
            "responsibleParty",
            calculators::responsible_party(contact, company),
        ),
    ]
}

fn company_table(company: &Company) -> Vec<(&'static str, String)> {
    vec![
        ("companyName", company.name.clone()),
        ("companyAddress", calculators::company_address(company)),
    ]
}

fn property_table(property: &Property) -> Vec<(&'static str, String)> {
    vec![
        ("propertyCode", property.property_code.clone()),
        ("propertyAddress", calculators::property_address(property)),
        ("bedrooms", property.bedrooms.to_string()),
        ("parkingNotes", property.parking_notes.clone()),
    ]
}

fn office_table(office: &Office, property: Option<&Property>) -> Vec<(&'static str, String)> {
    vec![
        ("officeName", office.name.clone()),
        ("officePhone", format::phone(&office.phone)),
        ("officeFax", format::phone(&office.fax)),
        ("keyFee", format::usd(office.default_key_fee)),
        ("utilityFee", calculators::utility_fee(Some(office), property)),
        ("maidFee", calculators::maid_fee(Some(office), property)),
        ("undisclosedPetFee", format::usd(office.undisclosed_pet_fee)),
        ("smokingFee", format::usd(office.minimum_smoking_fee)),
        ("parkingRange", calculators::parking_range(office)),
    ]
}

fn accounting_office_table(office: &Office) -> Vec<(&'static str, String)> {
    vec![
        ("accountingOfficeName", office.name.clone()),
        ("accountingOfficePhone", format::phone(&office.phone)),
        ("accountingOfficeFax", format::phone(&office.fax)),
    ]
}

fn organization_table(organization: &Organization) -> Vec<(&'static str, String)> {
    vec![
        ("organizationName", organization.name.clone()),
        ("organizationAddress", organization.address.clone()),
        ("organizationWebsite", organization.website.clone()),
    ]
}
