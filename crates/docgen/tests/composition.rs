use docgen::documents::{
    render_document, render_pdf, BillingType, DocumentContext, Reservation,
};

fn reservation_context() -> DocumentContext {
    DocumentContext {
        reservation: Some(Reservation {
            tenant_name: "Jordan Reyes".to_string(),
            billing_type: Some(BillingType::Monthly),
            billing_rate: 1500.0,
            ..Reservation::default()
        }),
        ..DocumentContext::default()
    }
}

#[test]
fn two_fragments_compose_into_one_styled_document() {
    let fragments = vec![
        "<html><head><style>p{color:#ccc}</style></head><body>A {{tenantName}}</body></html>"
            .to_string(),
        "<html><body>B {{billingType}}</body></html>".to_string(),
    ];

    let rendered = render_document(&fragments, &reservation_context());

    let a = rendered.html.find("A Jordan Reyes").expect("base fragment kept");
    let b = rendered.html.find("B Monthly").expect("secondary fragment appended");
    assert!(a < b, "fragments keep their order");
    assert!(rendered.styles.contains("color:#000 !important"));
    assert!(!rendered.html.contains("<style>"));
    assert_eq!(rendered.html.matches("<body>").count(), 1);
}

#[test]
fn blank_fragments_yield_an_empty_result() {
    let rendered = render_document(
        &[String::new(), "   ".to_string()],
        &reservation_context(),
    );
    assert!(rendered.is_empty());
    assert_eq!(render_pdf(&[String::new()], &reservation_context()), "");
}

#[test]
fn composition_runs_blanking_after_the_merge() {
    // The second fragment carries a token nobody resolves; composition must
    // not reintroduce it into the final output.
    let fragments = vec![
        "<html><body>First</body></html>".to_string(),
        "<html><body>{{neverResolved}} Second</body></html>".to_string(),
    ];

    let rendered = render_document(&fragments, &reservation_context());
    assert!(rendered.html.contains("Second"));
    assert!(!rendered.html.contains("{{"));
}

#[test]
fn pdf_output_wraps_the_merged_body_in_a_print_shell() {
    let fragments = vec![
        "<html><head><style>td{color:#999}</style></head><body><table><tr><td>{{tenantName}}</td></tr></table></body></html>"
            .to_string(),
        "<html><body><div class=\"breakhere\">Welcome letter</div></body></html>".to_string(),
    ];

    let pdf = render_pdf(&fragments, &reservation_context());

    assert!(pdf.starts_with("<!DOCTYPE html>"));
    assert!(pdf.contains("Jordan Reyes"));
    assert!(pdf.contains("Welcome letter"));
    assert!(pdf.contains("page-break-before"));
    assert!(pdf.contains("color:#000 !important"));
    assert!(!pdf.contains("{{"));
}

#[test]
fn single_fragment_round_trip_keeps_body_content() {
    let rendered = render_document(
        &["<html><body><p>{{tenantName}}</p></body></html>".to_string()],
        &reservation_context(),
    );
    assert!(rendered.html.contains("<p>Jordan Reyes</p>"));
    assert!(rendered.styles.is_empty());
}
