//! Document templating and composition engine. A single generation call is
//! a pure function of (templates, entity bag) -> (html, styles): no I/O, no
//! shared state, safe to invoke from concurrent tasks.

pub mod calculators;
pub mod compose;
pub mod entities;
pub mod format;
pub mod output;
pub mod resolver;
mod templates;

pub use compose::{compose as compose_fragments, ComposedDocument};
pub use entities::{
    BillingType, Company, Contact, DepositType, DocumentContext, EntityType, FileDetails, Invoice,
    LeaseInformation, LedgerLine, Office, Organization, Property, Reservation, ReservationNotice,
};
pub use output::Preview;
pub use templates::{ParseTemplateSourceError, TemplateError, TemplateSource, TemplateStore};

/// A finished document: body HTML with zero `{{...}}` markers and zero
/// `<style>` blocks, plus the consolidated stylesheet extracted from the
/// input fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    pub styles: String,
}

impl RenderedDocument {
    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.styles.is_empty()
    }
}

/// Resolve every template against the context, compose the fragments, and
/// blank whatever no resolver claimed. The blanking pass runs exactly once,
/// after composition.
pub fn render_document(templates: &[String], context: &DocumentContext) -> RenderedDocument {
    let composed = resolve_and_compose(templates, context);
    let preview = output::preview(&composed);
    RenderedDocument {
        html: output::blank_unresolved(&preview.html),
        styles: preview.styles,
    }
}

/// Same pipeline, wrapped in a print-ready document shell for the PDF
/// collaborator. Empty input stays empty.
pub fn render_pdf(templates: &[String], context: &DocumentContext) -> String {
    let composed = resolve_and_compose(templates, context);
    output::blank_unresolved(&output::pdf_document(&composed))
}

fn resolve_and_compose(templates: &[String], context: &DocumentContext) -> ComposedDocument {
    let resolved: Vec<String> = templates
        .iter()
        .map(|template| resolver::resolve(template, context))
        .collect();
    compose::compose(&resolved)
}
