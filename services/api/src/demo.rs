use crate::infra::{sample_context, AssetTemplateStore};
use clap::Args;
use docgen::documents::{
    render_document, render_pdf, DocumentContext, TemplateStore,
};
use docgen::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RenderArgs {
    /// Asset template keys to compose, in order (defaults to `invoice`)
    #[arg(long = "template")]
    pub(crate) templates: Vec<String>,
    /// Path to a template file to render instead of built-in assets
    #[arg(long)]
    pub(crate) template_file: Option<PathBuf>,
    /// Path to a JSON entity bag (defaults to the built-in sample data)
    #[arg(long)]
    pub(crate) context: Option<PathBuf>,
    /// Emit PDF-ready HTML instead of a preview body
    #[arg(long)]
    pub(crate) pdf: bool,
    /// Write the output here instead of stdout
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Also print the PDF-ready output
    #[arg(long)]
    pub(crate) show_pdf: bool,
}

pub(crate) fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let RenderArgs {
        templates,
        template_file,
        context,
        pdf,
        out,
    } = args;

    let fragments = match template_file {
        Some(path) => vec![std::fs::read_to_string(path)?],
        None => {
            let store = AssetTemplateStore::default();
            let keys = if templates.is_empty() {
                vec!["invoice".to_string()]
            } else {
                templates
            };
            keys.iter()
                .map(|key| store.fetch(key).map_err(AppError::from))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let context = load_context(context)?;

    let output = if pdf {
        render_pdf(&fragments, &context)
    } else {
        let rendered = render_document(&fragments, &context);
        if rendered.styles.is_empty() {
            rendered.html
        } else {
            format!("<style>\n{}\n</style>\n{}", rendered.styles, rendered.html)
        }
    };

    match out {
        Some(path) => std::fs::write(path, output)?,
        None => println!("{output}"),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = AssetTemplateStore::default();
    let fragments = vec![store.fetch("invoice")?, store.fetch("welcome")?];
    let context = sample_context();

    println!("Document generation demo");
    println!(
        "- entity bag: invoice, reservation, contact, property, office, organization, lease clauses"
    );

    let rendered = render_document(&fragments, &context);
    println!(
        "- composed preview: {} bytes of HTML, {} bytes of extracted CSS",
        rendered.html.len(),
        rendered.styles.len()
    );
    assert_no_tokens(&rendered.html);

    if let Some(line) = rendered
        .html
        .lines()
        .find(|line| line.contains("Balance due"))
    {
        println!("- sample line: {}", line.trim());
    }

    if args.show_pdf {
        let pdf = render_pdf(&fragments, &context);
        println!("- PDF-ready output ({} bytes):\n{pdf}", pdf.len());
    }

    Ok(())
}

fn load_context(path: Option<PathBuf>) -> Result<DocumentContext, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let context = serde_json::from_str(&raw)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
            Ok(context)
        }
        None => Ok(sample_context()),
    }
}

fn assert_no_tokens(html: &str) {
    debug_assert!(!html.contains("{{"), "rendered output contains unresolved tokens");
}
