//! `format` command: renders stored products as text, Markdown, or JSON.

use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;
use madshus_core::{render_markdown, render_text, FormattedProduct, ProductRecord};
use madshus_db::SqlitePool;

/// Separates consecutive products in text and Markdown output.
const RECORD_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Markdown,
    Json,
}

/// Loads the requested products (all when `uids` is empty) and writes their
/// rendering to `output`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if loading, JSON encoding, or writing fails.
pub(crate) async fn run_format(
    pool: &SqlitePool,
    uids: &[String],
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let filter = (!uids.is_empty()).then_some(uids);
    let records = madshus_db::load_product_records(pool, filter).await?;

    if !uids.is_empty() && records.len() < uids.len() {
        for uid in uids {
            if !records.iter().any(|r| &r.uid == uid) {
                tracing::warn!(uid = %uid, "no stored product with this uid");
            }
        }
    }
    if records.is_empty() {
        tracing::warn!("no products to render");
    }

    let rendered = render_records(&records, format)?;
    write_output(&rendered, output)?;

    if let Some(path) = output {
        println!("wrote {} products to {}", records.len(), path.display());
    }
    Ok(())
}

/// Renders `records` in the requested format.
///
/// Text and Markdown emit each product followed by a `---` separator; JSON is
/// a pretty-printed array of [`FormattedProduct`].
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub(crate) fn render_records(
    records: &[ProductRecord],
    format: OutputFormat,
) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Text => join_with_separator(records, render_text),
        OutputFormat::Markdown => join_with_separator(records, render_markdown),
        OutputFormat::Json => {
            let formatted: Vec<FormattedProduct> =
                records.iter().map(FormattedProduct::from_record).collect();
            serde_json::to_string_pretty(&formatted).context("encoding products as JSON")?
        }
    };
    Ok(rendered)
}

fn join_with_separator(records: &[ProductRecord], render: fn(&ProductRecord) -> String) -> String {
    records.iter().fold(String::new(), |mut out, record| {
        out.push_str(&render(record));
        out.push_str(RECORD_SEPARATOR);
        out
    })
}

fn write_output(rendered: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating directory {}", parent.display()))?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("writing to stdout")?;
            if !rendered.ends_with('\n') {
                stdout.write_all(b"\n").context("writing to stdout")?;
            }
        }
    }
    Ok(())
}
