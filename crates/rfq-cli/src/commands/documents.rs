//! Commands operating on stored solicitations.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use rfq_core::FieldsUpdate;
use rfq_store::{DocumentUpdate, RfqService};

use super::load_config;
use super::process::{format_fields, format_suggestion};

/// Arguments for the upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// File to store (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Run extraction and suggestion right after storing
    #[arg(long)]
    process: bool,
}

/// A solicitation id.
#[derive(Args)]
pub struct IdArgs {
    /// Solicitation id
    id: String,

    /// Print JSON instead of a summary
    #[arg(long)]
    json: bool,
}

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Solicitation id
    id: String,

    /// New filename
    #[arg(long)]
    filename: Option<String>,

    /// National Stock Number
    #[arg(long)]
    nsn: Option<String>,

    /// Quantity
    #[arg(long)]
    quantity: Option<u32>,

    /// Delivery window in days
    #[arg(long)]
    delivery_days: Option<u32>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Confidence score between 0 and 1
    #[arg(long)]
    confidence: Option<f64>,
}

impl EditArgs {
    fn into_update(self) -> DocumentUpdate {
        let fields = FieldsUpdate {
            nsn: self.nsn,
            quantity: self.quantity,
            delivery_days: self.delivery_days,
            description: self.description,
            confidence_score: self.confidence,
        };
        DocumentUpdate {
            filename: self.filename,
            raw_text: None,
            fields: (!fields.is_empty()).then_some(fields),
        }
    }
}

async fn open_service(config_path: Option<&str>) -> anyhow::Result<RfqService> {
    let config = load_config(config_path)?;
    Ok(RfqService::from_config(&config).await?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn upload(args: UploadArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let service = open_service(config_path).await?;
    let filename = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let data = fs::read(&args.input)?;

    let document = service.upload(&filename, &data).await?;
    info!("Stored {} as {}", filename, document.file_path);

    println!(
        "{} Uploaded {} as {}",
        style("✓").green(),
        document.filename,
        style(&document.id).bold()
    );

    if args.process {
        let fields = service.extract(&document.id).await?;
        print!("{}", format_fields(&fields));
        let record = service.suggest(&document.id).await?;
        print!("{}", format_suggestion(&record.suggestion));
    }

    Ok(())
}

pub async fn list(config_path: Option<&str>) -> anyhow::Result<()> {
    let service = open_service(config_path).await?;
    let documents = service.list().await?;

    if documents.is_empty() {
        println!("{} No solicitations stored.", style("ℹ").blue());
        return Ok(());
    }

    for document in documents {
        println!(
            "{}  {:<9}  {}  {}",
            document.id,
            document.status,
            document.created_at.format("%Y-%m-%d %H:%M"),
            document.filename
        );
    }

    Ok(())
}

pub async fn show(args: IdArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let service = open_service(config_path).await?;
    let detail = service.get(&args.id).await?;

    if args.json {
        return print_json(&detail);
    }

    let document = &detail.document;
    println!("Solicitation: {}", style(&document.id).bold());
    println!("File:         {}", document.filename);
    println!("Status:       {}", document.status);
    println!("Created:      {}", document.created_at.to_rfc3339());

    match &detail.extracted_data {
        Some(fields) => {
            println!();
            print!("{}", format_fields(fields));
        }
        None => println!("\n{} Not extracted yet.", style("ℹ").blue()),
    }

    if let Some(record) = &detail.latest_suggestion {
        println!();
        print!("{}", format_suggestion(&record.suggestion));
    }

    Ok(())
}

pub async fn extract(args: IdArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let service = open_service(config_path).await?;
    let fields = service.extract(&args.id).await?;

    if args.json {
        print_json(&fields)
    } else {
        print!("{}", format_fields(&fields));
        Ok(())
    }
}

pub async fn suggest(args: IdArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let service = open_service(config_path).await?;
    let record = service.suggest(&args.id).await?;

    if args.json {
        print_json(&record)
    } else {
        print!("{}", format_suggestion(&record.suggestion));
        Ok(())
    }
}

pub async fn edit(args: EditArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let service = open_service(config_path).await?;
    let id = args.id.clone();
    let detail = service.update(&id, args.into_update()).await?;

    println!("{} Updated {}", style("✓").green(), detail.document.id);
    if let Some(fields) = &detail.extracted_data {
        print!("{}", format_fields(fields));
    }

    Ok(())
}

pub async fn audit(args: IdArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let service = open_service(config_path).await?;
    let entries = service.audit(&args.id).await?;

    if args.json {
        return print_json(&entries);
    }

    for entry in entries {
        println!(
            "{}  {:<9}  {}",
            entry.created_at.to_rfc3339(),
            entry.action,
            serde_json::to_string(&entry.details)?
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit_args() -> EditArgs {
        EditArgs {
            id: "abc".to_string(),
            filename: None,
            nsn: None,
            quantity: None,
            delivery_days: None,
            description: None,
            confidence: None,
        }
    }

    #[test]
    fn test_edit_without_field_flags_has_no_fields() {
        let update = EditArgs {
            filename: Some("renamed.pdf".to_string()),
            ..edit_args()
        }
        .into_update();
        assert_eq!(update.filename.as_deref(), Some("renamed.pdf"));
        assert!(update.fields.is_none());
    }

    #[test]
    fn test_edit_field_flags() {
        let update = EditArgs {
            quantity: Some(4),
            confidence: Some(0.5),
            ..edit_args()
        }
        .into_update();
        assert!(update.validate().is_ok());
        let fields = update.fields.unwrap();
        assert_eq!(fields.quantity, Some(4));
        assert_eq!(fields.confidence_score, Some(0.5));
    }
}
