//! Row-level reads and writes.
//!
//! Every function takes any SQLite executor, so callers can run them against
//! the pool or inside a transaction.

use chrono::{DateTime, SecondsFormat, Utc};
use rfq_core::{
    AuditAction, AuditEntry, Document, DocumentStatus, ExtractedFields, PriceSuggestion,
    SuggestionRecord,
};
use sqlx::{Executor, FromRow, Sqlite};

use crate::error::{Result, StoreError};

/// Fixed-width timestamp so that text ordering matches time ordering.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, FromRow)]
struct DbDocument {
    id: String,
    filename: String,
    file_path: String,
    status: String,
    raw_text: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DbDocument> for Document {
    type Error = StoreError;

    fn try_from(row: DbDocument) -> Result<Self> {
        let status = row
            .status
            .parse::<DocumentStatus>()
            .map_err(|e| StoreError::Corrupt(format!("solicitation {}: {}", row.id, e)))?;
        Ok(Document {
            id: row.id,
            filename: row.filename,
            file_path: row.file_path,
            status,
            raw_text: row.raw_text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct DbExtracted {
    solicitation_id: String,
    nsn: Option<String>,
    quantity: Option<i64>,
    delivery_days: Option<i64>,
    description: Option<String>,
    confidence_score: f64,
}

impl TryFrom<DbExtracted> for ExtractedFields {
    type Error = StoreError;

    fn try_from(row: DbExtracted) -> Result<Self> {
        let to_u32 = |column: &str, value: Option<i64>| -> Result<Option<u32>> {
            value
                .map(|v| {
                    u32::try_from(v).map_err(|_| {
                        StoreError::Corrupt(format!(
                            "extracted_data {} for {}: {}",
                            column, row.solicitation_id, v
                        ))
                    })
                })
                .transpose()
        };
        Ok(ExtractedFields {
            quantity: to_u32("quantity", row.quantity)?,
            delivery_days: to_u32("delivery_days", row.delivery_days)?,
            nsn: row.nsn,
            description: row.description,
            confidence_score: row.confidence_score,
        })
    }
}

#[derive(Debug, FromRow)]
struct DbSuggestion {
    id: i64,
    solicitation_id: String,
    price_low: i64,
    price_high: i64,
    confidence_percent: i64,
    rationale_json: String,
    base_cost: i64,
    margin_factor: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<DbSuggestion> for SuggestionRecord {
    type Error = StoreError;

    fn try_from(row: DbSuggestion) -> Result<Self> {
        Ok(SuggestionRecord {
            id: row.id,
            solicitation_id: row.solicitation_id,
            suggestion: PriceSuggestion {
                price_low: row.price_low,
                price_high: row.price_high,
                confidence_percent: row.confidence_percent,
                rationale: serde_json::from_str(&row.rationale_json)?,
                base_cost: row.base_cost,
                margin_factor: row.margin_factor,
            },
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct DbAudit {
    id: i64,
    solicitation_id: String,
    action: String,
    details: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<DbAudit> for AuditEntry {
    type Error = StoreError;

    fn try_from(row: DbAudit) -> Result<Self> {
        let action = row
            .action
            .parse::<AuditAction>()
            .map_err(|e| StoreError::Corrupt(format!("audit_logs {}: {}", row.id, e)))?;
        Ok(AuditEntry {
            id: row.id,
            solicitation_id: row.solicitation_id,
            action,
            details: serde_json::from_str(&row.details)?,
            created_at: row.created_at,
        })
    }
}

const DOCUMENT_COLUMNS: &str =
    "id, filename, file_path, status, raw_text, created_at, updated_at";

pub async fn insert_document<'e, E>(executor: E, document: &Document) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO solicitations (id, filename, file_path, status, raw_text, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&document.id)
    .bind(&document.filename)
    .bind(&document.file_path)
    .bind(document.status.as_str())
    .bind(&document.raw_text)
    .bind(timestamp(document.created_at))
    .bind(timestamp(document.updated_at))
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_document<'e, E>(executor: E, id: &str) -> Result<Option<Document>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM solicitations WHERE id = ?", DOCUMENT_COLUMNS);
    let row: Option<DbDocument> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    row.map(Document::try_from).transpose()
}

/// All documents, newest first.
pub async fn list_documents<'e, E>(executor: E) -> Result<Vec<Document>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {} FROM solicitations ORDER BY created_at DESC, id DESC",
        DOCUMENT_COLUMNS
    );
    let rows: Vec<DbDocument> = sqlx::query_as(&sql).fetch_all(executor).await?;
    rows.into_iter().map(Document::try_from).collect()
}

/// Overwrite the editable columns. Status is not editable here.
pub async fn update_document_details<'e, E>(
    executor: E,
    id: &str,
    filename: Option<&str>,
    raw_text: Option<&str>,
    at: DateTime<Utc>,
) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE solicitations
        SET filename = COALESCE(?, filename),
            raw_text = COALESCE(?, raw_text),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(filename)
    .bind(raw_text)
    .bind(timestamp(at))
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Move a document to `status` unless it is already at or past it.
///
/// Returns whether the row changed.
pub async fn advance_status<'e, E>(
    executor: E,
    id: &str,
    status: DocumentStatus,
    at: DateTime<Utc>,
) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE solicitations
        SET status = ?, updated_at = ?
        WHERE id = ?
          AND (CASE status WHEN 'uploaded' THEN 0 WHEN 'extracted' THEN 1 ELSE 2 END) < ?
        "#,
    )
    .bind(status.as_str())
    .bind(timestamp(at))
    .bind(id)
    .bind(status.rank())
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Insert or overwrite the extracted fields of a document.
pub async fn upsert_extracted<'e, E>(
    executor: E,
    solicitation_id: &str,
    fields: &ExtractedFields,
    at: DateTime<Utc>,
) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let at = timestamp(at);
    sqlx::query(
        r#"
        INSERT INTO extracted_data
            (solicitation_id, nsn, quantity, delivery_days, description, confidence_score, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(solicitation_id) DO UPDATE SET
            nsn = excluded.nsn,
            quantity = excluded.quantity,
            delivery_days = excluded.delivery_days,
            description = excluded.description,
            confidence_score = excluded.confidence_score,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(solicitation_id)
    .bind(&fields.nsn)
    .bind(fields.quantity.map(i64::from))
    .bind(fields.delivery_days.map(i64::from))
    .bind(&fields.description)
    .bind(fields.confidence_score)
    .bind(&at)
    .bind(&at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_extracted<'e, E>(executor: E, solicitation_id: &str) -> Result<Option<ExtractedFields>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<DbExtracted> = sqlx::query_as(
        r#"
        SELECT solicitation_id, nsn, quantity, delivery_days, description, confidence_score
        FROM extracted_data
        WHERE solicitation_id = ?
        "#,
    )
    .bind(solicitation_id)
    .fetch_optional(executor)
    .await?;
    row.map(ExtractedFields::try_from).transpose()
}

/// Append a suggestion and return the stored record.
pub async fn insert_suggestion<'e, E>(
    executor: E,
    solicitation_id: &str,
    suggestion: &PriceSuggestion,
    at: DateTime<Utc>,
) -> Result<SuggestionRecord>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rationale_json = serde_json::to_string(&suggestion.rationale)?;
    let row: DbSuggestion = sqlx::query_as(
        r#"
        INSERT INTO price_suggestions
            (solicitation_id, price_low, price_high, confidence_percent, rationale_json, base_cost, margin_factor, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, solicitation_id, price_low, price_high, confidence_percent,
                  rationale_json, base_cost, margin_factor, created_at
        "#,
    )
    .bind(solicitation_id)
    .bind(suggestion.price_low)
    .bind(suggestion.price_high)
    .bind(suggestion.confidence_percent)
    .bind(&rationale_json)
    .bind(suggestion.base_cost)
    .bind(suggestion.margin_factor)
    .bind(timestamp(at))
    .fetch_one(executor)
    .await?;
    row.try_into()
}

/// Suggestions for a document, newest first.
pub async fn list_suggestions<'e, E>(
    executor: E,
    solicitation_id: &str,
    limit: Option<i64>,
) -> Result<Vec<SuggestionRecord>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<DbSuggestion> = sqlx::query_as(
        r#"
        SELECT id, solicitation_id, price_low, price_high, confidence_percent,
               rationale_json, base_cost, margin_factor, created_at
        FROM price_suggestions
        WHERE solicitation_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(solicitation_id)
    // SQLite treats a negative limit as unbounded
    .bind(limit.unwrap_or(-1))
    .fetch_all(executor)
    .await?;
    rows.into_iter().map(SuggestionRecord::try_from).collect()
}

pub async fn latest_suggestion<'e, E>(executor: E, solicitation_id: &str) -> Result<Option<SuggestionRecord>>
where
    E: Executor<'e, Database = Sqlite>,
{
    Ok(list_suggestions(executor, solicitation_id, Some(1))
        .await?
        .into_iter()
        .next())
}

pub async fn append_audit<'e, E>(
    executor: E,
    solicitation_id: &str,
    action: AuditAction,
    details: &serde_json::Value,
    at: DateTime<Utc>,
) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO audit_logs (solicitation_id, action, details, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(solicitation_id)
    .bind(action.as_str())
    .bind(serde_json::to_string(details)?)
    .bind(timestamp(at))
    .execute(executor)
    .await?;
    Ok(())
}

/// Audit entries for a document, newest first.
pub async fn list_audit<'e, E>(executor: E, solicitation_id: &str) -> Result<Vec<AuditEntry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<DbAudit> = sqlx::query_as(
        r#"
        SELECT id, solicitation_id, action, details, created_at
        FROM audit_logs
        WHERE solicitation_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(solicitation_id)
    .fetch_all(executor)
    .await?;
    rows.into_iter().map(AuditEntry::try_from).collect()
}
