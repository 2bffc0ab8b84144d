//! Upload → extract → suggest workflow with an audit trail.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use rfq_core::{
    suggest_price_band, AuditAction, AuditEntry, AutoDecoder, Document, DocumentStatus,
    ExtractedFields, FieldsExtractor, FieldsUpdate, PricingInput, RfqConfig, RfqExtractor,
    SuggestionRecord, TextDecoder, ValidationError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::Database;
use crate::error::{Result, StoreError};
use crate::files::FileStore;
use crate::queries;

/// A document together with its extracted fields and newest suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetail {
    #[serde(flatten)]
    pub document: Document,
    pub extracted_data: Option<ExtractedFields>,
    pub latest_suggestion: Option<SuggestionRecord>,
}

/// Manual edit of a document. Status is deliberately not editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldsUpdate>,
}

impl DocumentUpdate {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let has_fields = self.fields.as_ref().is_some_and(|f| !f.is_empty());
        if self.filename.is_none() && self.raw_text.is_none() && !has_fields {
            return Err(ValidationError::Required("at least one editable field"));
        }
        if let Some(filename) = &self.filename {
            if filename.trim().is_empty() {
                return Err(ValidationError::Required("filename"));
            }
        }
        if let Some(fields) = &self.fields {
            fields.validate()?;
        }
        Ok(())
    }
}

/// Orchestrates persistence, file storage and the two pure transformations.
#[derive(Clone)]
pub struct RfqService {
    db: Database,
    files: FileStore,
    decoder: Arc<dyn TextDecoder>,
    retain_raw_text: bool,
}

impl RfqService {
    pub fn new(db: Database, files: FileStore) -> Self {
        Self {
            db,
            files,
            decoder: Arc::new(AutoDecoder),
            retain_raw_text: false,
        }
    }

    /// Connect to the configured database and upload directory.
    pub async fn from_config(config: &RfqConfig) -> Result<Self> {
        tokio::fs::create_dir_all(&config.storage.data_dir).await?;
        let db = Database::connect(&config.database_url(), config.storage.max_connections).await?;
        let files = FileStore::new(config.uploads_dir());
        Ok(Self::new(db, files).with_raw_text_retention(config.extraction.retain_raw_text))
    }

    /// Replace the document decoder.
    pub fn with_decoder(mut self, decoder: Arc<dyn TextDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Keep decoded text on the document after extraction.
    pub fn with_raw_text_retention(mut self, retain: bool) -> Self {
        self.retain_raw_text = retain;
        self
    }

    /// Store uploaded bytes and create a document for them.
    pub async fn upload(&self, filename: &str, data: &[u8]) -> Result<Document> {
        if filename.trim().is_empty() {
            return Err(ValidationError::Required("filename").into());
        }
        let id = Uuid::new_v4().to_string();
        let path = self.files.save(&id, filename, data).await?;
        self.create_document(id, filename, &path).await
    }

    /// Create a document for a file that already exists on disk.
    pub async fn register(&self, filename: &str, file_path: &str) -> Result<Document> {
        if filename.trim().is_empty() {
            return Err(ValidationError::Required("filename").into());
        }
        if file_path.trim().is_empty() {
            return Err(ValidationError::Required("filePath").into());
        }
        self.create_document(Uuid::new_v4().to_string(), filename, Path::new(file_path))
            .await
    }

    async fn create_document(&self, id: String, filename: &str, path: &Path) -> Result<Document> {
        let now = Utc::now();
        let document = Document {
            id,
            filename: filename.to_string(),
            file_path: path.display().to_string(),
            status: DocumentStatus::Uploaded,
            raw_text: None,
            created_at: now,
            updated_at: now,
        };
        queries::insert_document(self.db.pool(), &document).await?;
        info!("Created solicitation {} for {}", document.id, document.filename);
        Ok(document)
    }

    pub async fn list(&self) -> Result<Vec<Document>> {
        queries::list_documents(self.db.pool()).await
    }

    pub async fn get(&self, id: &str) -> Result<DocumentDetail> {
        let document = self.require_document(id).await?;
        let extracted_data = queries::get_extracted(self.db.pool(), id).await?;
        let latest_suggestion = queries::latest_suggestion(self.db.pool(), id).await?;
        Ok(DocumentDetail {
            document,
            extracted_data,
            latest_suggestion,
        })
    }

    /// All suggestions for a document, newest first.
    pub async fn suggestions(&self, id: &str) -> Result<Vec<SuggestionRecord>> {
        self.require_document(id).await?;
        queries::list_suggestions(self.db.pool(), id, None).await
    }

    /// Apply a manual edit and record it as `edited`. Status is unchanged.
    pub async fn update(&self, id: &str, update: DocumentUpdate) -> Result<DocumentDetail> {
        update.validate()?;
        self.require_document(id).await?;

        let now = Utc::now();
        let mut tx = self.db.pool().begin().await?;

        queries::update_document_details(
            &mut *tx,
            id,
            update.filename.as_deref().map(str::trim),
            update.raw_text.as_deref(),
            now,
        )
        .await?;

        if let Some(fields_update) = update.fields.as_ref().filter(|f| !f.is_empty()) {
            let current = queries::get_extracted(&mut *tx, id).await?.unwrap_or_default();
            let edited = fields_update.apply(current);
            queries::upsert_extracted(&mut *tx, id, &edited, now).await?;
        }

        let details = serde_json::to_value(&update)?;
        queries::append_audit(&mut *tx, id, AuditAction::Edited, &details, now).await?;
        tx.commit().await?;

        info!("Edited solicitation {}", id);
        self.get(id).await
    }

    /// Decode the stored file, extract fields and persist them.
    pub async fn extract(&self, id: &str) -> Result<ExtractedFields> {
        let document = self.require_document(id).await?;

        let path = PathBuf::from(&document.file_path);
        if !self.files.exists(&path).await? {
            return Err(StoreError::FileMissing(document.file_path));
        }
        let data = self.files.read(&path).await?;

        let decoder = Arc::clone(&self.decoder);
        let text = tokio::task::spawn_blocking(move || decoder.decode(&data)).await??;
        debug!("Decoded {} chars from {}", text.len(), document.file_path);

        let fields = RfqExtractor::new().extract(&text);

        let now = Utc::now();
        let mut tx = self.db.pool().begin().await?;
        queries::upsert_extracted(&mut *tx, id, &fields, now).await?;
        if self.retain_raw_text {
            queries::update_document_details(&mut *tx, id, None, Some(&text), now).await?;
        }
        queries::advance_status(&mut *tx, id, DocumentStatus::Extracted, now).await?;
        queries::append_audit(
            &mut *tx,
            id,
            AuditAction::Extracted,
            &json!({ "extracted": fields }),
            now,
        )
        .await?;
        tx.commit().await?;

        info!(
            "Extracted solicitation {} with confidence {:.2}",
            id, fields.confidence_score
        );
        Ok(fields)
    }

    /// Compute and append a price suggestion from the stored fields.
    pub async fn suggest(&self, id: &str) -> Result<SuggestionRecord> {
        self.require_document(id).await?;
        let fields = queries::get_extracted(self.db.pool(), id)
            .await?
            .ok_or_else(|| StoreError::NoExtractedData(id.to_string()))?;

        let suggestion = suggest_price_band(&PricingInput::from(&fields));

        let now = Utc::now();
        let mut tx = self.db.pool().begin().await?;
        let record = queries::insert_suggestion(&mut *tx, id, &suggestion, now).await?;
        queries::advance_status(&mut *tx, id, DocumentStatus::Suggested, now).await?;
        queries::append_audit(
            &mut *tx,
            id,
            AuditAction::Suggested,
            &json!({ "suggestion": record }),
            now,
        )
        .await?;
        tx.commit().await?;

        info!(
            "Suggested {}..{} for solicitation {}",
            record.suggestion.price_low, record.suggestion.price_high, id
        );
        Ok(record)
    }

    /// Audit trail, newest first.
    pub async fn audit(&self, id: &str) -> Result<Vec<AuditEntry>> {
        self.require_document(id).await?;
        queries::list_audit(self.db.pool(), id).await
    }

    async fn require_document(&self, id: &str) -> Result<Document> {
        queries::get_document(self.db.pool(), id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    async fn service() -> (RfqService, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::in_memory().await.unwrap();
        let files = FileStore::new(dir.path().join("uploads"));
        (RfqService::new(db, files), dir)
    }

    const RFQ_TEXT: &str = "NSN 1234-56-789-0123 QTY: 10 delivery: 5 days Precision repair";

    #[tokio::test]
    async fn test_full_workflow() {
        let (service, _dir) = service().await;

        let doc = service.upload("rfq.txt", RFQ_TEXT.as_bytes()).await.unwrap();
        assert_eq!(doc.status, DocumentStatus::Uploaded);

        let fields = service.extract(&doc.id).await.unwrap();
        assert_eq!(fields.quantity, Some(10));
        assert_eq!(fields.confidence_score, 1.0);
        assert_eq!(service.get(&doc.id).await.unwrap().document.status, DocumentStatus::Extracted);

        let record = service.suggest(&doc.id).await.unwrap();
        assert_eq!(record.suggestion.price_low, 869);
        assert_eq!(record.suggestion.price_high, 1063);

        let detail = service.get(&doc.id).await.unwrap();
        assert_eq!(detail.document.status, DocumentStatus::Suggested);
        assert_eq!(detail.extracted_data, Some(fields));
        assert_eq!(detail.latest_suggestion, Some(record));

        let actions: Vec<AuditAction> = service
            .audit(&doc.id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert_eq!(actions, [AuditAction::Suggested, AuditAction::Extracted]);
    }

    #[tokio::test]
    async fn test_reextraction_keeps_suggested_status() {
        let (service, _dir) = service().await;
        let doc = service.upload("rfq.txt", RFQ_TEXT.as_bytes()).await.unwrap();

        service.extract(&doc.id).await.unwrap();
        service.suggest(&doc.id).await.unwrap();
        service.extract(&doc.id).await.unwrap();

        let detail = service.get(&doc.id).await.unwrap();
        assert_eq!(detail.document.status, DocumentStatus::Suggested);
        assert_eq!(service.audit(&doc.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_suggestions_append() {
        let (service, _dir) = service().await;
        let doc = service.upload("rfq.txt", RFQ_TEXT.as_bytes()).await.unwrap();
        service.extract(&doc.id).await.unwrap();

        let first = service.suggest(&doc.id).await.unwrap();
        let second = service.suggest(&doc.id).await.unwrap();
        assert_ne!(first.id, second.id);

        let all = service.suggestions(&doc.id).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
    }

    #[tokio::test]
    async fn test_empty_document_extracts_nothing() {
        let (service, _dir) = service().await;
        let doc = service.upload("blank.txt", b"").await.unwrap();

        let fields = service.extract(&doc.id).await.unwrap();
        assert_eq!(fields, ExtractedFields::default());

        let record = service.suggest(&doc.id).await.unwrap();
        assert_eq!(record.suggestion.price_low, 49);
        assert_eq!(record.suggestion.price_high, 91);
    }

    #[tokio::test]
    async fn test_error_cases() {
        let (service, dir) = service().await;

        assert!(matches!(service.get("nope").await, Err(StoreError::NotFound(_))));
        assert!(matches!(service.extract("nope").await, Err(StoreError::NotFound(_))));
        assert!(matches!(service.audit("nope").await, Err(StoreError::NotFound(_))));

        let doc = service.upload("rfq.txt", RFQ_TEXT.as_bytes()).await.unwrap();
        assert!(matches!(
            service.suggest(&doc.id).await,
            Err(StoreError::NoExtractedData(_))
        ));

        let missing = dir.path().join("gone.pdf");
        let registered = service
            .register("gone.pdf", missing.to_str().unwrap())
            .await
            .unwrap();
        assert!(matches!(
            service.extract(&registered.id).await,
            Err(StoreError::FileMissing(_))
        ));

        assert!(matches!(
            service.register("", "/tmp/x").await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            service.upload("  ", b"x").await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_records_edit_without_status_change() {
        let (service, _dir) = service().await;
        let doc = service.upload("rfq.txt", RFQ_TEXT.as_bytes()).await.unwrap();
        service.extract(&doc.id).await.unwrap();

        let update = DocumentUpdate {
            filename: Some("renamed.pdf".to_string()),
            fields: Some(FieldsUpdate {
                quantity: Some(20),
                delivery_days: Some(30),
                ..Default::default()
            }),
            ..Default::default()
        };
        let detail = service.update(&doc.id, update.clone()).await.unwrap();

        assert_eq!(detail.document.filename, "renamed.pdf");
        assert_eq!(detail.document.status, DocumentStatus::Extracted);
        let fields = detail.extracted_data.unwrap();
        assert_eq!(fields.quantity, Some(20));
        assert_eq!(fields.delivery_days, Some(30));
        assert_eq!(fields.nsn.as_deref(), Some("1234-56-789-0123"));

        let audit = service.audit(&doc.id).await.unwrap();
        assert_eq!(audit[0].action, AuditAction::Edited);
        assert_eq!(audit[0].details, serde_json::to_value(&update).unwrap());

        // Edited fields drive the next suggestion
        let record = service.suggest(&doc.id).await.unwrap();
        assert_eq!(record.suggestion.rationale[1], "Quantity considered: 20");
    }

    #[tokio::test]
    async fn test_update_validation() {
        let (service, _dir) = service().await;
        let doc = service.upload("rfq.txt", RFQ_TEXT.as_bytes()).await.unwrap();

        let empty = service.update(&doc.id, DocumentUpdate::default()).await;
        assert!(matches!(empty, Err(StoreError::Validation(_))));

        let bad = DocumentUpdate {
            fields: Some(FieldsUpdate {
                confidence_score: Some(1.5),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            service.update(&doc.id, bad).await,
            Err(StoreError::Validation(_))
        ));
        assert!(service.audit(&doc.id).await.unwrap().is_empty());

        let status_edit = serde_json::from_str::<DocumentUpdate>(r#"{"status": "suggested"}"#);
        assert!(status_edit.is_err());
    }

    #[tokio::test]
    async fn test_raw_text_retention() {
        let (service, _dir) = service().await;
        let service = service.with_raw_text_retention(true);
        let doc = service.upload("rfq.txt", RFQ_TEXT.as_bytes()).await.unwrap();
        service.extract(&doc.id).await.unwrap();

        let detail = service.get(&doc.id).await.unwrap();
        assert_eq!(detail.document.raw_text.as_deref(), Some(RFQ_TEXT));
    }
}
