//! HTTP handlers for the RFQ API

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use rfq_core::{AuditEntry, Document, ExtractedFields, SuggestionRecord};
use rfq_store::{DocumentDetail, DocumentUpdate};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSolicitationRequest {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct SolicitationsResponse {
    pub solicitations: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct SolicitationResponse {
    pub solicitation: DocumentDetail,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub extracted: ExtractedFields,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestion: SuggestionRecord,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<SuggestionRecord>,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub logs: Vec<AuditEntry>,
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Store an uploaded file from the multipart field `file`
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("upload.pdf")
            .to_string();
        let data = field.bytes().await?;

        let document = state.service.upload(&filename, &data).await?;
        tracing::info!("Uploaded {} ({} bytes)", document.id, data.len());

        return Ok(Json(UploadResponse {
            id: document.id,
            filename: document.filename,
        }));
    }

    Err(ApiError::InvalidRequest("No file provided".to_string()))
}

/// List stored solicitations, newest first
pub async fn list_solicitations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SolicitationsResponse>, ApiError> {
    let solicitations = state.service.list().await?;
    Ok(Json(SolicitationsResponse { solicitations }))
}

/// Register a file that already exists on the server
pub async fn create_solicitation(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateSolicitationRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let (Some(filename), Some(file_path)) = (req.filename, req.file_path) else {
        return Err(ApiError::InvalidRequest(
            "filename and filePath required".to_string(),
        ));
    };

    let document = state.service.register(&filename, &file_path).await?;
    Ok(Json(CreatedResponse { id: document.id }))
}

/// Get a solicitation with its extracted data and latest suggestion
pub async fn get_solicitation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SolicitationResponse>, ApiError> {
    let solicitation = state.service.get(&id).await?;
    Ok(Json(SolicitationResponse { solicitation }))
}

/// Apply a manual edit
pub async fn update_solicitation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<DocumentUpdate>,
) -> Result<Json<SolicitationResponse>, ApiError> {
    let solicitation = state.service.update(&id, update).await?;
    Ok(Json(SolicitationResponse { solicitation }))
}

/// Run field extraction on the stored file
pub async fn extract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let extracted = state.service.extract(&id).await?;
    Ok(Json(ExtractResponse { extracted }))
}

/// Suggest a price band from the extracted data
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let suggestion = state.service.suggest(&id).await?;
    Ok(Json(SuggestResponse { suggestion }))
}

/// Every suggestion made for a solicitation, newest first
pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let suggestions = state.service.suggestions(&id).await?;
    Ok(Json(SuggestionsResponse { suggestions }))
}

/// Audit trail, newest first
pub async fn audit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AuditResponse>, ApiError> {
    let logs = state.service.audit(&id).await?;
    Ok(Json(AuditResponse { logs }))
}
