//! Discharge summary generation from a multipart upload.
//!
//! The form carries five patient fields and one or more `files` parts.
//! Patient fields are validated before any file is extracted.

use std::collections::HashMap;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Local;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SummaryResponse};
use crate::pipeline::extraction::UploadedFile;
use crate::pipeline::processor::ProcessedSummary;
use crate::pipeline::report::{standalone_document, PatientInfo};

/// Required form fields, in validation order.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "id", "dob", "admissionDate", "dischargeDate"];

const FILES_FIELD: &str = "files";

/// Parsed multipart upload.
#[derive(Debug, Default)]
pub struct SummaryForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl SummaryForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = SummaryForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            if name == FILES_FIELD {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await?;
                // Browsers send an empty unnamed part when no file is chosen.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.files.push(UploadedFile::new(file_name, bytes.to_vec()));
            } else if REQUIRED_FIELDS.contains(&name.as_str()) {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Patient details, or the first required field that is absent or blank.
    pub fn patient(&self) -> Result<PatientInfo, ApiError> {
        let value = |key: &'static str| -> Result<String, ApiError> {
            match self.fields.get(key).map(|v| v.trim()) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(ApiError::MissingField(key)),
            }
        };

        Ok(PatientInfo {
            name: value("name")?,
            id: value("id")?,
            dob: value("dob")?,
            admission_date: value("admissionDate")?,
            discharge_date: value("dischargeDate")?,
        })
    }
}

async fn summarize_upload(
    ctx: &ApiContext,
    multipart: Multipart,
) -> Result<(PatientInfo, ProcessedSummary), ApiError> {
    let form = SummaryForm::read(multipart).await?;
    let patient = form.patient()?;
    if form.files.is_empty() {
        return Err(ApiError::NoFiles);
    }

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, files = form.files.len(), "Generating discharge summary");

    let processor = ctx.processor.clone();
    let task_patient = patient.clone();
    let files = form.files;
    let summary = tokio::spawn(async move {
        processor
            .process_upload(files, &task_patient, Local::now().date_naive())
            .await
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(
        %request_id,
        source = ?summary.source,
        failed_files = summary.failed_files,
        "Discharge summary ready"
    );
    Ok((patient, summary))
}

/// `POST /api/generate-summary` — HTML report fragment as JSON.
pub async fn generate(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<SummaryResponse>, ApiError> {
    let (_, summary) = summarize_upload(&ctx, multipart).await?;
    Ok(Json(SummaryResponse {
        summary: summary.html,
    }))
}

/// `POST /api/generate-summary/download` — standalone HTML attachment.
pub async fn download(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let (patient, summary) = summarize_upload(&ctx, multipart).await?;

    let title = format!("Discharge Summary - {}", patient.name);
    let document = standalone_document(&title, &summary.html);
    let disposition = format!(
        "attachment; filename=\"{}_discharge_summary.html\"",
        sanitize_filename(&patient.name)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}

/// Reduce a patient name to a safe ASCII filename stem.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .filter(|&c| c != '/' && c != '\\' && c != '\0')
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Remove consecutive dots (path traversal prevention)
    let sanitized = sanitized.replace("..", "");

    let sanitized: String = sanitized.chars().take(100).collect();

    if sanitized.is_empty() {
        "patient".to_string()
    } else {
        sanitized
    }
}
