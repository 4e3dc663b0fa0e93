//! Discharge summary pipeline entry point.
//!
//! extract → remote summary attempt → heuristic sections (fallback) → HTML.
//!
//! Engines are injected so the processor stays testable with mocks.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::InferenceConfig;
use crate::pipeline::extraction::{extract_documents, UploadedFile};
use crate::pipeline::report::{render_generated_report, render_report, PatientInfo};
use crate::pipeline::sections::{ResolvedSections, SectionExtractor};
use crate::pipeline::summarize::{InferenceError, RemoteSummarizer, RemoteSummary};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Which path produced a summary.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Remote(RemoteSummary),
    Heuristic(ResolvedSections),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    Remote,
    Heuristic,
}

impl SummaryOutcome {
    pub fn source(&self) -> SummarySource {
        match self {
            SummaryOutcome::Remote(_) => SummarySource::Remote,
            SummaryOutcome::Heuristic(_) => SummarySource::Heuristic,
        }
    }

    /// Render the outcome as an HTML report fragment.
    pub fn render(&self, patient: &PatientInfo, generated_on: NaiveDate) -> String {
        match self {
            SummaryOutcome::Remote(summary) => {
                render_generated_report(patient, &summary.text, &summary.model, generated_on)
            }
            SummaryOutcome::Heuristic(sections) => render_report(patient, sections, generated_on),
        }
    }
}

/// Result of processing one upload.
#[derive(Debug, Clone)]
pub struct ProcessedSummary {
    pub html: String,
    pub source: SummarySource,
    pub documents: usize,
    pub failed_files: usize,
}

// ---------------------------------------------------------------------------
// Processor
// ---------------------------------------------------------------------------

pub struct DischargeProcessor {
    remote: RemoteSummarizer,
    sections: SectionExtractor,
}

impl DischargeProcessor {
    pub fn new(remote: RemoteSummarizer, sections: SectionExtractor) -> Self {
        Self { remote, sections }
    }

    pub fn from_config(config: &InferenceConfig) -> Result<Self, InferenceError> {
        Ok(Self::new(
            RemoteSummarizer::from_config(config)?,
            SectionExtractor::new(),
        ))
    }

    pub fn remote_available(&self) -> bool {
        self.remote.is_available()
    }

    /// Remote summary if possible, heuristic sections otherwise. Never fails.
    pub async fn generate(&self, documents: &[String], patient: &PatientInfo) -> SummaryOutcome {
        match self.remote.try_summarize(documents, patient).await {
            Some(summary) => SummaryOutcome::Remote(summary),
            None => SummaryOutcome::Heuristic(self.sections.extract(documents)),
        }
    }

    /// Full pipeline for one upload: extract every file, summarize, render.
    pub async fn process_upload(
        &self,
        files: Vec<UploadedFile>,
        patient: &PatientInfo,
        generated_on: NaiveDate,
    ) -> ProcessedSummary {
        let extracted = extract_documents(files).await;
        let failed_files = extracted.iter().filter(|d| !d.is_ok()).count();
        let documents: Vec<String> = extracted.into_iter().map(|d| d.text).collect();

        let outcome = self.generate(&documents, patient).await;
        tracing::info!(
            documents = documents.len(),
            failed_files,
            source = ?outcome.source(),
            "Discharge summary generated"
        );

        ProcessedSummary {
            html: outcome.render(patient, generated_on),
            source: outcome.source(),
            documents: documents.len(),
            failed_files,
        }
    }
}
