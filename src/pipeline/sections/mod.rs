//! Heuristic clinical section extraction.
//!
//! Used whenever remote summarization is unavailable. Locates five
//! clinical sections in free text, fills gaps with placeholders and
//! derives the advisory flags the report needs.

pub mod flags;
pub mod locator;
pub mod orchestrator;

pub use flags::*;
pub use locator::*;
pub use orchestrator::*;

use serde::Serialize;

/// The five sections of a discharge summary body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Diagnosis,
    Treatment,
    Medications,
    FollowUp,
    AdditionalNotes,
}

impl SectionKind {
    /// Report order.
    pub const ALL: [SectionKind; 5] = [
        Self::Diagnosis,
        Self::Treatment,
        Self::Medications,
        Self::FollowUp,
        Self::AdditionalNotes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diagnosis => "diagnosis",
            Self::Treatment => "treatment",
            Self::Medications => "medications",
            Self::FollowUp => "follow_up",
            Self::AdditionalNotes => "additional_notes",
        }
    }

    /// Candidate headings/keywords, matched case-insensitively.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Diagnosis => &["diagnosis", "diagnoses", "assessment", "impression"],
            Self::Treatment => &[
                "treatment",
                "hospital course",
                "procedure",
                "therapy",
                "intervention",
            ],
            Self::Medications => &[
                "medication",
                "medications",
                "prescriptions",
                "drugs",
                "discharge medications",
                "medications at discharge",
            ],
            Self::FollowUp => &[
                "follow-up",
                "follow up",
                "followup",
                "instructions",
                "recommendations",
                "follow-up recommendations",
            ],
            Self::AdditionalNotes => &[
                "notes",
                "additional",
                "other",
                "preventive",
                "prevention",
                "additional notes",
                "preventive measures",
            ],
        }
    }

    /// Text used when no document mentions the section.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Diagnosis => "No diagnosis information found in documents.",
            Self::Treatment => "No treatment information found in documents.",
            Self::Medications => "No medication information found in documents.",
            Self::FollowUp => "No follow-up information found in documents.",
            Self::AdditionalNotes => "No additional notes found in documents.",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Diagnosis => 0,
            Self::Treatment => 1,
            Self::Medications => 2,
            Self::FollowUp => 3,
            Self::AdditionalNotes => 4,
        }
    }
}

/// Sections found so far. A slot, once filled, is never overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSet {
    slots: [Option<String>; 5],
}

impl SectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        self.slots[kind.index()].as_deref()
    }

    pub fn is_resolved(&self, kind: SectionKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Store `text` for `kind` unless it already has a value.
    /// Returns whether the value was stored.
    pub fn fill(&mut self, kind: SectionKind, text: String) -> bool {
        let slot = &mut self.slots[kind.index()];
        if slot.is_some() || text.is_empty() {
            return false;
        }
        *slot = Some(text);
        true
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Fill every gap with its placeholder.
    pub fn resolve(self) -> ResolvedSections {
        let [diagnosis, treatment, medications, follow_up, additional_notes] = self.slots;
        let or_placeholder =
            |value: Option<String>, kind: SectionKind| value.unwrap_or_else(|| kind.placeholder().to_string());

        ResolvedSections {
            diagnosis: or_placeholder(diagnosis, SectionKind::Diagnosis),
            treatment: or_placeholder(treatment, SectionKind::Treatment),
            medications: or_placeholder(medications, SectionKind::Medications),
            follow_up: or_placeholder(follow_up, SectionKind::FollowUp),
            additional_notes: or_placeholder(additional_notes, SectionKind::AdditionalNotes),
        }
    }
}

/// Fully populated sections, ready for formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSections {
    pub diagnosis: String,
    pub treatment: String,
    pub medications: String,
    pub follow_up: String,
    pub additional_notes: String,
}

impl ResolvedSections {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Diagnosis => &self.diagnosis,
            SectionKind::Treatment => &self.treatment,
            SectionKind::Medications => &self.medications,
            SectionKind::FollowUp => &self.follow_up,
            SectionKind::AdditionalNotes => &self.additional_notes,
        }
    }

    /// Number of sections still holding their placeholder.
    pub fn placeholder_count(&self) -> usize {
        SectionKind::ALL
            .iter()
            .filter(|kind| self.get(**kind) == kind.placeholder())
            .count()
    }
}
