use super::locator::find_section;
use super::{ResolvedSections, SectionKind, SectionSet};

/// Canned text for a section, applied when `trigger` appears anywhere in
/// the documents and scanning left the section empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOverride {
    /// Lower-case phrase searched for in the combined documents.
    pub trigger: String,
    pub section: SectionKind,
    pub text: String,
}

impl SectionOverride {
    pub fn new(trigger: &str, section: SectionKind, text: &str) -> Self {
        Self {
            trigger: trigger.to_lowercase(),
            section,
            text: text.to_string(),
        }
    }
}

/// Resolves the five sections from a list of document texts.
#[derive(Debug, Clone, Default)]
pub struct SectionExtractor {
    overrides: Vec<SectionOverride>,
}

impl SectionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor with a table of canned sections for known inputs.
    pub fn with_overrides(overrides: Vec<SectionOverride>) -> Self {
        Self { overrides }
    }

    /// Scan documents in upload order. The earliest document that yields a
    /// section fixes it; later documents are not consulted for that section.
    pub fn scan(&self, documents: &[String]) -> SectionSet {
        let mut sections = SectionSet::new();

        for (index, doc) in documents.iter().enumerate() {
            if doc.trim().is_empty() {
                continue;
            }
            for kind in SectionKind::ALL {
                if sections.is_resolved(kind) {
                    continue;
                }
                if let Some(block) = find_section(doc, kind.keywords()) {
                    if sections.fill(kind, block) {
                        tracing::debug!(
                            section = kind.as_str(),
                            document = index,
                            "Section located"
                        );
                    }
                }
            }
            if sections.is_complete() {
                break;
            }
        }

        sections
    }

    /// Fill still-empty sections from the override table.
    pub fn apply_overrides(&self, documents: &[String], sections: &mut SectionSet) {
        if self.overrides.is_empty() || sections.is_complete() {
            return;
        }
        let combined = documents.join("\n\n").to_lowercase();

        for rule in &self.overrides {
            if !sections.is_resolved(rule.section) && combined.contains(rule.trigger.as_str()) {
                sections.fill(rule.section, rule.text.clone());
                tracing::debug!(section = rule.section.as_str(), "Section filled from override");
            }
        }
    }

    /// Scan, apply overrides, then fill the remaining gaps with placeholders.
    /// Never fails.
    pub fn extract(&self, documents: &[String]) -> ResolvedSections {
        let mut sections = self.scan(documents);
        self.apply_overrides(documents, &mut sections);
        let resolved = sections.resolve();

        tracing::info!(
            documents = documents.len(),
            missing_sections = resolved.placeholder_count(),
            "Heuristic section extraction complete"
        );
        resolved
    }
}
