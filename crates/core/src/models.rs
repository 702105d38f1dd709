use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Number of top-ranked sections requested by every persona query.
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    /// The level one step deeper, if any.
    pub fn child(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.ordinal())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeadingRecord {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
}

impl HeadingRecord {
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            font_name: None,
            font_size: None,
            font_weight: None,
            bbox: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutlineNode {
    #[serde(flatten)]
    pub record: HeadingRecord,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn leaf(record: HeadingRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }
}

/// Response of `GET /outline/{pdf_name}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutlineDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_name: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub outline: Vec<HeadingRecord>,
}

/// One entry of `GET /sections/{pdf_name}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionMeta {
    pub section_id: String,
    pub level: String,
    pub text: String,
    pub page_start: u32,
    pub page_end: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionSummary {
    pub summary_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UploadedFiles {
    #[serde(default)]
    pub files: Vec<String>,
}

/// Response of `POST /ingest/pdf`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestReceipt {
    pub outline_id: String,
}

/// A file ready to be sent to the ingest endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonaQuery {
    pub persona: String,
    pub job: String,
    pub pdf_names: Vec<String>,
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ModelsUsed {
    #[serde(default)]
    pub embeddings: Option<String>,
    #[serde(default)]
    pub similarity: Option<String>,
    #[serde(default)]
    pub summarization: Option<String>,
}

/// Service metadata; known fields are typed, everything else passes through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QueryMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pdfs_processed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_to_be_done: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models_used: Option<ModelsUsed>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: u32,
    pub importance_rank: u32,
    pub section_title: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubSectionAnalysis {
    pub document: String,
    pub page_number_constraints: PageRange,
    pub refined_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PersonaQueryResult {
    #[serde(default)]
    pub metadata: QueryMetadata,
    #[serde(default)]
    pub extracted_sections: Vec<ExtractedSection>,
    #[serde(default)]
    pub sub_section_analysis: Vec<SubSectionAnalysis>,
}
