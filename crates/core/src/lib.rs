pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod hierarchy;
pub mod models;
pub mod outline;
pub mod render;
pub mod selection;
pub mod traits;
pub mod upload;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use client::HttpAnalysisService;
pub use config::{ServiceConfig, DEFAULT_SERVICE_URL, SERVICE_URL_ENV};
pub use document::DocumentView;
pub use error::{ServiceError, UploadError, WorkflowError};
pub use hierarchy::{build_hierarchy, flatten, node_count};
pub use models::{
    ExtractedSection, HeadingLevel, HeadingRecord, IngestReceipt, ModelsUsed, OutlineDocument,
    OutlineNode, PageRange, PersonaQuery, PersonaQueryResult, QueryMetadata, SectionMeta,
    SectionSummary, SubSectionAnalysis, UploadFile, UploadedFiles, DEFAULT_TOP_K,
};
pub use outline::{is_degenerate, OutlineView};
pub use render::{render_headings, render_outline, render_persona_result, render_sections};
pub use selection::{check_document_count, DocumentSelection, MAX_DOCUMENTS, MIN_DOCUMENTS};
pub use traits::AnalysisService;
pub use upload::{
    discover_pdf_files, prepare_batch, read_upload_file, upload_batch, upload_one, BatchReport,
    UploadFailure, UploadedDocument,
};
pub use workflow::{Action, PersonaSession, Phase, WorkflowState};
