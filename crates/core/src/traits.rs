use crate::models::{
    HeadingRecord, IngestReceipt, OutlineDocument, PersonaQuery, PersonaQueryResult, SectionMeta,
    SectionSummary, UploadFile, UploadedFiles,
};
use crate::ServiceError;
use async_trait::async_trait;

/// The endpoints of the external analysis service.
#[async_trait]
pub trait AnalysisService {
    async fn ingest_pdf(&self, file: &UploadFile) -> Result<IngestReceipt, ServiceError>;

    async fn outline(&self, pdf_name: &str) -> Result<OutlineDocument, ServiceError>;

    async fn headings(&self, pdf_name: &str) -> Result<Vec<HeadingRecord>, ServiceError>;

    async fn sections(&self, pdf_name: &str) -> Result<Vec<SectionMeta>, ServiceError>;

    async fn summary(&self, pdf_name: &str, section_id: &str)
        -> Result<SectionSummary, ServiceError>;

    async fn uploaded_files(&self) -> Result<UploadedFiles, ServiceError>;

    async fn persona_query(&self, query: &PersonaQuery)
        -> Result<PersonaQueryResult, ServiceError>;
}
