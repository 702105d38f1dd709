use crate::config::ServiceConfig;
use crate::models::{
    HeadingRecord, IngestReceipt, OutlineDocument, PersonaQuery, PersonaQueryResult, SectionMeta,
    SectionSummary, UploadFile, UploadedFiles,
};
use crate::traits::AnalysisService;
use crate::ServiceError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// `AnalysisService` over HTTP.
pub struct HttpAnalysisService {
    client: Client,
    base_url: Url,
}

impl HttpAnalysisService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base address.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, body = %body, "analysis service returned an error");
            return Err(ServiceError::Rejected {
                status,
                detail: rejection_detail(&body),
            });
        }

        Ok(response.json::<T>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ServiceError> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "GET");
        self.execute(self.client.get(url)).await
    }
}

/// Pulls the `detail` field out of an error body.
///
/// String details come back as-is; structured ones (validation error lists)
/// are rendered as compact JSON.
pub fn rejection_detail(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn ingest_pdf(&self, file: &UploadFile) -> Result<IngestReceipt, ServiceError> {
        let url = self.endpoint(&["ingest", "pdf"])?;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str("application/pdf")
            .map_err(|error| ServiceError::Decode(format!("invalid mime type: {error}")))?;
        let form = Form::new().part("file", part);

        debug!(url = %url, file = %file.file_name, bytes = file.bytes.len(), "POST");
        self.execute(self.client.post(url).multipart(form)).await
    }

    async fn outline(&self, pdf_name: &str) -> Result<OutlineDocument, ServiceError> {
        self.get(&["outline", pdf_name]).await
    }

    async fn headings(&self, pdf_name: &str) -> Result<Vec<HeadingRecord>, ServiceError> {
        self.get(&["headings", pdf_name]).await
    }

    async fn sections(&self, pdf_name: &str) -> Result<Vec<SectionMeta>, ServiceError> {
        self.get(&["sections", pdf_name]).await
    }

    async fn summary(
        &self,
        pdf_name: &str,
        section_id: &str,
    ) -> Result<SectionSummary, ServiceError> {
        self.get(&["summaries", pdf_name, section_id]).await
    }

    async fn uploaded_files(&self) -> Result<UploadedFiles, ServiceError> {
        self.get(&["files", "uploaded_pdfs"]).await
    }

    async fn persona_query(
        &self,
        query: &PersonaQuery,
    ) -> Result<PersonaQueryResult, ServiceError> {
        let url = self.endpoint(&["persona-query"])?;
        debug!(url = %url, documents = query.pdf_names.len(), top_k = query.top_k, "POST");
        self.execute(self.client.post(url).json(query)).await
    }
}
