//! In-memory `AnalysisService` used by unit tests.

use crate::models::{
    HeadingRecord, IngestReceipt, OutlineDocument, PersonaQuery, PersonaQueryResult, SectionMeta,
    SectionSummary, UploadFile, UploadedFiles,
};
use crate::traits::AnalysisService;
use crate::ServiceError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Result(T),
    Unreachable,
    Rejected(Option<String>),
}

impl<T: Clone> Reply<T> {
    fn resolve(&self) -> Result<T, ServiceError> {
        match self {
            Reply::Result(value) => Ok(value.clone()),
            Reply::Unreachable => Err(ServiceError::Unreachable("connection refused".to_string())),
            Reply::Rejected(detail) => Err(ServiceError::Rejected {
                status: StatusCode::BAD_REQUEST,
                detail: detail.clone(),
            }),
        }
    }
}

#[derive(Default)]
pub struct FakeService {
    files: Vec<String>,
    persona_replies: Mutex<VecDeque<Reply<PersonaQueryResult>>>,
    persona_calls: AtomicUsize,
    last_query: Mutex<Option<PersonaQuery>>,
    failing_uploads: HashMap<String, Reply<IngestReceipt>>,
    uploads: Mutex<Vec<String>>,
    outline: Option<Reply<OutlineDocument>>,
    headings: Option<Reply<Vec<HeadingRecord>>>,
    sections: Option<Reply<Vec<SectionMeta>>>,
    summaries: HashMap<String, String>,
    summary_calls: AtomicUsize,
}

impl FakeService {
    pub fn with_files(files: Vec<String>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    pub fn with_persona_replies(self, replies: Vec<Reply<PersonaQueryResult>>) -> Self {
        Self {
            persona_replies: Mutex::new(replies.into()),
            ..self
        }
    }

    pub fn failing_upload(mut self, file_name: &str, reply: Reply<IngestReceipt>) -> Self {
        self.failing_uploads.insert(file_name.to_string(), reply);
        self
    }

    pub fn with_outline(self, reply: Reply<OutlineDocument>) -> Self {
        Self {
            outline: Some(reply),
            ..self
        }
    }

    pub fn with_headings(self, reply: Reply<Vec<HeadingRecord>>) -> Self {
        Self {
            headings: Some(reply),
            ..self
        }
    }

    pub fn with_sections(self, reply: Reply<Vec<SectionMeta>>) -> Self {
        Self {
            sections: Some(reply),
            ..self
        }
    }

    pub fn with_summary(mut self, section_id: &str, text: &str) -> Self {
        self.summaries.insert(section_id.to_string(), text.to_string());
        self
    }

    pub fn persona_calls(&self) -> usize {
        self.persona_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<PersonaQuery> {
        self.last_query.lock().ok().and_then(|query| query.clone())
    }

    /// File names passed to the ingest endpoint, in call order.
    pub fn uploads(&self) -> Vec<String> {
        self.uploads
            .lock()
            .map(|uploads| uploads.clone())
            .unwrap_or_default()
    }
}

fn missing<T>(what: &str) -> Result<T, ServiceError> {
    Err(ServiceError::Rejected {
        status: StatusCode::NOT_FOUND,
        detail: Some(format!("{what} not found")),
    })
}

#[async_trait]
impl AnalysisService for FakeService {
    async fn ingest_pdf(&self, file: &UploadFile) -> Result<IngestReceipt, ServiceError> {
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push(file.file_name.clone());
        }
        match self.failing_uploads.get(&file.file_name) {
            Some(reply) => reply.resolve(),
            None => Ok(IngestReceipt {
                outline_id: file.file_name.clone(),
            }),
        }
    }

    async fn outline(&self, _pdf_name: &str) -> Result<OutlineDocument, ServiceError> {
        match &self.outline {
            Some(reply) => reply.resolve(),
            None => missing("Outline"),
        }
    }

    async fn headings(&self, _pdf_name: &str) -> Result<Vec<HeadingRecord>, ServiceError> {
        match &self.headings {
            Some(reply) => reply.resolve(),
            None => missing("Spans"),
        }
    }

    async fn sections(&self, _pdf_name: &str) -> Result<Vec<SectionMeta>, ServiceError> {
        match &self.sections {
            Some(reply) => reply.resolve(),
            None => Ok(Vec::new()),
        }
    }

    async fn summary(
        &self,
        _pdf_name: &str,
        section_id: &str,
    ) -> Result<SectionSummary, ServiceError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        match self.summaries.get(section_id) {
            Some(text) => Ok(SectionSummary {
                summary_text: text.clone(),
            }),
            None => missing("Summary"),
        }
    }

    async fn uploaded_files(&self) -> Result<UploadedFiles, ServiceError> {
        Ok(UploadedFiles {
            files: self.files.clone(),
        })
    }

    async fn persona_query(
        &self,
        query: &PersonaQuery,
    ) -> Result<PersonaQueryResult, ServiceError> {
        self.persona_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_query.lock() {
            *last = Some(query.clone());
        }
        let reply = self
            .persona_replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front());
        match reply {
            Some(reply) => reply.resolve(),
            None => Err(ServiceError::Unreachable("no scripted reply".to_string())),
        }
    }
}
