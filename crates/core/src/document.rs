use crate::models::{HeadingRecord, SectionMeta};
use crate::outline::OutlineView;
use crate::traits::AnalysisService;
use crate::ServiceError;
use tracing::{debug, warn};

/// Everything shown for one uploaded document.
#[derive(Debug)]
pub struct DocumentView {
    pub pdf_name: String,
    pub outline: Result<OutlineView, ServiceError>,
    /// Flat heading list with font diagnostics. A failed fetch counts as no headings.
    pub headings: Vec<HeadingRecord>,
    pub sections: Result<Vec<SectionMeta>, ServiceError>,
    selected_section: Option<String>,
    summary: Option<String>,
}

impl DocumentView {
    /// Fetches outline, headings, and sections for `pdf_name`. Summaries are
    /// not fetched until a section is selected.
    pub async fn load<S>(service: &S, pdf_name: &str) -> Self
    where
        S: AnalysisService + Send + Sync + ?Sized,
    {
        debug!(pdf = %pdf_name, "loading document view");
        let (outline, headings, sections) = tokio::join!(
            service.outline(pdf_name),
            service.headings(pdf_name),
            service.sections(pdf_name),
        );

        let headings = headings.unwrap_or_else(|error| {
            warn!(pdf = %pdf_name, %error, "headings unavailable");
            Vec::new()
        });

        Self {
            pdf_name: pdf_name.to_string(),
            outline: outline.map(OutlineView::from_document),
            headings,
            sections,
            selected_section: None,
            summary: None,
        }
    }

    pub fn selected_section(&self) -> Option<&str> {
        self.selected_section.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Marks `section_id` as selected and fetches its summary.
    ///
    /// The previous summary is dropped up front so a failed fetch never leaves
    /// another section's text on screen.
    pub async fn select_section<S>(
        &mut self,
        service: &S,
        section_id: &str,
    ) -> Result<&str, ServiceError>
    where
        S: AnalysisService + Send + Sync + ?Sized,
    {
        self.selected_section = Some(section_id.to_string());
        self.summary = None;

        let summary = service.summary(&self.pdf_name, section_id).await?;
        Ok(self.summary.insert(summary.summary_text).as_str())
    }
}
