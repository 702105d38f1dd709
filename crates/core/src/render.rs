//! Plain-text rendering of service results.

use crate::models::{HeadingRecord, OutlineNode, PersonaQueryResult, SectionMeta};
use crate::outline::{OutlineView, EMPTY_OUTLINE_NOTICE};
use std::fmt::Write;

pub const NO_HEADINGS_NOTICE: &str = "No headings to display.";
pub const NO_SECTIONS_NOTICE: &str = "No sections to display.";

pub fn render_outline(view: &OutlineView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title());

    match view {
        OutlineView::Empty { .. } => {
            let _ = writeln!(out, "{EMPTY_OUTLINE_NOTICE}");
        }
        OutlineView::Tree { nodes, .. } => {
            if let Some(warning) = view.warning() {
                let _ = writeln!(out, "warning: {warning}");
            }
            write_tree(&mut out, nodes, 1);
        }
    }

    out
}

fn write_tree(out: &mut String, nodes: &[OutlineNode], depth: usize) {
    for node in nodes {
        let _ = writeln!(
            out,
            "{:indent$}{}: {} (p.{})",
            "",
            node.record.level,
            node.record.text,
            node.record.page,
            indent = depth * 2
        );
        write_tree(out, &node.children, depth + 1);
    }
}

pub fn render_headings(headings: &[HeadingRecord]) -> String {
    if headings.is_empty() {
        return format!("{NO_HEADINGS_NOTICE}\n");
    }

    let mut out = String::from("Detected Headings\n");
    for heading in headings {
        let font = heading.font_name.as_deref().unwrap_or("unknown");
        let size = heading
            .font_size
            .map(|size| size.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let _ = writeln!(
            out,
            "{}: {} (Font: {font}, Size: {size}, Page: {})",
            heading.level, heading.text, heading.page
        );
    }
    out
}

pub fn render_sections(sections: &[SectionMeta]) -> String {
    if sections.is_empty() {
        return format!("{NO_SECTIONS_NOTICE}\n");
    }

    let mut out = String::from("Sections\n");
    for section in sections {
        let _ = writeln!(
            out,
            "[{}] {}: {} (p.{}-{})",
            section.section_id, section.level, section.text, section.page_start, section.page_end
        );
    }
    out
}

pub fn render_persona_result(result: &PersonaQueryResult) -> String {
    let metadata = &result.metadata;
    let mut out = String::from("Analysis Summary\n");

    let _ = writeln!(
        out,
        "PDFs Processed: {}",
        metadata
            .total_pdfs_processed
            .map(|count| count.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(out, "Persona: {}", metadata.persona.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "Job: {}", metadata.job_to_be_done.as_deref().unwrap_or("-"));
    if let Some(seconds) = metadata.processing_time_seconds {
        let _ = writeln!(out, "Processing Time: {seconds}s");
    }
    if let Some(models) = &metadata.models_used {
        let names: Vec<&str> = [&models.embeddings, &models.similarity, &models.summarization]
            .into_iter()
            .filter_map(|name| name.as_deref())
            .collect();
        let _ = writeln!(out, "Models Used: {}", names.join(", "));
    }

    out.push_str("\nExtracted Sections\n");
    for section in &result.extracted_sections {
        let _ = writeln!(out, "{}", section.document);
        let _ = writeln!(
            out,
            "  Page: {} | Rank: {}",
            section.page_number, section.importance_rank
        );
        let _ = writeln!(out, "  {}", section.section_title);
    }

    out.push_str("\nSub-section Analysis\n");
    for analysis in &result.sub_section_analysis {
        let _ = writeln!(out, "{}", analysis.document);
        let _ = writeln!(
            out,
            "  Pages: {}-{}",
            analysis.page_number_constraints.start, analysis.page_number_constraints.end
        );
        let _ = writeln!(out, "  Refined Text: {}", analysis.refined_text);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ExtractedSection, HeadingLevel, ModelsUsed, OutlineDocument, PageRange, QueryMetadata,
        SubSectionAnalysis,
    };

    #[test]
    fn outline_is_indented_by_depth() {
        let view = OutlineView::from_document(OutlineDocument {
            pdf_name: None,
            title: "Manual".to_string(),
            outline: vec![
                HeadingRecord::new(HeadingLevel::H1, "Setup", 1),
                HeadingRecord::new(HeadingLevel::H2, "Wiring", 2),
                HeadingRecord::new(HeadingLevel::H3, "Ground", 2),
            ],
        });

        assert_eq!(
            render_outline(&view),
            "Manual\n  H1: Setup (p.1)\n    H2: Wiring (p.2)\n      H3: Ground (p.2)\n"
        );
    }

    #[test]
    fn degenerate_outline_carries_warning_line() {
        let view = OutlineView::from_document(OutlineDocument {
            pdf_name: None,
            title: "Flat".to_string(),
            outline: vec![HeadingRecord::new(HeadingLevel::H1, "Only", 1)],
        });

        let rendered = render_outline(&view);
        assert!(rendered.contains("warning: All headings are marked as the same level"));
        assert!(rendered.ends_with("  H1: Only (p.1)\n"));
    }

    #[test]
    fn empty_outline_shows_notice() {
        let view = OutlineView::Empty {
            title: "Blank".to_string(),
        };
        assert_eq!(render_outline(&view), format!("Blank\n{EMPTY_OUTLINE_NOTICE}\n"));
    }

    #[test]
    fn headings_include_font_diagnostics() {
        let mut heading = HeadingRecord::new(HeadingLevel::H2, "Scope", 4);
        heading.font_name = Some("Helvetica-Bold".to_string());
        heading.font_size = Some(14.5);

        assert_eq!(
            render_headings(&[heading]),
            "Detected Headings\nH2: Scope (Font: Helvetica-Bold, Size: 14.5, Page: 4)\n"
        );
        assert_eq!(render_headings(&[]), format!("{NO_HEADINGS_NOTICE}\n"));
    }

    #[test]
    fn sections_show_page_span() {
        let sections = vec![SectionMeta {
            section_id: "sec-2".to_string(),
            level: "H1".to_string(),
            text: "Results".to_string(),
            page_start: 5,
            page_end: 9,
        }];
        assert_eq!(
            render_sections(&sections),
            "Sections\n[sec-2] H1: Results (p.5-9)\n"
        );
    }

    #[test]
    fn persona_result_lists_ranked_sections_in_service_order() {
        let result = PersonaQueryResult {
            metadata: QueryMetadata {
                total_pdfs_processed: Some(3),
                persona: Some("HR professional".to_string()),
                job_to_be_done: Some("Create onboarding forms".to_string()),
                processing_time_seconds: Some(8.25),
                models_used: Some(ModelsUsed {
                    embeddings: Some("minilm".to_string()),
                    similarity: Some("cosine".to_string()),
                    summarization: None,
                }),
                ..QueryMetadata::default()
            },
            extracted_sections: vec![
                ExtractedSection {
                    document: "forms.pdf".to_string(),
                    page_number: 2,
                    importance_rank: 2,
                    section_title: "Fillable fields".to_string(),
                },
                ExtractedSection {
                    document: "sign.pdf".to_string(),
                    page_number: 1,
                    importance_rank: 1,
                    section_title: "E-signatures".to_string(),
                },
            ],
            sub_section_analysis: vec![SubSectionAnalysis {
                document: "forms.pdf".to_string(),
                page_number_constraints: PageRange { start: 2, end: 3 },
                refined_text: "Use the Prepare Form tool.".to_string(),
            }],
        };

        let rendered = render_persona_result(&result);
        assert!(rendered.contains("PDFs Processed: 3\n"));
        assert!(rendered.contains("Processing Time: 8.25s\n"));
        assert!(rendered.contains("Models Used: minilm, cosine\n"));
        assert!(rendered.contains("  Pages: 2-3\n"));

        let first = rendered.find("Fillable fields");
        let second = rendered.find("E-signatures");
        assert!(first < second);
    }
}
