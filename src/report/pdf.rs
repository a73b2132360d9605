//! PDF rendering of the vacation report.
//!
//! Layout is computed first as plain data so page breaks can be checked
//! without parsing PDF output; [`render_pdf`] then draws each placed line
//! with the built-in Helvetica font.

use std::fmt;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::{EngineError, EngineResult};

use super::Report;

/// A4 page width.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 page height.
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Margin on every side (30pt).
pub const MARGIN_MM: f32 = 10.6;

const TITLE_FONT_SIZE: f32 = 18.0;
const BODY_FONT_SIZE: f32 = 12.0;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.2;
// Helvetica averages roughly half an em per glyph.
const AVERAGE_GLYPH_EM: f32 = 0.5;

/// A line of text at a fixed position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// The text to draw.
    pub text: String,
    /// Font size in points.
    pub font_size: f32,
    /// Distance from the left edge.
    pub x_mm: f32,
    /// Baseline distance from the bottom edge.
    pub y_mm: f32,
}

/// The lines drawn on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Lines in drawing order.
    pub lines: Vec<PlacedLine>,
}

fn line_height_mm(font_size: f32) -> f32 {
    font_size * LINE_SPACING * PT_TO_MM
}

/// Lays the report out on pages.
///
/// The title is centred on the first page. Each entry is kept together: when
/// its block does not fit in the space left, it starts a new page.
pub fn layout_pages(report: &Report) -> Vec<PageLayout> {
    let body_line = line_height_mm(BODY_FONT_SIZE);
    let top = PAGE_HEIGHT_MM - MARGIN_MM;

    let mut pages = vec![PageLayout::default()];
    let mut y = top - line_height_mm(TITLE_FONT_SIZE);

    let title_width =
        report.title.chars().count() as f32 * AVERAGE_GLYPH_EM * TITLE_FONT_SIZE * PT_TO_MM;
    pages[0].lines.push(PlacedLine {
        text: report.title.clone(),
        font_size: TITLE_FONT_SIZE,
        x_mm: ((PAGE_WIDTH_MM - title_width) / 2.0).max(MARGIN_MM),
        y_mm: y,
    });
    y -= body_line;

    for entry in &report.entries {
        let lines = entry.lines();
        let block_height = lines.len() as f32 * body_line;
        if y - block_height < MARGIN_MM {
            pages.push(PageLayout::default());
            y = top;
        }

        let Some(page) = pages.last_mut() else {
            break;
        };
        for text in lines {
            y -= body_line;
            page.lines.push(PlacedLine {
                text,
                font_size: BODY_FONT_SIZE,
                x_mm: MARGIN_MM,
                y_mm: y,
            });
        }
        y -= body_line;
    }

    pages
}

/// Renders the report as a PDF document.
pub fn render_pdf(report: &Report) -> EngineResult<Vec<u8>> {
    let pages = layout_pages(report);
    let (doc, first_page, first_layer) = PdfDocument::new(
        report.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_error)?;

    let mut targets = vec![(first_page, first_layer)];
    for _ in 1..pages.len() {
        targets.push(doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1"));
    }

    for (page, (page_index, layer_index)) in pages.iter().zip(targets) {
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for line in &page.lines {
            layer.use_text(
                line.text.as_str(),
                line.font_size,
                Mm(line.x_mm),
                Mm(line.y_mm),
                &font,
            );
        }
    }

    doc.save_to_bytes().map_err(render_error)
}

fn render_error(err: impl fmt::Display) -> EngineError {
    EngineError::Render {
        message: format!("failed to write PDF: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportEntry;
    use rust_decimal::Decimal;

    fn report_with(entries: usize) -> Report {
        Report {
            title: "Relatório de Férias Legais".to_string(),
            entries: (1..=entries)
                .map(|position| ReportEntry {
                    position,
                    hr_representative: "Carla".to_string(),
                    employee_name: format!("Funcionário {position}"),
                    salary: Decimal::from(3000),
                    entitled_days: 30,
                    entitlement_value: Decimal::from(4000),
                    created_at: "01/01/2025 08:00:00".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_report_has_title_page() {
        let pages = layout_pages(&report_with(0));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 1);
        assert_eq!(pages[0].lines[0].text, "Relatório de Férias Legais");
        assert_eq!(pages[0].lines[0].font_size, TITLE_FONT_SIZE);
    }

    #[test]
    fn test_many_entries_span_pages() {
        let pages = layout_pages(&report_with(40));
        assert!(pages.len() > 1);

        let body_lines: usize = pages.iter().map(|p| p.lines.len()).sum::<usize>() - 1;
        assert_eq!(body_lines, 40 * 6);
    }

    #[test]
    fn test_lines_stay_inside_margins() {
        for page in layout_pages(&report_with(40)) {
            for line in page.lines {
                assert!(line.y_mm >= MARGIN_MM, "line below margin: {line:?}");
                assert!(line.y_mm <= PAGE_HEIGHT_MM - MARGIN_MM);
            }
        }
    }

    #[test]
    fn test_entries_are_not_split_across_pages() {
        for page in layout_pages(&report_with(40)).iter().skip(1) {
            assert_eq!(page.lines.len() % 6, 0);
            assert!(page.lines[0].text.contains(". RH: "));
        }
    }

    #[test]
    fn test_render_multi_page_pdf() {
        let bytes = render_pdf(&report_with(40)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
