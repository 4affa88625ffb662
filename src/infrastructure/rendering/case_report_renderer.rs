//! Renders a case report as TXT (verbatim bytes) or as a paginated A4 PDF
//! built with `lopdf`: Helvetica 10 pt, 2 cm margins, greedy word wrapping.
//! The text is laid out exactly as received; sections are whatever the model
//! produced.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::application::ports::{RenderError, ReportRenderer};
use crate::domain::ReportFormat;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 57;
const FONT_SIZE: i64 = 10;
const LEADING: i64 = 14;

/// Greedy wrapping works on character counts, not glyph metrics; this is the
/// widest line that stays inside the margins for average Helvetica text.
const MAX_LINE_CHARS: usize = 88;

const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

#[derive(Default)]
pub struct CaseReportRenderer;

impl CaseReportRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for CaseReportRenderer {
    fn render(&self, report: &str, format: ReportFormat) -> Result<Vec<u8>, RenderError> {
        match format {
            ReportFormat::Txt => Ok(report.as_bytes().to_vec()),
            ReportFormat::Pdf => render_pdf(report),
        }
    }
}

fn render_pdf(report: &str) -> Result<Vec<u8>, RenderError> {
    // An empty report still produces a single blank page.
    let mut lines = layout_lines(report);
    if lines.is_empty() {
        lines.push(String::new());
    }
    let pages: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for page_lines in &pages {
        let content = page_content(page_lines);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    Ok(buf)
}

fn page_content(lines: &[String]) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
        Operation::new("TL", vec![LEADING.into()]),
        Operation::new(
            "Td",
            vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - FONT_SIZE).into()],
        ),
    ];

    for line in lines {
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_latin1(line),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("T*", vec![]));
    }

    operations.push(Operation::new("ET", vec![]));

    Content { operations }
}

/// Split the report into printable lines: paragraph breaks carry through as
/// blank lines, everything else wraps at [`MAX_LINE_CHARS`].
fn layout_lines(report: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in report.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrap_line(paragraph, MAX_LINE_CHARS));
        }
    }

    lines
}

/// Greedy word wrapping. Words longer than the limit are hard-split so a
/// pathological token cannot overflow the margin.
fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut line = String::new();
    let mut line_chars = 0usize;

    for word in text.split(' ') {
        let word_chars = word.chars().count();

        if word_chars > max_chars {
            if !line.is_empty() {
                wrapped.push(std::mem::take(&mut line));
                line_chars = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                wrapped.push(chunk.iter().collect());
            }
            continue;
        }

        let needed = if line.is_empty() {
            word_chars
        } else {
            line_chars + 1 + word_chars
        };

        if needed > max_chars {
            wrapped.push(std::mem::take(&mut line));
            line.push_str(word);
            line_chars = word_chars;
        } else {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
            line_chars = needed;
        }
    }

    if !line.is_empty() || wrapped.is_empty() {
        wrapped.push(line);
    }

    wrapped
}

/// Helvetica with the standard encoding is single-byte; map what we can and
/// substitute the rest so the content stream stays valid.
fn encode_latin1(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match c {
            '\u{2022}' => b'-',
            '\u{2018}' | '\u{2019}' => b'\'',
            '\u{201C}' | '\u{201D}' => b'"',
            '\u{2013}' | '\u{2014}' => b'-',
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_short_lines_intact() {
        assert_eq!(wrap_line("short line", 20), vec!["short line"]);
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let wrapped = wrap_line("alpha beta gamma delta", 11);
        assert_eq!(wrapped, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn wrap_hard_splits_overlong_words() {
        let wrapped = wrap_line(&"x".repeat(25), 10);
        assert_eq!(wrapped.len(), 3);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_empty_input_yields_one_empty_line() {
        assert_eq!(wrap_line("", 10), vec![""]);
    }

    #[test]
    fn layout_preserves_paragraph_breaks() {
        let lines = layout_lines("first paragraph\n\nsecond paragraph");
        assert_eq!(
            lines,
            vec!["first paragraph", "", "second paragraph"]
        );
    }

    #[test]
    fn latin1_substitutes_unmappable_chars() {
        assert_eq!(encode_latin1("a\u{2022}b\u{4E2D}"), b"a-b?");
    }
}
