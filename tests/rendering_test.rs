use casebrief::application::ports::ReportRenderer;
use casebrief::domain::ReportFormat;
use casebrief::infrastructure::rendering::CaseReportRenderer;

#[test]
fn given_report_text_when_rendering_txt_then_bytes_round_trip_exactly() {
    let renderer = CaseReportRenderer::new();
    let report = "1. 25 Word Summary\nSome case summary.\n\n2. Parties\nPlaintiff: A | Defendant: B";

    let bytes = renderer.render(report, ReportFormat::Txt).unwrap();

    assert_eq!(String::from_utf8(bytes).unwrap(), report);
}

#[test]
fn given_short_report_when_rendering_pdf_then_produces_single_page_document() {
    let renderer = CaseReportRenderer::new();

    let bytes = renderer
        .render("A short report.", ReportFormat::Pdf)
        .unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn given_long_report_when_rendering_pdf_then_paginates() {
    let renderer = CaseReportRenderer::new();
    let report = "An event in the procedural history of the case.\n".repeat(200);

    let bytes = renderer.render(&report, ReportFormat::Pdf).unwrap();

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert!(doc.get_pages().len() > 1);
}

#[test]
fn given_empty_report_when_rendering_pdf_then_still_valid() {
    let renderer = CaseReportRenderer::new();

    let bytes = renderer.render("", ReportFormat::Pdf).unwrap();

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn given_non_latin_characters_when_rendering_pdf_then_does_not_fail() {
    let renderer = CaseReportRenderer::new();

    let bytes = renderer
        .render("Judgment \u{2022} § 42 \u{4E2D}\u{6587}", ReportFormat::Pdf)
        .unwrap();

    assert!(bytes.starts_with(b"%PDF"));
}
