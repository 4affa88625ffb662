mod case_report_renderer;

pub use case_report_renderer::CaseReportRenderer;
