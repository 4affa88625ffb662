/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Txt,
    Pdf,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Txt => "text/plain; charset=utf-8",
            Self::Pdf => "application/pdf",
        }
    }
}

/// A report file written to the output directory. Artifacts are addressed by
/// filename only; rendering the same upload again overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub format: ReportFormat,
}

impl Artifact {
    pub fn for_stem(stem: &str, format: ReportFormat) -> Self {
        Self {
            filename: format!("{stem}.{}", format.extension()),
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_name_derives_from_stem() {
        let artifact = Artifact::for_stem("case1", ReportFormat::Pdf);
        assert_eq!(artifact.filename, "case1.pdf");
    }
}
