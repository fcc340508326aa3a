//! Source-located errors for TOML inputs

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A syntax error pinned to a location in an input file
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct SourceError {
    pub message: String,
    pub span: Option<Span>,
}

impl SourceError {
    pub fn from_toml(err: &toml::de::Error) -> Self {
        Self {
            message: err.message().to_string(),
            span: err.span(),
        }
    }

    /// Format the error with source context using ariadne.
    ///
    /// Falls back to the bare message when the error has no span.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span.clone() else {
            return format!("{}: {}", filename, self.message);
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&self.message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_includes_filename_and_message() {
        let source = "a = 1\nb = =\n";
        let err = toml::from_str::<toml::Table>(source).unwrap_err();
        let located = SourceError::from_toml(&err);
        assert!(located.span.is_some());
        let report = located.format(source, "config.toml");
        assert!(report.contains("config.toml"));
    }

    #[test]
    fn test_format_without_span() {
        let err = SourceError {
            message: "boom".to_string(),
            span: None,
        };
        assert_eq!(err.format("", "page.toml"), "page.toml: boom");
    }
}
