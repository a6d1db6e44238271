//! Error adapter for converting MosaicError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Scene and settings errors carry their TOML source and, when the parser
//! knows it, the byte range of the offending input; they are rendered with a
//! source snippet. Every other error is rendered as a plain message with a
//! stable diagnostic code.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use mosaic::MosaicError;

const SCENE_CODE: &str = "mosaic::scene";
const SETTINGS_CODE: &str = "mosaic::settings";

/// Adapter for an error with source information.
pub struct DiagnosticAdapter<'a> {
    code: &'static str,
    message: String,
    span: Option<&'a Range<usize>>,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(
        code: &'static str,
        message: impl Into<String>,
        span: Option<&'a Range<usize>>,
        src: &'a str,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            src,
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.code {
            SETTINGS_CODE => Some(Box::new(
                "the settings file takes `[style]` and `[interaction]` tables",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.span.map(|_| &self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span_to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`MosaicError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a MosaicError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MosaicError::Io(_) => "mosaic::io",
            MosaicError::Config(_) => "mosaic::config",
            MosaicError::Wash(_) => "mosaic::wash",
            MosaicError::Resolve { .. } => "mosaic::resolve",
            MosaicError::Scene { .. } => SCENE_CODE,
            MosaicError::Settings { .. } => SETTINGS_CODE,
            MosaicError::Export(_) => "mosaic::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            MosaicError::Resolve { .. } => {
                "a deferred expression needs a concrete value in the style painted beneath it"
            }
            MosaicError::Config(_) => "fix the aesthetic sheet; no region can be rendered until then",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A scene error with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`MosaicError`] into a list of reportable errors.
pub fn to_reportables(err: &MosaicError) -> Vec<Reportable<'_>> {
    match err {
        MosaicError::Scene { message, span, src } => vec![Reportable::Diagnostic(
            DiagnosticAdapter::new(SCENE_CODE, message.as_str(), span.as_ref(), src),
        )],
        MosaicError::Settings {
            path,
            message,
            span,
            src,
        } => vec![Reportable::Diagnostic(DiagnosticAdapter::new(
            SETTINGS_CODE,
            format!("{}: {message}", path.display()),
            span.as_ref(),
            src,
        ))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Convert a byte range to a miette [`SourceSpan`].
fn span_to_miette(span: &Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

#[cfg(test)]
mod tests {
    use mosaic::{ConfigError, ResolveError, identifier::Id};

    use super::*;

    #[test]
    fn test_scene_error_with_span() {
        let err = MosaicError::new_scene_error("unexpected key", Some(4..9), "key = value");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "unexpected key");
                let labels: Vec<_> = d.labels().unwrap().collect();
                assert_eq!(labels.len(), 1);
                assert!(labels[0].primary());
                assert_eq!(labels[0].offset(), 4);
                assert_eq!(labels[0].len(), 5);
                assert!(d.source_code().is_some());
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_scene_error_without_span() {
        let err = MosaicError::new_scene_error("region `a` has no elements", None, "");

        let reportables = to_reportables(&err);
        assert!(reportables[0].labels().is_none());
        assert!(reportables[0].source_code().is_none());
        assert_eq!(reportables[0].code().unwrap().to_string(), "mosaic::scene");
    }

    #[test]
    fn test_error_codes() {
        let err = MosaicError::Config(ConfigError::ZeroWrapModulus);
        let reportables = to_reportables(&err);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.code().unwrap().to_string(), "mosaic::config");
                assert!(e.help().is_some());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }

        let err = MosaicError::Resolve {
            region: Id::new("a"),
            source: ResolveError::Config(ConfigError::ZeroWrapModulus),
        };
        let reportables = to_reportables(&err);
        assert_eq!(reportables[0].code().unwrap().to_string(), "mosaic::resolve");
        assert!(reportables[0].to_string().contains("`a`"));
    }

    #[test]
    fn test_settings_error_is_a_diagnostic() {
        let src = "[interaction]\nmode = \"sometimes\"\n";
        let err =
            MosaicError::new_settings_error("mosaic/config.toml", "unknown variant", Some(21..32), src);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].code().unwrap().to_string(), "mosaic::settings");
        assert!(reportables[0].help().is_some());
        assert_eq!(reportables[0].to_string(), "mosaic/config.toml: unknown variant");
        assert!(!reportables[0].to_string().contains("I/O"));
        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert_eq!(labels[0].offset(), 21);
    }

    #[test]
    fn test_io_error() {
        let err = MosaicError::Io(std::io::Error::other("disk full"));

        let reportables = to_reportables(&err);
        assert_eq!(reportables[0].to_string(), "I/O error: disk full");
        assert_eq!(reportables[0].code().unwrap().to_string(), "mosaic::io");
    }
}
