use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("malformed location descriptor: {message}")]
#[diagnostic(help("descriptor shape is dictated by the runtime's stack walker; a mismatch usually means an incompatible runtime build"))]
pub struct ParseError {
    pub message: String,

    /// The descriptor that failed to parse.
    #[source_code]
    pub descriptor: String,

    #[label("here")]
    pub span: miette::SourceSpan,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        descriptor: impl Into<String>,
        offset: usize,
        length: usize,
    ) -> Self {
        Self {
            message: message.into(),
            descriptor: descriptor.into(),
            span: (offset, length).into(),
        }
    }
}
