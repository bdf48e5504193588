use serde::Serialize;

/// Provenance of a frame's description.
///
/// Only live-captured frames exist today; the enum stays open so future
/// producers (native frames, pre-recorded traces) can be told apart
/// without breaking consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SourceKind {
    /// Captured live from the runtime's stack walker.
    Dynamic,
}

/// One retained stack frame.
///
/// Records are only built from a successfully parsed descriptor, so
/// `full_signature` is always of the form
/// `"<returnType> <className>.<methodName>(<argTypes>)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    /// Fully qualified declaring class, dot-separated.
    pub class_name: String,
    pub full_signature: String,
    /// `None` when the method carries no source-file debug info.
    pub file_name: Option<String>,
    /// 0 when unresolved or when the frame was redirected to a
    /// non-debuggable translation.
    pub line_number: i32,
    pub source: SourceKind,
}
