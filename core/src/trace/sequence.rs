use std::fmt;

use serde::Serialize;

use super::frame::FrameRecord;

/// Rendered form of a trace with no retained frames.
const EMPTY_TRACE: &str = "null";

/// Frames retained from one stack walk, innermost first.
///
/// A sequence is push-only while its snapshot is being collected and
/// read-only once the collector hands it over; it is never shared between
/// snapshots.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FrameSequence {
    frames: Vec<FrameRecord>,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next-outer frame. Collection-side only.
    pub(crate) fn push(&mut self, frame: FrameRecord) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameRecord> {
        self.frames.iter()
    }

    /// Render the trace for display.
    ///
    /// Each frame becomes `"<signature>->[<file>:<line>]"` (an absent file
    /// prints as `null`), joined by a newline and one tab, innermost frame
    /// first. An empty sequence renders as the `"null"` sentinel.
    pub fn render(&self) -> String {
        if self.frames.is_empty() {
            return EMPTY_TRACE.to_string();
        }
        let entries: Vec<String> = self
            .frames
            .iter()
            .map(|frame| {
                format!(
                    "{}->[{}:{}]",
                    frame.full_signature,
                    frame.file_name.as_deref().unwrap_or("null"),
                    frame.line_number
                )
            })
            .collect();
        entries.join("\n\t")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for FrameSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a FrameRecord;
    type IntoIter = std::slice::Iter<'a, FrameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::SourceKind;

    fn record(signature: &str, file: Option<&str>, line: i32) -> FrameRecord {
        FrameRecord {
            class_name: "com.example.Foo".to_string(),
            full_signature: signature.to_string(),
            file_name: file.map(str::to_string),
            line_number: line,
            source: SourceKind::Dynamic,
        }
    }

    #[test]
    fn empty_renders_sentinel() {
        assert_eq!(FrameSequence::new().render(), "null");
    }

    #[test]
    fn single_frame() {
        let mut seq = FrameSequence::new();
        seq.push(record("void com.example.Foo.bar(int)", Some("Foo.java"), 42));
        assert_eq!(seq.render(), "void com.example.Foo.bar(int)->[Foo.java:42]");
    }

    #[test]
    fn frames_join_with_newline_tab() {
        let mut seq = FrameSequence::new();
        seq.push(record("void com.example.Foo.inner()", Some("Foo.java"), 7));
        seq.push(record("void com.example.Foo.outer()", Some("Foo.java"), 21));
        assert_eq!(
            seq.render(),
            "void com.example.Foo.inner()->[Foo.java:7]\n\tvoid com.example.Foo.outer()->[Foo.java:21]"
        );
    }

    #[test]
    fn absent_file_renders_null() {
        let mut seq = FrameSequence::new();
        seq.push(record("void com.example.Foo.bar(int)", None, 0));
        assert_eq!(seq.render(), "void com.example.Foo.bar(int)->[null:0]");
    }

    #[test]
    fn render_is_idempotent() {
        let mut seq = FrameSequence::new();
        seq.push(record("void com.example.Foo.bar(int)", Some("Foo.java"), 3));
        assert_eq!(seq.render(), seq.render());
    }

    #[test]
    fn display_matches_render() {
        let mut seq = FrameSequence::new();
        seq.push(record("void com.example.Foo.bar(int)", Some("Foo.java"), 3));
        assert_eq!(format!("{seq}"), seq.render());
    }
}
