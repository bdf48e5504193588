//! One-shot stack snapshot collection.
//!
//! A collector runs one walk end-to-end on the calling thread: the walker
//! offers frames innermost first, each descriptor is parsed, surviving
//! frames are resolved to file/line and appended. The finished sequence
//! travels by return value; nothing is retained between snapshots, so
//! concurrent interceptions each build their own collector.

use tracing::{debug, warn};

use crate::descriptor::{self, ParsedLocation};
use crate::errors::CaptureError;
use crate::resolver::LineResolver;
use crate::trace::{FrameRecord, FrameSequence, SourceKind};
use crate::walker::{FrameVisitor, StackFrame, StackWalker};

/// Tuning for one snapshot.
#[derive(Debug, Clone, Default)]
pub struct CollectorOptions {
    max_frames: Option<usize>,
}

impl CollectorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the walk once this many frames have been retained.
    pub fn with_max_frames(mut self, max: usize) -> Self {
        self.max_frames = Some(max);
        self
    }
}

/// Collects one stack snapshot through injected walker and resolver
/// capabilities.
#[derive(Debug)]
pub struct SnapshotCollector<'r, R: LineResolver> {
    resolver: &'r R,
    options: CollectorOptions,
}

impl<'r, R: LineResolver> SnapshotCollector<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Self::with_options(resolver, CollectorOptions::default())
    }

    pub fn with_options(resolver: &'r R, options: CollectorOptions) -> Self {
        Self { resolver, options }
    }

    /// Run one walk to completion and return the retained frames.
    ///
    /// Walker and resolver failures fail the whole snapshot; malformed or
    /// excluded frames are skipped individually, keeping partial traces
    /// useful.
    pub fn capture<W: StackWalker>(&self, walker: &mut W) -> Result<FrameSequence, CaptureError> {
        let mut sink = FrameSink {
            resolver: self.resolver,
            options: &self.options,
            frames: FrameSequence::new(),
        };
        walker.walk(&mut sink)?;
        debug!(frames = sink.frames.len(), "stack walk complete");
        Ok(sink.frames)
    }
}

/// Visitor state for one walk in progress. Exclusively owns the sequence
/// until the walk returns.
struct FrameSink<'a, R: LineResolver> {
    resolver: &'a R,
    options: &'a CollectorOptions,
    frames: FrameSequence,
}

impl<R: LineResolver> FrameSink<'_, R> {
    fn keep_walking(&self) -> bool {
        match self.options.max_frames {
            Some(max) => self.frames.len() < max,
            None => true,
        }
    }
}

impl<R: LineResolver> FrameVisitor for FrameSink<'_, R> {
    fn visit_frame(&mut self, frame: &dyn StackFrame) -> Result<bool, CaptureError> {
        let descriptor = frame.describe_location();
        let location = match descriptor::parse_location(&descriptor) {
            Ok(ParsedLocation::Frame(location)) => location,
            Ok(ParsedLocation::Skip(reason)) => {
                debug!(?reason, "frame excluded");
                return Ok(self.keep_walking());
            }
            Err(err) => {
                warn!(%descriptor, error = %err, "skipping malformed location descriptor");
                return Ok(self.keep_walking());
            }
        };

        let Some(method) = frame.method() else {
            debug!(signature = %location.full_signature(), "frame has no method handle");
            return Ok(self.keep_walking());
        };

        let translated = self.resolver.translate_method(method);
        // A redirected identity means the raw pc indexes a body this frame
        // was not actually executing in; only pc 0 is meaningful there.
        let dex_pc = if translated == method {
            location.raw_dex_pc
        } else {
            0
        };
        let resolved = self.resolver.resolve_line(translated, dex_pc)?;

        let full_signature = location.full_signature();
        debug!(signature = %full_signature, dex_pc, "frame retained");
        self.frames.push(FrameRecord {
            class_name: location.class_name,
            full_signature,
            file_name: resolved.file,
            line_number: resolved.line,
            source: SourceKind::Dynamic,
        });
        Ok(self.keep_walking())
    }
}
