use std::cell::RefCell;

use dexstack::errors::{CaptureError, ResolveError, WalkError};
use dexstack::resolver::{LineResolver, NullResolver, SourceLocation};
use dexstack::walker::{FrameVisitor, MethodHandle, ReplayWalker, StackFrame, StackWalker};
use dexstack::{CollectorOptions, SnapshotCollector, capture_stack};

const VALID: &str = "Visiting method 'void com.example.Foo.bar(int,java.lang.String)' at dex PC 0x001a";

/// Resolver that records every `resolve_line` call and optionally reports
/// a redirected method identity from translation.
struct RecordingResolver {
    redirect: bool,
    calls: RefCell<Vec<(u64, u32)>>,
}

impl RecordingResolver {
    fn new(redirect: bool) -> Self {
        Self {
            redirect,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl LineResolver for RecordingResolver {
    fn translate_method(&self, method: MethodHandle) -> MethodHandle {
        if self.redirect {
            MethodHandle(method.0 + 100)
        } else {
            method
        }
    }

    fn resolve_line(
        &self,
        method: MethodHandle,
        dex_pc: u32,
    ) -> Result<SourceLocation, ResolveError> {
        self.calls.borrow_mut().push((method.0, dex_pc));
        Ok(SourceLocation {
            file: Some("Foo.java".to_string()),
            line: 42,
        })
    }
}

struct FailingResolver;

impl LineResolver for FailingResolver {
    fn translate_method(&self, method: MethodHandle) -> MethodHandle {
        method
    }

    fn resolve_line(
        &self,
        method: MethodHandle,
        dex_pc: u32,
    ) -> Result<SourceLocation, ResolveError> {
        Err(ResolveError::new(method, dex_pc, "debug info tables unreadable"))
    }
}

struct TestFrame {
    descriptor: String,
    method: Option<MethodHandle>,
}

impl StackFrame for TestFrame {
    fn describe_location(&self) -> String {
        self.descriptor.clone()
    }

    fn method(&self) -> Option<MethodHandle> {
        self.method
    }
}

/// Walker that counts how many frames it offered before the visitor
/// stopped the walk.
struct CountingWalker {
    descriptors: Vec<String>,
    offered: usize,
}

impl StackWalker for CountingWalker {
    fn walk(&mut self, visitor: &mut dyn FrameVisitor) -> Result<(), CaptureError> {
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            self.offered += 1;
            let frame = TestFrame {
                descriptor: descriptor.clone(),
                method: Some(MethodHandle(index as u64 + 1)),
            };
            if !visitor.visit_frame(&frame)? {
                break;
            }
        }
        Ok(())
    }
}

struct NoMethodWalker;

impl StackWalker for NoMethodWalker {
    fn walk(&mut self, visitor: &mut dyn FrameVisitor) -> Result<(), CaptureError> {
        let frame = TestFrame {
            descriptor: VALID.to_string(),
            method: None,
        };
        visitor.visit_frame(&frame)?;
        Ok(())
    }
}

struct FailingWalker;

impl StackWalker for FailingWalker {
    fn walk(&mut self, _visitor: &mut dyn FrameVisitor) -> Result<(), CaptureError> {
        Err(WalkError::InvalidContext("thread not suspended".to_string()).into())
    }
}

#[test]
fn excluded_frames_never_reach_the_sequence() {
    let mut walker = ReplayWalker::new(vec![
        "upcall".to_string(),
        VALID.to_string(),
        "Visiting method '<runtime internal method>' at dex PC 0x0000".to_string(),
    ]);
    let frames = capture_stack(&mut walker, &NullResolver).expect("capture should succeed");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames.frames()[0].class_name, "com.example.Foo");
}

#[test]
fn untranslated_method_keeps_the_raw_pc() {
    let resolver = RecordingResolver::new(false);
    let mut walker = ReplayWalker::new(vec![VALID.to_string()]);
    capture_stack(&mut walker, &resolver).expect("capture should succeed");
    assert_eq!(resolver.calls.into_inner(), vec![(1, 0x1a)]);
}

#[test]
fn translated_method_forces_pc_zero() {
    let resolver = RecordingResolver::new(true);
    let mut walker = ReplayWalker::new(vec![VALID.to_string()]);
    capture_stack(&mut walker, &resolver).expect("capture should succeed");
    assert_eq!(resolver.calls.into_inner(), vec![(101, 0)]);
}

#[test]
fn resolver_failure_fails_the_snapshot() {
    let mut walker = ReplayWalker::new(vec![VALID.to_string()]);
    let err = capture_stack(&mut walker, &FailingResolver).expect_err("capture should fail");
    assert!(matches!(err, CaptureError::Resolve(_)));
}

#[test]
fn walker_failure_fails_the_snapshot() {
    let err =
        capture_stack(&mut FailingWalker, &NullResolver).expect_err("capture should fail");
    assert!(matches!(err, CaptureError::Walk(_)));
}

#[test]
fn empty_walk_is_ok_and_renders_sentinel() {
    let mut walker = ReplayWalker::new(vec!["upcall".to_string()]);
    let frames = capture_stack(&mut walker, &NullResolver).expect("capture should succeed");
    assert!(frames.is_empty());
    assert_eq!(frames.render(), "null");
}

#[test]
fn malformed_descriptor_skips_only_that_frame() {
    let mut walker = ReplayWalker::new(vec![
        "Visiting method 'void bar(int)' at dex PC 0x001a".to_string(),
        VALID.to_string(),
    ]);
    let frames = capture_stack(&mut walker, &NullResolver).expect("capture should succeed");
    assert_eq!(frames.len(), 1);
}

#[test]
fn frame_without_method_handle_is_dropped() {
    let frames = capture_stack(&mut NoMethodWalker, &NullResolver).expect("capture should succeed");
    assert!(frames.is_empty());
}

#[test]
fn max_frames_stops_the_walk_early() {
    let mut walker = CountingWalker {
        descriptors: vec![
            "upcall".to_string(),
            VALID.to_string(),
            VALID.to_string(),
            VALID.to_string(),
        ],
        offered: 0,
    };
    let collector =
        SnapshotCollector::with_options(&NullResolver, CollectorOptions::new().with_max_frames(1));
    let frames = collector.capture(&mut walker).expect("capture should succeed");
    assert_eq!(frames.len(), 1);
    // The upcall and the first retained frame were offered; the visitor's
    // continuation signal stopped the walk before the rest.
    assert_eq!(walker.offered, 2);
}

#[test]
fn collectors_are_reusable_across_snapshots() {
    let collector = SnapshotCollector::new(&NullResolver);
    let mut first = ReplayWalker::new(vec![VALID.to_string()]);
    let mut second = ReplayWalker::new(vec![VALID.to_string(), VALID.to_string()]);
    assert_eq!(collector.capture(&mut first).unwrap().len(), 1);
    assert_eq!(collector.capture(&mut second).unwrap().len(), 2);
}
