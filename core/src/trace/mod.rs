//! Frame data model and trace rendering.

mod frame;
mod sequence;

pub use frame::{FrameRecord, SourceKind};
pub use sequence::FrameSequence;
