//! Node construction and quality-control pipeline.
//!
//! Turns normalized document text into bounded-size, self-contained nodes:
//! - [`segmenter`] — headings → sections → paragraphs → sentences
//! - [`packer`] — token-budgeted greedy packing that never splits a sentence
//! - [`auditor`] — near-duplicate removal, short-node merging, reindexing
//! - [`classifier`] — keyword-driven tag and domain classification
//! - [`pipeline`] — the end-to-end driver producing a [`DocumentRecord`]
//!
//! [`DocumentRecord`]: nodeweaver_shared::DocumentRecord

pub mod auditor;
pub mod classifier;
pub mod packer;
pub mod pipeline;
pub mod segmenter;
pub mod tags;

pub use auditor::audit;
pub use classifier::classify;
pub use packer::pack;
pub use pipeline::{ProgressReporter, SilentProgress, process_document};
pub use segmenter::segment;
