//! # Rich-Text Micro-Formats
//!
//! Best-effort extraction of structured fields from block-editor HTML. Nothing
//! in here fails: unexpected HTML yields absent fields.

pub mod blocks;
pub mod featured;
pub mod markers;
pub mod text;

pub use blocks::{extract_blocks, Block, BlockKind};
pub use featured::{parse_featured_list, FeaturedEntry};
pub use markers::{parse_micro_content, ContentProfile, ImageRef, OverviewItem, ParsedMicroContent};
pub use text::{decode_entities, strip_tags};
