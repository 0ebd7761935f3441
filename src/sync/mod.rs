//! Synchronization between the catalog and the curve file tree.

pub mod fields;
pub mod pipeline;

pub use fields::{FALLOFF_FIELD, Field, GUIDANCE_FIELDS};
pub use pipeline::{
    Applied, CategoryFailure, ExtractReport, InjectReport, SyncFailure, Written, extract, inject,
};
