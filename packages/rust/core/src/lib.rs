//! Core pipeline orchestration for javadocset.
//!
//! This crate ties together path validation, documentation tree copying,
//! `Info.plist` rendering, index parsing, and the lookup store into the
//! end-to-end `build_docset` workflow.

pub mod copier;
pub mod pipeline;
pub mod plist;
pub mod validate;
