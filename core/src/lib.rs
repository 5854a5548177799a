#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # Browse Memory Core
//!
//! Core data structures and algorithms for an adaptive browsing intelligence
//! agent: a vector-indexed procedural memory of reusable browsing skills, a
//! cost/latency-bounded tiered fetch orchestrator, and a field-level JSON
//! change tracker.
//!
//! ## Module Organization
//!
//! - [`kernel`]: deterministic fingerprint/embedding primitives shared by the
//!   other two subsystems (page-context and skill embedding, cosine
//!   similarity).
//! - [`procedural_memory`]: skill CRUD, retrieval, merge, versioning,
//!   anti-patterns, feedback, workflows, and persistence.
//! - [`orchestrator`]: tier selection, budget enforcement, fallback, and
//!   per-domain tier preference learning.
//! - [`change_tracker`]: structured JSON diffing with category/severity
//!   classification and bounded per-URL history.
//! - [`error`]: the crate-wide error taxonomy.
//! - [`persistence`]: the atomic single-document JSON read/write scaffold
//!   shared by all three stores.
//!
//! ## Quick Start
//!
//! ```no_run
//! use browse_memory_core::procedural_memory::{MemoryStore, ProceduralMemoryConfig};
//! use browse_memory_core::kernel::PageContext;
//!
//! # fn main() -> browse_memory_core::error::Result<()> {
//! let store = MemoryStore::initialize(ProceduralMemoryConfig::default())?;
//! let ctx = PageContext::from_url("https://example.com/items/42")?;
//! let matches = store.retrieve_skills(&ctx, 5);
//! println!("found {} candidate skills", matches.len());
//! # Ok(())
//! # }
//! ```

pub mod change_tracker;
pub mod config;
pub mod error;
pub mod kernel;
pub mod orchestrator;
pub mod persistence;
pub mod procedural_memory;

pub use error::{Error, Result};
