//! # flowctl-manifest — Manifest Store
//!
//! An ordered, identity-deduplicated collection of resource objects backed
//! by a multi-document YAML file (or a flat directory of such files). The
//! manifest is the sole persisted record of the locally tracked resource
//! topology.
//!
//! ## Invariants
//!
//! - At most one object per `(apiVersion, kind, metadata.name)` triple.
//! - Insertion order of first appearance survives load/merge/save cycles;
//!   objects are never silently reordered.
//!
//! ## Shared-Resource Policy
//!
//! The backing file carries no locking discipline. Concurrent
//! load/merge/save sequences against the same path can lose updates;
//! single-writer access per manifest path is a caller obligation. The
//! in-memory object list is exclusively owned by the calling sequence —
//! nothing is retained or shared across calls.

pub mod error;
pub mod store;

pub use error::ManifestError;
pub use store::Manifest;
