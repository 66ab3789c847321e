//! # flowctl-schema — Definitions, Schema Engine, Object Builder
//!
//! Everything between raw user input and a schema-valid [`Object`]:
//!
//! - **Registry adapter** ([`registry`]): resolves a resource kind against
//!   a definitions file — a multi-document YAML stream of CRD-style
//!   resource definitions carrying the API group, the version list, and
//!   the embedded per-version spec schema.
//! - **Schema engine** ([`engine`]): [`FieldSchema`] normalizes a raw
//!   nested mapping against the embedded schema (default application,
//!   scalar coercion) and validates the result, reporting the first
//!   violated constraint.
//! - **Object builder** ([`builder`]): chains lookup → served-version
//!   selection → schema extraction → process → validate → assembly. A
//!   pure function of its inputs plus the definitions file; it never
//!   touches the manifest store.
//!
//! [`Object`]: flowctl_core::Object
//! [`FieldSchema`]: engine::FieldSchema

pub mod builder;
pub mod engine;
pub mod error;
pub mod registry;

pub use builder::{build_object, build_unstructured};
pub use engine::FieldSchema;
pub use error::BuildError;
pub use registry::{list_kinds, list_sources, list_targets, Definition};
