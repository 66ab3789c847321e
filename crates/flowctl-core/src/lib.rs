//! # flowctl-core — Foundational Types for flowctl
//!
//! Defines the resource object model shared by every other crate in the
//! workspace: the [`Object`] document type, its identity and structural
//! equality rules, and the recursive value helpers used to compare and
//! convert loosely-typed spec payloads.
//!
//! ## Key Design Principles
//!
//! 1. **Identity is a triple.** Two objects are the same entity iff
//!    `(apiVersion, kind, metadata.name)` are equal. Labels and spec
//!    never participate in identity.
//!
//! 2. **Spec payloads are tagged values.** The configurable section of an
//!    object is a `serde_yaml::Value` — scalars, order-preserving
//!    sequences, and insertion-ordered mappings. Equality over it is the
//!    explicit recursive [`structural_eq`], not pointer or derive
//!    equality: mappings compare key-order-insensitively, sequences
//!    order-sensitively.
//!
//! 3. **One label key for context ownership.** Every object built by this
//!    toolchain carries the [`CONTEXT_LABEL`] label naming the broker
//!    context it belongs to. The key is a named constant, not mutable
//!    process state.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `flowctl-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod object;
pub mod value;

pub use object::{Metadata, Object, CONTEXT_LABEL};
pub use value::{json_to_yaml, structural_eq, yaml_to_json, ConversionError};
