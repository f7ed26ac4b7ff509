//! # propguard-core: Foundational Types
//!
//! Shared vocabulary for the propguard workspace. Every other crate depends
//! on `propguard-core`; it depends on nothing internal.
//!
//! ## Contents
//!
//! - [`options`]: [`ValidatorOptions`] and the [`RemoveAdditional`] mode that
//!   selects how additional object keys are enforced.
//! - [`error`]: [`CompileError`] for schemas that cannot be compiled, and
//!   [`ValidationError`] / [`ValidationErrors`] for documents that fail.
//! - [`pointer`]: [`JsonPointer`], the RFC 6901 path type used for both
//!   instance and schema locations.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `propguard-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Public option and error types implement `Serialize`/`Deserialize` so the
//!   CLI can read configuration files and emit machine-readable reports.

pub mod error;
pub mod options;
pub mod pointer;

pub use error::{CompileError, ErrorKind, OptionsError, ValidationError, ValidationErrors};
pub use options::{RemoveAdditional, ValidatorOptions, DEFAULT_PROPERTY_LOOKUP_THRESHOLD};
pub use pointer::JsonPointer;
