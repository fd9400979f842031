//! OpenAPI 3.x schema resolution and example synthesis.
//!
//! - [`parse`]: the document model and `$ref` lookup.
//! - [`synth`]: example values and `curl` commands derived from schemas.
//! - [`view`]: operation grouping, schema trees, and the text outline.

pub mod config;
pub mod error;
pub mod parse;
pub mod synth;
pub mod view;

pub use parse::ref_resolve::{ResolvedSchema, resolve};
pub use parse::spec::OpenApiSpec;
