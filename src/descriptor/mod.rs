//! # Descriptor Extraction
//!
//! Turns upstream MegaLinter descriptor documents into a linter catalog.
//!
//! - `image_ref` - combined image reference parsing
//! - `instructions` - ARG/FROM/COPY scanning of install recipes
//! - `document` - typed descriptor documents
//! - `extract` - catalog classification and flavor membership
//! - `flavors` - the tracked base flavor names
//! - `source` - local or git-backed descriptor directories

pub mod document;
pub mod extract;
pub mod flavors;
pub mod image_ref;
pub mod instructions;
pub mod source;

pub use document::{DescriptorDocument, InstallSpec, LinterDescriptor};
pub use extract::{extract_base_flavor_linters, extract_corpus, extract_linter_catalog};
pub use flavors::{FlavorTable, MEGALINTER_FLAVORS};
pub use image_ref::ImageReference;
pub use instructions::{parse_instructions, InstallationDescriptor};
pub use source::{
    load_descriptor_documents, DescriptorSource, GitSparseCheckout, LocalDirectory,
};
