//! Gene definition library storage.
//!
//! A definition file describes one pharmacogene: its panel of diagnostic
//! positions (in matching order), its named haplotypes with their expected
//! alleles (`null` = wildcard), and version metadata used only for display.
//! The library is a gene-keyed collection of definition files loaded from
//! JSON: either a single file or every `*.json` in a directory.
//!
//! Loading is fail-fast: malformed JSON, empty panels, allele arrays that
//! do not line up with the panel, and duplicate genes, alleles, or
//! positions are all typed configuration errors. No partially-loaded
//! library is ever returned.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dip_solver::definitions::DefinitionLibrary;
//!
//! let library = DefinitionLibrary::load_from_path(Path::new("definitions/")).unwrap();
//! for (gene, file) in library.iter() {
//!     println!("{gene}: {} positions, {} alleles", file.positions.len(), file.named_alleles.len());
//! }
//! ```

pub mod store;

pub use store::{DefinitionError, DefinitionFile, DefinitionLibrary};
