//! Curator: historical archive summaries
//!
//! This crate answers two questions about a historical archive document supplied
//! as XML or JSON:
//!
//! 1. **Century distribution** -- How many artefacts were created in each century,
//!    bucketed by a normalised label such as `19th Century CE`
//! 2. **Connections by type** -- How many artefacts, events and other individuals
//!    each historical individual references
//!
//! # Architecture
//!
//! Both encodings are materialised into the same [`models::Archive`], so the
//! aggregation and reporting code never sees the source format:
//!
//! - **Load** -- [`source`] picks the format from the file name (or content) and
//!   hands the text to [`xml`] or [`json`]; `.bz2` input is decompressed on the fly
//! - **Classify** -- [`century`] turns a free-form date into a [`century::CenturyLabel`]
//! - **Aggregate** -- [`summary`] builds the two summaries
//! - **Report** -- [`report`] renders them as plain text
//!
//! Unreadable input is never fatal: it is logged and read as an empty archive.
//!
//! # Key Modules
//!
//! - [`century`] -- Date-to-century classification and ordinal suffixes
//! - [`models`] -- Format-independent archive types
//! - [`source`] -- Format detection, file reading, `Archive` constructors
//! - [`xml`] -- XML element tree and archive extraction
//! - [`json`] -- JSON archive extraction
//! - [`summary`] -- Century distribution and per-individual connection counts
//! - [`report`] -- Text report layout
//! - [`config`] -- Constants for headings, field names and defaults
//!
//! # Example Usage
//!
//! ```bash
//! curator example.xml
//! curator archive.json.bz2 --chronological
//! curator export.dat --format json -v
//! ```

pub mod century;
pub mod config;
pub mod json;
pub mod models;
pub mod report;
pub mod source;
pub mod summary;
pub mod xml;
