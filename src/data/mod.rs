//! Data layer: manifests, file reading, and summaries.
//!
//! Architecture:
//! ```text
//!  <root>/ADHD_Reddit_dataset/*.csv      <root>/Mental_Health_datasets/*.{csv,xlsx}
//!        │                                     │
//!        ▼                                     ▼
//!   ┌──────────┐   manifest order, missing files skipped
//!   │  groups   │  ─────────────────────────────────────┐
//!   └──────────┘                                        │
//!        │                                              │
//!        ▼                                              ▼
//!   ┌──────────┐  utf-8 → latin-1 → iso-8859-1 → cp1252   ┌─────────────┐
//!   │  loader   │  first successful parse wins            │ spreadsheet  │
//!   └──────────┘                                          └─────────────┘
//!        │
//!        ▼
//!   ┌───────────────────┐
//!   │ DatasetCollection  │  key → Table
//!   └───────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   info    │  shape, columns, memory usage
//!   └──────────┘
//! ```

pub mod encoding;
pub mod error;
pub mod groups;
pub mod info;
pub mod loader;
pub mod manifest;
pub mod model;
