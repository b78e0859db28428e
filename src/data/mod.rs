//! Data layer: the validated two-column dataset and its loader.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .txt
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  header + rows → all-or-nothing validation
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  (x_label, y_label, x, y), immutable
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
