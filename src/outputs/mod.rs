//! Output generation: Hugo content files.
//!
//! # Submodules
//!
//! - [`front_matter`]: renders one article into front matter plus body text
//! - [`files`]: names, skips or writes the per-article files
//!
//! # Output Structure
//!
//! ```text
//! output_dir/              (default ../../content/ja/)
//! ├── 1704067200000.md
//! ├── 1706745600000.md
//! └── 1709251200000.md
//! ```

pub mod files;
pub mod front_matter;
