//! Output generation for rendered editions.
//!
//! # Submodules
//!
//! - [`json`]: writes the `FrontPage` as a JSON file
//! - [`markdown`]: renders the `FrontPage` as Markdown news cards grouped by topic
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── 2025-05-06/
//! │   ├── morning.json
//! │   ├── afternoon.json
//! │   └── evening.json
//!
//! markdown_output_dir/
//! ├── 2025-05-06_morning.md
//! └── 2025-05-06_afternoon.md
//! ```

pub mod json;
pub mod markdown;
