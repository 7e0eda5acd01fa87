//! Template rewrite engine
//!
//! Two modes share [render::render_template]:
//! - [version_files]: marker regions inside source files are re-rendered in place
//! - [template_files]: whole files are rendered to a derived output path

pub mod region;
pub mod render;
pub mod report;
pub mod template_files;
pub mod version_files;

pub use region::{Markers, TemplateRegion, CLOSING_MARKER};
pub use render::{render_template, RenderContext};
pub use report::BatchReport;
pub use template_files::{process_template_files, template_output_path};
pub use version_files::{process_version_files, rewrite_markers, Rewrite};
