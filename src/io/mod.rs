pub mod apply;
pub mod output;
pub mod walker;

pub use apply::{apply_fixes, apply_to_file};
pub use output::{create_writer, OutputFormat, OutputWriter};
pub use walker::discover_files;
