pub mod directory_scanner;
pub mod file_filter;

pub use directory_scanner::{ensure_directory, DirectoryScanner, SourceEntry};
pub use file_filter::ExtensionFilter;
