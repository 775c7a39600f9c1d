//! Module defining the header formats shaders can be read from and written to.

// Export the core format trait
pub mod header_format;
pub use header_format::HeaderFormat;

// Format-specific implementations
pub mod raw_string;
pub use raw_string::RawStringHeader;
