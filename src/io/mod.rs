//! Input/output: files, configuration, logging and the command line

/// Command-line parsing, input validation and the run driver
pub mod cli;
/// Defaults and runtime configuration
pub mod configuration;
/// Error types shared by every module
pub mod error;
/// Image decoding, resampling and encoding
pub mod image;
/// Tile index persistence
pub mod index_file;
/// Tracing subscriber setup
pub mod logging;
/// Output file naming and collision avoidance
pub mod naming;
/// Terminal progress bars
pub mod progress;
/// Thumbnail directory and index file of a run
pub mod workspace;
