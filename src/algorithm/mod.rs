/// Grid cell matching and thumbnail painting
pub mod composer;
/// Tile index and nearest-color search
pub mod index;
/// Thumbnail generation and signature indexing of tile directories
pub mod indexer;
/// Orchestration of indexing, composition and output
pub mod pipeline;
