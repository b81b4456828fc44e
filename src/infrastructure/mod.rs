// src/infrastructure/mod.rs
pub mod autosize;
pub mod config;
pub mod file_storage;
pub mod masonry;
pub mod renderer;

pub use autosize::LineAutoGrow;
pub use config::Config;
pub use file_storage::FileStorage;
pub use masonry::MasonryLayout;
pub use renderer::BoardRenderer;
