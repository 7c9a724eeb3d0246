pub mod cache;
pub mod document;
pub mod loader;
pub mod renderer;
