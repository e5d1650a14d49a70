pub mod discovery;
pub mod loader;
