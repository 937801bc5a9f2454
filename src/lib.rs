//! Process-boundary plumbing for the `chess-search` front end: persisted settings,
//! opening book files and game setup.

pub mod book_loader;
pub mod session;
pub mod settings;

pub use settings::EngineSettings;
