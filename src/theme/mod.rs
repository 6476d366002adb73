//! Theme module - light/dark theme state and static assets

pub mod assets;
mod store;

pub use store::{current, global, init, ThemeMode, ThemeParseError, ThemeStore};
