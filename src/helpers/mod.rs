//! Helper functions for page generation

mod html;
pub mod typewriter;
mod url;

pub use html::*;
pub use typewriter::{Frame, Typewriter};
pub use url::*;
