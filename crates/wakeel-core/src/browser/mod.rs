//! Browser automation surface.
//!
//! The engine never drives a browser directly. It talks to an external
//! driver process through the [`BrowserSurface`] trait: navigate, evaluate
//! script, fill form fields, and read/write the persisted storage state.
//! The bundled [`StdioDriver`] speaks JSONL to a sidecar process; tests
//! substitute an in-memory mock.
//!
//! The surface is treated as unreliable: site markup changes, so form
//! interactions go through ordered fallback selector lists (see
//! [`selectors`]) where the first success wins.

pub mod driver;
pub mod errors;
pub mod protocol;
pub mod selectors;
pub mod traits;

pub use driver::StdioDriver;
pub use errors::BrowserError;
pub use selectors::{click_first, fill_first};
pub use traits::{BrowserSurface, WaitPolicy};
