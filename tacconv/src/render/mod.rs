//! Result rendering.
//!
//! - [`renderer`] maps typed results to [`view`] models, without I/O
//! - [`sink`] is the interface a drawing backend implements
//! - [`html`] is a markup backend; the CLI provides a terminal one
//! - [`text`] escapes service-provided text for each backend

pub mod html;
pub mod renderer;
pub mod sink;
pub mod text;
pub mod view;

pub use html::HtmlSink;
pub use sink::{draw, RenderOptions, RenderSink};
