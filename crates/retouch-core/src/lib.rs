//! Retouch Core - Interactive image editing library
//!
//! This crate holds an editable BGR image, applies deterministic pixel
//! transforms to it and keeps an undo/redo history. A live preview protocol
//! lets a slider explore an effect without flooding the history.
//!
//! # Overview
//!
//! - [`ImageBuffer`]: owned 8-bit BGR pixel grid, valid by construction
//! - [`transform`]: stateless transforms (blur, edges, brightness, ...)
//! - [`Effect`]: a transform and its parameters as a value
//! - [`EditSession`]: current and original image plus history
//! - [`PreviewCoordinator`]: press/change/release for slider effects
//! - [`codec`]: decoding and encoding through the `image` crate

pub mod buffer;
pub mod codec;
pub mod config;
pub mod effect;
pub mod error;
pub mod history;
pub mod luminance;
pub mod preview;
pub mod session;
pub mod transform;

pub use buffer::{ImageBuffer, ImageMetadata, CHANNELS};
pub use codec::{CodecError, ImageCodec, ImageDecoder, ImageEncoder, OutputFormat};
pub use config::SessionConfig;
pub use effect::{Effect, ParamRange, SliderEffect};
pub use error::EditError;
pub use history::History;
pub use preview::PreviewCoordinator;
pub use session::EditSession;
pub use transform::FlipMode;
