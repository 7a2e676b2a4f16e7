//! Image loading boundary.
//!
//! Decoding belongs to the host application. This module only defines the
//! capability and how its result lands on a configuration: a failed or
//! half-finished decode leaves the token without an image, never an error.

use std::fmt;

use crate::config::{BackgroundImage, TokenConfig};
use crate::log::{debug, warn};

/// Turns user-supplied bytes into a decoded image the surface can draw
pub trait ImageLoader {
    type Error: fmt::Display;

    fn load(&mut self, bytes: &[u8]) -> Result<BackgroundImage, Self::Error>;
}

/// Decode `bytes` and attach the result to `config`.
///
/// Anything short of a decoded image with known dimensions clears the
/// background image so the next render falls back to a plain fill.
pub fn attach_image<L: ImageLoader + ?Sized>(config: TokenConfig, loader: &mut L, bytes: &[u8]) -> TokenConfig {
    let image = match loader.load(bytes) {
        Ok(image) if image.is_ready() => {
            debug!(width = image.width, height = image.height, "background image decoded");
            Some(image)
        }
        Ok(_) => {
            warn!("background image decoded without dimensions; ignoring it");
            None
        }
        Err(_err) => {
            warn!(error = %_err, "background image failed to load");
            None
        }
    };
    config.with_background_image(image)
}
