//! Sprite images
//!
//! Images referenced by sprites are decoded with the `image` crate and
//! uploaded as macroquad textures on first use. The cache remembers
//! failures too: a missing or broken file is reported once and the sprite
//! falls back to its solid colour for the rest of the run.

mod image_cache;

pub use image_cache::{load_texture, TextureCache};
