//! Debug rendering of tiles and scored samples.

pub mod color;
pub mod export;

pub use color::{Color, blue_red, hsv_to_rgb, rainbow};
pub use export::{
    ExportError, TileImageStyle, overlay_scored_samples, save_tile_png, tile_to_image,
};
