// Animated particle background for a canvas element. Particles drift at a
// constant velocity, wrap around the edges and are linked by lines that fade
// out with distance.

mod utils;

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod particle;
pub mod surface;

use log::Level;
use wasm_bindgen::prelude::*;

pub use animation::{run_frame, AnimationHandle, AnimationLoop, CancelToken};
pub use config::{FieldConfig, ResizePolicy};
pub use error::FieldError;
pub use field::{link_opacity, Connection, ParticleField};
pub use host::ParticleBackground;
pub use particle::Particle;
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging(Level::Info);
}

// Mounts the default background on the page's `#particles` canvas
#[wasm_bindgen]
pub fn mount_page_background() -> Result<ParticleBackground, JsValue> {
    initialize();
    ParticleBackground::mount(host::DEFAULT_CANVAS_ID, FieldConfig::default())
}
