// Binds a particle field to a canvas on the page: sizes the canvas to the
// viewport, runs the frame loop and follows window resizes.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::animation::{AnimationHandle, AnimationLoop};
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;

pub const DEFAULT_CANVAS_ID: &str = "particles";

#[wasm_bindgen]
pub struct ParticleBackground {
    field: Rc<RefCell<ParticleField>>,
    canvas: HtmlCanvasElement,
    window: Window,
    animation: AnimationHandle,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    // Fails without building anything when the canvas or its 2D context is missing
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<ParticleBackground, JsValue> {
        let config = match config_json {
            Some(json) => FieldConfig::from_json(&json)?,
            None => FieldConfig::default(),
        };
        ParticleBackground::mount(canvas_id, config)
    }

    pub fn stop(&mut self) {
        self.animation.stop();
        self.detach_resize_listener();
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    pub fn particle_count(&self) -> usize {
        self.field.borrow().len()
    }

    pub fn frames(&self) -> f64 {
        self.field.borrow().frames() as f64
    }

    pub fn width(&self) -> f64 {
        self.field.borrow().width()
    }

    pub fn height(&self) -> f64 {
        self.field.borrow().height()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        resize_surface(&self.canvas, &self.field, width, height);
    }
}

impl ParticleBackground {
    pub fn mount(canvas_id: &str, mut config: FieldConfig) -> Result<ParticleBackground, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| FieldError::MissingSurface("no window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| FieldError::MissingSurface("no document".to_owned()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| FieldError::MissingSurface(format!("no element with id '{}'", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::MissingSurface(format!("'{}' is not a canvas", canvas_id)))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| FieldError::MissingSurface("canvas has no 2d context".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::MissingSurface("unexpected 2d context type".to_owned()))?;

        let (width, height) = viewport_size(&window)?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        config.width = canvas.width() as f64;
        config.height = canvas.height() as f64;

        let seed = config.seed.unwrap_or_else(random_seed);
        let field = ParticleField::with_seed(config, seed)?;
        info!(
            "particle-field: viewport {}x{}, {} particles",
            field.width(),
            field.height(),
            field.len()
        );
        let field = Rc::new(RefCell::new(field));

        let animation = AnimationLoop::start(window.clone(), field.clone(), ctx)?;

        let mut background = ParticleBackground {
            field,
            canvas,
            window,
            animation,
            on_resize: None,
        };
        background.attach_resize_listener()?;
        Ok(background)
    }

    fn attach_resize_listener(&mut self) -> Result<(), JsValue> {
        let window = self.window.clone();
        let canvas = self.canvas.clone();
        let field = self.field.clone();
        let on_resize = Closure::wrap(Box::new(move || match viewport_size(&window) {
            Ok((width, height)) => resize_surface(&canvas, &field, width, height),
            Err(e) => warn!("particle-field: could not read viewport size: {:?}", e),
        }) as Box<dyn FnMut()>);
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        self.on_resize = Some(on_resize);
        Ok(())
    }

    fn detach_resize_listener(&mut self) {
        if let Some(cb) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.detach_resize_listener();
    }
}

fn resize_surface(
    canvas: &HtmlCanvasElement,
    field: &Rc<RefCell<ParticleField>>,
    width: f64,
    height: f64,
) {
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
    let (width, height) = (canvas.width() as f64, canvas.height() as f64);
    field.borrow_mut().resize(width, height);
    debug!("particle-field: resized to {}x{}", width, height);
}

fn viewport_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
    Ok((width.floor(), height.floor()))
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}
