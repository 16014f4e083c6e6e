//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, Window};

use particle_field::{FieldConfig, ParticleBackground, ParticleField};

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn fire_resize(window: &Window) {
    window
        .dispatch_event(&Event::new("resize").unwrap())
        .unwrap();
}

fn viewport_width(window: &Window) -> f64 {
    window.inner_width().unwrap().as_f64().unwrap().floor()
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(ParticleBackground::new("no-such-canvas", None).is_err());
}

#[wasm_bindgen_test]
fn bad_config_is_an_error() {
    add_canvas("bad-config");
    let config = Some(r#"{ "connection_distance": -1 }"#.to_owned());
    assert!(ParticleBackground::new("bad-config", config).is_err());
}

#[wasm_bindgen_test]
fn mounts_sized_to_viewport_and_stops() {
    let canvas = add_canvas("mount");
    let mut background =
        ParticleBackground::new("mount", Some(r#"{ "count": 24, "seed": 3 }"#.to_owned())).unwrap();
    assert!(background.is_running());
    assert_eq!(background.particle_count(), 24);
    assert_eq!(background.width(), canvas.width() as f64);

    background.resize(120.0, 90.0);
    assert_eq!(canvas.width(), 120);
    assert_eq!(background.height(), 90.0);
    assert_eq!(background.particle_count(), 24);

    background.stop();
    assert!(!background.is_running());
}

#[wasm_bindgen_test]
fn draws_on_a_real_canvas() {
    let canvas = add_canvas("direct");
    canvas.set_width(200);
    canvas.set_height(100);
    let mut ctx = canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into::<CanvasRenderingContext2d>()
        .unwrap();
    let mut field =
        ParticleField::with_seed(FieldConfig::default().with_size(200.0, 100.0), 8).unwrap();
    for _ in 0..5 {
        field.frame(&mut ctx);
    }
    assert_eq!(field.frames(), 5);
    assert_eq!(field.len(), 80);
}

#[wasm_bindgen_test]
async fn frames_advance_until_stopped() {
    add_canvas("lifecycle");
    let mut background =
        ParticleBackground::new("lifecycle", Some(r#"{ "count": 10, "seed": 1 }"#.to_owned()))
            .unwrap();

    sleep(250).await;
    let running = background.frames();
    assert!(running > 0.0);
    sleep(250).await;
    assert!(background.frames() > running);

    background.stop();
    let stopped_at = background.frames();
    sleep(250).await;
    assert_eq!(background.frames(), stopped_at);
    assert_eq!(background.particle_count(), 10);
}

#[wasm_bindgen_test]
fn window_resize_follows_viewport_until_stopped() {
    let window = web_sys::window().unwrap();
    let canvas = add_canvas("follow");
    let mut background = ParticleBackground::new("follow", None).unwrap();

    background.resize(64.0, 48.0);
    assert_eq!(background.width(), 64.0);
    fire_resize(&window);
    assert_eq!(background.width(), viewport_width(&window));
    assert_eq!(canvas.width() as f64, viewport_width(&window));

    background.stop();
    background.resize(64.0, 48.0);
    fire_resize(&window);
    assert_eq!(background.width(), 64.0);
    assert_eq!(background.height(), 48.0);
    assert_eq!(canvas.width(), 64);
}

#[wasm_bindgen_test]
fn dropped_background_ignores_window_resize() {
    let window = web_sys::window().unwrap();
    let canvas = add_canvas("dropped");
    let mut background = ParticleBackground::new("dropped", None).unwrap();
    background.resize(64.0, 48.0);
    drop(background);

    fire_resize(&window);
    assert_eq!(canvas.width(), 64);
    assert_eq!(canvas.height(), 48);
}
