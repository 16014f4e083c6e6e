// Frame loop for the particle field. Frames are scheduled with
// requestAnimationFrame until the returned handle is stopped or dropped.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Window};

use crate::field::ParticleField;
use crate::surface::DrawingSurface;
use crate::utils::Timer;

// Shared stop flag, checked before and after every frame.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

// Renders one frame unless `token` is cancelled. Returns whether another
// frame should be scheduled.
pub fn run_frame<S: DrawingSurface + ?Sized>(
    field: &mut ParticleField,
    surface: &mut S,
    token: &CancelToken,
) -> bool {
    if token.is_cancelled() {
        return false;
    }
    field.frame(surface);
    !token.is_cancelled()
}

type FrameCallback = Closure<dyn FnMut()>;

pub struct AnimationLoop;

impl AnimationLoop {
    pub fn start(
        window: Window,
        field: Rc<RefCell<ParticleField>>,
        mut ctx: CanvasRenderingContext2d,
    ) -> Result<AnimationHandle, JsValue> {
        let token = CancelToken::new();
        let profile = field.borrow().config().profile_frames;
        let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        // The closure only holds a weak reference to itself; the handle owns it
        let callback_weak: Weak<RefCell<Option<FrameCallback>>> = Rc::downgrade(&callback);
        let token_loop = token.clone();
        let frame_id_loop = frame_id.clone();
        let window_loop = window.clone();
        let frame_cb = Closure::wrap(Box::new(move || {
            let keep_going = {
                let _timer = if profile {
                    Some(Timer::new("ParticleField::frame"))
                } else {
                    None
                };
                let mut field = field.borrow_mut();
                run_frame(&mut field, &mut ctx, &token_loop)
            };
            frame_id_loop.set(None);
            if !keep_going {
                return;
            }
            let cell = match callback_weak.upgrade() {
                Some(cell) => cell,
                None => return,
            };
            let cb = cell.borrow();
            if let Some(cb) = cb.as_ref() {
                match window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => frame_id_loop.set(Some(id)),
                    Err(e) => error!("particle-field: failed to schedule frame: {:?}", e),
                }
            }
        }) as Box<dyn FnMut()>);

        let id = window.request_animation_frame(frame_cb.as_ref().unchecked_ref())?;
        frame_id.set(Some(id));
        *callback.borrow_mut() = Some(frame_cb);
        debug!("particle-field: animation started");

        Ok(AnimationHandle {
            token,
            frame_id,
            callback,
            window,
        })
    }
}

// Owns the running frame loop. Stopping cancels the pending frame request
// and releases the frame closure.
pub struct AnimationHandle {
    token: CancelToken,
    frame_id: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
    window: Window,
}

impl AnimationHandle {
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn stop(&mut self) {
        if self.token.is_cancelled() && self.callback.borrow().is_none() {
            return;
        }
        self.token.cancel();
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
        debug!("particle-field: animation stopped");
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::surface::RecordingSurface;

    fn field() -> ParticleField {
        ParticleField::with_seed(FieldConfig::default().with_size(320.0, 240.0), 11).unwrap()
    }

    #[test]
    fn runs_until_cancelled() {
        let mut field = field();
        let mut surface = RecordingSurface::new();
        let token = CancelToken::new();

        for _ in 0..10 {
            assert!(run_frame(&mut field, &mut surface, &token));
        }
        assert_eq!(field.frames(), 10);

        token.clone().cancel();
        assert!(token.is_cancelled());
        assert!(!run_frame(&mut field, &mut surface, &token));
        assert_eq!(field.frames(), 10);
    }

    #[test]
    fn cancelled_token_draws_nothing() {
        let mut field = field();
        let mut surface = RecordingSurface::new();
        let token = CancelToken::new();
        token.cancel();
        assert!(!run_frame(&mut field, &mut surface, &token));
        assert!(surface.commands.is_empty());
    }
}
