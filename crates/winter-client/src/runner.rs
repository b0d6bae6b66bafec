use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use winter_core::game_registry::GameId;
use winter_core::game_trait::{CanvasGame, Key};
use winter_core::module::{GameHandle, GameModule};

use crate::diag::console_warn;
use crate::surface::CanvasSurface;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A fetched, not yet started game.
pub struct PlayableModule {
    game: GameId,
    instance: Box<dyn CanvasGame>,
}

impl PlayableModule {
    pub fn new(game: GameId, instance: Box<dyn CanvasGame>) -> Self {
        Self { game, instance }
    }
}

impl GameModule<CanvasSurface> for PlayableModule {
    fn game(&self) -> GameId {
        self.game
    }

    fn init(self: Box<Self>, surface: CanvasSurface) -> Box<dyn GameHandle<CanvasSurface>> {
        Box::new(RunningGame::start(self.game, self.instance, surface))
    }
}

/// State touched by the frame and key callbacks.
struct FrameLoop {
    game: Box<dyn CanvasGame>,
    surface: CanvasSurface,
    running: bool,
    last_timestamp: Option<f64>,
    frame_id: Option<i32>,
}

impl FrameLoop {
    fn advance(&mut self, timestamp: f64) {
        let dt = self.last_timestamp.map_or(0.0, |last| timestamp - last);
        self.last_timestamp = Some(timestamp);
        self.game.update(dt);
        self.game.draw(&mut self.surface);
    }
}

/// A game running on `requestAnimationFrame` with a document-level keydown
/// listener. Dropping the callbacks in `teardown` breaks the frame loop's
/// self-reference and hands the surface back.
pub struct RunningGame {
    game: GameId,
    state: Rc<RefCell<FrameLoop>>,
    frame: FrameCallback,
    on_key: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl RunningGame {
    fn start(game: GameId, instance: Box<dyn CanvasGame>, surface: CanvasSurface) -> Self {
        let state = Rc::new(RefCell::new(FrameLoop {
            game: instance,
            surface,
            running: true,
            last_timestamp: None,
            frame_id: None,
        }));

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let frame_again = Rc::clone(&frame);
        let frame_state = Rc::clone(&state);
        *frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let mut frame_loop = frame_state.borrow_mut();
            if !frame_loop.running {
                return;
            }
            frame_loop.advance(timestamp);
            frame_loop.frame_id = frame_again
                .borrow()
                .as_ref()
                .and_then(request_animation_frame);
        }));
        state.borrow_mut().frame_id = frame.borrow().as_ref().and_then(request_animation_frame);

        let key_state = Rc::clone(&state);
        let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |evt: KeyboardEvent| {
            let key = Key::from_dom_key(&evt.key());
            if key_state.borrow_mut().game.key_down(key) {
                evt.prevent_default();
            }
        });
        let on_key = match web_sys::window().and_then(|w| w.document()) {
            Some(document) => {
                if let Err(e) = document
                    .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
                {
                    console_warn!("{game}: keydown listener not attached: {e:?}");
                }
                Some(on_key)
            },
            None => None,
        };

        crate::diag::console_log!("Loading game: {game}");
        Self {
            game,
            state,
            frame,
            on_key,
        }
    }
}

impl GameHandle<CanvasSurface> for RunningGame {
    fn game(&self) -> GameId {
        self.game
    }

    fn teardown(self: Box<Self>) -> CanvasSurface {
        let RunningGame {
            game,
            state,
            frame,
            on_key,
        } = *self;

        if let Some(on_key) = &on_key
            && let Some(document) = web_sys::window().and_then(|w| w.document())
        {
            let _ = document
                .remove_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref());
        }
        drop(on_key);

        {
            let mut frame_loop = state.borrow_mut();
            frame_loop.running = false;
            if let Some(id) = frame_loop.frame_id.take()
                && let Some(window) = web_sys::window()
            {
                let _ = window.cancel_animation_frame(id);
            }
        }
        frame.borrow_mut().take();

        // With both callbacks dropped the frame loop has a single owner again.
        match Rc::try_unwrap(state) {
            Ok(frame_loop) => frame_loop.into_inner().surface,
            Err(shared) => {
                console_warn!("{game}: frame loop still referenced after teardown");
                shared.borrow().surface.reacquire()
            },
        }
    }
}

fn request_animation_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}
