use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, PageTransitionEvent, Window};

use winter_core::canvas::{CanvasSizer, CanvasStyle};
use winter_core::game_registry::GameId;
use winter_core::selection::SelectionState;
use winter_core::shell::{Shell, ShellCommand, ShellEvent, select_game};

use crate::catalog;
use crate::diag::{console_error, console_warn};
use crate::source::AssetModuleSource;
use crate::surface::{CanvasStyleTarget, CanvasSurface};

const CANVAS_ID: &str = "game-canvas";
const BUTTON_SELECTOR: &str = ".game-button[data-game]";
const TUNING_BASE: &str = "games";

/// Reasons the page cannot start.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("no browser window")]
    NoWindow,
    #[error("#game-canvas not found; the game area cannot start")]
    MissingCanvas,
    #[error("canvas unusable: {0}")]
    Canvas(String),
    #[error("DOM error: {0}")]
    Dom(String),
}

fn dom_err(e: JsValue) -> BootError {
    BootError::Dom(format!("{e:?}"))
}

/// DOM handles and shared shell state captured by every callback.
#[derive(Clone)]
struct Page {
    document: Document,
    shell: Rc<RefCell<Shell<CanvasSurface>>>,
    source: Rc<AssetModuleSource>,
    style: Rc<RefCell<CanvasStyleTarget>>,
    container: Element,
}

impl Page {
    fn container_size(&self) -> (i32, i32) {
        (self.container.client_width(), self.container.client_height())
    }

    fn resize(&self) {
        let (width, height) = self.container_size();
        let commands = self
            .shell
            .borrow_mut()
            .dispatch(ShellEvent::ViewportResized { width, height });
        self.apply(commands);
    }

    fn select(&self, requested: String) {
        let page = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let commands = select_game(&*page.shell, page.source.as_ref(), &requested).await;
            page.apply(commands);
        });
    }

    fn apply(&self, commands: Vec<ShellCommand>) {
        for command in commands {
            match command {
                ShellCommand::MarkActive(_) | ShellCommand::RefreshSelection => {
                    sync_buttons(&self.document, self.shell.borrow().selection());
                },
                ShellCommand::ApplyCanvasSize(dims) => {
                    self.style.borrow_mut().set_display_size(dims);
                },
                ShellCommand::ReportError(e) => console_warn!("Game load failed: {e}"),
                // Fetches are resolved by `select_game` before commands get here.
                ShellCommand::FetchModule(_) => {},
            }
        }
    }
}

/// Wire the page: canvas sizing, selector buttons, unload and restore, then
/// load the first registered game.
pub fn boot() -> Result<(), BootError> {
    let window = web_sys::window().ok_or(BootError::NoWindow)?;
    let document = window.document().ok_or(BootError::NoWindow)?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or(BootError::MissingCanvas)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| BootError::MissingCanvas)?;
    let container = canvas
        .parent_element()
        .ok_or_else(|| BootError::Canvas("canvas has no container".into()))?;
    let surface = CanvasSurface::new(canvas.clone()).map_err(BootError::Canvas)?;

    let registry = catalog::create_registry();
    let first_game = registry.ids().next();
    let page = Page {
        document: document.clone(),
        shell: Rc::new(RefCell::new(Shell::new(
            registry,
            CanvasSizer::default(),
            surface,
        ))),
        source: Rc::new(AssetModuleSource::new(TUNING_BASE)),
        style: Rc::new(RefCell::new(CanvasStyleTarget(canvas))),
        container,
    };

    sync_buttons(&document, page.shell.borrow().selection());
    wire_buttons(&page)?;
    wire_window(&window, &page, first_game)?;
    page.resize();

    if let Some(game) = first_game {
        page.select(game.to_string());
    }
    Ok(())
}

fn wire_buttons(page: &Page) -> Result<(), BootError> {
    let buttons = page
        .document
        .query_selector_all(BUTTON_SELECTOR)
        .map_err(dom_err)?;
    for i in 0..buttons.length() {
        let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let Some(game) = button.get_attribute("data-game") else {
            continue;
        };
        let click_page = page.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || click_page.select(game.clone()));
        button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        on_click.forget();
    }
    Ok(())
}

fn wire_window(window: &Window, page: &Page, first_game: Option<GameId>) -> Result<(), BootError> {
    let resize_page = page.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || resize_page.resize());
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_resize.forget();

    let unload_page = page.clone();
    let on_unload = Closure::<dyn FnMut()>::new(move || {
        let commands = unload_page.shell.borrow_mut().dispatch(ShellEvent::Unload);
        unload_page.apply(commands);
    });
    window
        .add_event_listener_with_callback("pagehide", on_unload.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_unload.forget();

    // A page restored from the back/forward cache skips boot, so the game
    // torn down on pagehide has to be brought back here.
    let Some(game) = first_game else {
        return Ok(());
    };
    let restore_page = page.clone();
    let on_restore = Closure::<dyn FnMut(PageTransitionEvent)>::new(move |evt: PageTransitionEvent| {
        if evt.persisted() {
            restore_page.select(game.to_string());
        }
    });
    window
        .add_event_listener_with_callback("pageshow", on_restore.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_restore.forget();
    Ok(())
}

/// Make the `active` class match the shell's selection.
fn sync_buttons(document: &Document, selection: &SelectionState) {
    let Ok(buttons) = document.query_selector_all(BUTTON_SELECTOR) else {
        return;
    };
    for i in 0..buttons.length() {
        let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let active = button
            .get_attribute("data-game")
            .and_then(|token| token.parse::<GameId>().ok())
            .is_some_and(|id| selection.is_active(id));
        let _ = button.class_list().toggle_with_force("active", active);
    }
}

/// Replace the game area with a visible error so a broken page is obvious.
pub fn show_fatal(message: &str) {
    console_error!("{message}");
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(notice) = document.create_element("p") else {
        return;
    };
    notice.set_class_name("fatal-error");
    notice.set_text_content(Some(message));
    if let Some(body) = document.body() {
        let _ = body.append_child(&notice);
    }
}
