use std::cell::RefCell;

use crate::canvas::{CanvasDimensions, CanvasSizer, ContainerSize};
use crate::error::LoadError;
use crate::game_registry::{GameId, GameRegistry};
use crate::loader::{GameLoader, LoadTicket};
use crate::module::{BoxedModule, ModuleSource};
use crate::selection::SelectionState;

/// Everything the page can ask the shell to do.
pub enum ShellEvent<S> {
    /// A selector button was clicked.
    SelectGame(String),
    /// A module fetch requested by [`ShellCommand::FetchModule`] finished.
    ModuleReady {
        ticket: LoadTicket,
        result: Result<BoxedModule<S>, LoadError>,
    },
    /// The canvas container now has this inner size.
    ViewportResized { width: i32, height: i32 },
    /// The page is going away.
    Unload,
}

/// Side effects the DOM layer must carry out after a dispatch.
#[derive(Debug, PartialEq)]
pub enum ShellCommand {
    FetchModule(LoadTicket),
    /// Refresh button classes from [`Shell::selection`].
    MarkActive(GameId),
    /// Selection changed without a new game mounting; refresh button classes.
    RefreshSelection,
    ApplyCanvasSize(CanvasDimensions),
    ReportError(LoadError),
}

/// Page state: the game loader plus the last applied canvas size.
pub struct Shell<S> {
    loader: GameLoader<S>,
    sizer: CanvasSizer,
    dimensions: Option<CanvasDimensions>,
}

impl<S> Shell<S> {
    pub fn new(registry: GameRegistry, sizer: CanvasSizer, surface: S) -> Self {
        Self {
            loader: GameLoader::new(registry, surface),
            sizer,
            dimensions: None,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        self.loader.selection()
    }

    pub fn active_game(&self) -> Option<GameId> {
        self.loader.active_game()
    }

    pub fn dimensions(&self) -> Option<CanvasDimensions> {
        self.dimensions
    }

    pub fn registry(&self) -> &GameRegistry {
        self.loader.registry()
    }

    pub fn dispatch(&mut self, event: ShellEvent<S>) -> Vec<ShellCommand> {
        match event {
            ShellEvent::SelectGame(requested) => match self.loader.begin_load(&requested) {
                Ok(ticket) => vec![ShellCommand::FetchModule(ticket)],
                Err(e) => vec![ShellCommand::ReportError(e)],
            },
            ShellEvent::ModuleReady { ticket, result } => {
                match self.loader.complete_load(ticket, result) {
                    Ok(game) => vec![ShellCommand::MarkActive(game)],
                    Err(e) if e.is_superseded() => Vec::new(),
                    Err(e) => vec![ShellCommand::ReportError(e)],
                }
            },
            ShellEvent::ViewportResized { width, height } => {
                let dims = self.sizer.resize(ContainerSize::new(width, height));
                self.dimensions = Some(dims);
                vec![ShellCommand::ApplyCanvasSize(dims)]
            },
            ShellEvent::Unload => match self.loader.unload() {
                Some(_) => vec![ShellCommand::RefreshSelection],
                None => Vec::new(),
            },
        }
    }
}

/// Run a full selection: dispatch the click, fetch the module if the shell
/// asks for one, and dispatch the result. Returns every command the DOM layer
/// still has to apply. The shell is never borrowed across the fetch.
pub async fn select_game<S, M>(
    shell: &RefCell<Shell<S>>,
    source: &M,
    requested: &str,
) -> Vec<ShellCommand>
where
    M: ModuleSource<S> + ?Sized,
{
    let commands = shell
        .borrow_mut()
        .dispatch(ShellEvent::SelectGame(requested.to_string()));

    let mut pending = Vec::new();
    for command in commands {
        match command {
            ShellCommand::FetchModule(ticket) => {
                let result = source.fetch(ticket.game()).await;
                pending.extend(
                    shell
                        .borrow_mut()
                        .dispatch(ShellEvent::ModuleReady { ticket, result }),
                );
            },
            other => pending.push(other),
        }
    }
    pending
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use futures::future::LocalBoxFuture;

    use super::*;
    use crate::module::{GameHandle, GameModule};

    struct Surface;

    struct Stub(GameId);

    impl GameModule<Surface> for Stub {
        fn game(&self) -> GameId {
            self.0
        }

        fn init(self: Box<Self>, surface: Surface) -> Box<dyn GameHandle<Surface>> {
            Box::new(Running(self.0, surface))
        }
    }

    struct Running(GameId, Surface);

    impl GameHandle<Surface> for Running {
        fn game(&self) -> GameId {
            self.0
        }

        fn teardown(self: Box<Self>) -> Surface {
            self.1
        }
    }

    struct ReadySource {
        broken: Option<GameId>,
    }

    impl ModuleSource<Surface> for ReadySource {
        fn fetch(&self, game: GameId) -> LocalBoxFuture<'_, Result<BoxedModule<Surface>, LoadError>> {
            let result: Result<BoxedModule<Surface>, LoadError> = if self.broken == Some(game) {
                Err(LoadError::fetch(game, "missing"))
            } else {
                Ok(Box::new(Stub(game)))
            };
            Box::pin(futures::future::ready(result))
        }
    }

    fn new_shell() -> Shell<Surface> {
        Shell::new(GameRegistry::with_defaults(), CanvasSizer::default(), Surface)
    }

    #[test]
    fn select_then_ready_marks_active() {
        let mut shell = new_shell();
        let mut commands = shell.dispatch(ShellEvent::SelectGame("snake".into()));
        let Some(ShellCommand::FetchModule(ticket)) = commands.pop() else {
            panic!("expected a fetch command");
        };
        assert_eq!(ticket.game(), GameId::Snake);

        let commands = shell.dispatch(ShellEvent::ModuleReady {
            ticket,
            result: Ok(Box::new(Stub(GameId::Snake))),
        });
        assert_eq!(commands, vec![ShellCommand::MarkActive(GameId::Snake)]);
        assert_eq!(shell.selection().active(), Some(GameId::Snake));
    }

    #[test]
    fn unknown_selection_reports_error() {
        let mut shell = new_shell();
        let commands = shell.dispatch(ShellEvent::SelectGame("chess".into()));
        assert_eq!(
            commands,
            vec![ShellCommand::ReportError(LoadError::UnknownGame(
                "chess".into()
            ))]
        );
        assert_eq!(shell.active_game(), None);
    }

    #[test]
    fn superseded_ready_is_silent() {
        let mut shell = new_shell();
        let Some(ShellCommand::FetchModule(first)) = shell
            .dispatch(ShellEvent::SelectGame("blocks".into()))
            .pop()
        else {
            panic!("expected a fetch command");
        };
        let _second = shell.dispatch(ShellEvent::SelectGame("snake".into()));
        let commands = shell.dispatch(ShellEvent::ModuleReady {
            ticket: first,
            result: Ok(Box::new(Stub(GameId::Blocks))),
        });
        assert!(commands.is_empty());
        assert_eq!(shell.active_game(), None);
    }

    #[test]
    fn viewport_resize_applies_clamped_size() {
        let mut shell = new_shell();
        let commands = shell.dispatch(ShellEvent::ViewportResized {
            width: 1000,
            height: 700,
        });
        let expected = CanvasDimensions {
            width: 960,
            height: 660,
        };
        assert_eq!(commands, vec![ShellCommand::ApplyCanvasSize(expected)]);
        assert_eq!(shell.dimensions(), Some(expected));
    }

    #[test]
    fn unload_clears_active_game() {
        let shell = RefCell::new(new_shell());
        let source = ReadySource { broken: None };
        block_on(select_game(&shell, &source, "blocks"));
        let commands = shell.borrow_mut().dispatch(ShellEvent::Unload);
        assert_eq!(commands, vec![ShellCommand::RefreshSelection]);
        assert_eq!(shell.borrow().active_game(), None);
        assert_eq!(shell.borrow().selection().active(), None);
        assert!(shell.borrow().selection().iter().all(|(_, active)| !active));
    }

    #[test]
    fn unload_when_idle_needs_no_refresh() {
        let mut shell = new_shell();
        assert!(shell.dispatch(ShellEvent::Unload).is_empty());
    }

    #[test]
    fn reselect_after_unload_marks_active_again() {
        let shell = RefCell::new(new_shell());
        let source = ReadySource { broken: None };
        block_on(select_game(&shell, &source, "snake"));
        shell.borrow_mut().dispatch(ShellEvent::Unload);

        let commands = block_on(select_game(&shell, &source, "blocks"));
        assert_eq!(commands, vec![ShellCommand::MarkActive(GameId::Blocks)]);
        assert_eq!(shell.borrow().selection().active(), Some(GameId::Blocks));
    }

    #[test]
    fn select_game_runs_full_cycle() {
        let shell = RefCell::new(new_shell());
        let source = ReadySource { broken: None };
        let commands = block_on(select_game(&shell, &source, "blocks"));
        assert_eq!(commands, vec![ShellCommand::MarkActive(GameId::Blocks)]);
        assert_eq!(shell.borrow().active_game(), Some(GameId::Blocks));
    }

    #[test]
    fn select_game_failure_keeps_previous() {
        let shell = RefCell::new(new_shell());
        let source = ReadySource {
            broken: Some(GameId::Snake),
        };
        block_on(select_game(&shell, &source, "blocks"));
        let commands = block_on(select_game(&shell, &source, "snake"));
        assert_eq!(
            commands,
            vec![ShellCommand::ReportError(LoadError::fetch(
                GameId::Snake,
                "missing"
            ))]
        );
        assert_eq!(shell.borrow().selection().active(), Some(GameId::Blocks));
    }
}
