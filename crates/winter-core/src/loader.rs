use std::cell::RefCell;

use crate::error::LoadError;
use crate::game_registry::{GameId, GameRegistry};
use crate::module::{BoxedModule, GameHandle, ModuleSource};
use crate::selection::SelectionState;

/// Proof that a load was requested. Only the most recently issued ticket can
/// mount its game; completing an older one reports [`LoadError::Superseded`].
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    game: GameId,
    generation: u64,
}

impl LoadTicket {
    pub fn game(&self) -> GameId {
        self.game
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Who currently owns the drawing surface.
enum Mount<S> {
    Idle(S),
    Active(Box<dyn GameHandle<S>>),
}

/// Owns the one active game and the drawing surface it renders to.
///
/// Switching games is a two-step protocol so the module fetch can suspend in
/// between: [`begin_load`](Self::begin_load) validates and issues a ticket,
/// [`complete_load`](Self::complete_load) mounts the fetched module if the
/// ticket is still current. The surface moves by value from the old handle's
/// `teardown` into the new module's `init`, so two games never draw at once.
pub struct GameLoader<S> {
    registry: GameRegistry,
    selection: SelectionState,
    mount: Option<Mount<S>>,
    generation: u64,
}

impl<S> GameLoader<S> {
    pub fn new(registry: GameRegistry, surface: S) -> Self {
        let selection = SelectionState::new(&registry);
        Self {
            registry,
            selection,
            mount: Some(Mount::Idle(surface)),
            generation: 0,
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Game whose handle is currently mounted.
    pub fn active_game(&self) -> Option<GameId> {
        match &self.mount {
            Some(Mount::Active(handle)) => Some(handle.game()),
            _ => None,
        }
    }

    /// Whether `ticket` would still mount if completed now.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Validate `requested` and supersede any load in flight. Unknown games
    /// are rejected without touching state.
    pub fn begin_load(&mut self, requested: &str) -> Result<LoadTicket, LoadError> {
        let game = match self.registry.resolve(requested) {
            Ok(game) => game,
            Err(e) => {
                tracing::warn!(requested, error = %e, "rejected game selection");
                return Err(e);
            },
        };
        self.generation += 1;
        tracing::debug!(%game, generation = self.generation, "load requested");
        Ok(LoadTicket {
            game,
            generation: self.generation,
        })
    }

    /// Finish a load started by [`begin_load`](Self::begin_load).
    ///
    /// On a fetch failure the previous game stays mounted and the selection is
    /// unchanged. On success the previous handle is torn down before the new
    /// module is initialised.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<BoxedModule<S>, LoadError>,
    ) -> Result<GameId, LoadError> {
        if !self.is_current(&ticket) {
            tracing::debug!(
                game = %ticket.game,
                generation = ticket.generation,
                latest = self.generation,
                "discarding superseded load"
            );
            return Err(LoadError::Superseded(ticket.game));
        }

        let module = match fetched {
            Ok(module) if module.game() == ticket.game => module,
            Ok(module) => {
                let e = LoadError::fetch(
                    ticket.game,
                    format!("source returned module for {}", module.game()),
                );
                tracing::warn!(game = %ticket.game, error = %e, "game failed to load");
                return Err(e);
            },
            Err(e) => {
                tracing::warn!(game = %ticket.game, error = %e, "game failed to load");
                return Err(e);
            },
        };

        let Some(surface) = self.release_surface() else {
            self.selection.clear();
            return Err(LoadError::SurfaceUnavailable(ticket.game));
        };
        let handle = module.init(surface);
        self.mount = Some(Mount::Active(handle));
        self.selection.activate(ticket.game);
        tracing::info!(game = %ticket.game, "game mounted");
        Ok(ticket.game)
    }

    /// Tear down the active game (page unload). Any in-flight load is
    /// superseded so it cannot mount afterwards.
    pub fn unload(&mut self) -> Option<GameId> {
        self.generation += 1;
        let previous = self.active_game();
        if previous.is_some() {
            if let Some(surface) = self.release_surface() {
                self.mount = Some(Mount::Idle(surface));
            }
            self.selection.clear();
            tracing::info!(game = ?previous, "game unloaded");
        }
        previous
    }

    /// Take the surface back, running the active handle's teardown first.
    fn release_surface(&mut self) -> Option<S> {
        match self.mount.take() {
            Some(Mount::Idle(surface)) => Some(surface),
            Some(Mount::Active(handle)) => {
                let game = handle.game();
                let surface = handle.teardown();
                tracing::debug!(%game, "game torn down");
                Some(surface)
            },
            None => {
                tracing::error!("drawing surface is missing, no game can be mounted");
                None
            },
        }
    }
}

/// Request `requested`, fetch its module from `source`, and mount it unless a
/// newer request was issued while the fetch was suspended.
pub async fn load_game<S, M>(
    loader: &RefCell<GameLoader<S>>,
    source: &M,
    requested: &str,
) -> Result<GameId, LoadError>
where
    M: ModuleSource<S> + ?Sized,
{
    let ticket = loader.borrow_mut().begin_load(requested)?;
    let fetched = source.fetch(ticket.game()).await;
    loader.borrow_mut().complete_load(ticket, fetched)
}
