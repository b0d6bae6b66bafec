use futures::future::LocalBoxFuture;

use crate::error::LoadError;
use crate::game_registry::GameId;

/// A fetched game, ready to be started on a drawing surface `S`.
pub trait GameModule<S> {
    fn game(&self) -> GameId;

    /// Start the game. The returned handle owns `surface` until teardown.
    fn init(self: Box<Self>, surface: S) -> Box<dyn GameHandle<S>>;
}

/// A running game instance.
pub trait GameHandle<S> {
    fn game(&self) -> GameId;

    /// Stop the game: release input listeners, cancel the frame loop, and hand
    /// the drawing surface back. Must be complete when this returns.
    fn teardown(self: Box<Self>) -> S;
}

pub type BoxedModule<S> = Box<dyn GameModule<S>>;

/// Where game modules come from. Fetching may suspend (network, asset
/// decoding); the loader never holds state borrowed across the await.
pub trait ModuleSource<S> {
    fn fetch(&self, game: GameId) -> LocalBoxFuture<'_, Result<BoxedModule<S>, LoadError>>;
}
