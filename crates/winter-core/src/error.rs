use crate::game_registry::GameId;

/// Why a game could not be mounted on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The requested identifier is not in the registry.
    #[error("unknown game: {0:?}")]
    UnknownGame(String),
    /// The module for a registered game could not be fetched or decoded.
    #[error("failed to load {game}: {reason}")]
    Fetch { game: GameId, reason: String },
    /// A newer load request was issued before this one finished.
    #[error("load of {0} was superseded by a newer request")]
    Superseded(GameId),
    /// The drawing surface was lost, so nothing can be mounted.
    #[error("no drawing surface available for {0}")]
    SurfaceUnavailable(GameId),
}

impl LoadError {
    pub fn fetch(game: GameId, reason: impl Into<String>) -> Self {
        Self::Fetch {
            game,
            reason: reason.into(),
        }
    }

    /// Superseded loads are expected under rapid clicking and are not worth
    /// surfacing to the user.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LoadError::UnknownGame("pong".into()).to_string(),
            "unknown game: \"pong\""
        );
        assert_eq!(
            LoadError::fetch(GameId::Snake, "404 Not Found").to_string(),
            "failed to load snake: 404 Not Found"
        );
        assert!(LoadError::Superseded(GameId::Blocks).is_superseded());
        assert!(!LoadError::UnknownGame(String::new()).is_superseded());
        assert_eq!(
            LoadError::SurfaceUnavailable(GameId::Blocks).to_string(),
            "no drawing surface available for blocks"
        );
    }
}
