use winter_core::error::LoadError;
#[cfg(any(feature = "blocks", feature = "snake"))]
use winter_core::game_registry::GameEntry;
use winter_core::game_registry::{GameId, GameRegistry};
use winter_core::game_trait::CanvasGame;

type Builder = fn(&str, u64) -> Result<Box<dyn CanvasGame>, String>;

/// Registry of the games compiled into this client.
pub fn create_registry() -> GameRegistry {
    let compiled = [
        #[cfg(feature = "blocks")]
        GameEntry::new(
            GameId::Blocks,
            "Stack falling blocks and clear full lines",
        ),
        #[cfg(feature = "snake")]
        GameEntry::new(GameId::Snake, "Eat, grow, and stay off the walls"),
    ];
    let mut registry = GameRegistry::default();
    for entry in compiled {
        registry.register(entry);
    }
    registry
}

/// Build a fresh game instance from its TOML tuning file.
pub fn build_game(game: GameId, tuning: &str, seed: u64) -> Result<Box<dyn CanvasGame>, LoadError> {
    let build = builder(game).ok_or_else(|| LoadError::UnknownGame(game.to_string()))?;
    build(tuning, seed).map_err(|e| LoadError::fetch(game, format!("bad tuning: {e}")))
}

fn builder(game: GameId) -> Option<Builder> {
    match game {
        #[cfg(feature = "blocks")]
        GameId::Blocks => Some(build_blocks as Builder),
        #[cfg(feature = "snake")]
        GameId::Snake => Some(build_snake as Builder),
        #[cfg(not(all(feature = "blocks", feature = "snake")))]
        _ => None,
    }
}

#[cfg(feature = "blocks")]
fn build_blocks(tuning: &str, seed: u64) -> Result<Box<dyn CanvasGame>, String> {
    let config = winter_blocks::BlocksConfig::from_toml_str(tuning).map_err(|e| e.to_string())?;
    Ok(Box::new(winter_blocks::BlocksGame::new(config, seed)))
}

#[cfg(feature = "snake")]
fn build_snake(tuning: &str, seed: u64) -> Result<Box<dyn CanvasGame>, String> {
    let config = winter_snake::SnakeConfig::from_toml_str(tuning).map_err(|e| e.to_string())?;
    Ok(Box::new(winter_snake::SnakeGame::new(config, seed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_enabled_games() {
        let registry = create_registry();
        assert!(registry.contains(GameId::Blocks));
        assert!(registry.contains(GameId::Snake));
    }

    #[test]
    fn builds_each_game_with_default_tuning() {
        for id in GameId::ALL {
            let game = build_game(id, "", 1).unwrap();
            assert_eq!(game.score(), 0);
            assert!(!game.is_game_over());
        }
    }

    #[test]
    fn every_enabled_game_has_a_builder() {
        let registry = create_registry();
        for id in registry.ids() {
            assert!(builder(id).is_some(), "{id} registered without a builder");
        }
    }

    #[test]
    fn malformed_tuning_is_a_fetch_error() {
        let err = build_game(GameId::Snake, "tile_count = \"many\"", 1)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            LoadError::Fetch {
                game: GameId::Snake,
                ..
            }
        ));
    }
}
