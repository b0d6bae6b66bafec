use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Identifier for a game that can be mounted on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameId {
    Blocks,
    Snake,
}

impl GameId {
    pub const ALL: [GameId; 2] = [GameId::Blocks, GameId::Snake];

    /// Token used in URLs, `data-game` attributes and asset paths.
    pub fn as_str(self) -> &'static str {
        match self {
            GameId::Blocks => "blocks",
            GameId::Snake => "snake",
        }
    }

    /// Button label shown in the title bar.
    pub fn label(self) -> &'static str {
        match self {
            GameId::Blocks => "Blocks",
            GameId::Snake => "Snake",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameId {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| LoadError::UnknownGame(s.to_string()))
    }
}

/// A registered game entry in the game catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameEntry {
    pub id: GameId,
    pub label: String,
    pub description: String,
}

impl GameEntry {
    pub fn new(id: GameId, description: impl Into<String>) -> Self {
        Self {
            id,
            label: id.label().to_string(),
            description: description.into(),
        }
    }
}

/// Ordered set of games the page offers. Button order follows registration
/// order; registering the same id twice keeps the first entry.
#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    entries: Vec<GameEntry>,
}

impl GameRegistry {
    /// Registry with every built-in game.
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.register(GameEntry::new(
            GameId::Blocks,
            "Stack falling blocks and clear full lines",
        ));
        registry.register(GameEntry::new(
            GameId::Snake,
            "Eat, grow, and stay off the walls",
        ));
        registry
    }

    pub fn register(&mut self, entry: GameEntry) {
        if self.contains(entry.id) {
            tracing::warn!(game = %entry.id, "game registered twice, keeping first entry");
            return;
        }
        self.entries.push(entry);
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Resolve a raw token to a registered game.
    pub fn resolve(&self, requested: &str) -> Result<GameId, LoadError> {
        let id: GameId = requested.parse()?;
        if self.contains(id) {
            Ok(id)
        } else {
            Err(LoadError::UnknownGame(requested.to_string()))
        }
    }

    pub fn get(&self, id: GameId) -> Option<&GameEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = GameId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tokens() {
        assert_eq!("blocks".parse::<GameId>(), Ok(GameId::Blocks));
        assert_eq!("snake".parse::<GameId>(), Ok(GameId::Snake));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            "Snake".parse::<GameId>(),
            Err(LoadError::UnknownGame("Snake".into()))
        );
    }

    #[test]
    fn serde_uses_lowercase_tokens() {
        let json = serde_json::to_string(&GameId::Blocks).unwrap();
        assert_eq!(json, "\"blocks\"");
        let back: GameId = serde_json::from_str("\"snake\"").unwrap();
        assert_eq!(back, GameId::Snake);
    }

    #[test]
    fn defaults_in_registration_order() {
        let registry = GameRegistry::with_defaults();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec![GameId::Blocks, GameId::Snake]);
        assert_eq!(registry.get(GameId::Snake).unwrap().label, "Snake");
    }

    #[test]
    fn resolve_rejects_unregistered_game() {
        let mut registry = GameRegistry::default();
        registry.register(GameEntry::new(GameId::Blocks, ""));
        assert_eq!(registry.resolve("blocks"), Ok(GameId::Blocks));
        assert_eq!(
            registry.resolve("snake"),
            Err(LoadError::UnknownGame("snake".into()))
        );
        assert_eq!(
            registry.resolve("tetris"),
            Err(LoadError::UnknownGame("tetris".into()))
        );
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut registry = GameRegistry::default();
        registry.register(GameEntry::new(GameId::Snake, "first"));
        registry.register(GameEntry::new(GameId::Snake, "second"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(GameId::Snake).unwrap().description, "first");
    }
}
