use crate::game_registry::{GameId, GameRegistry};

/// Which selector button is marked active. At most one is, and once a game
/// has mounted exactly one is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    buttons: Vec<GameId>,
    active: Option<GameId>,
}

impl SelectionState {
    pub fn new(registry: &GameRegistry) -> Self {
        Self {
            buttons: registry.ids().collect(),
            active: None,
        }
    }

    pub fn active(&self) -> Option<GameId> {
        self.active
    }

    pub fn is_active(&self, id: GameId) -> bool {
        self.active == Some(id)
    }

    pub fn buttons(&self) -> &[GameId] {
        &self.buttons
    }

    /// Each button paired with its active flag, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (GameId, bool)> + '_ {
        self.buttons.iter().map(|&id| (id, self.is_active(id)))
    }

    /// Mark `id` active and every sibling inactive. Ids without a button are
    /// ignored.
    pub(crate) fn activate(&mut self, id: GameId) {
        if self.buttons.contains(&id) {
            self.active = Some(id);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.active = None;
    }
}
