// Reserved-key registry used to validate custom key bindings across both players

use thiserror::Error;

use crate::game::Player;

/// Keys the frontend keeps for itself (menu, quit)
pub const RESERVED_KEYS: &[&str] = &["Escape", "q", "Q", " "];

/// Multi-character key identifiers that may be bound
pub const NAMED_KEYS: &[&str] = &[
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "Home",
    "End",
    "PageUp",
    "PageDown",
    "Insert",
    "Delete",
    "Backspace",
    "Tab",
    "Enter",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyBindingError {
    #[error("'{key}' is not a bindable key")]
    InvalidName { key: String },

    #[error("'{key}' is reserved")]
    Reserved { key: String },

    #[error("'{key}' is already bound by {}", .player.label())]
    AlreadyBound { key: String, player: Player },
}

/// True if `key` matches the allowed identifier pattern: one printable,
/// non-whitespace character, or one of the named keys.
pub fn is_valid_key_name(key: &str) -> bool {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !c.is_control() && !c.is_whitespace(),
        _ => NAMED_KEYS.contains(&key),
    }
}

/// Every key currently bound, per player
///
/// Owned by the configuration layer and passed into validation explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRegistry {
    bindings: [Vec<String>; 2],
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all keys recorded for `player`
    pub fn reserve(&mut self, player: Player, keys: impl IntoIterator<Item = String>) {
        self.bindings[player.index()] = keys.into_iter().collect();
    }

    pub fn release(&mut self, player: Player) {
        self.bindings[player.index()].clear();
    }

    pub fn bindings(&self, player: Player) -> &[String] {
        &self.bindings[player.index()]
    }

    /// Which player, if any, has `key` bound
    pub fn owner(&self, key: &str) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|p| self.bindings[p.index()].iter().any(|k| k == key))
    }

    /// Check whether `key` may be bound, optionally in place of `replacing`.
    /// Keys held by either player are taken, including the caller's own.
    pub fn validate(&self, key: &str, replacing: Option<&str>) -> Result<(), KeyBindingError> {
        if RESERVED_KEYS.contains(&key) {
            return Err(KeyBindingError::Reserved {
                key: key.to_string(),
            });
        }
        if !is_valid_key_name(key) {
            return Err(KeyBindingError::InvalidName {
                key: key.to_string(),
            });
        }
        if replacing == Some(key) {
            return Ok(());
        }
        match self.owner(key) {
            Some(owner) => Err(KeyBindingError::AlreadyBound {
                key: key.to_string(),
                player: owner,
            }),
            None => Ok(()),
        }
    }

    /// Validate a whole key setting for `player` against the other player's
    /// bindings. Duplicates inside the setting are rejected too.
    pub fn validate_setting(
        &self,
        player: Player,
        up_keys: &[String],
        down_keys: &[String],
    ) -> Result<(), KeyBindingError> {
        let mut others = self.clone();
        others.release(player);

        let mut seen: Vec<&String> = Vec::new();
        for key in up_keys.iter().chain(down_keys) {
            others.validate(key, None)?;
            if seen.contains(&key) {
                return Err(KeyBindingError::AlreadyBound {
                    key: key.clone(),
                    player,
                });
            }
            seen.push(key);
        }
        Ok(())
    }
}
