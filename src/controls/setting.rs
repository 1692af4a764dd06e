// Configuration-time controller settings

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ai::Difficulty;
use crate::game::Player;

/// The settings a controller is built from
///
/// Stored by shape, not by tag: a table with `up_keys`/`down_keys` is a key
/// setting, a table with `difficulty` is an AI setting, and anything else
/// (including an empty table) selects pointer controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ControlSetting {
    Keys {
        up_keys: Vec<String>,
        down_keys: Vec<String>,
    },
    Ai {
        difficulty: Difficulty,
    },
    Pointer {},
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSetting {
    // Tried in order: a table with a difficulty is an AI even if it also has keys
    Ai {
        difficulty: Difficulty,
    },
    Keys {
        up_keys: Vec<String>,
        down_keys: Vec<String>,
    },
    Unrecognized(IgnoredAny),
}

impl From<RawSetting> for ControlSetting {
    fn from(raw: RawSetting) -> Self {
        match raw {
            RawSetting::Keys { up_keys, down_keys } => ControlSetting::Keys { up_keys, down_keys },
            RawSetting::Ai { difficulty } => ControlSetting::Ai { difficulty },
            RawSetting::Unrecognized(_) => ControlSetting::Pointer {},
        }
    }
}

impl<'de> Deserialize<'de> for ControlSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawSetting::deserialize(deserializer).map(ControlSetting::from)
    }
}

impl ControlSetting {
    pub fn pointer() -> Self {
        ControlSetting::Pointer {}
    }

    pub fn ai(difficulty: Difficulty) -> Self {
        ControlSetting::Ai { difficulty }
    }

    /// Default key bindings for each player
    pub fn default_keys(player: Player) -> Self {
        let (up, down): (&[&str], &[&str]) = match player {
            Player::P1 => (&["w", "a"], &["s", "d"]),
            Player::P2 => (&["ArrowLeft", "ArrowUp"], &["ArrowDown", "ArrowRight"]),
        };
        ControlSetting::Keys {
            up_keys: up.iter().map(|k| k.to_string()).collect(),
            down_keys: down.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Default assignment: AI on the left, keyboard on the right
    pub fn default_for(player: Player) -> Self {
        match player {
            Player::P1 => ControlSetting::ai(Difficulty::Easy),
            Player::P2 => ControlSetting::default_keys(Player::P2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Wrapper {
        setting: ControlSetting,
    }

    fn parse(toml_str: &str) -> ControlSetting {
        toml::from_str::<Wrapper>(toml_str).unwrap().setting
    }

    #[test]
    fn test_recognizes_key_shape() {
        let setting = parse(
            r#"
            [setting]
            up_keys = ["w"]
            down_keys = ["s"]
        "#,
        );
        assert_eq!(
            setting,
            ControlSetting::Keys {
                up_keys: vec!["w".to_string()],
                down_keys: vec!["s".to_string()],
            }
        );
    }

    #[test]
    fn test_recognizes_ai_shape() {
        let setting = parse(
            r#"
            [setting]
            difficulty = "hard"
        "#,
        );
        assert_eq!(setting, ControlSetting::ai(Difficulty::Hard));
    }

    #[test]
    fn test_difficulty_wins_over_keys() {
        let setting = parse(
            r#"
            [setting]
            difficulty = "hard"
            up_keys = ["w"]
            down_keys = ["s"]
        "#,
        );
        assert_eq!(setting, ControlSetting::ai(Difficulty::Hard));
    }

    #[test]
    fn test_unknown_shapes_fall_back_to_pointer() {
        assert_eq!(parse("[setting]\n"), ControlSetting::pointer());
        assert_eq!(parse("setting = \"joystick\"\n"), ControlSetting::pointer());
        assert_eq!(
            parse("[setting]\ndifficulty = \"impossible\"\n"),
            ControlSetting::pointer()
        );
        assert_eq!(parse("[setting]\nup_keys = [\"w\"]\n"), ControlSetting::pointer());
    }

    #[test]
    fn test_serialized_settings_read_back() {
        for setting in [
            ControlSetting::default_keys(Player::P2),
            ControlSetting::ai(Difficulty::Medium),
            ControlSetting::pointer(),
        ] {
            let text = toml::to_string(&Wrapper {
                setting: setting.clone(),
            })
            .unwrap();
            assert_eq!(parse(&text), setting);
        }
    }
}
