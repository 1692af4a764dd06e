// Configuration file loading and creation

use super::types::{Config, ControlsConfig};
use crate::controls::{ControlSetting, Controls, KeyRegistry};
use crate::game::Player;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("pong_core");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Load configuration from file, or create default if it doesn't exist
pub fn load_config() -> Result<Config, io::Error> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(config_path: &Path) -> Result<Config, io::Error> {
    if config_path.exists() {
        let contents = fs::read_to_string(config_path)?;
        Ok(parse_config(&contents))
    } else {
        create_default_config(config_path)?;
        Ok(Config::default())
    }
}

/// Parse config text, falling back to defaults if it is malformed
pub fn parse_config(contents: &str) -> Config {
    match toml::from_str(contents) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config file, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    save_config(path, &Config::default())?;
    info!("Created default config file at: {}", path.display());
    Ok(())
}

/// Write `config` to `path` with the explanatory header
pub fn save_config(path: &Path, config: &Config) -> Result<(), io::Error> {
    let toml_string =
        toml::to_string_pretty(config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    // Add helpful header comments
    let commented_toml = format!(
        "# Pong Configuration File\n\
         # Controls changed in the menu are saved here; other edits apply on restart\n\
         #\n\
         # [controls.p1] / [controls.p2] take one of:\n\
         #   up_keys = [\"w\"] and down_keys = [\"s\"]   keyboard\n\
         #   difficulty = \"easy\" | \"medium\" | \"hard\"   computer\n\
         #   nothing at all                            mouse\n\
         #\n\
         # Key names: single characters like \"w\", or \"ArrowUp\", \"ArrowDown\",\n\
         #            \"ArrowLeft\", \"ArrowRight\", \"Home\", \"End\", \"PageUp\", ...\n\
         #\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)
}

/// Build controllers from config, replacing key bindings that are invalid or
/// that collide with the other player's
pub fn validated_controls(config: &ControlsConfig) -> Controls {
    let mut registry = KeyRegistry::new();
    let mut settings = Vec::with_capacity(2);

    for player in Player::ALL {
        let setting = checked_setting(&registry, player, config.get(player));
        if let ControlSetting::Keys { up_keys, down_keys } = &setting {
            registry.reserve(player, up_keys.iter().chain(down_keys).cloned());
        }
        settings.push(setting);
    }

    Controls::new(&settings[0], &settings[1])
}

fn checked_setting(registry: &KeyRegistry, player: Player, setting: &ControlSetting) -> ControlSetting {
    let (up_keys, down_keys) = match setting {
        ControlSetting::Keys { up_keys, down_keys } => (up_keys, down_keys),
        _ => return setting.clone(),
    };

    match registry.validate_setting(player, up_keys, down_keys) {
        Ok(()) => setting.clone(),
        Err(e) => {
            warn!("Invalid key bindings for {}: {}", player.label(), e);
            let fallback = ControlSetting::default_keys(player);
            match &fallback {
                ControlSetting::Keys { up_keys, down_keys }
                    if registry.validate_setting(player, up_keys, down_keys).is_ok() =>
                {
                    fallback
                }
                _ => {
                    warn!("Default keys for {} are taken, using mouse", player.label());
                    ControlSetting::pointer()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Difficulty;
    use crate::controls::ControlKind;

    #[test]
    fn test_default_config_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        // Parsed values must match the defaults
        let parsed: Config = toml::from_str(&toml_string).unwrap();

        assert_eq!(parsed.timing.target_fps, config.timing.target_fps);
        assert_eq!(parsed.timing.stall_ms, config.timing.stall_ms);
        assert_eq!(parsed.controls.p1, config.controls.p1);
        assert_eq!(parsed.controls.p2, config.controls.p2);
        assert_eq!(parsed.display.ball_color, config.display.ball_color);
    }

    #[test]
    fn test_partial_config_with_defaults() {
        let partial_toml = r#"
            [timing]
            stall_ms = 50.0

            [controls.p2]
            difficulty = "hard"
        "#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        // Custom values
        assert_eq!(config.timing.stall_ms, 50.0);
        assert_eq!(config.controls.p2, ControlSetting::ai(Difficulty::Hard));

        // Default values should still be there
        assert_eq!(config.timing.min_tick_ms, 12.0);
        assert_eq!(config.controls.p1, ControlSetting::ai(Difficulty::Easy));
    }

    #[test]
    fn test_malformed_config_uses_defaults() {
        let config = parse_config("[timing\nstall_ms = ");
        assert_eq!(config.timing.stall_ms, 32.0);
    }

    #[test]
    fn test_colliding_bindings_fall_back() {
        let config: ControlsConfig = toml::from_str(
            r#"
            [p1]
            up_keys = ["ArrowUp"]
            down_keys = ["ArrowDown"]

            [p2]
            up_keys = ["ArrowUp"]
            down_keys = ["k"]
        "#,
        )
        .unwrap();

        let controls = validated_controls(&config);
        assert_eq!(controls.get(Player::P1).setting(), config.p1);
        // P2's own defaults are taken by P1 too, so P2 ends up on the mouse
        assert_eq!(controls.get(Player::P2).kind(), ControlKind::Pointer);
    }

    #[test]
    fn test_reserved_binding_falls_back_to_defaults() {
        let config: ControlsConfig = toml::from_str(
            r#"
            [p1]
            up_keys = ["q"]
            down_keys = ["s"]
        "#,
        )
        .unwrap();

        let controls = validated_controls(&config);
        assert_eq!(
            controls.get(Player::P1).setting(),
            ControlSetting::default_keys(Player::P1)
        );
        assert_eq!(
            controls.get(Player::P2).setting(),
            ControlSetting::default_keys(Player::P2)
        );
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = std::env::temp_dir().join(format!("pong_core_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let config = load_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.timing.target_fps, 60);

        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.controls.p2, config.controls.p2);

        let mut changed = config.clone();
        changed.controls.set(Player::P1, ControlSetting::pointer());
        save_config(&path, &changed).unwrap();
        assert_eq!(load_config_from(&path).unwrap().controls.p1, ControlSetting::pointer());
        fs::remove_dir_all(&dir).ok();
    }
}
