/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to the built-in defaults if the file is missing or incomplete.

use serde::{de, Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::object::{glyph_from_name, GameObject, SNAKE_GLYPH};

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tick_rate: Duration,
    pub keys: KeyBindings,
    pub frame: FrameConfig,
    pub debug_overlay: bool,
    pub log: LogConfig,
    pub objects: Vec<GameObject>,
}

/// Canonical key names (see `ui::input::key_name`) bound to loop actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub quit: String,
    pub pause: String,
}

/// Static decorative frame painted with the outline primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameConfig {
    pub enabled: bool,
    pub row: i32,
    pub col: i32,
    pub width: u16,
    pub height: u16,
    pub symbol: char,
    pub caption: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug)]
struct TomlConfig {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default)]
    keys: TomlKeys,
    #[serde(default)]
    frame: TomlFrame,
    #[serde(default)]
    debug: TomlDebug,
    #[serde(default)]
    log: TomlLog,
    #[serde(default)]
    objects: Vec<TomlObject>,
}

#[derive(Deserialize, Debug)]
struct TomlKeys {
    #[serde(default = "default_quit_key")]
    quit: String,
    #[serde(default = "default_pause_key")]
    pause: String,
}

#[derive(Deserialize, Debug)]
struct TomlFrame {
    #[serde(default)]
    enabled: bool,
    #[serde(default = "default_frame_row")]
    row: i32,
    #[serde(default)]
    col: i32,
    #[serde(default = "default_frame_width")]
    width: u16,
    #[serde(default = "default_frame_height")]
    height: u16,
    #[serde(default = "default_frame_symbol")]
    symbol: char,
    #[serde(default)]
    caption: String,
}

#[derive(Deserialize, Debug, Default)]
struct TomlDebug {
    #[serde(default)]
    overlay: bool,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_level")]
    level: String,
    #[serde(default)]
    file: String,
}

#[derive(Deserialize, Debug)]
struct TomlObject {
    row: i32,
    col: i32,
    #[serde(default = "default_object_size")]
    width: u16,
    #[serde(default = "default_object_size")]
    height: u16,
    #[serde(default)]
    vel_row: i32,
    #[serde(default)]
    vel_col: i32,
    #[serde(default = "default_object_glyph", deserialize_with = "de_glyph")]
    glyph: char,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 75 }
fn default_quit_key() -> String { "Rune[q]".into() }
fn default_pause_key() -> String { "Rune[p]".into() }
fn default_frame_row() -> i32 { 1 }
fn default_frame_width() -> u16 { 30 }
fn default_frame_height() -> u16 { 15 }
fn default_frame_symbol() -> char { '|' }
fn default_log_level() -> String { "error".into() }
fn default_object_size() -> u16 { 1 }
fn default_object_glyph() -> char { SNAKE_GLYPH }

/// Object glyphs: one character, or `"snake"` / `"apple"`.
fn de_glyph<'de, D: Deserializer<'de>>(d: D) -> Result<char, D::Error> {
    let name = String::deserialize(d)?;
    glyph_from_name(&name).ok_or_else(|| {
        de::Error::custom(format!("invalid glyph `{name}`: expected one character, \"snake\" or \"apple\""))
    })
}

impl Default for TomlConfig {
    fn default() -> Self {
        TomlConfig {
            tick_rate_ms: default_tick_rate(),
            keys: TomlKeys::default(),
            frame: TomlFrame::default(),
            debug: TomlDebug::default(),
            log: TomlLog::default(),
            objects: Vec::new(),
        }
    }
}

impl Default for TomlKeys {
    fn default() -> Self {
        TomlKeys {
            quit: default_quit_key(),
            pause: default_pause_key(),
        }
    }
}

impl Default for TomlFrame {
    fn default() -> Self {
        TomlFrame {
            enabled: false,
            row: default_frame_row(),
            col: 0,
            width: default_frame_width(),
            height: default_frame_height(),
            symbol: default_frame_symbol(),
            caption: String::new(),
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(cfg: TomlConfig) -> Self {
        let log_file = if cfg.log.file.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(cfg.log.file))
        };

        GameConfig {
            tick_rate: Duration::from_millis(cfg.tick_rate_ms),
            keys: KeyBindings {
                quit: cfg.keys.quit,
                pause: cfg.keys.pause,
            },
            frame: FrameConfig {
                enabled: cfg.frame.enabled,
                row: cfg.frame.row,
                col: cfg.frame.col,
                width: cfg.frame.width,
                height: cfg.frame.height,
                symbol: cfg.frame.symbol,
                caption: cfg.frame.caption,
            },
            debug_overlay: cfg.debug.overlay,
            log: LogConfig {
                level: cfg.log.level,
                file: log_file,
            },
            objects: cfg.objects.into_iter()
                .map(|o| GameObject::new(o.row, o.col, o.width, o.height, o.glyph)
                    .with_velocity(o.vel_row, o.vel_col))
                .collect(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        for dir in candidate_dirs() {
            let path = dir.join("config.toml");
            if !path.exists() {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(text) => match Self::from_toml_str(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return GameConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
        GameConfig::default()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from)
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
