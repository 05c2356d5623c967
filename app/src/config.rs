use directories::ProjectDirs;
use eframe::egui::Color32;
use egui_node_editor::FlowViewTheme;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Node-based flow editor".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Canvas colours as RGB triples.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub background: [u8; 3],
    pub fine_grid: [u8; 3],
    pub coarse_grid: [u8; 3],
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: [53, 53, 53],
            fine_grid: [60, 60, 60],
            coarse_grid: [25, 25, 25],
        }
    }
}

impl StyleConfig {
    pub fn apply(&self, theme: &mut FlowViewTheme) {
        let rgb = |[r, g, b]: [u8; 3]| Color32::from_rgb(r, g, b);
        theme.background_color = rgb(self.background);
        theme.fine_grid_color = rgb(self.fine_grid);
        theme.coarse_grid_color = rgb(self.coarse_grid);
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    pub window: WindowConfig,
    pub style: StyleConfig,
}

impl EditorConfig {
    pub fn theme(&self) -> FlowViewTheme {
        let mut theme = FlowViewTheme::default();
        self.style.apply(&mut theme);
        theme
    }
}

fn get_config_path() -> Option<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("me", "liesegang", "flow_editor") {
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            if let Err(e) = fs::create_dir_all(config_dir) {
                error!("Failed to create config directory: {}", e);
                return None;
            }
        }
        return Some(config_dir.join("config.toml"));
    }
    None
}

pub fn parse_config(toml_str: &str) -> Result<EditorConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

pub fn save_config(config: &EditorConfig) {
    if let Some(path) = get_config_path() {
        match toml::to_string_pretty(config) {
            Ok(toml_str) => {
                if let Err(e) = fs::write(&path, toml_str) {
                    error!("Failed to write config file: {}", e);
                } else {
                    info!("Config saved to {}", path.display());
                }
            }
            Err(e) => {
                error!("Failed to serialize config: {}", e);
            }
        }
    }
}

/// Load the config file, writing defaults out on first run.
pub fn load_config() -> EditorConfig {
    let Some(path) = get_config_path() else {
        warn!("No config directory available, using defaults");
        return EditorConfig::default();
    };
    if !path.exists() {
        let config = EditorConfig::default();
        save_config(&config);
        return config;
    }
    match fs::read_to_string(&path) {
        Ok(toml_str) => match parse_config(&toml_str) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse config file, using defaults: {}", e);
                EditorConfig::default()
            }
        },
        Err(e) => {
            warn!("Failed to read config file, using defaults: {}", e);
            EditorConfig::default()
        }
    }
}
