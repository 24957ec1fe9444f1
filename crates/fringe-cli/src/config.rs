//! TOML configuration deserialisation for diffraction jobs.
//!
//! Physical inputs are written in bench units (nm, µm, mm); the runner
//! converts to SI metres when it builds the experiment. Every field has a
//! default, so an empty file describes the standard red-laser setup.

use serde::Deserialize;

use fringe_core::types::SlitMode;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub experiment: ExperimentConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Physical parameters in bench units.
#[derive(Debug, Deserialize)]
pub struct ExperimentConfig {
    /// Wavelength in nanometres.
    #[serde(default = "default_wavelength_nm")]
    pub wavelength_nm: f64,
    /// Slit width in micrometres.
    #[serde(default = "default_slit_width_um")]
    pub slit_width_um: f64,
    /// Centre-to-centre slit separation in micrometres.
    #[serde(default = "default_slit_separation_um")]
    pub slit_separation_um: f64,
    /// Slit-to-screen distance in metres.
    #[serde(default = "default_screen_distance_m")]
    pub screen_distance_m: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            wavelength_nm: default_wavelength_nm(),
            slit_width_um: default_slit_width_um(),
            slit_separation_um: default_slit_separation_um(),
            screen_distance_m: default_screen_distance_m(),
        }
    }
}

fn default_wavelength_nm() -> f64 {
    632.0
}
fn default_slit_width_um() -> f64 {
    50.0
}
fn default_slit_separation_um() -> f64 {
    200.0
}
fn default_screen_distance_m() -> f64 {
    1.0
}

/// Screen sampling window.
#[derive(Debug, Deserialize)]
pub struct ScreenConfig {
    /// Sampled window width on the screen, in millimetres.
    #[serde(default = "default_screen_width_mm")]
    pub width_mm: f64,
    /// Number of uniformly spaced samples (the core requires at least 100).
    #[serde(default = "default_screen_points")]
    pub points: usize,
    /// Which field to evaluate: "single" or "double".
    #[serde(default = "default_mode")]
    pub mode: SlitMode,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width_mm: default_screen_width_mm(),
            points: default_screen_points(),
            mode: default_mode(),
        }
    }
}

fn default_screen_width_mm() -> f64 {
    10.0
}
fn default_screen_points() -> usize {
    2000
}
fn default_mode() -> SlitMode {
    SlitMode::Double
}

/// Fringe-prediction settings.
#[derive(Debug, Deserialize)]
pub struct PredictionConfig {
    /// Highest interference order to predict (min. 1).
    #[serde(default = "default_max_order")]
    pub max_order: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            max_order: default_max_order(),
        }
    }
}

fn default_max_order() -> usize {
    10
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save sampled patterns as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_pattern: bool,
    /// Whether to also save results as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_pattern: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
