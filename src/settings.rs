use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ExtractError, Result};

/// Upper bound for `center.segments`.
pub const MAX_SEGMENTS: usize = 4096;

/// Where settings are looked up when no explicit path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Run-wide configuration. Loaded once and only ever borrowed afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub center: Center,
    #[serde(rename = "outputPath")]
    pub output_path: PathBuf,
    pub runways: RunwaySettings,
    pub class_airspace: AirspaceSettings,
    pub designated_points: PropertySettings,
    pub ats_route: PropertySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Center {
    pub longitude: f64,
    pub latitude: f64,
    /// Radius of the area of interest, in coordinate units.
    pub buffer: f64,
    /// Segments per quarter circle when approximating the buffer.
    #[serde(default = "default_segments")]
    pub segments: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwaySettings {
    pub minimum_length: f64,
    pub helipads: bool,
    #[serde(default = "default_helipad_designator")]
    pub helipad_designator: String,
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirspaceSettings {
    pub classes: Vec<String>,
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertySettings {
    pub properties: Vec<String>,
}

fn default_segments() -> usize {
    16
}

fn default_helipad_designator() -> String {
    "H1".to_string()
}

impl Settings {
    /// Reads settings from `path`, or from `settings.json` in the working
    /// directory when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
        if !path.exists() {
            return Err(ExtractError::Configuration(format!(
                "Settings file does not exist: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            ExtractError::Configuration(format!("cannot open {}: {e}", path.display()))
        })?;
        let settings: Settings = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ExtractError::Configuration(format!("cannot parse {}: {e}", path.display()))
        })?;

        settings.validate()?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text)
            .map_err(|e| ExtractError::Configuration(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let center = &self.center;
        if !center.longitude.is_finite() || !center.latitude.is_finite() {
            return Err(ExtractError::Configuration(
                "center coordinates must be finite".to_string(),
            ));
        }
        if !(center.buffer.is_finite() && center.buffer > 0.0) {
            return Err(ExtractError::Configuration(format!(
                "center buffer must be a positive number, got {}",
                center.buffer
            )));
        }
        if !(1..=MAX_SEGMENTS).contains(&center.segments) {
            return Err(ExtractError::Configuration(format!(
                "center segments must be between 1 and {MAX_SEGMENTS}, got {}",
                center.segments
            )));
        }
        Ok(())
    }
}
