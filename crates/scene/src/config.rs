//! YAML scene configuration.
//!
//! Every section and field is optional. Missing values fall back to the
//! demo defaults, so an empty file describes the stock scene.

use latticeview_common::{Color, is_known_ease};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub background: Color,
    pub camera: CameraConfig,
    pub lattice: LatticeConfig,
    pub tween: TweenConfig,
    pub plane: PlaneConfig,
    pub helpers: HelperConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            camera: CameraConfig::default(),
            lattice: LatticeConfig::default(),
            tween: TweenConfig::default(),
            plane: PlaneConfig::default(),
            helpers: HelperConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Cubes per axis.
    pub grid_size: u32,
    /// Cube edge length.
    pub cell: f32,
    /// Space between neighbouring cubes.
    pub gap: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            grid_size: 3,
            cell: 1.0,
            gap: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Seconds per cycle.
    pub duration: f32,
    /// Ease name, e.g. `power1.inOut`.
    pub ease: String,
    pub yoyo: bool,
    /// Extra cycles after the first; `-1` repeats forever.
    pub repeat: i32,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            duration: 2.0,
            ease: "power1.inOut".into(),
            yoyo: true,
            repeat: -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
    pub width: f32,
    pub height: f32,
    pub position: [f32; 3],
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 4.0,
            position: [2.0, 2.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    pub axes_size: f32,
    pub grid_size: f32,
    pub grid_divisions: u32,
    pub show_axis: bool,
    pub show_grid: bool,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            axes_size: 20.0,
            grid_size: 20.0,
            grid_divisions: 20,
            show_axis: true,
            show_grid: true,
        }
    }
}

/// Largest accepted `lattice.grid_size`. 15³ cubes plus the plane still
/// fit the renderer's instance buffer.
pub const MAX_GRID_SIZE: u32 = 15;

fn finite(field: &str, values: &[f32]) -> Result<(), ConfigError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(ConfigError::Invalid(format!("{field} must be finite, got {v}"))),
        None => Ok(()),
    }
}

impl SceneConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!("loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        finite("camera.fov_degrees", &[cam.fov_degrees])?;
        finite("camera.near", &[cam.near])?;
        finite("camera.far", &[cam.far])?;
        finite("camera.position", &cam.position)?;
        finite("camera.target", &cam.target)?;
        finite("lattice.cell", &[self.lattice.cell])?;
        finite("lattice.gap", &[self.lattice.gap])?;
        finite("tween.duration", &[self.tween.duration])?;
        finite("plane.width", &[self.plane.width])?;
        finite("plane.height", &[self.plane.height])?;
        finite("plane.position", &self.plane.position)?;
        finite("helpers.axes_size", &[self.helpers.axes_size])?;
        finite("helpers.grid_size", &[self.helpers.grid_size])?;

        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                cam.fov_degrees
            )));
        }
        if cam.near <= 0.0 || cam.far <= cam.near {
            return Err(ConfigError::Invalid(format!(
                "camera clip range must satisfy 0 < near < far, got near={} far={}",
                cam.near, cam.far
            )));
        }
        if cam.position == cam.target {
            return Err(ConfigError::Invalid(
                "camera.position must differ from camera.target".into(),
            ));
        }
        if self.lattice.grid_size == 0 || self.lattice.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "lattice.grid_size must be in 1..={MAX_GRID_SIZE}, got {}",
                self.lattice.grid_size
            )));
        }
        if self.lattice.cell <= 0.0 || self.lattice.gap < 0.0 {
            return Err(ConfigError::Invalid(
                "lattice.cell must be positive and lattice.gap non-negative".into(),
            ));
        }
        if self.tween.duration < 0.0 {
            return Err(ConfigError::Invalid("tween.duration must be non-negative".into()));
        }
        if !is_known_ease(&self.tween.ease) {
            return Err(ConfigError::Invalid(format!(
                "unknown tween.ease {:?}",
                self.tween.ease
            )));
        }
        if self.tween.repeat < -1 {
            return Err(ConfigError::Invalid(format!(
                "tween.repeat must be -1 or greater, got {}",
                self.tween.repeat
            )));
        }
        if self.helpers.grid_divisions == 0 {
            return Err(ConfigError::Invalid("helpers.grid_divisions must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_constants() {
        let c = SceneConfig::default();
        assert_eq!(c.background, Color::WHITE);
        assert_eq!(c.camera.fov_degrees, 75.0);
        assert_eq!(c.camera.position, [0.0, 0.0, 5.0]);
        assert_eq!(c.lattice.grid_size, 3);
        assert_eq!(c.tween.repeat, -1);
        assert_eq!(c.plane.position, [2.0, 2.0, 0.0]);
        assert_eq!(c.helpers.grid_divisions, 20);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(SceneConfig::from_yaml_str("").unwrap(), SceneConfig::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let c = SceneConfig::from_yaml_str("lattice:\n  gap: 0.5\nbackground: 0\n").unwrap();
        assert_eq!(c.lattice.gap, 0.5);
        assert_eq!(c.lattice.grid_size, 3);
        assert_eq!(c.background, Color::BLACK);
        assert_eq!(c.tween, TweenConfig::default());
    }

    #[test]
    fn yaml_round_trip() {
        let mut c = SceneConfig::default();
        c.helpers.show_grid = false;
        c.tween.ease = "sine.inOut".into();
        let text = c.to_yaml().unwrap();
        assert_eq!(SceneConfig::from_yaml_str(&text).unwrap(), c);
    }

    #[test]
    fn rejects_bad_repeat() {
        let err = SceneConfig::from_yaml_str("tween:\n  repeat: -2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_grid() {
        let err = SceneConfig::from_yaml_str("lattice:\n  grid_size: 0\n").unwrap_err();
        assert!(err.to_string().contains("grid_size"));
    }

    #[test]
    fn rejects_huge_grid() {
        let err = SceneConfig::from_yaml_str("lattice:\n  grid_size: 4000000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let max = format!("lattice:\n  grid_size: {MAX_GRID_SIZE}\n");
        assert!(SceneConfig::from_yaml_str(&max).is_ok());
    }

    #[test]
    fn rejects_nan() {
        let err = SceneConfig::from_yaml_str("lattice:\n  cell: .nan\n").unwrap_err();
        assert!(err.to_string().contains("lattice.cell"));
        let err = SceneConfig::from_yaml_str("tween:\n  duration: .inf\n").unwrap_err();
        assert!(err.to_string().contains("tween.duration"));
        let err = SceneConfig::from_yaml_str("plane:\n  position: [0, .nan, 0]\n").unwrap_err();
        assert!(err.to_string().contains("plane.position"));
    }

    #[test]
    fn rejects_unknown_ease() {
        let err = SceneConfig::from_yaml_str("tween:\n  ease: bounce.out\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("bounce.out"));
        assert!(SceneConfig::from_yaml_str("tween:\n  ease: sine\n").is_ok());
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = SceneConfig::from_yaml_str("lattice: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.yaml");
        let mut c = SceneConfig::default();
        c.camera.position = [3.0, 3.0, 3.0];
        c.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();
        assert_eq!(loaded, c);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
