use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::sim_params::{SimParams, TissueBands, TransitionProbabilities};

// Grid dimensions
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct GridConfig {
    pub size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig { size: 100 }
    }
}

// Concentric ring layout of the limb cross-section
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct TissueConfig {
    pub bone_radius: f64,
    pub muscle_radius: f64,
    pub skin_radius: f64,
    /// Chance for each initial muscle cell to start as a vessel.
    pub vessel_seed_probability: f64,
}

impl Default for TissueConfig {
    fn default() -> Self {
        TissueConfig {
            bone_radius: 15.0,
            muscle_radius: 38.0,
            skin_radius: 42.0,
            vessel_seed_probability: 0.08,
        }
    }
}

// Amputation wedge and when it happens
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct InjuryConfig {
    pub step: u32,
    pub half_angle_rad: f64,
    pub radius: f64,
}

impl Default for InjuryConfig {
    fn default() -> Self {
        InjuryConfig {
            step: 30,
            half_angle_rad: 0.5,
            radius: 50.0,
        }
    }
}

/// How regrowth and sprouting obtain their per-cell random value.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// One dice field per step is compared against both thresholds.
    #[default]
    Shared,
    /// Vessel sprouting rolls its own dice field.
    Independent,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ProbabilityConfig {
    pub tissue_growth: f64,
    pub vessel_growth: f64,
    pub necrosis: f64,
    pub scar_formation: f64,
    pub draw_mode: DrawMode,
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        ProbabilityConfig {
            tissue_growth: 0.55,
            vessel_growth: 0.10,
            necrosis: 0.04,
            scar_formation: 0.20,
            draw_mode: DrawMode::Shared,
        }
    }
}

// Configuration for timing
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct TimingConfig {
    pub total_steps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig { total_steps: 250 }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig { seed: 67 }
    }
}

// Configuration for output settings
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub base_filename: String,
    pub save_animation: bool,
    pub save_stats: bool,
    pub fps: u32,
    /// Pixels per grid cell in rendered frames.
    pub cell_scale: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_filename: "vascular_regrowth".to_string(),
            save_animation: true,
            save_stats: true,
            fps: 18,
            cell_scale: 6,
        }
    }
}

// Main simulation configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid: GridConfig,
    pub tissue: TissueConfig,
    pub injury: InjuryConfig,
    pub probabilities: ProbabilityConfig,
    pub timing: TimingConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file and validates it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_ref.to_path_buf(),
            source,
        })?;
        let config: SimulationConfig =
            toml::from_str(&config_str).map_err(|source| ConfigError::Parse {
                path: path_ref.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects parameter sets no simulation should start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.size == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let t = &self.tissue;
        let radii_finite = t.bone_radius.is_finite() && t.muscle_radius.is_finite() && t.skin_radius.is_finite();
        if !radii_finite
            || t.bone_radius < 0.0
            || t.bone_radius > t.muscle_radius
            || t.muscle_radius > t.skin_radius
        {
            return Err(ConfigError::RadiiOrder {
                bone: t.bone_radius,
                muscle: t.muscle_radius,
                skin: t.skin_radius,
            });
        }

        let p = &self.probabilities;
        for (name, value) in [
            ("tissue.vessel_seed_probability", t.vessel_seed_probability),
            ("probabilities.tissue_growth", p.tissue_growth),
            ("probabilities.vessel_growth", p.vessel_growth),
            ("probabilities.necrosis", p.necrosis),
            ("probabilities.scar_formation", p.scar_formation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }

        if !(self.injury.half_angle_rad.is_finite() && self.injury.half_angle_rad > 0.0) {
            return Err(ConfigError::Invalid {
                name: "injury.half_angle_rad",
                reason: format!("must be positive (got {})", self.injury.half_angle_rad),
            });
        }
        if !(self.injury.radius.is_finite() && self.injury.radius > 0.0) {
            return Err(ConfigError::Invalid {
                name: "injury.radius",
                reason: format!("must be positive (got {})", self.injury.radius),
            });
        }
        if self.timing.total_steps == 0 {
            return Err(ConfigError::Invalid {
                name: "timing.total_steps",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.injury.step >= self.timing.total_steps {
            return Err(ConfigError::Invalid {
                name: "injury.step",
                reason: format!(
                    "must be below timing.total_steps ({} >= {})",
                    self.injury.step, self.timing.total_steps
                ),
            });
        }
        if self.output.fps == 0 {
            return Err(ConfigError::Invalid {
                name: "output.fps",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.output.cell_scale == 0 {
            return Err(ConfigError::Invalid {
                name: "output.cell_scale",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Converts the configuration into simulation parameters used at runtime.
    pub fn get_sim_params(&self) -> SimParams {
        let grid_size = self.grid.size;

        SimParams {
            grid_size,
            num_cells: grid_size * grid_size,
            center: (grid_size / 2) as f64,
            bands: TissueBands {
                bone: self.tissue.bone_radius,
                muscle: self.tissue.muscle_radius,
                skin: self.tissue.skin_radius,
            },
            vessel_seed_probability: self.tissue.vessel_seed_probability,
            injury_step: self.injury.step,
            injury_half_angle: self.injury.half_angle_rad,
            injury_radius: self.injury.radius,
            probabilities: TransitionProbabilities {
                tissue_growth: self.probabilities.tissue_growth,
                vessel_growth: self.probabilities.vessel_growth,
                necrosis: self.probabilities.necrosis,
                scar_formation: self.probabilities.scar_formation,
            },
            draw_mode: self.probabilities.draw_mode,
            total_steps: self.timing.total_steps,
        }
    }
}
