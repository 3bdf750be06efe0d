pub mod config;
pub mod error;
pub mod label;
pub mod sim_params;
pub mod snapshot;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{
    DrawMode, GridConfig, InjuryConfig, OutputConfig, ProbabilityConfig, RunConfig, SimulationConfig,
    TimingConfig, TissueConfig,
};
pub use error::ConfigError;
pub use label::CellLabel;
pub use sim_params::{SimParams, TissueBands, TransitionProbabilities};
pub use snapshot::{LabelCounts, StepStats};
pub use vecmath::{vec_to_angle, Vec2};
