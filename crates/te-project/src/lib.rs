//! te-project: run file format and validation.
//!
//! A run file (YAML or JSON) describes one plant simulation. Loading
//! validates it; [`RunConfig::plant_config`], [`RunConfig::sim_options`] and
//! [`RunConfig::disturbance_codes`] turn it into what `te-sim` consumes.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_run};

use te_disturbances::{DisturbanceVector, N_IDV};
use te_sim::{IntegratorType, PlantConfig, SimOptions};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Disturbance error: {0}")]
    Disturbance(#[from] te_disturbances::DisturbanceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    let run: RunConfig = serde_yaml::from_str(&content)?;
    validate_run(&run)?;
    Ok(run)
}

pub fn save_yaml(path: &std::path::Path, run: &RunConfig) -> ProjectResult<()> {
    validate_run(run)?;
    let content = serde_yaml::to_string(run)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    let run: RunConfig = serde_json::from_str(&content)?;
    validate_run(&run)?;
    Ok(run)
}

pub fn save_json(path: &std::path::Path, run: &RunConfig) -> ProjectResult<()> {
    validate_run(run)?;
    let content = serde_json::to_string_pretty(run)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load_run(path: &std::path::Path) -> ProjectResult<RunConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

impl RunConfig {
    pub fn sim_options(&self) -> SimOptions {
        SimOptions {
            dt: self.dt_hours,
            t_end: self.t_end_hours,
            record_every: self.record_every,
            integrator: match self.integrator {
                IntegratorDef::Rk4 => IntegratorType::RK4,
                IntegratorDef::ForwardEuler => IntegratorType::ForwardEuler,
            },
            ..SimOptions::default()
        }
    }

    pub fn plant_config(&self) -> PlantConfig {
        match self.seed {
            Some(seed) => PlantConfig::with_seed(seed),
            None => PlantConfig::default(),
        }
    }

    /// The 20 host codes for the selected disturbances.
    pub fn disturbance_codes(&self) -> ProjectResult<[i32; N_IDV]> {
        let idv = match &self.disturbances {
            DisturbancesDef::Active(numbers) => DisturbanceVector::from_active(numbers)?,
            DisturbancesDef::Codes(codes) => DisturbanceVector::from_codes(codes)?,
        };
        Ok(idv.to_codes())
    }

    /// Switch on extra disturbances, e.g. from the command line.
    pub fn add_disturbances(&mut self, extra: &[usize]) {
        let mut numbers: Vec<usize> = match &self.disturbances {
            DisturbancesDef::Active(numbers) => numbers.clone(),
            DisturbancesDef::Codes(codes) => (1..=codes.len())
                .filter(|n| codes[n - 1] > 0)
                .collect(),
        };
        numbers.extend_from_slice(extra);
        numbers.sort_unstable();
        numbers.dedup();
        self.disturbances = DisturbancesDef::Active(numbers);
    }
}
