//! Run file schema.

use serde::{Deserialize, Serialize};

/// One simulation run: timing, randomness, initial state, disturbances and
/// constant valve commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_dt")]
    pub dt_hours: f64,
    #[serde(default = "default_t_end")]
    pub t_end_hours: f64,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
    #[serde(default)]
    pub integrator: IntegratorDef,
    /// Random seed; the standard sequence when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// 50 states overriding the base case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<Vec<f64>>,
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub disturbances: DisturbancesDef,
    /// 12 constant XMV commands; the initial valve positions when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<f64>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: None,
            dt_hours: default_dt(),
            t_end_hours: default_t_end(),
            record_every: default_record_every(),
            integrator: IntegratorDef::default(),
            seed: None,
            initial_state: None,
            disturbances: DisturbancesDef::default(),
            inputs: None,
        }
    }
}

fn default_dt() -> f64 {
    5e-4
}

fn default_t_end() -> f64 {
    1.0
}

fn default_record_every() -> usize {
    20
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    #[default]
    Rk4,
    ForwardEuler,
}

/// Disturbance selection, either as IDV numbers or as host codes.
///
/// ```yaml
/// disturbances:
///   active: [1, 8]
/// ```
///
/// or a 20-long `codes:` vector where any positive entry is on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DisturbancesDef {
    Active(Vec<usize>),
    Codes(Vec<i32>),
}

impl Default for DisturbancesDef {
    fn default() -> Self {
        DisturbancesDef::Active(Vec::new())
    }
}
