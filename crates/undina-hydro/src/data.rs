//! In-memory hydrodynamic dataset, as handed over by whatever reads the
//! boundary-element solver output.
//!
//! Nothing here parses solver files. The structures derive `serde` so a host
//! can move a dataset around as JSON; validation turns the raw pieces into
//! the checked tables of [`crate::excitation`].

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::HydroError;
use crate::excitation::{FrequencyExcitation, ImpulseExcitation};

/// Global parameters of the hydrodynamic run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Water depth (m). Large values approximate deep water.
    pub water_depth: f64,
    /// Gravitational acceleration (m/s²).
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    /// Water density (kg/m³).
    #[serde(default = "default_rho")]
    pub rho: f64,
}

fn default_gravity() -> f64 {
    9.81
}

fn default_rho() -> f64 {
    1000.0
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            water_depth: 100.0,
            gravity: default_gravity(),
            rho: default_rho(),
        }
    }
}

/// Raw excitation IRF of one body on its native time grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpulseResponse {
    /// Lag times (s), ascending.
    pub time: Vec<f64>,
    /// IRF values, shape (6, time samples).
    pub values: Array2<f64>,
}

impl ImpulseResponse {
    /// Validate and build the convolution table (computes integration widths).
    pub fn to_table(&self) -> Result<ImpulseExcitation, HydroError> {
        ImpulseExcitation::new(self.time.clone(), self.values.clone())
    }
}

/// Hydrodynamic data of a single body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyData {
    pub name: String,
    /// Frequency-domain excitation (regular waves).
    #[serde(default)]
    pub frequency: Option<FrequencyExcitation>,
    /// Excitation IRF (irregular waves).
    #[serde(default)]
    pub impulse: Option<ImpulseResponse>,
}

/// Complete hydrodynamic dataset for a multi-body system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydroDataset {
    pub simulation: SimulationParameters,
    pub bodies: Vec<BodyData>,
}

impl HydroDataset {
    /// Number of bodies.
    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    /// Validated frequency-domain tables, one per body.
    pub fn frequency_tables(&self) -> Result<Vec<FrequencyExcitation>, HydroError> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(body, data)| {
                let table = data.frequency.as_ref().ok_or(HydroError::MissingData {
                    body,
                    kind: "frequency-domain excitation",
                })?;
                table.validate()?;
                Ok(table.clone())
            })
            .collect()
    }

    /// Validated IRF tables, one per body, on their native grids.
    pub fn impulse_tables(&self) -> Result<Vec<ImpulseExcitation>, HydroError> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(body, data)| {
                data.impulse
                    .as_ref()
                    .ok_or(HydroError::MissingData {
                        body,
                        kind: "excitation IRF",
                    })?
                    .to_table()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn body(name: &str, with_irf: bool) -> BodyData {
        let frequency = FrequencyExcitation::new(
            vec![0.5, 1.0],
            Array3::from_elem((6, 1, 2), 1.0),
            Array3::zeros((6, 1, 2)),
        )
        .unwrap();
        BodyData {
            name: name.into(),
            frequency: Some(frequency),
            impulse: with_irf.then(|| ImpulseResponse {
                time: vec![-1.0, 0.0, 1.0],
                values: Array2::from_elem((6, 3), 0.5),
            }),
        }
    }

    #[test]
    fn test_missing_irf_reported_with_body_index() {
        let dataset = HydroDataset {
            simulation: SimulationParameters::default(),
            bodies: vec![body("float", true), body("plate", false)],
        };
        assert_eq!(dataset.frequency_tables().unwrap().len(), 2);
        match dataset.impulse_tables() {
            Err(HydroError::MissingData { body, .. }) => assert_eq!(body, 1),
            other => panic!("expected MissingData, got {:?}", other),
        }
    }

    #[test]
    fn test_dataset_json_round_trip() {
        let dataset = HydroDataset {
            simulation: SimulationParameters {
                water_depth: 50.0,
                ..Default::default()
            },
            bodies: vec![body("float", true)],
        };
        let json = serde_json::to_string(&dataset).expect("Serialisation failed");
        let back: HydroDataset = serde_json::from_str(&json).expect("Deserialisation failed");
        assert_eq!(back.num_bodies(), 1);
        assert_eq!(back.simulation.water_depth, 50.0);
        assert_eq!(back.simulation.gravity, 9.81);
        let tables = back.impulse_tables().unwrap();
        assert_eq!(tables[0].widths(), &[0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_gravity_defaults_when_absent() {
        let json = r#"{ "water_depth": 20.0 }"#;
        let params: SimulationParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.gravity, 9.81);
        assert_eq!(params.rho, 1000.0);
    }
}
