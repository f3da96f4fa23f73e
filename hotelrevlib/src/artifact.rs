//! Артефакт обученной модели: линейная регрессия по схеме признаков, JSON.
//!
//! ```json
//! { "name": "revenue-linear", "schema_version": 1,
//!   "features": ["Stay_duration", "..."],
//!   "intercept": 0.0, "coefficients": [0.0, "..."] }
//! ```
//!
//! Список признаков хранится в файле и сверяется с [`FEATURE_NAMES`] при
//! загрузке, так что модель, обученная на другом порядке колонок, не
//! загрузится.

use crate::{
    error::{HotelRevError, Result},
    features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES, FEATURE_SCHEMA_VERSION},
    traits::{ModelResult, RevenueModel},
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearRevenueModel {
    pub name: String,
    pub schema_version: u32,
    pub features: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearRevenueModel {
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        let model: LinearRevenueModel = serde_json::from_reader(r)
            .map_err(|e| HotelRevError::ModelLoad(format!("malformed model artifact: {e}")))?;
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            HotelRevError::ModelLoad(format!("cannot open {}: {e}", path.display()))
        })?;
        let model = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            name = %model.name,
            schema_version = model.schema_version,
            "loaded revenue model"
        );
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.schema_version != FEATURE_SCHEMA_VERSION {
            return Err(HotelRevError::ModelLoad(format!(
                "model schema version {} does not match feature schema version {}",
                self.schema_version, FEATURE_SCHEMA_VERSION
            )));
        }
        if self.features.len() != FEATURE_COUNT
            || self.features.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b)
        {
            return Err(HotelRevError::ModelLoad(format!(
                "model features {:?} do not match expected order {:?}",
                self.features, FEATURE_NAMES
            )));
        }
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(HotelRevError::ModelLoad(format!(
                "expected {FEATURE_COUNT} coefficients, got {}",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(HotelRevError::ModelLoad("non-finite model parameters".into()));
        }
        Ok(())
    }
}

impl RevenueModel for LinearRevenueModel {
    fn predict(&self, features: &FeatureVector) -> ModelResult {
        let y = self
            .coefficients
            .iter()
            .zip(features.as_slice())
            .fold(self.intercept, |acc, (c, x)| acc + c * x);
        Ok(y)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
