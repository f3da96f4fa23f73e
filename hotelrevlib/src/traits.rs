//! Трэйты на стыках ядра: чтение/запись датасета и внешняя модель.

use crate::{error::Result, features::FeatureVector, model::Dataset};
use std::io::{BufRead, Write};

pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<Dataset>;
}

pub trait WriteFormat {
    fn write<W: Write>(w: W, ds: &Dataset) -> Result<()>;
}

/// Результат одного вызова модели.
pub type ModelResult = std::result::Result<f64, Box<dyn std::error::Error + Send + Sync>>;

/// Непрозрачная регрессионная модель: вектор признаков -> выручка.
///
/// Вызов должен быть без побочных эффектов: сервис прогноза дёргает модель
/// несколько раз на один запрос.
pub trait RevenueModel {
    fn predict(&self, features: &FeatureVector) -> ModelResult;

    fn name(&self) -> &str {
        "revenue-model"
    }
}

impl<F> RevenueModel for F
where
    F: Fn(&FeatureVector) -> ModelResult,
{
    fn predict(&self, features: &FeatureVector) -> ModelResult {
        self(features)
    }
}
