//! Сервис прогноза выручки поверх непрозрачной модели.

use crate::{
    error::{HotelRevError, Result},
    features::{self, BookingInput, FeatureVector},
    traits::RevenueModel,
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Полуширина диапазона относительно точечного прогноза.
///
/// Эвристика для отображения, а не статистический доверительный интервал.
pub const BAND_RATIO: f64 = 0.10;

/// Ручная поправка спроса для выходных. Модель уже получает `Is_weekend`
/// как признак, поправка накладывается сверху; её сохранение согласовывается
/// с владельцем продукта.
pub const WEEKEND_UPLIFT: f64 = 1.08;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PredictionResult {
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// ±10% вокруг прогноза.
pub fn confidence_band(prediction: f64) -> PredictionResult {
    PredictionResult {
        point_estimate: prediction,
        lower_bound: prediction * (1.0 - BAND_RATIO),
        upper_bound: prediction * (1.0 + BAND_RATIO),
    }
}

/// Наивная арифметическая оценка, в модель не подаётся.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BaseEstimate {
    pub room_revenue: Decimal,
    pub service_revenue: Decimal,
    pub total: Decimal,
}

impl BaseEstimate {
    pub fn of(input: &BookingInput) -> Self {
        let room_revenue = Decimal::from(input.price_per_day()) * Decimal::from(input.stay_days());
        let service_revenue = Decimal::from(input.service_cost());
        BaseEstimate {
            room_revenue,
            service_revenue,
            total: room_revenue + service_revenue,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PointPrediction {
    pub estimate: f64,
    pub base: BaseEstimate,
}

/// Будни против выходных при прочих равных.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ScenarioComparison {
    pub weekday: f64,
    /// Уже умножено на `uplift`.
    pub weekend: f64,
    pub uplift: f64,
    pub base: BaseEstimate,
}

/// Всё, что показывает экран прогноза.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Forecast {
    pub input: BookingInput,
    pub prediction: PredictionResult,
    pub base: BaseEstimate,
    pub scenarios: ScenarioComparison,
}

pub struct PredictionService<'m, M: RevenueModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: RevenueModel + ?Sized> PredictionService<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    pub fn point_predict(&self, input: &BookingInput) -> Result<PointPrediction> {
        let fv = features::build(input);
        let estimate = self.invoke(&fv)?;
        Ok(PointPrediction {
            estimate,
            base: BaseEstimate::of(input),
        })
    }

    /// Два прогноза из одного вектора, отличающихся только `Is_weekend`.
    pub fn scenario_comparison(&self, input: &BookingInput) -> Result<ScenarioComparison> {
        let fv = features::build(input);
        let weekday = self.invoke(&fv.with_weekend(false))?;
        let weekend = self.invoke(&fv.with_weekend(true))? * WEEKEND_UPLIFT;
        Ok(ScenarioComparison {
            weekday,
            weekend,
            uplift: WEEKEND_UPLIFT,
            base: BaseEstimate::of(input),
        })
    }

    pub fn forecast(&self, input: &BookingInput) -> Result<Forecast> {
        let point = self.point_predict(input)?;
        let scenarios = self.scenario_comparison(input)?;
        Ok(Forecast {
            input: *input,
            prediction: confidence_band(point.estimate),
            base: point.base,
            scenarios,
        })
    }

    fn invoke(&self, fv: &FeatureVector) -> Result<f64> {
        let y = self.model.predict(fv).map_err(|e| {
            tracing::error!(model = self.model.name(), error = %e, "model invocation failed");
            HotelRevError::PredictionUnavailable(e.to_string())
        })?;
        if !y.is_finite() {
            return Err(HotelRevError::PredictionUnavailable(format!(
                "model '{}' returned non-finite value {y}",
                self.model.name()
            )));
        }
        tracing::debug!(
            model = self.model.name(),
            features = ?fv.named().collect::<Vec<_>>(),
            prediction = y,
            "model invoked"
        );
        Ok(y)
    }
}
