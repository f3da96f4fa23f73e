//! Корень композиции: хранилища датасета и модели плюс сборка отчётов.

use hotelrevlib::{
    aggregate::{revenue_by_month, revenue_by_room_type, Kpis, Series},
    error::Result,
    features::BookingInput,
    filter::FilterSpec,
    model::{BookingRecord, Dataset, RoomType},
    predict::{Forecast, PredictionService},
    store::{DatasetStore, ModelStore},
};
use serde::Serialize;

pub struct Dashboard {
    data: DatasetStore,
    model: ModelStore,
}

#[derive(Debug, Serialize)]
pub struct OverviewReport<'a> {
    pub rows: usize,
    pub preview: &'a [BookingRecord],
    pub kpis: Kpis,
    pub revenue_by_room_type: Series,
    pub revenue_by_month: Series,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub filter: FilterSpec,
    /// Значения для селектора категории.
    pub room_types: Vec<RoomType>,
    pub kpis: Kpis,
    pub revenue_by_room_type: Series,
    pub revenue_by_month: Series,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<&'a BookingRecord>>,
}

impl Dashboard {
    pub fn new(data: DatasetStore, model: ModelStore) -> Self {
        Self { data, model }
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        self.data.get()
    }

    pub fn overview(&self, preview: usize) -> Result<OverviewReport<'_>> {
        let ds = self.data.get()?;
        let view = ds.view();
        Ok(OverviewReport {
            rows: ds.len(),
            preview: ds.head(preview),
            kpis: Kpis::compute(&view),
            revenue_by_room_type: revenue_by_room_type(&view),
            revenue_by_month: revenue_by_month(&view),
        })
    }

    pub fn analyze(&self, filter: FilterSpec, with_records: bool) -> Result<AnalysisReport<'_>> {
        let ds = self.data.get()?;
        let view = filter.apply(ds);
        Ok(AnalysisReport {
            filter,
            room_types: ds.room_types(),
            kpis: Kpis::compute(&view),
            revenue_by_room_type: revenue_by_room_type(&view),
            revenue_by_month: revenue_by_month(&view),
            records: with_records.then(|| view.rows().to_vec()),
        })
    }

    /// Датасет здесь не нужен и не загружается.
    pub fn predict(&self, input: &BookingInput) -> Result<Forecast> {
        let model = self.model.get()?;
        PredictionService::new(model).forecast(input)
    }
}
