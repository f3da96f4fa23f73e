//! Фильтры по категории номера и типу проживания.
//!
//! Фильтр никогда не меняет датасет: результат — представление из ссылок на строки.

use crate::{
    error::{HotelRevError, Result},
    model::{BookingRecord, Dataset, RoomType},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StayType {
    #[default]
    All,
    Weekend,
    Weekday,
}

impl StayType {
    fn matches(self, is_weekend: bool) -> bool {
        match self {
            StayType::All => true,
            StayType::Weekend => is_weekend,
            StayType::Weekday => !is_weekend,
        }
    }
}

impl fmt::Display for StayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StayType::All => "All",
            StayType::Weekend => "Weekend",
            StayType::Weekday => "Weekday",
        };
        f.write_str(s)
    }
}

impl FromStr for StayType {
    type Err = HotelRevError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StayType::All),
            "weekend" => Ok(StayType::Weekend),
            "weekday" => Ok(StayType::Weekday),
            other => Err(HotelRevError::InvalidInput(format!(
                "unknown stay type '{other}', expected All, Weekend or Weekday"
            ))),
        }
    }
}

/// Значение селектора категории: `All` снимает фильтр.
pub fn parse_room_selector(s: &str) -> Result<Option<RoomType>> {
    if s.trim().eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

/// Набор предикатов, объединённых через AND.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSpec {
    pub room_type: Option<RoomType>,
    pub stay_type: StayType,
}

impl FilterSpec {
    pub fn new(room_type: Option<RoomType>, stay_type: StayType) -> Self {
        Self { room_type, stay_type }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.room_type.is_none() && self.stay_type == StayType::All
    }

    pub fn matches(&self, r: &BookingRecord) -> bool {
        self.room_type.map_or(true, |rt| r.room_type == rt) && self.stay_type.matches(r.is_weekend)
    }

    pub fn apply<'a>(&self, ds: &'a Dataset) -> FilteredView<'a> {
        ds.view().refine(self)
    }
}

/// Read-only подпоследовательность строк датасета в исходном порядке.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a BookingRecord>,
}

impl<'a> FilteredView<'a> {
    pub(crate) fn from_rows(rows: Vec<&'a BookingRecord>) -> Self {
        Self { rows }
    }

    /// Применяет фильтр поверх уже отфильтрованного представления.
    pub fn refine(&self, spec: &FilterSpec) -> FilteredView<'a> {
        let rows: Vec<&'a BookingRecord> = self
            .rows
            .iter()
            .copied()
            .filter(|r| spec.matches(r))
            .collect();
        tracing::debug!(
            room_type = ?spec.room_type,
            stay_type = %spec.stay_type,
            before = self.rows.len(),
            after = rows.len(),
            "applied filter"
        );
        FilteredView { rows }
    }

    pub fn rows(&self) -> &[&'a BookingRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a BookingRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
