//! Построение вектора признаков для регрессионной модели.
//!
//! Порядок и смысл полей — контракт с обученной моделью. Любое изменение
//! порядка требует новой версии схемы и переобучения модели.

use crate::{
    error::{HotelRevError, Result},
    model::RoomType,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::ops::RangeInclusive;

/// Версия схемы признаков; версия в артефакте модели обязана с ней совпадать.
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

pub const FEATURE_COUNT: usize = 10;

/// Имена колонок в том порядке, в котором модель их ждёт.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Stay_duration",
    "Room_price",
    "Room_service_cost",
    "Price_per_day",
    "Checkin_month",
    "Checkin_dayofweek",
    "Is_weekend",
    "Room_type_Executive",
    "Room_type_Standard",
    "Room_type_Suite",
];

pub const STAY_DAYS: RangeInclusive<u32> = 1..=30;
pub const ROOM_PRICE: RangeInclusive<u32> = 1000..=20000;
pub const SERVICE_COST: RangeInclusive<u32> = 0..=10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    StayDuration,
    RoomPrice,
    RoomServiceCost,
    PricePerDay,
    CheckinMonth,
    CheckinDayOfWeek,
    IsWeekend,
    RoomTypeExecutive,
    RoomTypeStandard,
    RoomTypeSuite,
}

impl Feature {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }
}

/// Гипотетическое бронирование из формы прогноза. Создаётся только через
/// [`BookingInput::new`], поэтому всегда в допустимых границах.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BookingInput {
    stay_days: u32,
    room_price: u32,
    service_cost: u32,
    checkin: NaiveDate,
    room_type: RoomType,
}

impl BookingInput {
    pub fn new(
        stay_days: u32,
        room_price: u32,
        service_cost: u32,
        checkin: NaiveDate,
        room_type: RoomType,
    ) -> Result<Self> {
        check_range("stay duration (days)", stay_days, &STAY_DAYS)?;
        check_range("room price per day", room_price, &ROOM_PRICE)?;
        check_range("service cost", service_cost, &SERVICE_COST)?;
        Ok(Self {
            stay_days,
            room_price,
            service_cost,
            checkin,
            room_type,
        })
    }

    pub fn stay_days(&self) -> u32 {
        self.stay_days
    }

    pub fn room_price(&self) -> u32 {
        self.room_price
    }

    /// Совпадает с `room_price`; в схеме модели это отдельный признак.
    pub fn price_per_day(&self) -> u32 {
        self.room_price
    }

    pub fn service_cost(&self) -> u32 {
        self.service_cost
    }

    pub fn checkin(&self) -> NaiveDate {
        self.checkin
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn checkin_month(&self) -> u32 {
        self.checkin.month()
    }

    /// Понедельник = 0.
    pub fn checkin_weekday(&self) -> u32 {
        self.checkin.weekday().num_days_from_monday()
    }

    pub fn is_weekend(&self) -> bool {
        self.checkin_weekday() >= 5
    }
}

fn check_range(field: &str, value: u32, range: &RangeInclusive<u32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(HotelRevError::InvalidInput(format!(
            "{field} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )))
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, f: Feature) -> f64 {
        self.0[f.index()]
    }

    /// Копия вектора с другим значением `Is_weekend`; исходный не меняется.
    pub fn with_weekend(&self, weekend: bool) -> FeatureVector {
        let mut v = *self;
        v.0[Feature::IsWeekend.index()] = flag(weekend);
        v
    }

    /// Пары `имя -> значение`, удобно для логов и отладочного вывода.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Чистая функция без I/O: одинаковый ввод даёт побитно одинаковый вектор.
pub fn build(input: &BookingInput) -> FeatureVector {
    let rt = input.room_type();
    FeatureVector([
        f64::from(input.stay_days()),
        f64::from(input.room_price()),
        f64::from(input.service_cost()),
        f64::from(input.price_per_day()),
        f64::from(input.checkin_month()),
        f64::from(input.checkin_weekday()),
        flag(input.is_weekend()),
        flag(rt == RoomType::Executive),
        flag(rt == RoomType::Standard),
        flag(rt == RoomType::Suite),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_enum_matches_names() {
        assert_eq!(Feature::StayDuration.name(), "Stay_duration");
        assert_eq!(Feature::IsWeekend.name(), "Is_weekend");
        assert_eq!(Feature::RoomTypeSuite.name(), "Room_type_Suite");
        for rt in RoomType::ALL {
            let i = Feature::RoomTypeExecutive.index() + rt.index();
            assert_eq!(FEATURE_NAMES[i], rt.column());
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert!(BookingInput::new(1, 1000, 0, d, RoomType::Suite).is_ok());
        assert!(BookingInput::new(30, 20000, 10000, d, RoomType::Suite).is_ok());
        assert!(BookingInput::new(31, 5000, 0, d, RoomType::Suite).is_err());
        assert!(BookingInput::new(2, 999, 0, d, RoomType::Suite).is_err());
        assert!(BookingInput::new(2, 5000, 10001, d, RoomType::Suite).is_err());
    }

    #[test]
    fn named_pairs_follow_schema_order() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let fv = build(&BookingInput::new(3, 4000, 200, d, RoomType::Suite).unwrap());
        let pairs: Vec<_> = fv.named().collect();
        assert_eq!(pairs.len(), FEATURE_COUNT);
        assert_eq!(pairs[0], ("Stay_duration", 3.0));
        assert_eq!(pairs[Feature::RoomTypeSuite.index()], ("Room_type_Suite", 1.0));
    }
}
