//! Доменные модели датасета бронирований.

use crate::error::{HotelRevError, Result};
use crate::filter::FilteredView;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Категория номера. Порядок объявления совпадает с порядком one-hot колонок
/// и задаёт приоритет при разборе неоднозначных строк.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomType {
    Executive,
    Standard,
    Suite,
}

pub const ROOM_TYPE_PREFIX: &str = "Room_type_";

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Executive, RoomType::Standard, RoomType::Suite];

    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Executive => "Executive",
            RoomType::Standard => "Standard",
            RoomType::Suite => "Suite",
        }
    }

    /// Имя one-hot колонки в датасете и в схеме признаков.
    pub fn column(self) -> &'static str {
        match self {
            RoomType::Executive => "Room_type_Executive",
            RoomType::Standard => "Room_type_Standard",
            RoomType::Suite => "Room_type_Suite",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Выводит категорию из трёх one-hot флагов (порядок как в `ALL`).
    ///
    /// `Strict` требует ровно один флаг. `FirstWins` ведёт себя как idxmax:
    /// побеждает первый поднятый флаг. Строка без флагов не разрешается ни
    /// при какой политике.
    pub fn from_one_hot(flags: [bool; 3], policy: RoomTypePolicy) -> Option<RoomType> {
        let raised = flags.iter().filter(|f| **f).count();
        match (raised, policy) {
            (0, _) => None,
            (1, _) | (_, RoomTypePolicy::FirstWins) => flags
                .iter()
                .position(|f| *f)
                .map(|i| RoomType::ALL[i]),
            (_, RoomTypePolicy::Strict) => None,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = HotelRevError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bare = s.strip_prefix(ROOM_TYPE_PREFIX).unwrap_or(s);
        RoomType::ALL
            .into_iter()
            .find(|rt| rt.as_str().eq_ignore_ascii_case(bare))
            .ok_or_else(|| {
                HotelRevError::InvalidInput(format!(
                    "unknown room type '{s}', expected one of Executive, Standard, Suite"
                ))
            })
    }
}

/// Что делать со строкой, где поднято несколько one-hot флагов.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoomTypePolicy {
    /// Нарушение целостности — ошибка загрузки.
    #[default]
    Strict,
    /// Побеждает первый флаг в порядке Executive, Standard, Suite.
    FirstWins,
}

/// Одна строка датасета.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    pub booking_id: String,
    pub total_bill: Decimal,
    pub checkin_month: u8,
    pub is_weekend: bool,
    pub room_type_executive: bool,
    pub room_type_standard: bool,
    pub room_type_suite: bool,
    /// Выводится из one-hot флагов при загрузке.
    pub room_type: RoomType,
}

impl BookingRecord {
    pub fn room_flags(&self) -> [bool; 3] {
        [
            self.room_type_executive,
            self.room_type_standard,
            self.room_type_suite,
        ]
    }
}

/// Неизменяемый после загрузки набор бронирований.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<BookingRecord>,
}

impl Dataset {
    pub fn new(records: Vec<BookingRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Первые `n` строк для превью.
    pub fn head(&self, n: usize) -> &[BookingRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Нефильтрованное представление всего датасета.
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::from_rows(self.records.iter().collect())
    }

    /// Категории, реально встречающиеся в данных (для селектора фильтра).
    pub fn room_types(&self) -> Vec<RoomType> {
        let mut seen: Vec<RoomType> = Vec::new();
        for r in &self.records {
            if !seen.contains(&r.room_type) {
                seen.push(r.room_type);
            }
        }
        seen.sort_by_key(|rt| rt.as_str());
        seen
    }
}
