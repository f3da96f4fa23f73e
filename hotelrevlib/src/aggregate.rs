//! Агрегаты для KPI и рядов графиков.

use crate::{filter::FilteredView, model::RoomType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    RoomType,
    CheckinMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Mean,
    DistinctBookings,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(untagged)]
pub enum GroupKey {
    Room(RoomType),
    Month(u8),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Room(rt) => write!(f, "{rt}"),
            GroupKey::Month(m) => write!(f, "{m}"),
        }
    }
}

/// Упорядоченный ряд `ключ -> значение`.
pub type Series = Vec<(GroupKey, Decimal)>;

#[derive(Default)]
struct Bucket<'a> {
    sum: Decimal,
    rows: usize,
    ids: HashSet<&'a str>,
}

/// Группирует представление и считает агрегат по `Total_bill`.
///
/// Группы по категории сортируются по убыванию значения, по месяцу —
/// по возрастанию месяца. Пустое представление даёт пустой ряд.
pub fn group(view: &FilteredView<'_>, by: GroupBy, agg: Aggregate) -> Series {
    let mut buckets: BTreeMap<GroupKey, Bucket<'_>> = BTreeMap::new();
    for r in view.iter() {
        let key = match by {
            GroupBy::RoomType => GroupKey::Room(r.room_type),
            GroupBy::CheckinMonth => GroupKey::Month(r.checkin_month),
        };
        let b = buckets.entry(key).or_default();
        b.sum += r.total_bill;
        b.rows += 1;
        b.ids.insert(r.booking_id.as_str());
    }

    // BTreeMap уже отсортирован по ключу; стабильная сортировка сохраняет
    // порядок категорий при равных суммах.
    let mut series: Series = buckets
        .into_iter()
        .map(|(k, b)| {
            let v = match agg {
                Aggregate::Sum => b.sum,
                Aggregate::Mean => b.sum / Decimal::from(b.rows),
                Aggregate::DistinctBookings => Decimal::from(b.ids.len()),
            };
            (k, v)
        })
        .collect();

    if by == GroupBy::RoomType {
        series.sort_by(|a, b| b.1.cmp(&a.1));
    }
    series
}

pub fn revenue_by_room_type(view: &FilteredView<'_>) -> Series {
    group(view, GroupBy::RoomType, Aggregate::Sum)
}

pub fn revenue_by_month(view: &FilteredView<'_>) -> Series {
    group(view, GroupBy::CheckinMonth, Aggregate::Sum)
}

/// Сводные показатели.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Kpis {
    pub total_revenue: Decimal,
    /// Число уникальных `Booking_id`.
    pub bookings: usize,
    pub rows: usize,
    /// `None` — нет данных (пустая выборка), а не ноль.
    pub average_revenue: Option<Decimal>,
}

impl Kpis {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        let total_revenue: Decimal = view.iter().map(|r| r.total_bill).sum();
        let bookings = view
            .iter()
            .map(|r| r.booking_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let rows = view.len();
        let average_revenue = (rows > 0).then(|| total_revenue / Decimal::from(rows));

        Kpis {
            total_revenue,
            bookings,
            rows,
            average_revenue,
        }
    }
}
