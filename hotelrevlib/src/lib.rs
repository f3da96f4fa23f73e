//! hotelrevlib — аналитика выручки по бронированиям и прогноз выручки
//! для гипотетического бронирования (CSV-датасет + внешняя регрессионная модель).

pub mod aggregate;
pub mod artifact;
pub mod error;
pub mod features;
pub mod filter;
pub mod model;
pub mod predict;
pub mod store;
pub mod traits;

pub mod formats {
    pub mod csv;
}
