//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HotelRevError {
    /// Источник данных отсутствует, повреждён или нарушает целостность.
    #[error("data load error: {0}")]
    DataLoad(String),

    #[error("model load error: {0}")]
    ModelLoad(String),

    /// Некорректный ввод пользователя; до модели такой ввод не доходит.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Модель не смогла выдать прогноз. Это не то же самое, что прогноз 0.
    #[error("prediction unavailable: {0}")]
    PredictionUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HotelRevError>;
