//! Однократная загрузка датасета и модели.
//!
//! Хранилища создаются в корне композиции (CLI) и живут до конца процесса.
//! Первый `get()` читает источник, последующие отдают закэшированное значение.
//! Неудачная загрузка не кэшируется. После загрузки данные только читаются,
//! поэтому хранилище можно раздавать по `&` в том числе между потоками.

use crate::{
    artifact::LinearRevenueModel,
    error::{HotelRevError, Result},
    formats::csv::Csv,
    model::{Dataset, RoomTypePolicy},
};
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub fn load_dataset(path: &Path, policy: RoomTypePolicy) -> Result<Dataset> {
    let file = File::open(path)
        .map_err(|e| HotelRevError::DataLoad(format!("cannot open {}: {e}", path.display())))?;
    let ds = Csv::read_with_policy(BufReader::new(file), policy)
        .map_err(|e| match e {
            HotelRevError::DataLoad(msg) => {
                HotelRevError::DataLoad(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
    tracing::info!(path = %path.display(), rows = ds.len(), "loaded booking dataset");
    Ok(ds)
}

#[derive(Debug)]
pub struct DatasetStore {
    path: PathBuf,
    policy: RoomTypePolicy,
    cell: OnceCell<Dataset>,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>, policy: RoomTypePolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            cell: OnceCell::new(),
        }
    }

    /// Уже загруженный датасет, без чтения файла.
    pub fn from_dataset(ds: Dataset) -> Self {
        Self {
            path: PathBuf::new(),
            policy: RoomTypePolicy::default(),
            cell: OnceCell::with_value(ds),
        }
    }

    pub fn get(&self) -> Result<&Dataset> {
        self.cell
            .get_or_try_init(|| load_dataset(&self.path, self.policy))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[derive(Debug)]
pub struct ModelStore {
    path: PathBuf,
    cell: OnceCell<LinearRevenueModel>,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<&LinearRevenueModel> {
        self.cell
            .get_or_try_init(|| LinearRevenueModel::load(&self.path))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
