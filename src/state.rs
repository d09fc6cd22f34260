use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::errors::AppError;
use crate::services::ai::Classifier;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub classifier: Classifier,
}

impl AppState {
    pub fn db(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("database lock poisoned")))
    }
}
