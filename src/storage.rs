use crate::errors::PersistenceError;
use crate::models::Ledger;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn load_ledger(path: &Path) -> Ledger {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(ledger) => ledger,
            Err(err) => {
                error!("failed to parse workouts file: {err}");
                Ledger::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ledger::default(),
        Err(err) => {
            error!("failed to read workouts file: {err}");
            Ledger::default()
        }
    }
}

pub async fn persist_ledger(path: &Path, ledger: &Ledger) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(ledger)?;
    fs::write(path, payload).await?;
    Ok(())
}

/// Deletes the slot. A slot that is already gone counts as removed.
pub async fn remove_ledger(path: &Path) -> Result<(), PersistenceError> {
    match fs::remove_file(path).await {
        Ok(()) => {
            info!("removed workouts file {}", path.display());
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
pub(crate) fn unique_data_path(tag: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("reptrack_{tag}_{}_{}.json", std::process::id(), nanos));
    path
}
