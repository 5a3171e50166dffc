use anyhow::{Context as AnyhowContext, Result};
use dashboard_search::{decode_collection, Decoded};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// Reads a JSON array of records from disk. Elements that do not match the
/// record shape are dropped and counted; anything other than an array fails.
pub async fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Decoded<T>> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse dataset {} as JSON", path.display()))?;
    let decoded = decode_collection(value)
        .with_context(|| format!("Invalid dataset {}", path.display()))?;

    if decoded.rejected > 0 {
        log::warn!(
            "Skipped {} malformed records in {}",
            decoded.rejected,
            path.display()
        );
    }
    log::debug!(
        "Loaded {} records from {}",
        decoded.records.len(),
        path.display()
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_protocol::Session;
    use std::fs as std_fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn loads_and_counts_rejects() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std_fs::write(
            &path,
            r#"[{"id": 1, "анализ": "Churn"}, {"id": {"nested": true}}, 7]"#,
        )
        .unwrap();

        let decoded: Decoded<Session> = load_collection(&path).await.unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.rejected, 2);
    }

    #[tokio::test]
    async fn missing_and_non_array_files_fail() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let err = load_collection::<Session>(&missing).await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read dataset"));

        let object = dir.path().join("object.json");
        std_fs::write(&object, r#"{"items": []}"#).unwrap();
        let err = load_collection::<Session>(&object).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid dataset"), "{message}");
        assert!(message.contains("Expected a JSON array"), "{message}");
    }
}
