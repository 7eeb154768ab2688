use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const MAX_SAVED_SEARCHES: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: String,
    pub name: String,
    pub params: serde_json::Value,
    pub owner_id: String,
    pub created_at: String,
}

/// File-backed saved-search store. Mutations are read-modify-write under the
/// lock, persisted via tmp+rename.
pub struct SavedSearchStore {
    path: PathBuf,
    searches: Mutex<Vec<SavedSearch>>,
}

impl SavedSearchStore {
    pub async fn load(path: PathBuf) -> Result<Self, String> {
        let searches = if path.exists() {
            let data = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| format!("failed to read saved searches: {}", err))?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)
                    .map_err(|err| format!("failed to parse saved searches: {}", err))?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            searches: Mutex::new(searches),
        })
    }

    pub async fn list(&self, owner_id: Option<&str>) -> Vec<SavedSearch> {
        let guard = self.searches.lock().await;
        match owner_id {
            Some(owner) => guard
                .iter()
                .filter(|search| search.owner_id == owner)
                .cloned()
                .collect(),
            None => guard.clone(),
        }
    }

    pub async fn get(&self, search_id: &str) -> Option<SavedSearch> {
        let guard = self.searches.lock().await;
        guard.iter().find(|search| search.id == search_id).cloned()
    }

    pub async fn upsert(&self, search: SavedSearch) -> Result<SavedSearch, String> {
        let mut guard = self.searches.lock().await;
        guard.retain(|existing| existing.id != search.id);
        guard.insert(0, search.clone());
        if guard.len() > MAX_SAVED_SEARCHES {
            guard.truncate(MAX_SAVED_SEARCHES);
        }
        self.persist(&guard).await?;
        Ok(search)
    }

    pub async fn delete(&self, search_id: &str) -> Result<bool, String> {
        let mut guard = self.searches.lock().await;
        let before = guard.len();
        guard.retain(|search| search.id != search_id);
        let removed = guard.len() != before;
        if removed {
            self.persist(&guard).await?;
        }
        Ok(removed)
    }

    async fn persist(&self, searches: &[SavedSearch]) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(searches)
            .map_err(|err| format!("failed to serialize saved searches: {}", err))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| format!("failed to write saved searches: {}", err))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| format!("failed to finalize saved searches: {}", err))?;
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| format!("failed to create saved-search dir: {}", err))
}
