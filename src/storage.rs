use crate::backend::{AuthSession, AuthUser};
use crate::countries::CountryCache;
use crate::errors::AppError;
use crate::models::{LocalProfile, ViewMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::error;

/// Minimal record of whoever signed in last, kept across sign-outs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastKnownUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub seen_at: DateTime<Utc>,
}

impl LastKnownUser {
    pub fn from_user(user: &AuthUser, seen_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone().unwrap_or_default(),
            name: user.user_metadata.name.clone(),
            seen_at,
        }
    }
}

/// Everything the app keeps on the local disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalState {
    #[serde(default)]
    pub country_cache: Option<CountryCache>,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub profile: LocalProfile,
    #[serde(default)]
    pub last_user: Option<LastKnownUser>,
    #[serde(default)]
    pub session: Option<AuthSession>,
}

pub async fn load_state(path: &Path) -> LocalState {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(err) => {
                error!("failed to parse local state file: {err}");
                LocalState::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => LocalState::default(),
        Err(err) => {
            error!("failed to read local state file: {err}");
            LocalState::default()
        }
    }
}

pub async fn persist_state(path: &Path, state: &LocalState) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(state).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::CountryStore;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("travel_journal_{name}_{}_{nanos}.json", std::process::id()))
    }

    #[tokio::test]
    async fn missing_or_corrupt_file_loads_defaults() {
        let path = temp_path("missing");
        assert_eq!(load_state(&path).await, LocalState::default());

        fs::write(&path, b"{ not json").await.unwrap();
        assert_eq!(load_state(&path).await, LocalState::default());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn country_cache_survives_a_reload() {
        let path = temp_path("cache");
        let now = Utc::now();

        let mut state = LocalState {
            view_mode: ViewMode::List,
            ..LocalState::default()
        };
        state.profile.bio = Some("Slow traveller".into());
        let mut first = CountryStore::default();
        assert!(!first.initialize(&mut state.country_cache, now).unwrap());
        persist_state(&path, &state).await.unwrap();

        let mut reloaded = load_state(&path).await;
        assert_eq!(reloaded.view_mode, ViewMode::List);
        assert_eq!(reloaded.profile.bio.as_deref(), Some("Slow traveller"));

        let mut second = CountryStore::default();
        assert!(second.initialize(&mut reloaded.country_cache, now).unwrap());
        assert_eq!(first.len(), second.len());
        let codes = |store: &CountryStore| {
            store
                .all()
                .iter()
                .map(|c| c.code.clone())
                .collect::<std::collections::BTreeSet<_>>()
        };
        assert_eq!(codes(&first), codes(&second));
        let _ = fs::remove_file(&path).await;
    }
}
