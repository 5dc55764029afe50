use crate::backend::{AuthSession, SupabaseClient};
use crate::config::Config;
use crate::countries::CountryStore;
use crate::errors::AppError;
use crate::storage::{LastKnownUser, LocalState, load_state, persist_state};
use crate::ui::Toast;
use chrono::Utc;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Application root. Owns the country store, the signed-in session, the
/// local state file and the pending toast; handlers receive it by value.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: SupabaseClient,
    pub countries: Arc<RwLock<CountryStore>>,
    pub local: Arc<Mutex<LocalState>>,
    pub toast: Arc<Mutex<Option<Toast>>>,
}

impl AppState {
    pub fn new(config: Config, backend: SupabaseClient, countries: CountryStore, local: LocalState) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            countries: Arc::new(RwLock::new(countries)),
            local: Arc::new(Mutex::new(local)),
            toast: Arc::new(Mutex::new(None)),
        }
    }

    /// Loads local state, fills the country store and builds the backend client.
    pub async fn bootstrap(config: Config) -> Result<Self, BoxError> {
        if let Some(parent) = config.data_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut local = load_state(&config.data_path).await;
        let mut countries = CountryStore::new(config.country_cache_ttl_days);
        let cached = countries.initialize(&mut local.country_cache, Utc::now())?;
        if !cached {
            persist_state(&config.data_path, &local)
                .await
                .map_err(|err| err.message)?;
        }
        info!(countries = countries.len(), cached, "reference data ready");

        let backend = SupabaseClient::from_config(&config)?;
        if local.session.is_some() {
            info!("restored saved session");
        }
        Ok(Self::new(config, backend, countries, local))
    }

    pub async fn session(&self) -> Option<AuthSession> {
        self.local.lock().await.session.clone()
    }

    /// Applies `change` to the local state and writes it back to disk.
    pub async fn update_local<F>(&self, change: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut LocalState),
    {
        let mut local = self.local.lock().await;
        change(&mut local);
        persist_state(&self.config.data_path, &local).await
    }

    pub async fn store_session(&self, session: AuthSession) -> Result<(), AppError> {
        let last_user = LastKnownUser::from_user(&session.user, Utc::now());
        self.update_local(|local| {
            local.session = Some(session);
            local.last_user = Some(last_user);
        })
        .await
    }

    pub async fn clear_session(&self) -> Result<(), AppError> {
        self.update_local(|local| local.session = None).await
    }

    pub async fn push_toast(&self, toast: Toast) {
        *self.toast.lock().await = Some(toast);
    }

    pub async fn take_toast(&self) -> Option<Toast> {
        self.toast.lock().await.take()
    }

    /// Regenerates the country list from the built-in table.
    pub async fn refresh_countries(&self) -> Result<usize, AppError> {
        let mut fresh = CountryStore::new(self.config.country_cache_ttl_days);
        let mut local = self.local.lock().await;
        local.country_cache = None;
        fresh
            .initialize(&mut local.country_cache, Utc::now())
            .map_err(AppError::internal)?;
        persist_state(&self.config.data_path, &local).await?;
        drop(local);

        let count = fresh.len();
        *self.countries.write().await = fresh;
        info!(count, "country list refreshed");
        Ok(count)
    }
}
