use super::downloader::download_to_file;
use super::parser::parse_list_line;
use async_trait::async_trait;
use dashmap::DashMap;
use ndns_application::ports::{BlockFilterEnginePort, CacheStore};
use ndns_domain::cache_key::{list_member_key, list_registry_key};
use ndns_domain::config::BlockingConfig;
use ndns_domain::{
    normalize_domain, CacheValue, DomainError, FilterAction, ListDescriptor, ListState,
};
use rustc_hash::FxBuildHasher;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

struct EngineInner {
    cache: Arc<dyn CacheStore>,
    http_client: reqwest::Client,
    lists_dir: PathBuf,
    download_timeout: Duration,
    /// Also supplies the membership TTL for every list.
    default_list: ListDescriptor,
    states: DashMap<String, ListState, FxBuildHasher>,
    /// Last URI each list was loaded from, used by background refreshes.
    sources: DashMap<String, String, FxBuildHasher>,
    import_locks: DashMap<String, Arc<Mutex<()>>, FxBuildHasher>,
}

/// Filter-list engine: downloads list bodies to disk, imports them into the
/// cache store as membership entries and answers membership checks.
///
/// Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct FilterListEngine {
    inner: Arc<EngineInner>,
}

impl FilterListEngine {
    pub fn new(cache: Arc<dyn CacheStore>, config: &BlockingConfig) -> Result<Self, DomainError> {
        let download_timeout = Duration::from_secs(config.download_timeout_secs);
        let http_client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(concat!("ndns/", env!("CARGO_PKG_VERSION"), " (filter-sync)"))
            .connect_timeout(download_timeout)
            .build()
            .map_err(|e| DomainError::DownloadFailure {
                name: config.default_list.name.clone(),
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        let lists_dir = PathBuf::from(&config.lists_dir);
        let default = &config.default_list;
        let default_list = ListDescriptor::new(
            &default.name,
            &default.uri,
            default.ttl,
            lists_dir.join(format!("{}.txt", default.name)),
        );

        Ok(Self {
            inner: Arc::new(EngineInner {
                cache,
                http_client,
                lists_dir,
                download_timeout,
                default_list,
                states: DashMap::with_hasher(FxBuildHasher),
                sources: DashMap::with_hasher(FxBuildHasher),
                import_locks: DashMap::with_hasher(FxBuildHasher),
            }),
        })
    }

    fn file_path_for(&self, name: &str) -> PathBuf {
        self.inner.lists_dir.join(format!("{}.txt", name))
    }

    fn set_state(&self, name: &str, state: ListState) {
        debug!(list = %name, state = state.as_str(), "Filter list state change");
        self.inner.states.insert(name.to_string(), state);
    }

    /// Reads the list body line by line and writes one membership entry per
    /// domain. Returns the number of entries written.
    pub async fn import_list_domains(&self, descriptor: &ListDescriptor) -> Result<usize, DomainError> {
        let file = tokio::fs::File::open(&descriptor.file_path)
            .await
            .map_err(|e| {
                DomainError::IoError(format!(
                    "Cannot open list file {}: {}",
                    descriptor.file_path.display(),
                    e
                ))
            })?;

        let mut lines = BufReader::new(file).lines();
        let mut imported = 0usize;
        while let Some(line) = lines.next_line().await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed reading {}: {}",
                descriptor.file_path.display(),
                e
            ))
        })? {
            let Some(domain) = parse_list_line(&line) else {
                continue;
            };
            self.inner
                .cache
                .set(
                    &list_member_key(&descriptor.name, &domain),
                    CacheValue::Marker,
                    Some(descriptor.ttl),
                )
                .await?;
            imported += 1;
        }

        Ok(imported)
    }

    /// Publishes the descriptor. Until this runs, the list counts as unregistered.
    pub async fn register_list(&self, descriptor: &ListDescriptor) -> Result<(), DomainError> {
        self.inner
            .cache
            .set(
                &list_registry_key(&descriptor.name),
                CacheValue::List(descriptor.clone()),
                Some(descriptor.ttl),
            )
            .await
    }

    pub async fn check_domain_in_list(&self, domain: &str, list_name: &str) -> Result<bool, DomainError> {
        let domain = normalize_domain(domain);
        self.inner
            .cache
            .contains(&list_member_key(list_name, &domain))
            .await
    }

    async fn load_inner(&self, uri: &str, name: &str) -> Result<ListDescriptor, DomainError> {
        let lock = self
            .inner
            .import_locks
            .entry(name.to_string())
            .or_default()
            .clone();
        let _guard = lock.lock().await;

        self.inner.sources.insert(name.to_string(), uri.to_string());
        self.set_state(name, ListState::Downloading);

        let result = self.download_and_import(uri, name).await;

        match &result {
            Ok(_) => self.set_state(name, ListState::Registered),
            Err(_) => {
                let fallback = match self.check_list(name).await {
                    Ok(Some(_)) => ListState::Registered,
                    _ => ListState::Unregistered,
                };
                self.set_state(name, fallback);
            }
        }

        result
    }

    async fn download_and_import(&self, uri: &str, name: &str) -> Result<ListDescriptor, DomainError> {
        tokio::fs::create_dir_all(&self.inner.lists_dir)
            .await
            .map_err(|e| {
                DomainError::IoError(format!(
                    "Cannot create lists directory {}: {}",
                    self.inner.lists_dir.display(),
                    e
                ))
            })?;

        let file_path = self.file_path_for(name);
        let bytes = download_to_file(
            &self.inner.http_client,
            name,
            uri,
            &file_path,
            self.inner.download_timeout,
        )
        .await?;

        self.set_state(name, ListState::Importing);
        let descriptor = ListDescriptor::new(name, uri, self.inner.default_list.ttl, file_path);
        let imported = self.import_list_domains(&descriptor).await?;
        self.register_list(&descriptor).await?;

        info!(list = %name, uri = %uri, bytes, domains = imported, "Filter list registered");
        Ok(descriptor)
    }

    /// Starts a background load of `name` unless one is already running.
    fn schedule_refresh(&self, name: &str) {
        let uri = match self.inner.sources.get(name) {
            Some(uri) => uri.clone(),
            None if name == self.inner.default_list.name => self.inner.default_list.uri.clone(),
            None => {
                let error = DomainError::ListUnavailable(name.to_string());
                warn!(list = %name, error = %error, "No source known for filter list");
                return;
            }
        };

        {
            let mut state = self
                .inner
                .states
                .entry(name.to_string())
                .or_insert(ListState::Unregistered);
            if matches!(*state, ListState::Downloading | ListState::Importing) {
                return;
            }
            *state = ListState::Downloading;
        }

        let engine = self.clone();
        let name = name.to_string();
        tokio::spawn(async move {
            if let Err(e) = engine.load_inner(&uri, &name).await {
                warn!(list = %name, error = %e, "Background filter list refresh failed");
            }
        });
    }
}

#[async_trait]
impl BlockFilterEnginePort for FilterListEngine {
    async fn check_domain(
        &self,
        domain: &str,
        list_name: Option<&str>,
    ) -> Result<FilterAction, DomainError> {
        let Some(list) = list_name else {
            return Ok(FilterAction::Pass);
        };

        if self.check_list(list).await?.is_none() {
            debug!(list = %list, "Filter list not registered, passing and refreshing");
            self.schedule_refresh(list);
            return Ok(FilterAction::Pass);
        }

        if self.check_domain_in_list(domain, list).await? {
            Ok(FilterAction::Restrict)
        } else {
            Ok(FilterAction::Pass)
        }
    }

    async fn load(&self, uri: &str, name: &str) -> Result<ListDescriptor, DomainError> {
        self.load_inner(uri, name).await.map_err(|e| {
            warn!(list = %name, uri = %uri, error = %e, "Filter list load failed");
            e
        })
    }

    async fn reload(&self) -> Result<usize, DomainError> {
        let mut sources: Vec<(String, String)> = self
            .inner
            .sources
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let default = &self.inner.default_list;
        if !sources.iter().any(|(name, _)| *name == default.name) {
            sources.push((default.name.clone(), default.uri.clone()));
        }

        let mut reloaded = 0usize;
        let mut last_error = None;
        for (name, uri) in &sources {
            match self.load_inner(uri, name).await {
                Ok(_) => reloaded += 1,
                Err(e) => {
                    warn!(list = %name, uri = %uri, error = %e, "Filter list reload failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if reloaded == 0 => Err(e),
            _ => Ok(reloaded),
        }
    }

    async fn check_list(&self, name: &str) -> Result<Option<ListDescriptor>, DomainError> {
        let value = self.inner.cache.get(&list_registry_key(name)).await?;
        Ok(value.and_then(CacheValue::into_list))
    }

    fn default_list(&self) -> ListDescriptor {
        self.inner.default_list.clone()
    }

    fn list_state(&self, name: &str) -> ListState {
        self.inner
            .states
            .get(name)
            .map(|state| *state)
            .unwrap_or(ListState::Unregistered)
    }

    fn known_lists(&self) -> Vec<String> {
        self.inner
            .sources
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}
