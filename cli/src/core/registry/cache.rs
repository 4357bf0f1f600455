//! # Registry Cache
//!
//! File: cli/src/core/registry/cache.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! `RegistryCache` turns a game name into a `GameDefinition`. It layers three
//! sources, consulted in order:
//!
//! 1. An in-process map. Once a name is resolved it maps to the same
//!    `Arc<GameDefinition>` for the rest of the run.
//! 2. A fresh file in the on-disk cache (`DiskStore`).
//! 3. The remote registry over HTTP. A successful response is written back to
//!    disk (best effort). When the remote fails, a stale disk file is used if
//!    one exists.
//!
//! A per-game 404 is authoritative: it yields `RegistryError::NotFound` even
//! when a stale file is on disk. The index (`index.yaml`) has no such rule and
//! falls back to its stale copy on any non-success status.
//!
//! ## Usage
//!
//! ```rust
//! let mut registry = RegistryCache::from_config(&cfg.registry)?;
//! let game = registry.resolve("minecraft").await?;
//! println!("{} uses {}", game.title(), game.image);
//! ```
//!
use super::error::{RegistryError, RegistryResult};
use super::game::{GameDefinition, IndexFile};
use super::store::DiskStore;
use crate::core::config::RegistryConfig;
use crate::core::error::Result;
use crate::core::validate;
use anyhow::Context;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Result of one GET against the registry.
enum Fetched {
    Body(Vec<u8>),
    Status(StatusCode),
}

pub struct RegistryCache {
    client: reqwest::Client,
    base_url: String,
    store: DiskStore,
    games: HashMap<String, Arc<GameDefinition>>,
}

impl RegistryCache {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        cache_dir: impl Into<PathBuf>,
        ttl: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            store: DiskStore::new(cache_dir, ttl),
            games: HashMap::new(),
        }
    }

    /// Builds the HTTP client and cache from the `[registry]` config section.
    pub fn from_config(cfg: &RegistryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .user_agent(concat!("hostathome/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for the game registry")?;
        Ok(Self::new(
            client,
            cfg.base_url.clone(),
            &cfg.cache_dir,
            Duration::from_secs(cfg.cache_ttl_secs),
        ))
    }

    pub fn cache_dir(&self) -> &Path {
        self.store.dir()
    }

    /// Returns the definition for `name`.
    ///
    /// # Errors
    ///
    /// - `InvalidGameName` before any I/O if the name is unsafe.
    /// - `NotFound` if the registry answers 404.
    /// - `Transport` / `Remote` if the registry fails and nothing is cached.
    /// - `Parse` if the bytes are not a valid definition.
    #[instrument(skip(self))]
    pub async fn resolve(&mut self, name: &str) -> RegistryResult<Arc<GameDefinition>> {
        if let Some(game) = self.games.get(name) {
            debug!("Registry memo hit for '{}'", name);
            return Ok(Arc::clone(game));
        }

        validate::check_game_name(name).map_err(|reason| RegistryError::InvalidGameName {
            name: name.to_string(),
            reason,
        })?;

        let bytes = self.fetch_game(name).await?;
        let game: GameDefinition =
            serde_yaml::from_slice(&bytes).map_err(|source| RegistryError::Parse {
                what: format!("game definition '{}'", name),
                source,
            })?;

        let game = Arc::new(game);
        self.games.insert(name.to_string(), Arc::clone(&game));
        Ok(game)
    }

    /// Resolves every game in the registry index, in index order. Entries that
    /// fail to resolve are logged and skipped.
    #[instrument(skip(self))]
    pub async fn list_all(&mut self) -> RegistryResult<Vec<Arc<GameDefinition>>> {
        let names = self.fetch_index().await?;
        let mut games = Vec::with_capacity(names.len());
        for name in &names {
            match self.resolve(name).await {
                Ok(game) => games.push(game),
                Err(e) => debug!("Skipping '{}' from registry index: {}", name, e),
            }
        }
        Ok(games)
    }

    fn game_url(&self, name: &str) -> String {
        format!("{}/games/{}.yaml", self.base_url, name)
    }

    fn index_url(&self) -> String {
        format!("{}/index.yaml", self.base_url)
    }

    async fn get(&self, url: &str) -> std::result::Result<Fetched, reqwest::Error> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok(Fetched::Status(status));
        }
        let body = response.bytes().await?;
        Ok(Fetched::Body(body.to_vec()))
    }

    /// Reads any cached copy (fresh or stale) for use as a fallback.
    /// An unreadable file counts as absent so the remote failure surfaces.
    fn stale(&self, path: &Path) -> Option<Vec<u8>> {
        match self.store.read_any(path) {
            Ok(bytes) => bytes,
            Err(source) => {
                let err = RegistryError::Io {
                    path: path.to_path_buf(),
                    source,
                };
                warn!("Ignoring cached copy: {}", err);
                None
            }
        }
    }

    fn persist(&self, path: &Path, bytes: &[u8]) {
        if let Err(e) = self.store.write(path, bytes) {
            warn!("Failed to write registry cache {}: {}", path.display(), e);
        }
    }

    async fn fetch_game(&self, name: &str) -> RegistryResult<Vec<u8>> {
        let path = self.store.game_path(name);
        if let Some(bytes) = self.store.read_fresh(&path) {
            debug!("Serving '{}' from fresh cache {}", name, path.display());
            return Ok(bytes);
        }

        let url = self.game_url(name);
        match self.get(&url).await {
            Ok(Fetched::Body(bytes)) => {
                self.persist(&path, &bytes);
                Ok(bytes)
            }
            Ok(Fetched::Status(StatusCode::NOT_FOUND)) => Err(RegistryError::NotFound {
                name: name.to_string(),
            }),
            Ok(Fetched::Status(status)) => match self.stale(&path) {
                Some(bytes) => {
                    info!("Registry returned {} for '{}'; using cached copy", status, name);
                    Ok(bytes)
                }
                None => Err(RegistryError::Remote { url, status }),
            },
            Err(source) => match self.stale(&path) {
                Some(bytes) => {
                    info!("Registry unreachable ({}); using cached copy of '{}'", source, name);
                    Ok(bytes)
                }
                None => Err(RegistryError::Transport { url, source }),
            },
        }
    }

    /// A cached index is only usable if it is a non-empty JSON array of names.
    fn cached_index(&self, path: &Path, require_fresh: bool) -> Option<Vec<String>> {
        let bytes = if require_fresh {
            self.store.read_fresh(path)?
        } else {
            self.store.read_any(path).ok()??
        };
        let names: Vec<String> = serde_json::from_slice(&bytes).ok()?;
        (!names.is_empty()).then_some(names)
    }

    async fn fetch_index(&self) -> RegistryResult<Vec<String>> {
        let path = self.store.index_path();
        if let Some(names) = self.cached_index(&path, true) {
            debug!("Serving registry index from fresh cache ({} games)", names.len());
            return Ok(names);
        }

        let url = self.index_url();
        let failure = match self.get(&url).await {
            Ok(Fetched::Body(bytes)) => {
                let index: IndexFile =
                    serde_yaml::from_slice(&bytes).map_err(|source| RegistryError::Parse {
                        what: "registry index".to_string(),
                        source,
                    })?;
                match serde_json::to_vec(&index.games) {
                    Ok(json) => self.persist(&path, &json),
                    Err(e) => warn!("Failed to encode registry index for caching: {}", e),
                }
                return Ok(index.games);
            }
            Ok(Fetched::Status(status)) => RegistryError::Remote { url, status },
            Err(source) => RegistryError::Transport { url, source },
        };

        match self.cached_index(&path, false) {
            Some(names) => {
                info!("{}; using cached registry index", failure);
                Ok(names)
            }
            None => Err(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::Uri;
    use axum::Router;
    use std::fs::File;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::SystemTime;
    use tempfile::{tempdir, TempDir};

    /// In-process registry serving canned `(status, body)` pairs by path.
    #[derive(Clone, Default)]
    struct FakeRegistry {
        routes: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
        hits: Arc<AtomicUsize>,
    }

    impl FakeRegistry {
        fn set(&self, path: &str, status: StatusCode, body: &str) {
            self.routes
                .lock()
                .unwrap()
                .insert(path.to_string(), (status, body.to_string()));
        }

        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }

        async fn start(&self) -> String {
            let app = Router::new().fallback(serve).with_state(self.clone());
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            format!("http://{}", addr)
        }
    }

    async fn serve(State(fake): State<FakeRegistry>, uri: Uri) -> (StatusCode, String) {
        fake.hits.fetch_add(1, Ordering::SeqCst);
        fake.routes
            .lock()
            .unwrap()
            .get(uri.path())
            .cloned()
            .unwrap_or((StatusCode::NOT_FOUND, String::new()))
    }

    /// A base URL nothing listens on.
    fn unreachable_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn cache_for(base_url: &str, dir: &Path) -> RegistryCache {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        RegistryCache::new(client, base_url, dir, Duration::from_secs(3600))
    }

    fn write_stale(path: &Path, body: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(7200))
            .unwrap();
    }

    fn game_yaml(name: &str, image: &str) -> String {
        format!(
            "name: {name}\ndisplay_name: {name}\ndescription: test game\nimage: {image}\nports:\n  player: 25565\n"
        )
    }

    async fn setup() -> (FakeRegistry, String, TempDir) {
        let fake = FakeRegistry::default();
        let url = fake.start().await;
        (fake, url, tempdir().unwrap())
    }

    #[tokio::test]
    async fn test_resolve_fetches_and_persists() {
        let (fake, url, dir) = setup().await;
        fake.set("/games/minecraft.yaml", StatusCode::OK, &game_yaml("minecraft", "mc:1"));
        let mut cache = cache_for(&url, dir.path());

        let game = cache.resolve("minecraft").await.unwrap();

        assert_eq!(game.image, "mc:1");
        assert_eq!(fake.hits(), 1);
        let on_disk = std::fs::read_to_string(dir.path().join("minecraft.yaml")).unwrap();
        assert_eq!(on_disk, game_yaml("minecraft", "mc:1"));
    }

    #[tokio::test]
    async fn test_resolve_twice_is_pointer_equal_despite_remote_change() {
        let (fake, url, dir) = setup().await;
        fake.set("/games/mc.yaml", StatusCode::OK, &game_yaml("mc", "mc:1"));
        let mut cache = cache_for(&url, dir.path());

        let first = cache.resolve("mc").await.unwrap();
        fake.set("/games/mc.yaml", StatusCode::OK, &game_yaml("mc", "mc:2"));
        std::fs::remove_file(dir.path().join("mc.yaml")).unwrap();
        let second = cache.resolve("mc").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.image, "mc:1");
        assert_eq!(fake.hits(), 1);
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_network() {
        let (fake, url, dir) = setup().await;
        std::fs::write(dir.path().join("terraria.yaml"), game_yaml("terraria", "tr:local")).unwrap();
        let mut cache = cache_for(&url, dir.path());

        let game = cache.resolve("terraria").await.unwrap();

        assert_eq!(game.image, "tr:local");
        assert_eq!(fake.hits(), 0);
    }

    #[tokio::test]
    async fn test_stale_cache_is_refreshed() {
        let (fake, url, dir) = setup().await;
        write_stale(&dir.path().join("mc.yaml"), &game_yaml("mc", "mc:old"));
        fake.set("/games/mc.yaml", StatusCode::OK, &game_yaml("mc", "mc:new"));
        let mut cache = cache_for(&url, dir.path());

        let game = cache.resolve("mc").await.unwrap();

        assert_eq!(game.image, "mc:new");
        assert_eq!(fake.hits(), 1);
        let store = DiskStore::new(dir.path(), Duration::from_secs(3600));
        assert!(store.is_fresh(&dir.path().join("mc.yaml")));
    }

    #[tokio::test]
    async fn test_not_found_ignores_stale_cache() {
        let (fake, url, dir) = setup().await;
        write_stale(&dir.path().join("retired.yaml"), &game_yaml("retired", "old:1"));
        let mut cache = cache_for(&url, dir.path());

        let err = cache.resolve("retired").await.unwrap_err();

        assert!(err.is_not_found(), "unexpected error: {err}");
        assert_eq!(fake.hits(), 1);
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_stale_cache() {
        let (fake, url, dir) = setup().await;
        write_stale(&dir.path().join("mc.yaml"), &game_yaml("mc", "mc:stale"));
        fake.set("/games/mc.yaml", StatusCode::INTERNAL_SERVER_ERROR, "boom");
        let mut cache = cache_for(&url, dir.path());

        let game = cache.resolve("mc").await.unwrap();
        assert_eq!(game.image, "mc:stale");
    }

    #[tokio::test]
    async fn test_server_error_without_cache_is_remote_error() {
        let (fake, url, dir) = setup().await;
        fake.set("/games/mc.yaml", StatusCode::SERVICE_UNAVAILABLE, "");
        let mut cache = cache_for(&url, dir.path());

        let err = cache.resolve("mc").await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Remote { status: StatusCode::SERVICE_UNAVAILABLE, .. }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_with_stale_cache_serves_stale() {
        let dir = tempdir().unwrap();
        write_stale(&dir.path().join("mc.yaml"), &game_yaml("mc", "mc:stale"));
        let mut cache = cache_for(&unreachable_url(), dir.path());

        let game = cache.resolve("mc").await.unwrap();
        assert_eq!(game.image, "mc:stale");
    }

    #[tokio::test]
    async fn test_unreachable_without_cache_is_transport_error() {
        let dir = tempdir().unwrap();
        let mut cache = cache_for(&unreachable_url(), dir.path());

        let err = cache.resolve("mc").await.unwrap_err();
        assert!(matches!(err, RegistryError::Transport { .. }), "got {err}");
    }

    #[tokio::test]
    async fn test_unreadable_cache_entry_surfaces_transport_error() {
        let dir = tempdir().unwrap();
        // A directory where the cache file should be cannot be read.
        std::fs::create_dir(dir.path().join("mc.yaml")).unwrap();
        let mut cache = cache_for(&unreachable_url(), dir.path());

        let err = cache.resolve("mc").await.unwrap_err();
        assert!(matches!(err, RegistryError::Transport { .. }), "got {err}");
    }

    #[tokio::test]
    async fn test_unreadable_cache_entry_surfaces_remote_error() {
        let (fake, url, dir) = setup().await;
        fake.set("/games/mc.yaml", StatusCode::BAD_GATEWAY, "");
        std::fs::create_dir(dir.path().join("mc.yaml")).unwrap();
        let mut cache = cache_for(&url, dir.path());

        let err = cache.resolve("mc").await.unwrap_err();
        assert!(
            matches!(err, RegistryError::Remote { status: StatusCode::BAD_GATEWAY, .. }),
            "got {err}"
        );
    }

    #[tokio::test]
    async fn test_index_unreachable_falls_back_to_stale_index() {
        let dir = tempdir().unwrap();
        write_stale(&dir.path().join("index.json"), r#"["a","b"]"#);
        write_stale(&dir.path().join("a.yaml"), &game_yaml("a", "img:a"));
        let mut cache = cache_for(&unreachable_url(), dir.path());

        let games = cache.list_all().await.unwrap();

        let names: Vec<&str> = games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[tokio::test]
    async fn test_malformed_definition_is_parse_error() {
        let (fake, url, dir) = setup().await;
        fake.set("/games/bad.yaml", StatusCode::OK, "- just\n- a list\n");
        let mut cache = cache_for(&url, dir.path());

        let err = cache.resolve("bad").await.unwrap_err();
        assert!(matches!(err, RegistryError::Parse { .. }), "got {err}");
    }

    #[tokio::test]
    async fn test_invalid_name_rejected_without_io() {
        let (fake, url, dir) = setup().await;
        let mut cache = cache_for(&url, dir.path());

        for name in ["../etc/passwd", ".hidden", "a b", ""] {
            let err = cache.resolve(name).await.unwrap_err();
            assert!(matches!(err, RegistryError::InvalidGameName { .. }), "{name}: {err}");
        }
        assert_eq!(fake.hits(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_cache_write_failure_is_ignored() {
        let (fake, url, dir) = setup().await;
        fake.set("/games/mc.yaml", StatusCode::OK, &game_yaml("mc", "mc:1"));
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let mut cache = cache_for(&url, &blocker.join("cache"));

        let game = cache.resolve("mc").await.unwrap();
        assert_eq!(game.image, "mc:1");
    }

    #[tokio::test]
    async fn test_list_all_skips_failing_entries_in_order() {
        let (fake, url, dir) = setup().await;
        fake.set("/index.yaml", StatusCode::OK, "games:\n  - a\n  - b\n  - c\n");
        fake.set("/games/a.yaml", StatusCode::OK, &game_yaml("a", "img:a"));
        fake.set("/games/b.yaml", StatusCode::INTERNAL_SERVER_ERROR, "");
        fake.set("/games/c.yaml", StatusCode::OK, &game_yaml("c", "img:c"));
        let mut cache = cache_for(&url, dir.path());

        let games = cache.list_all().await.unwrap();

        let names: Vec<&str> = games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        let cached = std::fs::read_to_string(dir.path().join("index.json")).unwrap();
        assert_eq!(cached, r#"["a","b","c"]"#);
    }

    #[tokio::test]
    async fn test_index_404_falls_back_to_stale_index() {
        let (fake, url, dir) = setup().await;
        write_stale(&dir.path().join("index.json"), r#"["a"]"#);
        fake.set("/games/a.yaml", StatusCode::OK, &game_yaml("a", "img:a"));
        let mut cache = cache_for(&url, dir.path());

        let games = cache.list_all().await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].name, "a");
    }

    #[tokio::test]
    async fn test_empty_cached_index_is_ignored() {
        let (fake, url, dir) = setup().await;
        std::fs::write(dir.path().join("index.json"), "[]").unwrap();
        fake.set("/index.yaml", StatusCode::OK, "games:\n  - a\n");
        fake.set("/games/a.yaml", StatusCode::OK, &game_yaml("a", "img:a"));
        let mut cache = cache_for(&url, dir.path());

        let games = cache.list_all().await.unwrap();
        assert_eq!(games.len(), 1);
        // index + one game
        assert_eq!(fake.hits(), 2);
    }

    #[tokio::test]
    async fn test_index_unreachable_without_cache_fails() {
        let dir = tempdir().unwrap();
        let mut cache = cache_for(&unreachable_url(), dir.path());
        assert!(matches!(
            cache.list_all().await,
            Err(RegistryError::Transport { .. })
        ));
    }
}
