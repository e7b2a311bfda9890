// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default configuration accessor.
//!
//! [`DefaultConfigAccessor`] layers one writable [`ConfigStore`] over any
//! number of read-only [`ConfigSource`]s. Reads consult the store first, then
//! the sources from highest to lowest priority. Writes only ever touch the
//! store, so runtime values shadow seeded ones and survive reloads.

use crate::adapters::MemoryStore;
use crate::domain::{ConfigAccessor, ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigSource, ConfigStore, ConfigWatcher};
use crate::service::ScopedAccessor;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Layered get/set/has accessor.
///
/// # Examples
///
/// ```rust
/// use sidecfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// let accessor = DefaultConfigAccessor::builder()
///     .with_cli_pairs(vec![("gotask.socket_address", "127.0.0.1:6001")])
///     .build()?;
///
/// assert_eq!(accessor.get_str("gotask.socket_address", "default")?, "127.0.0.1:6001");
/// assert_eq!(accessor.get_str("gotask.non_exist", "default")?, "default");
///
/// accessor.set_str("gotask.non_exist", "exist")?;
/// assert!(accessor.has_str("gotask.non_exist")?);
/// # Ok(())
/// # }
/// ```
pub struct DefaultConfigAccessor {
    store: Box<dyn ConfigStore>,
    /// Read-only layers, highest priority first.
    sources: RwLock<Vec<Box<dyn ConfigSource>>>,
    /// Values resolved from `sources`; store hits are never cached.
    cache: RwLock<HashMap<String, ConfigValue>>,
    /// Set by watchers; the next access reloads before answering.
    stale: Arc<AtomicBool>,
    watchers: Mutex<Vec<Box<dyn ConfigWatcher>>>,
}

impl DefaultConfigAccessor {
    /// Creates an accessor with an empty in-memory store and no sources.
    pub fn new() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// Creates an accessor writing into `store`.
    pub fn with_store(store: Box<dyn ConfigStore>) -> Self {
        Self {
            store,
            sources: RwLock::new(Vec::new()),
            cache: RwLock::new(HashMap::new()),
            stale: Arc::new(AtomicBool::new(false)),
            watchers: Mutex::new(Vec::new()),
        }
    }

    /// Creates a builder.
    pub fn builder() -> ConfigAccessorBuilder {
        ConfigAccessorBuilder::new()
    }

    /// Environment variables plus `config.yaml` from the OS configuration
    /// directory of `app_name`, if that file exists.
    pub fn with_defaults(app_name: &str, qualifier: &str) -> Result<Self> {
        let builder = Self::builder();

        #[cfg(feature = "env")]
        let builder = builder.with_env_vars();

        #[cfg(feature = "yaml")]
        let builder = builder.with_default_yaml(app_name, qualifier);

        #[cfg(not(feature = "yaml"))]
        let _ = (app_name, qualifier);

        builder.build()
    }

    /// Adds a read-only layer, keeping layers ordered by priority.
    ///
    /// Layers with equal priority are consulted in insertion order.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) -> Result<()> {
        tracing::debug!(
            "Adding configuration source '{}' (priority {})",
            source.name(),
            source.priority()
        );
        let sources = self
            .sources
            .get_mut()
            .map_err(|_| ConfigError::poisoned("sources"))?;
        sources.push(source);
        sources.sort_by_key(|s| std::cmp::Reverse(s.priority()));
        self.invalidate_cache()
    }

    /// Names of the read-only layers, highest priority first.
    pub fn source_names(&self) -> Result<Vec<String>> {
        Ok(self
            .sources
            .read()
            .map_err(|_| ConfigError::poisoned("sources"))?
            .iter()
            .map(|s| s.name().to_string())
            .collect())
    }

    /// Removes a runtime-written value, revealing any seeded value beneath.
    ///
    /// Returns `true` if the store held a value for `key`.
    pub fn unset(&self, key: &ConfigKey) -> Result<bool> {
        key.validate()?;
        let removed = self.store.remove(key)?;
        self.forget(key)?;
        tracing::debug!("Unset '{}' (removed={})", key, removed);
        Ok(removed)
    }

    /// Every key in any layer that lies under `prefix`, sorted.
    pub fn keys_under(&self, prefix: &ConfigKey) -> Result<Vec<ConfigKey>> {
        prefix.validate()?;
        self.refresh_if_stale()?;

        let mut keys = BTreeSet::new();
        keys.extend(self.store.all_keys()?);
        for source in self.read_sources()?.iter() {
            keys.extend(source.all_keys()?);
        }

        Ok(keys
            .into_iter()
            .filter(|key| prefix.is_ancestor_of(key))
            .collect())
    }

    /// The effective namespace after layering.
    pub fn snapshot(&self) -> Result<BTreeMap<String, String>> {
        self.refresh_if_stale()?;

        let mut effective = BTreeMap::new();
        for source in self.read_sources()?.iter().rev() {
            overlay(&**source, &mut effective)?;
        }
        overlay(&*self.store, &mut effective)?;

        Ok(effective)
    }

    /// Renders [`snapshot`](Self::snapshot) as flat YAML.
    #[cfg(feature = "yaml")]
    pub fn to_yaml(&self) -> Result<String> {
        use crate::ports::ConfigParser;
        crate::adapters::YamlParser::new().render(&self.snapshot()?)
    }

    /// Re-reads every read-only layer. Runtime writes are kept.
    ///
    /// A layer that fails to reload is logged and keeps its previous values.
    pub fn reload(&self) -> Result<()> {
        {
            let mut sources = self
                .sources
                .write()
                .map_err(|_| ConfigError::poisoned("sources"))?;
            for source in sources.iter_mut() {
                if let Err(e) = source.reload() {
                    tracing::warn!("Failed to reload source '{}': {}", source.name(), e);
                }
            }
        }

        self.invalidate_cache()
    }

    /// Starts `watcher`; each change it reports makes the next access reload.
    pub fn register_watcher(&self, mut watcher: Box<dyn ConfigWatcher>) -> Result<()> {
        let stale = Arc::clone(&self.stale);
        watcher.watch(Arc::new(move |changed: ConfigKey| {
            tracing::debug!("Configuration change reported for '{}'", changed);
            stale.store(true, Ordering::SeqCst);
        }))?;

        self.watchers
            .lock()
            .map_err(|_| ConfigError::poisoned("watchers"))?
            .push(watcher);
        Ok(())
    }

    /// A view of this accessor rooted at `namespace`.
    pub fn scoped(&self, namespace: impl Into<String>) -> Result<ScopedAccessor<&Self>> {
        ScopedAccessor::new(self, namespace)
    }

    fn read_sources(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, Vec<Box<dyn ConfigSource>>>> {
        self.sources
            .read()
            .map_err(|_| ConfigError::poisoned("sources"))
    }

    fn invalidate_cache(&self) -> Result<()> {
        self.cache
            .write()
            .map_err(|_| ConfigError::poisoned("cache"))?
            .clear();
        Ok(())
    }

    fn forget(&self, key: &ConfigKey) -> Result<()> {
        self.cache
            .write()
            .map_err(|_| ConfigError::poisoned("cache"))?
            .remove(key.as_str());
        Ok(())
    }

    fn refresh_if_stale(&self) -> Result<()> {
        if self.stale.swap(false, Ordering::SeqCst) {
            tracing::debug!("Reloading sources after change notification");
            if let Err(e) = self.reload() {
                // keep the notification so the next access retries
                self.stale.store(true, Ordering::SeqCst);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Finds the effective value of a well-formed key.
    fn resolve(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        key.validate()?;
        self.refresh_if_stale()?;

        if let Some(value) = self.store.get(key)? {
            return Ok(Some(value));
        }

        if let Some(value) = self
            .cache
            .read()
            .map_err(|_| ConfigError::poisoned("cache"))?
            .get(key.as_str())
        {
            return Ok(Some(value.clone()));
        }

        for source in self.read_sources()?.iter() {
            let found = source.get(key).map_err(|e| {
                tracing::debug!("Source '{}' failed for key '{}': {}", source.name(), key, e);
                e
            })?;

            if let Some(value) = found {
                tracing::debug!("Resolved '{}' from source '{}'", key, source.name());
                self.cache
                    .write()
                    .map_err(|_| ConfigError::poisoned("cache"))?
                    .insert(key.as_str().to_string(), value.clone());
                return Ok(Some(value));
            }
        }

        Ok(None)
    }
}

/// Copies every value of `layer` into `out`, replacing existing entries.
fn overlay<S: ConfigSource + ?Sized>(layer: &S, out: &mut BTreeMap<String, String>) -> Result<()> {
    for key in layer.all_keys()? {
        if let Some(value) = layer.get(&key)? {
            out.insert(key.into_string(), value.into_string());
        }
    }
    Ok(())
}

impl Default for DefaultConfigAccessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DefaultConfigAccessor {
    fn drop(&mut self) {
        if let Ok(watchers) = self.watchers.get_mut() {
            for watcher in watchers.iter_mut() {
                if let Err(e) = watcher.stop() {
                    tracing::warn!("Failed to stop configuration watcher: {}", e);
                }
            }
        }
    }
}

impl ConfigAccessor for DefaultConfigAccessor {
    fn get(&self, key: &ConfigKey, default: &str) -> Result<ConfigValue> {
        Ok(self
            .resolve(key)?
            .unwrap_or_else(|| ConfigValue::from(default)))
    }

    fn set(&self, key: &ConfigKey, value: ConfigValue) -> Result<()> {
        key.validate()?;
        self.store.set(key, value)?;
        self.forget(key)?;
        tracing::debug!("Set '{}' in store '{}'", key, self.store.name());
        Ok(())
    }

    fn has(&self, key: &ConfigKey) -> Result<bool> {
        Ok(self.resolve(key)?.is_some())
    }
}

/// Builder for [`DefaultConfigAccessor`].
///
/// # Examples
///
/// ```rust
/// use sidecfg::service::ConfigAccessorBuilder;
///
/// # fn main() -> sidecfg::domain::Result<()> {
/// let accessor = ConfigAccessorBuilder::new()
///     .with_env_prefix("SIDECAR_")
///     .with_cli_args(vec!["--gotask.workers=4"])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ConfigAccessorBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
    store: Option<Box<dyn ConfigStore>>,
}

impl ConfigAccessorBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a read-only layer.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Replaces the default in-memory store.
    pub fn with_store(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Adds every environment variable, lowercased, `__` mapped to `.`.
    ///
    /// `GOTASK__SOCKET_ADDRESS` seeds `gotask.socket_address`.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::{EnvVarAdapter, ENV_SEGMENT_SEPARATOR};
        self.with_source(Box::new(
            EnvVarAdapter::new()
                .lowercase_keys(true)
                .segment_separator(ENV_SEGMENT_SEPARATOR),
        ))
    }

    /// Adds environment variables starting with `prefix`, prefix stripped,
    /// mapped as in [`with_env_vars`](Self::with_env_vars).
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::{EnvVarAdapter, ENV_SEGMENT_SEPARATOR};
        self.with_source(Box::new(
            EnvVarAdapter::with_prefix(prefix)
                .lowercase_keys(true)
                .segment_separator(ENV_SEGMENT_SEPARATOR),
        ))
    }

    /// Adds overrides parsed from raw arguments.
    #[cfg(feature = "cli")]
    pub fn with_cli_args<S: AsRef<str>>(self, args: Vec<S>) -> Self {
        use crate::adapters::CommandLineAdapter;
        self.with_source(Box::new(CommandLineAdapter::from_args(args)))
    }

    /// Adds overrides from key-value pairs.
    #[cfg(feature = "cli")]
    pub fn with_cli_pairs<K, V, I>(self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        use crate::adapters::CommandLineAdapter;
        self.with_source(Box::new(CommandLineAdapter::from_pairs(pairs)))
    }

    /// Adds a YAML file; fails if it cannot be read.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::YamlFileAdapter;
        let adapter = YamlFileAdapter::from_file(path)?;
        Ok(self.with_source(Box::new(adapter)))
    }

    /// Adds `config.yaml` from the OS configuration directory if it exists.
    #[cfg(feature = "yaml")]
    pub fn with_default_yaml(self, app_name: &str, qualifier: &str) -> Self {
        use crate::adapters::YamlFileAdapter;
        match YamlFileAdapter::from_default_location(app_name, qualifier) {
            Ok(adapter) => self.with_source(Box::new(adapter)),
            Err(e) => {
                tracing::debug!("No default YAML configuration for '{}': {}", app_name, e);
                self
            }
        }
    }

    /// Builds the accessor.
    pub fn build(self) -> Result<DefaultConfigAccessor> {
        let mut accessor = match self.store {
            Some(store) => DefaultConfigAccessor::with_store(store),
            None => DefaultConfigAccessor::new(),
        };

        for source in self.sources {
            accessor.add_source(source)?;
        }

        Ok(accessor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct MockSource {
        name: String,
        priority: u8,
        values: HashMap<String, String>,
        fail_get: bool,
        reloads: Arc<AtomicUsize>,
    }

    impl MockSource {
        fn new(name: &str, priority: u8) -> Self {
            Self {
                name: name.to_string(),
                priority,
                values: HashMap::new(),
                fail_get: false,
                reloads: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn with_value(mut self, key: &str, value: &str) -> Self {
            self.values.insert(key.to_string(), value.to_string());
            self
        }

        fn failing(mut self) -> Self {
            self.fail_get = true;
            self
        }
    }

    impl ConfigSource for MockSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
            if self.fail_get {
                return Err(ConfigError::SourceError {
                    source_name: self.name.clone(),
                    message: "unreachable".to_string(),
                    source: None,
                });
            }
            Ok(self
                .values
                .get(key.as_str())
                .map(|v| ConfigValue::from(v.as_str())))
        }

        fn all_keys(&self) -> Result<Vec<ConfigKey>> {
            Ok(self
                .values
                .keys()
                .map(|k| ConfigKey::from(k.as_str()))
                .collect())
        }

        fn reload(&mut self) -> Result<()> {
            self.reloads.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn key(s: &str) -> ConfigKey {
        ConfigKey::from(s)
    }

    #[test]
    fn test_empty_accessor_returns_default() {
        let accessor = DefaultConfigAccessor::new();
        let value = accessor.get(&key("gotask.non_exist"), "default").unwrap();
        assert_eq!(value.as_str(), "default");
        assert!(!accessor.has(&key("gotask.non_exist")).unwrap());
    }

    #[test]
    fn test_priority_order() {
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(MockSource::new("low", 1)))
            .with_source(Box::new(MockSource::new("high", 3)))
            .with_source(Box::new(MockSource::new("medium", 2)))
            .build()
            .unwrap();

        assert_eq!(accessor.source_names().unwrap(), vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_get_precedence() {
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(MockSource::new("low", 1).with_value("k", "low")))
            .with_source(Box::new(MockSource::new("high", 3).with_value("k", "high")))
            .build()
            .unwrap();

        assert_eq!(accessor.get(&key("k"), "").unwrap().as_str(), "high");
    }

    #[test]
    fn test_set_shadows_sources() {
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(MockSource::new("high", 3).with_value("k", "seeded")))
            .build()
            .unwrap();

        assert_eq!(accessor.get(&key("k"), "").unwrap().as_str(), "seeded");
        accessor.set(&key("k"), ConfigValue::from("runtime")).unwrap();
        assert_eq!(accessor.get(&key("k"), "").unwrap().as_str(), "runtime");
    }

    #[test]
    fn test_unset_reveals_seeded_value() {
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(MockSource::new("file", 1).with_value("k", "seeded")))
            .build()
            .unwrap();

        accessor.set(&key("k"), ConfigValue::from("runtime")).unwrap();
        assert!(accessor.unset(&key("k")).unwrap());
        assert!(!accessor.unset(&key("k")).unwrap());
        assert_eq!(accessor.get(&key("k"), "").unwrap().as_str(), "seeded");
    }

    #[test]
    fn test_empty_value_is_present() {
        let accessor = DefaultConfigAccessor::new();
        accessor.set(&key("gotask.blank"), ConfigValue::from("")).unwrap();

        assert!(accessor.has(&key("gotask.blank")).unwrap());
        assert_eq!(accessor.get(&key("gotask.blank"), "default").unwrap().as_str(), "");
    }

    #[test]
    fn test_malformed_keys_rejected() {
        let accessor = DefaultConfigAccessor::new();
        for bad in ["", "gotask.", ".gotask", "a..b"] {
            let k = key(bad);
            assert!(matches!(
                accessor.get(&k, "default"),
                Err(ConfigError::InvalidKey { .. })
            ));
            assert!(matches!(
                accessor.set(&k, ConfigValue::from("v")),
                Err(ConfigError::InvalidKey { .. })
            ));
            assert!(matches!(accessor.has(&k), Err(ConfigError::InvalidKey { .. })));
        }
    }

    #[test]
    fn test_source_fault_propagates() {
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(MockSource::new("remote", 2).failing()))
            .build()
            .unwrap();

        assert!(matches!(
            accessor.get(&key("gotask.socket_address"), "default"),
            Err(ConfigError::SourceError { .. })
        ));
        assert!(accessor.has(&key("gotask.socket_address")).is_err());
    }

    #[test]
    fn test_store_hit_skips_failing_source() {
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(MockSource::new("remote", 2).failing()))
            .build()
            .unwrap();

        accessor.set(&key("k"), ConfigValue::from("v")).unwrap();
        assert_eq!(accessor.get(&key("k"), "").unwrap().as_str(), "v");
    }

    #[test]
    fn test_scoped_view() {
        let accessor = DefaultConfigAccessor::new();
        accessor.scoped("gotask").unwrap().set_str("non_exist", "exist").unwrap();
        assert_eq!(accessor.get(&key("gotask.non_exist"), "").unwrap().as_str(), "exist");
    }

    #[test]
    fn test_keys_under() {
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(
                MockSource::new("file", 1)
                    .with_value("gotask.socket_address", "a")
                    .with_value("gotasks.other", "b")
                    .with_value("app.name", "c"),
            ))
            .build()
            .unwrap();
        accessor.set(&key("gotask.non_exist"), ConfigValue::from("exist")).unwrap();
        accessor.set(&key("gotask.socket_address"), ConfigValue::from("dup")).unwrap();

        assert_eq!(
            accessor.keys_under(&key("gotask")).unwrap(),
            vec![key("gotask.non_exist"), key("gotask.socket_address")]
        );
    }

    #[test]
    fn test_snapshot_layers() {
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(
                MockSource::new("file", 1)
                    .with_value("a", "file")
                    .with_value("b", "file"),
            ))
            .with_source(Box::new(MockSource::new("env", 2).with_value("a", "env")))
            .build()
            .unwrap();
        accessor.set(&key("b"), ConfigValue::from("store")).unwrap();

        let snapshot = accessor.snapshot().unwrap();
        assert_eq!(snapshot.get("a").map(String::as_str), Some("env"));
        assert_eq!(snapshot.get("b").map(String::as_str), Some("store"));
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_reload_reaches_sources_and_keeps_writes() {
        let source = MockSource::new("file", 1);
        let reloads = Arc::clone(&source.reloads);
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(source))
            .build()
            .unwrap();

        accessor.set(&key("k"), ConfigValue::from("runtime")).unwrap();
        accessor.reload().unwrap();

        assert_eq!(reloads.load(Ordering::SeqCst), 1);
        assert_eq!(accessor.get(&key("k"), "").unwrap().as_str(), "runtime");
    }

    struct ManualWatcher {
        callback: Arc<Mutex<Option<crate::ports::ChangeCallback>>>,
    }

    impl ConfigWatcher for ManualWatcher {
        fn watch(&mut self, callback: crate::ports::ChangeCallback) -> Result<()> {
            *self.callback.lock().unwrap() = Some(callback);
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_watcher_marks_stale_and_next_access_reloads() {
        let source = MockSource::new("file", 1).with_value("k", "v");
        let reloads = Arc::clone(&source.reloads);
        let accessor = DefaultConfigAccessor::builder()
            .with_source(Box::new(source))
            .build()
            .unwrap();

        let slot = Arc::new(Mutex::new(None));
        accessor
            .register_watcher(Box::new(ManualWatcher {
                callback: Arc::clone(&slot),
            }))
            .unwrap();

        accessor.get(&key("k"), "").unwrap();
        assert_eq!(reloads.load(Ordering::SeqCst), 0);

        let callback = slot.lock().unwrap().clone().unwrap();
        callback(key("/etc/gotask/config.yaml"));

        accessor.has(&key("k")).unwrap();
        assert_eq!(reloads.load(Ordering::SeqCst), 1);

        // the flag is consumed by the reload
        accessor.has(&key("k")).unwrap();
        assert_eq!(reloads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_reload_keeps_change_pending() {
        let accessor = Arc::new(
            DefaultConfigAccessor::builder()
                .with_source(Box::new(MockSource::new("file", 1).with_value("k", "v")))
                .build()
                .unwrap(),
        );

        let slot = Arc::new(Mutex::new(None));
        accessor
            .register_watcher(Box::new(ManualWatcher {
                callback: Arc::clone(&slot),
            }))
            .unwrap();

        let poisoner = Arc::clone(&accessor);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.sources.write().unwrap();
            panic!("poison sources");
        })
        .join();

        let callback = slot.lock().unwrap().clone().unwrap();
        callback(key("k"));

        assert!(matches!(
            accessor.has(&key("k")),
            Err(ConfigError::AccessError { .. })
        ));
        assert!(accessor.stale.load(Ordering::SeqCst));
        assert!(accessor.get(&key("k"), "").is_err());
        assert!(accessor.stale.load(Ordering::SeqCst));
    }

    #[test]
    fn test_accessor_shared_across_threads() {
        let accessor = Arc::new(DefaultConfigAccessor::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let accessor = Arc::clone(&accessor);
                std::thread::spawn(move || {
                    accessor
                        .set_str(&format!("worker.{}", i), &i.to_string())
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(accessor.keys_under(&key("worker")).unwrap().len(), 4);
    }

    #[test]
    #[cfg(feature = "yaml")]
    fn test_to_yaml() {
        let accessor = DefaultConfigAccessor::new();
        accessor.set_str("gotask.non_exist", "exist").unwrap();

        let yaml = accessor.to_yaml().unwrap();
        assert!(yaml.contains("gotask.non_exist"));
        assert!(yaml.contains("exist"));
    }
}
