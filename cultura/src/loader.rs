//! Loading culture data and switching the active culture.
//!
//! Switching to the default culture is immediate. Any other culture is loaded
//! by a background task first; the caller gets a [`SwitchHandle`] it may await
//! or drop. Until the task finishes, the previously active culture stays active,
//! so formatting during a pending switch simply uses the old culture. Only the
//! most recent switch may activate its culture; an older load that finishes
//! later is registered but reported as superseded.

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::{
    catalog::CultureRegistry,
    context::CultureContext,
    culture::{self, Culture, DEFAULT_CULTURE, parse_culture_name},
    error::Error,
};

/// Source of culture data.
#[async_trait]
pub trait CultureLoader: Send + Sync {
    async fn load(&self, name: &str) -> Result<Culture, Error>;
}

/// Serves the cultures compiled into the crate.
///
/// A regional name with no built-in data of its own (`de-CH`) is served from
/// its base language, renamed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCultureLoader;

impl BuiltinCultureLoader {
    fn load_sync(name: &str) -> Result<Culture, Error> {
        if let Some(found) = culture::builtin(name) {
            return Ok(found);
        }
        let language = parse_culture_name(name)?;
        culture::builtin(language.language.as_str())
            .map(|base| {
                let mut derived = Culture::derived_from(&base, name);
                derived.english_name = base.english_name;
                derived
            })
            .ok_or_else(|| Error::UnknownCulture(name.to_string()))
    }
}

#[async_trait]
impl CultureLoader for BuiltinCultureLoader {
    async fn load(&self, name: &str) -> Result<Culture, Error> {
        Self::load_sync(name)
    }
}

/// Reads `<dir>/<name>.json` files holding a serialized [`Culture`].
///
/// Names without a file fall back to the built-in cultures.
#[derive(Debug, Clone)]
pub struct DirectoryCultureLoader {
    dir: PathBuf,
}

impl DirectoryCultureLoader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        DirectoryCultureLoader {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn culture_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Names of the culture files in the directory, sorted. Files whose stem
    /// is not a valid culture name are skipped.
    pub async fn culture_names(&self) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if parse_culture_name(stem).is_err() {
                debug!(path = %path.display(), "skipping file without a culture name");
                continue;
            }
            names.push(stem.to_string());
        }
        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl CultureLoader for DirectoryCultureLoader {
    async fn load(&self, name: &str) -> Result<Culture, Error> {
        // Validating first keeps separators and `..` out of the file name.
        parse_culture_name(name)?;
        let path = self.culture_path(name);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(culture = name, path = %path.display(), "no culture file, using built-in data");
                return BuiltinCultureLoader::load_sync(name);
            }
            Err(e) => return Err(Error::Io(e)),
        };
        let mut loaded: Culture = serde_json::from_str(&text)?;
        if loaded.name != name {
            warn!(
                culture = name,
                file_name = %loaded.name,
                "culture file declares a different name; using the requested one"
            );
            loaded.name = name.to_string();
        }
        Ok(loaded)
    }
}

/// Completion signal of a culture switch.
#[derive(Debug)]
pub struct SwitchHandle {
    culture: String,
    rx: oneshot::Receiver<Result<Arc<Culture>, Error>>,
}

impl SwitchHandle {
    fn ready(culture: &str, result: Result<Arc<Culture>, Error>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        SwitchHandle {
            culture: culture.to_string(),
            rx,
        }
    }

    /// Name of the culture being switched to.
    pub fn culture(&self) -> &str {
        &self.culture
    }

    /// Waits for the switch to finish and returns the culture that became active.
    pub async fn wait(self) -> Result<Arc<Culture>, Error> {
        let culture = self.culture;
        self.rx
            .await
            .unwrap_or_else(|_| Err(Error::culture_load(culture, "switch task was dropped")))
    }

    /// Blocking variant of [`wait`](Self::wait). Must not be called from
    /// inside an async runtime.
    pub fn blocking_wait(self) -> Result<Arc<Culture>, Error> {
        let culture = self.culture;
        self.rx
            .blocking_recv()
            .unwrap_or_else(|_| Err(Error::culture_load(culture, "switch task was dropped")))
    }
}

/// Loads cultures through a [`CultureLoader`], registers them and activates
/// them on a [`CultureContext`].
#[derive(Clone)]
pub struct CultureSwitcher {
    registry: Arc<RwLock<CultureRegistry>>,
    context: CultureContext,
    loader: Arc<dyn CultureLoader>,
    generation: Arc<AtomicU64>,
}

impl CultureSwitcher {
    pub fn new(
        registry: Arc<RwLock<CultureRegistry>>,
        context: CultureContext,
        loader: Arc<dyn CultureLoader>,
    ) -> Self {
        CultureSwitcher {
            registry,
            context,
            loader,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn context(&self) -> &CultureContext {
        &self.context
    }

    /// Switches the active culture to `name`.
    pub fn switch(&self, name: &str) -> SwitchHandle {
        self.switch_with_messages(name, BTreeMap::new())
    }

    /// Switches the active culture to `name` and merges `messages` into it
    /// once its data is available.
    pub fn switch_with_messages(
        &self,
        name: &str,
        messages: BTreeMap<String, String>,
    ) -> SwitchHandle {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if name == DEFAULT_CULTURE {
            let result = self.activate_registered(name, None, messages, generation);
            return SwitchHandle::ready(name, result);
        }

        let (tx, rx) = oneshot::channel();
        let switcher = self.clone();
        let culture = name.to_string();
        let task = async move {
            let result = switcher
                .load_and_activate(&culture, messages, generation)
                .await;
            let _ = tx.send(result);
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task);
            }
            Err(_) => {
                std::thread::spawn(move || match tokio::runtime::Builder::new_current_thread().build() {
                    Ok(runtime) => runtime.block_on(task),
                    Err(e) => warn!(error = %e, "failed to start a runtime for culture loading"),
                });
            }
        }

        SwitchHandle {
            culture: name.to_string(),
            rx,
        }
    }

    async fn load_and_activate(
        &self,
        name: &str,
        messages: BTreeMap<String, String>,
        generation: u64,
    ) -> Result<Arc<Culture>, Error> {
        debug!(culture = name, generation, "loading culture data");
        match self.loader.load(name).await {
            Ok(loaded) => self.activate_registered(name, Some(loaded), messages, generation),
            Err(e) => {
                warn!(culture = name, error = %e, "culture load failed; active culture unchanged");
                Err(e)
            }
        }
    }

    fn activate_registered(
        &self,
        name: &str,
        loaded: Option<Culture>,
        messages: BTreeMap<String, String>,
        generation: u64,
    ) -> Result<Arc<Culture>, Error> {
        // Activation happens under the registry lock so the generation check
        // and the context update cannot interleave with another switch.
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(loaded) = loaded {
            registry.insert(loaded);
        }
        registry.add_culture_info(name, messages)?;
        let snapshot = registry
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownCulture(name.to_string()))?;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(culture = name, generation, "switch superseded; not activating");
            return Err(Error::culture_load(name, "superseded by a later culture switch"));
        }
        self.context.activate(snapshot);
        Ok(self.context.active())
    }
}
