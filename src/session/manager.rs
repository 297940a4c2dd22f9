//! Session manager for engine lifecycle.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use crate::engine::{Engine, EngineConnection, NativeResult};
use crate::error::Result;

/// Optional engine capabilities loadable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Json,
    Parquet,
    Excel,
    SqliteScanner,
}

impl Extension {
    /// Returns the extension name as the engine expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Parquet => "parquet",
            Self::Excel => "excel",
            Self::SqliteScanner => "sqlite_scanner",
        }
    }

    /// Parses an extension from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "parquet" => Some(Self::Parquet),
            "excel" => Some(Self::Excel),
            "sqlite_scanner" => Some(Self::SqliteScanner),
            _ => None,
        }
    }
}

/// The lazily-created engine handle pair: engine instance plus one open
/// connection, used for the whole process lifetime.
pub struct EngineSession {
    engine: Arc<dyn Engine>,
    connection: Box<dyn EngineConnection>,
}

impl EngineSession {
    /// The engine this session is bound to.
    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    /// Direct access to the open connection, for collaborators doing bulk
    /// work outside the statement pipeline.
    pub fn connection(&self) -> &dyn EngineConnection {
        self.connection.as_ref()
    }

    /// Submits SQL over the session's connection.
    pub async fn run(&self, sql: &str) -> Result<NativeResult> {
        self.connection.query(sql).await
    }
}

/// Manages the lifecycle of exactly one engine session.
///
/// The session cell memoizes the in-flight initialization, so callers racing
/// the first `ensure_session` converge on one connect attempt. A failed
/// initialization is surfaced to the awaiting callers and is not cached; the
/// next call retries.
pub struct SessionManager {
    engine: Arc<dyn Engine>,
    session: OnceCell<Arc<EngineSession>>,
    loaded_extensions: Mutex<HashSet<Extension>>,
}

impl SessionManager {
    /// Creates a session manager over the given engine. No connection is
    /// opened until the first `ensure_session`.
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self {
            engine,
            session: OnceCell::new(),
            loaded_extensions: Mutex::new(HashSet::new()),
        }
    }

    /// Returns the session, initializing it on first use.
    ///
    /// Safe under concurrent invocation: every caller gets the same session
    /// and the engine is connected at most once per successful init.
    pub async fn ensure_session(&self) -> Result<Arc<EngineSession>> {
        self.session
            .get_or_try_init(|| async {
                info!(engine = self.engine.name(), "initializing engine session");
                let connection = self.engine.connect().await?;
                Ok(Arc::new(EngineSession {
                    engine: Arc::clone(&self.engine),
                    connection,
                }))
            })
            .await
            .map(Arc::clone)
    }

    /// True once a session has been successfully initialized.
    pub fn is_initialized(&self) -> bool {
        self.session.initialized()
    }

    /// Loads an optional engine capability, at most once per session.
    ///
    /// The loaded-set lock is held across the engine call so concurrent
    /// requests for the same extension collapse into a single `LOAD`.
    pub async fn load_extension(&self, extension: Extension) -> Result<()> {
        let mut loaded = self.loaded_extensions.lock().await;
        if loaded.contains(&extension) {
            return Ok(());
        }

        let session = self.ensure_session().await?;
        session
            .run(&format!("LOAD '{}';", extension.as_str()))
            .await?;

        loaded.insert(extension);
        debug!(extension = extension.as_str(), "engine extension loaded");
        Ok(())
    }

    /// True if the given extension has been loaded this session.
    pub async fn is_extension_loaded(&self, extension: Extension) -> bool {
        self.loaded_extensions.lock().await.contains(&extension)
    }
}
