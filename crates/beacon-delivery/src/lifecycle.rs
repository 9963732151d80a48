//! Delivery process lifecycle.
//!
//! A housekeeping state machine with two transitions: install populates a
//! versioned asset cache and skips staged activation, activate prunes
//! every stale cache version and claims all open sessions. Cache errors
//! are logged and never block a transition.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{info, warn};

use beacon_core::config::lifecycle::LifecycleConfig;
use beacon_core::error::{AppError, ErrorKind};
use beacon_core::result::AppResult;

use crate::sessions::SessionHub;

/// Lifecycle phase of the delivery process instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Installing,
    Waiting,
    Active,
    Redundant,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Self::Installing => "installing",
            Self::Waiting => "waiting",
            Self::Active => "active",
            Self::Redundant => "redundant",
        };
        write!(f, "{phase}")
    }
}

/// Drives the install/activate lifecycle.
pub struct LifecycleController {
    config: LifecycleConfig,
    sessions: Arc<dyn SessionHub>,
    phase: LifecyclePhase,
}

impl LifecycleController {
    pub fn new(config: LifecycleConfig, sessions: Arc<dyn SessionHub>) -> Self {
        Self {
            config,
            sessions,
            phase: LifecyclePhase::Installing,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    fn cache_dir(&self) -> PathBuf {
        Path::new(&self.config.cache_root).join(&self.config.cache_version)
    }

    /// Populate the versioned asset cache and move straight to waiting.
    pub async fn install(&mut self) {
        match self.populate_cache().await {
            Ok(cached) => info!(
                version = %self.config.cache_version,
                cached,
                "Asset cache populated"
            ),
            Err(e) => warn!(
                version = %self.config.cache_version,
                error = %e,
                "Asset cache population failed"
            ),
        }
        self.phase = LifecyclePhase::Waiting;
    }

    /// Prune stale cache versions, claim every open session and become
    /// the active instance.
    pub async fn activate(&mut self) {
        match self.prune_stale_caches().await {
            Ok(pruned) if pruned > 0 => info!(pruned, "Pruned stale cache versions"),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Stale cache pruning failed"),
        }
        let claimed = self.sessions.claim_all().await;
        self.phase = LifecyclePhase::Active;
        info!(
            version = %self.config.cache_version,
            claimed,
            "Lifecycle active"
        );
    }

    /// Mark this instance as replaced.
    pub fn retire(&mut self) {
        self.phase = LifecyclePhase::Redundant;
    }

    async fn populate_cache(&self) -> AppResult<usize> {
        let cache_dir = self.cache_dir();
        fs::create_dir_all(&cache_dir).await.map_err(cache_err)?;

        let mut cached = 0;
        for asset in &self.config.manifest {
            let source = Path::new(&self.config.assets_dir).join(asset);
            let target = cache_dir.join(asset);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await.map_err(cache_err)?;
            }
            fs::copy(&source, &target).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to cache asset {}: {e}", source.display()),
                    e,
                )
            })?;
            cached += 1;
        }
        Ok(cached)
    }

    async fn prune_stale_caches(&self) -> AppResult<usize> {
        let root = Path::new(&self.config.cache_root);
        if !root.exists() {
            return Ok(0);
        }

        let mut pruned = 0;
        let mut entries = fs::read_dir(root).await.map_err(cache_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(cache_err)? {
            let name = entry.file_name();
            if name.to_string_lossy() != self.config.cache_version {
                fs::remove_dir_all(entry.path()).await.map_err(cache_err)?;
                pruned += 1;
            }
        }
        Ok(pruned)
    }
}

fn cache_err(e: std::io::Error) -> AppError {
    AppError::with_source(ErrorKind::Internal, format!("Cache IO error: {e}"), e)
}
