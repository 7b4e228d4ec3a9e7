use std::path::PathBuf;
use thiserror::Error;

use crate::game::modpack::ModReference;

/// Manifest could not be read or decoded. The only error family that aborts a run.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("File not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error decoding manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure of the mod loader phase. Logged and reported, never fatal.
#[derive(Debug, Error)]
pub enum LoaderError {
    // ── Resolution ──────────────────────────────────────
    #[error("Manifest does not declare a Minecraft version")]
    MissingGameVersion,

    #[error("Manifest does not declare a primary mod loader")]
    MissingLoader,

    #[error("Unsupported mod loader: {0}")]
    UnsupportedLoader(String),

    // ── Download ────────────────────────────────────────
    #[error("Failed to download loader installer from {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request for loader installer {url} failed: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Install ─────────────────────────────────────────
    #[error("Loader installer not found: {0:?}")]
    InstallerMissing(Option<PathBuf>),

    #[error("Failed to spawn loader installer with {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Loader installer timed out after {0} seconds")]
    InstallTimeout(u64),

    #[error("Loader installer exited with code {0:?}")]
    InstallerExit(Option<i32>),
}

/// Failure of a single mod download. Collected by the batch, never fatal.
#[derive(Debug, Error)]
pub enum ModDownloadError {
    #[error("{project_url} has API access disabled. Please download {reference} manually")]
    NotFoundFallback {
        reference: ModReference,
        project_url: String,
    },

    #[error("Failed to download file {url}: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request for {url} failed: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Discriminant of [`ModDownloadError`], for counting and matching without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModFailureKind {
    NotFoundFallback,
    HttpStatus(u16),
    Network,
    Io,
}

impl ModDownloadError {
    pub fn kind(&self) -> ModFailureKind {
        match self {
            ModDownloadError::NotFoundFallback { .. } => ModFailureKind::NotFoundFallback,
            ModDownloadError::HttpStatus { status, .. } => ModFailureKind::HttpStatus(*status),
            ModDownloadError::Network { .. } => ModFailureKind::Network,
            ModDownloadError::Io { .. } => ModFailureKind::Io,
        }
    }

    /// Project page to visit when the artifact must be fetched by hand.
    pub fn manual_download_url(&self) -> Option<&str> {
        match self {
            ModDownloadError::NotFoundFallback { project_url, .. } => Some(project_url),
            _ => None,
        }
    }
}
