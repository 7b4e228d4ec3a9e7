pub mod forge;
pub mod neoforge;

use dunce::canonicalize;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::error::LoaderError;
use crate::game::installer::config::ProvisionConfig;
use crate::game::installer::core::downloader::{
    ensure_dir, filename_from_url, stream_to_file, StreamError,
};
use crate::game::installer::core::traits::ModloaderInstaller;
use crate::game::modpack::{ModloaderType, PrimaryLoader};
use crate::utils::process::{CommandTimeoutExt, RunError};
use forge::ForgeInstaller;
use neoforge::NeoForgeInstaller;

pub fn installer_for(kind: ModloaderType) -> &'static dyn ModloaderInstaller {
    match kind {
        ModloaderType::Forge => &ForgeInstaller,
        ModloaderType::NeoForge => &NeoForgeInstaller,
    }
}

/// Downloads a loader's installer jar and runs it in server mode
pub struct LoaderInstaller {
    client: Client,
    config: ProvisionConfig,
}

impl LoaderInstaller {
    pub fn new(client: Client, config: ProvisionConfig) -> Self {
        Self { client, config }
    }

    /// Download the installer jar for `loader` into `target_dir`.
    ///
    /// Returns the absolute path of the written jar. The file name comes from
    /// the final URL after redirects.
    pub async fn download_installer(
        &self,
        target_dir: &Path,
        game_version: Option<&str>,
        loader: Option<&PrimaryLoader>,
    ) -> Result<PathBuf, LoaderError> {
        let game_version = game_version.ok_or(LoaderError::MissingGameVersion)?;
        let loader = loader.ok_or(LoaderError::MissingLoader)?;
        let kind = loader
            .kind
            .ok_or_else(|| LoaderError::UnsupportedLoader(loader.id.clone()))?;
        let installer = installer_for(kind);

        ensure_dir(target_dir).await.map_err(|source| LoaderError::Io {
            path: target_dir.to_path_buf(),
            source,
        })?;

        let url = installer.installer_url(&self.config, game_version, &loader.version);
        log::info!("Downloading {} installer from: {}", installer.name(), url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| LoaderError::Network {
                url: url.clone(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(LoaderError::HttpStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        let filename = filename_from_url(response.url())
            .unwrap_or_else(|| format!("{}-{}-installer.jar", kind.as_str(), loader.version));
        let installer_path = target_dir.join(filename);

        stream_to_file(response, &installer_path)
            .await
            .map_err(|e| match e {
                StreamError::Network(source) => LoaderError::Network { url, source },
                StreamError::Io(source) => LoaderError::Io {
                    path: installer_path.clone(),
                    source,
                },
            })?;

        // java does not accept `\\?\` verbatim paths on Windows
        let installer_path = canonicalize(&installer_path).map_err(|source| LoaderError::Io {
            path: installer_path.clone(),
            source,
        })?;

        log::info!("Downloaded {} installer to: {:?}", installer.name(), installer_path);
        Ok(installer_path)
    }

    /// Run `java -jar <installer> --installServer` inside `target_dir` and wait for it.
    ///
    /// A missing installer is a warning, not a hard error: the caller records
    /// it and moves on to the mods.
    pub async fn install_loader(
        &self,
        installer_path: Option<&Path>,
        target_dir: &Path,
    ) -> Result<(), LoaderError> {
        let Some(path) = installer_path else {
            log::warn!("Loader installer not found, skipping server install");
            return Err(LoaderError::InstallerMissing(None));
        };

        // Resolve before changing the working directory of the child
        let installer = match canonicalize(path) {
            Ok(p) if p.is_file() => p,
            _ => {
                log::warn!("Loader installer not found at {:?}, skipping server install", path);
                return Err(LoaderError::InstallerMissing(Some(path.to_path_buf())));
            }
        };

        ensure_dir(target_dir).await.map_err(|source| LoaderError::Io {
            path: target_dir.to_path_buf(),
            source,
        })?;

        let java = &self.config.java_path;
        let mut command = Command::new(java);
        command
            .arg("-jar")
            .arg(&installer)
            .arg("--installServer")
            .current_dir(target_dir);

        log::info!("Installing server with {:?} in {:?}", installer, target_dir);
        log::debug!("Executing: {:?}", command);

        let status = command
            .status_within(self.config.installer_timeout)
            .await
            .map_err(|e| match e {
                RunError::Spawn(source) => LoaderError::Spawn {
                    program: java.display().to_string(),
                    source,
                },
                RunError::TimedOut => {
                    LoaderError::InstallTimeout(self.config.installer_timeout.as_secs())
                }
            })?;

        if !status.success() {
            log::error!("Loader installer exited with code: {:?}", status.code());
            return Err(LoaderError::InstallerExit(status.code()));
        }

        log::info!("Server install finished in {:?}", target_dir);
        Ok(())
    }
}
