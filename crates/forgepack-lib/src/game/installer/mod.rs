pub mod config;
pub mod core;
pub mod modloaders;
pub mod mods;
pub mod types;


use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{LoaderError, ManifestError};
use crate::game::modpack::{load_manifest, ModpackManifest};
use config::ProvisionConfig;
use self::core::batch::{BatchDownloader, BatchReport, ModFailure};
use modloaders::LoaderInstaller;
use mods::ModDownloader;
use types::{InstallTarget, ProgressReporter, ProvisionOptions, SilentProgressReporter};

/// Everything a provisioning run produced, including the failures it tolerated
#[derive(Debug)]
pub struct ProvisionReport {
    pub target: InstallTarget,
    /// Installer jar, when the download succeeded
    pub installer_path: Option<PathBuf>,
    /// True once the installer ran and exited successfully
    pub loader_installed: bool,
    pub loader_errors: Vec<LoaderError>,
    /// None when the mod phase was skipped
    pub mods: Option<BatchReport>,
}

impl ProvisionReport {
    fn new(target: InstallTarget) -> Self {
        Self {
            target,
            installer_path: None,
            loader_installed: false,
            loader_errors: Vec::new(),
            mods: None,
        }
    }

    pub fn mod_failures(&self) -> &[ModFailure] {
        self.mods.as_ref().map(|m| m.failures.as_slice()).unwrap_or(&[])
    }

    pub fn has_failures(&self) -> bool {
        !self.loader_errors.is_empty() || !self.mod_failures().is_empty()
    }

    /// Project pages of mods that have to be downloaded by hand
    pub fn manual_downloads(&self) -> Vec<&str> {
        self.mod_failures()
            .iter()
            .filter_map(|f| f.error.manual_download_url())
            .collect()
    }
}

/// Sequences the two install phases: mod loader first, then the mods.
///
/// Only a manifest that cannot be read stops a run. Loader and mod failures
/// are collected into the [`ProvisionReport`].
pub struct Provisioner {
    config: ProvisionConfig,
    client: Client,
    reporter: Arc<dyn ProgressReporter>,
}

impl Provisioner {
    pub fn new(config: ProvisionConfig) -> reqwest::Result<Self> {
        let client = config.http_client()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: ProvisionConfig, client: Client) -> Self {
        Self {
            config,
            client,
            reporter: Arc::new(SilentProgressReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Load the manifest at `path` and provision it
    pub async fn provision_from_path(
        &self,
        path: &Path,
        options: ProvisionOptions,
    ) -> Result<ProvisionReport, ManifestError> {
        let manifest = ModpackManifest::from(load_manifest(path)?);
        Ok(self.provision(&manifest, options).await)
    }

    pub async fn provision(
        &self,
        manifest: &ModpackManifest,
        options: ProvisionOptions,
    ) -> ProvisionReport {
        let target = InstallTarget::for_manifest(&self.config, manifest);
        log::info!(
            "Provisioning {} v{} into {:?}",
            manifest.name,
            manifest.version,
            target.root()
        );

        let mut report = ProvisionReport::new(target);

        self.install_loader_phase(manifest, options, &mut report).await;

        if options.skip_mods {
            log::info!("Skipping mod downloads");
        } else {
            let downloader =
                ModDownloader::new(self.client.clone(), self.config.clone(), options.verbose);
            let batch = BatchDownloader::new(downloader, self.config.concurrency);
            let mods = batch
                .download_all(
                    manifest.mods.clone(),
                    manifest.invalid.clone(),
                    &report.target.mods_dir(),
                    self.reporter.clone(),
                )
                .await;
            log_mod_errors(&mods);
            report.mods = Some(mods);
        }

        report
    }

    async fn install_loader_phase(
        &self,
        manifest: &ModpackManifest,
        options: ProvisionOptions,
        report: &mut ProvisionReport,
    ) {
        let installer = LoaderInstaller::new(self.client.clone(), self.config.clone());

        self.reporter.start_step("Downloading mod loader", None);
        match installer
            .download_installer(
                report.target.root(),
                manifest.game_version.as_deref(),
                manifest.loader.as_ref(),
            )
            .await
        {
            Ok(path) => {
                log::info!("Loader installer downloaded to {:?}", path);
                report.installer_path = Some(path);
            }
            Err(e) => {
                log::error!("Failed to download mod loader: {}", e);
                report.loader_errors.push(e);
            }
        }

        if options.skip_loader_install {
            log::info!("Skipping mod loader install");
            return;
        }
        // Download failure already recorded; nothing to run
        if report.installer_path.is_none() {
            return;
        }

        self.reporter.start_step("Installing mod loader", None);
        match installer
            .install_loader(report.installer_path.as_deref(), report.target.root())
            .await
        {
            Ok(()) => report.loader_installed = true,
            Err(e) => {
                log::error!("Mod loader install failed: {}", e);
                report.loader_errors.push(e);
            }
        }
    }
}

fn log_mod_errors(report: &BatchReport) {
    if report.failures.is_empty() {
        return;
    }
    log::error!("Errors while downloading:");
    for failure in &report.failures {
        log::error!("  {}", failure.error);
    }
}
