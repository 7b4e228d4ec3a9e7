use std::path::{Path, PathBuf};

use crate::game::installer::config::ProvisionConfig;
use crate::game::modpack::ModpackManifest;

/// Progress reporter trait for provisioning operations
/// Implementations forward updates to a console, a UI, or nowhere.
pub trait ProgressReporter: Send + Sync {
    /// Start a new step with optional total steps
    fn start_step(&self, name: &str, total_steps: Option<u32>);

    /// Set a short status message
    fn set_message(&self, message: &str);

    /// Set a numeric step count for the current step (e.g. "3/12").
    /// `total` may be None when unknown.
    fn set_step_count(&self, current: u32, total: Option<u32>);

    /// Mark operation as complete
    fn done(&self, success: bool, message: Option<&str>);
}

/// A progress reporter that does nothing (silent).
/// Useful for library callers and tests.
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start_step(&self, _name: &str, _total_steps: Option<u32>) {}
    fn set_message(&self, _message: &str) {}
    fn set_step_count(&self, _current: u32, _total: Option<u32>) {}
    fn done(&self, _success: bool, _message: Option<&str>) {}
}

/// Flags selecting which phases of a provisioning run execute
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvisionOptions {
    pub skip_mods: bool,
    pub skip_loader_install: bool,
    /// Log every outgoing mod request URL at info level
    pub verbose: bool,
}

/// Output directory of one provisioning run.
///
/// Named `{name}{version}` after the manifest, under the configured output
/// directory. Nothing is created until a component first writes into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    root: PathBuf,
}

impl InstallTarget {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn for_manifest(config: &ProvisionConfig, manifest: &ModpackManifest) -> Self {
        Self::new(
            config
                .output_dir
                .join(format!("{}{}", manifest.name, manifest.version)),
        )
    }

    /// Server root; the loader installer is written here
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mods_dir(&self) -> PathBuf {
        self.root.join("mods")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::modpack::{parse_manifest, ModpackManifest};

    #[test]
    fn test_install_target_layout() {
        let manifest = ModpackManifest::from(
            parse_manifest(r#"{"name":"Pack","version":"1"}"#).unwrap(),
        );
        let config = ProvisionConfig {
            output_dir: PathBuf::from("/srv/packs"),
            ..Default::default()
        };

        let target = InstallTarget::for_manifest(&config, &manifest);
        assert_eq!(target.root(), Path::new("/srv/packs/Pack1"));
        assert_eq!(target.mods_dir(), PathBuf::from("/srv/packs/Pack1/mods"));
    }
}
