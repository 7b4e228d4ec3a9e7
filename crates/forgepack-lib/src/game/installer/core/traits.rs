use crate::game::installer::config::ProvisionConfig;

/// Trait for modloader installer sources.
/// Each modloader (Forge, NeoForge) knows where its installer jar lives.
pub trait ModloaderInstaller: Send + Sync {
    /// Human readable loader name for logs
    fn name(&self) -> &'static str;

    /// Deterministic maven URL of the installer jar for this game/loader pair.
    fn installer_url(
        &self,
        config: &ProvisionConfig,
        game_version: &str,
        loader_version: &str,
    ) -> String;
}
