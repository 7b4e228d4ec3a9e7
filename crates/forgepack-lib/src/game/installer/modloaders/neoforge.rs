use crate::game::installer::config::ProvisionConfig;
use crate::game::installer::core::traits::ModloaderInstaller;
use crate::game::installer::modloaders::forge::with_trailing_slash;

pub struct NeoForgeInstaller;

impl ModloaderInstaller for NeoForgeInstaller {
    fn name(&self) -> &'static str {
        "NeoForge"
    }

    fn installer_url(
        &self,
        config: &ProvisionConfig,
        _game_version: &str,
        loader_version: &str,
    ) -> String {
        // NeoForge version format: "21.1.65" or "21.0.65-beta"
        // The version is used directly as-is for NeoForge (not prefixed with MC version)
        format!(
            "{}net/neoforged/neoforge/{}/neoforge-{}-installer.jar",
            with_trailing_slash(&config.neoforge_maven_url),
            loader_version,
            loader_version
        )
    }
}
