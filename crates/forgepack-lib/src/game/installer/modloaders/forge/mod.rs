use crate::game::installer::config::ProvisionConfig;
use crate::game::installer::core::traits::ModloaderInstaller;

pub struct ForgeInstaller;

impl ModloaderInstaller for ForgeInstaller {
    fn name(&self) -> &'static str {
        "Forge"
    }

    fn installer_url(
        &self,
        config: &ProvisionConfig,
        game_version: &str,
        loader_version: &str,
    ) -> String {
        // Forge version format: 1.20.1-47.2.0 or just 47.2.0
        let full_version = if loader_version.contains('-') {
            loader_version.to_string()
        } else {
            format!("{}-{}", game_version, loader_version)
        };

        format!(
            "{}net/minecraftforge/forge/{}/forge-{}-installer.jar",
            with_trailing_slash(&config.forge_maven_url),
            full_version,
            full_version
        )
    }
}

pub(crate) fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forge_installer_url() {
        let config = ProvisionConfig::default();
        assert_eq!(
            ForgeInstaller.installer_url(&config, "1.20.1", "47.2.0"),
            "https://maven.minecraftforge.net/net/minecraftforge/forge/1.20.1-47.2.0/forge-1.20.1-47.2.0-installer.jar"
        );
    }

    #[test]
    fn test_forge_version_already_qualified() {
        let config = ProvisionConfig {
            forge_maven_url: "http://localhost:9000".to_string(),
            ..Default::default()
        };
        assert_eq!(
            ForgeInstaller.installer_url(&config, "1.12.2", "1.12.2-14.23.5.2860"),
            "http://localhost:9000/net/minecraftforge/forge/1.12.2-14.23.5.2860/forge-1.12.2-14.23.5.2860-installer.jar"
        );
    }
}
