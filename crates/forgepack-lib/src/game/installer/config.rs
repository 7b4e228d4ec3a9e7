//! Provisioning settings.
//! Defaults come from the constants below; callers build one `ProvisionConfig`
//! and hand it to every component at construction.

use std::path::PathBuf;
use std::time::Duration;

// URL Constants
pub const CURSEFORGE_API_BASE: &str = "https://curseforge.com/api/v1";
pub const CURSEFORGE_SITE_BASE: &str = "https://www.curseforge.com";
pub const FORGE_MAVEN_URL: &str = "https://maven.minecraftforge.net/";
pub const NEOFORGE_MAVEN_URL: &str = "https://maven.neoforged.net/releases/";

pub const DEFAULT_CONCURRENCY: usize = 10;
// Covers the whole transfer, body included
pub const REQUEST_TIMEOUT_SECS: u64 = 10 * 60;
pub const CONNECT_TIMEOUT_SECS: u64 = 30;
// Forge downloads the vanilla server and libraries while installing
pub const INSTALLER_TIMEOUT_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Base of the REST API serving mod files
    pub api_base: String,
    /// Base of the public site, used for manual-download hints
    pub site_base: String,
    pub forge_maven_url: String,
    pub neoforge_maven_url: String,
    /// Directory the `{name}{version}` install target is created in
    pub output_dir: PathBuf,
    /// Number of mod downloads in flight at once
    pub concurrency: usize,
    /// Limit on one request from send until the last body byte. A transfer
    /// still streaming when it expires fails as a network error.
    pub request_timeout: Duration,
    /// Limit on establishing the TCP/TLS connection only
    pub connect_timeout: Duration,
    pub installer_timeout: Duration,
    /// Java executable used to run the loader installer
    pub java_path: PathBuf,
    pub user_agent: String,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            api_base: CURSEFORGE_API_BASE.to_string(),
            site_base: CURSEFORGE_SITE_BASE.to_string(),
            forge_maven_url: FORGE_MAVEN_URL.to_string(),
            neoforge_maven_url: NEOFORGE_MAVEN_URL.to_string(),
            output_dir: PathBuf::from("."),
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            installer_timeout: Duration::from_secs(INSTALLER_TIMEOUT_SECS),
            java_path: PathBuf::from("java"),
            user_agent: concat!("forgepack/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProvisionConfig {
    /// Builds the HTTP client shared by every download. Redirects are followed
    /// (reqwest default policy) and every request is bounded by the timeouts.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
    }

    pub(crate) fn mod_download_url(&self, project_id: u64, file_id: u64) -> String {
        format!(
            "{}/mods/{}/files/{}/download",
            self.api_base.trim_end_matches('/'),
            project_id,
            file_id
        )
    }

    pub(crate) fn project_page_url(&self, project_id: u64) -> String {
        format!("{}/projects/{}", self.site_base.trim_end_matches('/'), project_id)
    }
}
