use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};

use crate::error::ModDownloadError;
use crate::game::installer::config::ProvisionConfig;
use crate::game::installer::core::downloader::{
    ensure_dir, filename_from_url, stream_to_file, StreamError,
};
use crate::game::modpack::ModReference;

/// Outcome of one mod download: the written file, or why it failed
pub type ModDownloadResult = Result<PathBuf, ModDownloadError>;

/// Fetches single mod artifacts from the CurseForge download endpoint
#[derive(Clone)]
pub struct ModDownloader {
    client: Client,
    config: ProvisionConfig,
    verbose: bool,
}

impl ModDownloader {
    pub fn new(client: Client, config: ProvisionConfig, verbose: bool) -> Self {
        Self {
            client,
            config,
            verbose,
        }
    }

    /// Download one mod into `dest_dir`.
    ///
    /// A 404 from the API means the author disabled third-party distribution;
    /// that is reported as [`ModDownloadError::NotFoundFallback`] pointing at the
    /// project page rather than as a plain HTTP failure.
    pub async fn download_mod(&self, dest_dir: &Path, reference: ModReference) -> ModDownloadResult {
        ensure_dir(dest_dir).await.map_err(|source| ModDownloadError::Io {
            path: dest_dir.to_path_buf(),
            source,
        })?;

        let url = self
            .config
            .mod_download_url(reference.project_id, reference.file_id);

        if self.verbose {
            log::info!("Downloading {}...", url);
        } else {
            log::debug!("Downloading {}", url);
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ModDownloadError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(self.fallback(reference));
        }
        if status != StatusCode::OK {
            return Err(ModDownloadError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let filename = filename_from_url(response.url()).unwrap_or_else(|| {
            format!("{}-{}.jar", reference.project_id, reference.file_id)
        });
        let file_path = dest_dir.join(filename);

        stream_to_file(response, &file_path)
            .await
            .map_err(|e| match e {
                StreamError::Network(source) => ModDownloadError::Network { url, source },
                StreamError::Io(source) => ModDownloadError::Io {
                    path: file_path.clone(),
                    source,
                },
            })?;

        log::debug!("Downloaded {} -> {:?}", reference, file_path);
        Ok(file_path)
    }

    /// Terminal failure for artifacts the API refuses to serve. The project
    /// page is reported for a manual download and never scraped.
    fn fallback(&self, reference: ModReference) -> ModDownloadError {
        ModDownloadError::NotFoundFallback {
            reference,
            project_url: self.config.project_page_url(reference.project_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModFailureKind;
    use tempfile::tempdir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn downloader_for(server: &MockServer) -> ModDownloader {
        let config = ProvisionConfig {
            api_base: format!("{}/api/v1", server.uri()),
            site_base: "https://www.curseforge.com".to_string(),
            ..Default::default()
        };
        let client = config.http_client().unwrap();
        ModDownloader::new(client, config, true)
    }

    #[tokio::test]
    async fn test_success_follows_redirect_and_names_file_after_final_url() {
        let server = MockServer::start().await;
        let body: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();

        Mock::given(method("GET"))
            .and(path("/api/v1/mods/238222/files/4712345/download"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/files/4712/345/jei-1.20.1.jar", server.uri()).as_str()),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/4712/345/jei-1.20.1.jar"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = tempdir().unwrap();
        let mods_dir = temp_dir.path().join("Pack1").join("mods");
        let downloader = downloader_for(&server);

        let file_path = downloader
            .download_mod(&mods_dir, ModReference::new(238222, 4712345))
            .await
            .unwrap();

        assert_eq!(file_path, mods_dir.join("jei-1.20.1.jar"));
        assert_eq!(std::fs::read(&file_path).unwrap(), body);
        assert!(!mods_dir.join("jei-1.20.1.jar.part").exists());
    }

    #[tokio::test]
    async fn test_not_found_takes_fallback_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/mods/3/files/4/download"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let temp_dir = tempdir().unwrap();
        let err = downloader_for(&server)
            .download_mod(temp_dir.path(), ModReference::new(3, 4))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ModFailureKind::NotFoundFallback);
        assert_eq!(
            err.manual_download_url(),
            Some("https://www.curseforge.com/projects/3")
        );
        assert!(err.to_string().contains("API access disabled"));
    }

    #[tokio::test]
    async fn test_other_status_is_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/mods/5/files/6/download"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let temp_dir = tempdir().unwrap();
        let err = downloader_for(&server)
            .download_mod(temp_dir.path(), ModReference::new(5, 6))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ModFailureKind::HttpStatus(503));
        match err {
            ModDownloadError::HttpStatus { url, status } => {
                assert!(url.ends_with("/api/v1/mods/5/files/6/download"));
                assert_eq!(status, 503);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_failure() {
        // Bind then drop to get a port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = ProvisionConfig {
            api_base: format!("http://127.0.0.1:{port}/api/v1"),
            ..Default::default()
        };
        let downloader = ModDownloader::new(config.http_client().unwrap(), config, false);

        let temp_dir = tempdir().unwrap();
        let err = downloader
            .download_mod(temp_dir.path(), ModReference::new(1, 2))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ModFailureKind::Network);
    }
}
