use forgepack_lib::game::{ProvisionConfig, ProvisionOptions, Provisioner};
use forgepack_lib::ModFailureKind;
use std::time::Duration;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MANIFEST: &str = r#"{"name":"Pack","version":"1","minecraft":{"version":"1.20.1","modLoaders":[{"id":"forge-47.2.0","primary":true}]},"files":[{"projectID":1,"fileID":2},{"projectID":3,"fileID":4}]}"#;

fn config(server: &MockServer, output_dir: &std::path::Path) -> ProvisionConfig {
    ProvisionConfig {
        api_base: format!("{}/api/v1", server.uri()),
        forge_maven_url: format!("{}/maven/", server.uri()),
        output_dir: output_dir.to_path_buf(),
        request_timeout: Duration::from_secs(10),
        ..Default::default()
    }
}

async fn mount_jar(server: &MockServer, project: u32, file: u32, name: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/mods/{project}/files/{file}/download")))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/files/{name}", server.uri()).as_str()),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/files/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

async fn mount_installer(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/maven/net/minecraftforge/forge/.*-installer\.jar$"))
        .respond_with(ResponseTemplate::new(200).set_body_string("installer"))
        .mount(server)
        .await;
}

fn write_manifest(dir: &std::path::Path) -> std::path::PathBuf {
    let manifest_path = dir.join("manifest.json");
    std::fs::write(&manifest_path, MANIFEST).unwrap();
    manifest_path
}

#[tokio::test]
async fn test_pack_with_both_mods_available() {
    let _ = env_logger::builder().is_test(true).try_init();

    let server = MockServer::start().await;
    mount_installer(&server).await;
    mount_jar(&server, 1, 2, "first-mod-1.0.jar", b"first").await;
    mount_jar(&server, 3, 4, "second-mod-2.0.jar", b"second").await;

    let work_dir = tempfile::tempdir().unwrap();
    let manifest_path = write_manifest(work_dir.path());
    let provisioner = Provisioner::new(config(&server, work_dir.path())).unwrap();

    let report = provisioner
        .provision_from_path(
            &manifest_path,
            ProvisionOptions {
                skip_loader_install: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mods_dir = work_dir.path().join("Pack1").join("mods");
    assert_eq!(std::fs::read(mods_dir.join("first-mod-1.0.jar")).unwrap(), b"first");
    assert_eq!(std::fs::read(mods_dir.join("second-mod-2.0.jar")).unwrap(), b"second");
    assert!(work_dir
        .path()
        .join("Pack1")
        .join("forge-1.20.1-47.2.0-installer.jar")
        .is_file());
    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_pack_completes_when_one_mod_is_not_found() {
    let _ = env_logger::builder().is_test(true).try_init();

    let server = MockServer::start().await;
    mount_installer(&server).await;
    mount_jar(&server, 1, 2, "first-mod-1.0.jar", b"first").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/mods/3/files/4/download"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let work_dir = tempfile::tempdir().unwrap();
    let manifest_path = write_manifest(work_dir.path());
    let provisioner = Provisioner::new(config(&server, work_dir.path())).unwrap();

    let report = tokio::time::timeout(
        Duration::from_secs(30),
        provisioner.provision_from_path(
            &manifest_path,
            ProvisionOptions {
                skip_loader_install: true,
                verbose: true,
                ..Default::default()
            },
        ),
    )
    .await
    .expect("provisioning must not hang")
    .unwrap();

    let mods_dir = work_dir.path().join("Pack1").join("mods");
    assert!(mods_dir.join("first-mod-1.0.jar").is_file());

    let failures = report.mod_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].reference.project_id, 3);
    assert_eq!(failures[0].error.kind(), ModFailureKind::NotFoundFallback);
    assert_eq!(
        report.manual_downloads(),
        vec!["https://www.curseforge.com/projects/3"]
    );
}
