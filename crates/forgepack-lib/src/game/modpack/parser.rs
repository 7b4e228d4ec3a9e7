use std::path::Path;

use crate::error::ManifestError;
use crate::game::modpack::types::{
    CurseForgeManifest, ModloaderType, ModpackManifest, PrimaryLoader,
};

/// Reads and decodes a CurseForge manifest from disk
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<CurseForgeManifest, ManifestError> {
    let path = path.as_ref();
    log::debug!("[load_manifest] Reading {:?}", path);

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ManifestError::NotFound(path.to_path_buf()),
        _ => ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_manifest(&content)
}

pub fn parse_manifest(content: &str) -> Result<CurseForgeManifest, ManifestError> {
    let manifest: CurseForgeManifest = serde_json::from_str(content)?;
    log::info!(
        "[parse_manifest] Parsed manifest {} v{} ({} files)",
        manifest.name,
        manifest.version,
        manifest.files.len()
    );
    Ok(manifest)
}

/// Returns the Minecraft version and the primary mod loader.
///
/// Only the first entry flagged `primary` is considered. The loader is `None`
/// when no entry is primary; the game version is `None` when the manifest has
/// no `minecraft.version`.
pub fn extract_loader_version(
    manifest: &CurseForgeManifest,
) -> (Option<String>, Option<PrimaryLoader>) {
    let Some(minecraft) = manifest.minecraft.as_ref() else {
        return (None, None);
    };

    let loader = minecraft
        .mod_loaders
        .iter()
        .find(|l| l.primary)
        .map(|l| classify_loader_id(&l.id));

    (minecraft.version.clone(), loader)
}

fn classify_loader_id(id: &str) -> PrimaryLoader {
    for kind in [ModloaderType::NeoForge, ModloaderType::Forge] {
        if let Some(version) = id.strip_prefix(kind.id_prefix()) {
            return PrimaryLoader {
                id: id.to_string(),
                kind: Some(kind),
                version: version.to_string(),
            };
        }
    }

    log::warn!("Unrecognised mod loader id: {}", id);
    PrimaryLoader {
        id: id.to_string(),
        kind: None,
        version: id.to_string(),
    }
}

impl From<CurseForgeManifest> for ModpackManifest {
    fn from(manifest: CurseForgeManifest) -> Self {
        let (game_version, loader) = extract_loader_version(&manifest);

        let mut mods = Vec::with_capacity(manifest.files.len());
        let mut invalid = Vec::new();
        for file in manifest.files {
            match file.reference() {
                Some(reference) => mods.push(reference),
                None => invalid.push(file),
            }
        }

        ModpackManifest {
            name: manifest.name,
            version: manifest.version,
            game_version,
            loader,
            mods,
            invalid,
        }
    }
}
