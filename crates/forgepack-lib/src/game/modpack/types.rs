use serde::{Deserialize, Deserializer};

/// CurseForge modpack manifest (manifest.json). Fields the provisioner does
/// not use are ignored.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurseForgeManifest {
    #[serde(default)]
    pub minecraft: Option<CurseForgeMinecraft>,
    pub name: String,
    pub version: String,
    #[serde(default, deserialize_with = "lenient_files")]
    pub files: Vec<CurseForgeFile>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CurseForgeMinecraft {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub mod_loaders: Vec<CurseForgeModLoader>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurseForgeModLoader {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub primary: bool,
}

/// One entry of the manifest's `files` list.
///
/// Identifiers of the wrong JSON type are read as absent so a single malformed
/// entry is skipped later instead of failing the whole manifest.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CurseForgeFile {
    #[serde(rename = "projectID", default, deserialize_with = "lenient_id")]
    pub project_id: Option<u64>,
    #[serde(rename = "fileID", default, deserialize_with = "lenient_id")]
    pub file_id: Option<u64>,
}

fn lenient_files<'de, D>(deserializer: D) -> Result<Vec<CurseForgeFile>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()))
}

impl CurseForgeFile {
    /// Returns the identifier pair when both ids are present and non-zero.
    pub fn reference(&self) -> Option<ModReference> {
        match (self.project_id, self.file_id) {
            (Some(project_id), Some(file_id)) if project_id > 0 && file_id > 0 => {
                Some(ModReference { project_id, file_id })
            }
            _ => None,
        }
    }
}

/// A (project, file) identifier pair resolving to a downloadable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModReference {
    pub project_id: u64,
    pub file_id: u64,
}

impl ModReference {
    pub fn new(project_id: u64, file_id: u64) -> Self {
        Self { project_id, file_id }
    }
}

impl std::fmt::Display for ModReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "project {} / file {}", self.project_id, self.file_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModloaderType {
    Forge,
    NeoForge,
}

impl ModloaderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModloaderType::Forge => "forge",
            ModloaderType::NeoForge => "neoforge",
        }
    }

    /// Id prefix used by CurseForge manifests, e.g. `forge-47.2.0`.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ModloaderType::Forge => "forge-",
            ModloaderType::NeoForge => "neoforge-",
        }
    }
}

impl std::fmt::Display for ModloaderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The manifest's single authoritative loader entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryLoader {
    /// Raw id as written in the manifest (`forge-47.2.0`)
    pub id: String,
    /// None when the id carries no known prefix
    pub kind: Option<ModloaderType>,
    /// Id with the known prefix stripped (`47.2.0`)
    pub version: String,
}

/// Immutable view of a manifest, read once at startup.
#[derive(Debug, Clone)]
pub struct ModpackManifest {
    pub name: String,
    pub version: String,
    pub game_version: Option<String>,
    pub loader: Option<PrimaryLoader>,
    /// Valid references in manifest order
    pub mods: Vec<ModReference>,
    /// Entries missing a project or file id
    pub invalid: Vec<CurseForgeFile>,
}

impl ModpackManifest {
    pub fn loader_id(&self) -> Option<&str> {
        self.loader.as_ref().map(|l| l.id.as_str())
    }

    pub fn loader_version(&self) -> Option<&str> {
        self.loader.as_ref().map(|l| l.version.as_str())
    }
}
