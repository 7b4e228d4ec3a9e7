pub mod installer;
pub mod modpack;

// Re-export commonly used types
pub use installer::config::ProvisionConfig;
pub use installer::types::{InstallTarget, ProgressReporter, ProvisionOptions};
pub use installer::{ProvisionReport, Provisioner};
pub use modpack::{ModReference, ModpackManifest, PrimaryLoader};
