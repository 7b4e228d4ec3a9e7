//! Server provisioning for CurseForge modpacks.
//!
//! A run reads a `manifest.json`, downloads and runs the Forge (or NeoForge)
//! server installer, then fetches every mod the manifest lists into
//! `{name}{version}/mods/`.
//!
//! ```rust,no_run
//! use forgepack_lib::game::{ProvisionConfig, ProvisionOptions, Provisioner};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provisioner = Provisioner::new(ProvisionConfig::default())?;
//! let report = provisioner
//!     .provision_from_path("manifest.json".as_ref(), ProvisionOptions::default())
//!     .await?;
//! for failure in report.mod_failures() {
//!     eprintln!("{}", failure.error);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod game;
pub mod utils;

pub use error::{LoaderError, ManifestError, ModDownloadError, ModFailureKind};
