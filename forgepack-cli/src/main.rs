use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use forgepack_lib::game::{
    ProgressReporter, ProvisionConfig, ProvisionOptions, ProvisionReport, Provisioner,
};

/// Set up a modded Minecraft server from a CurseForge manifest.json
#[derive(Debug, Parser)]
#[command(name = "forgepack", version, about)]
struct Args {
    /// Path to the modpack manifest.json
    manifest_file: PathBuf,

    /// Skip downloading mods
    #[arg(long)]
    skip_mods: bool,

    /// Skip running the mod loader installer
    #[arg(long)]
    skip_loader_install: bool,

    /// Log every mod request
    #[arg(long)]
    verbose: bool,

    /// Directory the `{name}{version}` server folder is created in
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Java executable used to run the loader installer
    #[arg(long, default_value = "java")]
    java: PathBuf,
}

struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn start_step(&self, name: &str, _total_steps: Option<u32>) {
        println!("==> {}", name);
    }

    fn set_message(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn set_step_count(&self, current: u32, total: Option<u32>) {
        if let Some(total) = total {
            if current == total {
                println!("    {}/{} done", current, total);
            }
        }
    }

    fn done(&self, success: bool, message: Option<&str>) {
        if let Some(message) = message {
            if success {
                println!("    {}", message);
            } else {
                eprintln!("    {}", message);
            }
        }
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn print_summary(report: &ProvisionReport) {
    println!("Server directory: {}", report.target.root().display());

    if let Some(path) = &report.installer_path {
        println!("Loader installer: {}", path.display());
    }
    if report.loader_installed {
        println!("Mod loader installed");
    }
    if !report.loader_errors.is_empty() {
        eprintln!("Mod loader: {} error(s), see log above", report.loader_errors.len());
    }

    if let Some(mods) = &report.mods {
        println!(
            "Mods: {} downloaded, {} failed, {} skipped",
            mods.downloaded.len(),
            mods.failures.len(),
            mods.skipped.len()
        );
    }

    let manual = report.manual_downloads();
    if !manual.is_empty() {
        println!("Download these mods manually into {}:", report.target.mods_dir().display());
        for url in manual {
            println!("  {}", url);
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = ProvisionConfig {
        output_dir: args.output_dir,
        java_path: args.java,
        ..Default::default()
    };
    let options = ProvisionOptions {
        skip_mods: args.skip_mods,
        skip_loader_install: args.skip_loader_install,
        verbose: args.verbose,
    };

    let provisioner = Provisioner::new(config)
        .context("Failed to build HTTP client")?
        .with_reporter(Arc::new(ConsoleReporter));

    let report = provisioner
        .provision_from_path(&args.manifest_file, options)
        .await
        .with_context(|| format!("Could not read manifest {:?}", args.manifest_file))?;

    print_summary(&report);

    if report.has_failures() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["forgepack", "manifest.json"]);
        assert_eq!(args.manifest_file, PathBuf::from("manifest.json"));
        assert!(!args.skip_mods);
        assert!(!args.skip_loader_install);
        assert!(!args.verbose);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.java, PathBuf::from("java"));
    }

    #[test]
    fn test_args_flags() {
        let args = Args::parse_from([
            "forgepack",
            "--skip-mods",
            "--skip-loader-install",
            "--verbose",
            "--output-dir",
            "/srv",
            "--java",
            "/opt/jdk/bin/java",
            "pack/manifest.json",
        ]);
        assert!(args.skip_mods && args.skip_loader_install && args.verbose);
        assert_eq!(args.output_dir, PathBuf::from("/srv"));
        assert_eq!(args.java, PathBuf::from("/opt/jdk/bin/java"));
    }

    #[test]
    fn test_manifest_path_is_required() {
        assert!(Args::try_parse_from(["forgepack"]).is_err());
    }
}
