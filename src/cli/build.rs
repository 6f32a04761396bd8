//! Build command: compiles layout sources into driver files.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::export::driver::{encode_utf16le_crlf, Driver, RenderOptions};
use crate::models::Layout;
use crate::parser::parse_layout_file;
use crate::registry::Registry;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Build XKB, KLC and keylayout drivers from layout files
#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Layout source files (YAML)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Output directory (defaults to `dist`, or `output.dist_dir` in the config)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Configuration file (defaults to the user configuration)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(self.config.as_deref())?;
        let registry = Registry::builtin()
            .map_err(|e| CliError::validation(format!("Failed to load registry: {e}")))?;
        config
            .validate_geometry(&registry)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let out_dir = self
            .out_dir
            .clone()
            .unwrap_or_else(|| config.output.dist_dir.clone());
        fs::create_dir_all(&out_dir).map_err(|e| {
            CliError::io(format!(
                "Failed to create output directory {}: {e}",
                out_dir.display()
            ))
        })?;

        for file in &self.files {
            if !file.is_file() {
                return Err(CliError::io(format!(
                    "Layout file not found: {}",
                    file.display()
                )));
            }
            let layout = parse_layout_file(file, registry.clone())
                .map_err(|e| CliError::validation(format!("{e:#}")))?;

            for path in write_drivers(&layout, &out_dir, &config)? {
                println!("... {}", path.display());
            }
        }

        Ok(())
    }
}

/// Loads the configuration file given on the command line, or the user one.
pub(crate) fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let result = match path {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::io(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Config::load_from(path)
        }
        None => Config::load(),
    };
    result.map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Writes every driver of `layout` into `out_dir`; returns the written paths.
fn write_drivers(layout: &Layout, out_dir: &Path, config: &Config) -> CliResult<Vec<PathBuf>> {
    let options: RenderOptions = config.render_options();
    let name = &layout.metadata.name;
    let mut written = Vec::new();

    for driver in Driver::ALL {
        let content = driver
            .render(layout, &options)
            .map_err(|e| CliError::validation(format!("Failed to render {driver} driver: {e}")))?;
        let path = out_dir.join(format!("{name}.{}", driver.extension()));

        if driver == Driver::Klc {
            write_file(&path, &encode_utf16le_crlf(&content))?;
            written.push(path);
            if config.output.utf8_klc {
                let utf8_path = out_dir.join(format!("{name}_utf8.klc"));
                write_file(&utf8_path, content.as_bytes())?;
                written.push(utf8_path);
            }
        } else {
            write_file(&path, content.as_bytes())?;
            written.push(path);
        }
    }

    if config.output.json {
        let json = serde_json::to_string_pretty(&layout.json())
            .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
        let path = out_dir.join(format!("{name}.json"));
        write_file(&path, json.as_bytes())?;
        written.push(path);
    }

    Ok(written)
}

fn write_file(path: &Path, content: &[u8]) -> CliResult<()> {
    fs::write(path, content)
        .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote driver file");
    Ok(())
}
