//! View command: prints one exporter view of a layout.

use crate::cli::common::{CliError, CliResult};
use crate::models::{LayerPair, Layout, Level};
use crate::parser::parse_layout_file;
use crate::registry::Registry;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Layout views that can be printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewKind {
    /// XKB key statements
    Xkb,
    /// KLC layout table
    Klc,
    /// KLC dead key tables
    KlcDeadkeys,
    /// KLC dead key names
    KlcDkIndex,
    /// One macOS key map (see --level)
    OsxKeymap,
    /// macOS actions
    OsxActions,
    /// macOS dead key terminators
    OsxTerminators,
    /// ASCII-art preview (see --levels and --geometry)
    Geometry,
    /// Web keymap
    Json,
}

/// Print an exporter view of a layout file
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Path to layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// View to print
    #[arg(value_enum)]
    pub view: ViewKind,

    /// macOS key map index (0 base, 1 shift, 2 caps lock, 4 AltGr, 5 AltGr+shift)
    #[arg(long, default_value_t = 0)]
    pub level: usize,

    /// Comma-separated lower levels of the layer pairs to draw (0, 2, 4)
    #[arg(long, value_delimiter = ',', default_values_t = vec![0, 2])]
    pub levels: Vec<usize>,

    /// Geometry to draw on (defaults to the layout geometry)
    #[arg(long, value_name = "NAME")]
    pub geometry: Option<String>,
}

impl ViewArgs {
    /// Execute the view command
    pub fn execute(&self) -> CliResult<()> {
        if !self.layout.is_file() {
            return Err(CliError::io(format!(
                "Layout file not found: {}",
                self.layout.display()
            )));
        }
        let registry = Registry::builtin()
            .map_err(|e| CliError::validation(format!("Failed to load registry: {e}")))?;
        let layout = parse_layout_file(&self.layout, registry)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        println!("{}", self.render(&layout)?);
        Ok(())
    }

    fn render(&self, layout: &Layout) -> CliResult<String> {
        let lines = match self.view {
            ViewKind::Xkb => layout.xkb(),
            ViewKind::Klc => layout.klc(),
            ViewKind::KlcDeadkeys => layout.klc_deadkeys(),
            ViewKind::KlcDkIndex => layout.klc_dk_index(),
            ViewKind::OsxKeymap => layout
                .osx_keymap(self.level)
                .map_err(|e| CliError::validation(e.to_string()))?,
            ViewKind::OsxActions => layout.osx_actions(),
            ViewKind::OsxTerminators => layout.osx_terminators(),
            ViewKind::Geometry => {
                let pairs = parse_pairs(&self.levels)?;
                let name = self
                    .geometry
                    .clone()
                    .unwrap_or_else(|| layout.geometry().name.clone());
                layout
                    .get_geometry(&pairs, &name)
                    .map_err(|e| CliError::validation(e.to_string()))?
            }
            ViewKind::Json => {
                return serde_json::to_string_pretty(&layout.json())
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")));
            }
        };
        Ok(lines.join("\n"))
    }
}

/// Maps lower level indexes (0, 2, 4) to their layer pairs.
fn parse_pairs(levels: &[usize]) -> CliResult<Vec<LayerPair>> {
    levels
        .iter()
        .map(|&index| {
            Level::from_index(index)
                .filter(|&level| level.pair().lower() == level)
                .map(Level::pair)
                .ok_or_else(|| {
                    CliError::validation(format!("Invalid level {index} (expected 0, 2 or 4)"))
                })
        })
        .collect()
}
