use std::io::Read;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, bail, eyre};
use serde::Serialize;
use triuv_core::host::DocumentFormat;
use triuv_core::{Command, CoordinatePair, Float, Mapping, Scene, StatusLog};
use triuv_prefs::Preferences;

use crate::panel::{Panel, PanelJson};

/// Triangle UV mapper
///
/// Assigns three stored UV coordinates to the corners of the selected triangle
/// in a scene document, rotating through all six corner mappings.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print the stored UV coordinates and current mapping.
    Show {
        /// Scene file to read, use '-' for stdin.
        #[arg(value_parser)]
        scene: clio::Input,

        /// Scene file format (defaults to the preferred format; YAML also
        /// accepts JSON).
        #[arg(long)]
        format: Option<DocumentFormat>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Capture UVs from the selected triangle (A, B, C) into slots 1, 2, 3.
    Capture {
        /// Scene file to modify.
        scene: PathBuf,
    },
    /// Apply the current mapping to the selected triangle and rotate to the
    /// next mapping.
    Apply {
        /// Scene file to modify.
        scene: PathBuf,

        /// Number of times to apply.
        #[arg(short = 'n', long, default_value_t = 1)]
        times: usize,
    },
    /// Set the UV coordinates stored in a slot.
    SetSlot {
        /// Scene file to modify.
        scene: PathBuf,
        /// Slot number (1, 2, or 3).
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        slot: u8,
        /// U coordinate.
        #[arg(allow_negative_numbers = true)]
        x: Float,
        /// V coordinate.
        #[arg(allow_negative_numbers = true)]
        y: Float,
    },
    /// Set the current mapping (values outside 1 to 6 are clamped).
    SetMapping {
        /// Scene file to modify.
        scene: PathBuf,
        /// Mapping number.
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Restore the default UV coordinates and mapping.
    Reset {
        /// Scene file to modify.
        scene: PathBuf,
    },
    /// Print all six mappings.
    Mappings {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective preferences as YAML.
    Prefs,
}

pub(crate) fn exec(subcommand: Subcommand, prefs: &Preferences) -> Result<()> {
    match subcommand {
        Subcommand::Show {
            mut scene,
            format,
            json,
        } => {
            let format = format.unwrap_or(prefs.document.default_format);
            let mut buffer = String::new();
            scene
                .read_to_string(&mut buffer)
                .wrap_err("error reading scene")?;
            let scene = Scene::from_str(&buffer, format).wrap_err("error parsing scene")?;
            if json {
                write_json_output(&PanelJson::from(&scene.triuv))
            } else {
                let panel = Panel {
                    state: &scene.triuv,
                    prefs: &prefs.display,
                };
                println!("{panel}");
                Ok(())
            }
        }

        Subcommand::Capture { scene } => {
            edit_scene(&scene, prefs, |scene| run_command(scene, Command::Capture))
        }

        Subcommand::Apply { scene, times } => edit_scene(&scene, prefs, |scene| {
            for _ in 0..times {
                run_command(scene, Command::Apply)?;
            }
            Ok(())
        }),

        Subcommand::SetSlot { scene, slot, x, y } => edit_scene(&scene, prefs, |scene| {
            let value = CoordinatePair::new(x, y);
            if !scene.triuv.set_slot(usize::from(slot) - 1, value) {
                bail!("slot {slot} out of range");
            }
            println!("Set UV {slot} to {value}.");
            Ok(())
        }),

        Subcommand::SetMapping { scene, index } => edit_scene(&scene, prefs, |scene| {
            scene.triuv.set_index(index);
            if i64::from(scene.triuv.index.get()) != index {
                log::warn!("mapping {index} out of range; clamped to {}", scene.triuv.index);
            }
            println!("Current mapping is {}.", scene.triuv.index);
            Ok(())
        }),

        Subcommand::Reset { scene } => edit_scene(&scene, prefs, |scene| {
            scene.triuv.reset();
            println!("Reset UV coordinates and mapping.");
            Ok(())
        }),

        Subcommand::Mappings { json } => {
            if json {
                #[derive(Serialize)]
                struct Entry {
                    number: u8,
                    name: Mapping,
                    corners: [usize; 3],
                    mirrored: bool,
                }
                let entries: Vec<Entry> = Mapping::all()
                    .map(|m| Entry {
                        number: m.number(),
                        name: m,
                        corners: m.slots().map(|slot| slot + 1),
                        mirrored: m.is_mirrored(),
                    })
                    .collect();
                write_json_output(&entries)
            } else {
                for m in Mapping::all() {
                    let mirrored = if m.is_mirrored() { "  (mirrored)" } else { "" };
                    println!("{}  {}{mirrored}", m.number(), m.describe());
                }
                Ok(())
            }
        }

        Subcommand::Prefs => {
            print!("{}", prefs.to_yaml()?);
            Ok(())
        }
    }
}

/// Loads a scene, modifies it, and writes it back if the modification
/// succeeded.
fn edit_scene(
    path: &Path,
    prefs: &Preferences,
    f: impl FnOnce(&mut Scene) -> Result<()>,
) -> Result<()> {
    let format = prefs.document.default_format;
    let mut scene = Scene::load(path, format)
        .wrap_err_with(|| format!("error loading scene from {}", path.display()))?;

    f(&mut scene)?;

    if prefs.document.backup_before_write {
        triuv_paths::copy_to_sibling_backup(path).wrap_err("error backing up scene")?;
    }
    scene
        .save(path, format)
        .wrap_err_with(|| format!("error saving scene to {}", path.display()))?;
    Ok(())
}

/// Runs a command, printing its status message. Fails if the command failed.
fn run_command(scene: &mut Scene, command: Command) -> Result<()> {
    let mut log = StatusLog::new();
    let outcome = scene.execute(command, &mut log);
    if !outcome.is_success() {
        return Err(eyre!(outcome.message));
    }
    println!("{}", outcome.message);
    Ok(())
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .wrap_err("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
