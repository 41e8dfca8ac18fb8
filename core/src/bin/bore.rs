use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bore_core::audio::{ToneSettings, WavTonePlayer};
use bore_core::export::{MeshExporter, StlExporter, StlFormat};
use bore_core::persistence::DiskStore;
use bore_core::tuning::{cents_deviation, nearest_note};
use bore_core::{Designer, InstrumentParameters};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bore", about = "Tone-hole calculator for conical bores")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct DesignArgs {
    /// Bore length in mm
    #[arg(long, default_value_t = 600.0)]
    length: f64,
    /// Diameter at the wide end in mm
    #[arg(long, default_value_t = 20.0)]
    base_diameter: f64,
    /// Diameter at the narrow end in mm
    #[arg(long, default_value_t = 5.0)]
    tip_diameter: f64,
    #[arg(long, default_value_t = 6)]
    tone_holes: u32,
    /// Wall thickness in mm
    #[arg(long, default_value_t = 2.0)]
    wall_thickness: f64,
}

impl From<DesignArgs> for InstrumentParameters {
    fn from(args: DesignArgs) -> Self {
        InstrumentParameters::new(
            args.length,
            args.base_diameter,
            args.tip_diameter,
            args.tone_holes,
            args.wall_thickness,
        )
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tone-hole table
    Table(DesignArgs),
    /// Write the design document
    Save {
        #[command(flatten)]
        design: DesignArgs,
        path: PathBuf,
    },
    /// Read a design document and print its table
    Load { path: PathBuf },
    /// Export the bore as STL
    Stl {
        #[command(flatten)]
        design: DesignArgs,
        path: PathBuf,
        #[arg(long)]
        ascii: bool,
    },
    /// Render one hole's tone to a WAV file
    Tone {
        #[command(flatten)]
        design: DesignArgs,
        /// 1-based hole number
        hole: u32,
        path: PathBuf,
        #[arg(long, default_value_t = 0.5)]
        duration: f64,
    },
}

fn designer_for(args: DesignArgs) -> Designer {
    let params = InstrumentParameters::from(args);
    if let Err(err) = params.validate() {
        log::warn!("{}", err);
    }
    Designer::new(params)
}

fn print_table(designer: &Designer) {
    let p = designer.params();
    println!(
        "length {} mm, base {} mm, tip {} mm, wall {} mm, {} holes",
        p.length, p.base_diameter, p.tip_diameter, p.wall_thickness, p.tone_hole_count
    );
    println!(
        "{:>4} {:>10} {:>8} {:>10} {:>5} {:>8} {:>8} {:>8}",
        "#", "pos mm", "bore mm", "freq Hz", "note", "cents", "off %", "hole mm"
    );
    for hole in designer.holes() {
        let target = nearest_note(hole.estimated_frequency_hz).frequency;
        println!(
            "{:>4} {:>10.1} {:>8.2} {:>10.1} {:>5} {:>+8.1} {:>8.2} {:>8.2}",
            hole.number,
            hole.position,
            hole.bore_diameter_at_position,
            hole.estimated_frequency_hz,
            hole.nearest_note_name,
            cents_deviation(hole.estimated_frequency_hz, target),
            hole.tuning_accuracy_percent,
            hole.hole_size_mm,
        );
    }
}

/// Splits a path into a store rooted at its directory and the file name key.
fn store_for(path: &Path) -> (DiskStore, String) {
    let root = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let key = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    (DiskStore::new(root), key)
}

fn run(cli: Cli) -> bore_core::Result<()> {
    match cli.command {
        Command::Table(design) => print_table(&designer_for(design)),
        Command::Save { design, path } => {
            let (mut store, key) = store_for(&path);
            designer_for(design).save(&mut store, &key)?;
            println!("saved {}", path.display());
        }
        Command::Load { path } => {
            let (store, key) = store_for(&path);
            let mut designer = Designer::default();
            designer.load(&store, &key)?;
            print_table(&designer);
        }
        Command::Stl {
            design,
            path,
            ascii,
        } => {
            let format = if ascii {
                StlFormat::Ascii
            } else {
                StlFormat::Binary
            };
            let exporter = StlExporter::new(format);
            let bytes = designer_for(design).export_mesh(&exporter)?;
            fs::write(&path, &bytes)?;
            println!(
                "wrote {} ({} bytes, .{})",
                path.display(),
                bytes.len(),
                exporter.extension()
            );
        }
        Command::Tone {
            design,
            hole,
            path,
            duration,
        } => {
            let designer = designer_for(design);
            let mut player = WavTonePlayer::new(ToneSettings {
                duration_secs: duration,
                ..ToneSettings::default()
            });
            designer.play_hole(hole, &mut player)?;
            if let Some(clip) = player.take_clip() {
                fs::write(&path, clip)?;
            }
            let freq = designer.hole(hole)?.estimated_frequency_hz;
            println!("wrote {} ({:.1} Hz)", path.display(), freq);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

