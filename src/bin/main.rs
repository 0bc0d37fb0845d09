//! Tet Exporter CLI
//!
//! Export mesh objects to TetraMaker .tet files for Arthros and Hystsim.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tet_exporter::{
    export_selection, load_scene, parse_tet, ExportConfig, MeshSource, ModeSelection,
    SimulatorType,
};

#[derive(Parser)]
#[command(name = "tet-exporter")]
#[command(author, version, about = "Export tetrahedral meshes to TetraMaker .tet files", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the selected objects of a scene
    Export {
        /// Input scene (JSON) or Wavefront OBJ file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path; with several objects, a prefix that each
        /// `<object name>.tet` is appended to
        #[arg(short, long)]
        output: PathBuf,

        /// Target simulator
        #[arg(short, long, value_enum, default_value = "arthros")]
        simulator: Simulator,

        /// Tetrahedra mode: first-face, uniform, triangle-facets, grouped-quads or direct
        #[arg(short, long, default_value = "first-face", value_parser = parse_mode)]
        mode: ModeSelection,

        /// Only export the named object
        #[arg(long)]
        object: Option<String>,
    },

    /// List the objects of a scene
    List {
        /// Input scene (JSON) or Wavefront OBJ file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show information about a .tet file
    Info {
        /// Path to a .tet file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Simulator {
    /// Keep source axes
    Arthros,
    /// Write (x, z, -y)
    Hystsim,
}

impl From<Simulator> for SimulatorType {
    fn from(value: Simulator) -> Self {
        match value {
            Simulator::Arthros => SimulatorType::Arthros,
            Simulator::Hystsim => SimulatorType::Hystsim,
        }
    }
}

fn parse_mode(s: &str) -> Result<ModeSelection, String> {
    s.parse()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Export {
            input,
            output,
            simulator,
            mode,
            object,
        } => {
            export_scene(&input, &output, simulator.into(), mode, object)?;
        }
        Commands::List { input } => {
            list_scene(&input)?;
        }
        Commands::Info { input } => {
            show_tet_info(&input)?;
        }
    }

    Ok(())
}

fn export_scene(
    input_path: &PathBuf,
    output_path: &PathBuf,
    simulator: SimulatorType,
    mode: ModeSelection,
    object: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading scene from {:?}...", input_path);
    let mut scene = load_scene(input_path)?;
    println!("  Found {} objects", scene.objects.len());

    if let Some(name) = &object {
        for obj in &mut scene.objects {
            obj.selected = &obj.name == name;
        }
        scene.active = Some(name.clone());
    }

    let config = ExportConfig::default().with_mode(mode);
    println!("Exporting for {} ({} mode)...", simulator.name(), mode);
    let report = export_selection(&scene, output_path, simulator, &config)?;

    for obj in &report.objects {
        println!(
            "  {} -> {:?}: {} vertices, {} tetrahedra ({})",
            obj.object_name, obj.path, obj.vertex_count, obj.tetrahedron_count, obj.mode
        );
        if obj.tetrahedron_count != obj.expected_tetrahedra {
            println!(
                "    expected {} tetrahedra from {} polygons",
                obj.expected_tetrahedra,
                obj.mode
            );
        }
        for diag in &obj.diagnostics {
            println!("    warning: {}", diag);
        }
    }
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.name, skipped.reason);
    }

    println!("Exported {} file(s)", report.files_written());
    Ok(())
}

fn list_scene(input_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(input_path)?;
    let active = scene.active_object().map(|o| o.name.clone());

    println!("\nScene objects:");
    for obj in &scene.objects {
        let marker = if Some(&obj.name) == active.as_ref() { "*" } else { " " };
        println!(
            " {} {} [{}]{} location={:?} vertices={} polygons={}",
            marker,
            obj.name,
            obj.kind,
            if obj.selected { " selected" } else { "" },
            obj.location,
            obj.vertices.len(),
            obj.polygons.len()
        );
    }

    Ok(())
}

fn show_tet_info(input_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input_path)?;
    let mesh = parse_tet(&text)?;

    println!("\nTet File Info:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Tetrahedra: {}", mesh.tetrahedron_count());
    if let Some(bounds) = mesh.bounds() {
        println!("  Bounds: {:?} .. {:?}", bounds.min, bounds.max);
        println!("  Size: {:?}", bounds.dimensions());
    }

    Ok(())
}
