//! nozzle CLI - Nozzle profile sketch generator
//!
//! Lists presets, checks parameter sets and writes generated sketches as
//! RON, JSON or DXF.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nozzle_cad::export::{CONSTRUCTION_LAYER, PROFILE_LAYER};
use nozzle_cad::{DxfDocument, FixedUnits, LengthUnit, Sketch, SketchAudit};
use nozzle_core::{
    DEFAULT_PRESET_NAME, GenerationReport, GeneratorOptions, NozzleParameters, ParameterField,
    PresetRegistry, SketchGenerator,
};

#[derive(Parser)]
#[command(name = "nozzle")]
#[command(about = "Parametric rocket nozzle profile sketch generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in presets
    Presets,
    /// Validate a parameter set without drawing anything
    Check {
        #[command(flatten)]
        source: ParameterSource,
    },
    /// Generate the nozzle sketch and write it to a file
    Generate {
        #[command(flatten)]
        source: ParameterSource,
        /// Internal length unit of the sketch (mm, cm, m, in)
        #[arg(short, long, default_value = "mm")]
        units: LengthUnit,
        /// RON file with generator options
        #[arg(long)]
        options: Option<PathBuf>,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        /// Output format (default: determined by extension, RON otherwise)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

/// Where the nozzle parameters come from
#[derive(Args)]
struct ParameterSource {
    /// Name of a built-in preset
    #[arg(long, conflicts_with = "params")]
    preset: Option<String>,
    /// RON file with nozzle parameters
    #[arg(long)]
    params: Option<PathBuf>,
}

impl ParameterSource {
    fn resolve(&self, registry: &PresetRegistry) -> Result<NozzleParameters> {
        if let Some(path) = &self.params {
            return NozzleParameters::load(path)
                .with_context(|| format!("Failed to load parameters from {}", path.display()));
        }
        let name = self.preset.as_deref().unwrap_or(DEFAULT_PRESET_NAME);
        Ok(registry.preset_by_name(name)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ron,
    Json,
    Dxf,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "dxf" => OutputFormat::Dxf,
            _ => OutputFormat::Ron,
        }
    }
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nozzle_cli=info,nozzle_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let registry = PresetRegistry::builtin();

    match cli.command {
        Commands::Presets => {
            for name in registry.preset_names() {
                println!("{}", name);
            }
        }
        Commands::Check { source } => {
            let params = source.resolve(&registry)?;
            params.validate()?;
            print!("{}", describe_parameters(&params));
        }
        Commands::Generate {
            source,
            units,
            options,
            output,
            format,
        } => {
            let params = source.resolve(&registry)?;
            let options = match options {
                Some(path) => GeneratorOptions::load(&path)
                    .with_context(|| format!("Failed to load options from {}", path.display()))?,
                None => GeneratorOptions::default(),
            };
            let format = format.unwrap_or_else(|| OutputFormat::from_path(&output));
            let wall_thickness = options.wall_layers.total();
            let (sketch, report) = generate(&params, options, units)?;
            write_sketch(&sketch, &output, format)?;
            print_report(&sketch, &report, wall_thickness, &output);
        }
    }

    Ok(())
}

fn describe_parameters(params: &NozzleParameters) -> String {
    let mut text = format!("{}: ok\n", params.name);
    for field in ParameterField::all() {
        text.push_str(&format!(
            "  {:<24} {:>8.3} {}\n",
            field.key(),
            params.get(field),
            field.unit()
        ));
    }
    text.push_str(&format!(
        "  exit angle {:.2} deg, nozzle length {:.2} mm\n",
        params.exit_angle(),
        params.nozzle_length()
    ));
    text
}

fn generate(
    params: &NozzleParameters,
    options: GeneratorOptions,
    units: LengthUnit,
) -> Result<(Sketch, GenerationReport)> {
    let mut sketch = Sketch::new(params.name.clone());
    let report = SketchGenerator::new(options).generate(params, &mut sketch, &FixedUnits::new(units))?;
    Ok((sketch, report))
}

fn write_sketch(sketch: &Sketch, output: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Ron => sketch.save(output)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(sketch)?;
            std::fs::write(output, json)?;
        }
        OutputFormat::Dxf => {
            let doc = DxfDocument::from_sketch(sketch);
            doc.export(output)?;
            tracing::debug!(
                profile = doc.count_on_layer(PROFILE_LAYER),
                construction = doc.count_on_layer(CONSTRUCTION_LAYER),
                "DXF shapes written"
            );
        }
    }
    tracing::info!("Wrote {:?} sketch to {}", format, output.display());
    Ok(())
}

fn print_report(sketch: &Sketch, report: &GenerationReport, wall_thickness: f64, output: &Path) {
    let audit = SketchAudit::of(sketch);
    println!(
        "{}: {} points, {} lines ({} construction), {} arcs, {} constraints",
        sketch.name,
        audit.points,
        audit.lines + audit.construction_lines,
        audit.construction_lines,
        audit.arcs,
        audit.total_constraints()
    );
    println!("  wall build-up {:.2} mm", wall_thickness);
    for profile in &report.profiles {
        println!(
            "  offset {:>4.2} mm: throat r={:.4} exit angle {:.2} deg",
            profile.offset_mm, profile.throat_radius, profile.exit_angle
        );
    }
    println!("Wrote {}", output.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("a.DXF")), OutputFormat::Dxf);
        assert_eq!(OutputFormat::from_path(Path::new("a.ron")), OutputFormat::Ron);
        assert_eq!(OutputFormat::from_path(Path::new("sketch")), OutputFormat::Ron);
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "nozzle", "generate", "--preset", "default", "--units", "cm", "-o", "out.dxf",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                source,
                units,
                output,
                format,
                ..
            } => {
                assert_eq!(source.preset.as_deref(), Some("default"));
                assert_eq!(units, LengthUnit::Centimeter);
                assert_eq!(output, PathBuf::from("out.dxf"));
                assert_eq!(format, None);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_preset_and_params_conflict() {
        let result = Cli::try_parse_from([
            "nozzle", "check", "--preset", "default", "--params", "p.ron",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_describe_parameters_lists_units() {
        let text = describe_parameters(&nozzle_core::default_nozzle());
        assert!(text.starts_with("default: ok"));
        assert!(text.contains("convergence_angle"));
        assert!(text.contains("30.000 deg"));
        assert!(text.contains("67.230 mm"));
        assert!(text.contains("exit angle 88.49 deg"));
    }

    #[test]
    fn test_unknown_preset_fails() {
        let source = ParameterSource {
            preset: Some("nonexistent".to_string()),
            params: None,
        };
        assert!(source.resolve(&PresetRegistry::builtin()).is_err());
    }

    #[test]
    fn test_params_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.ron");
        let mut params = nozzle_core::default_nozzle();
        params.name = "custom".to_string();
        params.save(&path).unwrap();

        let source = ParameterSource {
            preset: None,
            params: Some(path),
        };
        assert_eq!(source.resolve(&PresetRegistry::builtin()).unwrap(), params);
    }

    #[test]
    fn test_write_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let params = nozzle_core::default_nozzle();
        let (sketch, report) =
            generate(&params, GeneratorOptions::default(), LengthUnit::Millimeter).unwrap();
        assert_eq!(report.profiles.len(), 4);

        let ron_path = dir.path().join("nozzle.ron");
        write_sketch(&sketch, &ron_path, OutputFormat::Ron).unwrap();
        let loaded = Sketch::from_ron_str(&std::fs::read_to_string(&ron_path).unwrap()).unwrap();
        assert_eq!(loaded.constraint_count(), sketch.constraint_count());

        let json_path = dir.path().join("nozzle.json");
        write_sketch(&sketch, &json_path, OutputFormat::Json).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["name"], "default");

        let dxf_path = dir.path().join("nozzle.dxf");
        write_sketch(&sketch, &dxf_path, OutputFormat::Dxf).unwrap();
        let dxf = std::fs::read_to_string(&dxf_path).unwrap();
        assert!(dxf.contains("PROFILE"));
        assert!(dxf.contains("ARC"));
    }
}
