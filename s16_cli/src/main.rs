//! # s16 CLI
//!
//! Command-line front end for `s16_core`. Looks a section up in the
//! built-in catalog (or a CSV catalog), applies design settings from a
//! JSON file and flags, and prints capacities in kN·m / kN or as JSON.
//!
//! Log level is read from `S16_LOG` (e.g. `S16_LOG=s16_core=debug`).

mod cli;

use std::process::ExitCode;
use std::sync::Once;

use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands, SectionArgs};
use s16_core::calculations::check::{self, BeamCheckInput, BeamCheckResult};
use s16_core::calculations::classification::{classify, SectionClassification};
use s16_core::calculations::flexure::{self, FlexuralResult, FlexureInput};
use s16_core::calculations::shear::{self, ShearInput, ShearResult};
use s16_core::calculations::CalculationItem;
use s16_core::equations::generate_equations_markdown;
use s16_core::materials::{builtin_w_shapes, SteelShape, SteelShapeDb};
use s16_core::section::SectionProperties;
use s16_core::units::{KilonewtonMeters, Kilonewtons, NewtonMillimeters, Newtons};
use s16_core::{CalcError, CalcResult};

static INIT: Once = Once::new();

/// Install the tracing subscriber once. Logs go to stderr so `--json`
/// output on stdout stays parseable.
fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("S16_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CalcResult<()> {
    match &cli.command {
        Commands::Classify { section, design } => {
            let shape = load_shape(section)?;
            let settings = design.settings()?;
            let classes = classify(&shape.geometry(), settings.material.fy_mpa)?;
            emit(cli.json, &classes, || print_classes(&shape.designation, &classes))
        }
        Commands::Flexure { section, design } => {
            let shape = load_shape(section)?;
            let settings = design.settings()?;
            let input = FlexureInput::new(shape.designation.clone(), shape.geometry(), shape.properties(), &settings);
            let result = flexure::calculate(&input)?;
            emit(cli.json, &result, || print_flexure(&shape.designation, &result))
        }
        Commands::Shear { section, design } => {
            let shape = load_shape(section)?;
            let settings = design.settings()?;
            let input = ShearInput {
                label: shape.designation.clone(),
                geometry: shape.geometry(),
                fy_mpa: settings.material.fy_mpa,
                resistance_factor: settings.resistance_factor,
            };
            let result = shear::calculate(&input)?;
            emit(cli.json, &result, || print_shear(&shape.designation, &result))
        }
        Commands::Check { section, design } => {
            let shape = load_shape(section)?;
            let result = check::check(&BeamCheckInput::from_shape(&shape, design.settings()?))?;
            emit(cli.json, &result, || print_check(&shape, &result))
        }
        Commands::Compare { section, properties, design } => {
            let shape = load_shape(section)?;
            let path = properties.to_string_lossy();
            let contents = std::fs::read_to_string(properties)
                .map_err(|e| CalcError::file_error("read", path.as_ref(), e.to_string()))?;
            let other: SectionProperties =
                serde_json::from_str(&contents).map_err(|e| CalcError::serialization(e.to_string()))?;
            let cmp = check::compare_property_sources(
                &shape.designation,
                shape.geometry(),
                shape.properties(),
                other,
                &design.settings()?,
            )?;
            emit(cli.json, &cmp, || {
                println!("{}", shape.designation);
                println!("  Mr (catalog):   {}", knm(cmp.reference_mr_nmm));
                println!("  Mr ({}): {}", path, knm(cmp.other_mr_nmm));
                println!("  Difference:     {:+.2} %", cmp.percent_difference);
            })
        }
        Commands::Sections { prefix, catalog } => {
            let db = load_catalog(catalog.as_deref())?;
            let shapes: Vec<&SteelShape> = match prefix {
                Some(p) => db.search(p),
                None => db.iter().collect(),
            };
            emit(cli.json, &shapes, || {
                for shape in &shapes {
                    println!("{}", shape);
                }
            })
        }
        Commands::Batch { path } => {
            let path_str = path.to_string_lossy();
            let contents = std::fs::read_to_string(path)
                .map_err(|e| CalcError::file_error("read", path_str.as_ref(), e.to_string()))?;
            let items: Vec<CalculationItem> =
                serde_json::from_str(&contents).map_err(|e| CalcError::serialization(e.to_string()))?;

            let mut outputs = Vec::with_capacity(items.len());
            for item in &items {
                debug!(label = item.label(), kind = item.calc_type(), "batch item");
                outputs.push(item.run()?);
            }
            print_json(&outputs)
        }
        Commands::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
    }
}

fn load_catalog(path: Option<&std::path::Path>) -> CalcResult<std::borrow::Cow<'static, SteelShapeDb>> {
    match path {
        Some(p) => SteelShapeDb::load_from_csv(&p.to_string_lossy()).map(std::borrow::Cow::Owned),
        None => Ok(std::borrow::Cow::Borrowed(builtin_w_shapes())),
    }
}

fn load_shape(args: &SectionArgs) -> CalcResult<SteelShape> {
    let db = load_catalog(args.catalog.as_deref())?;
    db.lookup(&args.section).cloned()
}

fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) -> CalcResult<()> {
    if json {
        print_json(value)
    } else {
        human();
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn knm(nmm: f64) -> KilonewtonMeters {
    NewtonMillimeters(nmm).into()
}

fn kn(n: f64) -> Kilonewtons {
    Newtons(n).into()
}

fn print_classes(label: &str, classes: &SectionClassification) {
    println!("{}", label);
    println!("  Flange: {}", classes.flange);
    println!("  Web:    {}", classes.web);
}

fn print_flexure(label: &str, result: &FlexuralResult) {
    print_classes(label, &result.classification());
    match result {
        FlexuralResult::Braced(b) => {
            println!("  Laterally supported");
            println!("  MyX = {}, MpX = {}", knm(b.my_nmm), knm(b.mp_nmm));
            let note = if b.fallback { " (effective-width fallback)" } else { "" };
            println!("  Mr  = {}  [{}]{}", knm(b.mr_nmm), b.equation, note);
        }
        FlexuralResult::Unbraced(curve) => {
            println!("  Laterally unsupported");
            println!("  {:>10}  {:>12}  {:>12}  Branch", "L (mm)", "Mu (kN·m)", "Mr (kN·m)");
            for p in &curve.points {
                println!(
                    "  {:>10.0}  {:>12.1}  {:>12.1}  {}",
                    p.length_mm,
                    knm(p.mu_nmm).0,
                    knm(p.mr_nmm).0,
                    p.equation
                );
            }
            if let Some(g) = curve.governing() {
                println!("  Governing Mr = {} at L = {:.0} mm", knm(g.mr_nmm), g.length_mm);
            }
        }
    }
}

fn print_shear(label: &str, result: &ShearResult) {
    println!("{}", label);
    println!("  h/w = {:.1}, Aw = {:.0} mm²", result.web_slenderness, result.aw_mm2);
    println!("  Fs  = {:.1} MPa  [{}]", result.fs_mpa, result.equation);
    println!("  Vr  = {}", kn(result.vr_n));
}

fn print_check(shape: &SteelShape, result: &BeamCheckResult) {
    match &result.flexure {
        Ok(flexure) => print_flexure(&result.label, flexure),
        Err(e) => {
            print_classes(&result.label, &result.classes);
            println!("  Flexure: {}", e);
        }
    }
    println!("  Governing class: {}", result.classes.governing());
    println!("  Zx/Sx = {:.3}", shape.properties().shape_factor());
    if let Some(r) = shape.fillet_radius_mm() {
        println!("  Fillet radius r = {:.1} mm", r);
    }
    println!("  Vr  = {}  [{}]", kn(result.shear.vr_n), result.shear.equation);
}
