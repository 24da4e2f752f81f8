use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use s16_core::calculations::flexure::{LateralSupport, UnbracedLengthSweep};
use s16_core::config::DesignSettings;
use s16_core::materials::{SteelGrade, SteelMaterial};
use s16_core::CalcResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SupportArg {
    /// Compression flange continuously braced
    Supported,
    /// Sweep lateral-torsional buckling over unbraced lengths
    Unsupported,
}

impl From<SupportArg> for LateralSupport {
    fn from(arg: SupportArg) -> Self {
        match arg {
            SupportArg::Supported => LateralSupport::Supported,
            SupportArg::Unsupported => LateralSupport::Unsupported,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "s16")]
#[command(about = "CSA S16-19 capacity of steel I-section beams", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify flange and web of a section
    Classify {
        #[command(flatten)]
        section: SectionArgs,

        #[command(flatten)]
        design: DesignArgs,
    },

    /// Factored moment resistance (braced, or LTB curve when unsupported)
    Flexure {
        #[command(flatten)]
        section: SectionArgs,

        #[command(flatten)]
        design: DesignArgs,
    },

    /// Factored shear resistance
    Shear {
        #[command(flatten)]
        section: SectionArgs,

        #[command(flatten)]
        design: DesignArgs,
    },

    /// Classification, flexure and shear together
    Check {
        #[command(flatten)]
        section: SectionArgs,

        #[command(flatten)]
        design: DesignArgs,
    },

    /// Compare Mr from catalog properties against properties from a JSON file
    Compare {
        #[command(flatten)]
        section: SectionArgs,

        /// JSON file with alternate section properties (e.g. from an FE section analysis)
        #[arg(long)]
        properties: PathBuf,

        #[command(flatten)]
        design: DesignArgs,
    },

    /// List catalog sections
    Sections {
        /// Only designations starting with this prefix
        #[arg(long)]
        prefix: Option<String>,

        /// CSV catalog to read instead of the built-in shapes
        #[arg(long, env = "S16_CATALOG")]
        catalog: Option<PathBuf>,
    },

    /// Run a JSON array of calculation items
    Batch {
        /// Path to the batch file
        path: PathBuf,
    },

    /// Print the clause reference as Markdown
    Equations,
}

#[derive(Args, Debug, Clone)]
pub struct SectionArgs {
    /// Section designation, e.g. W460X52
    #[arg(short, long)]
    pub section: String,

    /// CSV catalog to read instead of the built-in shapes
    #[arg(long, env = "S16_CATALOG")]
    pub catalog: Option<PathBuf>,
}

/// Design overrides. Each flag, when given, replaces the value from
/// `--config` (or the default).
#[derive(Args, Debug, Clone, Default)]
pub struct DesignArgs {
    /// JSON design settings file
    #[arg(long, env = "S16_CONFIG")]
    pub config: Option<PathBuf>,

    /// Steel grade (300W, 345WM, 350W)
    #[arg(long, conflicts_with = "fy")]
    pub grade: Option<String>,

    /// Yield strength Fy (MPa)
    #[arg(long)]
    pub fy: Option<f64>,

    /// Elastic modulus E (MPa)
    #[arg(long)]
    pub e: Option<f64>,

    /// Shear modulus G (MPa)
    #[arg(long)]
    pub g: Option<f64>,

    /// Resistance factor φ
    #[arg(long)]
    pub phi: Option<f64>,

    /// Equivalent moment factor ω
    #[arg(long)]
    pub omega: Option<f64>,

    /// Supported edges of a Class 4 flange (1 or 2)
    #[arg(long)]
    pub edges: Option<u8>,

    /// Reference factored moment Mf (kN·m)
    #[arg(long)]
    pub mf: Option<f64>,

    /// Lateral support of the compression flange
    #[arg(long, value_enum)]
    pub support: Option<SupportArg>,

    /// Shortest unbraced length (mm)
    #[arg(long)]
    pub l_min: Option<f64>,

    /// Longest unbraced length (mm)
    #[arg(long)]
    pub l_max: Option<f64>,

    /// Unbraced length step (mm)
    #[arg(long)]
    pub step: Option<f64>,
}

impl DesignArgs {
    /// Settings from the config file (or defaults) with flag overrides applied.
    pub fn settings(&self) -> CalcResult<DesignSettings> {
        let mut settings = match &self.config {
            Some(path) => DesignSettings::load(&path.to_string_lossy())?,
            None => DesignSettings::default(),
        };

        if let Some(grade) = &self.grade {
            let grade = SteelGrade::from_str_flexible(grade)?;
            settings.material = SteelMaterial {
                fy_mpa: grade.fy_mpa(),
                ..settings.material
            };
        }
        if let Some(fy) = self.fy {
            settings.material.fy_mpa = fy;
        }
        if let Some(e) = self.e {
            settings.material.e_mpa = e;
        }
        if let Some(g) = self.g {
            settings.material.g_mpa = g;
        }
        if let Some(phi) = self.phi {
            settings.resistance_factor = phi;
        }
        if let Some(omega) = self.omega {
            settings.omega = omega;
        }
        if let Some(edges) = self.edges {
            settings.flange_edges = edges;
        }
        if let Some(mf_knm) = self.mf {
            settings.reference_moment_nmm = mf_knm * 1.0e6;
        }
        if let Some(support) = self.support {
            settings.support = support.into();
        }

        let UnbracedLengthSweep { min_mm, max_mm, step_mm } = settings.sweep;
        settings.sweep = UnbracedLengthSweep::new(
            self.l_min.unwrap_or(min_mm),
            self.l_max.unwrap_or(max_mm),
            self.step.unwrap_or(step_mm),
        );

        settings.validate()?;
        Ok(settings)
    }
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
    fn test_parse_flexure_overrides() {
        let cli = Cli::try_parse_from([
            "s16", "flexure", "-s", "W460X52", "--support", "unsupported", "--l-min", "1000", "--l-max",
            "3000", "--step", "500", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::Flexure { section, design } = cli.command else {
            panic!("expected flexure command");
        };
        assert_eq!(section.section, "W460X52");

        let settings = design.settings().unwrap();
        assert_eq!(settings.support, LateralSupport::Unsupported);
        assert_eq!(settings.sweep, UnbracedLengthSweep::new(1000.0, 3000.0, 500.0));
    }

    #[test]
    fn test_grade_and_mf_override() {
        let design = DesignArgs {
            grade: Some("300W".to_string()),
            mf: Some(50.0),
            ..DesignArgs::default()
        };
        let settings = design.settings().unwrap();
        assert_eq!(settings.material.fy_mpa, 300.0);
        assert_eq!(settings.reference_moment_nmm, 50.0e6);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let design = DesignArgs {
            edges: Some(3),
            ..DesignArgs::default()
        };
        assert!(design.settings().is_err());
    }
}
