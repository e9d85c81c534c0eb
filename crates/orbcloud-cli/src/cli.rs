use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "orbcloud - Animate the electron probability cloud of a hydrogen-like atom as a paced frame stream.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Quantum state as 'n,l,m' (e.g. '2,1,0'). Repeat the flag to build a
    /// superposition of several eigenstates.
    #[arg(
        short,
        long = "state",
        required = true,
        value_name = "N,L,M",
        value_parser = parse_state
    )]
    pub states: Vec<(u32, u32, i32)>,

    /// Frame representation to stream.
    #[arg(short, long, value_enum, default_value_t = Mode::Scatter)]
    pub mode: Mode,

    /// Spherical grid resolution as 'RADIALxANGULAR' points.
    #[arg(long, value_name = "RxA", default_value = "60x50", value_parser = parse_dims)]
    pub dims: (usize, usize),

    /// Target delivery rate in frames per second.
    #[arg(long, default_value_t = 20.0, value_name = "FLOAT")]
    pub fps: f64,

    /// Simulated seconds per wall-clock second. Negative runs time backwards.
    #[arg(long, default_value_t = 1.0, value_name = "FLOAT", allow_negative_numbers = true)]
    pub speed: f64,

    /// Stop after this many delivered frames.
    #[arg(short = 'n', long, default_value_t = 200, value_name = "INT")]
    pub frames: u64,

    /// Relative intensity cutoff for masking, strictly between 0 and 1.
    #[arg(long, value_name = "FLOAT")]
    pub mask_cutoff: Option<f64>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Masked point cloud on the spherical sample positions.
    Scatter,
    /// Dense voxel grid resampled through the k-NN topology.
    Volume,
}

fn parse_state(s: &str) -> Result<(u32, u32, i32), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [n, l, m] = parts.as_slice() else {
        return Err(format!("expected 'n,l,m', got '{s}'"));
    };
    let n = n.parse().map_err(|_| format!("invalid n '{n}'"))?;
    let l = l.parse().map_err(|_| format!("invalid l '{l}'"))?;
    let m = m.parse().map_err(|_| format!("invalid m '{m}'"))?;
    Ok((n, l, m))
}

fn parse_dims(s: &str) -> Result<(usize, usize), String> {
    let Some((radial, angular)) = s.split_once(['x', 'X']) else {
        return Err(format!("expected 'RADIALxANGULAR', got '{s}'"));
    };
    let radial = radial
        .trim()
        .parse()
        .map_err(|_| format!("invalid radial count '{radial}'"))?;
    let angular = angular
        .trim()
        .parse()
        .map_err(|_| format!("invalid angular count '{angular}'"))?;
    Ok((radial, angular))
}
