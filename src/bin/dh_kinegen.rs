#![forbid(unsafe_code)]
//! Command-line driver: builds the library's example chain, emits its
//! numerical forward/differential kinematics source, and optionally prints a
//! sanity-check evaluation at a given joint vector.

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use dh_kinegen::{Chain, DhParams, EmitConfig, JointKind, LinkTransform};

/// Generates numerical forward/differential kinematics source from a
/// Denavit-Hartenberg chain.
#[derive(Parser, Debug)]
#[command(name = "dh_kinegen", version, about)]
struct Cli {
    /// Destination for the generated source.
    #[arg(short, long, default_value = "kinematics.c")]
    output: String,

    /// Raise log verbosity; repeat for more (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Optional comma-separated joint vector to sanity-check with
    /// `get_positions` before exiting.
    #[arg(long, value_delimiter = ',')]
    positions: Option<Vec<f64>>,
}

/// The chain's joint-name prefix; fixed rather than configurable (see
/// `DESIGN.md` for the list of deliberately-unexposed configuration fields).
const JOINT_PREFIX: &str = "q";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), dh_kinegen::CodegenError> {
    log::debug!("building the example chain ({JOINT_PREFIX}-prefixed joint variables)");
    let chain = example_chain();

    let mut file = File::create(&cli.output)?;
    dh_kinegen::emit::emit_chain(&chain, &EmitConfig::default(), &mut file)?;
    log::info!("wrote generated kinematics to {}", cli.output);

    if let Some(positions) = &cli.positions {
        let poses = chain.evaluate_positions(positions)?;
        for (index, pose) in poses.iter().enumerate() {
            let (x, y, z) = pose.translation();
            log::info!("link {index}: translation = ({x:.6}, {y:.6}, {z:.6})");
        }
    }

    Ok(())
}

/// The example six-revolute-joint chain shipped alongside this crate; see
/// `demos/six_axis_arm.rs` for the same construction with narration.
fn example_chain() -> Chain {
    let rows = [
        DhParams { theta: 0.0, d: 0.333, a: 0.0, alpha: -std::f64::consts::FRAC_PI_2 },
        DhParams { theta: 0.0, d: 0.0, a: 0.0, alpha: std::f64::consts::FRAC_PI_2 },
        DhParams { theta: 0.0, d: 0.316, a: 0.0825, alpha: std::f64::consts::FRAC_PI_2 },
        DhParams { theta: 0.0, d: 0.0, a: -0.0825, alpha: -std::f64::consts::FRAC_PI_2 },
        DhParams { theta: 0.0, d: 0.384, a: 0.0, alpha: std::f64::consts::FRAC_PI_2 },
        DhParams { theta: 0.0, d: 0.0, a: 0.088, alpha: std::f64::consts::FRAC_PI_2 },
    ];
    let links = rows
        .into_iter()
        .enumerate()
        .map(|(index, params)| {
            let id = u32::try_from(index).expect("fewer than u32::MAX links") + 1;
            LinkTransform::new(params, JointKind::Revolute, id)
        })
        .collect();
    Chain::new(links)
}
