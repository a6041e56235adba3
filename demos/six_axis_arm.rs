#![forbid(unsafe_code)]
//! Builds a concrete six-revolute-joint arm (the same DH table used by
//! `dh_kinegen`'s CLI driver) and narrates what each stage of the pipeline
//! produces. Run with `cargo run --bin six_axis_arm`.

use dh_kinegen::{Chain, DhParams, EmitConfig, JointKind, LinkTransform};

fn main() {
    env_logger::init();

    let rows = [
        DhParams {
            theta: 0.0,
            d: 0.333,
            a: 0.0,
            alpha: -std::f64::consts::FRAC_PI_2,
        },
        DhParams {
            theta: 0.0,
            d: 0.0,
            a: 0.0,
            alpha: std::f64::consts::FRAC_PI_2,
        },
        DhParams {
            theta: 0.0,
            d: 0.316,
            a: 0.0825,
            alpha: std::f64::consts::FRAC_PI_2,
        },
        DhParams {
            theta: 0.0,
            d: 0.0,
            a: -0.0825,
            alpha: -std::f64::consts::FRAC_PI_2,
        },
        DhParams {
            theta: 0.0,
            d: 0.384,
            a: 0.0,
            alpha: std::f64::consts::FRAC_PI_2,
        },
        DhParams {
            theta: 0.0,
            d: 0.0,
            a: 0.088,
            alpha: std::f64::consts::FRAC_PI_2,
        },
    ];

    let links: Vec<LinkTransform> = rows
        .into_iter()
        .enumerate()
        .map(|(index, params)| {
            let id = u32::try_from(index).expect("fewer than u32::MAX links") + 1;
            log::debug!("link {id}: {params:?}");
            LinkTransform::new(params, JointKind::Revolute, id)
        })
        .collect();

    let chain = Chain::new(links);
    log::info!(
        "chain has {} actuated joints",
        chain.actuated_joint_ids().len()
    );

    let home = vec![0.0; chain.actuated_joint_ids().len()];
    match chain.evaluate_positions(&home) {
        Ok(poses) => {
            for (index, pose) in poses.iter().enumerate() {
                let (x, y, z) = pose.translation();
                log::info!("home pose, link {index}: ({x:.4}, {y:.4}, {z:.4})");
            }
        }
        Err(err) => log::error!("failed to evaluate home pose: {err}"),
    }

    let mut source = Vec::new();
    match dh_kinegen::emit::emit_chain(&chain, &EmitConfig::default(), &mut source) {
        Ok(()) => log::info!("emitted {} bytes of C source", source.len()),
        Err(err) => log::error!("failed to emit source: {err}"),
    }
}
