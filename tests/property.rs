//! Property-based check: the chain composer's symbolic differentials agree
//! with central finite differences at randomly sampled joint vectors.
//!
//! Uses a seeded `rand` sampler (not `quickcheck`'s own generator) so the
//! joint vectors stay within a physically sensible range instead of
//! `Arbitrary`'s full `f64` domain, which would mostly sample values that
//! blow up a finite-difference comparison.

use dh_kinegen::{Chain, DhParams, Expr, JointKind, LinkTransform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn three_link_chain() -> Chain {
    Chain::new(vec![
        LinkTransform::new(
            DhParams {
                theta: 0.0,
                d: 0.2,
                a: 0.5,
                alpha: std::f64::consts::FRAC_PI_4,
            },
            JointKind::Revolute,
            1,
        ),
        LinkTransform::new(
            DhParams {
                theta: 0.0,
                d: 0.0,
                a: 0.4,
                alpha: -std::f64::consts::FRAC_PI_4,
            },
            JointKind::Revolute,
            2,
        ),
        LinkTransform::new(
            DhParams {
                theta: 0.0,
                d: 0.1,
                a: 0.3,
                alpha: 0.0,
            },
            JointKind::Revolute,
            3,
        ),
    ])
}

fn tip_translation(chain: &Chain, joint_values: &[f64]) -> (f64, f64, f64) {
    chain
        .evaluate_positions(joint_values)
        .expect("sampled joint vectors always have the right length")
        .last()
        .copied()
        .expect("a three-link chain has at least one link")
        .translation()
}

#[test]
fn derivative_consistency_holds_over_random_samples() {
    let chain = three_link_chain();
    let pose = chain.build_pose();
    let diffs = chain.build_differentials(&pose);
    let mut rng = StdRng::seed_from_u64(0xD44_7_A_5E7);
    let h = 1e-6;

    for _ in 0..64 {
        let joint_values: Vec<f64> = (0..3).map(|_| rng.random_range(-2.0..2.0)).collect();

        for (id, d) in &diffs {
            let joint_index = (*id as usize) - 1;
            let mut perturbed_plus = joint_values.clone();
            perturbed_plus[joint_index] += h;
            let mut perturbed_minus = joint_values.clone();
            perturbed_minus[joint_index] -= h;

            let (xp, yp, zp) = tip_translation(&chain, &perturbed_plus);
            let (xm, ym, zm) = tip_translation(&chain, &perturbed_minus);
            let fd = (
                (xp - xm) / (2.0 * h),
                (yp - ym) / (2.0 * h),
                (zp - zm) / (2.0 * h),
            );

            let mut substituted = [d[0][3].clone(), d[1][3].clone(), d[2][3].clone()];
            for (joint_id, value) in joint_values.iter().enumerate() {
                let symbol = format!("q{}", joint_id + 1);
                for entry in &mut substituted {
                    *entry = entry.substitute(&symbol, &Expr::num(*value));
                }
            }
            let symbolic = (
                substituted[0].eval().expect("fully substituted"),
                substituted[1].eval().expect("fully substituted"),
                substituted[2].eval().expect("fully substituted"),
            );

            assert!(
                (symbolic.0 - fd.0).abs() < 1e-3,
                "joint {id} dx: symbolic = {}, finite-difference = {}",
                symbolic.0,
                fd.0
            );
            assert!(
                (symbolic.1 - fd.1).abs() < 1e-3,
                "joint {id} dy: symbolic = {}, finite-difference = {}",
                symbolic.1,
                fd.1
            );
            assert!(
                (symbolic.2 - fd.2).abs() < 1e-3,
                "joint {id} dz: symbolic = {}, finite-difference = {}",
                symbolic.2,
                fd.2
            );
        }
    }
}
