//! End-to-end integration tests: build a chain, emit its source, and check
//! the derivative-consistency property against central finite differences.

use dh_kinegen::{Chain, DhParams, EmitConfig, JointKind, LinkTransform};

fn two_revolute_chain() -> Chain {
    Chain::new(vec![
        LinkTransform::new(
            DhParams {
                theta: 0.0,
                d: 0.0,
                a: 1.0,
                alpha: 0.0,
            },
            JointKind::Revolute,
            1,
        ),
        LinkTransform::new(
            DhParams {
                theta: 0.0,
                d: 0.0,
                a: 1.0,
                alpha: 0.0,
            },
            JointKind::Revolute,
            2,
        ),
    ])
}

#[test]
fn emitted_source_declares_every_expected_function() {
    let chain = two_revolute_chain();
    let mut source = Vec::new();
    dh_kinegen::emit::emit_chain(&chain, &EmitConfig::default(), &mut source)
        .expect("emission should succeed for a well-formed chain");
    let text = String::from_utf8(source).expect("emitted source is valid utf-8");

    assert!(text.contains("Mat4 forward_kinematics("));
    assert!(text.contains("Mat4 differential_kinematics_dq1("));
    assert!(text.contains("Mat4 differential_kinematics_dq2("));
    assert!(text.contains("void differential_kinematics("));
    assert!(text.contains("result.m[3][3] = 1;"));
}

/// A chain with nonzero fixed `alpha` on every link, the shape that used to
/// trip `entry_to_sum_expr` over a `Sin(Const)`/`Cos(Const)` node reaching
/// the stringifier unfolded.
fn spatial_three_link_chain() -> Chain {
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
                alpha: std::f64::consts::FRAC_PI_2,
            },
            JointKind::Revolute,
            3,
        ),
    ])
}

#[test]
fn export_expressions_succeeds_for_nonzero_fixed_alpha() {
    let chain = spatial_three_link_chain();
    let path = std::env::temp_dir().join("dh_kinegen_pipeline_nonzero_alpha_test.c");
    chain
        .export_expressions(&path)
        .expect("fixed, nonzero alpha must not be rejected as a malformed expression");
    let text = std::fs::read_to_string(&path).expect("emitted file is readable");
    std::fs::remove_file(&path).expect("temp file cleanup");
    assert!(text.contains("Mat4 forward_kinematics"));
}

#[test]
fn evaluate_positions_matches_evaluate_on_single_link_chain() {
    let chain = two_revolute_chain();
    let poses = chain
        .evaluate_positions(&[0.0, 0.0])
        .expect("two joint values for two actuated joints");
    assert_eq!(poses.len(), 2);
    let (x, y, _z) = poses[1].translation();
    assert!((x - 2.0).abs() < 1e-9, "x = {x}");
    assert!(y.abs() < 1e-9, "y = {y}");
}

#[test]
fn underflowing_joint_values_is_reported_not_panicked() {
    let chain = two_revolute_chain();
    let err = chain.evaluate_positions(&[0.0]).unwrap_err();
    assert_eq!(
        err,
        dh_kinegen::CodegenError::JointUnderflow {
            expected: 2,
            found: 1
        }
    );
}

/// Central finite-difference derivative, used to check the symbolic
/// differentials the chain composer builds.
fn finite_difference(chain: &Chain, joint_values: &[f64], joint_index: usize, h: f64) -> (f64, f64, f64) {
    let mut plus = joint_values.to_vec();
    plus[joint_index] += h;
    let mut minus = joint_values.to_vec();
    minus[joint_index] -= h;

    let pose_plus = chain
        .evaluate_positions(&plus)
        .expect("perturbed joint vector should still evaluate")
        .last()
        .copied()
        .expect("chain has at least one link");
    let pose_minus = chain
        .evaluate_positions(&minus)
        .expect("perturbed joint vector should still evaluate")
        .last()
        .copied()
        .expect("chain has at least one link");

    let (xp, yp, zp) = pose_plus.translation();
    let (xm, ym, zm) = pose_minus.translation();
    ((xp - xm) / (2.0 * h), (yp - ym) / (2.0 * h), (zp - zm) / (2.0 * h))
}

#[test]
fn symbolic_differential_translation_matches_finite_differences() {
    let chain = two_revolute_chain();
    let pose = chain.build_pose();
    let diffs = chain.build_differentials(&pose);
    let joint_values = [0.4, 0.9];

    for (id, d) in &diffs {
        let joint_index = (*id as usize) - 1;
        let symbolic_x = d[0][3]
            .substitute("q1", &dh_kinegen::Expr::num(joint_values[0]))
            .substitute("q2", &dh_kinegen::Expr::num(joint_values[1]))
            .eval()
            .expect("all joint symbols substituted");
        let symbolic_y = d[1][3]
            .substitute("q1", &dh_kinegen::Expr::num(joint_values[0]))
            .substitute("q2", &dh_kinegen::Expr::num(joint_values[1]))
            .eval()
            .expect("all joint symbols substituted");

        let (fd_x, fd_y, _fd_z) = finite_difference(&chain, &joint_values, joint_index, 1e-6);

        assert!(
            (symbolic_x - fd_x).abs() < 1e-4,
            "joint {id}: symbolic dx/dq = {symbolic_x}, finite-difference = {fd_x}"
        );
        assert!(
            (symbolic_y - fd_y).abs() < 1e-4,
            "joint {id}: symbolic dy/dq = {symbolic_y}, finite-difference = {fd_y}"
        );
    }
}
