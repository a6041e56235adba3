//! Numerical C code emitter: turns a chain's simplified symbolic pose and
//! differentials into a self-contained C source file.
//!
//! Each emitted function returns a 4x4 matrix by value (a `Mat4` struct, a
//! plain wrapper around `double[4][4]`), mirroring the original system's own
//! `forward_kinematics`/`differential_kinematics_dqN` functions, which
//! return a matrix rather than write through an output parameter.

use std::collections::HashSet;
use std::io::Write;

use crate::chain::Chain;
use crate::error::CodegenError;
use crate::expr::Expr;
use crate::simplify::simplify_sum_expr;
use crate::stringify::{entry_to_sum_expr, render_guarded, restore_exponent_guard};

/// Configuration for the numerical code emitter.
///
/// Fields without a corresponding CLI flag (see `src/bin/dh_kinegen.rs`)
/// simply keep their default; that is intentional, not an oversight, since
/// this crate only ever emits one target shape today.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// The numeric type name used for every generated variable and
    /// parameter, e.g. `"double"`.
    pub numeric_type: String,
    /// Whether to also emit an aggregator function that calls every
    /// per-joint differential function and collects their output.
    pub emit_aggregator: bool,
    /// The number of spaces used for one level of indentation.
    pub indent_width: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            numeric_type: "double".to_string(),
            emit_aggregator: true,
            indent_width: 4,
        }
    }
}

impl EmitConfig {
    fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

/// Emits the `Mat4` return type, the forward-kinematics pose function, one
/// differential function per actuated joint, and (optionally) an
/// aggregator, writing the result to `writer`.
///
/// # Errors
///
/// Returns [`CodegenError::MalformedExpression`] if the chain's symbolic
/// pose does not match this crate's invariants (every `sin`/`cos` argument a
/// bare actuated-joint symbol), or [`CodegenError::IOFailure`] if writing
/// fails.
pub fn emit_chain(chain: &Chain, config: &EmitConfig, writer: &mut impl Write) -> Result<(), CodegenError> {
    let actuated: HashSet<String> = chain
        .actuated_joint_ids()
        .into_iter()
        .map(|id| format!("q{id}"))
        .collect();
    let joint_args: Vec<String> = {
        let mut ids: Vec<u32> = actuated
            .iter()
            .map(|s| s.trim_start_matches('q').parse().unwrap_or(0))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|id| format!("q{id}")).collect()
    };

    let pose = chain.build_pose();
    let diffs = chain.build_differentials(&pose);
    let ty = &config.numeric_type;

    writeln!(writer, "#include <math.h>")?;
    writeln!(writer)?;
    writeln!(writer, "typedef struct {{ {ty} m[4][4]; }} Mat4;")?;
    writeln!(writer)?;

    emit_function(writer, config, "forward_kinematics", &joint_args, &actuated, &pose)?;
    writeln!(writer)?;

    for (id, d) in &diffs {
        emit_function(
            writer,
            config,
            &format!("differential_kinematics_dq{id}"),
            &joint_args,
            &actuated,
            d,
        )?;
        writeln!(writer)?;
    }

    if config.emit_aggregator {
        emit_aggregator(writer, config, &joint_args, &diffs)?;
    }

    Ok(())
}

/// Emits one function returning a `Mat4` by value.
///
/// The last row is always emitted as the literal `0, 0, 0, 1` rather than as
/// a computed expression: for a well-formed homogeneous transform it is
/// exact, and literal emission avoids carrying three vacuous `0`/`1`
/// sub-expressions through the simplifier.
fn emit_function(
    writer: &mut impl Write,
    config: &EmitConfig,
    name: &str,
    joint_args: &[String],
    actuated: &HashSet<String>,
    matrix: &[[Expr; 4]; 4],
) -> Result<(), CodegenError> {
    let indent = config.indent();
    let ty = &config.numeric_type;
    let params = joint_args
        .iter()
        .map(|j| format!("{ty} {j}"))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(writer, "Mat4 {name}({params}) {{")?;

    // `joint_args` is already sorted by numeric joint id (see `emit_chain`);
    // reuse that order here so the hoisted trig atoms are declared in the
    // same order as the function's parameter list, e.g. `c_q2` before
    // `c_q10`, which a lexical sort of `actuated` would get backwards.
    for q in joint_args {
        writeln!(writer, "{indent}{ty} c_{q} = cos({q});")?;
        writeln!(writer, "{indent}{ty} s_{q} = sin({q});")?;
    }

    let mut all_declarations: Vec<String> = Vec::new();
    let mut entry_texts: Vec<Vec<String>> = Vec::with_capacity(3);
    for row in matrix.iter().take(3) {
        let mut row_texts = Vec::with_capacity(4);
        for cell in row {
            let expanded = cell.expand();
            let sum = entry_to_sum_expr(&expanded, actuated)?;
            let (simplified, declarations) = simplify_sum_expr(sum);
            for decl in declarations {
                if !all_declarations.contains(&decl) {
                    all_declarations.push(decl);
                }
            }
            let text = restore_exponent_guard(&render_guarded(&simplified));
            row_texts.push(if text.is_empty() { "0".to_string() } else { text });
        }
        entry_texts.push(row_texts);
    }

    for decl in &all_declarations {
        writeln!(writer, "{indent}{decl}")?;
    }

    writeln!(writer, "{indent}Mat4 result;")?;
    for (row_index, row_texts) in entry_texts.iter().enumerate() {
        for (col_index, text) in row_texts.iter().enumerate() {
            writeln!(writer, "{indent}result.m[{row_index}][{col_index}] = {text};")?;
        }
    }
    writeln!(writer, "{indent}result.m[3][0] = 0;")?;
    writeln!(writer, "{indent}result.m[3][1] = 0;")?;
    writeln!(writer, "{indent}result.m[3][2] = 0;")?;
    writeln!(writer, "{indent}result.m[3][3] = 1;")?;
    writeln!(writer, "{indent}return result;")?;

    writeln!(writer, "}}")?;
    log::debug!("function emitted: {name} ({} hoisted declaration(s))", all_declarations.len());
    Ok(())
}

/// Emits an aggregator that calls every per-joint differential function and
/// collects the results into a caller-supplied array; unlike the per-joint
/// functions, the count of results is only known at generation time, so this
/// one writes through an output parameter rather than returning by value.
fn emit_aggregator(
    writer: &mut impl Write,
    config: &EmitConfig,
    joint_args: &[String],
    diffs: &[(u32, [[Expr; 4]; 4])],
) -> Result<(), CodegenError> {
    let indent = config.indent();
    let params = joint_args
        .iter()
        .map(|j| format!("{} {j}", config.numeric_type))
        .collect::<Vec<_>>()
        .join(", ");
    let joint_call_args = joint_args.join(", ");

    writeln!(writer, "void differential_kinematics({params}, Mat4 out[{}]) {{", diffs.len())?;
    for (index, (id, _)) in diffs.iter().enumerate() {
        writeln!(
            writer,
            "{indent}out[{index}] = differential_kinematics_dq{id}({joint_call_args});"
        )?;
    }
    writeln!(writer, "}}")?;
    Ok(())
}
