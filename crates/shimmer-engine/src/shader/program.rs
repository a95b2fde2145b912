use std::collections::BTreeMap;

use wgpu::naga;

use super::compile::{compile_stage, CompiledStage, StageKind};
use super::source::{wrap_fragment, DEFAULT_FRAGMENT, VERTEX_WGSL};
use super::ShaderError;

/// Which fragment source a build used.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CompileAttempt {
    /// The caller's source.
    Primary,
    /// The built-in default, after the primary failed.
    Fallback,
}

/// Both stages compiled and their interfaces matched.
#[derive(Debug)]
pub struct LinkedProgram {
    pub vertex: CompiledStage,
    pub fragment: CompiledStage,
    pub attempt: CompileAttempt,
}

impl LinkedProgram {
    pub fn is_degraded(&self) -> bool {
        self.attempt == CompileAttempt::Fallback
    }
}

/// Checks entry points and matches every fragment input location against a
/// vertex output of the same type.
pub fn link(
    vertex: CompiledStage,
    fragment: CompiledStage,
    attempt: CompileAttempt,
) -> Result<LinkedProgram, ShaderError> {
    let vs = find_entry(&vertex, StageKind::Vertex)?;
    let fs = find_entry(&fragment, StageKind::Fragment)?;

    let mut outputs = BTreeMap::new();
    if let Some(result) = &vs.function.result {
        collect_locations(&vertex.module, result.ty, result.binding.as_ref(), &mut outputs);
    }

    let mut inputs = BTreeMap::new();
    for arg in &fs.function.arguments {
        collect_locations(&fragment.module, arg.ty, arg.binding.as_ref(), &mut inputs);
    }

    let mut problems = Vec::new();
    for (location, ty) in &inputs {
        match outputs.get(location) {
            None => problems.push(format!(
                "fragment input @location({location}) has no matching vertex output"
            )),
            Some(out) if out != ty => problems.push(format!(
                "@location({location}) type mismatch: vertex writes {out:?}, fragment reads {ty:?}"
            )),
            Some(_) => {}
        }
    }

    if !problems.is_empty() {
        return Err(ShaderError::Link { log: problems.join("\n") });
    }

    Ok(LinkedProgram {
        vertex,
        fragment,
        attempt,
    })
}

/// Compiles and links `fragment_source`, retrying once with the default.
///
/// `on_error` receives the log of every failure: once when the caller's
/// source is rejected and once more if the default also fails.
pub fn resolve_program<F>(fragment_source: &str, on_error: F) -> Result<LinkedProgram, ShaderError>
where
    F: FnMut(&str),
{
    resolve_program_with(fragment_source, DEFAULT_FRAGMENT, on_error)
}

/// [`resolve_program`] with an explicit fallback source.
pub fn resolve_program_with<F>(
    primary: &str,
    fallback: &str,
    mut on_error: F,
) -> Result<LinkedProgram, ShaderError>
where
    F: FnMut(&str),
{
    match build(primary, CompileAttempt::Primary) {
        Ok(program) => Ok(program),
        Err(err) => {
            log::warn!("shader rejected, falling back to default: {err}");
            on_error(&err.to_string());

            build(fallback, CompileAttempt::Fallback).inspect_err(|err| {
                log::error!("default shader failed: {err}");
                on_error(&err.to_string());
            })
        }
    }
}

pub(crate) fn build(fragment_source: &str, attempt: CompileAttempt) -> Result<LinkedProgram, ShaderError> {
    let vertex = compile_stage(StageKind::Vertex, VERTEX_WGSL.to_owned())?;
    let fragment = compile_stage(StageKind::Fragment, wrap_fragment(fragment_source))?;
    link(vertex, fragment, attempt)
}

fn find_entry(stage: &CompiledStage, kind: StageKind) -> Result<&naga::EntryPoint, ShaderError> {
    let name = kind.entry_point();
    stage
        .module
        .entry_points
        .iter()
        .find(|ep| ep.name == name && ep.stage == kind.naga_stage())
        .ok_or_else(|| ShaderError::Link {
            log: format!("missing {kind} entry point `{name}`"),
        })
}

fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut BTreeMap<u32, naga::TypeInner>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            out.insert(*location, module.types[ty].inner.clone());
        }
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_locations(module, m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}
