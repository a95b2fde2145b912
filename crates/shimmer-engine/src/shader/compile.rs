use std::fmt;

use wgpu::naga;
use wgpu::naga::valid::{Capabilities, ModuleInfo, ValidationFlags, Validator};

use super::ShaderError;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub(crate) fn entry_point(self) -> &'static str {
        match self {
            StageKind::Vertex => "vs_main",
            StageKind::Fragment => "fs_main",
        }
    }

    pub(crate) fn naga_stage(self) -> naga::ShaderStage {
        match self {
            StageKind::Vertex => naga::ShaderStage::Vertex,
            StageKind::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A parsed and validated WGSL module for one stage.
#[derive(Debug)]
pub struct CompiledStage {
    pub kind: StageKind,
    /// Full WGSL text handed to the device.
    pub source: String,
    pub module: naga::Module,
    pub info: ModuleInfo,
}

/// Parses and validates `source`, returning the compiler log on failure.
pub fn compile_stage(kind: StageKind, source: String) -> Result<CompiledStage, ShaderError> {
    let module = naga::front::wgsl::parse_str(&source).map_err(|e| ShaderError::Compile {
        stage: kind,
        log: non_empty(e.emit_to_string(&source), "parse error"),
    })?;

    let info = Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            stage: kind,
            log: non_empty(e.emit_to_string(&source), "validation error"),
        })?;

    Ok(CompiledStage {
        kind,
        source,
        module,
        info,
    })
}

fn non_empty(log: String, fallback: &str) -> String {
    if log.trim().is_empty() { fallback.to_owned() } else { log }
}

#[cfg(test)]
mod tests {
    use super::super::source::{wrap_fragment, DEFAULT_FRAGMENT, VERTEX_WGSL};
    use super::*;

    #[test]
    fn vertex_stage_compiles() {
        let stage = compile_stage(StageKind::Vertex, VERTEX_WGSL.to_owned());
        assert!(stage.is_ok(), "{:?}", stage.err());
    }

    #[test]
    fn default_fragment_compiles() {
        let stage = compile_stage(StageKind::Fragment, wrap_fragment(DEFAULT_FRAGMENT));
        assert!(stage.is_ok(), "{:?}", stage.err());
    }

    #[test]
    fn syntax_error_reports_log() {
        let err = compile_stage(StageKind::Fragment, wrap_fragment("fn main_image( {"));
        let Err(ShaderError::Compile { stage, log }) = err else {
            panic!("expected a compile error");
        };
        assert_eq!(stage, StageKind::Fragment);
        assert!(!log.trim().is_empty());
    }

    #[test]
    fn type_error_is_caught_by_validation() {
        let src = "fn main_image(p: vec2<f32>) -> vec4<f32> { return p; }";
        assert!(matches!(
            compile_stage(StageKind::Fragment, wrap_fragment(src)),
            Err(ShaderError::Compile { .. })
        ));
    }
}
