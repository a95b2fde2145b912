use super::StageKind;

/// Shader build failure, carrying the compiler or linker log.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShaderError {
    #[error("{stage} stage failed to compile:\n{log}")]
    Compile { stage: StageKind, log: String },

    #[error("program failed to link:\n{log}")]
    Link { log: String },
}

impl ShaderError {
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => log,
        }
    }
}
