//! Fragment-shader surface.
//!
//! Callers provide a WGSL function
//! `fn main_image(frag_coord: vec2<f32>) -> vec4<f32>`; the engine wraps it
//! with a uniform prelude (`globals.resolution`, `globals.time`) and the real
//! `@fragment` entry point, validates and links it against a fixed quad vertex
//! stage, and falls back to a built-in effect once if anything fails.

mod compile;
mod error;
mod gpu;
mod program;
mod source;
mod surface;
mod uniforms;

pub use compile::{compile_stage, CompiledStage, StageKind};
pub use error::ShaderError;
pub use program::{link, resolve_program, resolve_program_with, CompileAttempt, LinkedProgram};
pub use source::{wrap_fragment, DEFAULT_FRAGMENT, VERTEX_WGSL};
pub use surface::{ShaderState, ShaderSurface, ShaderSurfaceProps, UNSUPPORTED_NOTICE};
pub use uniforms::{Globals, UniformClock};
