use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::device::panic_message;
use crate::render::{RenderCtx, RenderTarget};
use crate::surface::{SurfaceEngine, SurfaceSize};
use crate::time::FrameTime;

use super::gpu::GpuProgram;
use super::program::build;
use super::{resolve_program_with, CompileAttempt, LinkedProgram, UniformClock, DEFAULT_FRAGMENT};

/// Shown in place of the effect when no program can run.
pub const UNSUPPORTED_NOTICE: &str = "GPU shaders are not supported on this device";

#[derive(Debug, Clone)]
pub struct ShaderSurfaceProps {
    /// WGSL defining `fn main_image(frag_coord: vec2<f32>) -> vec4<f32>`.
    pub fragment_source: String,
    pub paused: bool,
    /// Multiplier applied to frame delta before it reaches `globals.time`.
    pub speed: f32,
}

impl Default for ShaderSurfaceProps {
    fn default() -> Self {
        Self {
            fragment_source: DEFAULT_FRAGMENT.to_string(),
            paused: false,
            speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShaderState {
    Uninitialized,
    ContextReady,
    /// `degraded` is set when the built-in default replaced the caller's source.
    Running { degraded: bool },
    /// Terminal for this mount.
    ContextFailed { notice: &'static str },
    TornDown,
}

impl ShaderState {
    fn has_context(&self) -> bool {
        matches!(self, ShaderState::ContextReady | ShaderState::Running { .. })
    }
}

type ErrorCallback = Box<dyn FnMut(&str)>;

/// Full-surface fragment shader engine.
pub struct ShaderSurface {
    props: ShaderSurfaceProps,
    fallback: &'static str,
    on_error: Option<ErrorCallback>,
    state: ShaderState,
    clock: UniformClock,
    program: Option<LinkedProgram>,
    gpu: Option<GpuProgram>,
    size: Option<SurfaceSize>,
}

impl ShaderSurface {
    pub fn new(props: ShaderSurfaceProps) -> Self {
        Self {
            props,
            fallback: DEFAULT_FRAGMENT,
            on_error: None,
            state: ShaderState::Uninitialized,
            clock: UniformClock::new(),
            program: None,
            gpu: None,
            size: None,
        }
    }

    /// Receives compiler and linker logs whenever a fallback happens.
    pub fn on_error(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn props(&self) -> &ShaderSurfaceProps {
        &self.props
    }

    pub fn state(&self) -> &ShaderState {
        &self.state
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self.state {
            ShaderState::ContextFailed { notice } => Some(notice),
            _ => None,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn is_paused(&self) -> bool {
        self.props.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.props.paused != paused {
            log::debug!("shader surface: paused = {paused}");
            self.props.paused = paused;
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.props.speed = speed;
    }

    /// Replaces the fragment source, rebuilding the program when a context is live.
    pub fn set_fragment_source(&mut self, source: impl Into<String>, ctx: Option<&RenderCtx<'_>>) {
        self.props.fragment_source = source.into();

        let (Some(ctx), Some(size)) = (ctx, self.size) else {
            return;
        };
        if !self.state.has_context() {
            return;
        }

        self.release_program();
        self.state = ShaderState::ContextReady;
        self.clock.mark_dirty();
        self.build(ctx, size);
    }

    /// CPU half of a build: compiles and links, with one fallback.
    ///
    /// Only valid from `ContextReady`; moves to `Running` or `ContextFailed`.
    pub(crate) fn prepare_program(&mut self) {
        if self.state != ShaderState::ContextReady {
            return;
        }

        let on_error = &mut self.on_error;
        let result = resolve_program_with(&self.props.fragment_source, self.fallback, |log| {
            if let Some(cb) = on_error.as_mut() {
                cb(log);
            }
        });

        match result {
            Ok(program) => {
                let degraded = program.is_degraded();
                log::debug!("shader surface: program linked (degraded = {degraded})");
                self.program = Some(program);
                self.state = ShaderState::Running { degraded };
            }
            Err(err) => {
                log::error!("shader surface: no usable program: {err}");
                self.fail();
            }
        }
    }

    fn build(&mut self, ctx: &RenderCtx<'_>, size: SurfaceSize) {
        self.prepare_program();

        while let Some(program) = self.program.as_ref() {
            match catch_unwind(AssertUnwindSafe(|| GpuProgram::new(ctx, program, size))) {
                Ok(gpu) => {
                    self.gpu = Some(gpu);
                    return;
                }
                Err(payload) => {
                    let log = format!(
                        "pipeline creation failed: {}",
                        panic_message(payload.as_ref())
                    );
                    if !self.reject_program(&log) {
                        return;
                    }
                }
            }
        }
    }

    /// The device refused the current program.
    ///
    /// A rejected primary is replaced by the fallback once; a rejected
    /// fallback is terminal. Returns whether a replacement is ready.
    fn reject_program(&mut self, log: &str) -> bool {
        let degraded = self.program.as_ref().is_some_and(LinkedProgram::is_degraded);
        self.program = None;
        self.report(log);

        if degraded {
            log::error!("shader surface: default program rejected by device: {log}");
            self.fail();
            return false;
        }

        log::warn!("shader surface: program rejected by device, falling back: {log}");
        match build(self.fallback, CompileAttempt::Fallback) {
            Ok(program) => {
                self.program = Some(program);
                self.state = ShaderState::Running { degraded: true };
                true
            }
            Err(err) => {
                log::error!("shader surface: default shader failed: {err}");
                self.report(&err.to_string());
                self.fail();
                false
            }
        }
    }

    fn report(&mut self, log: &str) {
        if let Some(cb) = self.on_error.as_mut() {
            cb(log);
        }
    }

    fn fail(&mut self) {
        self.state = ShaderState::ContextFailed {
            notice: UNSUPPORTED_NOTICE,
        };
    }

    fn release_program(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.release();
        }
        self.program = None;
    }
}

impl SurfaceEngine for ShaderSurface {
    fn acquire(&mut self, ctx: Option<&RenderCtx<'_>>, size: SurfaceSize) {
        self.release_program();
        self.clock.reset();
        self.clock.set_resolution(size);
        self.size = Some(size);

        match ctx {
            None => {
                log::warn!("shader surface: no drawing context; showing notice");
                self.fail();
            }
            Some(ctx) => {
                self.state = ShaderState::ContextReady;
                self.build(ctx, size);
            }
        }
    }

    fn resize(&mut self, ctx: Option<&RenderCtx<'_>>, size: SurfaceSize) {
        self.size = Some(size);
        self.clock.set_resolution(size);
        if let (Some(gpu), Some(ctx)) = (self.gpu.as_mut(), ctx) {
            gpu.resize(ctx, size);
        }
    }

    fn wants_frames(&self) -> bool {
        matches!(self.state, ShaderState::Running { .. })
    }

    fn frame(&mut self, time: &FrameTime, gpu: Option<(&RenderCtx<'_>, &mut RenderTarget<'_>)>) {
        if !matches!(self.state, ShaderState::Running { .. }) {
            return;
        }

        if !self.props.paused {
            self.clock.advance(time.dt, self.props.speed);
        }

        let (Some(program), Some((ctx, target))) = (self.gpu.as_ref(), gpu) else {
            return;
        };

        // A paused surface still redraws once when the resolution changes.
        let pending = self.clock.take_pending();
        if let Some(globals) = pending {
            program.write_globals(ctx.queue, &globals);
        }
        if pending.is_some() || !self.props.paused {
            program.draw_effect(&mut *target.encoder);
        }
        program.blit(target);
    }

    fn release(&mut self) {
        self.release_program();
        self.clock.reset();
        self.size = None;
        if self.state != ShaderState::TornDown {
            log::debug!("shader surface: torn down");
        }
        self.state = ShaderState::TornDown;
    }
}
