use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use winit::event::WindowEvent;
use winit::window::WindowId;

use shimmer_engine::coords::Vec2;
use shimmer_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use shimmer_engine::input::Key;
use shimmer_engine::paint::Color;
use shimmer_engine::particles::{ParticleField, ParticleFieldProps};
use shimmer_engine::render::{RenderCtx, RenderTarget};
use shimmer_engine::shader::{ShaderSurface, ShaderSurfaceProps};
use shimmer_engine::surface::{observe, ContainerSize, Mount, ResizeObserver, ResizeStrategy};
use shimmer_engine::text::glyph_source_or_block;
use shimmer_engine::time::FrameTime;
use shimmer_engine::window::{RedrawFlag, RuntimeConfig};

use crate::config::{Assets, Settings};

pub const PARTICLES_LABEL: &str = "particles";
pub const SHADER_LABEL: &str = "shader";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum WidgetKind {
    Particles,
    Shader,
}

enum Mounted {
    Particles(Mount<ParticleField>),
    Shader(Mount<ShaderSurface>),
}

impl Mounted {
    fn pointer_moved(&mut self, logical: Option<Vec2>) {
        match self {
            Mounted::Particles(m) => m.pointer_moved(logical),
            Mounted::Shader(m) => m.pointer_moved(logical),
        }
    }

    fn request_frame(&self) {
        match self {
            Mounted::Particles(m) => m.request_frame(),
            Mounted::Shader(m) => m.request_frame(),
        }
    }

    fn tick(&mut self, time: &FrameTime, gpu: Option<(&RenderCtx<'_>, &mut RenderTarget<'_>)>) {
        match self {
            Mounted::Particles(m) => m.tick(time, gpu),
            Mounted::Shader(m) => m.tick(time, gpu),
        };
    }

    /// Title suffix when the engine runs degraded or not at all.
    fn status(&self) -> Option<String> {
        match self {
            Mounted::Particles(m) if !m.engine().has_context() => Some("no GPU".to_string()),
            Mounted::Particles(_) => None,
            Mounted::Shader(m) => m.engine().notice().map(str::to_string),
        }
    }
}

/// One engine window.
struct Slot {
    kind: WidgetKind,
    base_title: String,
    redraw: RedrawFlag,
    observer: Option<ResizeObserver>,
    last_size: Rc<Cell<Option<ContainerSize>>>,
    mounted: Option<Mounted>,
    status: Option<String>,
}

pub struct StudioApp {
    settings: Settings,
    assets: Assets,
    slots: HashMap<WindowId, Slot>,
}

impl StudioApp {
    pub fn new(settings: Settings, assets: Assets) -> Self {
        Self {
            settings,
            assets,
            slots: HashMap::new(),
        }
    }

    /// One window per requested engine.
    pub fn windows(&self) -> Vec<RuntimeConfig> {
        let mut out = Vec::new();
        if self.settings.widget.wants_particles() {
            out.push(RuntimeConfig {
                title: "shimmer · particles".to_string(),
                label: PARTICLES_LABEL.to_string(),
                ..Default::default()
            });
        }
        if self.settings.widget.wants_shader() {
            out.push(RuntimeConfig {
                title: "shimmer · shader".to_string(),
                label: SHADER_LABEL.to_string(),
                ..Default::default()
            });
        }
        out
    }

    fn particle_field(&self) -> ParticleField {
        let mut props = ParticleFieldProps {
            show_hint: self.settings.hint,
            ..Default::default()
        };
        if let Some(text) = &self.settings.text {
            props.text = text.clone();
        }
        ParticleField::with_glyphs(props, glyph_source_or_block(self.assets.font.as_deref()))
    }

    fn shader_surface(&self) -> ShaderSurface {
        let mut props = ShaderSurfaceProps {
            speed: self.settings.speed,
            ..Default::default()
        };
        if let Some(src) = &self.assets.fragment_source {
            props.fragment_source = src.clone();
        }
        ShaderSurface::new(props).on_error(|log| log::error!("shader rejected:\n{log}"))
    }
}

impl App for StudioApp {
    fn on_window_created(&mut self, id: WindowId, config: &RuntimeConfig, redraw: RedrawFlag) {
        let kind = match config.label.as_str() {
            PARTICLES_LABEL => WidgetKind::Particles,
            SHADER_LABEL => WidgetKind::Shader,
            other => {
                log::warn!("window {id:?} has unknown label {other:?}; leaving it blank");
                return;
            }
        };

        self.slots.insert(
            id,
            Slot {
                kind,
                base_title: config.title.clone(),
                redraw,
                observer: None,
                last_size: Rc::new(Cell::new(None)),
                mounted: None,
                status: None,
            },
        );
    }

    fn on_window_destroyed(&mut self, id: WindowId) {
        // Dropping the mount unmounts it while the window's device is still alive.
        self.slots.remove(&id);
    }

    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        if !matches!(event, WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. }) {
            return AppControl::Continue;
        }

        let Some(slot) = self.slots.get(&window.id) else {
            return AppControl::Continue;
        };
        if let Some(observer) = slot.observer.as_ref() {
            let (w, h) = window.logical_size();
            observer.notify(ContainerSize::new(w, h, window.scale_factor()));
        }
        // An idle engine stops scheduling; a new size earns it one frame.
        if let Some(mounted) = slot.mounted.as_ref() {
            mounted.request_frame();
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let id = ctx.window.id;

        if ctx.input_frame.key_pressed(Key::Escape) {
            ctx.runtime.close_window(id);
            return AppControl::Continue;
        }

        let (w, h) = ctx.window.logical_size();
        let container = ContainerSize::new(w, h, ctx.window.scale_factor());

        let needs_mount = match self.slots.get_mut(&id) {
            None => return AppControl::Continue,
            Some(slot) => {
                slot.last_size.set(Some(container));

                if ctx.input_frame.key_pressed(Key::R) && slot.mounted.take().is_some() {
                    slot.observer = None;
                    log::info!("{:?}: remounting", slot.kind);
                }
                slot.mounted.is_none()
            }
        };

        if needs_mount {
            let engine_kind = self.slots.get(&id).map(|s| s.kind);
            let mounted = match engine_kind {
                Some(WidgetKind::Particles) => EngineSeed::Particles(self.particle_field()),
                Some(WidgetKind::Shader) => EngineSeed::Shader(self.shader_surface()),
                None => return AppControl::Continue,
            };
            let poll_resize = self.settings.poll_resize;
            if let Some(slot) = self.slots.get_mut(&id) {
                let rctx = ctx.render_ctx();
                slot.mount(mounted, container, poll_resize, rctx.as_ref());
            }
        }

        let Some(slot) = self.slots.get_mut(&id) else {
            return AppControl::Continue;
        };
        let Some(mounted) = slot.mounted.as_mut() else {
            return AppControl::Continue;
        };

        if ctx.input_frame.key_pressed(Key::P) {
            if let Mounted::Shader(m) = mounted {
                let paused = !m.engine().is_paused();
                m.engine_mut().set_paused(paused);
                log::info!("shader {}", if paused { "paused" } else { "resumed" });
            }
        }

        let pointer = pointer_update(
            ctx.input_frame.pointer_changed,
            needs_mount,
            ctx.input.pointer_pos,
        );
        if let Some(pointer) = pointer {
            mounted.pointer_moved(pointer);
        }

        let time = ctx.time;
        let control = if ctx.has_gpu() {
            ctx.render(background(), |rctx, target| mounted.tick(&time, Some((rctx, target))))
        } else {
            mounted.tick(&time, None);
            AppControl::Continue
        };

        let status = mounted.status();
        if status != slot.status {
            match &status {
                Some(s) => ctx.window.set_title(&format!("{} ({s})", slot.base_title)),
                None => ctx.window.set_title(&slot.base_title),
            }
            slot.status = status;
        }

        control
    }
}

enum EngineSeed {
    Particles(ParticleField),
    Shader(ShaderSurface),
}

impl Slot {
    fn mount(
        &mut self,
        seed: EngineSeed,
        container: ContainerSize,
        poll_resize: bool,
        ctx: Option<&RenderCtx<'_>>,
    ) {
        let (observer, observed) = observe();
        let last_size = self.last_size.clone();
        let resize = ResizeStrategy::select(
            (!poll_resize).then_some(observed),
            Box::new(move || last_size.get()),
        );
        self.observer = (!resize.is_polling()).then_some(observer);

        let scheduler = Box::new(self.redraw.clone());
        let resize = Box::new(resize);
        self.mounted = Some(match seed {
            EngineSeed::Particles(engine) => {
                Mounted::Particles(Mount::mount(engine, container, resize, scheduler, ctx))
            }
            EngineSeed::Shader(engine) => {
                Mounted::Shader(Mount::mount(engine, container, resize, scheduler, ctx))
            }
        });
    }
}

/// Pointer to forward this frame, if any. A fresh mount gets the current
/// position even when the cursor has not moved since.
fn pointer_update(
    changed: bool,
    just_mounted: bool,
    position: Option<(f32, f32)>,
) -> Option<Option<Vec2>> {
    (changed || just_mounted).then(|| position.map(|(x, y)| Vec2::new(x, y)))
}

fn background() -> Color {
    Color::from_srgb_u8(0x0b, 0x10, 0x20, 0xff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Widget};
    use crate::config::FileConfig;

    fn app(widget: Widget) -> StudioApp {
        let cli = Cli {
            widget: Some(widget),
            ..Default::default()
        };
        let settings = Settings::resolve(&cli, FileConfig::default()).unwrap();
        StudioApp::new(settings, Assets::default())
    }

    #[test]
    fn both_opens_two_labelled_windows() {
        let labels: Vec<String> = app(Widget::Both).windows().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, [PARTICLES_LABEL, SHADER_LABEL]);
    }

    #[test]
    fn single_widget_opens_one_window() {
        let windows = app(Widget::Shader).windows();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].label, SHADER_LABEL);
    }

    #[test]
    fn fresh_mount_receives_the_resting_pointer() {
        assert_eq!(
            pointer_update(false, true, Some((3.0, 4.0))),
            Some(Some(Vec2::new(3.0, 4.0)))
        );
        assert_eq!(pointer_update(false, true, None), Some(None));
    }

    #[test]
    fn unchanged_pointer_is_not_forwarded() {
        assert_eq!(pointer_update(false, false, Some((3.0, 4.0))), None);
        assert_eq!(pointer_update(true, false, None), Some(None));
    }

    #[test]
    fn bundled_sample_shader_links_without_fallback() {
        let mut assets = Assets::default();
        assets.fragment_source = Some(include_str!("../shaders/plasma.wgsl").to_string());
        let studio = StudioApp::new(app(Widget::Shader).settings, assets);

        let program = shimmer_engine::shader::resolve_program(
            &studio.shader_surface().props().fragment_source,
            |log| panic!("sample shader rejected: {log}"),
        )
        .unwrap();
        assert!(!program.is_degraded());
    }
}
