use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::shapes::{CircleRenderer, Dot};
use crate::render::{RenderCtx, RenderTarget};
use crate::surface::{SurfaceEngine, SurfaceSize};
use crate::text::{BlockFont, GlyphSource};
use crate::time::FrameTime;

use super::raster::{centered_origin, headline_ramp, paint_coverage, sample_particles, Bitmap};
use super::{step, Particle, PointerState, ALPHA_THRESHOLD, SAMPLE_STRIDE};

pub const DEFAULT_TEXT: &str = "SHIMMER";
pub const HINT_TEXT: &str = "MOVE THE POINTER THROUGH THE LETTERS";

const MAX_FONT_SIZE: f32 = 160.0;
const HINT_DOT_RADIUS: f32 = 1.0;

/// Headline pixel size for a surface `width` pixels wide.
pub fn font_size_for(width: u32) -> f32 {
    (width as f32 / 6.0).min(MAX_FONT_SIZE)
}

/// Embedding options for [`ParticleField`].
#[derive(Debug, Clone)]
pub struct ParticleFieldProps {
    /// Text dissolved into particles.
    pub text: String,
    /// Draws a static interaction hint under the headline.
    pub show_hint: bool,
}

impl Default for ParticleFieldProps {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            show_hint: false,
        }
    }
}

/// Pointer-reactive particle rendition of a line of text.
///
/// The particle set is rebuilt from scratch on acquire and on every resize.
/// Without a drawing context the field stays blank.
pub struct ParticleField {
    props: ParticleFieldProps,
    glyphs: Box<dyn GlyphSource>,
    rng: StdRng,

    particles: Vec<Particle>,
    hint: Vec<Dot>,
    pointer: PointerState,
    size: Option<SurfaceSize>,
    has_context: bool,

    renderer: CircleRenderer,
    dots: Vec<Dot>,
}

impl ParticleField {
    pub fn new(props: ParticleFieldProps) -> Self {
        Self::with_glyphs(props, Box::new(BlockFont))
    }

    pub fn with_glyphs(props: ParticleFieldProps, glyphs: Box<dyn GlyphSource>) -> Self {
        Self {
            props,
            glyphs,
            rng: StdRng::from_entropy(),
            particles: Vec::new(),
            hint: Vec::new(),
            pointer: PointerState::default(),
            size: None,
            has_context: false,
            renderer: CircleRenderer::new(),
            dots: Vec::new(),
        }
    }

    /// Makes particle densities reproducible.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn hint_dots(&self) -> &[Dot] {
        &self.hint
    }

    pub fn pointer_state(&self) -> &PointerState {
        &self.pointer
    }

    pub fn has_context(&self) -> bool {
        self.has_context
    }

    /// Headline size for the current surface, if mounted.
    pub fn font_size(&self) -> Option<f32> {
        self.size.map(|s| font_size_for(s.width))
    }

    /// Replaces the text and rebuilds the particle set at the current size.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.props.text = text.into();
        if let Some(size) = self.size {
            self.rebuild(size);
        }
    }

    /// Runs one simulation step with the current pointer.
    pub fn step(&mut self) {
        step(&mut self.particles, &self.pointer);
    }

    /// Rasterizes the text for `size` and replaces every particle.
    pub fn rebuild(&mut self, size: SurfaceSize) {
        self.size = Some(size);

        let px = font_size_for(size.width);
        let cov = self.glyphs.rasterize(&self.props.text, px);
        let origin = centered_origin(&cov, size);

        let mut bitmap = Bitmap::new(size.width as usize, size.height as usize);
        paint_coverage(&mut bitmap, &cov, origin, &headline_ramp(size.width as f32));
        self.particles = sample_particles(&bitmap, &mut self.rng);
        drop(bitmap);

        self.hint.clear();
        if self.props.show_hint {
            let below = origin.1 + cov.height as i64;
            self.hint = hint_dots(size, px, below);
        }

        log::debug!(
            "particle field rebuilt: {} particles at {}px for {}x{}",
            self.particles.len(),
            px,
            size.width,
            size.height
        );
    }
}

/// Static dots spelling the hint in the block font, centred below `top`.
fn hint_dots(size: SurfaceSize, headline_px: f32, top: i64) -> Vec<Dot> {
    let px = (headline_px / 5.0).max(8.0);
    let cov = BlockFont.rasterize(HINT_TEXT, px);
    let x0 = (size.width as i64 - cov.width as i64) / 2;
    let y0 = top + px as i64;
    let color = Color::from_srgb_u8(0x94, 0xa3, 0xb8, 160);

    let mut out = Vec::new();
    for cy in (0..cov.height).step_by(SAMPLE_STRIDE / 2) {
        for cx in (0..cov.width).step_by(SAMPLE_STRIDE / 2) {
            if cov.alpha(cx, cy) <= ALPHA_THRESHOLD {
                continue;
            }
            let (x, y) = (x0 + cx as i64, y0 + cy as i64);
            if x < 0 || y < 0 || x >= size.width as i64 || y >= size.height as i64 {
                continue;
            }
            out.push(Dot {
                center: Vec2::new(x as f32, y as f32),
                radius: HINT_DOT_RADIUS,
                color,
            });
        }
    }
    out
}

impl SurfaceEngine for ParticleField {
    fn acquire(&mut self, ctx: Option<&RenderCtx<'_>>, size: SurfaceSize) {
        self.has_context = ctx.is_some();
        if !self.has_context {
            log::warn!("particle field: no drawing context; rendering nothing");
        }
        self.rebuild(size);
    }

    fn resize(&mut self, _ctx: Option<&RenderCtx<'_>>, size: SurfaceSize) {
        self.rebuild(size);
    }

    fn pointer(&mut self, position: Option<Vec2>) {
        self.pointer.position = position;
    }

    fn wants_frames(&self) -> bool {
        self.has_context
    }

    fn frame(&mut self, _time: &FrameTime, gpu: Option<(&RenderCtx<'_>, &mut RenderTarget<'_>)>) {
        if !self.has_context {
            return;
        }
        self.step();

        let (Some((ctx, target)), Some(size)) = (gpu, self.size) else {
            return;
        };

        self.dots.clear();
        self.dots.extend(self.particles.iter().map(|p| Dot {
            center: p.pos(),
            radius: p.radius(),
            color: p.paint(),
        }));
        self.dots.extend_from_slice(&self.hint);
        self.renderer.render(ctx, target, size.viewport(), &self.dots);
    }

    fn release(&mut self) {
        self.particles = Vec::new();
        self.hint = Vec::new();
        self.dots = Vec::new();
        self.pointer.clear();
        self.size = None;
        self.has_context = false;
        self.renderer.release();
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::Rect;
    use crate::particles::INFLUENCE_RADIUS;

    use super::*;

    fn surface(w: u32, h: u32) -> SurfaceSize {
        SurfaceSize { width: w, height: h, ratio: 1.0 }
    }

    fn field(w: u32, h: u32) -> ParticleField {
        let mut f = ParticleField::new(ParticleFieldProps::default()).seeded(42);
        f.acquire(None, surface(w, h));
        f
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn font_size_is_a_sixth_of_width_capped() {
        assert_eq!(font_size_for(600), 100.0);
        assert_eq!(font_size_for(1200), 160.0);
        assert_eq!(font_size_for(0), 0.0);
    }

    #[test]
    fn particles_start_at_their_sample_coordinate() {
        let f = field(800, 600);
        assert!(!f.particles().is_empty());
        for p in f.particles() {
            assert!(p.is_at_rest());
            assert_eq!(p.base().x % SAMPLE_STRIDE as f32, 0.0);
            assert_eq!(p.base().y % SAMPLE_STRIDE as f32, 0.0);
        }
    }

    #[test]
    fn same_seed_same_particles() {
        assert_eq!(field(400, 300).particles(), field(400, 300).particles());
    }

    #[test]
    fn colours_follow_the_ramp() {
        let f = field(800, 600);
        let left = f.particles().iter().min_by(|a, b| a.base().x.total_cmp(&b.base().x));
        let right = f.particles().iter().max_by(|a, b| a.base().x.total_cmp(&b.base().x));
        let (Some(left), Some(right)) = (left, right) else {
            panic!("no particles");
        };
        // cyan has more blue-green on the left, pink more red on the right
        assert!(left.color()[1] > right.color()[1]);
        assert!(right.color()[0] > left.color()[0]);
    }

    #[test]
    fn hint_dots_only_when_requested() {
        assert!(field(800, 600).hint_dots().is_empty());

        let props = ParticleFieldProps { show_hint: true, ..Default::default() };
        let mut f = ParticleField::new(props).seeded(1);
        f.acquire(None, surface(800, 600));
        assert!(!f.hint_dots().is_empty());
        let lowest_letter = f.particles().iter().map(|p| p.base().y).fold(0.0, f32::max);
        assert!(f.hint_dots().iter().all(|d| d.center.y > lowest_letter));
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_rebuilds_within_new_bounds() {
        let mut f = field(600, 400);
        let before = f.font_size();
        f.resize(None, surface(300, 200));
        assert_eq!(before, Some(100.0));
        assert_eq!(f.font_size(), Some(50.0));

        assert!(!f.particles().is_empty());
        for p in f.particles() {
            assert!(p.base().x >= 0.0 && p.base().x < 300.0);
            assert!(p.base().y >= 0.0 && p.base().y < 200.0);
            assert!(p.is_at_rest());
        }
    }

    #[test]
    fn text_wider_than_surface_is_clipped() {
        let mut f = ParticleField::new(ParticleFieldProps {
            text: "A VERY LONG HEADLINE INDEED".into(),
            ..Default::default()
        })
        .seeded(3);
        f.acquire(None, surface(120, 80));
        assert!(f.particles().iter().all(|p| p.base().x < 120.0 && p.base().y < 80.0));
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn frame_without_context_leaves_particles_alone() {
        let mut f = field(800, 600);
        f.pointer(Some(Vec2::new(400.0, 300.0)));
        let before = f.particles().to_vec();
        f.frame(&FrameTime::fixed(1.0 / 60.0, 0), None);
        assert_eq!(f.particles(), &before[..]);
        assert!(!f.has_context());
        assert!(!f.wants_frames());
    }

    #[test]
    fn release_clears_everything() {
        let mut f = field(800, 600);
        f.pointer(Some(Vec2::new(1.0, 1.0)));
        f.release();
        assert!(f.particles().is_empty());
        assert!(f.pointer_state().position.is_none());
        assert_eq!(f.font_size(), None);
        f.release();
    }

    // ── pointer scenario ──────────────────────────────────────────────────

    #[test]
    fn pointer_at_text_centroid_pushes_nearest_and_spares_distant() {
        // 800×600: the headline spans roughly 700px, so its extremes sit well
        // outside the influence radius of a pointer at the centroid.
        let mut f = field(800, 600);
        let bounds = Rect::from_points(f.particles().iter().map(Particle::base));
        let Some(bounds) = bounds else { panic!("no particles") };
        let ptr = bounds.center();

        let nearest = f
            .particles()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.pos().distance(ptr) > 0.0)
            .min_by(|(_, a), (_, b)| a.pos().distance(ptr).total_cmp(&b.pos().distance(ptr)))
            .map(|(i, _)| i);
        let far = f
            .particles()
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.pos().distance(ptr).total_cmp(&b.pos().distance(ptr)))
            .map(|(i, _)| i);
        let (Some(nearest), Some(far)) = (nearest, far) else {
            panic!("expected a near and a distant particle");
        };

        let near_before = f.particles()[nearest].pos().distance(ptr);
        let far_gap_before = f.particles()[far].pos().distance(f.particles()[far].base());
        assert!(f.particles()[far].pos().distance(ptr) > INFLUENCE_RADIUS);

        f.pointer.position = Some(ptr);
        f.step();

        assert!(f.particles()[nearest].pos().distance(ptr) > near_before);
        let far_gap_after = f.particles()[far].pos().distance(f.particles()[far].base());
        assert!(far_gap_after <= far_gap_before);
    }
}
