use rand::Rng;

use crate::coords::Vec2;
use crate::paint::{Color, LinearGradient};
use crate::surface::SurfaceSize;
use crate::text::Coverage;

use super::{Particle, ALPHA_THRESHOLD, DENSITY_MAX, DENSITY_MIN, SAMPLE_STRIDE};

/// Headline colour ramp, left to right: cyan, indigo, pink.
pub(super) fn headline_ramp(width: f32) -> LinearGradient {
    LinearGradient::horizontal(
        width.max(1.0),
        &[
            Color::from_srgb_u8(0x22, 0xd3, 0xee, 255),
            Color::from_srgb_u8(0x81, 0x8c, 0xf8, 255),
            Color::from_srgb_u8(0xf4, 0x72, 0xb6, 255),
        ],
    )
}

/// Straight-alpha RGBA8 image the size of the surface.
pub(super) struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width * height * 4],
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

/// Top-left offset that centres `cov` on the surface. May be negative when the
/// text is wider or taller than the surface.
pub(super) fn centered_origin(cov: &Coverage, size: SurfaceSize) -> (i64, i64) {
    (
        (size.width as i64 - cov.width as i64) / 2,
        (size.height as i64 - cov.height as i64) / 2,
    )
}

/// Draws `cov` at `origin`, colouring each covered pixel from `ramp` at its x.
pub(super) fn paint_coverage(
    bitmap: &mut Bitmap,
    cov: &Coverage,
    origin: (i64, i64),
    ramp: &LinearGradient,
) {
    for cy in 0..cov.height {
        let y = origin.1 + cy as i64;
        if y < 0 || y as usize >= bitmap.height {
            continue;
        }
        for cx in 0..cov.width {
            let a = cov.alpha(cx, cy);
            if a == 0 {
                continue;
            }
            let x = origin.0 + cx as i64;
            if x < 0 || x as usize >= bitmap.width {
                continue;
            }
            let [r, g, b, _] = ramp.color_at(Vec2::new(x as f32 + 0.5, 0.0)).to_srgb_u8();
            let i = (y as usize * bitmap.width + x as usize) * 4;
            bitmap.rgba[i..i + 4].copy_from_slice(&[r, g, b, a]);
        }
    }
}

/// One particle per grid sample whose alpha exceeds the threshold.
pub(super) fn sample_particles<R: Rng>(bitmap: &Bitmap, rng: &mut R) -> Vec<Particle> {
    let mut out = Vec::new();
    for y in (0..bitmap.height).step_by(SAMPLE_STRIDE) {
        for x in (0..bitmap.width).step_by(SAMPLE_STRIDE) {
            let [r, g, b, a] = bitmap.pixel(x, y);
            if a > ALPHA_THRESHOLD {
                let density = rng.gen_range(DENSITY_MIN..DENSITY_MAX);
                out.push(Particle::new(Vec2::new(x as f32, y as f32), [r, g, b], density));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn size(w: u32, h: u32) -> SurfaceSize {
        SurfaceSize { width: w, height: h, ratio: 1.0 }
    }

    #[test]
    fn ramp_runs_cyan_to_pink() {
        let ramp = headline_ramp(100.0);
        assert_eq!(ramp.stops().len(), 3);
        assert_eq!(ramp.sample(0.0).to_srgb_u8(), [0x22, 0xd3, 0xee, 255]);
        assert_eq!(ramp.sample(1.0).to_srgb_u8(), [0xf4, 0x72, 0xb6, 255]);
    }

    #[test]
    fn coverage_is_centred() {
        let cov = Coverage::new(10, 4);
        assert_eq!(centered_origin(&cov, size(30, 10)), (10, 3));
        assert_eq!(centered_origin(&cov, size(4, 2)), (-3, -1));
    }

    #[test]
    fn only_opaque_grid_samples_become_particles() {
        let mut bmp = Bitmap::new(16, 16);
        let mut cov = Coverage::new(16, 16);
        cov.data.fill(200);
        // (4, 4) stays below threshold
        cov.data[4 * 16 + 4] = 128;
        paint_coverage(&mut bmp, &cov, (0, 0), &headline_ramp(16.0));

        let mut rng = StdRng::seed_from_u64(7);
        let ps = sample_particles(&bmp, &mut rng);
        assert_eq!(ps.len(), 15);
        assert!(ps.iter().all(|p| p.base().x % 4.0 == 0.0 && p.base().y % 4.0 == 0.0));
        assert!(ps.iter().all(|p| (DENSITY_MIN..DENSITY_MAX).contains(&p.density())));
        assert!(!ps.iter().any(|p| p.base() == Vec2::new(4.0, 4.0)));
    }

    #[test]
    fn clipped_coverage_stays_in_bounds() {
        let mut bmp = Bitmap::new(8, 8);
        let mut cov = Coverage::new(20, 20);
        cov.data.fill(255);
        paint_coverage(&mut bmp, &cov, (-6, -6), &headline_ramp(8.0));
        assert_eq!(bmp.pixel(7, 7)[3], 255);
        assert_eq!(bmp.rgba.len(), 8 * 8 * 4);
    }
}
