/// Row-major 8-bit alpha mask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Coverage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at `(x, y)`, zero outside the mask.
    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Combines `src` into this mask at `(x, y)` with a max blend, clipping at the edges.
    pub fn stamp(&mut self, x: i32, y: i32, src_width: usize, src: &[u8]) {
        if src_width == 0 {
            return;
        }
        for (row, line) in src.chunks(src_width).enumerate() {
            let dy = y + row as i32;
            if dy < 0 || dy as usize >= self.height {
                continue;
            }
            for (col, &a) in line.iter().enumerate() {
                let dx = x + col as i32;
                if dx < 0 || dx as usize >= self.width {
                    continue;
                }
                let i = dy as usize * self.width + dx as usize;
                self.data[i] = self.data[i].max(a);
            }
        }
    }

    /// Number of samples strictly above `threshold`.
    pub fn count_above(&self, threshold: u8) -> usize {
        self.data.iter().filter(|&&a| a > threshold).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_clips_and_keeps_max() {
        let mut c = Coverage::new(3, 2);
        c.stamp(-1, 0, 2, &[200, 100, 50, 255]);
        assert_eq!(c.alpha(0, 0), 100);
        assert_eq!(c.alpha(0, 1), 255);

        c.stamp(0, 0, 1, &[10]);
        assert_eq!(c.alpha(0, 0), 100);
    }

    #[test]
    fn alpha_outside_is_zero() {
        let c = Coverage::new(2, 2);
        assert_eq!(c.alpha(5, 0), 0);
        assert!(Coverage::default().is_empty());
    }
}
