use image::{GrayImage, Luma};

use crate::code::MicroQRCode;

// Render
//------------------------------------------------------------------------------

impl MicroQRCode {
    /// Grayscale image with `scale` pixels per module and a light quiet zone of
    /// `border` modules on every side.
    pub fn to_image(&self, border: u32, scale: u32) -> GrayImage {
        let w = self.width() as u32;
        let total_sz = (w + 2 * border) * scale;

        GrayImage::from_fn(total_sz, total_sz, |x, y| {
            let (c, r) = (x / scale, y / scale);
            let inside = (border..border + w).contains(&r) && (border..border + w).contains(&c);
            if !inside {
                return Luma([255]);
            }
            let idx = ((r - border) * w + (c - border)) as usize;
            match self.modules().get(idx) {
                Some(1) => Luma([0]),
                _ => Luma([255]),
            }
        })
    }

    /// Text rendering, two characters per module so the symbol stays square in
    /// a terminal. Dark modules are `##`.
    pub fn to_str(&self, border: usize) -> String {
        let w = self.width();
        let total_sz = w + 2 * border;

        let mut canvas = String::with_capacity(total_sz * (2 * total_sz + 1));
        for r in 0..total_sz {
            for c in 0..total_sz {
                let dark = (border..border + w).contains(&r)
                    && (border..border + w).contains(&c)
                    && self.modules().get((r - border) * w + c - border) == Some(&1);
                canvas.push_str(if dark { "##" } else { "  " });
            }
            canvas.push('\n');
        }
        canvas
    }
}
