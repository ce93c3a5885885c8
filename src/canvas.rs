//! The captured snapshot currently on screen.

use crate::geometry::Rect;
use image::{imageops, RgbaImage, SubImage};

/// Owns the RGBA raster the user is selecting from. Origin is always `(0,0)`.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn bounds(&self) -> Rect {
        let (w, h) = self.size();
        Rect::from_size(w, h)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Read-only view of `rect` clipped to the canvas.
    pub fn view(&self, rect: Rect) -> SubImage<&RgbaImage> {
        let r = Rect::normalize(rect.x0, rect.y0, rect.x1, rect.y1).intersect(&self.bounds());
        imageops::crop_imm(
            &self.image,
            r.x0 as u32,
            r.y0 as u32,
            r.width() as u32,
            r.height() as u32,
        )
    }

    /// Swaps in a new raster; the old one is dropped here.
    pub fn replace(&mut self, image: RgbaImage) {
        self.image = image;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn view_returns_pixels_at_their_canvas_position() {
        let canvas = Canvas::new(gradient(50, 50));
        let view = canvas.view(Rect::new(10, 20, 15, 30));
        assert_eq!(view.dimensions(), (5, 10));
        assert_eq!(view.get_pixel(0, 0), Rgba([10, 20, 0, 255]));
        assert_eq!(view.get_pixel(4, 9), Rgba([14, 29, 0, 255]));
    }

    #[test]
    fn view_is_clipped_to_canvas() {
        let canvas = Canvas::new(gradient(20, 10));
        let view = canvas.view(Rect::new(-5, 5, 30, 40));
        assert_eq!(view.dimensions(), (20, 5));
        assert_eq!(view.get_pixel(0, 0), Rgba([0, 5, 0, 255]));
    }

    #[test]
    fn disjoint_view_is_empty() {
        let canvas = Canvas::new(gradient(20, 10));
        assert_eq!(canvas.view(Rect::new(40, 40, 60, 60)).dimensions(), (0, 0));
    }

    #[test]
    fn replace_swaps_size() {
        let mut canvas = Canvas::new(gradient(20, 10));
        canvas.replace(RgbaImage::new(64, 48));
        assert_eq!(canvas.size(), (64, 48));
        assert_eq!(canvas.bounds(), Rect::new(0, 0, 64, 48));
    }
}
