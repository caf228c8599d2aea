use crate::theme::Color;

/// A rectangle in surface coordinates, with the origin at the top left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rect {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Something bars can be drawn on.
pub(crate) trait Surface {
    /// The width in pixels.
    fn width(&self) -> u32;

    /// The height in pixels.
    fn height(&self) -> u32;

    /// Reset every pixel to the background.
    fn clear(&mut self);

    /// Fill a rectangle with a color. Pixels outside of the surface are ignored.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// An in-memory surface where every pixel is either background or a color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Option<Color>>,
}

impl Canvas {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![None; width as usize * height as usize] }
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[self.offset(x, y)]
    }

    /// Iterate over the rows of the canvas, top to bottom.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Option<Color>]> {
        // chunks_exact panics on 0
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.fill(None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let right = rect.x.saturating_add(rect.width).min(self.width);
        let bottom = rect.y.saturating_add(rect.height).min(self.height);
        for y in rect.y..bottom {
            let start = self.offset(rect.x.min(right), y);
            let end = self.offset(right, y);
            self.pixels[start..end].fill(Some(color));
        }
    }
}
