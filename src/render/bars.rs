use super::canvas::{Rect, Surface};
use crate::theme::Palette;

/// Draw one vertical bar per value, left to right in index order.
///
/// Bars share the surface width evenly and grow up from the bottom edge. The bar at `highlight`,
/// if any, uses the highlight color. Rendering only depends on its arguments, so drawing the same
/// values twice produces the same surface.
pub(crate) fn render<S>(surface: &mut S, values: &[u32], highlight: Option<usize>, palette: &Palette)
where
    S: Surface + ?Sized,
{
    surface.clear();
    let count = values.len() as u64;
    if count == 0 {
        return;
    }
    let width = u64::from(surface.width());
    let height = surface.height();
    for (index, value) in values.iter().enumerate() {
        let start = (index as u64 * width / count) as u32;
        let end = ((index as u64 + 1) * width / count) as u32;
        let mut bar_width = end - start;
        if bar_width >= 3 {
            // leave a gap between wide bars
            bar_width -= 1;
        }
        let bar_height = (*value).min(height);
        if bar_width == 0 || bar_height == 0 {
            continue;
        }
        let color = if highlight == Some(index) { palette.highlight } else { palette.bar };
        surface.fill_rect(Rect { x: start, y: height - bar_height, width: bar_width, height: bar_height }, color);
    }
}
