pub(crate) mod bars;
pub(crate) mod canvas;
pub(crate) mod terminal;

pub(crate) use bars::render;
pub(crate) use canvas::{Canvas, Surface};
