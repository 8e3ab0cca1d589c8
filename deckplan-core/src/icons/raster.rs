use resvg::{tiny_skia, usvg};

use crate::contract::Rasterizer;
use crate::error::RasterError;

/// Renders SVG glyphs to square PNGs with `resvg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResvgRasterizer;

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, pixels: u32) -> Result<Vec<u8>, RasterError> {
        let options = usvg::Options::default();
        let tree =
            usvg::Tree::from_str(svg, &options).map_err(|e| RasterError::Parse(e.to_string()))?;

        let size = tree.size();
        let scale = pixels as f32 / size.width().max(size.height());
        let mut pixmap = tiny_skia::Pixmap::new(pixels, pixels).ok_or(RasterError::Pixmap(pixels))?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );
        pixmap
            .encode_png()
            .map_err(|e| RasterError::Encode(e.to_string()))
    }
}
