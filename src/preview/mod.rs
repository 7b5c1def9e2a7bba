//! # Layout to PNG Proof Renderer
//!
//! Rasterizes a rendered [`Layout`] into a black-and-white PNG, showing
//! roughly what the designer preview shows.
//!
//! ## Architecture
//!
//! ```text
//! Template → Renderer → Layout → ProofRenderer → PNG bytes
//!                                     ↓
//!                              Draw each node in order:
//!                              - text with bitmap glyphs on its row
//!                              - dividers as a mid-row rule
//!                              - QR modules / barcode bars at x, y
//!                              - logo boxes and dashed placeholders
//! ```
//!
//! Later nodes draw over earlier ones. Anything falling outside the canvas
//! is clipped.
//!
//! ## Example
//!
//! ```
//! use talonario::config::LayoutConfig;
//! use talonario::preview::render_png;
//! use talonario::template::*;
//!
//! let mut template = Template::with_dimensions(40, 10);
//! template.add_element(Element::Text(Text::new("Hello", 1))).unwrap();
//! let png_bytes = render_png(&template, &LayoutConfig::REFERENCE).unwrap();
//! assert!(!png_bytes.is_empty());
//! ```

mod font;

pub use font::{FontMetrics, Glyph, generate_glyph};

use image::{GrayImage, Luma};
use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::error::DesignerError;
use crate::layout::{Icon, Layout, NodeKind, Placement, QrMatrix, Renderer, TextRun};
use crate::template::{Align, FontSize, Template};

/// Dash and gap length of placeholder frames.
const DASH: usize = 4;

/// Largest canvas, in pixels, a proof may allocate.
pub const MAX_CANVAS_PIXELS: usize = 1 << 26;

/// Draws layouts onto a 1-bit canvas.
pub struct ProofRenderer {
    width: usize,
    height: usize,
    row_height: usize,
    /// 1 = black
    buffer: Vec<u8>,
    font_cache: HashMap<(FontSize, char), Glyph>,
}

impl ProofRenderer {
    /// Create a blank canvas sized for the layout.
    ///
    /// Fails when the canvas would exceed [`MAX_CANVAS_PIXELS`].
    pub fn new(layout: &Layout) -> Result<Self, DesignerError> {
        let width = layout.width_px.max(1) as usize;
        let height = layout.height_px.max(1) as usize;
        let pixels = width
            .checked_mul(height)
            .filter(|&n| n <= MAX_CANVAS_PIXELS)
            .ok_or_else(|| {
                DesignerError::Image(format!(
                    "canvas {}x{} exceeds the {} pixel limit",
                    width, height, MAX_CANVAS_PIXELS
                ))
            })?;
        Ok(Self {
            width,
            height,
            row_height: layout.row_height_px.max(1) as usize,
            buffer: vec![0u8; pixels],
            font_cache: HashMap::new(),
        })
    }

    /// Draw every node and encode the canvas as PNG.
    pub fn render(&mut self, layout: &Layout) -> Result<Vec<u8>, DesignerError> {
        for node in &layout.nodes {
            self.draw_node(&node.kind, node.placement);
        }
        self.to_png()
    }

    /// Whether the pixel at `(x, y)` is black. Out of range is white.
    pub fn is_black(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.buffer[y * self.width + x] != 0
    }

    fn set_pixel(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x] = 1;
        }
    }

    fn hline(&mut self, x: usize, y: usize, len: usize) {
        for i in 0..len {
            self.set_pixel(x + i, y);
        }
    }

    fn vline(&mut self, x: usize, y: usize, len: usize) {
        for i in 0..len {
            self.set_pixel(x, y + i);
        }
    }

    fn row_top(&self, row: u32) -> usize {
        (row.saturating_sub(1) as usize).saturating_mul(self.row_height)
    }

    fn draw_node(&mut self, kind: &NodeKind, placement: Placement) {
        match (kind, placement) {
            (NodeKind::Text(run), Placement::Row { row }) => {
                let y = self.row_top(row);
                self.draw_text(run, y);
            }
            (NodeKind::Divider, Placement::Row { row }) => {
                let y = self.row_top(row) + self.row_height / 2;
                self.hline(0, y, self.width);
            }
            (NodeKind::Spacer, _) => {}
            (NodeKind::Logo { size, .. }, Placement::Absolute { x, y }) => {
                self.draw_logo_box(x as usize, y as usize, *size as usize);
            }
            (NodeKind::Qr { size, matrix, .. }, Placement::Absolute { x, y }) => {
                self.draw_qr(matrix, x as usize, y as usize, *size as usize);
            }
            (
                NodeKind::Barcode {
                    module_width,
                    height,
                    bars,
                    ..
                },
                Placement::Absolute { x, y },
            ) => {
                self.draw_bars(bars, x as usize, y as usize, *module_width as usize, *height as usize);
            }
            (NodeKind::Placeholder { icon, size, .. }, Placement::Absolute { x, y }) => {
                self.draw_placeholder(*icon, x as usize, y as usize, *size as usize);
            }
            // The renderer never pairs a flow kind with absolute placement or
            // the reverse; nothing sensible to draw if it happens.
            _ => {}
        }
    }

    fn glyph(&mut self, size: FontSize, ch: char) -> Glyph {
        self.font_cache
            .entry((size, ch))
            .or_insert_with(|| generate_glyph(size, ch))
            .clone()
    }

    fn draw_text(&mut self, run: &TextRun, top: usize) {
        let metrics = FontMetrics::for_size(run.size);
        let text_width = run.content.chars().count() * metrics.char_width;

        let start_x = match run.align {
            Align::Left => 0,
            Align::Center => self.width.saturating_sub(text_width) / 2,
            Align::Right => self.width.saturating_sub(text_width),
        };

        for (i, ch) in run.content.chars().enumerate() {
            let glyph = self.glyph(run.size, ch);
            let cell_x = start_x + i * metrics.char_width;
            if cell_x >= self.width {
                break;
            }
            for gy in 0..glyph.height {
                // Italic: shear the top of the glyph to the right
                let slant = if run.italic { (glyph.height - 1 - gy) / 4 } else { 0 };
                for gx in 0..glyph.width {
                    if glyph.is_set(gx, gy) {
                        self.set_pixel(cell_x + gx + slant, top + gy);
                        if run.bold {
                            self.set_pixel(cell_x + gx + slant + 1, top + gy);
                        }
                    }
                }
            }
        }

        if run.underline {
            let width = text_width.min(self.width.saturating_sub(start_x));
            self.hline(start_x, top + metrics.char_height - 1, width);
        }
    }

    /// Framed box with diagonals.
    fn draw_logo_box(&mut self, x: usize, y: usize, size: usize) {
        if size == 0 {
            return;
        }
        self.hline(x, y, size);
        self.hline(x, y + size - 1, size);
        self.vline(x, y, size);
        self.vline(x + size - 1, y, size);
        for i in 0..size {
            self.set_pixel(x + i, y + i);
            self.set_pixel(x + size - 1 - i, y + i);
        }
    }

    fn draw_qr(&mut self, matrix: &QrMatrix, x: usize, y: usize, size: usize) {
        if matrix.width == 0 {
            return;
        }
        // Nearest-neighbour scale of the module grid onto size × size pixels
        for py in 0..size {
            for px in 0..size {
                let qx = px * matrix.width / size;
                let qy = py * matrix.width / size;
                if matrix.is_dark(qx, qy) {
                    self.set_pixel(x + px, y + py);
                }
            }
        }
    }

    fn draw_bars(&mut self, bars: &[bool], x: usize, y: usize, module_width: usize, height: usize) {
        let module_width = module_width.max(1);
        for (i, &bar) in bars.iter().enumerate() {
            if bar {
                for dx in 0..module_width {
                    self.vline(x + i * module_width + dx, y, height);
                }
            }
        }
    }

    fn draw_placeholder(&mut self, icon: Icon, x: usize, y: usize, size: usize) {
        if size == 0 {
            return;
        }
        for i in (0..size).filter(|i| (i / DASH) % 2 == 0) {
            self.set_pixel(x + i, y);
            self.set_pixel(x + i, y + size - 1);
            self.set_pixel(x, y + i);
            self.set_pixel(x + size - 1, y + i);
        }

        let mark = match icon {
            Icon::Type => 'T',
            Icon::Image => 'I',
            Icon::QrCode => 'Q',
            Icon::Barcode => 'B',
        };
        let glyph = self.glyph(FontSize::Large, mark);
        let gx0 = x + size.saturating_sub(glyph.width) / 2;
        let gy0 = y + size.saturating_sub(glyph.height) / 2;
        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                if glyph.is_set(gx, gy) {
                    self.set_pixel(gx0 + gx, gy0 + gy);
                }
            }
        }
    }

    /// Convert buffer to PNG bytes.
    fn to_png(&self) -> Result<Vec<u8>, DesignerError> {
        use image::ImageEncoder;

        let mut img = GrayImage::new(self.width as u32, self.height as u32);
        for y in 0..self.height {
            for x in 0..self.width {
                let color = if self.is_black(x, y) { 0u8 } else { 255u8 };
                img.put_pixel(x as u32, y as u32, Luma([color]));
            }
        }

        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                img.as_raw(),
                self.width as u32,
                self.height as u32,
                image::ExtendedColorType::L8,
            )
            .map_err(|e: image::ImageError| DesignerError::Image(e.to_string()))?;

        Ok(png_bytes)
    }
}

/// Render a template to PNG bytes.
pub fn render_png(template: &Template, config: &LayoutConfig) -> Result<Vec<u8>, DesignerError> {
    let layout = Renderer::new(*config).layout(template);
    render_layout_png(&layout)
}

/// Render an already computed layout to PNG bytes.
pub fn render_layout_png(layout: &Layout) -> Result<Vec<u8>, DesignerError> {
    ProofRenderer::new(layout)?.render(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::*;

    fn decode(png: &[u8]) -> GrayImage {
        image::load_from_memory(png).unwrap().to_luma8()
    }

    fn sample() -> Template {
        let mut template = Template::with_dimensions(40, 10);
        template
            .add_element(Element::Text(Text::new("Thank you", 1).center()))
            .unwrap();
        template.add_element(Element::Line(Divider { line: 2 })).unwrap();
        template
            .add_element(Element::Qr(Qr::new("ORDER-123", Position::new(5, 5))))
            .unwrap();
        template
    }

    #[test]
    fn test_canvas_matches_template_size() {
        let png = render_png(&sample(), &LayoutConfig::REFERENCE).unwrap();
        let img = decode(&png);
        // Height 10 is clamped to the 20-row minimum
        assert_eq!(img.width(), 400);
        assert_eq!(img.height(), 200);
    }

    #[test]
    fn test_oversized_canvas_is_refused() {
        let mut template = Template::with_dimensions(100, 3000);
        template.add_element(Element::Spacer(Spacer::default())).unwrap();
        let config = LayoutConfig::REFERENCE.with_unit_px(100_000);
        assert!(matches!(
            render_png(&template, &config),
            Err(DesignerError::Image(_))
        ));

        // Largest template at the reference scale still fits
        assert!(render_png(&template, &LayoutConfig::REFERENCE).is_ok());
    }

    #[test]
    fn test_divider_and_qr_are_drawn() {
        let layout = Renderer::default().layout(&sample());
        let mut proof = ProofRenderer::new(&layout).unwrap();
        proof.render(&layout).unwrap();

        // Divider on row 2 runs the full width at mid-row
        assert!(proof.is_black(0, 15));
        assert!(proof.is_black(399, 15));
        // QR finder pattern corner at (50, 50)
        assert!(proof.is_black(50, 50));
        // Left margin of the centered text stays white
        assert!(!proof.is_black(0, 2));
    }

    #[test]
    fn test_alignment_moves_ink() {
        let mut left = Template::with_dimensions(40, 10);
        left.add_element(Element::Text(Text::new("X", 1))).unwrap();
        let mut right = Template::with_dimensions(40, 10);
        right.add_element(Element::Text(Text::new("X", 1).right())).unwrap();

        let ink = |template: &Template| {
            let layout = Renderer::default().layout(template);
            let mut proof = ProofRenderer::new(&layout).unwrap();
            proof.render(&layout).unwrap();
            (0..400).filter(|&x| (0..16).any(|y| proof.is_black(x, y))).collect::<Vec<_>>()
        };

        let left_ink = ink(&left);
        let right_ink = ink(&right);
        assert!(!left_ink.is_empty() && !right_ink.is_empty());
        assert!(left_ink.iter().all(|&x| x < 8));
        assert!(right_ink.iter().all(|&x| x >= 392));
    }

    #[test]
    fn test_out_of_bounds_elements_are_clipped() {
        let mut template = Template::with_dimensions(20, 20);
        template
            .add_element(Element::Code128(Code128::new("OUTSIDE", Position::new(500, 500))))
            .unwrap();
        template
            .add_element(Element::Placeholder(Placeholder::new(
                PlaceholderKind::Logo,
                Position::new(19, 19),
            )))
            .unwrap();
        template
            .add_element(Element::Text(Text::new(vec!["wide"; 20].join(" "), 20).size(FontSize::Large)))
            .unwrap();
        let png = render_png(&template, &LayoutConfig::REFERENCE).unwrap();
        let img = decode(&png);
        assert_eq!((img.width(), img.height()), (200, 200));
    }

    #[test]
    fn test_empty_template_is_blank() {
        let template = Template::with_dimensions(20, 20);
        let img = decode(&render_png(&template, &LayoutConfig::REFERENCE).unwrap());
        assert!(img.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_placeholder_frame_is_dashed() {
        let mut template = Template::with_dimensions(20, 20);
        template
            .add_element(Element::Placeholder(Placeholder::new(PlaceholderKind::Qr, Position::new(1, 1))))
            .unwrap();
        let layout = Renderer::default().layout(&template);
        let mut proof = ProofRenderer::new(&layout).unwrap();
        proof.render(&layout).unwrap();

        assert!(proof.is_black(10, 10));
        assert!(proof.is_black(13, 10));
        assert!(!proof.is_black(14, 10));
        assert!(proof.is_black(18, 10));
    }
}
