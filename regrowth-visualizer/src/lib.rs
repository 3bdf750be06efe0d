//! Renders label grids from the regrowth automaton into an animated GIF.
//!
//! The renderer keeps one copy of each pushed grid (a byte per cell) and only
//! rasterizes frames while encoding, so memory stays proportional to the grid.

use anyhow::{Context, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use regrowth_common::CellLabel;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Figure background, also used behind the legend.
pub const BACKGROUND: [u8; 4] = [0x1e, 0x1e, 0x1e, 255];
const LEGEND_BORDER: [u8; 4] = [255, 255, 255, 255];

// Color per label, in code order
const PALETTE: [[u8; 4]; 7] = [
    [0x2b, 0x2b, 0x2b, 255], // Empty
    [0xf4, 0xf1, 0xe8, 255], // Bone
    [0xc1, 0x49, 0x53, 255], // Muscle
    [0xe6, 0xc9, 0xa8, 255], // Skin
    [0x7a, 0x1e, 0x1e, 255], // Vessel
    [0x4d, 0x3b, 0x2f, 255], // Necrosis
    [0xd6, 0xcf, 0xc7, 255], // Scar
];

/// Labels shown in the legend, top to bottom.
pub const LEGEND_LABELS: [CellLabel; 5] = [
    CellLabel::Bone,
    CellLabel::Muscle,
    CellLabel::Skin,
    CellLabel::Vessel,
    CellLabel::Scar,
];

/// Color used to draw a label.
pub fn label_color(label: CellLabel) -> Rgba<u8> {
    Rgba(PALETTE[label.code() as usize])
}

/// Output settings for the animation.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pixels per grid cell along each axis.
    pub cell_scale: u32,
    pub fps: u32,
    /// Border of background color around the grid.
    pub margin: u32,
    pub show_legend: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { cell_scale: 6, fps: 18, margin: 12, show_legend: true }
    }
}

/// Collects one grid per frame and writes them out as a looping GIF.
pub struct FrameRenderer {
    grid_size: usize,
    options: RenderOptions,
    frames: Vec<Vec<CellLabel>>,
}

impl FrameRenderer {
    pub fn new(grid_size: usize, options: RenderOptions) -> Self {
        let mut options = options;
        if options.cell_scale == 0 {
            warn!("Cell scale of 0 requested, using 1.");
            options.cell_scale = 1;
        }
        if options.fps == 0 {
            warn!("Frame rate of 0 requested, using 1 fps.");
            options.fps = 1;
        }
        Self { grid_size, options, frames: Vec::new() }
    }

    /// Stores a row-major grid as the next frame.
    pub fn push_grid(&mut self, labels: &[CellLabel]) -> Result<()> {
        let expected = self.grid_size * self.grid_size;
        if labels.len() != expected {
            anyhow::bail!(
                "Frame {} has {} cells, expected {} for a {}x{} grid.",
                self.frames.len(),
                labels.len(),
                expected,
                self.grid_size,
                self.grid_size
            );
        }
        self.frames.push(labels.to_vec());
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Width and height of every rendered frame in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        let side = self.grid_size as u32 * self.options.cell_scale + 2 * self.options.margin;
        (side, side)
    }

    /// Delay between frames derived from the frame rate.
    pub fn frame_delay(&self) -> Delay {
        Delay::from_numer_denom_ms(1000, self.options.fps)
    }

    /// Rasterizes one grid: each cell becomes a `cell_scale` square, row 0 at the top.
    pub fn render_frame(&self, labels: &[CellLabel]) -> RgbaImage {
        let (width, height) = self.dimensions();
        let mut image = ImageBuffer::from_pixel(width, height, Rgba(BACKGROUND));
        let scale = self.options.cell_scale;
        let margin = self.options.margin;

        for (idx, &label) in labels.iter().enumerate().take(self.grid_size * self.grid_size) {
            let row = (idx / self.grid_size) as u32;
            let col = (idx % self.grid_size) as u32;
            let color = label_color(label);
            let x0 = margin + col * scale;
            let y0 = margin + row * scale;
            for y in y0..y0 + scale {
                for x in x0..x0 + scale {
                    image.put_pixel(x, y, color);
                }
            }
        }

        if self.options.show_legend {
            self.draw_legend(&mut image);
        }
        image
    }

    /// Swatch column in the lower-left corner of the grid area.
    fn draw_legend(&self, image: &mut RgbaImage) {
        let swatch = (self.options.cell_scale * 2).max(8);
        let gap = (swatch / 3).max(2);
        let box_w = swatch + 2 * gap;
        let box_h = LEGEND_LABELS.len() as u32 * (swatch + gap) + gap;
        let (_, height) = image.dimensions();

        let x = self.options.margin + gap;
        let Some(y) = height.checked_sub(self.options.margin + gap + box_h) else {
            return; // frame too small for a legend
        };

        let frame = Rect::at(x as i32, y as i32).of_size(box_w, box_h);
        draw_filled_rect_mut(image, frame, Rgba(BACKGROUND));
        draw_hollow_rect_mut(image, frame, Rgba(LEGEND_BORDER));

        for (i, &label) in LEGEND_LABELS.iter().enumerate() {
            let sy = y + gap + i as u32 * (swatch + gap);
            let rect = Rect::at((x + gap) as i32, sy as i32).of_size(swatch, swatch);
            draw_filled_rect_mut(image, rect, label_color(label));
        }
    }

    /// Encodes every stored frame into a looping GIF at `path`.
    pub fn write_gif<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if self.frames.is_empty() {
            warn!("No frames recorded; skipping animation output.");
            return Ok(());
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create animation file: {}", path.display()))?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .context("Failed to configure GIF looping")?;

        let progress_bar = ProgressBar::new(self.frames.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({percent}%) [{eta}]")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );

        if self.options.show_legend {
            let names: Vec<&str> = LEGEND_LABELS.iter().map(|l| l.name()).collect();
            info!("Legend swatches, top to bottom: {}", names.join(", "));
        }

        let delay = self.frame_delay();
        for (i, labels) in self.frames.iter().enumerate() {
            let image = self.render_frame(labels);
            encoder
                .encode_frame(Frame::from_parts(image, 0, 0, delay))
                .with_context(|| format!("Failed to encode frame {}", i))?;
            progress_bar.inc(1);
        }
        progress_bar.finish_with_message(format!("Encoded {} frames", self.frames.len()));

        let (width, height) = self.dimensions();
        info!(
            "Animation saved to {} ({} frames, {}x{} px, {} fps).",
            path.display(),
            self.frames.len(),
            width,
            height,
            self.options.fps
        );
        Ok(())
    }
}
