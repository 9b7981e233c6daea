use crate::config::{GridLayout, SimConfig};
use crate::dish::DishMask;
use crate::life::LifeGrid;
use image::{Rgba, RgbaImage};
use std::fs::File;
use std::path::{Path, PathBuf};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const DISH_FILL: Rgba<u8> = Rgba([50, 50, 50, 255]);
const LIVE_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Frame cap that keeps a long recording from eating memory; the sidebar
/// shows the frame count against this limit while recording.
pub const MAX_GIF_FRAMES: usize = 500;

/// Render the dish to an offscreen pixel frame: dark background, gray dish
/// disc, live in-dish cells as white squares inset by one pixel so the
/// lattice stays visible.
pub fn render_frame(
    config: &SimConfig,
    dish: &DishMask,
    layout: &GridLayout,
    grid: &LifeGrid,
) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(
        config.screen_width as u32,
        config.screen_height as u32,
        BACKGROUND,
    );

    let (center_x, center_y) = dish.center();
    let radius = dish.radius();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dish.contains(center_x + dx, center_y + dy) {
                put_pixel_checked(&mut img, center_x + dx, center_y + dy, DISH_FILL);
            }
        }
    }

    for (col, row) in grid.live_cells() {
        let (cx, cy) = layout.cell_center(col, row);
        if !dish.contains(cx, cy) {
            continue;
        }
        let (x, y) = layout.cell_origin(col, row);
        fill_rect(
            &mut img,
            x + 1,
            y + 1,
            layout.cell_size - 2,
            layout.cell_size - 2,
            LIVE_FILL,
        );
    }

    img
}

fn put_pixel_checked(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn fill_rect(img: &mut RgbaImage, x0: i32, y0: i32, width: i32, height: i32, color: Rgba<u8>) {
    for y in y0..y0 + height {
        for x in x0..x0 + width {
            put_pixel_checked(img, x, y, color);
        }
    }
}

pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), String> {
    img.save(path)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

/// Snapshot files land in the working directory, numbered by generation.
pub fn snapshot_path(generation: u64) -> PathBuf {
    PathBuf::from(format!("petri-{:06}.png", generation))
}

pub fn recording_path(generation: u64) -> PathBuf {
    PathBuf::from(format!("petri-{:06}.gif", generation))
}

/// Collects one rendered frame per generation and encodes them as an
/// animated GIF when the recording is stopped.
pub struct GifRecorder {
    width: u16,
    height: u16,
    /// Centiseconds between frames, the unit the GIF format stores.
    frame_delay_cs: u16,
    frames: Vec<Vec<u8>>,
}

impl GifRecorder {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            width: config.screen_width as u16,
            height: config.screen_height as u16,
            frame_delay_cs: (config.frame_delay_ms / 10).clamp(2, u16::MAX as u64) as u16,
            frames: Vec::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= MAX_GIF_FRAMES
    }

    /// Record one frame; returns false once the cap is reached.
    pub fn push_frame(&mut self, img: &RgbaImage) -> bool {
        if self.is_full() {
            return false;
        }
        self.frames.push(img.as_raw().clone());
        true
    }

    /// Encode the collected frames and write the file. Consumes the
    /// recorder; a recording cannot be resumed after it is written.
    pub fn finish(self, path: &Path) -> Result<usize, String> {
        if self.frames.is_empty() {
            return Err("nothing recorded".to_string());
        }
        let file = File::create(path)
            .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
        let mut encoder = gif::Encoder::new(file, self.width, self.height, &[])
            .map_err(|e| format!("Failed to start GIF encoder: {}", e))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| format!("Failed to set GIF repeat: {}", e))?;
        let count = self.frames.len();
        for mut rgba in self.frames {
            let mut frame = gif::Frame::from_rgba_speed(self.width, self.height, &mut rgba, 10);
            frame.delay = self.frame_delay_cs;
            encoder
                .write_frame(&frame)
                .map_err(|e| format!("Failed to write GIF frame: {}", e))?;
        }
        Ok(count)
    }
}
