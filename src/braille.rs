use crate::config::GridLayout;
use crate::dish::DishMask;
use crate::life::LifeGrid;
use ratatui::style::Color;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

const LIVE_COLOR: Color = Color::White;
const DISH_COLOR: Color = Color::DarkGray;

/// A single rendered Braille cell with position and color
#[derive(Clone, Copy)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// Render the dish onto a Braille canvas.
///
/// The screen plane (`screen_width x screen_height` pixels) is sampled at
/// the canvas's dot resolution, the way the original pixel renderer sampled
/// its window. A dot lights for a live in-dish cell, or dimly for the dish
/// boundary ring. Live cells outside the dish are storage artifacts and are
/// never drawn.
pub fn render_to_braille(
    grid: &LifeGrid,
    dish: &DishMask,
    layout: &GridLayout,
    screen_width: i32,
    screen_height: i32,
    canvas_width: u16,
    canvas_height: u16,
) -> Vec<BrailleCell> {
    if canvas_width == 0 || canvas_height == 0 {
        return Vec::new();
    }

    // Braille effective resolution
    let braille_width = canvas_width as usize * 2;
    let braille_height = canvas_height as usize * 4;

    // Scale factors (pre-calculated once)
    let scale_x = screen_width as f32 / braille_width as f32;
    let scale_y = screen_height as f32 / braille_height as f32;

    // boundary ring about one dot thick, expressed in screen pixels
    let band = scale_x.max(scale_y).ceil() as i64 + 1;
    let radius = dish.radius() as i64;
    let outer_sq = radius * radius;
    let inner = (radius - band).max(0);
    let inner_sq = inner * inner;
    let (center_x, center_y) = dish.center();

    let mut cells = Vec::new();

    for cy in 0..canvas_height {
        for cx in 0..canvas_width {
            let mut pattern: u8 = 0;
            let mut any_live = false;

            // Sample the 2x4 dots for this Braille character
            let base_bx = cx as usize * 2;
            let base_by = cy as usize * 4;

            for dx in 0..2 {
                for dy in 0..4 {
                    let px = ((base_bx + dx) as f32 * scale_x) as i32;
                    let py = ((base_by + dy) as f32 * scale_y) as i32;

                    let live = layout.cell_at(px, py).is_some_and(|(col, row)| {
                        let (ccx, ccy) = layout.cell_center(col, row);
                        grid.is_alive(col, row) && dish.contains(ccx, ccy)
                    });

                    let on_ring = {
                        let ddx = (px - center_x) as i64;
                        let ddy = (py - center_y) as i64;
                        let dist_sq = ddx * ddx + ddy * ddy;
                        dist_sq <= outer_sq && dist_sq >= inner_sq
                    };

                    if live || on_ring {
                        pattern |= BRAILLE_DOTS[dx][dy];
                        any_live |= live;
                    }
                }
            }

            // Only emit cells that have at least one dot
            if pattern != 0 {
                let braille_char = char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ');
                let color = if any_live { LIVE_COLOR } else { DISH_COLOR };
                cells.push(BrailleCell {
                    x: cx,
                    y: cy,
                    char: braille_char,
                    color,
                });
            }
        }
    }

    cells
}

/// Screen pixel under the center of a terminal cell; the inverse of the
/// projection above, used to route mouse clicks into the dish.
pub fn canvas_to_screen(
    col: u16,
    row: u16,
    canvas_width: u16,
    canvas_height: u16,
    screen_width: i32,
    screen_height: i32,
) -> (i32, i32) {
    let scale_x = screen_width as f32 / (canvas_width as usize * 2) as f32;
    let scale_y = screen_height as f32 / (canvas_height as usize * 4) as f32;
    let px = ((col as f32 + 0.5) * 2.0 * scale_x) as i32;
    let py = ((row as f32 + 0.5) * 4.0 * scale_y) as i32;
    (px, py)
}
