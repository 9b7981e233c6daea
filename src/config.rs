use crate::dish::DishMask;
use crate::life::LifeGrid;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_SCREEN_WIDTH: i32 = 800;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 800;
pub const DEFAULT_DISH_RADIUS: i32 = 350;
pub const DEFAULT_CELL_SIZE: i32 = 20;
pub const DEFAULT_FRAME_DELAY_MS: u64 = 100;

/// Upper bound on pixel dimensions; keeps every derived quantity (offsets,
/// squared radii, snapshot buffers) inside comfortable integer range.
const MAX_GEOMETRY: i32 = 10_000;

/// Immutable run configuration, produced once at startup and passed by
/// reference into everything that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Screen width in pixels
    pub screen_width: i32,
    /// Screen height in pixels
    pub screen_height: i32,
    /// Dish radius in pixels
    pub radius: i32,
    /// Edge length of one grid cell in pixels
    pub cell_size: i32,
    /// Delay per frame in milliseconds
    pub frame_delay_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            radius: DEFAULT_DISH_RADIUS,
            cell_size: DEFAULT_CELL_SIZE,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

/// Placement of the cell grid on the screen plane, derived once from the
/// configured geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: i32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl GridLayout {
    /// Top-left screen corner of a cell.
    pub fn cell_origin(&self, col: usize, row: usize) -> (i32, i32) {
        (
            self.offset_x + col as i32 * self.cell_size,
            self.offset_y + row as i32 * self.cell_size,
        )
    }

    /// Screen-space center of a cell; this is the point the dish mask tests.
    pub fn cell_center(&self, col: usize, row: usize) -> (i32, i32) {
        let (x, y) = self.cell_origin(col, row);
        (x + self.cell_size / 2, y + self.cell_size / 2)
    }

    /// Cell under a screen point, ignoring the dish mask. Floor division, so
    /// points left of or above the grid map to negative indices and are
    /// rejected rather than truncating toward cell zero.
    pub fn cell_at(&self, px: i32, py: i32) -> Option<(usize, usize)> {
        let col = (px - self.offset_x).div_euclid(self.cell_size);
        let row = (py - self.offset_y).div_euclid(self.cell_size);
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some((col as usize, row as usize))
    }
}

/// Parse a raw CLI value, warning and substituting the default when it
/// misses the mark.
fn parse_or_default<T>(name: &str, raw: Option<&str>, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match raw {
        None => default,
        Some(s) => match s.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("invalid value {s:?} for --{name}, using default {default}");
                default
            }
        },
    }
}

fn require_in_range(name: &str, value: i32, default: i32) -> i32 {
    if (1..=MAX_GEOMETRY).contains(&value) {
        value
    } else {
        warn!("--{name} must be in 1..={MAX_GEOMETRY}, got {value}; using default {default}");
        default
    }
}

impl SimConfig {
    /// Resolve raw CLI values against the defaults. Malformed or
    /// out-of-range values warn and fall back instead of aborting, so a bad
    /// flag never kills the run.
    pub fn resolve(
        width: Option<&str>,
        height: Option<&str>,
        radius: Option<&str>,
        cell_size: Option<&str>,
        speed: Option<&str>,
    ) -> Self {
        let screen_width = require_in_range(
            "width",
            parse_or_default("width", width, DEFAULT_SCREEN_WIDTH),
            DEFAULT_SCREEN_WIDTH,
        );
        let screen_height = require_in_range(
            "height",
            parse_or_default("height", height, DEFAULT_SCREEN_HEIGHT),
            DEFAULT_SCREEN_HEIGHT,
        );
        let mut radius = require_in_range(
            "radius",
            parse_or_default("radius", radius, DEFAULT_DISH_RADIUS),
            DEFAULT_DISH_RADIUS,
        );
        let mut cell_size = require_in_range(
            "cell_size",
            parse_or_default("cell_size", cell_size, DEFAULT_CELL_SIZE),
            DEFAULT_CELL_SIZE,
        );
        // the grid must hold at least one cell
        if 2 * radius / cell_size == 0 {
            warn!(
                "--cell_size {cell_size} exceeds the dish diameter {}; using default {DEFAULT_CELL_SIZE}",
                2 * radius
            );
            cell_size = DEFAULT_CELL_SIZE;
        }
        if 2 * radius / cell_size == 0 {
            warn!(
                "--radius {radius} leaves no room for a single {cell_size}px cell; using default {DEFAULT_DISH_RADIUS}"
            );
            radius = DEFAULT_DISH_RADIUS;
        }
        let frame_delay_ms = parse_or_default("speed", speed, DEFAULT_FRAME_DELAY_MS);
        Self {
            screen_width,
            screen_height,
            radius,
            cell_size,
            frame_delay_ms,
        }
    }

    /// Square grid spanning the dish's bounding box, centered on screen.
    pub fn layout(&self) -> GridLayout {
        let cols = (2 * self.radius / self.cell_size) as usize;
        let rows = cols;
        GridLayout {
            cols,
            rows,
            cell_size: self.cell_size,
            offset_x: self.screen_width / 2 - (cols as i32 * self.cell_size) / 2,
            offset_y: self.screen_height / 2 - (rows as i32 * self.cell_size) / 2,
        }
    }

    pub fn dish(&self) -> DishMask {
        DishMask::new(self.screen_width, self.screen_height, self.radius)
    }
}

/// A saved dish: configuration echo plus the live cell list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedDish {
    /// Version field for future compatibility
    pub version: u32,
    pub config: SimConfig,
    pub generation: u64,
    pub cells: Vec<(usize, usize)>,
}

impl SavedDish {
    pub fn capture(config: &SimConfig, generation: u64, grid: &LifeGrid) -> Self {
        Self {
            version: 1,
            config: *config,
            generation,
            cells: grid.live_cells().collect(),
        }
    }

    /// Export to a JSON file, creating parent directories as needed.
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize dish: {}", e))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create save directory: {}", e))?;
        }
        fs::write(path, json).map_err(|e| format!("Failed to write save file: {}", e))
    }

    /// Import from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read save file: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse save file: {}", e))
    }

    /// Rebuild a grid from the saved cell list. Fails when the save was
    /// taken with a different grid geometry.
    pub fn restore(&self, layout: &GridLayout) -> Result<LifeGrid, String> {
        let saved = self.config.layout();
        if saved.cols != layout.cols || saved.rows != layout.rows {
            return Err(format!(
                "save has a {}x{} grid, current run uses {}x{}",
                saved.cols, saved.rows, layout.cols, layout.rows
            ));
        }
        let mut grid = LifeGrid::new(layout.cols, layout.rows);
        for &(col, row) in &self.cells {
            if col < layout.cols && row < layout.rows {
                grid.set(col, row, true);
            }
        }
        Ok(grid)
    }
}

/// Default quicksave location, under the user config directory.
pub fn quicksave_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("petri-life").join("saves").join("quicksave.json"))
}
