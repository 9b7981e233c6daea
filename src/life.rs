use crate::config::GridLayout;
use crate::dish::DishMask;
use rand::Rng;

/// Fraction of in-dish cells set alive by a random fill.
const RANDOM_FILL_DENSITY: f64 = 0.3;

/// Cell changes produced by one generation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepDelta {
    pub births: u64,
    pub deaths: u64,
}

/// Toroidal boolean grid holding the automaton state.
///
/// Storage is a flat row-major vector; wrapping applies to neighbor lookups
/// only. Cells whose screen-space center falls outside the dish remain
/// addressable, but they are never drawn and never count as live neighbors.
pub struct LifeGrid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl LifeGrid {
    /// All-dead grid of the given dimensions.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    pub fn is_alive(&self, col: usize, row: usize) -> bool {
        self.cells[self.index(col, row)]
    }

    pub fn set(&mut self, col: usize, row: usize, alive: bool) {
        let idx = self.index(col, row);
        self.cells[idx] = alive;
    }

    /// Flip one cell. Callers map screen coordinates through
    /// `DishMask::screen_to_grid` first, which guarantees the indices.
    pub fn toggle(&mut self, col: usize, row: usize) {
        let idx = self.index(col, row);
        self.cells[idx] = !self.cells[idx];
    }

    pub fn population(&self) -> u64 {
        self.cells.iter().filter(|&&alive| alive).count() as u64
    }

    /// Coordinates of every live cell, row-major.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(idx, _)| (idx % self.cols, idx / self.cols))
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = false);
    }

    /// Random fill of the in-dish cells; everything outside the dish stays
    /// dead.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, dish: &DishMask, layout: &GridLayout) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (cx, cy) = layout.cell_center(col, row);
                let alive = dish.contains(cx, cy) && rng.gen_bool(RANDOM_FILL_DENSITY);
                self.set(col, row, alive);
            }
        }
    }

    /// Live neighbors of `(col, row)` among the 8 toroidal neighbors,
    /// masked by the dish: a neighbor counts only when its own cell center
    /// lies inside the circle, regardless of its stored boolean.
    fn count_masked_neighbors(
        &self,
        col: usize,
        row: usize,
        dish: &DishMask,
        layout: &GridLayout,
    ) -> u8 {
        let w = self.cols as i32;
        let h = self.rows as i32;
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let ncol = (col as i32 + dx).rem_euclid(w) as usize;
                let nrow = (row as i32 + dy).rem_euclid(h) as usize;
                if !self.is_alive(ncol, nrow) {
                    continue;
                }
                let (cx, cy) = layout.cell_center(ncol, nrow);
                if dish.contains(cx, cy) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Compute the next generation into a fresh grid.
    ///
    /// Only the current grid is read, so a partially written successor can
    /// never leak into its own neighbor counts. The caller swaps its grid
    /// for the returned one.
    pub fn step(&self, dish: &DishMask, layout: &GridLayout) -> (LifeGrid, StepDelta) {
        let mut next = LifeGrid::new(self.cols, self.rows);
        let mut delta = StepDelta::default();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let alive = self.is_alive(col, row);
                let neighbors = self.count_masked_neighbors(col, row, dish, layout);
                let survives = matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3));
                if survives && !alive {
                    delta.births += 1;
                } else if alive && !survives {
                    delta.deaths += 1;
                }
                next.set(col, row, survives);
            }
        }
        (next, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    /// 4x4 grid whose 16 cell centers all sit inside a generous dish: the
    /// corner centers are ~84.9 pixels from the center, radius 85 covers
    /// them all.
    fn open_dish() -> (DishMask, GridLayout) {
        let config = SimConfig {
            screen_width: 200,
            screen_height: 200,
            radius: 85,
            cell_size: 40,
            frame_delay_ms: 100,
        };
        (config.dish(), config.layout())
    }

    #[test]
    fn open_dish_covers_every_cell() {
        let (dish, layout) = open_dish();
        assert_eq!((layout.cols, layout.rows), (4, 4));
        for row in 0..4 {
            for col in 0..4 {
                let (cx, cy) = layout.cell_center(col, row);
                assert!(dish.contains(cx, cy), "cell ({col},{row}) center outside dish");
            }
        }
    }

    #[test]
    fn dead_grid_stays_dead() {
        let (dish, layout) = open_dish();
        let grid = LifeGrid::new(4, 4);
        let (next, delta) = grid.step(&dish, &layout);
        assert_eq!(next.population(), 0);
        assert_eq!(delta, StepDelta::default());
    }

    #[test]
    fn lone_cell_dies() {
        let (dish, layout) = open_dish();
        let mut grid = LifeGrid::new(4, 4);
        grid.set(1, 1, true);
        let (next, delta) = grid.step(&dish, &layout);
        assert!(!next.is_alive(1, 1));
        assert_eq!(next.population(), 0);
        assert_eq!(delta.deaths, 1);
    }

    #[test]
    fn block_is_stable() {
        let (dish, layout) = open_dish();
        let mut grid = LifeGrid::new(4, 4);
        for (col, row) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            grid.set(col, row, true);
        }
        let (next, delta) = grid.step(&dish, &layout);
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(
                    next.is_alive(col, row),
                    grid.is_alive(col, row),
                    "cell ({col},{row}) changed"
                );
            }
        }
        assert_eq!(delta, StepDelta::default());
    }

    #[test]
    fn toggle_twice_restores() {
        let mut grid = LifeGrid::new(4, 4);
        assert!(!grid.is_alive(2, 3));
        grid.toggle(2, 3);
        assert!(grid.is_alive(2, 3));
        grid.toggle(2, 3);
        assert!(!grid.is_alive(2, 3));
    }

    #[test]
    fn neighbor_counting_wraps_toroidally() {
        let (dish, layout) = open_dish();
        let mut grid = LifeGrid::new(4, 4);
        // a corner cell's wrapped neighbors are the opposite corners
        grid.set(0, 0, true);
        grid.set(3, 0, true);
        grid.set(0, 3, true);
        assert_eq!(grid.count_masked_neighbors(3, 3, &dish, &layout), 3);
        // with three wrapped neighbors, the far corner is born
        let (next, _) = grid.step(&dish, &layout);
        assert!(next.is_alive(3, 3));
    }

    #[test]
    fn out_of_dish_cell_never_counts() {
        // tight dish: radius 40 on a 100x100 screen with cell size 20 gives
        // a 4x4 grid whose corner cell centers fall outside the circle
        let config = SimConfig {
            screen_width: 100,
            screen_height: 100,
            radius: 40,
            cell_size: 20,
            frame_delay_ms: 100,
        };
        let (dish, layout) = (config.dish(), config.layout());
        let (cx, cy) = layout.cell_center(0, 0);
        assert!(!dish.contains(cx, cy));
        let (cx, cy) = layout.cell_center(1, 1);
        assert!(dish.contains(cx, cy));

        let mut grid = LifeGrid::new(layout.cols, layout.rows);
        // force the out-of-dish corner alive; storage still holds it
        grid.set(0, 0, true);
        assert!(grid.is_alive(0, 0));
        assert_eq!(grid.count_masked_neighbors(1, 1, &dish, &layout), 0);

        // two in-dish cells plus the masked corner: nobody reaches three
        // neighbors, so no birth can be attributed to the corner cell
        grid.set(1, 2, true);
        grid.set(2, 1, true);
        let (next, _) = grid.step(&dish, &layout);
        assert!(!next.is_alive(1, 1));
        assert!(!next.is_alive(2, 2));
    }

    #[test]
    fn randomize_respects_dish() {
        let config = SimConfig {
            screen_width: 100,
            screen_height: 100,
            radius: 40,
            cell_size: 20,
            frame_delay_ms: 100,
        };
        let (dish, layout) = (config.dish(), config.layout());
        let mut grid = LifeGrid::new(layout.cols, layout.rows);
        let mut rng = rand::thread_rng();
        grid.randomize(&mut rng, &dish, &layout);
        for (col, row) in grid.live_cells() {
            let (cx, cy) = layout.cell_center(col, row);
            assert!(dish.contains(cx, cy));
        }
    }

    #[test]
    fn live_cells_roundtrip() {
        let mut grid = LifeGrid::new(4, 4);
        grid.set(3, 0, true);
        grid.set(0, 2, true);
        let cells: Vec<_> = grid.live_cells().collect();
        assert_eq!(cells, vec![(3, 0), (0, 2)]);
        assert_eq!(grid.population(), 2);
    }
}
