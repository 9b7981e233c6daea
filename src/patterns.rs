use crate::config::GridLayout;
use crate::dish::DishMask;
use crate::life::LifeGrid;
use rand::Rng;

/// Starting configurations that can be stamped onto the dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pattern {
    #[default]
    Block,
    Blinker,
    Glider,
    RPentomino,
    Random,
}

impl Pattern {
    pub fn name(&self) -> &str {
        match self {
            Pattern::Block => "Block",
            Pattern::Blinker => "Blinker",
            Pattern::Glider => "Glider",
            Pattern::RPentomino => "R-pentomino",
            Pattern::Random => "Random",
        }
    }

    pub fn next(&self) -> Pattern {
        match self {
            Pattern::Block => Pattern::Blinker,
            Pattern::Blinker => Pattern::Glider,
            Pattern::Glider => Pattern::RPentomino,
            Pattern::RPentomino => Pattern::Random,
            Pattern::Random => Pattern::Block,
        }
    }

    pub fn prev(&self) -> Pattern {
        match self {
            Pattern::Block => Pattern::Random,
            Pattern::Blinker => Pattern::Block,
            Pattern::Glider => Pattern::Blinker,
            Pattern::RPentomino => Pattern::Glider,
            Pattern::Random => Pattern::RPentomino,
        }
    }

    /// Cell offsets relative to the pattern's top-left corner.
    fn offsets(&self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Pattern::Blinker => &[(0, 0), (1, 0), (2, 0)],
            Pattern::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            Pattern::RPentomino => &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
            Pattern::Random => &[],
        }
    }

    fn extent(&self) -> (usize, usize) {
        self.offsets().iter().fold((0, 0), |(w, h), &(c, r)| {
            (w.max(c + 1), h.max(r + 1))
        })
    }

    /// Clear the grid and stamp this pattern centered on it. Cells that
    /// would land outside the dish are skipped.
    pub fn stamp<R: Rng>(
        &self,
        grid: &mut LifeGrid,
        rng: &mut R,
        dish: &DishMask,
        layout: &GridLayout,
    ) {
        grid.clear();
        if matches!(self, Pattern::Random) {
            grid.randomize(rng, dish, layout);
            return;
        }
        let (cols, rows) = grid.dimensions();
        let (width, height) = self.extent();
        let base_col = cols.saturating_sub(width) / 2;
        let base_row = rows.saturating_sub(height) / 2;
        for &(dc, dr) in self.offsets() {
            let col = base_col + dc;
            let row = base_row + dr;
            if col >= cols || row >= rows {
                continue;
            }
            let (cx, cy) = layout.cell_center(col, row);
            if dish.contains(cx, cy) {
                grid.set(col, row, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn setup() -> (DishMask, GridLayout, LifeGrid) {
        let config = SimConfig {
            screen_width: 400,
            screen_height: 400,
            radius: 150,
            cell_size: 20,
            frame_delay_ms: 100,
        };
        let layout = config.layout();
        let grid = LifeGrid::new(layout.cols, layout.rows);
        (config.dish(), layout, grid)
    }

    #[test]
    fn cycle_is_closed() {
        let mut pattern = Pattern::default();
        for _ in 0..5 {
            assert_eq!(pattern.next().prev(), pattern);
            pattern = pattern.next();
        }
        assert_eq!(pattern, Pattern::default());
    }

    #[test]
    fn block_stamps_four_cells_at_center() {
        let (dish, layout, mut grid) = setup();
        let mut rng = rand::thread_rng();
        Pattern::Block.stamp(&mut grid, &mut rng, &dish, &layout);
        assert_eq!(grid.population(), 4);
        // a centered 2x2 block on a 15x15 grid starts at (6, 6)
        assert!(grid.is_alive(6, 6));
        assert!(grid.is_alive(7, 7));
    }

    #[test]
    fn glider_stamps_five_cells() {
        let (dish, layout, mut grid) = setup();
        let mut rng = rand::thread_rng();
        Pattern::Glider.stamp(&mut grid, &mut rng, &dish, &layout);
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn stamp_replaces_previous_contents() {
        let (dish, layout, mut grid) = setup();
        let mut rng = rand::thread_rng();
        grid.set(0, 0, true);
        Pattern::Blinker.stamp(&mut grid, &mut rng, &dish, &layout);
        assert!(!grid.is_alive(0, 0));
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn blinker_oscillates() {
        let (dish, layout, mut grid) = setup();
        let mut rng = rand::thread_rng();
        Pattern::Blinker.stamp(&mut grid, &mut rng, &dish, &layout);
        let (after_one, _) = grid.step(&dish, &layout);
        assert_eq!(after_one.population(), 3);
        let (after_two, _) = after_one.step(&dish, &layout);
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                assert_eq!(after_two.is_alive(col, row), grid.is_alive(col, row));
            }
        }
    }
}
