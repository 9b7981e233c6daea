use crate::config::GridLayout;

/// Circular dish mask in screen space.
///
/// All geometry is integer arithmetic: containment is a squared-distance
/// comparison, so boundary points cannot flicker between frames the way a
/// floating-point square root would let them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DishMask {
    center_x: i32,
    center_y: i32,
    radius: i32,
}

impl DishMask {
    /// Build a mask centered in a `screen_width x screen_height` plane.
    /// Config validation guarantees `radius > 0`.
    pub fn new(screen_width: i32, screen_height: i32, radius: i32) -> Self {
        Self {
            center_x: screen_width / 2,
            center_y: screen_height / 2,
            radius,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// True iff `(px, py)` lies inside the dish, boundary included.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let dx = (px - self.center_x) as i64;
        let dy = (py - self.center_y) as i64;
        let r = self.radius as i64;
        dx * dx + dy * dy <= r * r
    }

    /// Map a screen point to the grid cell under it.
    ///
    /// Returns `None` when the point falls outside `[0,cols)x[0,rows)` or
    /// outside the dish. A click inside the grid's bounding box but beyond
    /// the circular boundary is deliberately ignored, not an error.
    pub fn screen_to_grid(&self, px: i32, py: i32, layout: &GridLayout) -> Option<(usize, usize)> {
        if !self.contains(px, py) {
            return None;
        }
        layout.cell_at(px, py)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn small_layout() -> GridLayout {
        // 100x100 screen, radius 40, cell size 10 -> 8x8 grid at offset 10
        SimConfig {
            screen_width: 100,
            screen_height: 100,
            radius: 40,
            cell_size: 10,
            frame_delay_ms: 100,
        }
        .layout()
    }

    #[test]
    fn contains_includes_boundary() {
        let dish = DishMask::new(100, 100, 40);
        // exactly radius away on the axis
        assert!(dish.contains(90, 50));
        assert!(dish.contains(50, 10));
        // one past the boundary
        assert!(!dish.contains(91, 50));
        // 3-4-5 triangle puts (74, 82) exactly on the circle
        assert!(dish.contains(74, 82));
        assert!(!dish.contains(75, 82));
    }

    #[test]
    fn contains_center() {
        let dish = DishMask::new(100, 100, 40);
        assert!(dish.contains(50, 50));
    }

    #[test]
    fn large_radius_does_not_overflow() {
        let dish = DishMask::new(100_000, 100_000, 50_000);
        assert!(dish.contains(0, 50_000));
        assert!(!dish.contains(0, 0));
    }

    #[test]
    fn screen_to_grid_maps_cells() {
        let dish = DishMask::new(100, 100, 40);
        let layout = small_layout();
        assert_eq!(dish.screen_to_grid(50, 50, &layout), Some((4, 4)));
        assert_eq!(dish.screen_to_grid(10, 50, &layout), Some((0, 4)));
        // within cell (0, 4), not on its corner
        assert_eq!(dish.screen_to_grid(19, 55, &layout), Some((0, 4)));
    }

    #[test]
    fn screen_to_grid_rejects_outside_dish() {
        let dish = DishMask::new(100, 100, 40);
        let layout = small_layout();
        // top-left corner of the grid box: in bounds by raw division, but
        // outside the circle
        assert!(layout.cell_at(12, 12).is_some());
        assert_eq!(dish.screen_to_grid(12, 12, &layout), None);
    }

    #[test]
    fn screen_to_grid_rejects_out_of_bounds() {
        let dish = DishMask::new(100, 100, 40);
        // grid covering only the left half of the dish: points inside the
        // circle but right of the grid must still map to nothing
        let layout = GridLayout {
            cols: 4,
            rows: 8,
            cell_size: 10,
            offset_x: 10,
            offset_y: 10,
        };
        assert!(dish.contains(60, 50));
        assert_eq!(dish.screen_to_grid(60, 50, &layout), None);
    }

    #[test]
    fn screen_to_grid_uses_floor_division() {
        let dish = DishMask::new(100, 100, 40);
        // cell_size 30 leaves a margin between the grid box (x in 20..80)
        // and the dish: a point in that margin sits inside the circle, and
        // truncating division would wrongly map it to column 0
        let layout = SimConfig {
            screen_width: 100,
            screen_height: 100,
            radius: 40,
            cell_size: 30,
            frame_delay_ms: 100,
        }
        .layout();
        assert_eq!(layout.offset_x, 20);
        assert!(dish.contains(19, 50));
        assert_eq!(dish.screen_to_grid(19, 50, &layout), None);
    }
}
