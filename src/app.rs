use crate::config::{quicksave_path, GridLayout, SavedDish, SimConfig};
use crate::dish::DishMask;
use crate::life::LifeGrid;
use crate::patterns::Pattern;
use crate::snapshot::{self, GifRecorder};
use rand::rngs::ThreadRng;

const MIN_FRAME_DELAY_MS: u64 = 25;
const MAX_FRAME_DELAY_MS: u64 = 2000;
const FRAME_DELAY_STEP_MS: u64 = 25;

/// Running statistics shown in the sidebar.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    pub generation: u64,
    pub births: u64,
    pub deaths: u64,
}

/// Focus state for parameter editing in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    None,
    Pattern,
    Speed,
    // Controls box (not a param)
    Controls,
}

impl Focus {
    /// Tab cycles through the adjustable parameters
    pub fn next(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Pattern,
            Focus::Pattern => Focus::Speed,
            Focus::Speed => Focus::Pattern,
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Speed,
            Focus::Pattern => Focus::Speed,
            Focus::Speed => Focus::Pattern,
        }
    }

    /// Check if focus is on a parameter (not Controls or None)
    pub fn is_param(&self) -> bool {
        matches!(self, Focus::Pattern | Focus::Speed)
    }
}

/// Main application state: the dish geometry, the grid, and the pause flag
/// that gates generation advance. The grid itself never sees the pause
/// state; ticks simply skip it while paused, and toggles apply regardless.
pub struct App {
    pub config: SimConfig,
    pub dish: DishMask,
    pub layout: GridLayout,
    pub grid: LifeGrid,
    pub paused: bool,
    pub pattern: Pattern,
    pub stats: Stats,
    pub focus: Focus,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    pub frame_delay_ms: u64,
    /// One-line outcome of the last file operation, shown in the sidebar
    pub status: Option<String>,
    recorder: Option<GifRecorder>,
    rng: ThreadRng,
}

impl App {
    /// The dish starts paused with an empty grid, waiting for clicks.
    pub fn new(config: SimConfig) -> Self {
        let dish = config.dish();
        let layout = config.layout();
        let grid = LifeGrid::new(layout.cols, layout.rows);
        Self {
            config,
            dish,
            layout,
            grid,
            paused: true,
            pattern: Pattern::default(),
            stats: Stats::default(),
            focus: Focus::Controls,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            frame_delay_ms: config.frame_delay_ms,
            status: None,
            recorder: None,
            rng: rand::thread_rng(),
        }
    }

    /// Advance one generation if running.
    pub fn tick(&mut self) {
        if !self.paused {
            self.advance();
        }
    }

    /// Advance one generation regardless of pause state.
    pub fn step_once(&mut self) {
        self.advance();
    }

    fn advance(&mut self) {
        let (next, delta) = self.grid.step(&self.dish, &self.layout);
        self.grid = next;
        self.stats.generation += 1;
        self.stats.births += delta.births;
        self.stats.deaths += delta.deaths;
        self.capture_recording_frame();
    }

    /// Toggle the cell under a screen point. Clicks outside the dish or the
    /// grid map to nothing and are silently ignored.
    pub fn toggle_at(&mut self, px: i32, py: i32) {
        if let Some((col, row)) = self.dish.screen_to_grid(px, py, &self.layout) {
            self.grid.toggle(col, row);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Clear the dish and restart the statistics.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.stats = Stats::default();
    }

    pub fn randomize(&mut self) {
        self.grid.randomize(&mut self.rng, &self.dish, &self.layout);
        self.stats = Stats::default();
    }

    pub fn apply_pattern(&mut self, pattern: Pattern) {
        self.pattern = pattern;
        pattern.stamp(&mut self.grid, &mut self.rng, &self.dish, &self.layout);
        self.stats = Stats::default();
    }

    pub fn cycle_pattern(&mut self) {
        self.apply_pattern(self.pattern.next());
    }

    pub fn cycle_pattern_prev(&mut self) {
        self.apply_pattern(self.pattern.prev());
    }

    /// Faster frames: shrink the delay.
    pub fn increase_speed(&mut self) {
        self.frame_delay_ms = self
            .frame_delay_ms
            .saturating_sub(FRAME_DELAY_STEP_MS)
            .max(MIN_FRAME_DELAY_MS);
    }

    /// Slower frames: grow the delay.
    pub fn decrease_speed(&mut self) {
        self.frame_delay_ms = (self.frame_delay_ms + FRAME_DELAY_STEP_MS).min(MAX_FRAME_DELAY_MS);
    }

    /// Cycle to next focus
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_up(&mut self) {
        match self.focus {
            Focus::Pattern => self.cycle_pattern(),
            Focus::Speed => self.increase_speed(),
            Focus::None | Focus::Controls => {}
        }
    }

    pub fn adjust_focused_down(&mut self) {
        match self.focus {
            Focus::Pattern => self.cycle_pattern_prev(),
            Focus::Speed => self.decrease_speed(),
            Focus::None | Focus::Controls => {}
        }
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    /// Write the current dish to the quicksave slot.
    pub fn save_dish(&mut self) {
        let Some(path) = quicksave_path() else {
            self.status = Some("save failed: no config directory".to_string());
            return;
        };
        let saved = SavedDish::capture(&self.config, self.stats.generation, &self.grid);
        self.status = Some(match saved.save_to_file(&path) {
            Ok(()) => format!("saved {}", path.display()),
            Err(e) => format!("save failed: {}", e),
        });
    }

    /// Replace the dish with the quicksave contents and pause.
    pub fn load_dish(&mut self) {
        let Some(path) = quicksave_path() else {
            self.status = Some("load failed: no config directory".to_string());
            return;
        };
        let loaded = SavedDish::load_from_file(&path).and_then(|saved| {
            let grid = saved.restore(&self.layout)?;
            Ok((saved.generation, grid))
        });
        self.status = Some(match loaded {
            Ok((generation, grid)) => {
                self.grid = grid;
                self.stats = Stats {
                    generation,
                    ..Stats::default()
                };
                self.set_paused(true);
                format!("loaded {}", path.display())
            }
            Err(e) => format!("load failed: {}", e),
        });
    }

    /// Export the current dish as a PNG in the working directory.
    pub fn export_snapshot(&mut self) {
        let img = snapshot::render_frame(&self.config, &self.dish, &self.layout, &self.grid);
        let path = snapshot::snapshot_path(self.stats.generation);
        self.status = Some(match snapshot::save_png(&img, &path) {
            Ok(()) => format!("saved {}", path.display()),
            Err(e) => format!("snapshot failed: {}", e),
        });
    }

    /// Start a GIF recording, or stop and encode the one in progress.
    pub fn toggle_recording(&mut self) {
        match self.recorder.take() {
            Some(recorder) => {
                let path = snapshot::recording_path(self.stats.generation);
                self.status = Some(match recorder.finish(&path) {
                    Ok(frames) => format!("wrote {} ({} frames)", path.display(), frames),
                    Err(e) => format!("recording failed: {}", e),
                });
            }
            None => {
                let mut recorder = GifRecorder::new(&self.config);
                // seed the recording with the current state
                recorder.push_frame(&snapshot::render_frame(
                    &self.config,
                    &self.dish,
                    &self.layout,
                    &self.grid,
                ));
                self.recorder = Some(recorder);
                self.status = Some("recording...".to_string());
            }
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    pub fn recorded_frames(&self) -> usize {
        self.recorder.as_ref().map_or(0, GifRecorder::frame_count)
    }

    fn capture_recording_frame(&mut self) {
        if let Some(recorder) = &mut self.recorder {
            if !recorder.is_full() {
                let img =
                    snapshot::render_frame(&self.config, &self.dish, &self.layout, &self.grid);
                recorder.push_frame(&img);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_app() -> App {
        App::new(SimConfig {
            screen_width: 200,
            screen_height: 200,
            radius: 85,
            cell_size: 40,
            frame_delay_ms: 100,
        })
    }

    #[test]
    fn starts_paused_and_empty() {
        let app = small_app();
        assert!(app.paused);
        assert_eq!(app.grid.population(), 0);
        assert_eq!(app.stats.generation, 0);
    }

    #[test]
    fn tick_respects_pause() {
        let mut app = small_app();
        app.tick();
        assert_eq!(app.stats.generation, 0);
        app.toggle_pause();
        app.tick();
        assert_eq!(app.stats.generation, 1);
    }

    #[test]
    fn step_once_ignores_pause() {
        let mut app = small_app();
        assert!(app.paused);
        app.step_once();
        assert_eq!(app.stats.generation, 1);
    }

    #[test]
    fn toggle_at_maps_clicks() {
        let mut app = small_app();
        // center of the screen is the center of cell (2, 2)
        app.toggle_at(100, 100);
        assert_eq!(app.grid.population(), 1);
        assert!(app.grid.is_alive(2, 2));
        // toggling while paused is allowed, and toggling again restores
        app.toggle_at(100, 100);
        assert_eq!(app.grid.population(), 0);
    }

    #[test]
    fn clicks_outside_the_dish_are_ignored() {
        let mut app = small_app();
        app.toggle_at(0, 0);
        app.toggle_at(-5, 100);
        app.toggle_at(100, 10_000);
        assert_eq!(app.grid.population(), 0);
    }

    #[test]
    fn speed_adjust_clamps() {
        let mut app = small_app();
        for _ in 0..200 {
            app.increase_speed();
        }
        assert_eq!(app.frame_delay_ms, MIN_FRAME_DELAY_MS);
        for _ in 0..200 {
            app.decrease_speed();
        }
        assert_eq!(app.frame_delay_ms, MAX_FRAME_DELAY_MS);
    }

    #[test]
    fn focus_cycles_between_params() {
        let mut app = small_app();
        assert!(!app.focus.is_param());
        app.next_focus();
        assert_eq!(app.focus, Focus::Pattern);
        app.next_focus();
        assert_eq!(app.focus, Focus::Speed);
        app.next_focus();
        assert_eq!(app.focus, Focus::Pattern);
    }

    #[test]
    fn reset_clears_grid_and_stats() {
        let mut app = small_app();
        app.toggle_at(100, 100);
        app.step_once();
        app.reset();
        assert_eq!(app.grid.population(), 0);
        assert_eq!(app.stats.generation, 0);
    }

    #[test]
    fn pattern_keys_stamp_and_track() {
        let mut app = small_app();
        app.apply_pattern(Pattern::Block);
        assert_eq!(app.pattern, Pattern::Block);
        assert_eq!(app.grid.population(), 4);
    }

    #[test]
    fn recording_collects_frames_per_generation() {
        let mut app = small_app();
        app.toggle_recording();
        assert!(app.is_recording());
        assert_eq!(app.recorded_frames(), 1);
        app.step_once();
        app.step_once();
        assert_eq!(app.recorded_frames(), 3);
    }
}
