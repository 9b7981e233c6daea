mod app;
mod braille;
mod config;
mod dish;
mod life;
mod patterns;
mod snapshot;
mod ui;

use app::{App, Focus};
use clap::Parser;
use config::SimConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use patterns::Pattern;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::process;
use std::time::{Duration, Instant};

/// Numeric options arrive as raw strings: a malformed value warns and falls
/// back to its default instead of aborting the run.
#[derive(Parser, Debug)]
#[command(name = "petri-life")]
#[command(about = "Conway's Game of Life in a circular petri dish, in the terminal")]
struct Args {
    /// Screen width in pixels [default: 800]
    #[arg(long)]
    width: Option<String>,

    /// Screen height in pixels [default: 800]
    #[arg(long)]
    height: Option<String>,

    /// Dish radius in pixels [default: 350]
    #[arg(long)]
    radius: Option<String>,

    /// Edge length of one grid cell in pixels [default: 20]
    #[arg(long = "cell_size")]
    cell_size: Option<String>,

    /// Frame delay in milliseconds [default: 100]
    #[arg(long)]
    speed: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // config fallback warnings must reach the user even without RUST_LOG
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = SimConfig::resolve(
        args.width.as_deref(),
        args.height.as_deref(),
        args.radius.as_deref(),
        args.cell_size.as_deref(),
        args.speed.as_deref(),
    );
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("terminal loop failed: {err}");
        eprintln!("Error: {:?}", err);
        process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events, leaving time for the next generation
        let tick_rate = Duration::from_millis(app.frame_delay_ms);
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    // === Help overlay swallows keys while open ===
                    if app.show_help {
                        match key.code {
                            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Esc => {
                                app.toggle_help()
                            }
                            KeyCode::Char('j') | KeyCode::Char('J') => {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES)
                            }
                            KeyCode::Char('k') | KeyCode::Char('K') => app.scroll_help_up(),
                            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                            _ => {}
                        }
                        continue;
                    }

                    // === Process normal key events ===
                    match key.code {
                        // System controls
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_pause(),
                        KeyCode::Enter => {
                            if app.paused {
                                app.step_once();
                            }
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => app.randomize(),
                        KeyCode::Char('c') | KeyCode::Char('C') => app.reset(),
                        KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_fullscreen(),
                        KeyCode::Char('h') | KeyCode::Char('H') => app.toggle_help(),

                        // Patterns
                        KeyCode::Char('1') => app.apply_pattern(Pattern::Block),
                        KeyCode::Char('2') => app.apply_pattern(Pattern::Blinker),
                        KeyCode::Char('3') => app.apply_pattern(Pattern::Glider),
                        KeyCode::Char('4') => app.apply_pattern(Pattern::RPentomino),
                        KeyCode::Char('5') => app.apply_pattern(Pattern::Random),

                        // Speed
                        KeyCode::Char('+') | KeyCode::Char('=') => {
                            app.increase_speed();
                            app.focus = Focus::Speed;
                        }
                        KeyCode::Char('-') | KeyCode::Char('_') => {
                            app.decrease_speed();
                            app.focus = Focus::Speed;
                        }

                        // Capture and persistence
                        KeyCode::Char('e') | KeyCode::Char('E') => app.export_snapshot(),
                        KeyCode::Char('g') | KeyCode::Char('G') => app.toggle_recording(),
                        KeyCode::Char('s') | KeyCode::Char('S') => app.save_dish(),
                        KeyCode::Char('l') | KeyCode::Char('L') => app.load_dish(),

                        // Navigation
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => {
                            if app.focus.is_param() {
                                app.adjust_focused_up();
                            }
                        }
                        KeyCode::Down => {
                            if app.focus.is_param() {
                                app.adjust_focused_down();
                            }
                        }
                        KeyCode::Esc => {
                            if app.focus.is_param() {
                                app.focus = Focus::Controls;
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let size = terminal.size()?;
                        let frame_rect = Rect::new(0, 0, size.width, size.height);
                        let canvas = ui::canvas_area(frame_rect, app.fullscreen_mode);
                        let in_canvas = canvas.width > 0
                            && canvas.height > 0
                            && mouse.column >= canvas.x
                            && mouse.column < canvas.x + canvas.width
                            && mouse.row >= canvas.y
                            && mouse.row < canvas.y + canvas.height;
                        if in_canvas {
                            let (px, py) = braille::canvas_to_screen(
                                mouse.column - canvas.x,
                                mouse.row - canvas.y,
                                canvas.width,
                                canvas.height,
                                app.config.screen_width,
                                app.config.screen_height,
                            );
                            app.toggle_at(px, py);
                        }
                    }
                }
                // Resize needs no bookkeeping: the canvas is re-measured on
                // every draw
                _ => {}
            }
        }

        // Frame update
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }
}
