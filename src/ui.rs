use crate::app::{App, Focus};
use crate::braille;
use crate::snapshot::MAX_GIF_FRAMES;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 24;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// The canvas interior (inside the borders), in terminal coordinates.
/// The mouse handler maps click positions against this same rectangle, so
/// clicks and rendered dots always agree on where the dish is.
pub fn canvas_area(frame_area: Rect, fullscreen: bool) -> Rect {
    let outer = if fullscreen {
        frame_area
    } else {
        Rect {
            x: frame_area.x + SIDEBAR_WIDTH.min(frame_area.width),
            y: frame_area.y,
            width: frame_area.width.saturating_sub(SIDEBAR_WIDTH),
            height: frame_area.height,
        }
    };
    Rect {
        x: outer.x + 1,
        y: outer.y + 1,
        width: outer.width.saturating_sub(2),
        height: outer.height.saturating_sub(2),
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),  // Status
            Constraint::Length(8),  // Parameters
            Constraint::Min(10),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2]);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Petri Life ");

    let status_text = if app.paused { "PAUSED" } else { "RUNNING" };
    let status_color = if app.paused {
        HIGHLIGHT_COLOR
    } else {
        BORDER_COLOR
    };

    let mut content = vec![
        Line::from(Span::styled(
            format!("Gen {}", app.stats.generation),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("Alive {}", app.grid.population()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("+{} -{}", app.stats.births, app.stats.deaths),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
    ];
    if app.is_recording() {
        content.push(Line::from(Span::styled(
            format!("REC {}/{}", app.recorded_frames(), MAX_GIF_FRAMES),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(status) = &app.status {
        content.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(DIM_TEXT_COLOR),
        )));
    }

    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let content = vec![
        make_line(
            "Pattern",
            app.pattern.name().to_string(),
            app.focus == Focus::Pattern,
        ),
        make_line(
            "Delay",
            format!("{}ms", app.frame_delay_ms),
            app.focus == Focus::Speed,
        ),
        Line::from(Span::styled(
            format!("  Radius: {}", app.dish.radius()),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("  Cell: {}px", app.layout.cell_size),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("  Grid: {}x{}", app.layout.cols, app.layout.rows),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("  Screen: {}x{}", app.config.screen_width, app.config.screen_height),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    // Helper to create a control line
    let make_control = |key: &str, desc: &str| -> Line<'_> {
        Line::from(vec![
            Span::styled(format!("{:>6}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Click", "toggle cell"),
        make_control("Space", "pause/resume"),
        make_control("Enter", "single step"),
        make_control("1-5", "patterns"),
        make_control("R", "random fill"),
        make_control("C", "clear"),
        make_control("+/-", "speed"),
        make_control("E", "export PNG"),
        make_control("G", "record GIF"),
        make_control("S/L", "save/load"),
        make_control("V", "fullscreen"),
        make_control("H", "help"),
        make_control("Q", "quit"),
    ];

    let block = styled_block(" Controls ");
    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = braille::render_to_braille(
        &app.grid,
        &app.dish,
        &app.layout,
        app.config.screen_width,
        app.config.screen_height,
        inner.width,
        inner.height,
    );

    for cell in cells {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            let cell_rect = Rect {
                x,
                y,
                width: 1,
                height: 1,
            };
            let span = Span::styled(cell.char.to_string(), Style::default().fg(cell.color));
            let paragraph = Paragraph::new(Line::from(span));
            frame.render_widget(paragraph, cell_rect);
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(30);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "LIFE IN A PETRI DISH",
            Style::default().fg(BORDER_COLOR),
        )),
        Line::from(""),
        Line::from("Conway's Game of Life runs on a toroidal grid clipped to a circular dish. Only cells whose center lies inside the dish take part: anything outside is never drawn and never counts as a neighbor."),
        Line::from(""),
        Line::from(Span::styled("EDITING:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Click a cell to toggle it, paused or not. The simulation starts paused; press Space to let the dish evolve, Enter to advance a single generation."),
        Line::from(""),
        Line::from(Span::styled("PATTERNS (1-5):", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("1=Block, 2=Blinker, 3=Glider, 4=R-pentomino, 5=Random. Patterns stamp at the dish center; R refills randomly, C clears."),
        Line::from(""),
        Line::from(Span::styled("CAPTURE:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("E writes a PNG of the dish as pixels. G starts/stops an animated GIF of each generation. S saves the dish to the quicksave slot, L loads it back."),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space=Pause, Enter=Step, +/-=Speed, Tab/Arrows=Adjust, V=Fullscreen, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    // Update title to show scroll hint if scrollable
    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
