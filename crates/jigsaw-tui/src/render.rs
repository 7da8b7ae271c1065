use crate::app::{App, Focus, ScreenState};
use crate::celebration::hue_to_rgb;
use crate::layout::{SLOT_SIZE, TRAY_CELL_SIZE};
use crate::theme::Theme;
use crate::thumbnail::{Thumbnail, UPPER_HALF};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use jigsaw_core::{GridLayout, PIECE_COUNT};
use std::io;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;
    app.resize(term_width, term_height);

    execute!(stdout, Hide)?;

    match app.screen_state {
        // Confetti redraws every cell, no need to clear
        ScreenState::Win => render_win_screen(stdout, app, term_width, term_height)?,
        ScreenState::Ready | ScreenState::Playing => {
            execute!(
                stdout,
                SetBackgroundColor(app.theme.bg),
                Clear(ClearType::All)
            )?;
            render_game_screen(stdout, app, term_width)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(stdout: &mut io::Stdout, app: &mut App, term_width: u16) -> io::Result<()> {
    let layout = app.layout.clone();
    let (px, py) = layout.preview;

    render_title(stdout, &app.theme, term_width)?;

    execute!(
        stdout,
        MoveTo(px, py.saturating_sub(1)),
        SetBackgroundColor(app.theme.bg),
        SetForegroundColor(app.theme.info),
        Print("Preview")
    )?;
    render_thumbnail(stdout, &app.thumbnails.preview, px, py)?;

    render_board(stdout, app, &layout.board)?;
    render_tray(stdout, app, &layout.tray)?;
    render_info_panel(stdout, app, layout.info.0, layout.info.1)?;
    render_controls(stdout, app, px, layout.controls_y)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, &app.theme, msg, term_width, layout.controls_y + 3)?;
    }

    Ok(())
}

fn render_title(stdout: &mut io::Stdout, theme: &Theme, term_width: u16) -> io::Result<()> {
    let title = "PICTURE PUZZLE";
    execute!(
        stdout,
        MoveTo(term_width.saturating_sub(title.len() as u16) / 2, 0),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.fg),
        Print(title)
    )
}

fn render_board(stdout: &mut io::Stdout, app: &App, grid: &GridLayout) -> io::Result<()> {
    let theme = &app.theme;
    let board = app.orchestrator.session().board();

    execute!(
        stdout,
        MoveTo(grid.x as u16, (grid.y as u16).saturating_sub(1)),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.info),
        Print(format!("Board  {}/{} placed", board.placed_count(), PIECE_COUNT))
    )?;

    for slot in 0..PIECE_COUNT {
        let Some(rect) = grid.cell_rect(slot) else {
            continue;
        };
        let (x, y) = (rect.x as u16, rect.y as u16);

        match board.get(slot).and_then(|piece| app.thumbnails.board(piece.id())) {
            Some(thumb) => render_thumbnail(stdout, thumb, x, y)?,
            None => render_empty_cell(stdout, theme, x, y, SLOT_SIZE, &(slot + 1).to_string())?,
        }
    }

    if let Some(slot) = app.orchestrator.highlight() {
        if let Some(rect) = grid.cell_rect(slot) {
            render_outline(stdout, rect.x as u16, rect.y as u16, SLOT_SIZE, theme.highlight)?;
        }
    }
    if app.screen_state == ScreenState::Playing && app.focus == Focus::Board {
        if let Some(rect) = grid.cell_rect(app.board_cursor) {
            render_outline(stdout, rect.x as u16, rect.y as u16, SLOT_SIZE, theme.cursor)?;
        }
    }

    Ok(())
}

fn render_tray(stdout: &mut io::Stdout, app: &mut App, grid: &GridLayout) -> io::Result<()> {
    let order = app.tray_order();
    let held = app.orchestrator.dragged_piece();
    let theme = &app.theme;

    execute!(
        stdout,
        MoveTo(grid.x as u16, (grid.y as u16).saturating_sub(1)),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.info),
        Print(format!("Tray  {} left", order.len()))
    )?;

    for index in 0..PIECE_COUNT {
        let Some(rect) = grid.cell_rect(index) else {
            continue;
        };
        let (x, y) = (rect.x as u16, rect.y as u16);

        let piece = order.get(index).copied();
        match piece.and_then(|id| app.thumbnails.tray(id)) {
            // The held piece leaves a gap where it was
            Some(_) if piece == held => render_empty_cell(stdout, theme, x, y, TRAY_CELL_SIZE, "·")?,
            Some(thumb) => render_thumbnail(stdout, thumb, x, y)?,
            None => render_empty_cell(stdout, theme, x, y, TRAY_CELL_SIZE, "")?,
        }
    }

    if app.screen_state == ScreenState::Playing && app.focus == Focus::Tray {
        if let Some(rect) = grid.cell_rect(app.tray_cursor) {
            render_outline(stdout, rect.x as u16, rect.y as u16, TRAY_CELL_SIZE, theme.cursor)?;
        }
    }

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = app.orchestrator.session();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let (status, color) = if session.is_complete() {
        ("Complete!", theme.success)
    } else if session.is_started() {
        ("In progress", theme.fg)
    } else {
        ("Press Enter to start", theme.key)
    };
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.info),
        Print("Status: "),
        SetForegroundColor(color),
        Print(status)
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 1),
        SetForegroundColor(theme.info),
        Print(format!("Correct: {}/{}", session.board().correct_count(), PIECE_COUNT))
    )?;

    if let (Some(piece), Some(label)) = (app.orchestrator.dragged_piece(), app.holding_label()) {
        execute!(
            stdout,
            MoveTo(x, y + 3),
            SetForegroundColor(theme.highlight),
            Print(&label)
        )?;
        if let Some(thumb) = app.thumbnails.tray(piece) {
            render_thumbnail(stdout, thumb, x, y + 4)?;
        }
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    let rows: &[&[(&str, &str)]] = match app.screen_state {
        ScreenState::Ready => &[&[("Enter", "start"), ("t", "theme"), ("q", "quit")]],
        _ => &[
            &[("←↑↓→/hjkl", "move"), ("Tab", "tray/board"), ("Enter", "pick up/drop")],
            &[("Esc", "cancel"), ("x", "unplace"), ("r", "restart"), ("t", "theme"), ("q", "quit")],
        ],
    };

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    for (i, row) in rows.iter().enumerate() {
        execute!(stdout, MoveTo(x, y + i as u16))?;
        for (key, action) in row.iter() {
            execute!(
                stdout,
                SetForegroundColor(theme.key),
                Print(key),
                SetForegroundColor(theme.info),
                Print(format!(" {}  ", action))
            )?;
        }
    }

    Ok(())
}

fn render_message(stdout: &mut io::Stdout, theme: &Theme, msg: &str, term_width: u16, y: u16) -> io::Result<()> {
    let text = format!(" {} ", msg);
    let x = term_width.saturating_sub(text.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.message_bg),
        SetForegroundColor(theme.fg),
        Print(text),
        SetBackgroundColor(theme.bg)
    )
}

/// Draw a thumbnail with its top-left corner at (`x`, `y`)
fn render_thumbnail(stdout: &mut io::Stdout, thumb: &Thumbnail, x: u16, y: u16) -> io::Result<()> {
    for row in 0..thumb.rows() {
        execute!(stdout, MoveTo(x, y + row))?;
        for col in 0..thumb.cols() {
            if let Some((upper, lower)) = thumb.cell(col, row) {
                execute!(
                    stdout,
                    SetForegroundColor(upper),
                    SetBackgroundColor(lower),
                    Print(UPPER_HALF)
                )?;
            }
        }
    }
    Ok(())
}

fn render_empty_cell(
    stdout: &mut io::Stdout,
    theme: &Theme,
    x: u16,
    y: u16,
    (width, height): (u16, u16),
    label: &str,
) -> io::Result<()> {
    let blank = " ".repeat(width as usize);
    execute!(stdout, SetBackgroundColor(theme.slot_bg))?;
    for row in 0..height {
        execute!(stdout, MoveTo(x, y + row), Print(&blank))?;
    }
    if !label.is_empty() {
        let label_x = x + width.saturating_sub(label.chars().count() as u16) / 2;
        execute!(
            stdout,
            MoveTo(label_x, y + height / 2),
            SetForegroundColor(theme.border),
            Print(label)
        )?;
    }
    execute!(stdout, SetBackgroundColor(theme.bg))
}

/// Box drawn in the gap around a cell
fn render_outline(stdout: &mut io::Stdout, x: u16, y: u16, (width, height): (u16, u16), color: Color) -> io::Result<()> {
    let left = x.saturating_sub(1);
    let horizontal = "─".repeat(width as usize);

    execute!(
        stdout,
        SetForegroundColor(color),
        MoveTo(left, y.saturating_sub(1)),
        Print(format!("┌{}┐", horizontal)),
        MoveTo(left, y + height),
        Print(format!("└{}┘", horizontal))
    )?;
    for row in 0..height {
        execute!(
            stdout,
            MoveTo(left, y + row),
            Print("│"),
            MoveTo(x + width, y + row),
            Print("│")
        )?;
    }
    Ok(())
}

fn render_win_screen(stdout: &mut io::Stdout, app: &mut App, term_width: u16, term_height: u16) -> io::Result<()> {
    let bg_base = Color::Rgb { r: 8, g: 12, b: 20 };

    execute!(stdout, SetBackgroundColor(bg_base), Clear(ClearType::All))?;

    // The finished picture at board size, centered
    let board_width = SLOT_SIZE.0 * 3;
    let board_height = SLOT_SIZE.1 * 3;
    let origin_x = term_width.saturating_sub(board_width) / 2;
    let origin_y = term_height.saturating_sub(board_height) / 2 + 1;
    for slot in 0..PIECE_COUNT {
        let piece = app.orchestrator.session().board().get(slot).map(|p| p.id());
        if let Some(thumb) = piece.and_then(|id| app.thumbnails.board(id)) {
            let x = origin_x + (slot % 3) as u16 * SLOT_SIZE.0;
            let y = origin_y + (slot / 3) as u16 * SLOT_SIZE.1;
            render_thumbnail(stdout, thumb, x, y)?;
        }
    }

    for particle in app.win_screen.particles() {
        if particle.is_visible(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(particle.x as u16, particle.y as u16),
                SetForegroundColor(particle.color),
                SetBackgroundColor(bg_base),
                Print(particle.char)
            )?;
        }
    }

    let message = app.win_screen.current_message();
    let hue = (app.win_screen.rainbow_offset() * 0.5) % 1.0;
    execute!(
        stdout,
        MoveTo(term_width.saturating_sub(message.len() as u16) / 2, origin_y.saturating_sub(2)),
        SetForegroundColor(hue_to_rgb(hue)),
        SetBackgroundColor(bg_base),
        Print(message)
    )?;

    let hint = "Enter play again · Esc view board · q quit";
    // Blink the hint once a second
    if app.win_screen.frame_count() % 30 < 22 {
        execute!(
            stdout,
            MoveTo(
                term_width.saturating_sub(hint.chars().count() as u16) / 2,
                (origin_y + board_height + 1).min(term_height.saturating_sub(1))
            ),
            SetForegroundColor(app.theme.info),
            Print(hint)
        )?;
    }

    Ok(())
}

