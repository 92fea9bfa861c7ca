use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    QueueableCommand, cursor,
    event::{Event, KeyCode, KeyEvent, KeyEventKind, poll, read},
    style::{self, Stylize},
    terminal,
};
use std::io::{Write, stdout};
use std::{thread, time::Duration};

use wellblocks::{BOARD_HEIGHT, BOARD_WIDTH, Command, Game, GameConfig, Phase, Shape, Step};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Initial gravity interval in microseconds [default: 250000]
    #[clap(long)]
    fall_delay_us: Option<u64>,
    /// Fastest gravity interval in microseconds [default: 50000]
    #[clap(long)]
    min_fall_delay_us: Option<u64>,
    /// Interval while fast drop is held, in microseconds [default: 50000]
    #[clap(long)]
    fast_drop_delay_us: Option<u64>,
    /// Gravity interval kept after each lock, in percent [default: 97]
    #[clap(long)]
    decay_percent: Option<u32>,
    /// Seed for a reproducible piece sequence
    #[clap(long)]
    seed: Option<u64>,
    /// Print the shape catalog and exit
    #[clap(long, default_value_t = false)]
    show_shapes: bool,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let d = GameConfig::default();
        GameConfig {
            fall_delay: self
                .fall_delay_us
                .map_or(d.fall_delay, Duration::from_micros),
            min_fall_delay: self
                .min_fall_delay_us
                .map_or(d.min_fall_delay, Duration::from_micros),
            fast_drop_delay: self
                .fast_drop_delay_us
                .map_or(d.fast_drop_delay, Duration::from_micros),
            decay_percent: self.decay_percent.unwrap_or(d.decay_percent),
            seed: self.seed,
        }
    }
}

// last clear, shown in the side panel
#[derive(Default)]
struct Hud {
    rows_cleared: usize,
    points: u64,
}

fn key_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Rotate),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::FastDrop),
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('p') => Some(Command::Pause),
        _ => None,
    }
}

fn centered_x(s: &str) -> u16 {
    let leftedge: u16 = 2 * BOARD_WIDTH as u16 + 5;
    let n = u16::try_from(s.len()).unwrap_or(u16::MAX);

    match terminal::size() {
        Ok((cols, _rows)) if cols >= leftedge.saturating_add(n) => {
            (cols - leftedge - n) / 2 + leftedge
        }
        _ => leftedge,
    }
}

fn render_game_info(g: &Game, hud: &Hud) -> Result<()> {
    let title = "Wellblocks";
    crossterm::queue!(
        stdout(),
        cursor::MoveTo(centered_x(title), 1),
        style::PrintStyledContent(title.cyan()),
    )?;

    let i = centered_x("Controls: a/d move, w rotate");
    let lines = [
        format!("Score : {:<10}", g.state.score),
        format!("Speed : {:<10}", g.state.speed_level),
        format!("Lines : {:<10}", g.state.lines),
        format!("Pieces: {:<10}", g.state.pieces),
        format!("Last  : {} rows, +{:<8}", hud.rows_cleared, hud.points),
    ];
    for (row, line) in (3..).zip(lines) {
        crossterm::queue!(
            stdout(),
            cursor::MoveTo(i, row),
            style::PrintStyledContent(line.bold().white()),
        )?;
    }

    let controls = [
        "Controls:",
        "  a/Left : move left",
        "  d/Right: move right",
        "  w/Up   : rotate",
        "  s/Down : fast drop (hold)",
        "  Space  : hard drop",
        "  p      : pause",
        "  q      : quit",
    ];
    for (row, line) in (9..).zip(controls) {
        crossterm::queue!(
            stdout(),
            cursor::MoveTo(i, row),
            style::PrintStyledContent(line.white()),
        )?;
    }

    let status = match g.phase() {
        Phase::Falling | Phase::Locking => String::new(),
        Phase::Paused => "Paused".to_string(),
        Phase::GameOver => format!("Game over! Your score is: {}", g.state.score),
    };
    crossterm::queue!(
        stdout(),
        cursor::MoveTo(i, 18),
        terminal::Clear(terminal::ClearType::UntilNewLine),
        style::PrintStyledContent(status.bold().yellow()),
    )?;
    Ok(())
}

fn draw_screen(g: &Game, hud: &Hud) -> Result<()> {
    let mut stdout = stdout();

    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            crossterm::queue!(stdout, cursor::MoveTo(x as u16 * 2 + 1, y as u16 + 1))?;
            let s = match g.board.get(x, y) {
                0 => "  ".white(),
                1 => "  ".on_cyan(),
                2 => "  ".on_yellow(),
                3 => "  ".on_magenta(),
                4 => "  ".on_blue(),
                5 => "  ".on_green(),
                6 => "  ".on_white(),
                _ => "  ".on_red(),
            };
            crossterm::queue!(stdout, style::PrintStyledContent(s))?
        }
    }
    render_game_info(g, hud)?;
    stdout.flush().context("flushing frame")
}

/// What one poll of the input source produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polled {
    /// No pending event; releases fast drop.
    Empty,
    Command(Command),
    /// A key or terminal event with no binding; leaves fast drop alone.
    Unmapped,
}

fn classify(event: &Event) -> Polled {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => key_command(*code).map_or(Polled::Unmapped, Polled::Command),
        _ => Polled::Unmapped,
    }
}

fn poll_input() -> Result<Polled> {
    if !poll(Duration::ZERO)? {
        return Ok(Polled::Empty);
    }
    Ok(classify(&read()?))
}

fn wait_for_quit() -> Result<()> {
    while classify(&read()?) != Polled::Command(Command::Quit) {}
    Ok(())
}

fn runloop(g: &mut Game) -> Result<()> {
    let mut hud = Hud::default();
    draw_screen(g, &hud)?;
    loop {
        if g.is_over() {
            draw_screen(g, &hud)?;
            return wait_for_quit();
        }
        let landed = g.tick().is_landed();
        draw_screen(g, &hud)?;
        if landed {
            if let Step::Locked {
                rows_cleared,
                points,
            } = g.settle()
                && rows_cleared > 0
            {
                hud = Hud {
                    rows_cleared,
                    points,
                };
            }
            draw_screen(g, &hud)?;
        }
        if g.is_over() {
            continue;
        }

        thread::sleep(g.delay());
        match poll_input()? {
            Polled::Empty => {
                g.apply(None);
            }
            Polled::Command(command) => {
                if !g.apply(Some(command)) {
                    return Ok(());
                }
                draw_screen(g, &hud)?;
            }
            Polled::Unmapped => {}
        }
    }
}

// frame of the well: a ruled top and bottom with columns at both edges
fn draw_border(width: u16, height: u16) -> Result<()> {
    let rule = "\u{2501}".repeat(usize::from(width.saturating_sub(1)));
    let top = format!("\u{250f}{rule}\u{2513}");
    let bottom = format!("\u{2517}{rule}\u{251b}");
    let mut stdout = stdout();

    stdout
        .queue(terminal::Clear(terminal::ClearType::All))?
        .queue(cursor::MoveTo(0, 0))?
        .queue(style::PrintStyledContent(top.white()))?;
    for y in 1..height {
        for x in [0, width] {
            crossterm::queue!(
                stdout,
                cursor::MoveTo(x, y),
                style::PrintStyledContent("\u{2503}".white())
            )?;
        }
    }
    stdout
        .queue(cursor::MoveTo(0, height))?
        .queue(style::PrintStyledContent(bottom.white()))?;
    stdout.flush().context("drawing well border")
}

fn enter_terminal() -> Result<()> {
    crossterm::queue!(
        stdout(),
        style::ResetColor,
        terminal::Clear(terminal::ClearType::All),
        terminal::EnterAlternateScreen,
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    terminal::enable_raw_mode().context("enabling raw mode")
}

fn leave_terminal() -> Result<()> {
    crossterm::queue!(
        stdout(),
        style::ResetColor,
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show,
        cursor::MoveTo(0, 0)
    )?;
    stdout().flush()?;
    terminal::disable_raw_mode().context("disabling raw mode")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.show_shapes {
        for shape in Shape::all() {
            print!("{shape}");
        }
        return Ok(());
    }

    let config = cli.config();
    config.validate().context("invalid game settings")?;
    let mut game = Game::new(config);

    enter_terminal()?;
    let result = draw_border(2 * BOARD_WIDTH as u16 + 1, BOARD_HEIGHT as u16 + 1)
        .and_then(|()| runloop(&mut game));
    // restore the terminal even when the loop failed
    let restored = leave_terminal();
    result?;
    restored?;

    println!(
        "Score: {}; Speed: {}; Lines: {}",
        game.state.score, game.state.speed_level, game.state.lines
    );
    Ok(())
}
