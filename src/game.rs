use crate::board::{BOARD_WIDTH, Board};
use crate::config::GameConfig;
use crate::piece::Piece;
use crate::shape::Shape;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;

/// Points per lock by rows cleared, before speed scaling.
pub const LINE_SCORES: [u64; 5] = [0, 100, 300, 500, 800];
pub const SPAWN_X: i32 = BOARD_WIDTH as i32 / 2 - 2;
pub const SPAWN_Y: i32 = 0;

pub fn line_score(rows_cleared: usize, speed_level: u32) -> u64 {
    LINE_SCORES.get(rows_cleared).copied().unwrap_or(0) * u64::from(speed_level)
}

/// One player command, as read from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    MoveLeft,
    MoveRight,
    Rotate,
    FastDrop,
    HardDrop,
    Pause,
}

/// What a gravity tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Step {
    /// Paused; nothing changed.
    Idle,
    /// The piece fell one row.
    Moved,
    /// The piece could not fall and now sits permanently in the board.
    /// Rows are cleared by the following [`Game::settle`] or tick.
    Landed,
    /// Full rows were cleared and scored; a new piece was spawned unless
    /// the game ended.
    Locked { rows_cleared: usize, points: u64 },
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    Falling,
    Locking,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u64,
    pub speed_level: u32, // +1 per locked piece
    pub fall_delay: Duration,
    pub game_over: bool,
    pub lines: u32,
    pub pieces: u32,
}

impl GameState {
    fn new(config: &GameConfig) -> Self {
        GameState {
            score: 0,
            speed_level: 1,
            fall_delay: config.fall_delay,
            game_over: false,
            lines: 0,
            pieces: 0,
        }
    }
}

pub struct Game {
    pub piece: Piece, // active piece, drawn into `board` while falling
    pub board: Board,
    pub state: GameState,
    fast: bool,
    paused: bool,
    landed: bool,
    config: GameConfig,
    rng: StdRng,
}

impl Default for Game {
    fn default() -> Game {
        Game::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Game::with_board(config, Board::default())
    }

    /// Starts on a pre-filled board. The first piece spawns immediately, so
    /// a board blocking the spawn point yields a game that is already over.
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let piece = Self::next_piece(&mut rng);
        let mut game = Game {
            piece,
            board,
            state: GameState::new(&config),
            fast: false,
            paused: false,
            landed: false,
            config,
            rng,
        };
        game.enter_play();
        game
    }

    fn next_piece(rng: &mut StdRng) -> Piece {
        let shape = Shape::random(rng);
        let color = rng.random_range(0..Shape::COUNT as u8);
        Piece::new(shape, color, SPAWN_X, SPAWN_Y)
    }

    // draw the freshly spawned piece, or end the game if it does not fit
    fn enter_play(&mut self) {
        if self.board.can_place(&self.piece) {
            self.board.place(&self.piece);
        } else {
            self.state.game_over = true;
        }
    }

    fn spawn(&mut self) {
        self.piece = Self::next_piece(&mut self.rng);
        self.enter_play();
    }

    pub fn phase(&self) -> Phase {
        if self.state.game_over {
            Phase::GameOver
        } else if self.landed {
            Phase::Locking
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Falling
        }
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    pub fn is_fast_dropping(&self) -> bool {
        self.fast
    }

    /// Time to wait before the next tick.
    pub fn delay(&self) -> Duration {
        if self.fast {
            self.config.fast_drop_delay
        } else {
            self.state.fall_delay
        }
    }

    /// One gravity step: fall a row or land. A tick on a landed piece
    /// settles it.
    pub fn tick(&mut self) -> Step {
        match self.phase() {
            Phase::GameOver => return Step::GameOver,
            Phase::Locking => return self.settle(),
            Phase::Paused => return Step::Idle,
            Phase::Falling => {}
        }
        self.board.clear(&self.piece);
        if self.board.can_move_down(&self.piece) {
            self.piece.y += 1;
            self.board.place(&self.piece);
            Step::Moved
        } else {
            self.board.place(&self.piece);
            self.landed = true;
            Step::Landed
        }
    }

    /// Clears full rows after a landing, scores them, advances the speed
    /// curve and spawns the next piece. Idle when nothing has landed.
    pub fn settle(&mut self) -> Step {
        if !self.landed {
            return Step::Idle;
        }
        self.landed = false;
        let rows_cleared = self.board.clear_full_rows();
        let points = line_score(rows_cleared, self.state.speed_level);
        let state = &mut self.state;
        state.score += points;
        state.lines += rows_cleared as u32;
        state.pieces += 1;
        state.speed_level += 1;
        state.fall_delay = self.config.next_fall_delay(state.fall_delay);
        self.spawn();
        Step::Locked {
            rows_cleared,
            points,
        }
    }

    /// Applies the command polled this tick; `None` means no key was
    /// pressed, which releases fast drop. Returns false on quit.
    pub fn apply(&mut self, command: Option<Command>) -> bool {
        let Some(command) = command else {
            self.fast = false;
            return true;
        };
        match (self.phase(), command) {
            (_, Command::Quit) => return false,
            (Phase::GameOver | Phase::Locking, _) => {}
            (_, Command::Pause) => self.paused = !self.paused,
            (Phase::Paused, _) => {}
            (_, Command::MoveLeft) => {
                self.board.clear(&self.piece);
                if self.board.can_move_left(&self.piece) {
                    self.piece.x -= 1;
                }
                self.board.place(&self.piece);
            }
            (_, Command::MoveRight) => {
                self.board.clear(&self.piece);
                if self.board.can_move_right(&self.piece) {
                    self.piece.x += 1;
                }
                self.board.place(&self.piece);
            }
            (_, Command::Rotate) => {
                self.board.clear(&self.piece);
                self.piece.rotate();
                if !self.board.can_place(&self.piece) {
                    self.piece.rotate_back();
                }
                self.board.place(&self.piece);
            }
            (_, Command::FastDrop) => self.fast = true,
            (_, Command::HardDrop) => {
                self.board.clear(&self.piece);
                while self.board.can_move_down(&self.piece) {
                    self.piece.y += 1;
                }
                self.board.place(&self.piece);
            }
        }
        true
    }
}
