//! Falling-block puzzle engine: a 20x10 well, the seven tetrominos, gravity,
//! row clears and an accelerating speed curve. Rendering, input and timing
//! belong to the caller; see `main.rs` for the terminal front end.

pub mod board;
pub mod config;
pub mod game;
pub mod piece;
pub mod shape;

pub use board::{BOARD_HEIGHT, BOARD_WIDTH, Board};
pub use config::{ConfigError, GameConfig};
pub use game::{Command, Game, GameState, Phase, Step};
pub use piece::Piece;
pub use shape::{Matrix, Shape, shape_count, shape_template};
