//! Snake on a toroidal grid: the fixed-tick simulation plus a crossterm front end.

pub mod config;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod snake;
pub mod term;

pub use config::GameConfig;
pub use game::{GameSession, GameState, SnakeGame};
pub use geometry::{Cell, Direction, World};
pub use input::{InputBuffer, InputEvent, InputSource, Key};
pub use render::{Color, RenderSink};
