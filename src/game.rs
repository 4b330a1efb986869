use std::{thread::sleep, time::{Duration, Instant}};

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::food::{FoodScheduler, FoodSet};
use crate::geometry::World;
use crate::input::{InputBuffer, InputEvent::{self, *}, InputSource, Key};
use crate::render::{RenderSink, FOOD_COLOR, SNAKE_COLOR, SNAKE_HEAD_COLOR, WORLD_COLOR};
use crate::snake::{MoveResult::*, Snake};

const IDLE_SLEEP: Duration = Duration::from_millis(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    GameOver,
}

/// All mutable state of one game. Time is always passed in by the caller.
pub struct GameSession<R: Rng> {
    world: World,
    parts_after_food: usize,
    interval: Duration,
    state: GameState,
    snake: Snake,
    food: FoodSet,
    input: InputBuffer,
    scheduler: FoodScheduler<R>,
    next_frame: Instant,
}

impl<R: Rng> GameSession<R> {
    pub fn new(config: &GameConfig, world: World, rng: R, now: Instant) -> Self {
        let snake = Snake::new(world.center(), config.initial_length, world);
        info!(width = world.width, height = world.height, length = snake.len(), "session started");

        GameSession {
            world,
            parts_after_food: config.parts_after_food,
            interval: config.tick_interval(),
            state: GameState::Running,
            snake,
            food: FoodSet::new(),
            input: InputBuffer::new(),
            scheduler: FoodScheduler::new(rng, config.food_interval.clone(), now),
            next_frame: now,
        }
    }

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        if self.state == GameState::GameOver {
            return;
        }

        match event {
            Quit | KeyDown(Key::Escape) => {
                info!(score = self.score(), "quit requested");
                self.state = GameState::GameOver;
            }
            KeyDown(Key::Pause) => self.toggle_pause(now),
            KeyDown(Key::Move(dir)) => self.input.on_press(dir),
            KeyUp(dir) => self.input.on_release(dir),
        }
    }

    /// Runs the food timer and, if the frame deadline passed, one simulation tick.
    /// Returns true when the tick left something new to draw.
    pub fn step(&mut self, now: Instant) -> bool {
        if self.state != GameState::Running {
            return false;
        }

        self.scheduler.tick(now, &mut self.food, self.world);

        if now < self.next_frame {
            return false;
        }
        // Fixed step: falls behind under load instead of skipping ticks
        self.next_frame += self.interval;

        let direction = self.input.effective_direction();
        match self.snake.move_step(direction, self.world, &self.food) {
            Crashed => {
                info!(score = self.score(), "snake crashed into itself");
                self.state = GameState::GameOver;
                return false;
            }
            Moved { ate_food: Some(cell), .. } => {
                self.food.remove(&cell);
                self.snake.grow(self.parts_after_food);
                debug!(x = cell.0, y = cell.1, pending = self.snake.spare_parts(), "food eaten");
            }
            Moved { .. } => {}
        }

        true
    }

    pub fn render<S: RenderSink>(&self, sink: &mut S) -> anyhow::Result<()> {
        sink.clear(WORLD_COLOR)?;

        for &(x, y) in self.snake.body() {
            sink.set_cell(x, y, SNAKE_COLOR)?;
        }

        let (hx, hy) = self.snake.head();
        sink.set_cell(hx, hy, SNAKE_HEAD_COLOR)?;

        for &(x, y) in &self.food {
            sink.set_cell(x, y, FOOD_COLOR)?;
        }

        sink.present()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> usize {
        self.snake.len()
    }

    pub fn world(&self) -> World {
        self.world
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &FoodSet {
        &self.food
    }

    fn toggle_pause(&mut self, now: Instant) {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            _ => GameState::Running,
        };

        // Nothing is owed for the time spent paused
        self.scheduler.reset(now);
        self.next_frame = now;

        info!(state = ?self.state, "pause toggled");
    }
}

/// Drives a session against a terminal that is both the input source and the render sink.
pub struct SnakeGame<T, R: Rng> {
    term: T,
    session: GameSession<R>,
}

impl<T: InputSource + RenderSink, R: Rng> SnakeGame<T, R> {
    pub fn new(term: T, session: GameSession<R>) -> Self {
        SnakeGame { term, session }
    }

    /// Plays until the game ends, shows the summary and waits for the player to leave.
    /// Returns the final score.
    pub fn play(&mut self) -> anyhow::Result<usize> {
        self.session.render(&mut self.term)?;

        loop {
            for ev in self.term.poll_events()? {
                self.session.handle_event(ev, Instant::now());
            }

            if self.session.state() == GameState::GameOver {
                break;
            }

            if self.session.step(Instant::now()) {
                self.session.render(&mut self.term)?;
            } else {
                sleep(IDLE_SLEEP);
            }
        }

        let score = self.session.score();
        self.game_over(score)?;
        Ok(score)
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn term_mut(&mut self) -> &mut T {
        &mut self.term
    }

    pub fn into_term(self) -> T {
        self.term
    }

    fn game_over(&mut self, score: usize) -> anyhow::Result<()> {
        self.term.show_summary(&[
            "Game Over!",
            &*format!("Score: {}", score),
            "",
            "Press Esc to exit",
        ])?;

        loop {
            match self.term.wait_event()? {
                Quit | KeyDown(Key::Escape) => return Ok(()),
                _ => {}
            }
        }
    }
}
