use crate::food::FoodSet;
use crate::geometry::{add_vectors, Cell, Direction, World};
use MoveResult::*;

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Cell, ate_food: Option<Cell> },
    Crashed,
}

/// Ordered body segments, head first.
#[derive(Clone, Debug)]
pub struct Snake {
    body: Vec<Cell>,
    spare_parts: usize,
}

impl Snake {
    /// Builds a vertical snake with its head at `head` and its tail trailing downwards.
    pub fn new(head: Cell, size: usize, world: World) -> Self {
        let body = (0..size.max(1) as i32)
            .map(|i| world.wrap((head.0, head.1 + i)))
            .collect();
        Snake { body, spare_parts: 0 }
    }

    pub fn from_body(body: Vec<Cell>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least a head");
        Snake { body, spare_parts: 0 }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn spare_parts(&self) -> usize {
        self.spare_parts
    }

    /// Queues growth. Each queued part is added on a later move, one per move.
    pub fn grow(&mut self, parts: usize) {
        self.spare_parts += parts;
    }

    pub fn move_step(&mut self, direction: Direction, world: World, food: &FoodSet) -> MoveResult {
        let old_tail = self.body[self.body.len() - 1];
        let old_head = self.body[0];

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let new_head = world.wrap(add_vectors(old_head, direction.vector()));
        self.body[0] = new_head;

        if self.body[1..].contains(&new_head) {
            return Crashed;
        }

        if self.spare_parts > 0 {
            self.body.push(old_tail);
            self.spare_parts -= 1;
        }

        let ate_food = if food.contains(&new_head) { Some(new_head) } else { None };
        Moved { new_head, ate_food }
    }
}
