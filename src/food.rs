use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

use crate::geometry::{Cell, World};

/// Food currently lying on the field. Cells may overlap the snake.
pub type FoodSet = HashSet<Cell>;

/// Spawns one food cell each time a randomized deadline passes.
pub struct FoodScheduler<R: Rng> {
    rng: R,
    spawn_range: RangeInclusive<u32>,
    next_food: Instant,
}

impl<R: Rng> FoodScheduler<R> {
    pub fn new(rng: R, spawn_range: RangeInclusive<u32>, now: Instant) -> Self {
        let mut scheduler = FoodScheduler { rng, spawn_range, next_food: now };
        scheduler.reset(now);
        scheduler
    }

    /// Seconds until the next spawn, in `[min, max + 1)`.
    pub fn sample(&mut self) -> f64 {
        let whole = self.rng.gen_range(self.spawn_range.clone());
        whole as f64 + self.rng.gen::<f64>()
    }

    /// Reschedules from `now`, so time spent paused is never owed.
    pub fn reset(&mut self, now: Instant) {
        let delay = self.sample();
        self.next_food = now + Duration::from_secs_f64(delay);
    }

    /// Spawns at most one cell per call. The deadline advances from the
    /// previous deadline rather than from `now`.
    pub fn tick(&mut self, now: Instant, food: &mut FoodSet, world: World) -> Option<Cell> {
        if now < self.next_food {
            return None;
        }

        let cell = (self.rng.gen_range(0..world.width), self.rng.gen_range(0..world.height));
        food.insert(cell);

        let delay = self.sample();
        self.next_food += Duration::from_secs_f64(delay);

        debug!(x = cell.0, y = cell.1, "food spawned");
        Some(cell)
    }

    pub fn next_food(&self) -> Instant {
        self.next_food
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn scheduler(now: Instant) -> FoodScheduler<StdRng> {
        FoodScheduler::new(StdRng::seed_from_u64(7), 1..=4, now)
    }

    #[test]
    fn sample_stays_in_range() {
        let mut food = scheduler(Instant::now());
        for _ in 0..1000 {
            let s = food.sample();
            assert!(s >= 1.0 && s < 5.0, "sample {} out of range", s);
        }
    }

    #[test]
    fn single_value_range_only_adds_jitter() {
        let mut food = FoodScheduler::new(StdRng::seed_from_u64(1), 2..=2, Instant::now());
        for _ in 0..100 {
            let s = food.sample();
            assert!(s >= 2.0 && s < 3.0);
        }
    }

    #[test]
    fn first_spawn_is_at_least_a_second_away() {
        let start = Instant::now();
        let mut food = scheduler(start);
        let mut set = FoodSet::new();
        let world = World::new(20, 10);

        assert!(food.next_food() >= start + Duration::from_secs(1));
        assert_eq!(food.tick(start, &mut set, world), None);
        assert!(food.tick(start + Duration::from_millis(999), &mut set, world).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn spawns_once_per_elapsed_deadline() {
        let start = Instant::now();
        let mut food = scheduler(start);
        let mut set = FoodSet::new();
        let world = World::new(20, 10);

        let deadline = food.next_food();
        let cell = food.tick(deadline, &mut set, world).unwrap();
        assert!(set.contains(&cell));

        let next = food.next_food();
        assert!(next >= deadline + Duration::from_secs(1));
        assert!(next < deadline + Duration::from_secs(5));

        // Far in the future only one spawn happens per call
        let late = deadline + Duration::from_secs(60);
        food.tick(late, &mut set, world).unwrap();
        assert!(food.next_food() < late);
    }

    #[test]
    fn spawned_cells_stay_inside_the_world() {
        // Sampling uses an exclusive upper bound, so no food lands on an unreachable cell
        let start = Instant::now();
        let mut food = scheduler(start);
        let mut set = FoodSet::new();
        let world = World::new(3, 2);

        let mut now = start;
        for _ in 0..500 {
            now = food.next_food();
            food.tick(now, &mut set, world);
        }
        assert!(now > start);
        assert!(!set.is_empty());
        assert!(set.len() <= world.area());
        assert!(set.iter().all(|c| world.contains(*c)));
    }

    #[test]
    fn duplicate_spawns_collapse() {
        let start = Instant::now();
        let mut food = scheduler(start);
        let mut set = FoodSet::new();
        let world = World::new(1, 1);

        for _ in 0..5 {
            let at = food.next_food();
            assert_eq!(food.tick(at, &mut set, world), Some((0, 0)));
        }
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn reset_measures_from_now() {
        let start = Instant::now();
        let mut food = scheduler(start);
        let later = start + Duration::from_secs(100);
        food.reset(later);
        assert!(food.next_food() >= later + Duration::from_secs(1));
        assert!(food.next_food() < later + Duration::from_secs(5));
    }
}
