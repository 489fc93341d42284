//! The simulation engine: owns the grid, runs generations, and decides
//! when the next one is due.
//!
//! RULES:
//!   - The engine is the only owner of the grid. Callers get `&Grid` or a
//!     copied `SimSnapshot`, never a mutable handle.
//!   - Commands and ticks both go through `&mut self`, so they never
//!     overlap. A slow step delays the next tick; it never runs beside it.
//!   - `total_alive` always equals the number of live cells.
//!   - Pausing cancels the armed tick. Nothing but `resume` re-arms a paused
//!     engine.

use crate::{
    clock::SimClock,
    command::Command,
    config::EngineConfig,
    error::{SimError, SimResult},
    grid::{clamp_dimension, Grid},
    rng::SoupRng,
    scheduler::{ScheduledTick, Scheduler},
    snapshot::SimSnapshot,
    step::{step_outcome, step_parallel, StepOutcome},
    types::{Millis, DEFAULT_COLOR},
};
use std::time::Instant;

/// Owns one grid and everything needed to step it on a schedule.
pub struct SimEngine {
    grid:               Grid,
    clock:              SimClock,
    scheduler:          Scheduler,
    /// Latest time seen from the driver, in the driver's milliseconds.
    now_ms:             Millis,
    total_alive:        u32,
    total_births:       u64,
    total_deaths:       u64,
    parallel_threshold: usize,
    color:              String,
}

impl SimEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let mut grid = Grid::new(config.grid_width(), config.grid_height());
        if let Some(seed) = config.seed {
            grid.randomize(&mut SoupRng::new(seed), config.soup_density());
        }

        let mut engine = Self {
            total_alive: grid.alive_count(),
            grid,
            clock: SimClock::new(config.interval(), config.start_paused),
            scheduler: Scheduler::new(),
            now_ms: 0,
            total_births: 0,
            total_deaths: 0,
            parallel_threshold: config.parallel_threshold,
            color: DEFAULT_COLOR.to_string(),
        };
        if !engine.clock.paused {
            engine.scheduler.arm(0, engine.clock.interval_ms);
        }
        log::info!(
            "engine ready: {}x{} grid, {} alive, interval={}ms, paused={}",
            engine.grid.width(),
            engine.grid.height(),
            engine.total_alive,
            engine.clock.interval_ms,
            engine.clock.paused
        );
        engine
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn grid(&self) -> &Grid            { &self.grid }
    pub fn clock(&self) -> &SimClock       { &self.clock }
    pub fn total_alive(&self) -> u32       { self.total_alive }
    pub fn is_paused(&self) -> bool        { self.clock.paused }
    pub fn interval_ms(&self) -> u32       { self.clock.interval_ms }
    pub fn now_ms(&self) -> Millis         { self.now_ms }
    pub fn color(&self) -> &str            { &self.color }

    /// The armed tick, if the engine is running.
    pub fn pending_tick(&self) -> Option<ScheduledTick> {
        self.scheduler.pending()
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            width:                 self.grid.width(),
            height:                self.grid.height(),
            cells:                 self.grid.to_rows(),
            generation:            self.clock.generation,
            total_alive:           self.total_alive,
            dead_count:            (self.grid.area() as u32).saturating_sub(self.total_alive),
            last_step_duration_ms: self.clock.last_step_duration_ms,
            total_simulated_ms:    self.clock.total_simulated_ms,
            total_births:          self.total_births,
            total_deaths:          self.total_deaths,
            paused:                self.clock.paused,
            interval_ms:           self.clock.interval_ms,
            color:                 self.color.clone(),
        }
    }

    // ── Commands ──────────────────────────────────────────────

    /// Execute one command and return the resulting state.
    pub fn apply(&mut self, command: Command) -> SimResult<SimSnapshot> {
        match command {
            Command::ToggleCell { x, y }          => { self.toggle_cell(x, y)?; }
            Command::Resize { width, height }     => self.resize(width, height),
            Command::Reset                        => self.reset(),
            Command::Randomize { density, seed }  => self.randomize(density, seed)?,
            Command::Pause                        => self.pause(),
            Command::Resume                       => self.resume(),
            Command::Step                         => { self.step_once(); }
            Command::SetInterval { ms }           => { self.set_interval(ms); }
            Command::SetColor { color }           => self.set_color(color),
        }
        Ok(self.snapshot())
    }

    /// Flip one cell. Out-of-range coordinates leave everything untouched.
    pub fn toggle_cell(&mut self, x: i64, y: i64) -> SimResult<bool> {
        let alive = self.grid.toggle(x, y).inspect_err(|e| {
            log::warn!("toggle rejected: {e}");
        })?;
        if alive {
            self.total_alive += 1;
        } else {
            self.total_alive -= 1;
        }
        log::debug!("cell ({x}, {y}) -> {}", if alive { "alive" } else { "dead" });
        Ok(alive)
    }

    /// Replace the grid with an all-dead one of the new size and rewind to
    /// generation 0. Pause state and cadence are unchanged.
    pub fn resize(&mut self, width: i64, height: i64) {
        let (width, height) = (clamp_dimension(width), clamp_dimension(height));
        self.replace_grid(Grid::new(width, height));
        log::info!("grid resized to {width}x{height}; generation reset");
    }

    /// Clear every cell at the current size and rewind to generation 0.
    pub fn reset(&mut self) {
        self.replace_grid(Grid::new(self.grid.width(), self.grid.height()));
        log::info!("grid reset");
    }

    /// Seeded random soup at the current size; rewinds like `reset`.
    pub fn randomize(&mut self, density: f64, seed: u64) -> SimResult<()> {
        if !(0.0..=1.0).contains(&density) {
            log::warn!("randomize rejected: density {density}");
            return Err(SimError::InvalidDensity(density));
        }
        let mut grid = Grid::new(self.grid.width(), self.grid.height());
        grid.randomize(&mut SoupRng::new(seed), density);
        self.replace_grid(grid);
        log::info!("randomized with seed={seed} density={density}: {} alive", self.total_alive);
        Ok(())
    }

    fn replace_grid(&mut self, grid: Grid) {
        self.total_alive = grid.alive_count();
        self.grid = grid;
        self.total_births = 0;
        self.total_deaths = 0;
        self.clock.rewind();
    }

    pub fn pause(&mut self) {
        if self.clock.paused {
            return;
        }
        self.clock.pause();
        self.scheduler.cancel();
        log::info!("paused at generation {}", self.clock.generation);
    }

    /// Resume stepping. The first tick comes one full interval from now.
    pub fn resume(&mut self) {
        if !self.clock.paused {
            return;
        }
        self.clock.resume();
        self.scheduler.arm(self.now_ms, self.clock.interval_ms);
        log::info!("resumed at generation {}", self.clock.generation);
    }

    /// Change the cadence. A running engine re-arms so the new interval
    /// counts from now; a paused one stays paused.
    pub fn set_interval(&mut self, ms: i64) -> u32 {
        let interval = self.clock.set_interval(ms);
        if !self.clock.paused {
            self.scheduler.arm(self.now_ms, interval);
        }
        log::info!("interval set to {interval}ms");
        interval
    }

    /// Cosmetic only. Stored so snapshots can echo it back.
    pub fn set_color(&mut self, color: String) {
        log::debug!("color set to {color}");
        self.color = color;
    }

    /// Run exactly one generation while paused. Ignored while running,
    /// where the schedule owns stepping.
    pub fn step_once(&mut self) -> bool {
        if !self.clock.paused {
            log::warn!("manual step ignored while running");
            return false;
        }
        self.run_step();
        true
    }

    // ── Scheduling ────────────────────────────────────────────

    /// Tell the engine what time it is without stepping. Drivers call this
    /// before applying a command so that `resume` and `set_interval` arm
    /// from the real present. Time never moves backwards.
    pub fn set_now(&mut self, now_ms: Millis) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Fire a tick obtained from `pending_tick`. Returns whether a generation
    /// ran: stale tokens and ticks that are not yet due do nothing.
    pub fn fire(&mut self, tick: ScheduledTick, now_ms: Millis) -> bool {
        self.now_ms = self.now_ms.max(now_ms);
        if !self.scheduler.is_current(&tick) {
            log::warn!("stale tick {:?} dropped", tick.token);
            return false;
        }
        if self.now_ms < tick.due_ms {
            return false;
        }
        self.run_step();
        self.scheduler.rearm_after(tick, self.now_ms, self.clock.interval_ms);
        true
    }

    /// Move logical time forward to `now_ms`, firing every tick that falls
    /// due on the way, each at its own due time. Returns the steps run.
    pub fn advance_to(&mut self, now_ms: Millis) -> u32 {
        let mut steps = 0;
        while let Some(tick) = self.scheduler.pending() {
            if tick.due_ms > now_ms || !self.fire(tick, tick.due_ms) {
                break;
            }
            steps += 1;
        }
        self.now_ms = self.now_ms.max(now_ms);
        steps
    }

    /// Shorthand for `advance_to(now + elapsed)`.
    pub fn advance_by(&mut self, elapsed_ms: Millis) -> u32 {
        self.advance_to(self.now_ms + elapsed_ms)
    }

    fn run_step(&mut self) {
        let started = Instant::now();
        let StepOutcome { next, alive, births, deaths } = if self.grid.area() >= self.parallel_threshold {
            step_parallel(&self.grid)
        } else {
            step_outcome(&self.grid)
        };
        let cost = started.elapsed();

        self.grid = next;
        self.total_alive = alive;
        self.total_births += u64::from(births);
        self.total_deaths += u64::from(deaths);
        let generation = self.clock.advance(cost);

        log::debug!(
            "generation={generation} alive={alive} births={births} deaths={deaths} cost={}us",
            cost.as_micros()
        );
    }
}

impl Default for SimEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
