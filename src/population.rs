/*
 * Population Module
 *
 * This module drives one generation of the simulation: it pairs each policy
 * with a bird and a fitness accumulator, advances the world one tick at a
 * time, queries every live policy, applies kinematics, runs collision and
 * bounds culling, and publishes a read-only snapshot per tick for the
 * renderer.
 *
 * Culling is mark-then-sweep: every pass in a tick walks the stable entry
 * list and only flips alive flags, entries are never removed mid-scan. Dead
 * entries stay in place so the fitness vector keeps the order the engine
 * handed the policies in.
 */

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::base::Base;
use crate::bird::Bird;
use crate::params::SimulationParams;
use crate::pipe::{sensing_index, Pipe};
use crate::policy::{Policy, PolicyError, JUMP_THRESHOLD};
use crate::sprites::SpriteAtlas;

#[derive(Debug, Error)]
pub enum SimError {
    // A policy failure aborts the whole generation; skipping the entry
    // would silently bias selection
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    Running,
    Terminated,
}

// One policy, its bird and its fitness accumulator. Lives for exactly one
// generation.
pub struct PopulationEntry {
    pub policy: Box<dyn Policy>,
    pub bird: Bird,
    pub fitness: f32,
    pub alive: bool,
}

// Read-only per-tick state handed to the rendering collaborator
#[derive(Clone, Default)]
pub struct FrameSnapshot {
    pub birds: Vec<BirdView>,
    pub pipes: Vec<PipeView>,
    pub base: BaseView,
    pub score: u32,
    pub generation: u32,
    pub alive: usize,
    pub ticks: u64,
    pub sensing_pipe: Option<usize>,
}

#[derive(Clone, Copy)]
pub struct BirdView {
    pub x: f32,
    pub y: f32,
    pub tilt: f32,
    pub frame: usize,
}

#[derive(Clone, Copy)]
pub struct PipeView {
    pub x: f32,
    pub gap_y: f32,
    pub top: f32,
    pub bottom: f32,
    pub passed: bool,
}

#[derive(Clone, Copy, Default)]
pub struct BaseView {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

pub struct Generation {
    entries: Vec<PopulationEntry>,
    pipes: Vec<Pipe>,
    base: Base,
    score: u32,
    number: u32,
    ticks: u64,
    rng: ChaCha8Rng,
    params: SimulationParams,
}

impl Generation {
    // INIT: one entry per policy, all birds at the shared spawn point,
    // fitness zeroed, one base and one initial pipe
    pub fn new(
        policies: Vec<Box<dyn Policy>>,
        number: u32,
        params: &SimulationParams,
        atlas: &SpriteAtlas,
    ) -> Self {
        let entries = policies
            .into_iter()
            .map(|policy| PopulationEntry {
                policy,
                bird: Bird::new(params.bird_spawn_x, params.bird_spawn_y),
                fitness: 0.0,
                alive: true,
            })
            .collect();

        let mut rng = match params.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(number as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let base = Base::new(params.floor_y, atlas.base_width());
        let pipes = vec![Pipe::spawn(params.initial_pipe_x, &mut rng, params, atlas)];

        Self {
            entries,
            pipes,
            base,
            score: 0,
            number,
            ticks: 0,
            rng,
            params: params.clone(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn alive(&self) -> usize {
        self.entries.iter().filter(|entry| entry.alive).count()
    }

    pub fn is_terminated(&self) -> bool {
        self.entries.iter().all(|entry| !entry.alive)
    }

    pub fn entries(&self) -> &[PopulationEntry] {
        &self.entries
    }

    // Fitness accumulators in the order the engine supplied the policies;
    // dead entries keep the fitness they had at removal
    pub fn fitnesses(&self) -> Vec<f32> {
        self.entries.iter().map(|entry| entry.fitness).collect()
    }

    // Advance the world by one tick. Returns Terminated once the live set
    // is empty; a policy failure aborts with an error instead.
    pub fn tick(&mut self, atlas: &SpriteAtlas) -> Result<GenerationStatus, SimError> {
        if self.is_terminated() {
            return Ok(GenerationStatus::Terminated);
        }
        self.ticks += 1;

        let scroll_speed = self.params.scroll_speed;
        let pipe_width = atlas.pipe_width();

        // 1. Scroll the world and prune pipes that left the screen
        self.base.advance(scroll_speed);
        for pipe in &mut self.pipes {
            pipe.advance(scroll_speed);
        }
        self.pipes.retain(|pipe| !pipe.is_offscreen(pipe_width));

        // 2. Per live bird: survival reward, sense the upcoming pipe, ask
        // the policy, act, and check the passed flag for this bird
        let mut add_pipe = false;
        for entry in self.entries.iter_mut() {
            if !entry.alive {
                continue;
            }

            entry.fitness += self.params.survival_reward;

            let idx = sensing_index(&self.pipes, entry.bird.x, pipe_width);
            let (gap_top, gap_bottom) = {
                let pipe = &self.pipes[idx];
                (pipe.gap_y, pipe.bottom)
            };

            let inputs = [
                entry.bird.y,
                (entry.bird.y - gap_top).abs(),
                (entry.bird.y - gap_bottom).abs(),
            ];
            let outputs = entry.policy.activate(inputs)?;
            let signal = *outputs.first().ok_or(PolicyError::EmptyOutput)?;

            if signal > JUMP_THRESHOLD {
                entry.bird.jump(&self.params);
            } else {
                entry.bird.advance(&self.params);
            }
            entry.bird.advance_animation(&self.params);

            // Passed flag, evaluated for this bird specifically; the flag
            // is monotonic and also triggers scoring and the next spawn
            for pipe in &mut self.pipes {
                if !pipe.passed && pipe.x < entry.bird.x {
                    pipe.passed = true;
                    add_pipe = true;
                }
            }
        }

        // 3. Collisions: fixed penalty, mark dead
        for entry in self.entries.iter_mut() {
            if !entry.alive {
                continue;
            }
            for pipe in &self.pipes {
                if pipe.collides(&entry.bird, atlas) {
                    entry.fitness -= self.params.collision_penalty;
                    entry.alive = false;
                    break;
                }
            }
        }

        // 4. Bounds: leaving the vertical play field removes the bird
        // without a penalty
        for entry in self.entries.iter_mut() {
            if !entry.alive {
                continue;
            }
            let bird = &entry.bird;
            if bird.y + atlas.bird_height() >= self.params.floor_y || bird.y < self.params.ceiling_y
            {
                entry.alive = false;
            }
        }

        // 5. Pass event: one score point, a bonus for every survivor, and
        // exactly one fresh pipe at the respawn point
        if add_pipe {
            self.score += 1;
            for entry in self.entries.iter_mut() {
                if entry.alive {
                    entry.fitness += self.params.pass_bonus;
                }
            }
            let pipe = Pipe::spawn(self.params.respawn_x, &mut self.rng, &self.params, atlas);
            self.pipes.push(pipe);
        }

        if self.is_terminated() {
            Ok(GenerationStatus::Terminated)
        } else {
            Ok(GenerationStatus::Running)
        }
    }

    // Publish the read-only state for this tick
    pub fn snapshot(&self, atlas: &SpriteAtlas) -> FrameSnapshot {
        let birds = self
            .entries
            .iter()
            .filter(|entry| entry.alive)
            .map(|entry| BirdView {
                x: entry.bird.x,
                y: entry.bird.y,
                tilt: entry.bird.tilt,
                frame: entry.bird.frame,
            })
            .collect();

        let pipes: Vec<PipeView> = self
            .pipes
            .iter()
            .map(|pipe| PipeView {
                x: pipe.x,
                gap_y: pipe.gap_y,
                top: pipe.top,
                bottom: pipe.bottom,
                passed: pipe.passed,
            })
            .collect();

        // Derived from a live bird so it always matches the per-bird
        // selection in tick()
        let sensing_pipe = if self.pipes.is_empty() {
            None
        } else {
            self.entries
                .iter()
                .find(|entry| entry.alive)
                .map(|entry| sensing_index(&self.pipes, entry.bird.x, atlas.pipe_width()))
        };

        FrameSnapshot {
            birds,
            pipes,
            base: BaseView {
                x1: self.base.x1,
                x2: self.base.x2,
                y: self.base.y,
            },
            score: self.score,
            generation: self.number,
            alive: self.alive(),
            ticks: self.ticks,
            sensing_pipe,
        }
    }

    // Drive the generation to completion. The frame callback receives every
    // snapshot and doubles as the once-per-tick quit poll: returning false
    // stops the run immediately.
    pub fn run(
        &mut self,
        atlas: &SpriteAtlas,
        tick_budget: Option<u64>,
        mut on_frame: impl FnMut(&FrameSnapshot) -> bool,
    ) -> Result<GenerationStatus, SimError> {
        loop {
            if let Some(budget) = tick_budget {
                if self.ticks >= budget {
                    return Ok(GenerationStatus::Terminated);
                }
            }

            let status = self.tick(atlas)?;
            let snapshot = self.snapshot(atlas);
            if !on_frame(&snapshot) || status == GenerationStatus::Terminated {
                return Ok(status);
            }
        }
    }
}
