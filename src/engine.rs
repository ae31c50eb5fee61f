/*
 * Evolution Engine Module
 *
 * This module defines the boundary to the external neuroevolution engine:
 * the engine hands the simulation an ordered set of policies for one
 * generation and reads the fitness vector back afterwards. Selection,
 * reproduction and genome encoding are the engine's business, not the
 * simulation's.
 *
 * RandomSearchEngine is a minimal stand-in so the binary runs out of the
 * box: it perturbs the best perceptron weights seen so far. Plug a real
 * engine in through the trait for actual neuroevolution.
 */

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::policy::{PerceptronPolicy, Policy};

pub trait EvolutionEngine {
    // Produce the ordered policies for the next generation
    fn spawn_generation(&mut self) -> Vec<Box<dyn Policy>>;

    // Receive the fitness vector for the generation last spawned, in the
    // same order the policies were handed out
    fn absorb_fitness(&mut self, fitness: &[f32]);
}

// Genome of the demo engine: three input weights and a bias
type Weights = [f32; 4];

pub struct RandomSearchEngine {
    population_size: usize,
    mutation_scale: f32,
    rng: ChaCha8Rng,
    current: Vec<Weights>,
    best: Option<(Weights, f32)>,
}

impl RandomSearchEngine {
    pub fn new(population_size: usize, seed: u64) -> Self {
        Self {
            population_size,
            mutation_scale: 0.05,
            rng: ChaCha8Rng::seed_from_u64(seed),
            current: Vec::new(),
            best: None,
        }
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn best_fitness(&self) -> Option<f32> {
        self.best.map(|(_, fitness)| fitness)
    }

    fn random_weights(&mut self) -> Weights {
        let mut weights = [0.0; 4];
        for w in &mut weights {
            *w = self.rng.gen_range(-1.0..1.0);
        }
        weights
    }

    fn perturbed(&mut self, source: Weights) -> Weights {
        let scale = self.mutation_scale;
        let mut weights = source;
        for w in &mut weights {
            *w += self.rng.gen_range(-scale..scale);
        }
        weights
    }
}

impl EvolutionEngine for RandomSearchEngine {
    fn spawn_generation(&mut self) -> Vec<Box<dyn Policy>> {
        self.current.clear();

        match self.best {
            // Keep the champion unchanged, mutate it for everyone else
            Some((champion, _)) => {
                self.current.push(champion);
                for _ in 1..self.population_size {
                    let next = self.perturbed(champion);
                    self.current.push(next);
                }
            }
            None => {
                for _ in 0..self.population_size {
                    let next = self.random_weights();
                    self.current.push(next);
                }
            }
        }

        self.current
            .iter()
            .map(|w| {
                Box::new(PerceptronPolicy::new([w[0], w[1], w[2]], w[3])) as Box<dyn Policy>
            })
            .collect()
    }

    fn absorb_fitness(&mut self, fitness: &[f32]) {
        debug_assert_eq!(fitness.len(), self.current.len());

        for (weights, &score) in self.current.iter().zip(fitness.iter()) {
            if score > self.best.map_or(f32::NEG_INFINITY, |(_, f)| f) {
                self.best = Some((*weights, score));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_requested_population_size() {
        let mut engine = RandomSearchEngine::new(25, 1);
        assert_eq!(engine.spawn_generation().len(), 25);
    }

    #[test]
    fn absorb_keeps_the_best_score_seen() {
        let mut engine = RandomSearchEngine::new(4, 1);

        engine.spawn_generation();
        engine.absorb_fitness(&[1.0, 7.5, 3.0, 2.0]);
        assert_eq!(engine.best_fitness(), Some(7.5));

        // A worse generation must not displace the champion
        engine.spawn_generation();
        engine.absorb_fitness(&[0.5, 1.0, 2.0, 0.1]);
        assert_eq!(engine.best_fitness(), Some(7.5));
    }

    #[test]
    fn identical_seeds_spawn_identical_policies() {
        let mut a = RandomSearchEngine::new(8, 99);
        let mut b = RandomSearchEngine::new(8, 99);
        a.spawn_generation();
        b.spawn_generation();
        assert_eq!(a.current, b.current);
    }
}
