/*
 * Policy Module
 *
 * This module defines the capability interface the simulation expects from
 * an agent controller: evaluate three sensor inputs, return at least one
 * output. The first output above 0.5 means "jump". The neuroevolution
 * engine supplies real policies; the stubs here exist for tests and the
 * perceptron backs the demo engine.
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("policy produced no outputs")]
    EmptyOutput,
    #[error("policy evaluation failed: {0}")]
    Evaluation(String),
}

// Output threshold above which the first policy output is read as "jump"
pub const JUMP_THRESHOLD: f32 = 0.5;

// A control policy. Inputs are, in order: the bird's y, the vertical
// distance to the sensing pipe's gap top, and the vertical distance to the
// gap bottom.
pub trait Policy {
    fn activate(&mut self, inputs: [f32; 3]) -> Result<Vec<f32>, PolicyError>;
}

// A tiny 3-input perceptron with tanh activation, enough to back the demo
// engine. Real runs plug in an external network instead.
#[derive(Clone)]
pub struct PerceptronPolicy {
    pub weights: [f32; 3],
    pub bias: f32,
}

impl PerceptronPolicy {
    pub fn new(weights: [f32; 3], bias: f32) -> Self {
        Self { weights, bias }
    }
}

impl Policy for PerceptronPolicy {
    fn activate(&mut self, inputs: [f32; 3]) -> Result<Vec<f32>, PolicyError> {
        let sum = self.bias
            + self
                .weights
                .iter()
                .zip(inputs.iter())
                .map(|(w, x)| w * x)
                .sum::<f32>();
        Ok(vec![sum.tanh()])
    }
}

// Deterministic stub: always signals a jump
pub struct AlwaysJump;

impl Policy for AlwaysJump {
    fn activate(&mut self, _inputs: [f32; 3]) -> Result<Vec<f32>, PolicyError> {
        Ok(vec![1.0])
    }
}

// Deterministic stub: never signals a jump
pub struct NeverJump;

impl Policy for NeverJump {
    fn activate(&mut self, _inputs: [f32; 3]) -> Result<Vec<f32>, PolicyError> {
        Ok(vec![0.0])
    }
}

// Deterministic stub: alternates jump and fall every tick
pub struct Alternating {
    jump_next: bool,
}

impl Alternating {
    pub fn new() -> Self {
        Self { jump_next: true }
    }
}

impl Default for Alternating {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for Alternating {
    fn activate(&mut self, _inputs: [f32; 3]) -> Result<Vec<f32>, PolicyError> {
        let out = if self.jump_next { 1.0 } else { 0.0 };
        self.jump_next = !self.jump_next;
        Ok(vec![out])
    }
}
