//! Front/back decisions for overlapping tiles

use crate::io::configuration::ON_TOP_PROBABILITY;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Where a new tile goes relative to everything already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stacking {
    /// Occludes previously painted content
    OnTop,
    /// Appears underneath previously painted content
    Below,
}

/// Supplies one stacking decision per overlapping cell
pub trait StackingSource {
    /// Decision for the next cell in traversal order
    fn next_stacking(&mut self) -> Stacking;
}

/// Uniform, independent coin flip per cell
#[derive(Debug, Clone)]
pub struct RandomStacking<R> {
    rng: R,
}

impl<R: Rng> RandomStacking<R> {
    /// Draw decisions from `rng`
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomStacking<StdRng> {
    /// Non-reproducible decisions seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible decisions for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> StackingSource for RandomStacking<R> {
    fn next_stacking(&mut self) -> Stacking {
        if self.rng.random_bool(ON_TOP_PROBABILITY) {
            Stacking::OnTop
        } else {
            Stacking::Below
        }
    }
}

/// Same decision for every cell
#[derive(Debug, Clone, Copy)]
pub struct FixedStacking(pub Stacking);

impl StackingSource for FixedStacking {
    fn next_stacking(&mut self) -> Stacking {
        self.0
    }
}

/// Replays a recorded list of decisions, wrapping at the end
#[derive(Debug, Clone)]
pub struct ScriptedStacking {
    script: Vec<Stacking>,
    position: usize,
}

impl ScriptedStacking {
    /// Replay `script`; an empty script always yields [`Stacking::OnTop`]
    pub const fn new(script: Vec<Stacking>) -> Self {
        Self {
            script,
            position: 0,
        }
    }
}

impl StackingSource for ScriptedStacking {
    fn next_stacking(&mut self) -> Stacking {
        let decision = self
            .script
            .get(self.position)
            .copied()
            .unwrap_or(Stacking::OnTop);
        if !self.script.is_empty() {
            self.position = (self.position + 1) % self.script.len();
        }
        decision
    }
}

impl<S: StackingSource + ?Sized> StackingSource for &mut S {
    fn next_stacking(&mut self) -> Stacking {
        (**self).next_stacking()
    }
}
