use bevy_ecs::prelude::Resource;

/// Seeded random source of a scene. Same seed, same run.
#[derive(Resource, Debug, Clone)]
pub struct SceneRng(pub fastrand::Rng);

impl SceneRng {
    pub fn seeded(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Uniform value in `0..=max`.
    pub fn jitter(&mut self, max: u32) -> u32 {
        if max == 0 { 0 } else { self.0.u32(0..=max) }
    }
}
