use bevy_ecs::prelude::Resource;

/// Simulation clock counted in fixed ticks.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldTime {
    /// Number of ticks fully processed by the scene.
    pub ticks: u64,
}

impl WorldTime {
    pub fn advance(&mut self) {
        self.ticks += 1;
    }
}
