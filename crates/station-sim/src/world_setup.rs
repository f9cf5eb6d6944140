//! Pipe layout construction.
//!
//! Lays pipe runs along both corridor walls following a high/low height
//! pattern and spawns one hecs entity per segment.

use glam::Vec3;
use hecs::{Entity, World};

use station_core::components::Placement;
use station_core::constants::*;
use station_core::enums::{Level, WallSide};
use station_core::types::SegmentId;

use crate::segment::Segment;

/// Height pattern and dimensions of the pipe network.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPattern {
    /// Junction height at each station, from the far end of the corridor.
    pub levels: Vec<Level>,
    /// Corridor z of the first station.
    pub start_z: f32,
    /// Distance between stations; also the horizontal segment length.
    pub spacing: f32,
    pub high_y: f32,
    pub low_y: f32,
    /// Distance of both pipe runs from the centreline.
    pub wall_x: f32,
}

impl Default for LayoutPattern {
    fn default() -> Self {
        Self::alternating(STATION_COUNT)
    }
}

impl LayoutPattern {
    /// High, low, high, ... across `stations` stations.
    pub fn alternating(stations: usize) -> Self {
        let levels = (0..stations)
            .map(|i| if i % 2 == 0 { Level::High } else { Level::Low })
            .collect();
        Self {
            levels,
            start_z: CORRIDOR_START_Z,
            spacing: STATION_SPACING,
            high_y: PIPE_HIGH_Y,
            low_y: PIPE_LOW_Y,
            wall_x: PIPE_WALL_X,
        }
    }

    /// Same dimensions as the default layout with a custom height pattern.
    pub fn with_levels(levels: Vec<Level>) -> Self {
        Self {
            levels,
            ..Self::alternating(0)
        }
    }

    fn height(&self, level: Level) -> f32 {
        match level {
            Level::High => self.high_y,
            Level::Low => self.low_y,
        }
    }

    /// Segment placements in id order.
    ///
    /// Per station: left run, left connector (if the height changed), right
    /// run, right connector (if the height changed).
    pub fn placements(&self) -> Vec<Placement> {
        let mut placements = Vec::new();

        for (i, &level) in self.levels.iter().enumerate() {
            let z = self.start_z + i as f32 * self.spacing;
            let y = self.height(level);
            let prev_y = i
                .checked_sub(1)
                .map(|prev| self.height(self.levels[prev]));

            for side in [WallSide::Left, WallSide::Right] {
                let x = side.sign() * self.wall_x;
                placements.push(Placement {
                    center: Vec3::new(x, y, z),
                    side,
                    vertical: false,
                    length: self.spacing,
                });

                if let Some(prev_y) = prev_y.filter(|&p| p != y) {
                    placements.push(Placement {
                        center: Vec3::new(x, (prev_y + y) / 2.0, z - self.spacing / 2.0),
                        side,
                        vertical: true,
                        length: (y - prev_y).abs(),
                    });
                }
            }
        }

        placements
    }
}

/// Spawn one entity per segment. Returned entities are in id order.
pub fn spawn_layout(world: &mut World, pattern: &LayoutPattern) -> Vec<Entity> {
    pattern
        .placements()
        .into_iter()
        .enumerate()
        .map(|(i, placement)| spawn_segment(world, SegmentId(i as u32), placement))
        .collect()
}

/// Spawn a single healthy segment.
pub fn spawn_segment(world: &mut World, id: SegmentId, placement: Placement) -> Entity {
    world.spawn((id, placement, Segment::new()))
}
