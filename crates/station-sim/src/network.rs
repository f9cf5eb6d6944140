//! The pipe network: every segment, stored as hecs entities.
//!
//! Entities are kept in id order so random selection and snapshots are
//! reproducible for a given seed.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use station_core::components::Placement;
use station_core::enums::SegmentState;
use station_core::types::SegmentId;

use crate::segment::Segment;
use crate::world_setup::{self, LayoutPattern};

/// Owns all segments of the station.
pub struct Network {
    world: World,
    entities: Vec<Entity>,
}

impl Default for Network {
    fn default() -> Self {
        Self::build_layout(&LayoutPattern::default())
    }
}

impl Network {
    /// Build the network for a height pattern. Same pattern, same network.
    pub fn build_layout(pattern: &LayoutPattern) -> Self {
        let mut world = World::new();
        let entities = world_setup::spawn_layout(&mut world, pattern);
        Self { world, entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All segment ids in layout order.
    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        (0..self.entities.len()).map(|i| SegmentId(i as u32))
    }

    /// Heal every segment and take every part off the floor.
    pub fn reset_all(&mut self) {
        for (_entity, segment) in self.world.query_mut::<&mut Segment>() {
            segment.reset();
        }
    }

    /// Break one healthy segment chosen uniformly at random.
    /// Returns `None` when everything is already broken.
    pub fn break_random_healthy(&mut self, rng: &mut impl Rng) -> Option<SegmentId> {
        let healthy: Vec<SegmentId> = self
            .ids()
            .filter(|&id| self.state(id) == Some(SegmentState::Healthy))
            .collect();

        let id = *healthy.choose(&mut *rng)?;
        self.break_segment(id, rng).then_some(id)
    }

    /// Break a specific segment. `false` if unknown or already broken.
    pub fn break_segment(&mut self, id: SegmentId, rng: &mut impl Rng) -> bool {
        self.with_segment(id, |placement, segment| segment.break_segment(placement, rng))
            .unwrap_or(false)
    }

    /// Pick up a segment's part. `false` if unknown or not on the floor.
    pub fn try_pickup(&mut self, id: SegmentId) -> bool {
        self.with_segment(id, |_, segment| segment.try_pickup())
            .unwrap_or(false)
    }

    /// Return a segment's part to the floor at a new spot.
    pub fn respawn_part(&mut self, id: SegmentId, rng: &mut impl Rng) -> bool {
        self.with_segment(id, |placement, segment| segment.respawn_part(placement, rng))
            .unwrap_or(false)
    }

    /// Repair a segment. `false` if unknown or already healthy.
    pub fn repair(&mut self, id: SegmentId) -> bool {
        self.with_segment(id, |_, segment| segment.repair())
            .unwrap_or(false)
    }

    pub fn broken_count(&self) -> usize {
        self.world
            .query::<&Segment>()
            .iter()
            .filter(|(_, segment)| segment.is_broken())
            .count()
    }

    pub fn healthy_count(&self) -> usize {
        self.len() - self.broken_count()
    }

    pub fn state(&self, id: SegmentId) -> Option<SegmentState> {
        self.segment(id).map(|segment| segment.state())
    }

    /// Copy of a segment's state.
    pub fn segment(&self, id: SegmentId) -> Option<Segment> {
        let entity = self.entity(id)?;
        self.world.get::<&Segment>(entity).ok().map(|s| *s)
    }

    pub fn placement(&self, id: SegmentId) -> Option<Placement> {
        let entity = self.entity(id)?;
        self.world.get::<&Placement>(entity).ok().map(|p| *p)
    }

    /// Every segment with its placement, in id order.
    pub fn segments(&self) -> Vec<(SegmentId, Placement, Segment)> {
        self.ids()
            .filter_map(|id| Some((id, self.placement(id)?, self.segment(id)?)))
            .collect()
    }

    /// Advance cosmetic effects.
    pub fn tick(&mut self, dt: f32) {
        for (_entity, segment) in self.world.query_mut::<&mut Segment>() {
            segment.tick(dt);
        }
    }

    fn entity(&self, id: SegmentId) -> Option<Entity> {
        self.entities.get(id.index()).copied()
    }

    fn with_segment<T>(
        &mut self,
        id: SegmentId,
        f: impl FnOnce(&Placement, &mut Segment) -> T,
    ) -> Option<T> {
        let entity = self.entity(id)?;
        let (placement, segment) = self
            .world
            .query_one_mut::<(&Placement, &mut Segment)>(entity)
            .ok()?;
        Some(f(placement, segment))
    }
}
