use super::named_object::SceneObjectKey;
use bevy::prelude::*;
use std::collections::HashMap;

/// Translation, rotation and scale a model is (or will be) placed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Placement {
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            translation: transform.translation,
            rotation: transform.rotation,
            scale: transform.scale,
        }
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}

/// Handed out by `begin_replace`. The generation identifies the request on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceTicket {
    pub key: SceneObjectKey,
    pub generation: u64,
    /// Previously live entity, already detached from the registry. Must be despawned.
    pub detached: Option<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Spawn the loaded model with this placement and `insert` it.
    Insert(Placement),
    /// A newer request exists for the key; drop the result.
    Discard,
    /// The current request failed; the key stays absent.
    Abandoned,
}

#[derive(Debug, Default)]
struct ObjectSlot {
    live: Option<Entity>,
    generation: u64,
    pending: Option<Placement>,
}

/// Maps each scene key to its single live entity and in-flight replacement.
///
/// Replacement is last-request-wins: every `begin_replace` bumps the key's
/// generation, and only a completion carrying the current generation is
/// allowed to insert.
#[derive(Resource, Debug, Default)]
pub struct SceneObjectRegistry {
    slots: HashMap<SceneObjectKey, ObjectSlot>,
}

impl SceneObjectRegistry {
    /// Start replacing `key`: detach the live entity and remember where the new one goes.
    pub fn begin_replace(&mut self, key: SceneObjectKey, placement: Placement) -> ReplaceTicket {
        let slot = self.slots.entry(key).or_default();
        slot.generation += 1;
        slot.pending = Some(placement);

        ReplaceTicket {
            key,
            generation: slot.generation,
            detached: slot.live.take(),
        }
    }

    /// Decide what to do with a finished load for `key`.
    pub fn resolve(
        &mut self,
        key: SceneObjectKey,
        generation: u64,
        outcome: LoadOutcome,
    ) -> Resolution {
        let Some(slot) = self.slots.get_mut(&key) else {
            return Resolution::Discard;
        };
        if slot.generation != generation {
            return Resolution::Discard;
        }

        match outcome {
            LoadOutcome::Loaded => match slot.pending.take() {
                Some(placement) => Resolution::Insert(placement),
                None => Resolution::Discard,
            },
            LoadOutcome::Failed => {
                slot.pending = None;
                Resolution::Abandoned
            }
        }
    }

    /// Record `entity` as the live object for `key`.
    /// Returns an entity that was displaced and must be despawned.
    pub fn insert(&mut self, key: SceneObjectKey, entity: Entity) -> Option<Entity> {
        let slot = self.slots.entry(key).or_default();
        slot.live.replace(entity).filter(|previous| *previous != entity)
    }

    pub fn live(&self, key: SceneObjectKey) -> Option<Entity> {
        self.slots.get(&key).and_then(|slot| slot.live)
    }

    pub fn pending(&self, key: SceneObjectKey) -> Option<Placement> {
        self.slots.get(&key).and_then(|slot| slot.pending)
    }

    pub fn is_pending(&self, key: SceneObjectKey) -> bool {
        self.pending(key).is_some()
    }

    /// Move the placement of an in-flight replacement. Returns false when nothing is pending.
    pub fn set_pending_translation(&mut self, key: SceneObjectKey, translation: Vec3) -> bool {
        match self.slots.get_mut(&key).and_then(|slot| slot.pending.as_mut()) {
            Some(placement) => {
                placement.translation = translation;
                true
            }
            None => false,
        }
    }

    /// Number of keys with a live entity, reported by `get_view_state`.
    pub fn live_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.live.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement_at(x: f32) -> Placement {
        Placement::new(Vec3::new(x, -10.0, 0.0), Quat::from_rotation_y(0.3), Vec3::splat(25.0))
    }

    #[test]
    fn first_replace_creates_object() {
        let mut registry = SceneObjectRegistry::default();
        let ticket = registry.begin_replace(SceneObjectKey::Spacecraft, placement_at(-4.0));
        assert_eq!(ticket.detached, None);
        assert!(registry.is_pending(SceneObjectKey::Spacecraft));

        let resolution =
            registry.resolve(SceneObjectKey::Spacecraft, ticket.generation, LoadOutcome::Loaded);
        assert_eq!(resolution, Resolution::Insert(placement_at(-4.0)));

        let entity = Entity::from_raw(7);
        assert_eq!(registry.insert(SceneObjectKey::Spacecraft, entity), None);
        assert_eq!(registry.live(SceneObjectKey::Spacecraft), Some(entity));
        assert!(!registry.is_pending(SceneObjectKey::Spacecraft));
    }

    #[test]
    fn replace_detaches_live_entity_immediately() {
        let mut registry = SceneObjectRegistry::default();
        let old = Entity::from_raw(1);
        registry.insert(SceneObjectKey::Psyche, old);

        let ticket = registry.begin_replace(SceneObjectKey::Psyche, placement_at(-100.0));
        assert_eq!(ticket.detached, Some(old));
        assert_eq!(registry.live(SceneObjectKey::Psyche), None);
    }

    #[test]
    fn last_request_wins_when_earlier_load_finishes_late() {
        let mut registry = SceneObjectRegistry::default();
        let first = registry.begin_replace(SceneObjectKey::Psyche, placement_at(-125.0));
        let second = registry.begin_replace(SceneObjectKey::Psyche, placement_at(-75.0));
        assert!(second.generation > first.generation);

        // Second load completes first and is accepted.
        assert_eq!(
            registry.resolve(SceneObjectKey::Psyche, second.generation, LoadOutcome::Loaded),
            Resolution::Insert(placement_at(-75.0))
        );
        let second_entity = Entity::from_raw(2);
        registry.insert(SceneObjectKey::Psyche, second_entity);

        // First load arrives afterwards and is discarded.
        assert_eq!(
            registry.resolve(SceneObjectKey::Psyche, first.generation, LoadOutcome::Loaded),
            Resolution::Discard
        );
        assert_eq!(registry.live(SceneObjectKey::Psyche), Some(second_entity));
    }

    #[test]
    fn stale_load_finishing_first_is_still_discarded() {
        let mut registry = SceneObjectRegistry::default();
        let first = registry.begin_replace(SceneObjectKey::Psyche, placement_at(-125.0));
        let second = registry.begin_replace(SceneObjectKey::Psyche, placement_at(-50.0));

        assert_eq!(
            registry.resolve(SceneObjectKey::Psyche, first.generation, LoadOutcome::Loaded),
            Resolution::Discard
        );
        assert!(registry.is_pending(SceneObjectKey::Psyche));
        assert_eq!(
            registry.resolve(SceneObjectKey::Psyche, second.generation, LoadOutcome::Loaded),
            Resolution::Insert(placement_at(-50.0))
        );
    }

    #[test]
    fn failed_load_leaves_key_absent() {
        let mut registry = SceneObjectRegistry::default();
        registry.insert(SceneObjectKey::Psyche, Entity::from_raw(3));
        let ticket = registry.begin_replace(SceneObjectKey::Psyche, placement_at(-100.0));

        assert_eq!(
            registry.resolve(SceneObjectKey::Psyche, ticket.generation, LoadOutcome::Failed),
            Resolution::Abandoned
        );
        assert_eq!(registry.live(SceneObjectKey::Psyche), None);
        assert!(!registry.is_pending(SceneObjectKey::Psyche));
    }

    #[test]
    fn stale_failure_does_not_cancel_newer_request() {
        let mut registry = SceneObjectRegistry::default();
        let first = registry.begin_replace(SceneObjectKey::Psyche, placement_at(-125.0));
        let second = registry.begin_replace(SceneObjectKey::Psyche, placement_at(-100.0));

        assert_eq!(
            registry.resolve(SceneObjectKey::Psyche, first.generation, LoadOutcome::Failed),
            Resolution::Discard
        );
        assert_eq!(registry.pending(SceneObjectKey::Psyche), Some(placement_at(-100.0)));
        assert_eq!(
            registry.resolve(SceneObjectKey::Psyche, second.generation, LoadOutcome::Loaded),
            Resolution::Insert(placement_at(-100.0))
        );
    }

    #[test]
    fn at_most_one_live_entity_per_key() {
        let mut registry = SceneObjectRegistry::default();
        let mut next_id = 10;
        let mut despawned = Vec::new();

        for round in 0..5 {
            for key in SceneObjectKey::ALL {
                let ticket = registry.begin_replace(key, placement_at(round as f32));
                despawned.extend(ticket.detached);
                if let Resolution::Insert(_) =
                    registry.resolve(key, ticket.generation, LoadOutcome::Loaded)
                {
                    let entity = Entity::from_raw(next_id);
                    next_id += 1;
                    despawned.extend(registry.insert(key, entity));
                }
            }
        }

        assert_eq!(registry.live_count(), SceneObjectKey::ALL.len());
        for key in SceneObjectKey::ALL {
            let live = registry.live(key).unwrap();
            assert!(!despawned.contains(&live));
        }
        assert_eq!(despawned.len(), SceneObjectKey::ALL.len() * 4);
    }

    #[test]
    fn pending_translation_follows_orbit_changes() {
        let mut registry = SceneObjectRegistry::default();
        assert!(!registry.set_pending_translation(SceneObjectKey::Psyche, Vec3::ZERO));

        let ticket = registry.begin_replace(SceneObjectKey::Psyche, placement_at(-125.0));
        assert!(registry.set_pending_translation(
            SceneObjectKey::Psyche,
            Vec3::new(-75.0, -10.0, 0.0)
        ));

        match registry.resolve(SceneObjectKey::Psyche, ticket.generation, LoadOutcome::Loaded) {
            Resolution::Insert(placement) => {
                assert_eq!(placement.translation, Vec3::new(-75.0, -10.0, 0.0));
                assert_eq!(placement.rotation, Quat::from_rotation_y(0.3));
            }
            other => panic!("unexpected resolution {other:?}"),
        }
    }
}
