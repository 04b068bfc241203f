// Copyright 2025 the Boreal Engine contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{
    Component, ComponentManager, ComponentTuple, Coordinator, EntitySet, GroupSystem, QuerySystem,
};
use boreal_core::ecs::{EcsError, Entity, Signature, MAX_ENTITIES};

// --- DUMMY COMPONENTS FOR TESTING ---

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position(f32, f32, f32);
impl Component for Position {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity(f32, f32, f32);
impl Component for Velocity {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Health(u32);
impl Component for Health {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FrameTime(f32);
impl Component for FrameTime {}

// --- TESTS: ENTITY LIFECYCLE ---

#[test]
fn test_entity_ids_unique_while_live() {
    let mut coordinator = Coordinator::new();

    let a = coordinator.create_entity().unwrap();
    let b = coordinator.create_entity().unwrap();
    let c = coordinator.create_entity().unwrap();

    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
    assert_eq!(coordinator.living_entity_count(), 3);
}

#[test]
fn test_entity_pool_exhaustion() {
    let mut coordinator = Coordinator::new();

    for _ in 0..MAX_ENTITIES {
        coordinator.create_entity().unwrap();
    }
    assert_eq!(coordinator.living_entity_count(), MAX_ENTITIES);

    let result = coordinator.create_entity();
    assert_eq!(
        result,
        Err(EcsError::TooManyEntities {
            capacity: MAX_ENTITIES
        }),
        "Exhausted pool must refuse to issue another ID"
    );

    // Destroying one entity makes exactly one ID available again.
    coordinator.destroy_entity(Entity::from_raw(42)).unwrap();
    assert!(coordinator.create_entity().is_ok());
    assert!(coordinator.create_entity().is_err());
}

#[test]
fn test_destroyed_id_may_be_reissued() {
    let mut coordinator = Coordinator::new();

    let first = coordinator.create_entity().unwrap();
    coordinator.destroy_entity(first).unwrap();

    // Drain the pool; the destroyed ID must come back eventually.
    let mut reissued = false;
    for _ in 0..MAX_ENTITIES {
        if coordinator.create_entity().unwrap() == first {
            reissued = true;
            break;
        }
    }
    assert!(reissued, "A destroyed ID must be reusable");
}

#[test]
fn test_entity_out_of_range() {
    let mut coordinator = Coordinator::new();
    let bogus = Entity::from_raw(MAX_ENTITIES as u32);

    assert!(matches!(
        coordinator.destroy_entity(bogus),
        Err(EcsError::EntityOutOfRange { .. })
    ));
    assert!(matches!(
        coordinator.signature(bogus),
        Err(EcsError::EntityOutOfRange { .. })
    ));
}

// --- TESTS: COMPONENT REGISTRATION AND STORAGE ---

#[test]
fn test_component_registration() {
    let mut coordinator = Coordinator::new();

    let position_type = coordinator.register_component::<Position>().unwrap();
    let velocity_type = coordinator.register_component::<Velocity>().unwrap();

    // Dense indices are handed out in registration order.
    assert_eq!(position_type.index(), 0);
    assert_eq!(velocity_type.index(), 1);
    assert_eq!(
        coordinator.component_type::<Position>().unwrap(),
        position_type
    );

    assert_eq!(
        coordinator.register_component::<Position>(),
        Err(EcsError::ComponentAlreadyRegistered {
            type_name: std::any::type_name::<Position>()
        })
    );
    assert!(matches!(
        coordinator.component_type::<Health>(),
        Err(EcsError::ComponentNotRegistered { .. })
    ));
}

#[test]
fn test_signature_follows_component_mutations() {
    // --- 1. SETUP ---
    let mut coordinator = Coordinator::new();
    let position_type = coordinator.register_component::<Position>().unwrap();
    let velocity_type = coordinator.register_component::<Velocity>().unwrap();
    let entity = coordinator.create_entity().unwrap();

    // --- 2. ACTION & ASSERTIONS ---
    coordinator
        .add_component(entity, Position(1.0, 2.0, 3.0))
        .unwrap();
    let signature = coordinator.signature(entity).unwrap();
    assert!(signature.test(position_type.index()));
    assert!(!signature.test(velocity_type.index()));

    coordinator
        .add_component(entity, Velocity(0.1, 0.0, 0.0))
        .unwrap();
    let signature = coordinator.signature(entity).unwrap();
    assert!(signature.test(position_type.index()));
    assert!(signature.test(velocity_type.index()));

    coordinator.remove_component::<Position>(entity).unwrap();
    let signature = coordinator.signature(entity).unwrap();
    assert!(!signature.test(position_type.index()));
    assert!(signature.test(velocity_type.index()));
}

#[test]
fn test_duplicate_add_fails() {
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Health>().unwrap();
    let entity = coordinator.create_entity().unwrap();

    coordinator.add_component(entity, Health(100)).unwrap();
    assert_eq!(
        coordinator.add_component(entity, Health(50)),
        Err(EcsError::ComponentAlreadyExists {
            entity,
            type_name: std::any::type_name::<Health>()
        })
    );
    // The original value must be untouched by the failed add.
    assert_eq!(
        coordinator.get_component::<Health>(entity).unwrap(),
        &Health(100)
    );
}

#[test]
fn test_dense_storage_stays_dense_under_removal() {
    // --- 1. SETUP ---
    // Three entities in one array, then remove the middle one to force the
    // swap-remove path.
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Health>().unwrap();

    let a = coordinator.create_entity().unwrap();
    let b = coordinator.create_entity().unwrap();
    let c = coordinator.create_entity().unwrap();
    coordinator.add_component(a, Health(1)).unwrap();
    coordinator.add_component(b, Health(2)).unwrap();
    coordinator.add_component(c, Health(3)).unwrap();
    assert_eq!(
        coordinator.component_manager().component_count::<Health>(),
        Ok(3)
    );

    // --- 2. ACTION ---
    let removed = coordinator.remove_component::<Health>(b).unwrap();

    // --- 3. ASSERTIONS ---
    assert_eq!(removed, Health(2));
    assert_eq!(
        coordinator.component_manager().component_count::<Health>(),
        Ok(2),
        "The array length must equal the number of live components"
    );
    // The survivors must still resolve to their own values after the swap.
    assert_eq!(coordinator.get_component::<Health>(a).unwrap(), &Health(1));
    assert_eq!(coordinator.get_component::<Health>(c).unwrap(), &Health(3));
    assert!(coordinator.try_get_component::<Health>(b).is_none());

    // Removing the last remaining rows exercises the "removed row IS the
    // last row" branch.
    coordinator.remove_component::<Health>(c).unwrap();
    coordinator.remove_component::<Health>(a).unwrap();
    assert_eq!(
        coordinator.component_manager().component_count::<Health>(),
        Ok(0)
    );
}

#[test]
fn test_try_variants_do_not_fail() {
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>().unwrap();
    let entity = coordinator.create_entity().unwrap();

    // Unregistered type and absent component both answer quietly.
    assert!(!coordinator.try_remove_component::<Velocity>(entity));
    assert!(coordinator.try_get_component::<Position>(entity).is_none());
    assert!(!coordinator.try_remove_component::<Position>(entity));

    coordinator
        .add_component(entity, Position(7.0, 8.0, 9.0))
        .unwrap();
    assert!(coordinator.try_remove_component::<Position>(entity));
    assert!(
        !coordinator.try_remove_component::<Position>(entity),
        "The second removal must report that nothing happened"
    );
}

#[test]
fn test_component_enumeration_without_naming_types() {
    let mut coordinator = Coordinator::new();
    let position_type = coordinator.register_component::<Position>().unwrap();
    let velocity_type = coordinator.register_component::<Velocity>().unwrap();
    coordinator.register_component::<Health>().unwrap();

    let entity = coordinator.create_entity().unwrap();
    coordinator
        .add_component(entity, Position(0.0, 0.0, 0.0))
        .unwrap();
    coordinator
        .add_component(entity, Velocity(1.0, 0.0, 0.0))
        .unwrap();

    let types = coordinator.component_types_of(entity);
    assert_eq!(types, vec![position_type, velocity_type]);

    let components = coordinator.components_of(entity);
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].0, position_type);
    let position = components[0]
        .1
        .downcast_ref::<Position>()
        .expect("first entry should be the Position");
    assert_eq!(*position, Position(0.0, 0.0, 0.0));
}

// --- TESTS: SCENARIOS ---

#[test]
fn test_basic_query_scenario() {
    // --- 1. SETUP ---
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>().unwrap();
    coordinator.register_component::<Velocity>().unwrap();

    let e0 = coordinator.create_entity().unwrap();
    let e1 = coordinator.create_entity().unwrap();

    // --- 2. ACTION ---
    coordinator
        .add_component(e0, Position(1.0, 2.0, 3.0))
        .unwrap();
    coordinator
        .add_component(e0, Velocity(0.1, 0.0, 0.0))
        .unwrap();
    coordinator
        .add_component(e1, Position(9.0, 9.0, 9.0))
        .unwrap();

    // --- 3. ASSERTIONS ---
    let both = coordinator.entities_with::<(Position, Velocity)>().unwrap();
    assert_eq!(both, vec![e0], "Only e0 has both components");

    assert_eq!(
        coordinator.get_component::<Position>(e1).unwrap(),
        &Position(9.0, 9.0, 9.0)
    );
}

#[test]
fn test_destroy_cleanup_scenario() {
    // --- 1. SETUP --- (state from the basic query scenario)
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>().unwrap();
    coordinator.register_component::<Velocity>().unwrap();
    let e0 = coordinator.create_entity().unwrap();
    let e1 = coordinator.create_entity().unwrap();
    coordinator
        .add_component(e0, Position(1.0, 2.0, 3.0))
        .unwrap();
    coordinator
        .add_component(e0, Velocity(0.1, 0.0, 0.0))
        .unwrap();
    coordinator
        .add_component(e1, Position(9.0, 9.0, 9.0))
        .unwrap();

    // --- 2. ACTION ---
    coordinator.destroy_entity(e0).unwrap();

    // --- 3. ASSERTIONS ---
    assert!(coordinator.try_get_component::<Position>(e0).is_none());
    assert!(coordinator.try_get_component::<Velocity>(e0).is_none());
    assert_eq!(
        coordinator.entities_with::<(Position,)>().unwrap(),
        vec![e1]
    );
    assert_eq!(coordinator.living_entity_count(), 1);
}

#[test]
fn test_query_scans_only_live_entities() {
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>().unwrap();

    let mut with_position = Vec::new();
    for i in 0..20 {
        let entity = coordinator.create_entity().unwrap();
        if i % 2 == 0 {
            coordinator
                .add_component(entity, Position(i as f32, 0.0, 0.0))
                .unwrap();
            with_position.push(entity);
        }
    }
    // Destroy one matching entity; it must drop out of the result set.
    let destroyed = with_position.remove(3);
    coordinator.destroy_entity(destroyed).unwrap();

    let found = coordinator.entities_with::<(Position,)>().unwrap();
    assert_eq!(found, with_position);
}

// --- TESTS: SINGLETON COMPONENTS ---

#[test]
fn test_singleton_lifecycle() {
    let mut coordinator = Coordinator::new();

    coordinator.register_singleton(FrameTime(0.016)).unwrap();
    assert_eq!(
        coordinator.register_singleton(FrameTime(0.033)),
        Err(EcsError::SingletonAlreadyExists {
            type_name: std::any::type_name::<FrameTime>()
        })
    );

    assert_eq!(
        coordinator.singleton::<FrameTime>().unwrap(),
        &FrameTime(0.016)
    );
    coordinator.singleton_mut::<FrameTime>().unwrap().0 = 0.008;
    assert_eq!(
        coordinator.try_singleton::<FrameTime>(),
        Some(&FrameTime(0.008))
    );

    let taken = coordinator.unregister_singleton::<FrameTime>().unwrap();
    assert_eq!(taken, FrameTime(0.008));
    assert!(matches!(
        coordinator.singleton::<FrameTime>(),
        Err(EcsError::SingletonNotFound { .. })
    ));
}

// --- TESTS: SYSTEMS ---

/// Moves every member's position by its velocity once per update.
struct PhysicsSystem {
    updates_run: usize,
}

impl GroupSystem for PhysicsSystem {
    fn update(&mut self, coordinator: &mut Coordinator, entities: &EntitySet) {
        self.updates_run += 1;
        for &entity in entities {
            let velocity = *coordinator.get_component::<Velocity>(entity).unwrap();
            let position = coordinator.get_component_mut::<Position>(entity).unwrap();
            position.0 += velocity.0;
            position.1 += velocity.1;
            position.2 += velocity.2;
        }
    }
}

/// Ticks down health over time for every entity that has some.
struct DecaySystem {
    last_dt: f32,
}

impl QuerySystem for DecaySystem {
    fn matches(components: &ComponentManager, signature: &Signature) -> bool {
        <(Health,)>::signature(components)
            .map(|mask| signature.contains_all(&mask))
            .unwrap_or(false)
    }

    fn update(&mut self, coordinator: &mut Coordinator, dt: f32, entities: &EntitySet) {
        self.last_dt = dt;
        for &entity in entities {
            let health = coordinator.get_component_mut::<Health>(entity).unwrap();
            health.0 = health.0.saturating_sub(1);
        }
    }
}

#[test]
fn test_group_system_membership_follows_mask() {
    // --- 1. SETUP ---
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>().unwrap();
    coordinator.register_component::<Velocity>().unwrap();

    coordinator
        .register_group_system(PhysicsSystem { updates_run: 0 })
        .unwrap();
    let mask = coordinator.signature_of::<(Position, Velocity)>().unwrap();
    coordinator
        .set_system_signature::<PhysicsSystem>(mask)
        .unwrap();

    let moving = coordinator.create_entity().unwrap();
    let fixed = coordinator.create_entity().unwrap();
    coordinator
        .add_component(moving, Position(0.0, 0.0, 0.0))
        .unwrap();
    coordinator
        .add_component(moving, Velocity(1.0, 0.0, 0.0))
        .unwrap();
    coordinator
        .add_component(fixed, Position(5.0, 5.0, 5.0))
        .unwrap();

    // --- 2. ASSERTIONS: membership tracks the mask exactly ---
    let members = coordinator.group_entities::<PhysicsSystem>().unwrap();
    assert!(members.contains(&moving));
    assert!(!members.contains(&fixed));

    // Removing a required component drops the entity out of the system.
    coordinator.remove_component::<Velocity>(moving).unwrap();
    assert!(!coordinator
        .group_entities::<PhysicsSystem>()
        .unwrap()
        .contains(&moving));

    // And adding it back re-admits the entity.
    coordinator
        .add_component(moving, Velocity(1.0, 0.0, 0.0))
        .unwrap();
    assert!(coordinator
        .group_entities::<PhysicsSystem>()
        .unwrap()
        .contains(&moving));
}

#[test]
fn test_group_system_update_mutates_components() {
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>().unwrap();
    coordinator.register_component::<Velocity>().unwrap();
    coordinator
        .register_group_system(PhysicsSystem { updates_run: 0 })
        .unwrap();
    let mask = coordinator.signature_of::<(Position, Velocity)>().unwrap();
    coordinator
        .set_system_signature::<PhysicsSystem>(mask)
        .unwrap();

    let entity = coordinator.create_entity().unwrap();
    coordinator
        .add_component(entity, Position(0.0, 0.0, 0.0))
        .unwrap();
    coordinator
        .add_component(entity, Velocity(1.0, 2.0, 3.0))
        .unwrap();

    coordinator.run_group_system::<PhysicsSystem>().unwrap();
    coordinator.run_group_system::<PhysicsSystem>().unwrap();

    assert_eq!(
        coordinator.get_component::<Position>(entity).unwrap(),
        &Position(2.0, 4.0, 6.0),
        "Two updates must integrate velocity twice"
    );
}

#[test]
fn test_mask_installed_after_entities_exist() {
    // Entities created before the mask is installed must still be admitted.
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>().unwrap();
    coordinator.register_component::<Velocity>().unwrap();

    let entity = coordinator.create_entity().unwrap();
    coordinator
        .add_component(entity, Position(0.0, 0.0, 0.0))
        .unwrap();
    coordinator
        .add_component(entity, Velocity(0.0, 0.0, 0.0))
        .unwrap();

    coordinator
        .register_group_system(PhysicsSystem { updates_run: 0 })
        .unwrap();
    let mask = coordinator.signature_of::<(Position, Velocity)>().unwrap();
    coordinator
        .set_system_signature::<PhysicsSystem>(mask)
        .unwrap();

    assert!(coordinator
        .group_entities::<PhysicsSystem>()
        .unwrap()
        .contains(&entity));
}

#[test]
fn test_query_system_predicate_and_timestep() {
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Health>().unwrap();
    coordinator
        .register_query_system(DecaySystem { last_dt: 0.0 })
        .unwrap();

    let wounded = coordinator.create_entity().unwrap();
    let bystander = coordinator.create_entity().unwrap();
    coordinator.add_component(wounded, Health(3)).unwrap();

    let members = coordinator.query_entities::<DecaySystem>().unwrap();
    assert!(members.contains(&wounded));
    assert!(!members.contains(&bystander));

    coordinator.run_query_system::<DecaySystem>(0.25).unwrap();
    assert_eq!(
        coordinator.get_component::<Health>(wounded).unwrap(),
        &Health(2)
    );
}

#[test]
fn test_system_registration_errors() {
    let mut coordinator = Coordinator::new();
    coordinator
        .register_group_system(PhysicsSystem { updates_run: 0 })
        .unwrap();

    assert!(matches!(
        coordinator.register_group_system(PhysicsSystem { updates_run: 0 }),
        Err(EcsError::SystemAlreadyRegistered { .. })
    ));
    assert!(matches!(
        coordinator.set_system_signature::<DummySystem>(Signature::empty()),
        Err(EcsError::SystemNotRegistered { .. })
    ));
    assert!(matches!(
        coordinator.run_query_system::<DecaySystem>(0.0),
        Err(EcsError::SystemNotRegistered { .. })
    ));
}

struct DummySystem;
impl GroupSystem for DummySystem {
    fn update(&mut self, _coordinator: &mut Coordinator, _entities: &EntitySet) {}
}

#[test]
fn test_destroy_erases_system_membership() {
    // --- 1. SETUP ---
    let mut coordinator = Coordinator::new();
    coordinator.register_component::<Position>().unwrap();
    coordinator.register_component::<Velocity>().unwrap();
    coordinator
        .register_group_system(PhysicsSystem { updates_run: 0 })
        .unwrap();
    let mask = coordinator.signature_of::<(Position, Velocity)>().unwrap();
    coordinator
        .set_system_signature::<PhysicsSystem>(mask)
        .unwrap();

    let entity = coordinator.create_entity().unwrap();
    coordinator
        .add_component(entity, Position(0.0, 0.0, 0.0))
        .unwrap();
    coordinator
        .add_component(entity, Velocity(0.0, 0.0, 0.0))
        .unwrap();
    assert!(coordinator
        .group_entities::<PhysicsSystem>()
        .unwrap()
        .contains(&entity));

    // --- 2. ACTION ---
    coordinator.destroy_entity(entity).unwrap();

    // --- 3. ASSERTIONS ---
    assert!(
        !coordinator
            .group_entities::<PhysicsSystem>()
            .unwrap()
            .contains(&entity),
        "Destroyed entities must vanish from every system set"
    );
    assert_eq!(coordinator.living_entity_count(), 0);
    assert!(coordinator.signature(entity).unwrap().is_empty());
}
