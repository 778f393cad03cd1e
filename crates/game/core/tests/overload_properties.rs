use std::sync::Arc;

use overload_core::{
    ActionDef, ActionId, ActionKind, AvailabilityChecker, Clip, Encounter, Gauge, GaugeMeter,
    Inventory, ItemEffect, ItemId, OverloadConfig, OverloadQueue, PlayerState, QueueEntry,
    QueueError, ResourcePool, TargetHandle, TargetKind, TargetMask, UnitArena, UnitSpec,
};

fn attack(energy: u32) -> Arc<ActionDef> {
    Arc::new(
        ActionDef::new(ActionId(1), "Pistol Shot", ActionKind::Attack { damage: 4 })
            .with_costs(5, energy),
    )
}

fn tonic(restore: u32) -> Arc<ActionDef> {
    Arc::new(
        ActionDef::new(
            ActionId(20),
            "Tonic",
            ActionKind::Item {
                item: ItemId(2),
                effect: ItemEffect::RestoreEnergy(restore),
            },
        )
        .with_costs(0, 1)
        .with_targets(TargetMask::PLAYER),
    )
}

fn config() -> OverloadConfig {
    OverloadConfig::new()
        .with_max_overload(8)
        .with_base_overload_cost(5)
}

fn enemy() -> TargetHandle {
    TargetHandle::new(1, 0)
}

fn player_with_energy(energy: f32) -> PlayerState {
    PlayerState::new(
        ResourcePool::new(GaugeMeter::full(200.0), GaugeMeter::new(energy, 200.0)),
        Clip::loaded(16),
        Inventory::new().with_item(ItemId(2), 3),
    )
}

fn world() -> (UnitArena, TargetHandle) {
    let mut arena = UnitArena::new(UnitSpec::new("Hunter", TargetKind::Player, 100));
    let daemon = arena.spawn(UnitSpec::new("Daemon", TargetKind::Enemy, 500));
    (arena, daemon)
}

#[test]
fn queue_never_exceeds_max_overload() {
    let mut queue = OverloadQueue::new(&config());

    for order in 0..8 {
        queue
            .add(QueueEntry::new(attack(2), enemy(), order))
            .expect("queue has room");
        assert!(queue.len() <= queue.max_overload());
    }

    let snapshot = queue.clone();
    assert_eq!(
        queue.add(QueueEntry::new(attack(2), enemy(), 8)),
        Err(QueueError::Full { max: 8 })
    );
    assert_eq!(queue.len(), 8);
    assert_eq!(queue, snapshot);
}

#[test]
fn energy_cost_matches_closed_form() {
    let costs = [3u32, 0, 7, 1, 4];
    let mut queue = OverloadQueue::new(&config());
    for (order, cost) in costs.iter().enumerate() {
        queue
            .add(QueueEntry::new(attack(*cost), enemy(), order as u32))
            .unwrap();
    }
    queue
        .add(QueueEntry::new(tonic(12), TargetHandle::PLAYER, 5))
        .unwrap();

    let base: u32 = costs.iter().sum::<u32>() + 1;
    let surcharge: u32 = (0..6u32).map(|i| i * 5).sum();
    let expected = (base + surcharge) as i32 - 12;
    assert_eq!(queue.energy_cost(), expected);
}

#[test]
fn undo_then_readd_restores_queue() {
    let mut queue = OverloadQueue::new(&config());
    queue.add(QueueEntry::new(attack(2), enemy(), 0)).unwrap();
    queue.add(QueueEntry::new(attack(3), enemy(), 1)).unwrap();
    let before = queue.clone();

    let removed = queue.remove_last().unwrap();
    queue
        .add(QueueEntry::new(removed.action, removed.target, removed.order))
        .unwrap();

    assert_eq!(queue, before);
}

#[test]
fn cancel_never_touches_resources() {
    let (arena, daemon) = world();
    let player = player_with_energy(150.0);
    let snapshot = player.clone();
    let mut encounter = Encounter::new(&config());

    encounter.enqueue(attack(2), daemon, &player, &arena).unwrap();
    encounter
        .enqueue(tonic(10), TargetHandle::PLAYER, &player, &arena)
        .unwrap();
    encounter.cancel();

    assert!(encounter.queue().is_empty());
    assert_eq!(player, snapshot);
}

#[test]
fn draining_an_empty_queue_is_a_noop() {
    let (mut arena, _) = world();
    let mut player = player_with_energy(42.0);
    let snapshot = player.clone();
    let mut encounter = Encounter::new(&config());

    let report = encounter.commit(&mut player, &mut arena);

    assert!(report.is_empty());
    assert_eq!(player, snapshot);
}

#[test]
fn three_attacks_cost_twenty_one() {
    let mut queue = OverloadQueue::new(&config());
    for order in 0..3 {
        queue.add(QueueEntry::new(attack(2), enemy(), order)).unwrap();
    }
    assert_eq!(queue.energy_cost(), (2 + 2 + 2) + (5 + 10));
    assert_eq!(queue.energy_cost(), 21);
}

#[test]
fn ninth_add_is_rejected() {
    let (arena, daemon) = world();
    let player = player_with_energy(200.0);
    let mut encounter = Encounter::new(&config());
    let free = Arc::new(ActionDef::new(ActionId(9), "Feint", ActionKind::Menu));

    for _ in 0..8 {
        encounter
            .enqueue(free.clone(), daemon, &player, &arena)
            .expect("room for eight");
    }
    assert!(encounter.enqueue(free, daemon, &player, &arena).is_err());
    assert_eq!(encounter.queue().len(), 8);
}

#[test]
fn energy_affordability_is_strict_at_twenty_one() {
    let mut queue = OverloadQueue::new(&config());
    queue.add(QueueEntry::new(attack(2), enemy(), 0)).unwrap();
    queue.add(QueueEntry::new(attack(2), enemy(), 1)).unwrap();

    let candidate = attack(2);

    let exact = player_with_energy(21.0);
    let checker = AvailabilityChecker::new(&queue, &exact);
    assert_eq!(checker.energy_required(&candidate), 21);
    assert!(!checker.can_afford_energy(&candidate));

    let spare = player_with_energy(22.0);
    assert!(AvailabilityChecker::new(&queue, &spare).can_afford_energy(&candidate));
}

#[test]
fn commit_charges_what_preview_showed_when_everything_lands() {
    let (mut arena, daemon) = world();
    let mut player = player_with_energy(100.0);
    let mut encounter = Encounter::new(&config());

    for _ in 0..3 {
        encounter.enqueue(attack(2), daemon, &player, &arena).unwrap();
    }
    let preview = encounter.preview();
    let report = encounter.commit(&mut player, &mut arena);

    assert_eq!(preview.energy_cost, 21);
    assert_eq!(report.energy_spent, preview.energy_cost as f32);
    assert_eq!(player.resources.get(Gauge::Energy), 79.0);
    assert_eq!(player.resources.get(Gauge::Action), 185.0);
}
