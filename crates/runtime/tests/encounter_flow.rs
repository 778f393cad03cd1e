use std::time::Duration;

use overload_content::ContentFactory;
use overload_core::{
    ActionCatalog, ActionDef, ActionId, ActionKind, Clip, Gauge, GaugeMeter, Inventory,
    PlayerState, ResourcePool, TargetHandle, TargetKind, Unavailable, UnitSpec,
};
use overload_runtime::{
    CombatEvent, Event, QueueEvent, ResourceEvent, Runtime, RuntimeConfig, RuntimeError,
    RuntimeHandle, Topic,
};
use tokio::sync::broadcast;
use tokio::time::timeout;

const SHOT: ActionId = ActionId(1);

fn catalog() -> ActionCatalog {
    ActionCatalog::from_defs([
        ActionDef::new(SHOT, "Shot", ActionKind::Attack { damage: 10 }).with_costs(5, 2),
    ])
    .unwrap()
}

fn player(energy: f32) -> PlayerState {
    PlayerState::new(
        ResourcePool::new(GaugeMeter::full(100.0), GaugeMeter::new(energy, 100.0)),
        Clip::loaded(6),
        Inventory::new(),
    )
}

async fn start(energy: f32, regen_interval: Option<Duration>) -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig {
            regen_interval,
            ..RuntimeConfig::default()
        })
        .catalog(catalog())
        .player(UnitSpec::new("Hunter", TargetKind::Player, 100), player(energy))
        .roster(vec![UnitSpec::new("Imp", TargetKind::Enemy, 50)])
        .build()
        .await
        .expect("runtime should build")
}

async fn first_enemy(handle: &RuntimeHandle) -> TargetHandle {
    handle
        .begin_encounter()
        .await
        .expect("encounter should begin")
        .into_iter()
        .find(|view| view.unit.spec.kind == TargetKind::Enemy)
        .expect("roster has an enemy")
        .handle
}

async fn next_event(rx: &mut broadcast::Receiver<Event>) -> Event {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("event should arrive")
        .expect("bus should stay open")
}

#[tokio::test]
async fn enqueue_preview_commit_through_handle() {
    let runtime = start(100.0, None).await;
    let handle = runtime.handle();
    let imp = first_enemy(&handle).await;

    for _ in 0..3 {
        handle.enqueue(SHOT, imp).await.unwrap();
    }
    let preview = handle.preview().await.unwrap();
    assert_eq!(preview.queued, 3);
    assert_eq!(preview.energy_cost, 21);
    assert_eq!(preview.ammo_cost, 3);

    let report = handle.commit().await.unwrap();
    assert_eq!(report.executed, 3);
    assert_eq!(report.energy_spent, 21.0);

    let player = handle.player().await.unwrap();
    assert_eq!(player.resources.get(Gauge::Energy), 79.0);
    assert_eq!(player.clip.loaded_rounds(), 3);

    let units = handle.units().await.unwrap();
    let imp_view = units.iter().find(|view| view.handle == imp).unwrap();
    assert_eq!(imp_view.unit.health, 20);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn queue_events_carry_fresh_preview() {
    let runtime = start(100.0, None).await;
    let handle = runtime.handle();
    let imp = first_enemy(&handle).await;
    let mut queue_rx = handle.subscribe(Topic::Queue);

    handle.enqueue(SHOT, imp).await.unwrap();
    match next_event(&mut queue_rx).await {
        Event::Queue(QueueEvent::Enqueued {
            action, preview, ..
        }) => {
            assert_eq!(action, SHOT);
            assert_eq!(preview.queued, 1);
            assert_eq!(preview.energy_cost, 2);
        }
        other => panic!("unexpected event {other:?}"),
    }

    handle.undo().await.unwrap();
    match next_event(&mut queue_rx).await {
        Event::Queue(QueueEvent::Removed { preview, .. }) => assert_eq!(preview.queued, 0),
        other => panic!("unexpected event {other:?}"),
    }

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn unaffordable_enqueue_is_rejected_and_published() {
    let runtime = start(3.0, None).await;
    let handle = runtime.handle();
    let imp = first_enemy(&handle).await;
    let mut queue_rx = handle.subscribe(Topic::Queue);

    handle.enqueue(SHOT, imp).await.unwrap();
    let err = handle.enqueue(SHOT, imp).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Unavailable(Unavailable::InsufficientEnergy { .. })
    ));
    assert!(err.is_recoverable());

    let _enqueued = next_event(&mut queue_rx).await;
    assert!(matches!(
        next_event(&mut queue_rx).await,
        Event::Queue(QueueEvent::Rejected { .. })
    ));
    assert_eq!(handle.preview().await.unwrap().queued, 1);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn commands_require_an_encounter() {
    let runtime = start(100.0, None).await;
    let handle = runtime.handle();

    assert!(matches!(
        handle.enqueue(SHOT, TargetHandle::PLAYER).await,
        Err(RuntimeError::NoEncounter)
    ));
    assert!(matches!(handle.commit().await, Err(RuntimeError::NoEncounter)));

    first_enemy(&handle).await;
    assert!(matches!(
        handle.begin_encounter().await,
        Err(RuntimeError::EncounterActive)
    ));
    assert!(matches!(
        handle.enqueue(ActionId(99), TargetHandle::PLAYER).await,
        Err(RuntimeError::UnknownAction(ActionId(99)))
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn ending_an_encounter_drops_the_batch_without_charging() {
    let runtime = start(100.0, None).await;
    let handle = runtime.handle();
    let imp = first_enemy(&handle).await;
    let mut combat_rx = handle.subscribe(Topic::Combat);

    handle.enqueue(SHOT, imp).await.unwrap();
    handle.enqueue(SHOT, imp).await.unwrap();
    assert_eq!(handle.end_encounter().await.unwrap(), 0);

    assert!(matches!(
        next_event(&mut combat_rx).await,
        Event::Combat(CombatEvent::EncounterEnded { commits: 0 })
    ));
    let player = handle.player().await.unwrap();
    assert_eq!(player.resources.get(Gauge::Energy), 100.0);
    assert_eq!(player.clip.loaded_rounds(), 6);

    let units = handle.units().await.unwrap();
    assert_eq!(units.len(), 1);
    assert!(units[0].handle.is_player());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn despawned_target_fails_at_drain_and_batch_continues() {
    let runtime = start(100.0, None).await;
    let handle = runtime.handle();
    let imp = first_enemy(&handle).await;
    let decoy = handle
        .spawn(UnitSpec::new("Decoy", TargetKind::Enemy, 30))
        .await
        .unwrap();

    handle.enqueue(SHOT, decoy).await.unwrap();
    handle.enqueue(SHOT, imp).await.unwrap();
    assert!(handle.despawn(decoy).await.unwrap());

    let report = handle.commit().await.unwrap();
    assert_eq!(report.executed, 1);
    assert_eq!(report.failed, 1);
    assert!(!report.entries[0].succeeded());
    assert!(report.entries[1].succeeded());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn regeneration_ticks_refill_energy() {
    let runtime = start(10.0, Some(Duration::from_millis(10))).await;
    let handle = runtime.handle();
    let mut resources_rx = handle.subscribe(Topic::Resources);

    match next_event(&mut resources_rx).await {
        Event::Resources(ResourceEvent::Regenerated { delta, energy, .. }) => {
            assert!(delta.energy > 0.0);
            assert!(energy > 10.0);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let energy = handle.player().await.unwrap().resources.get(Gauge::Energy);
    assert!(energy > 10.0 && energy <= 100.0);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn reload_tops_up_the_clip() {
    let runtime = start(100.0, None).await;
    let handle = runtime.handle();
    let imp = first_enemy(&handle).await;

    handle.enqueue(SHOT, imp).await.unwrap();
    handle.enqueue(SHOT, imp).await.unwrap();
    handle.commit().await.unwrap();

    assert_eq!(handle.reload().await.unwrap(), 2);
    assert_eq!(handle.reload().await.unwrap(), 0);
    assert_eq!(handle.player().await.unwrap().clip.loaded_rounds(), 6);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn embedded_content_builds_a_runtime() {
    let bundle = ContentFactory::embedded().load_all().unwrap();
    let roster_len = bundle.roster.len();
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            regen_interval: None,
            ..RuntimeConfig::default()
        })
        .content(bundle)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let units = handle.begin_encounter().await.unwrap();
    assert_eq!(units.len(), roster_len + 1);
    assert!(!handle.actions().await.unwrap().is_empty());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[test]
fn events_serialize_to_json() {
    let event = Event::Queue(QueueEvent::Cleared { dropped: 2 });
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("Cleared"));
}

#[tokio::test]
async fn building_without_content_fails() {
    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::MissingContent)));
}

#[tokio::test]
async fn subscribe_multiple_routes_each_topic_separately() {
    let runtime = start(100.0, None).await;
    let handle = runtime.handle();
    let mut receivers = handle.subscribe_multiple(&[Topic::Queue, Topic::Combat]);
    assert_eq!(receivers.len(), 2);

    let imp = first_enemy(&handle).await;
    handle.enqueue(SHOT, imp).await.unwrap();

    let combat_rx = receivers.get_mut(&Topic::Combat).unwrap();
    assert!(matches!(
        next_event(combat_rx).await,
        Event::Combat(CombatEvent::EncounterStarted { .. })
    ));
    let queue_rx = receivers.get_mut(&Topic::Queue).unwrap();
    assert!(matches!(
        next_event(queue_rx).await,
        Event::Queue(QueueEvent::Enqueued { .. })
    ));
    assert!(queue_rx.try_recv().is_err());

    drop(handle);
    runtime.shutdown().await.unwrap();
}
