//! Plain-text rendering of runtime replies.
use std::fmt::Write;
use std::sync::Arc;

use overload_core::{
    ActionDef, Applied, DrainReport, Gauge, ImpactOutcome, PlayerState, QueuePreview, Round,
};
use overload_runtime::UnitView;

pub fn preview(preview: &QueuePreview) -> String {
    format!(
        "queued {} | energy {} (next +{}) | action {} | ammo {} | heal {}",
        preview.queued,
        preview.energy_cost,
        preview.next_surcharge,
        preview.action_cost,
        preview.ammo_cost,
        preview.health_delta,
    )
}

pub fn report(report: &DrainReport) -> String {
    if report.is_empty() {
        return "nothing queued".to_string();
    }

    let mut out = String::new();
    for entry in &report.entries {
        let detail = match &entry.outcome {
            Ok(applied) => applied_text(applied),
            Err(failure) => format!("failed: {failure}"),
        };
        let _ = writeln!(
            out,
            "  {}. {} -> {}: {}",
            entry.order + 1,
            entry.action,
            entry.target,
            detail
        );
    }
    let _ = write!(
        out,
        "executed {}, failed {}, energy spent {:.1} (previewed {}), action spent {:.1}",
        report.executed,
        report.failed,
        report.energy_spent,
        report.previewed_energy,
        report.action_spent,
    );
    out
}

fn applied_text(applied: &Applied) -> String {
    match applied {
        Applied::Nothing => "done".to_string(),
        Applied::Impact(ImpactOutcome::Damaged {
            dealt,
            remaining,
            killed,
        }) => {
            let suffix = if *killed { ", killed" } else { "" };
            format!("{dealt} damage ({remaining} left{suffix})")
        }
        Applied::Impact(ImpactOutcome::Healed { restored, health }) => {
            format!("healed {restored} (now {health})")
        }
        Applied::Imbued { slot } => format!("imbued round {}", slot + 1),
        Applied::Restored { gauge, amount } => format!("restored {amount:.1} {gauge}"),
    }
}

pub fn player(player: &PlayerState) -> String {
    let resources = &player.resources;
    let mut out = String::new();
    for gauge in [Gauge::Action, Gauge::Energy] {
        let meter = resources.meter(gauge);
        let _ = writeln!(
            out,
            "{gauge:>6}: {:6.1} / {:.1} ({:.0}%)",
            meter.current(),
            meter.maximum(),
            meter.fraction() * 100.0
        );
    }

    let rounds: String = player.clip.rounds().map(round_glyph).collect();
    let empty = player
        .clip
        .capacity()
        .saturating_sub(player.clip.loaded_rounds());
    let _ = writeln!(out, "  clip: [{}{}]", rounds, "_".repeat(empty));

    let items: Vec<String> = player
        .inventory
        .iter()
        .map(|(item, count)| format!("{item} x{count}"))
        .collect();
    let _ = write!(
        out,
        " items: {}",
        if items.is_empty() {
            "none".to_string()
        } else {
            items.join(", ")
        }
    );
    out
}

fn round_glyph(round: &Round) -> char {
    match round.imbue {
        None => '|',
        Some(element) => element
            .to_string()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?'),
    }
}

pub fn units(units: &[UnitView]) -> String {
    units
        .iter()
        .map(|view| {
            let spec = &view.unit.spec;
            let distance = spec
                .distance
                .map(|d| format!(" @{d:.0}m"))
                .unwrap_or_default();
            let weakness = spec
                .weakness
                .map(|element| format!(" weak:{element}"))
                .unwrap_or_default();
            format!(
                "  #{:<3} {:<16} {:<11} {:>4}/{:<4}{}{}",
                view.handle.index,
                spec.name,
                spec.kind.to_string(),
                view.unit.health,
                spec.max_health,
                distance,
                weakness
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn actions(actions: &[Arc<ActionDef>]) -> String {
    actions
        .iter()
        .map(|def| {
            let range = def
                .range
                .map(|r| format!(" range {r:.0}"))
                .unwrap_or_default();
            let once = if def.single_use { " once" } else { "" };
            format!(
                "  {:>3} {:<14} {:<7} ap {:>3} en {:>3}{}{}",
                def.id.0,
                def.name,
                def.category().to_string(),
                def.action_cost,
                def.energy_cost,
                range,
                once
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
