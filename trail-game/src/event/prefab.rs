//! Reusable building blocks shared by several events.

use std::collections::BTreeMap;

use rand::Rng;

use crate::config::DestroyerCfg;
use crate::entity::{EventTarget, Inventory, ItemKind};
use crate::event::{EventContext, EventKind};
use crate::rng::check_percent;
use crate::world::{Directive, World};

pub type DestroyedItems = BTreeMap<ItemKind, i32>;

pub const NO_LOSS_OF_ITEMS: &str = "no loss of items.";

/// Customization points for events built on [`ItemDestroyer`].
pub trait DestroyerHooks {
    /// Opening line, e.g. what caused the loss.
    fn on_pre_destroy(&self) -> String;

    /// Closing line once losses are known. Implementations report
    /// [`NO_LOSS_OF_ITEMS`] when `destroyed` is empty.
    fn on_post_destroy(&self, destroyed: &DestroyedItems, world: &mut World) -> String;
}

/// Removes random fractions of random items from the wagon.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemDestroyer;

impl ItemDestroyer {
    pub fn run(hooks: &dyn DestroyerHooks, ctx: &mut EventContext, world: &mut World) -> DestroyedItems {
        ctx.note(hooks.on_pre_destroy());
        let destroyed = destroy_items(
            &mut world.vehicle.inventory,
            &world.config.destroyer,
            world.rng.events(),
        );
        for (item, amount) in &destroyed {
            ctx.note(format!("{amount} {item}"));
        }
        ctx.note(hooks.on_post_destroy(&destroyed, world));
        destroyed
    }
}

/// Roll every destructible, stocked item against the pick chance and remove a
/// random share of each one hit.
pub fn destroy_items<R: Rng + ?Sized>(
    inventory: &mut Inventory,
    cfg: &DestroyerCfg,
    rng: &mut R,
) -> DestroyedItems {
    let stocked: Vec<(ItemKind, i32)> = inventory
        .stocked()
        .filter(|(item, _)| item.is_destructible())
        .map(|(item, stock)| (item, stock.quantity))
        .collect();

    let mut destroyed = DestroyedItems::new();
    for (item, quantity) in stocked {
        if !check_percent(rng, cfg.pick_pct) {
            continue;
        }
        let share = cfg.loss_pct.roll(rng);
        let lost = (quantity * share / 100).max(1);
        let removed = inventory.remove(item, lost);
        if removed > 0 {
            destroyed.insert(item, removed);
        }
    }
    destroyed
}

/// Give every living passenger a chance of dying from `cause`.
///
/// The dead are never rolled for. A leader death also fires the leader's
/// death event, which ends the game.
pub fn try_kill_passengers(world: &mut World, cause: &str) -> String {
    let odds = world.config.destroyer.kill_pct;
    let mut lines = Vec::new();
    let mut fallen_leader = None;

    for (index, person) in world.vehicle.passengers.iter_mut().enumerate() {
        if !person.is_alive() || !check_percent(world.rng.events(), odds) {
            continue;
        }
        person.kill();
        if person.is_leader() {
            fallen_leader = Some(index);
            lines.push(format!("{}, the party leader, was {cause}.", person.name()));
        } else {
            lines.push(format!("{} was {cause}.", person.name()));
        }
    }

    if let Some(index) = fallen_leader {
        world.send(Directive::TriggerEvent {
            target: EventTarget::Person(index),
            kind: EventKind::DeathPlayer,
        });
    }

    if lines.is_empty() {
        "Everyone escaped unharmed.".to_string()
    } else {
        lines.join("\n")
    }
}
