//! The general store.
//!
//! Purchases collect in a cart and only reach the wagon when the player leaves
//! the store.

use std::collections::BTreeMap;

use crate::config::StoreCfg;
use crate::constants::PRESS_ENTER;
use crate::entity::ItemKind;
use crate::error::SimResult;
use crate::mode::{
    GameMode, MenuCommand, MenuMode, ModeCore, ModeCtx, ModeKind, ModeState, NoticeState, StateId,
    Transition,
};
use crate::modes::money;
use crate::world::World;

const STORE_ADVICE: &str = "Before leaving Independence you should buy equipment and supplies. \
You will need:\n\n  - a team of oxen to pull your wagon\n  - enough food for the trip\n  \
- warm clothing for the mountain passes\n  - ammunition for hunting\n  - spare parts for your wagon";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCommand {
    Buy(ItemKind),
    Leave,
}

impl MenuCommand for StoreCommand {
    fn keyword(self) -> &'static str {
        match self {
            Self::Buy(item) => item.name(),
            Self::Leave => "leave",
        }
    }
}

/// Items in the cart, not yet paid for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreInfo {
    pub cart: BTreeMap<ItemKind, i32>,
    /// Cart total, recomputed on every state change.
    pub total_cents: i64,
    settled: bool,
}

impl StoreInfo {
    #[must_use]
    pub fn quantity(&self, item: ItemKind) -> i32 {
        self.cart.get(&item).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn compute_total(&self, cfg: &StoreCfg) -> i64 {
        self.cart
            .iter()
            .map(|(item, quantity)| i64::from(*quantity) * cfg.price(*item))
            .sum()
    }
}

pub struct StoreMode {
    core: ModeCore<StoreCommand, StoreInfo>,
}

impl StoreMode {
    pub fn create(_world: &mut World) -> Box<dyn GameMode> {
        Box::new(Self {
            core: ModeCore::new(StoreInfo::default()),
        })
    }

    fn update_debts(&mut self, world: &World) {
        let data = &mut self.core.data;
        data.total_cents = data.compute_total(&world.config.store);
        self.rebuild_menu(world);
    }

    fn rebuild_menu(&mut self, world: &World) {
        let location = world
            .trail
            .current_location()
            .map_or("Trail", |location| location.name.as_str());
        let cfg = &world.config.store;
        let data = &self.core.data;
        let menu = &mut self.core.menu;
        menu.clear();
        menu.set_header(format!(
            "{location} General Store\n{}\n--------------------------------",
            world.date()
        ));
        for item in ItemKind::STORE_GOODS {
            menu.add(
                StoreCommand::Buy(item),
                format!(
                    "{:<14} {:>9} per {} (in cart: {})",
                    capitalize(item.name()),
                    money(cfg.price(item)),
                    item.unit(),
                    data.quantity(item)
                ),
            );
        }
        menu.add(StoreCommand::Leave, "Leave store");
        menu.set_footer(format!(
            "--------------------------------\nTotal bill: {}\nAmount you have: {}",
            money(data.total_cents),
            money(world.vehicle.balance_cents - data.total_cents)
        ));
    }

    fn settle(&mut self, ctx: &mut ModeCtx<'_>) {
        let data = &mut self.core.data;
        if data.settled {
            return;
        }
        data.settled = true;
        let total = data.compute_total(&ctx.config.store);
        for (item, quantity) in &data.cart {
            let price = ctx.config.store.price(*item);
            ctx.vehicle.inventory.add(*item, *quantity);
            ctx.vehicle.inventory.set_unit_value(*item, price);
        }
        ctx.vehicle.balance_cents -= total;
        log::info!("store purchase settled for {}", money(total));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl MenuMode for StoreMode {
    type Command = StoreCommand;
    type Data = StoreInfo;

    const KIND: ModeKind = ModeKind::Store;

    fn core(&self) -> &ModeCore<StoreCommand, StoreInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<StoreCommand, StoreInfo> {
        &mut self.core
    }

    fn on_command(&mut self, command: StoreCommand, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {
            StoreCommand::Buy(item) => self.core.set_state(BuyItemState { item, error: None }),
            StoreCommand::Leave => {
                let data = &self.core.data;
                let oxen = ctx.vehicle.inventory.quantity(ItemKind::Animal)
                    + data.quantity(ItemKind::Animal);
                if ctx.trail.is_first_location() && oxen <= 0 {
                    self.core.set_state(MissingItemState {
                        item: ItemKind::Animal,
                        informed: false,
                    });
                } else if data.compute_total(&ctx.config.store) > ctx.vehicle.balance_cents {
                    self.core.set_state(NoticeState::new(
                        StateId::StoreDebt,
                        "Whoa there partner! You don't have enough money to pay for all of that.",
                    ));
                } else {
                    ctx.remove_mode_next_tick(ModeKind::Store);
                }
            }
        }
        Ok(())
    }

    fn created(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.update_debts(ctx.world());
        if ctx.trail.is_first_location() && ctx.mode_count() > 1 {
            self.core
                .set_state(NoticeState::new(StateId::StoreAdvice, STORE_ADVICE));
        }
        Ok(())
    }

    fn activated(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.update_debts(ctx.world());
        Ok(())
    }

    fn mode_added(&mut self, _added: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }

    fn mode_removed(&mut self, removed: ModeKind, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        if removed == ModeKind::Store {
            self.settle(ctx);
        }
        Ok(())
    }

    fn state_changed(&mut self, world: &World) {
        self.update_debts(world);
    }
}

/// Asks how many of one item to put in the cart.
pub struct BuyItemState {
    item: ItemKind,
    error: Option<String>,
}

impl ModeState<StoreInfo> for BuyItemState {
    fn id(&self) -> StateId {
        StateId::BuyItem
    }

    fn render(&self, data: &StoreInfo, world: &World) -> String {
        let cfg = &world.config.store;
        let mut out = format!(
            "{} cost {} per {}.\nYou may carry up to {}. You have {} in your cart.\n\nHow many do you want?",
            capitalize(self.item.name()),
            money(cfg.price(self.item)),
            self.item.unit(),
            cfg.max_quantity(self.item),
            data.quantity(self.item)
        );
        if let Some(error) = &self.error {
            out.push_str("\n\n");
            out.push_str(error);
        }
        out
    }

    fn on_input(
        &mut self,
        line: &str,
        data: &mut StoreInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<StoreInfo> {
        let max = ctx.config.store.max_quantity(self.item);
        match line.trim().parse::<i32>() {
            Ok(quantity) if (0..=max).contains(&quantity) => {
                if quantity == 0 {
                    data.cart.remove(&self.item);
                } else {
                    data.cart.insert(self.item, quantity);
                }
                Transition::ClearToMenu
            }
            _ => Transition::to(Self {
                item: self.item,
                error: Some(format!("Please enter a number from 0 to {max}.")),
            }),
        }
    }
}

/// Refuses to let the party leave without a mandatory item. The first key
/// press is swallowed so the warning cannot be skipped by accident.
pub struct MissingItemState {
    item: ItemKind,
    informed: bool,
}

impl ModeState<StoreInfo> for MissingItemState {
    fn id(&self) -> StateId {
        StateId::MissingItem
    }

    fn render(&self, _data: &StoreInfo, _world: &World) -> String {
        format!(
            "You need to purchase at least a single {} in order to begin your trip!\n\n{PRESS_ENTER}",
            self.item.unit()
        )
    }

    fn accepts_input(&self) -> bool {
        false
    }

    fn on_input(
        &mut self,
        _line: &str,
        _data: &mut StoreInfo,
        _ctx: &mut ModeCtx<'_>,
    ) -> Transition<StoreInfo> {
        if self.informed {
            Transition::ClearToMenu
        } else {
            self.informed = true;
            Transition::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::trail::Trail;

    fn world() -> World {
        let mut world = World::new(SimulationConfig::load_from_static(), Trail::load_from_static(), 9);
        world.vehicle.balance_cents = 10_000;
        world
    }

    fn store(world: &mut World, mode_count: usize) -> Box<dyn GameMode> {
        let mut mode = StoreMode::create(world);
        mode.on_post_create(&mut ModeCtx::new(world, mode_count)).unwrap();
        mode
    }

    #[test]
    fn advice_shows_at_the_first_location_only_with_company() {
        let mut world = world();
        assert_eq!(store(&mut world, 3).current_state(), Some(StateId::StoreAdvice));
        assert_eq!(store(&mut world, 1).current_state(), None);
    }

    #[test]
    fn missing_oxen_needs_two_inputs_to_clear() {
        for line in ["", "x"] {
            let mut world = world();
            let mut mode = store(&mut world, 1);
            let mut ctx = ModeCtx::new(&mut world, 1);

            mode.on_input("leave", &mut ctx).unwrap();
            assert_eq!(mode.current_state(), Some(StateId::MissingItem));
            mode.on_input(line, &mut ctx).unwrap();
            assert_eq!(mode.current_state(), Some(StateId::MissingItem), "{line:?}");
            mode.on_input(line, &mut ctx).unwrap();
            assert_eq!(mode.current_state(), None, "{line:?}");
            assert_eq!(ctx.pending_directives(), 0);
        }
    }

    #[test]
    fn invalid_quantity_reenters_with_an_error() {
        let mut world = world();
        let mut mode = store(&mut world, 1);
        let mut ctx = ModeCtx::new(&mut world, 1);

        mode.on_input("oxen", &mut ctx).unwrap();
        mode.on_input("lots", &mut ctx).unwrap();
        assert_eq!(mode.current_state(), Some(StateId::BuyItem));
        assert!(mode.render(&ctx).contains("Please enter a number"));

        mode.on_input("4", &mut ctx).unwrap();
        assert_eq!(mode.current_state(), None);
        assert!(mode.render(&ctx).contains("Total bill: $80.00"));
    }

    #[test]
    fn overspending_shows_the_debt_warning() {
        let mut world = world();
        let mut mode = store(&mut world, 1);
        let mut ctx = ModeCtx::new(&mut world, 1);

        mode.on_input("1", &mut ctx).unwrap();
        mode.on_input("20", &mut ctx).unwrap();
        mode.on_input("leave", &mut ctx).unwrap();
        assert_eq!(mode.current_state(), Some(StateId::StoreDebt));
    }

    #[test]
    fn leaving_settles_the_cart() {
        let mut world = world();
        let mut mode = store(&mut world, 1);
        {
            let mut ctx = ModeCtx::new(&mut world, 1);
            mode.on_input("1", &mut ctx).unwrap();
            mode.on_input("2", &mut ctx).unwrap();
            mode.on_input("food", &mut ctx).unwrap();
            mode.on_input("100", &mut ctx).unwrap();
            mode.on_input("leave", &mut ctx).unwrap();
        }
        assert!(world.next_directive().is_some_and(|directive| {
            directive == crate::world::Directive::RemoveMode(ModeKind::Store)
        }));

        mode.on_mode_removed(ModeKind::Store, &mut ModeCtx::new(&mut world, 0))
            .unwrap();
        assert_eq!(world.vehicle.inventory.quantity(ItemKind::Animal), 2);
        assert_eq!(world.vehicle.inventory.quantity(ItemKind::Food), 100);
        assert_eq!(world.vehicle.balance_cents, 10_000 - 4_000 - 2_000);
    }
}
