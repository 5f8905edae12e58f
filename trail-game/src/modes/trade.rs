//! Trading with other travellers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::TradeCfg;
use crate::entity::{Inventory, ItemKind};
use crate::error::SimResult;
use crate::mode::{GameMode, MenuCommand, MenuMode, ModeCore, ModeCtx, ModeKind, NoticeState, StateId};
use crate::rng::check_percent;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeGood {
    pub item: ItemKind,
    pub amount: i32,
}

/// The trader wants `give` from the party in exchange for `receive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub give: TradeGood,
    pub receive: TradeGood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeResolution {
    Accepted,
    NoOffer,
    Unaffordable,
}

/// Build an offer for something the party actually owns.
pub fn generate_offer<R: Rng + ?Sized>(
    inventory: &Inventory,
    cfg: &TradeCfg,
    rng: &mut R,
) -> Option<TradeOffer> {
    if !check_percent(rng, cfg.offer_pct) {
        return None;
    }
    let give_candidates: Vec<ItemKind> = ItemKind::STORE_GOODS
        .into_iter()
        .filter(|item| inventory.quantity(*item) > 0)
        .collect();
    if give_candidates.is_empty() {
        return None;
    }
    let give_item = give_candidates[rng.gen_range(0..give_candidates.len())];
    let receive_candidates: Vec<ItemKind> = ItemKind::STORE_GOODS
        .into_iter()
        .filter(|item| *item != give_item)
        .collect();
    let receive_item = receive_candidates[rng.gen_range(0..receive_candidates.len())];

    let give_cap = lot_cap(cfg, give_item).min(inventory.quantity(give_item));
    Some(TradeOffer {
        give: TradeGood {
            item: give_item,
            amount: rng.gen_range(1..=give_cap.max(1)),
        },
        receive: TradeGood {
            item: receive_item,
            amount: rng.gen_range(1..=lot_cap(cfg, receive_item)),
        },
    })
}

fn lot_cap(cfg: &TradeCfg, item: ItemKind) -> i32 {
    cfg.max_lot.get(&item).copied().unwrap_or(1).max(1)
}

/// Swap goods if the party still has what the trader wants.
pub fn apply_offer(inventory: &mut Inventory, offer: Option<TradeOffer>) -> TradeResolution {
    let Some(offer) = offer else {
        return TradeResolution::NoOffer;
    };
    if inventory.quantity(offer.give.item) < offer.give.amount {
        return TradeResolution::Unaffordable;
    }
    inventory.remove(offer.give.item, offer.give.amount);
    inventory.add(offer.receive.item, offer.receive.amount);
    TradeResolution::Accepted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeCommand {
    Accept,
    Decline,
}

impl MenuCommand for TradeCommand {
    fn keyword(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "leave",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeInfo {
    pub offer: Option<TradeOffer>,
    pub resolution: Option<TradeResolution>,
}

pub struct TradeMode {
    core: ModeCore<TradeCommand, TradeInfo>,
}

impl TradeMode {
    pub fn create(_world: &mut World) -> Box<dyn GameMode> {
        Box::new(Self {
            core: ModeCore::new(TradeInfo::default()),
        })
    }

    fn rebuild_menu(&mut self) {
        let data = &self.core.data;
        let menu = &mut self.core.menu;
        menu.clear();
        match (data.offer, data.resolution) {
            (Some(offer), None) => {
                menu.set_header(format!(
                    "A fellow traveller would like {} {}.\nThey are willing to trade {} {}.",
                    offer.give.amount, offer.give.item, offer.receive.amount, offer.receive.item
                ));
                menu.add(TradeCommand::Accept, "Accept the trade");
                menu.add(TradeCommand::Decline, "Decline and move on");
            }
            _ => {
                menu.set_header("Nobody else wants to trade right now.");
                menu.add(TradeCommand::Decline, "Move on");
            }
        }
    }
}

impl MenuMode for TradeMode {
    type Command = TradeCommand;
    type Data = TradeInfo;

    const KIND: ModeKind = ModeKind::Trade;

    fn core(&self) -> &ModeCore<TradeCommand, TradeInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<TradeCommand, TradeInfo> {
        &mut self.core
    }

    fn on_command(&mut self, command: TradeCommand, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {
            TradeCommand::Accept => {
                let resolution = apply_offer(&mut ctx.vehicle.inventory, self.core.data.offer);
                log::info!("trade resolved as {resolution:?}");
                self.core.data.resolution = Some(resolution);
                let text = match resolution {
                    TradeResolution::Accepted => "The trade is done. You shake hands and part ways.",
                    TradeResolution::Unaffordable => "You do not have enough to make that trade.",
                    TradeResolution::NoOffer => "There is nothing to trade.",
                };
                self.core.set_state(NoticeState::new(StateId::TradeResult, text));
            }
            TradeCommand::Decline => ctx.remove_mode_next_tick(ModeKind::Trade),
        }
        Ok(())
    }

    fn created(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        let world: &mut World = ctx;
        self.core.data.offer = generate_offer(
            &world.vehicle.inventory,
            &world.config.trade,
            world.rng.trade(),
        );
        self.rebuild_menu();
        Ok(())
    }

    fn activated(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }

    fn mode_added(&mut self, _added: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }

    fn state_changed(&mut self, _world: &World) {
        self.rebuild_menu();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn cfg() -> TradeCfg {
        crate::config::SimulationConfig::load_from_static().trade
    }

    #[test]
    fn offers_only_ask_for_owned_goods() {
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Ammo, 50);
        let mut cfg = cfg();
        cfg.offer_pct = 100;
        let mut rng = SmallRng::seed_from_u64(21);
        for _ in 0..50 {
            let offer = generate_offer(&inventory, &cfg, &mut rng).unwrap();
            assert_eq!(offer.give.item, ItemKind::Ammo);
            assert_ne!(offer.receive.item, ItemKind::Ammo);
            assert!((1..=50).contains(&offer.give.amount));
        }
    }

    #[test]
    fn empty_wagon_gets_no_offer() {
        let mut rng = SmallRng::seed_from_u64(21);
        assert_eq!(generate_offer(&Inventory::default(), &cfg(), &mut rng), None);
        assert_eq!(
            apply_offer(&mut Inventory::default(), None),
            TradeResolution::NoOffer
        );
    }

    #[test]
    fn accepted_trade_swaps_goods() {
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Clothes, 3);
        let offer = TradeOffer {
            give: TradeGood {
                item: ItemKind::Clothes,
                amount: 2,
            },
            receive: TradeGood {
                item: ItemKind::Food,
                amount: 60,
            },
        };
        assert_eq!(apply_offer(&mut inventory, Some(offer)), TradeResolution::Accepted);
        assert_eq!(inventory.quantity(ItemKind::Clothes), 1);
        assert_eq!(inventory.quantity(ItemKind::Food), 60);
        assert_eq!(apply_offer(&mut inventory, Some(offer)), TradeResolution::Unaffordable);
    }
}
