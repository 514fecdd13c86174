//! Farm simulation rules. Pure functions over `FarmState`; a call that
//! returns `Err` leaves the state untouched.

use rand::Rng;
use thiserror::Error;

use super::state::{
    Disaster, FarmItem, FarmPhase, FarmState, Rank, ALL_DISASTERS, FERTILIZER_DAILY_CAP,
    FERTILIZER_PROGRESS, FORCE_HARVEST_REWARD, GROW_PROGRESS, GROW_WATER_COST, HARVEST_REWARD,
    LAST_DAY, MARKET_HARVEST_REWARD, MAX_PROGRESS, MAX_STAMINA, MAX_WATER, WATER_REFILL_COST,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FarmError {
    #[error("體力不足，請結束這一天！")]
    NoStamina,
    #[error("水分不足！請補充水分。")]
    InsufficientWater,
    #[error("資金不足！需要 ${needed}")]
    InsufficientFunds { needed: u32 },
    #[error("水分已滿，無需補水！")]
    WaterFull,
    #[error("{}不足！", .0.name())]
    OutOfStock(FarmItem),
    #[error("今日肥料使用次數已達上限 (5次)！")]
    DailyCapReached,
    #[error("現在沒有颱風，不需要強制收成。")]
    NoTyphoon,
    #[error("今天已經結束了。")]
    DayOver,
    #[error("還沒有新的預兆。")]
    NoForecast,
}

/// What the main action button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryOutcome {
    Harvested { reward: u32, market_boom: bool },
    Grew { progress: u32 },
}

/// What the evening's disaster did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayDamage {
    /// Pests ate the crop.
    PestDestroyed,
    /// Pesticide held; the protection is used up.
    PestRepelled,
    /// The typhoon flattened a field that had growth on it.
    TyphoonFlattened,
}

impl DayDamage {
    pub fn report(self) -> &'static str {
        match self {
            DayDamage::PestDestroyed => "蟲災來襲！您未及時使用除蟲劑，作物已被啃食殆盡 (進度歸零)！",
            DayDamage::PestRepelled => "除蟲劑發揮了作用，作物安然無恙！",
            DayDamage::TyphoonFlattened => "颱風過境！田地一片狼藉 (進度歸零)。",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfDay {
    pub damage: Option<DayDamage>,
    pub forecast: Disaster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalReport {
    pub money: u32,
    pub rank: Rank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStart {
    NewDay { day: u32, disaster: Option<Disaster> },
    GameOver(FinalReport),
}

fn ensure_playing(state: &FarmState) -> Result<(), FarmError> {
    if state.phase == FarmPhase::Playing {
        Ok(())
    } else {
        Err(FarmError::DayOver)
    }
}

fn ensure_stamina(state: &FarmState) -> Result<(), FarmError> {
    ensure_playing(state)?;
    if state.stamina == 0 {
        return Err(FarmError::NoStamina);
    }
    Ok(())
}

/// Harvest a ready crop, otherwise water and tend it.
pub fn primary_action(state: &mut FarmState) -> Result<PrimaryOutcome, FarmError> {
    ensure_stamina(state)?;

    if state.is_harvest_ready() {
        let market_boom = state.active_disaster == Some(Disaster::Market);
        let reward = if market_boom {
            MARKET_HARVEST_REWARD
        } else {
            HARVEST_REWARD
        };
        state.money += reward;
        state.progress = 0;
        state.stamina -= 1;
        state.is_protected = false;
        return Ok(PrimaryOutcome::Harvested { reward, market_boom });
    }

    if state.water < GROW_WATER_COST {
        return Err(FarmError::InsufficientWater);
    }
    state.stamina -= 1;
    state.water -= GROW_WATER_COST;
    state.progress = (state.progress + GROW_PROGRESS).min(MAX_PROGRESS);
    Ok(PrimaryOutcome::Grew {
        progress: state.progress,
    })
}

/// Cut the crop early while a typhoon is overhead. Returns the reward.
pub fn force_harvest(state: &mut FarmState) -> Result<u32, FarmError> {
    ensure_stamina(state)?;
    if state.active_disaster != Some(Disaster::Typhoon) {
        return Err(FarmError::NoTyphoon);
    }
    state.money += FORCE_HARVEST_REWARD;
    state.progress = 0;
    state.stamina -= 1;
    // Empty field: nothing left for the typhoon to hit tonight.
    state.active_disaster = None;
    Ok(FORCE_HARVEST_REWARD)
}

pub fn refill_water(state: &mut FarmState) -> Result<(), FarmError> {
    ensure_playing(state)?;
    if state.water >= MAX_WATER {
        return Err(FarmError::WaterFull);
    }
    if state.money < WATER_REFILL_COST {
        return Err(FarmError::InsufficientFunds {
            needed: WATER_REFILL_COST,
        });
    }
    state.money -= WATER_REFILL_COST;
    state.water = MAX_WATER;
    Ok(())
}

/// Buy `quantity` units (at least one). Returns the amount paid.
pub fn buy_item(
    state: &mut FarmState,
    item: FarmItem,
    unit_cost: u32,
    quantity: u32,
) -> Result<u32, FarmError> {
    ensure_playing(state)?;
    let quantity = quantity.max(1);
    let cost = unit_cost.saturating_mul(quantity);
    if state.money < cost {
        return Err(FarmError::InsufficientFunds { needed: cost });
    }
    state.money -= cost;
    *state.inventory.slot_mut(item) += quantity;
    Ok(cost)
}

pub fn use_item(state: &mut FarmState, item: FarmItem) -> Result<(), FarmError> {
    ensure_playing(state)?;
    if state.inventory.count(item) == 0 {
        return Err(FarmError::OutOfStock(item));
    }
    match item {
        FarmItem::Fertilizer => {
            if state.daily_fertilizer_use >= FERTILIZER_DAILY_CAP {
                return Err(FarmError::DailyCapReached);
            }
            state.progress = (state.progress + FERTILIZER_PROGRESS).min(MAX_PROGRESS);
            state.daily_fertilizer_use += 1;
        }
        FarmItem::Pesticide => state.is_protected = true,
    }
    *state.inventory.slot_mut(item) -= 1;
    Ok(())
}

/// Apply tonight's disaster to the field.
pub fn resolve_disaster(state: &mut FarmState) -> Option<DayDamage> {
    match state.active_disaster {
        Some(Disaster::Pest) if state.is_protected => {
            state.is_protected = false;
            Some(DayDamage::PestRepelled)
        }
        Some(Disaster::Pest) => {
            state.progress = 0;
            Some(DayDamage::PestDestroyed)
        }
        Some(Disaster::Typhoon) if state.progress > 0 => {
            state.progress = 0;
            Some(DayDamage::TyphoonFlattened)
        }
        _ => None,
    }
}

/// Tomorrow's event, uniform over the three kinds.
pub fn draw_forecast<R: Rng + ?Sized>(rng: &mut R) -> Disaster {
    ALL_DISASTERS[rng.gen_range(0..ALL_DISASTERS.len())]
}

/// Close the day: resolve damage, then show tomorrow's omen.
pub fn end_turn<R: Rng + ?Sized>(state: &mut FarmState, rng: &mut R) -> Result<EndOfDay, FarmError> {
    ensure_playing(state)?;
    let damage = resolve_disaster(state);
    let forecast = draw_forecast(rng);
    state.next_disaster = Some(forecast);
    state.phase = FarmPhase::Forecast;
    Ok(EndOfDay { damage, forecast })
}

/// Acknowledge the omen. Starts the next day, or ends the run after the last.
pub fn confirm_forecast(state: &mut FarmState) -> Result<DayStart, FarmError> {
    if state.phase != FarmPhase::Forecast {
        return Err(FarmError::NoForecast);
    }
    if state.day >= LAST_DAY {
        state.phase = FarmPhase::GameOver;
        return Ok(DayStart::GameOver(FinalReport {
            money: state.money,
            rank: Rank::from_money(state.money),
        }));
    }
    state.day += 1;
    state.stamina = MAX_STAMINA;
    state.daily_fertilizer_use = 0;
    state.active_disaster = state.next_disaster.take();
    state.phase = FarmPhase::Playing;
    Ok(DayStart::NewDay {
        day: state.day,
        disaster: state.active_disaster,
    })
}

pub fn reset(state: &mut FarmState) {
    *state = FarmState::default();
}
