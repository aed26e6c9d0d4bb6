//! Simulation observation port trait.
//!
//! Keeps trace output out of the decision logic: the simulation driver
//! invokes the observer after each processed candle, and the domain itself
//! stays side-effect-free.

use crate::domain::candle::Candle;
use crate::domain::strategy::StrategyState;
use crate::domain::trade::Trade;

pub trait ObserverPort {
    /// Called once per processed candle (warm-up candles are skipped),
    /// with the post-step state snapshot and the trades executed on that
    /// candle, if any.
    fn on_candle(&mut self, index: usize, candle: &Candle, state: &StrategyState, trades: &[Trade]);
}
