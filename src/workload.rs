//! Synthetic order flow for exercising the matching engine.
//!
//! Continuously submits randomized limit orders straight into a shared
//! engine, mimicking a noisy single-instrument market:
//! 1. Inter-arrival delays drawn from `Exp(rate_hz)` (Poisson order flow).
//! 2. A local mid-price that drifts by `N(0, noise_sigma)` on every order.
//! 3. Heavy-tailed order sizes: a unit-rate exponential draw scaled by
//!    `mean_qty`, floored at 1.
//! 4. A coin flip for side; buys quote just under the mid, sells just over,
//!    so flow keeps crossing often enough to print trades.
//!
//! Every placed order and every fill is reported to the console, the trades
//! land in the shared trade log, and the loop ends after `orders`
//! submissions or as soon as the supplied [`CancellationToken`] fires
//! (e.g. on Ctrl-C). The engine itself stays agnostic: this module is one
//! possible order source among many.

use rand::Rng;
use rand_distr::{Distribution, Exp, Exp1, Normal};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{orders::Side, state::AppState};

#[derive(Clone, Debug)]
pub struct WorkloadConfig {
    /// How many orders to submit; `None` runs until cancelled.
    pub orders: Option<u64>,
    /// Poisson arrival rate (λ) for incoming orders, per second.
    pub rate_hz: f64,
    /// Tick the mid-price starts at.
    pub base_price: u64,
    /// Standard deviation of the Gaussian mid-price drift per order.
    pub noise_sigma: f64,
    /// Average order size.
    pub mean_qty: f64,
}

impl Default for WorkloadConfig {
    /// The classic demo workload: 50 orders around a base price of 75,
    /// roughly one per second.
    fn default() -> Self {
        Self {
            orders: Some(50),
            rate_hz: 1.0,
            base_price: 75,
            noise_sigma: 2.0,
            mean_qty: 50.0,
        }
    }
}

/// Totals reported once the flow stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadSummary {
    pub orders: u64,
    pub trades: u64,
    pub volume: u64,
}

/// Drives randomized order flow into `state`'s engine until the configured
/// order count is reached or `cancel` fires.
///
/// # Side effects
/// Prints one status line per order and one per trade; appends every trade
/// to the shared trade log; prints a final summary line.
pub async fn run_workload(
    state: AppState,
    cfg: WorkloadConfig,
    cancel: CancellationToken,
) -> anyhow::Result<WorkloadSummary> {
    //exponential inter-arrival times with rate = rate_hz
    let ia_dist = Exp::new(cfg.rate_hz).expect("rate_hz must be > 0");
    //gaussian drift on the mid-price
    let drift = Normal::new(0.0, cfg.noise_sigma).expect("noise_sigma must be >= 0");
    //unit exponential for sizing
    let size_dist = Exp1;

    let mut summary = WorkloadSummary {
        orders: 0,
        trades: 0,
        volume: 0,
    };
    let mut mid_price = cfg.base_price as f64;
    let start = Instant::now();

    loop {
        if let Some(max) = cfg.orders {
            if summary.orders >= max {
                break;
            }
        }
        //draw the next wait
        let wait_secs = ia_dist.sample(&mut rand::rng());
        let sleep_fut = sleep(Duration::from_secs_f64(wait_secs));
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("received shutdown, stopping order flow");
                break;
            }
            _ = sleep_fut => {
                let raw: f64 = <Exp1 as Distribution<f64>>::sample(&size_dist, &mut rand::rng());
                let qty = ((raw * cfg.mean_qty) as u64).max(1);
                //drift the mid, keep it priceable
                mid_price = (mid_price + drift.sample(&mut rand::rng())).max(2.0);
                let spread = 1.0;
                let (price, side) = if rand::rng().random_bool(0.5) {
                    ((mid_price - spread).max(1.0) as u64, Side::Buy)
                } else {
                    ((mid_price + spread) as u64, Side::Sell)
                };

                let result = {
                    let mut engine = state.engine.lock().unwrap();
                    engine.submit(side, price, qty)?
                };
                summary.orders += 1;

                println!(
                    "[{:.1}s] order #{} {:?} {} @ {} -> filled {} rested {}",
                    start.elapsed().as_secs_f64(),
                    result.order_id,
                    side,
                    qty,
                    price,
                    result.filled,
                    result.remaining,
                );
                for trade in &result.trades {
                    println!(
                        "  trade: buy #{} x sell #{} {} @ {}",
                        trade.buy_order_id, trade.sell_order_id, trade.quantity, trade.price
                    );
                    summary.trades += 1;
                    summary.volume += trade.quantity;
                }
                state.trade_log.lock().unwrap().extend(result.trades);
            }
        }
    }
    println!(
        "--- done --- orders={} trades={} volume={}",
        summary.orders, summary.trades, summary.volume
    );
    Ok(summary)
}
