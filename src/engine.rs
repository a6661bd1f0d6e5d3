use tracing::{debug, info};

use crate::{
    errors::OrderError,
    orderbook::OrderBook,
    orders::{Order, OrderIds, Side},
    trade::{BookEntry, Trade},
};

/// Outcome of one submission: how much matched immediately, how much rested,
/// and every trade in the order it happened (best-priority opposite first).
#[derive(Debug, Clone, serde::Serialize)]
pub struct SubmitResult {
    pub order_id: u64,
    pub filled: u64,
    pub remaining: u64,
    pub trades: Vec<Trade>,
}

/// Continuous price-time priority matching for one instrument.
///
/// Each submission is matched immediately against the opposite side while
/// prices cross; any unmatched remainder rests in the book for future
/// submissions. A full `submit` call is one synchronous unit of work: no
/// step inside it can fail once validation passes, and the book is left
/// non-crossing (one side empty, or best bid < best ask) every time it
/// returns.
///
/// `submit` takes `&mut self`: calls for one instrument must be serialized
/// by the caller (see [`crate::state::AppState`] for the shared-mutex
/// wrapping), because price-time priority is a global property of each side.
pub struct MatchingEngine {
    book: OrderBook,
    ids: OrderIds,
}

/// Whether the incoming order's price is compatible with the best opposing
/// price: a buy crosses down to its limit, a sell crosses up to its limit.
fn crosses(incoming: &Order, top: &Order) -> bool {
    match incoming.side {
        Side::Buy => incoming.price >= top.price,
        Side::Sell => incoming.price <= top.price,
    }
}

impl MatchingEngine {
    /// A new engine over an empty book, numbering orders from `ids`.
    pub fn new(ids: OrderIds) -> Self {
        Self {
            book: OrderBook::new(),
            ids,
        }
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// One side's resting orders in current priority order.
    pub fn snapshot(&self, side: Side) -> Vec<BookEntry> {
        self.book.snapshot(side)
    }

    /// Validates and matches one incoming order, resting any remainder.
    ///
    /// The loop walks the opposite side best-first: take the top order,
    /// stop if prices no longer cross (the top is the best opposing price,
    /// so no order further back can cross either), otherwise fill
    /// `min(incoming, top)` at the **resting** order's price. A resting
    /// order spent to zero is popped and discarded; it is never reinserted.
    ///
    /// # Returns
    /// A [`SubmitResult`] with the assigned order id, filled/remaining
    /// quantities and the trades in execution order.
    ///
    /// # Errors
    /// [`OrderError`] when price or quantity is not strictly positive; the
    /// book is untouched in that case.
    pub fn submit(
        &mut self,
        side: Side,
        price: u64,
        quantity: u64,
    ) -> Result<SubmitResult, OrderError> {
        let mut incoming = Order::new(&self.ids, side, price, quantity)?;
        info!("incoming order: {:?}", incoming);

        let mut trades = Vec::new();
        let opposite = self.book.opposite_mut(side);
        while incoming.quantity() > 0 {
            let Some(top) = opposite.peek_best_mut() else {
                break;
            };
            if !crosses(&incoming, top) {
                break;
            }

            let match_qty = incoming.quantity().min(top.quantity());
            // trades print the buyer and seller, whichever side came in
            let (buy_order_id, sell_order_id) = match side {
                Side::Buy => (incoming.id, top.id),
                Side::Sell => (top.id, incoming.id),
            };
            let trade = Trade {
                buy_order_id,
                sell_order_id,
                quantity: match_qty,
                price: top.price,
            };

            incoming.fill(match_qty);
            top.fill(match_qty);
            let resting_spent = top.quantity() == 0;

            debug!("match: {:?}", trade);
            trades.push(trade);

            if resting_spent {
                opposite.pop_best();
            }
        }

        let remaining = incoming.quantity();
        let result = SubmitResult {
            order_id: incoming.id,
            filled: quantity - remaining,
            remaining,
            trades,
        };
        if remaining > 0 {
            self.book.own_mut(side).insert(incoming);
        }
        Ok(result)
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(OrderIds::new())
    }
}
