use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::OrderError;

/// Which side of the market an order is on.
///
/// # Intuition
/// - `Buy` (Bid): wants to purchase. Buy orders rank from **highest to lowest
///   price** because a higher price is a more aggressive buyer.
/// - `Sell` (Ask): wants to sell. Sell orders rank from **lowest to highest
///   price** because a lower price is a more aggressive seller.
///
/// Ranking this way means the matching loop always sees the best opposing
/// price first: buyers meet the lowest ask, sellers meet the highest bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,  // Bid
    Sell, // Ask
}

impl Side {
    /// The side an incoming order of this side matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Allocator for order ids and tie-break sequence numbers.
///
/// Both counters are strictly increasing and never reused. The allocator is
/// an explicit dependency of [`Order::new`] rather than a process-wide
/// static, so a fresh engine always numbers from 1 and tests stay
/// reproducible. Cloning hands out another handle to the same counters.
///
/// The sequence is a logical counter, not a wall-clock timestamp: clock
/// resolution collides under bursty submission and would leave same-tick
/// orders with ambiguous time priority.
#[derive(Debug, Clone, Default)]
pub struct OrderIds {
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    next_id: AtomicU64,
    next_seq: AtomicU64,
}

impl OrderIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u64 {
        self.counters.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn next_seq(&self) -> u64 {
        self.counters.next_seq.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// A limit order. `id`, `side`, `price` and `seq` are fixed at construction;
/// only the remaining `quantity` ever changes, and only downward, and only
/// through the matching loop.
///
/// `price` is in integer ticks. Priority inside the book is keyed on
/// `(price, seq)` alone, so a partial fill never moves a resting order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: u64,
    pub side: Side,
    pub price: u64,
    pub seq: u64,
    quantity: u64,
}

impl Order {
    /// Builds a validated order, drawing its id and sequence from `ids`.
    ///
    /// # Errors
    /// - [`OrderError::InvalidPrice`] if `price` is zero.
    /// - [`OrderError::InvalidQuantity`] if `quantity` is zero.
    pub fn new(ids: &OrderIds, side: Side, price: u64, quantity: u64) -> Result<Self, OrderError> {
        if price == 0 {
            return Err(OrderError::InvalidPrice(price));
        }
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity(quantity));
        }
        Ok(Self {
            id: ids.next_id(),
            side,
            price,
            seq: ids.next_seq(),
            quantity,
        })
    }

    /// Remaining (unfilled) quantity.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Reduces the remaining quantity by a fill. Crate-internal: nothing
    /// outside the matching loop mutates an order.
    pub(crate) fn fill(&mut self, qty: u64) {
        debug_assert!(qty > 0 && qty <= self.quantity);
        self.quantity -= qty;
    }
}
