/// A trade is one match between two orders.
///
/// # Terminology
/// - **Maker**: the order that was resting in the book (providing liquidity).
/// - **Taker**: the incoming order that triggered the match (taking liquidity).
///
/// The trade always executes at the **maker's price**: the resting side does
/// not give up its quoted price to the aggressor. A single submission may
/// produce several trades as it walks the opposing side (partial fills).
///
/// Rather than maker/taker, the event names the buyer and the seller
/// explicitly, so consumers never need the incoming order's side to tell
/// who bought.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    pub buy_order_id: u64,
    pub sell_order_id: u64,
    pub quantity: u64,
    pub price: u64,
}

/// One resting order as reported by a book snapshot, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookEntry {
    pub order_id: u64,
    pub price: u64,
    pub quantity: u64,
}
