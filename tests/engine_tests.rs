use matching_engine::{
    engine::MatchingEngine,
    errors::OrderError,
    orders::{OrderIds, Side},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// The canonical session: rest, cross at the maker's price, rest below the
/// spread, cross at equal prices, reject garbage without side effects.
#[test]
fn reference_session() {
    let mut eng = MatchingEngine::default();

    // sell 10 @ 100 into an empty book: no match, rests on the ask side
    let s1 = eng.submit(Side::Sell, 100, 10).unwrap();
    assert!(s1.trades.is_empty());
    let asks = eng.snapshot(Side::Sell);
    assert_eq!((asks[0].price, asks[0].quantity), (100, 10));

    // buy 6 @ 101 crosses; the trade prints at the resting 100, not 101
    let s2 = eng.submit(Side::Buy, 101, 6).unwrap();
    assert_eq!(s2.trades.len(), 1);
    assert_eq!((s2.trades[0].quantity, s2.trades[0].price), (6, 100));
    assert_eq!(eng.snapshot(Side::Sell)[0].quantity, 4);
    assert!(eng.snapshot(Side::Buy).is_empty());

    // buy 4 @ 99 does not reach the ask at 100 and rests
    let s3 = eng.submit(Side::Buy, 99, 4).unwrap();
    assert!(s3.trades.is_empty());
    assert_eq!(eng.snapshot(Side::Buy)[0].price, 99);

    // sell 2 @ 99 crosses the resting bid exactly; fully filled, not rested
    let s4 = eng.submit(Side::Sell, 99, 2).unwrap();
    assert_eq!((s4.trades[0].quantity, s4.trades[0].price), (2, 99));
    assert_eq!(s4.remaining, 0);
    assert_eq!(eng.snapshot(Side::Buy)[0].quantity, 2);
    assert_eq!(eng.snapshot(Side::Sell).len(), 1);

    // rejected submissions leave no trace
    let before_bids = eng.snapshot(Side::Buy);
    let before_asks = eng.snapshot(Side::Sell);
    assert_eq!(
        eng.submit(Side::Buy, 0, 5).unwrap_err(),
        OrderError::InvalidPrice(0)
    );
    assert_eq!(
        eng.submit(Side::Sell, 99, 0).unwrap_err(),
        OrderError::InvalidQuantity(0)
    );
    assert_eq!(eng.snapshot(Side::Buy), before_bids);
    assert_eq!(eng.snapshot(Side::Sell), before_asks);
}

/// Five asks at one price, submitted in order, are consumed in that order
/// by a single sweeping buy.
#[test]
fn equal_price_orders_match_in_submission_order() {
    let mut eng = MatchingEngine::default();
    let resting: Vec<u64> = (0..5)
        .map(|i| eng.submit(Side::Sell, 100, 10 + i).unwrap().order_id)
        .collect();

    let res = eng.submit(Side::Buy, 100, 60).unwrap();
    let matched: Vec<u64> = res.trades.iter().map(|t| t.sell_order_id).collect();
    assert_eq!(matched, resting);
    assert_eq!(res.filled, 60);
    assert_eq!(res.remaining, 0);
    assert!(eng.snapshot(Side::Sell).is_empty());
    assert!(eng.snapshot(Side::Buy).is_empty());
}

/// Two engines fed from one shared allocator never hand out the same id.
#[test]
fn engines_sharing_an_allocator_never_collide_ids() {
    let ids = OrderIds::new();
    let mut a = MatchingEngine::new(ids.clone());
    let mut b = MatchingEngine::new(ids);
    let ra = a.submit(Side::Buy, 10, 1).unwrap();
    let rb = b.submit(Side::Buy, 10, 1).unwrap();
    assert_ne!(ra.order_id, rb.order_id);
}

/// Trade events name the buyer and seller explicitly in their wire shape.
#[test]
fn trade_event_serializes_with_explicit_buyer_and_seller() {
    let mut eng = MatchingEngine::default();
    eng.submit(Side::Sell, 100, 5).unwrap();
    let res = eng.submit(Side::Buy, 100, 5).unwrap();

    let json = serde_json::to_value(&res.trades[0]).unwrap();
    assert_eq!(json["buy_order_id"], 2);
    assert_eq!(json["sell_order_id"], 1);
    assert_eq!(json["quantity"], 5);
    assert_eq!(json["price"], 100);
}

/// Seeded random flow, checked after every single submission:
/// - the book is never crossed (best bid < best ask, or a side is empty)
/// - snapshots are sorted by their side's comparator, sequence within price
/// - no zero-quantity order is ever visible
/// - quantity is conserved: every submitted unit is matched (once on each
///   side of the trade) or still resting
#[test]
fn random_flow_preserves_invariants() {
    for seed in [1u64, 7, 42, 1337] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut eng = MatchingEngine::default();
        let mut submitted: u64 = 0;
        let mut matched_both_sides: u64 = 0;

        for _ in 0..500 {
            let side = if rng.random_bool(0.5) {
                Side::Buy
            } else {
                Side::Sell
            };
            let price = rng.random_range(70..=80);
            let qty = rng.random_range(1..=100);

            let res = eng.submit(side, price, qty).unwrap();
            submitted += qty;
            matched_both_sides += 2 * res.trades.iter().map(|t| t.quantity).sum::<u64>();

            if let (Some(bid), Some(ask)) = (eng.book().best_bid(), eng.book().best_ask()) {
                assert!(bid < ask, "crossed book: bid {bid} >= ask {ask} (seed {seed})");
            }

            let bids = eng.snapshot(Side::Buy);
            assert!(bids.windows(2).all(|w| w[0].price >= w[1].price));
            let asks = eng.snapshot(Side::Sell);
            assert!(asks.windows(2).all(|w| w[0].price <= w[1].price));
            for snap in [&bids, &asks] {
                assert!(snap.iter().all(|e| e.quantity > 0), "phantom order (seed {seed})");
                // ids are monotonic, so same-price runs must come out in
                // submission order
                assert!(
                    snap.windows(2)
                        .all(|w| w[0].price != w[1].price || w[0].order_id < w[1].order_id)
                );
            }
        }

        let bids = eng.snapshot(Side::Buy);
        let asks = eng.snapshot(Side::Sell);
        let resting: u64 = bids.iter().chain(asks.iter()).map(|e| e.quantity).sum();
        assert_eq!(submitted, matched_both_sides + resting, "seed {seed}");
    }
}
