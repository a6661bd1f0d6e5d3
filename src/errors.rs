use thiserror::Error;

/// Rejections surfaced by [`crate::engine::MatchingEngine::submit`] before
/// either side of the book is touched. There are no other failure modes in
/// the core: once an order validates, matching always runs to completion.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    #[error("invalid price {0}: must be strictly positive")]
    InvalidPrice(u64),

    #[error("invalid quantity {0}: must be strictly positive")]
    InvalidQuantity(u64),
}
