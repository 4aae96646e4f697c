use commons::{AuctionId, Token};
use concordium_std::*;

use crate::state::Auction;

/// Parameters of a new auction.
#[derive(Debug, Clone, Serialize, SchemaType)]
pub struct StartAuctionParams {
    /// Token to be auctioned. The sender must own it and have this contract
    /// as an operator.
    pub token: Token,
    /// Smallest allowed first bid.
    pub start_price: Amount,
    /// Bidding closes at this time.
    pub expiry: Timestamp,
}

/// Public view of an active auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct AuctionView {
    pub auction_id: AuctionId,
    pub token: Token,
    pub maker: AccountAddress,
    pub start_price: Amount,
    pub expiry: Timestamp,
    /// Zero while nobody has bid.
    pub highest_bid: Amount,
    pub highest_bidder: Option<AccountAddress>,
}

impl AuctionView {
    pub fn new(auction_id: AuctionId, auction: &Auction) -> Self {
        Self {
            auction_id,
            token: auction.token.clone(),
            maker: auction.maker,
            start_price: auction.start_price,
            expiry: auction.expiry,
            highest_bid: auction.highest_bid(),
            highest_bidder: auction.highest_bidder(),
        }
    }
}
