use commons::{
    AuctionId, Token, BID_TAG, CANCEL_TAG, COMPLETE_TAG, REFUND_TAG, START_AUCTION_TAG,
};
use concordium_std::*;

/// Auction start event data.
#[derive(Debug, Serial)]
pub struct StartAuctionEvent<'a> {
    pub auction_id: AuctionId,
    /// Account that started the auction.
    pub maker: &'a AccountAddress,
    /// Auctioned token.
    pub token: &'a Token,
    /// Smallest allowed first bid.
    pub start_price: Amount,
    /// Bidding closes at this time.
    pub expiry: Timestamp,
}

/// Bid event data.
#[derive(Debug, Serial)]
pub struct BidEvent<'a> {
    pub auction_id: AuctionId,
    /// Bidder account address.
    pub bidder: &'a AccountAddress,
    /// Bid amount.
    pub amount: Amount,
}

/// Cancel auction event data.
#[derive(Debug, Serial)]
pub struct CancelEvent<'a> {
    pub auction_id: AuctionId,
    pub maker: &'a AccountAddress,
}

/// Auction completion event data.
#[derive(Debug, Serial)]
pub struct CompleteEvent<'a> {
    pub auction_id: AuctionId,
    pub maker: &'a AccountAddress,
    /// Auction winner, none if nobody bid.
    pub winner: Option<AccountAddress>,
    /// Winning bid paid to the maker.
    pub price: Amount,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum AuctionEvents<'a> {
    StartAuction(StartAuctionEvent<'a>),
    Bid(BidEvent<'a>),
    Refund(BidEvent<'a>),
    Cancel(CancelEvent<'a>),
    Complete(CompleteEvent<'a>),
}

impl<'a> AuctionEvents<'a> {
    pub fn start_auction(
        auction_id: AuctionId,
        maker: &'a AccountAddress,
        token: &'a Token,
        start_price: Amount,
        expiry: Timestamp,
    ) -> Self {
        Self::StartAuction(StartAuctionEvent {
            auction_id,
            maker,
            token,
            start_price,
            expiry,
        })
    }

    pub fn bid(auction_id: AuctionId, bidder: &'a AccountAddress, amount: Amount) -> Self {
        Self::Bid(BidEvent {
            auction_id,
            bidder,
            amount,
        })
    }

    /// Outbid amount returned to its bidder.
    pub fn refund(auction_id: AuctionId, bidder: &'a AccountAddress, amount: Amount) -> Self {
        Self::Refund(BidEvent {
            auction_id,
            bidder,
            amount,
        })
    }

    pub fn cancel(auction_id: AuctionId, maker: &'a AccountAddress) -> Self {
        Self::Cancel(CancelEvent { auction_id, maker })
    }

    pub fn complete(
        auction_id: AuctionId,
        maker: &'a AccountAddress,
        winner: Option<AccountAddress>,
        price: Amount,
    ) -> Self {
        Self::Complete(CompleteEvent {
            auction_id,
            maker,
            winner,
            price,
        })
    }
}

impl<'a> Serial for AuctionEvents<'a> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            AuctionEvents::StartAuction(event) => {
                out.write_u8(START_AUCTION_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Bid(event) => {
                out.write_u8(BID_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Refund(event) => {
                out.write_u8(REFUND_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Cancel(event) => {
                out.write_u8(CANCEL_TAG)?;
                event.serial(out)
            }
            AuctionEvents::Complete(event) => {
                out.write_u8(COMPLETE_TAG)?;
                event.serial(out)
            }
        }
    }
}
