use commons::{AuctionId, CustomContractError, Token};
use concordium_std::*;

use crate::external::AuctionView;

/// Current highest bid. Its amount is held by the contract until the bidder
/// is outbid or the auction is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub struct Bid {
    pub bidder: AccountAddress,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub struct Auction {
    /// Auctioned token, held by this contract until settlement.
    pub token: Token,
    /// Account that started the auction.
    pub maker: AccountAddress,
    /// Smallest allowed first bid.
    pub start_price: Amount,
    /// Bidding is closed from this time on.
    pub expiry: Timestamp,
    /// Current highest bid, if anyone has bid.
    pub highest_bid: Option<Bid>,
}

impl Auction {
    pub fn new(
        token: Token,
        maker: AccountAddress,
        start_price: Amount,
        expiry: Timestamp,
    ) -> Self {
        Self {
            token,
            maker,
            start_price,
            expiry,
            highest_bid: None,
        }
    }

    /// Highest bid amount, zero while nobody has bid.
    pub fn highest_bid(&self) -> Amount {
        self.highest_bid
            .map(|bid| bid.amount)
            .unwrap_or_else(Amount::zero)
    }

    pub fn highest_bidder(&self) -> Option<AccountAddress> {
        self.highest_bid.map(|bid| bid.bidder)
    }

    pub fn is_finished(&self, slot_time: Timestamp) -> bool {
        slot_time >= self.expiry
    }

    /// A bid must beat the current one, and the first bid must also reach the
    /// start price.
    fn accepts(&self, amount: Amount) -> bool {
        match self.highest_bid {
            Some(bid) => amount > bid.amount,
            None => amount > Amount::zero() && amount >= self.start_price,
        }
    }
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Id of the next auction. Ids are never reused.
    next_auction_id: AuctionId,
    /// Active auctions.
    auctions: StateMap<AuctionId, Auction, S>,
    /// Tokens of active auctions.
    lots: StateMap<Token, AuctionId, S>,
}

impl<S: HasStateApi> State<S> {
    /// Create a new state with no auctions.
    pub fn new(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            next_auction_id: 0,
            auctions: state_builder.new_map(),
            lots: state_builder.new_map(),
        }
    }

    /// Store a new auction under the next id.
    pub fn register(&mut self, auction: Auction) -> Result<AuctionId, CustomContractError> {
        // Duplicate token auctioning is not allowed
        ensure!(
            self.lots.get(&auction.token).is_none(),
            CustomContractError::AlreadyInAuction
        );

        let auction_id = self.next_auction_id;
        self.next_auction_id += 1;
        self.lots.insert(auction.token.clone(), auction_id);
        self.auctions.insert(auction_id, auction);

        Ok(auction_id)
    }

    pub fn get(&self, auction_id: AuctionId) -> Result<Auction, CustomContractError> {
        self.auctions
            .get(&auction_id)
            .map(|auction| (*auction).clone())
            .ok_or(CustomContractError::WrongAuctionId)
    }

    /// Maker of the active auction of `token`.
    pub fn lot_maker(&self, token: &Token) -> Option<AccountAddress> {
        let auction_id = self.lots.get(token).map(|auction_id| *auction_id)?;
        self.auctions.get(&auction_id).map(|auction| auction.maker)
    }

    /// Active auctions in the order they were started.
    pub fn list_active(&self) -> Vec<AuctionView> {
        let mut auctions: Vec<AuctionView> = self
            .auctions
            .iter()
            .map(|(auction_id, auction)| AuctionView::new(*auction_id, &auction))
            .collect();
        auctions.sort_by_key(|view| view.auction_id);
        auctions
    }

    /// Drop the auction and release its token.
    pub fn remove(&mut self, auction_id: AuctionId) -> Result<Auction, CustomContractError> {
        let auction = self
            .auctions
            .remove_and_get(&auction_id)
            .ok_or(CustomContractError::WrongAuctionId)?;
        self.lots.remove(&auction.token);
        Ok(auction)
    }

    /// Place a bid. Returns the outbid bid, which MUST be refunded in the same
    /// call.
    pub fn bid(
        &mut self,
        auction_id: AuctionId,
        slot_time: Timestamp,
        bidder: AccountAddress,
        amount: Amount,
    ) -> Result<Option<Bid>, CustomContractError> {
        let mut auction = self
            .auctions
            .get_mut(&auction_id)
            .ok_or(CustomContractError::WrongAuctionId)?;

        ensure!(
            !auction.is_finished(slot_time),
            CustomContractError::FinishedAuction
        );
        ensure_ne!(bidder, auction.maker, CustomContractError::SenderIsMaker);
        ensure!(
            auction.accepts(amount),
            CustomContractError::WrongBidAmount
        );

        Ok(auction.highest_bid.replace(Bid { bidder, amount }))
    }

    /// Check that the auction can be cancelled: nobody has bid on it yet, the
    /// sender is the maker and it has not expired.
    pub fn check_cancel(
        &self,
        auction_id: AuctionId,
        sender: &Address,
        slot_time: Timestamp,
    ) -> Result<Auction, CustomContractError> {
        let auction = self.get(auction_id)?;

        ensure_eq!(
            *sender,
            Address::Account(auction.maker),
            CustomContractError::NoPermission
        );
        ensure!(
            auction.highest_bid.is_none(),
            CustomContractError::BiddersExist
        );
        ensure!(
            !auction.is_finished(slot_time),
            CustomContractError::FinishedAuction
        );

        Ok(auction)
    }

    /// Check that the auction has expired and can be settled.
    pub fn check_finalize(
        &self,
        auction_id: AuctionId,
        slot_time: Timestamp,
    ) -> Result<Auction, CustomContractError> {
        let auction = self.get(auction_id)?;

        ensure!(
            auction.is_finished(slot_time),
            CustomContractError::NotFinishedAuction
        );

        Ok(auction)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::ContractTokenId;
    use concordium_cis2::TokenIdVec;
    use test_infrastructure::*;

    const NFT: ContractAddress = ContractAddress {
        index: 0,
        subindex: 0,
    };
    const MAKER: AccountAddress = AccountAddress([1u8; 32]);
    const ALICE: AccountAddress = AccountAddress([2u8; 32]);
    const BOB: AccountAddress = AccountAddress([3u8; 32]);

    fn token(index: u32) -> Token {
        let id: ContractTokenId = TokenIdVec(index.to_le_bytes().to_vec());
        Token::new(NFT, id)
    }

    fn expiry() -> Timestamp {
        Timestamp::from_timestamp_millis(100)
    }

    fn before_expiry() -> Timestamp {
        Timestamp::from_timestamp_millis(99)
    }

    fn auction(token: Token) -> Auction {
        Auction::new(token, MAKER, Amount::from_micro_ccd(100), expiry())
    }

    #[concordium_test]
    fn test_register_assigns_sequential_ids() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder);

        claim_eq!(state.register(auction(token(0))), Ok(0));
        claim_eq!(state.register(auction(token(1))), Ok(1));
        claim_eq!(
            state.register(auction(token(0))),
            Err(CustomContractError::AlreadyInAuction)
        );

        // Removed ids are never handed out again.
        claim!(state.remove(1).is_ok());
        claim_eq!(state.register(auction(token(1))), Ok(2));

        let ids: Vec<AuctionId> = state
            .list_active()
            .iter()
            .map(|view| view.auction_id)
            .collect();
        claim_eq!(ids, vec![0, 2]);
    }

    #[concordium_test]
    fn test_remove_releases_token() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder);
        let auction_id = state
            .register(auction(token(0)))
            .expect_report("Register failed");

        claim_eq!(state.remove(auction_id), Ok(auction(token(0))));
        claim_eq!(
            state.remove(auction_id),
            Err(CustomContractError::WrongAuctionId)
        );
        claim_eq!(state.get(auction_id), Err(CustomContractError::WrongAuctionId));
        claim!(state.register(auction(token(0))).is_ok());
    }

    #[concordium_test]
    fn test_bid_returns_outbid_bid() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder);
        let auction_id = state
            .register(auction(token(0)))
            .expect_report("Register failed");

        claim_eq!(
            state.bid(auction_id, before_expiry(), ALICE, Amount::from_micro_ccd(150)),
            Ok(None)
        );
        claim_eq!(
            state.bid(auction_id, before_expiry(), BOB, Amount::from_micro_ccd(200)),
            Ok(Some(Bid {
                bidder: ALICE,
                amount: Amount::from_micro_ccd(150),
            }))
        );

        let stored = state.get(auction_id).expect_report("Auction is missing");
        claim_eq!(stored.highest_bid(), Amount::from_micro_ccd(200));
        claim_eq!(stored.highest_bidder(), Some(BOB));
    }

    #[concordium_test]
    fn test_bid_rules() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder);
        let auction_id = state
            .register(auction(token(0)))
            .expect_report("Register failed");

        claim_eq!(
            state.bid(7, before_expiry(), ALICE, Amount::from_micro_ccd(150)),
            Err(CustomContractError::WrongAuctionId)
        );
        claim_eq!(
            state.bid(auction_id, expiry(), ALICE, Amount::from_micro_ccd(150)),
            Err(CustomContractError::FinishedAuction)
        );
        claim_eq!(
            state.bid(auction_id, before_expiry(), MAKER, Amount::from_micro_ccd(150)),
            Err(CustomContractError::SenderIsMaker)
        );
        claim_eq!(
            state.bid(auction_id, before_expiry(), ALICE, Amount::from_micro_ccd(99)),
            Err(CustomContractError::WrongBidAmount)
        );
        claim_eq!(
            state.bid(auction_id, before_expiry(), ALICE, Amount::from_micro_ccd(100)),
            Ok(None)
        );
        claim_eq!(
            state.bid(auction_id, before_expiry(), BOB, Amount::from_micro_ccd(100)),
            Err(CustomContractError::WrongBidAmount)
        );

        // Failed bids leave the highest bid untouched.
        let stored = state.get(auction_id).expect_report("Auction is missing");
        claim_eq!(
            stored.highest_bid,
            Some(Bid {
                bidder: ALICE,
                amount: Amount::from_micro_ccd(100),
            })
        );
    }

    #[concordium_test]
    fn test_zero_bid_rejected_without_start_price() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder);
        let auction_id = state
            .register(Auction::new(token(0), MAKER, Amount::zero(), expiry()))
            .expect_report("Register failed");

        claim_eq!(
            state.bid(auction_id, before_expiry(), ALICE, Amount::zero()),
            Err(CustomContractError::WrongBidAmount)
        );
        claim_eq!(
            state
                .get(auction_id)
                .expect_report("Auction is missing")
                .highest_bid(),
            Amount::zero()
        );
    }

    #[concordium_test]
    fn test_lot_maker() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder);
        let auction_id = state
            .register(auction(token(0)))
            .expect_report("Register failed");

        claim_eq!(state.lot_maker(&token(0)), Some(MAKER));
        claim_eq!(state.lot_maker(&token(1)), None);

        claim!(state.remove(auction_id).is_ok());
        claim_eq!(state.lot_maker(&token(0)), None);
    }

    #[concordium_test]
    fn test_check_cancel() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder);
        let auction_id = state
            .register(auction(token(0)))
            .expect_report("Register failed");
        let maker = Address::Account(MAKER);

        claim_eq!(
            state.check_cancel(5, &maker, before_expiry()),
            Err(CustomContractError::WrongAuctionId)
        );
        claim_eq!(
            state.check_cancel(auction_id, &Address::Account(ALICE), before_expiry()),
            Err(CustomContractError::NoPermission)
        );
        claim_eq!(
            state.check_cancel(auction_id, &maker, expiry()),
            Err(CustomContractError::FinishedAuction)
        );
        claim_eq!(
            state.check_cancel(auction_id, &maker, before_expiry()),
            Ok(auction(token(0)))
        );
        // Checking leaves the auction active.
        claim_eq!(state.list_active().len(), 1);
    }

    #[concordium_test]
    fn test_check_cancel_with_bid() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder);
        let auction_id = state
            .register(auction(token(0)))
            .expect_report("Register failed");
        claim!(state
            .bid(auction_id, before_expiry(), ALICE, Amount::from_micro_ccd(150))
            .is_ok());

        // Bids are checked before expiry.
        claim_eq!(
            state.check_cancel(auction_id, &Address::Account(MAKER), expiry()),
            Err(CustomContractError::BiddersExist)
        );
        claim_eq!(state.list_active().len(), 1);
    }

    #[concordium_test]
    fn test_check_finalize() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder);
        let auction_id = state
            .register(auction(token(0)))
            .expect_report("Register failed");

        claim_eq!(
            state.check_finalize(auction_id, before_expiry()),
            Err(CustomContractError::NotFinishedAuction)
        );
        claim_eq!(
            state.check_finalize(auction_id, expiry()),
            Ok(auction(token(0)))
        );
        claim_eq!(state.list_active().len(), 1);

        claim!(state.remove(auction_id).is_ok());
        claim_eq!(
            state.check_finalize(auction_id, expiry()),
            Err(CustomContractError::WrongAuctionId)
        );
    }
}
