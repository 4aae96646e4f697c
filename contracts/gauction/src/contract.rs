use commons::{
    AuctionId, ContractTokenAmount, ContractTokenId, CustomContractError, Token, SINGLE_TOKEN,
};
use concordium_cis2::OnReceivingCis2Params;
use concordium_std::*;

use crate::custody;
use crate::events::AuctionEvents;
use crate::external::*;
use crate::settlement;
use crate::state::{Auction, State};

/// Initialize the auction contract with no auctions.
#[init(contract = "GAuction")]
fn contract_init<S: HasStateApi>(
    _ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::new(state_builder))
}

/// Start an auction for a token owned by the sender.
///
/// This contract must be an operator of the sender on the token contract.
/// It moves the token into its own escrow, where it stays until the auction
/// is cancelled or settled.
///
/// It rejects if:
/// - Fails to parse `StartAuctionParams` parameters.
/// - The sender is a contract.
/// - The expiry is not in the future.
/// - This contract is not an operator of the sender.
/// - The sender does not own the token.
/// - The token is already under an active auction.
/// - The token contract rejects the transfer into escrow.
#[receive(
    mutable,
    contract = "GAuction",
    name = "startAuction",
    parameter = "StartAuctionParams",
    return_value = "AuctionId",
    enable_logger
)]
fn contract_start_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<AuctionId> {
    let params = StartAuctionParams::deserial(&mut ctx.parameter_cursor())?;

    let maker = if let Address::Account(maker) = ctx.sender() {
        maker
    } else {
        bail!(CustomContractError::OnlyAccountAddress.into());
    };

    ensure!(
        params.expiry > ctx.metadata().slot_time(),
        CustomContractError::InvalidExpiry.into()
    );

    custody::ensure_custody(host, &params.token, maker, ctx.self_address())?;

    // Registered first, the token contract calls back into `onReceivingCIS2`
    let auction_id = host.state_mut().register(Auction::new(
        params.token.clone(),
        maker,
        params.start_price,
        params.expiry,
    ))?;

    custody::deposit(host, &params.token, maker, ctx.self_address())?;

    logger.log(&AuctionEvents::start_auction(
        auction_id,
        &maker,
        &params.token,
        params.start_price,
        params.expiry,
    ))?;

    Ok(auction_id)
}

/// Accept the token of an auction that is being started. Any other token
/// sent to this contract is rejected.
///
/// It rejects if:
/// - Fails to parse the parameter.
/// - The sender is not a contract.
/// - The amount is not a single token.
/// - The token is not under an active auction of `from`.
#[receive(
    contract = "GAuction",
    name = "onReceivingCIS2",
    parameter = "OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>"
)]
fn contract_on_receiving_cis2<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<()> {
    let params =
        OnReceivingCis2Params::<ContractTokenId, ContractTokenAmount>::deserial(
            &mut ctx.parameter_cursor(),
        )?;

    let contract = if let Address::Contract(sender) = ctx.sender() {
        sender
    } else {
        bail!(CustomContractError::ContractOnly.into());
    };

    ensure_eq!(
        params.amount,
        ContractTokenAmount::from(SINGLE_TOKEN),
        CustomContractError::Unsupported.into()
    );

    let maker = host
        .state()
        .lot_maker(&Token::new(contract, params.token_id))
        .ok_or(CustomContractError::Unauthorized)?;
    ensure_eq!(
        params.from,
        Address::Account(maker),
        CustomContractError::Unauthorized.into()
    );

    Ok(())
}

/// Bid on an auction with the attached amount.
///
/// The outbid bidder gets the previous highest bid back in the same call.
#[receive(
    mutable,
    payable,
    contract = "GAuction",
    name = "bidAuction",
    parameter = "AuctionId",
    enable_logger
)]
fn contract_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let auction_id = AuctionId::deserial(&mut ctx.parameter_cursor())?;

    let bidder = if let Address::Account(bidder) = ctx.sender() {
        bidder
    } else {
        bail!(CustomContractError::OnlyAccountAddress.into());
    };

    let outbid = host
        .state_mut()
        .bid(auction_id, ctx.metadata().slot_time(), bidder, amount)?;

    logger.log(&AuctionEvents::bid(auction_id, &bidder, amount))?;

    // Refund previous bid
    if let Some(bid) = outbid {
        host.invoke_transfer(&bid.bidder, bid.amount)?;
        logger.log(&AuctionEvents::refund(auction_id, &bid.bidder, bid.amount))?;
    }

    Ok(())
}

/// Cancel an auction nobody has bid on yet and return the token to the
/// maker. Only the maker can do it, and only before expiry.
#[receive(
    mutable,
    contract = "GAuction",
    name = "cancelAuction",
    parameter = "AuctionId",
    enable_logger
)]
fn contract_cancel<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let auction_id = AuctionId::deserial(&mut ctx.parameter_cursor())?;

    let auction =
        host.state()
            .check_cancel(auction_id, &ctx.sender(), ctx.metadata().slot_time())?;

    custody::release(host, &auction.token, ctx.self_address(), auction.maker)?;

    // Fails if a nested call already closed the auction
    host.state_mut().remove(auction_id)?;

    logger.log(&AuctionEvents::cancel(auction_id, &auction.maker))?;

    Ok(())
}

/// Complete an expired auction. Anyone can call it.
#[receive(
    mutable,
    contract = "GAuction",
    name = "completeAuction",
    parameter = "AuctionId",
    enable_logger
)]
fn contract_complete<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    finalize(ctx, host, logger)
}

/// Same as `completeAuction`, usually called by the winner.
#[receive(
    mutable,
    contract = "GAuction",
    name = "claimAuction",
    parameter = "AuctionId",
    enable_logger
)]
fn contract_claim<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    finalize(ctx, host, logger)
}

/// Move the token to the winner and the winning bid to the maker, then remove
/// the expired auction. Without bids the token goes back to the maker.
fn finalize<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ReceiveResult<()> {
    let auction_id = AuctionId::deserial(&mut ctx.parameter_cursor())?;

    let auction = host
        .state()
        .check_finalize(auction_id, ctx.metadata().slot_time())?;

    let outcome = settlement::settle(host, ctx.self_address(), &auction)?;

    // Fails if a nested call already settled the auction
    host.state_mut().remove(auction_id)?;

    logger.log(&AuctionEvents::complete(
        auction_id,
        &auction.maker,
        outcome.winner(),
        outcome.price(),
    ))?;

    Ok(())
}

/// View all active auctions in the order they were started.
#[receive(
    contract = "GAuction",
    name = "getAuctions",
    return_value = "Vec<AuctionView>"
)]
fn contract_get_auctions<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Vec<AuctionView>> {
    Ok(host.state().list_active())
}

#[receive(
    contract = "GAuction",
    name = "getAuction",
    parameter = "AuctionId",
    return_value = "AuctionView"
)]
fn contract_get_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<AuctionView> {
    let auction_id = AuctionId::deserial(&mut ctx.parameter_cursor())?;
    let auction = host.state().get(auction_id)?;
    Ok(AuctionView::new(auction_id, &auction))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::mocks::*;
    use concordium_cis2::{AdditionalData, TokenIdVec};
    use test_infrastructure::*;

    const NFT: ContractAddress = ContractAddress {
        index: 0,
        subindex: 0,
    };
    const AUCTION: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const MAKER: AccountAddress = AccountAddress([1u8; 32]);
    const ALICE: AccountAddress = AccountAddress([2u8; 32]);
    const BOB: AccountAddress = AccountAddress([3u8; 32]);
    const CAROL: AccountAddress = AccountAddress([4u8; 32]);
    const THIRD_PARTY: AccountAddress = AccountAddress([5u8; 32]);

    type TestState = State<TestStateApi>;

    fn token(index: u32) -> Token {
        let id: ContractTokenId = TokenIdVec(index.to_le_bytes().to_vec());
        Token::new(NFT, id)
    }

    fn now() -> Timestamp {
        Timestamp::from_timestamp_millis(1_000)
    }

    fn expiry() -> Timestamp {
        Timestamp::from_timestamp_millis(11_000)
    }

    /// Amounts in the tests are given in microCCD, 0.1 CCD is 100_000.
    fn micro(amount: u64) -> Amount {
        Amount::from_micro_ccd(amount)
    }

    fn start_price() -> Amount {
        micro(100_000)
    }

    fn receive_ctx<'a>(
        sender: Address,
        parameter: &'a [u8],
        slot_time: Timestamp,
    ) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender);
        if let Address::Account(account) = sender {
            ctx.set_invoker(account);
        }
        ctx.set_self_address(AUCTION);
        ctx.set_metadata_slot_time(slot_time);
        ctx.set_parameter(parameter);
        ctx
    }

    /// Host with a token contract where the maker owns tokens 0 to 3 and has
    /// approved this contract as operator.
    fn default_host() -> (TestHost<TestState>, TokenLedger) {
        let mut state_builder = TestStateBuilder::new();
        let state = State::new(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let ledger = TokenLedger::new(AUCTION);
        for index in 0..4 {
            ledger.mint(token(index).id, Address::Account(MAKER));
        }
        ledger.install(&mut host, NFT);

        (host, ledger)
    }

    fn owner_of(ledger: &TokenLedger, token: Token) -> Option<Address> {
        ledger.owner_of(&token.id)
    }

    /// CCD the active auctions hold for their highest bidders.
    fn escrowed(host: &TestHost<TestState>) -> Amount {
        get_auctions(host)
            .iter()
            .fold(Amount::zero(), |sum, view| sum + view.highest_bid)
    }

    fn start(
        host: &mut TestHost<TestState>,
        logger: &mut TestLogger,
        sender: Address,
        token: Token,
        expiry: Timestamp,
    ) -> ReceiveResult<AuctionId> {
        let parameter = to_bytes(&StartAuctionParams {
            token,
            start_price: start_price(),
            expiry,
        });
        let ctx = receive_ctx(sender, &parameter, now());
        contract_start_auction(&ctx, host, logger)
    }

    fn start_token(
        host: &mut TestHost<TestState>,
        logger: &mut TestLogger,
        token: Token,
    ) -> AuctionId {
        start(host, logger, Address::Account(MAKER), token, expiry())
            .expect_report("Starting auction failed")
    }

    fn start_default(host: &mut TestHost<TestState>, logger: &mut TestLogger) -> AuctionId {
        start_token(host, logger, token(0))
    }

    /// Bid with `amount` attached. The amount is credited to the contract
    /// before the call and taken back when the call rejects, like the chain
    /// does.
    fn bid(
        host: &mut TestHost<TestState>,
        logger: &mut TestLogger,
        sender: Address,
        auction_id: AuctionId,
        amount: Amount,
        slot_time: Timestamp,
    ) -> ReceiveResult<()> {
        let parameter = to_bytes(&auction_id);
        let ctx = receive_ctx(sender, &parameter, slot_time);
        let balance = host.self_balance();
        host.set_self_balance(balance + amount);
        let result = contract_bid(&ctx, host, amount, logger);
        if result.is_err() {
            host.set_self_balance(balance);
        }
        result
    }

    fn cancel(
        host: &mut TestHost<TestState>,
        logger: &mut TestLogger,
        sender: AccountAddress,
        auction_id: AuctionId,
        slot_time: Timestamp,
    ) -> ReceiveResult<()> {
        let parameter = to_bytes(&auction_id);
        let ctx = receive_ctx(Address::Account(sender), &parameter, slot_time);
        contract_cancel(&ctx, host, logger)
    }

    fn complete(
        host: &mut TestHost<TestState>,
        logger: &mut TestLogger,
        sender: AccountAddress,
        auction_id: AuctionId,
        slot_time: Timestamp,
    ) -> ReceiveResult<()> {
        let parameter = to_bytes(&auction_id);
        let ctx = receive_ctx(Address::Account(sender), &parameter, slot_time);
        contract_complete(&ctx, host, logger)
    }

    fn claim(
        host: &mut TestHost<TestState>,
        logger: &mut TestLogger,
        sender: AccountAddress,
        auction_id: AuctionId,
        slot_time: Timestamp,
    ) -> ReceiveResult<()> {
        let parameter = to_bytes(&auction_id);
        let ctx = receive_ctx(Address::Account(sender), &parameter, slot_time);
        contract_claim(&ctx, host, logger)
    }

    fn receive_token(
        host: &TestHost<TestState>,
        sender: Address,
        token_id: ContractTokenId,
        amount: u64,
        from: AccountAddress,
    ) -> ReceiveResult<()> {
        let parameter = to_bytes(&OnReceivingCis2Params {
            token_id,
            amount: ContractTokenAmount::from(amount),
            from: Address::Account(from),
            data: AdditionalData::empty(),
        });
        let ctx = receive_ctx(sender, &parameter, now());
        contract_on_receiving_cis2(&ctx, host)
    }

    fn get_auctions(host: &TestHost<TestState>) -> Vec<AuctionView> {
        let ctx = TestReceiveContext::empty();
        contract_get_auctions(&ctx, host).expect_report("Listing auctions failed")
    }

    #[concordium_test]
    fn test_init() {
        let ctx = TestInitContext::empty();
        let mut state_builder = TestStateBuilder::new();

        let state =
            contract_init(&ctx, &mut state_builder).expect_report("Contract initialization failed");

        claim!(state.list_active().is_empty(), "No auction should exist");
    }

    #[concordium_test]
    fn test_start_auction() {
        let (mut host, ledger) = default_host();
        let mut logger = TestLogger::init();

        let auction_id = start_default(&mut host, &mut logger);

        claim_eq!(auction_id, 0);
        claim_eq!(
            get_auctions(&host),
            vec![AuctionView {
                auction_id,
                token: token(0),
                maker: MAKER,
                start_price: start_price(),
                expiry: expiry(),
                highest_bid: Amount::zero(),
                highest_bidder: None,
            }]
        );
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Contract(AUCTION)));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&AuctionEvents::start_auction(
                auction_id,
                &MAKER,
                &token(0),
                start_price(),
                expiry(),
            ))]
        );
    }

    #[concordium_test]
    fn test_start_auction_contract_sender() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        let result = start(
            &mut host,
            &mut logger,
            Address::Contract(NFT),
            token(0),
            expiry(),
        );

        claim_eq!(
            result,
            Err(CustomContractError::OnlyAccountAddress.into())
        );
    }

    #[concordium_test]
    fn test_start_auction_expiry_not_in_future() {
        let (mut host, ledger) = default_host();
        let mut logger = TestLogger::init();

        let result = start(
            &mut host,
            &mut logger,
            Address::Account(MAKER),
            token(0),
            now(),
        );

        claim_eq!(result, Err(CustomContractError::InvalidExpiry.into()));
        claim!(get_auctions(&host).is_empty());
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Account(MAKER)));
    }

    #[concordium_test]
    fn test_start_auction_not_operator() {
        let (mut host, ledger) = default_host();
        ledger.set_approved(false);
        let mut logger = TestLogger::init();

        let result = start(
            &mut host,
            &mut logger,
            Address::Account(MAKER),
            token(0),
            expiry(),
        );

        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim!(get_auctions(&host).is_empty());
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Account(MAKER)));
    }

    #[concordium_test]
    fn test_start_auction_not_owner() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        let result = start(
            &mut host,
            &mut logger,
            Address::Account(ALICE),
            token(0),
            expiry(),
        );

        claim_eq!(result, Err(CustomContractError::OnlyOwner.into()));
        claim!(get_auctions(&host).is_empty());
    }

    #[concordium_test]
    fn test_start_auction_token_in_escrow() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();
        start_default(&mut host, &mut logger);

        // The maker no longer holds the escrowed token.
        let result = start(
            &mut host,
            &mut logger,
            Address::Account(MAKER),
            token(0),
            expiry(),
        );

        claim_eq!(result, Err(CustomContractError::OnlyOwner.into()));
        claim_eq!(get_auctions(&host).len(), 1);
    }

    #[concordium_test]
    fn test_on_receiving_cis2() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();
        start_default(&mut host, &mut logger);
        let nft = Address::Contract(NFT);

        claim_eq!(
            receive_token(&host, nft, token(0).id, 1, MAKER),
            Ok(())
        );
        claim_eq!(
            receive_token(&host, Address::Account(MAKER), token(0).id, 1, MAKER),
            Err(CustomContractError::ContractOnly.into())
        );
        claim_eq!(
            receive_token(&host, nft, token(0).id, 2, MAKER),
            Err(CustomContractError::Unsupported.into())
        );
        claim_eq!(
            receive_token(&host, nft, token(0).id, 1, ALICE),
            Err(CustomContractError::Unauthorized.into())
        );
        claim_eq!(
            receive_token(&host, nft, token(1).id, 1, MAKER),
            Err(CustomContractError::Unauthorized.into())
        );
        // Same token id on another token contract.
        claim_eq!(
            receive_token(&host, Address::Contract(AUCTION), token(0).id, 1, MAKER),
            Err(CustomContractError::Unauthorized.into())
        );
    }

    #[concordium_test]
    fn test_get_auctions_ordered_by_id() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();
        for index in [3u32, 1, 2, 0].iter() {
            start_token(&mut host, &mut logger, token(*index));
        }

        let auctions = get_auctions(&host);

        let ids: Vec<AuctionId> = auctions.iter().map(|view| view.auction_id).collect();
        claim_eq!(ids, vec![0, 1, 2, 3]);
        claim_eq!(auctions[0].token, token(3));
        claim_eq!(auctions[3].token, token(0));
    }

    #[concordium_test]
    fn test_get_auction() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();
        let auction_id = start_default(&mut host, &mut logger);
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(ALICE),
                auction_id,
                micro(150_000),
                now(),
            ),
            Ok(())
        );

        let parameter = to_bytes(&auction_id);
        let ctx = receive_ctx(Address::Account(CAROL), &parameter, now());
        let view = contract_get_auction(&ctx, &host).expect_report("Auction is missing");

        claim_eq!(view.highest_bid, micro(150_000));
        claim_eq!(view.highest_bidder, Some(ALICE));

        let parameter = to_bytes(&42u64);
        let ctx = receive_ctx(Address::Account(CAROL), &parameter, now());
        claim_eq!(
            contract_get_auction(&ctx, &host),
            Err(CustomContractError::WrongAuctionId.into())
        );
    }

    #[concordium_test]
    fn test_bid_refunds_outbid_bidder() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();
        let auction_id = start_default(&mut host, &mut logger);
        logger.logs.clear();

        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(ALICE),
                auction_id,
                micro(150_000),
                now(),
            ),
            Ok(())
        );
        claim!(host.get_transfers().is_empty(), "First bid refunds nobody");

        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(BOB),
                auction_id,
                micro(200_000),
                now(),
            ),
            Ok(())
        );
        claim_eq!(host.get_transfers(), vec![(ALICE, micro(150_000))]);
        // Only the highest bid stays in escrow.
        claim_eq!(host.self_balance(), micro(200_000));

        claim_eq!(
            logger.logs,
            vec![
                to_bytes(&AuctionEvents::bid(auction_id, &ALICE, micro(150_000))),
                to_bytes(&AuctionEvents::bid(auction_id, &BOB, micro(200_000))),
                to_bytes(&AuctionEvents::refund(auction_id, &ALICE, micro(150_000))),
            ]
        );
    }

    #[concordium_test]
    fn test_bid_rejections() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();
        let auction_id = start_default(&mut host, &mut logger);

        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Contract(NFT),
                auction_id,
                micro(150_000),
                now(),
            ),
            Err(CustomContractError::OnlyAccountAddress.into())
        );
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(ALICE),
                auction_id + 1,
                micro(150_000),
                now(),
            ),
            Err(CustomContractError::WrongAuctionId.into())
        );
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(MAKER),
                auction_id,
                micro(150_000),
                now(),
            ),
            Err(CustomContractError::SenderIsMaker.into())
        );
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(ALICE),
                auction_id,
                micro(99_999),
                now(),
            ),
            Err(CustomContractError::WrongBidAmount.into())
        );
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(ALICE),
                auction_id,
                start_price(),
                now(),
            ),
            Ok(())
        );
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(BOB),
                auction_id,
                start_price(),
                now(),
            ),
            Err(CustomContractError::WrongBidAmount.into())
        );

        claim!(host.get_transfers().is_empty());
        claim_eq!(host.self_balance(), start_price());
    }

    /// Two auctions running side by side. The contract balance always equals
    /// the highest bids summed, and completing one auction pays out only its
    /// own bid.
    #[concordium_test]
    fn test_escrow_matches_highest_bids() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();
        let first = start_token(&mut host, &mut logger, token(0));
        let second = start_token(&mut host, &mut logger, token(1));

        let bids = [
            (ALICE, first, 150_000, true),
            (BOB, second, 120_000, true),
            (CAROL, first, 200_000, true),
            (BOB, first, 180_000, false),
            (ALICE, second, 250_000, true),
            (CAROL, second, 260_000, true),
        ];
        for (bidder, auction_id, amount, accepted) in bids.iter() {
            let result = bid(
                &mut host,
                &mut logger,
                Address::Account(*bidder),
                *auction_id,
                micro(*amount),
                now(),
            );
            claim_eq!(result.is_ok(), *accepted);
            claim_eq!(host.self_balance(), escrowed(&host));
        }
        claim_eq!(host.self_balance(), micro(460_000));
        claim_eq!(
            host.get_transfers(),
            vec![
                (ALICE, micro(150_000)),
                (BOB, micro(120_000)),
                (ALICE, micro(250_000)),
            ]
        );

        claim_eq!(
            complete(&mut host, &mut logger, THIRD_PARTY, first, expiry()),
            Ok(())
        );

        claim!(host.transfer_occurred(&MAKER, micro(200_000)));
        claim_eq!(host.self_balance(), micro(260_000));
        claim_eq!(host.self_balance(), escrowed(&host));
        let auctions = get_auctions(&host);
        claim_eq!(auctions.len(), 1);
        claim_eq!(auctions[0].auction_id, second);
        claim_eq!(auctions[0].highest_bidder, Some(CAROL));
    }

    /// Floor 0.1 CCD. Two bids, failed early completion, failed late bid,
    /// failed cancellations and a claim by the winner.
    #[concordium_test]
    fn test_auction_with_winner() {
        let (mut host, ledger) = default_host();
        let mut logger = TestLogger::init();
        let auction_id = start_default(&mut host, &mut logger);

        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(ALICE),
                auction_id,
                micro(150_000),
                now(),
            ),
            Ok(())
        );
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(BOB),
                auction_id,
                micro(200_000),
                now(),
            ),
            Ok(())
        );
        claim!(host.transfer_occurred(&ALICE, micro(150_000)));

        claim_eq!(
            complete(&mut host, &mut logger, BOB, auction_id, now()),
            Err(CustomContractError::NotFinishedAuction.into())
        );
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(ALICE),
                auction_id,
                micro(300_000),
                expiry(),
            ),
            Err(CustomContractError::FinishedAuction.into())
        );
        claim_eq!(
            cancel(&mut host, &mut logger, ALICE, auction_id, expiry()),
            Err(CustomContractError::NoPermission.into())
        );
        claim_eq!(
            cancel(&mut host, &mut logger, MAKER, auction_id, expiry()),
            Err(CustomContractError::BiddersExist.into())
        );
        claim_eq!(host.self_balance(), micro(200_000));
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Contract(AUCTION)));

        claim_eq!(
            claim(&mut host, &mut logger, BOB, auction_id, expiry()),
            Ok(())
        );

        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Account(BOB)));
        claim!(host.transfer_occurred(&MAKER, micro(200_000)));
        claim_eq!(host.self_balance(), Amount::zero());
        claim!(get_auctions(&host).is_empty());
        claim_eq!(
            logger.logs.last(),
            Some(&to_bytes(&AuctionEvents::complete(
                auction_id,
                &MAKER,
                Some(BOB),
                micro(200_000),
            )))
        );

        // Settled exactly once.
        claim_eq!(
            complete(&mut host, &mut logger, BOB, auction_id, expiry()),
            Err(CustomContractError::WrongAuctionId.into())
        );
    }

    /// Cancel before any bid, restart, and complete after expiry. Both times
    /// the token goes back to the maker and no CCD moves.
    #[concordium_test]
    fn test_auction_without_bids() {
        let (mut host, ledger) = default_host();
        let mut logger = TestLogger::init();
        let auction_id = start_default(&mut host, &mut logger);

        claim_eq!(
            cancel(&mut host, &mut logger, MAKER, auction_id, now()),
            Ok(())
        );
        claim_eq!(
            logger.logs.last(),
            Some(&to_bytes(&AuctionEvents::cancel(auction_id, &MAKER)))
        );
        claim!(get_auctions(&host).is_empty());
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Account(MAKER)));

        // The token is free to be auctioned again under a new id.
        let auction_id = start_default(&mut host, &mut logger);
        claim_eq!(auction_id, 1);

        claim_eq!(
            cancel(&mut host, &mut logger, MAKER, auction_id, expiry()),
            Err(CustomContractError::FinishedAuction.into())
        );

        claim_eq!(
            complete(&mut host, &mut logger, MAKER, auction_id, expiry()),
            Ok(())
        );
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Account(MAKER)));
        claim!(host.get_transfers().is_empty());
        claim!(get_auctions(&host).is_empty());
        claim_eq!(
            logger.logs.last(),
            Some(&to_bytes(&AuctionEvents::complete(
                auction_id,
                &MAKER,
                None,
                Amount::zero(),
            )))
        );
    }

    /// A third party completes; the token goes to the only bidder and the
    /// bid to the maker.
    #[concordium_test]
    fn test_third_party_completes() {
        let (mut host, ledger) = default_host();
        let mut logger = TestLogger::init();
        let auction_id = start_default(&mut host, &mut logger);

        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(CAROL),
                auction_id,
                micro(150_000),
                now(),
            ),
            Ok(())
        );

        claim_eq!(
            complete(&mut host, &mut logger, THIRD_PARTY, auction_id, expiry()),
            Ok(())
        );

        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Account(CAROL)));
        claim_eq!(host.get_transfers(), vec![(MAKER, micro(150_000))]);
        claim_eq!(host.self_balance(), Amount::zero());
    }

    /// Revoking this contract as operator after a bid does not stop the
    /// winner from getting the token, it is already in escrow.
    #[concordium_test]
    fn test_maker_revoking_operator_does_not_block_settlement() {
        let (mut host, ledger) = default_host();
        let mut logger = TestLogger::init();
        let auction_id = start_default(&mut host, &mut logger);
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(CAROL),
                auction_id,
                micro(150_000),
                now(),
            ),
            Ok(())
        );

        ledger.set_approved(false);

        claim_eq!(
            complete(&mut host, &mut logger, THIRD_PARTY, auction_id, expiry()),
            Ok(())
        );
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Account(CAROL)));
        claim_eq!(host.get_transfers(), vec![(MAKER, micro(150_000))]);
        claim_eq!(host.self_balance(), Amount::zero());
    }

    /// A rejected token transfer leaves the auction active with its bid in
    /// escrow, and completing it again succeeds once the token contract
    /// accepts the transfer.
    #[concordium_test]
    fn test_complete_retried_after_rejected_transfer() {
        let (mut host, ledger) = default_host();
        let mut logger = TestLogger::init();
        let auction_id = start_default(&mut host, &mut logger);
        claim_eq!(
            bid(
                &mut host,
                &mut logger,
                Address::Account(CAROL),
                auction_id,
                micro(150_000),
                now(),
            ),
            Ok(())
        );
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            rejecting_mock(-42),
        );

        claim_eq!(
            complete(&mut host, &mut logger, THIRD_PARTY, auction_id, expiry()),
            Err(CustomContractError::InvokeContractError.into())
        );
        claim!(host.get_transfers().is_empty());
        claim_eq!(host.self_balance(), micro(150_000));
        let auctions = get_auctions(&host);
        claim_eq!(auctions.len(), 1);
        claim_eq!(auctions[0].highest_bid, micro(150_000));
        claim_eq!(auctions[0].highest_bidder, Some(CAROL));
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Contract(AUCTION)));

        ledger.install(&mut host, NFT);
        claim_eq!(
            complete(&mut host, &mut logger, THIRD_PARTY, auction_id, expiry()),
            Ok(())
        );
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Account(CAROL)));
        claim_eq!(host.get_transfers(), vec![(MAKER, micro(150_000))]);
        claim!(get_auctions(&host).is_empty());
    }

    #[concordium_test]
    fn test_cancel_rejected_transfer_keeps_auction() {
        let (mut host, ledger) = default_host();
        let mut logger = TestLogger::init();
        let auction_id = start_default(&mut host, &mut logger);
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            rejecting_mock(-42),
        );

        claim_eq!(
            cancel(&mut host, &mut logger, MAKER, auction_id, now()),
            Err(CustomContractError::InvokeContractError.into())
        );
        claim_eq!(get_auctions(&host).len(), 1);
        claim_eq!(owner_of(&ledger, token(0)), Some(Address::Contract(AUCTION)));
    }

    #[concordium_test]
    fn test_complete_unknown_auction() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        claim_eq!(
            complete(&mut host, &mut logger, THIRD_PARTY, 0, expiry()),
            Err(CustomContractError::WrongAuctionId.into())
        );
        claim_eq!(
            claim(&mut host, &mut logger, THIRD_PARTY, 0, expiry()),
            Err(CustomContractError::WrongAuctionId.into())
        );
    }
}
