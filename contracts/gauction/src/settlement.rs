use concordium_std::*;

use crate::custody;
use crate::state::Auction;

/// Outcome of a finished auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Settlement {
    /// The token went to the winner and the winning bid to the maker.
    Sold {
        winner: AccountAddress,
        price: Amount,
    },
    /// Nobody bid, the token went back to the maker.
    Released,
}

impl Settlement {
    pub fn winner(&self) -> Option<AccountAddress> {
        match self {
            Settlement::Sold { winner, .. } => Some(*winner),
            Settlement::Released => None,
        }
    }

    pub fn price(&self) -> Amount {
        match self {
            Settlement::Sold { price, .. } => *price,
            Settlement::Released => Amount::zero(),
        }
    }
}

/// Settle an expired auction whose token is escrowed at `escrow`.
///
/// Any failure rejects the whole call and the auction stays active.
pub fn settle<T>(
    host: &mut impl HasHost<T>,
    escrow: ContractAddress,
    auction: &Auction,
) -> ReceiveResult<Settlement> {
    match auction.highest_bid {
        Some(bid) => {
            custody::release(host, &auction.token, escrow, bid.bidder)?;
            host.invoke_transfer(&auction.maker, bid.amount)?;
            Ok(Settlement::Sold {
                winner: bid.bidder,
                price: bid.amount,
            })
        }
        None => {
            // Return the token to the maker
            custody::release(host, &auction.token, escrow, auction.maker)?;
            Ok(Settlement::Released)
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::mocks::*;
    use crate::state::Bid;
    use commons::{ContractTokenId, CustomContractError, Token, TransferParameter};
    use concordium_cis2::{Receiver, TokenIdVec, TransferParams};
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
    const WINNER: AccountAddress = AccountAddress([2u8; 32]);

    fn auction(highest_bid: Option<Bid>) -> Auction {
        let id: ContractTokenId = TokenIdVec(vec![0, 0, 0, 0]);
        let mut auction = Auction::new(
            Token::new(NFT, id),
            MAKER,
            Amount::from_micro_ccd(100),
            Timestamp::from_timestamp_millis(10),
        );
        auction.highest_bid = highest_bid;
        auction
    }

    fn winning_bid() -> Bid {
        Bid {
            bidder: WINNER,
            amount: Amount::from_micro_ccd(200),
        }
    }

    #[concordium_test]
    fn test_settle_sold() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.set_self_balance(Amount::from_micro_ccd(200));
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock(|params: &TransferParameter| {
                let TransferParams(transfers) = params;
                transfers[0].from == Address::Contract(AUCTION)
                    && matches!(transfers[0].to, Receiver::Account(to) if to == WINNER)
            }),
        );

        let settlement = settle(&mut host, AUCTION, &auction(Some(winning_bid())));

        claim_eq!(
            settlement,
            Ok(Settlement::Sold {
                winner: WINNER,
                price: Amount::from_micro_ccd(200),
            })
        );
        claim!(host.transfer_occurred(&MAKER, Amount::from_micro_ccd(200)));
        claim_eq!(host.self_balance(), Amount::zero());
    }

    #[concordium_test]
    fn test_settle_released() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock(|params: &TransferParameter| {
                let TransferParams(transfers) = params;
                transfers[0].from == Address::Contract(AUCTION)
                    && matches!(transfers[0].to, Receiver::Account(to) if to == MAKER)
            }),
        );

        let settlement = settle(&mut host, AUCTION, &auction(None));

        claim_eq!(settlement, Ok(Settlement::Released));
        claim!(host.get_transfers().is_empty());
    }

    #[concordium_test]
    fn test_settle_token_transfer_rejected() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.set_self_balance(Amount::from_micro_ccd(200));
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            rejecting_mock(-42),
        );

        let settlement = settle(&mut host, AUCTION, &auction(Some(winning_bid())));

        claim_eq!(
            settlement,
            Err(CustomContractError::InvokeContractError.into())
        );
        claim!(host.get_transfers().is_empty());
        claim_eq!(host.self_balance(), Amount::from_micro_ccd(200));
    }
}
