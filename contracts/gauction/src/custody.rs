use commons::{
    ContractReadError, ContractTokenAmount, CustomContractError, HostCis2Ext, Token, SINGLE_TOKEN,
};
use concordium_cis2::Receiver;
use concordium_std::*;

/// Entrypoint receiving the tokens put up for auction.
pub const ON_RECEIVING_CIS2: &str = "onReceivingCIS2";

/// Check that `maker` owns the token and has approved `operator` to move it.
pub fn ensure_custody<T>(
    host: &impl HasHost<T>,
    token: &Token,
    maker: AccountAddress,
    operator: ContractAddress,
) -> ReceiveResult<()> {
    let approved = host
        .cis2_operator_of(
            &token.contract,
            Address::Account(maker),
            Address::Contract(operator),
        )
        .map_err(handle_read_error)?;
    ensure!(approved, CustomContractError::Unauthorized.into());

    let balance = host
        .cis2_balance_of(&token.contract, token.id.clone(), Address::Account(maker))
        .map_err(handle_read_error)?;
    ensure_eq!(
        balance,
        ContractTokenAmount::from(SINGLE_TOKEN),
        CustomContractError::OnlyOwner.into()
    );

    Ok(())
}

/// Move the token from `maker` into the escrow of this contract at `escrow`,
/// acting as operator of `maker`. The token contract notifies `escrow` through
/// its `onReceivingCIS2` hook.
pub fn deposit<T>(
    host: &mut impl HasHost<T>,
    token: &Token,
    maker: AccountAddress,
    escrow: ContractAddress,
) -> ReceiveResult<()> {
    host.cis2_transfer(
        &token.contract,
        token.id.clone(),
        Address::Account(maker),
        Receiver::Contract(
            escrow,
            OwnedEntrypointName::new_unchecked(ON_RECEIVING_CIS2.into()),
        ),
    )
    .map_err(handle_call_error)?;

    Ok(())
}

/// Move the escrowed token out of `escrow` to `to`.
pub fn release<T>(
    host: &mut impl HasHost<T>,
    token: &Token,
    escrow: ContractAddress,
    to: AccountAddress,
) -> ReceiveResult<()> {
    host.cis2_transfer(
        &token.contract,
        token.id.clone(),
        Address::Contract(escrow),
        Receiver::Account(to),
    )
    .map_err(handle_call_error)?;

    Ok(())
}

fn handle_call_error<R>(error: CallContractError<R>) -> Reject {
    match error {
        CallContractError::MissingEntrypoint | CallContractError::MessageFailed => {
            CustomContractError::Incompatible.into()
        }
        CallContractError::LogicReject { .. } => CustomContractError::InvokeContractError.into(),
        e => e.into(),
    }
}

fn handle_read_error<R>(error: ContractReadError<R>) -> Reject {
    match error {
        ContractReadError::Call(error) => handle_call_error(error),
        ContractReadError::Compatibility | ContractReadError::Parse => {
            CustomContractError::Incompatible.into()
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::mocks::*;
    use commons::{ContractTokenId, TransferParameter};
    use concordium_cis2::{TokenIdVec, TransferParams};
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
    const BUYER: AccountAddress = AccountAddress([2u8; 32]);

    fn token() -> Token {
        let id: ContractTokenId = TokenIdVec(vec![0, 0, 0, 0]);
        Token::new(NFT, id)
    }

    fn host_with(operator_of: bool, balance: u64) -> TestHost<()> {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("operatorOf".into()),
            operator_of_mock(operator_of),
        );
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("balanceOf".into()),
            balance_of_mock(balance),
        );
        host
    }

    #[concordium_test]
    fn test_ensure_custody() {
        let host = host_with(true, 1);
        claim_eq!(ensure_custody(&host, &token(), MAKER, AUCTION), Ok(()));
    }

    #[concordium_test]
    fn test_ensure_custody_not_operator() {
        let host = host_with(false, 1);
        claim_eq!(
            ensure_custody(&host, &token(), MAKER, AUCTION),
            Err(CustomContractError::Unauthorized.into())
        );
    }

    #[concordium_test]
    fn test_ensure_custody_not_owner() {
        let host = host_with(true, 0);
        claim_eq!(
            ensure_custody(&host, &token(), MAKER, AUCTION),
            Err(CustomContractError::OnlyOwner.into())
        );
    }

    #[concordium_test]
    fn test_ensure_custody_rejected_query() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("operatorOf".into()),
            rejecting_mock(-42),
        );
        claim_eq!(
            ensure_custody(&host, &token(), MAKER, AUCTION),
            Err(CustomContractError::InvokeContractError.into())
        );
    }

    #[concordium_test]
    fn test_deposit() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock(|params: &TransferParameter| {
                let TransferParams(transfers) = params;
                let hook = OwnedEntrypointName::new_unchecked(ON_RECEIVING_CIS2.into());
                transfers.len() == 1
                    && transfers[0].token_id == token().id
                    && transfers[0].amount == ContractTokenAmount::from(1)
                    && transfers[0].from == Address::Account(MAKER)
                    && matches!(
                        &transfers[0].to,
                        Receiver::Contract(to, entrypoint) if *to == AUCTION && *entrypoint == hook
                    )
            }),
        );

        claim_eq!(deposit(&mut host, &token(), MAKER, AUCTION), Ok(()));
    }

    #[concordium_test]
    fn test_release() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock(|params: &TransferParameter| {
                let TransferParams(transfers) = params;
                transfers.len() == 1
                    && transfers[0].token_id == token().id
                    && transfers[0].from == Address::Contract(AUCTION)
                    && matches!(transfers[0].to, Receiver::Account(to) if to == BUYER)
            }),
        );

        claim_eq!(release(&mut host, &token(), AUCTION, BUYER), Ok(()));
    }

    #[concordium_test]
    fn test_release_rejected() {
        let mut host = TestHost::new((), TestStateBuilder::new());
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            rejecting_mock(-42),
        );

        claim_eq!(
            release(&mut host, &token(), AUCTION, BUYER),
            Err(CustomContractError::InvokeContractError.into())
        );
    }
}
