use concordium_cis2::*;
use concordium_std::*;

use crate::{
    ContractBalanceOfQueryParams, ContractBalanceOfQueryResponse, ContractReadError,
    ContractTokenAmount, ContractTokenId, TransferParameter, SINGLE_TOKEN,
};

/// Calls into any CIS-2 token contract.
pub trait HostCis2Ext<S>: HasHost<S> {
    /// Transfer a single token `from` -> `to`. The calling contract must be `from` or one of its operators.
    fn cis2_transfer(
        &mut self,
        contract: &ContractAddress,
        token_id: ContractTokenId,
        from: Address,
        to: Receiver,
    ) -> Result<(), CallContractError<Self::ReturnValueType>> {
        let params: TransferParameter = TransferParams(vec![Transfer {
            token_id,
            amount: ContractTokenAmount::from(SINGLE_TOKEN),
            from,
            to,
            data: AdditionalData::empty(),
        }]);

        self.invoke_contract(
            contract,
            &params,
            EntrypointName::new_unchecked("transfer"),
            Amount::zero(),
        )?;

        Ok(())
    }

    /// Check whether `address` is an operator of `owner`.
    fn cis2_operator_of(
        &self,
        contract: &ContractAddress,
        owner: Address,
        address: Address,
    ) -> Result<bool, ContractReadError<Self::ReturnValueType>> {
        let mut result = self
            .invoke_contract_read_only(
                contract,
                &OperatorOfQueryParams {
                    queries: vec![OperatorOfQuery { owner, address }],
                },
                EntrypointName::new_unchecked("operatorOf"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        let OperatorOfQueryResponse(response) =
            OperatorOfQueryResponse::deserial(&mut result).map_err(|_| ContractReadError::Parse)?;

        response
            .first()
            .copied()
            .ok_or(ContractReadError::Compatibility)
    }

    /// Query how many units of `token_id` the `address` holds.
    fn cis2_balance_of(
        &self,
        contract: &ContractAddress,
        token_id: ContractTokenId,
        address: Address,
    ) -> Result<ContractTokenAmount, ContractReadError<Self::ReturnValueType>> {
        let params: ContractBalanceOfQueryParams = BalanceOfQueryParams {
            queries: vec![BalanceOfQuery { token_id, address }],
        };

        let mut result = self
            .invoke_contract_read_only(
                contract,
                &params,
                EntrypointName::new_unchecked("balanceOf"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        let BalanceOfQueryResponse(response) = ContractBalanceOfQueryResponse::deserial(&mut result)
            .map_err(|_| ContractReadError::Parse)?;

        response
            .first()
            .copied()
            .ok_or(ContractReadError::Compatibility)
    }
}

impl<S, H: HasHost<S>> HostCis2Ext<S> for H {}
