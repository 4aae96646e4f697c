//! Mocked CIS-2 token contract entrypoints.
use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
pub use inner::*;

#[concordium_cfg_test]
mod inner {
    use commons::{
        ContractBalanceOfQueryParams, ContractTokenAmount, ContractTokenId, TransferParameter,
    };
    use concordium_cis2::{
        BalanceOfQueryResponse, OperatorOfQueryParams, OperatorOfQueryResponse, TransferParams,
    };
    use concordium_std::test_infrastructure::{MockFn, TestHost};
    use concordium_std::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// `operatorOf` answering every query with `approved`.
    pub fn operator_of_mock<S>(approved: bool) -> MockFn<S> {
        MockFn::new_v1(move |parameter, _amount, _balance, _state| {
            let params = OperatorOfQueryParams::deserial(&mut Cursor::new(parameter.as_ref()))
                .map_err(|_| CallContractError::Trap)?;
            Ok((
                false,
                OperatorOfQueryResponse(vec![approved; params.queries.len()]),
            ))
        })
    }

    /// `balanceOf` answering every query with `amount`.
    pub fn balance_of_mock<S>(amount: u64) -> MockFn<S> {
        MockFn::new_v1(move |parameter, _amount, _balance, _state| {
            let params =
                ContractBalanceOfQueryParams::deserial(&mut Cursor::new(parameter.as_ref()))
                    .map_err(|_| CallContractError::Trap)?;
            Ok((
                false,
                BalanceOfQueryResponse(vec![
                    ContractTokenAmount::from(amount);
                    params.queries.len()
                ]),
            ))
        })
    }

    pub fn parse_and_check_mock<D: Deserial, S>(
        check: impl Fn(&D) -> bool + 'static,
    ) -> MockFn<S> {
        MockFn::new_v1(move |parameter, _amount, _balance, _state| {
            let value = D::deserial(&mut Cursor::new(parameter.as_ref()))
                .map_err(|_| CallContractError::Trap)?;
            if !check(&value) {
                return Err(CallContractError::Trap);
            };
            Ok((false, ()))
        })
    }

    /// Contract rejecting every call with the given reject code.
    pub fn rejecting_mock<S>(reason: i32) -> MockFn<S> {
        MockFn::new_v1(move |_parameter, _amount, _balance, _state| {
            Err::<(bool, ()), _>(CallContractError::LogicReject {
                reason,
                return_value: (),
            })
        })
    }

    /// In-memory CIS-2 token contract called only by `caller`.
    ///
    /// `caller` can move tokens it owns, and tokens of other owners while
    /// it is approved as their operator.
    #[derive(Clone)]
    pub struct TokenLedger {
        caller: Address,
        approved: Rc<Cell<bool>>,
        owners: Rc<RefCell<Vec<(ContractTokenId, Address)>>>,
    }

    impl TokenLedger {
        pub fn new(caller: ContractAddress) -> Self {
            Self {
                caller: Address::Contract(caller),
                approved: Rc::new(Cell::new(true)),
                owners: Rc::new(RefCell::new(Vec::new())),
            }
        }

        pub fn mint(&self, token_id: ContractTokenId, owner: Address) {
            self.owners.borrow_mut().push((token_id, owner));
        }

        pub fn owner_of(&self, token_id: &ContractTokenId) -> Option<Address> {
            self.owners
                .borrow()
                .iter()
                .find(|(id, _)| id == token_id)
                .map(|(_, owner)| *owner)
        }

        /// Approve or revoke `caller` as operator of every owner.
        pub fn set_approved(&self, approved: bool) {
            self.approved.set(approved);
        }

        /// Mock `operatorOf`, `balanceOf` and `transfer` of `contract`.
        pub fn install<S: Serial + DeserialWithState<test_infrastructure::TestStateApi>>(&self, host: &mut TestHost<S>, contract: ContractAddress) {
            let approved = self.approved.clone();
            host.setup_mock_entrypoint(
                contract,
                OwnedEntrypointName::new_unchecked("operatorOf".into()),
                MockFn::new_v1(move |parameter, _amount, _balance, _state| {
                    let params =
                        OperatorOfQueryParams::deserial(&mut Cursor::new(parameter.as_ref()))
                            .map_err(|_| CallContractError::Trap)?;
                    Ok((
                        false,
                        OperatorOfQueryResponse(vec![approved.get(); params.queries.len()]),
                    ))
                }),
            );

            let ledger = self.clone();
            host.setup_mock_entrypoint(
                contract,
                OwnedEntrypointName::new_unchecked("balanceOf".into()),
                MockFn::new_v1(move |parameter, _amount, _balance, _state| {
                    let params =
                        ContractBalanceOfQueryParams::deserial(&mut Cursor::new(parameter.as_ref()))
                            .map_err(|_| CallContractError::Trap)?;
                    let response = params
                        .queries
                        .iter()
                        .map(|query| {
                            if ledger.owner_of(&query.token_id) == Some(query.address) {
                                ContractTokenAmount::from(1)
                            } else {
                                ContractTokenAmount::from(0)
                            }
                        })
                        .collect();
                    Ok((false, BalanceOfQueryResponse(response)))
                }),
            );

            let ledger = self.clone();
            host.setup_mock_entrypoint(
                contract,
                OwnedEntrypointName::new_unchecked("transfer".into()),
                MockFn::new_v1(move |parameter, _amount, _balance, _state| {
                    let TransferParams(transfers) =
                        TransferParameter::deserial(&mut Cursor::new(parameter.as_ref()))
                            .map_err(|_| CallContractError::Trap)?;
                    for transfer in transfers {
                        let authorized = transfer.from == ledger.caller || ledger.approved.get();
                        let owned = ledger.owner_of(&transfer.token_id) == Some(transfer.from);
                        if !authorized || !owned || transfer.amount != ContractTokenAmount::from(1)
                        {
                            return Err(CallContractError::LogicReject {
                                reason: -42,
                                return_value: (),
                            });
                        }
                        let mut owners = ledger.owners.borrow_mut();
                        if let Some(entry) =
                            owners.iter_mut().find(|(id, _)| *id == transfer.token_id)
                        {
                            entry.1 = transfer.to.address();
                        }
                    }
                    Ok((false, ()))
                }),
            );
        }
    }
}
