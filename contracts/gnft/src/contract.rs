use super::*;

/// Initialize contract instance with no tokens.
#[init(contract = "GNFT", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;
    Ok(State::new(state_builder, params))
}

/// Mint a new token owned by the sender, paying the mint fee.
/// Logs a `Mint` and a `TokenMetadata` event.
/// Anything paid above the mint fee is returned to the invoker.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The attached amount is below the mint fee.
/// - Fails to log Mint or TokenMetadata event.
#[receive(
    contract = "GNFT",
    name = "mint",
    parameter = "MintParams",
    return_value = "ContractTokenId",
    mutable,
    enable_logger,
    payable
)]
fn mint<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<ContractTokenId> {
    // Parse the parameter.
    let params: MintParams = ctx.parameter_cursor().get()?;

    let mint_fee = host.state().mint_fee;
    ensure!(
        amount >= mint_fee,
        CustomContractError::InsufficientValue.into()
    );

    // Mint the token in the state.
    let owner = ctx.sender();
    let token_id = host.state_mut().mint(owner, params.metadata_url.clone());

    // Event for minted NFT.
    logger.log(&Cis2Event::Mint(MintEvent {
        token_id: token_id.clone(),
        amount: ContractTokenAmount::from(SINGLE_TOKEN),
        owner,
    }))?;

    // Metadata URL for the NFT.
    logger.log(
        &Cis2Event::<ContractTokenId, ContractTokenAmount>::TokenMetadata(TokenMetadataEvent {
            token_id: token_id.clone(),
            metadata_url: MetadataUrl {
                url: params.metadata_url,
                hash: None,
            },
        }),
    )?;

    // Return whatever was paid above the mint fee
    let excess = amount - mint_fee;
    if excess > Amount::zero() {
        host.invoke_transfer(&ctx.invoker(), excess)
            .map_err(CustomContractError::from)?;
    }

    Ok(token_id)
}

/// Execute a list of token transfers, in the order of the list.
///
/// Logs a `Transfer` event and invokes a receive hook function for every
/// transfer in the list.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the transfers fail to be executed, which could be if:
///     - The `token_id` does not exist.
///     - The sender is not the owner of the token, or an operator of the
///       `from` address.
///     - The token is not owned by the `from`.
/// - Fails to log event.
/// - Any of the messages sent to contracts receiving a transfer choose to
///   reject.
#[receive(
    contract = "GNFT",
    name = "transfer",
    parameter = "TransferParameter",
    mutable,
    enable_logger
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let TransferParams(transfers): TransferParameter = ctx.parameter_cursor().get()?;
    // Get the sender who invoked this contract function.
    let sender = ctx.sender();

    for transfer in transfers {
        let state = host.state_mut();
        // Authenticate the sender for this transfer
        ensure!(
            transfer.from == sender || state.is_operator(&transfer.from, &sender),
            ContractError::Unauthorized
        );

        // Update the contract state
        let to_address = transfer.to.address();
        state.transfer(
            &transfer.token_id,
            transfer.amount,
            &transfer.from,
            &to_address,
        )?;

        // Log transfer event
        logger.log(&Cis2Event::Transfer(TransferEvent {
            token_id: transfer.token_id.clone(),
            amount: transfer.amount,
            from: transfer.from,
            to: to_address,
        }))?;

        // If the receiver is a contract, notify it about the received token.
        if let Receiver::Contract(address, entrypoint_name) = transfer.to {
            let parameter = OnReceivingCis2Params {
                token_id: transfer.token_id,
                amount: transfer.amount,
                from: transfer.from,
                data: transfer.data,
            };

            host.invoke_contract(
                &address,
                &parameter,
                entrypoint_name.as_entrypoint_name(),
                Amount::zero(),
            )
            .map_err(CustomContractError::from)?;
        }
    }
    Ok(())
}

/// Enable or disable addresses as operators of the sender address.
/// Logs an `UpdateOperator` event.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Fails to log event.
#[receive(
    contract = "GNFT",
    name = "updateOperator",
    parameter = "UpdateOperatorParams",
    mutable,
    enable_logger
)]
fn update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let UpdateOperatorParams(params) = ctx.parameter_cursor().get()?;
    // Get the sender who invoked this contract function.
    let sender = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    for param in params {
        // Update the operator in the state.
        match param.update {
            OperatorUpdate::Add => state.add_operator(&sender, &param.operator, state_builder),
            OperatorUpdate::Remove => state.remove_operator(&sender, &param.operator),
        }

        // Log the appropriate event
        logger.log(
            &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(
                UpdateOperatorEvent {
                    owner: sender,
                    operator: param.operator,
                    update: param.update,
                },
            ),
        )?;
    }

    Ok(())
}

/// Takes a list of queries. Each query is an owner address and some address to
/// check as an operator of the owner address.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "GNFT",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    // Parse the parameter.
    let params: OperatorOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let state = host.state();
    let response: Vec<bool> = params
        .queries
        .iter()
        // Query the state for address being an operator of owner.
        .map(|query| state.is_operator(&query.owner, &query.address))
        .collect();

    Ok(OperatorOfQueryResponse::from(response))
}

/// Get the balance of given token IDs and addresses.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "GNFT",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    // Parse the parameter.
    let params: ContractBalanceOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for query in params.queries {
        let amount = state.balance(&query.token_id, &query.address)?;
        response.push(amount);
    }

    Ok(ContractBalanceOfQueryResponse::from(response))
}

/// Get the token metadata URLs of the given token IDs.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "GNFT",
    name = "tokenMetadata",
    parameter = "ContractTokenMetadataQueryParams",
    return_value = "TokenMetadataQueryResponse"
)]
fn token_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokenMetadataQueryResponse> {
    // Parse the parameter.
    let params: ContractTokenMetadataQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for token_id in params.queries {
        response.push(state.metadata_url(&token_id)?);
    }

    Ok(TokenMetadataQueryResponse(response))
}

/// Function to update values required for internal contract functionality. This includes:
/// - MintFee. Amount to be paid for minting a token.
/// - Fund. Account address that receives the collected fees.
///
///  It rejects if:
///  - Fails to parse `InternalValue` parameters.
///  - If sender is not the contract owner.
#[receive(
    contract = "GNFT",
    name = "updateInternalValue",
    parameter = "InternalValue",
    mutable
)]
fn update_internal_value<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure_eq!(
        ctx.sender(),
        Address::Account(ctx.owner()),
        CustomContractError::OnlyContractOwner.into()
    );

    let params: InternalValue = ctx.parameter_cursor().get()?;
    let state = host.state_mut();

    match params {
        InternalValue::MintFee(amount) => state.mint_fee = amount,
        InternalValue::Fund(account) => state.fund = account,
    }

    Ok(())
}

/// Function to view values required for internal contract functionality.
///
///  It rejects if:
///  - Fails to parse `ViewInternalValueParams` parameters.
#[receive(
    contract = "GNFT",
    name = "viewInternalValue",
    parameter = "ViewInternalValueParams",
    return_value = "InternalValue"
)]
fn view_internal_value<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<InternalValue> {
    let params: ViewInternalValueParams = ctx.parameter_cursor().get()?;
    let state = host.state();

    let value = match params {
        ViewInternalValueParams::MintFee => InternalValue::MintFee(state.mint_fee),
        ViewInternalValueParams::Fund => InternalValue::Fund(state.fund),
    };

    Ok(value)
}

/// Move the collected mint fees to the fund account.
/// Logs a `Withdraw` event.
///
///  It rejects if:
///  - If sender is not the contract owner.
///  - The transfer to the fund account fails.
#[receive(contract = "GNFT", name = "withdraw", mutable, enable_logger)]
fn withdraw<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    ensure_eq!(
        ctx.sender(),
        Address::Account(ctx.owner()),
        CustomContractError::OnlyContractOwner.into()
    );

    let fund = host.state().fund;
    let amount = host.self_balance();

    logger.log(&CustomEvent::Withdraw(WithdrawEvent { fund, amount }))?;

    host.invoke_transfer(&fund, amount)
        .map_err(CustomContractError::from)?;

    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([0u8; 32]);
    const ACCOUNT_1: AccountAddress = AccountAddress([1u8; 32]);
    const ADDRESS_1: Address = Address::Account(ACCOUNT_1);
    const ACCOUNT_2: AccountAddress = AccountAddress([2u8; 32]);
    const ADDRESS_2: Address = Address::Account(ACCOUNT_2);
    const FUND: AccountAddress = AccountAddress([9u8; 32]);
    const METADATA_URL: &str = "ipfs://QmTokenMetadata";

    fn mint_fee() -> Amount {
        Amount::from_micro_ccd(1_000)
    }

    fn token_0() -> ContractTokenId {
        TokenIdVec(0u32.to_le_bytes().to_vec())
    }

    fn token_1() -> ContractTokenId {
        TokenIdVec(1u32.to_le_bytes().to_vec())
    }

    fn empty_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
        State::new(
            state_builder,
            InitParams {
                mint_fee: mint_fee(),
                fund: FUND,
            },
        )
    }

    /// Contract state with `token_0` owned by `ADDRESS_1`.
    fn initial_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
        let mut state = empty_state(state_builder);
        state.mint(ADDRESS_1, METADATA_URL.into());
        state
    }

    #[concordium_test]
    fn test_init() {
        let mut ctx = TestInitContext::empty();
        let parameter_bytes = to_bytes(&InitParams {
            mint_fee: mint_fee(),
            fund: FUND,
        });
        ctx.set_parameter(&parameter_bytes);
        let mut builder = TestStateBuilder::new();

        let state = init(&ctx, &mut builder).expect_report("Contract initialization failed");

        claim_eq!(state.tokens.iter().count(), 0, "No token should be minted");
        claim_eq!(state.next_token_id, 0);
        claim_eq!(state.mint_fee, mint_fee());
        claim_eq!(state.fund, FUND);
    }

    /// Minting assigns sequential ids, makes the sender the owner and logs
    /// `Mint` and `TokenMetadata`.
    #[concordium_test]
    fn test_mint() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);
        ctx.set_invoker(ACCOUNT_1);
        let parameter_bytes = to_bytes(&MintParams {
            metadata_url: METADATA_URL.into(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = empty_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        host.set_self_balance(mint_fee());

        let result = mint(&ctx, &mut host, mint_fee(), &mut logger);
        claim_eq!(result, Ok(token_0()));

        host.set_self_balance(mint_fee() + mint_fee());
        let result = mint(&ctx, &mut host, mint_fee(), &mut logger);
        claim_eq!(result, Ok(token_1()));

        claim_eq!(host.state().tokens.iter().count(), 2);
        claim_eq!(
            host.state().balance(&token_0(), &ADDRESS_1),
            Ok(ContractTokenAmount::from(1))
        );
        claim_eq!(
            host.state().balance(&token_0(), &ADDRESS_2),
            Ok(ContractTokenAmount::from(0))
        );

        claim_eq!(logger.logs.len(), 4);
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Mint(MintEvent {
                token_id: token_0(),
                amount: ContractTokenAmount::from(1),
                owner: ADDRESS_1,
            }))
        );
        claim_eq!(
            logger.logs[1],
            to_bytes(
                &Cis2Event::<ContractTokenId, ContractTokenAmount>::TokenMetadata(
                    TokenMetadataEvent {
                        token_id: token_0(),
                        metadata_url: MetadataUrl {
                            url: METADATA_URL.into(),
                            hash: None,
                        },
                    }
                )
            )
        );
        claim!(
            host.get_transfers().is_empty(),
            "Exact fee must not be refunded"
        );
    }

    #[concordium_test]
    fn test_mint_insufficient_value() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);
        ctx.set_invoker(ACCOUNT_1);
        let parameter_bytes = to_bytes(&MintParams {
            metadata_url: METADATA_URL.into(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = empty_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = mint(&ctx, &mut host, Amount::from_micro_ccd(999), &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::InsufficientValue.into())
        );
        claim_eq!(host.state().tokens.iter().count(), 0);
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_mint_refunds_excess() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);
        ctx.set_invoker(ACCOUNT_1);
        let parameter_bytes = to_bytes(&MintParams {
            metadata_url: METADATA_URL.into(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = empty_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let paid = Amount::from_micro_ccd(1_500);
        host.set_self_balance(paid);

        let result = mint(&ctx, &mut host, paid, &mut logger);

        claim_eq!(result, Ok(token_0()));
        claim!(host.transfer_occurred(&ACCOUNT_1, Amount::from_micro_ccd(500)));
        claim_eq!(host.self_balance(), mint_fee());
    }

    #[concordium_test]
    fn test_transfer_account() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);

        let parameter = TransferParams(vec![Transfer {
            token_id: token_0(),
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_1,
            to: Receiver::from_account(ACCOUNT_2),
            data: AdditionalData::empty(),
        }]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        claim!(result.is_ok(), "Results in rejection");
        claim_eq!(
            host.state().balance(&token_0(), &ADDRESS_2),
            Ok(ContractTokenAmount::from(1))
        );
        claim_eq!(
            host.state().balance(&token_0(), &ADDRESS_1),
            Ok(ContractTokenAmount::from(0))
        );
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Transfer(TransferEvent {
                token_id: token_0(),
                amount: ContractTokenAmount::from(1),
                from: ADDRESS_1,
                to: ADDRESS_2,
            })),
            "Incorrect event emitted"
        );
    }

    /// Transfer fails when the sender is neither the owner nor an operator.
    #[concordium_test]
    fn test_transfer_not_authorized() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_2);

        let parameter = TransferParams(vec![Transfer {
            token_id: token_0(),
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_1,
            to: Receiver::from_account(ACCOUNT_2),
            data: AdditionalData::empty(),
        }]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::Unauthorized,
            "Error is expected to be Unauthorized"
        );
    }

    /// An operator of the owner moves the token; the owner's own operator
    /// list is checked, not the operator's.
    #[concordium_test]
    fn test_operator_transfer() {
        let auction = Address::Contract(ContractAddress {
            index: 7,
            subindex: 0,
        });
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(auction);

        let parameter = TransferParams(vec![Transfer {
            token_id: token_0(),
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_1,
            to: Receiver::from_account(ACCOUNT_2),
            data: AdditionalData::empty(),
        }]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let mut state = initial_state(&mut state_builder);
        state.add_operator(&ADDRESS_1, &auction, &mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        claim!(result.is_ok(), "Results in rejection");
        claim_eq!(
            host.state().tokens.get(&token_0()).map(|token| token.owner),
            Some(ADDRESS_2)
        );
    }

    /// An operator moves the token into its own contract, which is notified
    /// through its receive hook, and later moves it out again after the
    /// owner has revoked it.
    #[concordium_test]
    fn test_transfer_into_contract_and_out() {
        let escrow = ContractAddress {
            index: 7,
            subindex: 0,
        };
        let mut state_builder = TestStateBuilder::new();
        let mut state = initial_state(&mut state_builder);
        state.add_operator(&ADDRESS_1, &Address::Contract(escrow), &mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        host.setup_mock_entrypoint(
            escrow,
            OwnedEntrypointName::new_unchecked("onReceivingCIS2".into()),
            MockFn::new_v1(|parameter, _amount, _balance, _state| {
                let params = OnReceivingCis2Params::<ContractTokenId, ContractTokenAmount>::deserial(
                    &mut Cursor::new(parameter.as_ref()),
                )
                .map_err(|_| CallContractError::Trap)?;
                if params.from != ADDRESS_1 || params.token_id != token_0() {
                    return Err(CallContractError::Trap);
                }
                Ok((false, ()))
            }),
        );
        let mut logger = TestLogger::init();

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Contract(escrow));
        let parameter_bytes = to_bytes(&TransferParams(vec![Transfer {
            token_id: token_0(),
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_1,
            to: Receiver::Contract(
                escrow,
                OwnedEntrypointName::new_unchecked("onReceivingCIS2".into()),
            ),
            data: AdditionalData::empty(),
        }]));
        ctx.set_parameter(&parameter_bytes);

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        claim!(result.is_ok(), "Results in rejection");
        claim_eq!(
            host.state().tokens.get(&token_0()).map(|token| token.owner),
            Some(Address::Contract(escrow))
        );

        // Revoking the operator does not affect tokens the contract owns.
        host.state_mut().remove_operator(&ADDRESS_1, &Address::Contract(escrow));
        let parameter_bytes = to_bytes(&TransferParams(vec![Transfer {
            token_id: token_0(),
            amount: ContractTokenAmount::from(1),
            from: Address::Contract(escrow),
            to: Receiver::from_account(ACCOUNT_2),
            data: AdditionalData::empty(),
        }]));
        ctx.set_parameter(&parameter_bytes);

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        claim!(result.is_ok(), "Results in rejection");
        claim_eq!(
            host.state().tokens.get(&token_0()).map(|token| token.owner),
            Some(ADDRESS_2)
        );
    }

    #[concordium_test]
    fn test_transfer_not_owned() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_2);

        let parameter = TransferParams(vec![Transfer {
            token_id: token_0(),
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_2,
            to: Receiver::from_account(ACCOUNT_1),
            data: AdditionalData::empty(),
        }]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::InsufficientFunds));
    }

    #[concordium_test]
    fn test_transfer_unknown_token() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);

        let parameter = TransferParams(vec![Transfer {
            token_id: token_1(),
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_1,
            to: Receiver::from_account(ACCOUNT_2),
            data: AdditionalData::empty(),
        }]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_add_operator() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);

        let parameter = UpdateOperatorParams(vec![UpdateOperator {
            update: OperatorUpdate::Add,
            operator: ADDRESS_2,
        }]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = update_operator(&ctx, &mut host, &mut logger);

        claim!(result.is_ok(), "Results in rejection");
        claim!(
            host.state().is_operator(&ADDRESS_1, &ADDRESS_2),
            "Account should be an operator"
        );
        claim!(
            !host.state().is_operator(&ADDRESS_2, &ADDRESS_1),
            "Operator relation is not symmetric"
        );
        claim_eq!(logger.logs.len(), 1, "One event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(
                &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(
                    UpdateOperatorEvent {
                        owner: ADDRESS_1,
                        operator: ADDRESS_2,
                        update: OperatorUpdate::Add,
                    }
                )
            ),
            "Incorrect event emitted"
        );

        // Remove the operator again.
        let parameter = UpdateOperatorParams(vec![UpdateOperator {
            update: OperatorUpdate::Remove,
            operator: ADDRESS_2,
        }]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let result: ContractResult<()> = update_operator(&ctx, &mut host, &mut logger);

        claim!(result.is_ok(), "Results in rejection");
        claim!(!host.state().is_operator(&ADDRESS_1, &ADDRESS_2));
    }

    #[concordium_test]
    fn test_operator_of() {
        let mut ctx = TestReceiveContext::empty();
        let parameter = OperatorOfQueryParams {
            queries: vec![
                OperatorOfQuery {
                    owner: ADDRESS_1,
                    address: ADDRESS_2,
                },
                OperatorOfQuery {
                    owner: ADDRESS_2,
                    address: ADDRESS_1,
                },
            ],
        };
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut state_builder = TestStateBuilder::new();
        let mut state = initial_state(&mut state_builder);
        state.add_operator(&ADDRESS_1, &ADDRESS_2, &mut state_builder);
        let host = TestHost::new(state, state_builder);

        let OperatorOfQueryResponse(response) =
            operator_of(&ctx, &host).expect_report("Query failed");

        claim_eq!(response, vec![true, false]);
    }

    #[concordium_test]
    fn test_balance_of() {
        let mut ctx = TestReceiveContext::empty();
        let parameter: ContractBalanceOfQueryParams = BalanceOfQueryParams {
            queries: vec![
                BalanceOfQuery {
                    token_id: token_0(),
                    address: ADDRESS_1,
                },
                BalanceOfQuery {
                    token_id: token_0(),
                    address: ADDRESS_2,
                },
            ],
        };
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let host = TestHost::new(state, state_builder);

        let BalanceOfQueryResponse(response) =
            balance_of(&ctx, &host).expect_report("Query failed");

        claim_eq!(
            response,
            vec![ContractTokenAmount::from(1), ContractTokenAmount::from(0)]
        );

        // Unknown token ids are rejected.
        let parameter: ContractBalanceOfQueryParams = BalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: token_1(),
                address: ADDRESS_1,
            }],
        };
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        claim!(
            matches!(balance_of(&ctx, &host), Err(ContractError::InvalidTokenId)),
            "Unknown token should be rejected"
        );
    }

    #[concordium_test]
    fn test_token_metadata() {
        let mut ctx = TestReceiveContext::empty();
        let parameter: ContractTokenMetadataQueryParams = TokenMetadataQueryParams {
            queries: vec![token_0()],
        };
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let host = TestHost::new(state, state_builder);

        let TokenMetadataQueryResponse(response) =
            token_metadata(&ctx, &host).expect_report("Query failed");

        claim_eq!(response.len(), 1);
        claim_eq!(response[0].url, METADATA_URL);
        claim!(response[0].hash.is_none());
    }

    #[concordium_test]
    fn test_update_internal_value() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_owner(OWNER);
        ctx.set_sender(Address::Account(OWNER));
        let parameter_bytes = to_bytes(&InternalValue::Fund(ACCOUNT_2));
        ctx.set_parameter(&parameter_bytes);

        let mut state_builder = TestStateBuilder::new();
        let state = empty_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = update_internal_value(&ctx, &mut host);
        claim!(result.is_ok(), "Results in rejection");

        let parameter_bytes = to_bytes(&ViewInternalValueParams::Fund);
        ctx.set_parameter(&parameter_bytes);
        claim_eq!(
            view_internal_value(&ctx, &host),
            Ok(InternalValue::Fund(ACCOUNT_2))
        );

        let parameter_bytes = to_bytes(&InternalValue::MintFee(Amount::from_ccd(1)));
        ctx.set_parameter(&parameter_bytes);
        claim!(update_internal_value(&ctx, &mut host).is_ok());
        claim_eq!(host.state().mint_fee, Amount::from_ccd(1));
    }

    #[concordium_test]
    fn test_update_internal_value_not_owner() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_owner(OWNER);
        ctx.set_sender(ADDRESS_1);
        let parameter_bytes = to_bytes(&InternalValue::Fund(ACCOUNT_1));
        ctx.set_parameter(&parameter_bytes);

        let mut state_builder = TestStateBuilder::new();
        let state = empty_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result = update_internal_value(&ctx, &mut host);

        claim_eq!(
            result,
            Err(CustomContractError::OnlyContractOwner.into())
        );
        claim_eq!(host.state().fund, FUND);
    }

    #[concordium_test]
    fn test_withdraw() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_owner(OWNER);
        ctx.set_sender(Address::Account(OWNER));

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = empty_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        let collected = Amount::from_micro_ccd(3_000);
        host.set_self_balance(collected);

        let result = withdraw(&ctx, &mut host, &mut logger);

        claim!(result.is_ok(), "Results in rejection");
        claim!(host.transfer_occurred(&FUND, collected));
        claim_eq!(host.self_balance(), Amount::zero());
        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::Withdraw(WithdrawEvent {
                fund: FUND,
                amount: collected,
            }))
        );
    }

    #[concordium_test]
    fn test_withdraw_not_owner() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_owner(OWNER);
        ctx.set_sender(ADDRESS_1);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = empty_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        host.set_self_balance(Amount::from_micro_ccd(3_000));

        let result = withdraw(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::OnlyContractOwner.into())
        );
        claim_eq!(host.self_balance(), Amount::from_micro_ccd(3_000));
    }
}
