use super::*;

impl<S: HasStateApi> State<S> {
    /// Creates a new state with no tokens.
    pub fn new(state_builder: &mut StateBuilder<S>, params: InitParams) -> Self {
        Self {
            tokens: state_builder.new_map(),
            operators: state_builder.new_map(),
            next_token_id: 0,
            mint_fee: params.mint_fee,
            fund: params.fund,
        }
    }

    /// Mint the next token in sequence and return its id.
    pub fn mint(&mut self, owner: Address, metadata_url: String) -> ContractTokenId {
        let token_id = TokenIdVec(self.next_token_id.to_le_bytes().to_vec());
        self.next_token_id += 1;
        self.tokens.insert(
            token_id.clone(),
            TokenData {
                owner,
                metadata_url,
            },
        );
        token_id
    }

    /// Get the current balance of a given token ID for a given address.
    /// Results in an error if the token ID does not exist in the state.
    pub fn balance(
        &self,
        token_id: &ContractTokenId,
        address: &Address,
    ) -> ContractResult<ContractTokenAmount> {
        let token = self
            .tokens
            .get(token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        let amount = if token.owner == *address {
            SINGLE_TOKEN
        } else {
            0
        };
        Ok(amount.into())
    }

    /// Metadata url of an existing token.
    pub fn metadata_url(&self, token_id: &ContractTokenId) -> ContractResult<MetadataUrl> {
        let token = self
            .tokens
            .get(token_id)
            .ok_or(ContractError::InvalidTokenId)?;
        Ok(MetadataUrl {
            url: token.metadata_url.clone(),
            hash: None,
        })
    }

    /// Update the state with a transfer of a token.
    /// Results in an error if the token ID does not exist in the state or if
    /// the from address does not own the token.
    pub fn transfer(
        &mut self,
        token_id: &ContractTokenId,
        amount: ContractTokenAmount,
        from: &Address,
        to: &Address,
    ) -> ContractResult<()> {
        let mut token = self
            .tokens
            .get_mut(token_id)
            .ok_or(ContractError::InvalidTokenId)?;

        // A zero transfer does not modify the state.
        if amount == 0.into() {
            return Ok(());
        }

        ensure!(
            amount == SINGLE_TOKEN.into() && token.owner == *from,
            ContractError::InsufficientFunds
        );
        token.owner = *to;

        Ok(())
    }

    /// Add a new operator for the given address.
    ///
    /// Succeeds even if the `operator` is already an operator for the `owner`.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        self.operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(*operator);
    }

    /// Update the state removing an operator for a given address.
    /// Succeeds even if the `operator` is _not_ an operator for the `address`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        self.operators
            .get_mut(owner)
            .map(|mut operators| operators.remove(operator));
    }

    /// Check if `address` is an operator for `owner`.
    pub fn is_operator(&self, owner: &Address, address: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|operators| operators.contains(address))
            .unwrap_or(false)
    }
}
