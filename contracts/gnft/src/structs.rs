use super::*;

/// Token data.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct TokenData {
    /// Current owner of the token.
    pub owner: Address,
    /// Location of the token metadata.
    pub metadata_url: String,
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Every minted token with its owner.
    pub tokens: StateMap<ContractTokenId, TokenData, S>,
    /// Operators for each address.
    pub operators: StateMap<Address, StateSet<Address, S>, S>,
    /// Index of the token to be minted next.
    pub next_token_id: u32,
    /// Amount to be paid for minting a token.
    pub mint_fee: Amount,
    /// Account that receives the collected mint fees.
    pub fund: AccountAddress,
}

/// Init parameters.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// Amount to be paid for minting a token.
    pub mint_fee: Amount,
    /// Account that receives the collected mint fees.
    pub fund: AccountAddress,
}

/// Mint parameters.
#[derive(Debug, Serialize, SchemaType, Clone)]
pub struct MintParams {
    pub metadata_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SchemaType)]
pub enum InternalValue {
    MintFee(Amount),
    Fund(AccountAddress),
}

#[derive(Debug, Clone, Serialize, SchemaType)]
pub enum ViewInternalValueParams {
    MintFee,
    Fund,
}
