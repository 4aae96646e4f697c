use super::*;

/// The custom errors the contracts can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Failed to invoke a contract (Error code: -4).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -5).
    InvokeTransferError,
    /// Invoked contract does not speak the expected interface (Error code: -6).
    Incompatible,
    /// Only account addresses can call this function (Error code: -7).
    OnlyAccountAddress,
    /// Sender is not allowed to move the token (Error code: -8).
    Unauthorized,
    /// Only the token owner can do this (Error code: -9).
    OnlyOwner,
    /// Only the contract owner has access (Error code: -10).
    OnlyContractOwner,
    /// Auction with this id does not exist (Error code: -11).
    WrongAuctionId,
    /// Auction maker is not allowed to bid (Error code: -12).
    SenderIsMaker,
    /// Bid is below the start price or not above the highest bid (Error code: -13).
    WrongBidAmount,
    /// Auction has not reached its expiry yet (Error code: -14).
    NotFinishedAuction,
    /// Auction has reached its expiry (Error code: -15).
    FinishedAuction,
    /// Only the auction maker can do this (Error code: -16).
    NoPermission,
    /// Auction already has a bid (Error code: -17).
    BiddersExist,
    /// Token is already under an active auction (Error code: -18).
    AlreadyInAuction,
    /// Auction expiry is not in the future (Error code: -19).
    InvalidExpiry,
    /// Attached amount does not cover the mint fee (Error code: -20).
    InsufficientValue,
    /// Only contracts can call this function (Error code: -21).
    ContractOnly,
    /// Token amounts other than a single token are not supported (Error code: -22).
    Unsupported,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfers to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}

/// Failure of a read-only query against another contract.
#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    Compatibility,
    Parse,
}
