/// Tag for the StartAuction event.
pub const START_AUCTION_TAG: u8 = u8::MAX - 5;

/// Tag for the Bid event.
pub const BID_TAG: u8 = u8::MAX - 6;

/// Tag for the Refund event.
pub const REFUND_TAG: u8 = u8::MAX - 7;

/// Tag for the Cancel event.
pub const CANCEL_TAG: u8 = u8::MAX - 8;

/// Tag for the Complete event.
pub const COMPLETE_TAG: u8 = u8::MAX - 9;

/// Tag for the Withdraw event of the token contract.
pub const WITHDRAW_TAG: u8 = u8::MAX - 10;

/// Only 0 or 1 of a non-fungible token can be owned.
pub const SINGLE_TOKEN: u64 = 1;
