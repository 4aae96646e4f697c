//! English auction over CIS-2 tokens.
//!
//! The maker approves this contract as an operator, and starting an auction
//! moves the token into this contract. Bidders lock CCD in the contract until
//! they are outbid or the auction is settled.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod custody;
mod events;
mod external;
mod mocks;
mod settlement;
mod state;
