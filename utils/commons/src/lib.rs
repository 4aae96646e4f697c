//! It exposes all common structs, types and host extensions shared by the
//! GNFT and GAuction contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{cis2::*, constants::*, errors::*, structs::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

mod cis2;
mod constants;
mod errors;
mod structs;
mod types;
