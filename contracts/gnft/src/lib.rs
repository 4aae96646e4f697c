//! CIS-2 non-fungible token contract.
//!
//! Anyone can mint a token by paying the mint fee, the collected fees are
//! withdrawn by the contract owner to the fund account. Tokens minted here
//! are the assets put under auction by the `gauction` contract.
#![cfg_attr(not(feature = "std"), no_std)]
use commons::*;
use concordium_cis2::*;
use concordium_std::*;
use core::ops::DerefMut;

use crate::{events::*, structs::*};

mod contract;
mod events;
mod impls;
mod structs;
