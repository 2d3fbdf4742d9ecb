//! It exposes functions for minting NFTs, listing them for sale, cancelling
//! and repricing listings, buying one of the listed NFTs and withdrawing the
//! accumulated sale proceeds.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{events::*, helper::*, structs::*};
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

mod contract;
mod events;
mod helper;
mod impls;
mod structs;
