//! Wallet module for key management and transaction signing

pub mod wallet;

pub use wallet::{Wallet, WalletError};
