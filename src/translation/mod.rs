//! Language detection and the translation provider chain.

pub mod chain;
pub mod detector;
pub mod languages;
pub mod providers;

pub use chain::ProviderChain;
