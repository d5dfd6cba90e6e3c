#![doc = include_str!("../README.md")]

pub mod token;

#[cfg(feature = "translate")]
pub mod language;
#[cfg(feature = "translate")]
pub mod translate;
