#![doc = include_str!("../README.md")]

pub mod exif;
pub mod field;
pub mod math;
pub mod rational;
pub mod utils;

pub use rational::Rational;
