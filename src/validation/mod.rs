//! Request Validation Module
//! 
//! This module checks every inbound inquiry field against its format rule
//! before any lookup is attempted. Validation stops at the first failing field.

mod validator;

#[cfg(test)]
mod tests;

pub use validator::Validator;
