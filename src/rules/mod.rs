//! Heuristic rules
//!
//! Each rule checks one weakness pattern against the full password.
//! Rules are independent: every matching rule fires, none short-circuits.

mod length;
mod personal;
mod repeat;
mod sequence;
mod variety;

pub use length::length_rule;
pub use personal::email_token_rule;
pub use repeat::repeated_char_rule;
pub use sequence::{keyboard_run_rule, sequential_digits_rule};
pub use variety::variety_rule;
