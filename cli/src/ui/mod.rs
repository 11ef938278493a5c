//! UI utilities for terminal output.

mod label;
mod qr;

pub use label::ConsoleLabel;
pub use qr::print_qr_code;
