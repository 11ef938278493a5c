//! CLI command implementations.

mod count;
mod qr;

pub use count::run_count;
pub use qr::run_qr;
