//! Two-factor enrollment: provisioning URIs and their QR codes

mod provisioning;
mod qr;

pub use provisioning::{encode_uri, ProvisioningUri};
pub use qr::{render_two_factor_qr, QrImage, TwoFactorQrRenderer};
