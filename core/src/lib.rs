//! Loyalty Widgets - admin page helpers
//!
//! Two independent widgets used by the loyalty admin pages: a record count
//! label refreshed from the server, and the QR code a user scans to enroll
//! an authenticator app for two-factor login.
//!
//! Ambient page state (page URL, domain, query string) is always passed in
//! explicitly; neither widget reads global state.

pub mod constants;
pub mod count;
pub mod display;
pub mod totp;

mod error;

pub use error::{Error, Result};

use url::Url;

/// Configuration for the widgets
#[derive(Debug, Clone)]
pub struct Config {
    /// Page the widgets are embedded in; count requests resolve against it
    /// and its host is the issuer of enrollment codes
    pub page_url: String,
    /// Edge length of enrollment codes in pixels
    pub qr_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_url: constants::DEFAULT_PAGE_URL.to_string(),
            qr_size: constants::DEFAULT_QR_SIZE,
        }
    }
}

impl Config {
    /// Parsed page URL
    pub fn page_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.page_url)?)
    }

    /// Count fetcher bound to the configured page
    pub fn count_fetcher(&self) -> Result<CountFetcher> {
        Ok(CountFetcher::new(self.page_url()?))
    }

    /// Enrollment renderer issuing codes for the configured page's domain
    pub fn qr_renderer(&self) -> Result<TwoFactorQrRenderer> {
        Ok(TwoFactorQrRenderer::from_page_url(&self.page_url()?))
    }
}

// Re-export key types for convenience
pub use count::{CountFetcher, CountResult};
pub use display::{DisplayLabel, Field, Label, QrTarget, ValueHolder};
pub use totp::{render_two_factor_qr, ProvisioningUri, QrImage, TwoFactorQrRenderer};
