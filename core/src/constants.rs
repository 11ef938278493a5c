//! Centralized widget constants
//!
//! Endpoint paths, label texts and timeouts shared by the widgets and the CLI.

use std::time::Duration;

/// Count endpoint, resolved relative to the page the widget lives on
pub const COUNT_ENDPOINT: &str = "ajax/count/";

/// Fixed lifetime bound for a single count request
pub const COUNT_TIMEOUT: Duration = Duration::from_millis(30 * 1000);

/// Label text while a count request is in flight
pub const LOADING_TEXT: &str = "Loading...";

/// Label text when a count request failed for any reason
pub const ERROR_TEXT: &str = "Refresh ( ERROR )";

/// Scheme and type prefix of TOTP provisioning URIs
pub const OTPAUTH_SCHEME: &str = "otpauth://totp/";

/// Default QR code edge length in pixels
pub const DEFAULT_QR_SIZE: u32 = 256;

/// Page the count widget is bound to when none is given
pub const DEFAULT_PAGE_URL: &str = "http://localhost:5000/admin/";
