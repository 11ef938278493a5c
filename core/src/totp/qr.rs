//! Two-factor enrollment QR rendering

use std::fmt::Write as _;

use qrcode::{Color, QrCode};
use url::Url;

use crate::display::{QrTarget, ValueHolder};
use crate::totp::ProvisioningUri;
use crate::{Error, Result};

/// A QR code rasterized to a square of `size` x `size` pixels
///
/// There is no quiet zone: modules span the whole square, pixel `p` on
/// either axis falling into module `p * modules / size`. Pixels are derived
/// from the module matrix on demand, so the size costs no memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    text: String,
    size: u32,
    module_count: usize,
    modules: Vec<bool>,
}

impl QrImage {
    /// Encode `text` and rasterize it at `size` pixels per side
    pub fn render(text: &str, size: u32) -> Result<Self> {
        if size == 0 {
            return Err(Error::QrEncode("size must be non-zero".to_string()));
        }

        let code = QrCode::new(text.as_bytes())
            .map_err(|e| Error::QrEncode(e.to_string()))?;

        let module_count = code.width();
        let modules: Vec<bool> = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();

        Ok(Self {
            text: text.to_string(),
            size,
            module_count,
            modules,
        })
    }

    /// The encoded text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> u32 {
        self.size
    }

    pub fn height(&self) -> u32 {
        self.size
    }

    /// Number of modules per side of the underlying code
    pub fn module_count(&self) -> usize {
        self.module_count
    }

    /// Whether module (`x`, `y`) is dark
    pub fn is_dark_module(&self, x: usize, y: usize) -> bool {
        x < self.module_count && y < self.module_count && self.modules[y * self.module_count + x]
    }

    /// Whether pixel (`x`, `y`) is dark
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        let n = self.size as usize;
        let mc = self.module_count;
        self.modules[(y as usize * mc / n) * mc + (x as usize * mc / n)]
    }

    /// Pixel range `[start, end)` covered by module `m` on either axis.
    /// Empty when the image has fewer pixels than modules.
    fn span(&self, m: usize) -> (usize, usize) {
        let n = self.size as usize;
        let mc = self.module_count;
        let edge = |m: usize| (m * n + mc - 1) / mc;
        (edge(m), edge(m + 1))
    }

    /// Export as an SVG document of exactly `size` x `size` pixels
    pub fn to_svg(&self) -> String {
        let n = self.size;
        let mut path = String::new();

        for my in 0..self.module_count {
            let (y0, y1) = self.span(my);
            if y0 == y1 {
                continue;
            }

            let mut run: Option<usize> = None;
            for mx in 0..self.module_count {
                let (x0, x1) = self.span(mx);
                if x0 == x1 {
                    continue;
                }
                if self.is_dark_module(mx, my) {
                    run.get_or_insert(x0);
                } else if let Some(start) = run.take() {
                    push_rect(&mut path, start, y0, x0 - start, y1 - y0);
                }
            }
            if let Some(start) = run {
                push_rect(&mut path, start, y0, n as usize - start, y1 - y0);
            }
        }

        format!(
            concat!(
                r#"<?xml version="1.0" standalone="yes"?>"#,
                r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{n}" height="{n}" viewBox="0 0 {n} {n}" shape-rendering="crispEdges">"#,
                r##"<rect width="{n}" height="{n}" fill="#fff"/>"##,
                r##"<path fill="#000" d="{path}"/>"##,
                "</svg>"
            ),
            n = n,
            path = path
        )
    }
}

fn push_rect(path: &mut String, x: usize, y: usize, w: usize, h: usize) {
    let _ = write!(path, "M{x} {y}h{w}v{h}h-{w}z");
}

/// Render a two-factor enrollment code into `target`
///
/// Clears the target, reads the secret from `secret_source` right now, and
/// draws the percent-encoded provisioning URI as a `size` x `size` code. The
/// secret is not validated; an empty one yields an empty `secret=` parameter.
pub fn render_two_factor_qr<T, S>(
    target: &T,
    secret_source: &S,
    user_email: &str,
    domain: &str,
    size: u32,
) -> Result<()>
where
    T: QrTarget + ?Sized,
    S: ValueHolder + ?Sized,
{
    target.set_text("");

    let uri = ProvisioningUri::new(domain, user_email, secret_source.value());
    let image = QrImage::render(&uri.to_encoded(), size)?;

    tracing::debug!(
        "rendered enrollment code ({} modules, {}px)",
        image.module_count(),
        size
    );
    target.draw(image);
    Ok(())
}

/// Two-factor QR renderer bound to the domain of the current page
#[derive(Debug, Clone)]
pub struct TwoFactorQrRenderer {
    domain: String,
}

impl TwoFactorQrRenderer {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Take the domain from the page URL; a URL without a host gives an empty domain
    pub fn from_page_url(page_url: &Url) -> Self {
        Self::new(page_url.host_str().unwrap_or_default())
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// See [`render_two_factor_qr`]
    pub fn render<T, S>(&self, target: &T, secret_source: &S, user_email: &str, size: u32) -> Result<()>
    where
        T: QrTarget + ?Sized,
        S: ValueHolder + ?Sized,
    {
        render_two_factor_qr(target, secret_source, user_email, &self.domain, size)
    }
}
