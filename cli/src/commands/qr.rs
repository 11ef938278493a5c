//! QR command implementation.

use std::path::PathBuf;

use anyhow::Context;
use loyalty_widgets_core::{Config, Field, TwoFactorQrRenderer};

use crate::ui::{print_qr_code, ConsoleLabel};

/// Render a two-factor enrollment code and show it in the terminal.
pub fn run_qr(
    config: &Config,
    email: &str,
    secret: &str,
    domain: Option<String>,
    svg: Option<PathBuf>,
) -> anyhow::Result<()> {
    let renderer = match domain {
        Some(domain) => TwoFactorQrRenderer::new(domain),
        None => config.qr_renderer()?,
    };

    let target = ConsoleLabel::new("two-factor");
    let secret = Field::new(secret);
    renderer.render(&target, &secret, email, config.qr_size)?;

    let image = target.code().context("no code was drawn")?;

    println!(
        "\n\x1b[1;36mTwo-factor enrollment\x1b[0m \x1b[2m{}px, {} modules\x1b[0m",
        image.width(),
        image.module_count()
    );
    println!("\x1b[1mIssuer:\x1b[0m  {}", renderer.domain());
    println!("\x1b[1mAccount:\x1b[0m {}", email);

    println!("\n\x1b[1;33mScan this QR code with your authenticator app:\x1b[0m\n");
    print_qr_code(&image);
    println!("\n\x1b[2mOr enter manually: {}\x1b[0m\n", image.text());

    if let Some(path) = svg {
        std::fs::write(&path, image.to_svg())
            .with_context(|| format!("writing {}", path.display()))?;
        println!(
            "\x1b[1;32m✓\x1b[0m Wrote {}x{} SVG to {}",
            image.width(),
            image.height(),
            path.display()
        );
    }

    Ok(())
}
