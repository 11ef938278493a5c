//! QR code display.

use loyalty_widgets_core::QrImage;

/// Print a rendered code to the terminal.
///
/// Works on the module matrix rather than the pixel raster, using Unicode
/// block characters where each character represents 2 vertical modules.
pub fn print_qr_code(image: &QrImage) {
    let width = image.module_count();

    // ▀ = top dark, ▄ = bottom dark, █ = both, space = neither
    let quiet = "  ";

    println!("{}{}", quiet, " ".repeat(width + 4));

    for y in (0..width).step_by(2) {
        let mut line = String::with_capacity(width + 4);
        for x in 0..width {
            let top = image.is_dark_module(x, y);
            let bottom = image.is_dark_module(x, y + 1);

            line.push(match (top, bottom) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        println!("{}  {}  ", quiet, line);
    }

    println!("{}{}", quiet, " ".repeat(width + 4));
}
