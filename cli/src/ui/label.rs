//! Console-backed display target.

use loyalty_widgets_core::{DisplayLabel, Label, QrImage, QrTarget};

/// A label that echoes every content change to the terminal.
pub struct ConsoleLabel {
    name: &'static str,
    inner: Label,
}

impl ConsoleLabel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Label::new(),
        }
    }

    pub fn text(&self) -> String {
        self.inner.text()
    }

    pub fn code(&self) -> Option<QrImage> {
        self.inner.code()
    }
}

impl DisplayLabel for ConsoleLabel {
    fn set_text(&self, text: &str) {
        println!("\x1b[2m[{}]\x1b[0m {:?}", self.name, text);
        self.inner.set_text(text);
    }
}

impl QrTarget for ConsoleLabel {
    fn draw(&self, image: QrImage) {
        println!(
            "\x1b[2m[{}]\x1b[0m drew {}x{} code",
            self.name,
            image.width(),
            image.height()
        );
        self.inner.draw(image);
    }
}
