use std::io::Write;

use crate::types::{Category, ClassList};

use super::{DisplayTarget, TargetResult};

const ERASE_LINE: &str = "\r\x1b[2K";

/// A single terminal line used as the display region.
///
/// With `ansi` the line is drawn in place and erased on hide. Without it (pipes,
/// log files) every show appends one line and hide writes nothing.
pub struct StatusLine<W> {
    out: W,
    ansi: bool,
    text: String,
    category: Category,
    shown: bool,
}

impl<W: Write + Send + 'static> StatusLine<W> {
    pub const fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            text: String::new(),
            category: Category::Error,
            shown: false,
        }
    }

    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    fn render(&mut self) -> TargetResult {
        let text = sanitize(&self.text);
        if self.ansi {
            let color = match self.category {
                Category::Success => "\x1b[32m",
                Category::Error => "\x1b[31m",
            };
            write!(
                self.out,
                "{ERASE_LINE}{color}{}\x1b[0m {text}",
                glyph(self.category)
            )?;
        } else {
            writeln!(self.out, "{} [{}] {text}", glyph(self.category), self.category)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send + 'static> DisplayTarget for StatusLine<W> {
    fn set_text(&mut self, text: &str) -> TargetResult {
        text.clone_into(&mut self.text);
        Ok(())
    }

    fn set_classes(&mut self, classes: &ClassList) -> TargetResult {
        self.category = classes.category;
        Ok(())
    }

    fn show(&mut self) -> TargetResult {
        self.shown = true;
        self.render()
    }

    fn hide(&mut self) -> TargetResult {
        if !std::mem::replace(&mut self.shown, false) {
            return Ok(());
        }
        if self.ansi {
            self.out.write_all(ERASE_LINE.as_bytes())?;
            self.out.flush()?;
        }
        Ok(())
    }
}

const fn glyph(category: Category) -> char {
    match category {
        Category::Success => '✔',
        Category::Error => '✘',
    }
}

/// Control characters are printed escaped so a message cannot drive the terminal.
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}
