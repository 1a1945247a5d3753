//! Framed headings for script output.

use clip_core::loader::Library;

const DEFAULT_WIDTH: usize = 40;

#[derive(Debug, Default)]
pub struct Banner {
    width: usize,
}

impl Library for Banner {
    fn on_load(&mut self) {
        self.width = DEFAULT_WIDTH;
    }
}

impl Banner {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// The title between two rules, each at least as wide as the title.
    #[must_use]
    pub fn frame(&self, title: &str) -> Vec<String> {
        let rule = "=".repeat(self.width.max(title.len()));
        vec![rule.clone(), title.to_string(), rule]
    }
}

pub fn create() -> Box<dyn Library> {
    Box::new(Banner::default())
}
