//! Default script: lists what else the launcher can run.

use clip_core::context::Context;
use clip_core::error::Result;
use clip_core::script::Script;

use crate::catalog::ScriptCatalog;
use crate::libraries::banner::Banner;
use crate::scripts::emit;

const TITLE: &str = "These are the scripts that are available:";

#[derive(Debug, Default)]
pub struct MainMenu {
    output: Vec<String>,
}

impl MainMenu {
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

impl Script for MainMenu {
    fn name(&self) -> &str {
        "Main"
    }

    fn configure(&mut self, ctx: &mut Context) -> Result<()> {
        ctx.load("banner")?;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<()> {
        match ctx.library::<Banner>("banner") {
            Some(banner) => {
                for line in banner.frame(TITLE) {
                    emit(&mut self.output, line);
                }
            }
            None => emit(&mut self.output, TITLE),
        }
        emit(&mut self.output, "");

        let catalog = ScriptCatalog::builtin();
        let width = catalog.entries().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, entry) in catalog.entries().filter(|(name, _)| *name != "main") {
            emit(
                &mut self.output,
                format!("   - {name:<width$}    {}", entry.description),
            );
        }

        emit(&mut self.output, "");
        emit(
            &mut self.output,
            "Try them and take a look at the code to see what each example does.",
        );
        emit(
            &mut self.output,
            "With multi_script enabled, run them using: clip [script name]",
        );
        Ok(())
    }
}

pub fn create() -> Box<dyn Script> {
    Box::new(MainMenu::default())
}
