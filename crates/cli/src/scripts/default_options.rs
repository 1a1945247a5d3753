//! Shows how to replace the built-in help and version options.

use clip_core::context::Context;
use clip_core::error::Result;
use clip_core::option::Arity;
use clip_core::script::Script;

use crate::scripts::emit;

#[derive(Debug, Default)]
pub struct DefaultOptions {
    output: Vec<String>,
}

impl DefaultOptions {
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

impl Script for DefaultOptions {
    fn script_version(&self) -> Option<&str> {
        Some("1.9.4")
    }

    fn configure(&mut self, ctx: &mut Context) -> Result<()> {
        ctx.disable_default_version()?;

        ctx.declare("sos", Arity::Flag)?
            .describe("Provides help to a poor lost soul.");
        ctx.set_help_option("sos")?;

        // Keep `-h` around as a plain flag to point people at `--sos`.
        ctx.declare("h", Arity::Flag)?.alias("help")?;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<()> {
        if ctx.is_given("h") {
            emit(&mut self.output, "This is not the help you're looking for.");
            emit(&mut self.output, "Try with --sos");
        } else {
            emit(&mut self.output, "This script doesn't have an option to show a version.");
            emit(&mut self.output, "But here it is written in Roman Numerals");
            emit(&mut self.output, "");
            emit(&mut self.output, "Version: I.IX.IV");
        }
        Ok(())
    }

    fn help(&mut self, _ctx: &Context) -> Result<()> {
        emit(&mut self.output, "This script does not provide any options.");
        emit(&mut self.output, "Just call it with no arguments.");
        Ok(())
    }
}

pub fn create() -> Box<dyn Script> {
    Box::new(DefaultOptions::default())
}
