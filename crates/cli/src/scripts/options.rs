//! Greets someone, optionally several times.

use clip_core::context::Context;
use clip_core::error::Result;
use clip_core::option::Arity;
use clip_core::rule::Rule;
use clip_core::script::Script;
use clip_core::value::Value;

use crate::scripts::emit;

#[derive(Debug, Default)]
pub struct Options {
    output: Vec<String>,
}

impl Options {
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

impl Script for Options {
    fn script_version(&self) -> Option<&str> {
        Some("1.0.0")
    }

    fn configure(&mut self, ctx: &mut Context) -> Result<()> {
        ctx.declare("n", Arity::Required)?
            .alias("name")?
            .describe("The name to greet.");

        ctx.declare("r", Arity::Optional)?
            .describe("The amount of times to repeat. Min: 2, Max 10")
            .expect(Rule::range("[2,10]")?)?
            .default_value(10)?;

        Ok(())
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<()> {
        // The default only applies once `-r` is given without a value.
        let repeat = if ctx.is_given("r") {
            ctx.value("r").and_then(Value::as_i64).unwrap_or(1)
        } else {
            1
        };

        let message = match ctx.value("n") {
            Some(name) if ctx.is_given("n") => format!("Hello {name}"),
            _ => "Hello, I'm Clip".to_string(),
        };

        for _ in 0..repeat {
            emit(&mut self.output, message.as_str());
        }
        Ok(())
    }
}

pub fn create() -> Box<dyn Script> {
    Box::new(Options::default())
}
