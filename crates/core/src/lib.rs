//! Clip Core Library
//!
//! This crate provides the framework behind clip scripts: small command-line
//! programs that declare their options up front and let the framework
//! tokenize, validate and bind the process arguments before their own code
//! runs.
//!
//! # Key Features
//!
//! - **Tokenizer**: Splits raw arguments into option keys and attached values
//! - **Option Registry**: Declared options with globally unique aliases
//! - **Validation Rules**: Integer, float, number, discrete, range and comparison checks
//! - **Lifecycle**: Configure, bind and execute phases with built-in help and version
//! - **Libraries**: Named helper objects loaded into a script's context
//! - **Settings**: YAML framework settings with sensible defaults
//!
//! # Examples
//!
//! A script that greets someone a bounded number of times:
//!
//! ```
//! use clip_core::context::Context;
//! use clip_core::error::Result;
//! use clip_core::lifecycle::{Lifecycle, Outcome, Phase};
//! use clip_core::option::Arity;
//! use clip_core::rule::Rule;
//! use clip_core::script::Script;
//!
//! struct Greeter;
//!
//! impl Script for Greeter {
//!     fn configure(&mut self, ctx: &mut Context) -> Result<()> {
//!         ctx.declare("n", Arity::Required)?
//!             .alias("name")?
//!             .describe("Who to greet.");
//!         ctx.declare("r", Arity::Optional)?
//!             .describe("Times to repeat.")
//!             .expect(Rule::range("[2,10]")?)?
//!             .default_value(2)?;
//!         Ok(())
//!     }
//!
//!     fn execute(&mut self, ctx: &mut Context) -> Result<()> {
//!         let times = ctx.value("r").and_then(|r| r.as_i64()).unwrap_or(1);
//!         for _ in 0..times {
//!             println!("Hello {}", ctx.value("n").map(ToString::to_string).unwrap_or_default());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut lifecycle = Lifecycle::new(Greeter, ["greet", "--name", "Alice"]);
//! assert_eq!(lifecycle.init(Phase::All)?, Outcome::Completed);
//! # Ok::<(), clip_core::error::Error>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod lifecycle;
pub mod loader;
pub mod option;
pub mod registry;
pub mod rule;
pub mod script;
pub mod tokenizer;
pub mod value;
