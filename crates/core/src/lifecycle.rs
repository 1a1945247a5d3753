//! Drives a script through configuration, argument binding and execution.
//!
//! ```
//! use clip_core::context::Context;
//! use clip_core::error::Result;
//! use clip_core::lifecycle::{Lifecycle, Outcome, Phase, Shortcut};
//! use clip_core::script::Script;
//!
//! struct Noop;
//!
//! impl Script for Noop {
//!     fn configure(&mut self, _ctx: &mut Context) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn execute(&mut self, _ctx: &mut Context) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut lifecycle = Lifecycle::new(Noop, ["noop", "--version"]);
//! let outcome = lifecycle.init(Phase::All)?;
//! assert_eq!(outcome, Outcome::Terminated(Shortcut::Version));
//! # Ok::<(), clip_core::error::Error>(())
//! ```

use std::process::ExitCode;

use log::{debug, info};

use crate::context::Context;
use crate::error::{ConfigurationError, Error, Result};
use crate::option::Opt;
use crate::script::Script;
use crate::tokenizer::tokenize;

/// Which part of the lifecycle [`Lifecycle::init`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    All,
    Configuration,
    ArgBinding,
    Execution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Created,
    Configured,
    ArgBound,
    Executing,
    Terminal,
}

/// A built-in option that ends the script before `execute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Help,
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The requested phase finished and later phases are still pending.
    Continue,
    /// `execute` ran to completion.
    Completed,
    Terminated(Shortcut),
}

#[derive(Debug)]
pub struct Lifecycle<S: Script> {
    script: S,
    context: Context,
    state: State,
    args: Vec<String>,
}

impl<S: Script> Lifecycle<S> {
    /// `args` are the full process arguments, program name included.
    pub fn new<I, A>(script: S, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self::with_context(script, Context::default(), args)
    }

    /// Runs `script` in a prepared context, e.g. one carrying loaded settings
    /// and library sources.
    pub fn with_context<I, A>(script: S, context: Context, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            script,
            context,
            state: State::Created,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs one phase, or all of them in order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the phase does not follow the
    /// current state, and passes through every error raised by the script
    /// hooks or by argument binding.
    pub fn init(&mut self, phase: Phase) -> Result<Outcome> {
        match phase {
            Phase::All => {
                self.configure()?;
                self.bind_args()?;
                self.execute()
            }
            Phase::Configuration => {
                self.configure()?;
                Ok(Outcome::Continue)
            }
            Phase::ArgBinding => {
                self.bind_args()?;
                Ok(Outcome::Continue)
            }
            Phase::Execution => self.execute(),
        }
    }

    fn enter(&self, phase: Phase, expected: State) -> std::result::Result<(), ConfigurationError> {
        if self.state != expected {
            return Err(ConfigurationError::PhaseOrder {
                phase: format!("{phase:?}"),
                state: format!("{:?}", self.state),
            });
        }
        info!("Entering {phase:?} phase");
        Ok(())
    }

    fn configure(&mut self) -> Result<()> {
        self.enter(Phase::Configuration, State::Created)?;

        self.context.enable_default_help()?;
        self.context.enable_default_version()?;
        self.script.configure(&mut self.context)?;

        self.context.mark_configured();
        self.state = State::Configured;
        Ok(())
    }

    fn bind_args(&mut self) -> Result<()> {
        self.enter(Phase::ArgBinding, State::Configured)?;

        let parsed = tokenize(&self.args);
        for orphan in &parsed.orphans {
            println!("Orphan argument: {orphan}. Every argument must be part of an option.");
        }

        self.context.bind(&parsed)?;
        self.context.mark_initialized();
        self.state = State::ArgBound;
        Ok(())
    }

    fn execute(&mut self) -> Result<Outcome> {
        self.enter(Phase::Execution, State::ArgBound)?;
        self.state = State::Executing;

        let outcome = if self.context.help_option().is_some_and(Opt::is_given) {
            debug!("Help option given, skipping execute");
            self.script.help(&self.context)?;
            Outcome::Terminated(Shortcut::Help)
        } else if self.context.version_option().is_some_and(Opt::is_given) {
            debug!("Version option given, skipping execute");
            self.script.version(&self.context)?;
            Outcome::Terminated(Shortcut::Version)
        } else {
            self.script.execute(&mut self.context)?;
            Outcome::Completed
        };

        self.state = State::Terminal;
        Ok(outcome)
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    #[must_use]
    pub fn script(&self) -> &S {
        &self.script
    }

    /// Drops every declaration and binding so the same script can be run
    /// again from the configuration phase.
    pub fn reset(&mut self) {
        self.context.reset();
        self.state = State::Created;
    }

    /// Replaces the arguments used by the next binding phase.
    pub fn set_args<I, A>(&mut self, args: I)
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
    }
}

/// Runs a script to completion and maps the result to an exit status.
///
/// Usage errors are printed and turn into a failure status. Anything else is
/// a defect in the script or its environment and is returned to the caller.
///
/// # Errors
///
/// Every error other than [`Error::Usage`].
pub fn run<S: Script>(lifecycle: &mut Lifecycle<S>) -> Result<ExitCode> {
    match lifecycle.init(Phase::All) {
        Ok(outcome) => {
            debug!("Script finished with {outcome:?}");
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Usage(e)) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UsageError;
    use crate::option::Arity;
    use crate::rule::Rule;
    use crate::value::Value;

    #[derive(Default)]
    struct Recorder {
        executed: bool,
        helped: bool,
    }

    impl Script for Recorder {
        fn configure(&mut self, ctx: &mut Context) -> Result<()> {
            ctx.declare("n", Arity::Required)?.alias("name")?;
            ctx.declare("r", Arity::Optional)?
                .expect(Rule::range("[2,10]")?)?
                .default_value(10)?;
            Ok(())
        }

        fn execute(&mut self, _ctx: &mut Context) -> Result<()> {
            self.executed = true;
            Ok(())
        }

        fn help(&mut self, _ctx: &Context) -> Result<()> {
            self.helped = true;
            Ok(())
        }
    }

    #[test]
    fn test_all_phases() {
        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog", "-n", "Alice"]);
        let outcome = lifecycle.init(Phase::All).unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(lifecycle.state(), State::Terminal);
        assert!(lifecycle.script().executed);

        let ctx = lifecycle.context();
        assert_eq!(ctx.value("n"), Some(&Value::from("Alice")));
        assert_eq!(ctx.value("r"), Some(&Value::Int(10)));
        assert!(!ctx.is_given("r"));
        assert!(ctx.is_initialized());
    }

    #[test]
    fn test_phases_one_by_one() {
        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog", "-r", "3"]);

        assert_eq!(lifecycle.init(Phase::Configuration).unwrap(), Outcome::Continue);
        assert_eq!(lifecycle.state(), State::Configured);
        assert!(!lifecycle.context().is_initialized());

        assert_eq!(lifecycle.init(Phase::ArgBinding).unwrap(), Outcome::Continue);
        assert_eq!(lifecycle.context().value("r"), Some(&Value::Int(3)));

        assert_eq!(lifecycle.init(Phase::Execution).unwrap(), Outcome::Completed);
    }

    #[test]
    fn test_phase_out_of_order() {
        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog"]);
        let err = lifecycle.init(Phase::Execution).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::PhaseOrder { .. })
        ));
        assert_eq!(
            err.to_string(),
            "The Execution phase cannot run while the script is Created."
        );

        lifecycle.init(Phase::Configuration).unwrap();
        assert!(lifecycle.init(Phase::Configuration).is_err());
    }

    #[test]
    fn test_help_short_circuits() {
        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog", "-h", "-n", "Bob"]);
        let outcome = lifecycle.init(Phase::All).unwrap();

        assert_eq!(outcome, Outcome::Terminated(Shortcut::Help));
        assert!(lifecycle.script().helped);
        assert!(!lifecycle.script().executed);
    }

    #[test]
    fn test_help_wins_over_version() {
        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog", "--version", "--help"]);
        assert_eq!(
            lifecycle.init(Phase::All).unwrap(),
            Outcome::Terminated(Shortcut::Help)
        );
    }

    #[test]
    fn test_usage_error_leaves_script_unexecuted() {
        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog", "-n"]);
        let err = lifecycle.init(Phase::All).unwrap_err();

        assert!(matches!(
            err,
            Error::Usage(UsageError::MissingArgument(ref key)) if key == "n"
        ));
        assert!(!lifecycle.script().executed);
        assert_eq!(lifecycle.state(), State::Configured);
    }

    #[test]
    fn test_configuration_after_initialization_fails() {
        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog"]);
        lifecycle.context_mut().mark_initialized();

        let err = lifecycle.init(Phase::Configuration).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The script was already configured. This command is not allowed outside configure()."
        );
    }

    #[test]
    fn test_reset_allows_rerun() {
        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog", "-n", "Alice"]);
        lifecycle.init(Phase::All).unwrap();

        lifecycle.reset();
        lifecycle.set_args(["prog", "-r", "4"]);
        lifecycle.init(Phase::All).unwrap();

        assert_eq!(lifecycle.context().value("n"), None);
        assert_eq!(lifecycle.context().value("r"), Some(&Value::Int(4)));
    }

    fn same_code(left: ExitCode, right: ExitCode) -> bool {
        format!("{left:?}") == format!("{right:?}")
    }

    #[test]
    fn test_run_maps_usage_errors_to_failure() {
        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog", "--bogus"]);
        let code = run(&mut lifecycle).unwrap();
        assert!(same_code(code, ExitCode::FAILURE));
        assert!(!lifecycle.script().executed);

        let mut lifecycle = Lifecycle::new(Recorder::default(), ["prog"]);
        assert!(same_code(run(&mut lifecycle).unwrap(), ExitCode::SUCCESS));
    }

    #[test]
    fn test_run_propagates_configuration_errors() {
        struct Broken;

        impl Script for Broken {
            fn configure(&mut self, ctx: &mut Context) -> Result<()> {
                ctx.declare("a", Arity::Flag)?;
                ctx.declare("a", Arity::Flag)?;
                Ok(())
            }

            fn execute(&mut self, _ctx: &mut Context) -> Result<()> {
                Ok(())
            }
        }

        let mut lifecycle = Lifecycle::new(Broken, ["prog"]);
        let err = run(&mut lifecycle).unwrap_err();
        assert_eq!(err.to_string(), "This option was already registered: a.");
    }
}
