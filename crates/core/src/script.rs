//! The hooks a script implements.

use crate::context::Context;
use crate::error::Result;

/// A command-line script driven by a [`Lifecycle`](crate::lifecycle::Lifecycle).
///
/// Only [`Script::configure`] and [`Script::execute`] are required. The help
/// and version hooks print the framework's standard output unless overridden.
///
/// ```
/// use clip_core::context::Context;
/// use clip_core::error::Result;
/// use clip_core::option::Arity;
/// use clip_core::script::Script;
///
/// struct Hello;
///
/// impl Script for Hello {
///     fn script_version(&self) -> Option<&str> {
///         Some("1.0")
///     }
///
///     fn configure(&mut self, ctx: &mut Context) -> Result<()> {
///         ctx.declare("n", Arity::Required)?.alias("name")?;
///         Ok(())
///     }
///
///     fn execute(&mut self, ctx: &mut Context) -> Result<()> {
///         if let Some(name) = ctx.value("n") {
///             println!("Hello {name}");
///         }
///         Ok(())
///     }
/// }
///
/// assert_eq!(Hello.name(), "Hello");
/// ```
pub trait Script {
    /// Name shown in the version banner. Defaults to the type name.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn script_version(&self) -> Option<&str> {
        None
    }

    /// Declares options and loads libraries.
    ///
    /// # Errors
    ///
    /// Any declaration error. These are bugs in the script and are never
    /// turned into a friendly message.
    fn configure(&mut self, ctx: &mut Context) -> Result<()>;

    /// The body of the script, run once arguments are bound.
    ///
    /// # Errors
    ///
    /// Return [`Error::usage`](crate::error::Error::usage) to reject input
    /// the way the framework does.
    fn execute(&mut self, ctx: &mut Context) -> Result<()>;

    /// Called instead of [`Script::execute`] when the help option is given.
    ///
    /// # Errors
    ///
    /// Overrides may fail; the default never does.
    fn help(&mut self, ctx: &Context) -> Result<()> {
        println!("{}", ctx.render_help());
        Ok(())
    }

    /// Called instead of [`Script::execute`] when the version option is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the version format cannot be rendered.
    fn version(&mut self, ctx: &Context) -> Result<()> {
        println!("{}", ctx.render_version(self.name(), self.script_version())?);
        Ok(())
    }
}

impl<T: Script + ?Sized> Script for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn script_version(&self) -> Option<&str> {
        (**self).script_version()
    }

    fn configure(&mut self, ctx: &mut Context) -> Result<()> {
        (**self).configure(ctx)
    }

    fn execute(&mut self, ctx: &mut Context) -> Result<()> {
        (**self).execute(ctx)
    }

    fn help(&mut self, ctx: &Context) -> Result<()> {
        (**self).help(ctx)
    }

    fn version(&mut self, ctx: &Context) -> Result<()> {
        (**self).version(ctx)
    }
}

/// `my_crate::scripts::Greeter` becomes `Greeter`.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
