//! Clip CLI Library
//!
//! This crate provides the `clip` launcher: it loads the framework settings,
//! picks a script from its catalog and runs it through the clip-core
//! lifecycle.
//!
//! # Key Features
//!
//! - **Script Catalog**: Named scripts the launcher can run
//! - **Multi-script Mode**: Select a script by passing its name first
//! - **Demo Scripts**: Worked examples of options, rules and custom help
//! - **Libraries**: Helpers scripts load into their context by name
//!
//! # Architecture
//!
//! - [`catalog`]: Script catalog and selection from settings and arguments
//! - [`launcher`]: Process arguments, launch and error reporting
//! - [`scripts`]: The scripts shipped with the launcher
//! - [`libraries`]: The libraries shipped with the launcher
//!
//! # Examples
//!
//! ```bash
//! # Run the default script
//! clip
//!
//! # With `multi_script: true` in ~/.clip/config.yml
//! clip options --name Alice -r 3
//! clip default_options --sos
//!
//! # Debug logging
//! RUST_LOG=debug clip options -n Alice
//! ```

pub mod catalog;
pub mod launcher;
pub mod libraries;
pub mod scripts;
