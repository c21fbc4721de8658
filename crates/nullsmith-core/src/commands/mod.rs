// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Command-backed builder verbs.
//!
//! Any verb the builder's built-in surface does not recognize is dispatched
//! here: the verb name is canonicalized
//! (`respond_to_any_message` → `RespondToAnyMessage`), looked up in an open
//! [`CommandRegistry`], constructed with the call's arguments and optional
//! callback block, and executed against the builder. This is the system's
//! extension point — new synthesis verbs ship as independent [`Command`]
//! variants without touching the builder's stable core.
//!
//! # Adding a New Command
//!
//! 1. Create `crates/nullsmith-core/src/commands/<your_command>.rs`.
//! 2. Declare `pub struct YourCommand { ... }` implementing [`Command`],
//!    with a `fn from_call(call: CommandCall) -> Box<dyn Command>` factory.
//! 3. Add `mod your_command;` below (keep alphabetical).
//! 4. Register it in [`CommandRegistry::with_builtins`] — or leave it to
//!    callers via [`CommandRegistry::register`].

mod singleton;
mod traceable;
// ── add new command modules here (alphabetical) ───────────────────────────

pub use singleton::Singleton;
pub use traceable::Traceable;

use std::collections::HashMap;

use ecow::EcoString;

use crate::builder::NullTypeBuilder;
use crate::error::BuilderError;
use crate::namespace::MethodFn;
use crate::value::Value;

/// A single dispatched verb invocation: positional arguments plus an
/// optional callback block.
pub struct CommandCall {
    /// Positional arguments, as the caller passed them.
    pub args: Vec<Value>,
    /// An optional callback block for commands that accept one.
    pub block: Option<MethodFn>,
}

impl CommandCall {
    /// A call with no arguments and no block.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            args: Vec::new(),
            block: None,
        }
    }
}

/// A pluggable unit of builder-extension behavior, dispatched by name.
pub trait Command {
    /// Runs the command against the builder. The return value becomes the
    /// verb-call's result.
    fn execute(self: Box<Self>, builder: &mut NullTypeBuilder) -> Result<Value, BuilderError>;
}

/// Constructs a command from a dispatched call.
pub type CommandFactory = Box<dyn Fn(CommandCall) -> Box<dyn Command>>;

/// The open verb registry: canonical name → command factory.
pub struct CommandRegistry {
    factories: HashMap<EcoString, CommandFactory>,
}

impl CommandRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry with the built-in command variants registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("Singleton", Singleton::from_call);
        registry.register("Traceable", Traceable::from_call);
        // ── register new built-in commands here (alphabetical) ────────────
        registry
    }

    /// Registers a factory under a canonical name, replacing any previous
    /// registration.
    pub fn register<F>(&mut self, canonical_name: impl Into<EcoString>, factory: F)
    where
        F: Fn(CommandCall) -> Box<dyn Command> + 'static,
    {
        self.factories
            .insert(canonical_name.into(), Box::new(factory));
    }

    /// Whether a command is registered under this canonical name.
    #[must_use]
    pub fn supports(&self, canonical_name: &str) -> bool {
        self.factories.contains_key(canonical_name)
    }

    /// Constructs the command registered under `canonical_name`, if any.
    #[must_use]
    pub(crate) fn construct(
        &self,
        canonical_name: &str,
        call: CommandCall,
    ) -> Option<Box<dyn Command>> {
        self.factories.get(canonical_name).map(|f| f(call))
    }

    /// All registered canonical names, sorted.
    #[must_use]
    pub fn canonical_names(&self) -> Vec<EcoString> {
        let mut names: Vec<EcoString> = self.factories.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.canonical_names())
            .finish()
    }
}

/// Canonicalizes a verb name to its registry key: each
/// underscore-delimited segment capitalized and concatenated.
///
/// Returns `None` for names that do not canonicalize — empty, containing
/// characters outside `[a-z0-9_]`, or with an empty or digit-leading
/// segment. Capability queries treat `None` as "not supported"; invocation
/// treats it as an unknown verb.
#[must_use]
pub fn canonical_command_name(verb: &str) -> Option<EcoString> {
    if verb.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(verb.len());
    for segment in verb.split('_') {
        let mut chars = segment.chars();
        let first = chars.next()?;
        if !first.is_ascii_lowercase() {
            return None;
        }
        let rest = chars.as_str();
        if !rest
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return None;
        }
        out.push(first.to_ascii_uppercase());
        out.push_str(rest);
    }
    Some(out.into())
}

#[cfg(test)]
mod property_tests;
