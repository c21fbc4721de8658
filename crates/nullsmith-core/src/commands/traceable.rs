// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The `traceable` verb: instances remember where they were created.
//!
//! Useful when a null object turns up somewhere unexpected and the question
//! is "who made this?" — the instance answers with the file and line of its
//! instantiation site.

use super::{Command, CommandCall};
use crate::builder::NullTypeBuilder;
use crate::error::BuilderError;
use crate::value::Value;

/// Adds creation-site tracking to the synthesized type.
///
/// Queues a type-level operation flagging the type as traceable (so
/// `instantiate()` captures its caller's location) and an instance-level
/// operation exposing `origin_file` / `origin_line` members.
pub struct Traceable;

impl Traceable {
    /// Factory for registry dispatch.
    #[must_use]
    pub fn from_call(_call: CommandCall) -> Box<dyn Command> {
        Box::new(Self)
    }
}

impl Command for Traceable {
    fn execute(self: Box<Self>, builder: &mut NullTypeBuilder) -> Result<Value, BuilderError> {
        builder.defer_type(|shell, _| shell.set_traceable(true));
        builder.defer(|ns, _| {
            ns.define("origin_file", |recv, _| {
                recv.origin()
                    .map_or(Value::Null, |loc| Value::String(loc.file().into()))
            });
            ns.define("origin_line", |recv, _| {
                recv.origin()
                    .map_or(Value::Null, |loc| Value::Integer(i64::from(loc.line())))
            });
        });
        Ok(Value::Null)
    }
}
