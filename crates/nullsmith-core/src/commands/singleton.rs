// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The `singleton` verb: every instantiation yields one shared instance.

use super::{Command, CommandCall};
use crate::builder::NullTypeBuilder;
use crate::error::BuilderError;
use crate::value::Value;

/// Registers singleton behavior on the finished type.
///
/// Queued as a type-level operation: after assembly, `instantiate()` always
/// returns the same shared instance, and cloning that instance yields
/// itself.
pub struct Singleton;

impl Singleton {
    /// Factory for registry dispatch.
    #[must_use]
    pub fn from_call(_call: CommandCall) -> Box<dyn Command> {
        Box::new(Self)
    }
}

impl Command for Singleton {
    fn execute(self: Box<Self>, builder: &mut NullTypeBuilder) -> Result<Value, BuilderError> {
        builder.defer_type(|shell, _| shell.set_singleton(true));
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::NullTypeBuilder;
    use crate::value::Value;

    #[test]
    fn singleton_instances_are_shared() {
        let mut builder = NullTypeBuilder::new();
        builder.invoke("singleton", &[]).unwrap();
        let ty = builder.generate().unwrap();

        let a = ty.instantiate();
        let b = ty.instantiate();
        assert!(a.is(&b));
    }

    #[test]
    fn clone_of_a_singleton_is_itself() {
        let mut builder = NullTypeBuilder::new();
        builder.invoke("singleton", &[]).unwrap();
        let ty = builder.generate().unwrap();

        let a = ty.instantiate();
        let b = a.clone();
        assert!(a.is(&b));
    }

    #[test]
    fn non_singleton_instances_are_distinct() {
        let ty = NullTypeBuilder::new().generate().unwrap();
        let a = ty.instantiate();
        let b = ty.instantiate();
        assert!(!a.is(&b));
        // Still equal: same synthesized type.
        assert_eq!(Value::Instance(a), Value::Instance(b));
    }
}
