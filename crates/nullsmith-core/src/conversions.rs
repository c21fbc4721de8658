// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The conversions collaborator boundary.
//!
//! The assembler hands the in-progress type and the configured
//! null-equivalent values to a [`ConversionsGenerator`], which produces the
//! [`Conversions`] behavior attached to the finished type: equality at
//! minimum, plus an opt-in set of coercions. The builder treats the result
//! as opaque; a failing generator's error propagates out of `generate()`
//! unchanged.
//!
//! [`StandardConversions`] is the stock implementation. Its equality makes
//! an instance equal to every configured null-equivalent and to other
//! instances of the *same* synthesized type — instances of a different null
//! type are not equal, even though both equal the nothing-sentinel.

use std::fmt;
use std::sync::Arc;

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use crate::assemble::TypeShell;
use crate::object::NullObject;
use crate::value::Value;

/// Equality behavior for a synthesized type.
pub type EqualityFn = Arc<dyn Fn(&NullObject, &Value) -> bool>;

/// Which conversion members a generator attaches.
///
/// Equality is mandatory; the coercions are opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionCapabilities {
    /// Equality comparison. Must be `true`.
    pub equality: bool,
    /// Boolean coercion: null instances coerce to `false`.
    pub truthiness: bool,
    /// String coercion: null instances coerce to the empty string.
    pub string: bool,
    /// Integer coercion: null instances coerce to zero.
    pub integer: bool,
}

impl ConversionCapabilities {
    /// Every capability enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            equality: true,
            truthiness: true,
            string: true,
            integer: true,
        }
    }
}

impl Default for ConversionCapabilities {
    fn default() -> Self {
        Self {
            equality: true,
            truthiness: false,
            string: false,
            integer: false,
        }
    }
}

/// The conversions namespace attached to a synthesized type.
#[derive(Clone)]
pub struct Conversions {
    equals: EqualityFn,
    truthiness: Option<bool>,
    string: Option<EcoString>,
    integer: Option<i64>,
}

impl Conversions {
    /// Creates a namespace with the given equality and no coercions.
    #[must_use]
    pub fn new(equals: EqualityFn) -> Self {
        Self {
            equals,
            truthiness: None,
            string: None,
            integer: None,
        }
    }

    /// Sets the boolean coercion.
    #[must_use]
    pub fn with_truthiness(mut self, value: bool) -> Self {
        self.truthiness = Some(value);
        self
    }

    /// Sets the string coercion.
    #[must_use]
    pub fn with_string(mut self, value: impl Into<EcoString>) -> Self {
        self.string = Some(value.into());
        self
    }

    /// Sets the integer coercion.
    #[must_use]
    pub fn with_integer(mut self, value: i64) -> Self {
        self.integer = Some(value);
        self
    }

    /// Compares an instance against an arbitrary value.
    #[must_use]
    pub fn equals(&self, receiver: &NullObject, other: &Value) -> bool {
        (self.equals)(receiver, other)
    }

    /// The boolean coercion, if attached.
    #[must_use]
    pub fn truthiness(&self) -> Option<bool> {
        self.truthiness
    }

    /// The string coercion, if attached.
    #[must_use]
    pub fn string(&self) -> Option<&EcoString> {
        self.string.as_ref()
    }

    /// The integer coercion, if attached.
    #[must_use]
    pub fn integer(&self) -> Option<i64> {
        self.integer
    }
}

impl fmt::Debug for Conversions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversions")
            .field("truthiness", &self.truthiness)
            .field("string", &self.string)
            .field("integer", &self.integer)
            .finish_non_exhaustive()
    }
}

/// An error from a conversions generator.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConversionsError {
    /// The capability set omitted equality.
    #[error("conversions must define equality at minimum")]
    #[diagnostic(help("enable `ConversionCapabilities::equality`"))]
    MissingEquality,

    /// A generator-specific failure.
    #[error("conversions generation failed: {reason}")]
    Failed {
        /// Generator-supplied description.
        reason: EcoString,
    },
}

/// External collaborator: turns the assembled type and its null-equivalent
/// values into conversion behavior.
pub trait ConversionsGenerator {
    /// Produces the conversions namespace for `shell`.
    ///
    /// `null_equivalents` is ordered and duplicate-free. Errors propagate
    /// out of `generate()` unmasked.
    fn generate(
        &self,
        shell: &TypeShell,
        null_equivalents: &[Value],
    ) -> Result<Conversions, ConversionsError>;
}

/// The stock conversions generator.
#[derive(Debug, Clone, Default)]
pub struct StandardConversions {
    capabilities: ConversionCapabilities,
}

impl StandardConversions {
    /// Equality only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an explicit capability set.
    #[must_use]
    pub fn with_capabilities(capabilities: ConversionCapabilities) -> Self {
        Self { capabilities }
    }
}

impl ConversionsGenerator for StandardConversions {
    fn generate(
        &self,
        _shell: &TypeShell,
        null_equivalents: &[Value],
    ) -> Result<Conversions, ConversionsError> {
        if !self.capabilities.equality {
            return Err(ConversionsError::MissingEquality);
        }

        let equivalents = null_equivalents.to_vec();
        let equals: EqualityFn = Arc::new(move |receiver, other| match other {
            Value::Instance(other) => receiver.same_type_as(other),
            other => equivalents.iter().any(|e| Value::literal_eq(e, other)),
        });

        let mut conversions = Conversions::new(equals);
        if self.capabilities.truthiness {
            conversions = conversions.with_truthiness(false);
        }
        if self.capabilities.string {
            conversions = conversions.with_string("");
        }
        if self.capabilities.integer {
            conversions = conversions.with_integer(0);
        }
        Ok(conversions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NullTypeBuilder;

    // Equality behavior is covered end-to-end in `object` and `builder`
    // tests; these exercise the boundary contract itself.

    #[test]
    fn missing_equality_is_refused() {
        let generator = StandardConversions::with_capabilities(ConversionCapabilities {
            equality: false,
            ..ConversionCapabilities::default()
        });
        let mut builder = NullTypeBuilder::new();
        builder.set_conversions_generator(generator);
        let err = builder.generate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "conversions must define equality at minimum"
        );
    }

    #[test]
    fn default_capabilities_attach_no_coercions() {
        let ty = NullTypeBuilder::new().generate().unwrap();
        let conversions = ty.conversions();
        assert_eq!(conversions.truthiness(), None);
        assert_eq!(conversions.string(), None);
        assert_eq!(conversions.integer(), None);
    }

    #[test]
    fn full_capabilities_attach_all_coercions() {
        let mut builder = NullTypeBuilder::new();
        builder.set_conversions_generator(StandardConversions::with_capabilities(
            ConversionCapabilities::all(),
        ));
        let ty = builder.generate().unwrap();
        let conversions = ty.conversions();
        assert_eq!(conversions.truthiness(), Some(false));
        assert_eq!(conversions.string().map(EcoString::as_str), Some(""));
        assert_eq!(conversions.integer(), Some(0));
    }
}
