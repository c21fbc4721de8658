// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The type assembler: from drained namespaces to a sealed type.
//!
//! Generation builds a [`TypeShell`] — the in-progress type that type-level
//! operations mutate — and then seals it by flattening the effective
//! dispatch table bottom-up:
//!
//! 1. the base's own default members,
//! 2. the generated-methods namespace,
//! 3. the customization namespace,
//!
//! with each later layer overwriting matching keys. **Customizations always
//! override generated stubs; generated stubs always override the base's
//! defaults.** This precedence is what lets a caller override any
//! auto-stubbed behavior via `customize` without fighting the
//! reflection-generated stubs.

use std::cell::OnceCell;

use ecow::EcoString;
use tracing::debug;

use crate::conversions::Conversions;
use crate::namespace::MethodNamespace;
use crate::object::{NullType, TypeInner};
use crate::reflect::{BaseType, TypeRoot};
use crate::value::Value;

/// The in-progress synthesized type, as type-level operations see it.
#[derive(Debug)]
pub struct TypeShell {
    name: EcoString,
    base: BaseType,
    generated: MethodNamespace,
    customizations: MethodNamespace,
    null_equivalents: Vec<Value>,
    singleton: bool,
    traceable: bool,
}

impl TypeShell {
    pub(crate) fn new(
        base: BaseType,
        generated: MethodNamespace,
        customizations: MethodNamespace,
        null_equivalents: Vec<Value>,
    ) -> Self {
        Self {
            name: "NullObject".into(),
            base,
            generated,
            customizations,
            null_equivalents,
            singleton: false,
            traceable: false,
        }
    }

    /// The type's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the type.
    pub fn set_name(&mut self, name: impl Into<EcoString>) {
        self.name = name.into();
    }

    /// What the type extends.
    #[must_use]
    pub fn base(&self) -> &BaseType {
        &self.base
    }

    /// The generated-methods namespace, as drained.
    #[must_use]
    pub fn generated(&self) -> &MethodNamespace {
        &self.generated
    }

    /// The customization namespace.
    #[must_use]
    pub fn customizations(&self) -> &MethodNamespace {
        &self.customizations
    }

    /// The values instances will compare equal to.
    #[must_use]
    pub fn null_equivalents(&self) -> &[Value] {
        &self.null_equivalents
    }

    /// Switches singleton mode on or off.
    pub fn set_singleton(&mut self, on: bool) {
        self.singleton = on;
    }

    /// Whether singleton mode is on.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.singleton
    }

    /// Switches creation-site tracking on or off.
    pub fn set_traceable(&mut self, on: bool) {
        self.traceable = on;
    }

    /// Whether creation-site tracking is on.
    #[must_use]
    pub fn is_traceable(&self) -> bool {
        self.traceable
    }

    /// Flattens the dispatch table and seals the shell into an immutable
    /// [`NullType`].
    pub(crate) fn seal(self, conversions: Conversions) -> NullType {
        let mut dispatch = base_members(&self.base);
        dispatch.overlay(&self.generated);
        dispatch.overlay(&self.customizations);
        debug!(
            name = %self.name,
            members = dispatch.len(),
            singleton = self.singleton,
            "sealed null type"
        );
        NullType::from_inner(TypeInner {
            name: self.name,
            base: self.base,
            generated: self.generated,
            customizations: self.customizations,
            conversions,
            dispatch,
            null_equivalents: self.null_equivalents,
            singleton: self.singleton,
            traceable: self.traceable,
            shared: OnceCell::new(),
        })
    }
}

/// The default members a base contributes to the dispatch table.
fn base_members(base: &BaseType) -> MethodNamespace {
    match base {
        BaseType::Minimal => MethodNamespace::new(),
        BaseType::Standard => standard_root_members(),
        BaseType::Reference(reference) => match reference.root() {
            TypeRoot::Standard => standard_root_members(),
            TypeRoot::Minimal => MethodNamespace::new(),
        },
    }
}

/// Members the standard object root provides to everything beneath it.
fn standard_root_members() -> MethodNamespace {
    let mut ns = MethodNamespace::new();
    ns.define("class_name", |recv, _| {
        Value::String(recv.type_name().into())
    });
    ns.define("inspect", |recv, _| {
        Value::String(format!("a {}", recv.type_name()).into())
    });
    ns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NullTypeBuilder;
    use crate::reflect::ReferenceType;

    // --- Base default tests ---

    #[test]
    fn minimal_base_contributes_nothing() {
        assert!(base_members(&BaseType::Minimal).is_empty());
    }

    #[test]
    fn standard_base_contributes_root_members() {
        let ns = base_members(&BaseType::Standard);
        assert!(ns.contains("class_name"));
        assert!(ns.contains("inspect"));
    }

    #[test]
    fn reference_base_follows_its_root() {
        let standard = ReferenceType::new("Account");
        let minimal = ReferenceType::new("Bare").minimal_root();
        assert!(!base_members(&BaseType::Reference(standard)).is_empty());
        assert!(base_members(&BaseType::Reference(minimal)).is_empty());
    }

    // --- Layering tests ---

    #[test]
    fn base_default_survives_when_nothing_overrides_it() {
        // Mimicking a standard-rooted type switches the base to the
        // standard root, whose class_name default nothing else defines.
        let reference = ReferenceType::new("Account").member("balance");
        let ty = NullTypeBuilder::new().mimic(&reference).generate().unwrap();
        let instance = ty.instantiate();

        assert_eq!(
            instance.send("class_name", &[]).unwrap(),
            Value::from("NullObject")
        );
    }

    #[test]
    fn generated_member_overrides_base_default() {
        // The standard root defines a plain inspect; the builder's
        // renderer-backed inspect must win over it.
        let reference = ReferenceType::new("Account").member("balance");
        let ty = NullTypeBuilder::new().mimic(&reference).generate().unwrap();
        let instance = ty.instantiate();

        assert_eq!(
            instance.send("inspect", &[]).unwrap(),
            Value::from("<null:Account>")
        );
    }

    #[test]
    fn customization_overrides_generated_member() {
        let reference = ReferenceType::new("Account").member("balance");
        let ty = NullTypeBuilder::new()
            .mimic(&reference)
            .customize(|ns, _| {
                ns.define("balance", |_, _| Value::Integer(42));
            })
            .generate()
            .unwrap();
        let instance = ty.instantiate();

        assert_eq!(instance.send("balance", &[]).unwrap(), Value::Integer(42));
    }

    #[test]
    fn sub_namespaces_are_preserved_on_the_type() {
        let reference = ReferenceType::new("Account").member("balance");
        let ty = NullTypeBuilder::new()
            .mimic(&reference)
            .customize(|ns, _| {
                ns.define("balance", |_, _| Value::Integer(42));
            })
            .generate()
            .unwrap();

        // Even though the customization shadows it in the dispatch table,
        // the generated stub remains visible in its own namespace.
        assert!(ty.generated_members().contains("balance"));
        assert!(ty.customizations().contains("balance"));
    }

    #[test]
    fn type_operations_run_against_the_shell() {
        let mut builder = NullTypeBuilder::new();
        builder.defer_type(|shell, _| shell.set_name("RecordNull"));
        let ty = builder.generate().unwrap();

        assert_eq!(ty.name(), "RecordNull");
        let instance = ty.instantiate();
        assert_eq!(instance.type_name(), "RecordNull");
    }
}
