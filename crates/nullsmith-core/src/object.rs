// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Synthesized null types and their instances.
//!
//! A [`NullType`] is the sealed result of generation: an immutable,
//! cheap-to-clone handle over the type's name, base, sub-namespaces, and
//! flattened dispatch table. [`NullObject`] instances route every message
//! send through that table.
//!
//! # Message Send Protocol
//!
//! 1. **Defined member** — the dispatch table has the selector: call it.
//! 2. **Catch-all fallback** — the respond-to-all flag is set: the send is
//!    absorbed by the [`FALLBACK_MEMBER`] stub.
//! 3. **Failure** — otherwise the send fails with [`DoesNotUnderstand`].
//!
//! Equality is delegated to the type's conversions behavior, so an instance
//! compares equal to every configured null-equivalent and to other
//! instances of the same synthesized type.

use std::cell::OnceCell;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use ecow::EcoString;
use tracing::trace;

use crate::conversions::Conversions;
use crate::error::DoesNotUnderstand;
use crate::namespace::MethodNamespace;
use crate::reflect::BaseType;
use crate::value::Value;

/// The universal fallback-dispatch member consulted when a selector has no
/// definition and the type answers every capability probe.
pub const FALLBACK_MEMBER: &str = "does_not_understand";

pub(crate) struct TypeInner {
    pub(crate) name: EcoString,
    pub(crate) base: BaseType,
    pub(crate) generated: MethodNamespace,
    pub(crate) customizations: MethodNamespace,
    pub(crate) conversions: Conversions,
    pub(crate) dispatch: MethodNamespace,
    pub(crate) null_equivalents: Vec<Value>,
    pub(crate) singleton: bool,
    pub(crate) traceable: bool,
    pub(crate) shared: OnceCell<NullObject>,
}

/// A synthesized null type: created once per `generate()`, immutable
/// thereafter, independent of (and outliving) the builder.
pub struct NullType {
    inner: Arc<TypeInner>,
}

impl NullType {
    pub(crate) fn from_inner(inner: TypeInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// The type's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Marker: this type synthesizes null objects.
    #[must_use]
    pub fn is_null_object(&self) -> bool {
        true
    }

    /// What the type extends.
    #[must_use]
    pub fn base(&self) -> &BaseType {
        &self.inner.base
    }

    /// Whether this type is a true subtype of the named reference type.
    ///
    /// Only impersonation establishes this; mimicry copies the member
    /// surface without subtyping.
    #[must_use]
    pub fn extends(&self, type_name: &str) -> bool {
        match &self.inner.base {
            BaseType::Reference(reference) => reference.name() == type_name,
            BaseType::Minimal | BaseType::Standard => false,
        }
    }

    /// The generated-methods sub-namespace.
    #[must_use]
    pub fn generated_members(&self) -> &MethodNamespace {
        &self.inner.generated
    }

    /// The customizations sub-namespace.
    #[must_use]
    pub fn customizations(&self) -> &MethodNamespace {
        &self.inner.customizations
    }

    /// The conversions sub-namespace.
    #[must_use]
    pub fn conversions(&self) -> &Conversions {
        &self.inner.conversions
    }

    /// The values instances of this type compare equal to.
    #[must_use]
    pub fn null_equivalents(&self) -> &[Value] {
        &self.inner.null_equivalents
    }

    /// Whether a selector is defined in the flattened dispatch table.
    #[must_use]
    pub fn defines(&self, selector: &str) -> bool {
        self.inner.dispatch.contains(selector)
    }

    /// All dispatchable member names, sorted.
    #[must_use]
    pub fn member_names(&self) -> Vec<EcoString> {
        self.inner.dispatch.member_names()
    }

    /// Whether every instantiation yields one shared instance.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.inner.singleton
    }

    /// Whether instances record their creation site.
    #[must_use]
    pub fn is_traceable(&self) -> bool {
        self.inner.traceable
    }

    /// Whether two handles refer to the same synthesized type.
    #[must_use]
    pub fn same_type(&self, other: &NullType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Creates an instance.
    ///
    /// In singleton mode every call yields the one shared instance. When
    /// the type is traceable, the caller's location is recorded as the
    /// instance's origin.
    #[must_use]
    #[track_caller]
    pub fn instantiate(&self) -> NullObject {
        let origin = if self.inner.traceable {
            Some(Location::caller())
        } else {
            None
        };
        if self.inner.singleton {
            self.inner
                .shared
                .get_or_init(|| NullObject::new(self.clone(), origin))
                .clone()
        } else {
            NullObject::new(self.clone(), origin)
        }
    }
}

impl Clone for NullType {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for NullType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullType")
            .field("name", &self.inner.name)
            .field("members", &self.inner.dispatch.member_names())
            .field("singleton", &self.inner.singleton)
            .finish_non_exhaustive()
    }
}

/// An instance of a synthesized null type.
#[derive(Clone)]
pub struct NullObject {
    ty: NullType,
    origin: Option<&'static Location<'static>>,
    identity: Arc<()>,
}

impl NullObject {
    fn new(ty: NullType, origin: Option<&'static Location<'static>>) -> Self {
        Self {
            ty,
            origin,
            identity: Arc::new(()),
        }
    }

    /// The instance's synthesized type.
    #[must_use]
    pub fn class(&self) -> &NullType {
        &self.ty
    }

    /// The type's name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Marker: this instance stands in for "no real object".
    #[must_use]
    pub fn is_null_object(&self) -> bool {
        true
    }

    /// Where this instance was created, when the type is traceable.
    #[must_use]
    pub fn origin(&self) -> Option<&'static Location<'static>> {
        self.origin
    }

    /// Object identity: whether two handles refer to the same instance.
    #[must_use]
    pub fn is(&self, other: &NullObject) -> bool {
        Arc::ptr_eq(&self.identity, &other.identity)
    }

    /// Whether both instances belong to the same synthesized type.
    #[must_use]
    pub fn same_type_as(&self, other: &NullObject) -> bool {
        self.ty.same_type(&other.ty)
    }

    /// Capability probe: whether a send of `selector` would be answered.
    #[must_use]
    pub fn responds_to(&self, selector: &str) -> bool {
        let dispatch = &self.ty.inner.dispatch;
        dispatch.respond_to_all() || dispatch.contains(selector)
    }

    /// Sends a message.
    pub fn send(&self, selector: &str, args: &[Value]) -> Result<Value, DoesNotUnderstand> {
        let dispatch = &self.ty.inner.dispatch;
        if let Some(method) = dispatch.get(selector) {
            trace!(selector, "message send");
            return Ok(method(self, args));
        }
        if dispatch.respond_to_all() {
            if let Some(fallback) = dispatch.get(FALLBACK_MEMBER) {
                trace!(selector, "message send absorbed by fallback");
                return Ok(fallback(self, args));
            }
        }
        Err(DoesNotUnderstand {
            type_name: self.ty.inner.name.clone(),
            selector: selector.into(),
        })
    }

    /// The instance's debug rendering, via its `inspect` member.
    #[must_use]
    pub fn inspect(&self) -> EcoString {
        match self.send("inspect", &[]) {
            Ok(Value::String(s)) => s,
            Ok(Value::Instance(_)) | Err(_) => self.ty.inner.name.clone(),
            Ok(other) => other.to_string().into(),
        }
    }

    pub(crate) fn null_eq(&self, other: &Value) -> bool {
        self.ty.inner.conversions.equals(self, other)
    }
}

impl PartialEq for NullObject {
    fn eq(&self, other: &Self) -> bool {
        self.null_eq(&Value::Instance(other.clone()))
    }
}

impl fmt::Display for NullObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

impl fmt::Debug for NullObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullObject")
            .field("type", &self.type_name())
            .field("inspect", &self.inspect())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NullTypeBuilder;
    use crate::reflect::ReferenceType;

    fn account() -> ReferenceType {
        ReferenceType::new("Account").member("balance").member("close")
    }

    // --- Dispatch tests ---

    #[test]
    fn undefined_selector_without_catch_all_fails() {
        let ty = NullTypeBuilder::new().mimic(&account()).generate().unwrap();
        let instance = ty.instantiate();

        let err = instance.send("transfer", &[]).unwrap_err();
        assert_eq!(err.selector, "transfer");
        assert_eq!(
            err.to_string(),
            "`NullObject` does not understand `transfer`"
        );
    }

    #[test]
    fn responds_to_reflects_the_dispatch_table() {
        let ty = NullTypeBuilder::new().mimic(&account()).generate().unwrap();
        let instance = ty.instantiate();

        assert!(instance.responds_to("balance"));
        assert!(instance.responds_to("inspect"));
        assert!(!instance.responds_to("transfer"));
    }

    #[test]
    fn catch_all_responds_to_everything() {
        let ty = NullTypeBuilder::new()
            .respond_to_any_message()
            .generate()
            .unwrap();
        let instance = ty.instantiate();

        assert!(instance.responds_to("transfer"));
        assert!(instance.responds_to("anything_at_all"));
    }

    #[test]
    fn default_inspect_rendering() {
        let ty = NullTypeBuilder::new().generate().unwrap();
        assert_eq!(ty.instantiate().inspect(), "<null>");
    }

    // --- Equality tests ---

    #[test]
    fn instance_equals_the_nothing_sentinel() {
        let ty = NullTypeBuilder::new().generate().unwrap();
        let instance = Value::Instance(ty.instantiate());

        assert_eq!(instance, Value::Null);
        assert_eq!(Value::Null, instance);
    }

    #[test]
    fn instances_of_the_same_type_are_equal() {
        let ty = NullTypeBuilder::new().generate().unwrap();
        let a = ty.instantiate();
        let b = ty.instantiate();
        assert_eq!(a, b);
    }

    #[test]
    fn instance_does_not_equal_unrelated_values() {
        let ty = NullTypeBuilder::new().generate().unwrap();
        let instance = Value::Instance(ty.instantiate());

        assert_ne!(instance, Value::Integer(7));
        assert_ne!(instance, Value::from("null"));
        assert_ne!(instance, Value::Bool(false));
    }

    #[test]
    fn instances_of_different_types_are_not_equal() {
        let a = NullTypeBuilder::new().generate().unwrap().instantiate();
        let b = NullTypeBuilder::new().generate().unwrap().instantiate();
        assert_ne!(a, b);
    }

    #[test]
    fn extra_null_equivalents_extend_equality() {
        let mut builder = NullTypeBuilder::new();
        builder.add_null_equivalent(Value::Integer(0));
        let ty = builder.generate().unwrap();
        let instance = Value::Instance(ty.instantiate());

        assert_eq!(instance, Value::Integer(0));
        assert_ne!(instance, Value::Integer(1));
    }

    // --- Subtyping tests ---

    #[test]
    fn impersonation_is_a_true_subtype() {
        let ty = NullTypeBuilder::new()
            .impersonate(&account())
            .generate()
            .unwrap();
        assert!(ty.extends("Account"));
        assert!(!ty.extends("Ledger"));
    }

    #[test]
    fn mimicry_is_not_a_subtype() {
        let ty = NullTypeBuilder::new().mimic(&account()).generate().unwrap();
        assert!(!ty.extends("Account"));
    }

    // --- Identity tests ---

    #[test]
    fn null_object_markers() {
        let ty = NullTypeBuilder::new().generate().unwrap();
        let instance = ty.instantiate();
        assert!(ty.is_null_object());
        assert!(instance.is_null_object());
        assert!(instance.class().same_type(&ty));
    }

    #[test]
    fn clone_shares_identity() {
        let ty = NullTypeBuilder::new().generate().unwrap();
        let a = ty.instantiate();
        let b = a.clone();
        assert!(a.is(&b));
        assert!(!a.is(&ty.instantiate()));
    }
}
