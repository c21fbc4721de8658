// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Method namespaces — the mutable "module" deferred operations drain into.
//!
//! A [`MethodNamespace`] maps member names to method closures. Redefining a
//! member silently overwrites the previous definition; the layered assembly
//! in [`crate::assemble`] relies on exactly that to let later layers win.
//!
//! Besides its members, a namespace carries one piece of dispatch metadata:
//! the respond-to-all flag, set by the catch-all verb so capability probes
//! answer "yes" for members that were never defined.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ecow::EcoString;

use crate::object::NullObject;
use crate::value::Value;

/// A method implementation: receiver plus arguments in, value out.
pub type MethodFn = Arc<dyn Fn(&NullObject, &[Value]) -> Value>;

/// An open, name-keyed set of method implementations.
#[derive(Clone, Default)]
pub struct MethodNamespace {
    methods: HashMap<EcoString, MethodFn>,
    respond_to_all: bool,
}

impl MethodNamespace {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines (or redefines) a member.
    pub fn define<F>(&mut self, name: impl Into<EcoString>, body: F)
    where
        F: Fn(&NullObject, &[Value]) -> Value + 'static,
    {
        self.methods.insert(name.into(), Arc::new(body));
    }

    /// Defines (or redefines) a member from an already-shared closure.
    pub fn define_shared(&mut self, name: impl Into<EcoString>, body: MethodFn) {
        self.methods.insert(name.into(), body);
    }

    /// Looks up a member by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MethodFn> {
        self.methods.get(name)
    }

    /// Whether a member with this name is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// The number of defined members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether no members are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// All defined member names, sorted.
    #[must_use]
    pub fn member_names(&self) -> Vec<EcoString> {
        let mut names: Vec<EcoString> = self.methods.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Marks this namespace as answering every capability probe.
    pub fn set_respond_to_all(&mut self, on: bool) {
        self.respond_to_all = on;
    }

    /// Whether this namespace answers every capability probe.
    #[must_use]
    pub fn respond_to_all(&self) -> bool {
        self.respond_to_all
    }

    /// Overlays `layer` onto this namespace: every member in `layer`
    /// overwrites a same-named member here, and the respond-to-all flag is
    /// carried forward if either side set it.
    pub fn overlay(&mut self, layer: &MethodNamespace) {
        for (name, body) in &layer.methods {
            self.methods.insert(name.clone(), Arc::clone(body));
        }
        self.respond_to_all |= layer.respond_to_all;
    }
}

impl fmt::Debug for MethodNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodNamespace")
            .field("members", &self.member_names())
            .field("respond_to_all", &self.respond_to_all)
            .finish()
    }
}
