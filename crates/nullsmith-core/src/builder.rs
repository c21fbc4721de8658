// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The null-type builder: one configuration session per synthesized type.
//!
//! Verbs either mutate builder state directly or push a deferred operation
//! onto one of the two queues; nothing touches the synthesized type until
//! [`NullTypeBuilder::generate`] drains them. Verbs chain where natural:
//!
//! ```
//! use nullsmith_core::prelude::*;
//!
//! let reference = ReferenceType::new("Logger").member("info");
//! let ty = NullTypeBuilder::new().black_hole().mimic(&reference).generate()?;
//! # Ok::<(), nullsmith_core::error::BuilderError>(())
//! ```
//!
//! Verbs outside the built-in surface are dispatched through the command
//! registry — see [`crate::commands`].

use std::sync::Arc;

use ecow::EcoString;
use tracing::debug;

use crate::assemble::TypeShell;
use crate::commands::{canonical_command_name, CommandCall, CommandRegistry};
use crate::conversions::{ConversionsGenerator, StandardConversions};
use crate::error::BuilderError;
use crate::namespace::{MethodFn, MethodNamespace};
use crate::object::{FALLBACK_MEMBER, NullType};
use crate::operations::{AssemblyContext, InspectRenderer, OperationQueue};
use crate::reflect::{reflect, BaseType, ReferenceType, TypeRoot, UNIVERSAL_MEMBERS};
use crate::stub::StubStrategy;
use crate::value::Value;

/// Options for the mimicry verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MimicOptions {
    /// Whether inherited members of the reference type are stubbed too.
    pub include_inherited: bool,
}

impl Default for MimicOptions {
    fn default() -> Self {
        Self {
            include_inherited: true,
        }
    }
}

/// Builds a synthesized null type.
///
/// One builder per type: after a `generate()` call the queues are spent and
/// any further generation is refused with
/// [`BuilderError::AlreadyGenerated`]. The builder is single-owner and not
/// meant for concurrent configuration.
pub struct NullTypeBuilder {
    base: BaseType,
    inspect_renderer: InspectRenderer,
    stub_strategy: StubStrategy,
    interface_defined: bool,
    null_equivalents: Vec<Value>,
    universal_exclusions: Vec<EcoString>,
    customizations: Option<MethodNamespace>,
    instance_ops: OperationQueue<MethodNamespace>,
    type_ops: OperationQueue<TypeShell>,
    registry: CommandRegistry,
    conversions: Box<dyn ConversionsGenerator>,
    generated: bool,
}

impl NullTypeBuilder {
    /// Creates a builder with the default configuration: minimal base,
    /// nothing-returning stubs, `[Value::Null]` as the null-equivalents,
    /// the built-in commands registered, and the standard conversions
    /// generator.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Self {
            base: BaseType::Minimal,
            inspect_renderer: Arc::new(|| "<null>".into()),
            stub_strategy: StubStrategy::default(),
            interface_defined: false,
            null_equivalents: vec![Value::Null],
            universal_exclusions: UNIVERSAL_MEMBERS
                .iter()
                .copied()
                .map(EcoString::from)
                .collect(),
            customizations: None,
            instance_ops: OperationQueue::new(),
            type_ops: OperationQueue::new(),
            registry: CommandRegistry::with_builtins(),
            conversions: Box::new(StandardConversions::new()),
            generated: false,
        };
        builder.define_basic_members();
        builder
    }

    /// Queues the foundational members every synthesized type gets.
    ///
    /// The renderer is read from the context at drain time, so interface
    /// verbs that replace it still govern this early-queued operation.
    fn define_basic_members(&mut self) {
        self.instance_ops.enqueue(|ns, ctx| {
            let render = Arc::clone(&ctx.inspect_renderer);
            ns.define("inspect", move |_, _| Value::String(render()));
        });
    }

    // ── Built-in verb surface ─────────────────────────────────────────────

    /// Switches every stub to return the receiving instance instead of the
    /// nothing-sentinel. Applies to all stubs, including ones queued before
    /// this call.
    pub fn black_hole(&mut self) -> &mut Self {
        self.stub_strategy = StubStrategy::ReturnsSelf;
        self
    }

    /// Makes the synthesized type absorb every message send.
    ///
    /// Prepends one operation that sets the respond-to-all flag and stubs
    /// the universal fallback member in the same step, so the fallback is
    /// established before any other queued behavior and cannot shadow
    /// legitimately-defined members. Marks the interface as defined.
    pub fn respond_to_any_message(&mut self) -> &mut Self {
        self.instance_ops.enqueue_front(|ns, ctx| {
            ns.set_respond_to_all(true);
            ctx.stub_strategy.install(ns, FALLBACK_MEMBER);
        });
        self.interface_defined = true;
        self
    }

    /// Copies `reference`'s member surface: one stub per reflected member,
    /// inherited members included.
    pub fn mimic(&mut self, reference: &ReferenceType) -> &mut Self {
        self.mimic_with(reference, MimicOptions::default())
    }

    /// [`NullTypeBuilder::mimic`] with explicit options.
    ///
    /// Sets the base to the reference's object root (as minimal as possible
    /// while remaining constructible), points the debug rendering at the
    /// mimicked name, and defers the reflection itself to drain time so the
    /// stub strategy and exclusion set in effect at generation govern it.
    pub fn mimic_with(&mut self, reference: &ReferenceType, options: MimicOptions) -> &mut Self {
        self.base = match reference.root() {
            TypeRoot::Standard => BaseType::Standard,
            TypeRoot::Minimal => BaseType::Minimal,
        };
        let label: EcoString = format!("<null:{}>", reference.name()).into();
        self.inspect_renderer = Arc::new(move || label.clone());

        let reference = reference.clone();
        let include_inherited = options.include_inherited;
        self.instance_ops.enqueue(move |ns, ctx| {
            for member in reflect(&reference, include_inherited, &ctx.universal_exclusions) {
                ctx.stub_strategy.install(ns, member);
            }
        });
        self.interface_defined = true;
        self
    }

    /// Mimics `reference` and additionally makes the synthesized type a
    /// true subtype of it, passing type checks that expect the reference.
    pub fn impersonate(&mut self, reference: &ReferenceType) -> &mut Self {
        self.impersonate_with(reference, MimicOptions::default())
    }

    /// [`NullTypeBuilder::impersonate`] with explicit options.
    pub fn impersonate_with(
        &mut self,
        reference: &ReferenceType,
        options: MimicOptions,
    ) -> &mut Self {
        self.mimic_with(reference, options);
        self.base = BaseType::Reference(reference.clone());
        self
    }

    /// Runs `f` once, immediately, against the customization namespace
    /// (created on first use), with the builder as read context.
    ///
    /// Customizations are the highest-precedence layer: any member defined
    /// here overrides a same-named generated stub.
    pub fn customize<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut MethodNamespace, &NullTypeBuilder),
    {
        let mut ns = self.customizations.take().unwrap_or_default();
        f(&mut ns, self);
        self.customizations = Some(ns);
        self
    }

    /// Adds a value instances must compare equal to. Duplicates are
    /// ignored; insertion order is preserved.
    pub fn add_null_equivalent(&mut self, value: Value) -> &mut Self {
        if !self
            .null_equivalents
            .iter()
            .any(|e| Value::literal_eq(e, &value))
        {
            self.null_equivalents.push(value);
        }
        self
    }

    // ── Deferred-operation API (commands build on this) ───────────────────

    /// Defers an instance-level operation, applied to the generated-methods
    /// namespace at generation.
    pub fn defer<F>(&mut self, op: F) -> &mut Self
    where
        F: FnOnce(&mut MethodNamespace, &AssemblyContext) + 'static,
    {
        self.instance_ops.enqueue(op);
        self
    }

    /// Defers an instance-level operation at the front of the queue.
    pub fn defer_front<F>(&mut self, op: F) -> &mut Self
    where
        F: FnOnce(&mut MethodNamespace, &AssemblyContext) + 'static,
    {
        self.instance_ops.enqueue_front(op);
        self
    }

    /// Defers a type-level operation, applied to the assembled type after
    /// instance operations and conversions.
    pub fn defer_type<F>(&mut self, op: F) -> &mut Self
    where
        F: FnOnce(&mut TypeShell, &AssemblyContext) + 'static,
    {
        self.type_ops.enqueue(op);
        self
    }

    // ── Command dispatch ──────────────────────────────────────────────────

    /// Whether `verb` would dispatch to a registered command.
    ///
    /// A pure registry probe: nothing is constructed or executed, and a
    /// name that does not canonicalize is simply unsupported.
    #[must_use]
    pub fn supports(&self, verb: &str) -> bool {
        canonical_command_name(verb)
            .is_some_and(|canonical| self.registry.supports(&canonical))
    }

    /// Invokes a command-backed verb.
    pub fn invoke(&mut self, verb: &str, args: &[Value]) -> Result<Value, BuilderError> {
        self.invoke_with_block(verb, args, None)
    }

    /// Invokes a command-backed verb, passing a callback block through to
    /// the command.
    ///
    /// The verb is canonicalized and looked up in the registry; the
    /// command is constructed with the call's arguments and block, and its
    /// execution result becomes this call's result. Unregistered (or
    /// non-canonicalizable) verbs fail with [`BuilderError::UnknownVerb`].
    pub fn invoke_with_block(
        &mut self,
        verb: &str,
        args: &[Value],
        block: Option<MethodFn>,
    ) -> Result<Value, BuilderError> {
        let unknown = || BuilderError::UnknownVerb { name: verb.into() };
        let canonical = canonical_command_name(verb).ok_or_else(unknown)?;
        let call = CommandCall {
            args: args.to_vec(),
            block,
        };
        let command = self.registry.construct(&canonical, call).ok_or_else(unknown)?;
        debug!(verb, command = %canonical, "dispatching builder command");
        command.execute(self)
    }

    // ── Generation ────────────────────────────────────────────────────────

    /// Assembles and seals the synthesized type.
    ///
    /// If no interface verb ran, the catch-all behavior is auto-applied
    /// first. The queues are drained exactly once; a second call is refused
    /// with [`BuilderError::AlreadyGenerated`]. Conversions-collaborator
    /// errors propagate unmasked.
    pub fn generate(&mut self) -> Result<NullType, BuilderError> {
        if self.generated {
            return Err(BuilderError::AlreadyGenerated);
        }
        self.generated = true;

        if !self.interface_defined {
            self.respond_to_any_message();
        }

        let ctx = AssemblyContext {
            stub_strategy: self.stub_strategy,
            inspect_renderer: Arc::clone(&self.inspect_renderer),
            universal_exclusions: self.universal_exclusions.clone(),
        };
        debug!(
            instance_ops = self.instance_ops.len(),
            type_ops = self.type_ops.len(),
            "assembling null type"
        );

        let mut generated = MethodNamespace::new();
        let mut instance_ops = std::mem::take(&mut self.instance_ops);
        instance_ops.drain(&mut generated, &ctx);

        let customizations = self.customizations.take().unwrap_or_default();
        let mut shell = TypeShell::new(
            self.base.clone(),
            generated,
            customizations,
            self.null_equivalents.clone(),
        );

        let conversions = self.conversions.generate(&shell, &self.null_equivalents)?;

        let mut type_ops = std::mem::take(&mut self.type_ops);
        type_ops.drain(&mut shell, &ctx);

        Ok(shell.seal(conversions))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// What the synthesized type will extend.
    #[must_use]
    pub fn base(&self) -> &BaseType {
        &self.base
    }

    /// Overrides what the synthesized type extends.
    pub fn set_base(&mut self, base: BaseType) -> &mut Self {
        self.base = base;
        self
    }

    /// The stub strategy currently in effect.
    #[must_use]
    pub fn stub_strategy(&self) -> StubStrategy {
        self.stub_strategy
    }

    /// Whether an interface-establishing verb has run.
    #[must_use]
    pub fn interface_defined(&self) -> bool {
        self.interface_defined
    }

    /// Marks the interface as defined, for commands that establish it
    /// through their own operations.
    pub fn mark_interface_defined(&mut self) -> &mut Self {
        self.interface_defined = true;
        self
    }

    /// The values instances will compare equal to.
    #[must_use]
    pub fn null_equivalents(&self) -> &[Value] {
        &self.null_equivalents
    }

    /// The member names the reflector excludes.
    #[must_use]
    pub fn universal_exclusions(&self) -> &[EcoString] {
        &self.universal_exclusions
    }

    /// Mutable access to the reflector's exclusion set.
    pub fn universal_exclusions_mut(&mut self) -> &mut Vec<EcoString> {
        &mut self.universal_exclusions
    }

    /// The command registry.
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Mutable access to the command registry, for registering new verbs.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Replaces the conversions collaborator.
    pub fn set_conversions_generator<G>(&mut self, generator: G) -> &mut Self
    where
        G: ConversionsGenerator + 'static,
    {
        self.conversions = Box::new(generator);
        self
    }
}

impl Default for NullTypeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NullTypeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NullTypeBuilder")
            .field("base", &self.base)
            .field("stub_strategy", &self.stub_strategy)
            .field("interface_defined", &self.interface_defined)
            .field("instance_ops", &self.instance_ops)
            .field("type_ops", &self.type_ops)
            .field("generated", &self.generated)
            .finish_non_exhaustive()
    }
}
