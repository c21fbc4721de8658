// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for null-type synthesis.
//!
//! All errors are synchronous and surface at the call that triggered them —
//! never deferred into a queue drain. Nothing is retried; synthesis is a
//! deterministic, in-memory process with no transient failure modes.

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use crate::conversions::ConversionsError;

/// An error raised while configuring or generating a null type.
#[derive(Debug, Error, Diagnostic)]
pub enum BuilderError {
    /// A verb invocation matched no registered command.
    #[error("unknown builder verb `{name}`")]
    #[diagnostic(help("register a `Command` for this verb with `CommandRegistry::register`"))]
    UnknownVerb {
        /// The verb as the caller wrote it.
        name: EcoString,
    },

    /// `generate()` was called on a builder that already generated a type.
    ///
    /// The operation queues are drained exactly once; regenerating would
    /// redrain partially-consumed state inconsistently, so it is refused
    /// outright.
    #[error("builder already generated a type; queues are drained")]
    #[diagnostic(help("create a fresh `NullTypeBuilder` for each synthesized type"))]
    AlreadyGenerated,

    /// The conversions collaborator failed; propagated unchanged.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Conversions(#[from] ConversionsError),
}

/// A message send that the synthesized type could not answer.
///
/// Only possible when no catch-all was configured: `respond_to_any_message`
/// installs a fallback that absorbs every send.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("`{type_name}` does not understand `{selector}`")]
#[diagnostic(help("synthesize with `respond_to_any_message()` to absorb arbitrary sends"))]
pub struct DoesNotUnderstand {
    /// Name of the synthesized type.
    pub type_name: EcoString,
    /// The selector that failed to dispatch.
    pub selector: EcoString,
}
