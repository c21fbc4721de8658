// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Deferred operation queues.
//!
//! Builder verbs do not mutate the synthesized type directly — they push
//! [`Operation`]s onto one of two queues (instance-level and type-level),
//! which the assembler drains, in order, at generation time. Deferring the
//! mutations lets verbs be declared in any order during configuration while
//! still producing deterministic, ordered side effects.
//!
//! Operations receive an [`AssemblyContext`] alongside their subject so that
//! builder-wide configuration is late-bound: a stub strategy switched
//! *after* an interface verb still governs the stubs that verb queued.
//!
//! There is no dequeue or reorder; the only placement choice is
//! [`OperationQueue::enqueue_front`], used when a fallback must run before
//! every later-queued behavior so it cannot shadow legitimately-defined
//! members.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use ecow::EcoString;

use crate::stub::StubStrategy;

/// Produces the debug rendering of a synthesized instance.
pub type InspectRenderer = Arc<dyn Fn() -> EcoString>;

/// Builder configuration visible to operations at drain time.
pub struct AssemblyContext {
    /// The stub strategy in effect when generation started.
    pub stub_strategy: StubStrategy,
    /// The debug-string producer in effect when generation started.
    pub inspect_renderer: InspectRenderer,
    /// Member names the reflector must never stub.
    pub universal_exclusions: Vec<EcoString>,
}

impl fmt::Debug for AssemblyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssemblyContext")
            .field("stub_strategy", &self.stub_strategy)
            .field("universal_exclusions", &self.universal_exclusions)
            .finish_non_exhaustive()
    }
}

/// A single deferred mutation step over a subject `S`.
pub type Operation<S> = Box<dyn FnOnce(&mut S, &AssemblyContext)>;

/// An ordered queue of deferred operations.
pub struct OperationQueue<S> {
    ops: VecDeque<Operation<S>>,
}

impl<S> OperationQueue<S> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ops: VecDeque::new(),
        }
    }

    /// Appends an operation.
    pub fn enqueue<F>(&mut self, op: F)
    where
        F: FnOnce(&mut S, &AssemblyContext) + 'static,
    {
        self.ops.push_back(Box::new(op));
    }

    /// Prepends an operation, placing it ahead of everything queued so far
    /// and everything queued later through [`OperationQueue::enqueue`].
    pub fn enqueue_front<F>(&mut self, op: F)
    where
        F: FnOnce(&mut S, &AssemblyContext) + 'static,
    {
        self.ops.push_front(Box::new(op));
    }

    /// The number of queued operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Applies every queued operation to `subject`, in order, consuming the
    /// queue. Draining happens exactly once per generation.
    pub fn drain(&mut self, subject: &mut S, ctx: &AssemblyContext) {
        for op in self.ops.drain(..) {
            op(subject, ctx);
        }
    }
}

impl<S> Default for OperationQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for OperationQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationQueue")
            .field("len", &self.ops.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ctx() -> AssemblyContext {
        AssemblyContext {
            stub_strategy: StubStrategy::ReturnsNothing,
            inspect_renderer: Arc::new(|| "<null>".into()),
            universal_exclusions: Vec::new(),
        }
    }

    #[test]
    fn drain_applies_in_insertion_order() {
        let mut queue: OperationQueue<Vec<u32>> = OperationQueue::new();
        queue.enqueue(|v, _| v.push(1));
        queue.enqueue(|v, _| v.push(2));
        queue.enqueue(|v, _| v.push(3));

        let mut subject = Vec::new();
        queue.drain(&mut subject, &test_ctx());
        assert_eq!(subject, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn enqueue_front_runs_before_everything_else() {
        let mut queue: OperationQueue<Vec<u32>> = OperationQueue::new();
        queue.enqueue(|v, _| v.push(1));
        queue.enqueue_front(|v, _| v.push(0));
        queue.enqueue(|v, _| v.push(2));

        let mut subject = Vec::new();
        queue.drain(&mut subject, &test_ctx());
        assert_eq!(subject, vec![0, 1, 2]);
    }

    #[test]
    fn drained_queue_is_spent() {
        let mut queue: OperationQueue<Vec<u32>> = OperationQueue::new();
        queue.enqueue(|v, _| v.push(1));

        let mut subject = Vec::new();
        queue.drain(&mut subject, &test_ctx());
        queue.drain(&mut subject, &test_ctx());
        assert_eq!(subject, vec![1]);
    }
}
