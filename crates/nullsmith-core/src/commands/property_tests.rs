// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for verb canonicalization and dispatch.
//!
//! These verify the dispatch surface is total:
//!
//! 1. **`canonical_command_name` never panics** on arbitrary input
//! 2. **Canonical names never contain underscores** and never start lowercase
//! 3. **Well-formed verbs always canonicalize**, dropping exactly the
//!    underscores
//! 4. **`supports` never panics** and never errors on arbitrary input

use proptest::prelude::*;

use super::canonical_command_name;
use crate::builder::NullTypeBuilder;

fn well_formed_verb() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}(_[a-z][a-z0-9]{0,8}){0,3}"
}

proptest! {
    #[test]
    fn canonicalization_never_panics(verb in ".*") {
        let _ = canonical_command_name(&verb);
    }

    #[test]
    fn canonical_names_are_well_formed(verb in ".*") {
        if let Some(canonical) = canonical_command_name(&verb) {
            prop_assert!(!canonical.contains('_'));
            prop_assert!(canonical.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn well_formed_verbs_always_canonicalize(verb in well_formed_verb()) {
        let canonical = canonical_command_name(&verb);
        prop_assert!(canonical.is_some());
        let canonical = canonical.unwrap();
        let underscores = verb.matches('_').count();
        prop_assert_eq!(canonical.len(), verb.len() - underscores);
    }

    #[test]
    fn supports_is_a_pure_probe(verb in ".*") {
        let builder = NullTypeBuilder::new();
        // Never panics, never errors; malformed names are just unsupported.
        let _ = builder.supports(&verb);
    }
}
