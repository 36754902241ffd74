//! Property-based tests for the patcher
//!
//! Uses proptest to check the rewrite invariants over generated pages,
//! containers and wrapper names.

use proptest::prelude::*;
use safe_area_patch::config::PatchConfig;
use safe_area_patch::patcher::{Patcher, SourcePatch};

/// Known containers followed by a few the patcher never wraps
const CONTAINERS: [&str; 7] =
    ["SingleChildScrollView", "Center", "Padding", "ListView", "Column", "Stack", "Container"];

const IMPORT: &str = "import 'package:flutter/material.dart';\n\n";

fn page(has_import: bool, indent: usize, bodies: &[(usize, String)]) -> String {
    let pad = " ".repeat(indent);
    let mut out = if has_import { IMPORT.to_string() } else { String::new() };
    for (i, (container, child)) in bodies.iter().enumerate() {
        out.push_str(&format!(
            "final p{i} = Scaffold(\n{pad}body: {}(child: {child}),\n);\n",
            CONTAINERS[*container]
        ));
    }
    out
}

fn patcher(wrapper: &str) -> Patcher {
    Patcher::new(PatchConfig {
        wrapper: wrapper.to_string(),
        ..PatchConfig::default()
    })
    .unwrap()
}

fn bodies() -> impl Strategy<Value = Vec<(usize, String)>> {
    prop::collection::vec((0..CONTAINERS.len(), "[a-z]{1,8}"), 1..5)
}

proptest! {
    /// Patching an already patched page changes nothing
    #[test]
    fn second_patch_is_a_no_op(
        has_import in any::<bool>(),
        indent in 1usize..8,
        bodies in bodies(),
        wrapper in "[A-Z][a-z]{3,8}Wrap"
    ) {
        let patcher = patcher(&wrapper);
        let source = page(has_import, indent, &bodies);

        if let SourcePatch::Wrapped(wrapped) = patcher.patch_source(&source) {
            prop_assert_eq!(patcher.patch_source(&wrapped.text), SourcePatch::AlreadyMarked);
        }
    }

    /// A page mentioning any marker is never rewritten
    #[test]
    fn marked_page_is_left_alone(
        has_import in any::<bool>(),
        indent in 1usize..8,
        bodies in bodies(),
        marker in prop::sample::select(vec!["SafeAreaBottom", "safe_area_bottom"])
    ) {
        let source = format!("// {marker}\n{}", page(has_import, indent, &bodies));
        prop_assert_eq!(patcher("SafeAreaBottom").patch_source(&source), SourcePatch::AlreadyMarked);
    }

    /// One run inserts at most one import and exactly one wrapper
    #[test]
    fn one_import_and_one_wrap_per_run(
        has_import in any::<bool>(),
        indent in 1usize..8,
        bodies in bodies(),
        wrapper in "[A-Z][a-z]{3,8}Wrap"
    ) {
        let config = PatchConfig::default();
        let import_line = config.import_line.clone();
        let source = page(has_import, indent, &bodies);

        match patcher(&wrapper).patch_source(&source) {
            SourcePatch::Wrapped(wrapped) => {
                prop_assert_eq!(wrapped.text.matches(import_line.as_str()).count(), usize::from(has_import));
                prop_assert_eq!(wrapped.text.matches(&format!("{wrapper}(")).count(), 1);
                prop_assert_eq!(wrapped.import_inserted, has_import);
            },
            SourcePatch::Unmatched => {
                prop_assert!(bodies.iter().all(|(c, _)| *c >= 5));
            },
            SourcePatch::AlreadyMarked => prop_assert!(false, "generated page carries no marker"),
        }
    }

    /// The wrapped container is the highest-priority one present
    #[test]
    fn highest_priority_container_is_wrapped(
        indent in 1usize..8,
        bodies in bodies()
    ) {
        let source = page(true, indent, &bodies);
        let best = bodies.iter().map(|(c, _)| *c).filter(|c| *c < 5).min();

        match (patcher("SafeAreaBottom").patch_source(&source), best) {
            (SourcePatch::Wrapped(wrapped), Some(best)) => {
                prop_assert_eq!(wrapped.container, CONTAINERS[best]);
            },
            (SourcePatch::Unmatched, None) => {},
            (other, best) => prop_assert!(false, "got {:?} for best container {:?}", other, best),
        }
    }
}
