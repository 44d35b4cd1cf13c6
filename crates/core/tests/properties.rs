//! Property tests for name normalization and alias resolution.
//!
//! Names are arbitrary strings; alias graphs are random over a small set of
//! ids, with some targets outside the set (dangling) and some modes left
//! empty (missing).

use proptest::prelude::*;
use serde_json::{json, Value};
use tokenbake_core::{build_index, resolve, to_path, ResolvedValue, Unresolved};
use tokenbake_interchange::from_export;

const MODE: &str = "m";

// ============================================================================
// Generators
// ============================================================================

/// Names shaped like real variable names, plus a fraction of arbitrary text.
fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9 ()_./-]{0,40}",
        "([A-Z][a-z]{1,8}/){0,4}[0-9]{1,4}( \\([a-z ]{1,10}\\))?",
        any::<String>(),
    ]
}

/// What a single variable holds for the mode.
#[derive(Debug, Clone)]
enum Slot {
    Number(i64),
    Alias(usize),
    Missing,
}

/// `n` variables; alias targets range over `0..n + 2`, so indices `>= n`
/// point at ids that do not exist.
fn arb_graph() -> impl Strategy<Value = Vec<Slot>> {
    (1usize..8).prop_flat_map(|n| {
        prop::collection::vec(
            prop_oneof![
                2 => (0i64..1000).prop_map(Slot::Number),
                5 => (0..n + 2).prop_map(Slot::Alias),
                1 => Just(Slot::Missing),
            ],
            n,
        )
    })
}

fn id(i: usize) -> String {
    format!("VariableID:{}", i)
}

fn export(graph: &[Slot]) -> Value {
    let variables: Vec<Value> = graph
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let values = match slot {
                Slot::Number(n) => json!({ "m": n }),
                Slot::Alias(t) => json!({ "m": {"type": "VARIABLE_ALIAS", "id": id(*t)} }),
                Slot::Missing => json!({}),
            };
            json!({"id": id(i), "name": format!("V/{}", i), "resolvedType": "FLOAT", "valuesByMode": values})
        })
        .collect();
    json!({"collections": [{
        "name": "Density",
        "modes": [{"modeId": "m", "name": "default"}],
        "variables": variables
    }]})
}

/// Walk the graph directly. A walk longer than the graph has looped.
fn expected(graph: &[Slot], start: usize) -> Result<i64, Unresolved> {
    let mut at = start;
    for _ in 0..=graph.len() {
        match graph[at] {
            Slot::Number(n) => return Ok(n),
            Slot::Missing => return Err(Unresolved::MissingModeValue),
            Slot::Alias(t) if t >= graph.len() => return Err(Unresolved::DanglingAlias),
            Slot::Alias(t) => at = t,
        }
    }
    Err(Unresolved::CyclicAlias)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every name maps to a non-empty path of non-empty `[a-z0-9-]` segments.
    #[test]
    fn prop_to_path_segments_are_key_safe(name in arb_name()) {
        let path = to_path(&name);
        prop_assert!(!path.is_empty());
        for seg in &path {
            prop_assert!(!seg.is_empty(), "empty segment in {:?}", path);
            prop_assert!(
                seg.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "bad character in {:?} from {:?}", seg, name
            );
            prop_assert!(!seg.starts_with('-') && !seg.ends_with('-'), "{:?}", seg);
            prop_assert!(!seg.starts_with(|c: char| c.is_ascii_digit()), "{:?}", seg);
            prop_assert!(!seg.contains("--"), "{:?}", seg);
        }
    }

    #[test]
    fn prop_to_path_is_deterministic(name in arb_name()) {
        prop_assert_eq!(to_path(&name), to_path(&name));
    }

    /// One segment per non-empty part, or the single fallback segment.
    #[test]
    fn prop_to_path_keeps_one_segment_per_part(name in arb_name()) {
        let parts = name.split('/').filter(|p| !p.is_empty()).count();
        prop_assert_eq!(to_path(&name).len(), parts.max(1));
    }

    /// Resolution always terminates, and agrees with a direct walk of the
    /// alias graph: the first terminal, missing or dangling slot decides,
    /// and a walk that loops is a cycle.
    #[test]
    fn prop_resolution_matches_graph_walk(graph in arb_graph()) {
        let doc = from_export(&export(&graph)).unwrap();
        let index = build_index(&doc);
        let variables = &doc.collections[0].variables;

        for (start, var) in variables.iter().enumerate() {
            let got = resolve(&index, var, MODE);
            match expected(&graph, start) {
                Ok(n) => prop_assert_eq!(
                    got,
                    Ok(ResolvedValue::Scalar(tokenbake_interchange::Scalar::Number(n.into())))
                ),
                Err(reason) => prop_assert_eq!(got, Err(reason)),
            }
        }
    }

    /// Resolved values are never aliases: only scalars or colors come back.
    #[test]
    fn prop_resolved_value_is_terminal(graph in arb_graph()) {
        let doc = from_export(&export(&graph)).unwrap();
        let index = build_index(&doc);
        for var in &doc.collections[0].variables {
            if let Ok(value) = resolve(&index, var, MODE) {
                prop_assert!(value.as_f64().is_some(), "{:?}", value);
            }
        }
    }
}
