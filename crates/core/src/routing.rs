//! The routing table: which collections produce which buckets.
//!
//! The set of collection kinds is closed. Only the collection *names* that
//! select each kind are configurable.

use crate::normalize::normalize_segment;
use serde::{Deserialize, Serialize};
use tokenbake_interchange::{Collection, Mode};

/// Bucket shared by all primitive collections.
pub const BASE_BUCKET: &str = "base";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Single-mode primitives, merged into the `base` bucket.
    Primitive,
    BrandTokenMapping,
    BrandColorMapping,
    Density,
    ColorMode,
    BreakpointMode,
}

impl CollectionKind {
    /// `(bucket stem, root key)` for per-mode kinds; `None` for primitives,
    /// whose bucket is [`BASE_BUCKET`] and whose root key is derived from
    /// the collection name.
    pub fn per_mode_target(&self) -> Option<(&'static str, &'static str)> {
        match self {
            CollectionKind::Primitive => None,
            CollectionKind::BrandTokenMapping => Some(("brand", "brand-token-mapping")),
            CollectionKind::BrandColorMapping => Some(("brand-colors", "brand-color-mapping")),
            CollectionKind::Density => Some(("density", "density")),
            CollectionKind::ColorMode => Some(("color", "color-mode")),
            CollectionKind::BreakpointMode => Some(("breakpoint", "breakpoint-mode")),
        }
    }
}

/// Collection names that select each kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionNames {
    pub primitives: Vec<String>,
    pub brand_token_mapping: String,
    pub brand_color_mapping: String,
    pub density: String,
    pub color_mode: String,
    pub breakpoint_mode: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            primitives: vec![
                "_ColorPrimitive".to_string(),
                "_SpacePrimitive".to_string(),
                "_SizePrimitive".to_string(),
                "_FontPrimitive".to_string(),
            ],
            brand_token_mapping: "BrandTokenMapping".to_string(),
            brand_color_mapping: "BrandColorMapping".to_string(),
            density: "Density".to_string(),
            color_mode: "ColorMode".to_string(),
            breakpoint_mode: "BreakpointMode".to_string(),
        }
    }
}

/// One output target for a collection: every variable of the collection is
/// resolved in `mode` and inserted into `bucket` under `prefix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<'a> {
    pub bucket: String,
    pub prefix: Vec<String>,
    pub mode: &'a Mode,
}

#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    names: CollectionNames,
}

impl RoutingTable {
    pub fn new(names: CollectionNames) -> Self {
        Self { names }
    }

    /// Exact, case-sensitive match on the collection name.
    pub fn classify(&self, collection_name: &str) -> Option<CollectionKind> {
        let n = &self.names;
        if n.primitives.iter().any(|p| p == collection_name) {
            Some(CollectionKind::Primitive)
        } else if collection_name == n.brand_token_mapping {
            Some(CollectionKind::BrandTokenMapping)
        } else if collection_name == n.brand_color_mapping {
            Some(CollectionKind::BrandColorMapping)
        } else if collection_name == n.density {
            Some(CollectionKind::Density)
        } else if collection_name == n.color_mode {
            Some(CollectionKind::ColorMode)
        } else if collection_name == n.breakpoint_mode {
            Some(CollectionKind::BreakpointMode)
        } else {
            None
        }
    }

    /// All routes for a collection; empty when it is not routed.
    pub fn routes<'a>(&self, collection: &'a Collection) -> Vec<Route<'a>> {
        match self.classify(&collection.name) {
            Some(kind) => routes_for(kind, collection),
            None => Vec::new(),
        }
    }
}

/// Expand a classified collection into its routes.
pub fn routes_for(kind: CollectionKind, collection: &Collection) -> Vec<Route<'_>> {
    let Some((stem, root)) = kind.per_mode_target() else {
        return collection
            .default_mode()
            .map(|mode| Route {
                bucket: BASE_BUCKET.to_string(),
                prefix: vec![normalize_segment(&collection.name)],
                mode,
            })
            .into_iter()
            .collect();
    };

    collection
        .modes
        .iter()
        .map(|mode| {
            if kind == CollectionKind::BreakpointMode {
                let label = breakpoint_label(&mode.name);
                Route {
                    bucket: format!("{}-{}", stem, label),
                    prefix: vec![root.to_string(), label],
                    mode,
                }
            } else {
                Route {
                    bucket: format!("{}-{}", stem, normalize_segment(&mode.name)),
                    prefix: vec![root.to_string()],
                    mode,
                }
            }
        })
        .collect()
}

/// Breakpoint label: the first whitespace-delimited token of the mode
/// name, normalized. `"SM - 390px (compact)"` -> `"sm"`.
pub fn breakpoint_label(mode_name: &str) -> String {
    normalize_segment(mode_name.split_whitespace().next().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(name: &str, modes: &[(&str, &str)]) -> Collection {
        Collection {
            name: name.to_string(),
            modes: modes
                .iter()
                .map(|(id, n)| Mode {
                    mode_id: id.to_string(),
                    name: n.to_string(),
                })
                .collect(),
            default_mode_id: None,
            variables: Vec::new(),
        }
    }

    #[test]
    fn classifies_default_names() {
        let t = RoutingTable::default();
        assert_eq!(t.classify("_SizePrimitive"), Some(CollectionKind::Primitive));
        assert_eq!(t.classify("BrandTokenMapping"), Some(CollectionKind::BrandTokenMapping));
        assert_eq!(t.classify("BrandColorMapping"), Some(CollectionKind::BrandColorMapping));
        assert_eq!(t.classify("Density"), Some(CollectionKind::Density));
        assert_eq!(t.classify("ColorMode"), Some(CollectionKind::ColorMode));
        assert_eq!(t.classify("BreakpointMode"), Some(CollectionKind::BreakpointMode));
        assert_eq!(t.classify("density"), None);
        assert_eq!(t.classify("Something Else"), None);
    }

    #[test]
    fn custom_names_override_defaults() {
        let t = RoutingTable::new(CollectionNames {
            density: "Spacing Density".into(),
            primitives: vec!["Core".into()],
            ..CollectionNames::default()
        });
        assert_eq!(t.classify("Spacing Density"), Some(CollectionKind::Density));
        assert_eq!(t.classify("Density"), None);
        assert_eq!(t.classify("Core"), Some(CollectionKind::Primitive));
        assert_eq!(t.classify("_ColorPrimitive"), None);
    }

    #[test]
    fn primitive_routes_to_base_with_collection_key() {
        let col = collection("_SpacePrimitive", &[("1:0", "Value"), ("1:1", "Other")]);
        let routes = routes_for(CollectionKind::Primitive, &col);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].bucket, "base");
        assert_eq!(routes[0].prefix, vec!["spaceprimitive"]);
        assert_eq!(routes[0].mode.mode_id, "1:0");
    }

    #[test]
    fn primitive_without_modes_has_no_route() {
        let col = collection("_ColorPrimitive", &[]);
        assert!(routes_for(CollectionKind::Primitive, &col).is_empty());
    }

    #[test]
    fn per_mode_kinds_produce_one_bucket_per_mode() {
        let col = collection("ColorMode", &[("a", "Light"), ("b", "Dark")]);
        let routes = routes_for(CollectionKind::ColorMode, &col);
        let buckets: Vec<_> = routes.iter().map(|r| r.bucket.as_str()).collect();
        assert_eq!(buckets, vec!["color-light", "color-dark"]);
        assert!(routes.iter().all(|r| r.prefix == vec!["color-mode"]));

        let col = collection("BrandColorMapping", &[("a", "SportBILD")]);
        let routes = routes_for(CollectionKind::BrandColorMapping, &col);
        assert_eq!(routes[0].bucket, "brand-colors-sportbild");
        assert_eq!(routes[0].prefix, vec!["brand-color-mapping"]);

        let col = collection("BrandTokenMapping", &[("a", "BILD")]);
        let routes = routes_for(CollectionKind::BrandTokenMapping, &col);
        assert_eq!(routes[0].bucket, "brand-bild");
        assert_eq!(routes[0].prefix, vec!["brand-token-mapping"]);

        let col = collection("Density", &[("a", "Compact")]);
        let routes = routes_for(CollectionKind::Density, &col);
        assert_eq!(routes[0].bucket, "density-compact");
        assert_eq!(routes[0].prefix, vec!["density"]);
    }

    #[test]
    fn breakpoint_uses_first_token_as_label() {
        let col = collection(
            "BreakpointMode",
            &[("a", "XS - 320px"), ("b", "SM - 390px (compact)")],
        );
        let routes = routes_for(CollectionKind::BreakpointMode, &col);
        assert_eq!(routes[0].bucket, "breakpoint-xs");
        assert_eq!(routes[1].bucket, "breakpoint-sm");
        assert_eq!(routes[1].prefix, vec!["breakpoint-mode", "sm"]);
    }

    #[test]
    fn breakpoint_label_edge_cases() {
        assert_eq!(breakpoint_label("LG"), "lg");
        assert_eq!(breakpoint_label("  MD   600"), "md");
        assert_eq!(breakpoint_label(""), "x");
    }

    #[test]
    fn unrouted_collection_has_no_routes() {
        let col = collection("_Internal", &[("a", "Value")]);
        assert!(RoutingTable::default().routes(&col).is_empty());
    }

    #[test]
    fn collection_names_deserialize_with_defaults() {
        let names: CollectionNames =
            serde_json::from_str(r#"{"color_mode": "Theme"}"#).unwrap();
        assert_eq!(names.color_mode, "Theme");
        assert_eq!(names.density, "Density");
        assert_eq!(names.primitives.len(), 4);
    }
}
