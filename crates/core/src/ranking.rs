//! Ranking engine.
//!
//! Orders the products of one comparison by a single attribute and assigns
//! dense ranks `1..=N`. Operates on an in-memory [`ComparisonSnapshot`]
//! assembled by the persistence layer; performs no I/O and never fails.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attribute_type::{comparable_key, AttributeType, SortKey};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Snapshot (input)
// ---------------------------------------------------------------------------

/// Attribute metadata as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    pub data_type: AttributeType,
    pub unit: Option<String>,
}

/// One stored cell of the product x attribute grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredValue {
    pub attribute_name: String,
    pub raw_value: String,
}

/// A product together with its sparse set of stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: DbId,
    pub name: String,
    pub values: Vec<StoredValue>,
}

/// Everything the engine needs to rank one comparison.
///
/// Product order is the natural order used when no sort attribute applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSnapshot {
    pub attributes: Vec<AttributeSpec>,
    pub products: Vec<ProductSnapshot>,
}

impl ComparisonSnapshot {
    fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Ranking direction. Rank 1 is the largest key under `Desc` and the
/// smallest under `Asc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Resolve a `sort_order` query parameter. Only `"asc"` selects
    /// ascending; absent or any other value means descending.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(p) if p.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved ranking parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingRequest {
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

impl RankingRequest {
    /// Build a request from raw query parameters. A blank `sort_by` counts
    /// as absent.
    pub fn from_params(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let sort_by = sort_by
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            sort_by,
            sort_order: SortOrder::from_param(sort_order),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// A stored value joined with its attribute metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValueView {
    pub value: String,
    pub unit: Option<String>,
    pub data_type: AttributeType,
}

/// One ranked product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProduct {
    pub product_id: DbId,
    pub product_name: String,
    pub rank: u32,
    pub attribute_values: IndexMap<String, AttributeValueView>,
}

/// Ranked products (rank 1 first) plus the parameters actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub results: Vec<RankedProduct>,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Rank the products of `snapshot` according to `request`.
///
/// - No `sort_by`: snapshot order is kept.
/// - `sort_by` names an attribute: every product is keyed with that
///   attribute's declared type; products without a value sort last in
///   either direction.
/// - `sort_by` names no attribute: every product is missing, so snapshot
///   order is kept.
///
/// The sort is stable, so equal keys keep snapshot order. Ranks are dense
/// and never shared.
pub fn rank(snapshot: &ComparisonSnapshot, request: &RankingRequest) -> RankingOutcome {
    let mut rows: Vec<(SortKey, RankedProduct)> = snapshot
        .products
        .iter()
        .map(|product| {
            let attribute_values = join_values(snapshot, product);
            let key = request
                .sort_by
                .as_deref()
                .map(|name| sort_key(snapshot, &attribute_values, name))
                .unwrap_or(SortKey::Missing);
            let ranked = RankedProduct {
                product_id: product.id,
                product_name: product.name.clone(),
                rank: 0,
                attribute_values,
            };
            (key, ranked)
        })
        .collect();

    if request.sort_by.is_some() {
        rows.sort_by(|(a, _), (b, _)| compare_keys(a, b, request.sort_order));
    }

    let results = rows
        .into_iter()
        .zip(1u32..)
        .map(|((_, mut ranked), rank)| {
            ranked.rank = rank;
            ranked
        })
        .collect();

    RankingOutcome {
        results,
        sort_by: request.sort_by.clone(),
        sort_order: request.sort_order,
    }
}

/// Join a product's stored values with attribute metadata, keyed by
/// attribute name. Values naming an unknown attribute are dropped; a
/// repeated attribute keeps its last value.
fn join_values(
    snapshot: &ComparisonSnapshot,
    product: &ProductSnapshot,
) -> IndexMap<String, AttributeValueView> {
    let mut joined = IndexMap::with_capacity(product.values.len());
    for stored in &product.values {
        let Some(attribute) = snapshot.attribute(&stored.attribute_name) else {
            continue;
        };
        joined.insert(
            attribute.name.clone(),
            AttributeValueView {
                value: stored.raw_value.clone(),
                unit: attribute.unit.clone(),
                data_type: attribute.data_type,
            },
        );
    }
    joined
}

fn sort_key(
    snapshot: &ComparisonSnapshot,
    values: &IndexMap<String, AttributeValueView>,
    sort_by: &str,
) -> SortKey {
    match snapshot.attribute(sort_by) {
        Some(attribute) => comparable_key(
            attribute.data_type,
            values.get(sort_by).map(|v| v.value.as_str()),
        ),
        None => SortKey::Missing,
    }
}

/// Missing keys go last regardless of direction; present keys follow
/// `order`.
fn compare_keys(a: &SortKey, b: &SortKey, order: SortOrder) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match order {
            SortOrder::Asc => a.cmp_present(b),
            SortOrder::Desc => a.cmp_present(b).reverse(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, data_type: AttributeType, unit: Option<&str>) -> AttributeSpec {
        AttributeSpec {
            name: name.to_string(),
            data_type,
            unit: unit.map(str::to_string),
        }
    }

    fn product(id: DbId, name: &str, values: &[(&str, &str)]) -> ProductSnapshot {
        ProductSnapshot {
            id,
            name: name.to_string(),
            values: values
                .iter()
                .map(|(a, v)| StoredValue {
                    attribute_name: a.to_string(),
                    raw_value: v.to_string(),
                })
                .collect(),
        }
    }

    fn names(outcome: &RankingOutcome) -> Vec<&str> {
        outcome
            .results
            .iter()
            .map(|r| r.product_name.as_str())
            .collect()
    }

    fn ranks(outcome: &RankingOutcome) -> Vec<u32> {
        outcome.results.iter().map(|r| r.rank).collect()
    }

    fn request(sort_by: &str, order: &str) -> RankingRequest {
        RankingRequest::from_params(Some(sort_by), Some(order))
    }

    fn price_snapshot() -> ComparisonSnapshot {
        ComparisonSnapshot {
            attributes: vec![attr("price", AttributeType::Number, Some("USD"))],
            products: vec![
                product(1, "A", &[("price", "999")]),
                product(2, "B", &[("price", "not-a-number")]),
                product(3, "C", &[]),
            ],
        }
    }

    // -- request parsing ----------------------------------------------------

    #[test]
    fn sort_order_defaults_to_desc() {
        assert_eq!(SortOrder::from_param(None), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("ASC")), SortOrder::Asc);
    }

    #[test]
    fn blank_sort_by_is_absent() {
        let req = RankingRequest::from_params(Some("  "), None);
        assert_eq!(req.sort_by, None);
        assert_eq!(req.sort_order, SortOrder::Desc);
    }

    // -- ordering -----------------------------------------------------------

    #[test]
    fn number_desc_puts_malformed_before_missing() {
        let outcome = rank(&price_snapshot(), &request("price", "desc"));
        assert_eq!(names(&outcome), vec!["A", "B", "C"]);
        assert_eq!(ranks(&outcome), vec![1, 2, 3]);
    }

    #[test]
    fn number_asc_still_puts_missing_last() {
        let outcome = rank(&price_snapshot(), &request("price", "asc"));
        assert_eq!(names(&outcome), vec!["B", "A", "C"]);
        assert_eq!(ranks(&outcome), vec![1, 2, 3]);
    }

    #[test]
    fn missing_is_last_in_both_directions() {
        let snapshot = ComparisonSnapshot {
            attributes: vec![attr("ram", AttributeType::Number, Some("GB"))],
            products: vec![
                product(1, "none-1", &[]),
                product(2, "small", &[("ram", "8")]),
                product(3, "none-2", &[]),
                product(4, "big", &[("ram", "32")]),
            ],
        };
        let desc = rank(&snapshot, &request("ram", "desc"));
        assert_eq!(names(&desc), vec!["big", "small", "none-1", "none-2"]);
        let asc = rank(&snapshot, &request("ram", "asc"));
        assert_eq!(names(&asc), vec!["small", "big", "none-1", "none-2"]);
    }

    #[test]
    fn numeric_ties_keep_input_order() {
        let snapshot = ComparisonSnapshot {
            attributes: vec![attr("score", AttributeType::Number, None)],
            products: vec![
                product(1, "first", &[("score", "10")]),
                product(2, "top", &[("score", "11")]),
                product(3, "second", &[("score", "10.0")]),
            ],
        };
        for order in ["asc", "desc"] {
            let outcome = rank(&snapshot, &request("score", order));
            let tied: Vec<_> = names(&outcome)
                .into_iter()
                .filter(|n| *n != "top")
                .collect();
            assert_eq!(tied, vec!["first", "second"], "order {order}");
            assert_eq!(ranks(&outcome), vec![1, 2, 3]);
        }
    }

    #[test]
    fn text_sort_is_case_insensitive_and_stable() {
        let snapshot = ComparisonSnapshot {
            attributes: vec![attr("brand", AttributeType::Text, None)],
            products: vec![
                product(1, "p1", &[("brand", "apple")]),
                product(2, "p2", &[("brand", "Zebra")]),
                product(3, "p3", &[("brand", "Apple")]),
                product(4, "p4", &[("brand", "banana")]),
            ],
        };
        let asc = rank(&snapshot, &request("brand", "asc"));
        assert_eq!(names(&asc), vec!["p1", "p3", "p4", "p2"]);
        let desc = rank(&snapshot, &request("brand", "desc"));
        assert_eq!(names(&desc), vec!["p2", "p4", "p1", "p3"]);
    }

    #[test]
    fn boolean_sort_orders_false_before_true() {
        let snapshot = ComparisonSnapshot {
            attributes: vec![attr("wifi", AttributeType::Boolean, None)],
            products: vec![
                product(1, "no", &[("wifi", "no")]),
                product(2, "yes", &[("wifi", "YES")]),
                product(3, "one", &[("wifi", "1")]),
                product(4, "junk", &[("wifi", "maybe")]),
            ],
        };
        let desc = rank(&snapshot, &request("wifi", "desc"));
        assert_eq!(names(&desc), vec!["yes", "one", "no", "junk"]);
        let asc = rank(&snapshot, &request("wifi", "asc"));
        assert_eq!(names(&asc), vec!["no", "junk", "yes", "one"]);
    }

    #[test]
    fn declared_type_of_sort_attribute_wins() {
        // "9" vs "10" sorts numerically for a number attribute and
        // lexically for a text attribute.
        let products = vec![
            product(1, "nine", &[("size", "9")]),
            product(2, "ten", &[("size", "10")]),
        ];
        let numeric = ComparisonSnapshot {
            attributes: vec![attr("size", AttributeType::Number, None)],
            products: products.clone(),
        };
        let textual = ComparisonSnapshot {
            attributes: vec![attr("size", AttributeType::Text, None)],
            products,
        };
        assert_eq!(
            names(&rank(&numeric, &request("size", "asc"))),
            vec!["nine", "ten"]
        );
        assert_eq!(
            names(&rank(&textual, &request("size", "asc"))),
            vec!["ten", "nine"]
        );
    }

    // -- natural order ------------------------------------------------------

    #[test]
    fn no_sort_attribute_keeps_input_order() {
        let outcome = rank(&price_snapshot(), &RankingRequest::default());
        assert_eq!(names(&outcome), vec!["A", "B", "C"]);
        assert_eq!(ranks(&outcome), vec![1, 2, 3]);
        assert_eq!(outcome.sort_by, None);
        assert_eq!(outcome.sort_order, SortOrder::Desc);
    }

    #[test]
    fn unknown_sort_attribute_keeps_input_order() {
        for order in ["asc", "desc"] {
            let outcome = rank(&price_snapshot(), &request("weight", order));
            assert_eq!(names(&outcome), vec!["A", "B", "C"]);
            assert_eq!(ranks(&outcome), vec![1, 2, 3]);
            assert_eq!(outcome.sort_by.as_deref(), Some("weight"));
        }
    }

    #[test]
    fn empty_snapshot_yields_no_results() {
        let outcome = rank(&ComparisonSnapshot::default(), &request("price", "asc"));
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.sort_order, SortOrder::Asc);
    }

    // -- output shape -------------------------------------------------------

    #[test]
    fn attribute_values_carry_full_mapping() {
        let snapshot = ComparisonSnapshot {
            attributes: vec![
                attr("price", AttributeType::Number, Some("USD")),
                attr("cpu", AttributeType::Text, Some("GHz")),
            ],
            products: vec![product(7, "Laptop", &[("cpu", "3.2"), ("price", "1200")])],
        };
        let outcome = rank(&snapshot, &request("price", "desc"));
        let ranked = &outcome.results[0];
        assert_eq!(ranked.product_id, 7);
        assert_eq!(ranked.rank, 1);
        assert_eq!(ranked.attribute_values.len(), 2);
        let cpu = &ranked.attribute_values["cpu"];
        assert_eq!(cpu.value, "3.2");
        assert_eq!(cpu.unit.as_deref(), Some("GHz"));
        assert_eq!(cpu.data_type, AttributeType::Text);
        let keys: Vec<_> = ranked.attribute_values.keys().cloned().collect();
        assert_eq!(keys, vec!["cpu", "price"]);
    }

    #[test]
    fn product_without_values_has_empty_mapping() {
        let outcome = rank(&price_snapshot(), &RankingRequest::default());
        assert!(outcome.results[2].attribute_values.is_empty());
    }

    #[test]
    fn values_for_unknown_attributes_are_dropped() {
        let snapshot = ComparisonSnapshot {
            attributes: vec![attr("price", AttributeType::Number, None)],
            products: vec![product(1, "A", &[("ghost", "x"), ("price", "1")])],
        };
        let outcome = rank(&snapshot, &RankingRequest::default());
        let keys: Vec<_> = outcome.results[0].attribute_values.keys().collect();
        assert_eq!(keys, vec!["price"]);
    }

    #[test]
    fn repeated_attribute_keeps_last_value() {
        let snapshot = ComparisonSnapshot {
            attributes: vec![attr("price", AttributeType::Number, None)],
            products: vec![product(1, "A", &[("price", "1"), ("price", "2")])],
        };
        let outcome = rank(&snapshot, &RankingRequest::default());
        assert_eq!(outcome.results[0].attribute_values.len(), 1);
        assert_eq!(outcome.results[0].attribute_values["price"].value, "2");
    }

    #[test]
    fn ranks_are_dense_for_larger_sets() {
        let products: Vec<_> = (0..50)
            .map(|i| {
                let value = (i % 7).to_string();
                ProductSnapshot {
                    id: i,
                    name: format!("p{i}"),
                    values: if i % 5 == 0 {
                        vec![]
                    } else {
                        vec![StoredValue {
                            attribute_name: "n".into(),
                            raw_value: value,
                        }]
                    },
                }
            })
            .collect();
        let snapshot = ComparisonSnapshot {
            attributes: vec![attr("n", AttributeType::Number, None)],
            products,
        };
        for order in ["asc", "desc"] {
            let outcome = rank(&snapshot, &request("n", order));
            assert_eq!(ranks(&outcome), (1..=50).collect::<Vec<u32>>());
            let first_missing = outcome
                .results
                .iter()
                .position(|r| r.attribute_values.is_empty())
                .unwrap();
            let trailing = &outcome.results[first_missing..];
            assert!(trailing.iter().all(|r| r.attribute_values.is_empty()));
        }
    }

    #[test]
    fn outcome_serializes_with_snake_case_fields() {
        let outcome = rank(&price_snapshot(), &request("price", "desc"));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["sort_by"], "price");
        assert_eq!(json["sort_order"], "desc");
        assert_eq!(json["results"][0]["product_name"], "A");
        assert_eq!(
            json["results"][0]["attribute_values"]["price"]["data_type"],
            "number"
        );
        assert_eq!(
            json["results"][0]["attribute_values"]["price"]["unit"],
            "USD"
        );
    }
}
