//! Ranked nearest-facility lookup
//!
//! Orders facilities by Manhattan distance to a query point, then by the price
//! of each facility's cheapest item, then by facility id. Facilities with an
//! empty catalog have no cheapest item and are left out of the ranking.

use crate::domain::types::{Catalog, Facility, GridPoint, Price, QueryPoint, RankedResult};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// City-block distance between two grid points
#[inline]
pub fn manhattan_distance(a: GridPoint, b: GridPoint) -> u64 {
    let dx = (i64::from(a.x) - i64::from(b.x)).unsigned_abs();
    let dy = (i64::from(a.y) - i64::from(b.y)).unsigned_abs();
    dx + dy
}

/// Lowest-priced item in a catalog; equal prices resolve to the first name in
/// lexical order. `None` for an empty catalog.
pub fn cheapest_item(catalog: &Catalog) -> Option<(&str, Price)> {
    // BTreeMap iterates by name, and min_by_key keeps the first minimum
    catalog
        .iter()
        .min_by_key(|(_, price)| **price)
        .map(|(name, price)| (name.as_str(), *price))
}

/// Rank `facilities` against `query` and return at most `k` results
///
/// Results are ordered by ascending distance, then ascending cheapest price,
/// then facility id. `k` larger than the number of eligible facilities returns
/// all of them.
pub fn rank(
    facilities: &[Facility],
    query: QueryPoint,
    k: i64,
) -> Result<Vec<RankedResult>, RankError> {
    if k <= 0 {
        return Err(RankError::InvalidArgument(format!("k must be positive, got {}", k)));
    }
    let k = usize::try_from(k).unwrap_or(usize::MAX);

    let mut ranked: Vec<RankedResult> = facilities
        .iter()
        .filter_map(|facility| {
            let Some((item, price)) = cheapest_item(facility.catalog()) else {
                debug!(facility_id = %facility.id(), "facility_skipped_empty_catalog");
                return None;
            };
            Some(RankedResult {
                facility_id: facility.id().clone(),
                distance: manhattan_distance(query, facility.location()),
                cheapest_item_name: item.to_string(),
                cheapest_item_price: price,
            })
        })
        .collect();

    let eligible = ranked.len();
    ranked.sort_unstable_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| a.cheapest_item_price.cmp(&b.cheapest_item_price))
            .then_with(|| a.facility_id.cmp(&b.facility_id))
    });
    ranked.truncate(k);

    debug!(
        query = %query,
        k = %k,
        eligible = %eligible,
        returned = %ranked.len(),
        "query_ranked"
    );

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FacilityId;

    fn catalog(items: &[(&str, u64)]) -> Catalog {
        items.iter().map(|(name, cents)| (name.to_string(), Price::from_cents(*cents))).collect()
    }

    fn facility(id: &str, x: i32, y: i32, items: &[(&str, u64)]) -> Facility {
        Facility::new(id, x, y, catalog(items))
    }

    fn ids(results: &[RankedResult]) -> Vec<&str> {
        results.iter().map(|r| r.facility_id.as_str()).collect()
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance(GridPoint::new(0, 0), GridPoint::new(3, -4)), 7);
        assert_eq!(manhattan_distance(GridPoint::new(-10, 10), GridPoint::new(10, -10)), 40);
        assert_eq!(manhattan_distance(GridPoint::new(2, 2), GridPoint::new(2, 2)), 0);
    }

    #[test]
    fn test_manhattan_distance_extreme_coordinates() {
        let a = GridPoint::new(i32::MIN, i32::MIN);
        let b = GridPoint::new(i32::MAX, i32::MAX);
        assert_eq!(manhattan_distance(a, b), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_cheapest_item() {
        let items = catalog(&[("A", 500), ("B", 120), ("C", 900)]);
        assert_eq!(cheapest_item(&items), Some(("B", Price::from_cents(120))));
    }

    #[test]
    fn test_cheapest_item_tie_uses_name_order() {
        let items = catalog(&[("C", 100), ("A", 100), ("B", 300)]);
        assert_eq!(cheapest_item(&items), Some(("A", Price::from_cents(100))));
    }

    #[test]
    fn test_cheapest_item_empty_catalog() {
        assert_eq!(cheapest_item(&Catalog::new()), None);
    }

    #[test]
    fn test_rank_example_scenario() {
        let facilities = vec![
            facility("F1", 0, 0, &[("A", 500)]),
            facility("F2", 3, 0, &[("A", 100)]),
            facility("F3", 0, 0, &[("A", 900)]),
        ];

        let results = rank(&facilities, QueryPoint::new(0, 0), 2).unwrap();

        assert_eq!(ids(&results), vec!["F1", "F3"]);
        assert_eq!(results[0].distance, 0);
        assert_eq!(results[0].cheapest_item_price, Price::from_cents(500));
        assert_eq!(results[1].cheapest_item_price, Price::from_cents(900));
    }

    #[test]
    fn test_rank_full_tie_breaks_by_id() {
        let facilities = vec![
            facility("002", 1, 1, &[("A", 100)]),
            facility("010", 1, 1, &[("A", 100)]),
            facility("001", -1, -1, &[("B", 100)]),
        ];

        let results = rank(&facilities, QueryPoint::new(0, 0), 3).unwrap();
        assert_eq!(ids(&results), vec!["001", "002", "010"]);
    }

    #[test]
    fn test_rank_skips_empty_catalog() {
        let facilities = vec![
            facility("near", 0, 0, &[]),
            facility("far", 5, 5, &[("A", 100)]),
        ];

        let results = rank(&facilities, QueryPoint::new(0, 0), 5).unwrap();
        assert_eq!(ids(&results), vec!["far"]);
    }

    #[test]
    fn test_rank_empty_input() {
        assert!(rank(&[], QueryPoint::new(3, 4), 3).unwrap().is_empty());
    }

    #[test]
    fn test_rank_k_larger_than_input() {
        let facilities = vec![
            facility("a", 4, 0, &[("A", 100)]),
            facility("b", 1, 0, &[("A", 100)]),
        ];
        let results = rank(&facilities, QueryPoint::new(0, 0), 10).unwrap();
        assert_eq!(ids(&results), vec!["b", "a"]);
    }

    #[test]
    fn test_rank_rejects_non_positive_k() {
        let facilities = vec![facility("a", 0, 0, &[("A", 100)])];
        assert!(matches!(
            rank(&facilities, QueryPoint::new(0, 0), 0),
            Err(RankError::InvalidArgument(_))
        ));
        assert!(matches!(
            rank(&facilities, QueryPoint::new(0, 0), -3),
            Err(RankError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rank_reports_cheapest_item_name() {
        let facilities = vec![facility("a", 2, 3, &[("A", 800), ("B", 250), ("C", 250)])];
        let results = rank(&facilities, QueryPoint::new(0, 0), 1).unwrap();
        assert_eq!(
            results,
            vec![RankedResult {
                facility_id: FacilityId::from("a"),
                distance: 5,
                cheapest_item_name: "B".to_string(),
                cheapest_item_price: Price::from_cents(250),
            }]
        );
    }
}
