use super::model::EmbeddingDataset;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Brute-force nearest-neighbor queries
// ---------------------------------------------------------------------------

/// Indices of the `k` points nearest to the dataset member at `query_index`,
/// nearest first.
///
/// Distance is Euclidean in data coordinates, so results do not depend on
/// the current axis scale or zoom.  The query point is excluded by index
/// equality, never by dropping a distance-zero entry, so another point that
/// shares its exact coordinates still counts as a neighbor.  Distance ties
/// break by ascending index.  When `k` exceeds the number of remaining
/// points, all of them are returned.
pub fn nearest_to_index(
    dataset: &EmbeddingDataset,
    query_index: usize,
    k: usize,
) -> Result<Vec<usize>> {
    let query = dataset.get(query_index).ok_or(Error::IndexOutOfBounds {
        index: query_index,
        len: dataset.len(),
    })?;
    Ok(ranked(dataset, query.x, query.y, Some(query_index), k))
}

/// Indices of the `k` points nearest to an arbitrary coordinate, nearest
/// first.
///
/// Nothing is excluded: a dataset member coincident with the query ranks
/// first at distance zero.
pub fn nearest_to_point(dataset: &EmbeddingDataset, x: f64, y: f64, k: usize) -> Vec<usize> {
    ranked(dataset, x, y, None, k)
}

/// Rank every point except `skip` by ascending distance to `(x, y)` and keep
/// the first `k` indices.
fn ranked(
    dataset: &EmbeddingDataset,
    x: f64,
    y: f64,
    skip: Option<usize>,
    k: usize,
) -> Vec<usize> {
    let mut order: Vec<(f64, usize)> = dataset
        .points()
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != skip)
        .map(|(i, p)| (squared_distance(x, y, p.x, p.y), i))
        .collect();

    // Squared distance orders the same as Euclidean; the index component
    // keeps equal distances deterministic.
    order.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    order.truncate(k);

    order.into_iter().map(|(_, i)| i).collect()
}

#[inline]
fn squared_distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LabeledPoint;
    use proptest::prelude::*;

    fn dataset(coords: &[(f64, f64)]) -> EmbeddingDataset {
        EmbeddingDataset::from_points(
            coords
                .iter()
                .map(|&(x, y)| LabeledPoint { x, y, label: 0 })
                .collect(),
        )
    }

    #[test]
    fn nearest_single_neighbor() {
        let ds = dataset(&[(0.0, 0.0), (1.0, 0.0), (0.0, 5.0), (10.0, 10.0)]);
        assert_eq!(nearest_to_index(&ds, 0, 1).unwrap(), vec![1]);
    }

    #[test]
    fn oversized_k_returns_every_other_point_in_distance_order() {
        let ds = dataset(&[(0.0, 0.0), (1.0, 0.0), (0.0, 5.0), (10.0, 10.0)]);
        for k in [3, 4, 100] {
            assert_eq!(nearest_to_index(&ds, 0, k).unwrap(), vec![1, 2, 3]);
        }
    }

    #[test]
    fn zero_k_returns_empty() {
        let ds = dataset(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(nearest_to_index(&ds, 0, 0).unwrap().is_empty());
        assert!(nearest_to_point(&ds, 0.0, 0.0, 0).is_empty());
    }

    #[test]
    fn distance_ties_break_by_ascending_index() {
        // Indices 2 and 1 are equidistant from the query; so are 4 and 3.
        let ds = dataset(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, -2.0), (2.0, 0.0)]);
        assert_eq!(nearest_to_index(&ds, 0, 4).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn coincident_point_is_still_a_neighbor() {
        // Index 1 duplicates the query's coordinates; only the query itself
        // is excluded.
        let ds = dataset(&[(2.0, 2.0), (2.0, 2.0), (3.0, 2.0)]);
        assert_eq!(nearest_to_index(&ds, 0, 2).unwrap(), vec![1, 2]);
        assert_eq!(nearest_to_index(&ds, 1, 2).unwrap(), vec![0, 2]);
    }

    #[test]
    fn order_is_data_space_even_when_axes_scale_differently() {
        // In data coordinates index 1 (distance 3) beats index 2 (distance
        // 4).  Under a screen transform that halves the y axis, index 2
        // would appear closer (2 < 3); that ordering must never show up.
        let ds = dataset(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]);
        assert_eq!(nearest_to_index(&ds, 0, 2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn point_query_ranks_all_points_without_exclusion() {
        let ds = dataset(&[(0.0, 0.0), (1.0, 0.0), (5.0, 0.0)]);
        assert_eq!(nearest_to_point(&ds, 0.9, 0.0, 3), vec![1, 0, 2]);
        // Coincident member ranks first at distance zero.
        assert_eq!(nearest_to_point(&ds, 5.0, 0.0, 1), vec![2]);
    }

    #[test]
    fn out_of_bounds_query_index_is_rejected() {
        let ds = dataset(&[(0.0, 0.0), (1.0, 0.0)]);
        let err = nearest_to_index(&ds, 2, 1).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { index: 2, len: 2 }));
    }

    #[test]
    fn single_point_dataset_has_no_neighbors() {
        let ds = dataset(&[(7.0, 7.0)]);
        assert!(nearest_to_index(&ds, 0, 5).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_neighbor_query_invariants(
            (coords, query) in prop::collection::vec(
                (-50.0f64..50.0, -50.0f64..50.0),
                1..40,
            )
            .prop_flat_map(|coords| {
                let n = coords.len();
                (Just(coords), 0..n)
            }),
            k in 0usize..50,
        ) {
            let ds = dataset(&coords);
            let result = nearest_to_index(&ds, query, k).unwrap();

            // Exactly min(k, N-1) indices, none the query, all unique.
            prop_assert_eq!(result.len(), k.min(ds.len() - 1));
            prop_assert!(!result.contains(&query));
            let mut seen = std::collections::BTreeSet::new();
            for &i in &result {
                prop_assert!(i < ds.len());
                prop_assert!(seen.insert(i));
            }

            // Non-decreasing true Euclidean distance to the query.
            let q = *ds.get(query).unwrap();
            let dist = |i: usize| {
                let p = ds.get(i).unwrap();
                ((q.x - p.x).powi(2) + (q.y - p.y).powi(2)).sqrt()
            };
            for pair in result.windows(2) {
                prop_assert!(dist(pair[0]) <= dist(pair[1]));
            }

            // Identical arguments give identical ordered results.
            prop_assert_eq!(nearest_to_index(&ds, query, k).unwrap(), result);
        }
    }
}
