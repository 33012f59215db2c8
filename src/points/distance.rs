//! Euclidean helpers shared by the indexes

use std::cmp::Ordering;
use ndarray::ArrayView1;

/// Squared L2 distance between two vectors of equal length
pub fn squared_euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// L2 distance between two vectors of equal length.
///
/// Every index computes distances through this function so that the
/// closed-ball test `distance <= radius` agrees bit-for-bit between them.
pub fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Total order on (distance, index): ascending distance, ties by ascending index
pub fn by_distance_then_index(a: (f64, usize), b: (f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Component-wise mean of `rows`
pub fn centroid<'a, I>(rows: I, dimension: usize) -> Vec<f64>
where
    I: IntoIterator<Item = ArrayView1<'a, f64>>,
{
    let mut center = vec![0.0; dimension];
    let mut count = 0usize;

    for row in rows {
        for (c, &v) in center.iter_mut().zip(row.iter()) {
            *c += v;
        }
        count += 1;
    }

    if count > 0 {
        for c in center.iter_mut() {
            *c /= count as f64;
        }
    }

    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn three_four_five() {
        let a = array![0.0, 0.0];
        let b = array![3.0, 4.0];
        assert_eq!(squared_euclidean(a.view(), b.view()), 25.0);
        assert_eq!(euclidean(a.view(), b.view()), 5.0);
    }

    #[test]
    fn ties_break_on_index() {
        assert_eq!(by_distance_then_index((1.0, 3), (1.0, 7)), Ordering::Less);
        assert_eq!(by_distance_then_index((0.5, 9), (1.0, 0)), Ordering::Less);
        assert_eq!(by_distance_then_index((2.0, 1), (2.0, 1)), Ordering::Equal);
    }

    #[test]
    fn centroid_of_rows() {
        let m = array![[0.0, 2.0], [2.0, 4.0]];
        assert_eq!(centroid(m.rows(), 2), vec![1.0, 3.0]);
        assert_eq!(centroid(std::iter::empty(), 2), vec![0.0, 0.0]);
    }
}
