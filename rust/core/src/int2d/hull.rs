// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::vector::{det, Vector};

/// Convex hull by Andrew's monotone chain.
///
/// Returns the hull as indices into the sorted, de-duplicated input (which is
/// returned alongside), counter-clockwise, first index != last index.
/// Collinear boundary points are kept. Fewer than three distinct points give
/// an empty index list.
pub fn convex_hull(points: &[Vector]) -> (Vec<usize>, Vec<Vector>) {
    let mut unique = points.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if unique.len() < 3 {
        return (Vec::new(), unique);
    }

    let n = unique.len();
    let mut hull: Vec<usize> = Vec::with_capacity(2 * n);

    for i in 0..n {
        while hull.len() > 1
            && det(&unique[hull[hull.len() - 2]], &unique[hull[hull.len() - 1]], &unique[i]) < 0
        {
            hull.pop();
        }
        hull.push(i);
    }

    let lower_len = hull.len();
    for i in (0..n - 1).rev() {
        while hull.len() > lower_len
            && det(&unique[hull[hull.len() - 2]], &unique[hull[hull.len() - 1]], &unique[i]) < 0
        {
            hull.pop();
        }
        hull.push(i);
    }
    // the chain ends where it started
    hull.pop();

    (hull, unique)
}
