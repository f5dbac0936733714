use crate::distance::geodesic::haversine_km;
use crate::domain::types::GeoPoint;

/// Build the full n x n great-circle distance matrix in metres. Integer
/// metres keep the routing objective exact; the diagonal is zero and the
/// matrix is symmetric.
pub fn metre_matrix(locations: &[GeoPoint]) -> Vec<Vec<i64>> {
    let n = locations.len();
    let mut matrix = vec![vec![0i64; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let metres = (haversine_km(locations[i], locations[j]) * 1000.0).round() as i64;
            matrix[i][j] = metres;
            matrix[j][i] = metres;
        }
    }

    matrix
}
