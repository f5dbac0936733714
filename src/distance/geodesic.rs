use crate::domain::types::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in km.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = GeoPoint {
            lat: 40.4168,
            lng: -3.7038,
        };
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn one_tenth_degree_of_latitude() {
        // 0.1 deg of latitude is about 11.12 km on a 6371 km sphere.
        let a = GeoPoint { lat: 40.4, lng: -3.7 };
        let b = GeoPoint { lat: 40.5, lng: -3.7 };
        let d = haversine_km(a, b);
        assert!((d - 11.12).abs() < 0.01, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint {
            lat: 40.4168,
            lng: -3.7038,
        };
        let b = GeoPoint {
            lat: 40.4250,
            lng: -3.6900,
        };
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        assert!((ab - ba).abs() < 1e-12);
        assert!(ab > 0.0);
    }
}
