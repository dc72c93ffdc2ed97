//! Unit tests for px-core primitives.

#[cfg(test)]
mod geo {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::geo::{
        clamp_latitude, distance_between, haversine_distance_m, meters_to_latitude_degrees,
        meters_to_longitude_degrees, normalize_longitude,
    };
    use crate::GeoPoint;

    fn random_point(rng: &mut SmallRng) -> GeoPoint {
        GeoPoint::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))
    }

    #[test]
    fn self_distance_is_zero() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..500 {
            let p = random_point(&mut rng);
            assert!(haversine_distance_m(&p, &p).abs() < 1e-6);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..500 {
            let a = random_point(&mut rng);
            let b = random_point(&mut rng);
            let ab = haversine_distance_m(&a, &b);
            let ba = haversine_distance_m(&b, &a);
            assert!((ab - ba).abs() < 1e-6, "{a} {b}: {ab} vs {ba}");
        }
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(33.0, -118.2);
        let b = GeoPoint::new(34.0, -118.2);
        let d = a.distance_m(&b);
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let d = a.distance_m(&b);
        assert!((d - std::f64::consts::PI * crate::EARTH_RADIUS_M).abs() < 1e-3);
    }

    #[test]
    fn non_finite_distance_is_nan() {
        let a = GeoPoint::new(f64::NAN, 0.0);
        let b = GeoPoint::new(0.0, 0.0);
        assert!(haversine_distance_m(&a, &b).is_nan());
        assert!(haversine_distance_m(&b, &GeoPoint::new(0.0, f64::INFINITY)).is_nan());
        assert!(distance_between(None, Some(&b)).is_nan());
        assert!(distance_between(Some(&b), Some(&b)) == 0.0);
    }

    #[test]
    fn latitude_degrees_round_trip_a_kilometre() {
        let deg = meters_to_latitude_degrees(1_000.0);
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(10.0 + deg, 20.0);
        assert!((a.distance_m(&b) - 1_000.0).abs() < 1e-4);
    }

    #[test]
    fn longitude_degrees_widen_with_latitude() {
        let at_equator = meters_to_longitude_degrees(1_000.0, 0.0);
        let at_sixty = meters_to_longitude_degrees(1_000.0, 60.0);
        assert!((at_equator - meters_to_latitude_degrees(1_000.0)).abs() < 1e-12);
        assert!((at_sixty - 2.0 * at_equator).abs() < 1e-9);
    }

    #[test]
    fn longitude_degrees_zero_at_pole() {
        assert_eq!(meters_to_longitude_degrees(3_218.0, 90.0), 0.0);
        assert_eq!(meters_to_longitude_degrees(3_218.0, -90.0), 0.0);
    }

    #[test]
    fn clamp_latitude_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..500 {
            let v: f64 = rng.gen_range(-1.0e6..1.0e6);
            let c = clamp_latitude(v);
            assert!((-90.0..=90.0).contains(&c));
        }
        assert_eq!(clamp_latitude(45.5), 45.5);
        assert_eq!(clamp_latitude(-90.0), -90.0);
        assert_eq!(clamp_latitude(120.0), 90.0);
        assert_eq!(clamp_latitude(-91.0), -90.0);
    }

    #[test]
    fn normalize_longitude_examples() {
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(360.0), 0.0);
        assert_eq!(normalize_longitude(-540.0), 180.0);
        assert_eq!(normalize_longitude(-118.19), -118.19);
    }

    #[test]
    fn normalize_longitude_idempotent_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..2_000 {
            let v: f64 = rng.gen_range(-1.0e9..1.0e9);
            let once = normalize_longitude(v);
            assert!(once > -180.0 && once <= 180.0, "{v} -> {once}");
            assert_eq!(normalize_longitude(once), once);
        }
    }

    #[test]
    fn normalize_longitude_huge_input_terminates() {
        let v = normalize_longitude(1.0e300);
        assert!(v > -180.0 && v <= 180.0);
    }

    #[test]
    fn checked_rejects_non_finite() {
        assert!(GeoPoint::checked(f64::NAN, 0.0).is_err());
        let p = GeoPoint::checked(95.0, 200.0).unwrap();
        assert_eq!(p.latitude, 90.0);
        assert_eq!(p.longitude, -160.0);
    }

    #[test]
    fn with_accuracy_drops_invalid() {
        assert_eq!(GeoPoint::new(0.0, 0.0).with_accuracy(12.0).accuracy, Some(12.0));
        assert_eq!(GeoPoint::new(0.0, 0.0).with_accuracy(-1.0).accuracy, None);
    }
}

#[cfg(test)]
mod ids {
    use crate::{RegionId, UserId};

    #[test]
    fn display_is_raw_string() {
        assert_eq!(RegionId::from("room-7").to_string(), "room-7");
        assert_eq!(UserId::new("u1").as_str(), "u1");
    }

    #[test]
    fn equality_by_value() {
        assert_eq!(RegionId::from("a"), RegionId::new(String::from("a")));
        assert_ne!(RegionId::from("a"), RegionId::from("b"));
    }
}

#[cfg(test)]
mod units {
    use crate::units::{format_distance, meters_to_miles, miles_to_meters};

    #[test]
    fn labels() {
        assert_eq!(format_distance(850.4), "850 m");
        assert_eq!(format_distance(1_000.0), "1.0 km");
        assert_eq!(format_distance(1_234.0), "1.2 km");
        assert_eq!(format_distance(f64::NAN), "unknown distance");
    }

    #[test]
    fn miles() {
        assert!((miles_to_meters(2.0) - 3_218.688).abs() < 1e-9);
        assert!((meters_to_miles(1_609.344) - 1.0).abs() < 1e-12);
    }
}
