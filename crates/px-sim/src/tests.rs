//! Unit tests for px-sim.

use px_core::GeoPoint;

use crate::{Direction, LocationSimulator, Preset, PresetTable};

fn harbor_preset() -> Preset {
    Preset::new("harbor", "Harbor", 33.7705, -118.1905).with_accuracy(5.0)
}

// ── Teleport ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod teleport {
    use super::*;
    use crate::SimError;

    #[test]
    fn sets_point_and_preset_key() {
        let mut sim = LocationSimulator::new();
        let loc = sim.teleport(&harbor_preset());
        assert_eq!(loc.preset_key.as_deref(), Some("harbor"));
        assert_eq!(loc.point.latitude, 33.7705);
        assert_eq!(loc.point.longitude, -118.1905);
        assert_eq!(loc.point.accuracy, Some(5.0));
        assert_eq!(sim.location(), Some(&loc));
    }

    #[test]
    fn teleport_to_unknown_key_errors() {
        let mut sim = LocationSimulator::new();
        let table = PresetTable::default();
        let result = sim.teleport_to(&table, "atlantis");
        assert!(matches!(result, Err(SimError::UnknownPreset(_))));
        assert!(sim.location().is_none());
    }

    #[test]
    fn teleport_to_builtin() {
        let mut sim = LocationSimulator::new();
        let loc = sim.teleport_to(&PresetTable::default(), "signal-hill").unwrap();
        assert_eq!(loc.preset_key.as_deref(), Some("signal-hill"));
        assert_eq!(loc.point.latitude, 33.8044);
        assert_eq!(loc.point.accuracy, Some(12.0));
    }

    #[test]
    fn set_point_rejects_non_finite() {
        let mut sim = LocationSimulator::starting_at(GeoPoint::new(1.0, 1.0));
        assert!(sim.set_point(GeoPoint::new(f64::NAN, 0.0)).is_err());
        assert_eq!(sim.point().unwrap().latitude, 1.0);
    }
}

// ── Nudge ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod nudge {
    use px_core::geo::{meters_to_latitude_degrees, meters_to_longitude_degrees};

    use super::*;
    use crate::DEFAULT_STEP_M;

    #[test]
    fn north_adds_latitude_and_clears_preset() {
        let mut sim = LocationSimulator::new();
        sim.teleport(&harbor_preset());
        let loc = sim.nudge(Direction::North, DEFAULT_STEP_M).unwrap();
        let expected = 33.7705 + meters_to_latitude_degrees(DEFAULT_STEP_M);
        assert!((loc.point.latitude - expected).abs() < 1e-12);
        assert_eq!(loc.point.longitude, -118.1905);
        assert_eq!(loc.preset_key, None);
        assert_eq!(loc.point.accuracy, Some(5.0));
    }

    #[test]
    fn east_scales_by_latitude() {
        let mut sim = LocationSimulator::starting_at(GeoPoint::new(60.0, 10.0));
        let loc = sim.nudge(Direction::East, 1_000.0).unwrap();
        let expected = 10.0 + meters_to_longitude_degrees(1_000.0, 60.0);
        assert!((loc.point.longitude - expected).abs() < 1e-12);

        let back = sim.nudge(Direction::West, 1_000.0).unwrap();
        assert!((back.point.longitude - 10.0).abs() < 1e-9);
    }

    #[test]
    fn step_distance_is_great_circle_metres() {
        let start = GeoPoint::new(33.7705, -118.1905);
        let mut sim = LocationSimulator::starting_at(start);
        let loc = sim.nudge(Direction::South, 3_218.0).unwrap();
        assert!((start.distance_m(&loc.point) - 3_218.0).abs() < 0.01);
    }

    #[test]
    fn zero_step_is_a_no_op() {
        let mut sim = LocationSimulator::new();
        let before = sim.teleport(&harbor_preset());
        assert!(sim.nudge(Direction::North, 0.0).is_none());
        assert!(sim.nudge(Direction::East, 1e-6).is_none());
        assert_eq!(sim.location(), Some(&before));
    }

    #[test]
    fn east_at_pole_is_a_no_op() {
        let mut sim = LocationSimulator::starting_at(GeoPoint::new(90.0, 0.0));
        assert!(sim.nudge(Direction::East, DEFAULT_STEP_M).is_none());
        assert_eq!(sim.point().unwrap().latitude, 90.0);
    }

    #[test]
    fn north_past_the_pole_is_a_no_op() {
        let mut sim = LocationSimulator::starting_at(GeoPoint::new(90.0, 10.0));
        let before = sim.location().cloned();
        assert!(sim.nudge(Direction::North, DEFAULT_STEP_M).is_none());
        assert_eq!(sim.location().cloned(), before);

        let mut sim = LocationSimulator::starting_at(GeoPoint::new(-90.0, 10.0));
        assert!(sim.nudge(Direction::South, DEFAULT_STEP_M).is_none());
        assert_eq!(sim.point().unwrap().latitude, -90.0);
    }

    #[test]
    fn clamped_no_op_keeps_preset_key() {
        let mut sim = LocationSimulator::new();
        sim.teleport(&Preset::new("pole", "North Pole", 90.0, 0.0));
        assert!(sim.nudge(Direction::North, DEFAULT_STEP_M).is_none());
        assert_eq!(sim.location().unwrap().preset_key.as_deref(), Some("pole"));

        // Moving away from the pole still works.
        let loc = sim.nudge(Direction::South, DEFAULT_STEP_M).unwrap();
        assert!(loc.point.latitude < 90.0);
    }

    #[test]
    fn no_location_is_a_no_op() {
        let mut sim = LocationSimulator::new();
        assert!(sim.nudge(Direction::North, DEFAULT_STEP_M).is_none());
        assert!(sim.location().is_none());
    }

    #[test]
    fn latitude_clamps_at_pole() {
        let mut sim = LocationSimulator::starting_at(GeoPoint::new(89.99, 0.0));
        let loc = sim.nudge(Direction::North, 10_000.0).unwrap();
        assert_eq!(loc.point.latitude, 90.0);
    }

    #[test]
    fn longitude_wraps_at_antimeridian() {
        let mut sim = LocationSimulator::starting_at(GeoPoint::new(0.0, 179.99));
        let loc = sim.nudge(Direction::East, 5_000.0).unwrap();
        assert!(loc.point.longitude < -179.9 && loc.point.longitude > -180.0);
    }

    #[test]
    fn non_finite_step_is_a_no_op() {
        let mut sim = LocationSimulator::starting_at(GeoPoint::new(0.0, 0.0));
        assert!(sim.nudge(Direction::North, f64::NAN).is_none());
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod direction {
    use super::*;

    #[test]
    fn parses_names_and_initials() {
        assert_eq!("north".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!(" W ".parse::<Direction>().unwrap(), Direction::West);
        assert_eq!("East".parse::<Direction>().unwrap(), Direction::East);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
        }
    }
}

// ── StepDistance ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod step {
    use crate::{DEFAULT_STEP_M, StepDistance};

    #[test]
    fn default_is_two_miles_ish() {
        assert_eq!(StepDistance::default().meters(), DEFAULT_STEP_M);
    }

    #[test]
    fn accepts_quarter_mile_increments() {
        assert!(StepDistance::from_miles(0.25).is_ok());
        assert!(StepDistance::from_miles(2.75).is_ok());
        assert!(StepDistance::from_miles(5.0).is_ok());
        let s = StepDistance::from_miles(1.0).unwrap();
        assert!((s.meters() - 1_609.344).abs() < 1e-9);
    }

    #[test]
    fn rejects_out_of_range_or_off_increment() {
        assert!(StepDistance::from_miles(0.0).is_err());
        assert!(StepDistance::from_miles(5.25).is_err());
        assert!(StepDistance::from_miles(1.1).is_err());
        assert!(StepDistance::from_miles(f64::NAN).is_err());
    }

    #[test]
    fn choices_cover_range() {
        let choices: Vec<StepDistance> = StepDistance::choices().collect();
        assert_eq!(choices.len(), 20);
        assert!((choices[0].miles() - 0.25).abs() < 1e-12);
        assert!((choices[19].miles() - 5.0).abs() < 1e-12);
    }
}

// ── Presets ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod presets {
    use std::io::Cursor;

    use super::*;
    use crate::{DEFAULT_LOCATION_KEY, SimError, load_presets_reader};

    #[test]
    fn default_table_is_valid() {
        let table = PresetTable::default();
        assert!(!table.is_empty());
        assert!(PresetTable::new(table.iter().cloned().collect()).is_ok());
        assert_eq!(
            table.keys().collect::<Vec<_>>(),
            vec![
                "long-beach",
                "shoreline-village",
                "belmont-shore",
                "csulb-campus",
                "signal-hill",
                DEFAULT_LOCATION_KEY,
            ]
        );
        assert_eq!(table.require(DEFAULT_LOCATION_KEY).unwrap().accuracy, Some(15.0));
    }

    #[test]
    fn duplicate_keys_rejected() {
        let result = PresetTable::new(vec![harbor_preset(), harbor_preset()]);
        assert!(matches!(result, Err(SimError::DuplicatePreset(_))));
    }

    #[test]
    fn non_finite_rejected() {
        let result = PresetTable::new(vec![Preset::new("x", "X", f64::NAN, 0.0)]);
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn csv_loader() {
        let csv = "\
key,label,latitude,longitude,accuracy\n\
long_beach,Long Beach,33.7701,-118.1937,10\n\
tokyo,Tokyo,35.6762,139.6503,\n\
";
        let table = load_presets_reader(Cursor::new(csv)).unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["long_beach", "tokyo"]);
        assert_eq!(table.get("long_beach").unwrap().accuracy, Some(10.0));
        assert_eq!(table.get("tokyo").unwrap().accuracy, None);
    }

    #[test]
    fn csv_loader_reports_bad_rows() {
        let csv = "key,label,latitude,longitude,accuracy\nx,X,north,0,\n";
        assert!(matches!(load_presets_reader(Cursor::new(csv)), Err(SimError::Csv(_))));
    }

    #[test]
    fn json_table_validates() {
        let ok: PresetTable = serde_json::from_str(
            r#"[{"key":"a","label":"A","latitude":1,"longitude":2}]"#,
        )
        .unwrap();
        assert_eq!(ok.len(), 1);

        let dup = serde_json::from_str::<PresetTable>(
            r#"[{"key":"a","label":"A","latitude":1,"longitude":2},
                {"key":"a","label":"B","latitude":3,"longitude":4}]"#,
        );
        assert!(dup.is_err());
    }
}
