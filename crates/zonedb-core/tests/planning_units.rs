use std::path::{Path, PathBuf};
use zonedb_core::{
    error::{ErrorClass, ErrorOrigin},
    obs::{DropReason, FileKind},
    prelude::*,
    pu::PuFiles,
};

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn costs() -> Costs {
    Costs::from_path(&data("costs_test1.dat")).unwrap()
}

fn files() -> PuFiles {
    PuFiles {
        pu: data("pu_test1.dat"),
        ..PuFiles::default()
    }
}

fn indices(units: &PlanningUnits) -> [usize; 5] {
    [2, 5, 10, 11, 8].map(|id| units.lookup_index(PuId(id)).unwrap())
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn pu_file_parsing_without_optional_files() {
    let units = PlanningUnits::from_files(&files(), &costs()).unwrap();

    assert_eq!(units.puno(), 5);
    assert_eq!(units.lookup_index(PuId(1)), None);

    let costs: Vec<f64> = units.units().iter().map(PlanningUnit::cost).collect();
    assert_eq!(costs, vec![7.0, 67.0, 667.0, 3.0, 3.0]);

    assert_eq!(units.units()[0].cost_breakdown(), [5.0, 1.0, 1.0]);
    assert_eq!(units.units()[1].cost_breakdown(), [55.0, 1.0, 11.0]);
    assert_eq!(units.units()[2].cost_breakdown(), [555.0, 1.0, 111.0]);
    assert_eq!(units.units()[3].cost_breakdown(), [1.0, 1.0, 1.0]);
    assert_eq!(units.units()[4].cost_breakdown(), [1.0, 1.0, 1.0]);

    assert!(!units.connections_entered());
    for index in indices(&units) {
        assert_eq!(units.connection_cost1(index), 0.0);
    }
}

#[test]
fn lock_and_zone_file_parsing() {
    let files = PuFiles {
        lock: Some(data("pulock_test1.dat")),
        zone: Some(data("puzone_test1.dat")),
        ..files()
    };
    let units = PlanningUnits::from_files(&files, &costs()).unwrap();
    let [i2, i5, i10, i11, i8] = indices(&units);

    assert_eq!(units.lock_count(), 2);
    assert_eq!(units.lock(i2), Some(ZoneId(1)));
    assert_eq!(units.lock(i5), Some(ZoneId(2)));
    assert_eq!(units.lock(i10), None);

    let locked = units.locked_indices();
    assert_eq!(locked.len(), 2);
    assert!(locked.contains(&i2) && locked.contains(&i5));

    let zones: Vec<usize> = [i2, i5, i10, i11, i8]
        .map(|i| units.unit(i).unwrap().num_zones())
        .to_vec();
    assert_eq!(zones, vec![1, 1, 2, 0, 0]);
}

#[test]
fn connection_file_parsing() {
    let files = PuFiles {
        connection: Some(data("connections_test1.dat")),
        ..files()
    };
    let units = PlanningUnits::from_files(&files, &costs()).unwrap();
    let [i2, i5, i10, i11, i8] = indices(&units);
    let graph = units.connectivity();

    assert!(units.connections_entered());
    assert_eq!(graph.connections().len(), 5);

    let nbrno: Vec<usize> = [i2, i5, i10, i11, i8]
        .map(|i| graph.connection(i).unwrap().nbrno())
        .to_vec();
    assert_eq!(nbrno, vec![2, 2, 2, 0, 0]);

    assert!(close(units.connection_cost1(i11), 2.0));
    assert!(close(units.connection_cost1(i2), 100.7));
    assert!(close(units.connection_cost1(i5), 101.4));
    assert!(close(units.connection_cost1(i10), 2.3));
    assert!(close(units.connection_cost1(i8), 0.0));
}

#[test]
fn puvspr_file_parsing() {
    let species = Species::from_path(&data("species_test1.dat")).unwrap();
    let mut units = PlanningUnits::from_files(&files(), &costs()).unwrap();
    units
        .load_sparse_matrix_path(&species, &data("puvspr_test1.dat"))
        .unwrap();

    assert_eq!(units.matrix().len(), 6);

    let [s1, s2, s3] = [1, 2, 3].map(|id| species.lookup_index(SpeciesId(id)).unwrap());
    let totals = units.matrix().species_totals(species.spno());
    assert_eq!(totals.len(), 3);
    assert!(close(totals[s1], 70.5));
    assert!(close(totals[s2], 133.8));
    assert!(close(totals[s3], 212.0));

    let occurrences = units.matrix().occurrence_totals(species.spno());
    assert_eq!(occurrences, vec![2, 2, 2]);

    let report = units.report().file(FileKind::Puvspr);
    assert_eq!(report.dropped_total(), 2);
    assert_eq!(report.dropped(DropReason::UnknownPu), 1);
    assert_eq!(report.dropped(DropReason::UnknownSpecies), 1);
}

#[test]
fn puvspr_point_and_row_queries() {
    let species = Species::from_path(&data("species_test1.dat")).unwrap();
    let mut units = PlanningUnits::from_files(&files(), &costs()).unwrap();
    units
        .load_sparse_matrix_path(&species, &data("puvspr_test1.dat"))
        .unwrap();

    let [i2, i5, i10, i11, i8] = indices(&units);
    let [s1, s2, s3] = [1, 2, 3].map(|id| species.lookup_index(SpeciesId(id)).unwrap());
    let m = units.matrix();

    let richness: Vec<usize> = [i2, i5, i10, i11, i8]
        .map(|i| units.unit(i).unwrap().richness())
        .to_vec();
    assert_eq!(richness, vec![1, 1, 2, 1, 1]);

    assert!(m.entry_index(i2, s1).is_some());
    assert!(m.entry_index(i5, s1).is_none());
    assert!(m.entry_index(i10, s1).is_some());
    assert!(m.entry_index(i10, s2).is_none());
    assert!(m.entry_index(i8, s2).is_some());
    assert!(m.entry_index(i11, s2).is_some());
    assert!(m.entry_index(i5, s3).is_some());
    assert!(m.entry_index(i10, s3).is_some());
    assert!(m.entry_index(i2, s3).is_none());

    assert_eq!(m.amount(i2, s1), 20.0);
    assert_eq!(m.amount(i5, s1), 0.0);
    assert_eq!(m.amount(i10, s1), 50.5);
    assert_eq!(m.amount(i10, s2), 0.0);
    assert_eq!(m.amount(i8, s2), 15.8);
    assert_eq!(m.amount(i11, s2), 118.0);
    assert_eq!(m.amount(i5, s3), 200.0);
    assert_eq!(m.amount(i10, s3), 12.0);
    assert_eq!(m.amount(i2, s3), 0.0);

    let n = species.spno();
    assert_eq!(m.amounts_at(i2, n), vec![20.0, 0.0, 0.0]);
    assert_eq!(m.amounts_at(i5, n), vec![0.0, 0.0, 200.0]);
    assert_eq!(m.amounts_at(i10, n), vec![50.5, 0.0, 12.0]);
    assert_eq!(m.amounts_at(i11, n), vec![0.0, 118.0, 0.0]);
    assert_eq!(m.amounts_at(i8, n), vec![0.0, 15.8, 0.0]);
}

#[test]
fn missing_mandatory_files_are_fatal() {
    let err = Costs::from_path(&data("no_such_costs.dat")).unwrap_err();
    assert_eq!(err.class, ErrorClass::Io);
    assert_eq!(err.origin, ErrorOrigin::Cost);

    let files = PuFiles {
        pu: data("no_such_pu.dat"),
        ..PuFiles::default()
    };
    let err = PlanningUnits::from_files(&files, &costs()).unwrap_err();
    assert_eq!(err.class, ErrorClass::Io);
    assert_eq!(err.origin, ErrorOrigin::PlanningUnit);
}

#[test]
fn malformed_cost_in_pu_file_is_fatal() {
    let files = PuFiles {
        pu: data("pu_badcost.dat"),
        ..PuFiles::default()
    };
    let err = PlanningUnits::from_files(&files, &costs()).unwrap_err();

    assert_eq!(err.class, ErrorClass::Parse);
    assert!(err.message.ends_with(":3: column 'tourism' has invalid value 'abc'"));
}
