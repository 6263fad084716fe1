//! Tests for the SQLite repository against fixture databases.

mod support;

use rusqlite::Connection;
use support::{create_spoc_db, Fixture, SpocRow, SPOC_SCHEMA};
use tess_dv_fast::db::{RepositoryError, SqliteRepository, TceRepository};
use tess_dv_fast::models::{DetectionRecord, PlanetNum, ProductKind, TicId};

#[tokio::test]
async fn test_fetch_spoc_tces() {
    let fixture = Fixture::standard();
    let repo = SqliteRepository::new(fixture.config.clone());

    let tces = repo.fetch_spoc_tces(TicId(33979459)).await.unwrap();
    assert_eq!(tces.len(), 3);
    assert!(tces.iter().all(|t| t.tic_id == TicId(33979459)));

    let first = tces
        .iter()
        .find(|t| t.exomast_id == "TIC33979459S0061S0061TCE1")
        .unwrap();
    assert_eq!(first.measurements.period, Some(6.267901));
    assert_eq!(first.measurements.impact, Some(0.12));
    let oot = first.measurements.oot_offset.unwrap();
    assert!(oot.is_not_applicable());
    assert!(!first.measurements.stellar_radius_is_solar);
    assert!(first
        .product_filename(ProductKind::Dvs)
        .unwrap()
        .ends_with("-01-00239_dvs.pdf"));
}

#[tokio::test]
async fn test_fetch_tess_spoc_tces() {
    let fixture = Fixture::standard();
    let repo = SqliteRepository::new(fixture.config.clone());

    let tces = repo.fetch_tess_spoc_tces(TicId(33979459)).await.unwrap();
    assert_eq!(tces.len(), 2);
    let multi = tces.iter().find(|t| t.sector_span() == 14).unwrap();
    assert_eq!(multi.id(), "TIC33979459S0056S0069TCE1_f");
    assert_eq!(multi.planet_num(), PlanetNum(1));
    assert_eq!(
        multi.product_filename(ProductKind::Dvm),
        "hlsp_tess-spoc_tess_phot_0000000033979459-s0056-s0069_tess_v1_dvm.pdf"
    );
}

#[tokio::test]
async fn test_no_matching_rows_is_empty() {
    let fixture = Fixture::standard();
    let repo = SqliteRepository::new(fixture.config.clone());

    assert!(repo.fetch_spoc_tces(TicId(42)).await.unwrap().is_empty());
    assert!(repo.fetch_tess_spoc_tces(TicId(42)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_database_is_unavailable() {
    let fixture = Fixture::empty();
    let repo = SqliteRepository::new(fixture.config.clone());

    let err = repo.fetch_spoc_tces(TicId(1)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Unavailable { .. }), "{err}");
    assert!(err.to_string().contains("tess_tcestats.db"));
    assert_eq!(
        err.context().operation.as_deref(),
        Some("fetch_spoc_tces")
    );

    // Opening read-only never creates the file.
    assert!(!fixture.config.spoc_db_path().exists());
}

#[tokio::test]
async fn test_wrong_type_is_corrupt_record() {
    let fixture = Fixture::empty();
    let conn = Connection::open(fixture.config.spoc_db_path()).unwrap();
    conn.execute(SPOC_SCHEMA, []).unwrap();
    conn.execute(
        "INSERT INTO tess_tcestats (ticid, exomast_id, sectors, tce_plnt_num) \
         VALUES (5, 'TIC5S0001S0001TCE1', 's0001-s0001', 'one')",
        [],
    )
    .unwrap();
    drop(conn);

    let repo = SqliteRepository::new(fixture.config.clone());
    let err = repo.fetch_spoc_tces(TicId(5)).await.unwrap_err();
    assert!(err.is_corrupt_record(), "{err}");
}

#[tokio::test]
async fn test_missing_column_is_corrupt_record() {
    let fixture = Fixture::empty();
    let conn = Connection::open(fixture.config.tess_spoc_db_path()).unwrap();
    conn.execute("CREATE TABLE tess_spoc_tcestats (ticid INTEGER, sectors TEXT)", [])
        .unwrap();
    drop(conn);

    let repo = SqliteRepository::new(fixture.config.clone());
    let err = repo.fetch_tess_spoc_tces(TicId(5)).await.unwrap_err();
    assert!(err.is_corrupt_record(), "{err}");
}

#[tokio::test]
async fn test_null_measurements_are_kept_as_none() {
    let fixture = Fixture::empty();
    let mut row = SpocRow::new(7, "s0001-s0001", 1);
    row.period = None;
    row.depth_ppm = None;
    row.solar_radius = true;
    create_spoc_db(&fixture.config.spoc_db_path(), &[row]);

    let repo = SqliteRepository::new(fixture.config.clone());
    let tces = repo.fetch_spoc_tces(TicId(7)).await.unwrap();
    assert_eq!(tces[0].measurements.period, None);
    assert_eq!(tces[0].measurements.depth_ppm, None);
    assert!(tces[0].measurements.stellar_radius_is_solar);
}

#[tokio::test]
async fn test_health_check() {
    let fixture = Fixture::empty();
    create_spoc_db(&fixture.config.spoc_db_path(), &[]);

    let repo = SqliteRepository::new(fixture.config.clone());
    assert_eq!(repo.health_check().await.unwrap(), (true, false));
}
