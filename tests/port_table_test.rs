use maritime_ops::domain::model::PortCategory;
use maritime_ops::{LocalPortTable, MaritimeError, PortRegistry, RouteRequest, RouteService};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn bundled_table() -> LocalPortTable {
    LocalPortTable::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/ports.csv"))
}

#[tokio::test]
async fn test_bundled_csv_matches_builtin_ports() {
    let from_csv = PortRegistry::load(&bundled_table()).await.unwrap();
    let builtin = PortRegistry::builtin();

    assert_eq!(from_csv.len(), builtin.len());
    for (loaded, expected) in from_csv.iter().zip(builtin.iter()) {
        assert_eq!(loaded, expected);
    }
}

#[tokio::test]
async fn test_custom_table_replaces_builtin_ports() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "code,name,country,lat,lon,categories").unwrap();
    writeln!(file, "NOOSL,Oslo,Norway,59.9139,10.7522,container").unwrap();
    writeln!(file, "ISREY,Reykjavik,Iceland,64.1466,-21.9426,").unwrap();

    let registry = PortRegistry::load(&LocalPortTable::new(file.path())).await.unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.get("SGSIN").is_err());
    assert_eq!(registry.by_category(PortCategory::Container).len(), 1);

    let service = RouteService::new(Arc::new(registry), Default::default()).unwrap();
    let response = service.handle(&RouteRequest::new("NOOSL", "ISREY"));
    assert!(!response.is_error());
}

#[tokio::test]
async fn test_missing_table_is_io_error() {
    let result = PortRegistry::load(&LocalPortTable::new("/nonexistent/ports.csv")).await;
    assert!(matches!(result, Err(MaritimeError::IoError(_))));
}

#[test]
fn test_malformed_rows_are_rejected() {
    let not_a_number = "code,name,country,lat,lon\nAAAAA,A,X,north,1\n";
    assert!(matches!(
        PortRegistry::from_csv(not_a_number.as_bytes()),
        Err(MaritimeError::CsvError(_))
    ));

    let bad_category = "code,name,country,lat,lon,categories\nAAAAA,A,X,1,1,ferry\n";
    assert!(matches!(
        PortRegistry::from_csv(bad_category.as_bytes()),
        Err(MaritimeError::PortTableError { .. })
    ));
}

#[test]
fn test_blocking_load_from_sync_context() {
    let registry = tokio_test::block_on(PortRegistry::load(&bundled_table())).unwrap();
    assert!(registry.resolve("Vizag").is_err());
    assert_eq!(registry.resolve("Vishakapatnam").unwrap().code, "INVIZ");
}
