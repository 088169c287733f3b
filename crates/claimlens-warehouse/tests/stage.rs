mod common;

use claimlens_warehouse::error::WarehouseError;
use claimlens_warehouse::stage::{fetch_stage_file, list_stage_files};
use common::{table, FakeWarehouse};

const STAGE: &str = "INS_CO.LOSS_CLAIMS.LOSS_EVIDENCE";

#[tokio::test]
async fn listing_returns_sorted_base_names() {
    let db = FakeWarehouse::new().on(
        "LS @INS_CO.LOSS_CLAIMS.LOSS_EVIDENCE",
        table(
            &["name", "size"],
            &[
                &[Some("loss_evidence/roof.jpg"), Some("10")],
                &[Some("loss_evidence/photos/basement.png"), Some("20")],
            ],
        ),
    );

    let files = list_stage_files(&db, STAGE).await.unwrap();
    assert_eq!(files, vec!["basement.png", "roof.jpg"]);
}

#[tokio::test]
async fn empty_stage_lists_nothing() {
    let db = FakeWarehouse::new().on("LS @", table(&["name"], &[]));
    assert!(list_stage_files(&db, STAGE).await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_stage_name_is_rejected_before_execution() {
    let db = FakeWarehouse::new();
    let err = list_stage_files(&db, "STAGE; DROP TABLE CLAIMS").await.unwrap_err();
    assert!(matches!(err, WarehouseError::Core(_)));
    assert_eq!(db.call_count(), 0);
}

#[tokio::test]
async fn fetch_downloads_through_presigned_url() {
    let db = FakeWarehouse::new()
        .on(
            "GET_PRESIGNED_URL",
            table(&["URL"], &[&[Some("https://files.example/roof.jpg?sig=1")]]),
        )
        .with_download("https://files.example/roof.jpg?sig=1", b"\xff\xd8jpeg");

    let asset = fetch_stage_file(&db, STAGE, "roof.jpg").await.unwrap();
    assert_eq!(asset.file_name, "roof.jpg");
    assert_eq!(asset.bytes, b"\xff\xd8jpeg");
    assert_eq!(asset.content_type(), "image/jpeg");
}

#[tokio::test]
async fn failed_download_yields_error_not_partial_bytes() {
    let db = FakeWarehouse::new().on(
        "GET_PRESIGNED_URL",
        table(&["URL"], &[&[Some("https://files.example/missing.jpg")]]),
    );

    let err = fetch_stage_file(&db, STAGE, "missing.jpg").await.unwrap_err();
    assert!(matches!(err, WarehouseError::NotFound { .. }));
}

#[tokio::test]
async fn path_traversal_is_rejected() {
    let db = FakeWarehouse::new();
    assert!(fetch_stage_file(&db, STAGE, "../secrets.txt").await.is_err());
    assert_eq!(db.call_count(), 0);
}
