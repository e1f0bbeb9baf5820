//! End-to-end tests: tessera-core workflows running against SQLite.

use tessera_core::barcode::allocate_barcode;
use tessera_core::batch::{create_variants, BatchOptions, VariantBatchRequest, VariantOutcome};
use tessera_core::checksum::is_valid_ean13;
use tessera_core::presets::get_size_presets;
use tessera_core::{NewVariantItem, SizePreset};
use tessera_db::{seed_defaults, Database, DbConfig};

async fn database() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

fn request(sizes: &str) -> VariantBatchRequest {
    VariantBatchRequest {
        base_code: "AB-12".into(),
        item_group: "Shoes".into(),
        brand: Some("Nike".into()),
        color: "Navy Blue".into(),
        sizes: sizes.into(),
    }
}

#[tokio::test]
async fn test_batch_persists_items_and_attribute_values() {
    let db = database().await;

    let result = create_variants(&db, &request("S, M/L"), &BatchOptions::default())
        .await
        .unwrap();

    assert_eq!(result.count, 2);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(
        result.item_codes(),
        vec!["AB-12-NAVY-BLUE-S", "AB-12-NAVY-BLUE-M-L"]
    );

    let stored = db.items().get_by_code("AB-12-NAVY-BLUE-M-L").await.unwrap().unwrap();
    assert_eq!(stored.item_name, "Shoes Nike, AB-12, Navy Blue, M/L");
    assert_eq!(stored.stock_uom, "Nos");
    let barcode = stored.barcode.unwrap().barcode;
    assert!(is_valid_ean13(&barcode));
    assert!(barcode.starts_with("200"));

    let colors = db.attributes().values("Color").await.unwrap().unwrap();
    assert_eq!(colors.len(), 1);
    assert_eq!(colors[0].abbreviation, "NAV");

    let sizes = db.attributes().values("Size").await.unwrap().unwrap();
    let abbrs: Vec<_> = sizes.iter().map(|v| v.abbreviation.as_str()).collect();
    assert_eq!(abbrs, vec!["S", "M/L"]);
}

#[tokio::test]
async fn test_batch_rerun_creates_nothing() {
    let db = database().await;

    let first = create_variants(&db, &request("36, 38, 40"), &BatchOptions::default())
        .await
        .unwrap();
    let second = create_variants(&db, &request("36, 38, 40"), &BatchOptions::default())
        .await
        .unwrap();

    assert_eq!(first.item_codes(), second.item_codes());
    assert!(second
        .items
        .iter()
        .all(|i| i.outcome == VariantOutcome::Existing));
    assert_eq!(db.items().count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_batch_skips_barcodes_already_taken() {
    let db = database().await;

    // A supplier item already holds the barcode the counter would pick next
    db.items()
        .insert(&NewVariantItem {
            item_code: "SUPPLIER-1".into(),
            item_name: "Supplier item".into(),
            item_group: "Shoes".into(),
            brand: None,
            stock_uom: "Nos".into(),
            is_stock_item: true,
            barcode: allocate_barcode(2).unwrap(),
        })
        .await
        .unwrap();

    let result = create_variants(&db, &request("S, M"), &BatchOptions::default())
        .await
        .unwrap();

    let barcodes: Vec<_> = result
        .items
        .iter()
        .map(|i| i.item.barcode.clone().unwrap().barcode)
        .collect();
    assert_eq!(
        barcodes,
        vec![
            allocate_barcode(3).unwrap().digits().to_string(),
            allocate_barcode(4).unwrap().digits().to_string(),
        ]
    );
}

#[tokio::test]
async fn test_batch_uses_localized_uom_once_seeded() {
    let db = database().await;
    let options = BatchOptions::default();
    seed_defaults(&db, &options.stock_uom_candidates).await.unwrap();

    let result = create_variants(&db, &request("XL"), &options).await.unwrap();
    assert_eq!(result.items[0].item.stock_uom, "шт");
}

#[tokio::test]
async fn test_presets_fall_back_until_stored() {
    let db = database().await;

    let list = get_size_presets(&db, Some("Nike")).await.unwrap();
    assert_eq!(list.presets.len(), 3);
    assert_eq!(list.default.as_deref(), Some("Turkey (36-42)"));

    db.presets()
        .save(&SizePreset::new("Nike EU", "40, 41, 42").for_brand("Nike", true))
        .await
        .unwrap();
    db.presets()
        .save(&SizePreset::new("Kids", "104, 110"))
        .await
        .unwrap();

    let list = get_size_presets(&db, Some("Nike")).await.unwrap();
    let names: Vec<_> = list.presets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Nike EU", "Kids"]);
    assert_eq!(list.default.as_deref(), Some("Nike EU"));

    let list = get_size_presets(&db, Some("Adidas")).await.unwrap();
    assert_eq!(list.default, None);
}
