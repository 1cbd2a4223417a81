//! Many tasks sharing one catalog.

use std::collections::HashSet;
use std::sync::Arc;

use vitrine_catalog::{CatalogConfig, DigitalListing, ItemUpdate, PhysicalListing, PricingService};
use vitrine_core::{Item, ItemKind, Money};

const TASKS: usize = 8;
const PER_TASK: usize = 25;

fn ebook(task: usize, n: usize) -> DigitalListing {
    DigitalListing {
        name: format!("E-Book {task}-{n}"),
        description: None,
        price: 1_000.0,
        quantity: 10,
        download_size_mb: 5.0,
        category: Some("Books".to_string()),
        license_key: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registration_hands_out_unique_ids() {
    let service = Arc::new(PricingService::new(CatalogConfig::default()));
    service.categories().create("Books", "").unwrap();

    let mut handles = Vec::new();
    for task in 0..TASKS {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for n in 0..PER_TASK {
                let item = service.register_digital(&ebook(task, n)).unwrap();
                ids.push(item.id().to_string());
            }
            ids
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.await.unwrap() {
            assert!(seen.insert(id), "duplicate id handed out");
        }
    }

    assert_eq!(seen.len(), TASKS * PER_TASK);
    assert_eq!(service.items().len(), TASKS * PER_TASK);
    let books = service.categories().by_name("books").unwrap();
    assert_eq!(books.len(), TASKS * PER_TASK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn quotes_stay_consistent_during_price_updates() {
    let service = Arc::new(PricingService::default());
    let id = service
        .items()
        .insert(Item::builder(ItemKind::Generic).name("Mug").price(100.0))
        .unwrap();

    let writer = {
        let service = Arc::clone(&service);
        let id = id.clone();
        tokio::spawn(async move {
            for round in 0..200 {
                let price = if round % 2 == 0 { 200.0 } else { 100.0 };
                let update = ItemUpdate {
                    price: Some(price),
                    ..ItemUpdate::default()
                };
                assert!(service.update_item(&id, &update).unwrap().is_clean());
                tokio::task::yield_now().await;
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..TASKS {
        let service = Arc::clone(&service);
        let id = id.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                // every observed total belongs to one whole price, never a mix
                let total = service.quote(&id, 3, Some("percentage-10"), None);
                assert!(
                    total.approx_eq(Money::new(270.0), 1e-9)
                        || total.approx_eq(Money::new(540.0), 1e-9),
                    "torn quote: {}",
                    total.amount()
                );
                tokio::task::yield_now().await;
            }
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn category_moves_keep_both_sides_in_step() {
    let service = Arc::new(PricingService::default());
    let left = service.categories().create("Left", "").unwrap().id();
    let right = service.categories().create("Right", "").unwrap().id();

    let mut ids = Vec::new();
    for n in 0..20 {
        let item = service
            .register_physical(&PhysicalListing {
                name: format!("Box {n}"),
                description: None,
                price: 500.0,
                quantity: 1,
                weight_kg: 1.0,
                dimensions: None,
                category: Some("Left".to_string()),
                shipping: None,
            })
            .unwrap();
        ids.push(item.id().to_string());
    }

    let mut handles = Vec::new();
    for (n, id) in ids.iter().cloned().enumerate() {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            for round in 0..10 {
                let target = if (n + round) % 2 == 0 { right } else { left };
                // moving into the current category is rejected, anything else succeeds
                let _ = service.categories().add_item(service.items(), target, &id);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let left_members = service.categories().get(left).unwrap();
    let right_members = service.categories().get(right).unwrap();
    assert_eq!(left_members.len() + right_members.len(), ids.len());

    for id in &ids {
        let item = service.items().get(id).unwrap();
        let owner = item.category_id().unwrap();
        let (owner_members, other_members) = if owner == left {
            (&left_members, &right_members)
        } else {
            (&right_members, &left_members)
        };
        assert!(owner_members.contains(id));
        assert!(!other_members.contains(id));
    }
}
