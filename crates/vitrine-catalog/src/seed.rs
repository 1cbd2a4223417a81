//! # Sample Catalog
//!
//! Installs a small demo catalog: four categories, ten physical items and
//! five digital ones.
//!
//! ## Generated Items
//! - Physical: `P-1` .. `P-10`, 30 × 20 × 10 cm parcels, standard or free
//!   shipping
//! - Digital: `D-11` .. `D-15`, 100 licenses each, key `LICENSE-<n>`
//!
//! Ids come from the service's listing counter, so they only match the list
//! above on a fresh service.

use tracing::{debug, info};

use crate::error::CatalogResult;
use crate::service::{DigitalListing, PhysicalListing, PricingService};

/// (name, description)
const CATEGORIES: &[(&str, &str)] = &[
    ("Electronics", "Smartphones, laptops, gadgets"),
    ("Software", "Licenses and digital goods"),
    ("Accessories", "Cables, cases, chargers"),
    ("Games", "Video games and gaming gear"),
];

/// (name, price, quantity, weight kg, category, shipping key)
const PHYSICAL: &[(&str, f64, i64, f64, &str, &str)] = &[
    ("iPhone 15 Pro", 499_900.0, 10, 0.187, "Electronics", "standard"),
    ("MacBook Pro 16\"", 999_900.0, 5, 2.14, "Electronics", "standard"),
    ("Samsung Galaxy S24 Ultra", 449_900.0, 15, 0.233, "Electronics", "standard"),
    ("Sony WH-1000XM5", 149_900.0, 20, 0.25, "Accessories", "standard"),
    ("Apple Watch Ultra 2", 349_900.0, 8, 0.061, "Electronics", "standard"),
    ("PlayStation 5 Pro", 349_900.0, 12, 3.2, "Games", "standard"),
    ("Nintendo Switch OLED", 179_900.0, 18, 0.42, "Games", "standard"),
    ("Xbox Elite Controller", 89_900.0, 25, 0.35, "Games", "standard"),
    ("USB-C Hub 7-in-1", 14_900.0, 50, 0.12, "Accessories", "free"),
    ("MagSafe Charger", 19_900.0, 40, 0.05, "Accessories", "free"),
];

/// (name, price, download size MB, category)
const DIGITAL: &[(&str, f64, f64, &str)] = &[
    ("Microsoft Office 365", 39_900.0, 4_096.0, "Software"),
    ("Adobe Creative Cloud", 59_900.0, 25_600.0, "Software"),
    ("Windows 11 Pro", 69_900.0, 5_120.0, "Software"),
    ("Cyberpunk 2077", 24_900.0, 70_000.0, "Games"),
    ("Elden Ring", 29_900.0, 50_000.0, "Games"),
];

const DIGITAL_STOCK: i64 = 100;

/// Installs the sample catalog into `service`, returning the number of items
/// added. Categories that already exist are reused.
pub fn seed_sample_data(service: &PricingService) -> CatalogResult<usize> {
    for (name, description) in CATEGORIES {
        if service.categories().by_name(name).is_none() {
            service.categories().create(name, description)?;
        } else {
            debug!(category = %name, "Sample category already present");
        }
    }

    let mut added = 0;
    for &(name, price, quantity, weight_kg, category, shipping) in PHYSICAL {
        service.register_physical(&PhysicalListing {
            name: name.to_string(),
            description: None,
            price,
            quantity,
            weight_kg,
            dimensions: None,
            category: Some(category.to_string()),
            shipping: Some(shipping.to_string()),
        })?;
        added += 1;
    }

    for &(name, price, download_size_mb, category) in DIGITAL {
        service.register_digital(&DigitalListing {
            name: name.to_string(),
            description: None,
            price,
            quantity: DIGITAL_STOCK,
            download_size_mb,
            category: Some(category.to_string()),
            license_key: None,
        })?;
        added += 1;
    }

    info!(items = added, categories = CATEGORIES.len(), "Sample data seeded");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use vitrine_core::{ConstructionMode, Money};

    #[test]
    fn test_seed_layout() {
        let service = PricingService::default();
        assert_eq!(seed_sample_data(&service).unwrap(), 15);

        assert_eq!(service.categories().len(), 4);
        assert_eq!(service.items().len(), 15);
        assert_eq!(service.items().get("P-1").unwrap().name(), "iPhone 15 Pro");
        assert_eq!(service.items().get("D-15").unwrap().name(), "Elden Ring");

        let games = service
            .items()
            .find_by_category_name(service.categories(), "games");
        assert_eq!(games.len(), 5);
    }

    #[test]
    fn test_seed_is_valid_in_strict_mode() {
        let service = PricingService::bootstrap(CatalogConfig {
            construction_mode: ConstructionMode::Strict,
            seed_sample_data: true,
            ..CatalogConfig::default()
        })
        .unwrap();
        assert_eq!(service.items().len(), 15);
    }

    #[test]
    fn test_seed_twice_reuses_categories() {
        let service = PricingService::default();
        seed_sample_data(&service).unwrap();
        seed_sample_data(&service).unwrap();
        assert_eq!(service.categories().len(), 4);
        assert_eq!(service.items().len(), 30);
    }

    #[test]
    fn test_free_shipping_on_light_accessories() {
        let service = PricingService::default();
        seed_sample_data(&service).unwrap();
        assert_eq!(service.shipping_estimate("P-9"), Some(Money::zero()));
        assert_eq!(service.shipping_estimate("D-11"), None);
    }
}
