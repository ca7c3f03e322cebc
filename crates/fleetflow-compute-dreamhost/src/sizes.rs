//! Fixed private-server size catalog
//!
//! DreamHost has no size listing command. Private servers take any memory
//! allocation between [`MIN_MEMORY_MB`] and [`MAX_MEMORY_MB`]; the catalog
//! names the common points of that range. Disk and bandwidth are not
//! reported.

use crate::api::PROVIDER;
use fleetflow_compute::NodeSize;

pub const MIN_MEMORY_MB: u64 = 300;
pub const MAX_MEMORY_MB: u64 = 4000;

struct SizeSpec {
    id: &'static str,
    name: &'static str,
    ram: u64,
    price: f64,
}

const CATALOG: &[SizeSpec] = &[
    SizeSpec {
        id: "default",
        name: "Default DH PS size",
        ram: 2300,
        price: 115.0,
    },
    SizeSpec {
        id: "minimum",
        name: "Minimum DH PS size",
        ram: MIN_MEMORY_MB,
        price: 15.0,
    },
    SizeSpec {
        id: "low",
        name: "DH PS with 1GB RAM",
        ram: 1000,
        price: 50.0,
    },
    SizeSpec {
        id: "high",
        name: "DH PS with 3GB RAM",
        ram: 3000,
        price: 150.0,
    },
    SizeSpec {
        id: "maximum",
        name: "Maximum DH PS size",
        ram: MAX_MEMORY_MB,
        price: 200.0,
    },
];

/// Catalog in a stable order, `default` first
pub fn catalog() -> Vec<NodeSize> {
    CATALOG
        .iter()
        .map(|spec| NodeSize {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            ram: Some(spec.ram),
            disk: None,
            bandwidth: None,
            price: spec.price,
            provider: PROVIDER.to_string(),
        })
        .collect()
}

/// Whether a memory allocation can be applied to a private server
pub fn is_valid_memory(memory_mb: u64) -> bool {
    (MIN_MEMORY_MB..=MAX_MEMORY_MB).contains(&memory_mb)
}
