//! Product lookup collaborator.
//!
//! Given a barcode or a free-text name, a lookup returns at most one
//! candidate used to pre-fill the add form. The result is never trusted
//! as authoritative and never written to the store without an explicit
//! `add` from the user. The shipped implementation is an offline catalog;
//! a real HTTP search would implement the same trait.

use crate::errors::AppResult;

/// A single product candidate. Every field is a guess.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub pieces: Option<i64>,
    pub year: Option<i32>,
    pub description: Option<String>,
}

pub trait ProductLookup {
    /// Zero or one candidate for a scanned barcode.
    fn by_barcode(&self, barcode: &str) -> AppResult<Option<ProductInfo>>;

    /// Zero or one candidate for a free-text name query.
    fn by_name(&self, query: &str) -> AppResult<Option<ProductInfo>>;
}

struct CatalogEntry {
    barcode: &'static str,
    name: &'static str,
    brand: &'static str,
    pieces: i64,
    year: i32,
    description: &'static str,
}

// The mock set the camera simulator scans against.
const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        barcode: "9780747532743",
        name: "Hogwarts Castle",
        brand: "Ravensburger",
        pieces: 1000,
        year: 2019,
        description: "Harry Potter Hogwarts Castle jigsaw puzzle",
    },
    CatalogEntry {
        barcode: "0673419319881",
        name: "World Map",
        brand: "LEGO",
        pieces: 500,
        year: 2021,
        description: "LEGO Art world map puzzle",
    },
    CatalogEntry {
        barcode: "4005556152759",
        name: "Neuschwanstein Castle",
        brand: "Ravensburger",
        pieces: 1500,
        year: 2017,
        description: "Neuschwanstein Castle in autumn",
    },
    CatalogEntry {
        barcode: "0021081406017",
        name: "Starry Night",
        brand: "Buffalo Games",
        pieces: 2000,
        year: 2015,
        description: "Van Gogh's The Starry Night",
    },
];

/// Offline lookup over the built-in catalog.
#[derive(Debug, Default)]
pub struct CatalogLookup;

impl CatalogLookup {
    fn to_info(entry: &CatalogEntry) -> ProductInfo {
        ProductInfo {
            name: Some(entry.name.to_string()),
            brand: Some(entry.brand.to_string()),
            pieces: Some(entry.pieces),
            year: Some(entry.year),
            description: Some(entry.description.to_string()),
        }
    }
}

impl ProductLookup for CatalogLookup {
    fn by_barcode(&self, barcode: &str) -> AppResult<Option<ProductInfo>> {
        Ok(CATALOG
            .iter()
            .find(|entry| entry.barcode == barcode.trim())
            .map(Self::to_info))
    }

    fn by_name(&self, query: &str) -> AppResult<Option<ProductInfo>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        Ok(CATALOG
            .iter()
            .find(|entry| entry.name.to_lowercase().contains(&needle))
            .map(Self::to_info))
    }
}
