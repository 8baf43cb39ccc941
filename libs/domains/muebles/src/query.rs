//! List filters and ordering.
//!
//! The rules are evaluated in order and later rules override earlier ones:
//!
//! | query                          | filter                      | order          |
//! |--------------------------------|-----------------------------|----------------|
//! | nothing                        | none                        | natural        |
//! | `precio_gte` + `precio_lte`    | `min <= precio <= max`      | precio desc    |
//! | `precio_lte` only              | `precio <= max`             | precio desc    |
//! | `precio_gte` only              | `precio >= min`             | natural        |
//! | `categoria`                    | `categoria == c`            | nombre asc     |
//!
//! A category combined with a price bound keeps both filters and sorts by name.

use std::cmp::Ordering;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{MuebleError, MuebleResult};
use crate::models::Mueble;

/// Raw query string of `GET /muebles`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Exact category match
    #[serde(rename = "categoria", alias = "category")]
    pub category: Option<String>,
    /// Inclusive lower price bound
    pub precio_gte: Option<String>,
    /// Inclusive upper price bound
    pub precio_lte: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceRange {
    Between { min: f64, max: f64 },
    AtMost(f64),
    AtLeast(f64),
}

impl PriceRange {
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        match (min, max) {
            (Some(min), Some(max)) => Some(PriceRange::Between { min, max }),
            (None, Some(max)) => Some(PriceRange::AtMost(max)),
            (Some(min), None) => Some(PriceRange::AtLeast(min)),
            (None, None) => None,
        }
    }

    pub fn min(&self) -> Option<f64> {
        match self {
            PriceRange::Between { min, .. } | PriceRange::AtLeast(min) => Some(*min),
            PriceRange::AtMost(_) => None,
        }
    }

    pub fn max(&self) -> Option<f64> {
        match self {
            PriceRange::Between { max, .. } | PriceRange::AtMost(max) => Some(*max),
            PriceRange::AtLeast(_) => None,
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min().is_none_or(|min| price >= min) && self.max().is_none_or(|max| price <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceDescending,
    NameAscending,
}

impl SortOrder {
    pub fn compare(&self, a: &Mueble, b: &Mueble) -> Ordering {
        match self {
            SortOrder::PriceDescending => b.price.total_cmp(&a.price),
            SortOrder::NameAscending => a.name.cmp(&b.name),
        }
    }
}

/// Parsed, storage-independent list query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MuebleQuery {
    pub category: Option<String>,
    pub price: Option<PriceRange>,
}

impl MuebleQuery {
    pub fn new(category: Option<String>, price_gte: Option<f64>, price_lte: Option<f64>) -> Self {
        Self {
            category,
            price: PriceRange::from_bounds(price_gte, price_lte),
        }
    }

    /// Matches every document, in natural order
    pub fn all() -> Self {
        Self::default()
    }

    /// Empty values count as absent; unparsable prices are rejected.
    pub fn from_params(params: ListParams) -> MuebleResult<Self> {
        let price_gte = parse_price("precio_gte", params.precio_gte)?;
        let price_lte = parse_price("precio_lte", params.precio_lte)?;
        let category = params.category.filter(|c| !c.is_empty());

        Ok(Self::new(category, price_gte, price_lte))
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.price.is_none()
    }

    pub fn sort(&self) -> Option<SortOrder> {
        if self.category.is_some() {
            return Some(SortOrder::NameAscending);
        }
        self.price
            .and_then(|range| range.max())
            .map(|_| SortOrder::PriceDescending)
    }

    pub fn matches(&self, mueble: &Mueble) -> bool {
        self.category
            .as_ref()
            .is_none_or(|category| &mueble.category == category)
            && self.price.is_none_or(|range| range.contains(mueble.price))
    }

    /// Filter and order an in-memory slice the way the database would.
    pub fn apply<'a>(&self, muebles: impl IntoIterator<Item = &'a Mueble>) -> Vec<Mueble> {
        let mut selected: Vec<Mueble> = muebles
            .into_iter()
            .filter(|m| self.matches(m))
            .cloned()
            .collect();

        if let Some(order) = self.sort() {
            // stable, so equal keys keep natural order
            selected.sort_by(|a, b| order.compare(a, b));
        }
        selected
    }
}

fn parse_price(param: &'static str, raw: Option<String>) -> MuebleResult<Option<f64>> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(MuebleError::InvalidNumber { param, value: raw }),
    }
}
