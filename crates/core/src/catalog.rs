use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::models::Size;
use crate::random::ChoiceSource;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog must contain at least one pizza")]
    NoOfferings,

    #[error("catalog must contain at least one offer")]
    NoOffers,

    #[error("pizza {0:?} has no sizes")]
    NoSizes(String),

    #[error("pizza {name:?} lists size {size} more than once")]
    DuplicateSize { name: String, size: Size },

    #[error("pizza name {0:?} is used more than once")]
    DuplicateName(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricedSize {
    pub size: Size,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PizzaOffering {
    pub name: String,
    pub sizes: Vec<PricedSize>,
    pub vegetarian: bool,
}

impl PizzaOffering {
    pub fn new(name: impl Into<String>, sizes: &[(Size, u32)]) -> Self {
        Self {
            name: name.into(),
            sizes: sizes
                .iter()
                .map(|(size, price)| PricedSize {
                    size: *size,
                    price: *price,
                })
                .collect(),
            vegetarian: false,
        }
    }

    pub fn vegetarian(mut self) -> Self {
        self.vegetarian = true;
        self
    }

    pub fn sizes(&self) -> impl Iterator<Item = Size> + '_ {
        self.sizes.iter().map(|entry| entry.size)
    }

    pub fn prices(&self) -> impl Iterator<Item = u32> + '_ {
        self.sizes.iter().map(|entry| entry.price)
    }

    /// Price of the first listed size.
    pub fn starting_price(&self) -> u32 {
        self.sizes.first().map(|entry| entry.price).unwrap_or_default()
    }

    pub fn size_list(&self) -> String {
        self.sizes()
            .map(Size::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The menu and running promotions. Built once at startup and shared
/// read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    offerings: Vec<PizzaOffering>,
    offers: Vec<String>,
}

impl Catalog {
    pub fn new(offerings: Vec<PizzaOffering>, offers: Vec<String>) -> Result<Self, CatalogError> {
        if offerings.is_empty() {
            return Err(CatalogError::NoOfferings);
        }
        if offers.is_empty() {
            return Err(CatalogError::NoOffers);
        }

        let mut names = HashSet::new();
        for offering in &offerings {
            if offering.sizes.is_empty() {
                return Err(CatalogError::NoSizes(offering.name.clone()));
            }

            let mut seen = HashSet::new();
            for size in offering.sizes() {
                if !seen.insert(size) {
                    return Err(CatalogError::DuplicateSize {
                        name: offering.name.clone(),
                        size,
                    });
                }
            }

            if !names.insert(offering.name.to_lowercase()) {
                return Err(CatalogError::DuplicateName(offering.name.clone()));
            }
        }

        Ok(Self { offerings, offers })
    }

    pub fn default_menu() -> Self {
        use Size::{Large, Medium, Small};

        Self {
            offerings: vec![
                PizzaOffering::new("Margherita", &[(Small, 8), (Medium, 12), (Large, 16)]),
                PizzaOffering::new("Pepperoni", &[(Small, 9), (Medium, 13), (Large, 17)]),
                PizzaOffering::new("Veggie", &[(Small, 8), (Medium, 12), (Large, 16)]).vegetarian(),
                PizzaOffering::new("BBQ Chicken", &[(Medium, 14), (Large, 18)]),
                PizzaOffering::new("Hawaiian", &[(Medium, 14), (Large, 18)]),
            ],
            offers: vec![
                "Buy one Margherita pizza and get a second for 50% off!".to_string(),
                "Get a free drink with any large pizza order!".to_string(),
                "Order two medium pizzas and save $5!".to_string(),
            ],
        }
    }

    pub fn offerings(&self) -> &[PizzaOffering] {
        &self.offerings
    }

    pub fn offers(&self) -> &[String] {
        &self.offers
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.offerings
            .iter()
            .map(|offering| offering.name.as_str())
            .collect()
    }

    pub fn name_list(&self) -> String {
        self.list_names().join(", ")
    }

    pub fn find_by_name(&self, name: &str) -> Option<&PizzaOffering> {
        let wanted = name.to_lowercase();
        self.offerings
            .iter()
            .find(|offering| offering.name.to_lowercase() == wanted)
    }

    pub fn vegetarian_pick(&self) -> Option<&PizzaOffering> {
        self.offerings.iter().find(|offering| offering.vegetarian)
    }

    pub fn describe_details(&self, offering: &PizzaOffering) -> String {
        let prices = offering
            .sizes
            .iter()
            .map(|entry| format!("{}: ${}", entry.size, entry.price))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Our {} pizza is available in sizes: {}. Prices are: {}.",
            offering.name,
            offering.size_list(),
            prices
        )
    }

    pub fn random_offering(&self, source: &dyn ChoiceSource) -> &PizzaOffering {
        &self.offerings[source.pick_index(self.offerings.len()) % self.offerings.len()]
    }

    pub fn random_offer(&self, source: &dyn ChoiceSource) -> &str {
        &self.offers[source.pick_index(self.offers.len()) % self.offers.len()]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_menu()
    }
}
