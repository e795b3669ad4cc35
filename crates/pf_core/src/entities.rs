//! Input entities: pets, products, and purchase lines.
//!
//! These are owned by external collaborators (pet profile store, catalog,
//! cart). The engine only reads them; every accessor below is a pure view
//! that filters out unusable values (absent, zero, negative, non-finite).

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{PetId, ProductId};
use crate::mass;

#[inline]
fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite() && *x > 0.0)
}

/* -------------------------------------------------------------------------- */
/*                                   Species                                   */
/* -------------------------------------------------------------------------- */

/// Species tag. Known species drive the fallback rate table; anything else
/// keeps its original text in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other(String),
}

impl Species {
    /// Case-insensitive; surrounding whitespace ignored.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "dog" => Species::Dog,
            "cat" => Species::Cat,
            "bird" => Species::Bird,
            "rabbit" => Species::Rabbit,
            _ => Species::Other(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Bird => "bird",
            Species::Rabbit => "rabbit",
            Species::Other(s) => s.as_str(),
        }
    }
}

impl FromStr for Species {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Species::parse(s))
    }
}

impl From<String> for Species {
    fn from(s: String) -> Self {
        Species::parse(&s)
    }
}

impl From<Species> for String {
    fn from(s: Species) -> String {
        match s {
            Species::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* -------------------------------------------------------------------------- */
/*                                  Category                                   */
/* -------------------------------------------------------------------------- */

/// Catalog category. Only `Food` takes part in feeding allocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Category {
    Food,
    Other(String),
}

impl Category {
    pub fn parse(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("food") {
            Category::Food
        } else {
            Category::Other(tag.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> String {
        match c {
            Category::Food => "food".to_string(),
            Category::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* -------------------------------------------------------------------------- */
/*                                     Pet                                     */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub species: Species,
    /// Body weight in kilograms.
    #[cfg_attr(feature = "serde", serde(rename = "weight", default, skip_serializing_if = "Option::is_none"))]
    pub weight_kg: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "dailyFoodOverrideGrams", default, skip_serializing_if = "Option::is_none")
    )]
    pub daily_food_override_grams: Option<f64>,
}

impl Pet {
    pub fn new(id: PetId, name: impl Into<String>, species: Species) -> Self {
        Pet {
            id,
            name: name.into(),
            species,
            weight_kg: None,
            daily_food_override_grams: None,
        }
    }

    pub fn with_weight(mut self, kg: f64) -> Self {
        self.weight_kg = Some(kg);
        self
    }

    pub fn with_override(mut self, grams_per_day: f64) -> Self {
        self.daily_food_override_grams = Some(grams_per_day);
        self
    }

    /// Weight if usable (positive and finite).
    #[inline]
    pub fn known_weight(&self) -> Option<f64> {
        positive(self.weight_kg)
    }

    /// User-set daily ration if usable.
    #[inline]
    pub fn override_grams(&self) -> Option<f64> {
        positive(self.daily_food_override_grams)
    }
}

/* -------------------------------------------------------------------------- */
/*                                   Product                                   */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Product {
    pub id: ProductId,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Free-text package size, e.g. "2kg" or "1.5 kg túi".
    #[cfg_attr(feature = "serde", serde(rename = "weight"))]
    pub weight_label: String,
    pub category: Category,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "portionGramsPerDay", default, skip_serializing_if = "Option::is_none")
    )]
    pub portion_grams_per_day: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "portionGramsPerKgPerDay", default, skip_serializing_if = "Option::is_none")
    )]
    pub portion_grams_per_kg_per_day: Option<f64>,
}

impl Product {
    pub fn new(id: ProductId, weight_label: impl Into<String>, category: Category) -> Self {
        Product {
            id,
            name: None,
            weight_label: weight_label.into(),
            category,
            portion_grams_per_day: None,
            portion_grams_per_kg_per_day: None,
        }
    }

    pub fn with_portion_per_day(mut self, grams: f64) -> Self {
        self.portion_grams_per_day = Some(grams);
        self
    }

    pub fn with_portion_per_kg(mut self, grams_per_kg: f64) -> Self {
        self.portion_grams_per_kg_per_day = Some(grams_per_kg);
        self
    }

    #[inline]
    pub fn is_food(&self) -> bool {
        self.category == Category::Food
    }

    /// Leading number of the package label, in kilograms.
    #[inline]
    pub fn package_kg(&self) -> Option<f64> {
        mass::parse_leading_decimal(&self.weight_label)
    }

    #[inline]
    pub fn package_grams(&self) -> Option<f64> {
        mass::package_grams(&self.weight_label)
    }

    #[inline]
    pub fn fixed_portion(&self) -> Option<f64> {
        positive(self.portion_grams_per_day)
    }

    #[inline]
    pub fn per_kg_portion(&self) -> Option<f64> {
        positive(self.portion_grams_per_kg_per_day)
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

/* -------------------------------------------------------------------------- */
/*                                  Purchase                                   */
/* -------------------------------------------------------------------------- */

/// One cart line: a product and how many packages of it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Purchase {
    pub product: Product,
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: u32,
}

#[cfg(feature = "serde")]
fn default_quantity() -> u32 {
    1
}

impl Purchase {
    pub fn new(product: Product, quantity: u32) -> Self {
        Purchase { product, quantity }
    }

    /// Grams contributed by this line, or `None` when the label has no number.
    pub fn line_grams(&self) -> Option<f64> {
        self.product.package_grams().map(|g| g * f64::from(self.quantity))
    }
}
