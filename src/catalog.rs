//! Product catalog and per-product preview profiles.

use crate::error::{Error, Result};
use crate::scene::normalize::CENTER_TOLERANCE;
use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;

/// Prefix of the deep-link fragment that selects a product, e.g. `#products-cap`.
pub const FRAGMENT_PREFIX: &str = "#products-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductCategory {
    TShirt,
    Hoodie,
    Cap,
    Mug,
    Tumbler,
    Bottle,
    Tote,
    Backpack,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 8] = [
        ProductCategory::TShirt,
        ProductCategory::Hoodie,
        ProductCategory::Cap,
        ProductCategory::Mug,
        ProductCategory::Tumbler,
        ProductCategory::Bottle,
        ProductCategory::Tote,
        ProductCategory::Backpack,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ProductCategory::TShirt => "tshirt",
            ProductCategory::Hoodie => "hoodie",
            ProductCategory::Cap => "cap",
            ProductCategory::Mug => "mug",
            ProductCategory::Tumbler => "tumbler",
            ProductCategory::Bottle => "bottle",
            ProductCategory::Tote => "tote",
            ProductCategory::Backpack => "backpack",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProductCategory::TShirt => "T-Shirts",
            ProductCategory::Hoodie => "Hoodies",
            ProductCategory::Cap => "Caps",
            ProductCategory::Mug => "Mugs",
            ProductCategory::Tumbler => "Tumblers",
            ProductCategory::Bottle => "Bottles",
            ProductCategory::Tote => "Tote Bags",
            ProductCategory::Backpack => "Backpack",
        }
    }

    /// Parses `#products-<slug>` (leading `#` optional).
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let fragment = fragment.trim();
        let slug = fragment
            .strip_prefix(FRAGMENT_PREFIX)
            .or_else(|| fragment.strip_prefix(&FRAGMENT_PREFIX[1..]))?;
        slug.parse().ok()
    }

    pub fn fragment(self) -> String {
        format!("{}{}", FRAGMENT_PREFIX, self.slug())
    }
}

impl FromStr for ProductCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Which display surface a preview belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreviewKind {
    /// The large garment shown in the hero section.
    Hero,
    Product(ProductCategory),
}

impl PreviewKind {
    pub fn key(self) -> &'static str {
        match self {
            PreviewKind::Hero => "hero",
            PreviewKind::Product(c) => c.slug(),
        }
    }

    /// The hero followed by every catalog product, in display order.
    pub fn all() -> impl Iterator<Item = PreviewKind> {
        std::iter::once(PreviewKind::Hero).chain(ProductCategory::ALL.map(PreviewKind::Product))
    }
}

impl FromStr for PreviewKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "hero" {
            return Ok(PreviewKind::Hero);
        }
        s.parse().map(PreviewKind::Product)
    }
}

impl fmt::Display for PreviewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How one preview loads, sizes and animates its asset.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewProfile {
    pub kind: PreviewKind,
    /// Asset path relative to the asset root.
    pub asset: String,
    /// Largest dimension of the normalized asset, in scene units.
    pub target_size: f32,
    /// Applied to the normalized asset inside the swaying group.
    pub offset: Vector3<f32>,
    /// Centering tolerance of the corrective pass.
    pub tolerance: f32,
    pub sway_frequency: f32,
    /// Peak Y rotation of the sway, in radians.
    pub sway_amplitude: f32,
}

impl PreviewProfile {
    pub fn default_for(kind: PreviewKind) -> Self {
        let (asset, target_size) = match kind {
            PreviewKind::Hero => ("3d_models/main_urban_streetwear_hoodie.obj", 3.75),
            PreviewKind::Product(category) => match category {
                ProductCategory::TShirt => ("3d_models/black_tshirt.obj", 2.1),
                ProductCategory::Hoodie => ("3d_models/hoodie.obj", 2.1),
                ProductCategory::Cap => ("3d_models/cap.obj", 2.5),
                ProductCategory::Mug => ("3d_models/red_coffee_mug.obj", 2.0),
                ProductCategory::Tumbler => ("3d_models/tumbler.obj", 2.5),
                ProductCategory::Bottle => ("3d_models/green_water_bottle.obj", 2.5),
                ProductCategory::Tote => ("3d_models/tote_bag.obj", 2.2),
                ProductCategory::Backpack => ("3d_models/backpack.obj", 2.2),
            },
        };

        // The bottle is tall enough to clip the top of the viewer otherwise.
        let offset = match kind {
            PreviewKind::Product(ProductCategory::Bottle) => Vector3::new(0.0, -1.2, 0.0),
            _ => Vector3::zeros(),
        };

        let sway_frequency = match kind {
            PreviewKind::Hero => 1.0,
            PreviewKind::Product(_) => 0.5,
        };

        Self {
            kind,
            asset: asset.to_string(),
            target_size,
            offset,
            tolerance: CENTER_TOLERANCE,
            sway_frequency,
            sway_amplitude: 0.1,
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ProductCategory,
    pub features: &'static [&'static str],
}

static PRODUCTS: [Product; 8] = [
    Product {
        id: 1,
        name: "T-Shirts",
        description: "Your canvas awaits: soft, premium cotton that makes every design pop with vibrant energy",
        category: ProductCategory::TShirt,
        features: &["60+ Colors", "Short Sleeve", "Tank Tops", "Sweatshirts"],
    },
    Product {
        id: 2,
        name: "Hoodies",
        description: "Cozy comfort meets bold style: wrap your brand in warmth and make a statement",
        category: ProductCategory::Hoodie,
        features: &["Fleece Lined", "Kangaroo Pocket", "Drawstring Hood"],
    },
    Product {
        id: 3,
        name: "Caps",
        description: "Top off your brand with head-turning style, classic meets contemporary",
        category: ProductCategory::Cap,
        features: &["12+ Colors", "Baseball Cap", "Trucker Mesh", "Canvas Cap", "Mesh Caps"],
    },
    Product {
        id: 4,
        name: "Mugs",
        description: "Start every day with your brand: durable, beautiful, and ready to make mornings memorable",
        category: ProductCategory::Mug,
        features: &["8oz - 15oz", "Variety of Colors", "Dishwasher Safe", "Microwave Safe"],
    },
    Product {
        id: 5,
        name: "Tumblers",
        description: "Keep the energy flowing with insulated perfection that stays cool (or hot) while your brand stays bold",
        category: ProductCategory::Tumbler,
        features: &["12oz - 40oz", "Double Wall", "Leak Proof"],
    },
    Product {
        id: 6,
        name: "Bottles",
        description: "Hydration meets inspiration: eco-friendly vessels that carry your message everywhere",
        category: ProductCategory::Bottle,
        features: &["17oz - 40oz", "BPA Free", "Leak Proof"],
    },
    Product {
        id: 7,
        name: "Tote Bags",
        description: "Carry your brand with confidence, stylish and sustainable and ready for any adventure",
        category: ProductCategory::Tote,
        features: &["Canvas Material", "Multiple Sizes", "Reinforced Handles", "Eco-Friendly"],
    },
    Product {
        id: 8,
        name: "Backpack",
        description: "Your brand, your journey: functional design that works as hard as you do",
        category: ProductCategory::Backpack,
        features: &["Multiple Compartments", "Padded Straps", "Laptop Sleeve", "Water Resistant"],
    },
];

/// Every product in display order.
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

pub fn find_product(category: ProductCategory) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for category in ProductCategory::ALL {
            assert_eq!(category.slug().parse::<ProductCategory>().unwrap(), category);
        }
        assert!("sock".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn fragments() {
        assert_eq!(
            ProductCategory::from_fragment("#products-tumbler"),
            Some(ProductCategory::Tumbler)
        );
        assert_eq!(
            ProductCategory::from_fragment("products-cap"),
            Some(ProductCategory::Cap)
        );
        assert_eq!(ProductCategory::from_fragment("#about"), None);
        assert_eq!(ProductCategory::from_fragment("#products-"), None);
        assert_eq!(ProductCategory::Tote.fragment(), "#products-tote");
    }

    #[test]
    fn every_category_has_one_product() {
        assert_eq!(products().len(), ProductCategory::ALL.len());
        for category in ProductCategory::ALL {
            let product = find_product(category).unwrap();
            assert_eq!(product.name, category.display_name());
        }
    }

    #[test]
    fn default_target_sizes() {
        let size = |kind| PreviewProfile::default_for(kind).target_size;
        assert_eq!(size(PreviewKind::Hero), 3.75);
        assert_eq!(size(PreviewKind::Product(ProductCategory::Mug)), 2.0);
        assert_eq!(size(PreviewKind::Product(ProductCategory::Cap)), 2.5);
        assert_eq!(size(PreviewKind::Product(ProductCategory::TShirt)), 2.1);
        assert_eq!(size(PreviewKind::Product(ProductCategory::Backpack)), 2.2);
    }

    #[test]
    fn only_bottle_is_offset() {
        for kind in PreviewKind::all() {
            let profile = PreviewProfile::default_for(kind);
            if kind == PreviewKind::Product(ProductCategory::Bottle) {
                assert_eq!(profile.offset.y, -1.2);
            } else {
                assert_eq!(profile.offset, Vector3::zeros());
            }
        }
    }

    #[test]
    fn preview_kind_keys() {
        assert_eq!("hero".parse::<PreviewKind>().unwrap(), PreviewKind::Hero);
        assert_eq!(
            "mug".parse::<PreviewKind>().unwrap(),
            PreviewKind::Product(ProductCategory::Mug)
        );
        assert_eq!(PreviewKind::all().count(), 9);
    }
}
