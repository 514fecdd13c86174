//! Product catalog shared by the marquee, the market and the admin panel.
//!
//! The seed list ships inside the binary as JSON. Admin additions and
//! removals only live for the session.

use serde::Deserialize;

const SEED_JSON: &str = include_str!("../assets/catalog.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetable,
    Fruit,
    Grain,
    Gift,
}

pub const ALL_CATEGORIES: [Category; 4] = [
    Category::Vegetable,
    Category::Fruit,
    Category::Grain,
    Category::Gift,
];

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Vegetable => "蔬菜",
            Category::Fruit => "水果",
            Category::Grain => "米糧",
            Category::Gift => "禮盒",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: u32,
    pub category: Category,
    /// Added from the admin panel during this session ("新品" tag).
    pub is_new: bool,
}

#[derive(Deserialize)]
struct SeedFile {
    products: Vec<SeedProduct>,
}

#[derive(Deserialize)]
struct SeedProduct {
    name: String,
    price: u32,
    category: Category,
}

/// Which products the market grid shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    All,
    Only(Category),
}

impl Filter {
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(c) => product.category == c,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Filter::All => "全部",
            Filter::Only(c) => c.name(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    next_id: u32,
}

impl Catalog {
    /// Catalog from the embedded seed list. A broken seed document leaves the
    /// shop empty rather than taking the page down.
    pub fn seeded() -> Self {
        match Self::from_json(SEED_JSON) {
            Ok(catalog) => catalog,
            Err(e) => {
                #[cfg(target_arch = "wasm32")]
                web_sys::console::warn_1(&format!("商品資料解析失敗: {e}").into());
                #[cfg(not(target_arch = "wasm32"))]
                let _ = e;
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let seed: SeedFile = serde_json::from_str(json)?;
        let mut catalog = Self::default();
        for p in seed.products {
            catalog.push(p.name, p.price, p.category, false);
        }
        Ok(catalog)
    }

    fn push(&mut self, name: String, price: u32, category: Category, is_new: bool) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.products.push(Product {
            id,
            name,
            price,
            category,
            is_new,
        });
        id
    }

    /// Add a product from the admin panel; returns its id.
    pub fn add(&mut self, name: &str, price: u32, category: Category) -> u32 {
        self.push(name.to_string(), price, category, true)
    }

    /// Take a product off the shelf by its list position.
    pub fn remove_at(&mut self, index: usize) -> Option<Product> {
        (index < self.products.len()).then(|| self.products.remove(index))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn visible(&self, filter: Filter) -> impl Iterator<Item = &Product> + '_ {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
