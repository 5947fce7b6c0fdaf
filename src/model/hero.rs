use crate::framework::ApiEntity;
use serde::{Deserialize, Serialize};

/// A hero record as served by the `api/heroes` collection.
///
/// # Resource Framework
/// This struct implements the [`ApiEntity`] trait, allowing it to be addressed
/// by a [`ResourceClient`](crate::framework::ResourceClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u64,
    pub name: String,
}

impl Hero {
    /// Creates a new Hero instance.
    ///
    /// # Arguments
    /// * `id` - Identifier (assigned by the server for new heroes)
    /// * `name` - Display name
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Payload for creating a new hero. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroCreate {
    pub name: String,
}

impl HeroCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Either a whole hero or just its id; both identify the record to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroRef {
    Id(u64),
    Hero(Hero),
}

impl HeroRef {
    pub fn id(&self) -> u64 {
        match self {
            HeroRef::Id(id) => *id,
            HeroRef::Hero(hero) => hero.id,
        }
    }
}

impl From<u64> for HeroRef {
    fn from(id: u64) -> Self {
        HeroRef::Id(id)
    }
}

impl From<Hero> for HeroRef {
    fn from(hero: Hero) -> Self {
        HeroRef::Hero(hero)
    }
}

impl From<&Hero> for HeroRef {
    fn from(hero: &Hero) -> Self {
        HeroRef::Hero(hero.clone())
    }
}

impl ApiEntity for Hero {
    type Id = u64;
    type CreateParams = HeroCreate;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_create_params(id: u64, params: HeroCreate) -> Self {
        Self::new(id, params.name)
    }

    /// Only `name` is searchable; matching is a case-insensitive substring test.
    fn matches_query(&self, field: &str, term: &str) -> bool {
        match field {
            "name" => self.name.to_lowercase().contains(&term.to_lowercase()),
            _ => false,
        }
    }
}

/// The classic roster used to seed the in-memory backend.
pub fn seed_heroes() -> Vec<Hero> {
    [
        (11, "Mr. Nice"),
        (12, "Narco"),
        (13, "Bombasto"),
        (14, "Celeritas"),
        (15, "Magneta"),
        (16, "RubberMan"),
        (17, "Dynama"),
        (18, "Dr IQ"),
        (19, "Magma"),
        (20, "Tornado"),
    ]
    .into_iter()
    .map(|(id, name)| Hero::new(id, name))
    .collect()
}

/// Next hero id: one past the highest existing id, or 11 for an empty roster.
///
/// `None` once the highest id is `u64::MAX`.
pub fn next_hero_id(max_id: Option<&u64>) -> Option<u64> {
    max_id.map_or(Some(11), |id| id.checked_add(1))
}
