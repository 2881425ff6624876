//! Motivational quotes: current selection plus persisted favorites.
//!
//! # Invariants
//! - The current quote is always a catalog entry.
//! - `next_random` never repeats the current quote while the catalog has more
//!   than one entry.
//! - Favorites hold at most one copy of each quote.

use super::record_store::{LoadStatus, RecordStore, StorePolicy};
use super::{keys, StoreError, StoreResult};
use crate::kv::KeyValueStore;
use crate::model::quote::{quote_catalog, MotivationalQuote, QuoteCategory};
use crate::model::record::RecordId;
use rand::Rng;

pub const FAVORITES_POLICY: StorePolicy = StorePolicy::appending(keys::FAVORITE_QUOTES);

pub struct QuoteStore<'kv> {
    favorites: RecordStore<'kv, MotivationalQuote>,
    current: usize,
}

impl<'kv> QuoteStore<'kv> {
    /// Loads favorites and picks a random starting quote.
    pub fn open(kv: &'kv dyn KeyValueStore, rng: &mut impl Rng) -> StoreResult<Self> {
        Ok(Self {
            favorites: RecordStore::open(kv, FAVORITES_POLICY)?,
            current: rng.gen_range(0..quote_catalog().len()),
        })
    }

    pub fn load_status(&self) -> &LoadStatus {
        self.favorites.load_status()
    }

    pub fn catalog(&self) -> &'static [MotivationalQuote] {
        quote_catalog()
    }

    pub fn current(&self) -> &'static MotivationalQuote {
        &quote_catalog()[self.current]
    }

    /// Moves to a different random catalog quote.
    pub fn next_random(&mut self, rng: &mut impl Rng) -> &'static MotivationalQuote {
        let len = quote_catalog().len();
        if len > 1 {
            let draw = rng.gen_range(0..len - 1);
            self.current = if draw >= self.current { draw + 1 } else { draw };
        }
        self.current()
    }

    /// Selects a specific catalog quote.
    pub fn set_current(&mut self, id: RecordId) -> StoreResult<&'static MotivationalQuote> {
        let index = quote_catalog()
            .iter()
            .position(|quote| quote.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.current = index;
        Ok(self.current())
    }

    pub fn favorites(&self) -> &[MotivationalQuote] {
        self.favorites.records()
    }

    pub fn is_favorite(&self, id: RecordId) -> bool {
        self.favorites.contains(id)
    }

    pub fn is_current_favorite(&self) -> bool {
        self.is_favorite(self.current().id)
    }

    /// Adds or removes the current quote from favorites.
    ///
    /// Returns `true` when the quote is a favorite afterwards.
    pub fn toggle_favorite(&mut self) -> StoreResult<bool> {
        let quote = self.current();
        if self.favorites.contains(quote.id) {
            self.favorites.delete(quote.id)?;
            Ok(false)
        } else {
            self.favorites.add(quote.clone())?;
            Ok(true)
        }
    }

    pub fn remove_favorite(&mut self, id: RecordId) -> StoreResult<()> {
        self.favorites.delete(id).map(|_| ())
    }

    pub fn by_category(&self, category: QuoteCategory) -> Vec<&'static MotivationalQuote> {
        quote_catalog()
            .iter()
            .filter(|quote| quote.category == category)
            .collect()
    }

    pub fn reset(&mut self) -> StoreResult<()> {
        self.favorites.reset()
    }

    pub fn reload(&mut self) -> StoreResult<&LoadStatus> {
        self.favorites.reload()
    }
}
