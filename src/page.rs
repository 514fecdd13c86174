//! Page-wide state shared by the sections.
//!
//! `Page` is the single owner of everything more than one section touches:
//! the session (coupons, login, theme), the catalog, and the three ports to
//! the outside world (key-value store, user prompt, random source). Sections
//! get `&mut Page` for the length of one input event.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::Catalog;
use crate::prompt::Prompt;
use crate::session::Session;
use crate::storage::KeyValueStore;

pub struct Page {
    pub session: Session,
    pub catalog: Catalog,
    pub store: Box<dyn KeyValueStore>,
    pub prompt: Box<dyn Prompt>,
    pub rng: StdRng,
}

impl Page {
    /// Page wired to the browser: localStorage, native dialogs, entropy seed.
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self::with_parts(
            Box::new(crate::storage::LocalStorage::open()),
            Box::new(crate::prompt::DialogPrompt),
            StdRng::from_entropy(),
        )
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self::with_parts(
            Box::new(crate::storage::MemoryStore::new()),
            Box::new(crate::prompt::SilentPrompt),
            StdRng::from_entropy(),
        )
    }

    pub fn with_parts(store: Box<dyn KeyValueStore>, prompt: Box<dyn Prompt>, rng: StdRng) -> Self {
        let session = Session::load(store.as_ref());
        Self {
            session,
            catalog: Catalog::seeded(),
            store,
            prompt,
            rng,
        }
    }

    /// Test page over a memory store and a scripted prompt with a fixed seed.
    #[cfg(test)]
    pub fn for_test(store: crate::storage::MemoryStore, prompt: crate::prompt::ScriptedPrompt) -> Self {
        Self::with_parts(Box::new(store), Box::new(prompt), StdRng::seed_from_u64(7))
    }

    /// One more coupon for finishing a farm run, written through immediately.
    pub fn award_coupon(&mut self) {
        self.session.coupons.award();
        self.persist_coupons();
    }

    pub fn persist_coupons(&mut self) {
        self.session.save_coupons(self.store.as_mut());
    }

    pub fn alert(&mut self, message: &str) {
        self.prompt.alert(message);
    }

    pub fn confirm(&mut self, message: &str) -> bool {
        self.prompt.confirm(message)
    }
}
