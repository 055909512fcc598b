use std::sync::{Arc, RwLock};

use memedia_factory::{
    same_factory, CapabilityResult, MediaRegistry, PlayerFactory, PlayerHandle,
};

/// Registry of player factories, in registration order.
#[derive(Default)]
pub struct MediaModule {
    factories: RwLock<Vec<Arc<dyn PlayerFactory>>>,
}

impl MediaModule {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// All registered factories.
    pub fn factories(&self) -> Vec<Arc<dyn PlayerFactory>> {
        self.read().clone()
    }

    /// Names of all registered factories.
    pub fn factory_names(&self) -> Vec<String> {
        self.read().iter().map(|f| f.name().to_string()).collect()
    }

    /// Get a factory by name.
    pub fn factory(&self, name: &str) -> Option<Arc<dyn PlayerFactory>> {
        self.read().iter().find(|f| f.name() == name).cloned()
    }

    /// Ask every factory whether it can play `url`.
    pub fn can_play_url(&self, url: &str) -> Vec<(String, CapabilityResult)> {
        self.read()
            .iter()
            .map(|f| (f.name().to_string(), f.can_play_url(url)))
            .collect()
    }

    /// First factory that accepts `url`.
    pub fn find_factory(&self, url: &str) -> Option<Arc<dyn PlayerFactory>> {
        self.read()
            .iter()
            .find(|f| f.can_play_url(url).accepted)
            .cloned()
    }

    /// Create a player for `url`.
    ///
    /// Factories that accept the URL are tried in registration order; one that
    /// declines to create a player hands over to the next.
    pub fn create_player(&self, url: &str) -> Option<PlayerHandle> {
        // Snapshot so factory calls run without holding the lock.
        let factories = self.factories();
        for factory in factories.iter().filter(|f| f.can_play_url(url).accepted) {
            if let Some(player) = factory.create_player() {
                tracing::debug!(factory = factory.name(), url, "created player");
                return Some(player);
            }
            tracing::debug!(factory = factory.name(), url, "factory declined, trying next");
        }
        tracing::debug!(url, "no factory could create a player");
        None
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<dyn PlayerFactory>>> {
        self.factories
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<dyn PlayerFactory>>> {
        self.factories
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MediaRegistry for MediaModule {
    fn register_player_factory(&self, factory: Arc<dyn PlayerFactory>) {
        let mut factories = self.write();
        if let Some(existing) = factories.iter_mut().find(|f| f.name() == factory.name()) {
            tracing::warn!(factory = factory.name(), "replacing registered player factory");
            *existing = factory;
        } else {
            factories.push(factory);
        }
    }

    fn unregister_player_factory(&self, factory: &Arc<dyn PlayerFactory>) -> bool {
        let mut factories = self.write();
        let before = factories.len();
        factories.retain(|f| !same_factory(f, factory));
        factories.len() != before
    }
}
