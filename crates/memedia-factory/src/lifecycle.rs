use std::sync::Arc;

use crate::factory::MeMediaFactory;
use crate::host::{ModuleLookup, PlayerFactory, MEDIA_MODULE};
use crate::support::SupportTables;

/// Whether the factory is currently known to the host registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Registered,
}

/// Module entry point that owns the factory and its registration.
///
/// `startup` builds the factory and registers it with the [`MEDIA_MODULE`]
/// registry; `shutdown` (or drop) removes it again. A missing registry is
/// not an error: the module just stays unregistered.
pub struct FactoryModule {
    modules: Arc<dyn ModuleLookup>,
    tables: Option<SupportTables>,
    factory: Option<Arc<MeMediaFactory>>,
    state: RegistrationState,
}

impl FactoryModule {
    /// Module using the embedded support tables.
    pub fn new(modules: Arc<dyn ModuleLookup>) -> Self {
        Self {
            modules,
            tables: None,
            factory: None,
            state: RegistrationState::Unregistered,
        }
    }

    /// Module using host-provided support tables instead of the embedded ones.
    pub fn with_tables(modules: Arc<dyn ModuleLookup>, tables: SupportTables) -> Self {
        Self {
            modules,
            tables: Some(tables),
            factory: None,
            state: RegistrationState::Unregistered,
        }
    }

    pub fn state(&self) -> RegistrationState {
        self.state
    }

    /// The factory built by the first `startup`.
    pub fn factory(&self) -> Option<&Arc<MeMediaFactory>> {
        self.factory.as_ref()
    }

    pub fn startup(&mut self) {
        if self.state == RegistrationState::Registered {
            tracing::debug!("factory already registered, ignoring startup");
            return;
        }

        let modules = Arc::clone(&self.modules);
        let tables = &self.tables;
        let factory = self.factory.get_or_insert_with(|| {
            let tables = tables.clone().unwrap_or_else(SupportTables::embedded);
            Arc::new(MeMediaFactory::new(tables, modules))
        });

        let Some(registry) = self.modules.media_registry() else {
            tracing::debug!(
                module = MEDIA_MODULE,
                "media module not loaded, factory stays unregistered"
            );
            return;
        };

        registry.register_player_factory(Arc::clone(factory) as Arc<dyn PlayerFactory>);
        self.state = RegistrationState::Registered;
        tracing::info!(factory = factory.name(), "registered player factory");
    }

    pub fn shutdown(&mut self) {
        if self.state == RegistrationState::Unregistered {
            return;
        }
        self.state = RegistrationState::Unregistered;

        let Some(factory) = &self.factory else {
            return;
        };
        match self.modules.media_registry() {
            Some(registry) => {
                let handle = Arc::clone(factory) as Arc<dyn PlayerFactory>;
                if registry.unregister_player_factory(&handle) {
                    tracing::info!(factory = factory.name(), "unregistered player factory");
                } else {
                    tracing::debug!(factory = factory.name(), "factory was not in the registry");
                }
            }
            None => {
                tracing::debug!(module = MEDIA_MODULE, "media module already unloaded");
            }
        }
    }
}

impl Drop for FactoryModule {
    fn drop(&mut self) {
        self.shutdown();
    }
}
