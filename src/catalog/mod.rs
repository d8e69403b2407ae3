//! Module catalog served by the `resource-loader` binary.
//!
//! Each [`Component`] resolves to `<module_dir>/<Name>.toml`.

pub mod manifest;

use std::path::PathBuf;

pub use manifest::{read_manifest, CatalogError, ModuleManifest};

use crate::registry::{Registry, ResourceName};

/// Loadable modules of the game client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    UserProgression,
    MultiplayerLobby,
    GameVoiceIntegration,
    App,
}

impl ResourceName for Component {
    const ALL: &'static [Self] = &[
        Component::UserProgression,
        Component::MultiplayerLobby,
        Component::GameVoiceIntegration,
        Component::App,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Component::UserProgression => "UserProgression",
            Component::MultiplayerLobby => "MultiplayerLobby",
            Component::GameVoiceIntegration => "GameVoiceIntegration",
            Component::App => "App",
        }
    }
}

/// Registry reading every component's manifest from `module_dir`.
pub fn catalog_registry(module_dir: impl Into<PathBuf>) -> Registry<Component, ModuleManifest> {
    let module_dir = module_dir.into();
    Component::ALL
        .iter()
        .copied()
        .fold(Registry::new(), |registry, component| {
            let path = module_dir.join(format!("{}.toml", component.as_str()));
            registry.register(component, move || read_manifest(path.clone()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_component_registered() {
        let registry = catalog_registry("modules");
        assert_eq!(registry.len(), Component::ALL.len());
        assert_eq!(Component::parse("MultiplayerLobby"), Some(Component::MultiplayerLobby));
    }

    #[tokio::test]
    async fn test_loads_manifest_from_dir() {
        let dir = std::env::temp_dir().join(format!("catalog-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("App.toml"),
            "name = \"App\"\nversion = \"0.1.0\"\nentry = \"app.js\"\n",
        )
        .unwrap();

        let registry = catalog_registry(&dir);
        let load = registry.get(Component::App).unwrap();
        let manifest = load().await.unwrap();
        assert_eq!(manifest.entry, "app.js");

        let load = registry.get(Component::MultiplayerLobby).unwrap();
        assert!(load().await.is_err());

        std::fs::remove_dir_all(&dir).unwrap_or_default();
    }
}
