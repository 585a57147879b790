use crate::mutations::{Mutation, MutationError};
use crate::store::DocumentStore;
use atelier_model::{Asset, AssetKind};

pub struct AssetController<'a> {
    store: &'a DocumentStore,
}

impl<'a> AssetController<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Asset> {
        self.store.get_state().project.assets.clone()
    }

    pub fn asset(&self, id: &str) -> Option<Asset> {
        self.store.get_state().project.asset(id).cloned()
    }

    pub fn add_asset(&self, name: &str, url: &str, kind: AssetKind) -> Result<String, MutationError> {
        let asset = Asset {
            id: self.store.new_id_with_prefix("asset"),
            name: name.to_string(),
            url: url.to_string(),
            kind,
        };
        let id = asset.id.clone();

        self.store.apply(Mutation::AddAsset { asset })?;
        Ok(id)
    }

    pub fn remove_asset(&self, id: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::RemoveAsset {
            asset_id: id.to_string(),
        })
    }
}
