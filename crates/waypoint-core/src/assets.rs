//! Asset management

use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Asset, NewAsset, OwnerId};
use crate::store::AssetStore;

fn validate_value(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::validation("value must be zero or more"));
    }
    Ok(())
}

pub fn add_asset<S: AssetStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    asset: &NewAsset,
) -> Result<Asset> {
    if asset.name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    validate_value(asset.value)?;

    let created = store.insert_asset(owner, asset)?;
    info!(owner, id = created.id, kind = created.asset_type.as_str(), "Added asset");
    Ok(created)
}

pub fn list_assets<S: AssetStore + ?Sized>(store: &S, owner: OwnerId) -> Result<Vec<Asset>> {
    store.find_assets(owner)
}

/// Record a new market value for an asset
pub fn update_asset_value<S: AssetStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    id: i64,
    value: f64,
) -> Result<Asset> {
    validate_value(value)?;
    store
        .update_asset_value(owner, id, value)?
        .ok_or_else(|| Error::not_found("asset", id))
}

pub fn delete_asset<S: AssetStore + ?Sized>(store: &S, owner: OwnerId, id: i64) -> Result<()> {
    if !store.delete_asset(owner, id)? {
        return Err(Error::not_found("asset", id));
    }
    Ok(())
}
