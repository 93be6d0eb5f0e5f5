//! The resource lifecycle contract.

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::provider::ProviderConfig;
use crate::schema::Schema;

pub use meridian_client::BoxFuture;

pub type LifecycleFuture<'a> = BoxFuture<'a, Result<(), ProviderError>>;

/// One resource type's create/read/update/delete behavior.
///
/// Handlers receive a [`ResourceData`] with configuration already
/// validated and defaults applied. Each phase leaves the bag describing
/// reality: `create` sets the new id and refreshes, `read` clears the bag
/// when the remote resource is gone, `delete` tolerates already-gone.
pub trait ResourceHandler: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    fn create<'a>(&'a self, ctx: &'a ProviderConfig, data: &'a mut ResourceData)
        -> LifecycleFuture<'a>;

    fn read<'a>(&'a self, ctx: &'a ProviderConfig, data: &'a mut ResourceData)
        -> LifecycleFuture<'a>;

    fn update<'a>(&'a self, ctx: &'a ProviderConfig, data: &'a mut ResourceData)
        -> LifecycleFuture<'a>;

    fn delete<'a>(&'a self, ctx: &'a ProviderConfig, data: &'a mut ResourceData)
        -> LifecycleFuture<'a>;

    /// Adopt an existing remote resource by id. The default goes through
    /// `read` and fails if nothing comes back.
    fn import<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        id: &'a str,
    ) -> BoxFuture<'a, Result<ResourceData, ProviderError>> {
        Box::pin(async move {
            let mut data = ResourceData::default();
            data.set_id(id);
            self.read(ctx, &mut data).await?;
            if data.id().is_none() {
                return Err(ProviderError::NotFound {
                    type_name: self.type_name().to_owned(),
                    id: id.to_owned(),
                });
            }
            Ok(data)
        })
    }
}
