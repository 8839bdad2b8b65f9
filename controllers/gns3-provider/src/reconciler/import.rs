use super::Reconciler;
use crate::error::ProviderError;
use crate::import_id::ImportKey;
use crate::schema::PROJECT_FIELD;
use crate::state::{ResourceData, ResourceInstance};
use crate::value::AttributeValue;
use tracing::info;

impl Reconciler {
    /// Adopt an existing node from a raw import key.
    ///
    /// Sets only the owning project and the identity; the caller refreshes the
    /// rest with a Read. Nothing is sent to the controller, and a key that does
    /// not parse leaves the instance untouched.
    pub fn import<D: ResourceData + ?Sized>(&self, raw: &str, data: &mut D) -> Result<ImportKey, ProviderError> {
        let key = ImportKey::parse(raw, self.schema.legacy_import)?;
        data.set_computed(PROJECT_FIELD, AttributeValue::String(key.project_id.clone()));
        data.set_identity(key.node_id.clone());
        info!("Imported {} {}", self.schema.type_name, key);
        Ok(key)
    }

    /// Fresh instance adopted from a raw import key
    pub fn import_instance(&self, raw: &str) -> Result<ResourceInstance, ProviderError> {
        let mut instance = ResourceInstance::new();
        self.import(raw, &mut instance)?;
        Ok(instance)
    }
}
