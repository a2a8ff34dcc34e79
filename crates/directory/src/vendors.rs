//! Vendor registry

use std::sync::Arc;

use thiserror::Error;

use procura_model::{new_id, ValidationError, Vendor, VendorForm};
use procura_store::MemoryStore;

/// Errors from vendor management
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("Vendor not found: {0}")]
    NotFound(String),

    #[error("Vendor with this name already exists")]
    DuplicateName,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// CRUD over the vendor collection.
///
/// Vendor names are unique case-insensitively. New vendors always start
/// active; deactivation happens through update.
pub struct VendorService {
    store: Arc<MemoryStore>,
}

impl VendorService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Vendor> {
        self.store.read().vendors.clone()
    }

    pub fn get(&self, id: &str) -> Result<Vendor, VendorError> {
        self.store
            .read()
            .vendor(id)
            .cloned()
            .ok_or_else(|| VendorError::NotFound(id.to_string()))
    }

    pub fn create(&self, form: &VendorForm) -> Result<Vendor, VendorError> {
        form.validate()?;

        let mut state = self.store.write();
        let name_taken = state
            .vendors
            .iter()
            .any(|vendor| vendor.name.to_lowercase() == form.name.to_lowercase());
        if name_taken {
            return Err(VendorError::DuplicateName);
        }

        let vendor = Vendor {
            id: new_id(),
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            category: form.category,
            rating: form.rating,
            address: form.address.clone(),
            tax_id: form.tax_id.clone(),
            attachments: form.attachments.clone(),
            is_active: true,
        };

        state.vendors.insert(0, vendor.clone());
        tracing::info!(vendor_id = %vendor.id, name = %vendor.name, "Vendor created");
        Ok(vendor)
    }

    pub fn update(&self, id: &str, form: &VendorForm) -> Result<Vendor, VendorError> {
        form.validate()?;

        let mut state = self.store.write();
        if state.vendor(id).is_none() {
            return Err(VendorError::NotFound(id.to_string()));
        }
        let name_taken = state
            .vendors
            .iter()
            .any(|vendor| vendor.id != id && vendor.name.to_lowercase() == form.name.to_lowercase());
        if name_taken {
            return Err(VendorError::DuplicateName);
        }

        let vendor = state
            .vendor_mut(id)
            .ok_or_else(|| VendorError::NotFound(id.to_string()))?;
        vendor.name = form.name.clone();
        vendor.email = form.email.clone();
        vendor.phone = form.phone.clone();
        vendor.category = form.category;
        vendor.rating = form.rating;
        vendor.address = form.address.clone();
        vendor.tax_id = form.tax_id.clone();
        vendor.attachments = form.attachments.clone();
        vendor.is_active = form.is_active.unwrap_or(true);

        let updated = vendor.clone();
        tracing::info!(vendor_id = %updated.id, active = updated.is_active, "Vendor updated");
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<Vendor, VendorError> {
        let mut state = self.store.write();
        let index = state
            .vendors
            .iter()
            .position(|vendor| vendor.id == id)
            .ok_or_else(|| VendorError::NotFound(id.to_string()))?;

        let removed = state.vendors.remove(index);
        tracing::info!(vendor_id = %removed.id, name = %removed.name, "Vendor deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_model::VendorCategory;

    fn form(name: &str) -> VendorForm {
        VendorForm {
            name: name.to_string(),
            email: "sales@example.co.id".to_string(),
            phone: "+62-21-000-1111".to_string(),
            category: VendorCategory::Office,
            rating: 4,
            address: "Jl. Contoh No. 1, Jakarta".to_string(),
            tax_id: "09.999.999.9-999.000".to_string(),
            attachments: vec![],
            is_active: None,
        }
    }

    #[test]
    fn test_create_starts_active() {
        let service = VendorService::new(Arc::new(MemoryStore::empty()));

        let mut inactive_requested = form("Mitra Baru");
        inactive_requested.is_active = Some(false);
        let vendor = service.create(&inactive_requested).unwrap();

        // The flag is ignored on create.
        assert!(vendor.is_active);
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn test_duplicate_name_case_insensitive() {
        let service = VendorService::new(Arc::new(MemoryStore::seeded()));

        let result = service.create(&form("NUSANTARA tech supplies"));
        assert!(matches!(result, Err(VendorError::DuplicateName)));
    }

    #[test]
    fn test_update_can_deactivate() {
        let service = VendorService::new(Arc::new(MemoryStore::empty()));
        let vendor = service.create(&form("Mitra Baru")).unwrap();

        let mut change = form("Mitra Baru");
        change.is_active = Some(false);
        let updated = service.update(&vendor.id, &change).unwrap();
        assert!(!updated.is_active);

        // Omitting the flag flips it back to active.
        let updated = service.update(&vendor.id, &form("Mitra Baru")).unwrap();
        assert!(updated.is_active);
    }

    #[test]
    fn test_update_rejects_name_collision_with_other_vendor() {
        let service = VendorService::new(Arc::new(MemoryStore::empty()));
        service.create(&form("Vendor Satu")).unwrap();
        let second = service.create(&form("Vendor Dua")).unwrap();

        let result = service.update(&second.id, &form("vendor satu"));
        assert!(matches!(result, Err(VendorError::DuplicateName)));

        // Keeping its own name is not a collision.
        assert!(service.update(&second.id, &form("Vendor Dua")).is_ok());
    }

    #[test]
    fn test_delete() {
        let service = VendorService::new(Arc::new(MemoryStore::empty()));
        let vendor = service.create(&form("Sementara")).unwrap();

        let removed = service.delete(&vendor.id).unwrap();
        assert_eq!(removed.id, vendor.id);
        assert!(matches!(service.get(&vendor.id), Err(VendorError::NotFound(_))));
    }
}
