//! # ProductService
//!
//! Product CRUD with the seller-city denormalization applied before every
//! write that sets or changes the seller. The city is copied from the
//! seller directory so product reads never need a join; a missing seller
//! or a seller without a city recorded leaves the field at its prior value.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use domains::error::{DomainError, Result};
use domains::models::{NewProduct, Product, ProductChanges};
use domains::ports::{ProductStore, SellerDirectory};

pub struct ProductService {
    store: Arc<dyn ProductStore>,
    sellers: Arc<dyn SellerDirectory>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, sellers: Arc<dyn SellerDirectory>) -> Self {
        Self { store, sellers }
    }

    pub async fn create_product(&self, draft: NewProduct) -> Result<Product> {
        draft.validate()?;

        let city = self.seller_city(draft.seller_id).await?;
        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            quantity: draft.quantity,
            images: draft.images,
            category: draft.category,
            seller_id: draft.seller_id,
            seller_name: draft.seller_name,
            seller_type: draft.seller_type,
            certification: draft.certification,
            minimum_order: draft.minimum_order,
            bulk_discounts: draft.bulk_discounts,
            city,
            view_count: 0,
            order_count: 0,
            last_order_at: None,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_product(product.clone()).await?;
        info!(product_id = %product.id, seller_id = %product.seller_id, "product created");
        Ok(product)
    }

    /// Applies the changed fields over the stored record, re-runs the city
    /// copy only when the seller actually changed, and validates the merged
    /// result before writing it back.
    pub async fn update_product(&self, id: Uuid, changes: ProductChanges) -> Result<Product> {
        let mut product = self.require_product(id).await?;
        let previous_seller = product.seller_id;

        product.apply(changes);
        if product.seller_id != previous_seller {
            if let Some(city) = self.seller_city(product.seller_id).await? {
                product.city = Some(city);
            }
        }

        product.validate()?;
        product.updated_at = Utc::now();

        self.store.update_product(product.clone()).await?;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Fetches one product and counts the view. The bump happens before the
    /// read so the returned record reflects it.
    pub async fn product_detail(&self, id: Uuid) -> Result<Product> {
        self.store.record_view(id).await?;
        self.require_product(id).await
    }

    /// Bumps the order counter and stamps the order time.
    pub async fn record_order(&self, id: Uuid) -> Result<()> {
        self.require_product(id).await?;
        self.store.record_order(id, Utc::now()).await?;
        info!(product_id = %id, "order recorded");
        Ok(())
    }

    async fn require_product(&self, id: Uuid) -> Result<Product> {
        self.store
            .product(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    /// Directory errors abort the write; an unknown seller or one with no
    /// city recorded resolves to `None`, which keeps the prior value.
    async fn seller_city(&self, seller_id: Uuid) -> Result<Option<String>> {
        match self.sellers.seller(seller_id).await? {
            Some(seller) => match seller.city {
                Some(city) => Ok(Some(city)),
                None => {
                    warn!(%seller_id, "seller has no city; keeping prior value");
                    Ok(None)
                }
            },
            None => {
                warn!(%seller_id, "seller not found; keeping prior value");
                Ok(None)
            }
        }
    }
}
