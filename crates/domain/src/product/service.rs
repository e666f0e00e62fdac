use crate::error::ValidationError;

use super::Product;

/// Operations spanning several products.
pub struct ProductService;

impl ProductService {
    /// Raises the price of every product by `percentage` percent.
    pub fn increase_price(
        products: &mut [Product],
        percentage: u32,
    ) -> Result<(), ValidationError> {
        for product in products.iter_mut() {
            let new_price = product.price().increase_by_percent(percentage);
            product.change_price(new_price)?;
        }
        tracing::debug!(count = products.len(), percentage, "increased product prices");
        Ok(())
    }
}
