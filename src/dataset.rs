//! Loading the order dataset.
//!
//! The dataset is a JSON array of orders that is read once at startup and
//! then shared, unchanged, by every dashboard request.

use std::path::Path;

use crate::{Error, order::Order};

/// An immutable snapshot of all orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    orders: Vec<Order>,
}

impl Dataset {
    /// Create a dataset from already parsed orders.
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Parse a dataset from JSON text.
    ///
    /// # Errors
    /// Returns [Error::InvalidDataset] if `text` is not a JSON array of
    /// objects. Malformed fields inside an order are not an error.
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text)
            .map(Self::new)
            .map_err(|error| Error::InvalidDataset(error.to_string()))
    }

    /// Read and parse the dataset at `path`.
    ///
    /// # Errors
    /// Returns [Error::DatasetRead] if the file cannot be read, or
    /// [Error::InvalidDataset] if it does not hold a JSON array of orders.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        tracing::debug!("Reading dataset from {}", path.display());

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|error| Error::DatasetRead(path.display().to_string(), error.to_string()))?;

        let dataset = Self::from_json_str(&text)?;
        tracing::info!("Loaded {} orders from {}", dataset.len(), path.display());

        Ok(dataset)
    }

    /// Keep only the orders whose size is in `sizes`.
    ///
    /// An empty `sizes` keeps every order.
    pub fn retain_sizes(mut self, sizes: &[String]) -> Self {
        if sizes.is_empty() {
            return self;
        }

        let before = self.orders.len();
        self.orders.retain(|order| sizes.contains(&order.size));
        tracing::info!(
            "Kept {} of {before} orders with sizes {sizes:?}",
            self.orders.len()
        );

        self
    }

    /// All orders in their original order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The distinct size labels in the order they first appear.
    pub fn sizes(&self) -> Vec<&str> {
        let mut sizes: Vec<&str> = Vec::new();

        for order in &self.orders {
            if !sizes.contains(&order.size.as_str()) {
                sizes.push(&order.size);
            }
        }

        sizes
    }

    /// The number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the dataset has no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
