use std::future::Future;
use std::pin::Pin;

use claimlens_core::models::table::Table;

use crate::error::WarehouseError;
use crate::statement::Statement;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that runs parameterized statements against the warehouse.
///
/// Implemented by [`crate::client::SnowflakeClient`]; tests substitute
/// in-memory fakes. Methods return boxed futures for dyn compatibility.
pub trait SqlExecutor: Send + Sync {
    /// Execute one statement and return its complete result set.
    fn execute<'a>(
        &'a self,
        statement: &'a Statement,
    ) -> BoxFuture<'a, Result<Table, WarehouseError>>;

    /// Download an object through a presigned URL.
    fn download<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, WarehouseError>>;
}
