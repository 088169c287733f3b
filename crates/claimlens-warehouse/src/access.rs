//! Memoized data access used by the dashboard.
//!
//! Claim and stage lookups expire after [`LOOKUP_TTL`]. Ad-hoc query results
//! and the LLM helpers are not memoized here; analyst SQL results are kept
//! with the session that asked for them.

use std::sync::Arc;

use claimlens_core::models::claim::ClaimDetails;
use claimlens_core::models::image::ImageAsset;
use claimlens_core::models::table::Table;
use claimlens_core::objects::{EVIDENCE_CACHE_BYTES, LOOKUP_CACHE_ENTRIES, LOOKUP_TTL};

use crate::cache::TtlCache;
use crate::error::WarehouseError;
use crate::executor::SqlExecutor;
use crate::{claims, cortex, query, stage};

pub struct ClaimData {
    db: Arc<dyn SqlExecutor>,
    claim_numbers: TtlCache<(), Vec<String>>,
    claim_details: TtlCache<String, ClaimDetails>,
    stage_files: TtlCache<String, Vec<String>>,
    stage_objects: TtlCache<(String, String), ImageAsset>,
}

impl ClaimData {
    pub fn new(db: Arc<dyn SqlExecutor>) -> Self {
        Self {
            db,
            claim_numbers: TtlCache::with_ttl("claim_numbers", LOOKUP_TTL, 1),
            claim_details: TtlCache::with_ttl("claim_details", LOOKUP_TTL, LOOKUP_CACHE_ENTRIES),
            stage_files: TtlCache::with_ttl("stage_files", LOOKUP_TTL, LOOKUP_CACHE_ENTRIES),
            stage_objects: TtlCache::weighted(
                "stage_objects",
                LOOKUP_TTL,
                EVIDENCE_CACHE_BYTES,
                |_, asset: &ImageAsset| u32::try_from(asset.bytes.len()).unwrap_or(u32::MAX),
            ),
        }
    }

    pub fn executor(&self) -> &dyn SqlExecutor {
        self.db.as_ref()
    }

    pub async fn list_claim_numbers(&self) -> Result<Vec<String>, WarehouseError> {
        self.claim_numbers
            .get_or_try_insert_with((), || claims::list_claim_numbers(self.executor()))
            .await
    }

    pub async fn get_claim_details(&self, claim_no: &str) -> Result<ClaimDetails, WarehouseError> {
        self.claim_details
            .get_or_try_insert_with(claim_no.to_string(), || {
                claims::get_claim_details(self.executor(), claim_no)
            })
            .await
    }

    pub async fn list_stage_files(&self, stage_name: &str) -> Result<Vec<String>, WarehouseError> {
        self.stage_files
            .get_or_try_insert_with(stage_name.to_string(), || {
                stage::list_stage_files(self.executor(), stage_name)
            })
            .await
    }

    pub async fn fetch_stage_file(
        &self,
        stage_name: &str,
        file_name: &str,
    ) -> Result<ImageAsset, WarehouseError> {
        self.stage_objects
            .get_or_try_insert_with((stage_name.to_string(), file_name.to_string()), || {
                stage::fetch_stage_file(self.executor(), stage_name, file_name)
            })
            .await
    }

    pub async fn run_query(&self, sql: &str) -> Result<Table, WarehouseError> {
        query::run_query(self.executor(), sql).await
    }

    pub async fn summarize_image(
        &self,
        stage_name: &str,
        file_name: &str,
    ) -> Result<Option<String>, WarehouseError> {
        cortex::summarize_image(self.executor(), stage_name, file_name).await
    }

    pub async fn similarity(&self, text_a: &str, text_b: &str) -> Result<Option<f64>, WarehouseError> {
        cortex::similarity(self.executor(), text_a, text_b).await
    }
}
