//! Repository for `resource_documents`.
//!
//! Every query is scoped by `kind` so each resource path only ever sees
//! its own documents.

use pwatch_core::choices::{Choice, ResourceKind};
use pwatch_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery, ListSpec, Page};
use crate::models::resource::{
    CreateResourceDocument, ResourceDocument, UpdateResourceDocument,
};

const RESOURCE_COLUMNS: &str = "id, kind, name, description, file, created_at, updated_at";

pub struct ResourceRepo;

impl ResourceRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "resource_documents",
        columns: RESOURCE_COLUMNS,
        search_columns: &["name", "description"],
        ordering_fields: &["created_at", "name"],
        default_ordering: &["-created_at"],
        page_size: 15,
    };

    pub async fn list(
        pool: &PgPool,
        kind: ResourceKind,
        query: ListQuery,
    ) -> Result<Page<ResourceDocument>, sqlx::Error> {
        let query = query.filter("kind", kind.value());
        fetch_page(pool, &Self::LIST, &query).await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        kind: ResourceKind,
        id: DbId,
    ) -> Result<Option<ResourceDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {RESOURCE_COLUMNS} FROM resource_documents WHERE id = $1 AND kind = $2"
        );
        sqlx::query_as::<_, ResourceDocument>(&query)
            .bind(id)
            .bind(kind.value())
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        kind: ResourceKind,
        dto: &CreateResourceDocument,
    ) -> Result<ResourceDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO resource_documents (kind, name, description, file) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {RESOURCE_COLUMNS}"
        );
        sqlx::query_as::<_, ResourceDocument>(&query)
            .bind(kind.value())
            .bind(&dto.name)
            .bind(dto.description.as_deref().unwrap_or(""))
            .bind(&dto.file)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        kind: ResourceKind,
        id: DbId,
        dto: &UpdateResourceDocument,
    ) -> Result<Option<ResourceDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE resource_documents SET \
                 name = COALESCE($3, name), \
                 description = COALESCE($4, description), \
                 file = COALESCE($5, file) \
             WHERE id = $1 AND kind = $2 \
             RETURNING {RESOURCE_COLUMNS}"
        );
        sqlx::query_as::<_, ResourceDocument>(&query)
            .bind(id)
            .bind(kind.value())
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.file)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, kind: ResourceKind, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resource_documents WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind.value())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
