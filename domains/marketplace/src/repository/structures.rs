//! Structure profile repository

use crate::domain::entities::Structure;
use sqlx::SqlitePool;
use uuid::Uuid;
use venturesroom_common::Result;

/// All columns in the structures table, used for SELECT and RETURNING clauses.
pub(crate) const STRUCTURE_COLUMNS: &str = "\
    id, owner_id, name, structure_type, description, website, \
    is_approved, created_at, updated_at";

#[derive(Clone)]
pub struct StructureRepository {
    pool: SqlitePool,
}

impl StructureRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find an approved structure by ID (public view)
    pub async fn find_approved(&self, id: Uuid) -> Result<Option<Structure>> {
        let query =
            format!("SELECT {STRUCTURE_COLUMNS} FROM structures WHERE id = ? AND is_approved = 1");
        let structure = sqlx::query_as::<_, Structure>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(structure)
    }

    /// Find the structure owned by a user
    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Structure>> {
        let query = format!("SELECT {STRUCTURE_COLUMNS} FROM structures WHERE owner_id = ?");
        let structure = sqlx::query_as::<_, Structure>(&query)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(structure)
    }

    /// List approved structures, optionally filtered by type
    pub async fn list_approved(
        &self,
        structure_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Structure>> {
        let query = format!(
            "SELECT {STRUCTURE_COLUMNS} FROM structures \
             WHERE is_approved = 1 AND (?1 IS NULL OR structure_type = ?1) \
             ORDER BY name ASC LIMIT ?2 OFFSET ?3"
        );
        let structures = sqlx::query_as::<_, Structure>(&query)
            .bind(structure_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(structures)
    }

    /// Persist editable profile fields
    pub async fn update_profile(&self, structure: &Structure) -> Result<Option<Structure>> {
        let query = format!(
            "UPDATE structures SET name = ?, structure_type = ?, description = ?, \
             website = ?, updated_at = ? \
             WHERE id = ? RETURNING {STRUCTURE_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Structure>(&query)
            .bind(&structure.name)
            .bind(&structure.structure_type)
            .bind(&structure.description)
            .bind(&structure.website)
            .bind(structure.updated_at)
            .bind(structure.id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }
}
