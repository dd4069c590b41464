//! Recipe store queries
//!
//! A recipe lives in three rows sharing one primary key: `recipes`,
//! `recipe_stats` and `training_data`. Every read is an inner join of the
//! three, so a parent missing either owned row reads as not found. Writes
//! touching more than one table run in a single transaction; dropping an
//! uncommitted transaction rolls it back.

use chrono::{DateTime, SecondsFormat, Utc};
use rlp_common::models::{Recipe, RecipeStats, TrainingData};
use rlp_common::pagination::PageRequest;
use rlp_common::{Error, Job, NewRecipe, RecipePatch, RecipeWithRelations, Result, SearchCriteria};
use sqlx::any::{Any, AnyRow};
use sqlx::{AnyConnection, AnyPool, QueryBuilder, Row};
use tracing::debug;

use crate::error::{is_unique_violation, CONFLICT_MESSAGE};

const JOINED_COLUMNS: &str = r#"
    SELECT r.id, r.name, r.job, r.recipe_level, r.master_book_level, r.stars,
           r.patch_version, r.collected_at,
           s.max_durability, s.max_quality, s.required_durability,
           t.required_craftsmanship, t.required_control,
           t.progress_per_100, t.quality_per_100
"#;

const JOINED_TABLES: &str = r#"
    FROM recipes r
    JOIN recipe_stats s ON s.id = r.id
    JOIN training_data t ON t.id = r.id
"#;

fn row_to_recipe(row: &AnyRow) -> Result<RecipeWithRelations> {
    let job_code: String = row.try_get("job")?;
    let job = Job::from_code(&job_code)
        .ok_or_else(|| Error::Store(format!("Unknown job code in database: {}", job_code)))?;

    let collected_raw: String = row.try_get("collected_at")?;
    let collected_at = DateTime::parse_from_rfc3339(&collected_raw)
        .map_err(|e| {
            Error::Store(format!(
                "Invalid collected_at timestamp {:?}: {}",
                collected_raw, e
            ))
        })?
        .with_timezone(&Utc);

    Ok(RecipeWithRelations {
        recipe: Recipe {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            job,
            recipe_level: row.try_get("recipe_level")?,
            master_book_level: row.try_get("master_book_level")?,
            stars: row.try_get("stars")?,
            patch_version: row.try_get("patch_version")?,
            collected_at,
        },
        stats: RecipeStats {
            max_durability: row.try_get("max_durability")?,
            max_quality: row.try_get("max_quality")?,
            required_durability: row.try_get("required_durability")?,
        },
        training: TrainingData {
            required_craftsmanship: row.try_get("required_craftsmanship")?,
            required_control: row.try_get("required_control")?,
            progress_per_100: row.try_get("progress_per_100")?,
            quality_per_100: row.try_get("quality_per_100")?,
        },
    })
}

/// Creation timestamp as stored: UTC, RFC 3339, microsecond precision
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn creation_error(error: sqlx::Error) -> Error {
    if is_unique_violation(&error) {
        Error::Conflict(CONFLICT_MESSAGE.to_string())
    } else {
        Error::Store(format!("Failed to create recipe: {}", error))
    }
}

async fn insert_rows(conn: &mut AnyConnection, recipe: &NewRecipe) -> std::result::Result<i64, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO recipes
            (name, job, recipe_level, master_book_level, stars, patch_version, collected_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(recipe.name.as_str())
    .bind(recipe.job.as_str())
    .bind(recipe.recipe_level)
    .bind(recipe.master_book_level)
    .bind(recipe.stars)
    .bind(recipe.patch_version.as_str())
    .bind(now_timestamp())
    .execute(&mut *conn)
    .await?;

    // (name, job) is unique, so this finds the row just inserted on any driver
    let id: i64 = sqlx::query_scalar("SELECT id FROM recipes WHERE name = ? AND job = ?")
        .bind(recipe.name.as_str())
        .bind(recipe.job.as_str())
        .fetch_one(&mut *conn)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO recipe_stats (id, max_durability, max_quality, required_durability)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(recipe.stats.max_durability)
    .bind(recipe.stats.max_quality)
    .bind(recipe.stats.required_durability)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO training_data
            (id, required_craftsmanship, required_control, progress_per_100, quality_per_100)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(recipe.training.required_craftsmanship)
    .bind(recipe.training.required_control)
    .bind(recipe.training.progress_per_100)
    .bind(recipe.training.quality_per_100)
    .execute(&mut *conn)
    .await?;

    Ok(id)
}

/// Insert a recipe with both owned rows atomically
///
/// A duplicate `(name, job)` yields [`Error::Conflict`]; any other failure
/// yields [`Error::Store`] with nothing persisted.
pub async fn create_recipe(db: &AnyPool, recipe: &NewRecipe) -> Result<RecipeWithRelations> {
    let mut tx = db.begin().await.map_err(creation_error)?;
    let id = insert_rows(&mut tx, recipe).await.map_err(creation_error)?;
    tx.commit().await.map_err(creation_error)?;

    debug!(recipe_id = id, name = %recipe.name, job = %recipe.job, "Inserted recipe");
    get_recipe(db, id).await
}

/// Fetch one recipe joined with its stats and training data
pub async fn get_recipe(db: &AnyPool, id: i64) -> Result<RecipeWithRelations> {
    let sql = format!("{} {} WHERE r.id = ?", JOINED_COLUMNS, JOINED_TABLES);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {} not found", id)))?;

    row_to_recipe(&row)
}

/// Apply a partial update, touching only tables with supplied fields
pub async fn update_recipe(db: &AnyPool, id: i64, patch: &RecipePatch) -> Result<RecipeWithRelations> {
    let mut tx = db.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(Error::NotFound(format!("Recipe {} not found", id)));
    }

    if patch.touches_recipe() {
        let mut qb = QueryBuilder::<Any>::new("UPDATE recipes SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = &patch.name {
            set.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(job) = patch.job {
            set.push("job = ").push_bind_unseparated(job.as_str());
        }
        if let Some(level) = patch.recipe_level {
            set.push("recipe_level = ").push_bind_unseparated(level);
        }
        if let Some(level) = patch.master_book_level {
            set.push("master_book_level = ").push_bind_unseparated(level);
        }
        if let Some(stars) = patch.stars {
            set.push("stars = ").push_bind_unseparated(stars);
        }
        if let Some(version) = &patch.patch_version {
            set.push("patch_version = ").push_bind_unseparated(version.clone());
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.build().execute(&mut *tx).await.map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict(CONFLICT_MESSAGE.to_string())
            } else {
                Error::Database(e)
            }
        })?;
    }

    if patch.touches_stats() {
        let mut qb = QueryBuilder::<Any>::new("UPDATE recipe_stats SET ");
        let mut set = qb.separated(", ");
        if let Some(value) = patch.max_durability {
            set.push("max_durability = ").push_bind_unseparated(value);
        }
        if let Some(value) = patch.max_quality {
            set.push("max_quality = ").push_bind_unseparated(value);
        }
        if let Some(value) = patch.required_durability {
            set.push("required_durability = ").push_bind_unseparated(value);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.build().execute(&mut *tx).await?;
    }

    if patch.touches_training() {
        let mut qb = QueryBuilder::<Any>::new("UPDATE training_data SET ");
        let mut set = qb.separated(", ");
        if let Some(value) = patch.required_craftsmanship {
            set.push("required_craftsmanship = ").push_bind_unseparated(value);
        }
        if let Some(value) = patch.required_control {
            set.push("required_control = ").push_bind_unseparated(value);
        }
        if let Some(value) = patch.progress_per_100 {
            set.push("progress_per_100 = ").push_bind_unseparated(value);
        }
        if let Some(value) = patch.quality_per_100 {
            set.push("quality_per_100 = ").push_bind_unseparated(value);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.build().execute(&mut *tx).await?;
    }

    tx.commit().await?;
    debug!(recipe_id = id, "Updated recipe");
    get_recipe(db, id).await
}

/// Delete a recipe and its owned rows, children first
///
/// Returns `false` when no recipe with `id` exists.
pub async fn delete_recipe(db: &AnyPool, id: i64) -> Result<bool> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM training_data WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipe_stats WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;
    debug!(recipe_id = id, "Deleted recipe");
    Ok(true)
}

fn push_filters(qb: &mut QueryBuilder<'_, Any>, criteria: &SearchCriteria) {
    qb.push(" WHERE 1 = 1");

    if let Some(name) = &criteria.name {
        qb.push(" AND r.name LIKE ").push_bind(format!("%{}%", name));
    }
    if let Some(job) = criteria.job {
        qb.push(" AND r.job = ").push_bind(job.as_str());
    }
    if let Some(min) = criteria.min_level {
        qb.push(" AND r.recipe_level >= ").push_bind(min);
    }
    if let Some(max) = criteria.max_level {
        qb.push(" AND r.recipe_level <= ").push_bind(max);
    }
    if let Some(level) = criteria.master_book_level {
        qb.push(" AND r.master_book_level = ").push_bind(level);
    }
    if let Some(stars) = criteria.stars {
        qb.push(" AND r.stars = ").push_bind(stars);
    }
    if let Some(version) = &criteria.patch_version {
        qb.push(" AND r.patch_version = ").push_bind(version.clone());
    }
    if let Some(min) = criteria.min_craftsmanship {
        qb.push(" AND t.required_craftsmanship >= ").push_bind(min);
    }
    if let Some(max) = criteria.max_craftsmanship {
        qb.push(" AND t.required_craftsmanship <= ").push_bind(max);
    }
    if let Some(min) = criteria.min_control {
        qb.push(" AND t.required_control >= ").push_bind(min);
    }
    if let Some(max) = criteria.max_control {
        qb.push(" AND t.required_control <= ").push_bind(max);
    }
}

/// Filtered page of recipes ordered by id, plus the total match count
pub async fn search(db: &AnyPool, criteria: &SearchCriteria) -> Result<(Vec<RecipeWithRelations>, i64)> {
    let mut count_qb = QueryBuilder::<Any>::new("SELECT COUNT(*) ");
    count_qb.push(JOINED_TABLES);
    push_filters(&mut count_qb, criteria);
    let total: i64 = count_qb.build_query_scalar().fetch_one(db).await?;

    let mut qb = QueryBuilder::<Any>::new(JOINED_COLUMNS);
    qb.push(JOINED_TABLES);
    push_filters(&mut qb, criteria);
    qb.push(" ORDER BY r.id ASC LIMIT ")
        .push_bind(criteria.page.limit)
        .push(" OFFSET ")
        .push_bind(criteria.page.offset);

    let rows = qb.build().fetch_all(db).await?;
    let items = rows.iter().map(row_to_recipe).collect::<Result<Vec<_>>>()?;

    debug!(total, returned = items.len(), "Recipe search");
    Ok((items, total))
}

/// Unfiltered page of recipes ordered by id, plus the total count
pub async fn list_page(db: &AnyPool, page: PageRequest) -> Result<(Vec<RecipeWithRelations>, i64)> {
    search(
        db,
        &SearchCriteria {
            page,
            ..Default::default()
        },
    )
    .await
}
