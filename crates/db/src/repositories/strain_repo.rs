//! Repository for the strain catalog: listings, relevance-ranked search,
//! CRUD, and the lookup tables.

use budedex_core::search::{
    sort_column, sort_direction, SCORE_ALIAS_PREFIX, SCORE_EXACT_ALIAS, SCORE_EXACT_NAME,
    SCORE_MULTI_MATCH, SCORE_NAME_PREFIX, SCORE_SUBSTRING, SCORE_WORD_BOUNDARY,
};
use sqlx::PgPool;

use crate::models::strain::{
    CreateStrain, Effect, Flavor, MedicalCondition, PopularStrain, SearchFilters, Strain,
    StrainComplete, StrainQuery, StrainSearchHit, Terpene, UpdateStrain,
};

/// Provides catalog queries over `strains` and its derived views.
pub struct StrainRepo;

impl StrainRepo {
    // -----------------------------------------------------------------------
    // Listings
    // -----------------------------------------------------------------------

    /// A filtered, sorted page of `strains` rows with the total count.
    pub async fn list(
        pool: &PgPool,
        query: &StrainQuery,
    ) -> Result<(Vec<Strain>, i64), sqlx::Error> {
        Self::list_from(pool, "strains", query).await
    }

    /// Same filters over the `strain_complete` view.
    pub async fn list_complete(
        pool: &PgPool,
        query: &StrainQuery,
    ) -> Result<(Vec<StrainComplete>, i64), sqlx::Error> {
        Self::list_from(pool, "strain_complete", query).await
    }

    async fn list_from<T>(
        pool: &PgPool,
        table: &str,
        query: &StrainQuery,
    ) -> Result<(Vec<T>, i64), sqlx::Error>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let (where_clause, next_param) = build_listing_where(query);

        let count_sql = format!("SELECT COUNT(*) FROM {table} {where_clause}");
        let count_query = bind_listing_filters(sqlx::query_scalar::<_, i64>(&count_sql), query);
        let total = count_query.fetch_one(pool).await?;

        let sort = sort_column(query.sort.as_deref());
        let order = sort_direction(query.order.as_deref());
        let rows_sql = format!(
            "SELECT * FROM {table} {where_clause} \
             ORDER BY {sort} {order} \
             LIMIT ${next_param} OFFSET ${}",
            next_param + 1
        );
        let rows_query = bind_listing_filters(sqlx::query_as::<_, T>(&rows_sql), query)
            .bind(query.limit)
            .bind((query.page - 1) * query.limit);
        let rows = rows_query.fetch_all(pool).await?;

        Ok((rows, total))
    }

    /// Find a strain by exact name.
    pub async fn get_by_name(pool: &PgPool, name: &str) -> Result<Option<Strain>, sqlx::Error> {
        sqlx::query_as::<_, Strain>("SELECT * FROM strains WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a strain with its aggregated taxonomy and genetics.
    pub async fn get_complete(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<StrainComplete>, sqlx::Error> {
        sqlx::query_as::<_, StrainComplete>("SELECT * FROM strain_complete WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Relevance-ranked substring search over `strain_search`.
    ///
    /// Ranking is a fixed-priority CASE ladder evaluated top-down; ties
    /// break by rating descending (NULLS LAST) then review count.
    pub async fn search(
        pool: &PgPool,
        query: &str,
        filters: &SearchFilters,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<StrainSearchHit>, i64), sqlx::Error> {
        let (where_clause, next_param) = build_search_where(filters);

        let count_sql = format!("SELECT COUNT(*) FROM strain_search {where_clause}");
        let pattern = format!("%{query}%");
        let count_query = bind_search_filters(
            sqlx::query_scalar::<_, i64>(&count_sql).bind(&pattern),
            filters,
        );
        let total = count_query.fetch_one(pool).await?;

        // $1 is the ILIKE pattern; the clean query for exact/prefix scoring
        // comes after the filter params.
        let q = next_param;
        let rows_sql = format!(
            "SELECT *, \
                CASE \
                    WHEN LOWER(name) = LOWER(${q}) THEN {SCORE_EXACT_NAME} \
                    WHEN LOWER(name) LIKE LOWER(${q}) || '%' THEN {SCORE_NAME_PREFIX} \
                    WHEN EXISTS ( \
                        SELECT 1 FROM strain_akas sa \
                        WHERE sa.strain_name = strain_search.name \
                          AND LOWER(sa.aka) = LOWER(${q}) \
                    ) THEN {SCORE_EXACT_ALIAS} \
                    WHEN EXISTS ( \
                        SELECT 1 FROM strain_akas sa \
                        WHERE sa.strain_name = strain_search.name \
                          AND LOWER(sa.aka) LIKE LOWER(${q}) || '%' \
                    ) THEN {SCORE_ALIAS_PREFIX} \
                    WHEN LOWER(name) LIKE '% ' || LOWER(${q}) || ' %' \
                      OR LOWER(name) LIKE LOWER(${q}) || ' %' \
                      OR LOWER(name) LIKE '% ' || LOWER(${q}) THEN {SCORE_WORD_BOUNDARY} \
                    WHEN (LENGTH(search_text) - \
                          LENGTH(REPLACE(LOWER(search_text), LOWER(${q}), ''))) \
                         / LENGTH(${q}) > 1 THEN {SCORE_MULTI_MATCH} \
                    ELSE {SCORE_SUBSTRING} \
                END AS relevance_score \
             FROM strain_search \
             {where_clause} \
             ORDER BY relevance_score DESC, rating DESC NULLS LAST, review_count DESC \
             LIMIT ${} OFFSET ${}",
            q + 1,
            q + 2
        );
        let rows_query = bind_search_filters(
            sqlx::query_as::<_, StrainSearchHit>(&rows_sql).bind(&pattern),
            filters,
        )
        .bind(query)
        .bind(limit)
        .bind(offset);
        let rows = rows_query.fetch_all(pool).await?;

        Ok((rows, total))
    }

    /// Exact case-insensitive match on a name or alias.
    pub async fn search_exact(
        pool: &PgPool,
        query: &str,
    ) -> Result<Option<StrainComplete>, sqlx::Error> {
        sqlx::query_as::<_, StrainComplete>(
            "SELECT * FROM strain_complete \
             WHERE LOWER(name) = LOWER($1) \
                OR name IN ( \
                    SELECT sa.strain_name FROM strain_akas sa \
                    WHERE LOWER(sa.aka) = LOWER($1) \
                ) \
             LIMIT 1",
        )
        .bind(query)
        .fetch_optional(pool)
        .await
    }

    /// A page of complete strains in one category, with the total count.
    pub async fn by_category(
        pool: &PgPool,
        category: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<StrainComplete>, i64), sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM strain_complete WHERE category = $1",
        )
        .bind(category)
        .fetch_one(pool)
        .await?;

        let rows = sqlx::query_as::<_, StrainComplete>(
            "SELECT * FROM strain_complete WHERE category = $1 \
             ORDER BY name LIMIT $2 OFFSET $3",
        )
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok((rows, total))
    }

    /// A page of complete strains carrying one effect, best rated first.
    pub async fn by_effect(
        pool: &PgPool,
        effect: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<StrainComplete>, i64), sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM strain_complete \
             WHERE name IN (SELECT se.strain_name FROM strain_effects se WHERE se.effect = $1)",
        )
        .bind(effect)
        .fetch_one(pool)
        .await?;

        let rows = sqlx::query_as::<_, StrainComplete>(
            "SELECT * FROM strain_complete \
             WHERE name IN (SELECT se.strain_name FROM strain_effects se WHERE se.effect = $1) \
             ORDER BY rating DESC NULLS LAST, review_count DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(effect)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok((rows, total))
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a new strain, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStrain) -> Result<Strain, sqlx::Error> {
        sqlx::query_as::<_, Strain>(
            "INSERT INTO strains \
                 (name, url, type, thc, cbd, rating, review_count, top_effect, \
                  category, image_path, image_url, description) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), $8, $9, $10, $11, $12) \
             RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.url)
        .bind(&input.strain_type)
        .bind(&input.thc)
        .bind(&input.cbd)
        .bind(input.rating)
        .bind(input.review_count)
        .bind(&input.top_effect)
        .bind(&input.category)
        .bind(&input.image_path)
        .bind(&input.image_url)
        .bind(&input.description)
        .fetch_one(pool)
        .await
    }

    /// Update a strain. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `name` exists.
    pub async fn update(
        pool: &PgPool,
        name: &str,
        input: &UpdateStrain,
    ) -> Result<Option<Strain>, sqlx::Error> {
        sqlx::query_as::<_, Strain>(
            "UPDATE strains SET \
                url = COALESCE($2, url), \
                type = COALESCE($3, type), \
                thc = COALESCE($4, thc), \
                cbd = COALESCE($5, cbd), \
                rating = COALESCE($6, rating), \
                review_count = COALESCE($7, review_count), \
                top_effect = COALESCE($8, top_effect), \
                category = COALESCE($9, category), \
                image_path = COALESCE($10, image_path), \
                image_url = COALESCE($11, image_url), \
                description = COALESCE($12, description), \
                updated_at = NOW() \
             WHERE name = $1 \
             RETURNING *",
        )
        .bind(name)
        .bind(&input.url)
        .bind(&input.strain_type)
        .bind(&input.thc)
        .bind(&input.cbd)
        .bind(input.rating)
        .bind(input.review_count)
        .bind(&input.top_effect)
        .bind(&input.category)
        .bind(&input.image_path)
        .bind(&input.image_url)
        .bind(&input.description)
        .fetch_optional(pool)
        .await
    }

    /// Delete a strain. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM strains WHERE name = $1")
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Popularity & lookup tables
    // -----------------------------------------------------------------------

    /// The most popular strains, optionally filtered by type.
    pub async fn popular(
        pool: &PgPool,
        limit: i64,
        strain_type: Option<&str>,
    ) -> Result<Vec<PopularStrain>, sqlx::Error> {
        match strain_type {
            Some(t) => {
                sqlx::query_as::<_, PopularStrain>(
                    "SELECT * FROM popular_strains WHERE type = $2 \
                     ORDER BY popularity_score DESC LIMIT $1",
                )
                .bind(limit)
                .bind(t)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, PopularStrain>(
                    "SELECT * FROM popular_strains ORDER BY popularity_score DESC LIMIT $1",
                )
                .bind(limit)
                .fetch_all(pool)
                .await
            }
        }
    }

    /// All known effects.
    pub async fn effects(pool: &PgPool) -> Result<Vec<Effect>, sqlx::Error> {
        sqlx::query_as::<_, Effect>("SELECT * FROM effects ORDER BY effect")
            .fetch_all(pool)
            .await
    }

    /// All known flavors.
    pub async fn flavors(pool: &PgPool) -> Result<Vec<Flavor>, sqlx::Error> {
        sqlx::query_as::<_, Flavor>("SELECT * FROM flavors ORDER BY flavor")
            .fetch_all(pool)
            .await
    }

    /// All known terpenes.
    pub async fn terpenes(pool: &PgPool) -> Result<Vec<Terpene>, sqlx::Error> {
        sqlx::query_as::<_, Terpene>("SELECT * FROM terpenes ORDER BY terpene_name")
            .fetch_all(pool)
            .await
    }

    /// All known medical conditions.
    pub async fn medical_conditions(pool: &PgPool) -> Result<Vec<MedicalCondition>, sqlx::Error> {
        sqlx::query_as::<_, MedicalCondition>(
            "SELECT * FROM medical_conditions ORDER BY condition_name",
        )
        .fetch_all(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Dynamic WHERE construction
// ---------------------------------------------------------------------------

/// Build the listing WHERE clause, returning it with the next free
/// placeholder number. Bind order must match [`bind_listing_filters`].
fn build_listing_where(query: &StrainQuery) -> (String, usize) {
    let mut clause = String::from("WHERE 1=1");
    let mut param = 0;

    if query.strain_type.is_some() {
        param += 1;
        clause.push_str(&format!(" AND type = ${param}"));
    }
    if query.min_rating.is_some() {
        param += 1;
        clause.push_str(&format!(" AND rating >= ${param}"));
    }
    if query.max_rating.is_some() {
        param += 1;
        clause.push_str(&format!(" AND rating <= ${param}"));
    }
    if query.search.is_some() {
        param += 1;
        clause.push_str(&format!(
            " AND (name ILIKE ${param} OR description ILIKE ${param})"
        ));
    }

    (clause, param + 1)
}

/// Bind the listing filters in the order `build_listing_where` numbered them.
fn bind_listing_filters<'q, Q>(mut q: Q, query: &'q StrainQuery) -> Q
where
    Q: BindFilter<'q>,
{
    if let Some(t) = &query.strain_type {
        q = q.bind_str(t);
    }
    if let Some(min) = query.min_rating {
        q = q.bind_f64(min);
    }
    if let Some(max) = query.max_rating {
        q = q.bind_f64(max);
    }
    if let Some(search) = &query.search {
        q = q.bind_owned(format!("%{search}%"));
    }
    q
}

/// Build the search WHERE clause ($1 is always the ILIKE pattern),
/// returning it with the next free placeholder number.
fn build_search_where(filters: &SearchFilters) -> (String, usize) {
    let mut clause = String::from("WHERE search_text ILIKE $1");
    let mut param = 1;

    if filters.strain_type.is_some() {
        param += 1;
        clause.push_str(&format!(" AND type = ${param}"));
    }
    if filters.min_rating.is_some() {
        param += 1;
        clause.push_str(&format!(" AND rating >= ${param}"));
    }
    if filters.effects.as_deref().is_some_and(|v| !v.is_empty()) {
        param += 1;
        clause.push_str(&format!(
            " AND name IN ( \
                SELECT DISTINCT se.strain_name FROM strain_effects se \
                JOIN effects e ON se.effect = e.effect \
                WHERE e.effect = ANY(${param}) \
            )"
        ));
    }
    if filters.flavors.as_deref().is_some_and(|v| !v.is_empty()) {
        param += 1;
        clause.push_str(&format!(
            " AND name IN ( \
                SELECT DISTINCT sf.strain_name FROM strain_flavors sf \
                WHERE sf.flavor = ANY(${param}) \
            )"
        ));
    }
    if filters.terpenes.as_deref().is_some_and(|v| !v.is_empty()) {
        param += 1;
        clause.push_str(&format!(
            " AND name IN ( \
                SELECT DISTINCT st.strain_name FROM strain_terpenes st \
                WHERE st.terpene_name = ANY(${param}) \
            )"
        ));
    }
    if filters
        .medical_conditions
        .as_deref()
        .is_some_and(|v| !v.is_empty())
    {
        param += 1;
        clause.push_str(&format!(
            " AND name IN ( \
                SELECT DISTINCT smb.strain_name FROM strain_medical_benefits smb \
                WHERE smb.condition_name = ANY(${param}) \
            )"
        ));
    }

    (clause, param + 1)
}

/// Bind the search filters in the order `build_search_where` numbered them.
fn bind_search_filters<'q, Q>(mut q: Q, filters: &'q SearchFilters) -> Q
where
    Q: BindFilter<'q>,
{
    if let Some(t) = &filters.strain_type {
        q = q.bind_str(t);
    }
    if let Some(min) = filters.min_rating {
        q = q.bind_f64(min);
    }
    for list in [
        &filters.effects,
        &filters.flavors,
        &filters.terpenes,
        &filters.medical_conditions,
    ] {
        if let Some(values) = list.as_deref() {
            if !values.is_empty() {
                q = q.bind_slice(values);
            }
        }
    }
    q
}

/// Small adapter so the count and row queries share one bind path.
trait BindFilter<'q>: Sized {
    fn bind_str(self, value: &'q str) -> Self;
    fn bind_owned(self, value: String) -> Self;
    fn bind_f64(self, value: f64) -> Self;
    fn bind_slice(self, value: &'q [String]) -> Self;
}

impl<'q, O> BindFilter<'q>
    for sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>
{
    fn bind_str(self, value: &'q str) -> Self {
        self.bind(value)
    }
    fn bind_owned(self, value: String) -> Self {
        self.bind(value)
    }
    fn bind_f64(self, value: f64) -> Self {
        self.bind(value)
    }
    fn bind_slice(self, value: &'q [String]) -> Self {
        self.bind(value)
    }
}

impl<'q, O> BindFilter<'q>
    for sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>
{
    fn bind_str(self, value: &'q str) -> Self {
        self.bind(value)
    }
    fn bind_owned(self, value: String) -> Self {
        self.bind(value)
    }
    fn bind_f64(self, value: f64) -> Self {
        self.bind(value)
    }
    fn bind_slice(self, value: &'q [String]) -> Self {
        self.bind(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_where_numbers_params_in_order() {
        let query = StrainQuery {
            strain_type: Some("Indica".into()),
            min_rating: Some(4.0),
            search: Some("kush".into()),
            ..Default::default()
        };
        let (clause, next) = build_listing_where(&query);
        assert_eq!(
            clause,
            "WHERE 1=1 AND type = $1 AND rating >= $2 AND (name ILIKE $3 OR description ILIKE $3)"
        );
        assert_eq!(next, 4);
    }

    #[test]
    fn listing_where_empty_filters() {
        let (clause, next) = build_listing_where(&StrainQuery::default());
        assert_eq!(clause, "WHERE 1=1");
        assert_eq!(next, 1);
    }

    #[test]
    fn search_where_starts_after_pattern() {
        let filters = SearchFilters {
            min_rating: Some(3.5),
            effects: Some(vec!["Relaxed".into()]),
            ..Default::default()
        };
        let (clause, next) = build_search_where(&filters);
        assert!(clause.starts_with("WHERE search_text ILIKE $1"));
        assert!(clause.contains("rating >= $2"));
        assert!(clause.contains("ANY($3)"));
        assert_eq!(next, 4);
    }

    #[test]
    fn search_where_skips_empty_lists() {
        let filters = SearchFilters {
            effects: Some(vec![]),
            ..Default::default()
        };
        let (clause, next) = build_search_where(&filters);
        assert_eq!(clause, "WHERE search_text ILIKE $1");
        assert_eq!(next, 2);
    }
}
