use sqlx::PgPool;

use crate::dto::offer_dto::CreateOfferPayload;
use crate::dto::pagination::{Page, PageQuery};
use crate::error::{Error, Result};
use crate::models::offer::{Offer, OfferDetail, OfferWithClub};
use crate::models::user::Club;

const MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct OfferService {
    pool: PgPool,
}

impl OfferService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn club_for_user(&self, user_id: i64) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(club)
    }

    pub async fn list(&self, query: PageQuery) -> Result<Page<OfferWithClub>> {
        let pg = query.validate(MAX_PAGE_SIZE)?;

        let items = sqlx::query_as::<_, OfferWithClub>(
            r#"
            SELECT o.*, c.club_name, c.city AS club_city, c.region AS club_region
            FROM offers o
            JOIN clubs c ON c.id = o.club_id
            ORDER BY o.published_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pg.page_size)
        .bind(pg.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM offers")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, pg, total))
    }

    pub async fn get(&self, id: i64) -> Result<OfferDetail> {
        let offer = sqlx::query_as::<_, OfferDetail>(
            r#"
            SELECT o.*, c.club_name, c.city AS club_city, c.region AS club_region,
                   c.address AS club_address, c.website AS club_website,
                   c.contact_phone AS club_contact_phone
            FROM offers o
            JOIN clubs c ON c.id = o.club_id
            WHERE o.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Offer not found".to_string()))?;

        Ok(offer)
    }

    pub async fn create(&self, user_id: i64, payload: CreateOfferPayload) -> Result<Offer> {
        let club = self
            .club_for_user(user_id)
            .await?
            .ok_or_else(|| Error::BadRequest("The user has no club profile".to_string()))?;

        let offer = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (
                club_id, title, description, sport_type, contract_type, schedule,
                salary, location, required_experience, required_education,
                required_languages, deadline
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(club.id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.sport_type)
        .bind(payload.contract_type.as_deref().unwrap_or("Indefinido"))
        .bind(payload.schedule.as_deref().unwrap_or("Completa"))
        .bind(payload.salary)
        .bind(&payload.location)
        .bind(&payload.required_experience)
        .bind(&payload.required_education)
        .bind(&payload.required_languages)
        .bind(payload.deadline)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(offer_id = offer.id, club_id = club.id, "offer published");
        Ok(offer)
    }

    pub async fn list_mine(&self, user_id: i64, query: PageQuery) -> Result<Page<Offer>> {
        let pg = query.validate(MAX_PAGE_SIZE)?;
        let club = self
            .club_for_user(user_id)
            .await?
            .ok_or_else(|| Error::BadRequest("The user has no club profile".to_string()))?;

        let items = sqlx::query_as::<_, Offer>(
            r#"
            SELECT * FROM offers
            WHERE club_id = $1
            ORDER BY published_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(club.id)
        .bind(pg.page_size)
        .bind(pg.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM offers WHERE club_id = $1")
            .bind(club.id)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, pg, total))
    }

    /// Deletes the offer and everything that references it. Applications
    /// go first, in the same transaction, so no orphan rows survive.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<()> {
        let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Offer not found".to_string()))?;

        let club = self
            .club_for_user(user_id)
            .await?
            .ok_or_else(|| Error::BadRequest("The user has no club profile".to_string()))?;
        if offer.club_id != club.id {
            return Err(Error::Forbidden(
                "You can only delete your own offers".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM applications WHERE offer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(offer_id = id, club_id = club.id, "offer deleted");
        Ok(())
    }
}
