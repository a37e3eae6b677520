use sqlx::PgPool;

use crate::dto::pagination::{Page, PageQuery};
use crate::error::{Error, Result};
use crate::models::notification::{Notification, NotificationKind};

const MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a notification record. Callers on side-effect paths catch
    /// and log the error instead of propagating it.
    pub async fn notify(
        &self,
        user_id: i64,
        kind: NotificationKind,
        content: &str,
        redirect_url: &str,
    ) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, kind, content, redirect_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(content)
        .bind(redirect_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    pub async fn list(&self, user_id: i64, query: PageQuery) -> Result<Page<Notification>> {
        let pg = query.validate(MAX_PAGE_SIZE)?;

        let items = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(pg.page_size)
        .bind(pg.offset())
        .fetch_all(&self.pool)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(items, pg, total))
    }

    /// Idempotent: marking an already-read notification returns it
    /// unchanged.
    pub async fn mark_read(&self, id: i64, user_id: i64) -> Result<Notification> {
        let notification =
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::NotFound("Notification not found".to_string()))?;
        if notification.user_id != user_id {
            return Err(Error::Forbidden(
                "You can only mark your own notifications as read".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn unread_count(&self, user_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
