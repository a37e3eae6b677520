use sqlx::PgPool;

use crate::dto::application_dto::{ApplicationsQuery, ApplyPayload, RespondPayload};
use crate::dto::pagination::{Page, Pagination};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::application::{
    Application, ApplicationListRow, ApplicationStatus, Decision,
};
use crate::models::notification::NotificationKind;
use crate::models::offer::Offer;
use crate::models::user::Role;
use crate::realtime::push::{LivePush, NotificationEvent, NOTIFICATION_EVENT};
use crate::services::notification_service::NotificationService;

const MAX_PAGE_SIZE: i64 = 50;

const APPLICATION_UNIQUE_CONSTRAINT: &str = "uq_application_offer_demandante";

/// The application lifecycle: pending on creation, then exactly one
/// transition to accepted or rejected. Every state change fans out a
/// best-effort notification to the other side.
#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
    notifications: NotificationService,
    push: LivePush,
}

impl ApplicationService {
    pub fn new(pool: PgPool, notifications: NotificationService, push: LivePush) -> Self {
        Self {
            pool,
            notifications,
            push,
        }
    }

    pub async fn apply(
        &self,
        offer_id: i64,
        user_id: i64,
        payload: ApplyPayload,
    ) -> Result<Application> {
        if payload.message.trim().is_empty() {
            return Err(Error::BadRequest(
                "Application message must not be empty".to_string(),
            ));
        }

        let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE id = $1")
            .bind(offer_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Offer not found".to_string()))?;

        let demandante_id =
            sqlx::query_scalar::<_, i64>("SELECT id FROM demandantes WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| {
                    Error::BadRequest("The user has no demandante profile".to_string())
                })?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM applications WHERE offer_id = $1 AND demandante_id = $2",
        )
        .bind(offer_id)
        .bind(demandante_id)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "You have already applied to this offer".to_string(),
            ));
        }

        let inserted = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (offer_id, demandante_id, application_message)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(offer_id)
        .bind(demandante_id)
        .bind(&payload.message)
        .fetch_one(&self.pool)
        .await;

        // The pre-check above is check-then-act; two concurrent identical
        // requests race to this insert and the unique index decides. The
        // loser gets the same Conflict it would have seen a moment later.
        let application = match inserted {
            Ok(application) => application,
            Err(err) if is_unique_violation(&err, APPLICATION_UNIQUE_CONSTRAINT) => {
                return Err(Error::Conflict(
                    "You have already applied to this offer".to_string(),
                ));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            application_id = application.id,
            offer_id,
            demandante_id,
            "application created"
        );
        self.notify_new_application(&offer, &application).await;

        Ok(application)
    }

    pub async fn list(
        &self,
        user_id: i64,
        user_role: Role,
        query: ApplicationsQuery,
    ) -> Result<Page<ApplicationListRow>> {
        let requested: Role = query.rol.parse()?;
        if requested != user_role {
            return Err(Error::Forbidden(
                "The rol parameter must match your own role".to_string(),
            ));
        }
        let pg = query.pagination().validate(MAX_PAGE_SIZE)?;

        match requested {
            Role::Demandante => self.list_for_demandante(user_id, pg).await,
            Role::Club => self.list_for_club(user_id, pg).await,
        }
    }

    async fn list_for_demandante(
        &self,
        user_id: i64,
        pg: Pagination,
    ) -> Result<Page<ApplicationListRow>> {
        let demandante_id =
            sqlx::query_scalar::<_, i64>("SELECT id FROM demandantes WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| {
                    Error::BadRequest("The user has no demandante profile".to_string())
                })?;

        let items = sqlx::query_as::<_, ApplicationListRow>(
            r#"
            SELECT a.*, o.title AS offer_title, o.sport_type, o.salary, o.location,
                   c.club_name, c.city AS club_city
            FROM applications a
            JOIN offers o ON o.id = a.offer_id
            JOIN clubs c ON c.id = o.club_id
            WHERE a.demandante_id = $1
            ORDER BY a.applied_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(demandante_id)
        .bind(pg.page_size)
        .bind(pg.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM applications WHERE demandante_id = $1",
        )
        .bind(demandante_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Page::new(items, pg, total))
    }

    async fn list_for_club(&self, user_id: i64, pg: Pagination) -> Result<Page<ApplicationListRow>> {
        let club_id = sqlx::query_scalar::<_, i64>("SELECT id FROM clubs WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::BadRequest("The user has no club profile".to_string()))?;

        // A club with no offers has no applications to list; skip the
        // joined query entirely.
        let owned_offers =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM offers WHERE club_id = $1")
                .bind(club_id)
                .fetch_one(&self.pool)
                .await?;
        if owned_offers == 0 {
            return Ok(Page::empty(pg));
        }

        let items = sqlx::query_as::<_, ApplicationListRow>(
            r#"
            SELECT a.*, o.title AS offer_title, o.sport_type, o.salary, o.location,
                   c.club_name, c.city AS club_city,
                   u.name AS demandante_name, u.surname AS demandante_surname,
                   u.email AS demandante_email, u.phone AS demandante_phone,
                   d.experience AS demandante_experience,
                   d.education AS demandante_education
            FROM applications a
            JOIN offers o ON o.id = a.offer_id
            JOIN clubs c ON c.id = o.club_id
            JOIN demandantes d ON d.id = a.demandante_id
            JOIN users u ON u.id = d.user_id
            WHERE o.club_id = $1
            ORDER BY a.applied_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(club_id)
        .bind(pg.page_size)
        .bind(pg.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM applications a
            JOIN offers o ON o.id = a.offer_id
            WHERE o.club_id = $1
            "#,
        )
        .bind(club_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Page::new(items, pg, total))
    }

    pub async fn respond(
        &self,
        application_id: i64,
        user_id: i64,
        payload: RespondPayload,
    ) -> Result<Application> {
        let decision = Decision::parse(&payload.decision)?;

        let application =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
                .bind(application_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE id = $1")
            .bind(application.offer_id)
            .fetch_one(&self.pool)
            .await?;

        // Only the club that owns the offer behind the application may
        // decide it.
        let club_id = sqlx::query_scalar::<_, i64>("SELECT id FROM clubs WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::BadRequest("The user has no club profile".to_string()))?;
        if offer.club_id != club_id {
            return Err(Error::Forbidden(
                "You can only respond to applications for your own offers".to_string(),
            ));
        }

        if application.status()? != ApplicationStatus::Pending {
            return Err(Error::Conflict(
                "The application has already been responded".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2, response_message = $3, responded_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(application_id)
        .bind(decision.as_str())
        .bind(&payload.response_message)
        .fetch_optional(&self.pool)
        .await?
        // A concurrent respond won the status guard; same outcome as the
        // pre-check.
        .ok_or_else(|| {
            Error::Conflict("The application has already been responded".to_string())
        })?;

        tracing::info!(
            application_id,
            decision = decision.as_str(),
            "application responded"
        );
        self.notify_response(&offer, &updated, decision).await;

        Ok(updated)
    }

    fn new_application_content(offer_title: &str) -> String {
        format!("New candidate in '{}'", offer_title)
    }

    fn response_content(offer_title: &str, decision: Decision) -> String {
        format!(
            "Your application to '{}' has been {}",
            offer_title,
            decision.as_str()
        )
    }

    /// Best-effort fan-out to the club that owns the offer. Failures are
    /// logged and swallowed; the application has already been committed.
    async fn notify_new_application(&self, offer: &Offer, application: &Application) {
        let club_user_id =
            match sqlx::query_scalar::<_, i64>("SELECT user_id FROM clubs WHERE id = $1")
                .bind(offer.club_id)
                .fetch_optional(&self.pool)
                .await
            {
                Ok(Some(id)) => id,
                Ok(None) => {
                    tracing::warn!(offer_id = offer.id, "offer owner club vanished, skipping notification");
                    return;
                }
                Err(err) => {
                    tracing::warn!(offer_id = offer.id, error = %err, "could not resolve offer owner");
                    return;
                }
            };

        let content = Self::new_application_content(&offer.title);
        if let Err(err) = self
            .notifications
            .notify(
                club_user_id,
                NotificationKind::NewApplication,
                &content,
                "/club/solicitudes",
            )
            .await
        {
            tracing::warn!(user_id = club_user_id, error = %err, "failed to record notification");
        }

        let event = NotificationEvent {
            solicitud_id: Some(application.id),
            oferta_id: offer.id,
            tipo: NotificationKind::NewApplication.as_str().to_string(),
            contenido: content,
            estado: None,
        };
        self.push
            .emit_to_user(club_user_id, NOTIFICATION_EVENT, &event)
            .await;
    }

    /// Same policy for the demandante side of a decision.
    async fn notify_response(&self, offer: &Offer, application: &Application, decision: Decision) {
        let demandante_user_id =
            match sqlx::query_scalar::<_, i64>("SELECT user_id FROM demandantes WHERE id = $1")
                .bind(application.demandante_id)
                .fetch_optional(&self.pool)
                .await
            {
                Ok(Some(id)) => id,
                Ok(None) => {
                    tracing::warn!(
                        application_id = application.id,
                        "demandante vanished, skipping notification"
                    );
                    return;
                }
                Err(err) => {
                    tracing::warn!(application_id = application.id, error = %err, "could not resolve demandante");
                    return;
                }
            };

        let content = Self::response_content(&offer.title, decision);
        if let Err(err) = self
            .notifications
            .notify(
                demandante_user_id,
                NotificationKind::ApplicationResponse,
                &content,
                "/demandante/solicitudes",
            )
            .await
        {
            tracing::warn!(user_id = demandante_user_id, error = %err, "failed to record notification");
        }

        let event = NotificationEvent {
            solicitud_id: Some(application.id),
            oferta_id: offer.id,
            tipo: NotificationKind::ApplicationResponse.as_str().to_string(),
            contenido: content,
            estado: Some(decision.as_str().to_string()),
        };
        self.push
            .emit_to_user(demandante_user_id, NOTIFICATION_EVENT, &event)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_content_names_the_offer() {
        assert_eq!(
            ApplicationService::new_application_content("Entrenador de porteros"),
            "New candidate in 'Entrenador de porteros'"
        );
    }

    #[test]
    fn response_content_carries_the_decision() {
        assert_eq!(
            ApplicationService::response_content("Coach", Decision::Accepted),
            "Your application to 'Coach' has been accepted"
        );
        assert_eq!(
            ApplicationService::response_content("Coach", Decision::Rejected),
            "Your application to 'Coach' has been rejected"
        );
    }
}
