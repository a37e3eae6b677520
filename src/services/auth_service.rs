use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{
    LoginPayload, LoginResponse, RegisterPayload, RegisterProfile, UserSummary,
};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::user::User;
use crate::utils::{crypto, jwt};

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the user and its role profile in one transaction. The
    /// tagged profile payload decides the role, so the one-profile-per-user
    /// invariant holds by construction.
    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        match &payload.profile {
            RegisterProfile::Club(club) => club.validate()?,
            RegisterProfile::Demandante(_) => {}
        }

        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict("Email is already registered".to_string()));
        }

        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;
        let role = payload.profile.role();

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, surname, phone, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.name)
        .bind(&payload.surname)
        .bind(&payload.phone)
        .bind(role.as_str())
        .fetch_one(&mut *tx)
        .await;

        // Concurrent registration of the same email: the unique index on
        // users.email decides, and the loser sees the same Conflict as the
        // pre-check would have produced.
        let user = match inserted {
            Ok(user) => user,
            Err(err) if is_unique_violation(&err, "users_email_key") => {
                return Err(Error::Conflict("Email is already registered".to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        match payload.profile {
            RegisterProfile::Club(club) => {
                sqlx::query(
                    r#"
                    INSERT INTO clubs (
                        user_id, club_name, address, city, postal_code, region,
                        country, description, website, contact_phone
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    "#,
                )
                .bind(user.id)
                .bind(&club.club_name)
                .bind(&club.address)
                .bind(&club.city)
                .bind(&club.postal_code)
                .bind(&club.region)
                .bind(club.country.as_deref().unwrap_or("España"))
                .bind(&club.description)
                .bind(&club.website)
                .bind(club.contact_phone.as_deref().unwrap_or(&payload.phone))
                .execute(&mut *tx)
                .await?;
            }
            RegisterProfile::Demandante(demandante) => {
                sqlx::query(
                    r#"
                    INSERT INTO demandantes (
                        user_id, birth_date, experience, education, english_level,
                        other_languages, availability, can_travel, resume_url, photo_url
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    "#,
                )
                .bind(user.id)
                .bind(demandante.birth_date)
                .bind(&demandante.experience)
                .bind(&demandante.education)
                .bind(&demandante.english_level)
                .bind(&demandante.other_languages)
                .bind(&demandante.availability)
                .bind(demandante.can_travel)
                .bind(&demandante.resume_url)
                .bind(&demandante.photo_url)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(user_id = user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, payload: LoginPayload) -> Result<LoginResponse> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        let valid = crypto::verify_password(&payload.password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))?;
        if !valid {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        let claims = jwt::Claims::for_user(&user);
        let token = jwt::issue_token(&claims, &crate::config::get_config().jwt_secret)?;

        Ok(LoginResponse {
            token,
            user: UserSummary::from(&user),
        })
    }
}
