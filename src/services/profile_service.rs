use sqlx::PgPool;
use validator::Validate;

use crate::dto::profile_dto::{
    ProfileData, ProfileResponse, UpdateProfileBlock, UpdateProfilePayload,
};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::user::{Club, Demandante, Role, User};

#[derive(Clone)]
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: i64) -> Result<ProfileResponse> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let profile = match user.role()? {
            Role::Club => {
                let club = sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await?;
                ProfileData::Club(club.into())
            }
            Role::Demandante => {
                let demandante =
                    sqlx::query_as::<_, Demandante>("SELECT * FROM demandantes WHERE user_id = $1")
                        .bind(user_id)
                        .fetch_one(&self.pool)
                        .await?;
                ProfileData::Demandante(demandante.into())
            }
        };

        Ok(ProfileResponse {
            user: (&user).into(),
            profile,
        })
    }

    /// Partial update: absent fields keep their stored values. The tagged
    /// profile block must match the user's role; the role itself never
    /// changes.
    pub async fn update(&self, user_id: i64, payload: UpdateProfilePayload) -> Result<ProfileResponse> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        if let Some(block) = &payload.user {
            block.validate()?;
            let updated = sqlx::query(
                r#"
                UPDATE users
                SET name = COALESCE($2, name),
                    surname = COALESCE($3, surname),
                    phone = COALESCE($4, phone),
                    email = COALESCE($5, email)
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .bind(&block.name)
            .bind(&block.surname)
            .bind(&block.phone)
            .bind(&block.email)
            .execute(&self.pool)
            .await;

            if let Err(err) = updated {
                if is_unique_violation(&err, "users_email_key") {
                    return Err(Error::Conflict("Email is already registered".to_string()));
                }
                return Err(err.into());
            }
        }

        if let Some(block) = payload.profile {
            if block.role() != user.role()? {
                return Err(Error::BadRequest(
                    "Profile payload does not match your role".to_string(),
                ));
            }
            match block {
                UpdateProfileBlock::Club(club) => {
                    sqlx::query(
                        r#"
                        UPDATE clubs
                        SET club_name = COALESCE($2, club_name),
                            address = COALESCE($3, address),
                            city = COALESCE($4, city),
                            postal_code = COALESCE($5, postal_code),
                            region = COALESCE($6, region),
                            country = COALESCE($7, country),
                            description = COALESCE($8, description),
                            website = COALESCE($9, website),
                            contact_phone = COALESCE($10, contact_phone)
                        WHERE user_id = $1
                        "#,
                    )
                    .bind(user_id)
                    .bind(&club.club_name)
                    .bind(&club.address)
                    .bind(&club.city)
                    .bind(&club.postal_code)
                    .bind(&club.region)
                    .bind(&club.country)
                    .bind(&club.description)
                    .bind(&club.website)
                    .bind(&club.contact_phone)
                    .execute(&self.pool)
                    .await?;
                }
                UpdateProfileBlock::Demandante(demandante) => {
                    sqlx::query(
                        r#"
                        UPDATE demandantes
                        SET birth_date = COALESCE($2, birth_date),
                            experience = COALESCE($3, experience),
                            education = COALESCE($4, education),
                            english_level = COALESCE($5, english_level),
                            other_languages = COALESCE($6, other_languages),
                            availability = COALESCE($7, availability),
                            can_travel = COALESCE($8, can_travel),
                            resume_url = COALESCE($9, resume_url),
                            photo_url = COALESCE($10, photo_url)
                        WHERE user_id = $1
                        "#,
                    )
                    .bind(user_id)
                    .bind(demandante.birth_date)
                    .bind(&demandante.experience)
                    .bind(&demandante.education)
                    .bind(&demandante.english_level)
                    .bind(&demandante.other_languages)
                    .bind(&demandante.availability)
                    .bind(demandante.can_travel)
                    .bind(&demandante.resume_url)
                    .bind(&demandante.photo_url)
                    .execute(&self.pool)
                    .await?;
                }
            }
        }

        self.get(user_id).await
    }
}
