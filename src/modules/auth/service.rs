use tracing::instrument;

use super::model::{AuthResponse, LoginRequest, RegisterRequestDto};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all)]
    pub async fn register(
        state: &AppState,
        dto: RegisterRequestDto,
    ) -> Result<AuthResponse, AppError> {
        if state.users.find_by_email(&dto.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = hash_password(&dto.password, state.hashing_config.bcrypt_cost)?;

        // The unique index backstops the pre-check above under concurrent
        // registration; the repository maps that violation to Conflict too.
        let user = state
            .users
            .create(&dto.name, &dto.email, &password_hash)
            .await?;

        let token = create_access_token(user.id, &user.email, &state.jwt_config)?;

        Ok(AuthResponse { user, token })
    }

    #[instrument(skip_all)]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<AuthResponse, AppError> {
        // Unknown email and wrong password produce the same message so the
        // endpoint cannot be used to probe for accounts.
        let record = state
            .users
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &record.password_hash) {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let user = record.into_user();
        let token = create_access_token(user.id, &user.email, &state.jwt_config)?;

        Ok(AuthResponse { user, token })
    }
}
