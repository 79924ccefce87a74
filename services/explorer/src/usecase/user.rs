use serde_json::json;
use uuid::Uuid;

use exo_core::password::{hash_secret, verify_secret};

use crate::domain::repository::{BackupCodeRepository, OutboxRepository, UserRepository};
use crate::domain::types::{OutboxEvent, User, event_kind};
use crate::error::ExplorerServiceError;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, email: &str) -> Result<User, ExplorerServiceError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct UpdateProfileUseCase<U, O>
where
    U: UserRepository,
    O: OutboxRepository,
{
    pub users: U,
    pub outbox: O,
}

impl<U, O> UpdateProfileUseCase<U, O>
where
    U: UserRepository,
    O: OutboxRepository,
{
    pub async fn execute(
        &self,
        email: &str,
        input: UpdateProfileInput,
    ) -> Result<(), ExplorerServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;

        self.users
            .update_profile(
                user.id,
                input.first_name.as_deref(),
                input.last_name.as_deref(),
            )
            .await?;

        emit(
            &self.outbox,
            event_kind::PROFILE_UPDATED,
            user.id,
            json!({ "email": user.email }),
        )
        .await;
        tracing::info!(email = %user.email, "profile updated");
        Ok(())
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U, O>
where
    U: UserRepository,
    O: OutboxRepository,
{
    pub users: U,
    pub outbox: O,
}

impl<U, O> ChangePasswordUseCase<U, O>
where
    U: UserRepository,
    O: OutboxRepository,
{
    pub async fn execute(
        &self,
        email: &str,
        input: ChangePasswordInput,
    ) -> Result<(), ExplorerServiceError> {
        if input.new_password.is_empty() {
            return Err(ExplorerServiceError::MissingData);
        }
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;

        if !verify_secret(&input.current_password, &user.password_hash) {
            tracing::warn!(email = %user.email, "failed password change attempt");
            return Err(ExplorerServiceError::InvalidCredentials);
        }

        let new_hash = hash_secret(&input.new_password)?;
        self.users.update_password_hash(user.id, &new_hash).await?;

        emit(
            &self.outbox,
            event_kind::PASSWORD_CHANGED,
            user.id,
            json!({ "email": user.email }),
        )
        .await;
        tracing::info!(email = %user.email, "password changed");
        Ok(())
    }
}

// ── UpdatePreferences ────────────────────────────────────────────────────────

pub struct UpdatePreferencesInput {
    pub dark_mode: Option<bool>,
    pub language: Option<String>,
}

pub struct UpdatePreferencesUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdatePreferencesUseCase<U> {
    pub async fn execute(
        &self,
        email: &str,
        input: UpdatePreferencesInput,
    ) -> Result<(), ExplorerServiceError> {
        if input.dark_mode.is_none() && input.language.is_none() {
            return Err(ExplorerServiceError::MissingData);
        }
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;

        self.users
            .update_preferences(user.id, input.dark_mode, input.language.as_deref())
            .await
    }
}

// ── BackupCodeStatus ─────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
pub struct BackupCodeStatus {
    pub total: u64,
    pub used: u64,
    pub available: u64,
}

pub struct BackupCodeStatusUseCase<U, B>
where
    U: UserRepository,
    B: BackupCodeRepository,
{
    pub users: U,
    pub backup_codes: B,
}

impl<U, B> BackupCodeStatusUseCase<U, B>
where
    U: UserRepository,
    B: BackupCodeRepository,
{
    pub async fn execute(&self, email: &str) -> Result<BackupCodeStatus, ExplorerServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;

        let (total, used) = self.backup_codes.counts(user.id).await?;
        Ok(BackupCodeStatus {
            total,
            used,
            available: total - used,
        })
    }
}

/// Fire-and-forget outbox append; failures are logged, never propagated.
async fn emit<O: OutboxRepository>(outbox: &O, kind: &str, user_id: Uuid, payload: serde_json::Value) {
    let event = OutboxEvent {
        id: Uuid::new_v4(),
        kind: kind.to_owned(),
        payload,
        idempotency_key: format!("{kind}:{user_id}:{}", Uuid::new_v4()),
    };
    if let Err(e) = outbox.append(&event).await {
        tracing::warn!(error = %e, kind, "failed to record user action event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::BackupCode;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    struct MockUserRepo {
        user: Option<User>,
        profile_update: Mutex<Option<(Option<String>, Option<String>)>>,
        preferences_update: Mutex<Option<(Option<bool>, Option<String>)>>,
        password_update: Mutex<Option<String>>,
    }

    impl MockUserRepo {
        fn with_user(user: Option<User>) -> Self {
            Self {
                user,
                profile_update: Mutex::new(None),
                preferences_update: Mutex::new(None),
                password_update: Mutex::new(None),
            }
        }
    }

    impl UserRepository for MockUserRepo {
        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<User>, ExplorerServiceError> {
            Ok(self.user.clone())
        }
        async fn create(&self, _user: &User) -> Result<(), ExplorerServiceError> {
            Ok(())
        }
        async fn store_otp(
            &self,
            _user_id: Uuid,
            _otp_hash: &str,
            _expires_at: DateTime<Utc>,
            _event: &OutboxEvent,
        ) -> Result<(), ExplorerServiceError> {
            Ok(())
        }
        async fn confirm_otp(&self, _user_id: Uuid) -> Result<(), ExplorerServiceError> {
            Ok(())
        }
        async fn update_profile(
            &self,
            _user_id: Uuid,
            first_name: Option<&str>,
            last_name: Option<&str>,
        ) -> Result<(), ExplorerServiceError> {
            *self.profile_update.lock().unwrap() = Some((
                first_name.map(str::to_owned),
                last_name.map(str::to_owned),
            ));
            Ok(())
        }
        async fn update_preferences(
            &self,
            _user_id: Uuid,
            dark_mode: Option<bool>,
            language: Option<&str>,
        ) -> Result<(), ExplorerServiceError> {
            *self.preferences_update.lock().unwrap() =
                Some((dark_mode, language.map(str::to_owned)));
            Ok(())
        }
        async fn update_password_hash(
            &self,
            _user_id: Uuid,
            password_hash: &str,
        ) -> Result<(), ExplorerServiceError> {
            *self.password_update.lock().unwrap() = Some(password_hash.to_owned());
            Ok(())
        }
        async fn delete_by_email(&self, _email: &str) -> Result<bool, ExplorerServiceError> {
            Ok(false)
        }
        async fn delete_all(&self) -> Result<(), ExplorerServiceError> {
            Ok(())
        }
    }

    struct MockBackupCodeRepo {
        total: u64,
        used: u64,
    }

    impl BackupCodeRepository for MockBackupCodeRepo {
        async fn replace_for_user(
            &self,
            _user_id: Uuid,
            _codes: &[BackupCode],
        ) -> Result<(), ExplorerServiceError> {
            Ok(())
        }
        async fn list_unused(
            &self,
            _user_id: Uuid,
        ) -> Result<Vec<BackupCode>, ExplorerServiceError> {
            Ok(vec![])
        }
        async fn counts(&self, _user_id: Uuid) -> Result<(u64, u64), ExplorerServiceError> {
            Ok((self.total, self.used))
        }
        async fn mark_used(&self, _id: Uuid) -> Result<(), ExplorerServiceError> {
            Ok(())
        }
    }

    struct NullOutbox;

    impl OutboxRepository for NullOutbox {
        async fn append(&self, _event: &OutboxEvent) -> Result<(), ExplorerServiceError> {
            Ok(())
        }
    }

    fn test_user(password: &str) -> User {
        User::new_regular(
            "alice@example.com".to_owned(),
            hash_secret(password).unwrap(),
        )
    }

    #[tokio::test]
    async fn should_return_profile_for_known_user() {
        let uc = GetProfileUseCase {
            users: MockUserRepo::with_user(Some(test_user("pw"))),
        };
        let user = uc.execute("alice@example.com").await.unwrap();
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_profile() {
        let uc = GetProfileUseCase {
            users: MockUserRepo::with_user(None),
        };
        let result = uc.execute("ghost@example.com").await;
        assert!(matches!(result, Err(ExplorerServiceError::UserNotFound)));
    }

    #[tokio::test]
    async fn should_update_profile_names() {
        let uc = UpdateProfileUseCase {
            users: MockUserRepo::with_user(Some(test_user("pw"))),
            outbox: NullOutbox,
        };
        uc.execute(
            "alice@example.com",
            UpdateProfileInput {
                first_name: Some("Alice".to_owned()),
                last_name: Some("Martin".to_owned()),
            },
        )
        .await
        .unwrap();
        let update = uc.users.profile_update.lock().unwrap();
        assert_eq!(
            *update,
            Some((Some("Alice".to_owned()), Some("Martin".to_owned())))
        );
    }

    #[tokio::test]
    async fn should_change_password_with_correct_current() {
        let uc = ChangePasswordUseCase {
            users: MockUserRepo::with_user(Some(test_user("old-password"))),
            outbox: NullOutbox,
        };
        uc.execute(
            "alice@example.com",
            ChangePasswordInput {
                current_password: "old-password".to_owned(),
                new_password: "new-password".to_owned(),
            },
        )
        .await
        .unwrap();
        let stored = uc.users.password_update.lock().unwrap();
        assert!(verify_secret("new-password", stored.as_ref().unwrap()));
    }

    #[tokio::test]
    async fn should_reject_password_change_with_wrong_current() {
        let uc = ChangePasswordUseCase {
            users: MockUserRepo::with_user(Some(test_user("old-password"))),
            outbox: NullOutbox,
        };
        let result = uc
            .execute(
                "alice@example.com",
                ChangePasswordInput {
                    current_password: "not-the-password".to_owned(),
                    new_password: "new-password".to_owned(),
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(ExplorerServiceError::InvalidCredentials)
        ));
        assert!(uc.users.password_update.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn should_update_partial_preferences() {
        let uc = UpdatePreferencesUseCase {
            users: MockUserRepo::with_user(Some(test_user("pw"))),
        };
        uc.execute(
            "alice@example.com",
            UpdatePreferencesInput {
                dark_mode: Some(true),
                language: None,
            },
        )
        .await
        .unwrap();
        let update = uc.users.preferences_update.lock().unwrap();
        assert_eq!(*update, Some((Some(true), None)));
    }

    #[tokio::test]
    async fn should_reject_empty_preferences_update() {
        let uc = UpdatePreferencesUseCase {
            users: MockUserRepo::with_user(Some(test_user("pw"))),
        };
        let result = uc
            .execute(
                "alice@example.com",
                UpdatePreferencesInput {
                    dark_mode: None,
                    language: None,
                },
            )
            .await;
        assert!(matches!(result, Err(ExplorerServiceError::MissingData)));
    }

    #[tokio::test]
    async fn should_report_backup_code_counts() {
        let uc = BackupCodeStatusUseCase {
            users: MockUserRepo::with_user(Some(test_user("pw"))),
            backup_codes: MockBackupCodeRepo { total: 5, used: 2 },
        };
        let status = uc.execute("alice@example.com").await.unwrap();
        assert_eq!(
            status,
            BackupCodeStatus {
                total: 5,
                used: 2,
                available: 3
            }
        );
    }
}
