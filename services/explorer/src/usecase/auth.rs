use chrono::{Duration, Utc};
use rand::RngExt;
use serde_json::json;
use uuid::Uuid;

use exo_core::password::{hash_secret, verify_secret};

use crate::domain::repository::{BackupCodeRepository, OutboxRepository, UserRepository};
use crate::domain::types::{
    BACKUP_CODE_DIGITS, BackupCode, DEFAULT_BACKUP_CODE_COUNT, OTP_DIGITS, OutboxEvent, User,
    event_kind,
};
use crate::error::ExplorerServiceError;

/// Generate a fixed-width numeric code (no leading zero, uniform range).
fn generate_numeric_code(digits: u32) -> String {
    let mut rng = rand::rng();
    let lower = 10u64.pow(digits - 1);
    let upper = 10u64.pow(digits);
    rng.random_range(lower..upper).to_string()
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
}

pub struct RegisterUserUseCase<U, O>
where
    U: UserRepository,
    O: OutboxRepository,
{
    pub users: U,
    pub outbox: O,
}

impl<U, O> RegisterUserUseCase<U, O>
where
    U: UserRepository,
    O: OutboxRepository,
{
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, ExplorerServiceError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(ExplorerServiceError::MissingData);
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            tracing::warn!(email = %input.email, "registration attempt for existing email");
            return Err(ExplorerServiceError::UserAlreadyExists);
        }

        let password_hash = hash_secret(&input.password)?;
        let user = User::new_regular(input.email, password_hash);
        self.users.create(&user).await?;

        // Notification is fire-and-forget: a failed append must not undo the
        // registration.
        let event = OutboxEvent {
            id: Uuid::new_v4(),
            kind: event_kind::USER_REGISTERED.to_owned(),
            payload: json!({ "email": user.email }),
            idempotency_key: format!("{}:{}", event_kind::USER_REGISTERED, user.id),
        };
        if let Err(e) = self.outbox.append(&event).await {
            tracing::warn!(error = %e, "failed to record user_registered event");
        }

        Ok(user)
    }
}

// ── ProcessLogin ─────────────────────────────────────────────────────────────

pub struct ProcessLoginInput {
    pub email: String,
    pub password: String,
}

pub struct ProcessLoginUseCase<U: UserRepository> {
    pub users: U,
    pub otp_ttl_minutes: i64,
}

impl<U: UserRepository> ProcessLoginUseCase<U> {
    pub async fn execute(&self, input: ProcessLoginInput) -> Result<(), ExplorerServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;

        if !verify_secret(&input.password, &user.password_hash) {
            tracing::warn!(email = %user.email, "failed login attempt");
            return Err(ExplorerServiceError::InvalidCredentials);
        }

        let otp = generate_numeric_code(OTP_DIGITS);
        let otp_hash = hash_secret(&otp)?;
        let expires_at = Utc::now() + Duration::minutes(self.otp_ttl_minutes);

        // OTP state and the email event land in the same transaction: an OTP
        // the user never receives is indistinguishable from a wrong one.
        let event = OutboxEvent {
            id: Uuid::new_v4(),
            kind: event_kind::OTP_EMAIL_REQUESTED.to_owned(),
            payload: json!({ "email": user.email, "code": otp }),
            idempotency_key: format!(
                "{}:{}:{}",
                event_kind::OTP_EMAIL_REQUESTED,
                user.id,
                expires_at.timestamp_millis()
            ),
        };
        self.users
            .store_otp(user.id, &otp_hash, expires_at, &event)
            .await?;

        tracing::info!(email = %user.email, "OTP generated and queued for delivery");
        Ok(())
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub otp: String,
}

pub struct VerifyOtpUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> VerifyOtpUseCase<U> {
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<User, ExplorerServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;

        let (Some(otp_hash), Some(expires_at)) = (&user.otp_code_hash, user.otp_expires_at)
        else {
            return Err(ExplorerServiceError::InvalidOtp);
        };
        if Utc::now() > expires_at {
            return Err(ExplorerServiceError::InvalidOtp);
        }
        if !verify_secret(&input.otp, otp_hash) {
            return Err(ExplorerServiceError::InvalidOtp);
        }

        self.users.confirm_otp(user.id).await?;
        tracing::info!(email = %user.email, "OTP verified");
        Ok(user)
    }
}

// ── GenerateBackupCodes ──────────────────────────────────────────────────────

pub struct GenerateBackupCodesInput {
    pub email: String,
    pub count: Option<usize>,
}

pub struct GenerateBackupCodesUseCase<U, B>
where
    U: UserRepository,
    B: BackupCodeRepository,
{
    pub users: U,
    pub backup_codes: B,
}

impl<U, B> GenerateBackupCodesUseCase<U, B>
where
    U: UserRepository,
    B: BackupCodeRepository,
{
    /// Replace the user's backup codes and return the plain codes — the only
    /// time they are ever visible.
    pub async fn execute(
        &self,
        input: GenerateBackupCodesInput,
    ) -> Result<Vec<String>, ExplorerServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;

        let count = input.count.unwrap_or(DEFAULT_BACKUP_CODE_COUNT);
        let now = Utc::now();
        let mut plain = Vec::with_capacity(count);
        let mut codes = Vec::with_capacity(count);
        for _ in 0..count {
            let code = generate_numeric_code(BACKUP_CODE_DIGITS);
            codes.push(BackupCode {
                id: Uuid::new_v4(),
                user_id: user.id,
                code_hash: hash_secret(&code)?,
                used: false,
                created_at: now,
            });
            plain.push(code);
        }

        self.backup_codes.replace_for_user(user.id, &codes).await?;
        tracing::info!(email = %user.email, count, "backup codes regenerated");
        Ok(plain)
    }
}

// ── VerifyBackupCode ─────────────────────────────────────────────────────────

pub struct VerifyBackupCodeInput {
    pub email: String,
    pub backup_code: String,
}

pub struct VerifyBackupCodeUseCase<U, B>
where
    U: UserRepository,
    B: BackupCodeRepository,
{
    pub users: U,
    pub backup_codes: B,
}

impl<U, B> VerifyBackupCodeUseCase<U, B>
where
    U: UserRepository,
    B: BackupCodeRepository,
{
    pub async fn execute(
        &self,
        input: VerifyBackupCodeInput,
    ) -> Result<User, ExplorerServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ExplorerServiceError::UserNotFound)?;

        let unused = self.backup_codes.list_unused(user.id).await?;
        let matched = unused
            .iter()
            .find(|c| verify_secret(&input.backup_code, &c.code_hash));

        let Some(code) = matched else {
            tracing::warn!(email = %user.email, "invalid backup code");
            return Err(ExplorerServiceError::InvalidBackupCode);
        };

        self.backup_codes.mark_used(code.id).await?;
        tracing::info!(email = %user.email, "backup code redeemed");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::sync::Mutex;

    struct MockUserRepo {
        user: Option<User>,
        stored_otp: Mutex<Option<(String, DateTime<Utc>, OutboxEvent)>>,
        confirmed: Mutex<bool>,
        created: Mutex<bool>,
    }

    impl MockUserRepo {
        fn with_user(user: Option<User>) -> Self {
            Self {
                user,
                stored_otp: Mutex::new(None),
                confirmed: Mutex::new(false),
                created: Mutex::new(false),
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
            *self.created.lock().unwrap() = true;
            Ok(())
        }
        async fn store_otp(
            &self,
            _user_id: Uuid,
            otp_hash: &str,
            expires_at: DateTime<Utc>,
            event: &OutboxEvent,
        ) -> Result<(), ExplorerServiceError> {
            *self.stored_otp.lock().unwrap() =
                Some((otp_hash.to_owned(), expires_at, event.clone()));
            Ok(())
        }
        async fn confirm_otp(&self, _user_id: Uuid) -> Result<(), ExplorerServiceError> {
            *self.confirmed.lock().unwrap() = true;
            Ok(())
        }
        async fn update_profile(
            &self,
            _user_id: Uuid,
            _first_name: Option<&str>,
            _last_name: Option<&str>,
        ) -> Result<(), ExplorerServiceError> {
            Ok(())
        }
        async fn update_preferences(
            &self,
            _user_id: Uuid,
            _dark_mode: Option<bool>,
            _language: Option<&str>,
        ) -> Result<(), ExplorerServiceError> {
            Ok(())
        }
        async fn update_password_hash(
            &self,
            _user_id: Uuid,
            _password_hash: &str,
        ) -> Result<(), ExplorerServiceError> {
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
        unused: Vec<BackupCode>,
        replaced: Mutex<Option<Vec<BackupCode>>>,
        marked_used: Mutex<Option<Uuid>>,
    }

    impl MockBackupCodeRepo {
        fn new(unused: Vec<BackupCode>) -> Self {
            Self {
                unused,
                replaced: Mutex::new(None),
                marked_used: Mutex::new(None),
            }
        }
    }

    impl BackupCodeRepository for MockBackupCodeRepo {
        async fn replace_for_user(
            &self,
            _user_id: Uuid,
            codes: &[BackupCode],
        ) -> Result<(), ExplorerServiceError> {
            *self.replaced.lock().unwrap() = Some(codes.to_vec());
            Ok(())
        }
        async fn list_unused(
            &self,
            _user_id: Uuid,
        ) -> Result<Vec<BackupCode>, ExplorerServiceError> {
            Ok(self.unused.clone())
        }
        async fn counts(&self, _user_id: Uuid) -> Result<(u64, u64), ExplorerServiceError> {
            Ok((self.unused.len() as u64, 0))
        }
        async fn mark_used(&self, id: Uuid) -> Result<(), ExplorerServiceError> {
            *self.marked_used.lock().unwrap() = Some(id);
            Ok(())
        }
    }

    struct MockOutbox {
        appended: Mutex<Vec<OutboxEvent>>,
    }

    impl MockOutbox {
        fn new() -> Self {
            Self {
                appended: Mutex::new(vec![]),
            }
        }
    }

    impl OutboxRepository for MockOutbox {
        async fn append(&self, event: &OutboxEvent) -> Result<(), ExplorerServiceError> {
            self.appended.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    fn test_user(password: &str) -> User {
        User::new_regular(
            "alice@example.com".to_owned(),
            hash_secret(password).unwrap(),
        )
    }

    #[test]
    fn should_generate_codes_of_requested_width() {
        let otp = generate_numeric_code(OTP_DIGITS);
        assert_eq!(otp.len(), 6);
        assert!(otp.chars().all(|c| c.is_ascii_digit()));

        let backup = generate_numeric_code(BACKUP_CODE_DIGITS);
        assert_eq!(backup.len(), 8);
    }

    #[tokio::test]
    async fn should_register_new_user_and_emit_event() {
        let users = MockUserRepo::with_user(None);
        let outbox = MockOutbox::new();
        let uc = RegisterUserUseCase { users, outbox };
        let user = uc
            .execute(RegisterUserInput {
                email: "alice@example.com".to_owned(),
                password: "hunter2hunter2".to_owned(),
            })
            .await
            .unwrap();
        assert_eq!(user.language, "fr");
        assert!(!user.is_admin);
        assert!(*uc.users.created.lock().unwrap());
        let events = uc.outbox.appended.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, event_kind::USER_REGISTERED);
    }

    #[tokio::test]
    async fn should_reject_duplicate_registration() {
        let uc = RegisterUserUseCase {
            users: MockUserRepo::with_user(Some(test_user("pw-irrelevant"))),
            outbox: MockOutbox::new(),
        };
        let result = uc
            .execute(RegisterUserInput {
                email: "alice@example.com".to_owned(),
                password: "hunter2hunter2".to_owned(),
            })
            .await;
        assert!(matches!(
            result,
            Err(ExplorerServiceError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn should_reject_blank_registration_fields() {
        let uc = RegisterUserUseCase {
            users: MockUserRepo::with_user(None),
            outbox: MockOutbox::new(),
        };
        let result = uc
            .execute(RegisterUserInput {
                email: "  ".to_owned(),
                password: "hunter2hunter2".to_owned(),
            })
            .await;
        assert!(matches!(result, Err(ExplorerServiceError::MissingData)));
    }

    #[tokio::test]
    async fn should_store_otp_with_email_event_on_login() {
        let uc = ProcessLoginUseCase {
            users: MockUserRepo::with_user(Some(test_user("correct-password"))),
            otp_ttl_minutes: 5,
        };
        uc.execute(ProcessLoginInput {
            email: "alice@example.com".to_owned(),
            password: "correct-password".to_owned(),
        })
        .await
        .unwrap();

        let stored = uc.users.stored_otp.lock().unwrap();
        let (otp_hash, expires_at, event) = stored.as_ref().unwrap();
        assert!(*expires_at > Utc::now());
        assert_eq!(event.kind, event_kind::OTP_EMAIL_REQUESTED);
        // The plain code in the event payload must match the stored hash.
        let code = event.payload["code"].as_str().unwrap();
        assert_eq!(code.len(), 6);
        assert!(verify_secret(code, otp_hash));
    }

    #[tokio::test]
    async fn should_reject_login_with_wrong_password() {
        let uc = ProcessLoginUseCase {
            users: MockUserRepo::with_user(Some(test_user("correct-password"))),
            otp_ttl_minutes: 5,
        };
        let result = uc
            .execute(ProcessLoginInput {
                email: "alice@example.com".to_owned(),
                password: "wrong-password".to_owned(),
            })
            .await;
        assert!(matches!(
            result,
            Err(ExplorerServiceError::InvalidCredentials)
        ));
        assert!(uc.users.stored_otp.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_login_for_unknown_user() {
        let uc = ProcessLoginUseCase {
            users: MockUserRepo::with_user(None),
            otp_ttl_minutes: 5,
        };
        let result = uc
            .execute(ProcessLoginInput {
                email: "ghost@example.com".to_owned(),
                password: "whatever".to_owned(),
            })
            .await;
        assert!(matches!(result, Err(ExplorerServiceError::UserNotFound)));
    }

    #[tokio::test]
    async fn should_verify_valid_otp_and_clear_state() {
        let mut user = test_user("pw");
        user.otp_code_hash = Some(hash_secret("123456").unwrap());
        user.otp_expires_at = Some(Utc::now() + Duration::minutes(5));
        let uc = VerifyOtpUseCase {
            users: MockUserRepo::with_user(Some(user)),
        };
        uc.execute(VerifyOtpInput {
            email: "alice@example.com".to_owned(),
            otp: "123456".to_owned(),
        })
        .await
        .unwrap();
        assert!(*uc.users.confirmed.lock().unwrap());
    }

    #[tokio::test]
    async fn should_reject_expired_otp() {
        let mut user = test_user("pw");
        user.otp_code_hash = Some(hash_secret("123456").unwrap());
        user.otp_expires_at = Some(Utc::now() - Duration::minutes(1));
        let uc = VerifyOtpUseCase {
            users: MockUserRepo::with_user(Some(user)),
        };
        let result = uc
            .execute(VerifyOtpInput {
                email: "alice@example.com".to_owned(),
                otp: "123456".to_owned(),
            })
            .await;
        assert!(matches!(result, Err(ExplorerServiceError::InvalidOtp)));
        assert!(!*uc.users.confirmed.lock().unwrap());
    }

    #[tokio::test]
    async fn should_reject_otp_when_none_generated() {
        let uc = VerifyOtpUseCase {
            users: MockUserRepo::with_user(Some(test_user("pw"))),
        };
        let result = uc
            .execute(VerifyOtpInput {
                email: "alice@example.com".to_owned(),
                otp: "123456".to_owned(),
            })
            .await;
        assert!(matches!(result, Err(ExplorerServiceError::InvalidOtp)));
    }

    #[tokio::test]
    async fn should_reject_mismatched_otp() {
        let mut user = test_user("pw");
        user.otp_code_hash = Some(hash_secret("123456").unwrap());
        user.otp_expires_at = Some(Utc::now() + Duration::minutes(5));
        let uc = VerifyOtpUseCase {
            users: MockUserRepo::with_user(Some(user)),
        };
        let result = uc
            .execute(VerifyOtpInput {
                email: "alice@example.com".to_owned(),
                otp: "000000".to_owned(),
            })
            .await;
        assert!(matches!(result, Err(ExplorerServiceError::InvalidOtp)));
    }

    #[tokio::test]
    async fn should_generate_backup_codes_matching_stored_hashes() {
        let uc = GenerateBackupCodesUseCase {
            users: MockUserRepo::with_user(Some(test_user("pw"))),
            backup_codes: MockBackupCodeRepo::new(vec![]),
        };
        let plain = uc
            .execute(GenerateBackupCodesInput {
                email: "alice@example.com".to_owned(),
                count: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(plain.len(), 3);

        let replaced = uc.backup_codes.replaced.lock().unwrap();
        let stored = replaced.as_ref().unwrap();
        assert_eq!(stored.len(), 3);
        for (code, record) in plain.iter().zip(stored.iter()) {
            assert_eq!(code.len(), 8);
            assert!(verify_secret(code, &record.code_hash));
            assert!(!record.used);
        }
    }

    #[tokio::test]
    async fn should_redeem_backup_code_once() {
        let user = test_user("pw");
        let code = BackupCode {
            id: Uuid::new_v4(),
            user_id: user.id,
            code_hash: hash_secret("87654321").unwrap(),
            used: false,
            created_at: Utc::now(),
        };
        let code_id = code.id;
        let uc = VerifyBackupCodeUseCase {
            users: MockUserRepo::with_user(Some(user)),
            backup_codes: MockBackupCodeRepo::new(vec![code]),
        };
        uc.execute(VerifyBackupCodeInput {
            email: "alice@example.com".to_owned(),
            backup_code: "87654321".to_owned(),
        })
        .await
        .unwrap();
        assert_eq!(*uc.backup_codes.marked_used.lock().unwrap(), Some(code_id));
    }

    #[tokio::test]
    async fn should_reject_unknown_backup_code() {
        let uc = VerifyBackupCodeUseCase {
            users: MockUserRepo::with_user(Some(test_user("pw"))),
            backup_codes: MockBackupCodeRepo::new(vec![]),
        };
        let result = uc
            .execute(VerifyBackupCodeInput {
                email: "alice@example.com".to_owned(),
                backup_code: "00000000".to_owned(),
            })
            .await;
        assert!(matches!(
            result,
            Err(ExplorerServiceError::InvalidBackupCode)
        ));
    }
}
