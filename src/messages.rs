//! User-facing message catalogue.
//!
//! The hosted auth API reports failures as English sentences. They are
//! classified into [`ErrorKind`] once, at the client boundary, and every
//! screen renders the localized text from there.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidCredentials,
    EmailNotConfirmed,
    UserAlreadyRegistered,
    WeakPassword,
    InvalidEmail,
    EmailRateLimited,
    RequestThrottled,
    SignupDisabled,
    UserNotFound,
    SamePassword,
    SessionExpired,
    SessionMissing,
    LinkExpired,
    PermissionDenied,
    RecordNotFound,
    NetworkFailure,
    ServiceUnavailable,
    /// A message with no catalogue entry; carried through verbatim.
    Untranslated(String),
}

/// Known English messages, matched case-insensitively by prefix.
static KNOWN_MESSAGES: [(&str, ErrorKind); 19] = [
    ("invalid login credentials", ErrorKind::InvalidCredentials),
    ("email not confirmed", ErrorKind::EmailNotConfirmed),
    ("user already registered", ErrorKind::UserAlreadyRegistered),
    ("a user with this email address has already been registered", ErrorKind::UserAlreadyRegistered),
    ("password should be at least", ErrorKind::WeakPassword),
    ("unable to validate email address", ErrorKind::InvalidEmail),
    ("email rate limit exceeded", ErrorKind::EmailRateLimited),
    ("for security purposes, you can only request this", ErrorKind::RequestThrottled),
    ("signups not allowed", ErrorKind::SignupDisabled),
    ("user not found", ErrorKind::UserNotFound),
    ("new password should be different", ErrorKind::SamePassword),
    ("invalid refresh token", ErrorKind::SessionExpired),
    ("jwt expired", ErrorKind::SessionExpired),
    ("auth session missing", ErrorKind::SessionMissing),
    ("email link is invalid or has expired", ErrorKind::LinkExpired),
    ("new row violates row-level security policy", ErrorKind::PermissionDenied),
    ("permission denied", ErrorKind::PermissionDenied),
    ("failed to fetch", ErrorKind::NetworkFailure),
    ("network request failed", ErrorKind::NetworkFailure),
];

impl ErrorKind {
    pub fn classify(message: &str) -> Self {
        let lowered = message.trim().to_lowercase();
        KNOWN_MESSAGES
            .iter()
            .find(|(pattern, _)| lowered.starts_with(*pattern))
            .map(|(_, kind)| kind.clone())
            .unwrap_or_else(|| ErrorKind::Untranslated(message.trim().to_string()))
    }

    pub fn is_translated(&self) -> bool {
        !matches!(self, ErrorKind::Untranslated(_))
    }

    pub fn localized(&self) -> &str {
        match self {
            ErrorKind::InvalidCredentials => "이메일 또는 비밀번호가 올바르지 않습니다.",
            ErrorKind::EmailNotConfirmed => "이메일 인증이 완료되지 않았습니다. 메일함을 확인해주세요.",
            ErrorKind::UserAlreadyRegistered => "이미 가입된 이메일입니다.",
            ErrorKind::WeakPassword => "비밀번호는 6자 이상이어야 합니다.",
            ErrorKind::InvalidEmail => "올바른 이메일 형식이 아닙니다.",
            ErrorKind::EmailRateLimited => "이메일 발송 한도를 초과했습니다. 잠시 후 다시 시도해주세요.",
            ErrorKind::RequestThrottled => "보안을 위해 잠시 후 다시 요청해주세요.",
            ErrorKind::SignupDisabled => "현재 회원가입이 허용되지 않습니다.",
            ErrorKind::UserNotFound => "사용자를 찾을 수 없습니다.",
            ErrorKind::SamePassword => "새 비밀번호는 기존 비밀번호와 달라야 합니다.",
            ErrorKind::SessionExpired => "세션이 만료되었습니다. 다시 로그인해주세요.",
            ErrorKind::SessionMissing => "로그인이 필요합니다.",
            ErrorKind::LinkExpired => "링크가 유효하지 않거나 만료되었습니다.",
            ErrorKind::PermissionDenied => "이 작업을 수행할 권한이 없습니다.",
            ErrorKind::RecordNotFound => "여행 기록을 찾을 수 없습니다.",
            ErrorKind::NetworkFailure => "네트워크 연결을 확인해주세요.",
            ErrorKind::ServiceUnavailable => "서버에 일시적인 문제가 발생했습니다. 잠시 후 다시 시도해주세요.",
            ErrorKind::Untranslated(raw) => raw,
        }
    }
}

pub const SIGNED_IN: &str = "로그인되었습니다.";
pub const SIGNED_UP: &str = "회원가입이 완료되었습니다.";
pub const CONFIRM_EMAIL: &str = "가입 확인 메일을 보냈습니다. 메일함을 확인해주세요.";
pub const SIGNED_OUT: &str = "로그아웃되었습니다.";
pub const RESET_SENT: &str = "비밀번호 재설정 메일을 보냈습니다.";
pub const LOG_CREATED: &str = "여행 기록이 저장되었습니다.";
pub const LOG_UPDATED: &str = "여행 기록이 수정되었습니다.";
pub const LOG_DELETED: &str = "여행 기록이 삭제되었습니다.";
pub const PROFILE_SAVED: &str = "프로필이 저장되었습니다.";
pub const SETTINGS_SAVED: &str = "설정이 저장되었습니다.";
pub const COUNTRIES_REFRESHED: &str = "국가 정보를 새로 불러왔습니다.";
pub const STATS_UNAVAILABLE: &str = "통계를 계산하지 못했습니다. 일부 기록을 확인해주세요.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_messages_are_translated() {
        let kind = ErrorKind::classify("Invalid login credentials");
        assert_eq!(kind, ErrorKind::InvalidCredentials);
        assert_eq!(kind.localized(), "이메일 또는 비밀번호가 올바르지 않습니다.");

        assert_eq!(
            ErrorKind::classify("Password should be at least 6 characters."),
            ErrorKind::WeakPassword
        );
        assert_eq!(
            ErrorKind::classify(
                "For security purposes, you can only request this once every 60 seconds"
            ),
            ErrorKind::RequestThrottled
        );
        assert_eq!(ErrorKind::classify("EMAIL NOT CONFIRMED"), ErrorKind::EmailNotConfirmed);
    }

    #[test]
    fn unknown_messages_are_kept_verbatim() {
        let kind = ErrorKind::classify("  Something odd happened ");
        assert!(!kind.is_translated());
        assert_eq!(kind.localized(), "Something odd happened");
    }

    #[test]
    fn every_catalogue_entry_has_a_localized_text() {
        for (pattern, kind) in KNOWN_MESSAGES.iter() {
            assert!(kind.is_translated(), "{pattern}");
            assert!(!kind.localized().is_empty());
            assert_eq!(&ErrorKind::classify(pattern), kind);
        }
    }
}
