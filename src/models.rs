use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Tourism,
    Business,
    Family,
    Study,
    Other,
}

impl Purpose {
    pub const ALL: [Purpose; 5] = [
        Purpose::Tourism,
        Purpose::Business,
        Purpose::Family,
        Purpose::Study,
        Purpose::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Purpose::Tourism => "tourism",
            Purpose::Business => "business",
            Purpose::Family => "family",
            Purpose::Study => "study",
            Purpose::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Purpose::Tourism => "관광",
            Purpose::Business => "출장",
            Purpose::Family => "가족 방문",
            Purpose::Study => "유학/연수",
            Purpose::Other => "기타",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelStyle {
    Solo,
    Couple,
    Family,
    Friends,
    Group,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 5] = [
        TravelStyle::Solo,
        TravelStyle::Couple,
        TravelStyle::Family,
        TravelStyle::Friends,
        TravelStyle::Group,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TravelStyle::Solo => "solo",
            TravelStyle::Couple => "couple",
            TravelStyle::Family => "family",
            TravelStyle::Friends => "friends",
            TravelStyle::Group => "group",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TravelStyle::Solo => "혼자",
            TravelStyle::Couple => "커플",
            TravelStyle::Family => "가족",
            TravelStyle::Friends => "친구",
            TravelStyle::Group => "단체",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value.trim())
    }
}

/// One trip as stored in the hosted `travel_logs` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TravelLogEntry {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub country: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub purpose: Purpose,
    #[serde(default)]
    pub travel_style: Option<TravelStyle>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TravelLogEntry {
    /// Inclusive day count; `None` when the range is inverted.
    pub fn duration_days(&self) -> Option<i64> {
        inclusive_days(self.start_date, self.end_date)
    }

    pub fn year(&self) -> i32 {
        self.start_date.year()
    }
}

pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> Option<i64> {
    if end < start {
        return None;
    }
    Some((end - start).num_days() + 1)
}

/// The writable columns of a travel log.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TravelLogDraft {
    pub country: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub purpose: Purpose,
    pub travel_style: Option<TravelStyle>,
    pub rating: Option<u8>,
    pub memo: Option<String>,
    pub tags: Vec<String>,
}

/// Raw log form as posted by the browser. Every field arrives as text.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LogForm {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub travel_style: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub tags: String,
}

impl LogForm {
    pub fn from_entry(entry: &TravelLogEntry) -> Self {
        Self {
            country: entry.country.clone(),
            city: entry.city.clone(),
            start_date: entry.start_date.to_string(),
            end_date: entry.end_date.to_string(),
            purpose: entry.purpose.as_str().to_string(),
            travel_style: entry
                .travel_style
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            rating: entry.rating.map(|r| r.to_string()).unwrap_or_default(),
            memo: entry.memo.clone().unwrap_or_default(),
            tags: entry.tags.join(", "),
        }
    }

    /// Checks the form the way the entry screen does before any round trip.
    /// `known_country` decides whether a code exists in the reference list.
    pub fn validate(
        &self,
        known_country: impl Fn(&str) -> bool,
    ) -> Result<TravelLogDraft, ValidationError> {
        let country = self.country.trim().to_ascii_uppercase();
        if country.is_empty() {
            return Err(ValidationError::Missing("국가"));
        }
        if country.len() != 2 || !known_country(&country) {
            return Err(ValidationError::UnknownCountry(country));
        }

        let city = self.city.trim();
        if city.is_empty() {
            return Err(ValidationError::Missing("도시"));
        }

        let start_date = parse_date(&self.start_date, "출발일")?;
        let end_date = parse_date(&self.end_date, "도착일")?;
        if end_date < start_date {
            return Err(ValidationError::DateOrder);
        }

        let purpose = Purpose::parse(&self.purpose).ok_or(ValidationError::Missing("여행 목적"))?;

        let travel_style = match self.travel_style.trim() {
            "" => None,
            raw => Some(TravelStyle::parse(raw).ok_or(ValidationError::Invalid("여행 스타일"))?),
        };

        let rating = match self.rating.trim() {
            "" => None,
            raw => {
                let value: u8 = raw.parse().map_err(|_| ValidationError::RatingRange)?;
                if !(MIN_RATING..=MAX_RATING).contains(&value) {
                    return Err(ValidationError::RatingRange);
                }
                Some(value)
            }
        };

        let memo = Some(self.memo.trim().to_string()).filter(|m| !m.is_empty());

        Ok(TravelLogDraft {
            country,
            city: city.to_string(),
            start_date,
            end_date,
            purpose,
            travel_style,
            rating,
            memo,
            tags: parse_tags(&self.tags),
        })
    }
}

fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::Invalid(field))
}

/// Splits a comma separated tag list, dropping blanks and duplicates.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}을(를) 입력해주세요.")]
    Missing(&'static str),
    #[error("{0} 값이 올바르지 않습니다.")]
    Invalid(&'static str),
    #[error("알 수 없는 국가 코드입니다: {0}")]
    UnknownCountry(String),
    #[error("도착일은 출발일보다 빠를 수 없습니다.")]
    DateOrder,
    #[error("평점은 1에서 5 사이여야 합니다.")]
    RatingRange,
    #[error("비밀번호가 일치하지 않습니다.")]
    PasswordMismatch,
    #[error("{field}은(는) {min}자 이상이어야 합니다.")]
    TooShort { field: &'static str, min: usize },
    #[error("{field}은(는) {max}자 이하여야 합니다.")]
    TooLong { field: &'static str, max: usize },
}

/// Filters and paging for a travel-log query.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LogQuery {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
    #[serde(default)]
    pub purpose: Option<Purpose>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// Years accepted from a route, query string or filter form. Anything
/// outside cannot be written as a four-digit date literal.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

pub fn checked_year(year: i32) -> Option<i32> {
    (MIN_YEAR..=MAX_YEAR).contains(&year).then_some(year)
}

impl LogQuery {
    pub fn year(year: i32) -> Self {
        Self {
            year_from: Some(year),
            year_to: Some(year),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Card,
    List,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Card => "card",
            ViewMode::List => "list",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "card" => Some(ViewMode::Card),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

/// Fields stored in the hosted auth user's metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence_country: Option<String>,
}

/// Profile fields kept only in local storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub residence_country: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

pub const DEFAULT_NAME: &str = "여행자";
pub const DEFAULT_AVATAR: &str = "globe";
pub const AVATARS: [&str; 6] = ["globe", "plane", "camera", "backpack", "mountain", "island"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub bio: String,
    pub residence_country: Option<String>,
    pub avatar: String,
}

impl UserProfile {
    /// Merges the two profile sources field by field:
    /// auth metadata, then local storage, then the default.
    pub fn merge(auth: Option<&UserMetadata>, local: &LocalProfile) -> Self {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let name = auth
            .and_then(|meta| non_empty(&meta.name))
            .or_else(|| non_empty(&local.name))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let residence_country = auth
            .and_then(|meta| non_empty(&meta.residence_country))
            .or_else(|| non_empty(&local.residence_country));
        let bio = non_empty(&local.bio).unwrap_or_default();
        let avatar = non_empty(&local.avatar)
            .filter(|a| AVATARS.contains(&a.as_str()))
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string());

        Self {
            name,
            bio,
            residence_country,
            avatar,
        }
    }
}

pub fn avatar_glyph(avatar: &str) -> &'static str {
    match avatar {
        "plane" => "✈️",
        "camera" => "📷",
        "backpack" => "🎒",
        "mountain" => "🏔️",
        "island" => "🏝️",
        _ => "🌏",
    }
}

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NAME_LEN: usize = 30;
pub const MAX_BIO_LEN: usize = 200;

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(value)
}

fn email(raw: &str) -> Result<String, ValidationError> {
    let value = required(raw, "이메일")?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(value.to_string()),
        _ => Err(ValidationError::Invalid("이메일")),
    }
}

fn password(raw: &str) -> Result<&str, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Missing("비밀번호"));
    }
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "비밀번호",
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(raw)
}

fn bounded(value: &str, field: &'static str, max: usize) -> Result<Option<String>, ValidationError> {
    let value = value.trim();
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(Some(value.to_string()).filter(|v| !v.is_empty()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        let email = email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::Missing("비밀번호"));
        }
        Ok((email, self.password.clone()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    #[serde(default)]
    pub residence_country: String,
}

/// A checked sign-up request.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub metadata: UserMetadata,
}

impl SignUpForm {
    pub fn validate(
        &self,
        known_country: impl Fn(&str) -> bool,
    ) -> Result<SignUpRequest, ValidationError> {
        let name = required(&self.name, "이름")?;
        let name = bounded(name, "이름", MAX_NAME_LEN)?;
        let email = email(&self.email)?;
        let password = password(&self.password)?;
        if password != self.password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        let residence_country = residence(&self.residence_country, known_country)?;

        Ok(SignUpRequest {
            email,
            password: password.to_string(),
            metadata: UserMetadata {
                name,
                residence_country,
            },
        })
    }
}

fn residence(
    raw: &str,
    known_country: impl Fn(&str) -> bool,
) -> Result<Option<String>, ValidationError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.is_empty() {
        return Ok(None);
    }
    if !known_country(&code) {
        return Err(ValidationError::UnknownCountry(code));
    }
    Ok(Some(code))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetForm {
    #[serde(default)]
    pub email: String,
}

impl ResetForm {
    pub fn validate(&self) -> Result<String, ValidationError> {
        email(&self.email)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub residence_country: String,
    #[serde(default)]
    pub avatar: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            bio: profile.bio.clone(),
            residence_country: profile.residence_country.clone().unwrap_or_default(),
            avatar: profile.avatar.clone(),
        }
    }

    /// Splits the edit into the auth metadata part and the local part.
    pub fn validate(
        &self,
        known_country: impl Fn(&str) -> bool,
    ) -> Result<(UserMetadata, LocalProfile), ValidationError> {
        let name = bounded(required(&self.name, "이름")?, "이름", MAX_NAME_LEN)?;
        let bio = bounded(&self.bio, "자기소개", MAX_BIO_LEN)?;
        let residence_country = residence(&self.residence_country, known_country)?;
        let avatar = match self.avatar.trim() {
            "" => None,
            avatar if AVATARS.contains(&avatar) => Some(avatar.to_string()),
            _ => return Err(ValidationError::Invalid("아바타")),
        };

        let metadata = UserMetadata {
            name: name.clone(),
            residence_country: residence_country.clone(),
        };
        let local = LocalProfile {
            name,
            bio,
            residence_country,
            avatar,
        };
        Ok((metadata, local))
    }
}
