use super::{View, country_label, country_options, stat_card};
use crate::countries::CountryStore;
use crate::models::{AVATARS, ProfileForm, UserProfile, avatar_glyph};
use crate::stats::BasicStats;
use crate::ui::{NavItem, escape};

pub struct ProfileView<'a> {
    pub store: &'a CountryStore,
    pub profile: UserProfile,
    pub email: Option<String>,
    pub stats: BasicStats,
}

impl View for ProfileView<'_> {
    fn title(&self) -> String {
        "프로필".to_string()
    }

    fn active_nav(&self) -> NavItem {
        NavItem::Profile
    }

    fn render(&self) -> String {
        let profile = &self.profile;
        let residence = profile
            .residence_country
            .as_deref()
            .map(|code| country_label(self.store, code))
            .unwrap_or_else(|| "-".to_string());
        let bio = if profile.bio.is_empty() {
            r#"<p class="hint">아직 자기소개가 없어요.</p>"#.to_string()
        } else {
            format!("<p>{}</p>", escape(&profile.bio))
        };

        format!(
            r#"<section class="card">
  <h1>{avatar} {name}</h1>
  <p class="subtitle">{email}</p>
  {bio}
  <p>거주 국가: {residence}</p>
  <div class="grid">{trips}{countries}{days}</div>
  <a class="button" href="/profile/edit">프로필 수정</a>
</section>"#,
            avatar = avatar_glyph(&profile.avatar),
            name = escape(&profile.name),
            email = escape(self.email.as_deref().unwrap_or("")),
            trips = stat_card("총 여행", &format!("{}회", self.stats.total_trips)),
            countries = stat_card("방문 국가", &format!("{}개국", self.stats.visited_countries)),
            days = stat_card("여행한 날", &format!("{}일", self.stats.total_travel_days)),
        )
    }
}

pub struct ProfileEditView<'a> {
    pub store: &'a CountryStore,
    pub form: ProfileForm,
}

impl View for ProfileEditView<'_> {
    fn title(&self) -> String {
        "프로필 수정".to_string()
    }

    fn active_nav(&self) -> NavItem {
        NavItem::Profile
    }

    fn render(&self) -> String {
        let form = &self.form;
        let avatars: String = AVATARS
            .iter()
            .map(|avatar| {
                let checked = if form.avatar == *avatar { " checked" } else { "" };
                format!(
                    r#"<label><input type="radio" name="avatar" value="{avatar}"{checked} /> {}</label>"#,
                    avatar_glyph(avatar)
                )
            })
            .collect();

        format!(
            r#"<section class="card">
  <h1>프로필 수정</h1>
  <form class="stack" method="post" action="/profile">
    <label>이름<input name="name" value="{name}" required /></label>
    <label>자기소개<textarea name="bio" rows="3">{bio}</textarea></label>
    <label>거주 국가<select name="residence_country">{countries}</select></label>
    <div class="grid">{avatars}</div>
    <div class="grid">
      <button type="submit">저장</button>
      <a class="button secondary" href="/profile">취소</a>
    </div>
  </form>
</section>"#,
            name = escape(&form.name),
            bio = escape(&form.bio),
            countries = country_options(self.store, &form.residence_country, "선택 안 함"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocalProfile, UserMetadata};
    use chrono::Utc;

    fn store() -> CountryStore {
        let mut store = CountryStore::default();
        store.initialize(&mut None, Utc::now()).unwrap();
        store
    }

    #[test]
    fn profile_shows_merged_fields() {
        let store = store();
        let profile = UserProfile::merge(
            Some(&UserMetadata {
                name: Some("Minji".into()),
                residence_country: Some("KR".into()),
            }),
            &LocalProfile {
                avatar: Some("plane".into()),
                ..LocalProfile::default()
            },
        );
        let view = ProfileView {
            store: &store,
            profile,
            email: Some("minji@example.com".into()),
            stats: BasicStats::default(),
        };
        let html = view.render();
        assert!(html.contains("✈️ Minji"));
        assert!(html.contains("대한민국"));
        assert!(html.contains("아직 자기소개가 없어요."));
    }

    #[test]
    fn edit_form_checks_current_avatar() {
        let store = store();
        let view = ProfileEditView {
            store: &store,
            form: ProfileForm {
                name: "Minji".into(),
                avatar: "camera".into(),
                ..ProfileForm::default()
            },
        };
        let html = view.render();
        assert!(html.contains(r#"value="camera" checked"#));
        assert!(!html.contains(r#"value="globe" checked"#));
    }
}
