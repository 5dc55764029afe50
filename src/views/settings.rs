use super::{View, selected};
use crate::models::ViewMode;
use crate::ui::{NavItem, escape};
use chrono::{DateTime, Utc};

pub struct SettingsView {
    pub view_mode: ViewMode,
    pub email: Option<String>,
    pub country_count: usize,
    pub countries_cached_at: Option<DateTime<Utc>>,
}

impl View for SettingsView {
    fn title(&self) -> String {
        "설정".to_string()
    }

    fn active_nav(&self) -> NavItem {
        NavItem::Settings
    }

    fn render(&self) -> String {
        let cached = self
            .countries_cached_at
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            r#"<section class="card">
  <h1>설정</h1>
  <form class="stack" method="post" action="/settings/view-mode">
    <label>기록 보기 방식
      <select name="view_mode">
        <option value="card"{card}>카드</option>
        <option value="list"{list}>목록</option>
      </select>
    </label>
    <button type="submit">저장</button>
  </form>
</section>
<section class="card">
  <h2>국가 정보</h2>
  <p class="hint">{count}개 국가 · 마지막 갱신 {cached}</p>
  <form method="post" action="/settings/countries/refresh">
    <button type="submit" class="secondary">국가 정보 새로고침</button>
  </form>
</section>
<section class="card">
  <h2>계정</h2>
  <p class="hint">{email}</p>
  <form method="post" action="/logout" data-confirm="로그아웃할까요?">
    <button type="submit" class="danger">로그아웃</button>
  </form>
</section>"#,
            card = selected(self.view_mode == ViewMode::Card),
            list = selected(self.view_mode == ViewMode::List),
            count = self.country_count,
            email = escape(self.email.as_deref().unwrap_or("")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_view_mode_is_selected() {
        let view = SettingsView {
            view_mode: ViewMode::List,
            email: Some("a@b.co".into()),
            country_count: 200,
            countries_cached_at: None,
        };
        let html = view.render();
        assert!(html.contains(r#"<option value="list" selected>"#));
        assert!(html.contains("200개 국가 · 마지막 갱신 -"));
        assert!(html.contains(r#"action="/logout""#));
    }
}
