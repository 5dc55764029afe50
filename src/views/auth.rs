//! Signed-out screens. Passwords are never echoed back into a form.

use super::{View, country_options};
use crate::countries::CountryStore;
use crate::ui::{NavItem, escape};

pub struct SignInView {
    pub email: String,
}

impl View for SignInView {
    fn title(&self) -> String {
        "로그인".to_string()
    }

    fn active_nav(&self) -> NavItem {
        NavItem::None
    }

    fn render(&self) -> String {
        format!(
            r#"<section class="card">
  <h1>여행 일지</h1>
  <p class="subtitle">나의 여행을 기록하고 돌아보세요.</p>
  <form class="stack" method="post" action="/login">
    <label>이메일<input type="email" name="email" value="{email}" required /></label>
    <label>비밀번호<input type="password" name="password" required /></label>
    <button type="submit">로그인</button>
  </form>
  <p class="hint"><a href="/signup">회원가입</a> · <a href="/reset">비밀번호를 잊으셨나요?</a></p>
</section>"#,
            email = escape(&self.email),
        )
    }
}

pub struct SignUpView<'a> {
    pub store: &'a CountryStore,
    pub name: String,
    pub email: String,
    pub residence_country: String,
}

impl View for SignUpView<'_> {
    fn title(&self) -> String {
        "회원가입".to_string()
    }

    fn active_nav(&self) -> NavItem {
        NavItem::None
    }

    fn render(&self) -> String {
        format!(
            r#"<section class="card">
  <h1>회원가입</h1>
  <form class="stack" method="post" action="/signup">
    <label>이름<input name="name" value="{name}" required /></label>
    <label>이메일<input type="email" name="email" value="{email}" required /></label>
    <label>비밀번호<input type="password" name="password" required /></label>
    <label>비밀번호 확인<input type="password" name="password_confirm" required /></label>
    <label>거주 국가<select name="residence_country">{countries}</select></label>
    <button type="submit">가입하기</button>
  </form>
  <p class="hint">이미 계정이 있나요? <a href="/login">로그인</a></p>
</section>"#,
            name = escape(&self.name),
            email = escape(&self.email),
            countries = country_options(self.store, &self.residence_country, "선택 안 함"),
        )
    }
}

pub struct ResetView {
    pub email: String,
}

impl View for ResetView {
    fn title(&self) -> String {
        "비밀번호 재설정".to_string()
    }

    fn active_nav(&self) -> NavItem {
        NavItem::None
    }

    fn render(&self) -> String {
        format!(
            r#"<section class="card">
  <h1>비밀번호 재설정</h1>
  <p class="subtitle">가입한 이메일로 재설정 링크를 보내드려요.</p>
  <form class="stack" method="post" action="/reset">
    <label>이메일<input type="email" name="email" value="{email}" required /></label>
    <button type="submit">재설정 메일 보내기</button>
  </form>
  <p class="hint"><a href="/login">로그인으로 돌아가기</a></p>
</section>"#,
            email = escape(&self.email),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn sign_up_keeps_entered_fields() {
        let mut store = CountryStore::default();
        store.initialize(&mut None, Utc::now()).unwrap();
        let view = SignUpView {
            store: &store,
            name: "<Minji>".into(),
            email: "m@example.com".into(),
            residence_country: "JP".into(),
        };
        let html = view.render();
        assert!(html.contains(r#"value="&lt;Minji&gt;""#));
        assert!(html.contains(r#"<option value="JP" selected>"#));
        assert!(!html.contains(r#"name="password" value"#));
    }

    #[test]
    fn sign_in_links_to_recovery() {
        let html = SignInView {
            email: String::new(),
        }
        .render();
        assert!(html.contains(r#"href="/reset""#));
        assert!(html.contains(r#"action="/login""#));
    }
}
