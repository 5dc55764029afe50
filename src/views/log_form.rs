use super::{View, country_options, selected};
use crate::countries::CountryStore;
use crate::models::{LogForm, MAX_RATING, MIN_RATING, Purpose, TravelStyle};
use crate::ui::{NavItem, escape};

/// Entry form for a new log, or for editing the log with id `editing`.
pub struct LogFormView<'a> {
    pub store: &'a CountryStore,
    pub form: LogForm,
    pub editing: Option<String>,
}

impl LogFormView<'_> {
    fn action(&self) -> String {
        match &self.editing {
            Some(id) => format!("/logs/{}", escape(id)),
            None => "/logs".to_string(),
        }
    }
}

impl View for LogFormView<'_> {
    fn title(&self) -> String {
        match self.editing {
            Some(_) => "여행 기록 수정".to_string(),
            None => "새 여행 기록".to_string(),
        }
    }

    fn active_nav(&self) -> NavItem {
        NavItem::Logs
    }

    fn render(&self) -> String {
        let form = &self.form;
        let purposes: String = Purpose::ALL
            .iter()
            .map(|p| {
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    p.as_str(),
                    selected(form.purpose.trim() == p.as_str()),
                    p.label()
                )
            })
            .collect();
        let styles: String = TravelStyle::ALL
            .iter()
            .map(|s| {
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    s.as_str(),
                    selected(form.travel_style.trim() == s.as_str()),
                    s.label()
                )
            })
            .collect();
        let ratings: String = (MIN_RATING..=MAX_RATING)
            .rev()
            .map(|r| {
                format!(
                    r#"<option value="{r}"{}>{}</option>"#,
                    selected(form.rating.trim() == r.to_string()),
                    "★".repeat(usize::from(r))
                )
            })
            .collect();

        let delete = match &self.editing {
            Some(id) => format!(
                r#"<form method="post" action="/logs/{}/delete" data-confirm="이 여행 기록을 삭제할까요?">
  <button type="submit" class="danger">삭제</button>
</form>"#,
                escape(id)
            ),
            None => String::new(),
        };

        format!(
            r#"<section class="card">
  <h1>{title}</h1>
  <form class="stack" method="post" action="{action}">
    <label>국가<select name="country" required>{countries}</select></label>
    <label>도시<input name="city" value="{city}" required /></label>
    <div class="grid">
      <label>출발일<input type="date" name="start_date" value="{start}" required /></label>
      <label>도착일<input type="date" name="end_date" value="{end}" required /></label>
    </div>
    <div class="grid">
      <label>여행 목적<select name="purpose" required><option value="">선택</option>{purposes}</select></label>
      <label>여행 스타일<select name="travel_style"><option value="">선택 안 함</option>{styles}</select></label>
      <label>평점<select name="rating"><option value="">없음</option>{ratings}</select></label>
    </div>
    <label>메모<textarea name="memo" rows="4">{memo}</textarea></label>
    <label>태그<input name="tags" value="{tags}" placeholder="쉼표로 구분" /></label>
    <div class="grid">
      <button type="submit">저장</button>
      <a class="button secondary" href="/logs">취소</a>
    </div>
  </form>
  {delete}
</section>"#,
            title = self.title(),
            action = self.action(),
            countries = country_options(self.store, &form.country, "국가 선택"),
            city = escape(&form.city),
            start = escape(&form.start_date),
            end = escape(&form.end_date),
            memo = escape(&form.memo),
            tags = escape(&form.tags),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn store() -> CountryStore {
        let mut store = CountryStore::default();
        store.initialize(&mut None, Utc::now()).unwrap();
        store
    }

    #[test]
    fn edit_form_keeps_values_and_offers_delete() {
        let store = store();
        let view = LogFormView {
            store: &store,
            form: LogForm {
                country: "JP".into(),
                city: "Nara \"deer\"".into(),
                purpose: "family".into(),
                rating: "4".into(),
                ..LogForm::default()
            },
            editing: Some("log-7".into()),
        };
        let html = view.render();
        assert_eq!(view.title(), "여행 기록 수정");
        assert!(html.contains(r#"action="/logs/log-7""#));
        assert!(html.contains(r#"action="/logs/log-7/delete""#));
        assert!(html.contains("Nara &quot;deer&quot;"));
        assert!(html.contains(r#"<option value="family" selected>"#));
        assert!(html.contains(r#"<option value="4" selected>"#));
    }

    #[test]
    fn new_form_has_no_delete_button() {
        let store = store();
        let view = LogFormView {
            store: &store,
            form: LogForm::default(),
            editing: None,
        };
        let html = view.render();
        assert!(html.contains(r#"action="/logs""#));
        assert!(!html.contains("/delete"));
    }
}
