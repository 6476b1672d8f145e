// src/engine/engine.rs
use tracing::warn;

use crate::core::{sanitize::normalize_ws, ElementRef, Selector};
use crate::data::{DayHours, Stars, UNRATED};
use crate::engine::types::*;

const MAX_STARS: usize = 5;

/// Apply every rule to `scope`. Pure and infallible: a missing element, or
/// a rule whose selector does not parse, yields the field's empty value.
pub fn extract(scope: ElementRef<'_>, rules: &[FieldRule]) -> Extracted {
    let mut out = Extracted::default();
    for rule in rules {
        out.values.insert(rule.field, apply(scope, rule));
    }
    out
}

/// Matches for `selector` under `scope`; logs and returns nothing when the
/// selector is malformed.
pub fn select<'a>(scope: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    parse(selector).map(|sel| scope.select(&sel)).unwrap_or_default()
}

fn parse(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!("skipping rule: {e}");
            None
        }
    }
}

fn apply(scope: ElementRef<'_>, rule: &FieldRule) -> FieldValue {
    match rule.transform {
        Transform::Text => {
            let joined: String = select(scope, rule.selector).iter().map(|e| e.text()).collect();
            FieldValue::Text(normalize_ws(&joined))
        }
        Transform::Attr(name) => FieldValue::Attr(
            select(scope, rule.selector)
                .first()
                .and_then(|e| e.attr(name))
                .map(|v| s!(v.trim())),
        ),
        Transform::TextList => FieldValue::List(
            select(scope, rule.selector)
                .iter()
                .map(|e| normalize_ws(&e.text()))
                .collect(),
        ),
        Transform::OwnText(skip) => {
            let joined: String = select(scope, rule.selector)
                .iter()
                .map(|e| e.own_text_excluding(skip))
                .collect();
            FieldValue::Text(s!(joined.trim()))
        }
        Transform::FirstNodeText => FieldValue::Text(
            select(scope, rule.selector)
                .first()
                .and_then(|e| e.first_child_text())
                .map(|t| s!(t.trim()))
                .unwrap_or_default(),
        ),
        Transform::Hours { day, time } => FieldValue::Hours(
            select(scope, rule.selector)
                .into_iter()
                .map(|row| DayHours {
                    days: normalize_ws(&select(row, day).iter().map(|e| e.text()).collect::<String>()),
                    hours: select(row, time).iter().map(|e| normalize_ws(&e.text())).collect(),
                })
                .collect(),
        ),
        Transform::Stars { label, stars, filled } => {
            // First labelled row only; its star block is the next element.
            let label_sel = format!("{}:contains('{}')", rule.selector, label);
            let Some(row) = select(scope, &label_sel).into_iter().next() else {
                return FieldValue::Stars(UNRATED);
            };
            let lit = match (row.next_element_sibling(), parse(stars)) {
                (Some(block), Some(sel)) if block.is(&sel) => select(block, filled).len(),
                _ => 0,
            };
            FieldValue::Stars(lit.min(MAX_STARS) as Stars)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Document;

    const RULES: Ruleset = &[
        FieldRule { field: "name", selector: "h1 .name", transform: Transform::Text },
        FieldRule { field: "link", selector: "a.profile", transform: Transform::Attr("href") },
        FieldRule { field: "tags", selector: ".tags span", transform: Transform::TextList },
        FieldRule { field: "hours", selector: ".day", transform: Transform::Hours { day: ".d", time: ".t div" } },
        FieldRule { field: "taste", selector: ".name", transform: Transform::Stars { label: "Taste", stars: "div.stars", filled: ".on" } },
        FieldRule { field: "decor", selector: ".name", transform: Transform::Stars { label: "Decor", stars: "div.stars", filled: ".on" } },
        FieldRule { field: "value", selector: ".name", transform: Transform::Stars { label: "Value", stars: "div.stars", filled: ".on" } },
        FieldRule { field: "broken", selector: "div[", transform: Transform::Text },
    ];

    const PAGE: &str = r#"
        <h1><span class="name"> Noodle House </span></h1>
        <a class="profile" href="/p?userid=9">me</a>
        <div class="tags"><span>Cantonese</span><span> Noodles </span></div>
        <div class="day"><div class="d">Mon - Fri</div><div class="t"><div>11:00-15:00</div><div>18:00-22:00</div></div></div>
        <div class="day"><div class="d">Sat</div><div class="t"></div></div>
        <div class="row"><div class="name">Taste</div><div class="stars"><i class="on"></i><i class="on"></i><i class="on"></i><i></i></div></div>
        <div class="row"><div class="name">Decor</div><div class="stars"><i></i><i></i></div></div>
    "#;

    #[test]
    fn extracts_each_transform() {
        let doc = Document::parse(PAGE);
        let got = extract(doc.root(), RULES);
        assert_eq!(got.text("name"), "Noodle House");
        assert_eq!(got.attr("link").as_deref(), Some("/p?userid=9"));
        assert_eq!(got.list("tags"), vec!["Cantonese", "Noodles"]);
        assert_eq!(got.hours("hours"), vec![
            DayHours { days: s!("Mon - Fri"), hours: strings!["11:00-15:00", "18:00-22:00"] },
            DayHours { days: s!("Sat"), hours: vec![] },
        ]);
    }

    #[test]
    fn stars_distinguish_zero_from_unrated() {
        let doc = Document::parse(PAGE);
        let got = extract(doc.root(), RULES);
        assert_eq!(got.stars("taste"), 3);
        assert_eq!(got.stars("decor"), 0);
        assert_eq!(got.stars("value"), UNRATED);
    }

    #[test]
    fn stars_read_only_the_first_matching_row() {
        let lit = |n: usize| r#"<i class="on"></i>"#.repeat(n);
        let page = format!(
            r#"<div class="row"><div class="name">Value</div><div class="stars">{}</div></div>
               <div class="row"><div class="name">Value for money</div><div class="stars">{}</div></div>
               <div class="row"><div class="name">Taste</div><div class="stars">{}</div></div>
               <div class="row"><div class="name">Decor</div><span>no stars here</span></div>"#,
            lit(4),
            lit(4),
            lit(7),
        );
        let doc = Document::parse(&page);
        let got = extract(doc.root(), RULES);
        assert_eq!(got.stars("value"), 4);
        assert_eq!(got.stars("taste"), 5);
        assert_eq!(got.stars("decor"), 0);
    }

    #[test]
    fn missing_and_broken_fields_are_empty() {
        let doc = Document::parse("<p>nothing here</p>");
        let got = extract(doc.root(), RULES);
        assert_eq!(got.text("name"), "");
        assert_eq!(got.attr("link"), None);
        assert!(got.list("tags").is_empty());
        assert!(got.hours("hours").is_empty());
        assert_eq!(got.stars("taste"), UNRATED);
        assert_eq!(got.text("broken"), "");
        assert_eq!(got.text("never-declared"), "");
    }
}
