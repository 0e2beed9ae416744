//! # Rendering Module
//!
//! Views are rendered through minijinja templates (see `templates.rs`) with
//! a `style` filter backed by the console styles in `styles.rs`. Color is
//! decided once, when the renderer is built.
//!
//! Width math (column fitting) is done by the `fit` filter, which counts
//! display width rather than bytes so card names with accents or wide
//! glyphs still line up.

use super::styles::{names, ARCANA_THEME};
use super::templates::*;
use arcana::adjacency::Neighbors;
use arcana::commands::{CmdMessage, MessageLevel, View};
use arcana::options::{OptionKey, OptionSet};
use arcana::pager::Page;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Serialize)]
struct PagerData {
    number: usize,
    num_pages: usize,
    count: usize,
    query: String,
    /// Query string of the following page.
    next: Option<String>,
}

impl PagerData {
    fn new<T>(page: &Page<T>, options: &OptionSet) -> Self {
        let next = page.has_next().then(|| {
            let rest = options.query_string_without(&[OptionKey::Page.as_str()]);
            let page_param = format!("{}={}", OptionKey::Page, page.number + 1);
            if rest.is_empty() {
                page_param
            } else {
                format!("{}&{}", rest, page_param)
            }
        });
        Self {
            number: page.number,
            num_pages: page.num_pages,
            count: page.count,
            query: options.to_query_string(),
            next,
        }
    }
}

#[derive(Serialize)]
struct Paged<'a, V: Serialize> {
    #[serde(flatten)]
    view: &'a V,
    pager: PagerData,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        let mut env = Environment::new();
        env.add_filter("style", move |value: Value, name: String| -> String {
            let text = value.to_string();
            match ARCANA_THEME.get(name.as_str()) {
                Some(style) if use_color => style.apply_to(text).to_string(),
                _ => text,
            }
        });
        env.add_filter("fit", |value: Value, width: usize| -> String { fit(&value.to_string(), width) });
        env.add_filter("ordinal", |value: i64| -> String { ordinal(value) });

        for (name, source) in [
            ("pager", PAGER_TEMPLATE),
            ("card_rows", CARD_ROWS_TEMPLATE),
            ("meaning", MEANING_TEMPLATE),
            ("deck_list", DECK_LIST_TEMPLATE),
            ("card_list", CARD_LIST_TEMPLATE),
            ("deck_detail", DECK_DETAIL_TEMPLATE),
            ("card_detail", CARD_DETAIL_TEMPLATE),
            ("tarot_card_detail", TAROT_CARD_DETAIL_TEMPLATE),
            ("spread_list", SPREAD_LIST_TEMPLATE),
            ("reading", READING_TEMPLATE),
            ("reading_target", READING_TARGET_TEMPLATE),
            ("neighbors", NEIGHBORS_TEMPLATE),
            ("messages", MESSAGES_TEMPLATE),
        ] {
            if let Err(e) = env.add_template(name, source) {
                tracing::error!(template = name, error = %e, "template failed to compile");
            }
        }

        Self { env }
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> String {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(data))
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    pub fn render_view(&self, view: &View) -> String {
        match view {
            View::DeckList(v) => self.render("deck_list", &paged(v, &v.page, &v.options)),
            View::CardList(v) => self.render("card_list", &paged(v, &v.page, &v.options)),
            View::DeckDetail(v) => self.render("deck_detail", &paged(v, &v.page, &v.options)),
            View::CardDetail(v) => self.render("card_detail", &**v),
            View::TarotCardDetail(v) => {
                self.render("tarot_card_detail", &paged(&**v, &v.page, &v.options))
            }
            View::SpreadList(v) => self.render("spread_list", &paged(v, &v.page, &v.options)),
            View::Reading(v) => self.render("reading", &**v),
            View::ReadingTarget(v) => self.render("reading_target", v),
        }
    }

    pub fn render_neighbors(&self, neighbors: &Neighbors) -> String {
        self.render("neighbors", neighbors)
    }

    pub fn render_messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }

        let messages = messages
            .iter()
            .map(|msg| {
                let style = match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                };
                MessageData {
                    content: msg.content.clone(),
                    style: style.to_string(),
                }
            })
            .collect();

        self.render("messages", &MessagesData { messages })
    }
}

fn paged<'a, V: Serialize, T>(view: &'a V, page: &Page<T>, options: &OptionSet) -> Paged<'a, V> {
    Paged {
        view,
        pager: PagerData::new(page, options),
    }
}

/// Truncates `s` to `width` display columns, marking the cut with `…`, or
/// pads it with spaces up to `width`.
fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }

    let mut result = String::new();
    let mut current = 0;
    let limit = width.saturating_sub(1);
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > limit {
            break;
        }
        result.push(c);
        current += w;
    }
    result.push('…');
    current += 1;
    result.push_str(&" ".repeat(width.saturating_sub(current)));
    result
}

/// `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`. Negative numbers get no
/// suffix.
fn ordinal(n: i64) -> String {
    if n < 0 {
        return n.to_string();
    }
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana::api::ArcanaApi;
    use arcana::config::ArcanaConfig;
    use arcana::model::{Arcana, Card, CardPosition, Deck, Spread};
    use arcana::store::memory::InMemoryStore;
    use arcana::store::Catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn api() -> ArcanaApi<InMemoryStore> {
        let card = |id: i64, tarot_index: u8, title: &str| Card {
            id,
            deck_id: 1,
            tarot_index,
            title: title.to_string(),
            caption: String::new(),
            description: String::new(),
            arcana: Arcana::Major,
        };
        let catalog = Catalog {
            decks: vec![Deck {
                id: 1,
                name: "Rider".into(),
                author: "Waite".into(),
                description: String::new(),
                meaning_set_id: 1,
            }],
            cards: vec![card(1, 0, "The Fool"), card(2, 1, "The Magician")],
            spreads: vec![Spread {
                id: 1,
                title: "Two Paths".into(),
                author: String::new(),
                source: None,
                description: "A choice between two".into(),
            }],
            positions: (0..2)
                .map(|i| CardPosition {
                    id: i + 1,
                    spread_id: 1,
                    index: i as u32,
                    x_coordinate: i as u32,
                    y_coordinate: 0,
                    title: format!("Path {}", i + 1),
                    description: String::new(),
                })
                .collect(),
            ..Catalog::default()
        };
        ArcanaApi::new(InMemoryStore::from_catalog(catalog), ArcanaConfig::default())
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("Cups", 6), "Cups  ");
        assert_eq!(fit("Pentacles", 6), "Penta…");
        assert_eq!(fit("", 2), "  ");
        assert_eq!(fit("世界", 3), "世…");
    }

    #[test]
    fn test_ordinal_suffixes() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 111, 0]
            .into_iter()
            .map(ordinal)
            .collect();
        assert_eq!(
            rendered,
            vec!["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "111th", "0th"]
        );
        assert_eq!(ordinal(-3), "-3");
    }

    #[test]
    fn test_render_card_list_with_pager() {
        let api = api();
        let result = api.card_list(&OptionSet::new()).unwrap();
        let output = Renderer::new(false).render_view(&result.view);

        assert!(output.contains("The Fool"));
        assert!(output.contains("The Magician"));
        assert!(output.contains("Page 1 of 1 (2 total)"));
        assert!(output.contains("order_by=suit&page=1"));
        assert!(!output.contains("Render error"));
    }

    #[test]
    fn test_render_next_page_query() {
        let api = ArcanaApi::new(
            InMemoryStore::from_catalog(api().store().catalog().clone()),
            ArcanaConfig {
                page_size: 1,
                page_orphans: 0,
                ..ArcanaConfig::default()
            },
        );
        let result = api.card_list(&OptionSet::new().with("cards", "majors")).unwrap();
        let output = Renderer::new(false).render_view(&result.view);
        assert!(output.contains(r#"--query "cards=majors&order_by=suit&page=2""#));
    }

    #[test]
    fn test_render_reading() {
        let api = api();
        let mut rng = StdRng::seed_from_u64(2);
        let options = OptionSet::new().with("cards", "1.1,0.0");
        let result = api.reading(1, 1, &options, None, &mut rng).unwrap();
        let output = Renderer::new(false).render_view(&result.view);

        assert!(output.contains("Two Paths"));
        assert!(output.contains("1st"));
        assert!(output.contains("The Magician (reversed)"));
        assert!(output.contains(r#"--cards "1.1,0.0""#));
        assert!(output.contains("Session deck: Rider"));
    }

    #[test]
    fn test_render_reading_error() {
        let api = api();
        let mut rng = StdRng::seed_from_u64(2);
        let options = OptionSet::new().with("cards", "1.1");
        let result = api.reading(1, 1, &options, None, &mut rng).unwrap();
        let output = Renderer::new(false).render_view(&result.view);

        assert!(output.contains("Problem loading saved reading."));
        assert!(!output.contains("--cards"));
    }

    #[test]
    fn test_render_card_detail_placeholder_meaning() {
        let api = api();
        let result = api.card_detail(1, 0, &OptionSet::new()).unwrap();
        let output = Renderer::new(false).render_view(&result.view);
        assert!(output.contains("Keywords: None provided."));
        assert!(output.contains("Previous 1  Next 1"));
    }

    #[test]
    fn test_render_messages_plain() {
        let renderer = Renderer::new(false);
        assert!(renderer.render_messages(&[]).is_empty());
        let output = renderer.render_messages(&[
            CmdMessage::warning("Deck 4 not found"),
            CmdMessage::success("Saved"),
        ]);
        assert_eq!(output, "Deck 4 not found\nSaved\n");
    }

    #[test]
    fn test_render_with_color_still_contains_text() {
        let output = Renderer::new(true).render_neighbors(&Neighbors { previous: 3, next: 7 });
        assert!(output.contains('3'));
        assert!(output.contains('7'));
    }
}
