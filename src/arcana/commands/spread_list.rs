use super::{CmdResult, SpreadListView, View};
use crate::compile::{compile_list_query, spread_tag_counts, ListKind};
use crate::config::ArcanaConfig;
use crate::error::Result;
use crate::options::OptionSet;
use crate::store::EntityStore;

/// Spreads, smallest first, with search, size buckets and tag counts.
///
/// `session_deck` is the deck remembered for readings; spread links open
/// with it, or with the default deck when none was chosen.
pub fn run<S: EntityStore>(
    store: &S,
    config: &ArcanaConfig,
    options: &OptionSet,
    session_deck: Option<i64>,
) -> Result<CmdResult> {
    let compiled = compile_list_query(store, ListKind::Spreads, options)?;
    let spreads = store.query_spreads(&compiled.query)?;
    let (page, options) = config.paginator().paginate(spreads, &compiled.options);

    Ok(CmdResult::new(View::SpreadList(SpreadListView {
        page,
        options,
        tags: spread_tag_counts(store)?,
        deck_id: session_deck.unwrap_or(config.default_deck_id),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn view(options: OptionSet, session_deck: Option<i64>) -> SpreadListView {
        let store = StoreFixture::sample().store;
        match run(&store, &ArcanaConfig::default(), &options, session_deck)
            .unwrap()
            .view
        {
            View::SpreadList(v) => v,
            other => panic!("expected spread list, got {:?}", other),
        }
    }

    fn titles(v: &SpreadListView) -> Vec<&str> {
        v.page.items.iter().map(|r| r.spread.title.as_str()).collect()
    }

    #[test]
    fn sorted_by_size() {
        let v = view(OptionSet::new(), None);
        assert_eq!(
            titles(&v),
            vec![
                "Blank Slate",
                "Card of the Day",
                "Past Present Future",
                "Horseshoe",
                "Celtic Cross"
            ]
        );
    }

    #[test]
    fn size_and_search_combine() {
        let v = view(OptionSet::new().with("size", "small"), None);
        assert_eq!(titles(&v), vec!["Blank Slate", "Card of the Day", "Past Present Future"]);

        let v = view(
            OptionSet::new().with("size", "small").with("search", "ADVICE"),
            None,
        );
        assert_eq!(titles(&v), vec!["Past Present Future"]);

        let v = view(OptionSet::new().with("size", "medium"), None);
        assert_eq!(titles(&v), vec!["Horseshoe"]);
    }

    #[test]
    fn unknown_size_is_ignored_but_kept() {
        let v = view(OptionSet::new().with("size", "huge"), None);
        assert_eq!(v.page.count, 5);
        assert_eq!(v.options.get("size"), Some("huge"));
    }

    #[test]
    fn tags_are_counted() {
        let v = view(OptionSet::new(), None);
        let count = |tag: &str| v.tags.iter().find(|(t, _)| t == tag).map(|(_, n)| *n);
        assert_eq!(count("daily"), Some(1));
        assert_eq!(count("traditional"), Some(1));
        assert_eq!(count("love"), Some(0));
        assert_eq!(count("work"), Some(1));
        assert_eq!(count("advice"), Some(1));
    }

    #[test]
    fn links_use_session_deck() {
        assert_eq!(view(OptionSet::new(), None).deck_id, 1);
        assert_eq!(view(OptionSet::new(), Some(2)).deck_id, 2);
    }
}
