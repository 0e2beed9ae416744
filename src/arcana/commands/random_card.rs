use super::{card_detail, card_list, CmdMessage, CmdResult};
use crate::config::ArcanaConfig;
use crate::draw::pick;
use crate::error::Result;
use crate::options::OptionSet;
use crate::store::EntityStore;
use rand::Rng;

/// The detail view of a card picked uniformly from the whole catalog.
pub fn run<S: EntityStore, R: Rng + ?Sized>(
    store: &S,
    config: &ArcanaConfig,
    rng: &mut R,
) -> Result<CmdResult> {
    let cards = store.list_cards()?;
    let options = OptionSet::new();

    match pick(&cards, rng) {
        Some(card) => {
            tracing::debug!(id = card.id, deck = card.deck_id, "picked random card");
            card_detail::run(store, config, card.deck_id, card.tarot_index as i64, &options)
        }
        None => Ok(card_list::run(store, config, &options)?
            .with_message(CmdMessage::warning("There are no cards to pick from"))),
    }
}
