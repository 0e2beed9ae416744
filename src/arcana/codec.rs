//! # Reading Codec
//!
//! A drawn reading is shared as a save-string:
//!
//! ```text
//! <tarot_index>.<0|1>,<tarot_index>.<0|1>,...
//! ```
//!
//! One token per spread position, in position order, `1` marking a reversed
//! card. No trailing separator. Indices are resolved against a deck when
//! decoding, so the same string replays in any deck that has the cards.
//!
//! Decoding is all-or-nothing: one bad token rejects the whole reading.

use crate::error::{ArcanaError, NotFound, Result};
use crate::model::{CardPosition, ThrownCard};
use crate::store::EntityStore;

const CARD_SEPARATOR: &str = ",";
const FIELD_SEPARATOR: char = '.';

/// Encodes `thrown` against `positions`, pairing them by position.
pub fn encode_reading(thrown: &[ThrownCard], positions: &[CardPosition]) -> String {
    thrown
        .iter()
        .zip(positions)
        .map(|(tc, _)| format!("{}{}{}", tc.card.tarot_index, FIELD_SEPARATOR, u8::from(tc.reversed)))
        .collect::<Vec<_>>()
        .join(CARD_SEPARATOR)
}

/// Parses a save-string and resolves each index to a card of `deck_id`.
///
/// Fails with [`ArcanaError::Format`] when the token count differs from
/// `expected`, a token is not `index.reversal`, the index is not an integer
/// or the reversal is not `0`/`1`; with [`ArcanaError::NotFound`] when the
/// deck has no card at an index.
pub fn decode_reading<S: EntityStore>(
    store: &S,
    encoded: &str,
    expected: usize,
    deck_id: i64,
) -> Result<Vec<ThrownCard>> {
    if encoded.is_empty() && expected == 0 {
        return Ok(Vec::new());
    }

    let tokens: Vec<&str> = encoded.split(CARD_SEPARATOR).collect();
    if tokens.len() != expected {
        return Err(ArcanaError::Format(
            "Number of cards in the save string does not match the number of positions in the spread."
                .to_string(),
        ));
    }

    let mut cards = Vec::with_capacity(tokens.len());
    for token in tokens {
        let (tarot_index, reversed) = parse_token(token)?;
        let card = store.get_card(deck_id, tarot_index).map_err(|e| match e {
            ArcanaError::NotFound(_) => ArcanaError::NotFound(NotFound::Card {
                deck_id,
                tarot_index,
            }),
            other => other,
        })?;
        cards.push(ThrownCard::new(card, reversed));
    }

    Ok(cards)
}

fn parse_token(token: &str) -> Result<(i64, bool)> {
    let parts: Vec<&str> = token.split(FIELD_SEPARATOR).collect();
    let [index, reversal] = parts.as_slice() else {
        return Err(ArcanaError::Format(
            "Save string is incorrectly formatted or missing information.".to_string(),
        ));
    };

    let tarot_index = index.trim().parse::<i64>().map_err(|_| {
        ArcanaError::Format(
            "The save string must contain a series of two integers separated by a period, with commas as separators."
                .to_string(),
        )
    })?;

    let reversed = match *reversal {
        "0" => false,
        "1" => true,
        _ => {
            return Err(ArcanaError::Format(
                "Reversal encoding for a card must be 0 or 1.".to_string(),
            ))
        }
    };

    Ok((tarot_index, reversed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use proptest::prelude::*;

    fn store() -> InMemoryStore {
        StoreFixture::sample().store
    }

    fn positions(store: &InMemoryStore, spread_id: i64) -> Vec<CardPosition> {
        store.positions_for_spread(spread_id).unwrap()
    }

    #[test]
    fn encodes_in_position_order() {
        let store = store();
        let thrown = vec![
            ThrownCard::new(store.get_card(1, 21).unwrap(), false),
            ThrownCard::new(store.get_card(1, 0).unwrap(), true),
            ThrownCard::new(store.get_card(1, 38).unwrap(), false),
        ];
        assert_eq!(encode_reading(&thrown, &positions(&store, 2)), "21.0,0.1,38.0");
    }

    #[test]
    fn decodes_against_the_deck() {
        let store = store();
        let cards = decode_reading(&store, "0.1,38.0,21.0", 3, 1).unwrap();
        let ids: Vec<i64> = cards.iter().map(|tc| tc.card.id).collect();
        assert_eq!(ids, vec![1, 5, 3]);
        assert!(cards[0].reversed);
        assert!(!cards[1].reversed);

        let cards = decode_reading(&store, "38.1", 1, 2).unwrap();
        assert_eq!(cards[0].card.id, 10);
    }

    #[test]
    fn format_errors() {
        let store = store();
        let cases = [
            ("0.1,1.0", 3),   // wrong count
            ("0.1,1.0,", 3),  // trailing separator leaves an empty token
            ("0.1,1,21.0", 3), // missing reversal
            ("0.1.1", 1),     // too many parts
            ("x.1", 1),       // non-integer index
            ("0.2", 1),       // reversal out of range
            ("0.true", 1),
            ("0. 1", 1),
            ("", 1),
        ];
        for (encoded, expected) in cases {
            let err = decode_reading(&store, encoded, expected, 1).unwrap_err();
            assert!(
                matches!(err, ArcanaError::Format(_)),
                "{:?} should be a format error, got {:?}",
                encoded,
                err
            );
        }
    }

    #[test]
    fn unknown_card_in_deck_is_not_found() {
        let store = store();
        let err = decode_reading(&store, "0.0,5.1", 2, 1).unwrap_err();
        assert!(matches!(
            err,
            ArcanaError::NotFound(NotFound::Card {
                deck_id: 1,
                tarot_index: 5
            })
        ));

        let err = decode_reading(&store, "-1.0", 1, 1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn whitespace_around_index_is_tolerated() {
        let cards = decode_reading(&store(), " 21.0", 1, 1).unwrap();
        assert_eq!(cards[0].card.tarot_index, 21);
    }

    #[test]
    fn empty_reading_round_trips() {
        let store = store();
        assert_eq!(encode_reading(&[], &[]), "");
        assert!(decode_reading(&store, "", 0, 1).unwrap().is_empty());
    }

    fn full_deck_store() -> InMemoryStore {
        let mut fixture = StoreFixture::new().with_meaning_set(1, "Set").with_deck(1, "Full", 1);
        for index in 0..78u8 {
            fixture = fixture.with_major(index as i64 + 1, 1, index, &format!("Card {}", index));
        }
        fixture.with_spread(1, "Big", "", 12).store
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(
            draws in prop::collection::vec((0u8..78, any::<bool>()), 1..=12)
        ) {
            let store = full_deck_store();
            let positions: Vec<CardPosition> =
                positions(&store, 1).into_iter().take(draws.len()).collect();
            let thrown: Vec<ThrownCard> = draws
                .iter()
                .map(|(idx, rev)| ThrownCard::new(store.get_card(1, *idx as i64).unwrap(), *rev))
                .collect();

            let encoded = encode_reading(&thrown, &positions);
            let decoded = decode_reading(&store, &encoded, positions.len(), 1).unwrap();
            prop_assert_eq!(decoded, thrown);
        }
    }
}
