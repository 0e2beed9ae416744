//! Templates for every view, registered by name in the renderer.
//!
//! Filters available besides the minijinja builtins:
//! - `style(name)`: applies a theme style, plain text without color
//! - `fit(width)`: truncates or pads to a display width
//! - `ordinal`: `1` → `1st`

pub const PAGER_TEMPLATE: &str = r#"{{ "Page" | style("muted") }} {{ pager.number }} of {{ pager.num_pages }} ({{ pager.count }} total)  {{ pager.query | style("muted") }}{% if pager.next %}
{{ "Next" | style("muted") }}: --query "{{ pager.next }}"{% endif %}"#;

pub const CARD_ROWS_TEMPLATE: &str = r#"{% for e in page.items %}{{ e.card.tarot_index | fit(3) | style("index") }} {{ e.name | fit(30) | style("title") }} {{ e.deck_name | fit(16) | style("muted") }}{% if e.card.caption %} {{ e.card.caption }}{% endif %}
{% else %}{{ "No cards found." | style("muted") }}
{% endfor %}"#;

pub const MEANING_TEMPLATE: &str = r#"{{ "Keywords" | style("heading") }}: {{ meaning.keywords if meaning.keywords else "None provided." }}
{{ "Reversed" | style("heading") }}: {{ meaning.reversed_keywords if meaning.reversed_keywords else "None provided." }}
{% if meaning.predictions %}
{{ meaning.predictions }}
{% endif %}{% if meaning.reversed_predictions %}
{{ "When reversed" | style("heading") }}: {{ meaning.reversed_predictions }}
{% endif %}
{{ "Previous" | style("muted") }} {{ neighbors.previous }}  {{ "Next" | style("muted") }} {{ neighbors.next }}
{% if related %}{{ "Also in" | style("heading") }}: {{ related | map(attribute="deck_name") | join(", ") }}
{% endif %}{% if nav.empty_suits %}{{ "Empty suits" | style("heading") }}: {{ nav.empty_suits | map(attribute="name") | join(", ") }}
{% endif %}"#;

pub const DECK_LIST_TEMPLATE: &str = r#"{% for e in page.items %}{{ e.deck.id | fit(4) | style("id") }} {{ e.deck.name | fit(24) | style("title") }} {{ e.deck.author }}{% if e.suits %}  {{ e.suits | map(attribute="name") | join(", ") | style("muted") }}{% endif %}
{% else %}{{ "No decks found." | style("muted") }}
{% endfor %}{% include "pager" %}"#;

pub const CARD_LIST_TEMPLATE: &str = r#"{% include "card_rows" %}{% include "pager" %}{% if decks %}
{{ "Decks" | style("muted") }}: {% for d in decks %}{{ d.name }} ({{ d.id }}){% if not loop.last %}, {% endif %}{% endfor %}{% endif %}"#;

pub const DECK_DETAIL_TEMPLATE: &str = r#"{{ deck.name | style("title") }}{% if deck.author %} by {{ deck.author }}{% endif %}
{% if deck.description %}{{ deck.description }}
{% endif %}{% if suits %}{{ "Suits" | style("heading") }}: {{ suits | map(attribute="name") | join(", ") }}
{% endif %}
{% include "card_rows" %}{% include "pager" %}"#;

pub const CARD_DETAIL_TEMPLATE: &str = r#"{{ card.name | style("title") }}  {{ card.deck_name | style("muted") }} #{{ card.card.tarot_index }}
{% if card.card.caption %}{{ card.card.caption | style("muted") }}
{% endif %}{% if card.card.description %}
{{ card.card.description }}
{% endif %}
{% include "meaning" %}"#;

pub const TAROT_CARD_DETAIL_TEMPLATE: &str = r#"{{ "Tarot index" | style("title") }} {{ tarot_index }}

{% include "card_rows" %}{% include "pager" %}

{% include "meaning" %}"#;

pub const SPREAD_LIST_TEMPLATE: &str = r#"{% for r in page.items %}{{ r.spread.id | fit(4) | style("id") }} {{ r.spread.title | fit(26) | style("title") }} {{ r.size | fit(3) }} {{ r.spread.description | style("muted") }}
{% else %}{{ "No spreads found." | style("muted") }}
{% endfor %}{% include "pager" %}
{{ "Tags" | style("heading") }}: {% for t in tags %}{{ t[0] }} ({{ t[1] }}){% if not loop.last %}, {% endif %}{% endfor %}
{{ "Readings use deck" | style("muted") }} {{ deck_id }}"#;

pub const READING_TEMPLATE: &str = r#"{{ spread.title | style("title") }} {{ "with" | style("muted") }} {{ deck.name }}
{% if error %}{{ error | style("error") }}
{% endif %}
{% for p in placements %}{{ loop.index | ordinal | fit(5) | style("index") }} {{ p.position.title | fit(24) | style("heading") }} {{ p.name }}{% if p.thrown.reversed %} {{ "(reversed)" | style("reversed") }}{% endif %}
{% endfor %}
{{ "Layout" | style("muted") }} {{ layout.width }}x{{ layout.height }}, cards {{ layout.thumbnail }}
{% if save_string is not none %}{{ "Replay" | style("muted") }}: arcana reading {{ spread.id }} {{ deck.id }} --cards "{{ save_string }}"
{% endif %}{{ "Session deck" | style("muted") }}: {{ session_deck.name if session_deck.name else session_deck.id }}"#;

pub const READING_TARGET_TEMPLATE: &str = r#"{{ "Reading" | style("heading") }}: spread {{ spread_id }} with deck {{ deck_id }}"#;

pub const NEIGHBORS_TEMPLATE: &str = r#"{{ "Previous" | style("muted") }} {{ previous }}  {{ "Next" | style("muted") }} {{ next }}"#;

pub const MESSAGES_TEMPLATE: &str = r#"{% for m in messages %}{{ m.content | style(m.style) }}
{% endfor %}"#;
