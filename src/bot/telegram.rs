//! Telegram inline query handling.
//!
//! Inline results are random, so every answer must defeat Telegram's result
//! caching. That takes all three of: `cache_time = 0`, `is_personal = true`,
//! and a result id that is never reused. Missing any one of them makes
//! clients re-insert an earlier roll.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::roll::{DiceSource, Outcome, RollEngine, RollResult};

const RESULT_TITLE: &str = "Ironsworn Roll";

/// An incoming inline query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub query: String,
}

/// Answer to an inline query (`answerInlineQuery` parameters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineQueryAnswer {
    pub inline_query_id: String,
    pub results: Vec<InlineQueryResultArticle>,
    pub cache_time: u32,
    pub is_personal: bool,
}

/// A text article offered as an inline result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineQueryResultArticle {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub title: String,
    pub input_message_content: InputTextMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
}

/// Handle an inline query.
///
/// Empty or whitespace-only queries get no answer. Anything else is parsed
/// as a modifier and rolled exactly once.
pub fn handle_inline_query<S: DiceSource>(
    engine: &RollEngine<S>,
    query: &InlineQuery,
) -> Option<InlineQueryAnswer> {
    info!(query_id = %query.id, query = %query.query, "Telegram inline query");

    if query.query.trim().is_empty() {
        return None;
    }

    let result = engine.roll(parse_modifier(&query.query));

    Some(InlineQueryAnswer {
        inline_query_id: query.id.clone(),
        results: vec![InlineQueryResultArticle {
            kind: "article",
            id: Uuid::new_v4().to_string(),
            title: RESULT_TITLE.to_string(),
            input_message_content: InputTextMessageContent {
                message_text: format_result(&result),
            },
        }],
        cache_time: 0,
        is_personal: true,
    })
}

/// Parse a modifier leniently. Anything that is not an integer counts as 0.
pub fn parse_modifier(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Render a roll on one line, e.g. `🎲 (4 -1) vs (7 & 2) → Weak Hit`.
pub fn format_result(r: &RollResult) -> String {
    format!(
        "🎲 ({} {:+}) vs ({} & {}) → {}",
        r.action_die,
        r.modifier,
        r.challenge_dice[0],
        r.challenge_dice[1],
        ironsworn_label(r.outcome),
    )
}

/// Ironsworn's own names for each outcome.
pub fn ironsworn_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::CriticalSuccess => "Strong Hit (Match)",
        Outcome::Success => "Strong Hit",
        Outcome::PartialSuccess => "Weak Hit",
        Outcome::Failure => "Miss",
        Outcome::CriticalFailure => "Miss (Match)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn query(text: &str) -> InlineQuery {
        InlineQuery {
            id: "q1".to_string(),
            query: text.to_string(),
        }
    }

    #[test]
    fn test_parse_modifier_various_inputs() {
        let cases = [
            ("", 0),
            ("+2", 2),
            ("2", 2),
            ("-1", -1),
            (" +3 ", 3),
            ("bad", 0),
            ("1e3", 0),
            ("3000000000", 3_000_000_000),
            ("99999999999999999999", 0),
        ];

        for (input, want) in cases {
            assert_eq!(parse_modifier(input), want, "{:?}", input);
        }
    }

    #[test]
    fn test_empty_query_gets_no_answer() {
        let engine = RollEngine::seeded(1);

        assert!(handle_inline_query(&engine, &query("")).is_none());
        assert!(handle_inline_query(&engine, &query("   \t")).is_none());
    }

    #[test]
    fn test_answer_defeats_caching() {
        let engine = RollEngine::seeded(1);

        let answer = handle_inline_query(&engine, &query("+1")).unwrap();

        assert_eq!(answer.inline_query_id, "q1");
        assert_eq!(answer.cache_time, 0);
        assert!(answer.is_personal);
        assert_eq!(answer.results.len(), 1);
        assert_eq!(answer.results[0].title, "Ironsworn Roll");
        assert!(Uuid::parse_str(&answer.results[0].id).is_ok());
    }

    #[test]
    fn test_result_ids_are_unique() {
        let engine = RollEngine::seeded(1);

        let ids: HashSet<String> = (0..50)
            .map(|_| handle_inline_query(&engine, &query("0")).unwrap().results[0].id.clone())
            .collect();

        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_unparseable_query_rolls_with_zero() {
        let engine = RollEngine::seeded(5);
        let reference = RollEngine::seeded(5);

        let answer = handle_inline_query(&engine, &query("strong hit please")).unwrap();

        assert_eq!(
            answer.results[0].input_message_content.message_text,
            format_result(&reference.roll(0))
        );
    }

    #[test]
    fn test_answer_json_shape() {
        let engine = RollEngine::seeded(1);
        let answer = handle_inline_query(&engine, &query("2")).unwrap();

        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["cache_time"], 0);
        assert_eq!(json["is_personal"], true);
        assert_eq!(json["results"][0]["type"], "article");
        assert!(json["results"][0]["input_message_content"]["message_text"].is_string());
    }

    #[test]
    fn test_format_result() {
        let r = RollResult {
            action_die: 4,
            modifier: -1,
            challenge_dice: [7, 2],
            total: 3,
            outcome: Outcome::PartialSuccess,
        };

        assert_eq!(format_result(&r), "🎲 (4 -1) vs (7 & 2) → Weak Hit");
    }

    #[test]
    fn test_ironsworn_labels() {
        assert_eq!(ironsworn_label(Outcome::CriticalSuccess), "Strong Hit (Match)");
        assert_eq!(ironsworn_label(Outcome::Success), "Strong Hit");
        assert_eq!(ironsworn_label(Outcome::PartialSuccess), "Weak Hit");
        assert_eq!(ironsworn_label(Outcome::Failure), "Miss");
        assert_eq!(ironsworn_label(Outcome::CriticalFailure), "Miss (Match)");
    }
}
