//! Chat query interpretation
//!
//! Messages are scanned, in priority order, for an explicit `YYYY-MM-DD`
//! date, a known region alias and a country keyword. Anything else is
//! unrecognized. Aliases match whole words only ("kl" does not match inside
//! "weekly"); keywords match anywhere. Both are case-insensitive.

use regex::Regex;
use std::collections::BTreeMap;

use crate::{Error, Result};

/// Reply to a bare bot mention
pub const GREETING: &str = "Here! Ask me about a date (YYYY-MM-DD), a state or Malaysia.";

/// What a chat message asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatQuery {
    /// Message is only a mention of the bot
    Greeting,
    /// Figures for an explicit date, optionally scoped to one region
    Day { date: String, region: Option<String> },
    /// Figures for the most recent date, optionally scoped to one region
    Latest { region: Option<String> },
    /// Nothing recognisable
    Unrecognized,
}

/// Turns free text into a [`ChatQuery`]
#[derive(Debug, Clone)]
pub struct ChatInterpreter {
    date_pattern: Regex,
    /// (whole-word alias pattern, canonical region name), longest alias first
    aliases: Vec<(Regex, String)>,
    country_keywords: Vec<String>,
    bot_mention: Option<String>,
}

impl ChatInterpreter {
    /// `aliases` maps lowercase search text to the canonical region name
    /// used by the feeds.
    pub fn new(
        aliases: &BTreeMap<String, String>,
        country_keywords: &[String],
        bot_user_id: Option<&str>,
    ) -> Result<Self> {
        let date_pattern = Regex::new(r"\d{4}-\d{2}-\d{2}")
            .map_err(|e| Error::Config(format!("Invalid date pattern: {}", e)))?;

        let mut sorted: Vec<(String, &String)> = aliases
            .iter()
            .filter(|(alias, _)| !alias.trim().is_empty())
            .map(|(alias, region)| (alias.trim().to_lowercase(), region))
            .collect();
        // Longer aliases first so "kuala lumpur" beats "kl"; ties alphabetical
        sorted.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let aliases = sorted
            .into_iter()
            .map(|(alias, region)| {
                Regex::new(&format!(r"\b{}\b", regex::escape(&alias)))
                    .map(|pattern| (pattern, region.clone()))
                    .map_err(|e| Error::Config(format!("Invalid region alias '{}': {}", alias, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            date_pattern,
            aliases,
            country_keywords: country_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            bot_mention: bot_user_id.map(|id| format!("<@{}>", id)),
        })
    }

    /// First region alias appearing as a whole word in `lowered`, as a canonical name
    fn find_region(&self, lowered: &str) -> Option<String> {
        self.aliases
            .iter()
            .find(|(pattern, _)| pattern.is_match(lowered))
            .map(|(_, region)| region.clone())
    }

    pub fn interpret(&self, text: &str) -> ChatQuery {
        let text = text.trim();
        if self.bot_mention.as_deref() == Some(text) {
            return ChatQuery::Greeting;
        }

        let lowered = text.to_lowercase();
        let region = self.find_region(&lowered);

        if let Some(date) = self.date_pattern.find(text) {
            return ChatQuery::Day {
                date: date.as_str().to_string(),
                region,
            };
        }

        if region.is_some() {
            return ChatQuery::Latest { region };
        }

        if self
            .country_keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
        {
            return ChatQuery::Latest { region: None };
        }

        ChatQuery::Unrecognized
    }
}

/// Lowercase search aliases for each state, as people type them
pub fn default_region_aliases() -> BTreeMap<String, String> {
    [
        ("johor", "Johor"),
        ("kedah", "Kedah"),
        ("kelantan", "Kelantan"),
        ("melaka", "Melaka"),
        ("negeri sembilan", "Negeri Sembilan"),
        ("n9", "Negeri Sembilan"),
        ("pahang", "Pahang"),
        ("perak", "Perak"),
        ("perlis", "Perlis"),
        ("pulau pinang", "Pulau Pinang"),
        ("penang", "Pulau Pinang"),
        ("sabah", "Sabah"),
        ("sarawak", "Sarawak"),
        ("selangor", "Selangor"),
        ("terengganu", "Terengganu"),
        ("kuala lumpur", "W.P. Kuala Lumpur"),
        ("kl", "W.P. Kuala Lumpur"),
        ("labuan", "W.P. Labuan"),
        ("putrajaya", "W.P. Putrajaya"),
    ]
    .into_iter()
    .map(|(alias, region)| (alias.to_string(), region.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> ChatInterpreter {
        ChatInterpreter::new(
            &default_region_aliases(),
            &["Malaysia".to_string(), "cobis".to_string()],
            Some("U0BOT"),
        )
        .unwrap()
    }

    #[test]
    fn test_date_with_region_is_region_scoped() {
        assert_eq!(
            interpreter().interpret("how is Selangor on 2021-06-01?"),
            ChatQuery::Day {
                date: "2021-06-01".to_string(),
                region: Some("Selangor".to_string()),
            }
        );
    }

    #[test]
    fn test_date_alone_is_national() {
        assert_eq!(
            interpreter().interpret("numbers for 2021-06-01 please"),
            ChatQuery::Day {
                date: "2021-06-01".to_string(),
                region: None,
            }
        );
    }

    #[test]
    fn test_first_date_wins() {
        match interpreter().interpret("2021-06-02 or 2021-06-01") {
            ChatQuery::Day { date, .. } => assert_eq!(date, "2021-06-02"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_region_alias_case_insensitive() {
        assert_eq!(
            interpreter().interpret("PENANG today"),
            ChatQuery::Latest {
                region: Some("Pulau Pinang".to_string())
            }
        );
    }

    #[test]
    fn test_longest_alias_wins() {
        assert_eq!(
            interpreter().interpret("kuala lumpur kl"),
            ChatQuery::Latest {
                region: Some("W.P. Kuala Lumpur".to_string())
            }
        );
        assert_eq!(
            interpreter().interpret("negeri sembilan"),
            ChatQuery::Latest {
                region: Some("Negeri Sembilan".to_string())
            }
        );
    }

    #[test]
    fn test_alias_inside_a_word_does_not_match() {
        assert_eq!(interpreter().interpret("weekly numbers"), ChatQuery::Unrecognized);
        assert_eq!(
            interpreter().interpret("2021-06-01 weekly"),
            ChatQuery::Day {
                date: "2021-06-01".to_string(),
                region: None,
            }
        );
        // Punctuation still delimits a word
        assert_eq!(
            interpreter().interpret("kl?"),
            ChatQuery::Latest {
                region: Some("W.P. Kuala Lumpur".to_string())
            }
        );
    }

    #[test]
    fn test_country_keyword() {
        assert_eq!(
            interpreter().interpret("cobis update?"),
            ChatQuery::Latest { region: None }
        );
        assert_eq!(
            interpreter().interpret("malaysia"),
            ChatQuery::Latest { region: None }
        );
    }

    #[test]
    fn test_bot_mention_is_greeting() {
        assert_eq!(interpreter().interpret(" <@U0BOT> "), ChatQuery::Greeting);
        // A mention plus a question is a question
        assert_eq!(
            interpreter().interpret("<@U0BOT> malaysia"),
            ChatQuery::Latest { region: None }
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(interpreter().interpret("what's for lunch"), ChatQuery::Unrecognized);
        assert_eq!(interpreter().interpret(""), ChatQuery::Unrecognized);
    }
}
