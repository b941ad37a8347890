//! Keyword rules for the deterministic fallback reply.
//!
//! Matching is plain substring containment on the lowercased, trimmed input,
//! checked in a fixed order; the first rule that matches wins.

/// Reply for empty input.
pub const EMPTY_REPLY: &str = "I didn't catch that. Please say something.";

/// Reply for any greeting.
pub const GREETING_REPLY: &str = "Hello! How can I assist you today?";

/// Placeholder reply for weather questions (no live lookup).
pub const WEATHER_REPLY: &str = "I can't fetch live weather without an API, but you can ask \
    something like 'What's the weather in London?' and I will add that in the future.";

/// Reply when nothing else matches.
pub const HELP_REPLY: &str = "I'm here to help. You can ask about the date, time, or say \
    'tell me about <topic>' for a quick Wikipedia summary.";

pub const NOT_FOUND_REPLY: &str = "I couldn't find information on that topic. Try rephrasing.";

pub const LOOKUP_FAILED_REPLY: &str =
    "Sorry, I ran into a problem fetching information from Wikipedia.";

pub const AMBIGUOUS_REPLY: &str = "That topic has multiple meanings. Please be more specific";

/// `HH:MM AM/PM`, local clock.
pub const TIME_FORMAT: &str = "%I:%M %p";

/// `Weekday, Month DD, YYYY`, local clock.
pub const DATE_FORMAT: &str = "%A, %B %d, %Y";

/// Matched as prefix or anywhere in the text, so "hey" inside a longer
/// sentence still counts.
pub const GREETINGS: [&str; 6] = [
    "hi",
    "hello",
    "hey",
    "good morning",
    "good evening",
    "good afternoon",
];

/// Phrases that turn the rest of the message into an encyclopedia topic.
/// Order matters: the first one found is the one stripped.
pub const LOOKUP_TRIGGERS: [&str; 5] = ["who is", "what is", "tell me about", "define", "explain"];

/// Characters stripped from both ends of an extracted topic.
const TOPIC_TRIM: &[char] = &[' ', '?', '!', '.', ',', ':'];

/// The rule selected for an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Empty,
    Greeting,
    Time,
    Date,
    Weather,
    Lookup { topic: String },
    Help,
}

/// Pick the rule for `user_text`.
pub fn match_rule(user_text: &str) -> Rule {
    let text = user_text.trim().to_lowercase();
    if text.is_empty() {
        return Rule::Empty;
    }

    if GREETINGS
        .iter()
        .any(|greet| text.starts_with(greet) || text.contains(greet))
    {
        return Rule::Greeting;
    }

    if text.contains("time") {
        return Rule::Time;
    }
    if text.contains("date") || text.contains("today") {
        return Rule::Date;
    }

    if text.contains("weather") {
        return Rule::Weather;
    }

    if let Some(trigger) = LOOKUP_TRIGGERS.iter().find(|t| text.contains(*t)) {
        return Rule::Lookup {
            topic: extract_topic(&text, trigger, user_text),
        };
    }

    Rule::Help
}

/// Remove `trigger` from the lowercased text and trim what is left.
///
/// When only the trigger itself was said ("what is?"), the whole original
/// message becomes the topic.
fn extract_topic(lowered: &str, trigger: &str, original: &str) -> String {
    let remainder = lowered.replace(trigger, "");
    let topic = remainder.trim_matches(|c: char| c.is_whitespace() || TOPIC_TRIM.contains(&c));
    if topic.is_empty() {
        original.trim().to_string()
    } else {
        topic.to_string()
    }
}

/// Reply for a topic with several meanings, naming up to three of them.
pub fn ambiguous_reply(options: &[String]) -> String {
    if options.is_empty() {
        return format!("{AMBIGUOUS_REPLY}.");
    }
    let examples = options
        .iter()
        .take(3)
        .map(|o| format!("'{o}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{AMBIGUOUS_REPLY}, for example: {examples}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(topic: &str) -> Rule {
        Rule::Lookup {
            topic: topic.to_string(),
        }
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(match_rule(""), Rule::Empty);
        assert_eq!(match_rule("   \t"), Rule::Empty);
    }

    #[test]
    fn test_greetings_anywhere() {
        assert_eq!(match_rule("hi"), Rule::Greeting);
        assert_eq!(match_rule("Hello there"), Rule::Greeting);
        assert_eq!(match_rule("good morning!"), Rule::Greeting);
        assert_eq!(match_rule("well hey you"), Rule::Greeting);
    }

    #[test]
    fn test_greeting_beats_time() {
        assert_eq!(match_rule("hello, what time is it"), Rule::Greeting);
    }

    #[test]
    fn test_substring_greeting_is_broad() {
        // "this" contains "hi"
        assert_eq!(match_rule("what is this"), Rule::Greeting);
    }

    #[test]
    fn test_time_before_date() {
        assert_eq!(match_rule("What TIME is it?"), Rule::Time);
        assert_eq!(match_rule("date and time please"), Rule::Time);
    }

    #[test]
    fn test_date_and_today() {
        assert_eq!(match_rule("what's the date"), Rule::Date);
        assert_eq!(match_rule("What day is today"), Rule::Date);
    }

    #[test]
    fn test_weather() {
        assert_eq!(match_rule("weather in London?"), Rule::Weather);
    }

    #[test]
    fn test_lookup_extracts_topic() {
        assert_eq!(match_rule("tell me about Python"), lookup("python"));
        assert_eq!(match_rule("Who is Ada Lovelace?"), lookup("ada lovelace"));
        assert_eq!(match_rule("define: entropy."), lookup("entropy"));
        assert_eq!(match_rule("explain quantum computing!!"), lookup("quantum computing"));
    }

    #[test]
    fn test_lookup_strips_only_first_trigger() {
        assert_eq!(match_rule("what is define"), lookup("define"));
    }

    #[test]
    fn test_lookup_with_nothing_left_uses_original() {
        assert_eq!(match_rule("  What is?  "), lookup("What is?"));
    }

    #[test]
    fn test_help_fallback() {
        assert_eq!(match_rule("sing me a song"), Rule::Help);
    }

    #[test]
    fn test_ambiguous_reply_lists_three() {
        let options: Vec<String> = [
            "Mercury (planet)",
            "Mercury (element)",
            "Freddie Mercury",
            "Mercury Records",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(
            ambiguous_reply(&options),
            "That topic has multiple meanings. Please be more specific, for example: \
             'Mercury (planet)', 'Mercury (element)', 'Freddie Mercury'"
        );
    }

    #[test]
    fn test_ambiguous_reply_without_options() {
        assert_eq!(
            ambiguous_reply(&[]),
            "That topic has multiple meanings. Please be more specific."
        );
    }
}
