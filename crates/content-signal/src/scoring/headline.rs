use regex::Regex;
use serde::{Deserialize, Serialize};

const AMOUNT: &str = r"\$\s?\d+(?:[.,]\d+)?\s?(?:billion|million|bn|[bm])\b";

/// Structural headline shapes that mark a story as worth surfacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadlineSignal {
    CompanyAnnouncement,
    Partnership,
    Acquisition,
    Funding,
    MajorLaunch,
    IndustryDisruption,
    ExclusiveOrBreaking,
}

impl HeadlineSignal {
    pub const ALL: [HeadlineSignal; 7] = [
        HeadlineSignal::CompanyAnnouncement,
        HeadlineSignal::Partnership,
        HeadlineSignal::Acquisition,
        HeadlineSignal::Funding,
        HeadlineSignal::MajorLaunch,
        HeadlineSignal::IndustryDisruption,
        HeadlineSignal::ExclusiveOrBreaking,
    ];

    fn pattern(self) -> String {
        match self {
            HeadlineSignal::CompanyAnnouncement => concat!(
                r"(?i)\b(?:openai|anthropic|google|deepmind|microsoft|meta|apple|amazon|aws|",
                r"nvidia|ibm|salesforce|mistral|xai|hugging ?face|samsung|intel|amd|baidu|",
                r"alibaba|tencent)\b[^.!?]{0,40}?\b(?:announce[sd]?|unveil(?:s|ed)?|",
                r"introduce[sd]?|launch(?:es|ed)?|release[sd]?|debut(?:s|ed)?|reveal(?:s|ed)?)\b"
            )
            .to_string(),
            HeadlineSignal::Partnership => concat!(
                r"(?i)\b(?:partners?|partnered|partnership|teams? up|teamed up|",
                r"collaborat(?:es?|ed|ion|ing)|alliance|joins? forces)\b[^.!?]{0,20}?\bwith\b"
            )
            .to_string(),
            HeadlineSignal::Acquisition => format!(
                r"(?i)\b(?:acquir(?:es?|ed|ing)|acquisition|buys?|bought|takeover)\b[^.!?]*?{AMOUNT}|{AMOUNT}[^.!?]*?\b(?:acquisition|takeover|buyout)\b"
            ),
            HeadlineSignal::Funding => format!(
                r"(?i)\b(?:raises?|raised|funding|series [a-f]|seed round|valuation|invests?|investment)\b[^.!?]*?{AMOUNT}|{AMOUNT}[^.!?]*?\b(?:funding|round|raise|valuation)\b"
            ),
            HeadlineSignal::MajorLaunch => concat!(
                r"(?i)\b(?:launch(?:es|ed)?|releases?|released|unveils?|unveiled|rolls? out|",
                r"rolled out|ships?|shipped|debuts?)\b[^.!?]{0,60}?\b(?:gpt[- ]?\d(?:\.\d)?|",
                r"claude|gemini|llama|grok|copilot|sora|model|platform|agent|chip|api|assistant)s?\b"
            )
            .to_string(),
            HeadlineSignal::IndustryDisruption => concat!(
                r"(?i)\b(?:disrupt(?:s|ed|ing|ion)?|revolutioni[sz](?:es|ed|ing|e)|",
                r"transform(?:s|ed|ing)?|upend(?:s|ed)?|reshap(?:es|ed|ing|e)|",
                r"game[- ]chang(?:er|ing))\b[^.!?]{0,60}?\b(?:industr(?:y|ies)|markets?|",
                r"sectors?|business(?:es)?|economy|workforce|jobs)\b"
            )
            .to_string(),
            HeadlineSignal::ExclusiveOrBreaking => {
                r"(?i)^\s*(?:breaking|exclusive|just in)\b|\b(?:breaking|exclusive)\s*:".to_string()
            }
        }
    }
}

/// Compiled headline patterns, shared read-only by every scoring call.
#[derive(Debug, Clone)]
pub struct HeadlinePatterns {
    patterns: Vec<(HeadlineSignal, Regex)>,
}

impl HeadlinePatterns {
    pub fn standard() -> Result<Self, regex::Error> {
        let patterns = HeadlineSignal::ALL
            .iter()
            .map(|signal| Regex::new(&signal.pattern()).map(|regex| (*signal, regex)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Signals whose pattern matches `text`, in declaration order.
    pub fn detect(&self, text: &str) -> Vec<HeadlineSignal> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(signal, _)| *signal)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> HeadlinePatterns {
        HeadlinePatterns::standard().expect("headline patterns compile")
    }

    #[test]
    fn detects_company_announcement_and_breaking_prefix() {
        let signals = patterns().detect("Breaking: OpenAI announces GPT-5");
        assert_eq!(
            signals,
            vec![
                HeadlineSignal::CompanyAnnouncement,
                HeadlineSignal::ExclusiveOrBreaking
            ]
        );
    }

    #[test]
    fn detects_money_backed_deals() {
        let patterns = patterns();
        assert!(patterns
            .detect("Nvidia acquires inference startup for $700 million")
            .contains(&HeadlineSignal::Acquisition));
        assert!(patterns
            .detect("Mistral raises $640M in Series B")
            .contains(&HeadlineSignal::Funding));
        assert!(!patterns
            .detect("Startup raises questions about benchmarks")
            .contains(&HeadlineSignal::Funding));
    }

    #[test]
    fn detects_partnerships_launches_and_disruption() {
        let patterns = patterns();
        assert!(patterns
            .detect("Salesforce partners with Anthropic on enterprise agents")
            .contains(&HeadlineSignal::Partnership));
        assert!(patterns
            .detect("Startup launches new reasoning model for lawyers")
            .contains(&HeadlineSignal::MajorLaunch));
        assert!(patterns
            .detect("How agents will transform the insurance industry")
            .contains(&HeadlineSignal::IndustryDisruption));
    }

    #[test]
    fn plain_text_matches_nothing() {
        assert!(patterns().detect("A calm look at spreadsheets").is_empty());
        assert!(patterns().detect("").is_empty());
    }
}
