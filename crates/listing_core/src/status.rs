//! Maps free-text status strings onto the fixed visual taxonomy.
//!
//! Rules are evaluated top to bottom and the first hit wins. The recruitment
//! rule compares against the raw string; every other rule compares against
//! the lowercased string.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    Recruitment,
    ReleaseDay,
    Reveal,
    Live,
    Testing,
    PreRegistration,
    InDevelopment,
    Update,
    Unknown,
}

impl StatusTag {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusTag::Recruitment => "status-recruitment",
            StatusTag::ReleaseDay => "status-release",
            StatusTag::Reveal => "status-reveal",
            StatusTag::Live => "status-online",
            StatusTag::Testing => "status-testing",
            StatusTag::PreRegistration => "status-preorder",
            StatusTag::InDevelopment => "status-dev",
            StatusTag::Update => "status-update",
            StatusTag::Unknown => "status-unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusTag::Recruitment => "recruitment",
            StatusTag::ReleaseDay => "release day",
            StatusTag::Reveal => "reveal",
            StatusTag::Live => "live",
            StatusTag::Testing => "testing",
            StatusTag::PreRegistration => "pre-registration",
            StatusTag::InDevelopment => "in development",
            StatusTag::Update => "update",
            StatusTag::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    Sensitive,
    Insensitive,
}

#[derive(Debug, Clone, Copy)]
pub struct StatusRule {
    pub tag: StatusTag,
    pub case: MatchCase,
    /// Lowercase for `Insensitive` rules.
    pub keywords: &'static [&'static str],
}

impl StatusRule {
    fn matches(&self, raw: &str, lowered: &str) -> bool {
        let haystack = match self.case {
            MatchCase::Sensitive => raw,
            MatchCase::Insensitive => lowered,
        };
        self.keywords.iter().any(|keyword| haystack.contains(keyword))
    }
}

/// Precedence table. Order is load-bearing: `测试招募` must land on
/// recruitment, `公测` on live rather than testing.
pub const STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        tag: StatusTag::Recruitment,
        case: MatchCase::Sensitive,
        keywords: &["招募"],
    },
    StatusRule {
        tag: StatusTag::ReleaseDay,
        case: MatchCase::Insensitive,
        keywords: &["首发", "定档", "release day"],
    },
    StatusRule {
        tag: StatusTag::Reveal,
        case: MatchCase::Insensitive,
        keywords: &["首曝", "曝光", "公布", "reveal", "announce"],
    },
    StatusRule {
        tag: StatusTag::Live,
        case: MatchCase::Insensitive,
        keywords: &["上线", "公测", "open beta", "launch"],
    },
    StatusRule {
        tag: StatusTag::Testing,
        case: MatchCase::Insensitive,
        keywords: &["测试", "内测", "删档", "beta", "test"],
    },
    StatusRule {
        tag: StatusTag::PreRegistration,
        case: MatchCase::Insensitive,
        keywords: &["预约", "预订", "预下载", "pre-regist", "preregist"],
    },
    StatusRule {
        tag: StatusTag::InDevelopment,
        case: MatchCase::Insensitive,
        keywords: &["开发中", "in development"],
    },
    StatusRule {
        tag: StatusTag::Update,
        case: MatchCase::Insensitive,
        keywords: &["更新", "版本", "update"],
    },
];

pub fn classify(status: Option<&str>) -> StatusTag {
    classify_with(STATUS_RULES, status)
}

pub fn classify_with(rules: &[StatusRule], status: Option<&str>) -> StatusTag {
    let Some(raw) = status.filter(|value| !value.trim().is_empty()) else {
        return StatusTag::Unknown;
    };
    let lowered = raw.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(raw, &lowered))
        .map(|rule| rule.tag)
        .unwrap_or(StatusTag::Unknown)
}

#[cfg(test)]
#[path = "tests/status_tests.rs"]
mod tests;
