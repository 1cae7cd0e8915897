//! Workplace scenarios the player can pick from.
//!
//! Four scenarios ship with the game, each with a fixed opening line from the
//! boss. Players may also describe their own predicament, which gets the
//! generic opener.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Opening line for scenarios without a scripted one.
pub const GENERIC_OPENING_LINE: &str = "我们需要谈谈。";

/// Longest custom description accepted, in characters. The description is
/// repeated in every generation request for the session.
pub const MAX_CUSTOM_DESCRIPTION_CHARS: usize = 300;

struct BuiltInScenario {
    id: u32,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    opening_line: &'static str,
}

const BUILT_IN: [BuiltInScenario; 4] = [
    BuiltInScenario {
        id: 1,
        title: "迟到危机",
        description: "你今天约客户在公司开会，但是你迟到了两小时，老板很生气。",
        icon: "⏰",
        opening_line: "你知道现在几点了吗？客户都等了两个小时了！你到底在干什么？",
    },
    BuiltInScenario {
        id: 2,
        title: "日报失踪",
        description: "你连续一周没有发日报。",
        icon: "📝",
        opening_line: "我发现你已经一周没交日报了，这是什么情况？你是不是觉得工作可有可无？",
    },
    BuiltInScenario {
        id: 3,
        title: "深夜失联",
        description: "老板昨天晚上有紧急的事情找你，发微信，你没有及时回复。",
        icon: "📱",
        opening_line: "昨天晚上我发微信找你处理紧急事务，你竟然没回复！你把工作当儿戏吗？",
    },
    BuiltInScenario {
        id: 4,
        title: "AI效率质疑",
        description: "老板认为使用AI工具可以提效1000%，而你使用AI工具只提升了10%",
        icon: "🤖",
        opening_line: "我看别人用AI工具效率提升了1000%，你怎么只提升了10%？是工具不行还是人不行？",
    },
];

/// The situation the player has to talk their way out of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Catalog id; `None` for player-described scenarios.
    id: Option<u32>,
    title: String,
    description: String,
    icon: String,
    opening_line: String,
}

impl Scenario {
    /// All built-in scenarios, in catalog order.
    pub fn catalog() -> Vec<Scenario> {
        BUILT_IN.iter().map(Scenario::from_built_in).collect()
    }

    /// Look up a built-in scenario.
    pub fn find(id: u32) -> Option<Scenario> {
        BUILT_IN
            .iter()
            .find(|s| s.id == id)
            .map(Scenario::from_built_in)
    }

    /// A player-described scenario.
    pub fn custom(description: impl Into<String>) -> Result<Scenario, DomainError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(DomainError::validation(
                "Scenario description cannot be empty",
            ));
        }
        if description.chars().count() > MAX_CUSTOM_DESCRIPTION_CHARS {
            return Err(DomainError::validation(format!(
                "Scenario description cannot exceed {MAX_CUSTOM_DESCRIPTION_CHARS} characters"
            )));
        }
        Ok(Scenario {
            id: None,
            title: "自定义场景".to_string(),
            description,
            icon: "💼".to_string(),
            opening_line: GENERIC_OPENING_LINE.to_string(),
        })
    }

    fn from_built_in(s: &BuiltInScenario) -> Scenario {
        Scenario {
            id: Some(s.id),
            title: s.title.to_string(),
            description: s.description.to_string(),
            icon: s.icon.to_string(),
            opening_line: s.opening_line.to_string(),
        }
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn opening_line(&self) -> &str {
        &self.opening_line
    }

    /// System line that frames every generation request for this scenario.
    pub fn system_line(&self) -> String {
        format!("场景：{}", self.description)
    }
}
