//! Fixed replies used when generation fails.
//!
//! Every set carries exactly [`OPTIONS_PER_TURN`](super::OPTIONS_PER_TURN)
//! options so the game can always continue.

use super::{BossReply, ReplyOption};

/// Boss line substituted when a turn's generation fails.
pub const TURN_BOSS_MESSAGE: &str = "我需要看到你的诚意和具体的改进措施！";

/// Boss line returned by the chat endpoint when the model's content is not usable JSON.
pub const UNPARSABLE_BOSS_MESSAGE: &str = "我需要看到你的诚意和改进措施！";

const TURN_OPTIONS: [(&str, i32); 6] = [
    ("老板，我深刻反思了，制定了详细的改进计划", 15),
    ("这次确实是我的问题，我会立即整改", 12),
    ("我以后会更加注意这个问题", 8),
    ("老板您说得对，我接受批评", -5),
    ("我觉得这个问题不算太严重吧", -10),
    ("要不我们先吃个饭再聊？", -15),
];

const OPENING_OPTIONS: [(&str, i32); 6] = [
    ("对不起，这确实是我的错", 10),
    ("我会立即改正这个问题", 8),
    ("我有我的理由", -10),
    ("这不全是我的问题", -15),
    ("要不我们先冷静一下？", -5),
    ("老板，您今天吃了吗？", -20),
];

const UNPARSABLE_OPTIONS: [(&str, i32); 6] = [
    ("老板，我深刻反思了，制定了详细的改进计划", 15),
    ("这次确实是我的问题，我会立即整改", 10),
    ("老板您说得对，我以后注意", -5),
    ("我觉得这个问题不算太严重吧", -10),
    ("要不我们先吃个饭再聊？", -15),
    ("老板，您今天心情不好吗？", -8),
];

fn to_options(table: &[(&str, i32)]) -> Vec<ReplyOption> {
    table
        .iter()
        .map(|(text, score)| ReplyOption::new(*text, *score))
        .collect()
}

/// Reply installed by the turn controller after a failed generation.
pub fn turn_reply() -> BossReply {
    BossReply::new(TURN_BOSS_MESSAGE, to_options(&TURN_OPTIONS))
}

/// Options installed when the opening request fails. No boss line accompanies them.
pub fn opening_options() -> Vec<ReplyOption> {
    to_options(&OPENING_OPTIONS)
}

/// Reply served by the chat endpoint when the model answered with unusable content.
pub fn unparsable_reply() -> BossReply {
    BossReply::new(UNPARSABLE_BOSS_MESSAGE, to_options(&UNPARSABLE_OPTIONS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OPTIONS_PER_TURN;

    fn positives(options: &[ReplyOption]) -> usize {
        options.iter().filter(|o| o.is_positive()).count()
    }

    #[test]
    fn every_fallback_has_a_full_option_set() {
        assert_eq!(turn_reply().options.len(), OPTIONS_PER_TURN);
        assert_eq!(opening_options().len(), OPTIONS_PER_TURN);
        assert_eq!(unparsable_reply().options.len(), OPTIONS_PER_TURN);
    }

    #[test]
    fn fallback_sets_keep_some_way_forward() {
        assert_eq!(positives(&turn_reply().options), 3);
        assert_eq!(positives(&opening_options()), 2);
        assert_eq!(positives(&unparsable_reply().options), 2);
    }

    #[test]
    fn turn_fallback_uses_fixed_boss_line() {
        assert_eq!(turn_reply().boss_message, TURN_BOSS_MESSAGE);
        assert_ne!(TURN_BOSS_MESSAGE, UNPARSABLE_BOSS_MESSAGE);
    }
}
