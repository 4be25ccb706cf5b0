//! Group Parser Module

use tracing::{debug, trace};

use crate::dialect::{DialectConfig, RuleAction};
use crate::types::Group;

/// グループセクションをパース
///
/// 各トークンに`group_rules`を先頭から適用し、最初に一致した規則の動作に従います。
/// `Skip`はそのトークンを捨て、`Stop`はそのトークン以降をすべて捨てます。
/// どの規則にも一致しないトークンがグループ名になります。
pub fn parse_groups(tokens: &[String], config: &DialectConfig) -> Vec<Group> {
    let mut groups = Vec::new();

    for token in tokens {
        let action = config
            .group_rules
            .iter()
            .find(|rule| rule.predicate.matches(token))
            .map(|rule| rule.action);

        match action {
            Some(RuleAction::Stop) => {
                debug!(token = %token, "group section closed early");
                break;
            }
            Some(RuleAction::Skip) => trace!(token = %token, "group token skipped"),
            None if token.is_empty() => {}
            None => groups.push(Group::new(token.as_str())),
        }
    }

    groups
}
