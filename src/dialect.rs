//! Dialect Module
//!
//! 2種類の方言を表す設定テーブルと、方言の自動判定を提供するモジュール。
//!
//! パーサーはキーワードや区切り規則を直接持たず、すべて[`DialectConfig`]から
//! 受け取ります。テーブルはserdeでJSONから読み込めます。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::Dialect;
use crate::error::ProgSheetError;
use crate::pipeline::SectionTokens;
use crate::types::{LinkType, Section};

/// `NAME:`接頭辞
pub(crate) const NAME_PREFIX: &str = "NAME:";

/// セクションマーカーの表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMarkers {
    /// デバイスセクションの開始マーカー
    pub devices: String,
    /// グループセクションの開始マーカー
    pub groups: String,
    /// シーンセクションの開始マーカー
    pub scenes: String,
    /// リモコンセクションの開始マーカー
    pub remote_controls: String,
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self {
            devices: "KASTA DEVICE".to_string(),
            groups: "KASTA GROUP".to_string(),
            scenes: "KASTA SCENE".to_string(),
            remote_controls: "REMOTE CONTROL LINK".to_string(),
        }
    }
}

impl SectionMarkers {
    /// セクションのマーカー文字列
    pub fn marker(&self, section: Section) -> &str {
        match section {
            Section::Devices => &self.devices,
            Section::Groups => &self.groups,
            Section::Scenes => &self.scenes,
            Section::RemoteControls => &self.remote_controls,
        }
    }

    /// トークンが完全一致するマーカーのセクション
    pub fn section_for(&self, token: &str) -> Option<Section> {
        Section::ALL
            .into_iter()
            .find(|&section| self.marker(section) == token)
    }
}

/// トークンに対する述語
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenPredicate {
    /// 完全一致
    Equals(String),
    /// 前方一致
    StartsWith(String),
    /// 部分一致
    Contains(String),
    /// 空白区切りのいずれかのフィールドが完全一致
    HasWord(String),
}

impl TokenPredicate {
    /// トークンが述語を満たすかを判定
    pub fn matches(&self, token: &str) -> bool {
        match self {
            TokenPredicate::Equals(s) => token == s,
            TokenPredicate::StartsWith(s) => token.starts_with(s.as_str()),
            TokenPredicate::Contains(s) => token.contains(s.as_str()),
            TokenPredicate::HasWord(s) => token.split_whitespace().any(|field| field == s),
        }
    }
}

/// グループ規則に一致したときの動作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleAction {
    /// このトークンを捨てる
    Skip,
    /// このトークン以降のグループセクションをすべて捨てる
    Stop,
}

/// グループ名の除外規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRule {
    /// 一致したときの動作
    pub action: RuleAction,
    /// 述語
    pub predicate: TokenPredicate,
}

impl GroupRule {
    fn skip(predicate: TokenPredicate) -> Self {
        Self {
            action: RuleAction::Skip,
            predicate,
        }
    }

    fn stop(predicate: TokenPredicate) -> Self {
        Self {
            action: RuleAction::Stop,
            predicate,
        }
    }
}

/// シーン・リモコンの区切り規則
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NameDelimiter {
    /// 接頭辞付きのトークン。名前は接頭辞を除いた残り（前後の空白除去）
    Prefix(String),
    /// 既知の名前のいずれかに完全一致するトークン
    OneOf(Vec<String>),
}

impl NameDelimiter {
    /// トークンが区切りであれば、その名前を返す
    ///
    /// 区切りであっても名前が空になる場合があります（例: `"NAME:"`単独）。
    pub fn name_of<'a>(&self, token: &'a str) -> Option<&'a str> {
        match self {
            NameDelimiter::Prefix(prefix) => token.strip_prefix(prefix.as_str()).map(str::trim),
            NameDelimiter::OneOf(names) => names.iter().any(|n| n == token).then_some(token),
        }
    }
}

/// リンク種別の判定規則（優先順位順に並べる）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRule {
    /// 一致したときのリンク種別
    pub link_type: LinkType,
    /// ラベルにいずれかが含まれれば一致
    pub keywords: Vec<String>,
}

/// 方言の設定テーブル
///
/// # 使用例
///
/// ```rust
/// use progsheet::{DialectConfig, LinkType};
///
/// let config = DialectConfig::prefixed();
/// assert_eq!(config.classify_link("GROUP Living Room"), LinkType::Group);
/// assert_eq!(config.link_name("GROUP Living Room"), "Living Room");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialectConfig {
    /// セクションマーカー
    #[serde(default)]
    pub markers: SectionMarkers,
    /// ハードウェア種別コード
    pub appearance_codes: Vec<String>,
    /// グループ名の除外規則（先に一致した規則が優先）
    pub group_rules: Vec<GroupRule>,
    /// シーンの区切り規則
    pub scene_delimiter: NameDelimiter,
    /// リモコンの区切り規則
    pub remote_delimiter: NameDelimiter,
    /// リンク種別の判定規則（優先順位順）
    pub link_rules: Vec<LinkRule>,
    /// どの規則にも一致しない場合のリンク種別
    pub fallback_link_type: LinkType,
    /// リンク名から取り除く接頭辞（最初に一致した1つのみ）
    pub link_name_prefixes: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn appearance_codes() -> Vec<String> {
    strings(&[
        "KBSKTDIM", "KBSKTREL", "S2400IB2", "C300IBH", "H1RSMB", "H2RSMB", "H3RSMB", "H4RSMB",
        "H6RSMB", "6INPUT", "4OUTPUT",
    ])
}

fn link_rules() -> Vec<LinkRule> {
    vec![
        LinkRule {
            link_type: LinkType::Scene,
            keywords: strings(&["BRIGHT", "OFF", "SOFT", "ON", "MOOD"]),
        },
        LinkRule {
            link_type: LinkType::DoNotDisturb,
            keywords: strings(&["DND"]),
        },
        LinkRule {
            link_type: LinkType::Group,
            keywords: strings(&["GROUP"]),
        },
    ]
}

fn link_name_prefixes() -> Vec<String> {
    strings(&["SCENE ", "DEVICE ", "GROUP "])
}

impl DialectConfig {
    /// `NAME:`接頭辞方言のテーブル
    pub fn prefixed() -> Self {
        use TokenPredicate::*;
        Self {
            markers: SectionMarkers::default(),
            appearance_codes: appearance_codes(),
            group_rules: vec![
                GroupRule::stop(StartsWith("TOTAL 0 GROUP".to_string())),
                GroupRule::skip(StartsWith("TOTAL".to_string())),
                GroupRule::skip(StartsWith("DEVICE CONTROL".to_string())),
                GroupRule::skip(Contains("GROUP".to_string())),
            ],
            scene_delimiter: NameDelimiter::Prefix(NAME_PREFIX.to_string()),
            remote_delimiter: NameDelimiter::Prefix(NAME_PREFIX.to_string()),
            link_rules: link_rules(),
            fallback_link_type: LinkType::Device,
            link_name_prefixes: link_name_prefixes(),
        }
    }

    /// 語彙一致方言のテーブル
    pub fn keyword() -> Self {
        use TokenPredicate::*;
        Self {
            markers: SectionMarkers::default(),
            appearance_codes: appearance_codes(),
            group_rules: vec![
                GroupRule::skip(StartsWith("TOTAL".to_string())),
                GroupRule::skip(Contains("GROUP".to_string())),
                GroupRule::skip(Contains("SCENE".to_string())),
                GroupRule::skip(StartsWith("DEVICE CONTROL".to_string())),
                GroupRule::skip(StartsWith("BLIND GROUP".to_string())),
                GroupRule::skip(HasWord("ON".to_string())),
                GroupRule::skip(HasWord("OFF".to_string())),
                GroupRule::skip(HasWord("+".to_string())),
            ],
            scene_delimiter: NameDelimiter::OneOf(strings(&[
                "BRIGHT", "SOFT", "MOOD", "ALL ON", "ALL OFF",
            ])),
            remote_delimiter: NameDelimiter::OneOf(strings(&[
                "H1RSMB", "H2RSMB", "H3RSMB", "H4RSMB", "H6RSMB",
            ])),
            link_rules: link_rules(),
            fallback_link_type: LinkType::Device,
            link_name_prefixes: link_name_prefixes(),
        }
    }

    /// JSON文字列からテーブルを読み込む
    ///
    /// 読み込み後に[`DialectConfig::validate`]で検証します。
    pub fn from_json(json: &str) -> Result<Self, ProgSheetError> {
        let config: DialectConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// テーブルの整合性を検証
    ///
    /// # 発生し得るエラー
    ///
    /// * `ProgSheetError::Config`:
    ///   * セクションマーカーが空文字列
    ///   * 2つのセクションに同じマーカー
    ///   * 区切り規則の接頭辞が空、または名前の集合が空
    ///   * 空のキーワード（すべてのラベルに一致してしまう）
    pub fn validate(&self) -> Result<(), ProgSheetError> {
        for (idx, &section) in Section::ALL.iter().enumerate() {
            let marker = self.markers.marker(section);
            if marker.trim().is_empty() {
                return Err(ProgSheetError::Config(format!(
                    "Empty section marker for {:?}",
                    section
                )));
            }
            if Section::ALL[idx + 1..]
                .iter()
                .any(|&other| self.markers.marker(other) == marker)
            {
                return Err(ProgSheetError::Config(format!(
                    "Duplicate section marker: '{}'",
                    marker
                )));
            }
        }

        for (label, delimiter) in [
            ("scene", &self.scene_delimiter),
            ("remote", &self.remote_delimiter),
        ] {
            match delimiter {
                NameDelimiter::Prefix(prefix) if prefix.is_empty() => {
                    return Err(ProgSheetError::Config(format!(
                        "Empty {} name prefix",
                        label
                    )));
                }
                NameDelimiter::OneOf(names) if names.is_empty() => {
                    return Err(ProgSheetError::Config(format!(
                        "Empty {} name set",
                        label
                    )));
                }
                _ => {}
            }
        }

        if self
            .link_rules
            .iter()
            .flat_map(|rule| rule.keywords.iter())
            .any(|k| k.is_empty())
        {
            return Err(ProgSheetError::Config(
                "Empty link keyword".to_string(),
            ));
        }

        Ok(())
    }

    /// ハードウェア種別コードかどうか
    pub fn is_appearance_code(&self, token: &str) -> bool {
        self.appearance_codes.iter().any(|code| code == token)
    }

    /// ボタンのラベルからリンク種別を判定
    ///
    /// `link_rules`を先頭から順に調べ、最初に一致した規則の種別を返します。
    /// どれにも一致しなければ`fallback_link_type`です。
    pub fn classify_link(&self, label: &str) -> LinkType {
        self.link_rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| label.contains(k.as_str())))
            .map(|rule| rule.link_type)
            .unwrap_or(self.fallback_link_type)
    }

    /// ラベルから接頭辞を1つだけ取り除いたリンク名
    pub fn link_name<'a>(&self, label: &'a str) -> &'a str {
        self.link_name_prefixes
            .iter()
            .find_map(|prefix| label.strip_prefix(prefix.as_str()))
            .map(str::trim)
            .unwrap_or(label)
    }
}

/// 分割済みセクションから方言を判定
///
/// 1. シーン・リモコンセクションに名前付きの`NAME:`トークンがあれば`Prefixed`
/// 2. 語彙一致方言の区切りに一致するトークンがあれば`Keyword`
/// 3. どちらもなければ`Prefixed`
pub(crate) fn detect(sections: &SectionTokens) -> Dialect {
    let named = |token: &String| {
        token
            .strip_prefix(NAME_PREFIX)
            .is_some_and(|rest| !rest.trim().is_empty())
    };
    let scenes = sections.get(Section::Scenes);
    let remotes = sections.get(Section::RemoteControls);

    if scenes.iter().chain(remotes).any(named) {
        debug!("dialect detected: NAME: prefixed names present");
        return Dialect::Prefixed;
    }

    let keyword = DialectConfig::keyword();
    let scene_hit = scenes
        .iter()
        .any(|t| keyword.scene_delimiter.name_of(t).is_some());
    let remote_hit = remotes
        .iter()
        .any(|t| keyword.remote_delimiter.name_of(t).is_some());

    if scene_hit || remote_hit {
        debug!("dialect detected: bare keyword names present");
        Dialect::Keyword
    } else {
        debug!("dialect not detectable, falling back to prefixed");
        Dialect::Prefixed
    }
}
