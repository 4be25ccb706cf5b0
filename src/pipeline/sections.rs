//! Section Splitter Module
//!
//! 正規化済みトークン列をセクションマーカーで4つのセクションに振り分けます。

use crate::dialect::SectionMarkers;
use crate::types::Section;

/// セクションごとのトークン列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTokens {
    devices: Vec<String>,
    groups: Vec<String>,
    scenes: Vec<String>,
    remote_controls: Vec<String>,
}

impl SectionTokens {
    /// セクションのトークン列
    pub fn get(&self, section: Section) -> &[String] {
        match section {
            Section::Devices => &self.devices,
            Section::Groups => &self.groups,
            Section::Scenes => &self.scenes,
            Section::RemoteControls => &self.remote_controls,
        }
    }

    /// セクションにトークンを追加
    pub fn push(&mut self, section: Section, token: String) {
        let list = match section {
            Section::Devices => &mut self.devices,
            Section::Groups => &mut self.groups,
            Section::Scenes => &mut self.scenes,
            Section::RemoteControls => &mut self.remote_controls,
        };
        list.push(token);
    }

    /// 全セクションのトークン数の合計
    pub fn len(&self) -> usize {
        Section::ALL.iter().map(|&s| self.get(s).len()).sum()
    }

    /// すべてのセクションが空かどうか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// トークン列をセクションに分割
///
/// マーカーに完全一致するトークンで現在のセクションを切り替え、マーカー自体は捨てます。
/// 最初のマーカーより前のトークンも捨てます。同じマーカーが再び現れた場合は、
/// そのセクションに追記されます。
///
/// # 使用例
///
/// ```rust
/// use progsheet::{split_sections, Section, SectionMarkers};
///
/// let tokens = ["title", "KASTA GROUP", "Living Room"].map(String::from);
/// let sections = split_sections(tokens, &SectionMarkers::default());
/// assert_eq!(sections.get(Section::Groups), ["Living Room".to_string()]);
/// assert!(sections.get(Section::Devices).is_empty());
/// ```
pub fn split_sections<I>(tokens: I, markers: &SectionMarkers) -> SectionTokens
where
    I: IntoIterator<Item = String>,
{
    let (sections, _) = tokens.into_iter().fold(
        (SectionTokens::default(), None::<Section>),
        |(mut sections, current), token| {
            if let Some(section) = markers.section_for(&token) {
                return (sections, Some(section));
            }
            if let Some(section) = current {
                sections.push(section, token);
            }
            (sections, current)
        },
    );
    sections
}
