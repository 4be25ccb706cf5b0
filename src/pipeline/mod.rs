//! Pipeline Module
//!
//! トークン正規化 → セクション分割 → 4つのパーサー → 結果の組み立て、を提供します。
//! 各パーサーは自分のセクションのトークン列だけを読み、状態を共有しません。

mod devices;
mod groups;
mod remotes;
mod scenes;
mod sections;
mod tokens;

pub use devices::parse_devices;
pub use groups::parse_groups;
pub use remotes::{parse_button_line, parse_remote_controls};
pub use scenes::{parse_scene_line, parse_scenes};
pub use sections::{split_sections, SectionTokens};
pub use tokens::{NormalizerConfig, TokenNormalizer};

use std::borrow::Cow;

use tracing::{debug, info};

use crate::api::DialectSelector;
use crate::dialect::{self, DialectConfig, SectionMarkers};
use crate::types::{ProgrammingDocument, Section};

/// 分割済みのセクションを4つのパーサーでパースし、ドキュメントを組み立てる
///
/// 4つのパーサーは`rayon::join`で並列に実行されます。結果は逐次実行と同一です。
pub fn parse_sections(sections: &SectionTokens, config: &DialectConfig) -> ProgrammingDocument {
    let ((devices, groups), (scenes, remote_controls)) = rayon::join(
        || {
            rayon::join(
                || parse_devices(sections.get(Section::Devices), config),
                || parse_groups(sections.get(Section::Groups), config),
            )
        },
        || {
            rayon::join(
                || parse_scenes(sections.get(Section::Scenes), config),
                || parse_remote_controls(sections.get(Section::RemoteControls), config),
            )
        },
    );

    ProgrammingDocument {
        devices,
        groups,
        scenes,
        remote_controls,
    }
}

/// トークン列全体を処理してドキュメントを生成
///
/// 方言の選択に応じて設定テーブルを決め、セクション分割とパースを行います。
/// 自動判定の場合は組み込みのマーカーで分割してから方言を判定します。
pub(crate) fn run(tokens: Vec<String>, selector: &DialectSelector) -> ProgrammingDocument {
    let (config, sections): (Cow<'_, DialectConfig>, SectionTokens) = match selector {
        DialectSelector::Custom(config) => {
            let sections = split_sections(tokens, &config.markers);
            (Cow::Borrowed(&**config), sections)
        }
        DialectSelector::Fixed(dialect) => {
            let config = dialect.config();
            let sections = split_sections(tokens, &config.markers);
            (Cow::Owned(config), sections)
        }
        DialectSelector::Auto => {
            let sections = split_sections(tokens, &SectionMarkers::default());
            let dialect = dialect::detect(&sections);
            debug!(?dialect, "dialect resolved automatically");
            (Cow::Owned(dialect.config()), sections)
        }
    };

    let document = parse_sections(&sections, &config);
    info!(
        tokens = sections.len(),
        devices = document.devices.len(),
        groups = document.groups.len(),
        scenes = document.scenes.len(),
        remote_controls = document.remote_controls.len(),
        "programming sheet parsed"
    );
    document
}
