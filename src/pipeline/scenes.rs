//! Scene Parser Module
//!
//! シーンセクションを2段階でパースします。
//!
//! 1. 外側: 区切りトークンでシーンごとの範囲に分割
//! 2. 内側: 各シーンの制御内容行を`名前 状態 [+ レベル%]`として解釈

use tracing::{debug, trace};

use crate::dialect::DialectConfig;
use crate::types::{Scene, SceneContent, StatusConditions};

/// 制御内容の見出し
const CONTROL_CONTENT_PREFIX: &str = "CONTROL CONTENT:";

/// 集計行の接頭辞
pub(crate) const TOTAL_PREFIX: &str = "TOTAL";

/// 開いているシーン
struct OpenScene<'a> {
    name: &'a str,
    lines: Vec<&'a str>,
}

/// 左畳み込みの累積値
#[derive(Default)]
struct SceneFold<'a> {
    scenes: Vec<Scene>,
    open: Option<OpenScene<'a>>,
}

impl<'a> SceneFold<'a> {
    /// 開いているシーンを閉じて出力に追加
    fn close(&mut self) {
        if let Some(open) = self.open.take() {
            self.scenes.push(Scene {
                scene_name: open.name.to_string(),
                contents: open.lines.into_iter().filter_map(parse_scene_line).collect(),
            });
        }
    }

    /// 新しいシーンを開く（名前が空なら開かない）
    fn open(&mut self, name: &'a str) {
        self.close();
        if name.is_empty() {
            debug!("scene delimiter without a name, following lines dropped");
            return;
        }
        self.open = Some(OpenScene {
            name,
            lines: Vec::new(),
        });
    }

    fn finish(mut self) -> Vec<Scene> {
        self.close();
        self.scenes
    }
}

/// シーンセクションをパース
///
/// 区切りトークン（方言により`NAME:`接頭辞、または既知のシーン名）で新しいシーンを開き、
/// 直前のシーンを閉じます。`TOTAL`行と`CONTROL CONTENT:`行は捨て、それ以外の行は
/// 開いているシーンの制御内容として蓄積します。最後のシーンは入力の終端で閉じます。
pub fn parse_scenes(tokens: &[String], config: &DialectConfig) -> Vec<Scene> {
    tokens
        .iter()
        .fold(SceneFold::default(), |mut state, token| {
            if token.starts_with(TOTAL_PREFIX) {
                return state;
            }
            if let Some(name) = config.scene_delimiter.name_of(token) {
                state.open(name);
                return state;
            }
            if token.starts_with(CONTROL_CONTENT_PREFIX) {
                return state;
            }
            match state.open.as_mut() {
                Some(scene) => scene.lines.push(token),
                None => trace!(token = %token, "scene line outside any scene"),
            }
            state
        })
        .finish()
}

/// 制御内容の1行をパース
///
/// 空白で分割し、1番目を名前、2番目を状態とします。フィールドが2つ未満の行は`None`です。
/// レベルは状態が`ON`なら100、それ以外は0で、`+`の次のフィールド（末尾の`%`を除く）が
/// 整数として解釈できればその値で上書きします（範囲は制限しません）。
///
/// # 使用例
///
/// ```rust
/// use progsheet::parse_scene_line;
///
/// let content = parse_scene_line("Lamp3 DIM + 45%").unwrap();
/// assert_eq!(content.name, "Lamp3");
/// assert_eq!(content.status, "DIM");
/// assert_eq!(content.level(), 45);
///
/// assert!(parse_scene_line("Lamp3").is_none());
/// ```
pub fn parse_scene_line(line: &str) -> Option<SceneContent> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        trace!(line = %line, "scene line with fewer than 2 fields");
        return None;
    }

    let name = fields[0];
    let status = fields[1];
    let default_level = if status == "ON" { 100 } else { 0 };

    let level = if fields.len() > 2 {
        fields
            .iter()
            .position(|&field| field == "+")
            .and_then(|pos| fields.get(pos + 1))
            .and_then(|raw| parse_level(raw))
            .unwrap_or(default_level)
    } else {
        default_level
    };

    Some(SceneContent {
        name: name.to_string(),
        status: status.to_string(),
        status_conditions: StatusConditions { level },
    })
}

/// `45%`形式のレベルを解釈
fn parse_level(raw: &str) -> Option<i32> {
    let digits = raw.strip_suffix('%').unwrap_or(raw);
    match digits.parse::<i32>() {
        Ok(level) => Some(level),
        Err(_) => {
            trace!(raw = %raw, "unparseable scene level, keeping default");
            None
        }
    }
}
