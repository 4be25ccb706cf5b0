//! Remote Control Parser Module
//!
//! リモコンセクションを2段階でパースします。外側はシーンと同じ区切り規則で
//! リモコンごとに分割し、内側は`BUTTON n: ラベル`行をリンクとして解釈します。

use tracing::{debug, trace};

use crate::dialect::DialectConfig;
use crate::pipeline::scenes::TOTAL_PREFIX;
use crate::types::{Link, RemoteControl};

/// ボタン行の接頭辞
const BUTTON_PREFIX: &str = "BUTTON";

/// 左畳み込みの累積値
#[derive(Default)]
struct RemoteFold {
    remotes: Vec<RemoteControl>,
    open: Option<RemoteControl>,
}

impl RemoteFold {
    fn close(&mut self) {
        if let Some(remote) = self.open.take() {
            self.remotes.push(remote);
        }
    }

    fn open(&mut self, name: &str) {
        self.close();
        if name.is_empty() {
            debug!("remote delimiter without a name, following buttons dropped");
            return;
        }
        self.open = Some(RemoteControl {
            remote_name: name.to_string(),
            links: Vec::new(),
        });
    }

    fn finish(mut self) -> Vec<RemoteControl> {
        self.close();
        self.remotes
    }
}

/// リモコンセクションをパース
///
/// 区切りトークンで新しいリモコンを開き、`BUTTON`で始まる行をリンクとして追加します。
/// それ以外の行は無視します（シーンと異なり蓄積しません）。
pub fn parse_remote_controls(tokens: &[String], config: &DialectConfig) -> Vec<RemoteControl> {
    tokens
        .iter()
        .fold(RemoteFold::default(), |mut state, token| {
            if token.starts_with(TOTAL_PREFIX) {
                return state;
            }
            if let Some(name) = config.remote_delimiter.name_of(token) {
                state.open(name);
                return state;
            }
            if !token.starts_with(BUTTON_PREFIX) {
                return state;
            }
            match (state.open.as_mut(), parse_button_line(token, config)) {
                (Some(remote), Some(link)) => remote.links.push(link),
                (None, _) => trace!(token = %token, "button line outside any remote"),
                (_, None) => debug!(token = %token, "malformed button line dropped"),
            }
            state
        })
        .finish()
}

/// `BUTTON n: ラベル`行をリンクに変換
///
/// 最初の`:`で2つに分割し、前半の番号`n`（1始まり）から`link_index = n - 1`を求めます。
/// `:`がない、番号が数値でない、または`n = 0`の場合は`None`です。
/// 分割は最初の`:`の1回だけなので、ラベル中の`:`（例: `DEVICE Lamp: Left`）はリンク名に残ります。
/// これは`:`ごとに分割して2番目の断片だけをラベルとする読み方とは意図的に異なります。
/// リンク種別は`config.link_rules`の優先順位で判定し、リンク名は接頭辞を1つだけ取り除きます。
///
/// # 使用例
///
/// ```rust
/// use progsheet::{parse_button_line, DialectConfig, LinkType};
///
/// let link = parse_button_line("BUTTON 4: GROUP Living Room", &DialectConfig::prefixed()).unwrap();
/// assert_eq!(link.link_index, 3);
/// assert_eq!(link.link_type, LinkType::Group);
/// assert_eq!(link.link_name, "Living Room");
/// ```
pub fn parse_button_line(line: &str, config: &DialectConfig) -> Option<Link> {
    let (head, label) = line.split_once(':')?;
    let number = head.strip_prefix(BUTTON_PREFIX)?.trim().parse::<u32>().ok()?;
    let link_index = number.checked_sub(1)?;

    let label = label.trim();
    Some(Link {
        link_index,
        link_type: config.classify_link(label),
        link_name: config.link_name(label).to_string(),
    })
}
