//! Device Parser Module
//!
//! デバイスセクションのトークン列からデバイスレコードを生成します。

use tracing::trace;

use crate::dialect::{DialectConfig, NAME_PREFIX};
use crate::types::Device;

/// 数量表記の接頭辞
const QTY_PREFIX: &str = "QTY:";

/// デバイスセクションをパース
///
/// 直近のハードウェア種別コードを状態として持ち、以降のトークンを
/// そのコードのデバイス名として扱います。括弧付きの注記、`QTY:`行、
/// 単独の`NAME:`は読み飛ばします。コードが現れる前の名前は捨てます。
pub fn parse_devices(tokens: &[String], config: &DialectConfig) -> Vec<Device> {
    let (devices, _) = tokens.iter().fold(
        (Vec::new(), None::<&str>),
        |(mut devices, current), token| {
            if token.contains('(') && token.contains(')') {
                return (devices, current);
            }
            if token.starts_with(QTY_PREFIX) || token == NAME_PREFIX {
                return (devices, current);
            }
            if config.is_appearance_code(token) {
                return (devices, Some(token.as_str()));
            }
            match current {
                Some(shortname) => devices.push(Device {
                    appearance_shortname: shortname.to_string(),
                    device_name: token.clone(),
                }),
                None => trace!(token = %token, "device name before any appearance code"),
            }
            (devices, current)
        },
    );
    devices
}
