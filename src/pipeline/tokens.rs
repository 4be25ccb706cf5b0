//! Token Normalizer Module
//!
//! セル値の列を、空でないトリム済みトークンの列に変換します。

use serde::{Deserialize, Serialize};

use crate::types::CellValue;

/// 正規化の設定
///
/// デフォルトでは全角の括弧・コロンをASCIIに置換し、
/// 旧フォーマット由来のノイズ文字列`AK`と`ES`を取り除きます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizerConfig {
    /// 文字の置換表（置換前, 置換後）
    pub replacements: Vec<(char, char)>,
    /// 取り除く部分文字列（この順に1回ずつ適用）
    pub noise: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            replacements: vec![('\u{ff08}', '('), ('\u{ff09}', ')'), ('\u{ff1a}', ':')],
            noise: vec!["AK".to_string(), "ES".to_string()],
        }
    }
}

/// トークン正規化器
///
/// # 使用例
///
/// ```rust
/// use progsheet::TokenNormalizer;
///
/// let normalizer = TokenNormalizer::default();
/// let tokens = normalizer.normalize_texts(["KBSKTDIM\n（2-gang）", "QTY：2", "  "]);
/// assert_eq!(tokens, vec!["KBSKTDIM", "(2-gang)", "QTY:2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenNormalizer {
    config: NormalizerConfig,
}

impl TokenNormalizer {
    /// 設定を指定して生成
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// 設定を取得
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// テキストの列を正規化
    pub fn normalize_texts<I, S>(&self, texts: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = Vec::new();
        for text in texts {
            self.push_tokens(text.as_ref(), &mut tokens);
        }
        tokens
    }

    /// セル値の列を正規化（文字列以外のセルは無視）
    pub(crate) fn normalize_cells<'a, I>(&self, cells: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut tokens = Vec::new();
        for text in cells.into_iter().filter_map(CellValue::as_text) {
            self.push_tokens(text, &mut tokens);
        }
        tokens
    }

    /// 1セル分のテキストを正規化してトークンを追加
    fn push_tokens(&self, text: &str, tokens: &mut Vec<String>) {
        let mut text: String = text
            .chars()
            .map(|ch| {
                self.config
                    .replacements
                    .iter()
                    .find(|(from, _)| *from == ch)
                    .map_or(ch, |(_, to)| *to)
            })
            .collect();

        for noise in self.config.noise.iter().filter(|n| !n.is_empty()) {
            text = text.replace(noise.as_str(), "");
        }

        // \r\n と単独の \r も改行として扱う
        tokens.extend(
            text.split(['\n', '\r'])
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(str::to_string),
        );
    }
}
