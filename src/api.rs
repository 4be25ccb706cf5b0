//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use crate::dialect::DialectConfig;

/// 既定のシート名パターン
pub const DEFAULT_SHEET_PATTERN: &str = "Programming Details";

/// シート選択方式
///
/// 変換対象のワークシートを選択する方法を指定します。
/// 対象になるのは常に1シートのみです。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// シート名に指定文字列を含む最初のシート（デフォルト: `"Programming Details"`）
    ///
    /// 例: `SheetSelector::Contains("Programming Details".to_string())`
    Contains(String),

    /// シート名の完全一致
    ///
    /// 例: `SheetSelector::Name("Programming Details (Rev 2)".to_string())`
    Name(String),

    /// インデックス指定（0始まり）
    Index(usize),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Contains(DEFAULT_SHEET_PATTERN.to_string())
    }
}

impl SheetSelector {
    /// エラーメッセージ・ログ用の説明文
    pub(crate) fn describe(&self) -> String {
        match self {
            SheetSelector::Contains(pattern) => format!("contains \"{}\"", pattern),
            SheetSelector::Name(name) => format!("name \"{}\"", name),
            SheetSelector::Index(index) => format!("index {}", index),
        }
    }
}

/// 方言（スキーマの書き方の流儀）
///
/// 現場のスプレッドシートには2種類の書き方が存在します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Dialect {
    /// シーン名・リモコン名を`NAME:`接頭辞付きのセルで区切る書き方
    ///
    /// 例: `NAME: Movie Night`
    Prefixed,

    /// シーン名・リモコン名を既知の語彙（`BRIGHT`、`H2RSMB`など）との
    /// 完全一致で区切る書き方
    Keyword,
}

impl Dialect {
    /// 方言に対応する組み込みの設定テーブル
    pub fn config(self) -> DialectConfig {
        match self {
            Dialect::Prefixed => DialectConfig::prefixed(),
            Dialect::Keyword => DialectConfig::keyword(),
        }
    }
}

/// 方言の選択方式
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DialectSelector {
    /// セクション内容から自動判定（デフォルト）
    ///
    /// シーン・リモコンセクションに`NAME:`接頭辞付きのセルがあれば`Prefixed`、
    /// 既知の語彙に一致するセルがあれば`Keyword`、どちらもなければ`Prefixed`。
    #[default]
    Auto,

    /// 組み込みの方言を固定
    Fixed(Dialect),

    /// 呼び出し側が用意した設定テーブルを使用
    Custom(Box<DialectConfig>),
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// 4スペースインデントのJSON（デフォルト）
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///     "devices": [],
    ///     "groups": [],
    ///     "scenes": [],
    ///     "remoteControls": []
    /// }
    /// ```
    #[default]
    Pretty,

    /// 1行のJSON
    Compact,
}
