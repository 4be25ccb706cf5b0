//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use serde::Serialize;
use std::io::Write;

use crate::api::OutputFormat;
use crate::error::ProgSheetError;
use crate::types::ProgrammingDocument;

pub(crate) use formatters::{CompactJsonFormatter, PrettyJsonFormatter};

/// エラードキュメント（`{"error": "<message>"}`）
#[derive(Debug, Serialize)]
struct ErrorDocument<'a> {
    error: &'a str,
}

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（4スペースインデント、1行）をenumとして表現します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormatter {
    Pretty,
    Compact,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Pretty => OutputFormatter::Pretty,
            OutputFormat::Compact => OutputFormatter::Compact,
        }
    }

    /// ドキュメントを指定されたフォーマットで出力する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 出力に成功した場合
    /// * `Err(ProgSheetError)` - 書き込みまたはシリアライズに失敗した場合
    pub fn render<W: Write>(
        &self,
        document: &ProgrammingDocument,
        writer: &mut W,
    ) -> Result<(), ProgSheetError> {
        self.render_value(document, writer)
    }

    /// エラーメッセージを`{"error": ...}`として出力する
    pub fn render_error<W: Write>(
        &self,
        message: &str,
        writer: &mut W,
    ) -> Result<(), ProgSheetError> {
        self.render_value(&ErrorDocument { error: message }, writer)
    }

    fn render_value<T: Serialize + ?Sized, W: Write>(
        &self,
        value: &T,
        writer: &mut W,
    ) -> Result<(), ProgSheetError> {
        match self {
            OutputFormatter::Pretty => PrettyJsonFormatter.render(value, writer),
            OutputFormatter::Compact => CompactJsonFormatter.render(value, writer),
        }
    }
}
