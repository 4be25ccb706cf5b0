//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;

use crate::error::ProgSheetError;

/// インデント幅（スペース4つ）
const INDENT: &[u8] = b"    ";

/// 4スペースインデントのJSONフォーマッター
pub(crate) struct PrettyJsonFormatter;

impl PrettyJsonFormatter {
    pub fn render<T: Serialize + ?Sized, W: Write>(
        &self,
        value: &T,
        writer: &mut W,
    ) -> Result<(), ProgSheetError> {
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = Serializer::with_formatter(&mut *writer, formatter);
        value.serialize(&mut serializer)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// 1行のJSONフォーマッター
pub(crate) struct CompactJsonFormatter;

impl CompactJsonFormatter {
    pub fn render<T: Serialize + ?Sized, W: Write>(
        &self,
        value: &T,
        writer: &mut W,
    ) -> Result<(), ProgSheetError> {
        serde_json::to_writer(&mut *writer, value)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
