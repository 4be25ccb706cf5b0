//! Security Module
//!
//! 入力サイズの制限を実装するモジュール。
//! 入力は丸ごとメモリに読み込むため、上限を超える入力はワークブックを開く前に拒否します。

use crate::error::ProgSheetError;

/// 入力ファイルの既定の最大サイズ（2GB）
pub(crate) const DEFAULT_MAX_INPUT_SIZE: u64 = 2_147_483_648;

/// セキュリティ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

impl SecurityConfig {
    /// 読み込んだバイト数が上限以内かを検証
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 上限以内の場合
    /// * `Err(ProgSheetError::SecurityViolation)` - 上限を超えている場合
    pub fn check_input_size(&self, bytes_read: u64) -> Result<(), ProgSheetError> {
        if bytes_read > self.max_input_file_size {
            return Err(ProgSheetError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, self.max_input_file_size
            )));
        }
        Ok(())
    }
}
