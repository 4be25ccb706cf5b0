//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// progsheetクレート全体で使用するエラー型
///
/// ワークブックの読み込み、シート選択、設定の検証、JSON出力中に発生する
/// エラーを統一的に扱います。トークン解析（セクション分割・各パーサー）自体は
/// 全域関数であり、このエラー型を返すことはありません。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（標準入力の読み込み失敗など）
/// - `Parse`: ワークブックの解析中に発生したエラー（calamine由来）
/// - `Json`: JSONの出力・設定ファイルの読み込みに失敗したエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `NoProgrammingSheet`: 対象シートが見つからない（「データなし」）
/// - `SecurityViolation`: 入力サイズ制限などに違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use progsheet::ProgSheetError;
/// use std::fs::File;
///
/// fn open_export(path: &str) -> Result<(), ProgSheetError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ProgSheetError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// 入力バイト列がスプレッドシートとして解釈できない場合に発生します。
    /// パイプライン全体で唯一の致命的な入力エラーです。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONのシリアライズ・デシリアライズエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、セクションマーカーが空文字列の場合や、
    /// 2つのセクションに同じマーカーが割り当てられている場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use progsheet::{ConverterBuilder, ProgSheetError, SheetSelector};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Contains(String::new()))
    ///     .build();
    ///
    /// match result {
    ///     Err(ProgSheetError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// 対象シートが見つからない
    ///
    /// 「データなし」を表す構造的な欠落であり、入力の破損ではありません。
    /// CLIはこのエラーを`{"error": ...}`として出力し、終了コード0で終了します。
    #[error("No worksheet matching '{selector}' found")]
    NoProgrammingSheet {
        /// シート選択の説明（例: `contains "Programming Details"`）
        selector: String,
    },

    /// セキュリティ制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl ProgSheetError {
    /// 「データなし」を表すエラーかどうかを判定
    ///
    /// `true`の場合、入力自体は正常に読み込めたが変換対象が存在しなかったことを意味します。
    pub fn is_no_data(&self) -> bool {
        matches!(self, ProgSheetError::NoProgrammingSheet { .. })
    }
}
