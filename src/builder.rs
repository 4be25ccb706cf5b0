//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::{Cursor, Read, Write};

use tracing::debug;

use crate::api::{Dialect, DialectSelector, OutputFormat, SheetSelector};
use crate::dialect::DialectConfig;
use crate::error::ProgSheetError;
use crate::output::OutputFormatter;
use crate::parser::WorkbookParser;
use crate::pipeline::{self, NormalizerConfig, TokenNormalizer};
use crate::security::{SecurityConfig, DEFAULT_MAX_INPUT_SIZE};
use crate::types::ProgrammingDocument;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 使用範囲の1行目を列見出しとして読み飛ばすか
    pub skip_header_row: bool,

    /// 方言の選択方式
    pub dialect: DialectSelector,

    /// トークン正規化の設定
    pub normalizer: NormalizerConfig,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// 入力の最大サイズ（バイト）
    pub max_input_size: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::default(),
            skip_header_row: false,
            dialect: DialectSelector::Auto,
            normalizer: NormalizerConfig::default(),
            output_format: OutputFormat::Pretty,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use progsheet::{ConverterBuilder, Dialect, OutputFormat};
///
/// # fn main() -> Result<(), progsheet::ProgSheetError> {
/// let converter = ConverterBuilder::new()
///     .with_dialect(Dialect::Keyword)
///     .with_output_format(OutputFormat::Compact)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 名前に`"Programming Details"`を含む最初のシート
    /// - 見出し行: 読み飛ばさない
    /// - 方言: 自動判定
    /// - 出力: 4スペースインデントのJSON
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 変換対象のシートを選択する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use progsheet::{ConverterBuilder, SheetSelector};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name("Programming Details (Rev 2)".to_string()));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 使用範囲の1行目を列見出しとして読み飛ばすかを指定する
    pub fn with_header_row(mut self, skip: bool) -> Self {
        self.config.skip_header_row = skip;
        self
    }

    /// 組み込みの方言を固定する
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.config.dialect = DialectSelector::Fixed(dialect);
        self
    }

    /// 方言の選択方式を指定する
    pub fn with_dialect_selector(mut self, selector: DialectSelector) -> Self {
        self.config.dialect = selector;
        self
    }

    /// 独自の方言テーブルを使用する
    ///
    /// テーブルは`build()`時に検証されます。
    pub fn with_dialect_config(mut self, config: DialectConfig) -> Self {
        self.config.dialect = DialectSelector::Custom(Box::new(config));
        self
    }

    /// トークン正規化の設定を指定する
    pub fn with_normalizer_config(mut self, config: NormalizerConfig) -> Self {
        self.config.normalizer = config;
        self
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// 入力の最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.max_input_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ProgSheetError::Config(String)`: 設定の検証に失敗した場合
    ///   * シート名パターン・シート名が空文字列
    ///   * 独自の方言テーブルが不正（空のマーカー、重複したマーカーなど）
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Converter, ProgSheetError> {
        // 1. シート選択の検証
        match &self.config.sheet_selector {
            SheetSelector::Contains(pattern) if pattern.is_empty() => {
                return Err(ProgSheetError::Config(
                    "Sheet name pattern must not be empty".to_string(),
                ));
            }
            SheetSelector::Name(name) if name.is_empty() => {
                return Err(ProgSheetError::Config(
                    "Sheet name must not be empty".to_string(),
                ));
            }
            _ => {}
        }

        // 2. 方言テーブルの検証
        if let DialectSelector::Custom(config) = &self.config.dialect {
            config.validate()?;
        }

        // 3. 入力サイズ上限の検証
        if self.config.max_input_size == 0 {
            return Err(ProgSheetError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// プログラミングシートをJSONドキュメントに変換するためのメインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use progsheet::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), progsheet::ProgSheetError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("programming.xlsx")?;
/// let output = File::create("programming.json")?;
/// converter.convert(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// トークン正規化器
    normalizer: TokenNormalizer,

    /// 出力フォーマッター
    formatter: OutputFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            normalizer: TokenNormalizer::new(config.normalizer.clone()),
            formatter: OutputFormatter::from_format(config.output_format),
            config,
        }
    }

    /// 入力全体を読み込み、ドキュメントを生成
    ///
    /// # 処理フロー
    ///
    /// 1. 入力をメモリに読み込み、サイズ上限を検証
    /// 2. ワークブックを開き、対象シートを選択
    /// 3. セル値を行優先で取り出してトークンに正規化
    /// 4. セクション分割と4つのパーサーでドキュメントを組み立て
    ///
    /// # 戻り値
    ///
    /// * `Err(ProgSheetError::Parse)` - スプレッドシートとして解釈できない場合
    /// * `Err(ProgSheetError::NoProgrammingSheet)` - 対象シートがない場合
    /// * `Err(ProgSheetError::SecurityViolation)` - 入力サイズ上限を超えた場合
    pub fn parse_document<R: Read>(&self, input: R) -> Result<ProgrammingDocument, ProgSheetError> {
        let security_config = SecurityConfig {
            max_input_file_size: self.config.max_input_size,
        };

        // 上限+1バイトまで読めば超過を検出できる
        let mut buffer = Vec::new();
        let bytes_read = input
            .take(security_config.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        security_config.check_input_size(bytes_read as u64)?;
        debug!(bytes = bytes_read, "input loaded");

        let mut parser = WorkbookParser::open(Cursor::new(buffer))?;
        let sheet_name = parser.select_sheet(&self.config.sheet_selector)?;
        let cells = parser.read_cells(&sheet_name, self.config.skip_header_row)?;

        let tokens = self.normalizer.normalize_cells(&cells);
        Ok(pipeline::run(tokens, &self.config.dialect))
    }

    /// 正規化済みのトークン列からドキュメントを生成
    ///
    /// ワークブックを経由せずにパイプラインを実行します。トークンはそのまま使われます。
    pub fn parse_tokens<I>(&self, tokens: I) -> ProgrammingDocument
    where
        I: IntoIterator<Item = String>,
    {
        pipeline::run(tokens.into_iter().collect(), &self.config.dialect)
    }

    /// セルのテキストの列を正規化してからドキュメントを生成
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use progsheet::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), progsheet::ProgSheetError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let document = converter.parse_texts(["KASTA DEVICE", "KBSKTDIM\nKitchen Light"]);
    /// assert_eq!(document.devices[0].device_name, "Kitchen Light");
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse_texts<I, S>(&self, texts: I) -> ProgrammingDocument
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        pipeline::run(self.normalizer.normalize_texts(texts), &self.config.dialect)
    }

    /// ドキュメントを設定された出力フォーマットで書き出す
    pub fn render<W: Write>(
        &self,
        document: &ProgrammingDocument,
        mut output: W,
    ) -> Result<(), ProgSheetError> {
        self.formatter.render(document, &mut output)
    }

    /// エラーを`{"error": ...}`として書き出す
    pub fn render_error<W: Write>(
        &self,
        error: &ProgSheetError,
        mut output: W,
    ) -> Result<(), ProgSheetError> {
        self.formatter.render_error(&error.to_string(), &mut output)
    }

    /// スプレッドシートをJSONに変換
    ///
    /// # 引数
    ///
    /// * `input` - スプレッドシートを読み込むためのリーダー（全体を読み込みます）
    /// * `output` - JSON出力先のライター
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use progsheet::ConverterBuilder;
    /// use std::io::Cursor;
    ///
    /// # fn main() -> Result<(), progsheet::ProgSheetError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let workbook_bytes: Vec<u8> = std::fs::read("programming.xlsx")?;
    /// let mut json_output = Vec::new();
    /// converter.convert(Cursor::new(workbook_bytes), &mut json_output)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read, W: Write>(&self, input: R, output: W) -> Result<(), ProgSheetError> {
        let document = self.parse_document(input)?;
        self.render(&document, output)
    }

    /// スプレッドシートをJSON文字列に変換
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, ProgSheetError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            ProgSheetError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }
}
