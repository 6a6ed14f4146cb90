//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::{Read, Write};

use serde_json::Value;

use crate::api::TransformMode;
use crate::error::XlsxToJsonError;
use crate::security::SecurityConfig;
use crate::transform::TransformOutcome;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// 行変換の戦略
    pub transform_mode: TransformMode,

    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            transform_mode: TransformMode::Direct,
            max_input_file_size: SecurityConfig::default().max_input_file_size,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2json::{ConverterBuilder, TransformMode};
///
/// # fn main() -> Result<(), xlsx2json::XlsxToJsonError> {
/// let converter = ConverterBuilder::new()
///     .with_transform_mode(TransformMode::LogExtraction)
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
    /// - 行変換: 直接変換（ヘッダーキーのオブジェクト列）
    /// - 入力ファイルの最大サイズ: 100MB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 行変換の戦略を指定する
    ///
    /// # 引数
    ///
    /// * `mode: TransformMode`: 行変換の戦略
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsx2json::{ConverterBuilder, TransformMode};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_transform_mode(TransformMode::LogExtraction);
    /// ```
    pub fn with_transform_mode(mut self, mode: TransformMode) -> Self {
        self.config.transform_mode = mode;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    ///
    /// 上限を超える入力は`XlsxToJsonError::SecurityViolation`で拒否されます。
    ///
    /// # 制約
    ///
    /// * `size > 0` でなければならない
    /// * 制約違反の場合、`build()`時に`XlsxToJsonError::Config`を返す
    pub fn with_max_input_file_size(mut self, size: u64) -> Self {
        self.config.max_input_file_size = size;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)`: 設定が有効な場合、Converterインスタンス
    /// * `Err(XlsxToJsonError::Config)`: 設定が無効な場合
    pub fn build(self) -> Result<Converter, XlsxToJsonError> {
        // 入力サイズ上限の検証
        if self.config.max_input_file_size == 0 {
            return Err(XlsxToJsonError::Config(
                "max_input_file_size must be greater than 0".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// スプレッドシートファイルをJSONに変換するためのメインエントリー
/// ポイントです。`ConverterBuilder`を使用して構築された設定に基づいて
/// 変換処理を実行します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2json::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsx2json::XlsxToJsonError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("example.xlsx")?;
/// let value = converter.convert_to_value(input)?;
/// println!("{}", value);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// スプレッドシートファイルをJSON値に変換
    ///
    /// # 引数
    ///
    /// * `input` - スプレッドシートファイルを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(Value)` - 変換結果（JSON配列）
    /// * `Err(XlsxToJsonError)` - エラーが発生した場合
    ///
    /// # 処理フロー
    ///
    /// 1. WorkbookParserの初期化（サイズ上限チェック込み）
    /// 2. 最初のシートのパース
    /// 3. 行変換（直接変換またはログ抽出）
    pub fn convert_to_value<R: Read>(&self, input: R) -> Result<Value, XlsxToJsonError> {
        let outcome = self.convert_with_stats(input)?;
        Ok(Value::Array(outcome.values))
    }

    /// スプレッドシートファイルを変換し、統計情報付きの結果を返す
    ///
    /// ログ抽出モードで脱落した行数（`rows_dropped`）を確認したい場合に
    /// 使用します。脱落はレスポンスには現れない仕様のため、この統計は
    /// 運用ログ向けです。
    pub fn convert_with_stats<R: Read>(
        &self,
        input: R,
    ) -> Result<TransformOutcome, XlsxToJsonError> {
        // 1. WorkbookParserの初期化
        let security_config = SecurityConfig {
            max_input_file_size: self.config.max_input_file_size,
        };
        let mut parser = crate::parser::WorkbookParser::open(input, &security_config)?;

        // 2. 最初のシートのパース
        let worksheet = parser.first_worksheet()?;
        tracing::debug!(
            sheet = %worksheet.name,
            rows = worksheet.rows.len(),
            "Parsed first worksheet"
        );

        // 3. 行変換
        Ok(self.config.transform_mode.apply(&worksheet))
    }

    /// スプレッドシートファイルを変換し、整形済みJSONテキストとして書き込む
    ///
    /// # 引数
    ///
    /// * `input` - スプレッドシートファイルを読み込むためのリーダー
    /// * `output` - JSON出力先のライター（Writeトレイトを実装）
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 変換に成功した場合
    /// * `Err(XlsxToJsonError)` - エラーが発生した場合
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<(), XlsxToJsonError> {
        let value = self.convert_to_value(input)?;
        serde_json::to_writer_pretty(&mut output, &value)?;
        output.flush()?;
        Ok(())
    }

    /// スプレッドシートファイルを整形済みJSON文字列に変換
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsx2json::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), xlsx2json::XlsxToJsonError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let input = File::open("example.xlsx")?;
    /// let json = converter.convert_to_string(input)?;
    /// println!("{}", json);
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, XlsxToJsonError> {
        let value = self.convert_to_value(input)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
