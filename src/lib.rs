//! xlsx2json - スプレッドシートのアップロードをJSONに変換するHTTPサービス
//!
//! このクレートは、アップロードされたスプレッドシートファイルの最初の
//! シートをJSONに変換し、結果をディスクに永続化して、最新の変換結果を
//! 取得できるようにする2つのHTTPサービスを提供します。
//!
//! - `convert-server`: ヘッダー行をキーとする直接変換（`POST /convert`）
//! - `upload-server`: ログ行に埋め込まれたJSONの抽出（`POST /upload`）
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsx2json::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // デフォルト設定（直接変換）のコンバーターを生成
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // 入力ファイルを開いてJSON値に変換
//!     let input = File::open("example.xlsx")?;
//!     let value = converter.convert_to_value(input)?;
//!
//!     println!("{}", serde_json::to_string_pretty(&value)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # ログ抽出モード
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsx2json::{ConverterBuilder, TransformMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new()
//!     .with_transform_mode(TransformMode::LogExtraction)
//!     .build()?;
//!
//! let input = File::open("logs.xlsx")?;
//! let outcome = converter.convert_with_stats(input)?;
//! println!("{} rows dropped", outcome.rows_dropped);
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod parser;
mod security;
mod transform;
mod types;

pub mod server;

// 公開API
pub use api::TransformMode;
pub use builder::{Converter, ConverterBuilder};
pub use error::XlsxToJsonError;
pub use transform::TransformOutcome;
