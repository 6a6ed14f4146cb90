//! Upload Store
//!
//! アップロードされたファイルの一時保存を担当するモジュール。
//! 保存ファイル名はミリ秒タイムスタンプ + 元ファイルの拡張子で構成します。

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::XlsxToJsonError;
use crate::security::{file_extension, validate_upload_filename};

/// アップロードファイルの保存先
#[derive(Debug, Clone)]
pub(crate) struct UploadStore {
    /// 保存先ディレクトリ
    dir: PathBuf,
}

impl UploadStore {
    /// 新しいストアを生成
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// 保存先ディレクトリを作成（存在しない場合のみ）
    ///
    /// サービス起動時に1回呼び出します。
    pub async fn ensure_dir(&self) -> Result<(), XlsxToJsonError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// アップロードされたファイルを保存し、保存先パスを返す
    ///
    /// # 引数
    ///
    /// * `original_filename` - クライアントから送られた元ファイル名
    ///   （拡張子の引き継ぎにのみ使用。空の場合は拡張子なしで保存）
    /// * `bytes` - ファイル内容
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 保存先パス
    /// * `Err(XlsxToJsonError::SecurityViolation)` - 元ファイル名が危険な場合
    /// * `Err(XlsxToJsonError::Io)` - 書き込みに失敗した場合
    pub async fn save(
        &self,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, XlsxToJsonError> {
        // 1. 元ファイル名の検証と拡張子の取得
        let extension = if original_filename.is_empty() {
            String::new()
        } else {
            validate_upload_filename(original_filename)
                .map_err(XlsxToJsonError::SecurityViolation)?;
            file_extension(original_filename)
        };

        // 2. タイムスタンプベースのファイル名を生成
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| XlsxToJsonError::Config(format!("System clock error: {}", e)))?
            .as_millis();
        let path = self.dir.join(format!("{}{}", millis, extension));

        // 3. 書き込み
        tokio::fs::write(&path, bytes).await?;

        Ok(path)
    }

    /// 保存済みファイルを削除する
    ///
    /// 変換成功後のクリーンアップで呼び出します。変換に失敗した場合は
    /// 呼び出されず、失敗時のファイルは調査用にそのまま残ります。
    pub async fn remove(&self, path: &Path) -> Result<(), XlsxToJsonError> {
        tokio::fs::remove_file(path).await?;
        Ok(())
    }
}
