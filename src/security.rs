//! Security Module
//!
//! セキュリティ対策を実装するモジュール。
//! 巨大ファイルによるメモリ枯渇、アップロードファイル名による
//! パストラバーサル攻撃などへの対策を提供します。

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 104_857_600, // 100MB
        }
    }
}

/// アップロードファイル名の検証
///
/// クライアントから送られた元ファイル名を保存先パスの一部
/// （拡張子の取得）に使用する前に検証します。
///
/// # 引数
///
/// * `filename` - 検証するファイル名
///
/// # 戻り値
///
/// * `Ok(())` - ファイル名が安全な場合
/// * `Err(String)` - ファイル名が危険な場合（`..`やパスセパレータを含む）
pub(crate) fn validate_upload_filename(filename: &str) -> Result<(), String> {
    // 空のファイル名は拒否
    if filename.is_empty() {
        return Err("Empty filename is not allowed".to_string());
    }

    // パスセパレータを含むファイル名を拒否
    if filename.contains('/') || filename.contains('\\') {
        return Err(format!("Path separator in filename is not allowed: {}", filename));
    }

    // `..`を含むファイル名を拒否（ディレクトリトラバーサル攻撃）
    if filename.contains("..") {
        return Err(format!("Path traversal detected: {}", filename));
    }

    Ok(())
}

/// ファイル名から拡張子部分を取得（ドット付き、例: ".xlsx"）
///
/// 保存ファイル名はタイムスタンプ + 元の拡張子で構成されるため、
/// 拡張子のみを元ファイル名から引き継ぎます。拡張子がない場合は
/// 空文字列を返します。
pub(crate) fn file_extension(filename: &str) -> String {
    match filename.rfind('.') {
        // 先頭のドット（隠しファイル）は拡張子として扱わない
        Some(pos) if pos > 0 => filename[pos..].to_string(),
        _ => String::new(),
    }
}
