//! Request Handlers
//!
//! 変換エンドポイントのハンドラーを定義するモジュール。
//! パイプライン: アップロード受信 → 保存 → パース・変換 → 結果ファイル
//! 書き込み → アップロードファイル削除 → レスポンス返却。

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde_json::Value;
use tracing::{error, info};

use crate::error::XlsxToJsonError;
use crate::server::AppState;
use crate::transform::TransformOutcome;

/// 変換エンドポイントのハンドラー
///
/// multipartフォームの`file`フィールドを1つ受け取り、変換パイプライン
/// 全体をリクエスト内で同期的に実行して、変換結果をレスポンスボディ
/// として返します。
///
/// # 失敗時の挙動
///
/// - `file`フィールドがない場合: 400 + `No file uploaded.`
///   （結果ファイルへの書き込みは行われない）
/// - パース・変換・書き込みに失敗した場合: 500 + 固定メッセージ
///   （詳細はサーバーログにのみ記録され、クライアントには渡さない）
pub(crate) async fn convert(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<ResponseJson<Value>, (StatusCode, String)> {
    // 1. ファイルフィールドの受信
    let Some((original_filename, bytes)) = read_file_field(&mut multipart).await? else {
        return Err((StatusCode::BAD_REQUEST, "No file uploaded.".to_string()));
    };

    // 2. アップロードファイルの保存
    let stored_path = state
        .store
        .save(&original_filename, &bytes)
        .await
        .map_err(|e| internal_error(&state, e))?;

    info!(
        path = %stored_path.display(),
        size = bytes.len(),
        "Stored uploaded file"
    );

    // 3. パースと行変換（calamineは同期処理のためブロッキングタスクで実行）
    let converter = state.converter.clone();
    let input_path = stored_path.clone();
    let outcome = tokio::task::spawn_blocking(move || -> Result<TransformOutcome, XlsxToJsonError> {
        let file = std::fs::File::open(&input_path)?;
        converter.convert_with_stats(file)
    })
    .await
    .map_err(|e| {
        internal_error(&state, XlsxToJsonError::Config(format!("Task failed: {}", e)))
    })?
    .map_err(|e| internal_error(&state, e))?;

    if outcome.rows_dropped > 0 {
        info!(
            rows_read = outcome.rows_read,
            rows_dropped = outcome.rows_dropped,
            "Some rows were dropped during conversion"
        );
    }

    let value = Value::Array(outcome.values);

    // 4. 結果ファイルへの書き込み（既存の内容を完全に上書き）
    let pretty = serde_json::to_string_pretty(&value)
        .map_err(|e| internal_error(&state, XlsxToJsonError::Json(e)))?;
    tokio::fs::write(&state.config.result_path, pretty)
        .await
        .map_err(|e| internal_error(&state, XlsxToJsonError::Io(e)))?;

    info!(path = %state.config.result_path.display(), "Data has been saved");

    // 5. 処理成功後にアップロードファイルを削除
    state
        .store
        .remove(&stored_path)
        .await
        .map_err(|e| internal_error(&state, e))?;

    // 6. 変換結果をレスポンスとして返す
    Ok(ResponseJson(value))
}

/// multipartフォームから`file`フィールドを読み取る
///
/// # 戻り値
///
/// * `Ok(Some((ファイル名, 内容)))` - `file`フィールドが見つかった場合
/// * `Ok(None)` - `file`フィールドが存在しない場合
/// * `Err` - multipartボディの読み取りに失敗した場合（400として扱う）
async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, axum::body::Bytes)>, (StatusCode, String)> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                error!(error = %e, "Failed to read multipart body");
                return Err((StatusCode::BAD_REQUEST, "No file uploaded.".to_string()));
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read uploaded file contents");
            (StatusCode::BAD_REQUEST, "No file uploaded.".to_string())
        })?;

        return Ok(Some((filename, bytes)));
    }
}

/// 内部エラーを500レスポンスに変換する
///
/// 詳細はサーバーログにのみ記録し、クライアントには各サービス固定の
/// 汎用メッセージだけを返します。
fn internal_error(state: &AppState, err: XlsxToJsonError) -> (StatusCode, String) {
    error!(error = %err, "Error while converting the file");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        state.config.error_message.clone(),
    )
}
