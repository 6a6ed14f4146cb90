//! HTTP Server Module
//!
//! 変換サービスのHTTP層を提供するモジュール。2つのサービス
//! （直接変換の`convert-server`とログ抽出の`upload-server`）は
//! どちらもこのモジュールのルーターを設定だけ変えて使用します。

mod handlers;
mod upload;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tracing::info;

use crate::builder::Converter;
use crate::error::XlsxToJsonError;
use upload::UploadStore;

/// サービスごとの設定
///
/// 2つのサービスの差分（ルートパス、結果ファイル、CORS、エラー文言）を
/// すべてここに集約します。
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// 変換エンドポイントのパス（例: `/convert`、`/upload`）
    pub convert_route: String,

    /// アップロードファイルの一時保存ディレクトリ
    pub upload_dir: PathBuf,

    /// 変換結果を永続化するJSONファイルのパス
    ///
    /// サービスインスタンスごとに1つだけ存在し、変換成功のたびに
    /// 全体が上書きされます（ロックなし、最後の書き込みが勝つ）。
    pub result_path: PathBuf,

    /// すべてのオリジンを許可するCORSを有効にするか
    pub permissive_cors: bool,

    /// 500レスポンスの本文（クライアントに見せる唯一のエラーメッセージ）
    pub error_message: String,
}

/// リクエストハンドラー間で共有される状態
#[derive(Clone)]
pub struct AppState {
    /// サービス設定
    pub(crate) config: Arc<ServiceConfig>,

    /// 変換処理のファサード
    pub(crate) converter: Converter,

    /// アップロードファイルの保存先
    pub(crate) store: UploadStore,
}

impl AppState {
    /// 新しい状態を生成
    pub fn new(config: ServiceConfig, converter: Converter) -> Self {
        let store = UploadStore::new(config.upload_dir.clone());
        Self {
            config: Arc::new(config),
            converter,
            store,
        }
    }
}

/// サービスのルーターを構築
///
/// | メソッド | パス | 内容 |
/// |---|---|---|
/// | POST | 設定されたルート | アップロード受信と変換 |
/// | GET | `/result` | 永続化された結果ファイルをそのまま返す |
///
/// `/result`は静的ファイル配信（`ServeFile`）のため、ファイルが
/// 存在しない場合の挙動はフレームワーク標準の404です。
pub fn router(state: AppState) -> Router {
    let result_file = ServeFile::new(&state.config.result_path);
    let permissive_cors = state.config.permissive_cors;

    let router = Router::new()
        .route(&state.config.convert_route, post(handlers::convert))
        .route_service("/result", result_file)
        .with_state(state);

    if permissive_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// サービスを起動してリクエストを処理し続ける
///
/// アップロードディレクトリの作成（存在しない場合のみ）を行ってから
/// 指定ポートで待ち受けます。
///
/// # 引数
///
/// * `state` - サービスの共有状態
/// * `port` - 待ち受けポート番号
pub async fn serve(state: AppState, port: u16) -> Result<(), XlsxToJsonError> {
    // アップロードディレクトリのブートストラップ
    state.store.ensure_dir().await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server running at http://localhost:{}", port);

    let router = router(state);
    axum::serve(listener, router).await?;

    Ok(())
}

/// 環境変数`PORT`から待ち受けポートを解決する
///
/// # 引数
///
/// * `fallback` - `PORT`が未設定の場合に使用するポート。`None`の場合、
///   未設定は`XlsxToJsonError::Config`になる
pub fn port_from_env(fallback: Option<u16>) -> Result<u16, XlsxToJsonError> {
    match std::env::var("PORT") {
        Ok(value) => value
            .parse()
            .map_err(|_| XlsxToJsonError::Config(format!("Invalid PORT value: {}", value))),
        Err(_) => fallback.ok_or_else(|| {
            XlsxToJsonError::Config("PORT environment variable is not set".to_string())
        }),
    }
}
