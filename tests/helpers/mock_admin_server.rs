// ==========================================
// 进程内 mock 后台 - 用于 HTTP 网关测试
// ==========================================
// 行为: 随机端口启动 axum 服务，按路由返回预设响应
// 记录: 每个请求的查询参数、请求头、JSON 请求体
// ==========================================

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// 后台接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    CourierRates,
    DelhiveryRates,
    CreateShipment,
}

/// 收到的请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub route: Route,
    pub order_id: Option<String>,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    responses: HashMap<Route, (StatusCode, Value)>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<RwLock<MockState>>;

pub struct MockAdminServer {
    state: SharedState,
    /// 保持服务存活
    _handle: JoinHandle<()>,
    addr: SocketAddr,
}

impl MockAdminServer {
    /// 在随机端口启动；未配置的路由返回 404
    pub async fn start() -> Self {
        let state = SharedState::default();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock admin server");
        let addr = listener.local_addr().expect("Failed to get local address");

        let app = Router::new()
            .route("/api/shipments/courier-rates", get(handle_courier_rates))
            .route("/api/shipments/delhivery/rates", get(handle_delhivery_rates))
            .route("/api/orders/:order_id/shipments", post(handle_create_shipment))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock admin server failed");
        });

        Self {
            state,
            _handle: handle,
            addr,
        }
    }

    /// 网关 base URL（含 /api 前缀）
    pub fn url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// 配置某个接口的响应
    pub async fn respond(&self, route: Route, status: StatusCode, body: Value) {
        self.state
            .write()
            .await
            .responses
            .insert(route, (status, body));
    }

    /// 已收到的请求（按到达顺序）
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.read().await.requests.clone()
    }
}

async fn handle_courier_rates(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    record_and_respond(&state, Route::CourierRates, None, query, &headers, None).await
}

async fn handle_delhivery_rates(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    record_and_respond(&state, Route::DelhiveryRates, None, query, &headers, None).await
}

async fn handle_create_shipment(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record_and_respond(
        &state,
        Route::CreateShipment,
        Some(order_id),
        HashMap::new(),
        &headers,
        Some(body),
    )
    .await
}

async fn record_and_respond(
    state: &SharedState,
    route: Route,
    order_id: Option<String>,
    query: HashMap<String, String>,
    headers: &HeaderMap,
    body: Option<Value>,
) -> (StatusCode, Json<Value>) {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let mut state = state.write().await;
    state.requests.push(RecordedRequest {
        route,
        order_id,
        query,
        headers,
        body,
    });

    let (status, body) = state.responses.get(&route).cloned().unwrap_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            json!({"success": false, "message": "no response configured"}),
        )
    });
    (status, Json(body))
}
