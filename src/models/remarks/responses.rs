use super::entities::RemarkRequest;
use serde::Serialize;
use ts_rs::TS;

// 复核申请列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct RemarkListResponse {
    pub items: Vec<RemarkRequest>,
}

// 复核申请响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct RemarkResponse {
    pub remark_request: RemarkRequest,
}
