use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Every failed request is answered with `{ "success": false, "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing)]
    status_code: Option<StatusCode>,
    success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn status_code(&self) -> StatusCode {
        self.status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, error)
    }

    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self::with_status(StatusCode::UNAUTHORIZED, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    pub fn with_status(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status_code: Some(status),
            success: false,
            error: error.into(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// User-facing messages, in the language the game ships in.
pub mod messages {
    pub const INVALID_BODY: &str = "Invalid request body";
    pub const AUTH_REQUIRED: &str = "인증이 필요합니다";
    pub const USER_NOT_FOUND: &str = "사용자를 찾을 수 없습니다";
    pub const SERVER_ERROR: &str = "서버 오류가 발생했습니다";

    pub const USERNAME_TOO_SHORT: &str = "사용자 이름은 최소 3자 이상이어야 합니다";
    pub const PASSWORD_TOO_SHORT: &str = "비밀번호는 최소 4자 이상이어야 합니다";
    pub const USERNAME_TAKEN: &str = "이미 존재하는 사용자 이름입니다";
    pub const REGISTERED: &str = "계정이 생성되었습니다!";
    pub const REGISTER_FAILED: &str = "계정 생성 중 오류가 발생했습니다";

    pub const CREDENTIALS_REQUIRED: &str = "사용자 이름과 비밀번호를 입력하세요";
    pub const WRONG_PASSWORD: &str = "잘못된 비밀번호입니다";
    pub const LOGGED_IN: &str = "로그인 성공!";
    pub const LOGIN_FAILED: &str = "로그인 중 오류가 발생했습니다";
    pub const LOGGED_OUT: &str = "로그아웃되었습니다";

    pub const PROFILE_UPDATED: &str = "프로필이 업데이트되었습니다";
    pub const PROFILE_UPDATE_FAILED: &str = "프로필 업데이트 중 오류가 발생했습니다";
    pub const PROFILE_LOAD_FAILED: &str = "프로필 조회 중 오류가 발생했습니다";

    pub const GAME_SAVED: &str = "게임이 저장되었습니다";
    pub const SAVE_FAILED: &str = "게임 저장 중 오류가 발생했습니다";
    pub const LOAD_FAILED: &str = "저장된 게임을 불러오는 중 오류가 발생했습니다";
    pub const SAVE_DELETED: &str = "저장된 게임이 삭제되었습니다";
    pub const DELETE_FAILED: &str = "저장 삭제 중 오류가 발생했습니다";

    pub const LEADERBOARD_FAILED: &str = "리더보드 조회 중 오류가 발생했습니다";
}
