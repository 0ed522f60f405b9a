use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Pagination block included on search responses only
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub current_page: i64,
    pub total_page: i64,
    pub size: i64,
}

/// Wrapper for API responses producing the `{ data, paging? }` envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub paging: Option<Paging>,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            paging: None,
            status_code: None,
        }
    }

    /// Create a 201 Created response
    pub fn created(data: T) -> Self {
        Self {
            data,
            paging: None,
            status_code: Some(StatusCode::CREATED),
        }
    }

    /// Create a paginated response (search endpoint)
    pub fn paged(data: T, paging: Paging) -> Self {
        Self {
            data,
            paging: Some(paging),
            status_code: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "errors": "Failed to serialize response data" })),
                )
                    .into_response();
            }
        };

        let envelope = match self.paging {
            Some(paging) => json!({ "data": data_value, "paging": paging }),
            None => json!({ "data": data_value }),
        };

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_serializes_camel_case() {
        let paging = Paging {
            current_page: 2,
            total_page: 5,
            size: 10,
        };
        let value = serde_json::to_value(&paging).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "currentPage": 2, "totalPage": 5, "size": 10 })
        );
    }
}
