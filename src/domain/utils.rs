//! Argument normalization and upstream URL construction

use reqwest::Url;
use serde_json::{Map, Number, Value};
use url::form_urlencoded;

use crate::domain::catalog::{Endpoint, RootlyTool, ToolParameter};
use crate::errors::AppError;

pub const API_VERSION_SEGMENT: &str = "v1";

/// A tool bound to validated arguments, ready to be turned into an upstream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: RootlyTool,
    pub id: Option<String>,
    pub page_size: Option<String>,
}

impl ToolInvocation {
    pub fn resolve(tool: RootlyTool, arguments: &Map<String, Value>) -> Result<Self, AppError> {
        let id = match tool.parameter() {
            ToolParameter::Id { name, .. } => Some(required_id(arguments, name)?),
            ToolParameter::None | ToolParameter::Limit { .. } => None,
        };
        let page_size = normalize_limit(arguments.get("limit"))?
            .or_else(|| tool.default_page_size().map(|size| size.to_string()));

        Ok(Self {
            tool,
            id,
            page_size,
        })
    }

    pub fn path_segments(&self) -> Vec<&str> {
        let id = self.id.as_deref().unwrap_or_default();
        let mut segments = vec![API_VERSION_SEGMENT];

        match self.tool.endpoint() {
            Endpoint::Fixed(path) => segments.extend_from_slice(path),
            Endpoint::Member { collection } => segments.extend([collection, id]),
            Endpoint::Nested { collection, child } => segments.extend([collection, id, child]),
        }
        segments
    }
}

pub fn build_upstream_url(base: &Url, invocation: &ToolInvocation) -> Result<Url, AppError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::internal(format!("upstream base url {base} cannot carry a path")))?
        .pop_if_empty()
        .extend(invocation.path_segments());

    let query = invocation.page_size.as_deref().map(|page_size| {
        let value: String = form_urlencoded::byte_serialize(page_size.as_bytes()).collect();
        format!("page[size]={value}")
    });
    url.set_query(query.as_deref());

    Ok(url)
}

/// String identifiers are used exactly as given; only the empty string counts as missing.
pub fn required_id(arguments: &Map<String, Value>, name: &'static str) -> Result<String, AppError> {
    match arguments.get(name) {
        None | Some(Value::Null) => Err(AppError::bad_request(
            "missing_argument",
            format!("{name} is required"),
        )),
        Some(Value::String(value)) if value.is_empty() => Err(AppError::bad_request(
            "missing_argument",
            format!("{name} must not be empty"),
        )),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(render_number(value)),
        Some(_) => Err(AppError::bad_request(
            "invalid_argument",
            format!("{name} must be a string or number"),
        )),
    }
}

/// Any truthy scalar is forwarded as-is. Absent, `null`, `false`, `0`, and `""` mean "no limit
/// given"; the string `"0"` is not empty and is forwarded.
pub fn normalize_limit(limit: Option<&Value>) -> Result<Option<String>, AppError> {
    match limit {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::Bool(true)) => Ok(Some(true.to_string())),
        Some(Value::Number(value)) if value.as_f64() == Some(0.0) => Ok(None),
        Some(Value::Number(value)) => Ok(Some(render_number(value))),
        Some(Value::String(value)) if value.is_empty() => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(Value::Array(_) | Value::Object(_)) => Err(AppError::bad_request(
            "invalid_limit",
            "limit must be a number, string, or boolean",
        )),
    }
}

/// Integral floats drop the fraction, so `1.0` renders as `1`.
fn render_number(value: &Number) -> String {
    match value.as_f64() {
        Some(float) if value.is_f64() && float.is_finite() && float.fract() == 0.0 => {
            format!("{float:.0}")
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object arguments")
    }

    fn rootly_base() -> Url {
        Url::parse("https://api.rootly.com").expect("valid base")
    }

    fn url_for(tool: RootlyTool, arguments: Value) -> String {
        let invocation = ToolInvocation::resolve(tool, &args(arguments)).expect("resolves");
        build_upstream_url(&rootly_base(), &invocation)
            .expect("url builds")
            .to_string()
    }

    #[test]
    fn incidents_default_to_ten_per_page() {
        assert_eq!(
            url_for(RootlyTool::GetIncidents, json!({})),
            "https://api.rootly.com/v1/incidents?page[size]=10"
        );
    }

    #[test]
    fn alerts_honour_explicit_limit() {
        assert_eq!(
            url_for(RootlyTool::GetAlerts, json!({ "limit": 25 })),
            "https://api.rootly.com/v1/alerts?page[size]=25"
        );
    }

    #[test]
    fn other_listings_paginate_only_when_asked() {
        assert_eq!(
            url_for(RootlyTool::GetTeams, json!({})),
            "https://api.rootly.com/v1/teams"
        );
        assert_eq!(
            url_for(RootlyTool::GetTeams, json!({ "limit": "5" })),
            "https://api.rootly.com/v1/teams?page[size]=5"
        );
    }

    #[test]
    fn zero_limit_counts_as_absent() {
        assert_eq!(
            url_for(RootlyTool::GetAlerts, json!({ "limit": 0 })),
            "https://api.rootly.com/v1/alerts?page[size]=10"
        );
        assert_eq!(
            url_for(RootlyTool::GetServices, json!({ "limit": 0 })),
            "https://api.rootly.com/v1/services"
        );
    }

    #[test]
    fn nested_paths_interpolate_the_identifier() {
        assert_eq!(
            url_for(
                RootlyTool::GetIncidentActionItemsForIncident,
                json!({ "incident_id": "abc-123" })
            ),
            "https://api.rootly.com/v1/incidents/abc-123/action_items"
        );
        assert_eq!(
            url_for(RootlyTool::GetStatusPage, json!({ "status_page_id": 42 })),
            "https://api.rootly.com/v1/status_pages/42"
        );
    }

    #[test]
    fn current_user_uses_fixed_path() {
        assert_eq!(
            url_for(RootlyTool::GetCurrentUser, json!({})),
            "https://api.rootly.com/v1/users/me"
        );
    }

    #[test]
    fn identifiers_are_encoded_as_a_single_segment() {
        let url = url_for(RootlyTool::GetTeam, json!({ "team_id": "../secrets" }));
        assert_eq!(url, "https://api.rootly.com/v1/teams/..%2Fsecrets");
    }

    #[test]
    fn base_path_is_preserved() {
        let base = Url::parse("http://127.0.0.1:9000/proxy/").expect("valid base");
        let invocation =
            ToolInvocation::resolve(RootlyTool::GetUsers, &Map::new()).expect("resolves");

        let url = build_upstream_url(&base, &invocation).expect("url builds");
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/proxy/v1/users");
    }

    #[test]
    fn missing_identifier_is_rejected_before_building_url() {
        let error = ToolInvocation::resolve(RootlyTool::GetAlert, &Map::new())
            .expect_err("alert_id is required");
        assert!(matches!(
            error,
            AppError::BadRequest {
                code: "missing_argument",
                ..
            }
        ));
    }

    #[test]
    fn structured_identifier_is_rejected() {
        let error = ToolInvocation::resolve(
            RootlyTool::GetUser,
            &args(json!({ "user_id": { "id": 1 } })),
        )
        .expect_err("object id is invalid");
        assert!(matches!(
            error,
            AppError::BadRequest {
                code: "invalid_argument",
                ..
            }
        ));
    }

    #[test]
    fn truthy_limits_are_forwarded_verbatim() {
        for (limit, expected) in [
            (json!(2.5), "2.5"),
            (json!(-1), "-1"),
            (json!(3.0), "3"),
            (json!("ten"), "ten"),
            (json!(true), "true"),
        ] {
            assert_eq!(
                url_for(RootlyTool::GetTeams, json!({ "limit": limit })),
                format!("https://api.rootly.com/v1/teams?page[size]={expected}")
            );
        }
    }

    #[test]
    fn string_zero_is_not_falsy() {
        assert_eq!(
            url_for(RootlyTool::GetAlerts, json!({ "limit": "0" })),
            "https://api.rootly.com/v1/alerts?page[size]=0"
        );
    }

    #[test]
    fn falsy_limits_count_as_absent() {
        for limit in [json!(null), json!(false), json!(""), json!(0.0)] {
            assert_eq!(normalize_limit(Some(&limit)).expect("falsy limit"), None);
        }
    }

    #[test]
    fn limit_cannot_smuggle_query_parameters() {
        assert_eq!(
            url_for(RootlyTool::GetTeams, json!({ "limit": "5&filter=x" })),
            "https://api.rootly.com/v1/teams?page[size]=5%26filter%3Dx"
        );
    }

    #[test]
    fn structured_limit_is_rejected() {
        for limit in [json!([5]), json!({ "size": 5 })] {
            let error = normalize_limit(Some(&limit)).expect_err("invalid limit");
            assert!(matches!(
                error,
                AppError::BadRequest {
                    code: "invalid_limit",
                    ..
                }
            ));
        }
    }

    #[test]
    fn integral_float_identifier_drops_fraction() {
        assert_eq!(
            url_for(RootlyTool::GetStatusPage, json!({ "status_page_id": 1.0 })),
            "https://api.rootly.com/v1/status_pages/1"
        );
    }

    #[test]
    fn identifier_whitespace_is_kept() {
        assert_eq!(
            url_for(RootlyTool::GetTeam, json!({ "team_id": " abc " })),
            "https://api.rootly.com/v1/teams/%20abc%20"
        );
    }
}
